//! Predictive recursive-descent syntax checker with panic-mode recovery.
//!
//! One routine per grammar nonterminal, each dispatching on the single
//! lookahead token. A mismatch records a diagnostic and resynchronizes on a
//! context-specific token set instead of aborting, so one pass over the
//! stream reports every reachable error. No AST is built: the parser is a
//! pure recognizer.
//!
//! The grammar:
//!
//! ```text
//! program        := declaration+
//! declaration    := varDecl | funcDecl
//! varDecl        := type ID ('=' expr)? ';'
//! type           := ('int' | 'char' | 'bool' | 'string') ('[' ']')*
//! funcDecl       := 'fun' ID '(' paramList? ')' (':' type)? block 'end'
//! paramList      := ID ':' type (',' ID ':' type)*
//! block          := varDecl* statement*
//! statement      := ifStmt | whileStmt | returnStmt | assignOrCall
//! ifStmt         := 'if' expr block ('else' ('if' expr block)* block?)? 'end'
//! whileStmt      := 'while' expr block 'loop'
//! returnStmt     := 'return' expr? ';'
//! assignOrCall   := ID indexSuffix* '=' expr ';'  |  ID callSuffix ';'
//! expr           := logicOr
//! logicOr        := logicAnd ('or' logicAnd)*
//! logicAnd       := relational ('and' relational)*
//! relational     := additive (relOp additive)*
//! additive       := multiplicative (('+'|'-') multiplicative)*
//! multiplicative := unary (('*'|'/') unary)*
//! unary          := ('not'|'-')? primary
//! primary        := INT | REAL | HEX | STRING | 'true' | 'false'
//!                 | ID (callSuffix | indexSuffix*)?
//!                 | '(' expr ')' | 'new' baseType '[' expr ']'
//! ```

use mino_syntax::{ParseDiagnostic, ParseResult, Token, TokenBuffer, TokenKind, TokenSource};

use crate::cursor::Cursor;

use TokenKind::*;

/// Maximum tokens panic-mode recovery may discard in one synchronization.
/// Hitting the cap pins the cursor at end-of-stream so the run terminates.
const MAX_RECOVERY_SKIP: usize = 100;

/// Maximum nesting of statements and expressions before the run gives up.
const MAX_NESTING_DEPTH: usize = 1000;

/// Token kinds that can start a type.
const TYPE_FIRST: &[TokenKind] = &[KwInt, KwChar, KwBool, KwString];

/// Token kinds that can start a statement.
const STMT_FIRST: &[TokenKind] = &[If, While, Return, Ident];

/// Token kinds that can start an expression.
const EXPR_FIRST: &[TokenKind] = &[
    Int, Real, Hex, Str, True, False, Ident, LParen, Minus, Not, New,
];

/// Relational operators, all at one precedence tier.
const REL_OPS: &[TokenKind] = &[EqEq, NotEq, Less, LessEq, Greater, GreaterEq];

// Synchronization sets. Each recovery context re-anchors at tokens that are
// syntactically meaningful there, not at one global set.

/// Statement-level recovery: statement terminators and starters, block
/// closers, and everything that can start a declaration.
const STMT_SYNC: &[TokenKind] = &[
    Semicolon, End, Loop, Else, If, While, Return, Ident, Fun, KwInt, KwChar, KwBool, KwString,
    Eof,
];

/// Expression-level recovery: the delimiters an expression can run into.
const EXPR_SYNC: &[TokenKind] = &[Semicolon, RParen, RBracket, Eof];

/// Top-level recovery: the start of the next declaration.
const DECL_SYNC: &[TokenKind] = &[Fun, KwInt, KwChar, KwBool, KwString, Eof];

/// Parameter-list recovery: the next separator or the closing paren.
const PARAM_SYNC: &[TokenKind] = &[Comma, RParen, Eof];

/// Block-terminator recovery: block closers and declaration starters.
const BLOCK_END_SYNC: &[TokenKind] = &[
    End, Loop, Else, Fun, KwInt, KwChar, KwBool, KwString, Eof,
];

/// Recovery toward the start of an expression, for a missing operator or
/// keyword directly in front of one.
const EXPR_START_SYNC: &[TokenKind] = &[
    Int, Real, Hex, Str, True, False, Ident, LParen, Minus, Not, New, Semicolon, Eof,
];

/// The syntax checker for one token stream.
///
/// Owns the lookahead cursor and the diagnostics list for a single run;
/// nothing is shared across runs. Construct, call [`run`](Parser::run),
/// inspect the returned [`ParseResult`]. Syntax errors never panic and
/// never abort the pass.
pub struct Parser<S: TokenSource> {
    cursor: Cursor<S>,
    errors: Vec<ParseDiagnostic>,
    depth: usize,
    halted: bool,
}

impl Parser<TokenBuffer> {
    /// Create a parser over a pre-materialized token vector.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::from_source(TokenBuffer::new(tokens))
    }
}

impl<S: TokenSource> Parser<S> {
    /// Create a parser pulling tokens on demand from `source`.
    pub fn from_source(source: S) -> Self {
        Self {
            cursor: Cursor::new(source),
            errors: Vec::new(),
            depth: 0,
            halted: false,
        }
    }

    /// Run the full grammar over the token stream and return the verdict.
    ///
    /// Always completes in a single pass; `ok` is true iff no diagnostics
    /// were recorded.
    pub fn run(mut self) -> ParseResult {
        self.program();
        ParseResult::from_errors(self.errors)
    }

    // === Primitives ===

    fn at(&self, kind: TokenKind) -> bool {
        self.cursor.peek().kind == kind
    }

    fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.cursor.peek().kind)
    }

    fn error(&mut self, diag: ParseDiagnostic) {
        if !self.halted {
            self.errors.push(diag);
        }
    }

    /// Stop the run: pin the cursor at end-of-stream and suppress any
    /// further diagnostics so the unwind stays quiet.
    fn halt(&mut self) {
        self.halted = true;
        self.cursor.force_eof();
    }

    /// Consume the lookahead iff it has the given kind.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.cursor.advance();
            true
        } else {
            false
        }
    }

    /// Consume the lookahead iff it has the given kind; otherwise record an
    /// "expected …" diagnostic named after the kind and leave the
    /// mismatched token in place. The caller decides how to resynchronize.
    fn expect(&mut self, kind: TokenKind) -> bool {
        self.expect_named(kind, kind.describe())
    }

    /// Like [`expect`](Parser::expect), with a role description ("function
    /// name") instead of the kind's own name.
    fn expect_named(&mut self, kind: TokenKind, what: &str) -> bool {
        if self.at(kind) {
            self.cursor.advance();
            true
        } else {
            let diag = ParseDiagnostic::expected(what, self.cursor.peek());
            self.error(diag);
            false
        }
    }

    /// Panic-mode recovery: discard tokens until the lookahead is in
    /// `sync`, the stream ends, or the skip budget runs out. Budget
    /// exhaustion forces end-of-stream so the run still terminates.
    fn synchronize(&mut self, sync: &[TokenKind]) {
        let mut skipped = 0;
        while !self.cursor.at_eof() && !sync.contains(&self.cursor.peek().kind) {
            if skipped >= MAX_RECOVERY_SKIP {
                self.halt();
                return;
            }
            self.cursor.advance();
            skipped += 1;
        }
    }

    /// Nesting guard, called on entry to `statement` and `expr` (every
    /// grammar cycle passes through one of them). Above the ceiling the run
    /// records a single diagnostic and unwinds via [`halt`](Parser::halt).
    fn enter(&mut self) -> bool {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            let diag = ParseDiagnostic::new(
                self.cursor.peek().line,
                "nesting is too deep to continue parsing",
            );
            self.error(diag);
            self.halt();
            return false;
        }
        true
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Report a lexical-error token at its line and step past it.
    fn report_lex_error(&mut self) {
        let tok = self.cursor.advance();
        self.error(ParseDiagnostic::invalid_token(&tok));
    }

    // === Declarations ===

    /// program := declaration+
    fn program(&mut self) {
        if self.cursor.at_eof() {
            let diag = ParseDiagnostic::expected("a declaration", self.cursor.peek());
            self.error(diag);
            return;
        }
        while !self.cursor.at_eof() {
            if self.at(Fun) {
                self.func_decl();
            } else if self.at_any(TYPE_FIRST) {
                self.var_decl();
            } else if self.at(LexError) {
                self.report_lex_error();
            } else {
                let diag = ParseDiagnostic::expected("a declaration", self.cursor.peek());
                self.error(diag);
                self.synchronize(DECL_SYNC);
            }
        }
    }

    /// varDecl := type ID ('=' expr)? ';'
    fn var_decl(&mut self) {
        self.parse_type();
        if !self.expect(Ident) {
            self.synchronize(&[Assign, Semicolon, Eof]);
        }
        if self.eat(Assign) {
            self.expr();
        }
        if !self.expect(Semicolon) {
            self.synchronize(STMT_SYNC);
            self.eat(Semicolon);
        }
    }

    /// baseType := 'int' | 'char' | 'bool' | 'string'
    fn base_type(&mut self) -> bool {
        if self.at_any(TYPE_FIRST) {
            self.cursor.advance();
            true
        } else {
            let diag = ParseDiagnostic::expected("a type", self.cursor.peek());
            self.error(diag);
            false
        }
    }

    /// type := baseType ('[' ']')*
    fn parse_type(&mut self) {
        if !self.base_type() {
            return;
        }
        while self.eat(LBracket) {
            if !self.expect(RBracket) {
                break;
            }
        }
    }

    /// funcDecl := 'fun' ID '(' paramList? ')' (':' type)? block 'end'
    fn func_decl(&mut self) {
        self.cursor.advance(); // 'fun'
        if !self.expect_named(Ident, "function name") {
            self.synchronize(&[LParen, Eof]);
        }
        if !self.expect(LParen) {
            self.synchronize(&[Ident, LParen, RParen, Eof]);
            self.eat(LParen);
        }
        if self.at(Ident) {
            self.param_list();
        }
        if !self.expect(RParen) {
            self.synchronize(&[RParen, Colon, End, Eof]);
            self.eat(RParen);
        }
        if self.eat(Colon) {
            self.parse_type();
        }
        self.block();
        if !self.expect(End) {
            self.synchronize(BLOCK_END_SYNC);
            self.eat(End);
        }
    }

    /// paramList := ID ':' type (',' ID ':' type)*
    fn param_list(&mut self) {
        loop {
            self.param();
            if self.eat(Comma) {
                continue;
            }
            if self.at(RParen) || self.cursor.at_eof() {
                break;
            }
            let diag = ParseDiagnostic::expected("',' or ')'", self.cursor.peek());
            self.error(diag);
            self.synchronize(PARAM_SYNC);
            if !self.eat(Comma) {
                break;
            }
        }
    }

    fn param(&mut self) {
        if !self.expect_named(Ident, "parameter name") {
            self.synchronize(&[Colon, Comma, RParen, Eof]);
        }
        if !self.expect(Colon) {
            self.synchronize(PARAM_SYNC);
            return;
        }
        self.parse_type();
    }

    // === Statements ===

    /// block := varDecl* statement*
    ///
    /// Both loops are driven purely by First-set membership of the
    /// lookahead; any token outside them ends the block, which doubles as
    /// the fallback recovery point for the enclosing construct.
    fn block(&mut self) {
        while self.at_any(TYPE_FIRST) {
            self.var_decl();
        }
        loop {
            if self.at_any(STMT_FIRST) {
                self.statement();
            } else if self.at(LexError) {
                self.report_lex_error();
                self.synchronize(STMT_SYNC);
            } else {
                break;
            }
        }
    }

    /// statement := ifStmt | whileStmt | returnStmt | assignOrCall
    fn statement(&mut self) {
        if !self.enter() {
            return;
        }
        match self.cursor.peek().kind {
            If => self.if_stmt(),
            While => self.while_stmt(),
            Return => self.return_stmt(),
            Ident => self.assign_or_call(),
            _ => {
                let diag = ParseDiagnostic::expected("a statement", self.cursor.peek());
                self.error(diag);
                self.synchronize(STMT_SYNC);
            }
        }
        self.leave();
    }

    /// ifStmt := 'if' expr block ('else' ('if' expr block)* block?)? 'end'
    fn if_stmt(&mut self) {
        self.cursor.advance(); // 'if'
        self.expr();
        self.block();
        while self.eat(Else) {
            if self.eat(If) {
                self.expr();
                self.block();
            } else {
                self.block();
                break;
            }
        }
        if !self.expect(End) {
            self.synchronize(BLOCK_END_SYNC);
            self.eat(End);
        }
    }

    /// whileStmt := 'while' expr block 'loop'
    fn while_stmt(&mut self) {
        self.cursor.advance(); // 'while'
        self.expr();
        self.block();
        if !self.expect(Loop) {
            self.synchronize(BLOCK_END_SYNC);
            self.eat(Loop);
        }
    }

    /// returnStmt := 'return' expr? ';'
    fn return_stmt(&mut self) {
        self.cursor.advance(); // 'return'
        if self.at_any(EXPR_FIRST) {
            self.expr();
        }
        if !self.expect(Semicolon) {
            self.synchronize(STMT_SYNC);
            self.eat(Semicolon);
        }
    }

    /// assignOrCall := ID indexSuffix* '=' expr ';' | ID callSuffix ';'
    fn assign_or_call(&mut self) {
        self.cursor.advance(); // identifier
        if self.at(LParen) {
            self.call_suffix();
        } else {
            while self.eat(LBracket) {
                self.expr();
                if !self.expect(RBracket) {
                    self.synchronize(&[RBracket, Assign, Semicolon, Eof]);
                    self.eat(RBracket);
                }
            }
            let have_rhs = if self.expect(Assign) {
                true
            } else {
                // re-anchor at the right-hand side if one follows
                self.synchronize(EXPR_START_SYNC);
                self.at_any(EXPR_FIRST)
            };
            if have_rhs {
                self.expr();
            }
        }
        if !self.expect(Semicolon) {
            self.synchronize(STMT_SYNC);
            self.eat(Semicolon);
        }
    }

    // === Expressions ===
    //
    // Each precedence tier is a base call into the next-higher tier plus a
    // left-associative suffix loop, the iterative form of left-recursion
    // elimination.

    /// expr := logicOr
    fn expr(&mut self) {
        if !self.enter() {
            return;
        }
        self.logic_or();
        self.leave();
    }

    /// logicOr := logicAnd ('or' logicAnd)*
    fn logic_or(&mut self) {
        self.logic_and();
        while self.eat(Or) {
            self.logic_and();
        }
    }

    /// logicAnd := relational ('and' relational)*
    fn logic_and(&mut self) {
        self.relational();
        while self.eat(And) {
            self.relational();
        }
    }

    /// relational := additive (relOp additive)*
    fn relational(&mut self) {
        self.additive();
        while self.at_any(REL_OPS) {
            self.cursor.advance();
            self.additive();
        }
    }

    /// additive := multiplicative (('+'|'-') multiplicative)*
    fn additive(&mut self) {
        self.multiplicative();
        while self.at(Plus) || self.at(Minus) {
            self.cursor.advance();
            self.multiplicative();
        }
    }

    /// multiplicative := unary (('*'|'/') unary)*
    fn multiplicative(&mut self) {
        self.unary();
        while self.at(Star) || self.at(Slash) {
            self.cursor.advance();
            self.unary();
        }
    }

    /// unary := ('not'|'-')? primary
    fn unary(&mut self) {
        if self.at(Not) || self.at(Minus) {
            self.cursor.advance();
        }
        self.primary();
    }

    /// primary := literal | ID (callSuffix | indexSuffix*)? | '(' expr ')'
    ///          | 'new' baseType '[' expr ']'
    fn primary(&mut self) {
        match self.cursor.peek().kind {
            Int | Real | Hex | Str | True | False => {
                self.cursor.advance();
            }
            Ident => {
                self.cursor.advance();
                if self.at(LParen) {
                    self.call_suffix();
                } else {
                    while self.eat(LBracket) {
                        self.expr();
                        if !self.expect(RBracket) {
                            self.synchronize(EXPR_SYNC);
                            self.eat(RBracket);
                        }
                    }
                }
            }
            LParen => {
                self.cursor.advance();
                self.expr();
                if !self.expect(RParen) {
                    self.synchronize(EXPR_SYNC);
                    self.eat(RParen);
                }
            }
            New => {
                self.cursor.advance();
                if !self.base_type() {
                    self.synchronize(EXPR_SYNC);
                    return;
                }
                if !self.expect(LBracket) {
                    self.synchronize(EXPR_SYNC);
                    return;
                }
                self.expr();
                if !self.expect(RBracket) {
                    self.synchronize(EXPR_SYNC);
                    self.eat(RBracket);
                }
            }
            LexError => {
                self.report_lex_error();
                self.synchronize(EXPR_SYNC);
            }
            _ => {
                let diag = ParseDiagnostic::expected("an expression", self.cursor.peek());
                self.error(diag);
                self.synchronize(EXPR_SYNC);
            }
        }
    }

    /// callSuffix := '(' (expr (',' expr)*)? ')'
    fn call_suffix(&mut self) {
        self.cursor.advance(); // '('
        if !self.at(RParen) && !self.cursor.at_eof() {
            self.expr();
            while self.eat(Comma) {
                self.expr();
            }
        }
        if !self.expect(RParen) {
            self.synchronize(EXPR_SYNC);
            self.eat(RParen);
        }
    }
}

/// Check a pre-lexed token stream and return the verdict.
pub fn check(tokens: Vec<Token>) -> ParseResult {
    Parser::new(tokens).run()
}
