//! Token definitions for the Mino language.
//!
//! This module defines the token types produced by the Mino lexer and
//! consumed by the parser. Tokens represent the smallest meaningful units
//! of Mino source code, such as keywords, identifiers, operators, and
//! literals.
//!
//! # Token Categories
//!
//! - **Identifiers**: Variable and function names (`foo`, `my_var`)
//! - **Literals**: Integer, real, hexadecimal and string literals
//!   (`42`, `3.14`, `0x2A`, `"hello"`)
//! - **Keywords**: Language reserved words (`fun`, `if`, `while`, `loop`)
//! - **Operators**: Arithmetic, comparison, and logical operators
//! - **Punctuation**: Structural elements (`(`, `)`, `;`, `:`)
//! - **Sentinels**: End-of-file and lexical-error markers
//!
//! # Examples
//!
//! ```rust
//! use mino_syntax::{Token, TokenKind};
//!
//! let keyword = Token::new(TokenKind::Fun, "fun", 1);
//! let identifier = Token::new(TokenKind::Ident, "factorial", 1);
//!
//! assert_eq!(keyword.kind, TokenKind::Fun);
//! assert_eq!(identifier.lexeme, "factorial");
//! ```

/// Token types that can be produced by the Mino lexer.
///
/// The set is closed: every character sequence the lexer encounters maps to
/// one of these variants, including the two sentinels. [`Eof`](TokenKind::Eof)
/// marks the end of the stream and is repeated indefinitely once reached;
/// [`LexError`](TokenKind::LexError) marks input the lexer could not turn
/// into a real token, and is reported by the parser as a syntax error at
/// that token's line.
///
/// Variants carry no payload. The text a token covers lives in
/// [`Token::lexeme`]; parser decisions are made purely on the kind, the
/// lexeme is only used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // === Literals and identifiers ===
    /// An identifier (variable or function name)
    Ident,
    /// A decimal integer literal, e.g. `42`
    Int,
    /// A real (floating-point) literal, e.g. `3.14`
    Real,
    /// A hexadecimal integer literal, e.g. `0x2A`
    Hex,
    /// A string literal, e.g. `"hello"`
    Str,

    // === Keywords ===
    /// The `if` keyword
    If,
    /// The `else` keyword
    Else,
    /// The `end` keyword - closes `fun` and `if` blocks
    End,
    /// The `while` keyword
    While,
    /// The `loop` keyword - closes `while` blocks
    Loop,
    /// The `for` keyword - reserved, not accepted by any grammar rule
    For,
    /// The `fun` keyword - declares a function
    Fun,
    /// The `return` keyword
    Return,
    /// The `new` keyword - array allocation
    New,
    /// The `not` keyword - logical negation
    Not,
    /// The `and` keyword - logical conjunction
    And,
    /// The `or` keyword - logical disjunction
    Or,
    /// The `true` boolean literal
    True,
    /// The `false` boolean literal
    False,
    /// The `int` type keyword
    KwInt,
    /// The `char` type keyword
    KwChar,
    /// The `bool` type keyword
    KwBool,
    /// The `string` type keyword
    KwString,

    // === Operators ===
    /// Assignment `=`
    Assign,
    /// Equality comparison `==`
    EqEq,
    /// Inequality comparison `<>`
    NotEq,
    /// Less-than `<`
    Less,
    /// Less-than-or-equal `<=`
    LessEq,
    /// Greater-than `>`
    Greater,
    /// Greater-than-or-equal `>=`
    GreaterEq,
    /// Addition `+`
    Plus,
    /// Subtraction / unary minus `-`
    Minus,
    /// Multiplication `*`
    Star,
    /// Division `/`
    Slash,

    // === Punctuation ===
    /// Left parenthesis `(`
    LParen,
    /// Right parenthesis `)`
    RParen,
    /// Left square bracket `[`
    LBracket,
    /// Right square bracket `]`
    RBracket,
    /// Left curly brace `{` - recognized but not part of the grammar
    LBrace,
    /// Right curly brace `}` - recognized but not part of the grammar
    RBrace,
    /// Comma separator `,`
    Comma,
    /// Colon `:` - type annotations
    Colon,
    /// Statement terminator `;`
    Semicolon,

    // === Sentinels ===
    /// End-of-stream marker; repeated forever once the input is exhausted
    Eof,
    /// A lexical error surfaced as a token
    LexError,
}

impl TokenKind {
    /// Human-readable name of this token kind, as used in diagnostics.
    pub fn describe(&self) -> &'static str {
        use TokenKind::*;
        match self {
            Ident => "identifier",
            Int => "integer literal",
            Real => "real literal",
            Hex => "hexadecimal literal",
            Str => "string literal",
            If => "'if'",
            Else => "'else'",
            End => "'end'",
            While => "'while'",
            Loop => "'loop'",
            For => "'for'",
            Fun => "'fun'",
            Return => "'return'",
            New => "'new'",
            Not => "'not'",
            And => "'and'",
            Or => "'or'",
            True => "'true'",
            False => "'false'",
            KwInt => "'int'",
            KwChar => "'char'",
            KwBool => "'bool'",
            KwString => "'string'",
            Assign => "'='",
            EqEq => "'=='",
            NotEq => "'<>'",
            Less => "'<'",
            LessEq => "'<='",
            Greater => "'>'",
            GreaterEq => "'>='",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            Slash => "'/'",
            LParen => "'('",
            RParen => "')'",
            LBracket => "'['",
            RBracket => "']'",
            LBrace => "'{'",
            RBrace => "'}'",
            Comma => "','",
            Colon => "':'",
            Semicolon => "';'",
            Eof => "end of input",
            LexError => "invalid token",
        }
    }
}

/// A token with its source text and line number.
///
/// Combines a [`TokenKind`] with the lexeme it covers and the 1-based line
/// it starts on. The parser dispatches on `kind` only; `lexeme` and `line`
/// feed error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The syntactic category of this token
    pub kind: TokenKind,

    /// The source text this token covers
    pub lexeme: String,

    /// Line number in the source file (1-based)
    pub line: usize,
}

impl Token {
    /// Create a token from its parts.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }

    /// Create an end-of-stream token at the given line.
    pub fn eof(line: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            line,
        }
    }
}

/// A source of tokens for one parse run.
///
/// The parser pulls tokens on demand and never looks more than one token
/// ahead. Implementations must keep yielding the [`TokenKind::Eof`] token
/// once the underlying input is exhausted, so callers never need a separate
/// "exhausted" check.
pub trait TokenSource {
    /// Produce the next token.
    fn next_token(&mut self) -> Token;
}

/// A [`TokenSource`] backed by a pre-materialized token vector.
///
/// If the vector does not end in an [`TokenKind::Eof`] token, one is
/// synthesized at the line of the last token; either way the Eof token is
/// repeated forever once reached.
#[derive(Debug)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenBuffer {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }
}

impl TokenSource for TokenBuffer {
    fn next_token(&mut self) -> Token {
        match self.tokens.get(self.pos) {
            Some(tok) => {
                self.pos += 1;
                tok.clone()
            }
            None => Token::eof(self.tokens.last().map_or(1, |t| t.line)),
        }
    }
}
