//! Mino lexer: converts source text into tokens.
//!
//! The lexer is infallible by design. Input it cannot tokenize becomes a
//! [`TokenKind::LexError`] token carrying the offending text, which the
//! parser reports at that line and recovers from like any other unexpected
//! token. The token vector always ends with a single `Eof` token.
use mino_syntax::{Token, TokenKind};

/// Streaming character scanner that produces line-annotated tokens.
pub struct Lexer {
    src: Vec<char>,
    pos: usize,
    line: usize,
}

impl Lexer {
    /// Create a new lexer over the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            src: input.chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }
    fn peek_next(&self) -> Option<char> {
        self.src.get(self.pos + 1).copied()
    }
    fn advance(&mut self) -> Option<char> {
        let ch = self.src.get(self.pos).copied();
        if let Some(c) = ch {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
            }
        }
        ch
    }

    fn make_token(&self, kind: TokenKind, lexeme: &str) -> Token {
        Token::new(kind, lexeme, self.line)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else if c == '#' {
                while let Some(c2) = self.peek() {
                    self.advance();
                    if c2 == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> Token {
        let start_line = self.line;
        let mut s = String::new();

        // 0x / 0X prefix switches to hexadecimal
        if self.peek() == Some('0') && matches!(self.peek_next(), Some('x') | Some('X')) {
            s.push(self.advance().unwrap_or('0'));
            s.push(self.advance().unwrap_or('x'));
            let mut has_digits = false;
            while let Some(c) = self.peek() {
                if c.is_ascii_hexdigit() {
                    s.push(c);
                    self.advance();
                    has_digits = true;
                } else {
                    break;
                }
            }
            let kind = if has_digits {
                TokenKind::Hex
            } else {
                TokenKind::LexError
            };
            return Token::new(kind, s, start_line);
        }

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let mut kind = TokenKind::Int;
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            kind = TokenKind::Real;
            s.push('.');
            self.advance();
            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    s.push(c);
                    self.advance();
                } else {
                    break;
                }
            }
        }
        Token::new(kind, s, start_line)
    }

    fn read_ident_or_keyword(&mut self) -> Token {
        let start_line = self.line;
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let kind = match s.as_str() {
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "end" => TokenKind::End,
            "while" => TokenKind::While,
            "loop" => TokenKind::Loop,
            "for" => TokenKind::For,
            "fun" => TokenKind::Fun,
            "return" => TokenKind::Return,
            "new" => TokenKind::New,
            "not" => TokenKind::Not,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "int" => TokenKind::KwInt,
            "char" => TokenKind::KwChar,
            "bool" => TokenKind::KwBool,
            "string" => TokenKind::KwString,
            _ => TokenKind::Ident,
        };
        Token::new(kind, s, start_line)
    }

    fn read_string(&mut self) -> Token {
        let start_line = self.line;
        let mut s = String::new();
        self.advance(); // opening quote
        while let Some(c) = self.advance() {
            match c {
                '"' => return Token::new(TokenKind::Str, s, start_line),
                '\n' => break,
                '\\' => {
                    if let Some(n) = self.advance() {
                        let esc = match n {
                            'n' => '\n',
                            't' => '\t',
                            'r' => '\r',
                            '\\' => '\\',
                            '"' => '"',
                            other => other,
                        };
                        s.push(esc);
                    } else {
                        break;
                    }
                }
                other => s.push(other),
            }
        }
        // unterminated string: surface the partial text as a lex error
        Token::new(TokenKind::LexError, format!("\"{}", s), start_line)
    }

    /// Tokenize the entire input into a vector of tokens ending with Eof.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let tk = match self.peek() {
                None => {
                    tokens.push(Token::eof(self.line));
                    break;
                }
                Some('(') => {
                    self.advance();
                    self.make_token(TokenKind::LParen, "(")
                }
                Some(')') => {
                    self.advance();
                    self.make_token(TokenKind::RParen, ")")
                }
                Some('[') => {
                    self.advance();
                    self.make_token(TokenKind::LBracket, "[")
                }
                Some(']') => {
                    self.advance();
                    self.make_token(TokenKind::RBracket, "]")
                }
                Some('{') => {
                    self.advance();
                    self.make_token(TokenKind::LBrace, "{")
                }
                Some('}') => {
                    self.advance();
                    self.make_token(TokenKind::RBrace, "}")
                }
                Some(',') => {
                    self.advance();
                    self.make_token(TokenKind::Comma, ",")
                }
                Some(':') => {
                    self.advance();
                    self.make_token(TokenKind::Colon, ":")
                }
                Some(';') => {
                    self.advance();
                    self.make_token(TokenKind::Semicolon, ";")
                }
                Some('+') => {
                    self.advance();
                    self.make_token(TokenKind::Plus, "+")
                }
                Some('-') => {
                    self.advance();
                    self.make_token(TokenKind::Minus, "-")
                }
                Some('*') => {
                    self.advance();
                    self.make_token(TokenKind::Star, "*")
                }
                Some('/') => {
                    self.advance();
                    self.make_token(TokenKind::Slash, "/")
                }
                Some('=') => {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        self.make_token(TokenKind::EqEq, "==")
                    } else {
                        self.make_token(TokenKind::Assign, "=")
                    }
                }
                Some('<') => {
                    self.advance();
                    match self.peek() {
                        Some('=') => {
                            self.advance();
                            self.make_token(TokenKind::LessEq, "<=")
                        }
                        Some('>') => {
                            self.advance();
                            self.make_token(TokenKind::NotEq, "<>")
                        }
                        _ => self.make_token(TokenKind::Less, "<"),
                    }
                }
                Some('>') => {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        self.make_token(TokenKind::GreaterEq, ">=")
                    } else {
                        self.make_token(TokenKind::Greater, ">")
                    }
                }
                Some('"') => self.read_string(),
                Some(c) if c.is_ascii_digit() => self.read_number(),
                Some(c) if c.is_ascii_alphabetic() || c == '_' => self.read_ident_or_keyword(),
                Some(other) => {
                    let line = self.line;
                    self.advance();
                    Token::new(TokenKind::LexError, other.to_string(), line)
                }
            };
            tokens.push(tk);
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input).tokenize().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            kinds("fun f end"),
            vec![TokenKind::Fun, TokenKind::Ident, TokenKind::End, TokenKind::Eof]
        );
        assert_eq!(
            kinds("while loop if else"),
            vec![
                TokenKind::While,
                TokenKind::Loop,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn numeric_literals() {
        assert_eq!(kinds("42"), vec![TokenKind::Int, TokenKind::Eof]);
        assert_eq!(kinds("3.14"), vec![TokenKind::Real, TokenKind::Eof]);
        assert_eq!(kinds("0x2A"), vec![TokenKind::Hex, TokenKind::Eof]);
        // a bare 0x prefix is not a number
        assert_eq!(kinds("0x"), vec![TokenKind::LexError, TokenKind::Eof]);
    }

    #[test]
    fn operators() {
        assert_eq!(
            kinds("= == < <= <> > >="),
            vec![
                TokenKind::Assign,
                TokenKind::EqEq,
                TokenKind::Less,
                TokenKind::LessEq,
                TokenKind::NotEq,
                TokenKind::Greater,
                TokenKind::GreaterEq,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn strings_and_escapes() {
        let tokens = Lexer::new("\"a\\nb\"").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[0].lexeme, "a\nb");
    }

    #[test]
    fn unterminated_string_is_lex_error() {
        let tokens = Lexer::new("\"abc").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::LexError);
    }

    #[test]
    fn unknown_character_is_lex_error() {
        let tokens = Lexer::new("x = @ ;").tokenize();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::LexError,
                TokenKind::Semicolon,
                TokenKind::Eof
            ]
        );
        assert_eq!(tokens[2].lexeme, "@");
    }

    #[test]
    fn lines_are_tracked() {
        let tokens = Lexer::new("x\n# comment\ny").tokenize();
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(kinds("# only a comment\n"), vec![TokenKind::Eof]);
    }
}
