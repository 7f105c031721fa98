//! Syntax diagnostics for the Mino toolchain.
//!
//! The parser never aborts on a syntax error: it records a
//! [`ParseDiagnostic`] and keeps going, so a single run over a file reports
//! every error it can reach. This module holds the diagnostic record, the
//! final [`ParseResult`] verdict, and the one place where diagnostic
//! message text is assembled.
//!
//! # Examples
//!
//! ```rust
//! use mino_syntax::{ParseDiagnostic, Token, TokenKind};
//!
//! let found = Token::new(TokenKind::RBrace, "}", 7);
//! let diag = ParseDiagnostic::expected("'end'", &found);
//!
//! assert_eq!(diag.line, 7);
//! assert_eq!(diag.to_string(), "Error [Line 7]: expected 'end', found '}'");
//! ```

use std::fmt;

use crate::token::{Token, TokenKind};

/// A single syntax error, bound to a source line.
///
/// Diagnostics are collected in detection order during one parse run. That
/// order is not necessarily source order: panic-mode recovery may jump the
/// parser forward past errors it never reached in a nested context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    /// Line number the error was detected on (1-based)
    pub line: usize,

    /// Human-readable error description
    pub message: String,
}

impl ParseDiagnostic {
    /// Create a diagnostic with a literal message.
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }

    /// The standard "expected X, found Y" diagnostic.
    ///
    /// All grammar routines report mismatches through this constructor so
    /// the message shape stays uniform. `expected` is a description such as
    /// `"'end'"` or `"an expression"`; the found part is taken from the
    /// offending token.
    pub fn expected(expected: &str, found: &Token) -> Self {
        let found_desc = match found.kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("'{}'", found.lexeme),
        };
        Self {
            line: found.line,
            message: format!("expected {}, found {}", expected, found_desc),
        }
    }

    /// Diagnostic for a lexical-error token surfaced by the scanner.
    pub fn invalid_token(found: &Token) -> Self {
        Self {
            line: found.line,
            message: format!("unrecognized token '{}'", found.lexeme),
        }
    }
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error [Line {}]: {}", self.line, self.message)
    }
}

/// The verdict of one parse run.
///
/// `ok` is true iff `errors` is empty after the full token stream has been
/// traversed. The parser always returns one of these; syntax errors never
/// surface as `Err` or as panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    /// True iff no syntax errors were detected
    pub ok: bool,

    /// All diagnostics, in detection order
    pub errors: Vec<ParseDiagnostic>,
}

impl ParseResult {
    /// Build the verdict from the accumulated diagnostics.
    pub fn from_errors(errors: Vec<ParseDiagnostic>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
        }
    }
}
