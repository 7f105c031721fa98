//! One-token-lookahead cursor over a token source.

use mino_syntax::{Token, TokenKind, TokenSource};

/// Holds the current lookahead token and pulls the next one on demand.
///
/// The cursor never looks more than one token ahead. Once the lookahead is
/// the end-of-stream token, `peek` and `advance` both keep returning it
/// indefinitely, so callers never need a separate exhaustion check.
pub struct Cursor<S: TokenSource> {
    source: S,
    lookahead: Token,
}

impl<S: TokenSource> Cursor<S> {
    /// Wrap a token source, pulling the first lookahead.
    pub fn new(mut source: S) -> Self {
        let lookahead = source.next_token();
        Self { source, lookahead }
    }

    /// The current lookahead token, without consuming it.
    pub fn peek(&self) -> &Token {
        &self.lookahead
    }

    /// Consume the current token and return it, pulling the next from the
    /// source. Idempotent at end-of-stream.
    pub fn advance(&mut self) -> Token {
        if self.lookahead.kind == TokenKind::Eof {
            return self.lookahead.clone();
        }
        let next = self.source.next_token();
        std::mem::replace(&mut self.lookahead, next)
    }

    /// True iff the lookahead is the end-of-stream token.
    pub fn at_eof(&self) -> bool {
        self.lookahead.kind == TokenKind::Eof
    }

    /// Pin the lookahead to end-of-stream at the current line.
    ///
    /// Used by the hard bounds (recovery skip cap, nesting ceiling) to make
    /// the whole parse unwind: every grammar loop terminates at Eof.
    pub fn force_eof(&mut self) {
        self.lookahead = Token::eof(self.lookahead.line);
    }
}
