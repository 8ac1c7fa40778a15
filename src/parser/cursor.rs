//! Repositionable view over a token sequence
//!
//! The cursor is the only component that knows the read offset. Tokens are
//! never mutated; [`TokenCursor::mark`] and [`TokenCursor::rewind`] are O(1).

use text_size::TextSize;

use super::errors::ParseError;
use super::lexer::Token;
use super::syntax_kind::SyntaxKind;

/// Opaque read offset returned by [`TokenCursor::mark`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CursorPos(usize);

impl CursorPos {
    /// Index of the token at this position
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    /// Wrap a token sequence that ends with an `EOF` token.
    pub fn new(tokens: &'a [Token<'a>]) -> Result<Self, ParseError> {
        match tokens.last() {
            Some(last) if last.kind == SyntaxKind::EOF => Ok(Self { tokens, pos: 0 }),
            _ => Err(ParseError::Unterminated),
        }
    }

    /// The token at the read offset, not consumed
    pub fn current(&self) -> &Token<'a> {
        &self.tokens[self.pos]
    }

    /// Look `n` tokens ahead, clamped to the end marker
    pub fn nth(&self, n: usize) -> &Token<'a> {
        let index = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    pub fn at_eof(&self) -> bool {
        self.current().kind == SyntaxKind::EOF
    }

    /// Consume and return the current token
    pub fn advance(&mut self) -> Result<Token<'a>, ParseError> {
        let token = self.tokens[self.pos];
        if token.kind == SyntaxKind::EOF {
            return Err(ParseError::EndOfStream { at: token.offset() });
        }
        self.pos += 1;
        Ok(token)
    }

    pub fn mark(&self) -> CursorPos {
        CursorPos(self.pos)
    }

    /// Reset the read offset to a previously returned position.
    pub fn rewind(&mut self, pos: CursorPos) -> Result<(), ParseError> {
        if pos.0 >= self.tokens.len() {
            return Err(ParseError::InvalidPosition { pos: pos.0 });
        }
        self.pos = pos.0;
        Ok(())
    }

    /// End offset of the last consumed token, or the start of the current
    /// token if nothing has been consumed yet
    pub fn prev_end(&self) -> TextSize {
        match self.pos.checked_sub(1) {
            Some(prev) => self.tokens[prev].range.end(),
            None => self.current().offset(),
        }
    }

    /// The token at an earlier position
    pub fn token_at(&self, pos: CursorPos) -> &Token<'a> {
        &self.tokens[pos.0.min(self.tokens.len() - 1)]
    }

    pub fn tokens(&self) -> &'a [Token<'a>] {
        self.tokens
    }
}
