//! Fatal parse outcomes
//!
//! These abort the whole parse. Ordinary rule mismatches are not errors at
//! all; they are the `Ok(None)` of a rule's result.

use text_size::{TextRange, TextSize};
use thiserror::Error;

use super::codes::ErrorCode;
use super::error::Diagnostic;
use crate::base::NodeId;

/// An unrecoverable parser outcome
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A token was required but the cursor sits on the end marker
    #[error("unexpected end of file at offset {}", u32::from(*at))]
    EndOfStream { at: TextSize },

    /// Nesting exceeds the configured limit
    #[error("nesting exceeds the limit of {limit} at offset {}", u32::from(*at))]
    DepthExceeded { limit: usize, at: TextSize },

    /// A cursor position that does not belong to this token stream
    #[error("cursor position {pos} is outside the token stream")]
    InvalidPosition { pos: usize },

    /// A diagnostic log marker beyond the current log length
    #[error("log marker {marker} exceeds log length {len}")]
    InvalidMarker { marker: usize, len: usize },

    /// Back-fill of a node that is not an unfilled placeholder
    #[error("node {} is not an unfilled placeholder", node.0)]
    InvalidBackfill { node: NodeId },

    /// The token stream does not end with an end marker
    #[error("token stream is not terminated by an end-of-file token")]
    Unterminated,
}

impl ParseError {
    /// The diagnostic code used when the driver records this outcome
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EndOfStream { .. } => ErrorCode::E0901,
            Self::DepthExceeded { .. } => ErrorCode::E0902,
            _ => ErrorCode::E0999,
        }
    }

    /// Where the outcome happened, if it has a source location
    pub fn offset(&self) -> Option<TextSize> {
        match self {
            Self::EndOfStream { at } | Self::DepthExceeded { at, .. } => Some(*at),
            _ => None,
        }
    }

    /// Render as the final diagnostic of a failed parse
    pub fn to_diagnostic(&self) -> Diagnostic {
        let range = TextRange::empty(self.offset().unwrap_or_default());
        Diagnostic::new(self.to_string(), range, self.code())
    }
}
