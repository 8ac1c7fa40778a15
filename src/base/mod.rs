//! Foundation types for the adafront toolchain.
//!
//! This module provides fundamental types used throughout the front end:
//! - [`NodeId`], [`SymbolId`], [`RegionId`] - Stable arena indices
//! - [`Name`] - Case-normalized identifiers
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineIndex`], [`Position`] - Line/column conversion for diagnostics
//!
//! This module has NO dependencies on other adafront modules.

mod ids;
mod name;
mod position;

pub use ids::{NodeId, RegionId, SymbolId};
pub use name::{Name, is_identifier};
pub use position::{LineIndex, Position};

// Re-export text-size types for convenience
pub use text_size::{self, TextRange, TextSize};
