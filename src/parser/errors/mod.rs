//! Parser error handling module
//!
//! This module provides:
//! - Categorized error codes for filtering and documentation
//! - [`Diagnostic`] records with hints and related locations
//! - The transactional [`DiagnosticLog`]
//! - Context-aware messages for recovery points
//! - [`ParseError`], the fatal outcomes that abort a parse

mod codes;
mod context;
mod error;
mod fatal;
mod log;

pub use codes::ErrorCode;
pub use context::ParseContext;
pub use error::{Diagnostic, RelatedInfo, Severity, format_context_error};
pub use fatal::ParseError;
pub use log::{DiagnosticLog, LogMarker};
