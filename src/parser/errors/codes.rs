//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Structural errors (compilation units, end designators)
//! - E03xx: Declaration errors
//! - E04xx: Name and expression errors
//! - E05xx: Context clause errors
//! - E06xx: Statement errors
//! - E09xx: Fatal/fallback errors

use std::fmt;

use super::error::Severity;

/// Error codes for parser diagnostics
///
/// Each error code represents a specific category of diagnostic,
/// enabling filtering, documentation, and IDE integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors (invalid tokens)
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,
    /// Unterminated string literal
    E0102,
    /// Malformed identifier (leading, trailing or doubled underscore)
    E0103,
    /// Invalid numeric literal
    E0104,

    // =========================================================================
    // E02xx: Structural errors
    // =========================================================================
    /// Text that is not a compilation unit
    E0201,
    /// Trailing text after the last compilation unit
    E0202,
    /// `end` designator does not match the construct it closes
    E0203,

    // =========================================================================
    // E03xx: Declaration errors
    // =========================================================================
    /// No declarative item alternative matched
    E0301,
    /// Redeclaration of a name in the same declarative region
    E0302,
    /// No component declaration alternative matched
    E0303,

    // =========================================================================
    // E04xx: Name and expression errors
    // =========================================================================
    /// Type mark does not resolve to any visible declaration
    E0401,
    /// Type mark resolves to something that is not a type
    E0402,
    /// Different logical operators mixed without parentheses
    E0403,

    // =========================================================================
    // E05xx: Context clause errors
    // =========================================================================
    /// `use` clause names something that is not a package
    E0501,

    // =========================================================================
    // E06xx: Statement errors
    // =========================================================================
    /// No statement alternative matched
    E0601,
    /// `exit` statement outside of any loop
    E0602,
    /// `exit` names something that is not an enclosing loop
    E0603,

    // =========================================================================
    // E09xx: Fatal/fallback errors
    // =========================================================================
    /// End of input where a token is required
    E0901,
    /// Nesting too deep
    E0902,
    /// Internal parser error
    E0999,
}

impl ErrorCode {
    pub const UNRECOGNIZED_DECLARATIVE_ITEM: Self = Self::E0301;
    pub const DUPLICATE_DECLARATION: Self = Self::E0302;
    pub const UNRECOGNIZED_COMPONENT: Self = Self::E0303;
    pub const UNRECOGNIZED_STATEMENT: Self = Self::E0601;

    /// Get the string representation of the error code (e.g., "E0301")
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexical
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0104 => "E0104",
            // Structural
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            // Declaration
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            // Name/expression
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0403 => "E0403",
            // Context clause
            Self::E0501 => "E0501",
            // Statement
            Self::E0601 => "E0601",
            Self::E0602 => "E0602",
            Self::E0603 => "E0603",
            // Fatal
            Self::E0901 => "E0901",
            Self::E0902 => "E0902",
            Self::E0999 => "E0999",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 | Self::E0103 | Self::E0104 => "lexical error",
            Self::E0201 | Self::E0202 | Self::E0203 => "structural error",
            Self::E0301 | Self::E0302 | Self::E0303 => "declaration error",
            Self::E0401 | Self::E0402 | Self::E0403 => "expression error",
            Self::E0501 => "context clause error",
            Self::E0601 | Self::E0602 | Self::E0603 => "statement error",
            Self::E0901 | Self::E0902 | Self::E0999 => "fatal error",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            // Lexical
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated string literal",
            Self::E0103 => "malformed identifier",
            Self::E0104 => "invalid numeric literal",
            // Structural
            Self::E0201 => "expected a compilation unit",
            Self::E0202 => "unexpected text after compilation unit",
            Self::E0203 => "end designator does not match",
            // Declaration
            Self::E0301 => "unrecognized declarative item",
            Self::E0302 => "duplicate declaration",
            Self::E0303 => "unrecognized component declaration",
            // Name/expression
            Self::E0401 => "unresolved type mark",
            Self::E0402 => "name does not denote a type",
            Self::E0403 => "mixed logical operators require parentheses",
            // Context clause
            Self::E0501 => "use clause does not name a package",
            // Statement
            Self::E0601 => "unrecognized statement",
            Self::E0602 => "exit statement outside of a loop",
            Self::E0603 => "exit names something that is not an enclosing loop",
            // Fatal
            Self::E0901 => "unexpected end of file",
            Self::E0902 => "nesting too deep",
            Self::E0999 => "internal parser error",
        }
    }

    /// Severity a diagnostic with this code gets unless overridden
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::E0401 => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Check if this is a syntax error raised by a recovery point
    pub fn is_syntactic(&self) -> bool {
        matches!(
            self,
            Self::E0201 | Self::E0202 | Self::E0301 | Self::E0303 | Self::E0601
        )
    }

    /// Check if this is a recoverable error (parsing can continue)
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::E0901 | Self::E0902 | Self::E0999)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
