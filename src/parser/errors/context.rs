//! Parse context tracking for context-aware error messages
//!
//! The parser maintains a stack of contexts. Recovery points use the top of
//! the stack to phrase their diagnostic and to decide where resynchronizing
//! must stop.

use crate::parser::SyntaxKind;

/// Represents the current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParseContext {
    /// Between compilation units
    #[default]
    Compilation,
    /// Declarations of a package specification
    PackageSpecification,
    /// Declarations of a package body, subprogram body or block
    DeclarativePart,
    /// Formal parameters of a generic declaration
    GenericFormalPart,
    /// Components of a record type definition
    ComponentList,
    /// Statements of a body, block, loop or branch
    StatementSequence,
}

impl ParseContext {
    /// Get a human-readable description of this context for error messages
    pub fn description(&self) -> &'static str {
        match self {
            Self::Compilation => "at top level",
            Self::PackageSpecification => "in package specification",
            Self::DeclarativePart => "in declarative part",
            Self::GenericFormalPart => "in generic formal part",
            Self::ComponentList => "in record definition",
            Self::StatementSequence => "in statement sequence",
        }
    }

    /// Get a description of what is expected in this context
    pub fn expected_description(&self) -> &'static str {
        match self {
            Self::Compilation => "a library unit or subunit",
            Self::PackageSpecification | Self::DeclarativePart => "a declaration",
            Self::GenericFormalPart => "a generic formal parameter",
            Self::ComponentList => "a component declaration",
            Self::StatementSequence => "a statement",
        }
    }

    /// Reserved words that close the enclosing region; resynchronizing
    /// stops in front of them.
    pub fn recovery_tokens(&self) -> &'static [SyntaxKind] {
        match self {
            Self::Compilation => &[],
            Self::PackageSpecification => &[SyntaxKind::PRIVATE_KW, SyntaxKind::END_KW],
            Self::DeclarativePart => &[
                SyntaxKind::BEGIN_KW,
                SyntaxKind::END_KW,
                SyntaxKind::PRIVATE_KW,
            ],
            Self::GenericFormalPart => &[
                SyntaxKind::PACKAGE_KW,
                SyntaxKind::PROCEDURE_KW,
                SyntaxKind::FUNCTION_KW,
            ],
            Self::ComponentList => &[
                SyntaxKind::END_KW,
                SyntaxKind::CASE_KW,
                SyntaxKind::WHEN_KW,
            ],
            Self::StatementSequence => &[
                SyntaxKind::END_KW,
                SyntaxKind::ELSIF_KW,
                SyntaxKind::ELSE_KW,
                SyntaxKind::WHEN_KW,
                SyntaxKind::EXCEPTION_KW,
            ],
        }
    }

    /// Check if this context holds declarations
    pub fn is_declarative(&self) -> bool {
        matches!(
            self,
            Self::PackageSpecification | Self::DeclarativePart | Self::GenericFormalPart
        )
    }
}
