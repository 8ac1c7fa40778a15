use crate::base::{NodeId, SymbolId};

use super::ast::DefiningName;

/// Compilation-level nodes
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    /// Root of a parse: every compilation unit, plus the library-level
    /// symbols they declared
    Compilation {
        units: Vec<NodeId>,
        library: Vec<SymbolId>,
    },
    /// Context clauses followed by a library unit or subunit
    CompilationUnit { context: Vec<NodeId>, unit: NodeId },
    /// `with A, B;`
    WithClause { units: Vec<DefiningName> },
    /// `separate (Parent) body`
    Subunit { parent: NodeId, body: NodeId },
}

impl Unit {
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Self::Compilation { units, .. } => units.clone(),
            Self::CompilationUnit { context, unit } => {
                let mut children = context.clone();
                children.push(*unit);
                children
            }
            Self::WithClause { .. } => Vec::new(),
            Self::Subunit { parent, body } => vec![*parent, *body],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Compilation { .. } => "Compilation",
            Self::CompilationUnit { .. } => "CompilationUnit",
            Self::WithClause { .. } => "WithClause",
            Self::Subunit { .. } => "Subunit",
        }
    }
}
