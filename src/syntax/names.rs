//! Name nodes
//!
//! Several name shapes are syntactically identical and are told apart by
//! what the prefix resolves to. The outcome is recorded as a tag on the
//! node rather than by parsing twice.

use crate::base::{Name, NodeId, SymbolId};
use crate::semantic::SymbolKind;

/// `prefix.selector`: expanded name or record component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectedForm {
    /// Prefix denotes a package, unit, subprogram or label
    Expanded,
    /// Prefix denotes an object (or is unresolved)
    Component,
}

/// `prefix(args)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ApplyForm {
    /// Prefix is a type mark
    TypeConversion,
    /// Prefix is a subprogram
    Call,
    /// Prefix is an object
    IndexedComponent,
    /// Prefix did not resolve
    Unresolved,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NameExpr {
    /// Identifier or operator symbol, with its classification at the point
    /// of use
    Identifier {
        name: Name,
        symbol: Option<SymbolId>,
        class: SymbolKind,
    },
    Selected {
        prefix: NodeId,
        selector: Name,
        form: SelectedForm,
        symbol: Option<SymbolId>,
        class: SymbolKind,
    },
    /// `prefix.all`
    Dereference { prefix: NodeId },
    Apply {
        prefix: NodeId,
        args: Vec<NodeId>,
        form: ApplyForm,
    },
    /// `prefix(L .. H)`
    Slice { prefix: NodeId, range: NodeId },
    /// `prefix'ATTR[(args)]`
    Attribute {
        prefix: NodeId,
        attribute: Name,
        args: Vec<NodeId>,
    },
}

impl NameExpr {
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Self::Identifier { .. } => Vec::new(),
            Self::Selected { prefix, .. } | Self::Dereference { prefix } => vec![*prefix],
            Self::Apply { prefix, args, .. } | Self::Attribute { prefix, args, .. } => {
                let mut out = vec![*prefix];
                out.extend(args);
                out
            }
            Self::Slice { prefix, range } => vec![*prefix, *range],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Identifier { .. } => "Identifier",
            Self::Selected {
                form: SelectedForm::Expanded,
                ..
            } => "ExpandedName",
            Self::Selected {
                form: SelectedForm::Component,
                ..
            } => "SelectedComponent",
            Self::Dereference { .. } => "Dereference",
            Self::Apply {
                form: ApplyForm::TypeConversion,
                ..
            } => "TypeConversion",
            Self::Apply {
                form: ApplyForm::Call,
                ..
            } => "Call",
            Self::Apply {
                form: ApplyForm::IndexedComponent,
                ..
            } => "IndexedComponent",
            Self::Apply {
                form: ApplyForm::Unresolved,
                ..
            } => "Apply",
            Self::Slice { .. } => "Slice",
            Self::Attribute { .. } => "Attribute",
        }
    }

    /// The symbol this name denotes, when it is a simple or expanded name
    pub fn symbol(&self) -> Option<SymbolId> {
        match self {
            Self::Identifier { symbol, .. } | Self::Selected { symbol, .. } => *symbol,
            _ => None,
        }
    }

    /// Classification of the denoted entity; `Unresolved` for compound names
    pub fn class(&self) -> SymbolKind {
        match self {
            Self::Identifier { class, .. } | Self::Selected { class, .. } => *class,
            _ => SymbolKind::Unresolved,
        }
    }
}
