//! Arena-allocated abstract syntax tree
//!
//! Nodes live in one `Vec` and refer to their children by [`NodeId`]. A
//! node is allocated once all its children have been parsed, so children
//! normally precede their parent. Constructs that must be nameable inside
//! their own region (types, subprogram bodies, packages) first reserve a
//! placeholder and fill it exactly once when they commit.

use text_size::TextRange;

use super::declarations::Decl;
use super::expressions::Expr;
use super::names::NameExpr;
use super::statements::Stmt;
use super::types::TypeDef;
use super::units::Unit;
use crate::base::{Name, NodeId};
use crate::parser::ParseError;

/// An identifier at its point of declaration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefiningName {
    pub name: Name,
    pub range: TextRange,
}

impl DefiningName {
    pub fn new(name: Name, range: TextRange) -> Self {
        Self { name, range }
    }
}

/// Node payload, grouped by grammar area
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Reserved slot awaiting back-fill
    Placeholder,
    Unit(Unit),
    Decl(Decl),
    Type(TypeDef),
    Expr(Expr),
    Name(NameExpr),
    Stmt(Stmt),
}

impl NodeKind {
    /// Children in source order
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Self::Placeholder => Vec::new(),
            Self::Unit(unit) => unit.children(),
            Self::Decl(decl) => decl.children(),
            Self::Type(def) => def.children(),
            Self::Expr(expr) => expr.children(),
            Self::Name(name) => name.children(),
            Self::Stmt(stmt) => stmt.children(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Placeholder => "Placeholder",
            Self::Unit(unit) => unit.label(),
            Self::Decl(decl) => decl.label(),
            Self::Type(def) => def.label(),
            Self::Expr(expr) => expr.label(),
            Self::Name(name) => name.label(),
            Self::Stmt(stmt) => stmt.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeData {
    pub range: TextRange,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ast {
    nodes: Vec<NodeData>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn alloc(&mut self, range: TextRange, kind: NodeKind) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(NodeData { range, kind });
        id
    }

    /// Reserve a slot to be filled later with [`Ast::fill`].
    pub fn reserve(&mut self, range: TextRange) -> NodeId {
        self.alloc(range, NodeKind::Placeholder)
    }

    /// Fill a reserved slot. Filling anything but an unfilled placeholder
    /// is a contract violation.
    pub fn fill(&mut self, id: NodeId, range: TextRange, kind: NodeKind) -> Result<(), ParseError> {
        match self.nodes.get_mut(id.index()) {
            Some(node) if node.kind == NodeKind::Placeholder && kind != NodeKind::Placeholder => {
                node.range = range;
                node.kind = kind;
                Ok(())
            }
            _ => Err(ParseError::InvalidBackfill { node: id }),
        }
    }

    /// Drop every node allocated after the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.index())
    }

    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    pub fn range(&self, id: NodeId) -> TextRange {
        self.nodes[id.index()].range
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.kind(id).children()
    }

    pub fn is_placeholder(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::Placeholder)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId::new(index), node))
    }

    // Typed accessors used by the parser and by tests.

    pub fn as_decl(&self, id: NodeId) -> Option<&Decl> {
        match self.kind(id) {
            NodeKind::Decl(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_type(&self, id: NodeId) -> Option<&TypeDef> {
        match self.kind(id) {
            NodeKind::Type(def) => Some(def),
            _ => None,
        }
    }

    pub fn as_expr(&self, id: NodeId) -> Option<&Expr> {
        match self.kind(id) {
            NodeKind::Expr(expr) => Some(expr),
            _ => None,
        }
    }

    pub fn as_name(&self, id: NodeId) -> Option<&NameExpr> {
        match self.kind(id) {
            NodeKind::Name(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_stmt(&self, id: NodeId) -> Option<&Stmt> {
        match self.kind(id) {
            NodeKind::Stmt(stmt) => Some(stmt),
            _ => None,
        }
    }

    pub fn as_unit(&self, id: NodeId) -> Option<&Unit> {
        match self.kind(id) {
            NodeKind::Unit(unit) => Some(unit),
            _ => None,
        }
    }
}
