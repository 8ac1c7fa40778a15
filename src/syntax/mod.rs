//! Abstract syntax tree
//!
//! An arena of nodes addressed by [`NodeId`](crate::base::NodeId). Payloads
//! are grouped by grammar area; every node owns its children exclusively.
//! Back-references (the type of an object, the entity a name denotes) go
//! through symbols, never through tree edges.

mod ast;
mod declarations;
mod expressions;
mod invariants;
mod names;
mod printer;
mod statements;
mod types;
mod units;
mod visit;

pub use ast::{Ast, DefiningName, NodeData, NodeKind};
pub use declarations::{
    Decl, FormalDefault, FormalTypeDef, GenericUnitKind, Mode, RenamingKind, StubKind,
    SubprogramKind,
};
pub use expressions::{BinaryOp, Expr, Literal, LiteralKind, UnaryOp};
pub use invariants::{TreeViolation, check_tree};
pub use names::{ApplyForm, NameExpr, SelectedForm};
pub use printer::TreePrinter;
pub use statements::{LoopScheme, Stmt};
pub use types::TypeDef;
pub use units::Unit;
pub use visit::{Visitor, preorder, walk};
