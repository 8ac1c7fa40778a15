//! Indented S-expression dump of a tree
//!
//! One node per line; identifiers show how they were classified when they
//! were parsed, e.g. `(Identifier INTEGER :type)`.

use std::fmt::Write;

use super::ast::{Ast, DefiningName, NodeKind};
use super::declarations::Decl;
use super::expressions::Expr;
use super::names::NameExpr;
use super::statements::{LoopScheme, Stmt};
use super::types::TypeDef;
use super::units::Unit;
use super::visit::{Visitor, walk};
use crate::base::NodeId;

#[derive(Debug, Default)]
pub struct TreePrinter {
    out: String,
}

impl TreePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the tree below `root`.
    pub fn print(ast: &Ast, root: NodeId) -> String {
        let mut printer = Self::new();
        walk(ast, root, &mut printer);
        printer.out
    }
}

impl Visitor for TreePrinter {
    fn enter(&mut self, ast: &Ast, id: NodeId, depth: usize) -> bool {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        let kind = ast.kind(id);
        self.out.push('(');
        self.out.push_str(kind.label());
        let details = details(kind);
        if !details.is_empty() {
            self.out.push(' ');
            self.out.push_str(&details);
        }
        true
    }

    fn leave(&mut self, _: &Ast, _: NodeId, _: usize) {
        self.out.push(')');
    }
}

fn names(names: &[DefiningName]) -> String {
    names
        .iter()
        .map(|n| n.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn details(kind: &NodeKind) -> String {
    let mut s = String::new();
    match kind {
        NodeKind::Placeholder => {}
        NodeKind::Unit(unit) => match unit {
            Unit::WithClause { units } => s.push_str(&names(units)),
            Unit::Compilation { library, .. } => {
                let _ = write!(s, "library={}", library.len());
            }
            _ => {}
        },
        NodeKind::Decl(decl) => {
            s.push_str(&names(
                &decl.defining_names().into_iter().cloned().collect::<Vec<_>>(),
            ));
            match decl {
                Decl::Object { constant: true, .. } => s.push_str(" constant"),
                Decl::PrivateType { limited: true, .. } => s.push_str(" limited"),
                Decl::Parameter { mode, .. } | Decl::FormalObject { mode, .. } => {
                    let _ = write!(s, " {}", mode.as_str());
                }
                Decl::SubprogramSpec { kind, .. } => {
                    let _ = write!(s, " {:?}", kind);
                }
                Decl::Instantiation { kind, .. } => {
                    let _ = write!(s, " {:?}", kind);
                }
                _ => {}
            }
        }
        NodeKind::Type(def) => {
            if let TypeDef::Enumeration { literals } = def {
                s.push_str(&names(literals));
            }
        }
        NodeKind::Expr(expr) => match expr {
            Expr::Binary { op, .. } => s.push_str(op.as_str()),
            Expr::Unary { op, .. } => s.push_str(op.as_str()),
            Expr::Literal(lit) => s.push_str(&lit.text),
            Expr::Membership { negated: true, .. } => s.push_str("not in"),
            Expr::Membership { .. } => s.push_str("in"),
            _ => {}
        },
        NodeKind::Name(name) => match name {
            NameExpr::Identifier { name, class, .. } => {
                let _ = write!(s, "{} :{}", name, class.as_str());
            }
            NameExpr::Selected {
                selector, class, ..
            } => {
                let _ = write!(s, ".{} :{}", selector, class.as_str());
            }
            NameExpr::Attribute { attribute, .. } => {
                let _ = write!(s, "'{}", attribute);
            }
            _ => {}
        },
        NodeKind::Stmt(stmt) => match stmt {
            Stmt::Loop { label, scheme, .. } => {
                if let Some(label) = label {
                    let _ = write!(s, "{}: ", label.name);
                }
                match scheme {
                    LoopScheme::Plain => s.push_str("plain"),
                    LoopScheme::While(_) => s.push_str("while"),
                    LoopScheme::For { param, reverse, .. } => {
                        let _ = write!(s, "for {}", param.name);
                        if *reverse {
                            s.push_str(" reverse");
                        }
                    }
                }
            }
            Stmt::Block {
                label: Some(label), ..
            } => s.push_str(label.name.as_str()),
            Stmt::Labeled { labels, .. } => s.push_str(&names(labels)),
            _ => {}
        },
    }
    s
}
