//! Structural checks on a finished tree
//!
//! A tree handed out by the driver must satisfy:
//! - no placeholder is reachable
//! - every node is reached from at most one parent
//! - children lie inside their parent's range, in source order

use thiserror::Error;

use super::ast::Ast;
use crate::base::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeViolation {
    #[error("node {} is an unfilled placeholder", node.0)]
    Placeholder { node: NodeId },
    #[error("node {} is referenced by more than one parent", node.0)]
    SharedChild { node: NodeId },
    #[error("node {} refers to missing child {}", parent.0, child.0)]
    Dangling { parent: NodeId, child: NodeId },
    #[error("child {} lies outside parent {}", child.0, parent.0)]
    OutsideParent { parent: NodeId, child: NodeId },
    #[error("child {} starts before the end of its previous sibling", child.0)]
    OutOfOrder { parent: NodeId, child: NodeId },
}

/// Check every node reachable from `root`. Empty means the tree is sound.
pub fn check_tree(ast: &Ast, root: NodeId) -> Vec<TreeViolation> {
    let mut violations = Vec::new();
    if ast.get(root).is_none() {
        violations.push(TreeViolation::Dangling {
            parent: root,
            child: root,
        });
        return violations;
    }

    let mut seen = vec![false; ast.len()];
    let mut stack = vec![root];
    seen[root.index()] = true;

    while let Some(id) = stack.pop() {
        if ast.is_placeholder(id) {
            violations.push(TreeViolation::Placeholder { node: id });
            continue;
        }
        let range = ast.range(id);
        let mut previous_end = None;
        for child in ast.children(id) {
            let Some(data) = ast.get(child) else {
                violations.push(TreeViolation::Dangling { parent: id, child });
                continue;
            };
            if seen[child.index()] {
                violations.push(TreeViolation::SharedChild { node: child });
                continue;
            }
            seen[child.index()] = true;
            if !range.contains_range(data.range) {
                violations.push(TreeViolation::OutsideParent { parent: id, child });
            }
            if previous_end.is_some_and(|end| data.range.start() < end) {
                violations.push(TreeViolation::OutOfOrder { parent: id, child });
            }
            previous_end = Some(data.range.end());
            stack.push(child);
        }
    }
    violations
}
