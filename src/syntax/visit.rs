//! Read-only traversal of a finished tree
//!
//! The walk is iterative, so deeply nested trees do not exhaust the stack.

use super::ast::Ast;
use crate::base::NodeId;

pub trait Visitor {
    /// Called before a node's children. Return `false` to skip them.
    fn enter(&mut self, ast: &Ast, id: NodeId, depth: usize) -> bool {
        let _ = (ast, id, depth);
        true
    }

    /// Called after a node's children (also when they were skipped).
    fn leave(&mut self, ast: &Ast, id: NodeId, depth: usize) {
        let _ = (ast, id, depth);
    }
}

/// Visit `root` and everything below it in source order.
pub fn walk<V: Visitor + ?Sized>(ast: &Ast, root: NodeId, visitor: &mut V) {
    enum Step {
        Enter(NodeId, usize),
        Leave(NodeId, usize),
    }

    let mut stack = vec![Step::Enter(root, 0)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(id, depth) => {
                stack.push(Step::Leave(id, depth));
                if ast.get(id).is_none() || !visitor.enter(ast, id, depth) {
                    continue;
                }
                for child in ast.children(id).into_iter().rev() {
                    stack.push(Step::Enter(child, depth + 1));
                }
            }
            Step::Leave(id, depth) => visitor.leave(ast, id, depth),
        }
    }
}

/// Collect every node reachable from `root`, in pre-order.
pub fn preorder(ast: &Ast, root: NodeId) -> Vec<NodeId> {
    struct Collect(Vec<NodeId>);

    impl Visitor for Collect {
        fn enter(&mut self, _: &Ast, id: NodeId, _: usize) -> bool {
            self.0.push(id);
            true
        }
    }

    let mut collect = Collect(Vec::new());
    walk(ast, root, &mut collect);
    collect.0
}
