//! Syntax Tests - Trees
//!
//! Traversal, printing and soundness checks on trees produced by real
//! parses.

use std::collections::HashSet;

use adafront::parser::{Rule, parse_rule};
use adafront::syntax::{
    Ast, NodeKind, Stmt, TreePrinter, TreeViolation, Visitor, check_tree, preorder, walk,
};
use adafront::{LineIndex, NodeId, Position, TextRange, TextSize};

use crate::helpers::diagnostic_helpers::{assert_clean, rule_ok};
use crate::helpers::source_fixtures::{MATRICES, STACKS};

// ============================================================================
// Traversal
// ============================================================================

#[test]
fn test_preorder_visits_each_node_once() {
    let parsed = assert_clean(STACKS);
    let order = preorder(&parsed.ast, parsed.root);
    assert_eq!(order.first(), Some(&parsed.root));
    let unique: HashSet<_> = order.iter().copied().collect();
    assert_eq!(unique.len(), order.len());
    assert!(order.len() <= parsed.ast.len());
}

#[test]
fn test_preorder_follows_source_order() {
    let result = rule_ok(Rule::Statement, "if A then X := 1; else X := 2; end if;");
    let starts: Vec<_> = preorder(&result.ast, result.root.unwrap())
        .into_iter()
        .map(|id| result.ast.range(id).start())
        .collect();
    assert!(starts.windows(2).all(|w| w[0] <= w[1]));
}

#[derive(Default)]
struct StatementCounter {
    statements: usize,
    skip_loops: bool,
    open: usize,
    max_depth: usize,
}

impl Visitor for StatementCounter {
    fn enter(&mut self, ast: &Ast, id: NodeId, depth: usize) -> bool {
        self.open += 1;
        self.max_depth = self.max_depth.max(depth);
        match ast.kind(id) {
            NodeKind::Stmt(Stmt::Loop { .. }) if self.skip_loops => {
                self.statements += 1;
                false
            }
            NodeKind::Stmt(_) => {
                self.statements += 1;
                true
            }
            _ => true,
        }
    }

    fn leave(&mut self, _: &Ast, _: NodeId, _: usize) {
        self.open -= 1;
    }
}

#[test]
fn test_visitor_can_skip_subtrees() {
    let parsed = assert_clean(MATRICES);

    let mut all = StatementCounter::default();
    walk(&parsed.ast, parsed.root, &mut all);
    let mut outer = StatementCounter {
        skip_loops: true,
        ..Default::default()
    };
    walk(&parsed.ast, parsed.root, &mut outer);

    assert!(outer.statements < all.statements);
    assert!(outer.max_depth <= all.max_depth);
    // Every enter has its leave, skipped or not
    assert_eq!(all.open, 0);
    assert_eq!(outer.open, 0);
}

// ============================================================================
// Printing
// ============================================================================

#[test]
fn test_print_object_declaration() {
    let result = rule_ok(Rule::ObjectDeclaration, "Count : INTEGER;");
    let printed = TreePrinter::print(&result.ast, result.root.unwrap());
    assert!(printed.starts_with("(ObjectDecl COUNT"), "{printed}");
    assert!(printed.contains("(Identifier INTEGER :type)"), "{printed}");
    let opens = printed.matches('(').count();
    let closes = printed.matches(')').count();
    assert_eq!(opens, closes);
}

#[test]
fn test_print_one_line_per_node() {
    let result = rule_ok(Rule::Expression, "A + B * 2");
    let root = result.root.unwrap();
    let printed = TreePrinter::print(&result.ast, root);
    assert_eq!(printed.lines().count(), preorder(&result.ast, root).len());
}

// ============================================================================
// Soundness
// ============================================================================

#[test]
fn test_parsed_rule_tree_is_sound() {
    let result = parse_rule(
        Rule::PackageDeclaration,
        "package P is type R is record A, B : INTEGER; end record; X : R := (A => 1, B => 2); end P;",
    );
    assert!(result.is_ok());
    assert!(check_tree(&result.ast, result.root.unwrap()).is_empty());
}

#[test]
fn test_unfilled_slot_is_reported() {
    let mut ast = Ast::new();
    let slot = ast.reserve(TextRange::new(TextSize::new(0), TextSize::new(3)));
    assert_eq!(check_tree(&ast, slot), vec![TreeViolation::Placeholder { node: slot }]);
}

// ============================================================================
// Positions
// ============================================================================

#[test]
fn test_node_positions_through_line_index() {
    let source = "package P is\n   X : INTEGER;\nend P;";
    let result = rule_ok(Rule::PackageDeclaration, source);
    let index = LineIndex::new(source);
    assert_eq!(index.line_count(), 3);

    let object = preorder(&result.ast, result.root.unwrap())
        .into_iter()
        .find(|&id| result.ast.kind(id).label() == "ObjectDecl")
        .unwrap();
    assert_eq!(
        index.position(result.ast.range(object).start()),
        Position::new(1, 3)
    );
}
