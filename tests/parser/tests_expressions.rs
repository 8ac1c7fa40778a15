//! Parser Tests - Expressions and Names
//!
//! Operator layering, aggregates, qualified expressions, allocators and the
//! classification of name suffixes by what their prefix denotes.

use adafront::parser::{ErrorCode, Rule, RuleParseResult, parse_rule};
use adafront::syntax::{ApplyForm, BinaryOp, Expr, LiteralKind, NameExpr, SelectedForm, UnaryOp};
use rstest::rstest;

use crate::helpers::diagnostic_helpers::{parse_ok, rule_ok, rule_rejects};

fn names_of(result: &RuleParseResult) -> Vec<&NameExpr> {
    result
        .ast
        .iter()
        .filter_map(|(id, _)| result.ast.as_name(id))
        .collect()
}

// ============================================================================
// Operators
// ============================================================================

#[rstest]
#[case("1")]
#[case("-1 + 2")]
#[case("abs X + 2 ** 3")]
#[case("not A and B")]
#[case("A & \"tail\"")]
#[case("X mod 3 = 0 or else Y rem 2 /= 1")]
#[case("'A' < 'B'")]
#[case("null")]
#[case("2.5E-3 * 1_000")]
fn test_expression_forms(#[case] input: &str) {
    rule_ok(Rule::Expression, input);
}

#[test]
fn test_left_associative_adding_operators() {
    let result = rule_ok(Rule::Expression, "1 - 2 - 3");
    let Some(Expr::Binary { op, lhs, .. }) = result.ast.as_expr(result.root.unwrap()) else {
        panic!("expected binary");
    };
    assert_eq!(*op, BinaryOp::Sub);
    assert!(matches!(
        result.ast.as_expr(*lhs),
        Some(Expr::Binary { op: BinaryOp::Sub, .. })
    ));
}

#[test]
fn test_unary_minus_binds_whole_term() {
    let result = rule_ok(Rule::Expression, "-A * B");
    assert!(matches!(
        result.ast.as_expr(result.root.unwrap()),
        Some(Expr::Unary { op: UnaryOp::Minus, .. })
    ));
}

#[rstest]
#[case("A and B or C")]
#[case("A or B and then C")]
#[case("A xor B and C")]
fn test_mixed_logical_operators(#[case] input: &str) {
    let result = parse_rule(Rule::Expression, input);
    assert!(result.root.is_some());
    let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E0403]);
}

#[test]
fn test_dangling_operator_is_not_an_expression() {
    rule_rejects(Rule::Expression, "1 +");
}

#[test]
fn test_literal_kinds() {
    let result = rule_ok(Rule::Expression, "\"text\"");
    let Some(Expr::Literal(literal)) = result.ast.as_expr(result.root.unwrap()) else {
        panic!("expected literal");
    };
    assert_eq!(literal.kind, LiteralKind::String);
}

// ============================================================================
// Aggregates, qualified expressions, allocators
// ============================================================================

#[rstest]
#[case("(1, 2, 3)")]
#[case("(1 .. 5 => 0)")]
#[case("(X => 1, Y => 2)")]
#[case("(1 | 3 => TRUE, others => FALSE)")]
#[case("(others => (others => 0.0))")]
fn test_aggregate(#[case] input: &str) {
    let result = rule_ok(Rule::Expression, input);
    assert!(matches!(
        result.ast.as_expr(result.root.unwrap()),
        Some(Expr::Aggregate { .. })
    ));
}

#[test]
fn test_single_positional_component_is_parenthesized() {
    let result = rule_ok(Rule::Expression, "(1 + 2)");
    assert!(matches!(
        result.ast.as_expr(result.root.unwrap()),
        Some(Expr::Parenthesized { .. })
    ));
}

#[test]
fn test_qualified_expression() {
    let result = rule_ok(Rule::Expression, "INTEGER'(5)");
    assert!(matches!(
        result.ast.as_expr(result.root.unwrap()),
        Some(Expr::Qualified { .. })
    ));
}

#[rstest]
#[case("new INTEGER")]
#[case("new INTEGER'(3)")]
#[case("new STRING (1 .. 10)")]
fn test_allocator(#[case] input: &str) {
    let result = rule_ok(Rule::Expression, input);
    assert!(matches!(
        result.ast.as_expr(result.root.unwrap()),
        Some(Expr::Allocator { .. })
    ));
}

#[rstest]
#[case("X in 1 .. 10")]
#[case("X not in POSITIVE")]
#[case("C in 'a' .. 'z'")]
fn test_membership(#[case] input: &str) {
    let result = rule_ok(Rule::Expression, input);
    assert!(matches!(
        result.ast.as_expr(result.root.unwrap()),
        Some(Expr::Membership { .. })
    ));
}

// ============================================================================
// Names
// ============================================================================

#[test]
fn test_apply_to_type_is_conversion() {
    let result = rule_ok(Rule::Name, "FLOAT (3)");
    assert!(matches!(
        result.ast.as_name(result.root.unwrap()),
        Some(NameExpr::Apply { form: ApplyForm::TypeConversion, .. })
    ));
}

#[test]
fn test_apply_to_unknown_prefix() {
    let result = rule_ok(Rule::Name, "Mystery (3)");
    assert!(matches!(
        result.ast.as_name(result.root.unwrap()),
        Some(NameExpr::Apply { form: ApplyForm::Unresolved, .. })
    ));
}

#[test]
fn test_apply_to_object_is_indexing_and_slicing() {
    let source = r#"
package Buffers is
   Data : STRING (1 .. 10);
   First : CHARACTER := Data (1);
   Head : STRING (1 .. 3) := Data (1 .. 3);
end Buffers;
"#;
    let result = rule_ok(Rule::PackageDeclaration, source);
    let names = names_of(&result);
    assert!(names.iter().any(|n| matches!(
        n,
        NameExpr::Apply { form: ApplyForm::IndexedComponent, .. }
    )));
    assert!(names.iter().any(|n| matches!(n, NameExpr::Slice { .. })));
}

#[test]
fn test_expanded_name_through_standard() {
    let result = rule_ok(Rule::Name, "STANDARD.INTEGER");
    let Some(NameExpr::Selected { form, symbol, .. }) = result.ast.as_name(result.root.unwrap())
    else {
        panic!("expected selected name");
    };
    assert_eq!(*form, SelectedForm::Expanded);
    assert!(symbol.is_some());
}

#[test]
fn test_component_selection_on_object() {
    let source = r#"
package Points is
   type Point is record
      X, Y : INTEGER;
   end record;
   Origin : Point;
   Left : INTEGER := Origin.X;
end Points;
"#;
    let result = rule_ok(Rule::PackageDeclaration, source);
    assert!(names_of(&result).iter().any(|n| matches!(
        n,
        NameExpr::Selected { form: SelectedForm::Component, .. }
    )));
}

#[rstest]
#[case("A'FIRST")]
#[case("M'RANGE (2)")]
#[case("P.all")]
#[case("T'(1)")]
fn test_name_suffixes_parse(#[case] input: &str) {
    let result = parse_rule(Rule::Expression, input);
    assert!(result.root.is_some(), "{input} did not parse");
    assert!(result.fully_consumed);
}

#[test]
fn test_operator_symbol_call() {
    let compiled = parse_ok(
        r#"
procedure Ops is
   X : INTEGER := "+" (1, 2);
begin
   null;
end Ops;
"#,
    );
    assert!(compiled.ast.iter().any(|(id, _)| matches!(
        compiled.ast.as_name(id),
        Some(NameExpr::Apply { form: ApplyForm::Call, .. })
    )));
}
