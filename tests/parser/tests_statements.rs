//! Parser Tests - Statements
//!
//! Simple and compound statements, labels, loop regions and the checks
//! `exit` makes against them.

use adafront::parser::{ErrorCode, Rule, parse_rule};
use adafront::semantic::SymbolKind;
use adafront::syntax::{ApplyForm, LoopScheme, NameExpr, Stmt};
use rstest::rstest;

use crate::helpers::diagnostic_helpers::{assert_clean, codes_of, rule_ok};
use crate::helpers::source_fixtures::MATRICES;

fn in_procedure(body: &str) -> String {
    format!(
        "procedure Test is\n   X, Y : INTEGER := 0;\n   Done : BOOLEAN := FALSE;\nbegin\n{body}\nend Test;\n"
    )
}

// ============================================================================
// Simple statements
// ============================================================================

#[rstest]
#[case("null;")]
#[case("X := 1;")]
#[case("Put (X);")]
#[case("Reset;")]
#[case("return;")]
#[case("return X + 1;")]
#[case("raise;")]
#[case("raise CONSTRAINT_ERROR;")]
#[case("goto Retry;")]
#[case("pragma Inline (Fast);")]
fn test_simple_statement(#[case] input: &str) {
    rule_ok(Rule::Statement, input);
}

#[test]
fn test_call_of_declared_procedure() {
    let parsed = assert_clean(&in_procedure(
        "   declare\n      procedure Bump (N : in out INTEGER) is begin N := N + 1; end Bump;\n   begin\n      Bump (X);\n   end;",
    ));
    let calls = parsed
        .ast
        .iter()
        .filter(|(id, _)| matches!(parsed.ast.as_stmt(*id), Some(Stmt::Call { .. })))
        .count();
    assert_eq!(calls, 1);
    assert!(parsed.ast.iter().any(|(id, _)| matches!(
        parsed.ast.as_name(id),
        Some(NameExpr::Apply { form: ApplyForm::Call, .. })
    )));
}

#[test]
fn test_assignment_to_indexed_component() {
    let result = rule_ok(Rule::Statement, "A (I) := B (I) + 1;");
    assert!(matches!(
        result.ast.as_stmt(result.root.unwrap()),
        Some(Stmt::Assignment { .. })
    ));
}

// ============================================================================
// Compound statements
// ============================================================================

#[test]
fn test_if_with_elsif_and_else() {
    let result = rule_ok(
        Rule::Statement,
        "if X > 0 then Y := 1; elsif X < 0 then Y := -1; else Y := 0; end if;",
    );
    let Some(Stmt::If {
        branches,
        else_statements,
    }) = result.ast.as_stmt(result.root.unwrap())
    else {
        panic!("expected if statement");
    };
    assert_eq!(branches.len(), 2);
    assert_eq!(else_statements.len(), 1);
}

#[test]
fn test_case_statement() {
    let result = rule_ok(
        Rule::Statement,
        "case X is when 1 | 2 => null; when 3 .. 9 => Y := X; when others => null; end case;",
    );
    let Some(Stmt::Case { alternatives, .. }) = result.ast.as_stmt(result.root.unwrap()) else {
        panic!("expected case statement");
    };
    assert_eq!(alternatives.len(), 3);
}

#[rstest]
#[case("loop exit; end loop;")]
#[case("while X < 10 loop X := X + 1; end loop;")]
#[case("for I in 1 .. 10 loop null; end loop;")]
#[case("for I in reverse INTEGER range 1 .. 3 loop exit when I = 2; end loop;")]
#[case("for C in CHARACTER loop null; end loop;")]
fn test_loop_forms(#[case] input: &str) {
    let result = rule_ok(Rule::Statement, input);
    assert!(matches!(
        result.ast.as_stmt(result.root.unwrap()),
        Some(Stmt::Loop { .. })
    ));
}

#[test]
fn test_loop_parameter_scoped_to_loop() {
    let result = rule_ok(Rule::Statement, "for I in 1 .. 3 loop X := I; end loop;");
    let Some(Stmt::Loop { scheme, .. }) = result.ast.as_stmt(result.root.unwrap()) else {
        panic!("expected loop");
    };
    assert!(matches!(scheme, LoopScheme::For { reverse: false, .. }));
    // The loop region was closed
    assert!(result.symbols.resolve(&"I".into()).symbol.is_none());
    let parameter = result
        .symbols
        .iter()
        .find(|(_, symbol)| symbol.kind == SymbolKind::LoopParameter);
    assert!(parameter.is_some());
}

#[test]
fn test_block_with_declarations_and_handlers() {
    assert_clean(&in_procedure(
        r#"   Inner : declare
      Temp : INTEGER := X;
   begin
      Y := Temp;
   exception
      when CONSTRAINT_ERROR | NUMERIC_ERROR => Y := 0;
      when others => raise;
   end Inner;"#,
    ));
}

#[test]
fn test_labels_are_declared() {
    let result = rule_ok(Rule::Statement, "<<Again>> <<Retry>> null;");
    assert!(matches!(
        result.ast.as_stmt(result.root.unwrap()),
        Some(Stmt::Labeled { labels, .. }) if labels.len() == 2
    ));
    assert_eq!(result.symbols.resolve(&"RETRY".into()).kind, SymbolKind::Label);
}

// ============================================================================
// Exit checks
// ============================================================================

#[test]
fn test_named_exit_from_nested_loop() {
    assert_clean(MATRICES);
}

#[rstest]
#[case("exit;", vec![ErrorCode::E0602])]
#[case("Outer : loop exit Outer; end loop Outer;", vec![])]
#[case("Outer : loop loop exit Outer when Done; end loop; end loop Outer;", vec![])]
#[case("B : begin loop exit B; end loop; end B;", vec![ErrorCode::E0603])]
#[case("loop exit Nowhere; end loop;", vec![ErrorCode::E0603])]
#[case("loop exit X; end loop;", vec![ErrorCode::E0603])]
fn test_exit_checks(#[case] body: &str, #[case] expected: Vec<ErrorCode>) {
    assert_eq!(codes_of(&in_procedure(body)), expected);
}

#[test]
fn test_exit_does_not_cross_subprogram_boundary() {
    let source = in_procedure(
        "   loop\n      declare\n         procedure Leave is begin exit; end Leave;\n      begin\n         Leave;\n      end;\n   end loop;",
    );
    assert_eq!(codes_of(&source), vec![ErrorCode::E0602]);
}

// ============================================================================
// Recovery
// ============================================================================

#[test]
fn test_unrecognized_statement_is_skipped() {
    let source = in_procedure("   X := ;\n   Y := 2;");
    let parsed = crate::helpers::diagnostic_helpers::parse_ok(&source);
    let codes: Vec<_> = parsed.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::UNRECOGNIZED_STATEMENT]);
    let assignments = parsed
        .ast
        .iter()
        .filter(|(id, _)| matches!(parsed.ast.as_stmt(*id), Some(Stmt::Assignment { .. })))
        .count();
    assert_eq!(assignments, 1);
}

#[test]
fn test_mismatched_end_designator() {
    let source = "Outer : loop null; end loop Inner;";
    let result = parse_rule(Rule::Statement, source);
    assert!(result.root.is_some());
    let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E0203]);
}
