//! Parser Tests - Basic Declarations
//!
//! Objects, named numbers, exceptions, subtypes, renamings, stubs, use
//! clauses and pragmas, each parsed as a single rule.

use adafront::parser::{ErrorCode, Rule, parse_rule};
use adafront::semantic::SymbolKind;
use adafront::syntax::{Decl, RenamingKind};
use rstest::rstest;

use crate::helpers::diagnostic_helpers::{rule_ok, rule_rejects};

// ============================================================================
// Objects and numbers
// ============================================================================

#[rstest]
#[case("X : INTEGER;")]
#[case("X, Y, Z : FLOAT := 0.0;")]
#[case("Limit : constant NATURAL := 10;")]
#[case("Name : STRING (1 .. 20);")]
#[case("Grid : array (1 .. 3, 1 .. 3) of BOOLEAN := (others => (others => FALSE));")]
#[case("Small : INTEGER range -10 .. 10 := 0;")]
#[case("Deferred : constant INTEGER;")]
fn test_object_declaration(#[case] input: &str) {
    rule_ok(Rule::ObjectDeclaration, input);
}

#[rstest]
#[case("Pi : constant := 3.14159;")]
#[case("Max, Size : constant := 2 ** 8 - 1;")]
fn test_number_declaration(#[case] input: &str) {
    rule_ok(Rule::NumberDeclaration, input);
    rule_rejects(Rule::ObjectDeclaration, input);
}

#[test]
fn test_object_declaration_resolves_predefined_type() {
    let result = rule_ok(Rule::ObjectDeclaration, "X : INTEGER;");
    assert!(result.diagnostics.is_empty());
    let Some(Decl::Object { names, .. }) = result.ast.as_decl(result.root.unwrap()) else {
        panic!("expected object declaration");
    };
    assert_eq!(names.len(), 1);
    assert_eq!(names[0].name.as_str(), "X");
    assert_eq!(result.symbols.resolve(&"X".into()).kind, SymbolKind::Object);
}

#[rstest]
#[case("Limit : constant INTEGER := 5;", SymbolKind::Constant)]
#[case("Limit : constant INTEGER;", SymbolKind::DeferredConstant)]
#[case("Limit : INTEGER;", SymbolKind::Object)]
fn test_object_symbol_kind(#[case] input: &str, #[case] kind: SymbolKind) {
    let result = rule_ok(Rule::ObjectDeclaration, input);
    assert_eq!(result.symbols.resolve(&"LIMIT".into()).kind, kind);
}

#[test]
fn test_duplicate_in_identifier_list() {
    let result = parse_rule(Rule::ObjectDeclaration, "X, X : INTEGER;");
    assert!(result.root.is_some());
    let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::DUPLICATE_DECLARATION]);
    let Some(Decl::Object { names, .. }) = result.ast.as_decl(result.root.unwrap()) else {
        panic!("expected object declaration");
    };
    assert_eq!(names.len(), 2);
}

#[test]
fn test_missing_type_mark_does_not_match() {
    let result = parse_rule(Rule::ObjectDeclaration, "X : ;");
    assert!(result.root.is_none());
    assert!(result.diagnostics.is_empty());
    assert!(result.symbols.resolve(&"X".into()).symbol.is_none());
}

// ============================================================================
// Exceptions, subtypes and renamings
// ============================================================================

#[rstest]
#[case("Overflow : exception;")]
#[case("Empty, Full : exception;")]
fn test_exception_declaration(#[case] input: &str) {
    let result = rule_ok(Rule::ExceptionDeclaration, input);
    assert!(matches!(
        result.ast.as_decl(result.root.unwrap()),
        Some(Decl::Exception { .. })
    ));
}

#[rstest]
#[case("subtype Small is INTEGER range 0 .. 9;")]
#[case("subtype Line is STRING (1 .. 80);")]
#[case("subtype Count is NATURAL;")]
#[case("subtype Short is FLOAT digits 4;")]
fn test_subtype_declaration(#[case] input: &str) {
    let result = rule_ok(Rule::SubtypeDeclaration, input);
    assert_eq!(result.diagnostics.len(), 0);
}

#[rstest]
#[case("Oops : exception renames CONSTRAINT_ERROR;")]
#[case("Answer : INTEGER renames Other;")]
#[case("function Plus (L, R : INTEGER) return INTEGER renames \"+\";")]
fn test_renaming_declaration(#[case] input: &str) {
    rule_ok(Rule::RenamingDeclaration, input);
}

#[test]
fn test_subprogram_renaming_node() {
    let result = rule_ok(
        Rule::RenamingDeclaration,
        "procedure Halt renames Stop;",
    );
    assert!(matches!(
        result.ast.as_decl(result.root.unwrap()),
        Some(Decl::Renaming { kind: RenamingKind::Subprogram { .. }, .. })
    ));
}

// ============================================================================
// Stubs, use clauses, pragmas
// ============================================================================

#[rstest]
#[case("procedure Work is separate;")]
#[case("function Compute (X : INTEGER) return INTEGER is separate;")]
#[case("package body Engine is separate;")]
fn test_body_stub(#[case] input: &str) {
    rule_ok(Rule::BodyStub, input);
}

#[rstest]
#[case("use INTEGER;")]
#[case("use Nowhere;")]
fn test_use_clause_requires_package(#[case] input: &str) {
    let result = parse_rule(Rule::UseClause, input);
    assert!(result.root.is_some());
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, ErrorCode::E0501);
}

#[rstest]
#[case("pragma Pack;")]
#[case("pragma Optimize (Time);")]
#[case("pragma Suppress (Range_Check, On => Small);")]
fn test_pragma(#[case] input: &str) {
    rule_ok(Rule::Pragma, input);
}
