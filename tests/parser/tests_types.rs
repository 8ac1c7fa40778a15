//! Parser Tests - Types
//!
//! Type declarations and definitions, constraints chosen by the shape of the
//! constrained type, discrete ranges.

use adafront::parser::{ErrorCode, Rule, parse_rule};
use adafront::semantic::{SymbolKind, TypeShape};
use adafront::syntax::{Decl, TypeDef};
use rstest::rstest;

use crate::helpers::diagnostic_helpers::{assert_clean, rule_ok};
use crate::helpers::source_fixtures::{LISTS, SHAPES};

// ============================================================================
// Type definitions
// ============================================================================

#[rstest]
#[case("type Color is (Red, Green, Blue);", TypeShape::Enumeration)]
#[case("type Hex is ('0', '1', 'A', 'F');", TypeShape::Enumeration)]
#[case("type Index is range 1 .. 100;", TypeShape::Integer)]
#[case("type Real is digits 8 range 0.0 .. 1.0E10;", TypeShape::Real)]
#[case("type Volt is delta 0.125 range 0.0 .. 255.0;", TypeShape::Real)]
#[case("type Vector is array (INTEGER range <>) of FLOAT;", TypeShape::Array { constrained: false })]
#[case("type Table is array (1 .. 10) of INTEGER;", TypeShape::Array { constrained: true })]
#[case("type Pair is record A, B : INTEGER; end record;", TypeShape::Record { discriminated: false })]
#[case("type Empty is null record;", TypeShape::Record { discriminated: false })]
#[case("type Count is new NATURAL;", TypeShape::Integer)]
fn test_type_shapes(#[case] input: &str, #[case] shape: TypeShape) {
    let result = rule_ok(Rule::TypeDeclaration, input);
    let name = input.split_whitespace().nth(1).unwrap();
    let resolution = result.symbols.resolve(&name.into());
    assert_eq!(resolution.kind, SymbolKind::Type);
    let symbol = result.symbols.symbol(resolution.symbol.unwrap());
    assert_eq!(symbol.type_shape(), shape);
}

#[test]
fn test_access_to_array_shape() {
    let result = rule_ok(Rule::TypeDeclaration, "type Text is access STRING;");
    let resolution = result.symbols.resolve(&"TEXT".into());
    let symbol = result.symbols.symbol(resolution.symbol.unwrap());
    assert!(symbol.type_shape().is_array());
}

#[rstest]
#[case("type Cell;", SymbolKind::IncompleteType)]
#[case("type Key is private;", SymbolKind::PrivateType)]
#[case("type File is limited private;", SymbolKind::PrivateType)]
fn test_partial_views(#[case] input: &str, #[case] kind: SymbolKind) {
    let result = rule_ok(Rule::TypeDeclaration, input);
    let name = input.split_whitespace().nth(1).unwrap().trim_end_matches(';');
    assert_eq!(result.symbols.resolve(&name.into()).kind, kind);
}

#[test]
fn test_enumeration_literals_are_declared() {
    let result = rule_ok(Rule::TypeDeclaration, "type Light is (Red, Amber, Green);");
    for literal in ["RED", "AMBER", "GREEN"] {
        assert_eq!(
            result.symbols.resolve(&literal.into()).kind,
            SymbolKind::EnumerationLiteral
        );
    }
}

#[test]
fn test_record_sees_its_own_type_through_access() {
    assert_clean(LISTS);
}

#[test]
fn test_discriminants_and_variants() {
    let parsed = assert_clean(SHAPES);
    let variant_parts = parsed
        .ast
        .iter()
        .filter(|(id, _)| matches!(parsed.ast.as_type(*id), Some(TypeDef::VariantPart { .. })))
        .count();
    assert_eq!(variant_parts, 1);
}

#[test]
fn test_duplicate_component() {
    let result = parse_rule(
        Rule::TypeDeclaration,
        "type R is record A : INTEGER; A : FLOAT; end record;",
    );
    assert!(result.root.is_some());
    let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::DUPLICATE_DECLARATION]);
}

#[test]
fn test_bad_component_recovers() {
    let result = parse_rule(
        Rule::TypeDeclaration,
        "type R is record A : ; B : INTEGER; end record;",
    );
    assert!(result.root.is_some());
    let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::UNRECOGNIZED_COMPONENT]);
    let Some(Decl::Type { definition, .. }) = result.ast.as_decl(result.root.unwrap()) else {
        panic!("expected type declaration");
    };
    let Some(TypeDef::Record { components, .. }) = result.ast.as_type(*definition) else {
        panic!("expected record");
    };
    assert_eq!(components.len(), 1);
}

// ============================================================================
// Subtype indications and constraints
// ============================================================================

#[rstest]
#[case("INTEGER")]
#[case("INTEGER range 1 .. 10")]
#[case("STRING (1 .. 5)")]
#[case("FLOAT digits 5")]
#[case("FLOAT digits 5 range 0.0 .. 1.0")]
fn test_subtype_indication(#[case] input: &str) {
    rule_ok(Rule::SubtypeIndication, input);
}

#[test]
fn test_index_constraint_on_array() {
    let result = rule_ok(Rule::SubtypeIndication, "STRING (1 .. 5)");
    let Some(TypeDef::SubtypeIndication { constraint: Some(constraint), .. }) =
        result.ast.as_type(result.root.unwrap())
    else {
        panic!("expected constrained subtype indication");
    };
    assert!(matches!(
        result.ast.as_type(*constraint),
        Some(TypeDef::IndexConstraint { .. })
    ));
}

#[rstest]
#[case("1 .. 10")]
#[case("CHARACTER")]
#[case("INTEGER range 1 .. 10")]
#[case("'A' .. 'Z'")]
fn test_discrete_range(#[case] input: &str) {
    rule_ok(Rule::DiscreteRange, input);
}

#[test]
fn test_non_type_mark_in_subtype_indication() {
    let source = "package P is X : INTEGER; Y : X; end P;";
    let result = parse_rule(Rule::PackageDeclaration, source);
    assert!(result.root.is_some());
    let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E0402]);
}

#[test]
fn test_unresolved_type_mark_warns() {
    let result = parse_rule(Rule::ObjectDeclaration, "X : Mystery;");
    assert!(result.is_ok());
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, ErrorCode::E0401);
    assert!(!result.diagnostics[0].is_error());
}
