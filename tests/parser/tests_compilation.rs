//! Parser Tests - Compilations
//!
//! Whole compilations through the driver: context clauses, library units,
//! generics and their instances, subunits, and the library symbols a
//! compilation leaves behind.

use adafront::parser::{ErrorCode, ParseOptions, parse, parse_sources};
use adafront::semantic::SymbolKind;
use adafront::syntax::{Decl, Unit};
use rstest::rstest;

use crate::helpers::diagnostic_helpers::{assert_clean, codes_of, parse_ok};
use crate::helpers::source_fixtures::{HELLO, LISTS, MATRICES, SHAPES, STACKS};

fn library_names(source: &str) -> Vec<String> {
    let parsed = parse_ok(source);
    parsed
        .library
        .iter()
        .map(|&id| parsed.symbols.symbol(id).name.to_string())
        .collect()
}

#[rstest]
#[case::hello(HELLO)]
#[case::stacks(STACKS)]
#[case::lists(LISTS)]
#[case::shapes(SHAPES)]
#[case::matrices(MATRICES)]
fn test_fixture_parses_clean(#[case] source: &str) {
    assert_clean(source);
}

#[test]
fn test_library_symbols_in_declaration_order() {
    assert_eq!(library_names(STACKS), vec!["STACKS", "USE_STACKS"]);
    assert_eq!(library_names(LISTS), vec!["LISTS"]);
}

#[test]
fn test_root_lists_every_unit() {
    let parsed = parse_ok(STACKS);
    let Some(Unit::Compilation { units, library }) = parsed.ast.as_unit(parsed.root) else {
        panic!("expected compilation root");
    };
    assert_eq!(units.len(), 3);
    assert_eq!(library, &parsed.library);
    for &unit in units {
        assert!(matches!(
            parsed.ast.as_unit(unit),
            Some(Unit::CompilationUnit { .. })
        ));
    }
}

#[test]
fn test_with_clause_of_unknown_unit() {
    let parsed = assert_clean(HELLO);
    let with = parsed
        .symbols
        .iter()
        .find(|(_, symbol)| symbol.name.as_str() == "TEXT_IO")
        .map(|(_, symbol)| symbol.kind);
    assert_eq!(with, Some(SymbolKind::Unit));
    // The with-ed name is only visible to the unit it prefixes
    assert_eq!(library_names(HELLO), vec!["HELLO"]);
}

#[test]
fn test_generic_instance_exports_through_use() {
    let parsed = assert_clean(STACKS);
    let instance = parsed
        .ast
        .iter()
        .find(|(id, _)| matches!(parsed.ast.as_decl(*id), Some(Decl::Instantiation { .. })));
    assert!(instance.is_some());
}

#[test]
fn test_context_use_of_earlier_unit() {
    assert_clean(
        r#"
package Constants is
   Limit : constant := 10;
   type Level is range 0 .. Limit;
end Constants;

with Constants;
use Constants;
procedure Check is
   L : Level := Limit;
begin
   null;
end Check;
"#,
    );
}

#[test]
fn test_unit_does_not_see_unrelated_context() {
    let source = r#"
package Constants is
   type Level is range 0 .. 9;
end Constants;

with Constants;
use Constants;
package First is
   X : Level;
end First;

package Second is
   Y : Level;
end Second;
"#;
    assert_eq!(codes_of(source), vec![ErrorCode::E0401]);
}

#[test]
fn test_subprogram_declaration_then_body() {
    assert_clean(
        r#"
function Square (X : INTEGER) return INTEGER;

function Square (X : INTEGER) return INTEGER is
begin
   return X * X;
end Square;
"#,
    );
}

#[test]
fn test_separate_body() {
    assert_clean(
        r#"
package body Engine is
   Speed : INTEGER := 0;
   procedure Run is separate;
end Engine;

separate (Engine)
procedure Run is
begin
   null;
end Run;
"#,
    );
}

#[test]
fn test_generic_procedure_body_completes_declaration() {
    assert_clean(
        r#"
generic
   type Element is private;
procedure Swap (A, B : in out Element);

procedure Swap (A, B : in out Element) is
   T : Element := A;
begin
   A := B;
   B := T;
end Swap;
"#,
    );
}

#[test]
fn test_package_body_sees_private_part() {
    assert_clean(
        r#"
package Counters is
   type Counter is private;
   procedure Step (C : in out Counter);
private
   type Counter is record
      Value : NATURAL := 0;
   end record;
end Counters;

package body Counters is
   procedure Step (C : in out Counter) is
   begin
      C.Value := C.Value + 1;
   end Step;
end Counters;
"#,
    );
}

// ============================================================================
// Failures
// ============================================================================

#[rstest]
#[case("X : INTEGER;", ErrorCode::E0201)]
#[case("begin null; end;", ErrorCode::E0201)]
#[case("package P is end P; X : INTEGER;", ErrorCode::E0202)]
fn test_not_a_compilation(#[case] source: &str, #[case] code: ErrorCode) {
    let failure = parse(source, &ParseOptions::default()).unwrap_err();
    assert!(failure.fatal.is_none());
    assert_eq!(failure.diagnostics.last().map(|d| d.code), Some(code));
}

#[test]
fn test_end_of_file_inside_unit_is_fatal() {
    let failure = parse("procedure P is begin null;", &ParseOptions::default()).unwrap_err();
    assert!(failure.fatal.is_some());
    assert_eq!(
        failure.diagnostics.last().map(|d| d.code),
        Some(ErrorCode::E0901)
    );
}

#[test]
fn test_parse_sources_are_independent() {
    let results = parse_sources(
        &[LISTS, SHAPES, "package Lists is end Lists;"],
        &ParseOptions::default(),
    );
    assert_eq!(results.len(), 3);
    for result in &results {
        let parsed = result.as_ref().unwrap();
        assert!(parsed.diagnostics.is_empty());
        assert_eq!(parsed.library.len(), 1);
    }
}

#[test]
fn test_without_predefined_environment() {
    let options = ParseOptions::default().with_predefined(false);
    let parsed = parse("package P is X : INTEGER; end P;", &options).unwrap();
    let codes: Vec<_> = parsed.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E0401]);
}
