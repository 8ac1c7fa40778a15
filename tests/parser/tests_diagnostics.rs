//! Parser Tests - Diagnostics
//!
//! What ends up in the final log: lexical errors, recovery reports,
//! semantic notes and warnings, and their ranges and related information.

use adafront::parser::{
    ErrorCode, ParseOptions, Rule, Severity, parse, parse_rule, prepare_tokens,
    tokenize_for_parser,
};
use adafront::syntax::Decl;
use adafront::{LineIndex, Position, TextRange, TextSize};
use rstest::rstest;

use crate::helpers::diagnostic_helpers::{codes_of, parse_ok};

// ============================================================================
// Lexical
// ============================================================================

#[rstest]
#[case("X : INTEGER := 1 $ 2;", ErrorCode::E0101)]
#[case("S : STRING := \"open", ErrorCode::E0102)]
#[case("Bad__Name : INTEGER;", ErrorCode::E0103)]
#[case("Trailing_ : INTEGER;", ErrorCode::E0103)]
fn test_lexical_error_codes(#[case] source: &str, #[case] code: ErrorCode) {
    let (_, diagnostics) = prepare_tokens(tokenize_for_parser(source));
    assert_eq!(diagnostics.first().map(|d| d.code), Some(code));
}

#[test]
fn test_lexical_errors_lead_the_log() {
    let parsed = parse_ok("package P is ? X : Mystery; end P;");
    let codes: Vec<_> = parsed.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E0101, ErrorCode::E0401]);
}

// ============================================================================
// Recovery reports
// ============================================================================

#[test]
fn test_missing_type_mark_in_package() {
    let source = "package P is X : ; end P;";
    let parsed = parse_ok(source);
    assert_eq!(parsed.diagnostics.len(), 1);
    let diagnostic = &parsed.diagnostics[0];
    assert_eq!(diagnostic.code, ErrorCode::UNRECOGNIZED_DECLARATIVE_ITEM);
    // Reported where the object declaration gave up, at the `;`
    assert_eq!(diagnostic.range, TextRange::new(TextSize::new(17), TextSize::new(18)));
    assert!(diagnostic.message.contains("in package specification"));
    assert_eq!(diagnostic.related.len(), 1);
    assert_eq!(diagnostic.related[0].range.start(), TextSize::new(13));

    let package = parsed
        .ast
        .iter()
        .find_map(|(id, _)| match parsed.ast.as_decl(id) {
            Some(Decl::PackageDecl { visible, .. }) => Some(visible.clone()),
            _ => None,
        })
        .unwrap();
    assert!(package.is_empty());
}

#[test]
fn test_recovery_keeps_later_items() {
    let source = "package P is X : ; Y : INTEGER; Z : ; W : FLOAT; end P;";
    let parsed = parse_ok(source);
    assert_eq!(
        codes_of(source),
        vec![ErrorCode::E0301, ErrorCode::E0301]
    );
    let visible = parsed
        .ast
        .iter()
        .find_map(|(id, _)| match parsed.ast.as_decl(id) {
            Some(Decl::PackageDecl { visible, .. }) => Some(visible.len()),
            _ => None,
        });
    assert_eq!(visible, Some(2));
}

#[test]
fn test_recovery_stops_at_private() {
    let source = "package P is X := 1; private Y : INTEGER; end P;";
    assert_eq!(codes_of(source), vec![ErrorCode::E0301]);
}

#[test]
fn test_recovery_in_declarative_part() {
    let source = "procedure P is X : INTEGER; 42; begin null; end P;";
    assert_eq!(codes_of(source), vec![ErrorCode::E0301]);
}

// ============================================================================
// Semantic notes
// ============================================================================

#[test]
fn test_duplicate_carries_first_declaration() {
    let source = "package P is X : INTEGER; X : FLOAT; end P;";
    let parsed = parse_ok(source);
    assert_eq!(parsed.diagnostics.len(), 1);
    let diagnostic = &parsed.diagnostics[0];
    assert_eq!(diagnostic.code, ErrorCode::DUPLICATE_DECLARATION);
    assert_eq!(diagnostic.range.start(), TextSize::new(26));
    assert_eq!(diagnostic.related.len(), 1);
    assert_eq!(diagnostic.related[0].range.start(), TextSize::new(13));
}

#[test]
fn test_inner_declaration_hides_outer() {
    assert!(codes_of("package P is INTEGER : FLOAT; end P;").is_empty());
}

#[test]
fn test_completions_are_not_duplicates() {
    let source = r#"
package P is
   type T;
   type T is range 1 .. 10;
   C : constant T;
private
   C : constant T := 1;
end P;
"#;
    assert!(codes_of(source).is_empty());
}

#[test]
fn test_end_designator_mismatch() {
    assert_eq!(codes_of("package P is end Q;"), vec![ErrorCode::E0203]);
}

#[test]
fn test_unresolved_type_mark_is_a_warning() {
    let parsed = parse_ok("package P is X : Unknown; end P;");
    assert_eq!(parsed.diagnostics.len(), 1);
    assert_eq!(parsed.diagnostics[0].severity, Severity::Warning);
    assert!(!parsed.has_errors());
    assert!(parsed.diagnostics[0].format().starts_with("warning E0401"));
}

#[test]
fn test_unresolved_warning_can_be_disabled() {
    let options = ParseOptions::default().with_unresolved_warnings(false);
    let parsed = parse("package P is X : Unknown; end P;", &options).unwrap();
    assert!(parsed.diagnostics.is_empty());
}

#[test]
fn test_failed_alternatives_leave_no_diagnostics() {
    // The object declaration alternative warns about `Mystery` before it
    // fails at `renames`; only the renaming's own warning survives.
    let source = "package P is X : Mystery renames Y; end P;";
    assert_eq!(codes_of(source), vec![ErrorCode::E0401]);
}

#[test]
fn test_rule_mismatch_reports_nothing() {
    let result = parse_rule(Rule::ObjectDeclaration, "X : constant := 1;");
    assert!(result.root.is_none());
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_diagnostic_position() {
    let source = "package P is\n   X : ;\nend P;";
    let parsed = parse_ok(source);
    let index = LineIndex::new(source);
    let position = index.position(parsed.diagnostics[0].range.start());
    assert_eq!(position, Position::new(1, 7));
}

#[cfg(feature = "serde")]
#[test]
fn test_diagnostics_serialize_to_json() {
    let parsed = parse_ok("package P is X : Unknown; X : INTEGER; end P;");
    let json = serde_json::to_value(&parsed.diagnostics).unwrap();
    let codes: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["code"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(codes, vec!["E0401", "E0302"]);
    assert_eq!(json[0]["severity"], "Warning");
}
