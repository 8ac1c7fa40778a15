//! Semantic Tests - Visibility
//!
//! How names resolve while parsing: nested regions, record interiors,
//! expanded names, use clauses, instances, renamings and private parts.

use adafront::parser::{ErrorCode, Rule, parse_rule};
use adafront::semantic::SymbolKind;
use adafront::syntax::{NameExpr, SelectedForm};

use crate::helpers::diagnostic_helpers::{assert_clean, codes_of, rule_ok};

// ============================================================================
// Direct visibility
// ============================================================================

#[test]
fn test_type_declared_earlier_resolves() {
    let result = rule_ok(
        Rule::PackageDeclaration,
        "package P is type T is range 1 .. 5; Y : T; end P;",
    );
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_outer_declaration_visible_in_nested_subprogram() {
    assert_clean(
        r#"
procedure Outer is
   type Count is range 0 .. 99;
   procedure Inner is
      C : Count := 0;
   begin
      null;
   end Inner;
begin
   Inner;
end Outer;
"#,
    );
}

#[test]
fn test_subprogram_locals_hidden_from_record_components() {
    // Inside a procedure, a record component cannot see the procedure's
    // objects, so `X` is simply undeclared there
    let source = r#"
procedure P is
   X : INTEGER;
   type R is record
      C : X;
   end record;
begin
   null;
end P;
"#;
    assert_eq!(codes_of(source), vec![ErrorCode::E0401]);
}

#[test]
fn test_package_objects_visible_from_record_components() {
    // Package-level objects stay visible, so the same mistake is reported
    // as a name that is not a type
    let source = "package P is X : INTEGER; type R is record C : X; end record; end P;";
    assert_eq!(codes_of(source), vec![ErrorCode::E0402]);
}

#[test]
fn test_discriminants_visible_in_components() {
    assert_clean(
        r#"
package Texts is
   type Text (Length : NATURAL) is record
      Data : STRING (1 .. Length);
   end record;
end Texts;
"#,
    );
}

// ============================================================================
// Expanded names
// ============================================================================

#[test]
fn test_expanded_name_of_package_member() {
    assert_clean(
        r#"
package Units is
   type Meters is digits 6;
end Units;

with Units;
procedure Measure is
   D : Units.Meters := 1.0;
begin
   null;
end Measure;
"#,
    );
}

#[test]
fn test_expanded_name_does_not_reach_private_part() {
    let source = r#"
package Vault is
   type Key is private;
private
   type Secret is range 0 .. 9;
   type Key is record
      S : Secret;
   end record;
end Vault;

with Vault;
procedure Peek is
   S : Vault.Secret;
begin
   null;
end Peek;
"#;
    assert_eq!(codes_of(source), vec![ErrorCode::E0401]);
}

#[test]
fn test_expanded_name_inside_own_package() {
    let result = rule_ok(
        Rule::PackageDeclaration,
        "package Pkg is type T is range 0 .. 1; X : Pkg.T; end Pkg;",
    );
    assert!(result.diagnostics.is_empty());
    assert!(result.ast.iter().any(|(id, _)| matches!(
        result.ast.as_name(id),
        Some(NameExpr::Selected { form: SelectedForm::Expanded, symbol: Some(_), .. })
    )));
}

// ============================================================================
// Use clauses, instances, renamings
// ============================================================================

#[test]
fn test_use_clause_makes_declarations_visible() {
    assert_clean(
        r#"
package Colors is
   type Color is (Red, Green, Blue);
end Colors;

with Colors;
use Colors;
procedure Paint is
   C : Color := Red;
begin
   null;
end Paint;
"#,
    );
}

#[test]
fn test_use_of_instance_exports_generic_declarations() {
    let source = r#"
generic
   type Element is private;
package Boxes is
   type Box is record
      Content : Element;
   end record;
end Boxes;

with Boxes;
procedure Pack is
   package Int_Boxes is new Boxes (INTEGER);
   use Int_Boxes;
   B : Box;
begin
   null;
end Pack;
"#;
    assert_clean(source);
}

#[test]
fn test_expanded_name_through_instance() {
    assert_clean(
        r#"
generic
   type Element is private;
package Boxes is
   type Box is record
      Content : Element;
   end record;
end Boxes;

with Boxes;
procedure Pack is
   package Int_Boxes is new Boxes (INTEGER);
   B : Int_Boxes.Box;
begin
   null;
end Pack;
"#,
    );
}

#[test]
fn test_expanded_name_through_package_renaming() {
    assert_clean("package P is package S renames STANDARD; X : S.INTEGER; end P;");
}

#[test]
fn test_direct_visibility_wins_over_use() {
    let source = r#"
package Shapes is
   type Size is range 0 .. 9;
end Shapes;

with Shapes;
use Shapes;
procedure Draw is
   Size : INTEGER := 0;
   X : Size;
begin
   null;
end Draw;
"#;
    assert_eq!(codes_of(source), vec![ErrorCode::E0402]);
}

#[test]
fn test_use_clause_ends_with_its_region() {
    let source = r#"
package Colors is
   type Color is (Red, Green, Blue);
end Colors;

with Colors;
procedure Paint is
   procedure Inner is
      use Colors;
   begin
      null;
   end Inner;
   C : Color;
begin
   null;
end Paint;
"#;
    assert_eq!(codes_of(source), vec![ErrorCode::E0401]);
}

// ============================================================================
// Private parts and bodies
// ============================================================================

#[test]
fn test_body_sees_private_declarations() {
    assert_clean(
        r#"
package Vault is
   procedure Open;
private
   type Secret is range 0 .. 9;
end Vault;

package body Vault is
   S : Secret := 0;
   procedure Open is
   begin
      null;
   end Open;
end Vault;
"#,
    );
}

#[test]
fn test_private_part_sees_visible_part() {
    let result = parse_rule(
        Rule::PackageDeclaration,
        "package P is type T is private; private type T is range 0 .. 1; X : T; end P;",
    );
    assert!(result.is_ok());
    // The full declaration completes the private view instead of clashing
    assert!(result.diagnostics.is_empty());
    let marks: Vec<_> = result
        .ast
        .iter()
        .filter_map(|(id, _)| match result.ast.as_name(id) {
            Some(NameExpr::Identifier { name, class, .. }) if *name == "T" => Some(*class),
            _ => None,
        })
        .collect();
    assert_eq!(marks, vec![SymbolKind::Type]);

    // Outside the package only the private view is reachable
    let package = result.symbols.resolve(&"P".into()).symbol.unwrap();
    assert_eq!(
        result.symbols.resolve_member(package, &"T".into()).kind,
        SymbolKind::PrivateType
    );
}
