//! Parser Tests - Backtracking
//!
//! A failed alternative must leave no trace: cursor, diagnostics, scopes and
//! nodes all return to where they were. A successful one must leave the
//! scope stack as it found it.

use adafront::parser::{
    ParseError, ParseOptions, Parser, Rule, RuleResult, TokenCursor, parse, parse_rule,
    parse_rule_with, tokenize_for_parser,
};
use std::time::{Duration, Instant};

use adafront::syntax::{Decl, Expr};
use rstest::rstest;

fn with_parser<R>(source: &str, f: impl FnOnce(&mut Parser<'_>) -> R) -> R {
    let tokens = tokenize_for_parser(source);
    let cursor = TokenCursor::new(&tokens).unwrap();
    let mut parser = Parser::new(cursor, ParseOptions::default());
    f(&mut parser)
}

fn run_on_big_stack<R: Send + 'static>(f: impl FnOnce() -> R + Send + 'static) -> R {
    std::thread::Builder::new()
        .stack_size(64 << 20)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap()
}

// ============================================================================
// Purity of failed attempts
// ============================================================================

#[rstest]
#[case(Rule::ObjectDeclaration, "type T is range 1 .. 10;")]
#[case(Rule::TypeDeclaration, "type R is record X : INTEGER; end")]
#[case(Rule::SubprogramBody, "procedure P (X : INTEGER) is Y : INTEGER; begin null; end loop")]
#[case(Rule::PackageDeclaration, "package Q is new G;")]
#[case(Rule::Assignment, "Put (X);")]
fn test_failed_rule_restores_parser(#[case] rule: Rule, #[case] source: &str) {
    // Append a token so a rule that runs off the end mismatches instead of
    // hitting end of input
    let source = format!("{source} ;;");
    with_parser(&source, |p| {
        let before = p.checkpoint();
        let symbols = p.symbols().len();
        let result = p.attempt(|p| rule.parse(p)).unwrap();
        assert!(result.is_none(), "{rule:?} unexpectedly matched");
        assert_eq!(p.checkpoint(), before);
        assert!(p.log().is_empty());
        assert!(p.ast().is_empty());
        assert_eq!(p.symbols().len(), symbols);
    });
}

#[test]
fn test_restore_is_idempotent() {
    with_parser("X : INTEGER; Y : FLOAT;", |p| {
        let start = p.checkpoint();
        p.attempt(|p| Rule::ObjectDeclaration.parse(p)).unwrap().unwrap();
        let after_first = p.checkpoint();
        p.restore(start).unwrap();
        p.restore(start).unwrap();
        assert_eq!(p.checkpoint(), start);
        // Replaying gives the same state
        p.attempt(|p| Rule::ObjectDeclaration.parse(p)).unwrap().unwrap();
        assert_eq!(p.checkpoint(), after_first);
    });
}

#[test]
fn test_symbols_declared_by_failed_alternative_are_gone() {
    with_parser("procedure P (X : INTEGER) is Y : INTEGER; begin null; end P; Q", |p| {
        // The body itself commits; the enclosing attempt then gives up
        let result: RuleResult<()> = p.attempt(|p| {
            assert!(Rule::SubprogramBody.parse(p)?.is_some());
            assert!(p.resolve(&"P".into()).symbol.is_some());
            p.mismatch("end of input")
        });
        assert_eq!(result, Ok(None));
        assert!(p.resolve(&"P".into()).symbol.is_none());
        assert!(p.resolve(&"X".into()).symbol.is_none());
        assert!(p.resolve(&"Y".into()).symbol.is_none());
    });
}

#[test]
fn test_first_of_takes_first_match() {
    // The object declaration is tried first and fails at `:=`
    with_parser("N : constant := 3;", |p| {
        let node = p.first_of(Rule::DECLARATIVE_ITEMS).unwrap().unwrap();
        assert!(matches!(p.ast().as_decl(node), Some(Decl::Number { .. })));
        assert!(p.at_eof());
    });
}

// ============================================================================
// Scope balance
// ============================================================================

#[rstest]
#[case(Rule::TypeDeclaration, "type R (D : INTEGER) is record X : INTEGER; end record;")]
#[case(Rule::PackageDeclaration, "package P is X : INTEGER; private Y : FLOAT; end P;")]
#[case(Rule::SubprogramBody, "procedure P (A : INTEGER) is begin for I in 1 .. A loop null; end loop; end P;")]
#[case(Rule::GenericDeclaration, "generic type T is private; procedure Swap (A, B : in out T);")]
#[case(Rule::Statement, "L : declare X : INTEGER; begin loop exit L; end loop; end L;")]
#[case(Rule::PackageBody, "package body P is begin null; end P;")]
fn test_successful_rule_balances_scopes(#[case] rule: Rule, #[case] source: &str) {
    let result = parse_rule(rule, source);
    assert!(result.root.is_some(), "{rule:?} failed on {source:?}");
    // Library region plus the region the rule ran in
    assert_eq!(result.symbols.depth(), 2);
}

#[test]
fn test_driver_balances_scopes_on_failure() {
    // Debug builds assert the scope stack depth in the driver itself
    assert!(parse("package P is X : INTEGER; end", &ParseOptions::default()).is_err());
    assert!(parse("garbage here", &ParseOptions::default()).is_err());
}

// ============================================================================
// Nesting limit
// ============================================================================

#[test]
fn test_deep_parentheses_abort_with_depth_error() {
    let result = run_on_big_stack(|| {
        let source = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        parse_rule(Rule::Expression, &source)
    });
    assert!(result.root.is_none());
    assert!(matches!(result.fatal, Some(ParseError::DepthExceeded { limit: 256, .. })));
}

#[test]
fn test_moderate_nesting_is_fine() {
    let result = run_on_big_stack(|| {
        let source = format!("{}1{}", "(".repeat(20), ")".repeat(20));
        parse_rule(Rule::Expression, &source)
    });
    assert!(result.is_ok());
}

#[test]
fn test_depth_limit_is_configurable() {
    let options = ParseOptions::default().with_max_depth(8);
    let result = parse_rule_with(Rule::Expression, "((((((((1))))))))", &options);
    assert!(matches!(result.fatal, Some(ParseError::DepthExceeded { limit: 8, .. })));
}

#[test]
fn test_depth_error_reaches_driver_log() {
    let source = format!(
        "procedure P is X : INTEGER := {}1{}; begin null; end P;",
        "(".repeat(5_000),
        ")".repeat(5_000)
    );
    let failure = run_on_big_stack(move || parse(&source, &ParseOptions::default()).unwrap_err());
    assert!(matches!(failure.fatal, Some(ParseError::DepthExceeded { .. })));
    assert_eq!(
        failure.diagnostics.last().map(|d| d.code),
        Some(adafront::parser::ErrorCode::E0902)
    );
}

#[test]
fn test_nested_named_choices_parse_once() {
    // Each choice holds another named aggregate; re-reading a choice after a
    // failed range attempt would double the work per level
    let source = (0..30).fold("1".to_string(), |inner, _| format!("({inner} => 1)"));
    let started = Instant::now();
    let result = run_on_big_stack(move || parse_rule(Rule::Expression, &source));
    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(result.is_ok(), "{:?}", result.fatal);
    let associations = result
        .ast
        .iter()
        .filter(|(id, _)| matches!(result.ast.as_expr(*id), Some(Expr::Association { .. })))
        .count();
    assert_eq!(associations, 30);
}

// ============================================================================
// Order preservation
// ============================================================================

#[test]
fn test_declarations_keep_source_order() {
    let result = parse_rule(
        Rule::PackageDeclaration,
        "package P is A : INTEGER; type T is range 0 .. 1; B, C : T; procedure Q; end P;",
    );
    let Some(Decl::PackageDecl { visible, .. }) = result.ast.as_decl(result.root.unwrap()) else {
        panic!("expected package");
    };
    let labels: Vec<_> = visible
        .iter()
        .map(|&id| result.ast.kind(id).label())
        .collect();
    assert_eq!(labels, vec!["ObjectDecl", "TypeDecl", "ObjectDecl", "SubprogramDecl"]);
    let starts: Vec<_> = visible.iter().map(|&id| result.ast.range(id).start()).collect();
    assert!(starts.windows(2).all(|w| w[0] < w[1]));
}
