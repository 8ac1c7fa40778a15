//! Diagnostic assertion helpers.

use adafront::parser::{
    Diagnostic, ErrorCode, ParseOptions, ParsedCompilation, Rule, RuleParseResult, parse,
    parse_rule,
};
use adafront::syntax::check_tree;

/// Parse a compilation that must succeed, with a sound tree.
pub fn parse_ok(source: &str) -> ParsedCompilation {
    let parsed = match parse(source, &ParseOptions::default()) {
        Ok(parsed) => parsed,
        Err(failure) => panic!("parse failed for:\n{source}\n{:#?}", failure.diagnostics),
    };
    let violations = check_tree(&parsed.ast, parsed.root);
    assert!(violations.is_empty(), "unsound tree: {violations:?}");
    parsed
}

/// Parse a compilation that must succeed without any diagnostic.
pub fn assert_clean(source: &str) -> ParsedCompilation {
    let parsed = parse_ok(source);
    assert!(
        parsed.diagnostics.is_empty(),
        "expected no diagnostics, got:\n{}",
        format_diagnostics(&parsed.diagnostics)
    );
    parsed
}

/// Codes of every diagnostic of a successful parse, in report order.
pub fn codes_of(source: &str) -> Vec<ErrorCode> {
    parse_ok(source).diagnostics.iter().map(|d| d.code).collect()
}

/// Parse one rule and require a full, error-free match.
pub fn rule_ok(rule: Rule, input: &str) -> RuleParseResult {
    let result = parse_rule(rule, input);
    assert!(
        result.is_ok(),
        "{rule:?} failed on {input:?}: fatal={:?}, consumed={}, diagnostics:\n{}",
        result.fatal,
        result.fully_consumed,
        format_diagnostics(&result.diagnostics)
    );
    if let Some(root) = result.root {
        let violations = check_tree(&result.ast, root);
        assert!(violations.is_empty(), "unsound tree: {violations:?}");
    }
    result
}

/// Parse one rule and require that it does not match the whole input.
pub fn rule_rejects(rule: Rule, input: &str) {
    let result = parse_rule(rule, input);
    assert!(!result.is_ok(), "{rule:?} unexpectedly accepted {input:?}");
}

pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| format!("  {} {}", d.code.as_str(), d.message))
        .collect::<Vec<_>>()
        .join("\n")
}
