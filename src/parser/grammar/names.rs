//! Names, type marks and identifier lists
//!
//! Name suffixes that look alike (`F(X)` as call, conversion or indexing;
//! `P.X` as expanded name or component) are told apart by what the prefix
//! resolves to at the point of use.

use text_size::TextSize;

use super::{expressions, types};
use crate::base::{Name, NodeId};
use crate::parser::errors::ErrorCode;
use crate::parser::parser::{Parser, RuleResult};
use crate::parser::syntax_kind::SyntaxKind;
use crate::semantic::{Resolution, SymbolKind};
use crate::syntax::{ApplyForm, DefiningName, NameExpr, NodeKind, SelectedForm};

/// IdentifierList = Identifier { ',' Identifier }
pub(crate) fn identifier_list(p: &mut Parser<'_>) -> RuleResult<Vec<DefiningName>> {
    let Some(first) = p.defining_identifier()? else {
        return Ok(None);
    };
    let mut names = vec![first];
    while p.eat(SyntaxKind::COMMA)? {
        let Some(next) = p.defining_identifier()? else {
            return Ok(None);
        };
        names.push(next);
    }
    Ok(Some(names))
}

/// Designator = Identifier | OperatorSymbol
pub(crate) fn designator(p: &mut Parser<'_>) -> RuleResult<DefiningName> {
    if p.at(SyntaxKind::STRING_LITERAL) {
        let token = p.bump()?;
        return Ok(Some(DefiningName::new(Name::new(token.text), token.range)));
    }
    p.defining_identifier()
}

/// Name = DirectName { '.' Selector | '.' 'all' | '(' Actuals ')' | '(' DiscreteRange ')' | ''' Attribute }
pub(crate) fn name(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    p.nested(|p| {
        let start = p.start();
        let Some(mut prefix) = direct_name(p)? else {
            return Ok(None);
        };
        loop {
            let next = match p.current_kind() {
                SyntaxKind::DOT => selected(p, start, prefix)?,
                SyntaxKind::L_PAREN => apply(p, start, prefix)?,
                // `T'(...)` is a qualified expression, not a name
                SyntaxKind::TICK if p.nth(1) != SyntaxKind::L_PAREN => attribute(p, start, prefix)?,
                _ => break,
            };
            let Some(next) = next else {
                return Ok(None);
            };
            prefix = next;
        }
        Ok(Some(prefix))
    })
}

/// DirectName = Identifier | OperatorSymbol
fn direct_name(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    if !p.at_any(&[SyntaxKind::IDENT, SyntaxKind::STRING_LITERAL]) {
        return p.mismatch("a name");
    }
    let token = p.bump()?;
    let name = Name::new(token.text);
    let Resolution { symbol, kind } = p.resolve(&name);
    let node = NameExpr::Identifier {
        name,
        symbol,
        class: kind,
    };
    Ok(Some(p.alloc(start, NodeKind::Name(node))))
}

fn selected(p: &mut Parser<'_>, start: TextSize, prefix: NodeId) -> RuleResult<NodeId> {
    p.bump()?;
    if p.eat(SyntaxKind::ALL_KW)? {
        return Ok(Some(p.alloc(start, NodeKind::Name(NameExpr::Dereference { prefix }))));
    }
    let selector = match p.current_kind() {
        SyntaxKind::IDENT | SyntaxKind::STRING_LITERAL => Name::new(p.bump()?.text),
        SyntaxKind::CHAR_LITERAL => Name::verbatim(p.bump()?.text),
        _ => return p.mismatch("a selector"),
    };
    Ok(Some(select(p, start, prefix, selector)))
}

/// Allocate `prefix.selector`, classified by what the prefix denotes
fn select(p: &mut Parser<'_>, start: TextSize, prefix: NodeId, selector: Name) -> NodeId {
    let (owner, class) = classify(p, prefix);
    let (form, resolution) = match owner {
        Some(owner) if class.is_expanded_prefix() => (
            SelectedForm::Expanded,
            p.symbols.resolve_member(owner, &selector),
        ),
        _ if class.is_object() => (
            SelectedForm::Component,
            Resolution {
                symbol: None,
                kind: SymbolKind::Component,
            },
        ),
        _ => (SelectedForm::Component, Resolution::UNRESOLVED),
    };
    let node = NameExpr::Selected {
        prefix,
        selector,
        form,
        symbol: resolution.symbol,
        class: resolution.kind,
    };
    p.alloc(start, NodeKind::Name(node))
}

fn apply(p: &mut Parser<'_>, start: TextSize, prefix: NodeId) -> RuleResult<NodeId> {
    let (_, class) = classify(p, prefix);
    if !class.is_type_mark()
        && !class.is_subprogram()
        && p.ahead_in_group(1, &[SyntaxKind::DOT_DOT, SyntaxKind::RANGE_KW])
    {
        if let Some(range) = p.attempt(slice_range)? {
            return Ok(Some(p.alloc(start, NodeKind::Name(NameExpr::Slice { prefix, range }))));
        }
    }
    let Some(args) = expressions::actual_parameter_part(p)? else {
        return Ok(None);
    };
    let form = if class.is_type_mark() {
        ApplyForm::TypeConversion
    } else if class.is_subprogram() || class == SymbolKind::EnumerationLiteral {
        ApplyForm::Call
    } else if class.is_object() {
        ApplyForm::IndexedComponent
    } else {
        ApplyForm::Unresolved
    };
    Ok(Some(p.alloc(start, NodeKind::Name(NameExpr::Apply { prefix, args, form }))))
}

/// '(' DiscreteRange ')'
fn slice_range(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    if p.expect(SyntaxKind::L_PAREN)?.is_none() {
        return Ok(None);
    }
    let Some(range) = types::discrete_range(p, false)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::R_PAREN)?.is_none() {
        return Ok(None);
    }
    Ok(Some(range))
}

/// Attribute = ''' (Identifier | 'range' | 'digits' | 'delta' | 'access') [ '(' Expression { ',' Expression } ')' ]
fn attribute(p: &mut Parser<'_>, start: TextSize, prefix: NodeId) -> RuleResult<NodeId> {
    p.bump()?;
    let attribute = match p.current_kind() {
        SyntaxKind::IDENT
        | SyntaxKind::RANGE_KW
        | SyntaxKind::DIGITS_KW
        | SyntaxKind::DELTA_KW
        | SyntaxKind::ACCESS_KW => Name::new(p.bump()?.text),
        _ => return p.mismatch("an attribute designator"),
    };
    let mut args = Vec::new();
    if p.at(SyntaxKind::L_PAREN) {
        if let Some(parsed) = p.attempt(expressions::expression_list)? {
            args = parsed;
        }
    }
    let node = NameExpr::Attribute {
        prefix,
        attribute,
        args,
    };
    Ok(Some(p.alloc(start, NodeKind::Name(node))))
}

/// Symbol and classification of a name node
pub(crate) fn classify(
    p: &Parser<'_>,
    node: NodeId,
) -> (Option<crate::base::SymbolId>, SymbolKind) {
    match p.ast.as_name(node) {
        Some(name) => (name.symbol(), name.class()),
        None => (None, SymbolKind::Unresolved),
    }
}

/// Classify the simple or expanded name at the cursor without consuming it
pub(crate) fn lookahead_class(p: &Parser<'_>) -> SymbolKind {
    if !p.at(SyntaxKind::IDENT) {
        return SymbolKind::Unresolved;
    }
    let mut resolution = p.resolve(&Name::new(p.current().text));
    let mut n = 1;
    while p.nth(n) == SyntaxKind::DOT && p.nth(n + 1) == SyntaxKind::IDENT {
        let selector = Name::new(p.nth_token(n + 1).text);
        resolution = match resolution.symbol {
            Some(owner) if resolution.kind.is_expanded_prefix() => {
                p.symbols.resolve_member(owner, &selector)
            }
            _ => return SymbolKind::Unresolved,
        };
        n += 2;
    }
    resolution.kind
}

/// TypeMark = Identifier { '.' Identifier }
///
/// Reports a type mark that does not denote a type, and (as a warning) one
/// that does not resolve at all.
pub(crate) fn type_mark(p: &mut Parser<'_>) -> RuleResult<(NodeId, Resolution)> {
    if !p.at(SyntaxKind::IDENT) {
        return p.mismatch("a type mark");
    }
    let Some(node) = expanded_name(p)? else {
        return Ok(None);
    };
    let (symbol, kind) = classify(p, node);
    let resolution = Resolution { symbol, kind };
    check_type_mark(p, node, resolution);
    Ok(Some((node, resolution)))
}

/// ExpandedName = Identifier { '.' Identifier }, with no other suffixes
pub(crate) fn expanded_name(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    if !p.at(SyntaxKind::IDENT) {
        return p.mismatch("a name");
    }
    let Some(mut node) = direct_name(p)? else {
        return Ok(None);
    };
    while p.at(SyntaxKind::DOT) && p.nth(1) == SyntaxKind::IDENT {
        p.bump()?;
        let selector = Name::new(p.bump()?.text);
        node = select(p, start, node, selector);
    }
    Ok(Some(node))
}

fn check_type_mark(p: &mut Parser<'_>, node: NodeId, resolution: Resolution) {
    let range = p.ast.range(node);
    match resolution.kind {
        SymbolKind::Unresolved => {
            if p.options().warn_unresolved_type_marks {
                p.warn(
                    ErrorCode::E0401,
                    format!("type mark '{}' is not declared", text_of(p, node)),
                    range,
                );
            }
        }
        kind if !kind.is_type_mark() => p.note(
            ErrorCode::E0402,
            format!("'{}' is a {}, not a type", text_of(p, node), kind.as_str()),
            range,
        ),
        _ => {}
    }
}

/// Source-like spelling of a simple or expanded name
pub(crate) fn text_of(p: &Parser<'_>, node: NodeId) -> String {
    match p.ast.as_name(node) {
        Some(NameExpr::Identifier { name, .. }) => name.to_string(),
        Some(NameExpr::Selected {
            prefix, selector, ..
        }) => format!("{}.{}", text_of(p, *prefix), selector),
        _ => String::from("<name>"),
    }
}
