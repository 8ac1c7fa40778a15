//! Package declarations and bodies

use super::{declarations, statements};
use crate::base::{NodeId, SymbolId};
use crate::parser::errors::ParseContext;
use crate::parser::parser::{Parser, RuleResult};
use crate::parser::syntax_kind::SyntaxKind;
use crate::semantic::{ImportKind, RegionKind, Symbol, SymbolKind};
use crate::syntax::{Decl, NodeKind};

/// PackageDeclaration = PackageSpecification ';'
pub(crate) fn package_declaration(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let Some((node, _)) = package_specification(p, None, SymbolKind::Package)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }
    Ok(Some(node))
}

/// PackageSpecification = 'package' Identifier 'is' { BasicDeclarativeItem }
///     ['private' { BasicDeclarativeItem }] 'end' [Identifier]
///
/// The package's declarations are published under its symbol once the
/// region closes. `symbol_node` overrides the node the symbol points at
/// (a generic declaration owns its package).
pub(crate) fn package_specification(
    p: &mut Parser<'_>,
    symbol_node: Option<NodeId>,
    kind: SymbolKind,
) -> RuleResult<(NodeId, SymbolId)> {
    let start = p.start();
    if p.expect(SyntaxKind::PACKAGE_KW)?.is_none() {
        return Ok(None);
    }
    let Some(name) = p.defining_identifier()? else {
        return Ok(None);
    };
    if p.expect_alt(SyntaxKind::IS_KW)?.is_none() {
        return Ok(None);
    }
    if p.at(SyntaxKind::NEW_KW) {
        return p.mismatch("a basic declaration");
    }

    let node = p.reserve_node(start);
    let symbol =
        Symbol::new(name.name.clone(), kind, name.range).with_node(symbol_node.unwrap_or(node));
    let symbol = p.symbols.reserve(symbol);
    p.bind(symbol);
    p.symbols.push(RegionKind::Package, Some(symbol));

    let visible = declarations::declarative_items(p, ParseContext::PackageSpecification)?;
    let private = if p.eat(SyntaxKind::PRIVATE_KW)? {
        p.symbols.mark_private();
        Some(declarations::declarative_items(p, ParseContext::PackageSpecification)?)
    } else {
        None
    };
    if p.expect(SyntaxKind::END_KW)?.is_none() {
        return Ok(None);
    }
    let end_name = p.end_designator(&name.name)?;

    if let Some(closed) = p.symbols.pop() {
        p.symbols.publish(symbol, &closed);
    }
    let decl = Decl::PackageDecl {
        name,
        visible,
        private,
        end_name,
    };
    p.fill(node, start, NodeKind::Decl(decl))?;
    Ok(Some((node, symbol)))
}

/// PackageBody = 'package' 'body' Identifier 'is' DeclarativePart
///     ['begin' HandledStatements] 'end' [Identifier] ';'
///
/// A body sees every declaration of its specification, private ones
/// included.
pub(crate) fn package_body(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    if p.expect(SyntaxKind::PACKAGE_KW)?.is_none() || p.expect_alt(SyntaxKind::BODY_KW)?.is_none() {
        return Ok(None);
    }
    let Some(name) = p.defining_identifier()? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::IS_KW)?.is_none() {
        return Ok(None);
    }
    if p.at(SyntaxKind::SEPARATE_KW) {
        return p.mismatch("a declarative part");
    }

    let resolution = p.resolve(&name.name);
    let owner = match resolution.kind {
        SymbolKind::Package | SymbolKind::GenericPackage => resolution.symbol,
        _ => None,
    };
    p.symbols.push(RegionKind::PackageBody, owner);
    if let Some(owner) = owner {
        p.symbols.import(owner, ImportKind::Body);
    }

    let decls = declarations::declarative_part(p)?;
    let body = if p.eat(SyntaxKind::BEGIN_KW)? {
        let Some(body) = statements::handled_statements(p)? else {
            return Ok(None);
        };
        Some(body)
    } else {
        None
    };
    if p.expect(SyntaxKind::END_KW)?.is_none() {
        return Ok(None);
    }
    let end_name = p.end_designator(&name.name)?;
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }
    p.symbols.pop();
    let decl = Decl::PackageBody {
        name,
        decls,
        body,
        end_name,
    };
    Ok(Some(p.alloc(start, NodeKind::Decl(decl))))
}
