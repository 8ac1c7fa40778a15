//! Basic declarations, use clauses and pragmas
//!
//! Objects, named numbers and exceptions become visible only once their
//! declaration is complete, so an initial value never sees the names it
//! initializes.

use super::{expressions, names, subprograms, types};
use crate::base::NodeId;
use crate::parser::errors::{ErrorCode, ParseContext, ParseError};
use crate::parser::parser::{Parser, RuleResult};
use crate::parser::rule_parser::Rule;
use crate::parser::syntax_kind::SyntaxKind;
use crate::semantic::{ImportKind, Symbol, SymbolKind};
use crate::syntax::{Decl, NodeKind, RenamingKind, StubKind};

/// DeclarativePart = { DeclarativeItem }
pub(crate) fn declarative_part(p: &mut Parser<'_>) -> Result<Vec<NodeId>, ParseError> {
    declarative_items(p, ParseContext::DeclarativePart)
}

/// Declarative items up to whatever closes `context`, recovering from
/// items that match no alternative
pub(crate) fn declarative_items(
    p: &mut Parser<'_>,
    context: ParseContext,
) -> Result<Vec<NodeId>, ParseError> {
    p.recover_list(context, ErrorCode::UNRECOGNIZED_DECLARATIVE_ITEM, |p| {
        p.first_of(Rule::DECLARATIVE_ITEMS)
    })
}

/// ObjectDeclaration = IdentifierList ':' ['constant']
///     (SubtypeIndication | ConstrainedArrayDefinition) [':=' Expression] ';'
pub(crate) fn object_declaration(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let Some(names) = names::identifier_list(p)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::COLON)?.is_none() {
        return Ok(None);
    }
    let constant = p.eat(SyntaxKind::CONSTANT_KW)?;
    if constant && p.at(SyntaxKind::COLON_EQ) {
        return p.mismatch("a subtype indication");
    }
    let subtype = if p.at(SyntaxKind::ARRAY_KW) {
        types::constrained_array(p)?
    } else {
        types::subtype_indication(p)?
    };
    let Some(subtype) = subtype else {
        return Ok(None);
    };
    let init = if p.eat(SyntaxKind::COLON_EQ)? {
        let Some(init) = expressions::expression(p)? else {
            return Ok(None);
        };
        Some(init)
    } else {
        None
    };
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }
    let kind = match (constant, init) {
        (false, _) => SymbolKind::Object,
        (true, Some(_)) => SymbolKind::Constant,
        (true, None) => SymbolKind::DeferredConstant,
    };
    let node = p.alloc(
        start,
        NodeKind::Decl(Decl::Object {
            names: names.clone(),
            constant,
            subtype,
            init,
        }),
    );
    types::declare_all(p, &names, kind, node);
    Ok(Some(node))
}

/// NumberDeclaration = IdentifierList ':' 'constant' ':=' Expression ';'
pub(crate) fn number_declaration(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let Some(names) = names::identifier_list(p)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::COLON)?.is_none()
        || p.expect(SyntaxKind::CONSTANT_KW)?.is_none()
        || p.expect(SyntaxKind::COLON_EQ)?.is_none()
    {
        return Ok(None);
    }
    let Some(value) = expressions::expression(p)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }
    let node = p.alloc(
        start,
        NodeKind::Decl(Decl::Number {
            names: names.clone(),
            value,
        }),
    );
    types::declare_all(p, &names, SymbolKind::NamedNumber, node);
    Ok(Some(node))
}

/// ExceptionDeclaration = IdentifierList ':' 'exception' ';'
pub(crate) fn exception_declaration(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let Some(names) = names::identifier_list(p)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::COLON)?.is_none()
        || p.expect(SyntaxKind::EXCEPTION_KW)?.is_none()
        || p.expect(SyntaxKind::SEMICOLON)?.is_none()
    {
        return Ok(None);
    }
    let node = p.alloc(start, NodeKind::Decl(Decl::Exception { names: names.clone() }));
    types::declare_all(p, &names, SymbolKind::Exception, node);
    Ok(Some(node))
}

/// SubtypeDeclaration = 'subtype' Identifier 'is' SubtypeIndication ';'
pub(crate) fn subtype_declaration(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    if p.expect(SyntaxKind::SUBTYPE_KW)?.is_none() {
        return Ok(None);
    }
    let Some(name) = p.defining_identifier()? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::IS_KW)?.is_none() {
        return Ok(None);
    }
    let Some(indication) = types::subtype_indication(p)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }
    let shape = types::indication_shape(p, indication);
    let node = p.alloc(
        start,
        NodeKind::Decl(Decl::Subtype {
            name: name.clone(),
            indication,
        }),
    );
    let symbol = Symbol::new(name.name, SymbolKind::Subtype, name.range)
        .with_node(node)
        .with_shape(shape);
    p.declare(symbol);
    Ok(Some(node))
}

// =============================================================================
// Renamings
// =============================================================================

/// RenamingDeclaration =
///       Identifier ':' TypeMark 'renames' Name ';'
///     | Identifier ':' 'exception' 'renames' Name ';'
///     | 'package' Identifier 'renames' Name ';'
///     | SubprogramSpecification 'renames' Name ';'
pub(crate) fn renaming_declaration(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    match p.current_kind() {
        SyntaxKind::IDENT => object_renaming(p),
        SyntaxKind::PACKAGE_KW => package_renaming(p),
        SyntaxKind::PROCEDURE_KW | SyntaxKind::FUNCTION_KW => subprogram_renaming(p),
        _ => p.mismatch("a renaming declaration"),
    }
}

fn object_renaming(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let Some(name) = p.defining_identifier()? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::COLON)?.is_none() {
        return Ok(None);
    }
    let (kind, symbol_kind) = if p.eat(SyntaxKind::EXCEPTION_KW)? {
        (RenamingKind::Exception, SymbolKind::Exception)
    } else {
        let Some((subtype, _)) = names::type_mark(p)? else {
            return Ok(None);
        };
        (RenamingKind::Object { subtype }, SymbolKind::Object)
    };
    let Some(renamed) = renamed_name(p)? else {
        return Ok(None);
    };
    let node = p.alloc(
        start,
        NodeKind::Decl(Decl::Renaming {
            name: name.clone(),
            kind,
            renamed,
        }),
    );
    p.declare(Symbol::new(name.name, symbol_kind, name.range).with_node(node));
    Ok(Some(node))
}

/// A package renaming reaches the renamed package's declarations through
/// expanded names.
fn package_renaming(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    p.bump()?;
    let Some(name) = p.defining_identifier()? else {
        return Ok(None);
    };
    let Some(renamed) = renamed_name(p)? else {
        return Ok(None);
    };
    let node = p.alloc(
        start,
        NodeKind::Decl(Decl::Renaming {
            name: name.clone(),
            kind: RenamingKind::Package,
            renamed,
        }),
    );
    let alias = p.declare(Symbol::new(name.name, SymbolKind::Package, name.range).with_node(node));
    if let (Some(target), _) = names::classify(p, renamed) {
        p.symbols.publish_alias(alias, target);
    }
    Ok(Some(node))
}

fn subprogram_renaming(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let node = p.reserve_node(start);
    let Some(header) = subprograms::subprogram_specification(p, node, false)? else {
        return Ok(None);
    };
    let Some(renamed) = renamed_name(p)? else {
        return Ok(None);
    };
    p.symbols.pop();
    let decl = Decl::Renaming {
        name: header.name,
        kind: RenamingKind::Subprogram { spec: header.spec },
        renamed,
    };
    p.fill(node, start, NodeKind::Decl(decl))?;
    Ok(Some(node))
}

/// 'renames' Name ';'
fn renamed_name(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    if p.expect_alt(SyntaxKind::RENAMES_KW)?.is_none() {
        return Ok(None);
    }
    let Some(renamed) = names::name(p)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }
    Ok(Some(renamed))
}

// =============================================================================
// Body stubs
// =============================================================================

/// BodyStub = SubprogramSpecification 'is' 'separate' ';'
///     | 'package' 'body' Identifier 'is' 'separate' ';'
pub(crate) fn body_stub(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    if p.at(SyntaxKind::PACKAGE_KW) {
        p.bump()?;
        if p.expect(SyntaxKind::BODY_KW)?.is_none() {
            return Ok(None);
        }
        let Some(name) = p.defining_identifier()? else {
            return Ok(None);
        };
        if !separate_tail(p)? {
            return Ok(None);
        }
        let decl = Decl::BodyStub {
            kind: StubKind::Package(name),
        };
        return Ok(Some(p.alloc(start, NodeKind::Decl(decl))));
    }
    if !p.at_any(&[SyntaxKind::PROCEDURE_KW, SyntaxKind::FUNCTION_KW]) {
        return p.mismatch("a body stub");
    }
    let node = p.reserve_node(start);
    let Some(header) = subprograms::subprogram_specification(p, node, false)? else {
        return Ok(None);
    };
    if !separate_tail(p)? {
        return Ok(None);
    }
    p.symbols.pop();
    let decl = Decl::BodyStub {
        kind: StubKind::Subprogram(header.spec),
    };
    p.fill(node, start, NodeKind::Decl(decl))?;
    Ok(Some(node))
}

/// 'is' 'separate' ';'
fn separate_tail(p: &mut Parser<'_>) -> Result<bool, ParseError> {
    Ok(p.expect(SyntaxKind::IS_KW)?.is_some()
        && p.expect_alt(SyntaxKind::SEPARATE_KW)?.is_some()
        && p.expect(SyntaxKind::SEMICOLON)?.is_some())
}

// =============================================================================
// Use clauses and pragmas
// =============================================================================

/// UseClause = 'use' Name { ',' Name } ';'
///
/// Each named package's visible declarations become use-visible in the
/// current region. Naming anything but a package is reported.
pub(crate) fn use_clause(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    if p.expect(SyntaxKind::USE_KW)?.is_none() {
        return Ok(None);
    }
    let mut packages = Vec::new();
    loop {
        let Some(package) = names::name(p)? else {
            return Ok(None);
        };
        packages.push(package);
        if !p.eat(SyntaxKind::COMMA)? {
            break;
        }
    }
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }
    for &package in &packages {
        match names::classify(p, package) {
            (Some(id), SymbolKind::Package | SymbolKind::Unit) => {
                p.symbols.import(id, ImportKind::Use);
            }
            (_, kind) => {
                let text = names::text_of(p, package);
                let message = match kind {
                    SymbolKind::Unresolved => format!("'{text}' is not declared"),
                    kind => format!("'{text}' is a {}, not a package", kind.as_str()),
                };
                let range = p.ast.range(package);
                p.note(ErrorCode::E0501, message, range);
            }
        }
    }
    Ok(Some(p.alloc(start, NodeKind::Decl(Decl::UseClause { packages }))))
}

/// Pragma = 'pragma' Identifier ['(' Association { ',' Association } ')'] ';'
pub(crate) fn pragma(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    if p.expect(SyntaxKind::PRAGMA_KW)?.is_none() {
        return Ok(None);
    }
    let Some(name) = p.defining_identifier()? else {
        return Ok(None);
    };
    let args = if p.at(SyntaxKind::L_PAREN) {
        let Some(args) = expressions::actual_parameter_part(p)? else {
            return Ok(None);
        };
        args
    } else {
        Vec::new()
    };
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }
    Ok(Some(p.alloc(start, NodeKind::Decl(Decl::Pragma { name, args }))))
}
