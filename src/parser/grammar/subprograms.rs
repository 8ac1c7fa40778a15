//! Subprogram specifications, declarations and bodies
//!
//! A subprogram specification binds the subprogram's name in the enclosing
//! region and then leaves its own region open: the caller decides whether
//! a declaration, body, renaming, stub or generic follows, and pops it.

use super::{declarations, expressions, names, statements};
use crate::base::{NodeId, SymbolId};
use crate::parser::errors::ParseError;
use crate::parser::parser::{Parser, RuleResult};
use crate::parser::syntax_kind::SyntaxKind;
use crate::semantic::{ImportKind, RegionKind, Symbol, SymbolKind};
use crate::syntax::{Decl, DefiningName, Mode, NodeKind, SubprogramKind};

/// What a parsed specification hands back to the construct around it
#[derive(Debug, Clone)]
pub(crate) struct SubprogramHeader {
    pub spec: NodeId,
    pub symbol: SymbolId,
    pub name: DefiningName,
}

/// SubprogramSpecification =
///       'procedure' Identifier [FormalPart]
///     | 'function' Designator [FormalPart] 'return' TypeMark
///
/// `decl` is the node the subprogram's symbol points at. With `generic`
/// set the symbol is a generic procedure or function. The specification
/// that completes a generic subprogram sees the generic's formals.
pub(crate) fn subprogram_specification(
    p: &mut Parser<'_>,
    decl: NodeId,
    generic: bool,
) -> RuleResult<SubprogramHeader> {
    let start = p.start();
    let kind = match p.current_kind() {
        SyntaxKind::PROCEDURE_KW => SubprogramKind::Procedure,
        SyntaxKind::FUNCTION_KW => SubprogramKind::Function,
        _ => return p.mismatch("a subprogram specification"),
    };
    p.bump()?;
    let name = match kind {
        SubprogramKind::Procedure => p.defining_identifier()?,
        SubprogramKind::Function => names::designator(p)?,
    };
    let Some(name) = name else {
        return Ok(None);
    };

    let symbol_kind = match (kind, generic) {
        (SubprogramKind::Procedure, false) => SymbolKind::Procedure,
        (SubprogramKind::Function, false) => SymbolKind::Function,
        (SubprogramKind::Procedure, true) => SymbolKind::GenericProcedure,
        (SubprogramKind::Function, true) => SymbolKind::GenericFunction,
    };
    let earlier = p.resolve(&name.name);
    let completed = earlier
        .symbol
        .filter(|_| earlier.kind.is_generic() && symbol_kind.completes(earlier.kind));
    let symbol = p
        .symbols
        .reserve(Symbol::new(name.name.clone(), symbol_kind, name.range).with_node(decl));
    p.bind(symbol);
    p.symbols.push(RegionKind::Subprogram, Some(symbol));
    if let Some(completed) = completed {
        p.symbols.import(completed, ImportKind::Body);
    }

    let params = if p.at(SyntaxKind::L_PAREN) {
        let Some(params) = formal_part(p)? else {
            return Ok(None);
        };
        params
    } else {
        Vec::new()
    };
    let result = match kind {
        SubprogramKind::Procedure => None,
        SubprogramKind::Function => {
            if p.expect(SyntaxKind::RETURN_KW)?.is_none() {
                return Ok(None);
            }
            let Some((mark, _)) = names::type_mark(p)? else {
                return Ok(None);
            };
            Some(mark)
        }
    };
    let spec = p.alloc(
        start,
        NodeKind::Decl(Decl::SubprogramSpec {
            kind,
            name: name.clone(),
            params,
            result,
        }),
    );
    Ok(Some(SubprogramHeader {
        spec,
        symbol,
        name,
    }))
}

/// FormalPart = '(' ParameterSpecification { ';' ParameterSpecification } ')'
fn formal_part(p: &mut Parser<'_>) -> RuleResult<Vec<NodeId>> {
    p.bump()?;
    let mut params = Vec::new();
    loop {
        let Some(param) = parameter_specification(p)? else {
            return Ok(None);
        };
        params.push(param);
        if !p.eat(SyntaxKind::SEMICOLON)? {
            break;
        }
    }
    if p.expect(SyntaxKind::R_PAREN)?.is_none() {
        return Ok(None);
    }
    Ok(Some(params))
}

/// ParameterSpecification = IdentifierList ':' Mode TypeMark [':=' Expression]
fn parameter_specification(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let Some(names) = names::identifier_list(p)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::COLON)?.is_none() {
        return Ok(None);
    }
    let mode = mode(p)?;
    let Some((subtype, _)) = names::type_mark(p)? else {
        return Ok(None);
    };
    let default = if p.eat(SyntaxKind::COLON_EQ)? {
        let Some(default) = expressions::expression(p)? else {
            return Ok(None);
        };
        Some(default)
    } else {
        None
    };
    let node = p.alloc(
        start,
        NodeKind::Decl(Decl::Parameter {
            names: names.clone(),
            mode,
            subtype,
            default,
        }),
    );
    for name in names {
        p.declare(Symbol::new(name.name, SymbolKind::Parameter, name.range).with_node(node));
    }
    Ok(Some(node))
}

/// Mode = ['in'] | 'in' 'out' | 'out'
pub(crate) fn mode(p: &mut Parser<'_>) -> Result<Mode, ParseError> {
    if p.eat(SyntaxKind::IN_KW)? {
        if p.eat(SyntaxKind::OUT_KW)? {
            return Ok(Mode::InOut);
        }
        return Ok(Mode::In);
    }
    if p.eat(SyntaxKind::OUT_KW)? {
        return Ok(Mode::Out);
    }
    Ok(Mode::In)
}

/// SubprogramDeclaration = SubprogramSpecification ';'
pub(crate) fn subprogram_declaration(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let node = p.reserve_node(start);
    let Some(header) = subprogram_specification(p, node, false)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }
    p.symbols.pop();
    p.fill(node, start, NodeKind::Decl(Decl::SubprogramDecl { spec: header.spec }))?;
    Ok(Some(node))
}

/// SubprogramBody = SubprogramSpecification 'is' DeclarativePart
///     'begin' HandledStatements 'end' [Designator] ';'
pub(crate) fn subprogram_body(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let node = p.reserve_node(start);
    let Some(header) = subprogram_specification(p, node, false)? else {
        return Ok(None);
    };
    if p.expect_alt(SyntaxKind::IS_KW)?.is_none() {
        return Ok(None);
    }
    if p.at(SyntaxKind::SEPARATE_KW) {
        return p.mismatch("a declarative part");
    }
    let decls = declarations::declarative_part(p)?;
    if p.expect(SyntaxKind::BEGIN_KW)?.is_none() {
        return Ok(None);
    }
    let Some(body) = statements::handled_statements(p)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::END_KW)?.is_none() {
        return Ok(None);
    }
    let end_name = p.end_designator(&header.name.name)?;
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }
    p.symbols.pop();
    let decl = Decl::SubprogramBody {
        spec: header.spec,
        decls,
        body,
        end_name,
    };
    p.fill(node, start, NodeKind::Decl(decl))?;
    Ok(Some(node))
}
