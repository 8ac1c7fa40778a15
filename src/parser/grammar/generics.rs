//! Generic declarations and instantiations
//!
//! The formal part is its own region. The generic unit's symbol is bound
//! there first, so the unit can refer to itself and its formals; when the
//! formal region closes the formals are published under the generic's
//! symbol and the symbol is bound in the region around the declaration.

use super::{expressions, names, packages, subprograms, types};
use crate::base::NodeId;
use crate::parser::errors::{ErrorCode, ParseContext};
use crate::parser::parser::{Parser, RuleResult};
use crate::parser::rule_parser::Rule;
use crate::parser::syntax_kind::SyntaxKind;
use crate::semantic::{RegionKind, Symbol, SymbolKind, TypeShape};
use crate::syntax::{Decl, FormalDefault, FormalTypeDef, GenericUnitKind, Mode, NodeKind, TypeDef};

/// GenericDeclaration = 'generic' { GenericFormal }
///     (SubprogramSpecification | PackageSpecification) ';'
pub(crate) fn generic_declaration(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    if p.expect(SyntaxKind::GENERIC_KW)?.is_none() {
        return Ok(None);
    }
    let node = p.reserve_node(start);
    p.symbols.push(RegionKind::GenericFormal, None);
    let formals = p.recover_list(
        ParseContext::GenericFormalPart,
        ErrorCode::UNRECOGNIZED_DECLARATIVE_ITEM,
        |p| p.first_of(Rule::GENERIC_FORMALS),
    )?;

    let (unit, symbol) = if p.at(SyntaxKind::PACKAGE_KW) {
        let spec = packages::package_specification(p, Some(node), SymbolKind::GenericPackage)?;
        let Some((unit, symbol)) = spec else {
            return Ok(None);
        };
        (unit, symbol)
    } else {
        let Some(header) = subprograms::subprogram_specification(p, node, true)? else {
            return Ok(None);
        };
        p.symbols.pop();
        (header.spec, header.symbol)
    };
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }

    if let Some(mut closed) = p.symbols.pop() {
        closed.visible.retain(|&id| id != symbol);
        p.symbols.publish(symbol, &closed);
    }
    p.bind(symbol);
    p.fill(node, start, NodeKind::Decl(Decl::GenericDecl { formals, unit }))?;
    Ok(Some(node))
}

/// FormalObject = IdentifierList ':' Mode TypeMark [':=' Expression] ';'
pub(crate) fn formal_object(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let Some(names) = names::identifier_list(p)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::COLON)?.is_none() {
        return Ok(None);
    }
    let mode = subprograms::mode(p)?;
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
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }
    let node = p.alloc(
        start,
        NodeKind::Decl(Decl::FormalObject {
            names: names.clone(),
            mode,
            subtype,
            default,
        }),
    );
    let kind = match mode {
        Mode::In => SymbolKind::Constant,
        _ => SymbolKind::Object,
    };
    types::declare_all(p, &names, kind, node);
    Ok(Some(node))
}

/// FormalType = 'type' Identifier [DiscriminantPart] 'is' FormalTypeDefinition ';'
///
/// FormalTypeDefinition = ['limited'] 'private' | '(' '<>' ')' | 'range' '<>'
///     | 'digits' '<>' | 'delta' '<>' | ArrayTypeDefinition | 'access' SubtypeIndication
pub(crate) fn formal_type(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    if p.expect(SyntaxKind::TYPE_KW)?.is_none() {
        return Ok(None);
    }
    let Some(name) = p.defining_identifier()? else {
        return Ok(None);
    };
    let discriminated = p.at(SyntaxKind::L_PAREN);
    p.symbols.push(RegionKind::TypeDeclaration, None);
    let discriminants = if discriminated {
        let Some(discriminants) = types::discriminant_part(p)? else {
            return Ok(None);
        };
        discriminants
    } else {
        Vec::new()
    };
    if p.expect(SyntaxKind::IS_KW)?.is_none() {
        return Ok(None);
    }
    let Some((definition, shape)) = formal_type_definition(p, discriminated)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }
    p.symbols.pop();
    let node = p.alloc(
        start,
        NodeKind::Decl(Decl::FormalType {
            name: name.clone(),
            discriminants,
            definition,
        }),
    );
    let symbol = Symbol::new(name.name, SymbolKind::Type, name.range)
        .with_node(node)
        .with_shape(shape);
    p.declare(symbol);
    Ok(Some(node))
}

fn formal_type_definition(
    p: &mut Parser<'_>,
    discriminated: bool,
) -> RuleResult<(FormalTypeDef, TypeShape)> {
    let start = p.start();
    let parsed = match p.current_kind() {
        SyntaxKind::LIMITED_KW | SyntaxKind::PRIVATE_KW => {
            let limited = p.eat(SyntaxKind::LIMITED_KW)?;
            if p.expect(SyntaxKind::PRIVATE_KW)?.is_none() {
                return Ok(None);
            }
            (FormalTypeDef::Private { limited }, TypeShape::Private { discriminated })
        }
        SyntaxKind::L_PAREN => {
            p.bump()?;
            if p.expect(SyntaxKind::BOX)?.is_none() || p.expect(SyntaxKind::R_PAREN)?.is_none() {
                return Ok(None);
            }
            (FormalTypeDef::Discrete, TypeShape::Enumeration)
        }
        SyntaxKind::RANGE_KW | SyntaxKind::DIGITS_KW | SyntaxKind::DELTA_KW => {
            let token = p.bump()?;
            if p.expect(SyntaxKind::BOX)?.is_none() {
                return Ok(None);
            }
            match token.kind {
                SyntaxKind::RANGE_KW => (FormalTypeDef::Integer, TypeShape::Integer),
                SyntaxKind::DIGITS_KW => (FormalTypeDef::Float, TypeShape::Real),
                _ => (FormalTypeDef::Fixed, TypeShape::Real),
            }
        }
        SyntaxKind::ARRAY_KW => {
            let Some(array) = p.first_of(&[Rule::UnconstrainedArray, Rule::ConstrainedArray])?
            else {
                return Ok(None);
            };
            (FormalTypeDef::Array(array), types::array_shape(p, array))
        }
        SyntaxKind::ACCESS_KW => {
            p.bump()?;
            let Some(designated) = types::subtype_indication(p)? else {
                return Ok(None);
            };
            let shape = TypeShape::Access {
                designated: Box::new(types::indication_shape(p, designated)),
            };
            let access = p.alloc(start, NodeKind::Type(TypeDef::Access { designated }));
            (FormalTypeDef::Access(access), shape)
        }
        _ => return p.mismatch("a generic formal type definition"),
    };
    Ok(Some(parsed))
}

/// FormalSubprogram = 'with' SubprogramSpecification ['is' (Name | '<>')] ';'
pub(crate) fn formal_subprogram(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    if p.expect(SyntaxKind::WITH_KW)?.is_none() {
        return Ok(None);
    }
    let node = p.reserve_node(start);
    let Some(header) = subprograms::subprogram_specification(p, node, false)? else {
        return Ok(None);
    };
    p.symbols.pop();
    let default = if p.eat(SyntaxKind::IS_KW)? {
        if p.eat(SyntaxKind::BOX)? {
            FormalDefault::Box
        } else {
            let Some(name) = names::name(p)? else {
                return Ok(None);
            };
            FormalDefault::Name(name)
        }
    } else {
        FormalDefault::None
    };
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }
    let decl = Decl::FormalSubprogram {
        spec: header.spec,
        default,
    };
    p.fill(node, start, NodeKind::Decl(decl))?;
    Ok(Some(node))
}

/// GenericInstantiation = ('package' | 'procedure' | 'function') Designator
///     'is' 'new' ExpandedName [ActualParameterPart] ';'
///
/// An instance of a generic package reaches the generic's declarations
/// through expanded names.
pub(crate) fn generic_instantiation(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let (kind, symbol_kind) = match p.current_kind() {
        SyntaxKind::PACKAGE_KW => (GenericUnitKind::Package, SymbolKind::Package),
        SyntaxKind::PROCEDURE_KW => (GenericUnitKind::Procedure, SymbolKind::Procedure),
        SyntaxKind::FUNCTION_KW => (GenericUnitKind::Function, SymbolKind::Function),
        _ => return p.mismatch("a generic instantiation"),
    };
    p.bump()?;
    let name = match kind {
        GenericUnitKind::Function => names::designator(p)?,
        _ => p.defining_identifier()?,
    };
    let Some(name) = name else {
        return Ok(None);
    };
    if p.expect_alt(SyntaxKind::IS_KW)?.is_none() || p.expect_alt(SyntaxKind::NEW_KW)?.is_none() {
        return Ok(None);
    }
    let Some(generic) = names::expanded_name(p)? else {
        return Ok(None);
    };
    let actuals = if p.at(SyntaxKind::L_PAREN) {
        let Some(actuals) = expressions::actual_parameter_part(p)? else {
            return Ok(None);
        };
        actuals
    } else {
        Vec::new()
    };
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }
    let node = p.alloc(
        start,
        NodeKind::Decl(Decl::Instantiation {
            kind,
            name: name.clone(),
            generic,
            actuals,
        }),
    );
    let instance = p.declare(Symbol::new(name.name, symbol_kind, name.range).with_node(node));
    if let (Some(target), SymbolKind::GenericPackage) = names::classify(p, generic) {
        p.symbols.publish_alias(instance, target);
    }
    Ok(Some(node))
}
