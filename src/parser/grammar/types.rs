//! Type declarations, type definitions, subtype indications and ranges
//!
//! A type declaration opens its own region before its definition is
//! parsed, with an incomplete view of the type bound inside it, so a record
//! or access definition can refer to the type being declared. The final
//! symbol is declared in the enclosing region once the definition commits.

use text_size::TextSize;

use super::{expressions, names};
use crate::base::{Name, NodeId};
use crate::parser::errors::{ErrorCode, ParseContext};
use crate::parser::parser::{Parser, RuleResult};
use crate::parser::rule_parser::Rule;
use crate::parser::syntax_kind::SyntaxKind;
use crate::semantic::{RegionKind, Symbol, SymbolKind, TypeShape};
use crate::syntax::{Decl, DefiningName, NameExpr, NodeKind, TypeDef};

// =============================================================================
// Type declarations
// =============================================================================

/// TypeDeclaration = 'type' Identifier [DiscriminantPart]
///     ( ';' | 'is' ['limited'] 'private' ';' | 'is' TypeDefinition ';' )
pub(crate) fn type_declaration(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    if p.expect(SyntaxKind::TYPE_KW)?.is_none() {
        return Ok(None);
    }
    let Some(name) = p.defining_identifier()? else {
        return Ok(None);
    };
    let node = p.reserve_node(start);
    let discriminated = p.at(SyntaxKind::L_PAREN);

    p.symbols.push(RegionKind::TypeDeclaration, None);
    let self_view = Symbol::new(name.name.clone(), SymbolKind::IncompleteType, name.range)
        .with_node(node)
        .with_shape(TypeShape::Incomplete { discriminated });
    p.declare(self_view);

    let discriminants = if discriminated {
        let Some(discriminants) = discriminant_part(p)? else {
            return Ok(None);
        };
        discriminants
    } else {
        Vec::new()
    };

    let mut literals = Vec::new();
    let (decl, kind, shape) = if p.eat(SyntaxKind::SEMICOLON)? {
        let decl = Decl::IncompleteType {
            name: name.clone(),
            discriminants,
        };
        (decl, SymbolKind::IncompleteType, TypeShape::Incomplete { discriminated })
    } else {
        if p.expect(SyntaxKind::IS_KW)?.is_none() {
            return Ok(None);
        }
        if p.at(SyntaxKind::PRIVATE_KW) || p.at(SyntaxKind::LIMITED_KW) {
            let limited = p.eat(SyntaxKind::LIMITED_KW)?;
            if p.expect(SyntaxKind::PRIVATE_KW)?.is_none()
                || p.expect(SyntaxKind::SEMICOLON)?.is_none()
            {
                return Ok(None);
            }
            let decl = Decl::PrivateType {
                name: name.clone(),
                discriminants,
                limited,
            };
            (decl, SymbolKind::PrivateType, TypeShape::Private { discriminated })
        } else {
            let Some((definition, shape)) = type_definition(p, discriminated)? else {
                return Ok(None);
            };
            if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
                return Ok(None);
            }
            if let Some(TypeDef::Enumeration { literals: defined }) = p.ast.as_type(definition) {
                literals = defined.clone();
            }
            let decl = Decl::Type {
                name: name.clone(),
                discriminants,
                definition,
            };
            (decl, SymbolKind::Type, shape)
        }
    };

    p.symbols.pop();
    p.fill(node, start, NodeKind::Decl(decl))?;
    p.declare(Symbol::new(name.name, kind, name.range).with_node(node).with_shape(shape));
    for literal in literals {
        let symbol = Symbol::new(literal.name, SymbolKind::EnumerationLiteral, literal.range);
        p.declare(symbol.with_node(node));
    }
    Ok(Some(node))
}

/// DiscriminantPart = '(' DiscriminantSpecification { ';' DiscriminantSpecification } ')'
///
/// Parsed in a region of its own; the discriminants are then made visible
/// in the type declaration region.
pub(crate) fn discriminant_part(p: &mut Parser<'_>) -> RuleResult<Vec<NodeId>> {
    if p.expect(SyntaxKind::L_PAREN)?.is_none() {
        return Ok(None);
    }
    p.symbols.push(RegionKind::DiscriminantPart, None);
    let mut specs = Vec::new();
    loop {
        let Some(spec) = discriminant_specification(p)? else {
            return Ok(None);
        };
        specs.push(spec);
        if !p.eat(SyntaxKind::SEMICOLON)? {
            break;
        }
    }
    if p.expect(SyntaxKind::R_PAREN)?.is_none() {
        return Ok(None);
    }
    if let Some(closed) = p.symbols.pop() {
        for id in closed.symbols() {
            p.bind(id);
        }
    }
    Ok(Some(specs))
}

/// DiscriminantSpecification = IdentifierList ':' TypeMark [':=' Expression]
fn discriminant_specification(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let Some(names) = names::identifier_list(p)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::COLON)?.is_none() {
        return Ok(None);
    }
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
        NodeKind::Decl(Decl::Discriminant {
            names: names.clone(),
            subtype,
            default,
        }),
    );
    declare_all(p, &names, SymbolKind::Discriminant, node);
    Ok(Some(node))
}

/// Declare each of `names` with `kind`, pointing at `node`
pub(crate) fn declare_all(
    p: &mut Parser<'_>,
    names: &[DefiningName],
    kind: SymbolKind,
    node: NodeId,
) {
    for name in names {
        p.declare(Symbol::new(name.name.clone(), kind, name.range).with_node(node));
    }
}

// =============================================================================
// Type definitions
// =============================================================================

/// TypeDefinition = EnumerationTypeDefinition | IntegerTypeDefinition
///     | RealTypeDefinition | ArrayTypeDefinition | RecordTypeDefinition
///     | AccessTypeDefinition | DerivedTypeDefinition
fn type_definition(p: &mut Parser<'_>, discriminated: bool) -> RuleResult<(NodeId, TypeShape)> {
    let start = p.start();
    let (def, shape) = match p.current_kind() {
        SyntaxKind::L_PAREN => {
            let Some(literals) = enumeration_literals(p)? else {
                return Ok(None);
            };
            (TypeDef::Enumeration { literals }, TypeShape::Enumeration)
        }
        SyntaxKind::RANGE_KW => {
            p.bump()?;
            let Some(range) = range(p)? else {
                return Ok(None);
            };
            (TypeDef::Integer { range }, TypeShape::Integer)
        }
        SyntaxKind::DIGITS_KW => {
            let Some((digits, range)) = accuracy(p)? else {
                return Ok(None);
            };
            (TypeDef::Float { digits, range }, TypeShape::Real)
        }
        SyntaxKind::DELTA_KW => {
            let Some((delta, range)) = accuracy(p)? else {
                return Ok(None);
            };
            (TypeDef::Fixed { delta, range }, TypeShape::Real)
        }
        SyntaxKind::ARRAY_KW => {
            let Some(node) = p.first_of(&[Rule::UnconstrainedArray, Rule::ConstrainedArray])? else {
                return Ok(None);
            };
            let shape = array_shape(p, node);
            return Ok(Some((node, shape)));
        }
        SyntaxKind::RECORD_KW | SyntaxKind::NULL_KW => {
            let Some(node) = record_definition(p)? else {
                return Ok(None);
            };
            return Ok(Some((node, TypeShape::Record { discriminated })));
        }
        SyntaxKind::ACCESS_KW => {
            p.bump()?;
            let Some(designated) = subtype_indication(p)? else {
                return Ok(None);
            };
            let shape = TypeShape::Access {
                designated: Box::new(indication_shape(p, designated)),
            };
            (TypeDef::Access { designated }, shape)
        }
        SyntaxKind::NEW_KW => {
            p.bump()?;
            let Some(parent) = subtype_indication(p)? else {
                return Ok(None);
            };
            (TypeDef::Derived { parent }, indication_shape(p, parent))
        }
        _ => return p.mismatch("a type definition"),
    };
    Ok(Some((p.alloc(start, NodeKind::Type(def)), shape)))
}

/// '(' EnumerationLiteral { ',' EnumerationLiteral } ')'
fn enumeration_literals(p: &mut Parser<'_>) -> RuleResult<Vec<DefiningName>> {
    p.bump()?;
    let mut literals = Vec::new();
    loop {
        let literal = match p.current_kind() {
            SyntaxKind::IDENT => {
                let token = p.bump()?;
                DefiningName::new(Name::new(token.text), token.range)
            }
            SyntaxKind::CHAR_LITERAL => {
                let token = p.bump()?;
                DefiningName::new(Name::verbatim(token.text), token.range)
            }
            _ => return p.mismatch("an enumeration literal"),
        };
        literals.push(literal);
        if !p.eat(SyntaxKind::COMMA)? {
            break;
        }
    }
    if p.expect(SyntaxKind::R_PAREN)?.is_none() {
        return Ok(None);
    }
    Ok(Some(literals))
}

/// ('digits' | 'delta') SimpleExpression ['range' Range]
fn accuracy(p: &mut Parser<'_>) -> RuleResult<(NodeId, Option<NodeId>)> {
    p.bump()?;
    let Some(value) = expressions::simple_expression(p)? else {
        return Ok(None);
    };
    if !p.eat(SyntaxKind::RANGE_KW)? {
        return Ok(Some((value, None)));
    }
    let Some(range) = range(p)? else {
        return Ok(None);
    };
    Ok(Some((value, Some(range))))
}

pub(crate) fn array_shape(p: &Parser<'_>, node: NodeId) -> TypeShape {
    let constrained = matches!(p.ast.as_type(node), Some(TypeDef::ConstrainedArray { .. }));
    TypeShape::Array { constrained }
}

/// UnconstrainedArrayDefinition = 'array' '(' IndexSubtypeDefinition { ',' IndexSubtypeDefinition } ')' 'of' SubtypeIndication
pub(crate) fn unconstrained_array(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    if p.expect(SyntaxKind::ARRAY_KW)?.is_none() || p.expect(SyntaxKind::L_PAREN)?.is_none() {
        return Ok(None);
    }
    let mut indexes = Vec::new();
    loop {
        let Some(index) = index_subtype_definition(p)? else {
            return Ok(None);
        };
        indexes.push(index);
        if !p.eat(SyntaxKind::COMMA)? {
            break;
        }
    }
    let Some(component) = array_tail(p)? else {
        return Ok(None);
    };
    let node = TypeDef::UnconstrainedArray { indexes, component };
    Ok(Some(p.alloc(start, NodeKind::Type(node))))
}

/// IndexSubtypeDefinition = TypeMark 'range' '<>'
fn index_subtype_definition(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let Some((mark, _)) = names::type_mark(p)? else {
        return Ok(None);
    };
    if p.expect_alt(SyntaxKind::RANGE_KW)?.is_none() || p.expect_alt(SyntaxKind::BOX)?.is_none() {
        return Ok(None);
    }
    Ok(Some(p.alloc(start, NodeKind::Type(TypeDef::IndexSubtype { mark }))))
}

/// ConstrainedArrayDefinition = 'array' IndexConstraint 'of' SubtypeIndication
pub(crate) fn constrained_array(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    if p.expect(SyntaxKind::ARRAY_KW)?.is_none() || p.expect(SyntaxKind::L_PAREN)?.is_none() {
        return Ok(None);
    }
    let mut indexes = Vec::new();
    loop {
        let Some(index) = discrete_range(p, true)? else {
            return Ok(None);
        };
        indexes.push(index);
        if !p.eat(SyntaxKind::COMMA)? {
            break;
        }
    }
    let Some(component) = array_tail(p)? else {
        return Ok(None);
    };
    let node = TypeDef::ConstrainedArray { indexes, component };
    Ok(Some(p.alloc(start, NodeKind::Type(node))))
}

/// ')' 'of' SubtypeIndication
fn array_tail(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    if p.expect(SyntaxKind::R_PAREN)?.is_none() || p.expect(SyntaxKind::OF_KW)?.is_none() {
        return Ok(None);
    }
    subtype_indication(p)
}

// =============================================================================
// Records
// =============================================================================

/// RecordTypeDefinition = 'record' ComponentList 'end' 'record' | 'null' 'record'
fn record_definition(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    if p.eat(SyntaxKind::NULL_KW)? {
        if p.expect(SyntaxKind::RECORD_KW)?.is_none() {
            return Ok(None);
        }
        let node = TypeDef::Record {
            components: Vec::new(),
            variant: None,
        };
        return Ok(Some(p.alloc(start, NodeKind::Type(node))));
    }
    if p.expect(SyntaxKind::RECORD_KW)?.is_none() {
        return Ok(None);
    }
    p.symbols.push(RegionKind::Record, None);
    let Some((components, variant)) = component_list(p)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::END_KW)?.is_none() || p.expect(SyntaxKind::RECORD_KW)?.is_none() {
        return Ok(None);
    }
    p.symbols.pop();
    let node = TypeDef::Record { components, variant };
    Ok(Some(p.alloc(start, NodeKind::Type(node))))
}

/// ComponentList = { ComponentDeclaration } [VariantPart] | 'null' ';'
fn component_list(p: &mut Parser<'_>) -> RuleResult<(Vec<NodeId>, Option<NodeId>)> {
    if p.at(SyntaxKind::NULL_KW) && p.nth(1) == SyntaxKind::SEMICOLON {
        p.bump()?;
        p.bump()?;
        return Ok(Some((Vec::new(), None)));
    }
    let components = p.recover_list(
        ParseContext::ComponentList,
        ErrorCode::UNRECOGNIZED_COMPONENT,
        |p| p.first_of(&[Rule::ComponentDeclaration, Rule::Pragma]),
    )?;
    if !p.at(SyntaxKind::CASE_KW) {
        return Ok(Some((components, None)));
    }
    let Some(variant) = variant_part(p)? else {
        return Ok(None);
    };
    Ok(Some((components, Some(variant))))
}

/// ComponentDeclaration = IdentifierList ':' SubtypeIndication [':=' Expression] ';'
pub(crate) fn component_declaration(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let Some(names) = names::identifier_list(p)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::COLON)?.is_none() {
        return Ok(None);
    }
    let Some(subtype) = subtype_indication(p)? else {
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
        NodeKind::Decl(Decl::Component {
            names: names.clone(),
            subtype,
            default,
        }),
    );
    declare_all(p, &names, SymbolKind::Component, node);
    Ok(Some(node))
}

/// VariantPart = 'case' DirectName 'is' Variant { Variant } 'end' 'case' ';'
fn variant_part(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    p.bump()?;
    let Some(discriminant) = names::name(p)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::IS_KW)?.is_none() {
        return Ok(None);
    }
    let mut variants = Vec::new();
    while p.at(SyntaxKind::WHEN_KW) {
        let Some(variant) = variant(p)? else {
            return Ok(None);
        };
        variants.push(variant);
    }
    if p.expect(SyntaxKind::END_KW)?.is_none()
        || p.expect(SyntaxKind::CASE_KW)?.is_none()
        || p.expect(SyntaxKind::SEMICOLON)?.is_none()
    {
        return Ok(None);
    }
    let node = TypeDef::VariantPart {
        discriminant,
        variants,
    };
    Ok(Some(p.alloc(start, NodeKind::Type(node))))
}

/// Variant = 'when' Choice { '|' Choice } '=>' ComponentList
fn variant(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    p.bump()?;
    let Some(choices) = expressions::choice_list(p)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::FAT_ARROW)?.is_none() {
        return Ok(None);
    }
    let Some((components, variant)) = component_list(p)? else {
        return Ok(None);
    };
    let node = TypeDef::Variant {
        choices,
        components,
        variant,
    };
    Ok(Some(p.alloc(start, NodeKind::Type(node))))
}

// =============================================================================
// Subtype indications and constraints
// =============================================================================

/// SubtypeIndication = TypeMark [Constraint]
///
/// What follows the type mark is read according to the shape of the type
/// it denotes: an index constraint for arrays, a discriminant constraint
/// for discriminated types, both in that order when the shape is unknown.
pub(crate) fn subtype_indication(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    if !p.at(SyntaxKind::IDENT) {
        return p.mismatch("a subtype indication");
    }
    let Some((mark, resolution)) = names::type_mark(p)? else {
        return Ok(None);
    };
    let shape = match resolution.symbol {
        Some(id) => p.symbols.symbol(id).type_shape(),
        None => TypeShape::Unknown,
    };
    let constraint = constraint(p, shape)?;
    let node = TypeDef::SubtypeIndication { mark, constraint };
    Ok(Some(p.alloc(start, NodeKind::Type(node))))
}

fn constraint(p: &mut Parser<'_>, shape: TypeShape) -> RuleResult<NodeId> {
    let shape = match shape {
        TypeShape::Access { designated } => *designated,
        shape => shape,
    };
    match p.current_kind() {
        SyntaxKind::RANGE_KW => p.attempt(range_constraint),
        SyntaxKind::DIGITS_KW | SyntaxKind::DELTA_KW => p.attempt(accuracy_constraint),
        SyntaxKind::L_PAREN if shape.is_array() => p.attempt(index_constraint),
        SyntaxKind::L_PAREN if shape.has_discriminants() => p.attempt(discriminant_constraint),
        SyntaxKind::L_PAREN if shape == TypeShape::Unknown => {
            p.first_of(&[Rule::IndexConstraint, Rule::DiscriminantConstraint])
        }
        _ => Ok(None),
    }
}

/// RangeConstraint = 'range' Range
fn range_constraint(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    p.bump()?;
    let Some(range) = range(p)? else {
        return Ok(None);
    };
    Ok(Some(p.alloc(start, NodeKind::Type(TypeDef::RangeConstraint { range }))))
}

/// FloatingConstraint = 'digits' SimpleExpression ['range' Range]
/// FixedConstraint = 'delta' SimpleExpression ['range' Range]
fn accuracy_constraint(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let digits = p.at(SyntaxKind::DIGITS_KW);
    let Some((value, range)) = accuracy(p)? else {
        return Ok(None);
    };
    let node = if digits {
        TypeDef::FloatingConstraint { digits: value, range }
    } else {
        TypeDef::FixedConstraint { delta: value, range }
    };
    Ok(Some(p.alloc(start, NodeKind::Type(node))))
}

/// IndexConstraint = '(' DiscreteRange { ',' DiscreteRange } ')'
pub(crate) fn index_constraint(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    if p.expect(SyntaxKind::L_PAREN)?.is_none() {
        return Ok(None);
    }
    let mut ranges = Vec::new();
    loop {
        let Some(range) = discrete_range(p, true)? else {
            return Ok(None);
        };
        ranges.push(range);
        if !p.eat(SyntaxKind::COMMA)? {
            break;
        }
    }
    if p.expect(SyntaxKind::R_PAREN)?.is_none() {
        return Ok(None);
    }
    Ok(Some(p.alloc(start, NodeKind::Type(TypeDef::IndexConstraint { ranges }))))
}

/// DiscriminantConstraint = '(' DiscriminantAssociation { ',' DiscriminantAssociation } ')'
pub(crate) fn discriminant_constraint(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let Some(associations) = expressions::actual_parameter_part(p)? else {
        return Ok(None);
    };
    let node = TypeDef::DiscriminantConstraint { associations };
    Ok(Some(p.alloc(start, NodeKind::Type(node))))
}

/// Shape of the type a subtype indication denotes
pub(crate) fn indication_shape(p: &Parser<'_>, node: NodeId) -> TypeShape {
    let Some(TypeDef::SubtypeIndication { mark, constraint }) = p.ast.as_type(node) else {
        return TypeShape::Unknown;
    };
    let shape = match names::classify(p, *mark).0 {
        Some(id) => p.symbols.symbol(id).type_shape(),
        None => TypeShape::Unknown,
    };
    match shape {
        TypeShape::Array { .. } if constraint.is_some() => TypeShape::Array { constrained: true },
        shape => shape,
    }
}

// =============================================================================
// Ranges
// =============================================================================

/// Range = SimpleExpression '..' SimpleExpression | Name ''' 'range' ['(' Expression ')']
pub(crate) fn range(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let Some(low) = expressions::simple_expression(p)? else {
        return Ok(None);
    };
    range_tail(p, start, low)
}

/// Finish a range whose leading simple expression is already parsed
pub(crate) fn range_tail(p: &mut Parser<'_>, start: TextSize, low: NodeId) -> RuleResult<NodeId> {
    if !p.at(SyntaxKind::DOT_DOT) && is_range_attribute(p, low) {
        return Ok(Some(low));
    }
    if p.expect_alt(SyntaxKind::DOT_DOT)?.is_none() {
        return Ok(None);
    }
    let Some(high) = expressions::simple_expression(p)? else {
        return Ok(None);
    };
    Ok(Some(p.alloc(start, NodeKind::Type(TypeDef::Range { low, high }))))
}

fn is_range_attribute(p: &Parser<'_>, node: NodeId) -> bool {
    matches!(
        p.ast.as_name(node),
        Some(NameExpr::Attribute { attribute, .. }) if *attribute == "RANGE"
    )
}

/// DiscreteRange = SubtypeIndication | Range
///
/// A name that denotes a type is read as a subtype indication; anything
/// else as a range. A name that does not resolve falls back to a subtype
/// indication only when `allow_unresolved` is set.
pub(crate) fn discrete_range(p: &mut Parser<'_>, allow_unresolved: bool) -> RuleResult<NodeId> {
    let class = names::lookahead_class(p);
    if class.is_type_mark() {
        if let Some(indication) = p.attempt(discrete_subtype_indication)? {
            return Ok(Some(indication));
        }
    }
    if let Some(range) = p.attempt(range)? {
        return Ok(Some(range));
    }
    if allow_unresolved && class == SymbolKind::Unresolved && p.at(SyntaxKind::IDENT) {
        return discrete_subtype_indication(p);
    }
    p.mismatch("a discrete range")
}

/// TypeMark ['range' Range], not followed by anything that would make it
/// the start of a range
pub(crate) fn discrete_subtype_indication(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let Some((mark, _)) = names::type_mark(p)? else {
        return Ok(None);
    };
    let constraint = if p.at(SyntaxKind::RANGE_KW) {
        p.attempt(range_constraint)?
    } else {
        None
    };
    if p.at_any(&[SyntaxKind::TICK, SyntaxKind::DOT_DOT, SyntaxKind::L_PAREN]) {
        return p.mismatch("a discrete range");
    }
    let node = TypeDef::SubtypeIndication { mark, constraint };
    Ok(Some(p.alloc(start, NodeKind::Type(node))))
}
