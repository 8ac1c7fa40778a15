//! Compilation units
//!
//! Each unit is parsed inside its own context region, which holds the
//! `with`-ed unit names and context `use` clauses. Once the unit commits,
//! its own symbol moves to the library region so that later units of the
//! same compilation can name it.

use super::{declarations, names};
use crate::base::NodeId;
use crate::parser::errors::ParseError;
use crate::parser::parser::{Parser, RuleResult};
use crate::parser::rule_parser::Rule;
use crate::parser::syntax_kind::SyntaxKind;
use crate::semantic::{ImportKind, RegionKind, Symbol, SymbolKind};
use crate::syntax::{NodeKind, Unit};

/// CompilationUnit = { ContextItem } (LibraryUnit | Subunit)
pub(crate) fn compilation_unit(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    p.symbols.push(RegionKind::Context, None);

    let mut context = Vec::new();
    while p.at_any(&[SyntaxKind::WITH_KW, SyntaxKind::USE_KW, SyntaxKind::PRAGMA_KW]) {
        let item = match p.current_kind() {
            SyntaxKind::WITH_KW => with_clause(p)?,
            SyntaxKind::USE_KW => declarations::use_clause(p)?,
            _ => declarations::pragma(p)?,
        };
        let Some(item) = item else {
            return Ok(None);
        };
        context.push(item);
    }

    let subunit = p.at(SyntaxKind::SEPARATE_KW);
    let unit = if subunit {
        subunit_body(p)?
    } else {
        p.first_of(Rule::LIBRARY_UNITS)?
    };
    let Some(unit) = unit else {
        return Ok(None);
    };

    if let Some(closed) = p.symbols.pop() {
        if !subunit {
            let library = p.symbols.current().id;
            for id in closed.symbols() {
                let symbol = p.symbols.symbol(id);
                if symbol.region != library && symbol.kind != SymbolKind::Unit {
                    p.bind(id);
                }
            }
        }
    }
    Ok(Some(p.alloc(start, NodeKind::Unit(Unit::CompilationUnit { context, unit }))))
}

/// WithClause = 'with' Identifier { ',' Identifier } ';'
///
/// A unit already compiled into the library region is made directly
/// visible; any other name becomes a library unit symbol of its own.
fn with_clause(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    p.bump()?;
    let Some(units) = names::identifier_list(p)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }
    let node = p.alloc(
        start,
        NodeKind::Unit(Unit::WithClause {
            units: units.clone(),
        }),
    );
    for unit in units {
        let existing = p
            .symbols
            .scopes()
            .first()
            .and_then(|library| library.get(&unit.name).first().copied());
        match existing {
            Some(id) => {
                p.bind(id);
            }
            None => {
                p.declare(Symbol::new(unit.name, SymbolKind::Unit, unit.range).with_node(node));
            }
        }
    }
    Ok(Some(node))
}

/// Subunit = 'separate' '(' Name ')' ProperBody
fn subunit_body(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    p.bump()?;
    if p.expect(SyntaxKind::L_PAREN)?.is_none() {
        return Ok(None);
    }
    let Some(parent) = names::expanded_name(p)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::R_PAREN)?.is_none() {
        return Ok(None);
    }
    if let (Some(owner), SymbolKind::Package | SymbolKind::GenericPackage) =
        names::classify(p, parent)
    {
        p.symbols.import(owner, ImportKind::Body);
    }
    let Some(body) = p.first_of(&[Rule::SubprogramBody, Rule::PackageBody])? else {
        return Ok(None);
    };
    Ok(Some(p.alloc(start, NodeKind::Unit(Unit::Subunit { parent, body }))))
}

/// Compilation = { CompilationUnit }
///
/// Returns the units parsed so far and whether the input was exhausted.
/// Stops at the first unit that does not match.
pub(crate) fn compilation_units(p: &mut Parser<'_>) -> Result<(Vec<NodeId>, bool), ParseError> {
    let mut units = Vec::new();
    while !p.at_eof() {
        match p.attempt(compilation_unit)? {
            Some(unit) => units.push(unit),
            None => return Ok((units, false)),
        }
    }
    Ok((units, true))
}
