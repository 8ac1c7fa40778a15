//! The predefined environment
//!
//! Populates the library region with the entities of package STANDARD, so
//! that identifier resolution has a single source of truth. Predefined
//! symbols have no declaring node.

use text_size::TextRange;

use crate::base::{Name, SymbolId};

use super::symbol_table::{Symbol, SymbolKind, SymbolTable, TypeShape};

/// Predefined types with their shapes
const TYPES: &[(&str, TypeShape)] = &[
    ("BOOLEAN", TypeShape::Enumeration),
    ("INTEGER", TypeShape::Integer),
    ("LONG_INTEGER", TypeShape::Integer),
    ("FLOAT", TypeShape::Real),
    ("LONG_FLOAT", TypeShape::Real),
    ("CHARACTER", TypeShape::Enumeration),
    ("DURATION", TypeShape::Real),
    ("STRING", TypeShape::Array { constrained: false }),
];

const SUBTYPES: &[(&str, TypeShape)] = &[
    ("NATURAL", TypeShape::Integer),
    ("POSITIVE", TypeShape::Integer),
];

const EXCEPTIONS: &[&str] = &[
    "CONSTRAINT_ERROR",
    "NUMERIC_ERROR",
    "PROGRAM_ERROR",
    "STORAGE_ERROR",
    "TASKING_ERROR",
];

const OPERATORS: &[&str] = &[
    "\"AND\"", "\"OR\"", "\"XOR\"", "\"=\"", "\"/=\"", "\"<\"", "\"<=\"", "\">\"", "\">=\"",
    "\"+\"", "\"-\"", "\"&\"", "\"*\"", "\"/\"", "\"MOD\"", "\"REM\"", "\"**\"", "\"ABS\"",
    "\"NOT\"",
];

fn predefined(name: &str, kind: SymbolKind) -> Symbol {
    Symbol::new(Name::new(name), kind, TextRange::default())
}

/// Declare STANDARD's entities in the innermost region (normally the library
/// region of a fresh table) and return the STANDARD package symbol.
pub fn populate(table: &mut SymbolTable) -> SymbolId {
    for (name, shape) in TYPES {
        table.declare(predefined(name, SymbolKind::Type).with_shape(shape.clone()));
    }
    for (name, shape) in SUBTYPES {
        table.declare(predefined(name, SymbolKind::Subtype).with_shape(shape.clone()));
    }
    for literal in ["FALSE", "TRUE"] {
        table.declare(predefined(literal, SymbolKind::EnumerationLiteral));
    }
    for exception in EXCEPTIONS {
        table.declare(predefined(exception, SymbolKind::Exception));
    }
    for operator in OPERATORS {
        table.declare(predefined(operator, SymbolKind::Function));
    }

    let (standard, _) = table.declare(predefined("STANDARD", SymbolKind::Package));
    table.publish_current(standard);
    standard
}
