//! # Semantic state for parsing
//!
//! The scope stack and symbol arena the parser consults to classify names,
//! plus the predefined environment that seeds the library region.
//!
//! This is not a type checker: symbols carry just enough (kind and type
//! shape) to choose between grammar productions.

pub mod predefined;
pub mod symbol_table;

pub use predefined::populate;
pub use symbol_table::{
    ClosedRegion, Declared, Import, ImportKind, RegionContents, RegionKind, Resolution, Scope,
    ScopeMark, Symbol, SymbolKind, SymbolTable, TypeShape,
};
