//! Scope stack and symbol arena
//!
//! Regions are pushed and popped as the parser enters and leaves constructs
//! with their own declarative part. Every mutation is journaled so that a
//! failed speculative attempt can be undone exactly.

mod lookup;
mod scope;
mod symbol;
mod table;

pub use lookup::Resolution;
pub use scope::{Bindings, ClosedRegion, Import, ImportKind, RegionContents, RegionKind, Scope};
pub use symbol::{Symbol, SymbolKind, TypeShape};
pub use table::{Declared, ScopeMark, SymbolTable};

#[cfg(test)]
mod tests;
