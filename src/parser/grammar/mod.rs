//! Grammar rules
//!
//! One module per chapter of the language:
//! - `names` and `expressions` - names, classification at use, operators
//! - `types` - type declarations, definitions, constraints and ranges
//! - `declarations` - declarative parts and basic declarations
//! - `subprograms`, `packages`, `generics` - program units
//! - `statements` - statement sequences and exception handlers
//! - `compilation` - context clauses, library units and subunits
//!
//! Every rule is a free function over [`Parser`](super::parser::Parser).
//! Rules that compete as alternatives are also reachable through
//! [`Rule`](super::rule_parser::Rule), so that `first_of` can try them by
//! name.

pub(crate) mod compilation;
pub(crate) mod declarations;
pub(crate) mod expressions;
pub(crate) mod generics;
pub(crate) mod names;
pub(crate) mod packages;
pub(crate) mod statements;
pub(crate) mod subprograms;
pub(crate) mod types;
