//! # adafront-base
//!
//! Core library of a front end for an Ada-like language: lexing, a
//! backtracking parser that tracks scopes while it parses, the AST arena
//! and the symbol table.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! semantic  → Symbol table, scope stack, predefined environment
//!   ↓
//! syntax    → AST arena, node payloads, visitors, printer, tree checks
//!   ↓
//! parser    → Logos lexer, cursor, diagnostics, grammar, driver
//!   ↓
//! base      → Primitives (arena ids, normalized names, line index)
//! ```
//!
//! ## Example
//!
//! ```
//! use adafront::parser::{ParseOptions, parse};
//!
//! let parsed = parse("procedure Main is begin null; end Main;", &ParseOptions::default()).unwrap();
//! assert!(parsed.diagnostics.is_empty());
//! assert_eq!(parsed.library.len(), 1);
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → semantic)
// ============================================================================

/// Foundation types: arena ids, Name normalization, TextRange, LineIndex
pub mod base;

/// Parser: Logos lexer, backtracking recursive descent, driver
pub mod parser;

/// Syntax: AST arena, node payloads, visitors
pub mod syntax;

/// Semantic state consulted while parsing: symbols and scopes
pub mod semantic;

// Re-export commonly needed items
pub use parser::keywords;

// Re-export foundation types
pub use base::{LineIndex, Name, NodeId, Position, SymbolId, TextRange, TextSize};
