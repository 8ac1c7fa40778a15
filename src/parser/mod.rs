//! Backtracking parser for an Ada-like language
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind, trivia removed, EOF appended
//!     ↓
//! TokenCursor → repositionable read offset (mark/rewind)
//!     ↓
//! Parser → grammar rules, each an attempt over cursor, log, scopes, arena
//!     ↓
//! Driver → Ast + SymbolTable + final diagnostics
//! ```
//!
//! Grammar rules classify names through the live scope stack while they
//! parse. A rule that mismatches is undone completely by
//! [`Parser::attempt`], including any diagnostics, symbols and nodes it
//! produced.

#[allow(clippy::module_inception)]
mod parser;

mod cursor;
mod driver;
pub mod errors;
mod grammar;
pub mod keywords;
mod lexer;
mod options;
mod rule_parser;
mod syntax_kind;

pub use cursor::{CursorPos, TokenCursor};
pub use driver::{
    ParseFailure, ParsedCompilation, parse, parse_compilation_unit, parse_compilation_unit_with,
    parse_sources, prepare_tokens,
};
pub use errors::{Diagnostic, DiagnosticLog, ErrorCode, ParseContext, ParseError, Severity};
pub use lexer::{Lexer, Token, tokenize, tokenize_for_parser};
pub use options::ParseOptions;
pub use parser::{Checkpoint, Mismatch, Parser, RuleResult};
pub use rule_parser::{Rule, RuleParseResult, parse_rule, parse_rule_with};
pub use syntax_kind::SyntaxKind;
