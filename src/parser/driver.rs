//! Parser driver
//!
//! The only entry points that hand a final diagnostic log to the caller.
//! A successful parse returns the tree, the symbol table and the library
//! symbols the compilation declared; a failed one returns diagnostics and
//! no tree.

use rayon::prelude::*;
use text_size::TextSize;
use thiserror::Error;
use tracing::debug;

use super::cursor::TokenCursor;
use super::errors::{Diagnostic, ErrorCode, ParseContext, ParseError};
use super::grammar::compilation;
use super::lexer::{Token, tokenize_for_parser};
use super::options::ParseOptions;
use super::parser::Parser;
use super::syntax_kind::SyntaxKind;
use crate::base::{NodeId, SymbolId, is_identifier};
use crate::semantic::SymbolTable;
use crate::syntax::{Ast, NodeKind, Unit};

/// A successful parse
#[derive(Debug)]
pub struct ParsedCompilation {
    pub ast: Ast,
    /// The `Unit::Compilation` node
    pub root: NodeId,
    pub symbols: SymbolTable,
    /// Library-level symbols declared by the compilation, in order
    pub library: Vec<SymbolId>,
    /// Diagnostics of committed interpretations (recoveries and notes)
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedCompilation {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// A parse that produced no tree
#[derive(Debug, Clone, PartialEq, Error)]
#[error("parse failed with {} diagnostic(s)", diagnostics.len())]
pub struct ParseFailure {
    pub diagnostics: Vec<Diagnostic>,
    /// Set when the parse was aborted rather than rejected
    pub fatal: Option<ParseError>,
}

/// Remove `ERROR` tokens from a lexed stream, reporting each one.
pub fn prepare_tokens(tokens: Vec<Token<'_>>) -> (Vec<Token<'_>>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let tokens = tokens
        .into_iter()
        .filter(|token| {
            if token.kind != SyntaxKind::ERROR {
                return true;
            }
            diagnostics.push(lexical_diagnostic(token));
            false
        })
        .collect();
    (tokens, diagnostics)
}

fn lexical_diagnostic(token: &Token<'_>) -> Diagnostic {
    let text = token.text;
    let (code, message) = match text.chars().next() {
        Some('"') => (ErrorCode::E0102, "unterminated string literal".to_string()),
        Some(c) if c.is_ascii_digit() => {
            (ErrorCode::E0104, format!("invalid numeric literal '{text}'"))
        }
        Some(c) if c == '_' || is_identifier(&text.replace('_', "")) => {
            (ErrorCode::E0103, format!("malformed identifier '{text}'"))
        }
        _ => (ErrorCode::E0101, format!("invalid character '{text}'")),
    };
    Diagnostic::new(message, token.range, code)
}

/// Parse a compilation from source text.
pub fn parse(source: &str, options: &ParseOptions) -> Result<ParsedCompilation, ParseFailure> {
    let (tokens, lexical) = prepare_tokens(tokenize_for_parser(source));
    parse_compilation_unit_with(&tokens, lexical, options)
}

/// Parse already lexed tokens, which must end with an `EOF` token.
pub fn parse_compilation_unit(tokens: &[Token<'_>]) -> Result<ParsedCompilation, ParseFailure> {
    parse_compilation_unit_with(tokens, Vec::new(), &ParseOptions::default())
}

/// Parse a token stream. `lexical` holds diagnostics already reported for
/// the stream and leads the final log.
pub fn parse_compilation_unit_with(
    tokens: &[Token<'_>],
    lexical: Vec<Diagnostic>,
    options: &ParseOptions,
) -> Result<ParsedCompilation, ParseFailure> {
    let mut diagnostics = lexical;
    let cursor = match TokenCursor::new(tokens) {
        Ok(cursor) => cursor,
        Err(fatal) => {
            diagnostics.push(fatal.to_diagnostic());
            return Err(ParseFailure {
                diagnostics,
                fatal: Some(fatal),
            });
        }
    };

    let mut parser = Parser::new(cursor, options.clone());
    let depth = parser.symbols().depth();
    let outcome = compilation::compilation_units(&mut parser);
    debug_assert_eq!(parser.symbols().depth(), depth);

    let units = match outcome {
        Ok((units, true)) => units,
        Ok((units, false)) => {
            let code = if units.is_empty() { ErrorCode::E0201 } else { ErrorCode::E0202 };
            let first = parser.position();
            parser.report_unrecognized(ParseContext::Compilation, code, first);
            let (_, _, log) = parser.into_parts();
            diagnostics.extend(log.into_vec());
            debug!(diagnostics = diagnostics.len(), "parse rejected");
            return Err(ParseFailure {
                diagnostics,
                fatal: None,
            });
        }
        Err(fatal) => {
            let (_, _, log) = parser.into_parts();
            diagnostics.extend(log.into_vec());
            diagnostics.push(fatal.to_diagnostic());
            debug!(%fatal, "parse aborted");
            return Err(ParseFailure {
                diagnostics,
                fatal: Some(fatal),
            });
        }
    };

    let library = parser.symbols().library_symbols();
    let root = parser.alloc(
        TextSize::new(0),
        NodeKind::Unit(Unit::Compilation {
            units,
            library: library.clone(),
        }),
    );
    let (ast, symbols, log) = parser.into_parts();
    diagnostics.extend(log.into_vec());
    debug!(nodes = ast.len(), diagnostics = diagnostics.len(), "parse complete");
    Ok(ParsedCompilation {
        ast,
        root,
        symbols,
        library,
        diagnostics,
    })
}

/// Parse independent compilations in parallel. Results keep input order.
pub fn parse_sources(
    sources: &[&str],
    options: &ParseOptions,
) -> Vec<Result<ParsedCompilation, ParseFailure>> {
    sources.par_iter().map(|source| parse(source, options)).collect()
}
