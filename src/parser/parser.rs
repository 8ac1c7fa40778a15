//! Backtracking recursive descent parser
//!
//! Every grammar rule is a function `fn(&mut Parser) -> RuleResult<T>`:
//! `Ok(Some(_))` is a match, `Ok(None)` an ordinary mismatch and `Err` a
//! fatal outcome that aborts the parse. Speculative rules run inside
//! [`Parser::attempt`], which restores the cursor, the diagnostic log, the
//! scope stack and the node arena whenever the rule does not match.
//!
//! Rules never report syntax errors themselves. Only recovery points
//! ([`Parser::recover_list`]) turn a mismatch into a diagnostic.

use text_size::{TextRange, TextSize};
use tracing::trace;

use super::cursor::{CursorPos, TokenCursor};
use super::errors::{
    Diagnostic, DiagnosticLog, ErrorCode, LogMarker, ParseContext, ParseError, RelatedInfo,
    Severity, format_context_error,
};
use super::lexer::Token;
use super::options::ParseOptions;
use super::rule_parser::Rule;
use super::syntax_kind::SyntaxKind;
use crate::base::{Name, NodeId, SymbolId};
use crate::semantic::{Declared, Resolution, ScopeMark, Symbol, SymbolTable, populate};
use crate::syntax::{Ast, DefiningName, NodeKind};

/// Result of a grammar rule
pub type RuleResult<T> = Result<Option<T>, ParseError>;

/// State restored by a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pos: CursorPos,
    log: LogMarker,
    scopes: ScopeMark,
    nodes: usize,
}

/// Furthest position an alternative reached before it mismatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub pos: CursorPos,
    pub expected: &'static str,
}

/// The parser state
pub struct Parser<'a> {
    cursor: TokenCursor<'a>,
    pub(crate) log: DiagnosticLog,
    pub(crate) symbols: SymbolTable,
    pub(crate) ast: Ast,
    options: ParseOptions,
    depth: usize,
    furthest: Option<Mismatch>,
    contexts: Vec<ParseContext>,
}

impl<'a> Parser<'a> {
    pub fn new(cursor: TokenCursor<'a>, options: ParseOptions) -> Self {
        let mut symbols = SymbolTable::new();
        if options.predefined {
            populate(&mut symbols);
        }
        Self {
            cursor,
            log: DiagnosticLog::new(),
            symbols,
            ast: Ast::new(),
            options,
            depth: 0,
            furthest: None,
            contexts: Vec::new(),
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn log(&self) -> &DiagnosticLog {
        &self.log
    }

    pub fn into_parts(self) -> (Ast, SymbolTable, DiagnosticLog) {
        (self.ast, self.symbols, self.log)
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    pub fn current(&self) -> Token<'a> {
        *self.cursor.current()
    }

    pub fn current_kind(&self) -> SyntaxKind {
        self.cursor.current().kind
    }

    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.cursor.nth(n).kind
    }

    pub fn nth_token(&self, n: usize) -> Token<'a> {
        *self.cursor.nth(n)
    }

    /// Is one of `targets` ahead, at parenthesis level zero, before the
    /// enclosing group or list element ends?
    pub fn ahead_in_group(&self, offset: usize, targets: &[SyntaxKind]) -> bool {
        let mut level = 0usize;
        let mut n = offset;
        loop {
            match self.nth(n) {
                SyntaxKind::EOF | SyntaxKind::SEMICOLON => return false,
                SyntaxKind::L_PAREN => level += 1,
                SyntaxKind::R_PAREN | SyntaxKind::COMMA if level == 0 => return false,
                SyntaxKind::R_PAREN => level -= 1,
                kind if level == 0 && targets.contains(&kind) => return true,
                _ => {}
            }
            n += 1;
        }
    }

    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    pub fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    pub fn at_eof(&self) -> bool {
        self.cursor.at_eof()
    }

    pub fn position(&self) -> CursorPos {
        self.cursor.mark()
    }

    /// Start offset of the current token
    pub fn start(&self) -> TextSize {
        self.cursor.current().offset()
    }

    /// Range from `start` to the end of the last consumed token
    pub fn range_from(&self, start: TextSize) -> TextRange {
        TextRange::new(start, self.cursor.prev_end().max(start))
    }

    pub fn token_at(&self, pos: CursorPos) -> Token<'a> {
        *self.cursor.token_at(pos)
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    /// Consume the current token. Fails at the end marker.
    pub fn bump(&mut self) -> Result<Token<'a>, ParseError> {
        self.cursor.advance()
    }

    /// Consume the current token if it is `kind`
    pub fn eat(&mut self, kind: SyntaxKind) -> Result<bool, ParseError> {
        if !self.at(kind) {
            return Ok(false);
        }
        self.bump()?;
        Ok(true)
    }

    /// Consume a mandatory token. At the end marker this is fatal.
    pub fn expect(&mut self, kind: SyntaxKind) -> RuleResult<Token<'a>> {
        if self.at(kind) {
            return self.bump().map(Some);
        }
        if self.at_eof() {
            return Err(ParseError::EndOfStream { at: self.start() });
        }
        self.mismatch(kind.display_name())
    }

    /// Like [`Parser::expect`], but a missing token is a plain mismatch even
    /// at the end marker. Used for tokens that tell alternatives apart.
    pub fn expect_alt(&mut self, kind: SyntaxKind) -> RuleResult<Token<'a>> {
        if self.at(kind) {
            return self.bump().map(Some);
        }
        self.mismatch(kind.display_name())
    }

    /// Record a mismatch at the current token
    pub fn mismatch<T>(&mut self, expected: &'static str) -> RuleResult<T> {
        let pos = self.position();
        if self.furthest.is_none_or(|m| pos > m.pos) {
            self.furthest = Some(Mismatch { pos, expected });
        }
        Ok(None)
    }

    /// Consume an identifier as a defining occurrence
    pub fn defining_identifier(&mut self) -> RuleResult<DefiningName> {
        let Some(token) = self.expect(SyntaxKind::IDENT)? else {
            return Ok(None);
        };
        Ok(Some(DefiningName::new(Name::new(token.text), token.range)))
    }

    /// Optional designator after `end`. A mismatch with the construct's
    /// own name is reported and parsing goes on.
    pub fn end_designator(&mut self, expected: &Name) -> Result<Option<Name>, ParseError> {
        if !self.at_any(&[SyntaxKind::IDENT, SyntaxKind::STRING_LITERAL]) {
            return Ok(None);
        }
        let token = self.bump()?;
        let name = Name::new(token.text);
        if name != *expected {
            self.report(Diagnostic::new(
                format!("'end {}' does not match '{}'", name, expected),
                token.range,
                ErrorCode::E0203,
            ));
        }
        Ok(Some(name))
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.cursor.mark(),
            log: self.log.snapshot(),
            scopes: self.symbols.mark(),
            nodes: self.ast.len(),
        }
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) -> Result<(), ParseError> {
        self.cursor.rewind(checkpoint.pos)?;
        self.log.rollback(checkpoint.log)?;
        self.symbols.rollback(checkpoint.scopes);
        self.ast.truncate(checkpoint.nodes);
        Ok(())
    }

    /// Run `rule` speculatively. Anything but a match leaves the parser as
    /// it was before the call.
    pub fn attempt<T>(&mut self, rule: impl FnOnce(&mut Self) -> RuleResult<T>) -> RuleResult<T> {
        let checkpoint = self.checkpoint();
        match self.nested(rule) {
            Ok(Some(value)) => {
                self.log.commit(checkpoint.log);
                Ok(Some(value))
            }
            Ok(None) => {
                trace!(at = checkpoint.pos.index(), "backtrack");
                self.restore(checkpoint)?;
                Ok(None)
            }
            Err(error) => {
                self.restore(checkpoint)?;
                Err(error)
            }
        }
    }

    /// Attempt `rules` in priority order; the first match wins.
    pub fn first_of(&mut self, rules: &[Rule]) -> RuleResult<NodeId> {
        for &rule in rules {
            trace!(?rule, at = self.position().index(), "try");
            if let Some(node) = self.attempt(|p| rule.parse(p))? {
                return Ok(Some(node));
            }
        }
        Ok(None)
    }

    /// Count one level of nesting around `rule`
    pub fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> RuleResult<T>) -> RuleResult<T> {
        if self.depth >= self.options.max_depth {
            return Err(ParseError::DepthExceeded {
                limit: self.options.max_depth,
                at: self.start(),
            });
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// The mismatch recorded furthest into the input so far
    pub fn furthest(&self) -> Option<Mismatch> {
        self.furthest
    }

    // =========================================================================
    // Error recovery
    // =========================================================================

    pub fn context(&self) -> ParseContext {
        self.contexts.last().copied().unwrap_or_default()
    }

    /// Parse `item` repeatedly until a token that closes `context`.
    ///
    /// An item that does not match is reported once with `code` and skipped
    /// up to the next `;` (or to the closing token), then parsing goes on.
    pub fn recover_list(
        &mut self,
        context: ParseContext,
        code: ErrorCode,
        mut item: impl FnMut(&mut Self) -> RuleResult<NodeId>,
    ) -> Result<Vec<NodeId>, ParseError> {
        let closers = context.recovery_tokens();
        let mut items = Vec::new();
        self.contexts.push(context);
        let result = loop {
            if self.at_eof() || self.at_any(closers) {
                break Ok(());
            }
            let first = self.position();
            let outer = self.furthest.take();
            let parsed = match self.attempt(&mut item) {
                Ok(parsed) => parsed,
                Err(error) => break Err(error),
            };
            match parsed {
                Some(node) => items.push(node),
                None => {
                    self.report_unrecognized(context, code, first);
                    if let Err(error) = self.resynchronize(closers) {
                        break Err(error);
                    }
                }
            }
            self.furthest = match (outer, self.furthest) {
                (Some(a), Some(b)) if a.pos >= b.pos => Some(a),
                (a, b) => b.or(a),
            };
        };
        self.contexts.pop();
        result.map(|()| items)
    }

    /// Report an item that no alternative matched, at the furthest point
    /// any alternative reached.
    pub fn report_unrecognized(
        &mut self,
        context: ParseContext,
        code: ErrorCode,
        first: CursorPos,
    ) {
        let (at, expected) = match self.furthest {
            Some(m) if m.pos >= first => (m.pos, m.expected),
            _ => (first, context.expected_description()),
        };
        let found = self.token_at(at);
        let start = self.token_at(first);
        let message = format_context_error(&describe(&found), expected, context);
        let related = RelatedInfo::new(
            format!("while parsing {} starting here", context.expected_description()),
            start.range,
        );
        self.report(Diagnostic::new(message, found.range, code).with_related(related));
    }

    /// Skip at least one token, then up to and including the next `;`,
    /// stopping early in front of any of `stop`.
    fn resynchronize(&mut self, stop: &[SyntaxKind]) -> Result<(), ParseError> {
        if self.at_eof() {
            return Ok(());
        }
        if self.bump()?.kind == SyntaxKind::SEMICOLON {
            return Ok(());
        }
        while !self.at_eof() && !self.at_any(stop) {
            if self.bump()?.kind == SyntaxKind::SEMICOLON {
                break;
            }
        }
        Ok(())
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.log.report(diagnostic);
    }

    // =========================================================================
    // Nodes
    // =========================================================================

    pub fn alloc(&mut self, start: TextSize, kind: NodeKind) -> NodeId {
        let range = self.range_from(start);
        self.ast.alloc(range, kind)
    }

    pub fn reserve_node(&mut self, start: TextSize) -> NodeId {
        self.ast.reserve(TextRange::empty(start))
    }

    pub fn fill(
        &mut self,
        node: NodeId,
        start: TextSize,
        kind: NodeKind,
    ) -> Result<(), ParseError> {
        let range = self.range_from(start);
        self.ast.fill(node, range, kind)
    }

    // =========================================================================
    // Symbols
    // =========================================================================

    pub fn resolve(&self, name: &Name) -> Resolution {
        self.symbols.resolve(name)
    }

    /// Reserve and bind `symbol` in the innermost region
    pub fn declare(&mut self, symbol: Symbol) -> SymbolId {
        let (id, declared) = self.symbols.declare(symbol);
        self.check_declared(id, declared);
        id
    }

    /// Bind an already reserved symbol in the innermost region
    pub fn bind(&mut self, id: SymbolId) -> Declared {
        let declared = self.symbols.bind(id);
        self.check_declared(id, declared);
        declared
    }

    fn check_declared(&mut self, id: SymbolId, declared: Declared) {
        let Declared::Duplicate { existing } = declared else {
            return;
        };
        let symbol = self.symbols.symbol(id);
        let earlier = self.symbols.symbol(existing);
        let mut diagnostic = Diagnostic::new(
            format!("'{}' is already declared in this region", symbol.name),
            symbol.range,
            ErrorCode::DUPLICATE_DECLARATION,
        );
        if !earlier.is_predefined() {
            diagnostic =
                diagnostic.with_related(RelatedInfo::new("first declared here", earlier.range));
        }
        self.report(diagnostic);
    }

    /// Report a semantic observation that does not stop the parse
    pub fn note(&mut self, code: ErrorCode, message: impl Into<String>, range: TextRange) {
        self.report(Diagnostic::new(message, range, code));
    }

    pub fn warn(&mut self, code: ErrorCode, message: impl Into<String>, range: TextRange) {
        self.report(Diagnostic::new(message, range, code).with_severity(Severity::Warning));
    }
}

/// How a token is named in a diagnostic
fn describe(token: &Token<'_>) -> String {
    match token.kind {
        SyntaxKind::IDENT
        | SyntaxKind::INTEGER_LITERAL
        | SyntaxKind::REAL_LITERAL
        | SyntaxKind::CHAR_LITERAL
        | SyntaxKind::STRING_LITERAL => format!("{} {}", token.kind.display_name(), token.text),
        kind => kind.display_name().to_string(),
    }
}
