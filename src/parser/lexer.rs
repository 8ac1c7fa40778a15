//! Logos-based lexer for the Ada-like source language
//!
//! Fast tokenization using the logos crate. Two rules need more than a
//! regular expression:
//!
//! - Reserved words are matched as identifiers and classified afterwards by
//!   [`keyword_kind`](super::keywords::keyword_kind), because they are
//!   case-insensitive.
//! - An apostrophe that follows an identifier, `)`, `all` or a string literal
//!   is a tick, not the start of a character literal. In `T'('a')` the
//!   regular expression would read `'('` as a character literal; the lexer
//!   emits a tick instead and resumes scanning one byte later.

use logos::Logos;
use text_size::{TextRange, TextSize};

use super::keywords::keyword_kind;
use super::syntax_kind::SyntaxKind;
use crate::base::is_identifier;

/// A token with its kind, text, and position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub range: TextRange,
}

impl<'a> Token<'a> {
    pub fn new(kind: SyntaxKind, text: &'a str, offset: TextSize) -> Self {
        Self {
            kind,
            text,
            range: TextRange::at(offset, TextSize::of(text)),
        }
    }

    pub fn offset(&self) -> TextSize {
        self.range.start()
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    source: &'a str,
    inner: logos::Lexer<'a, LogosToken>,
    /// Byte offset of `inner`'s input within `source`
    base: u32,
    /// Kind of the last non-trivia token, for the tick rule
    previous: Option<SyntaxKind>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            source: input,
            inner: LogosToken::lexer(input),
            base: 0,
            previous: None,
        }
    }

    fn tick_allowed(&self) -> bool {
        matches!(
            self.previous,
            Some(
                SyntaxKind::IDENT
                    | SyntaxKind::R_PAREN
                    | SyntaxKind::ALL_KW
                    | SyntaxKind::STRING_LITERAL
            )
        )
    }

    /// Restart scanning at `offset` (an absolute byte offset).
    fn restart_at(&mut self, offset: u32) {
        self.inner = LogosToken::lexer(&self.source[offset as usize..]);
        self.base = offset;
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let span = self.inner.span();
        let start = self.base + span.start as u32;
        let text = &self.source[start as usize..self.base as usize + span.end];
        let offset = TextSize::new(start);

        let kind = match logos_token {
            Ok(LogosToken::CharLiteral) if self.tick_allowed() => {
                self.restart_at(start + 1);
                SyntaxKind::TICK
            }
            Ok(LogosToken::Ident) => match keyword_kind(text) {
                Some(kw) => kw,
                None if is_identifier(text) => SyntaxKind::IDENT,
                None => SyntaxKind::ERROR,
            },
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };
        let text = if kind == SyntaxKind::TICK { &text[..1] } else { text };

        if !kind.is_trivia() {
            self.previous = Some(kind);
        }
        Some(Token::new(kind, text, offset))
    }
}

/// Tokenize an entire string into a Vec, trivia included
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Tokenize for parsing: trivia removed and an `EOF` token appended.
pub fn tokenize_for_parser(input: &str) -> Vec<Token<'_>> {
    let mut tokens: Vec<Token<'_>> = Lexer::new(input).filter(|t| !t.kind.is_trivia()).collect();
    tokens.push(Token::new(SyntaxKind::EOF, "", TextSize::of(input)));
    tokens
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f\x0B]+")]
    Whitespace,

    #[regex(r"--[^\n]*")]
    Comment,

    // =========================================================================
    // IDENTIFIERS AND LITERALS
    // =========================================================================
    /// Identifier-shaped text; validated and keyword-classified by the lexer
    #[regex(r"\p{L}[\p{L}\p{N}_]*")]
    Ident,

    #[regex(r"[0-9][0-9_]*([eE]\+?[0-9][0-9_]*)?")]
    #[regex(r"[0-9][0-9_]*#[0-9a-fA-F][0-9a-fA-F_]*#([eE]\+?[0-9][0-9_]*)?")]
    Integer,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9][0-9_]*)?")]
    #[regex(r"[0-9][0-9_]*#[0-9a-fA-F][0-9a-fA-F_]*\.[0-9a-fA-F][0-9a-fA-F_]*#([eE][+-]?[0-9][0-9_]*)?")]
    Real,

    #[regex(r"'[^\n]'")]
    CharLiteral,

    #[regex(r#""([^"\n]|"")*""#)]
    StringLiteral,

    // =========================================================================
    // COMPOUND DELIMITERS
    // =========================================================================
    #[token("=>")]
    FatArrow,
    #[token("..")]
    DotDot,
    #[token("**")]
    StarStar,
    #[token(":=")]
    ColonEq,
    #[token("/=")]
    SlashEq,
    #[token(">=")]
    GtEq,
    #[token("<=")]
    LtEq,
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,
    #[token("<>")]
    Box,

    // =========================================================================
    // DELIMITERS
    // =========================================================================
    #[token("&")]
    Amp,
    #[token("'")]
    Tick,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token(",")]
    Comma,
    #[token("-")]
    Minus,
    #[token(".")]
    Dot,
    #[token("/")]
    Slash,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("<")]
    Lt,
    #[token("=")]
    Eq,
    #[token(">")]
    Gt,
    #[token("|")]
    Bar,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::Comment => SyntaxKind::COMMENT,
            LogosToken::Ident => SyntaxKind::IDENT,
            LogosToken::Integer => SyntaxKind::INTEGER_LITERAL,
            LogosToken::Real => SyntaxKind::REAL_LITERAL,
            LogosToken::CharLiteral => SyntaxKind::CHAR_LITERAL,
            LogosToken::StringLiteral => SyntaxKind::STRING_LITERAL,
            LogosToken::FatArrow => SyntaxKind::FAT_ARROW,
            LogosToken::DotDot => SyntaxKind::DOT_DOT,
            LogosToken::StarStar => SyntaxKind::STAR_STAR,
            LogosToken::ColonEq => SyntaxKind::COLON_EQ,
            LogosToken::SlashEq => SyntaxKind::SLASH_EQ,
            LogosToken::GtEq => SyntaxKind::GT_EQ,
            LogosToken::LtEq => SyntaxKind::LT_EQ,
            LogosToken::LtLt => SyntaxKind::LT_LT,
            LogosToken::GtGt => SyntaxKind::GT_GT,
            LogosToken::Box => SyntaxKind::BOX,
            LogosToken::Amp => SyntaxKind::AMP,
            LogosToken::Tick => SyntaxKind::TICK,
            LogosToken::LParen => SyntaxKind::L_PAREN,
            LogosToken::RParen => SyntaxKind::R_PAREN,
            LogosToken::Star => SyntaxKind::STAR,
            LogosToken::Plus => SyntaxKind::PLUS,
            LogosToken::Comma => SyntaxKind::COMMA,
            LogosToken::Minus => SyntaxKind::MINUS,
            LogosToken::Dot => SyntaxKind::DOT,
            LogosToken::Slash => SyntaxKind::SLASH,
            LogosToken::Colon => SyntaxKind::COLON,
            LogosToken::Semicolon => SyntaxKind::SEMICOLON,
            LogosToken::Lt => SyntaxKind::LT,
            LogosToken::Eq => SyntaxKind::EQ,
            LogosToken::Gt => SyntaxKind::GT,
            LogosToken::Bar => SyntaxKind::BAR,
        }
    }
}
