//! Token kinds produced by the lexer
//!
//! The parser builds an arena AST rather than a concrete syntax tree, so this
//! enum only names tokens. Node variants live in [`crate::syntax`].

/// All token kinds of the Ada-like source language
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (filtered out before the cursor sees the stream)
    // =========================================================================
    WHITESPACE = 0,
    COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,           // Text_IO
    INTEGER_LITERAL, // 42, 16#FF#, 1E6
    REAL_LITERAL,    // 3.14, 2#1.1#E4
    CHAR_LITERAL,    // 'x'
    STRING_LITERAL,  // "hello" (also operator symbols such as "+")

    // =========================================================================
    // DELIMITERS
    // =========================================================================
    AMP,       // &
    TICK,      // '
    L_PAREN,   // (
    R_PAREN,   // )
    STAR,      // *
    PLUS,      // +
    COMMA,     // ,
    MINUS,     // -
    DOT,       // .
    SLASH,     // /
    COLON,     // :
    SEMICOLON, // ;
    LT,        // <
    EQ,        // =
    GT,        // >
    BAR,       // |
    FAT_ARROW, // =>
    DOT_DOT,   // ..
    STAR_STAR, // **
    COLON_EQ,  // :=
    SLASH_EQ,  // /=
    GT_EQ,     // >=
    LT_EQ,     // <=
    LT_LT,     // <<
    GT_GT,     // >>
    BOX,       // <>

    // =========================================================================
    // RESERVED WORDS
    // =========================================================================
    ABORT_KW,
    ABS_KW,
    ACCEPT_KW,
    ACCESS_KW,
    ALL_KW,
    AND_KW,
    ARRAY_KW,
    AT_KW,
    BEGIN_KW,
    BODY_KW,
    CASE_KW,
    CONSTANT_KW,
    DECLARE_KW,
    DELAY_KW,
    DELTA_KW,
    DIGITS_KW,
    DO_KW,
    ELSE_KW,
    ELSIF_KW,
    END_KW,
    ENTRY_KW,
    EXCEPTION_KW,
    EXIT_KW,
    FOR_KW,
    FUNCTION_KW,
    GENERIC_KW,
    GOTO_KW,
    IF_KW,
    IN_KW,
    IS_KW,
    LIMITED_KW,
    LOOP_KW,
    MOD_KW,
    NEW_KW,
    NOT_KW,
    NULL_KW,
    OF_KW,
    OR_KW,
    OTHERS_KW,
    OUT_KW,
    PACKAGE_KW,
    PRAGMA_KW,
    PRIVATE_KW,
    PROCEDURE_KW,
    RAISE_KW,
    RANGE_KW,
    RECORD_KW,
    REM_KW,
    RENAMES_KW,
    RETURN_KW,
    REVERSE_KW,
    SELECT_KW,
    SEPARATE_KW,
    SUBTYPE_KW,
    TASK_KW,
    TERMINATE_KW,
    THEN_KW,
    TYPE_KW,
    USE_KW,
    WHEN_KW,
    WHILE_KW,
    WITH_KW,
    XOR_KW,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    ERROR,
    EOF,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::COMMENT)
    }

    /// Check if this is a reserved word
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::ABORT_KW as u16) && (self as u16) <= (Self::XOR_KW as u16)
    }

    /// Check if this is a delimiter
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::AMP as u16) && (self as u16) <= (Self::BOX as u16)
    }

    /// Check if this is a literal (identifiers excluded)
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INTEGER_LITERAL | Self::REAL_LITERAL | Self::CHAR_LITERAL | Self::STRING_LITERAL
        )
    }

    /// A short human-readable rendering used in diagnostics
    pub fn display_name(self) -> &'static str {
        match self {
            Self::WHITESPACE => "whitespace",
            Self::COMMENT => "comment",
            Self::IDENT => "identifier",
            Self::INTEGER_LITERAL => "integer literal",
            Self::REAL_LITERAL => "real literal",
            Self::CHAR_LITERAL => "character literal",
            Self::STRING_LITERAL => "string literal",
            Self::AMP => "'&'",
            Self::TICK => "'''",
            Self::L_PAREN => "'('",
            Self::R_PAREN => "')'",
            Self::STAR => "'*'",
            Self::PLUS => "'+'",
            Self::COMMA => "','",
            Self::MINUS => "'-'",
            Self::DOT => "'.'",
            Self::SLASH => "'/'",
            Self::COLON => "':'",
            Self::SEMICOLON => "';'",
            Self::LT => "'<'",
            Self::EQ => "'='",
            Self::GT => "'>'",
            Self::BAR => "'|'",
            Self::FAT_ARROW => "'=>'",
            Self::DOT_DOT => "'..'",
            Self::STAR_STAR => "'**'",
            Self::COLON_EQ => "':='",
            Self::SLASH_EQ => "'/='",
            Self::GT_EQ => "'>='",
            Self::LT_EQ => "'<='",
            Self::LT_LT => "'<<'",
            Self::GT_GT => "'>>'",
            Self::BOX => "'<>'",
            Self::ERROR => "invalid token",
            Self::EOF => "end of file",
            kw => super::keywords::keyword_text(kw).unwrap_or("reserved word"),
        }
    }
}
