//! Reserved words
//!
//! Reserved words are case-insensitive: `BEGIN`, `Begin` and `begin` are the
//! same token. The lexer matches identifiers first and classifies them here.

use super::syntax_kind::SyntaxKind;

/// Every reserved word paired with its token kind, in alphabetical order.
pub const RESERVED_WORDS: &[(&str, SyntaxKind)] = &[
    ("abort", SyntaxKind::ABORT_KW),
    ("abs", SyntaxKind::ABS_KW),
    ("accept", SyntaxKind::ACCEPT_KW),
    ("access", SyntaxKind::ACCESS_KW),
    ("all", SyntaxKind::ALL_KW),
    ("and", SyntaxKind::AND_KW),
    ("array", SyntaxKind::ARRAY_KW),
    ("at", SyntaxKind::AT_KW),
    ("begin", SyntaxKind::BEGIN_KW),
    ("body", SyntaxKind::BODY_KW),
    ("case", SyntaxKind::CASE_KW),
    ("constant", SyntaxKind::CONSTANT_KW),
    ("declare", SyntaxKind::DECLARE_KW),
    ("delay", SyntaxKind::DELAY_KW),
    ("delta", SyntaxKind::DELTA_KW),
    ("digits", SyntaxKind::DIGITS_KW),
    ("do", SyntaxKind::DO_KW),
    ("else", SyntaxKind::ELSE_KW),
    ("elsif", SyntaxKind::ELSIF_KW),
    ("end", SyntaxKind::END_KW),
    ("entry", SyntaxKind::ENTRY_KW),
    ("exception", SyntaxKind::EXCEPTION_KW),
    ("exit", SyntaxKind::EXIT_KW),
    ("for", SyntaxKind::FOR_KW),
    ("function", SyntaxKind::FUNCTION_KW),
    ("generic", SyntaxKind::GENERIC_KW),
    ("goto", SyntaxKind::GOTO_KW),
    ("if", SyntaxKind::IF_KW),
    ("in", SyntaxKind::IN_KW),
    ("is", SyntaxKind::IS_KW),
    ("limited", SyntaxKind::LIMITED_KW),
    ("loop", SyntaxKind::LOOP_KW),
    ("mod", SyntaxKind::MOD_KW),
    ("new", SyntaxKind::NEW_KW),
    ("not", SyntaxKind::NOT_KW),
    ("null", SyntaxKind::NULL_KW),
    ("of", SyntaxKind::OF_KW),
    ("or", SyntaxKind::OR_KW),
    ("others", SyntaxKind::OTHERS_KW),
    ("out", SyntaxKind::OUT_KW),
    ("package", SyntaxKind::PACKAGE_KW),
    ("pragma", SyntaxKind::PRAGMA_KW),
    ("private", SyntaxKind::PRIVATE_KW),
    ("procedure", SyntaxKind::PROCEDURE_KW),
    ("raise", SyntaxKind::RAISE_KW),
    ("range", SyntaxKind::RANGE_KW),
    ("record", SyntaxKind::RECORD_KW),
    ("rem", SyntaxKind::REM_KW),
    ("renames", SyntaxKind::RENAMES_KW),
    ("return", SyntaxKind::RETURN_KW),
    ("reverse", SyntaxKind::REVERSE_KW),
    ("select", SyntaxKind::SELECT_KW),
    ("separate", SyntaxKind::SEPARATE_KW),
    ("subtype", SyntaxKind::SUBTYPE_KW),
    ("task", SyntaxKind::TASK_KW),
    ("terminate", SyntaxKind::TERMINATE_KW),
    ("then", SyntaxKind::THEN_KW),
    ("type", SyntaxKind::TYPE_KW),
    ("use", SyntaxKind::USE_KW),
    ("when", SyntaxKind::WHEN_KW),
    ("while", SyntaxKind::WHILE_KW),
    ("with", SyntaxKind::WITH_KW),
    ("xor", SyntaxKind::XOR_KW),
];

/// Classify identifier-shaped text, ignoring case.
pub fn keyword_kind(text: &str) -> Option<SyntaxKind> {
    // No reserved word is longer than 9 bytes.
    if text.len() > 9 {
        return None;
    }
    let mut buf = [0u8; 9];
    let lowered = &mut buf[..text.len()];
    lowered.copy_from_slice(text.as_bytes());
    lowered.make_ascii_lowercase();
    RESERVED_WORDS
        .binary_search_by(|(word, _)| word.as_bytes().cmp(lowered))
        .ok()
        .map(|index| RESERVED_WORDS[index].1)
}

/// The canonical spelling of a reserved word kind, quoted for diagnostics.
pub fn keyword_text(kind: SyntaxKind) -> Option<&'static str> {
    const QUOTED: &[&str] = &[
        "'abort'", "'abs'", "'accept'", "'access'", "'all'", "'and'", "'array'", "'at'",
        "'begin'", "'body'", "'case'", "'constant'", "'declare'", "'delay'", "'delta'",
        "'digits'", "'do'", "'else'", "'elsif'", "'end'", "'entry'", "'exception'", "'exit'",
        "'for'", "'function'", "'generic'", "'goto'", "'if'", "'in'", "'is'", "'limited'",
        "'loop'", "'mod'", "'new'", "'not'", "'null'", "'of'", "'or'", "'others'", "'out'",
        "'package'", "'pragma'", "'private'", "'procedure'", "'raise'", "'range'", "'record'",
        "'rem'", "'renames'", "'return'", "'reverse'", "'select'", "'separate'", "'subtype'",
        "'task'", "'terminate'", "'then'", "'type'", "'use'", "'when'", "'while'", "'with'",
        "'xor'",
    ];
    if !kind.is_keyword() {
        return None;
    }
    QUOTED
        .get((kind as u16 - SyntaxKind::ABORT_KW as u16) as usize)
        .copied()
}
