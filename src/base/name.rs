//! Case-normalized identifiers.
//!
//! Identifiers and operator symbols are case-insensitive, so a [`Name`]
//! stores them upper-cased. Character literals are the exception: `'a'`
//! and `'A'` are different literals and are kept verbatim.

use std::fmt;

use smol_str::SmolStr;

/// A normalized identifier, operator symbol or character literal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Name(SmolStr);

impl Name {
    /// Normalize identifier or operator-symbol text.
    ///
    /// `"Text_IO"` becomes `TEXT_IO`, `"\"and\""` becomes `"AND"`.
    pub fn new(text: &str) -> Self {
        if text.bytes().all(|b| !b.is_ascii_lowercase()) {
            return Self(SmolStr::new(text));
        }
        Self(SmolStr::new(text.to_uppercase()))
    }

    /// Keep `text` exactly as written (character literals).
    pub fn verbatim(text: &str) -> Self {
        Self(SmolStr::new(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Is this a character literal such as `'x'`?
    pub fn is_character_literal(&self) -> bool {
        self.0.len() >= 3 && self.0.starts_with('\'') && self.0.ends_with('\'')
    }

    /// Is this an operator symbol such as `"+"`?
    pub fn is_operator_symbol(&self) -> bool {
        self.0.len() >= 2 && self.0.starts_with('"') && self.0.ends_with('"')
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Name {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.0.as_str() == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_str() == *other
    }
}

/// Check the identifier rules: a letter first, then letters, digits and
/// isolated underscores, never ending in an underscore.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !unicode_ident::is_xid_start(first) || first == '_' {
        return false;
    }
    let mut previous = first;
    for c in chars {
        if c == '_' {
            if previous == '_' {
                return false;
            }
        } else if !unicode_ident::is_xid_continue(c) {
            return false;
        }
        previous = c;
    }
    previous != '_'
}
