
use text_size::{TextRange, TextSize};

use crate::base::Name;
use crate::semantic::{Symbol, SymbolKind};

fn sym(name: &str, kind: SymbolKind) -> Symbol {
    Symbol::new(Name::new(name), kind, TextRange::empty(TextSize::new(0)))
}

fn sym_at(name: &str, kind: SymbolKind, offset: u32) -> Symbol {
    Symbol::new(Name::new(name), kind, TextRange::empty(TextSize::new(offset)))
}
