use rustc_hash::FxHashMap;
use tracing::debug;

use crate::base::{Name, RegionId, SymbolId};

use super::scope::{ClosedRegion, Import, ImportKind, RegionContents, RegionKind, Scope};
use super::symbol::Symbol;

/// Outcome of binding a symbol into the current region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declared {
    /// First declaration of the name in this region
    New,
    /// Another overloadable declaration sharing the name
    Overload,
    /// Completion of an incomplete, private, deferred or generic declaration
    Completion { earlier: SymbolId },
    /// Illegal redeclaration; the region keeps `existing`
    Duplicate { existing: SymbolId },
}

/// Snapshot taken before a speculative attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeMark {
    depth: usize,
    symbols: usize,
    journal: usize,
}

impl ScopeMark {
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// One reversible mutation, undone in reverse order by [`SymbolTable::rollback`]
#[derive(Debug)]
enum Undo {
    Pushed,
    Popped(Box<Scope>),
    Bound { region: RegionId, name: Name },
    Imported { region: RegionId },
    PrivateMarked { region: RegionId, previous: Option<usize> },
    Published { owner: SymbolId, previous: Option<RegionContents> },
}

/// Stack of active declarative regions over an arena of symbols
#[derive(Debug)]
pub struct SymbolTable {
    /// Arena storage for all symbols - single source of truth
    pub(super) arena: Vec<Symbol>,
    pub(super) scopes: Vec<Scope>,
    pub(super) published: FxHashMap<SymbolId, RegionContents>,
    journal: Vec<Undo>,
    next_region: u32,
}

impl SymbolTable {
    /// A table holding only the (empty) library region
    pub fn new() -> Self {
        Self {
            arena: Vec::new(),
            scopes: vec![Scope::new(RegionId(0), RegionKind::Library, None)],
            published: FxHashMap::default(),
            journal: Vec::new(),
            next_region: 1,
        }
    }

    // ============================================================
    // Arena
    // ============================================================

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.arena[id.index()]
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.arena.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.arena
            .iter()
            .enumerate()
            .map(|(index, symbol)| (SymbolId::new(index), symbol))
    }

    /// Add a symbol to the arena without making it visible anywhere.
    ///
    /// The innermost region at this point becomes its declaring region.
    pub fn reserve(&mut self, mut symbol: Symbol) -> SymbolId {
        symbol.region = self.current().id;
        symbol.depth = self.scopes.len();
        let id = SymbolId::new(self.arena.len());
        self.arena.push(symbol);
        id
    }

    // ============================================================
    // Regions
    // ============================================================

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    pub fn current(&self) -> &Scope {
        &self.scopes[self.scopes.len() - 1]
    }

    fn current_mut(&mut self) -> &mut Scope {
        let top = self.scopes.len() - 1;
        &mut self.scopes[top]
    }

    pub fn push(&mut self, kind: RegionKind, owner: Option<SymbolId>) -> RegionId {
        let id = RegionId(self.next_region);
        self.next_region += 1;
        self.scopes.push(Scope::new(id, kind, owner));
        self.journal.push(Undo::Pushed);
        debug!(region = id.0, ?kind, depth = self.scopes.len(), "push region");
        id
    }

    /// Close the innermost region. The library region is never popped.
    pub fn pop(&mut self) -> Option<ClosedRegion> {
        if self.scopes.len() <= 1 {
            return None;
        }
        let scope = self.scopes.pop()?;
        let closed = scope.close();
        debug!(region = scope.id.0, kind = ?scope.kind, depth = self.scopes.len(), "pop region");
        self.journal.push(Undo::Popped(Box::new(scope)));
        Some(closed)
    }

    /// Declarations after this point belong to the private part.
    pub fn mark_private(&mut self) {
        let scope = self.current_mut();
        let previous = scope.private_start;
        scope.private_start = Some(scope.order.len());
        let region = scope.id;
        self.journal.push(Undo::PrivateMarked { region, previous });
    }

    pub fn import(&mut self, package: SymbolId, kind: ImportKind) {
        let scope = self.current_mut();
        scope.imports.push(Import { package, kind });
        let region = scope.id;
        self.journal.push(Undo::Imported { region });
    }

    /// Keep a closed region reachable through `owner`. Publishing twice for
    /// the same owner merges (generic formals plus the generic unit).
    pub fn publish(&mut self, owner: SymbolId, region: &ClosedRegion) {
        let previous = self.published.get(&owner).cloned();
        let mut contents = previous.clone().unwrap_or_default();
        for &id in &region.visible {
            let name = self.arena[id.index()].name.clone();
            contents.visible.entry(name).or_default().push(id);
        }
        for &id in &region.private {
            let name = self.arena[id.index()].name.clone();
            contents.private.entry(name).or_default().push(id);
        }
        self.published.insert(owner, contents);
        self.journal.push(Undo::Published { owner, previous });
    }

    /// Publish the innermost region as it stands, without closing it.
    pub fn publish_current(&mut self, owner: SymbolId) {
        let closed = self.current().close();
        self.publish(owner, &closed);
    }

    /// Make `alias` reach the contents published for `target`
    /// (package renamings and instances).
    pub fn publish_alias(&mut self, alias: SymbolId, target: SymbolId) {
        let Some(contents) = self.published.get(&target).cloned() else {
            return;
        };
        let previous = self.published.insert(alias, contents);
        self.journal.push(Undo::Published { owner: alias, previous });
    }

    pub fn published(&self, owner: SymbolId) -> Option<&RegionContents> {
        self.published.get(&owner)
    }

    // ============================================================
    // Declarations
    // ============================================================

    /// Reserve `symbol` and bind it into the innermost region.
    pub fn declare(&mut self, symbol: Symbol) -> (SymbolId, Declared) {
        let id = self.reserve(symbol);
        (id, self.bind(id))
    }

    /// Make an already reserved symbol visible in the innermost region.
    pub fn bind(&mut self, id: SymbolId) -> Declared {
        let region = self.current().id;
        let (name, kind) = {
            let symbol = &self.arena[id.index()];
            (symbol.name.clone(), symbol.kind)
        };

        let existing = self.current().get(&name).to_vec();
        let declared = match existing.last() {
            None => Declared::New,
            Some(&last) if last == id => return Declared::New,
            Some(&last) => {
                let earlier = self.arena[last.index()].kind;
                if kind.is_overloadable() && earlier.is_overloadable() {
                    Declared::Overload
                } else if kind.completes(earlier) {
                    Declared::Completion { earlier: last }
                } else {
                    return Declared::Duplicate { existing: existing[0] };
                }
            }
        };

        let scope = self.current_mut();
        scope.entries.entry(name.clone()).or_default().push(id);
        scope.order.push(id);
        self.journal.push(Undo::Bound { region, name });
        declared
    }

    // ============================================================
    // Transactions
    // ============================================================

    pub fn mark(&self) -> ScopeMark {
        ScopeMark {
            depth: self.scopes.len(),
            symbols: self.arena.len(),
            journal: self.journal.len(),
        }
    }

    /// Undo everything done since `mark`: regions pushed or popped, symbols
    /// bound or reserved, imports, private markers and publications.
    pub fn rollback(&mut self, mark: ScopeMark) {
        while self.journal.len() > mark.journal {
            let Some(entry) = self.journal.pop() else {
                break;
            };
            match entry {
                Undo::Pushed => {
                    self.scopes.pop();
                }
                Undo::Popped(scope) => self.scopes.push(*scope),
                Undo::Bound { region, name } => {
                    if let Some(scope) = self.scope_mut(region) {
                        if let Some(ids) = scope.entries.get_mut(&name) {
                            ids.pop();
                            if ids.is_empty() {
                                scope.entries.shift_remove(&name);
                            }
                        }
                        scope.order.pop();
                    }
                }
                Undo::Imported { region } => {
                    if let Some(scope) = self.scope_mut(region) {
                        scope.imports.pop();
                    }
                }
                Undo::PrivateMarked { region, previous } => {
                    if let Some(scope) = self.scope_mut(region) {
                        scope.private_start = previous;
                    }
                }
                Undo::Published { owner, previous } => match previous {
                    Some(contents) => {
                        self.published.insert(owner, contents);
                    }
                    None => {
                        self.published.remove(&owner);
                    }
                },
            }
        }
        self.arena.truncate(mark.symbols);
        debug_assert_eq!(self.scopes.len(), mark.depth);
    }

    fn scope_mut(&mut self, region: RegionId) -> Option<&mut Scope> {
        self.scopes.iter_mut().rev().find(|scope| scope.id == region)
    }

    // ============================================================
    // Queries on active regions
    // ============================================================

    /// Symbols bound in the library region that were declared by source text
    pub fn library_symbols(&self) -> Vec<SymbolId> {
        self.scopes[0]
            .order
            .iter()
            .copied()
            .filter(|id| !self.arena[id.index()].is_predefined())
            .collect()
    }

    /// Is there an active region of `kind`, optionally owned by `owner`?
    pub fn within(&self, kind: RegionKind, owner: Option<SymbolId>) -> bool {
        self.scopes
            .iter()
            .any(|scope| scope.kind == kind && (owner.is_none() || scope.owner == owner))
    }

    /// Does the innermost subprogram/package/generic boundary enclose a loop
    /// (labelled `label`, if given)?
    pub fn enclosing_loop(&self, label: Option<SymbolId>) -> bool {
        for scope in self.scopes.iter().rev() {
            match scope.kind {
                RegionKind::Loop if label.is_none() || scope.owner == label => return true,
                RegionKind::Subprogram
                | RegionKind::Package
                | RegionKind::PackageBody
                | RegionKind::Library => return false,
                _ => {}
            }
        }
        false
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
