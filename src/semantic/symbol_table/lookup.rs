use crate::base::{Name, SymbolId};

use super::scope::{ImportKind, RegionKind, Scope};
use super::symbol::SymbolKind;
use super::table::SymbolTable;

/// Result of resolving a name: the symbol found, or `Unresolved`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub symbol: Option<SymbolId>,
    pub kind: SymbolKind,
}

impl Resolution {
    pub const UNRESOLVED: Self = Self {
        symbol: None,
        kind: SymbolKind::Unresolved,
    };

    pub fn is_resolved(&self) -> bool {
        self.symbol.is_some()
    }
}

impl SymbolTable {
    fn resolution(&self, id: SymbolId) -> Resolution {
        Resolution {
            symbol: Some(id),
            kind: self.symbol(id).kind,
        }
    }

    // ============================================================
    // Direct visibility
    // ============================================================

    /// Resolve `name` from the innermost region outward.
    ///
    /// Directly visible declarations win over use-visible ones. Inside a
    /// record or discriminant part, regions outside the innermost type
    /// declaration do not contribute labels, nor objects local to a
    /// subprogram, block or loop.
    pub fn resolve(&self, name: &Name) -> Resolution {
        let boundary = self.restriction_boundary();

        for (index, scope) in self.scopes.iter().enumerate().rev() {
            let restricted = boundary.is_some_and(|b| index < b);
            if let Some(id) = self.lookup_in_scope(scope, name, restricted) {
                return self.resolution(id);
            }
            for import in scope.imports.iter().filter(|i| i.kind == ImportKind::Body) {
                if let Some(id) = self.lookup_published(import.package, name, true) {
                    return self.resolution(id);
                }
            }
        }

        for scope in self.scopes.iter().rev() {
            for import in scope.imports.iter().filter(|i| i.kind == ImportKind::Use) {
                if let Some(id) = self.lookup_published(import.package, name, false) {
                    return self.resolution(id);
                }
            }
        }

        Resolution::UNRESOLVED
    }

    /// Index of the innermost type declaration region when resolution
    /// starts inside a record or discriminant part.
    fn restriction_boundary(&self) -> Option<usize> {
        if !self.current().kind.is_type_interior() {
            return None;
        }
        self.scopes
            .iter()
            .rposition(|scope| scope.kind == RegionKind::TypeDeclaration)
    }

    fn lookup_in_scope(&self, scope: &Scope, name: &Name, restricted: bool) -> Option<SymbolId> {
        let ids = scope.get(name);
        if !restricted {
            return ids.last().copied();
        }
        ids.iter().rev().copied().find(|&id| {
            let kind = self.symbol(id).kind;
            let hidden = kind == SymbolKind::Label
                || (kind.is_object() && scope.kind.hides_objects_from_types());
            !hidden
        })
    }

    fn lookup_published(
        &self,
        owner: SymbolId,
        name: &Name,
        include_private: bool,
    ) -> Option<SymbolId> {
        self.published
            .get(&owner)
            .and_then(|contents| contents.get(name, include_private))
    }

    /// Resolve `name` in the innermost region only (no outward walk).
    pub fn resolve_local(&self, name: &Name) -> Resolution {
        match self.current().get(name).last() {
            Some(&id) => self.resolution(id),
            None => Resolution::UNRESOLVED,
        }
    }

    // ============================================================
    // Expanded names
    // ============================================================

    /// Resolve the selector of an expanded name `owner.name`.
    ///
    /// Inside the owner's own region (or its body) the region itself is
    /// searched first, and private declarations are visible too.
    pub fn resolve_member(&self, owner: SymbolId, name: &Name) -> Resolution {
        let mut inside = false;
        for scope in self.scopes.iter().rev().filter(|s| s.owner == Some(owner)) {
            inside = true;
            if let Some(&id) = scope.get(name).last() {
                return self.resolution(id);
            }
        }
        match self.lookup_published(owner, name, inside) {
            Some(id) => self.resolution(id),
            None => Resolution::UNRESOLVED,
        }
    }
}
