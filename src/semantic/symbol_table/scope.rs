use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::base::{Name, RegionId, SymbolId};

pub type Bindings = IndexMap<Name, Vec<SymbolId>, FxBuildHasher>;

/// What kind of construct opened a declarative region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegionKind {
    /// Outermost region: predefined environment and library units
    Library,
    /// Context clauses of one compilation unit
    Context,
    Package,
    PackageBody,
    Subprogram,
    Block,
    Loop,
    TypeDeclaration,
    DiscriminantPart,
    Record,
    GenericFormal,
}

impl RegionKind {
    /// Regions whose local objects are hidden from record and
    /// discriminant-part lookups outside the enclosing type declaration
    pub fn hides_objects_from_types(self) -> bool {
        matches!(self, Self::Subprogram | Self::Block | Self::Loop)
    }

    /// Regions in which resolution is restricted
    pub fn is_type_interior(self) -> bool {
        matches!(self, Self::Record | Self::DiscriminantPart)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportKind {
    /// `use P;` makes P's visible declarations use-visible
    Use,
    /// A body sees every declaration of its specification directly
    Body,
}

/// Import declaration in a scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Import {
    pub package: SymbolId,
    pub kind: ImportKind,
}

/// An active declarative region
#[derive(Debug, Clone)]
pub struct Scope {
    pub id: RegionId,
    pub kind: RegionKind,
    /// Entity whose declarative region this is (package, subprogram, label)
    pub owner: Option<SymbolId>,
    /// Maps normalized name to its bindings, last one visible
    pub entries: Bindings,
    /// Bound symbols in binding order
    pub order: Vec<SymbolId>,
    pub imports: Vec<Import>,
    /// Index into `order` where the private part starts
    pub private_start: Option<usize>,
}

impl Scope {
    pub fn new(id: RegionId, kind: RegionKind, owner: Option<SymbolId>) -> Self {
        Self {
            id,
            kind,
            owner,
            entries: Bindings::default(),
            order: Vec::new(),
            imports: Vec::new(),
            private_start: None,
        }
    }

    pub fn get(&self, name: &Name) -> &[SymbolId] {
        self.entries.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    fn split(&self) -> (&[SymbolId], &[SymbolId]) {
        let at = self.private_start.unwrap_or(self.order.len());
        self.order.split_at(at)
    }

    /// Snapshot of the bindings, split at the private marker
    pub fn close(&self) -> ClosedRegion {
        let (visible, private) = self.split();
        ClosedRegion {
            id: self.id,
            kind: self.kind,
            owner: self.owner,
            visible: visible.to_vec(),
            private: private.to_vec(),
        }
    }
}

/// What [`pop`](super::SymbolTable::pop) hands back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedRegion {
    pub id: RegionId,
    pub kind: RegionKind,
    pub owner: Option<SymbolId>,
    pub visible: Vec<SymbolId>,
    pub private: Vec<SymbolId>,
}

impl ClosedRegion {
    pub fn symbols(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.visible.iter().chain(self.private.iter()).copied()
    }
}

/// Declarations kept reachable through their owning entity after the region
/// closed, for expanded names and bodies.
#[derive(Debug, Clone, Default)]
pub struct RegionContents {
    pub visible: Bindings,
    pub private: Bindings,
}

impl RegionContents {
    pub fn get(&self, name: &Name, include_private: bool) -> Option<SymbolId> {
        let private = if include_private { self.private.get(name) } else { None };
        private
            .and_then(|ids| ids.last())
            .or_else(|| self.visible.get(name).and_then(|ids| ids.last()))
            .copied()
    }
}
