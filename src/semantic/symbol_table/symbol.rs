use text_size::TextRange;

use crate::base::{Name, NodeId, RegionId};

/// Classification of a declared entity.
///
/// This is what the parser asks for when token lookahead cannot decide
/// between two productions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SymbolKind {
    Type,
    Subtype,
    IncompleteType,
    PrivateType,
    Object,
    Constant,
    DeferredConstant,
    NamedNumber,
    Parameter,
    LoopParameter,
    Component,
    Discriminant,
    Exception,
    EnumerationLiteral,
    Procedure,
    Function,
    Package,
    GenericPackage,
    GenericProcedure,
    GenericFunction,
    /// Loop or block label
    Label,
    /// Library unit named in a `with` clause
    Unit,
    /// No visible declaration
    Unresolved,
}

impl SymbolKind {
    /// Can this name be used as a type mark?
    pub fn is_type_mark(self) -> bool {
        matches!(
            self,
            Self::Type | Self::Subtype | Self::IncompleteType | Self::PrivateType
        )
    }

    /// Does this denote an object (something with a value)?
    pub fn is_object(self) -> bool {
        matches!(
            self,
            Self::Object
                | Self::Constant
                | Self::DeferredConstant
                | Self::NamedNumber
                | Self::Parameter
                | Self::LoopParameter
                | Self::Component
                | Self::Discriminant
        )
    }

    /// May several declarations of this kind share a name in one region?
    pub fn is_overloadable(self) -> bool {
        matches!(
            self,
            Self::Procedure | Self::Function | Self::EnumerationLiteral
        )
    }

    pub fn is_subprogram(self) -> bool {
        matches!(self, Self::Procedure | Self::Function)
    }

    pub fn is_generic(self) -> bool {
        matches!(
            self,
            Self::GenericPackage | Self::GenericProcedure | Self::GenericFunction
        )
    }

    /// Is a name of this kind a valid prefix of an expanded name?
    pub fn is_expanded_prefix(self) -> bool {
        matches!(
            self,
            Self::Package
                | Self::GenericPackage
                | Self::Unit
                | Self::Procedure
                | Self::Function
                | Self::GenericProcedure
                | Self::GenericFunction
                | Self::Label
        )
    }

    /// Does `self` complete an earlier declaration of kind `earlier`?
    pub fn completes(self, earlier: SymbolKind) -> bool {
        matches!(
            (earlier, self),
            (Self::IncompleteType, Self::Type)
                | (Self::IncompleteType, Self::PrivateType)
                | (Self::PrivateType, Self::Type)
                | (Self::DeferredConstant, Self::Constant)
                | (Self::GenericProcedure, Self::Procedure)
                | (Self::GenericFunction, Self::Function)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Subtype => "subtype",
            Self::IncompleteType => "incomplete type",
            Self::PrivateType => "private type",
            Self::Object => "object",
            Self::Constant => "constant",
            Self::DeferredConstant => "deferred constant",
            Self::NamedNumber => "named number",
            Self::Parameter => "parameter",
            Self::LoopParameter => "loop parameter",
            Self::Component => "component",
            Self::Discriminant => "discriminant",
            Self::Exception => "exception",
            Self::EnumerationLiteral => "enumeration literal",
            Self::Procedure => "procedure",
            Self::Function => "function",
            Self::Package => "package",
            Self::GenericPackage => "generic package",
            Self::GenericProcedure => "generic procedure",
            Self::GenericFunction => "generic function",
            Self::Label => "label",
            Self::Unit => "library unit",
            Self::Unresolved => "unresolved",
        }
    }
}

/// The structural class of a type, as far as parsing needs to know it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeShape {
    Enumeration,
    Integer,
    Real,
    Array { constrained: bool },
    Record { discriminated: bool },
    Access { designated: Box<TypeShape> },
    Private { discriminated: bool },
    Incomplete { discriminated: bool },
    Unknown,
}

impl TypeShape {
    /// Does a parenthesized constraint on this type list discriminant values?
    pub fn has_discriminants(&self) -> bool {
        match self {
            Self::Record { discriminated }
            | Self::Private { discriminated }
            | Self::Incomplete { discriminated } => *discriminated,
            Self::Access { designated } => designated.has_discriminants(),
            _ => false,
        }
    }

    /// Does a parenthesized constraint on this type list index ranges?
    pub fn is_array(&self) -> bool {
        match self {
            Self::Array { .. } => true,
            Self::Access { designated } => designated.is_array(),
            _ => false,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Enumeration | Self::Integer | Self::Real)
    }
}

/// A declared entity
///
/// Immutable once bound. `region` and `depth` are filled in by the table
/// when the symbol is reserved.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Symbol {
    pub name: Name,
    pub kind: SymbolKind,
    /// Declaring node; `None` for predefined entities
    pub node: Option<NodeId>,
    /// Range of the defining occurrence
    pub range: TextRange,
    pub region: RegionId,
    pub depth: usize,
    pub shape: Option<TypeShape>,
}

impl Symbol {
    pub fn new(name: Name, kind: SymbolKind, range: TextRange) -> Self {
        Self {
            name,
            kind,
            node: None,
            range,
            region: RegionId(0),
            depth: 0,
            shape: None,
        }
    }

    pub fn with_node(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }

    pub fn with_shape(mut self, shape: TypeShape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn is_predefined(&self) -> bool {
        self.node.is_none()
    }

    /// The shape of a type-like symbol, `Unknown` when not recorded
    pub fn type_shape(&self) -> TypeShape {
        self.shape.clone().unwrap_or(TypeShape::Unknown)
    }
}
