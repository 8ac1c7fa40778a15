//! Declaration nodes

use crate::base::{Name, NodeId};

use super::ast::DefiningName;

/// Parameter and generic formal object modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    #[default]
    In,
    Out,
    InOut,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::InOut => "in out",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubprogramKind {
    Procedure,
    Function,
}

/// What a generic declaration or instantiation produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GenericUnitKind {
    Package,
    Procedure,
    Function,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenamingKind {
    /// `X : T renames Y;`
    Object { subtype: NodeId },
    /// `E : exception renames F;`
    Exception,
    /// `package P renames Q;`
    Package,
    /// `procedure P (...) renames Q;`
    Subprogram { spec: NodeId },
}

/// Generic formal type definitions
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormalTypeDef {
    Private { limited: bool },
    /// `(<>)`
    Discrete,
    /// `range <>`
    Integer,
    /// `digits <>`
    Float,
    /// `delta <>`
    Fixed,
    Array(NodeId),
    Access(NodeId),
}

/// Default of a generic formal subprogram
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormalDefault {
    None,
    /// `is <>`
    Box,
    /// `is Name`
    Name(NodeId),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StubKind {
    /// `package body P is separate;`
    Package(DefiningName),
    /// `procedure P is separate;`
    Subprogram(NodeId),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decl {
    /// `A, B : [constant] T [:= E];`
    Object {
        names: Vec<DefiningName>,
        constant: bool,
        subtype: NodeId,
        init: Option<NodeId>,
    },
    /// `N : constant := E;`
    Number {
        names: Vec<DefiningName>,
        value: NodeId,
    },
    Type {
        name: DefiningName,
        discriminants: Vec<NodeId>,
        definition: NodeId,
    },
    /// `type T;`
    IncompleteType {
        name: DefiningName,
        discriminants: Vec<NodeId>,
    },
    /// `type T is [limited] private;`
    PrivateType {
        name: DefiningName,
        discriminants: Vec<NodeId>,
        limited: bool,
    },
    Subtype {
        name: DefiningName,
        indication: NodeId,
    },
    Exception {
        names: Vec<DefiningName>,
    },
    Renaming {
        name: DefiningName,
        kind: RenamingKind,
        renamed: NodeId,
    },
    SubprogramSpec {
        kind: SubprogramKind,
        name: DefiningName,
        params: Vec<NodeId>,
        result: Option<NodeId>,
    },
    Parameter {
        names: Vec<DefiningName>,
        mode: Mode,
        subtype: NodeId,
        default: Option<NodeId>,
    },
    Discriminant {
        names: Vec<DefiningName>,
        subtype: NodeId,
        default: Option<NodeId>,
    },
    Component {
        names: Vec<DefiningName>,
        subtype: NodeId,
        default: Option<NodeId>,
    },
    SubprogramDecl {
        spec: NodeId,
    },
    SubprogramBody {
        spec: NodeId,
        decls: Vec<NodeId>,
        body: NodeId,
        end_name: Option<Name>,
    },
    PackageDecl {
        name: DefiningName,
        visible: Vec<NodeId>,
        private: Option<Vec<NodeId>>,
        end_name: Option<Name>,
    },
    PackageBody {
        name: DefiningName,
        decls: Vec<NodeId>,
        body: Option<NodeId>,
        end_name: Option<Name>,
    },
    GenericDecl {
        formals: Vec<NodeId>,
        unit: NodeId,
    },
    FormalObject {
        names: Vec<DefiningName>,
        mode: Mode,
        subtype: NodeId,
        default: Option<NodeId>,
    },
    FormalType {
        name: DefiningName,
        discriminants: Vec<NodeId>,
        definition: FormalTypeDef,
    },
    FormalSubprogram {
        spec: NodeId,
        default: FormalDefault,
    },
    Instantiation {
        kind: GenericUnitKind,
        name: DefiningName,
        generic: NodeId,
        actuals: Vec<NodeId>,
    },
    BodyStub {
        kind: StubKind,
    },
    UseClause {
        packages: Vec<NodeId>,
    },
    Pragma {
        name: DefiningName,
        args: Vec<NodeId>,
    },
}

impl Decl {
    pub fn children(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        match self {
            Self::Object { subtype, init, .. } => {
                out.push(*subtype);
                out.extend(*init);
            }
            Self::Number { value, .. } => out.push(*value),
            Self::Type {
                discriminants,
                definition,
                ..
            } => {
                out.extend(discriminants);
                out.push(*definition);
            }
            Self::IncompleteType { discriminants, .. }
            | Self::PrivateType { discriminants, .. } => out.extend(discriminants),
            Self::Subtype { indication, .. } => out.push(*indication),
            Self::Exception { .. } => {}
            Self::Renaming { kind, renamed, .. } => {
                match kind {
                    RenamingKind::Object { subtype } => out.push(*subtype),
                    RenamingKind::Subprogram { spec } => out.push(*spec),
                    RenamingKind::Exception | RenamingKind::Package => {}
                }
                out.push(*renamed);
            }
            Self::SubprogramSpec { params, result, .. } => {
                out.extend(params);
                out.extend(*result);
            }
            Self::Parameter {
                subtype, default, ..
            }
            | Self::Discriminant {
                subtype, default, ..
            }
            | Self::Component {
                subtype, default, ..
            }
            | Self::FormalObject {
                subtype, default, ..
            } => {
                out.push(*subtype);
                out.extend(*default);
            }
            Self::SubprogramDecl { spec } => out.push(*spec),
            Self::SubprogramBody {
                spec, decls, body, ..
            } => {
                out.push(*spec);
                out.extend(decls);
                out.push(*body);
            }
            Self::PackageDecl {
                visible, private, ..
            } => {
                out.extend(visible);
                if let Some(private) = private {
                    out.extend(private);
                }
            }
            Self::PackageBody { decls, body, .. } => {
                out.extend(decls);
                out.extend(*body);
            }
            Self::GenericDecl { formals, unit } => {
                out.extend(formals);
                out.push(*unit);
            }
            Self::FormalType {
                discriminants,
                definition,
                ..
            } => {
                out.extend(discriminants);
                match definition {
                    FormalTypeDef::Array(def) | FormalTypeDef::Access(def) => out.push(*def),
                    _ => {}
                }
            }
            Self::FormalSubprogram { spec, default } => {
                out.push(*spec);
                if let FormalDefault::Name(name) = default {
                    out.push(*name);
                }
            }
            Self::Instantiation {
                generic, actuals, ..
            } => {
                out.push(*generic);
                out.extend(actuals);
            }
            Self::BodyStub { kind } => {
                if let StubKind::Subprogram(spec) = kind {
                    out.push(*spec);
                }
            }
            Self::UseClause { packages } => out.extend(packages),
            Self::Pragma { args, .. } => out.extend(args),
        }
        out
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Object { .. } => "ObjectDecl",
            Self::Number { .. } => "NumberDecl",
            Self::Type { .. } => "TypeDecl",
            Self::IncompleteType { .. } => "IncompleteTypeDecl",
            Self::PrivateType { .. } => "PrivateTypeDecl",
            Self::Subtype { .. } => "SubtypeDecl",
            Self::Exception { .. } => "ExceptionDecl",
            Self::Renaming { .. } => "RenamingDecl",
            Self::SubprogramSpec { .. } => "SubprogramSpec",
            Self::Parameter { .. } => "Parameter",
            Self::Discriminant { .. } => "Discriminant",
            Self::Component { .. } => "Component",
            Self::SubprogramDecl { .. } => "SubprogramDecl",
            Self::SubprogramBody { .. } => "SubprogramBody",
            Self::PackageDecl { .. } => "PackageDecl",
            Self::PackageBody { .. } => "PackageBody",
            Self::GenericDecl { .. } => "GenericDecl",
            Self::FormalObject { .. } => "FormalObject",
            Self::FormalType { .. } => "FormalType",
            Self::FormalSubprogram { .. } => "FormalSubprogram",
            Self::Instantiation { .. } => "Instantiation",
            Self::BodyStub { .. } => "BodyStub",
            Self::UseClause { .. } => "UseClause",
            Self::Pragma { .. } => "Pragma",
        }
    }

    /// The names this declaration introduces
    pub fn defining_names(&self) -> Vec<&DefiningName> {
        match self {
            Self::Object { names, .. }
            | Self::Number { names, .. }
            | Self::Exception { names, .. }
            | Self::Parameter { names, .. }
            | Self::Discriminant { names, .. }
            | Self::Component { names, .. }
            | Self::FormalObject { names, .. } => names.iter().collect(),
            Self::Type { name, .. }
            | Self::IncompleteType { name, .. }
            | Self::PrivateType { name, .. }
            | Self::Subtype { name, .. }
            | Self::Renaming { name, .. }
            | Self::SubprogramSpec { name, .. }
            | Self::PackageDecl { name, .. }
            | Self::PackageBody { name, .. }
            | Self::FormalType { name, .. }
            | Self::Instantiation { name, .. } => vec![name],
            Self::BodyStub {
                kind: StubKind::Package(name),
            } => vec![name],
            _ => Vec::new(),
        }
    }
}
