//! Type definitions, subtype indications and constraints

use crate::base::NodeId;

use super::ast::DefiningName;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeDef {
    /// `(RED, GREEN, 'x')`
    Enumeration { literals: Vec<DefiningName> },
    /// `range L .. H`
    Integer { range: NodeId },
    /// `digits D [range L .. H]`
    Float { digits: NodeId, range: Option<NodeId> },
    /// `delta D [range L .. H]`
    Fixed { delta: NodeId, range: Option<NodeId> },
    /// `array (INDEX range <>, ...) of T`
    UnconstrainedArray { indexes: Vec<NodeId>, component: NodeId },
    /// `array (1 .. 10, ...) of T`
    ConstrainedArray { indexes: Vec<NodeId>, component: NodeId },
    /// `record ... end record`; `null record` has no components
    Record {
        components: Vec<NodeId>,
        variant: Option<NodeId>,
    },
    /// `case D is when ... end case;`
    VariantPart {
        discriminant: NodeId,
        variants: Vec<NodeId>,
    },
    Variant {
        choices: Vec<NodeId>,
        components: Vec<NodeId>,
        variant: Option<NodeId>,
    },
    /// `access T`
    Access { designated: NodeId },
    /// `new T`
    Derived { parent: NodeId },
    /// `INDEX range <>`
    IndexSubtype { mark: NodeId },

    SubtypeIndication {
        mark: NodeId,
        constraint: Option<NodeId>,
    },
    RangeConstraint { range: NodeId },
    IndexConstraint { ranges: Vec<NodeId> },
    DiscriminantConstraint { associations: Vec<NodeId> },
    FloatingConstraint { digits: NodeId, range: Option<NodeId> },
    FixedConstraint { delta: NodeId, range: Option<NodeId> },
    /// `L .. H`
    Range { low: NodeId, high: NodeId },
}

impl TypeDef {
    pub fn children(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        match self {
            Self::Enumeration { .. } => {}
            Self::Integer { range } | Self::RangeConstraint { range } => out.push(*range),
            Self::Float { digits, range } | Self::FloatingConstraint { digits, range } => {
                out.push(*digits);
                out.extend(*range);
            }
            Self::Fixed { delta, range } | Self::FixedConstraint { delta, range } => {
                out.push(*delta);
                out.extend(*range);
            }
            Self::UnconstrainedArray { indexes, component }
            | Self::ConstrainedArray { indexes, component } => {
                out.extend(indexes);
                out.push(*component);
            }
            Self::Record {
                components,
                variant,
            } => {
                out.extend(components);
                out.extend(*variant);
            }
            Self::VariantPart {
                discriminant,
                variants,
            } => {
                out.push(*discriminant);
                out.extend(variants);
            }
            Self::Variant {
                choices,
                components,
                variant,
            } => {
                out.extend(choices);
                out.extend(components);
                out.extend(*variant);
            }
            Self::Access { designated } => out.push(*designated),
            Self::Derived { parent } => out.push(*parent),
            Self::IndexSubtype { mark } => out.push(*mark),
            Self::SubtypeIndication { mark, constraint } => {
                out.push(*mark);
                out.extend(*constraint);
            }
            Self::IndexConstraint { ranges } => out.extend(ranges),
            Self::DiscriminantConstraint { associations } => out.extend(associations),
            Self::Range { low, high } => {
                out.push(*low);
                out.push(*high);
            }
        }
        out
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Enumeration { .. } => "EnumerationType",
            Self::Integer { .. } => "IntegerType",
            Self::Float { .. } => "FloatType",
            Self::Fixed { .. } => "FixedType",
            Self::UnconstrainedArray { .. } => "UnconstrainedArray",
            Self::ConstrainedArray { .. } => "ConstrainedArray",
            Self::Record { .. } => "RecordType",
            Self::VariantPart { .. } => "VariantPart",
            Self::Variant { .. } => "Variant",
            Self::Access { .. } => "AccessType",
            Self::Derived { .. } => "DerivedType",
            Self::IndexSubtype { .. } => "IndexSubtype",
            Self::SubtypeIndication { .. } => "SubtypeIndication",
            Self::RangeConstraint { .. } => "RangeConstraint",
            Self::IndexConstraint { .. } => "IndexConstraint",
            Self::DiscriminantConstraint { .. } => "DiscriminantConstraint",
            Self::FloatingConstraint { .. } => "FloatingConstraint",
            Self::FixedConstraint { .. } => "FixedConstraint",
            Self::Range { .. } => "Range",
        }
    }
}
