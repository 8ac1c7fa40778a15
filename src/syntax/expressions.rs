//! Expression nodes

use smol_str::SmolStr;

use crate::base::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    And,
    AndThen,
    Or,
    OrElse,
    Xor,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Concat,
    Mul,
    Div,
    Mod,
    Rem,
    Pow,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::AndThen => "and then",
            Self::Or => "or",
            Self::OrElse => "or else",
            Self::Xor => "xor",
            Self::Eq => "=",
            Self::Ne => "/=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Concat => "&",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "mod",
            Self::Rem => "rem",
            Self::Pow => "**",
        }
    }

    pub fn is_logical(self) -> bool {
        matches!(
            self,
            Self::And | Self::AndThen | Self::Or | Self::OrElse | Self::Xor
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOp {
    Plus,
    Minus,
    Abs,
    Not,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Abs => "abs",
            Self::Not => "not",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LiteralKind {
    Integer,
    Real,
    Character,
    String,
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Literal {
    pub kind: LiteralKind,
    pub text: SmolStr,
}

impl Literal {
    pub fn new(kind: LiteralKind, text: &str) -> Self {
        Self {
            kind,
            text: SmolStr::new(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    Binary {
        op: BinaryOp,
        lhs: NodeId,
        rhs: NodeId,
    },
    Unary {
        op: UnaryOp,
        operand: NodeId,
    },
    Literal(Literal),
    /// `X [not] in RANGE_OR_TYPE`
    Membership {
        operand: NodeId,
        negated: bool,
        target: NodeId,
    },
    /// `(A, B => C, others => D)`
    Aggregate {
        components: Vec<NodeId>,
    },
    /// `CHOICE | CHOICE => VALUE`, in aggregates, calls and constraints
    Association {
        choices: Vec<NodeId>,
        value: NodeId,
    },
    /// The `others` choice
    Others,
    /// `T'(E)`
    Qualified {
        mark: NodeId,
        operand: NodeId,
    },
    /// `new T` or `new T'(E)`
    Allocator {
        operand: NodeId,
    },
    Parenthesized {
        inner: NodeId,
    },
}

impl Expr {
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Self::Binary { lhs, rhs, .. } => vec![*lhs, *rhs],
            Self::Unary { operand, .. } => vec![*operand],
            Self::Literal(_) | Self::Others => Vec::new(),
            Self::Membership {
                operand, target, ..
            } => vec![*operand, *target],
            Self::Aggregate { components } => components.clone(),
            Self::Association { choices, value } => {
                let mut out = choices.clone();
                out.push(*value);
                out
            }
            Self::Qualified { mark, operand } => vec![*mark, *operand],
            Self::Allocator { operand } => vec![*operand],
            Self::Parenthesized { inner } => vec![*inner],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Binary { .. } => "Binary",
            Self::Unary { .. } => "Unary",
            Self::Literal(_) => "Literal",
            Self::Membership { .. } => "Membership",
            Self::Aggregate { .. } => "Aggregate",
            Self::Association { .. } => "Association",
            Self::Others => "Others",
            Self::Qualified { .. } => "Qualified",
            Self::Allocator { .. } => "Allocator",
            Self::Parenthesized { .. } => "Parenthesized",
        }
    }
}
