//! Statement nodes

use crate::base::{Name, NodeId};

use super::ast::DefiningName;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoopScheme {
    Plain,
    /// `while CONDITION`
    While(NodeId),
    /// `for I in [reverse] RANGE`
    For {
        param: DefiningName,
        reverse: bool,
        range: NodeId,
    },
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stmt {
    Null,
    Assignment {
        target: NodeId,
        value: NodeId,
    },
    /// Procedure call, possibly without arguments
    Call {
        name: NodeId,
    },
    If {
        branches: Vec<NodeId>,
        else_statements: Vec<NodeId>,
    },
    /// One `if`/`elsif` arm
    Conditional {
        condition: NodeId,
        statements: Vec<NodeId>,
    },
    Case {
        selector: NodeId,
        alternatives: Vec<NodeId>,
    },
    CaseAlternative {
        choices: Vec<NodeId>,
        statements: Vec<NodeId>,
    },
    Loop {
        label: Option<DefiningName>,
        scheme: LoopScheme,
        statements: Vec<NodeId>,
        end_name: Option<Name>,
    },
    Exit {
        target: Option<NodeId>,
        condition: Option<NodeId>,
    },
    Return {
        value: Option<NodeId>,
    },
    Raise {
        exception: Option<NodeId>,
    },
    Goto {
        target: NodeId,
    },
    Block {
        label: Option<DefiningName>,
        decls: Vec<NodeId>,
        body: NodeId,
        end_name: Option<Name>,
    },
    /// Statements with optional exception handlers
    Handled {
        statements: Vec<NodeId>,
        handlers: Vec<NodeId>,
    },
    /// `when E1 | E2 => ...`
    Handler {
        choices: Vec<NodeId>,
        statements: Vec<NodeId>,
    },
    /// `<<L>> statement`
    Labeled {
        labels: Vec<DefiningName>,
        statement: NodeId,
    },
}

impl Stmt {
    pub fn children(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        match self {
            Self::Null => {}
            Self::Assignment { target, value } => {
                out.push(*target);
                out.push(*value);
            }
            Self::Call { name } => out.push(*name),
            Self::If {
                branches,
                else_statements,
            } => {
                out.extend(branches);
                out.extend(else_statements);
            }
            Self::Conditional {
                condition,
                statements,
            } => {
                out.push(*condition);
                out.extend(statements);
            }
            Self::Case {
                selector,
                alternatives,
            } => {
                out.push(*selector);
                out.extend(alternatives);
            }
            Self::CaseAlternative {
                choices,
                statements,
            }
            | Self::Handler {
                choices,
                statements,
            } => {
                out.extend(choices);
                out.extend(statements);
            }
            Self::Loop {
                scheme, statements, ..
            } => {
                match scheme {
                    LoopScheme::Plain => {}
                    LoopScheme::While(condition) => out.push(*condition),
                    LoopScheme::For { range, .. } => out.push(*range),
                }
                out.extend(statements);
            }
            Self::Exit { target, condition } => {
                out.extend(*target);
                out.extend(*condition);
            }
            Self::Return { value } => out.extend(*value),
            Self::Raise { exception } => out.extend(*exception),
            Self::Goto { target } => out.push(*target),
            Self::Block { decls, body, .. } => {
                out.extend(decls);
                out.push(*body);
            }
            Self::Handled {
                statements,
                handlers,
            } => {
                out.extend(statements);
                out.extend(handlers);
            }
            Self::Labeled { statement, .. } => out.push(*statement),
        }
        out
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Null => "NullStmt",
            Self::Assignment { .. } => "Assignment",
            Self::Call { .. } => "CallStmt",
            Self::If { .. } => "If",
            Self::Conditional { .. } => "Conditional",
            Self::Case { .. } => "Case",
            Self::CaseAlternative { .. } => "CaseAlternative",
            Self::Loop { .. } => "Loop",
            Self::Exit { .. } => "Exit",
            Self::Return { .. } => "Return",
            Self::Raise { .. } => "Raise",
            Self::Goto { .. } => "Goto",
            Self::Block { .. } => "Block",
            Self::Handled { .. } => "Handled",
            Self::Handler { .. } => "Handler",
            Self::Labeled { .. } => "Labeled",
        }
    }
}
