//! Statements
//!
//! Loop and block labels are declared as symbols in the enclosing region
//! and own the region the loop or block opens, which is how `exit` finds
//! the loop it names.

use text_size::TextSize;

use super::{declarations, expressions, names, types};
use crate::base::{NodeId, SymbolId};
use crate::parser::errors::{ErrorCode, ParseContext, ParseError};
use crate::parser::parser::{Parser, RuleResult};
use crate::parser::rule_parser::Rule;
use crate::parser::syntax_kind::SyntaxKind;
use crate::semantic::{RegionKind, Symbol, SymbolKind};
use crate::syntax::{DefiningName, Expr, LoopScheme, NodeKind, Stmt};

/// SequenceOfStatements = Statement { Statement }
pub(crate) fn sequence_of_statements(p: &mut Parser<'_>) -> Result<Vec<NodeId>, ParseError> {
    p.recover_list(
        ParseContext::StatementSequence,
        ErrorCode::UNRECOGNIZED_STATEMENT,
        statement,
    )
}

/// HandledStatements = SequenceOfStatements ['exception' Handler { Handler }]
pub(crate) fn handled_statements(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let statements = sequence_of_statements(p)?;
    let mut handlers = Vec::new();
    if p.eat(SyntaxKind::EXCEPTION_KW)? {
        while p.at(SyntaxKind::WHEN_KW) {
            let Some(handler) = exception_handler(p)? else {
                return Ok(None);
            };
            handlers.push(handler);
        }
    }
    let node = Stmt::Handled {
        statements,
        handlers,
    };
    Ok(Some(p.alloc(start, NodeKind::Stmt(node))))
}

/// Handler = 'when' ExceptionChoice { '|' ExceptionChoice } '=>' SequenceOfStatements
fn exception_handler(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    p.bump()?;
    let mut choices = Vec::new();
    loop {
        let choice_start = p.start();
        let choice = if p.eat(SyntaxKind::OTHERS_KW)? {
            p.alloc(choice_start, NodeKind::Expr(Expr::Others))
        } else {
            let Some(name) = names::expanded_name(p)? else {
                return Ok(None);
            };
            name
        };
        choices.push(choice);
        if !p.eat(SyntaxKind::BAR)? {
            break;
        }
    }
    if p.expect(SyntaxKind::FAT_ARROW)?.is_none() {
        return Ok(None);
    }
    let statements = sequence_of_statements(p)?;
    let node = Stmt::Handler {
        choices,
        statements,
    };
    Ok(Some(p.alloc(start, NodeKind::Stmt(node))))
}

/// Statement = { '<<' Identifier '>>' } UnlabeledStatement
pub(crate) fn statement(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    p.nested(|p| {
        if !p.at(SyntaxKind::LT_LT) {
            return unlabeled_statement(p);
        }
        let start = p.start();
        let node = p.reserve_node(start);
        let mut labels = Vec::new();
        while p.eat(SyntaxKind::LT_LT)? {
            let Some(label) = p.defining_identifier()? else {
                return Ok(None);
            };
            if p.expect(SyntaxKind::GT_GT)?.is_none() {
                return Ok(None);
            }
            let symbol = Symbol::new(label.name.clone(), SymbolKind::Label, label.range);
            p.declare(symbol.with_node(node));
            labels.push(label);
        }
        let Some(statement) = unlabeled_statement(p)? else {
            return Ok(None);
        };
        p.fill(node, start, NodeKind::Stmt(Stmt::Labeled { labels, statement }))?;
        Ok(Some(node))
    })
}

fn unlabeled_statement(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    match p.current_kind() {
        SyntaxKind::NULL_KW => null_statement(p),
        SyntaxKind::IF_KW => if_statement(p),
        SyntaxKind::CASE_KW => case_statement(p),
        SyntaxKind::LOOP_KW | SyntaxKind::WHILE_KW | SyntaxKind::FOR_KW => {
            let start = p.start();
            let node = p.reserve_node(start);
            loop_statement(p, start, node, None)
        }
        SyntaxKind::DECLARE_KW | SyntaxKind::BEGIN_KW => {
            let start = p.start();
            let node = p.reserve_node(start);
            block_statement(p, start, node, None)
        }
        SyntaxKind::EXIT_KW => exit_statement(p),
        SyntaxKind::RETURN_KW => return_statement(p),
        SyntaxKind::RAISE_KW => raise_statement(p),
        SyntaxKind::GOTO_KW => goto_statement(p),
        SyntaxKind::PRAGMA_KW => declarations::pragma(p),
        SyntaxKind::IDENT if p.nth(1) == SyntaxKind::COLON => named_compound(p),
        _ => p.first_of(&[Rule::Assignment, Rule::ProcedureCall]),
    }
}

/// 'null' ';'
fn null_statement(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    p.bump()?;
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }
    Ok(Some(p.alloc(start, NodeKind::Stmt(Stmt::Null))))
}

/// Assignment = Name ':=' Expression ';'
pub(crate) fn assignment(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let Some(target) = names::name(p)? else {
        return Ok(None);
    };
    if p.expect_alt(SyntaxKind::COLON_EQ)?.is_none() {
        return Ok(None);
    }
    let Some(value) = expressions::expression(p)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }
    Ok(Some(p.alloc(start, NodeKind::Stmt(Stmt::Assignment { target, value }))))
}

/// ProcedureCall = Name ';'
pub(crate) fn procedure_call(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let Some(name) = names::name(p)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }
    Ok(Some(p.alloc(start, NodeKind::Stmt(Stmt::Call { name }))))
}

/// IfStatement = 'if' Condition 'then' SequenceOfStatements
///     { 'elsif' Condition 'then' SequenceOfStatements }
///     ['else' SequenceOfStatements] 'end' 'if' ';'
fn if_statement(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let mut branches = Vec::new();
    loop {
        let branch_start = p.start();
        p.bump()?;
        let Some(condition) = expressions::expression(p)? else {
            return Ok(None);
        };
        if p.expect(SyntaxKind::THEN_KW)?.is_none() {
            return Ok(None);
        }
        let statements = sequence_of_statements(p)?;
        let branch = Stmt::Conditional {
            condition,
            statements,
        };
        branches.push(p.alloc(branch_start, NodeKind::Stmt(branch)));
        if !p.at(SyntaxKind::ELSIF_KW) {
            break;
        }
    }
    let else_statements = if p.eat(SyntaxKind::ELSE_KW)? {
        sequence_of_statements(p)?
    } else {
        Vec::new()
    };
    if !end_construct(p, SyntaxKind::IF_KW)? {
        return Ok(None);
    }
    let node = Stmt::If {
        branches,
        else_statements,
    };
    Ok(Some(p.alloc(start, NodeKind::Stmt(node))))
}

/// CaseStatement = 'case' Expression 'is' Alternative { Alternative } 'end' 'case' ';'
fn case_statement(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    p.bump()?;
    let Some(selector) = expressions::expression(p)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::IS_KW)?.is_none() {
        return Ok(None);
    }
    let mut alternatives = Vec::new();
    while p.at(SyntaxKind::WHEN_KW) {
        let alt_start = p.start();
        p.bump()?;
        let Some(choices) = expressions::choice_list(p)? else {
            return Ok(None);
        };
        if p.expect(SyntaxKind::FAT_ARROW)?.is_none() {
            return Ok(None);
        }
        let statements = sequence_of_statements(p)?;
        let alternative = Stmt::CaseAlternative {
            choices,
            statements,
        };
        alternatives.push(p.alloc(alt_start, NodeKind::Stmt(alternative)));
    }
    if !end_construct(p, SyntaxKind::CASE_KW)? {
        return Ok(None);
    }
    let node = Stmt::Case {
        selector,
        alternatives,
    };
    Ok(Some(p.alloc(start, NodeKind::Stmt(node))))
}

/// 'end' `keyword` ';'
fn end_construct(p: &mut Parser<'_>, keyword: SyntaxKind) -> Result<bool, ParseError> {
    Ok(p.expect(SyntaxKind::END_KW)?.is_some()
        && p.expect(keyword)?.is_some()
        && p.expect(SyntaxKind::SEMICOLON)?.is_some())
}

/// Identifier ':' (LoopStatement | BlockStatement)
fn named_compound(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let Some(label) = p.defining_identifier()? else {
        return Ok(None);
    };
    p.bump()?;
    let node = p.reserve_node(start);
    let symbol = Symbol::new(label.name.clone(), SymbolKind::Label, label.range);
    let symbol = p.declare(symbol.with_node(node));
    let label = Some((label, symbol));
    match p.current_kind() {
        SyntaxKind::LOOP_KW | SyntaxKind::WHILE_KW | SyntaxKind::FOR_KW => {
            loop_statement(p, start, node, label)
        }
        SyntaxKind::DECLARE_KW | SyntaxKind::BEGIN_KW => block_statement(p, start, node, label),
        _ => p.mismatch("a loop or block statement"),
    }
}

/// LoopStatement = [IterationScheme] 'loop' SequenceOfStatements 'end' 'loop' [Identifier] ';'
///
/// IterationScheme = 'while' Condition | 'for' Identifier 'in' ['reverse'] DiscreteRange
fn loop_statement(
    p: &mut Parser<'_>,
    start: TextSize,
    node: NodeId,
    label: Option<(DefiningName, SymbolId)>,
) -> RuleResult<NodeId> {
    let scheme = match p.current_kind() {
        SyntaxKind::WHILE_KW => {
            p.bump()?;
            let Some(condition) = expressions::expression(p)? else {
                return Ok(None);
            };
            LoopScheme::While(condition)
        }
        SyntaxKind::FOR_KW => {
            p.bump()?;
            let Some(param) = p.defining_identifier()? else {
                return Ok(None);
            };
            if p.expect(SyntaxKind::IN_KW)?.is_none() {
                return Ok(None);
            }
            let reverse = p.eat(SyntaxKind::REVERSE_KW)?;
            let Some(range) = types::discrete_range(p, true)? else {
                return Ok(None);
            };
            LoopScheme::For {
                param,
                reverse,
                range,
            }
        }
        _ => LoopScheme::Plain,
    };

    p.symbols.push(RegionKind::Loop, label.as_ref().map(|(_, symbol)| *symbol));
    if let LoopScheme::For { param, .. } = &scheme {
        let symbol = Symbol::new(param.name.clone(), SymbolKind::LoopParameter, param.range)
            .with_node(node);
        p.declare(symbol);
    }
    if p.expect(SyntaxKind::LOOP_KW)?.is_none() {
        return Ok(None);
    }
    let statements = sequence_of_statements(p)?;
    if p.expect(SyntaxKind::END_KW)?.is_none() || p.expect(SyntaxKind::LOOP_KW)?.is_none() {
        return Ok(None);
    }
    let end_name = match &label {
        Some((name, _)) => p.end_designator(&name.name)?,
        None => None,
    };
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }
    p.symbols.pop();

    let stmt = Stmt::Loop {
        label: label.map(|(name, _)| name),
        scheme,
        statements,
        end_name,
    };
    p.fill(node, start, NodeKind::Stmt(stmt))?;
    Ok(Some(node))
}

/// BlockStatement = ['declare' DeclarativePart] 'begin' HandledStatements 'end' [Identifier] ';'
fn block_statement(
    p: &mut Parser<'_>,
    start: TextSize,
    node: NodeId,
    label: Option<(DefiningName, SymbolId)>,
) -> RuleResult<NodeId> {
    p.symbols.push(RegionKind::Block, label.as_ref().map(|(_, symbol)| *symbol));
    let decls = if p.eat(SyntaxKind::DECLARE_KW)? {
        declarations::declarative_part(p)?
    } else {
        Vec::new()
    };
    if p.expect(SyntaxKind::BEGIN_KW)?.is_none() {
        return Ok(None);
    }
    let Some(body) = handled_statements(p)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::END_KW)?.is_none() {
        return Ok(None);
    }
    let end_name = match &label {
        Some((name, _)) => p.end_designator(&name.name)?,
        None => None,
    };
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }
    p.symbols.pop();

    let stmt = Stmt::Block {
        label: label.map(|(name, _)| name),
        decls,
        body,
        end_name,
    };
    p.fill(node, start, NodeKind::Stmt(stmt))?;
    Ok(Some(node))
}

/// ExitStatement = 'exit' [Name] ['when' Condition] ';'
///
/// An `exit` must be inside a loop of the same body, and a named `exit`
/// must name one of the enclosing loops.
fn exit_statement(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    p.bump()?;
    let target = if p.at(SyntaxKind::IDENT) {
        let Some(target) = names::expanded_name(p)? else {
            return Ok(None);
        };
        Some(target)
    } else {
        None
    };
    let condition = if p.eat(SyntaxKind::WHEN_KW)? {
        let Some(condition) = expressions::expression(p)? else {
            return Ok(None);
        };
        Some(condition)
    } else {
        None
    };
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }
    let node = p.alloc(start, NodeKind::Stmt(Stmt::Exit { target, condition }));
    check_exit(p, node, target);
    Ok(Some(node))
}

fn check_exit(p: &mut Parser<'_>, node: NodeId, target: Option<NodeId>) {
    if !p.symbols.enclosing_loop(None) {
        let range = p.ast.range(node);
        p.note(ErrorCode::E0602, "exit statement outside of a loop", range);
        return;
    }
    let Some(target) = target else {
        return;
    };
    let named = match names::classify(p, target) {
        (Some(id), SymbolKind::Label) => p.symbols.enclosing_loop(Some(id)),
        _ => false,
    };
    if !named {
        let range = p.ast.range(target);
        let message = format!(
            "'{}' is not the label of an enclosing loop",
            names::text_of(p, target)
        );
        p.note(ErrorCode::E0603, message, range);
    }
}

/// ReturnStatement = 'return' [Expression] ';'
fn return_statement(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    p.bump()?;
    let value = if p.at(SyntaxKind::SEMICOLON) {
        None
    } else {
        let Some(value) = expressions::expression(p)? else {
            return Ok(None);
        };
        Some(value)
    };
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }
    Ok(Some(p.alloc(start, NodeKind::Stmt(Stmt::Return { value }))))
}

/// RaiseStatement = 'raise' [Name] ';'
fn raise_statement(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    p.bump()?;
    let exception = if p.at(SyntaxKind::IDENT) {
        let Some(exception) = names::expanded_name(p)? else {
            return Ok(None);
        };
        Some(exception)
    } else {
        None
    };
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }
    Ok(Some(p.alloc(start, NodeKind::Stmt(Stmt::Raise { exception }))))
}

/// GotoStatement = 'goto' Name ';'
fn goto_statement(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    p.bump()?;
    let Some(target) = names::expanded_name(p)? else {
        return Ok(None);
    };
    if p.expect(SyntaxKind::SEMICOLON)?.is_none() {
        return Ok(None);
    }
    Ok(Some(p.alloc(start, NodeKind::Stmt(Stmt::Goto { target }))))
}
