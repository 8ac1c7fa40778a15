//! Expression parsing
//!
//! Precedence, lowest first:
//! 1. logical operators (`and`, `and then`, `or`, `or else`, `xor`)
//! 2. relational operators and membership tests
//! 3. binary adding operators, with an optional leading sign
//! 4. multiplying operators
//! 5. `**`, `abs`, `not`
//!
//! Different logical operators may not be chained without parentheses;
//! the expression is still built and the mix is reported.

use text_size::{TextRange, TextSize};

use super::{names, types};
use crate::base::NodeId;
use crate::parser::errors::{Diagnostic, ErrorCode};
use crate::parser::parser::{Parser, RuleResult};
use crate::parser::syntax_kind::SyntaxKind;
use crate::syntax::{BinaryOp, Expr, Literal, LiteralKind, NodeKind, UnaryOp};

/// Expression = Relation { LogicalOperator Relation }
pub(crate) fn expression(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    p.nested(|p| {
        let start = p.start();
        let Some(lhs) = relation(p)? else {
            return Ok(None);
        };
        logical_chain(p, start, lhs)
    })
}

/// Continue an expression whose first simple expression is already parsed
fn expression_from(p: &mut Parser<'_>, start: TextSize, operand: NodeId) -> RuleResult<NodeId> {
    let Some(lhs) = relation_tail(p, start, operand)? else {
        return Ok(None);
    };
    logical_chain(p, start, lhs)
}

fn logical_chain(p: &mut Parser<'_>, start: TextSize, mut lhs: NodeId) -> RuleResult<NodeId> {
    let mut chain: Option<BinaryOp> = None;
    let mut reported = false;
    while let Some((op, width)) = logical_operator(p) {
        let op_start = p.start();
        for _ in 0..width {
            p.bump()?;
        }
        let op_range = p.range_from(op_start);
        match chain {
            Some(first) if first != op && !reported => {
                mixed_operators(p, first, op, op_range);
                reported = true;
            }
            None => chain = Some(op),
            _ => {}
        }
        let Some(rhs) = relation(p)? else {
            return Ok(None);
        };
        lhs = p.alloc(start, NodeKind::Expr(Expr::Binary { op, lhs, rhs }));
    }
    Ok(Some(lhs))
}

fn mixed_operators(p: &mut Parser<'_>, first: BinaryOp, op: BinaryOp, range: TextRange) {
    p.report(
        Diagnostic::new(
            format!(
                "'{}' cannot follow '{}' in the same expression",
                op.as_str(),
                first.as_str()
            ),
            range,
            ErrorCode::E0403,
        )
        .with_hint("add parentheses to make the grouping explicit"),
    );
}

fn logical_operator(p: &Parser<'_>) -> Option<(BinaryOp, usize)> {
    match p.current_kind() {
        SyntaxKind::AND_KW if p.nth(1) == SyntaxKind::THEN_KW => Some((BinaryOp::AndThen, 2)),
        SyntaxKind::AND_KW => Some((BinaryOp::And, 1)),
        SyntaxKind::OR_KW if p.nth(1) == SyntaxKind::ELSE_KW => Some((BinaryOp::OrElse, 2)),
        SyntaxKind::OR_KW => Some((BinaryOp::Or, 1)),
        SyntaxKind::XOR_KW => Some((BinaryOp::Xor, 1)),
        _ => None,
    }
}

/// Relation = SimpleExpression [RelationalOperator SimpleExpression]
///          | SimpleExpression ['not'] 'in' (Range | TypeMark)
fn relation(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let Some(lhs) = simple_expression(p)? else {
        return Ok(None);
    };
    relation_tail(p, start, lhs)
}

fn relation_tail(p: &mut Parser<'_>, start: TextSize, lhs: NodeId) -> RuleResult<NodeId> {
    if let Some(op) = relational_operator(p.current_kind()) {
        p.bump()?;
        let Some(rhs) = simple_expression(p)? else {
            return Ok(None);
        };
        return Ok(Some(p.alloc(start, NodeKind::Expr(Expr::Binary { op, lhs, rhs }))));
    }
    let membership = p.at(SyntaxKind::IN_KW)
        || (p.at(SyntaxKind::NOT_KW) && p.nth(1) == SyntaxKind::IN_KW);
    if !membership {
        return Ok(Some(lhs));
    }
    let negated = p.eat(SyntaxKind::NOT_KW)?;
    p.bump()?;
    let Some(target) = membership_target(p)? else {
        return Ok(None);
    };
    let node = Expr::Membership {
        operand: lhs,
        negated,
        target,
    };
    Ok(Some(p.alloc(start, NodeKind::Expr(node))))
}

fn membership_target(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    if let Some(range) = p.attempt(types::range)? {
        return Ok(Some(range));
    }
    Ok(names::type_mark(p)?.map(|(mark, _)| mark))
}

fn relational_operator(kind: SyntaxKind) -> Option<BinaryOp> {
    match kind {
        SyntaxKind::EQ => Some(BinaryOp::Eq),
        SyntaxKind::SLASH_EQ => Some(BinaryOp::Ne),
        SyntaxKind::LT => Some(BinaryOp::Lt),
        SyntaxKind::LT_EQ => Some(BinaryOp::Le),
        SyntaxKind::GT => Some(BinaryOp::Gt),
        SyntaxKind::GT_EQ => Some(BinaryOp::Ge),
        _ => None,
    }
}

/// SimpleExpression = ['+' | '-'] Term { ('+' | '-' | '&') Term }
pub(crate) fn simple_expression(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let sign = match p.current_kind() {
        SyntaxKind::PLUS => Some(UnaryOp::Plus),
        SyntaxKind::MINUS => Some(UnaryOp::Minus),
        _ => None,
    };
    if sign.is_some() {
        p.bump()?;
    }
    let Some(mut lhs) = term(p)? else {
        return Ok(None);
    };
    if let Some(op) = sign {
        lhs = p.alloc(start, NodeKind::Expr(Expr::Unary { op, operand: lhs }));
    }
    loop {
        let op = match p.current_kind() {
            SyntaxKind::PLUS => BinaryOp::Add,
            SyntaxKind::MINUS => BinaryOp::Sub,
            SyntaxKind::AMP => BinaryOp::Concat,
            _ => break,
        };
        p.bump()?;
        let Some(rhs) = term(p)? else {
            return Ok(None);
        };
        lhs = p.alloc(start, NodeKind::Expr(Expr::Binary { op, lhs, rhs }));
    }
    Ok(Some(lhs))
}

/// Term = Factor { ('*' | '/' | 'mod' | 'rem') Factor }
fn term(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let Some(mut lhs) = factor(p)? else {
        return Ok(None);
    };
    loop {
        let op = match p.current_kind() {
            SyntaxKind::STAR => BinaryOp::Mul,
            SyntaxKind::SLASH => BinaryOp::Div,
            SyntaxKind::MOD_KW => BinaryOp::Mod,
            SyntaxKind::REM_KW => BinaryOp::Rem,
            _ => break,
        };
        p.bump()?;
        let Some(rhs) = factor(p)? else {
            return Ok(None);
        };
        lhs = p.alloc(start, NodeKind::Expr(Expr::Binary { op, lhs, rhs }));
    }
    Ok(Some(lhs))
}

/// Factor = Primary ['**' Primary] | 'abs' Primary | 'not' Primary
fn factor(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let prefix = match p.current_kind() {
        SyntaxKind::ABS_KW => Some(UnaryOp::Abs),
        SyntaxKind::NOT_KW => Some(UnaryOp::Not),
        _ => None,
    };
    if let Some(op) = prefix {
        p.bump()?;
        let Some(operand) = primary(p)? else {
            return Ok(None);
        };
        return Ok(Some(p.alloc(start, NodeKind::Expr(Expr::Unary { op, operand }))));
    }
    let Some(lhs) = primary(p)? else {
        return Ok(None);
    };
    if !p.eat(SyntaxKind::STAR_STAR)? {
        return Ok(Some(lhs));
    }
    let Some(rhs) = primary(p)? else {
        return Ok(None);
    };
    let node = Expr::Binary {
        op: BinaryOp::Pow,
        lhs,
        rhs,
    };
    Ok(Some(p.alloc(start, NodeKind::Expr(node))))
}

/// Primary = NumericLiteral | 'null' | StringLiteral | CharacterLiteral
///         | Aggregate | '(' Expression ')' | Allocator | Name | QualifiedExpression
fn primary(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    match p.current_kind() {
        SyntaxKind::INTEGER_LITERAL => literal(p, LiteralKind::Integer),
        SyntaxKind::REAL_LITERAL => literal(p, LiteralKind::Real),
        SyntaxKind::CHAR_LITERAL => literal(p, LiteralKind::Character),
        SyntaxKind::NULL_KW => literal(p, LiteralKind::Null),
        // An operator symbol followed by actuals is a call, `"+"(A, B)`
        SyntaxKind::STRING_LITERAL if p.nth(1) != SyntaxKind::L_PAREN => {
            literal(p, LiteralKind::String)
        }
        SyntaxKind::NEW_KW => allocator(p),
        SyntaxKind::L_PAREN => aggregate(p),
        SyntaxKind::IDENT | SyntaxKind::STRING_LITERAL => name_or_qualified(p),
        _ => p.mismatch("an expression"),
    }
}

fn literal(p: &mut Parser<'_>, kind: LiteralKind) -> RuleResult<NodeId> {
    let start = p.start();
    let token = p.bump()?;
    let literal = Literal::new(kind, token.text);
    Ok(Some(p.alloc(start, NodeKind::Expr(Expr::Literal(literal)))))
}

fn name_or_qualified(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let Some(name) = names::name(p)? else {
        return Ok(None);
    };
    if !(p.at(SyntaxKind::TICK) && p.nth(1) == SyntaxKind::L_PAREN) {
        return Ok(Some(name));
    }
    p.bump()?;
    let Some(operand) = aggregate(p)? else {
        return Ok(None);
    };
    Ok(Some(p.alloc(start, NodeKind::Expr(Expr::Qualified { mark: name, operand }))))
}

/// QualifiedExpression = TypeMark ''' Aggregate
fn qualified_expression(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let Some((mark, _)) = names::type_mark(p)? else {
        return Ok(None);
    };
    if p.expect_alt(SyntaxKind::TICK)?.is_none() {
        return Ok(None);
    }
    if !p.at(SyntaxKind::L_PAREN) {
        return p.mismatch("'('");
    }
    let Some(operand) = aggregate(p)? else {
        return Ok(None);
    };
    Ok(Some(p.alloc(start, NodeKind::Expr(Expr::Qualified { mark, operand }))))
}

/// Allocator = 'new' SubtypeIndication | 'new' QualifiedExpression
fn allocator(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    p.bump()?;
    let operand = match p.attempt(qualified_expression)? {
        Some(qualified) => qualified,
        None => {
            let Some(indication) = types::subtype_indication(p)? else {
                return Ok(None);
            };
            indication
        }
    };
    Ok(Some(p.alloc(start, NodeKind::Expr(Expr::Allocator { operand }))))
}

/// Aggregate = '(' ComponentAssociation { ',' ComponentAssociation } ')'
///
/// A single positional component is a parenthesized expression.
pub(crate) fn aggregate(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let Some(components) = association_group(p)? else {
        return Ok(None);
    };
    let single = match components.as_slice() {
        [only] if !matches!(p.ast.as_expr(*only), Some(Expr::Association { .. })) => Some(*only),
        _ => None,
    };
    let node = match single {
        Some(inner) => Expr::Parenthesized { inner },
        None => Expr::Aggregate { components },
    };
    Ok(Some(p.alloc(start, NodeKind::Expr(node))))
}

/// ActualParameterPart = '(' Association { ',' Association } ')'
pub(crate) fn actual_parameter_part(p: &mut Parser<'_>) -> RuleResult<Vec<NodeId>> {
    association_group(p)
}

fn association_group(p: &mut Parser<'_>) -> RuleResult<Vec<NodeId>> {
    if p.expect(SyntaxKind::L_PAREN)?.is_none() {
        return Ok(None);
    }
    let mut items = Vec::new();
    loop {
        let Some(item) = association(p)? else {
            return Ok(None);
        };
        items.push(item);
        if !p.eat(SyntaxKind::COMMA)? {
            break;
        }
    }
    if p.expect(SyntaxKind::R_PAREN)?.is_none() {
        return Ok(None);
    }
    Ok(Some(items))
}

/// '(' Expression { ',' Expression } ')'
pub(crate) fn expression_list(p: &mut Parser<'_>) -> RuleResult<Vec<NodeId>> {
    if p.expect(SyntaxKind::L_PAREN)?.is_none() {
        return Ok(None);
    }
    let mut items = Vec::new();
    loop {
        let Some(item) = expression(p)? else {
            return Ok(None);
        };
        items.push(item);
        if !p.eat(SyntaxKind::COMMA)? {
            break;
        }
    }
    if p.expect(SyntaxKind::R_PAREN)?.is_none() {
        return Ok(None);
    }
    Ok(Some(items))
}

/// Association = [Choice { '|' Choice } '=>'] Expression
pub(crate) fn association(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    if p.ahead_in_group(0, &[SyntaxKind::FAT_ARROW]) {
        if let Some(named) = p.attempt(named_association)? {
            return Ok(Some(named));
        }
    }
    expression(p)
}

fn named_association(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    let start = p.start();
    let Some(choices) = choice_list(p)? else {
        return Ok(None);
    };
    if p.expect_alt(SyntaxKind::FAT_ARROW)?.is_none() {
        return Ok(None);
    }
    let Some(value) = expression(p)? else {
        return Ok(None);
    };
    Ok(Some(p.alloc(start, NodeKind::Expr(Expr::Association { choices, value }))))
}

/// Choice { '|' Choice }
pub(crate) fn choice_list(p: &mut Parser<'_>) -> RuleResult<Vec<NodeId>> {
    let mut choices = Vec::new();
    loop {
        let Some(choice) = choice(p)? else {
            return Ok(None);
        };
        choices.push(choice);
        if !p.eat(SyntaxKind::BAR)? {
            break;
        }
    }
    Ok(Some(choices))
}

/// Choice = 'others' | DiscreteRange | Expression
///
/// Apart from a leading type mark, the first simple expression is parsed
/// once and the token after it decides between a range and an expression.
fn choice(p: &mut Parser<'_>) -> RuleResult<NodeId> {
    p.nested(|p| {
        let start = p.start();
        if p.eat(SyntaxKind::OTHERS_KW)? {
            return Ok(Some(p.alloc(start, NodeKind::Expr(Expr::Others))));
        }
        if names::lookahead_class(p).is_type_mark() {
            if let Some(indication) = p.attempt(types::discrete_subtype_indication)? {
                return Ok(Some(indication));
            }
        }
        let Some(operand) = simple_expression(p)? else {
            return Ok(None);
        };
        if p.at(SyntaxKind::DOT_DOT) {
            return types::range_tail(p, start, operand);
        }
        expression_from(p, start, operand)
    })
}
