//! Rule identifiers and single-rule parsing
//!
//! [`Rule`] names the grammar rules that compete as alternatives. The parser
//! tries alternatives through [`Parser::first_of`], which dispatches on the
//! rule rather than on a closure, so every alternative can also be parsed on
//! its own with [`parse_rule`]. That is mostly useful for tests.
//!
//! # Example
//!
//! ```
//! use adafront::parser::{Rule, parse_rule};
//!
//! let result = parse_rule(Rule::ObjectDeclaration, "X : INTEGER;");
//! assert!(result.is_ok());
//! ```

use super::cursor::TokenCursor;
use super::driver::prepare_tokens;
use super::errors::{Diagnostic, ParseError};
use super::grammar::{
    compilation, declarations, expressions, generics, names, packages, statements, subprograms,
    types,
};
use super::lexer::tokenize_for_parser;
use super::options::ParseOptions;
use super::parser::{Parser, RuleResult};
use crate::base::NodeId;
use crate::semantic::{RegionKind, SymbolTable};
use crate::syntax::Ast;

/// Grammar rules that can be attempted by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    // === Declarative items ===
    /// IdentifierList ':' ['constant'] SubtypeIndication [':=' Expression] ';'
    ObjectDeclaration,
    /// IdentifierList ':' 'constant' ':=' Expression ';'
    NumberDeclaration,
    /// ... 'renames' Name ';'
    RenamingDeclaration,
    /// IdentifierList ':' 'exception' ';'
    ExceptionDeclaration,
    /// 'type' Identifier [DiscriminantPart] ['is' TypeDefinition] ';'
    TypeDeclaration,
    /// 'subtype' Identifier 'is' SubtypeIndication ';'
    SubtypeDeclaration,
    /// ('package' | 'procedure' | 'function') Designator 'is' 'new' Name [Actuals] ';'
    GenericInstantiation,
    /// ... 'is' 'separate' ';'
    BodyStub,
    /// SubprogramSpecification ';'
    SubprogramDeclaration,
    /// SubprogramSpecification 'is' DeclarativePart 'begin' ... 'end' ';'
    SubprogramBody,
    /// 'package' 'body' Identifier 'is' ... 'end' ';'
    PackageBody,
    /// 'package' Identifier 'is' ... ['private' ...] 'end' ';'
    PackageDeclaration,
    /// 'generic' { GenericFormal } (SubprogramSpecification | PackageSpecification) ';'
    GenericDeclaration,
    /// 'use' Name { ',' Name } ';'
    UseClause,
    /// 'pragma' Identifier [Arguments] ';'
    Pragma,

    // === Type definitions ===
    /// IdentifierList ':' SubtypeIndication [':=' Expression] ';'
    ComponentDeclaration,
    /// 'array' '(' TypeMark 'range' '<>' { ',' ... } ')' 'of' SubtypeIndication
    UnconstrainedArray,
    /// 'array' '(' DiscreteRange { ',' DiscreteRange } ')' 'of' SubtypeIndication
    ConstrainedArray,
    /// '(' DiscreteRange { ',' DiscreteRange } ')'
    IndexConstraint,
    /// '(' [Selector '=>'] Expression { ',' ... } ')'
    DiscriminantConstraint,

    // === Generic formals ===
    /// IdentifierList ':' Mode TypeMark [':=' Expression] ';'
    FormalObject,
    /// 'type' Identifier [DiscriminantPart] 'is' FormalTypeDefinition ';'
    FormalType,
    /// 'with' SubprogramSpecification ['is' (Name | '<>')] ';'
    FormalSubprogram,

    // === Statements ===
    /// { Label } UnlabeledStatement
    Statement,
    /// Name ':=' Expression ';'
    Assignment,
    /// Name ';'
    ProcedureCall,

    // === Fragments ===
    /// Identifier followed by selectors, arguments and attributes
    Name,
    /// Relation { LogicalOperator Relation }
    Expression,
    /// TypeMark [Constraint]
    SubtypeIndication,
    /// SubtypeIndication | Range
    DiscreteRange,
    /// SimpleExpression '..' SimpleExpression | Name ''' 'RANGE'
    Range,

    // === Units ===
    /// { ContextItem } (LibraryUnit | Subunit)
    CompilationUnit,
}

impl Rule {
    /// Alternatives of a declarative item, in priority order
    pub const DECLARATIVE_ITEMS: &'static [Rule] = &[
        Rule::ObjectDeclaration,
        Rule::NumberDeclaration,
        Rule::RenamingDeclaration,
        Rule::ExceptionDeclaration,
        Rule::TypeDeclaration,
        Rule::SubtypeDeclaration,
        Rule::GenericInstantiation,
        Rule::BodyStub,
        Rule::SubprogramDeclaration,
        Rule::SubprogramBody,
        Rule::PackageBody,
        Rule::PackageDeclaration,
        Rule::GenericDeclaration,
        Rule::UseClause,
        Rule::Pragma,
    ];

    /// Alternatives of a library unit, in priority order
    pub const LIBRARY_UNITS: &'static [Rule] = &[
        Rule::GenericDeclaration,
        Rule::GenericInstantiation,
        Rule::PackageDeclaration,
        Rule::PackageBody,
        Rule::SubprogramDeclaration,
        Rule::SubprogramBody,
    ];

    /// Alternatives of a generic formal parameter
    pub const GENERIC_FORMALS: &'static [Rule] = &[
        Rule::FormalObject,
        Rule::FormalType,
        Rule::FormalSubprogram,
        Rule::Pragma,
    ];

    /// Run the rule at the parser's current position.
    ///
    /// This does not checkpoint; use [`Parser::attempt`] or
    /// [`Parser::first_of`] for speculative parsing.
    pub fn parse(self, p: &mut Parser<'_>) -> RuleResult<NodeId> {
        match self {
            Rule::ObjectDeclaration => declarations::object_declaration(p),
            Rule::NumberDeclaration => declarations::number_declaration(p),
            Rule::RenamingDeclaration => declarations::renaming_declaration(p),
            Rule::ExceptionDeclaration => declarations::exception_declaration(p),
            Rule::TypeDeclaration => types::type_declaration(p),
            Rule::SubtypeDeclaration => declarations::subtype_declaration(p),
            Rule::GenericInstantiation => generics::generic_instantiation(p),
            Rule::BodyStub => declarations::body_stub(p),
            Rule::SubprogramDeclaration => subprograms::subprogram_declaration(p),
            Rule::SubprogramBody => subprograms::subprogram_body(p),
            Rule::PackageBody => packages::package_body(p),
            Rule::PackageDeclaration => packages::package_declaration(p),
            Rule::GenericDeclaration => generics::generic_declaration(p),
            Rule::UseClause => declarations::use_clause(p),
            Rule::Pragma => declarations::pragma(p),
            Rule::ComponentDeclaration => types::component_declaration(p),
            Rule::UnconstrainedArray => types::unconstrained_array(p),
            Rule::ConstrainedArray => types::constrained_array(p),
            Rule::IndexConstraint => types::index_constraint(p),
            Rule::DiscriminantConstraint => types::discriminant_constraint(p),
            Rule::FormalObject => generics::formal_object(p),
            Rule::FormalType => generics::formal_type(p),
            Rule::FormalSubprogram => generics::formal_subprogram(p),
            Rule::Statement => statements::statement(p),
            Rule::Assignment => statements::assignment(p),
            Rule::ProcedureCall => statements::procedure_call(p),
            Rule::Name => names::name(p),
            Rule::Expression => expressions::expression(p),
            Rule::SubtypeIndication => types::subtype_indication(p),
            Rule::DiscreteRange => types::discrete_range(p, true),
            Rule::Range => types::range(p),
            Rule::CompilationUnit => compilation::compilation_unit(p),
        }
    }
}

/// Outcome of parsing a single rule
#[derive(Debug)]
pub struct RuleParseResult {
    pub rule: Rule,
    pub ast: Ast,
    /// The rule's node, if it matched
    pub root: Option<NodeId>,
    /// Lexical and semantic diagnostics, in report order
    pub diagnostics: Vec<Diagnostic>,
    pub fatal: Option<ParseError>,
    /// Did the rule consume every token?
    pub fully_consumed: bool,
    /// Symbol table as the rule left it, with its region still open
    pub symbols: SymbolTable,
}

impl RuleParseResult {
    /// The rule matched the whole input without error diagnostics.
    pub fn is_ok(&self) -> bool {
        self.root.is_some()
            && self.fatal.is_none()
            && self.fully_consumed
            && self.errors().next().is_none()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }
}

/// Parse `input` as a single `rule` with default options.
pub fn parse_rule(rule: Rule, input: &str) -> RuleParseResult {
    parse_rule_with(rule, input, &ParseOptions::default())
}

/// Parse `input` as a single `rule`.
///
/// The rule runs inside a package region of its own, so declarations it
/// makes can be inspected through [`RuleParseResult::symbols`].
pub fn parse_rule_with(rule: Rule, input: &str, options: &ParseOptions) -> RuleParseResult {
    let (tokens, mut diagnostics) = prepare_tokens(tokenize_for_parser(input));
    let cursor = match TokenCursor::new(&tokens) {
        Ok(cursor) => cursor,
        Err(fatal) => {
            return RuleParseResult {
                rule,
                ast: Ast::new(),
                root: None,
                diagnostics,
                fatal: Some(fatal),
                fully_consumed: false,
                symbols: SymbolTable::new(),
            };
        }
    };

    let mut parser = Parser::new(cursor, options.clone());
    parser.symbols.push(RegionKind::Package, None);
    let outcome = parser.attempt(|p| rule.parse(p));
    let fully_consumed = parser.at_eof();
    let (root, fatal) = match outcome {
        Ok(root) => (root, None),
        Err(fatal) => (None, Some(fatal)),
    };
    let (ast, symbols, log) = parser.into_parts();
    diagnostics.extend(log.into_vec());
    RuleParseResult {
        rule,
        ast,
        root,
        diagnostics,
        fatal,
        fully_consumed,
        symbols,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_input_is_not_ok() {
        let result = parse_rule(Rule::Expression, "1 + 2 )");
        assert!(result.root.is_some());
        assert!(!result.fully_consumed);
        assert!(!result.is_ok());
    }

    #[test]
    fn test_fatal_end_of_stream() {
        let result = parse_rule(Rule::ObjectDeclaration, "X : INTEGER");
        assert!(matches!(result.fatal, Some(ParseError::EndOfStream { .. })));
        assert!(result.root.is_none());
    }

    #[test]
    fn test_declarative_items_are_all_dispatchable() {
        for rule in Rule::DECLARATIVE_ITEMS {
            let result = parse_rule(*rule, "");
            assert!(result.root.is_none(), "{rule:?} matched empty input");
        }
    }
}
