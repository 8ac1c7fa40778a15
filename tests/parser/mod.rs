mod tests_backtracking;
mod tests_compilation;
mod tests_declarations;
mod tests_diagnostics;
mod tests_expressions;
mod tests_statements;
mod tests_types;
