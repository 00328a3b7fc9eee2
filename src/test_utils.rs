// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Shared test helpers. The teacher crate runs every test input against a
//! set of dialects; this crate parses exactly one (spec.md §1), so
//! [`TestDialect`] collapses that machinery down to a single dialect wrapper
//! that still reads the way `TestedDialects::verified_stmt` does.

use crate::ast::{Expr, Program, Statement};
use crate::dialect::{Dialect, MsSqlDialect};
use crate::parser::{parse, ParseResult, Parser, ParserError};

/// Parses `sql` and asserts it produced no lexer/parser diagnostics.
pub fn parse_sql(dialect: &dyn Dialect, sql: &str) -> Program {
    let ParseResult { program, errors } = parse(dialect, sql);
    assert!(errors.is_empty(), "unexpected parse errors for {sql:?}: {errors:?}");
    program
}

/// A thin wrapper around a single [`Dialect`] that mirrors the teacher's
/// `TestedDialects` API (`verified_stmt`, `verified_expr`, ...) one dialect
/// at a time instead of fanning the assertion out across several.
pub struct TestDialect {
    dialect: Box<dyn Dialect>,
}

impl TestDialect {
    pub fn new(dialect: impl Dialect + 'static) -> Self {
        TestDialect { dialect: Box::new(dialect) }
    }

    /// Parses `sql`, asserts there is exactly one statement and no
    /// diagnostics, and asserts that re-rendering it reproduces `sql`
    /// (spec.md §3.2's round-trip invariant). Returns the parsed statement.
    pub fn verified_stmt(&self, sql: &str) -> Statement {
        let program = parse_sql(self.dialect.as_ref(), sql);
        assert_eq!(program.len(), 1, "expected exactly one statement in {sql:?}");
        let stmt = program.into_iter().next().unwrap();
        assert_eq!(stmt.to_string(), sql, "round-trip mismatch for {sql:?}");
        stmt
    }

    /// Like [`Self::verified_stmt`], but allows the rendered form to differ
    /// from the input (e.g. normalized whitespace/casing) as long as it
    /// equals `canonical`.
    pub fn one_statement_parses_to(&self, sql: &str, canonical: &str) -> Statement {
        let program = parse_sql(self.dialect.as_ref(), sql);
        assert_eq!(program.len(), 1, "expected exactly one statement in {sql:?}");
        let stmt = program.into_iter().next().unwrap();
        if !canonical.is_empty() {
            assert_eq!(stmt.to_string(), canonical);
        }
        stmt
    }

    /// Parses `sql` as a standalone expression and asserts it re-renders to
    /// the same text.
    pub fn verified_expr(&self, sql: &str) -> Expr {
        let mut parser = Parser::new(self.dialect.as_ref(), tokenize(self.dialect.as_ref(), sql));
        let expr = parser.parse_expr().unwrap_or_else(|e| panic!("failed to parse {sql:?}: {e}"));
        assert_eq!(expr.to_string(), sql, "round-trip mismatch for {sql:?}");
        expr
    }

    /// Parses `sql` and returns the collected parser errors without
    /// asserting on them, for tests that want to inspect a diagnostic.
    pub fn parse_sql_statements(&self, sql: &str) -> Result<Program, Vec<ParserError>> {
        let ParseResult { program, errors } = parse(self.dialect.as_ref(), sql);
        if errors.is_empty() {
            Ok(program)
        } else {
            Err(errors)
        }
    }
}

fn tokenize(dialect: &dyn Dialect, sql: &str) -> Vec<crate::tokenizer::TokenWithLocation> {
    let mut tokenizer = crate::tokenizer::Tokenizer::new(dialect, sql);
    let (tokens, errors) = tokenizer.tokenize();
    assert!(errors.is_empty(), "unexpected tokenizer errors for {sql:?}: {errors:?}");
    tokens
}

/// The dialect every test in this crate runs against.
pub fn tsql() -> TestDialect {
    TestDialect::new(MsSqlDialect::default())
}
