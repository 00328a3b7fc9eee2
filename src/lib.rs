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

//! A lexer, Pratt-style recursive-descent parser, and AST for Microsoft SQL
//! Server's T-SQL dialect.
//!
//! ```
//! use tsqlparser::dialect::MsSqlDialect;
//! use tsqlparser::parser::parse;
//!
//! let dialect = MsSqlDialect::default();
//! let result = parse(&dialect, "SELECT TOP (1) * FROM dbo.Orders WHERE Id = @Id;");
//! assert!(result.errors.is_empty());
//! assert_eq!(result.program.len(), 1);
//! ```
//!
//! The crate never fails a whole buffer on one bad statement: [`parser::parse`]
//! collects lexer and parser diagnostics and resyncs to the next statement
//! boundary, returning as much of the [`ast::Program`] as it could recover
//! (spec.md §4.2, §7).

pub mod ast;
pub mod dialect;
pub mod parser;
pub mod tokenizer;

/// Shared assertion helpers (`verified_stmt`, `verified_expr`, ...) used by
/// this crate's own tests and by `tests/`. Public so integration tests can
/// reach it the same way unit tests do, the way the teacher crate exposes it.
pub mod test_utils;
