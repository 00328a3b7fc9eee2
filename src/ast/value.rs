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

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::tokenizer::escape_quoted_string;

/// A literal value (spec.md §3.1's "literals" token categories, lifted into
/// the AST as [`crate::ast::Expr::Value`]).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// An integer or float literal, kept as written so no precision is lost
    /// before a caller opts into `bigdecimal` parsing.
    Number(String),
    /// `'...'`, with `''` escapes already resolved.
    SingleQuotedString(String),
    /// `N'...'`, the Unicode-flagged sibling of `SingleQuotedString`.
    NationalStringLiteral(String),
    /// `0x...`, stored as the hex digits without the prefix.
    HexStringLiteral(String),
    /// `$digits[.digits]`, stored as the digits without the `$`.
    Money(String),
    Boolean(bool),
    Null,
    Placeholder(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::SingleQuotedString(s) => {
                write!(f, "'{}'", escape_quoted_string(s, '\''))
            }
            Value::NationalStringLiteral(s) => {
                write!(f, "N'{}'", escape_quoted_string(s, '\''))
            }
            Value::HexStringLiteral(s) => write!(f, "0x{s}"),
            Value::Money(s) => write!(f, "${s}"),
            Value::Boolean(b) => write!(f, "{}", if *b { "1" } else { "0" }),
            Value::Null => write!(f, "NULL"),
            Value::Placeholder(s) => write!(f, "{s}"),
        }
    }
}
