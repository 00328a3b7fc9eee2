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

use crate::dialect::{Dialect, DialectSettings};

/// The (only) [`Dialect`] this crate parses: [Microsoft SQL Server](https://www.microsoft.com/en-us/sql-server/)'s T-SQL.
#[derive(Debug, Clone, Copy)]
pub struct MsSqlDialect {
    settings: DialectSettings,
}

impl Default for MsSqlDialect {
    fn default() -> Self {
        MsSqlDialect {
            settings: DialectSettings::default(),
        }
    }
}

impl MsSqlDialect {
    /// The default, lenient dialect: nested block comments are recognized.
    pub fn new() -> Self {
        Self::default()
    }

    /// A dialect where `/* ... */` does not nest: the first `*/` closes the
    /// comment regardless of how many `/*` preceded it. SQL Server's own
    /// documentation is inconsistent about nesting (see SPEC_FULL.md's Open
    /// Questions), so callers who need the stricter reading can opt in here.
    pub fn strict() -> Self {
        MsSqlDialect {
            settings: DialectSettings {
                strict_nested_comments: true,
            },
        }
    }
}

impl Dialect for MsSqlDialect {
    fn settings(&self) -> DialectSettings {
        self.settings
    }

    fn is_identifier_start(&self, ch: char) -> bool {
        // https://docs.microsoft.com/en-us/sql/relational-databases/databases/database-identifiers?view=sql-server-2017#rules-for-regular-identifiers
        // `@` is handled separately by the tokenizer as the start of a
        // variable/system-variable token, not as a plain identifier char.
        ch.is_alphabetic() || ch == '_' || ch == '#'
    }

    fn is_identifier_part(&self, ch: char) -> bool {
        ch.is_alphabetic() || ch.is_ascii_digit() || ch == '$' || ch == '#' || ch == '_'
    }

    fn is_delimited_identifier_start(&self, ch: char) -> bool {
        ch == '"' || ch == '['
    }
}
