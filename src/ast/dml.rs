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

use super::{display_comma_separated, Expr, Ident, ObjectName, OutputClause, Query, TableFactor};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InsertSource {
    Query(Box<Query>),
    DefaultValues,
}

impl fmt::Display for InsertSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InsertSource::Query(q) => write!(f, "{q}"),
            InsertSource::DefaultValues => write!(f, "DEFAULT VALUES"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InsertStatement {
    pub table_name: ObjectName,
    pub columns: Vec<Ident>,
    pub output: Option<OutputClause>,
    pub source: InsertSource,
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "INSERT INTO {}", self.table_name)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", display_comma_separated(&self.columns))?;
        }
        if let Some(output) = &self.output {
            write!(f, " {output}")?;
        }
        write!(f, " {}", self.source)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assignment {
    pub target: Expr,
    pub value: Expr,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.target, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UpdateStatement {
    pub table: TableFactor,
    pub assignments: Vec<Assignment>,
    pub from: Vec<super::TableWithJoins>,
    pub output: Option<OutputClause>,
    pub selection: Option<Expr>,
}

impl fmt::Display for UpdateStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "UPDATE {} SET {}",
            self.table,
            display_comma_separated(&self.assignments)
        )?;
        if let Some(output) = &self.output {
            write!(f, " {output}")?;
        }
        if !self.from.is_empty() {
            write!(f, " FROM {}", display_comma_separated(&self.from))?;
        }
        if let Some(selection) = &self.selection {
            write!(f, " WHERE {selection}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeleteStatement {
    pub table: TableFactor,
    pub output: Option<OutputClause>,
    pub from: Vec<super::TableWithJoins>,
    pub selection: Option<Expr>,
}

impl fmt::Display for DeleteStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "DELETE {}", self.table)?;
        if let Some(output) = &self.output {
            write!(f, " {output}")?;
        }
        if !self.from.is_empty() {
            write!(f, " FROM {}", display_comma_separated(&self.from))?;
        }
        if let Some(selection) = &self.selection {
            write!(f, " WHERE {selection}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TruncateStatement {
    pub table_name: ObjectName,
}

impl fmt::Display for TruncateStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TRUNCATE TABLE {}", self.table_name)
    }
}

/// One `WHEN [NOT] MATCHED [BY ...] [AND cond] THEN action` clause of a
/// `MERGE` statement (spec.md's "at least one WHEN clause" invariant is
/// enforced by the parser on [`MergeStatement::clauses`], not by this type).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MergeClause {
    pub matched: bool,
    pub by_target: bool,
    pub by_source: bool,
    pub predicate: Option<Expr>,
    pub action: MergeAction,
}

impl fmt::Display for MergeClause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "WHEN {}MATCHED", if self.matched { "" } else { "NOT " })?;
        if self.by_target {
            write!(f, " BY TARGET")?;
        }
        if self.by_source {
            write!(f, " BY SOURCE")?;
        }
        if let Some(predicate) = &self.predicate {
            write!(f, " AND {predicate}")?;
        }
        write!(f, " THEN {}", self.action)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MergeAction {
    Update { assignments: Vec<Assignment> },
    Delete,
    Insert { columns: Vec<Ident>, values: Vec<Expr> },
}

impl fmt::Display for MergeAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MergeAction::Update { assignments } => {
                write!(f, "UPDATE SET {}", display_comma_separated(assignments))
            }
            MergeAction::Delete => write!(f, "DELETE"),
            MergeAction::Insert { columns, values } => {
                write!(f, "INSERT")?;
                if !columns.is_empty() {
                    write!(f, " ({})", display_comma_separated(columns))?;
                }
                write!(f, " VALUES ({})", display_comma_separated(values))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MergeStatement {
    pub target: TableFactor,
    pub source: TableFactor,
    pub on: Expr,
    pub clauses: Vec<MergeClause>,
    pub output: Option<OutputClause>,
}

impl fmt::Display for MergeStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "MERGE {} USING {} ON {}",
            self.target, self.source, self.on
        )?;
        for clause in &self.clauses {
            write!(f, " {clause}")?;
        }
        if let Some(output) = &self.output {
            write!(f, " {output}")?;
        }
        Ok(())
    }
}
