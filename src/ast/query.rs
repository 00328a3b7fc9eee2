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

use super::{
    display_comma_separated, Expr, ExprWithAlias, GroupByExpr, Ident, NamedWindowDefinition,
    ObjectName, OrderByExpr, TableAlias,
};

/// A full query: an optional `WITH` prologue, a set-operation tree, and the
/// trailing `ORDER BY` / row-limiting clauses that bind to the whole query
/// rather than to any one arm of a `UNION` (spec.md §4.2).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Query {
    pub with: Option<With>,
    pub body: Box<SetExpr>,
    pub order_by: Vec<OrderByExpr>,
    pub offset: Option<Offset>,
    pub fetch: Option<Fetch>,
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(with) = &self.with {
            write!(f, "{with} ")?;
        }
        write!(f, "{}", self.body)?;
        if !self.order_by.is_empty() {
            write!(f, " ORDER BY {}", display_comma_separated(&self.order_by))?;
        }
        if let Some(offset) = &self.offset {
            write!(f, " {offset}")?;
        }
        if let Some(fetch) = &self.fetch {
            write!(f, " {fetch}")?;
        }
        Ok(())
    }
}

/// `OFFSET n ROWS`; only meaningful paired with an `ORDER BY` (enforced by
/// the parser, not the type).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Offset {
    pub value: Expr,
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "OFFSET {} ROWS", self.value)
    }
}

/// `FETCH {FIRST|NEXT} n ROWS ONLY`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fetch {
    pub quantity: Expr,
}

impl fmt::Display for Fetch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "FETCH NEXT {} ROWS ONLY", self.quantity)
    }
}

/// `TOP (n) [PERCENT] [WITH TIES]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Top {
    pub quantity: Expr,
    pub percent: bool,
    pub with_ties: bool,
}

impl fmt::Display for Top {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TOP ({})", self.quantity)?;
        if self.percent {
            write!(f, " PERCENT")?;
        }
        if self.with_ties {
            write!(f, " WITH TIES")?;
        }
        Ok(())
    }
}

/// A set-operation tree: a leaf `SELECT`, or `left <op> [ALL] right`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SetExpr {
    Select(Box<Select>),
    Query(Box<Query>),
    SetOperation {
        left: Box<SetExpr>,
        op: SetOperator,
        all: bool,
        right: Box<SetExpr>,
    },
    Values(Values),
}

impl fmt::Display for SetExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SetExpr::Select(select) => write!(f, "{select}"),
            SetExpr::Query(query) => write!(f, "({query})"),
            SetExpr::SetOperation {
                left,
                op,
                all,
                right,
            } => {
                write!(f, "{left} {op}")?;
                if *all {
                    write!(f, " ALL")?;
                }
                write!(f, " {right}")
            }
            SetExpr::Values(values) => write!(f, "{values}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SetOperator {
    Union,
    Except,
    Intersect,
}

impl fmt::Display for SetOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SetOperator::Union => write!(f, "UNION"),
            SetOperator::Except => write!(f, "EXCEPT"),
            SetOperator::Intersect => write!(f, "INTERSECT"),
        }
    }
}

/// `VALUES (...), (...)`, usable both as an `INSERT` source and as a
/// standalone `SetExpr`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Values {
    pub rows: Vec<Vec<Expr>>,
}

impl fmt::Display for Values {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "VALUES ")?;
        let rendered: Vec<String> = self
            .rows
            .iter()
            .map(|row| format!("({})", display_comma_separated(row)))
            .collect();
        write!(f, "{}", rendered.join(", "))
    }
}

/// A projection item in a `SELECT` list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SelectItem {
    UnnamedExpr(Expr),
    ExprWithAlias(ExprWithAlias),
    Wildcard,
    QualifiedWildcard(ObjectName),
}

impl fmt::Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SelectItem::UnnamedExpr(e) => write!(f, "{e}"),
            SelectItem::ExprWithAlias(e) => write!(f, "{e}"),
            SelectItem::Wildcard => write!(f, "*"),
            SelectItem::QualifiedWildcard(name) => write!(f, "{name}.*"),
        }
    }
}

/// `FOR JSON`/`FOR XML`, trailing a `SELECT` (spec.md's T-SQL result-shaping
/// clauses).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ForClause {
    Json { auto: bool, path: bool },
    Xml { auto: bool, raw: bool, path: bool },
    Browse,
}

impl fmt::Display for ForClause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ForClause::Json { auto, path } => {
                write!(f, "FOR JSON ")?;
                if *auto {
                    write!(f, "AUTO")
                } else if *path {
                    write!(f, "PATH")
                } else {
                    write!(f, "AUTO")
                }
            }
            ForClause::Xml { auto, raw, path } => {
                write!(f, "FOR XML ")?;
                if *auto {
                    write!(f, "AUTO")
                } else if *raw {
                    write!(f, "RAW")
                } else if *path {
                    write!(f, "PATH")
                } else {
                    write!(f, "AUTO")
                }
            }
            ForClause::Browse => write!(f, "FOR BROWSE"),
        }
    }
}

/// `OUTPUT <select items> [INTO target (cols)]`, shared by `INSERT`/
/// `UPDATE`/`DELETE`/`MERGE` (spec.md's DML operations).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutputClause {
    pub select_items: Vec<SelectItem>,
    pub into_table: Option<ObjectName>,
    pub into_columns: Vec<Ident>,
}

impl fmt::Display for OutputClause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "OUTPUT {}", display_comma_separated(&self.select_items))?;
        if let Some(into) = &self.into_table {
            write!(f, " INTO {into}")?;
            if !self.into_columns.is_empty() {
                write!(f, " ({})", display_comma_separated(&self.into_columns))?;
            }
        }
        Ok(())
    }
}

/// A `SELECT` body (everything between `SELECT` and the trailing
/// `ORDER BY`/paging clauses which live on [`Query`] instead).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Select {
    pub distinct: bool,
    pub top: Option<Top>,
    pub projection: Vec<SelectItem>,
    pub into: Option<ObjectName>,
    pub from: Vec<TableWithJoins>,
    pub selection: Option<Expr>,
    pub group_by: GroupByExpr,
    pub having: Option<Expr>,
    pub named_windows: Vec<NamedWindowDefinition>,
    pub for_clause: Option<ForClause>,
}

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SELECT ")?;
        if self.distinct {
            write!(f, "DISTINCT ")?;
        }
        if let Some(top) = &self.top {
            write!(f, "{top} ")?;
        }
        write!(f, "{}", display_comma_separated(&self.projection))?;
        if let Some(into) = &self.into {
            write!(f, " INTO {into}")?;
        }
        if !self.from.is_empty() {
            write!(f, " FROM {}", display_comma_separated(&self.from))?;
        }
        if let Some(selection) = &self.selection {
            write!(f, " WHERE {selection}")?;
        }
        match &self.group_by {
            GroupByExpr::Expressions(exprs) if exprs.is_empty() => {}
            group_by => write!(f, " GROUP BY {group_by}")?,
        }
        if let Some(having) = &self.having {
            write!(f, " HAVING {having}")?;
        }
        if !self.named_windows.is_empty() {
            write!(f, " WINDOW {}", display_comma_separated(&self.named_windows))?;
        }
        if let Some(for_clause) = &self.for_clause {
            write!(f, " {for_clause}")?;
        }
        Ok(())
    }
}

/// A single `FROM`-list entry together with the joins chained onto it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TableWithJoins {
    pub relation: TableFactor,
    pub joins: Vec<Join>,
}

impl fmt::Display for TableWithJoins {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.relation)?;
        for join in &self.joins {
            write!(f, " {join}")?;
        }
        Ok(())
    }
}

/// `PIVOT`/`UNPIVOT` descriptors (spec.md's table-valued T-SQL extensions).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PivotClause {
    pub aggregate_function: Expr,
    pub value_column: Ident,
    pub pivot_values: Vec<Expr>,
    pub alias: Option<TableAlias>,
}

impl fmt::Display for PivotClause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "PIVOT ({} FOR {} IN ({})) {}",
            self.aggregate_function,
            self.value_column,
            display_comma_separated(&self.pivot_values),
            self.alias
                .as_ref()
                .map(|a| a.to_string())
                .unwrap_or_default()
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnpivotClause {
    pub value_column: Ident,
    pub name_column: Ident,
    pub columns: Vec<Ident>,
    pub alias: Option<TableAlias>,
}

impl fmt::Display for UnpivotClause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "UNPIVOT ({} FOR {} IN ({})) {}",
            self.value_column,
            self.name_column,
            display_comma_separated(&self.columns),
            self.alias
                .as_ref()
                .map(|a| a.to_string())
                .unwrap_or_default()
        )
    }
}

/// The closed set of `TableReference` variants (spec.md §3.2). A named
/// table also carries optional table hints (`WITH (NOLOCK)`, ...).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TableFactor {
    Table {
        name: ObjectName,
        alias: Option<TableAlias>,
        hints: Vec<Ident>,
    },
    Variable {
        name: super::Variable,
        alias: Option<TableAlias>,
    },
    Function {
        name: ObjectName,
        args: Vec<super::FunctionArg>,
        alias: Option<TableAlias>,
    },
    Derived {
        subquery: Box<Query>,
        alias: Option<TableAlias>,
    },
    NestedJoin {
        table_with_joins: Box<TableWithJoins>,
        alias: Option<TableAlias>,
    },
    Pivot {
        table: Box<TableFactor>,
        pivot: PivotClause,
    },
    Unpivot {
        table: Box<TableFactor>,
        unpivot: UnpivotClause,
    },
    /// `(VALUES (1, 2), (3, 4)) AS v(a, b)`: a `VALUES` constructor used
    /// directly as a table source, distinct from `SetExpr::Values` (a
    /// top-level `VALUES` statement).
    Values {
        values: Values,
        alias: Option<TableAlias>,
    },
    /// An `INSERT`/`UPDATE`/`DELETE`/`MERGE` with `OUTPUT` used as a table
    /// source, e.g. `SELECT * FROM (DELETE FROM T OUTPUT deleted.*) AS d`.
    DmlDerived {
        statement: Box<super::Statement>,
        alias: Option<TableAlias>,
    },
}

impl fmt::Display for TableFactor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TableFactor::Table { name, alias, hints } => {
                write!(f, "{name}")?;
                if !hints.is_empty() {
                    write!(f, " WITH ({})", display_comma_separated(hints))?;
                }
                if let Some(alias) = alias {
                    write!(f, " AS {alias}")?;
                }
                Ok(())
            }
            TableFactor::Variable { name, alias } => {
                write!(f, "{name}")?;
                if let Some(alias) = alias {
                    write!(f, " AS {alias}")?;
                }
                Ok(())
            }
            TableFactor::Function { name, args, alias } => {
                write!(f, "{name}({})", display_comma_separated(args))?;
                if let Some(alias) = alias {
                    write!(f, " AS {alias}")?;
                }
                Ok(())
            }
            TableFactor::Derived { subquery, alias } => {
                write!(f, "({subquery})")?;
                if let Some(alias) = alias {
                    write!(f, " AS {alias}")?;
                }
                Ok(())
            }
            TableFactor::NestedJoin {
                table_with_joins,
                alias,
            } => {
                write!(f, "({table_with_joins})")?;
                if let Some(alias) = alias {
                    write!(f, " AS {alias}")?;
                }
                Ok(())
            }
            TableFactor::Pivot { table, pivot } => write!(f, "{table} {pivot}"),
            TableFactor::Unpivot { table, unpivot } => write!(f, "{table} {unpivot}"),
            TableFactor::Values { values, alias } => {
                write!(f, "({values})")?;
                if let Some(alias) = alias {
                    write!(f, " AS {alias}")?;
                }
                Ok(())
            }
            TableFactor::DmlDerived { statement, alias } => {
                write!(f, "({statement})")?;
                if let Some(alias) = alias {
                    write!(f, " AS {alias}")?;
                }
                Ok(())
            }
        }
    }
}

/// `APPLY` is modeled as a join operator rather than a separate AST shape,
/// since it has the same "left relation, right relation, no ON" shape as
/// `CROSS JOIN` (generalizes spec.md §3.1's compound-keyword note).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JoinOperator {
    Inner(JoinConstraint),
    LeftOuter(JoinConstraint),
    RightOuter(JoinConstraint),
    FullOuter(JoinConstraint),
    Cross,
    CrossApply,
    OuterApply,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JoinConstraint {
    On(Expr),
    /// T-SQL has no `USING`, but an empty constraint is distinct from `ON`
    /// internally while every join this parser accepts resolves to `On`.
    None,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Join {
    pub relation: TableFactor,
    pub join_operator: JoinOperator,
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn on(constraint: &JoinConstraint) -> String {
            match constraint {
                JoinConstraint::On(expr) => format!(" ON {expr}"),
                JoinConstraint::None => String::new(),
            }
        }
        match &self.join_operator {
            JoinOperator::Inner(c) => write!(f, "JOIN {}{}", self.relation, on(c)),
            JoinOperator::LeftOuter(c) => write!(f, "LEFT JOIN {}{}", self.relation, on(c)),
            JoinOperator::RightOuter(c) => write!(f, "RIGHT JOIN {}{}", self.relation, on(c)),
            JoinOperator::FullOuter(c) => write!(f, "FULL JOIN {}{}", self.relation, on(c)),
            JoinOperator::Cross => write!(f, "CROSS JOIN {}", self.relation),
            JoinOperator::CrossApply => write!(f, "CROSS APPLY {}", self.relation),
            JoinOperator::OuterApply => write!(f, "OUTER APPLY {}", self.relation),
        }
    }
}

/// A single `name [(cols)] AS (query)` entry in a `WITH` prologue.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cte {
    pub alias: TableAlias,
    pub query: Box<Query>,
}

impl fmt::Display for Cte {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} AS ({})", self.alias, self.query)
    }
}

/// A single entry in a `WITH XMLNAMESPACES (...)` prologue: either a
/// `'uri' AS prefix` mapping or a `DEFAULT 'uri'` entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct XmlNamespace {
    pub uri: Expr,
    pub alias: Option<Ident>,
    pub is_default: bool,
}

impl fmt::Display for XmlNamespace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_default {
            write!(f, "DEFAULT {}", self.uri)
        } else {
            write!(f, "{} AS {}", self.uri, self.alias.as_ref().unwrap())
        }
    }
}

/// The `WITH` prologue before a query (spec.md §4.2's dispatch line:
/// "WITH (CTE or XMLNAMESPACES)"). T-SQL has no `RECURSIVE` keyword for the
/// CTE form; a CTE is self-referencing or not purely by whether its body
/// refers to its own name.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum With {
    Ctes(Vec<Cte>),
    XmlNamespaces(Vec<XmlNamespace>),
}

impl fmt::Display for With {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            With::Ctes(ctes) => write!(f, "WITH {}", display_comma_separated(ctes)),
            With::XmlNamespaces(namespaces) => {
                write!(f, "WITH XMLNAMESPACES ({})", display_comma_separated(namespaces))
            }
        }
    }
}
