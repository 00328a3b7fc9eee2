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

//! T-SQL Abstract Syntax Tree (AST) types.
//!
//! The tree is a closed set of tagged variants (spec.md §3.2), partitioned
//! by category into submodules the way the teacher splits `ast::ddl`,
//! `ast::dml`, `ast::query`, `ast::operator`, `ast::value` rather than into
//! a class hierarchy (spec.md §9's "large variant sets" design note). Nodes
//! are built by the parser and never mutated afterward; a `Program` owns its
//! statements exclusively and the whole tree is dropped together (spec.md §5).

use core::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use self::control::*;
pub use self::data_type::{CharacterLength, DataType, ExactNumberInfo};
pub use self::ddl::*;
pub use self::dml::*;
pub use self::operator::{BinaryOperator, UnaryOperator};
pub use self::query::*;
pub use self::value::Value;

use crate::tokenizer::Location;

mod control;
mod data_type;
mod ddl;
mod dml;
mod operator;
mod query;
mod value;

fn display_separated<'a, T: fmt::Display>(slice: &'a [T], sep: &'static str) -> impl fmt::Display + 'a {
    struct D<'a, T>(&'a [T], &'static str);
    impl<'a, T: fmt::Display> fmt::Display for D<'a, T> {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            let mut first = true;
            for t in self.0 {
                if !first {
                    write!(f, "{}", self.1)?;
                }
                first = false;
                write!(f, "{t}")?;
            }
            Ok(())
        }
    }
    D(slice, sep)
}

fn display_comma_separated<T: fmt::Display>(slice: &[T]) -> impl fmt::Display + '_ {
    display_separated(slice, ", ")
}

/// An identifier, decomposed into its value and quote style (spec.md §3.1's
/// identifier token categories, lifted into the AST).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ident {
    /// The value without quotes; temp-table prefixes (`#`, `##`) are part of it.
    pub value: String,
    /// The opening quote (`'['`, `'"'`), or `None` for a bare identifier.
    pub quote_style: Option<char>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub location: Location,
}

impl Ident {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Ident {
            value: value.into(),
            quote_style: None,
            location: Location::default(),
        }
    }

    pub fn with_quote<S: Into<String>>(quote: char, value: S) -> Self {
        assert!(quote == '\'' || quote == '"' || quote == '`' || quote == '[');
        Ident {
            value: value.into(),
            quote_style: Some(quote),
            location: Location::default(),
        }
    }

    pub fn at<S: Into<String>>(value: S, location: Location) -> Self {
        Ident {
            value: value.into(),
            quote_style: None,
            location,
        }
    }

    /// The originating token's literal text (the `literal` operation from
    /// spec.md §3.2), i.e. the bare value without quote decoration.
    pub fn literal(&self) -> &str {
        &self.value
    }
}

impl From<&str> for Ident {
    fn from(value: &str) -> Self {
        Ident::new(value)
    }
}

impl Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.quote_style {
            Some('[') => write!(f, "[{}]", self.value.replace(']', "]]")),
            Some(q) => write!(f, "{q}{}{q}", self.value.replace(q, &format!("{q}{q}"))),
            _ => write!(f, "{}", self.value),
        }
    }
}

/// A 1-4 part dotted name: `server.database.schema.object`. Spec.md calls
/// this `QualifiedIdentifier`; non-empty is an invariant enforced at
/// construction (spec.md §3.2, §8).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectName(pub Vec<Ident>);

impl ObjectName {
    /// Panics if `parts` is empty: spec.md §8's "Non-empty qualified
    /// identifier" invariant is enforced here, at the one place `ObjectName`
    /// values are built, rather than re-checked by every caller.
    pub fn new(parts: Vec<Ident>) -> Self {
        assert!(!parts.is_empty(), "QualifiedIdentifier must have >= 1 part");
        ObjectName(parts)
    }

    pub fn parts(&self) -> &[Ident] {
        &self.0
    }
}

impl Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", display_separated(&self.0, "."))
    }
}

/// `@name` (local) or `@@name` (system); spec.md §3.2's `Variable` invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VariableScope {
    Local,
    System,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Variable {
    pub name: String,
    pub scope: VariableScope,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub location: Location,
}

impl Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.scope {
            VariableScope::Local => write!(f, "@{}", self.name),
            VariableScope::System => write!(f, "@@{}", self.name),
        }
    }
}

/// `CAST` vs. `TRY_CAST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CastKind {
    Cast,
    TryCast,
}

/// `CONVERT` vs. `TRY_CONVERT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConvertKind {
    Convert,
    TryConvert,
}

/// `PARSE` vs. `TRY_PARSE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParseKind {
    Parse,
    TryParse,
}

/// `alias` or `AS alias`, trailing a table or column reference.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TableAlias {
    pub name: Ident,
    pub columns: Vec<Ident>,
}

impl Display for TableAlias {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", display_comma_separated(&self.columns))?;
        }
        Ok(())
    }
}

/// An optional `AS alias` pair attached to a SELECT item or CTE column.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExprWithAlias {
    pub expr: Expr,
    pub alias: Option<Ident>,
}

impl Display for ExprWithAlias {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {alias}")?;
        }
        Ok(())
    }
}

/// `expr [ASC|DESC] [NULLS FIRST|LAST]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderByExpr {
    pub expr: Expr,
    /// `None` means no explicit direction was written.
    pub descending: Option<bool>,
    pub nulls_first: Option<bool>,
}

impl Display for OrderByExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        match self.descending {
            Some(true) => write!(f, " DESC")?,
            Some(false) => write!(f, " ASC")?,
            None => {}
        }
        match self.nulls_first {
            Some(true) => write!(f, " NULLS FIRST")?,
            Some(false) => write!(f, " NULLS LAST")?,
            None => {}
        }
        Ok(())
    }
}

/// `PARTITION BY ... ORDER BY ... <frame>` inside an `OVER (...)` clause, or
/// a reference to a named window (`OVER window_name`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OverClause {
    WindowSpec(WindowSpec),
    NamedWindow(Ident),
}

impl Display for OverClause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OverClause::WindowSpec(spec) => write!(f, "OVER ({spec})"),
            OverClause::NamedWindow(name) => write!(f, "OVER {name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WindowSpec {
    pub partition_by: Vec<Expr>,
    pub order_by: Vec<OrderByExpr>,
    pub window_frame: Option<WindowFrame>,
}

impl Display for WindowSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut wrote = false;
        if !self.partition_by.is_empty() {
            write!(f, "PARTITION BY {}", display_comma_separated(&self.partition_by))?;
            wrote = true;
        }
        if !self.order_by.is_empty() {
            if wrote {
                write!(f, " ")?;
            }
            write!(f, "ORDER BY {}", display_comma_separated(&self.order_by))?;
            wrote = true;
        }
        if let Some(frame) = &self.window_frame {
            if wrote {
                write!(f, " ")?;
            }
            write!(f, "{frame}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WindowFrameUnits {
    Rows,
    Range,
}

impl Display for WindowFrameUnits {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WindowFrameUnits::Rows => write!(f, "ROWS"),
            WindowFrameUnits::Range => write!(f, "RANGE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WindowFrameBound {
    CurrentRow,
    Preceding(Option<Box<Expr>>),
    Following(Option<Box<Expr>>),
}

impl Display for WindowFrameBound {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WindowFrameBound::CurrentRow => write!(f, "CURRENT ROW"),
            WindowFrameBound::Preceding(None) => write!(f, "UNBOUNDED PRECEDING"),
            WindowFrameBound::Preceding(Some(e)) => write!(f, "{e} PRECEDING"),
            WindowFrameBound::Following(None) => write!(f, "UNBOUNDED FOLLOWING"),
            WindowFrameBound::Following(Some(e)) => write!(f, "{e} FOLLOWING"),
        }
    }
}

/// `{ROWS|RANGE} {bound | BETWEEN bound AND bound}` (spec.md §4.2).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WindowFrame {
    pub units: WindowFrameUnits,
    pub start_bound: WindowFrameBound,
    pub end_bound: Option<WindowFrameBound>,
}

impl Display for WindowFrame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ", self.units)?;
        if let Some(end) = &self.end_bound {
            write!(f, "BETWEEN {} AND {end}", self.start_bound)
        } else {
            write!(f, "{}", self.start_bound)
        }
    }
}

/// A named `WINDOW name AS (...)` definition in a SELECT's `WINDOW` clause.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NamedWindowDefinition(pub Ident, pub WindowSpec);

impl Display for NamedWindowDefinition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} AS ({})", self.0, self.1)
    }
}

/// `GROUP BY GROUPING SETS (...)`, `CUBE (...)`, `ROLLUP (...)`, or a plain
/// expression list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GroupByExpr {
    All,
    Expressions(Vec<Expr>),
}

impl Display for GroupByExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GroupByExpr::All => write!(f, "ALL"),
            GroupByExpr::Expressions(exprs) => write!(f, "{}", display_comma_separated(exprs)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FunctionArgOperator {
    /// `name => value` (T-SQL/PL-SQL-style named argument).
    RightArrow,
    /// `name = value`.
    Equals,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FunctionArgExpr {
    Expr(Expr),
    /// A bare `*` argument, e.g. `COUNT(*)`.
    Wildcard,
}

impl Display for FunctionArgExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FunctionArgExpr::Expr(e) => write!(f, "{e}"),
            FunctionArgExpr::Wildcard => write!(f, "*"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FunctionArg {
    Unnamed(FunctionArgExpr),
    Named {
        name: Ident,
        arg: FunctionArgExpr,
        operator: FunctionArgOperator,
    },
}

impl Display for FunctionArg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FunctionArg::Unnamed(arg) => write!(f, "{arg}"),
            FunctionArg::Named { name, arg, operator } => {
                let op = match operator {
                    FunctionArgOperator::RightArrow => "=>",
                    FunctionArgOperator::Equals => "=",
                };
                write!(f, "{name} {op} {arg}")
            }
        }
    }
}

/// `WITHIN GROUP (ORDER BY ...)`, attached to ordered-set aggregates like
/// `STRING_AGG`/`PERCENTILE_CONT`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WithinGroup {
    pub order_by: Vec<OrderByExpr>,
}

impl Display for WithinGroup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "WITHIN GROUP (ORDER BY {})", display_comma_separated(&self.order_by))
    }
}

/// A function call, with its optional `WITHIN GROUP` and `OVER` extensions
/// (spec.md §3.2's `Expression` bullet list).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Function {
    pub name: ObjectName,
    pub args: Vec<FunctionArg>,
    pub distinct: bool,
    pub within_group: Option<WithinGroup>,
    pub over: Option<OverClause>,
}

impl Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        if self.distinct {
            write!(f, "DISTINCT ")?;
        }
        write!(f, "{})", display_comma_separated(&self.args))?;
        if let Some(wg) = &self.within_group {
            write!(f, " {wg}")?;
        }
        if let Some(over) = &self.over {
            write!(f, " {over}")?;
        }
        Ok(())
    }
}

/// `GROUPING SETS`/`CUBE`/`ROLLUP` as *expressions* (they also appear as a
/// `GroupByExpr`; as an expression they can show up e.g. inside a computed
/// grouping indicator).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GroupingExpr {
    GroupingSets(Vec<Vec<Expr>>),
    Cube(Vec<Vec<Expr>>),
    Rollup(Vec<Vec<Expr>>),
}

fn fmt_grouping_sets(f: &mut fmt::Formatter, sets: &[Vec<Expr>]) -> fmt::Result {
    let rendered: Vec<String> = sets
        .iter()
        .map(|set| {
            if set.len() == 1 {
                format!("({})", set[0])
            } else {
                format!("({})", display_comma_separated(set))
            }
        })
        .collect();
    write!(f, "{}", rendered.join(", "))
}

impl Display for GroupingExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GroupingExpr::GroupingSets(sets) => {
                write!(f, "GROUPING SETS (")?;
                fmt_grouping_sets(f, sets)?;
                write!(f, ")")
            }
            GroupingExpr::Cube(sets) => {
                write!(f, "CUBE (")?;
                fmt_grouping_sets(f, sets)?;
                write!(f, ")")
            }
            GroupingExpr::Rollup(sets) => {
                write!(f, "ROLLUP (")?;
                fmt_grouping_sets(f, sets)?;
                write!(f, ")")
            }
        }
    }
}

/// A `key: value` pair inside a `JSON_OBJECT`/`FOR JSON` construct.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JsonKeyValue {
    pub key: Box<Expr>,
    pub value: Box<Expr>,
}

impl Display for JsonKeyValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

/// The closed set of `Expression` variants from spec.md §3.2.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    Value(Value),
    Identifier(Ident),
    CompoundIdentifier(Vec<Ident>),
    Variable(Variable),
    /// A parenthesized sub-expression, kept distinct so the renderer doesn't
    /// have to guess when parens are structurally required.
    Nested(Box<Expr>),
    UnaryOp {
        op: UnaryOperator,
        expr: Box<Expr>,
    },
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    Between {
        expr: Box<Expr>,
        negated: bool,
        low: Box<Expr>,
        high: Box<Expr>,
    },
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
    },
    InSubquery {
        expr: Box<Expr>,
        subquery: Box<Query>,
        negated: bool,
    },
    Like {
        negated: bool,
        expr: Box<Expr>,
        pattern: Box<Expr>,
        escape: Option<Box<Expr>>,
    },
    IsNull(Box<Expr>),
    IsNotNull(Box<Expr>),
    IsDistinctFrom(Box<Expr>, Box<Expr>),
    IsNotDistinctFrom(Box<Expr>, Box<Expr>),
    Exists {
        subquery: Box<Query>,
        negated: bool,
    },
    Case {
        operand: Option<Box<Expr>>,
        conditions: Vec<Expr>,
        results: Vec<Expr>,
        else_result: Option<Box<Expr>>,
    },
    Cast {
        kind: CastKind,
        expr: Box<Expr>,
        data_type: DataType,
    },
    Convert {
        kind: ConvertKind,
        data_type: DataType,
        expr: Box<Expr>,
        style: Option<Box<Expr>>,
    },
    Parse {
        kind: ParseKind,
        expr: Box<Expr>,
        data_type: DataType,
    },
    Collate {
        expr: Box<Expr>,
        collation: ObjectName,
    },
    AtTimeZone {
        timestamp: Box<Expr>,
        time_zone: Box<Expr>,
    },
    Function(Function),
    MethodCall {
        expr: Box<Expr>,
        method: Ident,
        args: Vec<FunctionArg>,
    },
    StaticMethodCall {
        type_name: ObjectName,
        method: Ident,
        args: Vec<FunctionArg>,
    },
    Subquery(Box<Query>),
    Tuple(Vec<Expr>),
    Grouping(GroupingExpr),
    JsonKeyValue(JsonKeyValue),
    /// `CURSOR FOR <query>`, usable as a value in e.g. `SET @c = CURSOR FOR ...`.
    CursorExpr(Box<Query>),
    NextValueFor(ObjectName),
    Contains {
        column: Box<Expr>,
        search: Box<Expr>,
    },
    Freetext {
        columns: Vec<Expr>,
        search: Box<Expr>,
    },
    Wildcard,
    QualifiedWildcard(Vec<Ident>),
}

impl Expr {
    /// The originating token's literal text (spec.md §3.2's `literal`
    /// operation). For composite nodes this is the operator/leading keyword
    /// rather than the whole subtree, matching what the lexer would have
    /// handed the parser at that position.
    pub fn literal(&self) -> String {
        match self {
            Expr::Value(v) => v.to_string(),
            Expr::Identifier(id) => id.value.clone(),
            Expr::CompoundIdentifier(parts) => {
                parts.last().map(|i| i.value.clone()).unwrap_or_default()
            }
            Expr::Variable(v) => v.to_string(),
            Expr::Nested(e) => e.literal(),
            Expr::UnaryOp { op, .. } => op.to_string(),
            Expr::BinaryOp { op, .. } => op.to_string(),
            Expr::Between { .. } => "BETWEEN".to_string(),
            Expr::InList { .. } | Expr::InSubquery { .. } => "IN".to_string(),
            Expr::Like { .. } => "LIKE".to_string(),
            Expr::IsNull(_) | Expr::IsNotNull(_) => "IS".to_string(),
            Expr::IsDistinctFrom(..) | Expr::IsNotDistinctFrom(..) => "IS".to_string(),
            Expr::Exists { .. } => "EXISTS".to_string(),
            Expr::Case { .. } => "CASE".to_string(),
            Expr::Cast { kind, .. } => match kind {
                CastKind::Cast => "CAST".to_string(),
                CastKind::TryCast => "TRY_CAST".to_string(),
            },
            Expr::Convert { kind, .. } => match kind {
                ConvertKind::Convert => "CONVERT".to_string(),
                ConvertKind::TryConvert => "TRY_CONVERT".to_string(),
            },
            Expr::Parse { kind, .. } => match kind {
                ParseKind::Parse => "PARSE".to_string(),
                ParseKind::TryParse => "TRY_PARSE".to_string(),
            },
            Expr::Collate { .. } => "COLLATE".to_string(),
            Expr::AtTimeZone { .. } => "AT TIME ZONE".to_string(),
            Expr::Function(func) => func.name.to_string(),
            Expr::MethodCall { method, .. } => method.value.clone(),
            Expr::StaticMethodCall { method, .. } => method.value.clone(),
            Expr::Subquery(_) => "SELECT".to_string(),
            Expr::Tuple(_) => "(".to_string(),
            Expr::Grouping(g) => match g {
                GroupingExpr::GroupingSets(_) => "GROUPING SETS".to_string(),
                GroupingExpr::Cube(_) => "CUBE".to_string(),
                GroupingExpr::Rollup(_) => "ROLLUP".to_string(),
            },
            Expr::JsonKeyValue(_) => ":".to_string(),
            Expr::CursorExpr(_) => "CURSOR".to_string(),
            Expr::NextValueFor(_) => "NEXT VALUE FOR".to_string(),
            Expr::Contains { .. } => "CONTAINS".to_string(),
            Expr::Freetext { .. } => "FREETEXT".to_string(),
            Expr::Wildcard => "*".to_string(),
            Expr::QualifiedWildcard(_) => "*".to_string(),
        }
    }

    /// The SQL-text serialization of this subtree (spec.md §3.2's `render`
    /// operation); equivalent to `to_string()`.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Value(v) => write!(f, "{v}"),
            Expr::Identifier(id) => write!(f, "{id}"),
            Expr::CompoundIdentifier(parts) => write!(f, "{}", display_separated(parts, ".")),
            Expr::Variable(v) => write!(f, "{v}"),
            Expr::Nested(e) => write!(f, "({e})"),
            Expr::UnaryOp { op, expr } => match op {
                UnaryOperator::Not => write!(f, "NOT {expr}"),
                _ => write!(f, "{op}{expr}"),
            },
            Expr::BinaryOp { left, op, right } => write!(f, "{left} {op} {right}"),
            Expr::Between {
                expr,
                negated,
                low,
                high,
            } => {
                write!(
                    f,
                    "{expr} {}BETWEEN {low} AND {high}",
                    if *negated { "NOT " } else { "" }
                )
            }
            Expr::InList {
                expr,
                list,
                negated,
            } => write!(
                f,
                "{expr} {}IN ({})",
                if *negated { "NOT " } else { "" },
                display_comma_separated(list)
            ),
            Expr::InSubquery {
                expr,
                subquery,
                negated,
            } => write!(
                f,
                "{expr} {}IN ({subquery})",
                if *negated { "NOT " } else { "" }
            ),
            Expr::Like {
                negated,
                expr,
                pattern,
                escape,
            } => {
                write!(f, "{expr} {}LIKE {pattern}", if *negated { "NOT " } else { "" })?;
                if let Some(escape) = escape {
                    write!(f, " ESCAPE {escape}")?;
                }
                Ok(())
            }
            Expr::IsNull(e) => write!(f, "{e} IS NULL"),
            Expr::IsNotNull(e) => write!(f, "{e} IS NOT NULL"),
            Expr::IsDistinctFrom(l, r) => write!(f, "{l} IS DISTINCT FROM {r}"),
            Expr::IsNotDistinctFrom(l, r) => write!(f, "{l} IS NOT DISTINCT FROM {r}"),
            Expr::Exists { subquery, negated } => write!(
                f,
                "{}EXISTS ({subquery})",
                if *negated { "NOT " } else { "" }
            ),
            Expr::Case {
                operand,
                conditions,
                results,
                else_result,
            } => {
                write!(f, "CASE")?;
                if let Some(operand) = operand {
                    write!(f, " {operand}")?;
                }
                for (cond, result) in conditions.iter().zip(results) {
                    write!(f, " WHEN {cond} THEN {result}")?;
                }
                if let Some(else_result) = else_result {
                    write!(f, " ELSE {else_result}")?;
                }
                write!(f, " END")
            }
            Expr::Cast {
                kind,
                expr,
                data_type,
            } => {
                let name = match kind {
                    CastKind::Cast => "CAST",
                    CastKind::TryCast => "TRY_CAST",
                };
                write!(f, "{name}({expr} AS {data_type})")
            }
            Expr::Convert {
                kind,
                data_type,
                expr,
                style,
            } => {
                let name = match kind {
                    ConvertKind::Convert => "CONVERT",
                    ConvertKind::TryConvert => "TRY_CONVERT",
                };
                write!(f, "{name}({data_type}, {expr}")?;
                if let Some(style) = style {
                    write!(f, ", {style}")?;
                }
                write!(f, ")")
            }
            Expr::Parse { kind, expr, data_type } => {
                let name = match kind {
                    ParseKind::Parse => "PARSE",
                    ParseKind::TryParse => "TRY_PARSE",
                };
                write!(f, "{name}({expr} AS {data_type})")
            }
            Expr::Collate { expr, collation } => write!(f, "{expr} COLLATE {collation}"),
            Expr::AtTimeZone {
                timestamp,
                time_zone,
            } => write!(f, "{timestamp} AT TIME ZONE {time_zone}"),
            Expr::Function(func) => write!(f, "{func}"),
            Expr::MethodCall { expr, method, args } => {
                write!(f, "{expr}.{method}({})", display_comma_separated(args))
            }
            Expr::StaticMethodCall {
                type_name,
                method,
                args,
            } => write!(
                f,
                "{type_name}::{method}({})",
                display_comma_separated(args)
            ),
            Expr::Subquery(q) => write!(f, "({q})"),
            Expr::Tuple(exprs) => write!(f, "({})", display_comma_separated(exprs)),
            Expr::Grouping(g) => write!(f, "{g}"),
            Expr::JsonKeyValue(kv) => write!(f, "{kv}"),
            Expr::CursorExpr(q) => write!(f, "CURSOR FOR {q}"),
            Expr::NextValueFor(name) => write!(f, "NEXT VALUE FOR {name}"),
            Expr::Contains { column, search } => write!(f, "CONTAINS({column}, {search})"),
            Expr::Freetext { columns, search } => {
                write!(f, "FREETEXT(({}), {search})", display_comma_separated(columns))
            }
            Expr::Wildcard => write!(f, "*"),
            Expr::QualifiedWildcard(parts) => write!(f, "{}.*", display_separated(parts, ".")),
        }
    }
}

/// The root of a parsed buffer: an ordered sequence of statements
/// (spec.md §3.2's `Program`). `;` and `GO` separators surface as
/// [`Statement::Go`]/statement boundaries, not as values on `Program` itself.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl core::ops::Deref for Program {
    type Target = [Statement];
    fn deref(&self) -> &[Statement] {
        &self.statements
    }
}

impl IntoIterator for Program {
    type Item = Statement;
    type IntoIter = std::vec::IntoIter<Statement>;
    fn into_iter(self) -> Self::IntoIter {
        self.statements.into_iter()
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", display_separated(&self.statements, "\n"))
    }
}
