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

use super::{display_comma_separated, DataType, Expr, Ident, ObjectName, OrderByExpr, Query, Statement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReferentialAction {
    Cascade,
    SetNull,
    SetDefault,
    NoAction,
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReferentialAction::Cascade => write!(f, "CASCADE"),
            ReferentialAction::SetNull => write!(f, "SET NULL"),
            ReferentialAction::SetDefault => write!(f, "SET DEFAULT"),
            ReferentialAction::NoAction => write!(f, "NO ACTION"),
        }
    }
}

/// A column-level constraint or attribute (spec.md's `CREATE TABLE` column
/// definition bullets, including the `IDENTITY(seed, increment)` and
/// computed-column `PERSISTED` invariants).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColumnOption {
    Null,
    NotNull,
    Default(Expr),
    Identity {
        seed: Option<Expr>,
        increment: Option<Expr>,
    },
    Unique {
        is_primary: bool,
    },
    ForeignKey {
        foreign_table: ObjectName,
        referred_columns: Vec<Ident>,
        on_delete: Option<ReferentialAction>,
        on_update: Option<ReferentialAction>,
    },
    Check(Expr),
    /// `AS expr [PERSISTED]`.
    Computed {
        expr: Expr,
        persisted: bool,
    },
    Collation(ObjectName),
    RowGuidCol,
}

impl fmt::Display for ColumnOption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ColumnOption::Null => write!(f, "NULL"),
            ColumnOption::NotNull => write!(f, "NOT NULL"),
            ColumnOption::Default(e) => write!(f, "DEFAULT {e}"),
            ColumnOption::Identity { seed, increment } => {
                write!(f, "IDENTITY")?;
                if let (Some(seed), Some(increment)) = (seed, increment) {
                    write!(f, "({seed}, {increment})")?;
                }
                Ok(())
            }
            ColumnOption::Unique { is_primary } => {
                write!(f, "{}", if *is_primary { "PRIMARY KEY" } else { "UNIQUE" })
            }
            ColumnOption::ForeignKey {
                foreign_table,
                referred_columns,
                on_delete,
                on_update,
            } => {
                write!(f, "REFERENCES {foreign_table}")?;
                if !referred_columns.is_empty() {
                    write!(f, " ({})", display_comma_separated(referred_columns))?;
                }
                if let Some(action) = on_delete {
                    write!(f, " ON DELETE {action}")?;
                }
                if let Some(action) = on_update {
                    write!(f, " ON UPDATE {action}")?;
                }
                Ok(())
            }
            ColumnOption::Check(e) => write!(f, "CHECK ({e})"),
            ColumnOption::Computed { expr, persisted } => {
                write!(f, "AS {expr}")?;
                if *persisted {
                    write!(f, " PERSISTED")?;
                }
                Ok(())
            }
            ColumnOption::Collation(name) => write!(f, "COLLATE {name}"),
            ColumnOption::RowGuidCol => write!(f, "ROWGUIDCOL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColumnOptionDef {
    pub name: Option<Ident>,
    pub option: ColumnOption,
}

impl fmt::Display for ColumnOptionDef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "CONSTRAINT {name} ")?;
        }
        write!(f, "{}", self.option)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColumnDef {
    pub name: Ident,
    pub data_type: DataType,
    pub options: Vec<ColumnOptionDef>,
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)?;
        for option in &self.options {
            write!(f, " {option}")?;
        }
        Ok(())
    }
}

/// A table-level (out-of-line) constraint.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TableConstraint {
    Unique {
        name: Option<Ident>,
        columns: Vec<Ident>,
        is_primary: bool,
    },
    ForeignKey {
        name: Option<Ident>,
        columns: Vec<Ident>,
        foreign_table: ObjectName,
        referred_columns: Vec<Ident>,
        on_delete: Option<ReferentialAction>,
        on_update: Option<ReferentialAction>,
    },
    Check {
        name: Option<Ident>,
        expr: Expr,
    },
}

impl fmt::Display for TableConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TableConstraint::Unique {
                name,
                columns,
                is_primary,
            } => {
                if let Some(name) = name {
                    write!(f, "CONSTRAINT {name} ")?;
                }
                write!(
                    f,
                    "{} ({})",
                    if *is_primary { "PRIMARY KEY" } else { "UNIQUE" },
                    display_comma_separated(columns)
                )
            }
            TableConstraint::ForeignKey {
                name,
                columns,
                foreign_table,
                referred_columns,
                on_delete,
                on_update,
            } => {
                if let Some(name) = name {
                    write!(f, "CONSTRAINT {name} ")?;
                }
                write!(
                    f,
                    "FOREIGN KEY ({}) REFERENCES {foreign_table} ({})",
                    display_comma_separated(columns),
                    display_comma_separated(referred_columns)
                )?;
                if let Some(action) = on_delete {
                    write!(f, " ON DELETE {action}")?;
                }
                if let Some(action) = on_update {
                    write!(f, " ON UPDATE {action}")?;
                }
                Ok(())
            }
            TableConstraint::Check { name, expr } => {
                if let Some(name) = name {
                    write!(f, "CONSTRAINT {name} ")?;
                }
                write!(f, "CHECK ({expr})")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateTableStatement {
    pub name: ObjectName,
    pub columns: Vec<ColumnDef>,
    pub constraints: Vec<TableConstraint>,
    pub on_filegroup: Option<Ident>,
}

impl fmt::Display for CreateTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CREATE TABLE {} (", self.name)?;
        write!(f, "{}", display_comma_separated(&self.columns))?;
        for constraint in &self.constraints {
            write!(f, ", {constraint}")?;
        }
        write!(f, ")")?;
        if let Some(fg) = &self.on_filegroup {
            write!(f, " ON {fg}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateViewStatement {
    pub name: ObjectName,
    pub columns: Vec<Ident>,
    pub with_schemabinding: bool,
    pub query: Box<Query>,
    pub with_check_option: bool,
}

impl fmt::Display for CreateViewStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CREATE VIEW {}", self.name)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", display_comma_separated(&self.columns))?;
        }
        if self.with_schemabinding {
            write!(f, " WITH SCHEMABINDING")?;
        }
        write!(f, " AS {}", self.query)?;
        if self.with_check_option {
            write!(f, " WITH CHECK OPTION")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateIndexStatement {
    pub name: Ident,
    pub table_name: ObjectName,
    pub unique: bool,
    pub clustered: Option<bool>,
    pub columns: Vec<OrderByExpr>,
    pub include: Vec<Ident>,
    pub where_clause: Option<Expr>,
}

impl fmt::Display for CreateIndexStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CREATE")?;
        if self.unique {
            write!(f, " UNIQUE")?;
        }
        match self.clustered {
            Some(true) => write!(f, " CLUSTERED")?,
            Some(false) => write!(f, " NONCLUSTERED")?,
            None => {}
        }
        write!(
            f,
            " INDEX {} ON {} ({})",
            self.name,
            self.table_name,
            display_comma_separated(&self.columns)
        )?;
        if !self.include.is_empty() {
            write!(f, " INCLUDE ({})", display_comma_separated(&self.include))?;
        }
        if let Some(where_clause) = &self.where_clause {
            write!(f, " WHERE {where_clause}")?;
        }
        Ok(())
    }
}

/// A `CREATE PROCEDURE`/`CREATE FUNCTION` parameter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProcedureParam {
    pub name: super::Variable,
    pub data_type: DataType,
    pub default: Option<Expr>,
    pub output: bool,
}

impl fmt::Display for ProcedureParam {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)?;
        if let Some(default) = &self.default {
            write!(f, " = {default}")?;
        }
        if self.output {
            write!(f, " OUTPUT")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateProcedureStatement {
    pub name: ObjectName,
    pub params: Vec<ProcedureParam>,
    pub body: Vec<Statement>,
}

impl fmt::Display for CreateProcedureStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CREATE PROCEDURE {}", self.name)?;
        if !self.params.is_empty() {
            write!(f, " {}", display_comma_separated(&self.params))?;
        }
        write!(f, " AS BEGIN ")?;
        write!(f, "{}", display_comma_separated_stmts(&self.body))?;
        write!(f, " END")
    }
}

/// What a `CREATE FUNCTION` returns: a scalar type, an inline table shape,
/// or a multi-statement table type built up in the function body.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FunctionReturns {
    Scalar(DataType),
    Table(Vec<ColumnDef>),
    TableQuery(Box<Query>),
}

impl fmt::Display for FunctionReturns {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FunctionReturns::Scalar(ty) => write!(f, "{ty}"),
            FunctionReturns::Table(cols) => write!(f, "TABLE ({})", display_comma_separated(cols)),
            FunctionReturns::TableQuery(_) => write!(f, "TABLE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateFunctionStatement {
    pub name: ObjectName,
    pub params: Vec<ProcedureParam>,
    pub returns: FunctionReturns,
    pub body: Vec<Statement>,
}

impl fmt::Display for CreateFunctionStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CREATE FUNCTION {}", self.name)?;
        write!(f, " ({})", display_comma_separated(&self.params))?;
        write!(f, " RETURNS {}", self.returns)?;
        write!(f, " AS BEGIN ")?;
        write!(f, "{}", display_comma_separated_stmts(&self.body))?;
        write!(f, " END")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TriggerEvent {
    Insert,
    Update,
    Delete,
}

impl fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TriggerEvent::Insert => write!(f, "INSERT"),
            TriggerEvent::Update => write!(f, "UPDATE"),
            TriggerEvent::Delete => write!(f, "DELETE"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TriggerTiming {
    After,
    InsteadOf,
}

impl fmt::Display for TriggerTiming {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TriggerTiming::After => write!(f, "AFTER"),
            TriggerTiming::InsteadOf => write!(f, "INSTEAD OF"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateTriggerStatement {
    pub name: ObjectName,
    pub table_name: ObjectName,
    pub timing: TriggerTiming,
    pub events: Vec<TriggerEvent>,
    pub body: Vec<Statement>,
}

impl fmt::Display for CreateTriggerStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "CREATE TRIGGER {} ON {} {} {}",
            self.name,
            self.table_name,
            self.timing,
            display_separated_events(&self.events)
        )?;
        write!(f, " AS BEGIN ")?;
        write!(f, "{}", display_comma_separated_stmts(&self.body))?;
        write!(f, " END")
    }
}

fn display_separated_events(events: &[TriggerEvent]) -> String {
    events
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_comma_separated_stmts(stmts: &[Statement]) -> String {
    stmts
        .iter()
        .map(|s| format!("{s};"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateSequenceStatement {
    pub name: ObjectName,
    pub data_type: Option<DataType>,
    pub start_with: Option<Expr>,
    pub increment_by: Option<Expr>,
}

impl fmt::Display for CreateSequenceStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CREATE SEQUENCE {}", self.name)?;
        if let Some(ty) = &self.data_type {
            write!(f, " AS {ty}")?;
        }
        if let Some(start) = &self.start_with {
            write!(f, " START WITH {start}")?;
        }
        if let Some(inc) = &self.increment_by {
            write!(f, " INCREMENT BY {inc}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateSchemaStatement {
    pub name: Ident,
}

impl fmt::Display for CreateSchemaStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CREATE SCHEMA {}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateDatabaseStatement {
    pub name: Ident,
}

impl fmt::Display for CreateDatabaseStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CREATE DATABASE {}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateSynonymStatement {
    pub name: ObjectName,
    pub for_name: ObjectName,
}

impl fmt::Display for CreateSynonymStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CREATE SYNONYM {} FOR {}", self.name, self.for_name)
    }
}

/// What a `CREATE TYPE` defines: an alias for a scalar type, or a
/// table-type shape usable as a procedure parameter/variable type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TypeRepresentation {
    Alias(DataType),
    TableType(Vec<ColumnDef>),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateTypeStatement {
    pub name: ObjectName,
    pub representation: TypeRepresentation,
}

impl fmt::Display for CreateTypeStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CREATE TYPE {} FROM ", self.name)?;
        match &self.representation {
            TypeRepresentation::Alias(ty) => write!(f, "{ty}"),
            TypeRepresentation::TableType(cols) => {
                write!(f, "TABLE ({})", display_comma_separated(cols))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateXmlSchemaCollectionStatement {
    pub name: ObjectName,
    pub document: Expr,
}

impl fmt::Display for CreateXmlSchemaCollectionStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "CREATE XML SCHEMA COLLECTION {} AS {}",
            self.name, self.document
        )
    }
}

/// The kinds of principal/key object unified under one `CREATE ...
/// Security` statement shape (spec.md's "unified security-object CREATE
/// forms" redesign note): logins, users, roles and the key/certificate
/// hierarchy all reduce to a name plus an option bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SecurityObjectKind {
    Login,
    User,
    Role,
    Certificate,
    SymmetricKey,
    AsymmetricKey,
    MasterKey,
}

impl fmt::Display for SecurityObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SecurityObjectKind::Login => write!(f, "LOGIN"),
            SecurityObjectKind::User => write!(f, "USER"),
            SecurityObjectKind::Role => write!(f, "ROLE"),
            SecurityObjectKind::Certificate => write!(f, "CERTIFICATE"),
            SecurityObjectKind::SymmetricKey => write!(f, "SYMMETRIC KEY"),
            SecurityObjectKind::AsymmetricKey => write!(f, "ASYMMETRIC KEY"),
            SecurityObjectKind::MasterKey => write!(f, "MASTER KEY"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateSecurityObjectStatement {
    pub kind: SecurityObjectKind,
    pub name: Option<Ident>,
    pub options: Vec<(Ident, Expr)>,
}

impl fmt::Display for CreateSecurityObjectStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CREATE {}", self.kind)?;
        if let Some(name) = &self.name {
            write!(f, " {name}")?;
        }
        if !self.options.is_empty() {
            write!(f, " WITH ")?;
            let rendered: Vec<String> = self
                .options
                .iter()
                .map(|(k, v)| format!("{k} = {v}"))
                .collect();
            write!(f, "{}", rendered.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AlterTableOperation {
    AddColumn(ColumnDef),
    DropColumn(Ident),
    AlterColumn { column: Ident, data_type: DataType },
    AddConstraint(TableConstraint),
    DropConstraint(Ident),
}

impl fmt::Display for AlterTableOperation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlterTableOperation::AddColumn(col) => write!(f, "ADD {col}"),
            AlterTableOperation::DropColumn(name) => write!(f, "DROP COLUMN {name}"),
            AlterTableOperation::AlterColumn { column, data_type } => {
                write!(f, "ALTER COLUMN {column} {data_type}")
            }
            AlterTableOperation::AddConstraint(c) => write!(f, "ADD {c}"),
            AlterTableOperation::DropConstraint(name) => write!(f, "DROP CONSTRAINT {name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlterTableStatement {
    pub name: ObjectName,
    pub operation: AlterTableOperation,
}

impl fmt::Display for AlterTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ALTER TABLE {} {}", self.name, self.operation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DropObjectType {
    Table,
    View,
    Index,
    Procedure,
    Function,
    Trigger,
    Sequence,
    Schema,
    Database,
    Synonym,
    Type,
    XmlSchemaCollection,
    Login,
    User,
    Role,
}

impl fmt::Display for DropObjectType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            DropObjectType::Table => "TABLE",
            DropObjectType::View => "VIEW",
            DropObjectType::Index => "INDEX",
            DropObjectType::Procedure => "PROCEDURE",
            DropObjectType::Function => "FUNCTION",
            DropObjectType::Trigger => "TRIGGER",
            DropObjectType::Sequence => "SEQUENCE",
            DropObjectType::Schema => "SCHEMA",
            DropObjectType::Database => "DATABASE",
            DropObjectType::Synonym => "SYNONYM",
            DropObjectType::Type => "TYPE",
            DropObjectType::XmlSchemaCollection => "XML SCHEMA COLLECTION",
            DropObjectType::Login => "LOGIN",
            DropObjectType::User => "USER",
            DropObjectType::Role => "ROLE",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DropStatement {
    pub object_type: DropObjectType,
    pub if_exists: bool,
    pub names: Vec<ObjectName>,
}

impl fmt::Display for DropStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "DROP {}", self.object_type)?;
        if self.if_exists {
            write!(f, " IF EXISTS")?;
        }
        write!(f, " {}", display_comma_separated(&self.names))
    }
}
