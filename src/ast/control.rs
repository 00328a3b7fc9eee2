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
    display_comma_separated, AlterTableStatement, CreateDatabaseStatement,
    CreateFunctionStatement, CreateIndexStatement, CreateProcedureStatement,
    CreateSchemaStatement, CreateSecurityObjectStatement, CreateSequenceStatement,
    CreateSynonymStatement, CreateTableStatement, CreateTriggerStatement, CreateTypeStatement,
    CreateViewStatement, CreateXmlSchemaCollectionStatement, DataType, DeleteStatement,
    DropStatement, Expr, FunctionArg, Ident, InsertStatement, MergeStatement, ObjectName, Query,
    TruncateStatement, UpdateStatement, Variable,
};

/// `BEGIN ... END`, used both as a bare block and as the body of
/// procedures/functions/triggers (those store `Vec<Statement>` directly;
/// this variant is for a block appearing as its own statement, e.g. inside
/// `IF`/`WHILE`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Block {
    pub statements: Vec<Statement>,
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "BEGIN")?;
        for stmt in &self.statements {
            write!(f, " {stmt};")?;
        }
        write!(f, " END")
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IfStatement {
    pub condition: Expr,
    pub then_statement: Box<Statement>,
    pub else_statement: Option<Box<Statement>>,
}

impl fmt::Display for IfStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IF {} {}", self.condition, self.then_statement)?;
        if let Some(else_statement) = &self.else_statement {
            write!(f, " ELSE {else_statement}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WhileStatement {
    pub condition: Expr,
    pub body: Box<Statement>,
}

impl fmt::Display for WhileStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "WHILE {} {}", self.condition, self.body)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TryCatchStatement {
    pub try_block: Vec<Statement>,
    pub catch_block: Vec<Statement>,
}

impl fmt::Display for TryCatchStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "BEGIN TRY")?;
        for stmt in &self.try_block {
            write!(f, " {stmt};")?;
        }
        write!(f, " END TRY BEGIN CATCH")?;
        for stmt in &self.catch_block {
            write!(f, " {stmt};")?;
        }
        write!(f, " END CATCH")
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThrowStatement {
    pub error_number: Option<Expr>,
    pub message: Option<Expr>,
    pub state: Option<Expr>,
}

impl fmt::Display for ThrowStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "THROW")?;
        if let (Some(n), Some(m), Some(s)) = (&self.error_number, &self.message, &self.state) {
            write!(f, " {n}, {m}, {s}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RaiseErrorStatement {
    pub message: Expr,
    pub severity: Expr,
    pub state: Expr,
    pub args: Vec<Expr>,
}

impl fmt::Display for RaiseErrorStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "RAISERROR ({}, {}, {}",
            self.message, self.severity, self.state
        )?;
        for arg in &self.args {
            write!(f, ", {arg}")?;
        }
        write!(f, ")")
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrintStatement {
    pub expr: Expr,
}

impl fmt::Display for PrintStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PRINT {}", self.expr)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WaitForTarget {
    Delay(Expr),
    Time(Expr),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WaitForStatement {
    pub target: WaitForTarget,
}

impl fmt::Display for WaitForStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.target {
            WaitForTarget::Delay(e) => write!(f, "WAITFOR DELAY {e}"),
            WaitForTarget::Time(e) => write!(f, "WAITFOR TIME {e}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TransactionKind {
    Begin,
    Commit,
    Rollback,
    Save,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TransactionStatement {
    pub kind: TransactionKind,
    pub name: Option<Ident>,
}

impl fmt::Display for TransactionStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let keyword = match self.kind {
            TransactionKind::Begin => "BEGIN TRANSACTION",
            TransactionKind::Commit => "COMMIT TRANSACTION",
            TransactionKind::Rollback => "ROLLBACK TRANSACTION",
            TransactionKind::Save => "SAVE TRANSACTION",
        };
        write!(f, "{keyword}")?;
        if let Some(name) = &self.name {
            write!(f, " {name}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeclareCursorStatement {
    pub name: Ident,
    pub insensitive: bool,
    pub scroll: bool,
    pub query: Box<Query>,
}

impl fmt::Display for DeclareCursorStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "DECLARE {} ", self.name)?;
        if self.insensitive {
            write!(f, "INSENSITIVE ")?;
        }
        if self.scroll {
            write!(f, "SCROLL ")?;
        }
        write!(f, "CURSOR FOR {}", self.query)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OpenCursorStatement {
    pub name: Ident,
}

impl fmt::Display for OpenCursorStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "OPEN {}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FetchCursorStatement {
    pub name: Ident,
    pub into: Vec<Variable>,
}

impl fmt::Display for FetchCursorStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "FETCH NEXT FROM {}", self.name)?;
        if !self.into.is_empty() {
            write!(f, " INTO {}", display_comma_separated(&self.into))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CloseCursorStatement {
    pub name: Ident,
}

impl fmt::Display for CloseCursorStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CLOSE {}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeallocateCursorStatement {
    pub name: Ident,
}

impl fmt::Display for DeallocateCursorStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "DEALLOCATE {}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeclareVariableStatement {
    pub name: Variable,
    pub data_type: DataType,
    pub default: Option<Expr>,
}

impl fmt::Display for DeclareVariableStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "DECLARE {} {}", self.name, self.data_type)?;
        if let Some(default) = &self.default {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SetVariableStatement {
    pub name: Variable,
    pub value: Expr,
}

impl fmt::Display for SetVariableStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SET {} = {}", self.name, self.value)
    }
}

/// `SET option {ON|OFF}`, e.g. `SET NOCOUNT ON`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SetOptionStatement {
    pub option: Ident,
    pub on: bool,
}

impl fmt::Display for SetOptionStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SET {} {}", self.option, if self.on { "ON" } else { "OFF" })
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExecuteProcedureStatement {
    pub name: ObjectName,
    pub args: Vec<FunctionArg>,
    pub result_variable: Option<Variable>,
}

impl fmt::Display for ExecuteProcedureStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(result) = &self.result_variable {
            write!(f, "EXEC {result} = {}", self.name)?;
        } else {
            write!(f, "EXEC {}", self.name)?;
        }
        if !self.args.is_empty() {
            write!(f, " {}", display_comma_separated(&self.args))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GrantRevokeKind {
    Grant,
    Revoke,
    Deny,
}

/// `GRANT`/`REVOKE`/`DENY` unified into one shape (spec.md's redesign note):
/// they differ only in keyword and the presence of `GRANT OPTION FOR`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GrantRevokeStatement {
    pub kind: GrantRevokeKind,
    pub permissions: Vec<Ident>,
    pub on: Option<ObjectName>,
    pub to: Vec<Ident>,
    pub cascade: bool,
}

impl fmt::Display for GrantRevokeStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let keyword = match self.kind {
            GrantRevokeKind::Grant => "GRANT",
            GrantRevokeKind::Revoke => "REVOKE",
            GrantRevokeKind::Deny => "DENY",
        };
        write!(f, "{keyword} {}", display_comma_separated(&self.permissions))?;
        if let Some(on) = &self.on {
            write!(f, " ON {on}")?;
        }
        let preposition = match self.kind {
            GrantRevokeKind::Revoke => "FROM",
            GrantRevokeKind::Grant | GrantRevokeKind::Deny => "TO",
        };
        write!(f, " {preposition} {}", display_comma_separated(&self.to))?;
        if self.cascade {
            write!(f, " CASCADE")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BackupStatement {
    pub database: Ident,
    pub to_disk: Expr,
}

impl fmt::Display for BackupStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "BACKUP DATABASE {} TO DISK = {}", self.database, self.to_disk)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RestoreStatement {
    pub database: Ident,
    pub from_disk: Expr,
}

impl fmt::Display for RestoreStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "RESTORE DATABASE {} FROM DISK = {}",
            self.database, self.from_disk
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DbccStatement {
    pub command: Ident,
    pub args: Vec<Expr>,
}

impl fmt::Display for DbccStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "DBCC {}", self.command)?;
        if !self.args.is_empty() {
            write!(f, "({})", display_comma_separated(&self.args))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BulkInsertStatement {
    pub table_name: ObjectName,
    pub from_file: Expr,
}

impl fmt::Display for BulkInsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "BULK INSERT {} FROM {}",
            self.table_name, self.from_file
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReconfigureStatement {
    pub with_override: bool,
}

impl fmt::Display for ReconfigureStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RECONFIGURE")?;
        if self.with_override {
            write!(f, " WITH OVERRIDE")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExecuteAsStatement {
    ExecuteAsLogin(Expr),
    ExecuteAsUser(Expr),
    Revert,
}

impl fmt::Display for ExecuteAsStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExecuteAsStatement::ExecuteAsLogin(e) => write!(f, "EXECUTE AS LOGIN = {e}"),
            ExecuteAsStatement::ExecuteAsUser(e) => write!(f, "EXECUTE AS USER = {e}"),
            ExecuteAsStatement::Revert => write!(f, "REVERT"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriggerStateStatement {
    pub enable: bool,
    pub trigger: ObjectName,
    pub table: Option<ObjectName>,
}

impl fmt::Display for TriggerStateStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} TRIGGER {}",
            if self.enable { "ENABLE" } else { "DISABLE" },
            self.trigger
        )?;
        if let Some(table) = &self.table {
            write!(f, " ON {table}")?;
        }
        Ok(())
    }
}

/// The Service Broker DDL/DML surface (`CREATE QUEUE`, `CREATE SERVICE`,
/// `SEND ON CONVERSATION`, ...) unified into one statement shape the way
/// `GRANT`/`REVOKE`/`DENY` are: these all reduce to a verb, a target name,
/// and an option bag (spec.md's redesign note on Service Broker statements).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServiceBrokerStatement {
    pub verb: Ident,
    pub object_kind: Ident,
    pub name: Option<ObjectName>,
    pub options: Vec<(Ident, Expr)>,
}

impl fmt::Display for ServiceBrokerStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.verb, self.object_kind)?;
        if let Some(name) = &self.name {
            write!(f, " {name}")?;
        }
        if !self.options.is_empty() {
            write!(f, " (")?;
            let rendered: Vec<String> = self
                .options
                .iter()
                .map(|(k, v)| format!("{k} = {v}"))
                .collect();
            write!(f, "{}", rendered.join(", "))?;
            write!(f, ")")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UseStatement {
    pub database: Ident,
}

impl fmt::Display for UseStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "USE {}", self.database)
    }
}

/// A batch separator. `GO` is a client-tool convention, not real T-SQL
/// grammar, but the parser accepts it as a statement boundary (spec.md §3.1)
/// and an optional repeat count (`GO 5`).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GoStatement {
    pub count: Option<u64>,
}

impl fmt::Display for GoStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "GO")?;
        if let Some(count) = self.count {
            write!(f, " {count}")?;
        }
        Ok(())
    }
}

/// The closed set of top-level `Statement` variants (spec.md §3.2). DML,
/// DDL, control-flow, transaction, cursor, and admin/security statements are
/// all tagged variants of the same enum rather than trait objects, following
/// the `Expr`/`TableFactor` design already used elsewhere in the tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Statement {
    Query(Box<Query>),
    Insert(InsertStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
    Merge(MergeStatement),
    Truncate(TruncateStatement),

    CreateTable(CreateTableStatement),
    CreateView(CreateViewStatement),
    CreateIndex(CreateIndexStatement),
    CreateProcedure(CreateProcedureStatement),
    CreateFunction(CreateFunctionStatement),
    CreateTrigger(CreateTriggerStatement),
    CreateSequence(CreateSequenceStatement),
    CreateSchema(CreateSchemaStatement),
    CreateDatabase(CreateDatabaseStatement),
    CreateSynonym(CreateSynonymStatement),
    CreateType(CreateTypeStatement),
    CreateXmlSchemaCollection(CreateXmlSchemaCollectionStatement),
    CreateSecurityObject(CreateSecurityObjectStatement),
    AlterTable(AlterTableStatement),
    Drop(DropStatement),

    Block(Block),
    If(IfStatement),
    While(WhileStatement),
    TryCatch(TryCatchStatement),
    Throw(ThrowStatement),
    RaiseError(RaiseErrorStatement),
    Print(PrintStatement),
    Goto(Ident),
    Label(Ident),
    Break,
    Continue,
    Return(Option<Expr>),
    WaitFor(WaitForStatement),

    Transaction(TransactionStatement),

    DeclareCursor(DeclareCursorStatement),
    OpenCursor(OpenCursorStatement),
    FetchCursor(FetchCursorStatement),
    CloseCursor(CloseCursorStatement),
    DeallocateCursor(DeallocateCursorStatement),

    DeclareVariable(DeclareVariableStatement),
    SetVariable(SetVariableStatement),
    SetOption(SetOptionStatement),
    ExecuteProcedure(ExecuteProcedureStatement),

    GrantRevoke(GrantRevokeStatement),
    Backup(BackupStatement),
    Restore(RestoreStatement),
    Dbcc(DbccStatement),
    BulkInsert(BulkInsertStatement),
    Reconfigure(ReconfigureStatement),
    ExecuteAs(ExecuteAsStatement),
    TriggerState(TriggerStateStatement),
    ServiceBroker(ServiceBrokerStatement),

    Use(UseStatement),
    Go(GoStatement),
}

impl Statement {
    /// The originating token's literal text (spec.md §3.2's `literal`
    /// operation): the statement's leading keyword(s).
    pub fn literal(&self) -> &'static str {
        match self {
            Statement::Query(_) => "SELECT",
            Statement::Insert(_) => "INSERT",
            Statement::Update(_) => "UPDATE",
            Statement::Delete(_) => "DELETE",
            Statement::Merge(_) => "MERGE",
            Statement::Truncate(_) => "TRUNCATE",
            Statement::CreateTable(_) => "CREATE",
            Statement::CreateView(_) => "CREATE",
            Statement::CreateIndex(_) => "CREATE",
            Statement::CreateProcedure(_) => "CREATE",
            Statement::CreateFunction(_) => "CREATE",
            Statement::CreateTrigger(_) => "CREATE",
            Statement::CreateSequence(_) => "CREATE",
            Statement::CreateSchema(_) => "CREATE",
            Statement::CreateDatabase(_) => "CREATE",
            Statement::CreateSynonym(_) => "CREATE",
            Statement::CreateType(_) => "CREATE",
            Statement::CreateXmlSchemaCollection(_) => "CREATE",
            Statement::CreateSecurityObject(_) => "CREATE",
            Statement::AlterTable(_) => "ALTER",
            Statement::Drop(_) => "DROP",
            Statement::Block(_) => "BEGIN",
            Statement::If(_) => "IF",
            Statement::While(_) => "WHILE",
            Statement::TryCatch(_) => "BEGIN",
            Statement::Throw(_) => "THROW",
            Statement::RaiseError(_) => "RAISERROR",
            Statement::Print(_) => "PRINT",
            Statement::Goto(_) => "GOTO",
            Statement::Label(_) => "LABEL",
            Statement::Break => "BREAK",
            Statement::Continue => "CONTINUE",
            Statement::Return(_) => "RETURN",
            Statement::WaitFor(_) => "WAITFOR",
            Statement::Transaction(t) => match t.kind {
                TransactionKind::Begin => "BEGIN",
                TransactionKind::Commit => "COMMIT",
                TransactionKind::Rollback => "ROLLBACK",
                TransactionKind::Save => "SAVE",
            },
            Statement::DeclareCursor(_) => "DECLARE",
            Statement::OpenCursor(_) => "OPEN",
            Statement::FetchCursor(_) => "FETCH",
            Statement::CloseCursor(_) => "CLOSE",
            Statement::DeallocateCursor(_) => "DEALLOCATE",
            Statement::DeclareVariable(_) => "DECLARE",
            Statement::SetVariable(_) => "SET",
            Statement::SetOption(_) => "SET",
            Statement::ExecuteProcedure(_) => "EXEC",
            Statement::GrantRevoke(s) => match s.kind {
                GrantRevokeKind::Grant => "GRANT",
                GrantRevokeKind::Revoke => "REVOKE",
                GrantRevokeKind::Deny => "DENY",
            },
            Statement::Backup(_) => "BACKUP",
            Statement::Restore(_) => "RESTORE",
            Statement::Dbcc(_) => "DBCC",
            Statement::BulkInsert(_) => "BULK",
            Statement::Reconfigure(_) => "RECONFIGURE",
            Statement::ExecuteAs(_) => "EXECUTE",
            Statement::TriggerState(s) => {
                if s.enable {
                    "ENABLE"
                } else {
                    "DISABLE"
                }
            }
            Statement::ServiceBroker(s) => match s.verb.value.to_uppercase().as_str() {
                "SEND" => "SEND",
                "RECEIVE" => "RECEIVE",
                "GET" => "GET",
                "MOVE" => "MOVE",
                "END" => "END",
                _ => "BEGIN",
            },
            Statement::Use(_) => "USE",
            Statement::Go(_) => "GO",
        }
    }

    /// The SQL-text serialization of this statement (spec.md §3.2's `render`
    /// operation); equivalent to `to_string()`.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Statement::Query(q) => write!(f, "{q}"),
            Statement::Insert(s) => write!(f, "{s}"),
            Statement::Update(s) => write!(f, "{s}"),
            Statement::Delete(s) => write!(f, "{s}"),
            Statement::Merge(s) => write!(f, "{s}"),
            Statement::Truncate(s) => write!(f, "{s}"),
            Statement::CreateTable(s) => write!(f, "{s}"),
            Statement::CreateView(s) => write!(f, "{s}"),
            Statement::CreateIndex(s) => write!(f, "{s}"),
            Statement::CreateProcedure(s) => write!(f, "{s}"),
            Statement::CreateFunction(s) => write!(f, "{s}"),
            Statement::CreateTrigger(s) => write!(f, "{s}"),
            Statement::CreateSequence(s) => write!(f, "{s}"),
            Statement::CreateSchema(s) => write!(f, "{s}"),
            Statement::CreateDatabase(s) => write!(f, "{s}"),
            Statement::CreateSynonym(s) => write!(f, "{s}"),
            Statement::CreateType(s) => write!(f, "{s}"),
            Statement::CreateXmlSchemaCollection(s) => write!(f, "{s}"),
            Statement::CreateSecurityObject(s) => write!(f, "{s}"),
            Statement::AlterTable(s) => write!(f, "{s}"),
            Statement::Drop(s) => write!(f, "{s}"),
            Statement::Block(s) => write!(f, "{s}"),
            Statement::If(s) => write!(f, "{s}"),
            Statement::While(s) => write!(f, "{s}"),
            Statement::TryCatch(s) => write!(f, "{s}"),
            Statement::Throw(s) => write!(f, "{s}"),
            Statement::RaiseError(s) => write!(f, "{s}"),
            Statement::Print(s) => write!(f, "{s}"),
            Statement::Goto(label) => write!(f, "GOTO {label}"),
            Statement::Label(label) => write!(f, "{label}:"),
            Statement::Break => write!(f, "BREAK"),
            Statement::Continue => write!(f, "CONTINUE"),
            Statement::Return(None) => write!(f, "RETURN"),
            Statement::Return(Some(e)) => write!(f, "RETURN {e}"),
            Statement::WaitFor(s) => write!(f, "{s}"),
            Statement::Transaction(s) => write!(f, "{s}"),
            Statement::DeclareCursor(s) => write!(f, "{s}"),
            Statement::OpenCursor(s) => write!(f, "{s}"),
            Statement::FetchCursor(s) => write!(f, "{s}"),
            Statement::CloseCursor(s) => write!(f, "{s}"),
            Statement::DeallocateCursor(s) => write!(f, "{s}"),
            Statement::DeclareVariable(s) => write!(f, "{s}"),
            Statement::SetVariable(s) => write!(f, "{s}"),
            Statement::SetOption(s) => write!(f, "{s}"),
            Statement::ExecuteProcedure(s) => write!(f, "{s}"),
            Statement::GrantRevoke(s) => write!(f, "{s}"),
            Statement::Backup(s) => write!(f, "{s}"),
            Statement::Restore(s) => write!(f, "{s}"),
            Statement::Dbcc(s) => write!(f, "{s}"),
            Statement::BulkInsert(s) => write!(f, "{s}"),
            Statement::Reconfigure(s) => write!(f, "{s}"),
            Statement::ExecuteAs(s) => write!(f, "{s}"),
            Statement::TriggerState(s) => write!(f, "{s}"),
            Statement::ServiceBroker(s) => write!(f, "{s}"),
            Statement::Use(s) => write!(f, "{s}"),
            Statement::Go(s) => write!(f, "{s}"),
        }
    }
}
