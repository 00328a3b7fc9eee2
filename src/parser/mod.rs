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

//! Recursive-descent, Pratt-style parser for T-SQL (spec.md §4.2). Builds a
//! [`Program`] from the token stream [`crate::tokenizer::Tokenizer`]
//! produces; statement-level errors are recorded and the parser resyncs to
//! the next statement boundary rather than aborting (spec.md §4.2, §7).

use core::fmt;

use crate::ast::*;
use crate::dialect::keywords::{self, AllKeyWords};
use crate::dialect::Dialect;
use crate::tokenizer::{Location, Token, TokenWithLocation, Tokenizer, TokenizerError, Word};

/// How deep `parse_subexpr`/statement recursion may go before the parser
/// gives up rather than blow the real call stack on adversarial input
/// (spec.md §7 category 2, `ParserError::RecursionLimitExceeded`).
const RECURSION_LIMIT: u32 = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    ParserError { message: String, location: Location },
    RecursionLimitExceeded,
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParserError::ParserError { message, location } => {
                write!(f, "{message} at {location}")
            }
            ParserError::RecursionLimitExceeded => write!(f, "recursion limit exceeded"),
        }
    }
}

impl std::error::Error for ParserError {}

impl From<TokenizerError> for ParserError {
    fn from(e: TokenizerError) -> Self {
        ParserError::ParserError {
            message: e.message,
            location: e.location,
        }
    }
}

/// The outcome of parsing a whole buffer: as many statements as could be
/// recovered, plus every lexer/parser diagnostic encountered along the way
/// (spec.md §4.2 "Failure": collect, don't abort).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseResult {
    pub program: Program,
    pub errors: Vec<ParserError>,
}

/// Tokenizes and parses `sql` under `dialect`, recovering from both lexer
/// and parser errors at statement boundaries.
pub fn parse(dialect: &dyn Dialect, sql: &str) -> ParseResult {
    let mut tokenizer = Tokenizer::new(dialect, sql);
    let (tokens, tokenizer_errors) = tokenizer.tokenize();
    let mut errors: Vec<ParserError> = tokenizer_errors.into_iter().map(ParserError::from).collect();
    let mut parser = Parser::new(dialect, tokens);
    let program = parser.parse_program(&mut errors);
    ParseResult { program, errors }
}

pub struct Parser<'a> {
    tokens: Vec<TokenWithLocation>,
    index: usize,
    dialect: &'a dyn Dialect,
    depth: u32,
}

/// Statement-starting keywords the resync recovery scans for: on a parse
/// error within one statement, skipping to the next occurrence of one of
/// these (or `;`/`GO`/EOF) lets parsing continue with the next statement
/// (spec.md §4.2, §7 category 2).
const STATEMENT_START_KEYWORDS: &[AllKeyWords] = &[
    AllKeyWords::SELECT,
    AllKeyWords::WITH,
    AllKeyWords::INSERT,
    AllKeyWords::UPDATE,
    AllKeyWords::DELETE,
    AllKeyWords::MERGE,
    AllKeyWords::TRUNCATE,
    AllKeyWords::CREATE,
    AllKeyWords::ALTER,
    AllKeyWords::DROP,
    AllKeyWords::BEGIN,
    AllKeyWords::IF,
    AllKeyWords::WHILE,
    AllKeyWords::THROW,
    AllKeyWords::RAISERROR,
    AllKeyWords::PRINT,
    AllKeyWords::GOTO,
    AllKeyWords::BREAK,
    AllKeyWords::RETURN,
    AllKeyWords::WAITFOR,
    AllKeyWords::COMMIT,
    AllKeyWords::ROLLBACK,
    AllKeyWords::SAVE,
    AllKeyWords::DECLARE,
    AllKeyWords::SET,
    AllKeyWords::OPEN,
    AllKeyWords::CLOSE,
    AllKeyWords::FETCH,
    AllKeyWords::DEALLOCATE,
    AllKeyWords::EXEC,
    AllKeyWords::EXECUTE,
    AllKeyWords::GRANT,
    AllKeyWords::REVOKE,
    AllKeyWords::DENY,
    AllKeyWords::BACKUP,
    AllKeyWords::RESTORE,
    AllKeyWords::DBCC,
    AllKeyWords::BULK,
    AllKeyWords::RECONFIGURE,
    AllKeyWords::REVERT,
    AllKeyWords::ENABLE,
    AllKeyWords::DISABLE,
    AllKeyWords::USE,
    AllKeyWords::GET,
    AllKeyWords::RECEIVE,
];

impl<'a> Parser<'a> {
    pub fn new(dialect: &'a dyn Dialect, tokens: Vec<TokenWithLocation>) -> Self {
        Parser {
            tokens,
            index: 0,
            dialect,
            depth: 0,
        }
    }

    pub fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    fn peek(&self) -> &Token {
        self.tokens
            .get(self.index)
            .map(|t| &t.token)
            .unwrap_or(&Token::EOF)
    }

    fn peek_nth(&self, n: usize) -> &Token {
        self.tokens
            .get(self.index + n)
            .map(|t| &t.token)
            .unwrap_or(&Token::EOF)
    }

    fn peek_location(&self) -> Location {
        self.tokens
            .get(self.index)
            .map(|t| t.location)
            .unwrap_or_else(|| self.tokens.last().map(|t| t.location).unwrap_or_default())
    }

    fn at_eof(&self) -> bool {
        matches!(self.peek(), Token::EOF)
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens.get(self.index).map(|t| t.token.clone()).unwrap_or(Token::EOF);
        if !matches!(tok, Token::EOF) {
            self.index += 1;
        }
        tok
    }

    fn error<T>(&self, message: impl Into<String>) -> Result<T, ParserError> {
        Err(ParserError::ParserError {
            message: message.into(),
            location: self.peek_location(),
        })
    }

    fn with_depth_guard<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParserError>,
    ) -> Result<T, ParserError> {
        self.depth += 1;
        if self.depth > RECURSION_LIMIT {
            self.depth -= 1;
            return Err(ParserError::RecursionLimitExceeded);
        }
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn word_keyword(tok: &Token) -> Option<AllKeyWords> {
        match tok {
            Token::Word(Word {
                keyword: Some(kw),
                quote_style: None,
                ..
            }) => Some(*kw),
            _ => None,
        }
    }

    fn peek_keyword(&self, kw: AllKeyWords) -> bool {
        Self::word_keyword(self.peek()) == Some(kw)
    }

    fn peek_nth_keyword(&self, n: usize, kw: AllKeyWords) -> bool {
        Self::word_keyword(self.peek_nth(n)) == Some(kw)
    }

    /// True when the current token is a bare (unquoted, keyword-less) word
    /// equal to `s`, case-insensitively. Used for the handful of pseudo
    /// keywords (`GO`, `TRY_CAST`, `PROC`, ...) that spec.md treats
    /// specially but which never made it into the reserved keyword table.
    fn peek_word_ci(&self, s: &str) -> bool {
        matches!(self.peek(), Token::Word(w) if w.quote_style.is_none() && w.value.eq_ignore_ascii_case(s))
    }

    fn consume_keyword(&mut self, kw: AllKeyWords) -> bool {
        if self.peek_keyword(kw) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume_word_ci(&mut self, s: &str) -> bool {
        if self.peek_word_ci(s) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, kw: AllKeyWords) -> Result<(), ParserError> {
        if self.consume_keyword(kw) {
            Ok(())
        } else {
            self.error(format!("expected {kw:?}, found {}", self.peek()))
        }
    }

    fn consume_token(&mut self, tok: &Token) -> bool {
        if self.peek() == tok {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_token(&mut self, tok: &Token) -> Result<(), ParserError> {
        if self.consume_token(tok) {
            Ok(())
        } else {
            self.error(format!("expected {tok}, found {}", self.peek()))
        }
    }

    fn peek_is_go(&self) -> bool {
        self.peek_word_ci("GO")
    }

    // ---- top-level program ----------------------------------------------

    pub fn parse_program(&mut self, errors: &mut Vec<ParserError>) -> Program {
        let mut statements = Vec::new();
        while !self.at_eof() {
            while self.consume_token(&Token::SemiColon) {}
            if self.at_eof() {
                break;
            }
            if self.peek_is_go() {
                self.advance();
                let count = match self.peek() {
                    Token::Number(n) => {
                        let n = n.clone();
                        self.advance();
                        n.parse::<u64>().ok()
                    }
                    _ => None,
                };
                statements.push(Statement::Go(GoStatement { count }));
                continue;
            }
            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(e) => {
                    errors.push(e);
                    self.resync_to_next_statement();
                }
            }
            self.consume_token(&Token::SemiColon);
        }
        Program { statements }
    }

    fn resync_to_next_statement(&mut self) {
        while !self.at_eof() {
            if matches!(self.peek(), Token::SemiColon) || self.peek_is_go() {
                return;
            }
            if matches!(
                self.peek(),
                Token::Compound(CompoundKeyword::TruncateTable)
                    | Token::Compound(CompoundKeyword::BeginTry)
                    | Token::Compound(CompoundKeyword::EndConversation)
            ) {
                return;
            }
            if self.peek_word_ci("SEND") || self.peek_word_ci("MOVE") {
                return;
            }
            if let Some(kw) = Self::word_keyword(self.peek()) {
                if STATEMENT_START_KEYWORDS.contains(&kw) {
                    return;
                }
            }
            self.advance();
        }
    }

    // ---- statement dispatch ----------------------------------------------

    pub fn parse_statement(&mut self) -> Result<Statement, ParserError> {
        self.with_depth_guard(|p| p.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<Statement, ParserError> {
        // TRUNCATE TABLE and BEGIN TRY are promoted to single Compound tokens
        // by the tokenizer, so they never surface as Token::Word(TRUNCATE)/
        // Token::Word(BEGIN) for the keyword dispatch below to see.
        if matches!(self.peek(), Token::Compound(CompoundKeyword::TruncateTable)) {
            return self.parse_truncate();
        }
        if matches!(self.peek(), Token::Compound(CompoundKeyword::BeginTry)) {
            return self.parse_begin();
        }
        if matches!(self.peek(), Token::Compound(CompoundKeyword::EndConversation)) {
            return self.parse_end_conversation();
        }
        if self.peek_word_ci("SEND") {
            return self.parse_send();
        }
        if self.peek_word_ci("MOVE") {
            return self.parse_move_conversation();
        }
        if let Some(kw) = Self::word_keyword(self.peek()) {
            return match kw {
                AllKeyWords::SELECT | AllKeyWords::WITH => {
                    Ok(Statement::Query(Box::new(self.parse_query()?)))
                }
                AllKeyWords::INSERT => self.parse_insert(),
                AllKeyWords::UPDATE => self.parse_update(),
                AllKeyWords::DELETE => self.parse_delete(),
                AllKeyWords::MERGE => self.parse_merge(),
                AllKeyWords::TRUNCATE => self.parse_truncate(),
                AllKeyWords::CREATE => self.parse_create(),
                AllKeyWords::ALTER => self.parse_alter(),
                AllKeyWords::DROP => self.parse_drop(),
                AllKeyWords::BEGIN => self.parse_begin(),
                AllKeyWords::IF => self.parse_if(),
                AllKeyWords::WHILE => self.parse_while(),
                AllKeyWords::THROW => self.parse_throw(),
                AllKeyWords::RAISERROR => self.parse_raiserror(),
                AllKeyWords::PRINT => self.parse_print(),
                AllKeyWords::GOTO => {
                    self.advance();
                    Ok(Statement::Goto(self.parse_identifier()?))
                }
                AllKeyWords::BREAK => {
                    self.advance();
                    Ok(Statement::Break)
                }
                AllKeyWords::CONTINUE => {
                    self.advance();
                    Ok(Statement::Continue)
                }
                AllKeyWords::RETURN => self.parse_return(),
                AllKeyWords::WAITFOR => self.parse_waitfor(),
                AllKeyWords::COMMIT => self.parse_transaction(TransactionKind::Commit),
                AllKeyWords::ROLLBACK => self.parse_transaction(TransactionKind::Rollback),
                AllKeyWords::SAVE => self.parse_transaction(TransactionKind::Save),
                AllKeyWords::DECLARE => self.parse_declare(),
                AllKeyWords::SET => self.parse_set(),
                AllKeyWords::GET => self.parse_get_conversation_group(),
                AllKeyWords::RECEIVE => self.parse_receive(),
                AllKeyWords::OPEN => self.parse_open_cursor(),
                AllKeyWords::CLOSE => self.parse_close_cursor(),
                AllKeyWords::FETCH => self.parse_fetch_cursor(),
                AllKeyWords::DEALLOCATE => self.parse_deallocate_cursor(),
                AllKeyWords::EXEC | AllKeyWords::EXECUTE => self.parse_execute(),
                AllKeyWords::GRANT => self.parse_grant_revoke(GrantRevokeKind::Grant),
                AllKeyWords::REVOKE => self.parse_grant_revoke(GrantRevokeKind::Revoke),
                AllKeyWords::DENY => self.parse_grant_revoke(GrantRevokeKind::Deny),
                AllKeyWords::BACKUP => self.parse_backup(),
                AllKeyWords::RESTORE => self.parse_restore(),
                AllKeyWords::DBCC => self.parse_dbcc(),
                AllKeyWords::BULK => self.parse_bulk_insert(),
                AllKeyWords::RECONFIGURE => {
                    self.advance();
                    let with_override = self.consume_keyword(AllKeyWords::WITH)
                        && self.consume_word_ci("OVERRIDE");
                    Ok(Statement::Reconfigure(ReconfigureStatement { with_override }))
                }
                AllKeyWords::REVERT => {
                    self.advance();
                    Ok(Statement::ExecuteAs(ExecuteAsStatement::Revert))
                }
                AllKeyWords::ENABLE => self.parse_trigger_state(true),
                AllKeyWords::DISABLE => self.parse_trigger_state(false),
                AllKeyWords::USE => {
                    self.advance();
                    Ok(Statement::Use(UseStatement {
                        database: self.parse_identifier()?,
                    }))
                }
                _ => self.parse_label_or_error(),
            };
        }
        self.parse_label_or_error()
    }

    fn parse_label_or_error(&mut self) -> Result<Statement, ParserError> {
        if matches!(self.peek(), Token::Word(w) if w.quote_style.is_none())
            && matches!(self.peek_nth(1), Token::Colon)
        {
            let label = self.parse_identifier()?;
            self.advance(); // ':'
            return Ok(Statement::Label(label));
        }
        self.error(format!("expected a statement, found {}", self.peek()))
    }

    // ---- identifiers / names ----------------------------------------------

    fn parse_identifier(&mut self) -> Result<Ident, ParserError> {
        let location = self.peek_location();
        match self.peek().clone() {
            Token::Word(w) => {
                if w.quote_style.is_none() {
                    if let Some(kw) = w.keyword {
                        if !keywords::is_identifier_permissive(&w.value.to_uppercase())
                            && keywords::is_reserved_for_table_alias(&w.value.to_uppercase())
                        {
                            return self.error(format!("expected identifier, found keyword {kw:?}"));
                        }
                    }
                }
                self.advance();
                Ok(Ident::at(w.value, location))
            }
            other => self.error(format!("expected identifier, found {other}")),
        }
    }

    fn parse_object_name(&mut self) -> Result<ObjectName, ParserError> {
        let mut parts = vec![self.parse_identifier()?];
        while self.consume_token(&Token::Period) {
            parts.push(self.parse_identifier()?);
        }
        Ok(ObjectName::new(parts))
    }

    fn parse_variable(&mut self) -> Result<Variable, ParserError> {
        let location = self.peek_location();
        match self.advance() {
            Token::LocalVariable(name) => Ok(Variable {
                name,
                scope: VariableScope::Local,
                location,
            }),
            Token::SystemVariable(name) => Ok(Variable {
                name,
                scope: VariableScope::System,
                location,
            }),
            other => self.error(format!("expected a variable, found {other}")),
        }
    }

    // ---- expressions -------------------------------------------------------

    pub fn parse_expr(&mut self) -> Result<Expr, ParserError> {
        self.parse_subexpr(0)
    }

    fn parse_subexpr(&mut self, min_prec: u8) -> Result<Expr, ParserError> {
        self.with_depth_guard(|p| {
            let mut expr = p.parse_prefix()?;
            loop {
                let next_prec = p.next_precedence();
                if next_prec == 0 || next_prec <= min_prec {
                    break;
                }
                expr = p.parse_infix(expr, next_prec)?;
            }
            Ok(expr)
        })
    }

    fn next_precedence(&self) -> u8 {
        match self.peek() {
            Token::Word(Word { keyword: Some(kw), quote_style: None, .. }) => match kw {
                AllKeyWords::OR => 10,
                AllKeyWords::AND => 20,
                AllKeyWords::IS | AllKeyWords::IN | AllKeyWords::BETWEEN | AllKeyWords::LIKE => 40,
                AllKeyWords::NOT => 40,
                AllKeyWords::COLLATE => 110,
                _ => 0,
            },
            Token::Compound(CompoundKeyword::IsDistinctFrom)
            | Token::Compound(CompoundKeyword::IsNotDistinctFrom) => 40,
            Token::Compound(CompoundKeyword::AtTimeZone) => 110,
            Token::Eq
            | Token::Neq
            | Token::Lt
            | Token::Gt
            | Token::LtEq
            | Token::GtEq
            | Token::NotLt
            | Token::NotGt => 40,
            Token::BitwiseOr => 50,
            Token::BitwiseXor => 60,
            Token::BitwiseAnd => 70,
            Token::Plus | Token::Minus => 80,
            Token::Mul | Token::Div | Token::Mod => 90,
            Token::Period | Token::DoubleColon => 120,
            _ => 0,
        }
    }

    fn parse_infix(&mut self, left: Expr, prec: u8) -> Result<Expr, ParserError> {
        if self.consume_keyword(AllKeyWords::OR) {
            let right = self.parse_subexpr(prec)?;
            return Ok(Expr::BinaryOp { left: Box::new(left), op: BinaryOperator::Or, right: Box::new(right) });
        }
        if self.consume_keyword(AllKeyWords::AND) {
            let right = self.parse_subexpr(prec)?;
            return Ok(Expr::BinaryOp { left: Box::new(left), op: BinaryOperator::And, right: Box::new(right) });
        }
        if self.peek_keyword(AllKeyWords::IS) {
            self.advance();
            let negated = self.consume_keyword(AllKeyWords::NOT);
            if self.consume_keyword(AllKeyWords::NULL) {
                return Ok(if negated { Expr::IsNotNull(Box::new(left)) } else { Expr::IsNull(Box::new(left)) });
            }
            return self.error("expected NULL after IS [NOT]");
        }
        if let Token::Compound(CompoundKeyword::IsDistinctFrom) = self.peek() {
            self.advance();
            let right = self.parse_subexpr(prec)?;
            return Ok(Expr::IsDistinctFrom(Box::new(left), Box::new(right)));
        }
        if let Token::Compound(CompoundKeyword::IsNotDistinctFrom) = self.peek() {
            self.advance();
            let right = self.parse_subexpr(prec)?;
            return Ok(Expr::IsNotDistinctFrom(Box::new(left), Box::new(right)));
        }
        if self.peek_keyword(AllKeyWords::NOT) {
            self.advance();
            if self.consume_keyword(AllKeyWords::IN) {
                return self.parse_in(left, true);
            }
            if self.consume_keyword(AllKeyWords::BETWEEN) {
                return self.parse_between(left, true);
            }
            if self.consume_keyword(AllKeyWords::LIKE) {
                return self.parse_like(left, true);
            }
            return self.error("expected IN, BETWEEN or LIKE after NOT");
        }
        if self.consume_keyword(AllKeyWords::IN) {
            return self.parse_in(left, false);
        }
        if self.consume_keyword(AllKeyWords::BETWEEN) {
            return self.parse_between(left, false);
        }
        if self.consume_keyword(AllKeyWords::LIKE) {
            return self.parse_like(left, false);
        }
        if self.consume_keyword(AllKeyWords::COLLATE) {
            let collation = self.parse_object_name()?;
            return Ok(Expr::Collate { expr: Box::new(left), collation });
        }
        if let Token::Compound(CompoundKeyword::AtTimeZone) = self.peek() {
            self.advance();
            let time_zone = self.parse_subexpr(prec)?;
            return Ok(Expr::AtTimeZone { timestamp: Box::new(left), time_zone: Box::new(time_zone) });
        }
        if self.peek() == &Token::Period {
            self.advance();
            let method = self.parse_identifier()?;
            let args = self.parse_call_args()?;
            return Ok(Expr::MethodCall { expr: Box::new(left), method, args });
        }
        if self.peek() == &Token::DoubleColon {
            self.advance();
            let type_name = self.expr_to_object_name(left)?;
            let method = self.parse_identifier()?;
            let args = self.parse_call_args()?;
            return Ok(Expr::StaticMethodCall { type_name, method, args });
        }
        let op = match self.advance() {
            Token::Eq => BinaryOperator::Eq,
            Token::Neq => BinaryOperator::NotEq,
            Token::Lt => BinaryOperator::Lt,
            Token::Gt => BinaryOperator::Gt,
            Token::LtEq => BinaryOperator::LtEq,
            Token::GtEq => BinaryOperator::GtEq,
            Token::NotLt => BinaryOperator::NotLt,
            Token::NotGt => BinaryOperator::NotGt,
            Token::BitwiseOr => BinaryOperator::BitwiseOr,
            Token::BitwiseXor => BinaryOperator::BitwiseXor,
            Token::BitwiseAnd => BinaryOperator::BitwiseAnd,
            Token::Plus => BinaryOperator::Plus,
            Token::Minus => BinaryOperator::Minus,
            Token::Mul => BinaryOperator::Multiply,
            Token::Div => BinaryOperator::Divide,
            Token::Mod => BinaryOperator::Modulo,
            other => return self.error(format!("unexpected infix operator {other}")),
        };
        let right = self.parse_subexpr(prec)?;
        Ok(Expr::BinaryOp { left: Box::new(left), op, right: Box::new(right) })
    }

    fn parse_in(&mut self, expr: Expr, negated: bool) -> Result<Expr, ParserError> {
        self.expect_token(&Token::LParen)?;
        if self.peek_keyword(AllKeyWords::SELECT) || self.peek_keyword(AllKeyWords::WITH) {
            let subquery = self.parse_query()?;
            self.expect_token(&Token::RParen)?;
            return Ok(Expr::InSubquery { expr: Box::new(expr), subquery: Box::new(subquery), negated });
        }
        let list = self.parse_comma_separated(Self::parse_expr)?;
        self.expect_token(&Token::RParen)?;
        Ok(Expr::InList { expr: Box::new(expr), list, negated })
    }

    fn parse_between(&mut self, expr: Expr, negated: bool) -> Result<Expr, ParserError> {
        let low = self.parse_subexpr(40)?;
        self.expect_keyword(AllKeyWords::AND)?;
        let high = self.parse_subexpr(40)?;
        Ok(Expr::Between { expr: Box::new(expr), negated, low: Box::new(low), high: Box::new(high) })
    }

    fn parse_like(&mut self, expr: Expr, negated: bool) -> Result<Expr, ParserError> {
        let pattern = self.parse_subexpr(40)?;
        let escape = if self.consume_word_ci("ESCAPE") {
            Some(Box::new(self.parse_subexpr(40)?))
        } else {
            None
        };
        Ok(Expr::Like { negated, expr: Box::new(expr), pattern: Box::new(pattern), escape })
    }

    fn parse_prefix(&mut self) -> Result<Expr, ParserError> {
        if let Some(kw) = Self::word_keyword(self.peek()) {
            match kw {
                AllKeyWords::NOT => {
                    self.advance();
                    let expr = self.parse_subexpr(30)?;
                    return Ok(Expr::UnaryOp { op: UnaryOperator::Not, expr: Box::new(expr) });
                }
                AllKeyWords::NULL => {
                    self.advance();
                    return Ok(Expr::Value(Value::Null));
                }
                AllKeyWords::TRUE => {
                    self.advance();
                    return Ok(Expr::Value(Value::Boolean(true)));
                }
                AllKeyWords::FALSE => {
                    self.advance();
                    return Ok(Expr::Value(Value::Boolean(false)));
                }
                AllKeyWords::CASE => return self.parse_case_expr(),
                AllKeyWords::CAST => return self.parse_cast_expr(CastKind::Cast),
                AllKeyWords::CONVERT => return self.parse_convert_expr(ConvertKind::Convert),
                AllKeyWords::EXISTS => {
                    self.advance();
                    self.expect_token(&Token::LParen)?;
                    let subquery = self.parse_query()?;
                    self.expect_token(&Token::RParen)?;
                    return Ok(Expr::Exists { subquery: Box::new(subquery), negated: false });
                }
                AllKeyWords::CONTAINS => {
                    self.advance();
                    self.expect_token(&Token::LParen)?;
                    let column = self.parse_expr()?;
                    self.expect_token(&Token::Comma)?;
                    let search = self.parse_expr()?;
                    self.expect_token(&Token::RParen)?;
                    return Ok(Expr::Contains { column: Box::new(column), search: Box::new(search) });
                }
                AllKeyWords::CURSOR => {
                    self.advance();
                    self.expect_keyword(AllKeyWords::FOR)?;
                    let query = self.parse_query()?;
                    return Ok(Expr::CursorExpr(Box::new(query)));
                }
                _ => {}
            }
        }
        match self.peek().clone() {
            Token::Compound(CompoundKeyword::NextValueFor) => {
                self.advance();
                let name = self.parse_object_name()?;
                Ok(Expr::NextValueFor(name))
            }
            Token::Number(n) => {
                self.advance();
                Ok(Expr::Value(Value::Number(n)))
            }
            Token::SingleQuotedString(s) => {
                self.advance();
                Ok(Expr::Value(Value::SingleQuotedString(s)))
            }
            Token::NationalStringLiteral(s) => {
                self.advance();
                Ok(Expr::Value(Value::NationalStringLiteral(s)))
            }
            Token::HexStringLiteral(s) => {
                self.advance();
                Ok(Expr::Value(Value::HexStringLiteral(s)))
            }
            Token::Money(s) => {
                self.advance();
                Ok(Expr::Value(Value::Money(s)))
            }
            Token::LocalVariable(_) | Token::SystemVariable(_) => {
                let var = self.parse_variable()?;
                Ok(Expr::Variable(var))
            }
            Token::Plus => {
                self.advance();
                let expr = self.parse_subexpr(100)?;
                Ok(Expr::UnaryOp { op: UnaryOperator::Plus, expr: Box::new(expr) })
            }
            Token::Minus => {
                self.advance();
                let expr = self.parse_subexpr(100)?;
                Ok(Expr::UnaryOp { op: UnaryOperator::Minus, expr: Box::new(expr) })
            }
            Token::BitwiseNot => {
                self.advance();
                let expr = self.parse_subexpr(100)?;
                Ok(Expr::UnaryOp { op: UnaryOperator::BitwiseNot, expr: Box::new(expr) })
            }
            Token::Mul => {
                self.advance();
                Ok(Expr::Wildcard)
            }
            Token::LParen => self.parse_paren_expr(),
            Token::Word(_) => self.parse_identifier_expr(),
            other => self.error(format!("expected expression, found {other}")),
        }
    }

    fn parse_paren_expr(&mut self) -> Result<Expr, ParserError> {
        self.advance(); // '('
        if self.peek_keyword(AllKeyWords::SELECT) || self.peek_keyword(AllKeyWords::WITH) {
            let query = self.parse_query()?;
            self.expect_token(&Token::RParen)?;
            return Ok(Expr::Subquery(Box::new(query)));
        }
        let mut exprs = vec![self.parse_expr()?];
        while self.consume_token(&Token::Comma) {
            exprs.push(self.parse_expr()?);
        }
        self.expect_token(&Token::RParen)?;
        if exprs.len() == 1 {
            Ok(Expr::Nested(Box::new(exprs.into_iter().next().unwrap())))
        } else {
            Ok(Expr::Tuple(exprs))
        }
    }

    /// Bare identifiers, compound (dotted) identifiers, qualified wildcards,
    /// and function calls all start the same way: one or more `ident.`
    /// segments. This also special-cases the handful of T-SQL pseudo
    /// keywords (`TRY_CAST`, `TRY_CONVERT`, `PARSE`, `TRY_PARSE`,
    /// `FREETEXT`) that aren't in the reserved keyword table but take
    /// bespoke grammar rather than plain function-call syntax.
    fn parse_identifier_expr(&mut self) -> Result<Expr, ParserError> {
        if self.peek_word_ci("TRY_CAST") {
            self.advance();
            return self.parse_cast_body(CastKind::TryCast);
        }
        if self.peek_word_ci("TRY_CONVERT") {
            self.advance();
            return self.parse_convert_body(ConvertKind::TryConvert);
        }
        if self.peek_word_ci("PARSE") {
            self.advance();
            return self.parse_parse_body(ParseKind::Parse);
        }
        if self.peek_word_ci("TRY_PARSE") {
            self.advance();
            return self.parse_parse_body(ParseKind::TryParse);
        }
        if self.peek_word_ci("FREETEXT") {
            self.advance();
            self.expect_token(&Token::LParen)?;
            let mut columns = vec![self.parse_expr()?];
            while self.consume_token(&Token::Comma) {
                columns.push(self.parse_expr()?);
            }
            self.expect_token(&Token::Comma)?;
            let search = self.parse_expr()?;
            self.expect_token(&Token::RParen)?;
            return Ok(Expr::Freetext { columns, search: Box::new(search) });
        }

        let mut parts = vec![self.parse_identifier()?];
        while self.consume_token(&Token::Period) {
            if self.consume_token(&Token::Mul) {
                return Ok(Expr::QualifiedWildcard(parts));
            }
            parts.push(self.parse_identifier()?);
        }

        if self.peek() == &Token::LParen {
            return self.parse_function_call(ObjectName::new(parts));
        }
        if parts.len() == 1 {
            Ok(Expr::Identifier(parts.into_iter().next().unwrap()))
        } else {
            Ok(Expr::CompoundIdentifier(parts))
        }
    }

    /// Converts an already-parsed `Identifier`/`CompoundIdentifier` expression
    /// into the type name on the left of `Type::method(...)`.
    fn expr_to_object_name(&self, expr: Expr) -> Result<ObjectName, ParserError> {
        match expr {
            Expr::Identifier(id) => Ok(ObjectName::new(vec![id])),
            Expr::CompoundIdentifier(parts) => Ok(ObjectName::new(parts)),
            other => self.error(format!("expected a type name before '::', found {other}")),
        }
    }

    /// `( arg, arg, ... )`, shared by function calls and method calls.
    fn parse_call_args(&mut self) -> Result<Vec<FunctionArg>, ParserError> {
        self.expect_token(&Token::LParen)?;
        let mut args = Vec::new();
        if self.peek() != &Token::RParen {
            loop {
                args.push(self.parse_function_arg()?);
                if !self.consume_token(&Token::Comma) {
                    break;
                }
            }
        }
        self.expect_token(&Token::RParen)?;
        Ok(args)
    }

    fn parse_function_call(&mut self, name: ObjectName) -> Result<Expr, ParserError> {
        self.advance(); // '('
        let distinct = self.consume_keyword(AllKeyWords::DISTINCT);
        let mut args = Vec::new();
        if self.peek() != &Token::RParen {
            loop {
                args.push(self.parse_function_arg()?);
                if !self.consume_token(&Token::Comma) {
                    break;
                }
            }
        }
        self.expect_token(&Token::RParen)?;
        let within_group = if self.peek_word_ci("WITHIN") {
            self.advance();
            self.expect_keyword(AllKeyWords::GROUP)?;
            self.expect_token(&Token::LParen)?;
            self.expect_keyword(AllKeyWords::ORDER)?;
            self.expect_keyword(AllKeyWords::BY)?;
            let order_by = self.parse_comma_separated(Self::parse_order_by_expr)?;
            self.expect_token(&Token::RParen)?;
            Some(WithinGroup { order_by })
        } else {
            None
        };
        let over = if self.peek_word_ci("OVER") {
            self.advance();
            Some(self.parse_over_clause()?)
        } else {
            None
        };
        Ok(Expr::Function(Function { name, args, distinct, within_group, over }))
    }

    fn parse_function_arg(&mut self) -> Result<FunctionArg, ParserError> {
        if self.peek() == &Token::Mul {
            self.advance();
            return Ok(FunctionArg::Unnamed(FunctionArgExpr::Wildcard));
        }
        // `name => expr`: look ahead for a bare identifier followed by `=>`/`=`.
        if matches!(self.peek(), Token::Word(w) if w.quote_style.is_none())
            && matches!(self.peek_nth(1), Token::Eq)
            && !matches!(self.peek_nth(2), Token::Eq)
        {
            let name = self.parse_identifier()?;
            self.advance(); // '='
            let arg = self.parse_function_arg_expr()?;
            return Ok(FunctionArg::Named { name, arg, operator: FunctionArgOperator::Equals });
        }
        let arg = self.parse_function_arg_expr()?;
        Ok(FunctionArg::Unnamed(arg))
    }

    fn parse_function_arg_expr(&mut self) -> Result<FunctionArgExpr, ParserError> {
        let expr = self.parse_expr()?;
        if self.consume_token(&Token::Colon) {
            let value = self.parse_expr()?;
            return Ok(FunctionArgExpr::Expr(Expr::JsonKeyValue(JsonKeyValue {
                key: Box::new(expr),
                value: Box::new(value),
            })));
        }
        Ok(FunctionArgExpr::Expr(expr))
    }

    fn parse_over_clause(&mut self) -> Result<OverClause, ParserError> {
        if self.peek() != &Token::LParen {
            let name = self.parse_identifier()?;
            return Ok(OverClause::NamedWindow(name));
        }
        self.advance();
        let spec = self.parse_window_spec()?;
        self.expect_token(&Token::RParen)?;
        Ok(OverClause::WindowSpec(spec))
    }

    fn parse_window_spec(&mut self) -> Result<WindowSpec, ParserError> {
        let partition_by = if self.consume_keyword(AllKeyWords::PARTITION) {
            self.expect_keyword(AllKeyWords::BY)?;
            self.parse_comma_separated(Self::parse_expr)?
        } else {
            Vec::new()
        };
        let order_by = if self.consume_keyword(AllKeyWords::ORDER) {
            self.expect_keyword(AllKeyWords::BY)?;
            self.parse_comma_separated(Self::parse_order_by_expr)?
        } else {
            Vec::new()
        };
        let window_frame = if self.peek_keyword(AllKeyWords::ROWS) || self.peek_keyword(AllKeyWords::RANGE) {
            Some(self.parse_window_frame()?)
        } else {
            None
        };
        Ok(WindowSpec { partition_by, order_by, window_frame })
    }

    fn parse_window_frame(&mut self) -> Result<WindowFrame, ParserError> {
        let units = if self.consume_keyword(AllKeyWords::ROWS) {
            WindowFrameUnits::Rows
        } else {
            self.expect_keyword(AllKeyWords::RANGE)?;
            WindowFrameUnits::Range
        };
        if self.consume_keyword(AllKeyWords::BETWEEN) {
            let start_bound = self.parse_window_frame_bound()?;
            self.expect_keyword(AllKeyWords::AND)?;
            let end_bound = Some(self.parse_window_frame_bound()?);
            Ok(WindowFrame { units, start_bound, end_bound })
        } else {
            let start_bound = self.parse_window_frame_bound()?;
            Ok(WindowFrame { units, start_bound, end_bound: None })
        }
    }

    fn parse_window_frame_bound(&mut self) -> Result<WindowFrameBound, ParserError> {
        if self.consume_keyword(AllKeyWords::CURRENT) {
            self.expect_keyword(AllKeyWords::ROW)?;
            return Ok(WindowFrameBound::CurrentRow);
        }
        if self.consume_keyword(AllKeyWords::UNBOUNDED) {
            if self.consume_keyword(AllKeyWords::PRECEDING) {
                return Ok(WindowFrameBound::Preceding(None));
            }
            self.expect_keyword(AllKeyWords::FOLLOWING)?;
            return Ok(WindowFrameBound::Following(None));
        }
        let value = self.parse_expr()?;
        if self.consume_keyword(AllKeyWords::PRECEDING) {
            Ok(WindowFrameBound::Preceding(Some(Box::new(value))))
        } else {
            self.expect_keyword(AllKeyWords::FOLLOWING)?;
            Ok(WindowFrameBound::Following(Some(Box::new(value))))
        }
    }

    fn parse_case_expr(&mut self) -> Result<Expr, ParserError> {
        self.advance(); // CASE
        let operand = if !self.peek_keyword(AllKeyWords::WHEN) {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        let mut conditions = Vec::new();
        let mut results = Vec::new();
        while self.consume_keyword(AllKeyWords::WHEN) {
            conditions.push(self.parse_expr()?);
            self.expect_keyword(AllKeyWords::THEN)?;
            results.push(self.parse_expr()?);
        }
        if conditions.is_empty() {
            return self.error("CASE must have at least one WHEN clause");
        }
        let else_result = if self.consume_keyword(AllKeyWords::ELSE) {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_keyword(AllKeyWords::END)?;
        Ok(Expr::Case { operand, conditions, results, else_result })
    }

    fn parse_cast_expr(&mut self, kind: CastKind) -> Result<Expr, ParserError> {
        self.advance(); // CAST
        self.parse_cast_body(kind)
    }

    fn parse_cast_body(&mut self, kind: CastKind) -> Result<Expr, ParserError> {
        self.expect_token(&Token::LParen)?;
        let expr = self.parse_expr()?;
        self.expect_keyword(AllKeyWords::AS)?;
        let data_type = self.parse_data_type()?;
        self.expect_token(&Token::RParen)?;
        Ok(Expr::Cast { kind, expr: Box::new(expr), data_type })
    }

    fn parse_convert_expr(&mut self, kind: ConvertKind) -> Result<Expr, ParserError> {
        self.advance(); // CONVERT
        self.parse_convert_body(kind)
    }

    fn parse_convert_body(&mut self, kind: ConvertKind) -> Result<Expr, ParserError> {
        self.expect_token(&Token::LParen)?;
        let data_type = self.parse_data_type()?;
        self.expect_token(&Token::Comma)?;
        let expr = self.parse_expr()?;
        let style = if self.consume_token(&Token::Comma) {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_token(&Token::RParen)?;
        Ok(Expr::Convert { kind, data_type, expr: Box::new(expr), style })
    }

    fn parse_parse_body(&mut self, kind: ParseKind) -> Result<Expr, ParserError> {
        self.expect_token(&Token::LParen)?;
        let expr = self.parse_expr()?;
        self.expect_keyword(AllKeyWords::AS)?;
        let data_type = self.parse_data_type()?;
        self.expect_token(&Token::RParen)?;
        Ok(Expr::Parse { kind, expr: Box::new(expr), data_type })
    }

    // ---- data types --------------------------------------------------------

    fn parse_optional_precision(&mut self) -> Result<Option<u64>, ParserError> {
        if self.consume_token(&Token::LParen) {
            let n = self.parse_u64_literal()?;
            self.expect_token(&Token::RParen)?;
            Ok(Some(n))
        } else {
            Ok(None)
        }
    }

    fn parse_u64_literal(&mut self) -> Result<u64, ParserError> {
        match self.advance() {
            Token::Number(n) => n.parse::<u64>().map_err(|_| ParserError::ParserError {
                message: format!("invalid integer literal {n}"),
                location: self.peek_location(),
            }),
            other => self.error(format!("expected an integer literal, found {other}")),
        }
    }

    fn parse_character_length(&mut self) -> Result<Option<CharacterLength>, ParserError> {
        if !self.consume_token(&Token::LParen) {
            return Ok(None);
        }
        let len = if self.consume_keyword(AllKeyWords::MAX) {
            CharacterLength::Max
        } else {
            CharacterLength::Fixed(self.parse_u64_literal()?)
        };
        self.expect_token(&Token::RParen)?;
        Ok(Some(len))
    }

    fn parse_exact_number_info(&mut self) -> Result<ExactNumberInfo, ParserError> {
        if !self.consume_token(&Token::LParen) {
            return Ok(ExactNumberInfo::None);
        }
        let precision = self.parse_u64_literal()?;
        if self.consume_token(&Token::Comma) {
            let scale = self.parse_u64_literal()?;
            self.expect_token(&Token::RParen)?;
            Ok(ExactNumberInfo::PrecisionAndScale(precision, scale))
        } else {
            self.expect_token(&Token::RParen)?;
            Ok(ExactNumberInfo::Precision(precision))
        }
    }

    pub fn parse_data_type(&mut self) -> Result<DataType, ParserError> {
        let kw = Self::word_keyword(self.peek());
        if let Some(kw) = kw {
            let ty = match kw {
                AllKeyWords::TINYINT => Some(DataType::TinyInt),
                AllKeyWords::SMALLINT => Some(DataType::SmallInt),
                AllKeyWords::INT | AllKeyWords::INTEGER => Some(DataType::Int),
                AllKeyWords::BIGINT => Some(DataType::BigInt),
                AllKeyWords::BOOLEAN => Some(DataType::Bit),
                AllKeyWords::MONEY => Some(DataType::Money),
                AllKeyWords::REAL => Some(DataType::Real),
                AllKeyWords::DATE => Some(DataType::Date),
                AllKeyWords::TEXT => Some(DataType::Text),
                AllKeyWords::NTEXT => Some(DataType::NText),
                AllKeyWords::TIMESTAMP => Some(DataType::RowVersion),
                AllKeyWords::CURSOR => Some(DataType::Cursor),
                AllKeyWords::TABLE => Some(DataType::Table),
                _ => None,
            };
            if let Some(ty) = ty {
                self.advance();
                return Ok(ty);
            }
            if self.peek_word_ci("BIT") {
                self.advance();
                return Ok(DataType::Bit);
            }
            match kw {
                AllKeyWords::DECIMAL | AllKeyWords::DEC => {
                    self.advance();
                    return Ok(DataType::Decimal(self.parse_exact_number_info()?));
                }
                AllKeyWords::NUMERIC => {
                    self.advance();
                    return Ok(DataType::Numeric(self.parse_exact_number_info()?));
                }
                AllKeyWords::FLOAT => {
                    self.advance();
                    return Ok(DataType::Float(self.parse_optional_precision()?));
                }
                AllKeyWords::TIME => {
                    self.advance();
                    return Ok(DataType::Time(self.parse_optional_precision()?));
                }
                AllKeyWords::CHAR | AllKeyWords::CHARACTER => {
                    self.advance();
                    return Ok(DataType::Char(self.parse_character_length()?));
                }
                AllKeyWords::VARCHAR => {
                    self.advance();
                    return Ok(DataType::VarChar(self.parse_character_length()?));
                }
                AllKeyWords::NCHAR => {
                    self.advance();
                    return Ok(DataType::NChar(self.parse_character_length()?));
                }
                AllKeyWords::BINARY => {
                    self.advance();
                    return Ok(DataType::Binary(self.parse_optional_precision()?));
                }
                AllKeyWords::VARBINARY => {
                    self.advance();
                    return Ok(DataType::VarBinary(self.parse_character_length()?));
                }
                AllKeyWords::XML => {
                    self.advance();
                    let collection = if self.consume_token(&Token::LParen) {
                        let name = self.parse_object_name()?;
                        self.expect_token(&Token::RParen)?;
                        Some(name)
                    } else {
                        None
                    };
                    return Ok(DataType::Xml(collection));
                }
                AllKeyWords::SQL_VARIANT => {
                    self.advance();
                    return Ok(DataType::SqlVariant);
                }
                _ => {}
            }
            if self.peek_word_ci("NVARCHAR") {
                self.advance();
                return Ok(DataType::NVarChar(self.parse_character_length()?));
            }
            if self.peek_word_ci("DATETIME2") {
                self.advance();
                return Ok(DataType::DateTime2(self.parse_optional_precision()?));
            }
            if self.peek_word_ci("DATETIME") {
                self.advance();
                return Ok(DataType::DateTime);
            }
            if self.peek_word_ci("SMALLDATETIME") {
                self.advance();
                return Ok(DataType::SmallDateTime);
            }
            if self.peek_word_ci("DATETIMEOFFSET") {
                self.advance();
                return Ok(DataType::DateTimeOffset(self.parse_optional_precision()?));
            }
            if self.peek_word_ci("SMALLMONEY") {
                self.advance();
                return Ok(DataType::SmallMoney);
            }
            if self.peek_word_ci("IMAGE") {
                self.advance();
                return Ok(DataType::Image);
            }
            if self.peek_word_ci("UNIQUEIDENTIFIER") {
                self.advance();
                return Ok(DataType::UniqueIdentifier);
            }
            if self.peek_word_ci("HIERARCHYID") {
                self.advance();
                return Ok(DataType::HierarchyId);
            }
        }
        // Unrecognized name: a user-defined or CLR type (spec.md: never
        // fail the parse over an unknown catalog type).
        let name = self.parse_object_name()?;
        Ok(DataType::Custom(name))
    }

    // ---- SELECT / query -----------------------------------------------------

    pub fn parse_query(&mut self) -> Result<Query, ParserError> {
        self.with_depth_guard(|p| {
            let with = if p.peek_keyword(AllKeyWords::WITH) {
                Some(p.parse_with()?)
            } else {
                None
            };
            let body = Box::new(p.parse_set_expr(0)?);
            let order_by = if p.consume_keyword(AllKeyWords::ORDER) {
                p.expect_keyword(AllKeyWords::BY)?;
                p.parse_comma_separated(Self::parse_order_by_expr)?
            } else {
                Vec::new()
            };
            let offset = if p.consume_keyword(AllKeyWords::OFFSET) {
                let value = p.parse_expr()?;
                p.expect_keyword(AllKeyWords::ROWS)?;
                Some(Offset { value })
            } else {
                None
            };
            let fetch = if p.consume_keyword(AllKeyWords::FETCH) {
                let _ = p.consume_keyword(AllKeyWords::NEXT) || p.consume_keyword(AllKeyWords::FIRST);
                let quantity = p.parse_expr()?;
                p.expect_keyword(AllKeyWords::ROWS)?;
                p.expect_keyword(AllKeyWords::ONLY)?;
                Some(Fetch { quantity })
            } else {
                None
            };
            Ok(Query { with, body, order_by, offset, fetch })
        })
    }

    fn parse_with(&mut self) -> Result<With, ParserError> {
        self.advance(); // WITH
        if self.peek_keyword(AllKeyWords::XMLNAMESPACES) {
            self.advance(); // XMLNAMESPACES
            self.expect_token(&Token::LParen)?;
            let namespaces = self.parse_comma_separated(Self::parse_xml_namespace)?;
            self.expect_token(&Token::RParen)?;
            return Ok(With::XmlNamespaces(namespaces));
        }
        let cte_tables = self.parse_comma_separated(Self::parse_cte)?;
        Ok(With::Ctes(cte_tables))
    }

    fn parse_xml_namespace(&mut self) -> Result<XmlNamespace, ParserError> {
        if self.peek_keyword(AllKeyWords::DEFAULT) {
            self.advance(); // DEFAULT
            let uri = self.parse_expr()?;
            return Ok(XmlNamespace { uri, alias: None, is_default: true });
        }
        let uri = self.parse_expr()?;
        self.expect_keyword(AllKeyWords::AS)?;
        let alias = self.parse_identifier()?;
        Ok(XmlNamespace { uri, alias: Some(alias), is_default: false })
    }

    fn parse_cte(&mut self) -> Result<Cte, ParserError> {
        let name = self.parse_identifier()?;
        let columns = if self.consume_token(&Token::LParen) {
            let cols = self.parse_comma_separated(Self::parse_identifier)?;
            self.expect_token(&Token::RParen)?;
            cols
        } else {
            Vec::new()
        };
        self.expect_keyword(AllKeyWords::AS)?;
        self.expect_token(&Token::LParen)?;
        let query = self.parse_query()?;
        self.expect_token(&Token::RParen)?;
        Ok(Cte { alias: TableAlias { name, columns }, query: Box::new(query) })
    }

    fn parse_set_expr(&mut self, min_prec: u8) -> Result<SetExpr, ParserError> {
        let mut left = self.parse_set_expr_term()?;
        loop {
            let (op, prec) = match Self::word_keyword(self.peek()) {
                Some(AllKeyWords::UNION) => (SetOperator::Union, 5),
                Some(AllKeyWords::EXCEPT) => (SetOperator::Except, 5),
                Some(AllKeyWords::INTERSECT) => (SetOperator::Intersect, 6),
                _ => break,
            };
            if prec <= min_prec {
                break;
            }
            self.advance();
            let all = self.consume_keyword(AllKeyWords::ALL);
            let right = self.parse_set_expr_term()?;
            left = SetExpr::SetOperation { left: Box::new(left), op, all, right: Box::new(right) };
        }
        Ok(left)
    }

    fn parse_set_expr_term(&mut self) -> Result<SetExpr, ParserError> {
        if self.peek_keyword(AllKeyWords::SELECT) {
            return Ok(SetExpr::Select(Box::new(self.parse_select()?)));
        }
        if self.peek_keyword(AllKeyWords::VALUES) {
            return Ok(SetExpr::Values(self.parse_values()?));
        }
        if self.peek() == &Token::LParen {
            self.advance();
            let query = self.parse_query()?;
            self.expect_token(&Token::RParen)?;
            return Ok(SetExpr::Query(Box::new(query)));
        }
        self.error(format!("expected SELECT, VALUES or '(', found {}", self.peek()))
    }

    fn parse_values(&mut self) -> Result<Values, ParserError> {
        self.advance(); // VALUES
        let rows = self.parse_comma_separated(|p| {
            p.expect_token(&Token::LParen)?;
            let row = p.parse_comma_separated(Self::parse_expr)?;
            p.expect_token(&Token::RParen)?;
            Ok(row)
        })?;
        Ok(Values { rows })
    }

    fn parse_select(&mut self) -> Result<Select, ParserError> {
        self.advance(); // SELECT
        let distinct = self.consume_keyword(AllKeyWords::DISTINCT);
        let _all = self.consume_keyword(AllKeyWords::ALL);
        let top = if self.peek_keyword(AllKeyWords::TOP) {
            Some(self.parse_top()?)
        } else {
            None
        };
        let projection = self.parse_comma_separated(Self::parse_select_item)?;
        let into = if self.consume_keyword(AllKeyWords::INTO) {
            Some(self.parse_object_name()?)
        } else {
            None
        };
        let from = if self.consume_keyword(AllKeyWords::FROM) {
            self.parse_comma_separated(Self::parse_table_with_joins)?
        } else {
            Vec::new()
        };
        let selection = if self.consume_keyword(AllKeyWords::WHERE) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let group_by = if self.consume_keyword(AllKeyWords::GROUP) {
            self.expect_keyword(AllKeyWords::BY)?;
            GroupByExpr::Expressions(self.parse_comma_separated(Self::parse_group_by_item)?)
        } else {
            GroupByExpr::Expressions(Vec::new())
        };
        let having = if self.consume_keyword(AllKeyWords::HAVING) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let named_windows = if self.peek_word_ci("WINDOW") {
            self.advance();
            self.parse_comma_separated(Self::parse_named_window)?
        } else {
            Vec::new()
        };
        let for_clause = if self.consume_keyword(AllKeyWords::FOR) {
            Some(self.parse_for_clause()?)
        } else {
            None
        };
        Ok(Select {
            distinct,
            top,
            projection,
            into,
            from,
            selection,
            group_by,
            having,
            named_windows,
            for_clause,
        })
    }

    fn parse_group_by_item(&mut self) -> Result<Expr, ParserError> {
        if self.consume_keyword(AllKeyWords::CUBE) {
            return Ok(Expr::Grouping(GroupingExpr::Cube(self.parse_grouping_sets()?)));
        }
        if self.consume_keyword(AllKeyWords::ROLLUP) {
            return Ok(Expr::Grouping(GroupingExpr::Rollup(self.parse_grouping_sets()?)));
        }
        if self.consume_keyword(AllKeyWords::GROUPING) {
            self.expect_keyword(AllKeyWords::SETS)?;
            return Ok(Expr::Grouping(GroupingExpr::GroupingSets(self.parse_grouping_sets()?)));
        }
        self.parse_expr()
    }

    fn parse_grouping_sets(&mut self) -> Result<Vec<Vec<Expr>>, ParserError> {
        self.expect_token(&Token::LParen)?;
        let sets = self.parse_comma_separated(|p| {
            if p.consume_token(&Token::LParen) {
                let set = p.parse_comma_separated(Self::parse_expr)?;
                p.expect_token(&Token::RParen)?;
                Ok(set)
            } else {
                Ok(vec![p.parse_expr()?])
            }
        })?;
        self.expect_token(&Token::RParen)?;
        Ok(sets)
    }

    fn parse_named_window(&mut self) -> Result<NamedWindowDefinition, ParserError> {
        let name = self.parse_identifier()?;
        self.expect_keyword(AllKeyWords::AS)?;
        self.expect_token(&Token::LParen)?;
        let spec = self.parse_window_spec()?;
        self.expect_token(&Token::RParen)?;
        Ok(NamedWindowDefinition(name, spec))
    }

    fn parse_for_clause(&mut self) -> Result<ForClause, ParserError> {
        if self.peek_word_ci("BROWSE") {
            self.advance();
            return Ok(ForClause::Browse);
        }
        if self.consume_keyword(AllKeyWords::XML) {
            let auto = self.consume_word_ci("AUTO");
            let raw = !auto && self.consume_word_ci("RAW");
            let path = !auto && !raw && self.consume_word_ci("PATH");
            return Ok(ForClause::Xml { auto, raw, path });
        }
        if self.peek_word_ci("JSON") {
            self.advance();
            let auto = self.consume_word_ci("AUTO");
            let path = !auto && self.consume_word_ci("PATH");
            return Ok(ForClause::Json { auto, path });
        }
        self.error("expected XML, JSON or BROWSE after FOR")
    }

    fn parse_top(&mut self) -> Result<Top, ParserError> {
        self.advance(); // TOP
        // Older `TOP n` form alongside the parenthesized `TOP (n)` form; both
        // are accepted by SQL Server (spec.md §8 scenario 1).
        let parenthesized = self.consume_token(&Token::LParen);
        let quantity = self.parse_expr()?;
        if parenthesized {
            self.expect_token(&Token::RParen)?;
        }
        let percent = self.consume_keyword(AllKeyWords::PERCENT);
        let with_ties = if self.consume_keyword(AllKeyWords::WITH) {
            self.expect_keyword(AllKeyWords::TIES)?;
            true
        } else {
            false
        };
        Ok(Top { quantity, percent, with_ties })
    }

    fn parse_select_item(&mut self) -> Result<SelectItem, ParserError> {
        if self.peek() == &Token::Mul {
            self.advance();
            return Ok(SelectItem::Wildcard);
        }
        if matches!(self.peek(), Token::Word(_)) && matches!(self.peek_nth(1), Token::Period) && matches!(self.peek_nth(2), Token::Mul) {
            let name = self.parse_object_name_prefix_of_wildcard()?;
            return Ok(SelectItem::QualifiedWildcard(name));
        }
        let expr = self.parse_expr()?;
        let alias = self.parse_optional_alias(keywords::is_reserved_for_column_alias)?;
        Ok(match alias {
            Some(alias) => SelectItem::ExprWithAlias(ExprWithAlias { expr, alias: Some(alias) }),
            None => SelectItem::UnnamedExpr(expr),
        })
    }

    fn parse_object_name_prefix_of_wildcard(&mut self) -> Result<ObjectName, ParserError> {
        let mut parts = vec![self.parse_identifier()?];
        while matches!(self.peek(), Token::Period) && matches!(self.peek_nth(1), Token::Word(_)) {
            self.advance();
            parts.push(self.parse_identifier()?);
        }
        self.advance(); // '.'
        self.advance(); // '*'
        Ok(ObjectName::new(parts))
    }

    fn parse_order_by_expr(&mut self) -> Result<OrderByExpr, ParserError> {
        let expr = self.parse_expr()?;
        let descending = if self.consume_keyword(AllKeyWords::ASC) {
            Some(false)
        } else if self.consume_keyword(AllKeyWords::DESC) {
            Some(true)
        } else {
            None
        };
        let nulls_first = if self.consume_keyword(AllKeyWords::NULLS) {
            if self.consume_keyword(AllKeyWords::FIRST) {
                Some(true)
            } else {
                self.expect_keyword(AllKeyWords::LAST)?;
                Some(false)
            }
        } else {
            None
        };
        Ok(OrderByExpr { expr, descending, nulls_first })
    }

    /// Parses an optional trailing `[AS] alias`, refusing to treat a
    /// `reserved` keyword as the alias (spec.md §4.2's alias-without-AS
    /// disambiguation rule).
    fn parse_optional_alias(&mut self, reserved: fn(&str) -> bool) -> Result<Option<Ident>, ParserError> {
        if self.consume_keyword(AllKeyWords::AS) {
            return Ok(Some(self.parse_identifier()?));
        }
        if let Token::Word(w) = self.peek() {
            if w.quote_style.is_some() {
                return Ok(Some(self.parse_identifier()?));
            }
            if let Some(_kw) = w.keyword {
                let upper = w.value.to_uppercase();
                if reserved(&upper) && !keywords::is_identifier_permissive(&upper) {
                    return Ok(None);
                }
            }
            return Ok(Some(self.parse_identifier()?));
        }
        Ok(None)
    }

    fn parse_table_alias(&mut self) -> Result<Option<TableAlias>, ParserError> {
        let name = match self.parse_optional_alias(keywords::is_reserved_for_table_alias)? {
            Some(name) => name,
            None => return Ok(None),
        };
        let columns = if self.consume_token(&Token::LParen) {
            let cols = self.parse_comma_separated(Self::parse_identifier)?;
            self.expect_token(&Token::RParen)?;
            cols
        } else {
            Vec::new()
        };
        Ok(Some(TableAlias { name, columns }))
    }

    fn parse_table_with_joins(&mut self) -> Result<TableWithJoins, ParserError> {
        let relation = self.parse_table_factor()?;
        let mut joins = Vec::new();
        loop {
            let op = match self.peek().clone() {
                Token::Compound(CompoundKeyword::InnerJoin) => {
                    self.advance();
                    Some(JoinOperator::Inner(JoinConstraint::None))
                }
                Token::Compound(CompoundKeyword::LeftJoin) | Token::Compound(CompoundKeyword::LeftOuterJoin) => {
                    self.advance();
                    Some(JoinOperator::LeftOuter(JoinConstraint::None))
                }
                Token::Compound(CompoundKeyword::RightJoin) | Token::Compound(CompoundKeyword::RightOuterJoin) => {
                    self.advance();
                    Some(JoinOperator::RightOuter(JoinConstraint::None))
                }
                Token::Compound(CompoundKeyword::FullJoin) | Token::Compound(CompoundKeyword::FullOuterJoin) => {
                    self.advance();
                    Some(JoinOperator::FullOuter(JoinConstraint::None))
                }
                Token::Compound(CompoundKeyword::CrossJoin) => {
                    self.advance();
                    Some(JoinOperator::Cross)
                }
                Token::Compound(CompoundKeyword::CrossApply) => {
                    self.advance();
                    Some(JoinOperator::CrossApply)
                }
                Token::Compound(CompoundKeyword::OuterApply) => {
                    self.advance();
                    Some(JoinOperator::OuterApply)
                }
                Token::Word(Word { keyword: Some(AllKeyWords::JOIN), quote_style: None, .. }) => {
                    self.advance();
                    Some(JoinOperator::Inner(JoinConstraint::None))
                }
                _ => None,
            };
            let Some(op) = op else { break };
            let relation = self.parse_table_factor()?;
            let join_operator = match op {
                JoinOperator::Inner(_) => JoinOperator::Inner(self.parse_join_constraint()?),
                JoinOperator::LeftOuter(_) => JoinOperator::LeftOuter(self.parse_join_constraint()?),
                JoinOperator::RightOuter(_) => JoinOperator::RightOuter(self.parse_join_constraint()?),
                JoinOperator::FullOuter(_) => JoinOperator::FullOuter(self.parse_join_constraint()?),
                other => other,
            };
            joins.push(Join { relation, join_operator });
        }
        Ok(TableWithJoins { relation, joins })
    }

    fn parse_join_constraint(&mut self) -> Result<JoinConstraint, ParserError> {
        if self.consume_keyword(AllKeyWords::ON) {
            Ok(JoinConstraint::On(self.parse_expr()?))
        } else {
            Ok(JoinConstraint::None)
        }
    }

    fn parse_table_factor(&mut self) -> Result<TableFactor, ParserError> {
        let mut factor = self.parse_table_factor_base()?;
        loop {
            if self.consume_keyword(AllKeyWords::PIVOT) {
                self.expect_token(&Token::LParen)?;
                let aggregate_function = self.parse_expr()?;
                self.expect_keyword(AllKeyWords::FOR)?;
                let value_column = self.parse_identifier()?;
                self.expect_keyword(AllKeyWords::IN)?;
                self.expect_token(&Token::LParen)?;
                let pivot_values = self.parse_comma_separated(Self::parse_expr)?;
                self.expect_token(&Token::RParen)?;
                self.expect_token(&Token::RParen)?;
                let alias = self.parse_table_alias()?;
                factor = TableFactor::Pivot {
                    table: Box::new(factor),
                    pivot: PivotClause { aggregate_function, value_column, pivot_values, alias },
                };
                continue;
            }
            if self.consume_keyword(AllKeyWords::UNPIVOT) {
                self.expect_token(&Token::LParen)?;
                let value_column = self.parse_identifier()?;
                self.expect_keyword(AllKeyWords::FOR)?;
                let name_column = self.parse_identifier()?;
                self.expect_keyword(AllKeyWords::IN)?;
                self.expect_token(&Token::LParen)?;
                let columns = self.parse_comma_separated(Self::parse_identifier)?;
                self.expect_token(&Token::RParen)?;
                self.expect_token(&Token::RParen)?;
                let alias = self.parse_table_alias()?;
                factor = TableFactor::Unpivot {
                    table: Box::new(factor),
                    unpivot: UnpivotClause { value_column, name_column, columns, alias },
                };
                continue;
            }
            break;
        }
        Ok(factor)
    }

    /// Dispatches to whichever DML statement starts at the current token,
    /// for use inside a parenthesized `TableFactor::DmlDerived` source
    /// (e.g. `(DELETE FROM T OUTPUT deleted.*) AS d`).
    fn parse_dml_statement(&mut self) -> Result<Statement, ParserError> {
        if self.peek_keyword(AllKeyWords::INSERT) {
            return self.parse_insert();
        }
        if self.peek_keyword(AllKeyWords::UPDATE) {
            return self.parse_update();
        }
        if self.peek_keyword(AllKeyWords::DELETE) {
            return self.parse_delete();
        }
        if self.peek_keyword(AllKeyWords::MERGE) {
            return self.parse_merge();
        }
        self.error(format!("expected INSERT, UPDATE, DELETE or MERGE, found {}", self.peek()))
    }

    fn parse_table_factor_base(&mut self) -> Result<TableFactor, ParserError> {
        if self.peek() == &Token::LParen {
            self.advance();
            if self.peek_keyword(AllKeyWords::SELECT) || self.peek_keyword(AllKeyWords::WITH) {
                let subquery = Box::new(self.parse_query()?);
                self.expect_token(&Token::RParen)?;
                let alias = self.parse_table_alias()?;
                return Ok(TableFactor::Derived { subquery, alias });
            }
            if self.peek_keyword(AllKeyWords::VALUES) {
                let values = self.parse_values()?;
                self.expect_token(&Token::RParen)?;
                let alias = self.parse_table_alias()?;
                return Ok(TableFactor::Values { values, alias });
            }
            if self.peek_keyword(AllKeyWords::INSERT)
                || self.peek_keyword(AllKeyWords::UPDATE)
                || self.peek_keyword(AllKeyWords::DELETE)
                || self.peek_keyword(AllKeyWords::MERGE)
            {
                let statement = Box::new(self.parse_dml_statement()?);
                self.expect_token(&Token::RParen)?;
                let alias = self.parse_table_alias()?;
                return Ok(TableFactor::DmlDerived { statement, alias });
            }
            let table_with_joins = Box::new(self.parse_table_with_joins()?);
            self.expect_token(&Token::RParen)?;
            let alias = self.parse_table_alias()?;
            return Ok(TableFactor::NestedJoin { table_with_joins, alias });
        }
        if matches!(self.peek(), Token::LocalVariable(_)) {
            let name = self.parse_variable()?;
            let alias = self.parse_table_alias()?;
            return Ok(TableFactor::Variable { name, alias });
        }
        let name = self.parse_object_name()?;
        if self.peek() == &Token::LParen {
            self.advance();
            let mut args = Vec::new();
            if self.peek() != &Token::RParen {
                loop {
                    args.push(self.parse_function_arg()?);
                    if !self.consume_token(&Token::Comma) {
                        break;
                    }
                }
            }
            self.expect_token(&Token::RParen)?;
            let alias = self.parse_table_alias()?;
            return Ok(TableFactor::Function { name, args, alias });
        }
        let hints = if self.consume_keyword(AllKeyWords::WITH) {
            self.expect_token(&Token::LParen)?;
            let hints = self.parse_comma_separated(Self::parse_identifier)?;
            self.expect_token(&Token::RParen)?;
            hints
        } else {
            Vec::new()
        };
        let alias = self.parse_table_alias()?;
        Ok(TableFactor::Table { name, alias, hints })
    }

    // ---- helpers ------------------------------------------------------------

    fn parse_comma_separated<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, ParserError>,
    ) -> Result<Vec<T>, ParserError> {
        let mut results = vec![item(self)?];
        while self.consume_token(&Token::Comma) {
            results.push(item(self)?);
        }
        Ok(results)
    }

    fn parse_output_clause(&mut self) -> Result<OutputClause, ParserError> {
        self.advance(); // OUTPUT
        let select_items = self.parse_comma_separated(Self::parse_select_item)?;
        let (into_table, into_columns) = if self.consume_keyword(AllKeyWords::INTO) {
            let name = self.parse_object_name()?;
            let columns = if self.consume_token(&Token::LParen) {
                let cols = self.parse_comma_separated(Self::parse_identifier)?;
                self.expect_token(&Token::RParen)?;
                cols
            } else {
                Vec::new()
            };
            (Some(name), columns)
        } else {
            (None, Vec::new())
        };
        Ok(OutputClause { select_items, into_table, into_columns })
    }

    // ---- DML ----------------------------------------------------------------

    fn parse_insert(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // INSERT
        self.consume_keyword(AllKeyWords::INTO);
        let table_name = self.parse_object_name()?;
        let columns = if self.peek() == &Token::LParen {
            self.advance();
            let cols = self.parse_comma_separated(Self::parse_identifier)?;
            self.expect_token(&Token::RParen)?;
            cols
        } else {
            Vec::new()
        };
        let output = if self.peek_word_ci("OUTPUT") {
            Some(self.parse_output_clause()?)
        } else {
            None
        };
        let source = if self.consume_keyword(AllKeyWords::DEFAULT) {
            self.expect_keyword(AllKeyWords::VALUES)?;
            InsertSource::DefaultValues
        } else {
            InsertSource::Query(Box::new(self.parse_query()?))
        };
        Ok(Statement::Insert(InsertStatement { table_name, columns, output, source }))
    }

    fn parse_assignment(&mut self) -> Result<Assignment, ParserError> {
        let target = self.parse_expr()?;
        self.expect_token(&Token::Eq)?;
        let value = self.parse_expr()?;
        Ok(Assignment { target, value })
    }

    fn parse_update(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // UPDATE
        let table = self.parse_table_factor_base()?;
        self.expect_keyword(AllKeyWords::SET)?;
        let assignments = self.parse_comma_separated(Self::parse_assignment)?;
        let output = if self.peek_word_ci("OUTPUT") {
            Some(self.parse_output_clause()?)
        } else {
            None
        };
        let from = if self.consume_keyword(AllKeyWords::FROM) {
            self.parse_comma_separated(Self::parse_table_with_joins)?
        } else {
            Vec::new()
        };
        let selection = if self.consume_keyword(AllKeyWords::WHERE) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Statement::Update(UpdateStatement { table, assignments, from, output, selection }))
    }

    fn parse_delete(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // DELETE
        let table = self.parse_table_factor_base()?;
        let output = if self.peek_word_ci("OUTPUT") {
            Some(self.parse_output_clause()?)
        } else {
            None
        };
        let from = if self.consume_keyword(AllKeyWords::FROM) {
            self.parse_comma_separated(Self::parse_table_with_joins)?
        } else {
            Vec::new()
        };
        let selection = if self.consume_keyword(AllKeyWords::WHERE) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Statement::Delete(DeleteStatement { table, output, from, selection }))
    }

    fn parse_truncate(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // TRUNCATE [TABLE]
        if let Token::Compound(CompoundKeyword::TruncateTable) = self.tokens.get(self.index.wrapping_sub(1)).map(|t| &t.token).unwrap_or(&Token::EOF) {
            // already consumed TRUNCATE TABLE in one token
        } else {
            self.consume_keyword(AllKeyWords::TABLE);
        }
        let table_name = self.parse_object_name()?;
        Ok(Statement::Truncate(TruncateStatement { table_name }))
    }

    fn parse_merge(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // MERGE
        self.consume_keyword(AllKeyWords::INTO);
        let target = self.parse_table_factor_base()?;
        self.expect_keyword(AllKeyWords::USING)?;
        let source = self.parse_table_factor_base()?;
        self.expect_keyword(AllKeyWords::ON)?;
        let on = self.parse_expr()?;
        let mut clauses = Vec::new();
        while self.consume_keyword(AllKeyWords::WHEN) {
            let matched = !self.consume_keyword(AllKeyWords::NOT);
            self.expect_keyword(AllKeyWords::MATCHED)?;
            let mut by_target = false;
            let mut by_source = false;
            if self.consume_keyword(AllKeyWords::BY) {
                if self.consume_word_ci("TARGET") {
                    by_target = true;
                } else if self.consume_word_ci("SOURCE") {
                    by_source = true;
                }
            }
            let predicate = if self.consume_keyword(AllKeyWords::AND) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            self.expect_keyword(AllKeyWords::THEN)?;
            let action = self.parse_merge_action()?;
            clauses.push(MergeClause { matched, by_target, by_source, predicate, action });
        }
        if clauses.is_empty() {
            return self.error("MERGE must have at least one WHEN clause");
        }
        let output = if self.peek_word_ci("OUTPUT") {
            Some(self.parse_output_clause()?)
        } else {
            None
        };
        Ok(Statement::Merge(MergeStatement { target, source, on, clauses, output }))
    }

    fn parse_merge_action(&mut self) -> Result<MergeAction, ParserError> {
        if self.consume_keyword(AllKeyWords::UPDATE) {
            self.expect_keyword(AllKeyWords::SET)?;
            let assignments = self.parse_comma_separated(Self::parse_assignment)?;
            return Ok(MergeAction::Update { assignments });
        }
        if self.consume_keyword(AllKeyWords::DELETE) {
            return Ok(MergeAction::Delete);
        }
        self.expect_keyword(AllKeyWords::INSERT)?;
        let columns = if self.peek() == &Token::LParen {
            self.advance();
            let cols = self.parse_comma_separated(Self::parse_identifier)?;
            self.expect_token(&Token::RParen)?;
            cols
        } else {
            Vec::new()
        };
        self.expect_keyword(AllKeyWords::VALUES)?;
        self.expect_token(&Token::LParen)?;
        let values = self.parse_comma_separated(Self::parse_expr)?;
        self.expect_token(&Token::RParen)?;
        Ok(MergeAction::Insert { columns, values })
    }

    // ---- CREATE ---------------------------------------------------------------

    fn parse_create(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // CREATE
        if self.consume_keyword(AllKeyWords::TABLE) {
            return self.parse_create_table();
        }
        if self.consume_keyword(AllKeyWords::VIEW) {
            return self.parse_create_view();
        }
        if self.peek_keyword(AllKeyWords::UNIQUE) || self.peek_keyword(AllKeyWords::CLUSTERED) || self.peek_keyword(AllKeyWords::NONCLUSTERED) || self.peek_keyword(AllKeyWords::INDEX) {
            return self.parse_create_index();
        }
        if self.consume_keyword(AllKeyWords::PROCEDURE) || self.consume_word_ci("PROC") {
            return self.parse_create_procedure();
        }
        if self.consume_keyword(AllKeyWords::FUNCTION) {
            return self.parse_create_function();
        }
        if self.consume_keyword(AllKeyWords::TRIGGER) {
            return self.parse_create_trigger();
        }
        if self.consume_keyword(AllKeyWords::SEQUENCE) {
            return self.parse_create_sequence();
        }
        if self.consume_keyword(AllKeyWords::SCHEMA) {
            let name = self.parse_identifier()?;
            return Ok(Statement::CreateSchema(CreateSchemaStatement { name }));
        }
        if self.consume_keyword(AllKeyWords::DATABASE) {
            let name = self.parse_identifier()?;
            return Ok(Statement::CreateDatabase(CreateDatabaseStatement { name }));
        }
        if self.consume_keyword(AllKeyWords::SYNONYM) {
            let name = self.parse_object_name()?;
            self.expect_keyword(AllKeyWords::FOR)?;
            let for_name = self.parse_object_name()?;
            return Ok(Statement::CreateSynonym(CreateSynonymStatement { name, for_name }));
        }
        if self.consume_keyword(AllKeyWords::TYPE) {
            let name = self.parse_object_name()?;
            self.expect_keyword(AllKeyWords::FROM)?;
            let representation = if self.consume_keyword(AllKeyWords::TABLE) {
                let columns = self.parse_column_defs()?;
                TypeRepresentation::TableType(columns)
            } else {
                TypeRepresentation::Alias(self.parse_data_type()?)
            };
            return Ok(Statement::CreateType(CreateTypeStatement { name, representation }));
        }
        if let Token::Compound(CompoundKeyword::XmlSchemaCollection) = self.peek() {
            self.advance();
            let name = self.parse_object_name()?;
            self.expect_keyword(AllKeyWords::AS)?;
            let document = self.parse_expr()?;
            return Ok(Statement::CreateXmlSchemaCollection(CreateXmlSchemaCollectionStatement { name, document }));
        }
        if let Some(kind) = self.try_parse_security_object_kind() {
            return self.parse_create_security_object(kind);
        }
        self.error(format!("unsupported CREATE statement, found {}", self.peek()))
    }

    fn try_parse_security_object_kind(&mut self) -> Option<SecurityObjectKind> {
        if self.consume_keyword(AllKeyWords::LOGIN) {
            return Some(SecurityObjectKind::Login);
        }
        if self.consume_keyword(AllKeyWords::USER) {
            return Some(SecurityObjectKind::User);
        }
        if self.consume_keyword(AllKeyWords::ROLE) {
            return Some(SecurityObjectKind::Role);
        }
        if self.consume_keyword(AllKeyWords::CERTIFICATE) {
            return Some(SecurityObjectKind::Certificate);
        }
        if let Token::Compound(CompoundKeyword::SymmetricKey) = self.peek() {
            self.advance();
            return Some(SecurityObjectKind::SymmetricKey);
        }
        if let Token::Compound(CompoundKeyword::AsymmetricKey) = self.peek() {
            self.advance();
            return Some(SecurityObjectKind::AsymmetricKey);
        }
        if self.peek_word_ci("MASTER") {
            self.advance();
            let _ = self.consume_keyword(AllKeyWords::KEY);
            return Some(SecurityObjectKind::MasterKey);
        }
        None
    }

    fn parse_create_security_object(&mut self, kind: SecurityObjectKind) -> Result<Statement, ParserError> {
        let name = if matches!(self.peek(), Token::Word(w) if w.quote_style.is_some() || w.keyword.is_none() || keywords::is_identifier_permissive(&w.value.to_uppercase())) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let options = self.parse_with_options()?;
        Ok(Statement::CreateSecurityObject(CreateSecurityObjectStatement { kind, name, options }))
    }

    fn parse_with_options(&mut self) -> Result<Vec<(Ident, Expr)>, ParserError> {
        if !self.consume_keyword(AllKeyWords::WITH) {
            return Ok(Vec::new());
        }
        self.parse_comma_separated(|p| {
            let key = p.parse_identifier()?;
            p.expect_token(&Token::Eq)?;
            let value = p.parse_expr()?;
            Ok((key, value))
        })
    }

    fn parse_column_defs(&mut self) -> Result<Vec<ColumnDef>, ParserError> {
        self.expect_token(&Token::LParen)?;
        let columns = self.parse_comma_separated(Self::parse_column_def)?;
        self.expect_token(&Token::RParen)?;
        Ok(columns)
    }

    fn parse_column_def(&mut self) -> Result<ColumnDef, ParserError> {
        let name = self.parse_identifier()?;
        let data_type = self.parse_data_type()?;
        let mut options = Vec::new();
        loop {
            let constraint_name = if self.consume_keyword(AllKeyWords::CONSTRAINT) {
                Some(self.parse_identifier()?)
            } else {
                None
            };
            let option = if self.consume_keyword(AllKeyWords::NOT) {
                self.expect_keyword(AllKeyWords::NULL)?;
                ColumnOption::NotNull
            } else if self.consume_keyword(AllKeyWords::NULL) {
                ColumnOption::Null
            } else if self.consume_keyword(AllKeyWords::DEFAULT) {
                ColumnOption::Default(self.parse_expr()?)
            } else if self.consume_keyword(AllKeyWords::IDENTITY) {
                let (seed, increment) = if self.consume_token(&Token::LParen) {
                    let seed = self.parse_expr()?;
                    self.expect_token(&Token::Comma)?;
                    let increment = self.parse_expr()?;
                    self.expect_token(&Token::RParen)?;
                    (Some(seed), Some(increment))
                } else {
                    (None, None)
                };
                ColumnOption::Identity { seed, increment }
            } else if self.consume_keyword(AllKeyWords::PRIMARY) {
                self.expect_keyword(AllKeyWords::KEY)?;
                ColumnOption::Unique { is_primary: true }
            } else if self.consume_keyword(AllKeyWords::UNIQUE) {
                ColumnOption::Unique { is_primary: false }
            } else if self.consume_keyword(AllKeyWords::REFERENCES) {
                let foreign_table = self.parse_object_name()?;
                let referred_columns = if self.consume_token(&Token::LParen) {
                    let cols = self.parse_comma_separated(Self::parse_identifier)?;
                    self.expect_token(&Token::RParen)?;
                    cols
                } else {
                    Vec::new()
                };
                let on_delete = self.parse_referential_action(AllKeyWords::DELETE)?;
                let on_update = self.parse_referential_action(AllKeyWords::UPDATE)?;
                ColumnOption::ForeignKey { foreign_table, referred_columns, on_delete, on_update }
            } else if self.consume_keyword(AllKeyWords::CHECK) {
                self.expect_token(&Token::LParen)?;
                let expr = self.parse_expr()?;
                self.expect_token(&Token::RParen)?;
                ColumnOption::Check(expr)
            } else if self.consume_keyword(AllKeyWords::AS) {
                let expr = self.parse_expr()?;
                let persisted = self.consume_keyword(AllKeyWords::PERSISTED);
                ColumnOption::Computed { expr, persisted }
            } else if self.consume_keyword(AllKeyWords::COLLATE) {
                ColumnOption::Collation(self.parse_object_name()?)
            } else if self.consume_keyword(AllKeyWords::ROWGUIDCOL) {
                ColumnOption::RowGuidCol
            } else if constraint_name.is_some() {
                return self.error("expected a column constraint after CONSTRAINT name");
            } else {
                break;
            };
            options.push(ColumnOptionDef { name: constraint_name, option });
        }
        Ok(ColumnDef { name, data_type, options })
    }

    fn parse_referential_action(
        &mut self,
        on_kw: AllKeyWords,
    ) -> Result<Option<ReferentialAction>, ParserError> {
        if !self.consume_keyword(AllKeyWords::ON) {
            return Ok(None);
        }
        self.expect_keyword(on_kw)?;
        if self.consume_keyword(AllKeyWords::CASCADE) {
            Ok(Some(ReferentialAction::Cascade))
        } else if self.consume_keyword(AllKeyWords::SET) {
            if self.consume_keyword(AllKeyWords::NULL) {
                Ok(Some(ReferentialAction::SetNull))
            } else {
                self.expect_keyword(AllKeyWords::DEFAULT)?;
                Ok(Some(ReferentialAction::SetDefault))
            }
        } else {
            self.expect_keyword(AllKeyWords::NO)?;
            self.expect_keyword(AllKeyWords::ACTION)?;
            Ok(Some(ReferentialAction::NoAction))
        }
    }

    fn parse_table_constraint(&mut self) -> Result<Option<TableConstraint>, ParserError> {
        let name = if self.consume_keyword(AllKeyWords::CONSTRAINT) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        if self.consume_keyword(AllKeyWords::PRIMARY) {
            self.expect_keyword(AllKeyWords::KEY)?;
            self.expect_token(&Token::LParen)?;
            let columns = self.parse_comma_separated(Self::parse_identifier)?;
            self.expect_token(&Token::RParen)?;
            return Ok(Some(TableConstraint::Unique { name, columns, is_primary: true }));
        }
        if self.consume_keyword(AllKeyWords::UNIQUE) {
            self.expect_token(&Token::LParen)?;
            let columns = self.parse_comma_separated(Self::parse_identifier)?;
            self.expect_token(&Token::RParen)?;
            return Ok(Some(TableConstraint::Unique { name, columns, is_primary: false }));
        }
        if self.consume_keyword(AllKeyWords::FOREIGN) {
            self.expect_keyword(AllKeyWords::KEY)?;
            self.expect_token(&Token::LParen)?;
            let columns = self.parse_comma_separated(Self::parse_identifier)?;
            self.expect_token(&Token::RParen)?;
            self.expect_keyword(AllKeyWords::REFERENCES)?;
            let foreign_table = self.parse_object_name()?;
            self.expect_token(&Token::LParen)?;
            let referred_columns = self.parse_comma_separated(Self::parse_identifier)?;
            self.expect_token(&Token::RParen)?;
            let on_delete = self.parse_referential_action(AllKeyWords::DELETE)?;
            let on_update = self.parse_referential_action(AllKeyWords::UPDATE)?;
            return Ok(Some(TableConstraint::ForeignKey {
                name,
                columns,
                foreign_table,
                referred_columns,
                on_delete,
                on_update,
            }));
        }
        if self.consume_keyword(AllKeyWords::CHECK) {
            self.expect_token(&Token::LParen)?;
            let expr = self.parse_expr()?;
            self.expect_token(&Token::RParen)?;
            return Ok(Some(TableConstraint::Check { name, expr }));
        }
        if name.is_some() {
            return self.error("expected a table constraint after CONSTRAINT name");
        }
        Ok(None)
    }

    fn parse_create_table(&mut self) -> Result<Statement, ParserError> {
        let name = self.parse_object_name()?;
        self.expect_token(&Token::LParen)?;
        let mut columns = Vec::new();
        let mut constraints = Vec::new();
        loop {
            if let Some(constraint) = self.parse_table_constraint()? {
                constraints.push(constraint);
            } else {
                columns.push(self.parse_column_def()?);
            }
            if !self.consume_token(&Token::Comma) {
                break;
            }
        }
        self.expect_token(&Token::RParen)?;
        let on_filegroup = if self.consume_keyword(AllKeyWords::ON) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        Ok(Statement::CreateTable(CreateTableStatement { name, columns, constraints, on_filegroup }))
    }

    fn parse_create_view(&mut self) -> Result<Statement, ParserError> {
        let name = self.parse_object_name()?;
        let columns = if self.peek() == &Token::LParen {
            self.advance();
            let cols = self.parse_comma_separated(Self::parse_identifier)?;
            self.expect_token(&Token::RParen)?;
            cols
        } else {
            Vec::new()
        };
        let with_schemabinding = if self.consume_keyword(AllKeyWords::WITH) {
            self.expect_keyword(AllKeyWords::SCHEMABINDING)?;
            true
        } else {
            false
        };
        self.expect_keyword(AllKeyWords::AS)?;
        let query = Box::new(self.parse_query()?);
        let with_check_option = if self.consume_keyword(AllKeyWords::WITH) {
            self.expect_keyword(AllKeyWords::CHECK)?;
            self.expect_keyword(AllKeyWords::OPTION)?;
            true
        } else {
            false
        };
        Ok(Statement::CreateView(CreateViewStatement { name, columns, with_schemabinding, query, with_check_option }))
    }

    fn parse_create_index(&mut self) -> Result<Statement, ParserError> {
        let unique = self.consume_keyword(AllKeyWords::UNIQUE);
        let clustered = if self.consume_keyword(AllKeyWords::CLUSTERED) {
            Some(true)
        } else if self.consume_keyword(AllKeyWords::NONCLUSTERED) {
            Some(false)
        } else {
            None
        };
        self.expect_keyword(AllKeyWords::INDEX)?;
        let name = self.parse_identifier()?;
        self.expect_keyword(AllKeyWords::ON)?;
        let table_name = self.parse_object_name()?;
        self.expect_token(&Token::LParen)?;
        let columns = self.parse_comma_separated(Self::parse_order_by_expr)?;
        self.expect_token(&Token::RParen)?;
        let include = if self.consume_word_ci("INCLUDE") {
            self.expect_token(&Token::LParen)?;
            let cols = self.parse_comma_separated(Self::parse_identifier)?;
            self.expect_token(&Token::RParen)?;
            cols
        } else {
            Vec::new()
        };
        let where_clause = if self.consume_keyword(AllKeyWords::WHERE) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Statement::CreateIndex(CreateIndexStatement { name, table_name, unique, clustered, columns, include, where_clause }))
    }

    fn parse_procedure_params(&mut self) -> Result<Vec<ProcedureParam>, ParserError> {
        if self.peek() != &Token::LParen {
            if matches!(self.peek(), Token::LocalVariable(_)) {
                return self.parse_comma_separated(Self::parse_procedure_param);
            }
            return Ok(Vec::new());
        }
        self.advance();
        if self.peek() == &Token::RParen {
            self.advance();
            return Ok(Vec::new());
        }
        let params = self.parse_comma_separated(Self::parse_procedure_param)?;
        self.expect_token(&Token::RParen)?;
        Ok(params)
    }

    fn parse_procedure_param(&mut self) -> Result<ProcedureParam, ParserError> {
        let name = self.parse_variable()?;
        let data_type = self.parse_data_type()?;
        let default = if self.consume_token(&Token::Eq) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let output = self.consume_keyword(AllKeyWords::OUT) || self.consume_word_ci("OUTPUT");
        Ok(ProcedureParam { name, data_type, default, output })
    }

    fn parse_begin_end_body(&mut self) -> Result<Vec<Statement>, ParserError> {
        if self.consume_keyword(AllKeyWords::BEGIN) {
            let mut stmts = Vec::new();
            while !self.peek_keyword(AllKeyWords::END) && !self.at_eof() {
                stmts.push(self.parse_statement()?);
                self.consume_token(&Token::SemiColon);
            }
            self.expect_keyword(AllKeyWords::END)?;
            Ok(stmts)
        } else {
            let mut stmts = Vec::new();
            while !self.at_eof() && !self.peek_is_go() {
                stmts.push(self.parse_statement()?);
                self.consume_token(&Token::SemiColon);
            }
            Ok(stmts)
        }
    }

    fn parse_create_procedure(&mut self) -> Result<Statement, ParserError> {
        let name = self.parse_object_name()?;
        let params = self.parse_procedure_params()?;
        self.expect_keyword(AllKeyWords::AS)?;
        let body = self.parse_begin_end_body()?;
        Ok(Statement::CreateProcedure(CreateProcedureStatement { name, params, body }))
    }

    fn parse_create_function(&mut self) -> Result<Statement, ParserError> {
        let name = self.parse_object_name()?;
        self.expect_token(&Token::LParen)?;
        let params = if self.peek() == &Token::RParen {
            Vec::new()
        } else {
            self.parse_comma_separated(Self::parse_procedure_param)?
        };
        self.expect_token(&Token::RParen)?;
        self.expect_keyword(AllKeyWords::RETURNS)?;
        if self.consume_keyword(AllKeyWords::TABLE) {
            if self.peek() == &Token::LParen {
                let columns = self.parse_column_defs()?;
                self.expect_keyword(AllKeyWords::AS)?;
                let body = self.parse_begin_end_body()?;
                return Ok(Statement::CreateFunction(CreateFunctionStatement {
                    name,
                    params,
                    returns: FunctionReturns::Table(columns),
                    body,
                }));
            }
            self.expect_keyword(AllKeyWords::AS)?;
            self.expect_keyword(AllKeyWords::RETURN)?;
            self.expect_token(&Token::LParen)?;
            let query = self.parse_query()?;
            self.expect_token(&Token::RParen)?;
            return Ok(Statement::CreateFunction(CreateFunctionStatement {
                name,
                params,
                returns: FunctionReturns::TableQuery(Box::new(query)),
                body: Vec::new(),
            }));
        }
        let data_type = self.parse_data_type()?;
        self.expect_keyword(AllKeyWords::AS)?;
        let body = self.parse_begin_end_body()?;
        Ok(Statement::CreateFunction(CreateFunctionStatement {
            name,
            params,
            returns: FunctionReturns::Scalar(data_type),
            body,
        }))
    }

    fn parse_create_trigger(&mut self) -> Result<Statement, ParserError> {
        let name = self.parse_object_name()?;
        self.expect_keyword(AllKeyWords::ON)?;
        let table_name = self.parse_object_name()?;
        let timing = if let Token::Compound(CompoundKeyword::ForSystemTime) = self.peek() {
            // not a valid position; fall through to default AFTER
            TriggerTiming::After
        } else if self.consume_word_ci("INSTEAD") {
            self.expect_keyword(AllKeyWords::OF)?;
            TriggerTiming::InsteadOf
        } else {
            self.consume_keyword(AllKeyWords::AFTER);
            self.consume_word_ci("FOR");
            TriggerTiming::After
        };
        let mut events = Vec::new();
        loop {
            if self.consume_keyword(AllKeyWords::INSERT) {
                events.push(TriggerEvent::Insert);
            } else if self.consume_keyword(AllKeyWords::UPDATE) {
                events.push(TriggerEvent::Update);
            } else if self.consume_keyword(AllKeyWords::DELETE) {
                events.push(TriggerEvent::Delete);
            } else {
                break;
            }
            if !self.consume_token(&Token::Comma) {
                break;
            }
        }
        self.expect_keyword(AllKeyWords::AS)?;
        let body = self.parse_begin_end_body()?;
        Ok(Statement::CreateTrigger(CreateTriggerStatement { name, table_name, timing, events, body }))
    }

    fn parse_create_sequence(&mut self) -> Result<Statement, ParserError> {
        let name = self.parse_object_name()?;
        let data_type = if self.consume_keyword(AllKeyWords::AS) {
            Some(self.parse_data_type()?)
        } else {
            None
        };
        let start_with = if self.consume_word_ci("START") {
            self.expect_keyword(AllKeyWords::WITH)?;
            Some(self.parse_expr()?)
        } else {
            None
        };
        let increment_by = if self.consume_keyword(AllKeyWords::INCREMENT) {
            self.expect_keyword(AllKeyWords::BY)?;
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Statement::CreateSequence(CreateSequenceStatement { name, data_type, start_with, increment_by }))
    }

    // ---- ALTER / DROP -----------------------------------------------------

    fn parse_alter(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // ALTER
        self.expect_keyword(AllKeyWords::TABLE)?;
        let name = self.parse_object_name()?;
        let operation = if self.consume_keyword(AllKeyWords::ADD) {
            if let Some(constraint) = self.parse_table_constraint()? {
                AlterTableOperation::AddConstraint(constraint)
            } else {
                AlterTableOperation::AddColumn(self.parse_column_def()?)
            }
        } else if self.consume_keyword(AllKeyWords::DROP) {
            if self.consume_keyword(AllKeyWords::COLUMN) {
                AlterTableOperation::DropColumn(self.parse_identifier()?)
            } else {
                self.expect_keyword(AllKeyWords::CONSTRAINT)?;
                AlterTableOperation::DropConstraint(self.parse_identifier()?)
            }
        } else {
            self.expect_keyword(AllKeyWords::ALTER)?;
            self.expect_keyword(AllKeyWords::COLUMN)?;
            let column = self.parse_identifier()?;
            let data_type = self.parse_data_type()?;
            AlterTableOperation::AlterColumn { column, data_type }
        };
        Ok(Statement::AlterTable(AlterTableStatement { name, operation }))
    }

    fn parse_drop(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // DROP
        let object_type = if self.consume_keyword(AllKeyWords::TABLE) {
            DropObjectType::Table
        } else if self.consume_keyword(AllKeyWords::VIEW) {
            DropObjectType::View
        } else if self.consume_keyword(AllKeyWords::INDEX) {
            DropObjectType::Index
        } else if self.consume_keyword(AllKeyWords::PROCEDURE) || self.consume_word_ci("PROC") {
            DropObjectType::Procedure
        } else if self.consume_keyword(AllKeyWords::FUNCTION) {
            DropObjectType::Function
        } else if self.consume_keyword(AllKeyWords::TRIGGER) {
            DropObjectType::Trigger
        } else if self.consume_keyword(AllKeyWords::SEQUENCE) {
            DropObjectType::Sequence
        } else if self.consume_keyword(AllKeyWords::SCHEMA) {
            DropObjectType::Schema
        } else if self.consume_keyword(AllKeyWords::DATABASE) {
            DropObjectType::Database
        } else if self.consume_keyword(AllKeyWords::SYNONYM) {
            DropObjectType::Synonym
        } else if self.consume_keyword(AllKeyWords::TYPE) {
            DropObjectType::Type
        } else if self.consume_keyword(AllKeyWords::LOGIN) {
            DropObjectType::Login
        } else if self.consume_keyword(AllKeyWords::USER) {
            DropObjectType::User
        } else if self.consume_keyword(AllKeyWords::ROLE) {
            DropObjectType::Role
        } else if let Token::Compound(CompoundKeyword::XmlSchemaCollection) = self.peek() {
            self.advance();
            DropObjectType::XmlSchemaCollection
        } else {
            return self.error(format!("unsupported DROP statement, found {}", self.peek()));
        };
        let if_exists = self.consume_keyword(AllKeyWords::IF) && self.expect_keyword(AllKeyWords::EXISTS).is_ok();
        let names = self.parse_comma_separated(Self::parse_object_name)?;
        Ok(Statement::Drop(DropStatement { object_type, if_exists, names }))
    }

    // ---- control flow -------------------------------------------------------

    fn parse_begin(&mut self) -> Result<Statement, ParserError> {
        if let Token::Compound(CompoundKeyword::BeginTry) = self.peek() {
            self.advance();
            let mut try_block = Vec::new();
            while !matches!(self.peek(), Token::Compound(CompoundKeyword::EndTry)) && !self.at_eof() {
                try_block.push(self.parse_statement()?);
                self.consume_token(&Token::SemiColon);
            }
            self.expect_token(&Token::Compound(CompoundKeyword::EndTry))?;
            self.expect_token(&Token::Compound(CompoundKeyword::BeginCatch))?;
            let mut catch_block = Vec::new();
            while !matches!(self.peek(), Token::Compound(CompoundKeyword::EndCatch)) && !self.at_eof() {
                catch_block.push(self.parse_statement()?);
                self.consume_token(&Token::SemiColon);
            }
            self.expect_token(&Token::Compound(CompoundKeyword::EndCatch))?;
            return Ok(Statement::TryCatch(TryCatchStatement { try_block, catch_block }));
        }
        if self.peek_nth_keyword(1, AllKeyWords::DIALOG) {
            self.advance(); // BEGIN
            return self.parse_begin_dialog();
        }
        self.advance(); // BEGIN
        if self.consume_keyword(AllKeyWords::ATOMIC) {
            // Natively-compiled module body; the option bag carries no
            // modeled semantics here, so it is parsed and discarded.
            let _ = self.parse_with_options()?;
            let mut statements = Vec::new();
            while !self.peek_keyword(AllKeyWords::END) && !self.at_eof() {
                statements.push(self.parse_statement()?);
                self.consume_token(&Token::SemiColon);
            }
            self.expect_keyword(AllKeyWords::END)?;
            return Ok(Statement::Block(Block { statements }));
        }
        if self.consume_keyword(AllKeyWords::TRANSACTION) || self.consume_word_ci("TRAN") {
            let name = if matches!(self.peek(), Token::Word(w) if w.quote_style.is_none() || true) && !matches!(self.peek(), Token::SemiColon | Token::EOF) {
                self.parse_identifier().ok()
            } else {
                None
            };
            return Ok(Statement::Transaction(TransactionStatement { kind: TransactionKind::Begin, name }));
        }
        let mut statements = Vec::new();
        while !self.peek_keyword(AllKeyWords::END) && !self.at_eof() {
            statements.push(self.parse_statement()?);
            self.consume_token(&Token::SemiColon);
        }
        self.expect_keyword(AllKeyWords::END)?;
        Ok(Statement::Block(Block { statements }))
    }

    fn parse_if(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // IF
        let condition = self.parse_expr()?;
        let then_statement = Box::new(self.parse_statement()?);
        self.consume_token(&Token::SemiColon);
        let else_statement = if self.consume_keyword(AllKeyWords::ELSE) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(Statement::If(IfStatement { condition, then_statement, else_statement }))
    }

    fn parse_while(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // WHILE
        let condition = self.parse_expr()?;
        let body = Box::new(self.parse_statement()?);
        Ok(Statement::While(WhileStatement { condition, body }))
    }

    fn parse_throw(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // THROW
        if matches!(self.peek(), Token::SemiColon | Token::EOF) || self.peek_is_go() {
            return Ok(Statement::Throw(ThrowStatement { error_number: None, message: None, state: None }));
        }
        let error_number = self.parse_expr()?;
        self.expect_token(&Token::Comma)?;
        let message = self.parse_expr()?;
        self.expect_token(&Token::Comma)?;
        let state = self.parse_expr()?;
        Ok(Statement::Throw(ThrowStatement { error_number: Some(error_number), message: Some(message), state: Some(state) }))
    }

    fn parse_raiserror(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // RAISERROR
        self.expect_token(&Token::LParen)?;
        let message = self.parse_expr()?;
        self.expect_token(&Token::Comma)?;
        let severity = self.parse_expr()?;
        self.expect_token(&Token::Comma)?;
        let state = self.parse_expr()?;
        let mut args = Vec::new();
        while self.consume_token(&Token::Comma) {
            args.push(self.parse_expr()?);
        }
        self.expect_token(&Token::RParen)?;
        Ok(Statement::RaiseError(RaiseErrorStatement { message, severity, state, args }))
    }

    fn parse_print(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // PRINT
        Ok(Statement::Print(PrintStatement { expr: self.parse_expr()? }))
    }

    fn parse_return(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // RETURN
        if matches!(self.peek(), Token::SemiColon | Token::EOF) || self.peek_keyword(AllKeyWords::END) || self.peek_is_go() {
            return Ok(Statement::Return(None));
        }
        Ok(Statement::Return(Some(self.parse_expr()?)))
    }

    fn parse_waitfor(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // WAITFOR
        let target = if self.consume_word_ci("DELAY") {
            WaitForTarget::Delay(self.parse_expr()?)
        } else {
            self.expect_keyword(AllKeyWords::TIME)?;
            WaitForTarget::Time(self.parse_expr()?)
        };
        Ok(Statement::WaitFor(WaitForStatement { target }))
    }

    fn parse_transaction(&mut self, kind: TransactionKind) -> Result<Statement, ParserError> {
        self.advance();
        self.consume_keyword(AllKeyWords::TRANSACTION);
        self.consume_word_ci("TRAN");
        self.consume_keyword(AllKeyWords::WORK);
        let name = if matches!(self.peek(), Token::Word(w) if w.quote_style.is_some() || w.keyword.is_none()) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        Ok(Statement::Transaction(TransactionStatement { kind, name }))
    }

    // ---- cursors ------------------------------------------------------------

    fn parse_declare(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // DECLARE
        if matches!(self.peek(), Token::LocalVariable(_)) {
            let name = self.parse_variable()?;
            let data_type = self.parse_data_type()?;
            let default = if self.consume_token(&Token::Eq) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            return Ok(Statement::DeclareVariable(DeclareVariableStatement { name, data_type, default }));
        }
        let name = self.parse_identifier()?;
        let insensitive = self.consume_word_ci("INSENSITIVE");
        let scroll = self.consume_keyword(AllKeyWords::SCROLL);
        self.expect_keyword(AllKeyWords::CURSOR)?;
        self.expect_keyword(AllKeyWords::FOR)?;
        let query = Box::new(self.parse_query()?);
        Ok(Statement::DeclareCursor(DeclareCursorStatement { name, insensitive, scroll, query }))
    }

    fn parse_set(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // SET
        if matches!(self.peek(), Token::LocalVariable(_)) {
            let name = self.parse_variable()?;
            self.expect_token(&Token::Eq)?;
            let value = self.parse_expr()?;
            return Ok(Statement::SetVariable(SetVariableStatement { name, value }));
        }
        let option = self.parse_identifier()?;
        let on = if self.consume_keyword(AllKeyWords::ON) {
            true
        } else if self.consume_keyword(AllKeyWords::OFF) {
            false
        } else {
            return self.error("expected ON or OFF after SET option");
        };
        Ok(Statement::SetOption(SetOptionStatement { option, on }))
    }

    fn parse_open_cursor(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // OPEN
        Ok(Statement::OpenCursor(OpenCursorStatement { name: self.parse_identifier()? }))
    }

    fn parse_close_cursor(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // CLOSE
        Ok(Statement::CloseCursor(CloseCursorStatement { name: self.parse_identifier()? }))
    }

    fn parse_fetch_cursor(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // FETCH
        let _ = self.consume_keyword(AllKeyWords::NEXT) || self.consume_word_ci("PRIOR") || self.consume_keyword(AllKeyWords::FIRST) || self.consume_word_ci("LAST");
        self.expect_keyword(AllKeyWords::FROM)?;
        let name = self.parse_identifier()?;
        let into = if self.consume_keyword(AllKeyWords::INTO) {
            self.parse_comma_separated(Self::parse_variable)?
        } else {
            Vec::new()
        };
        Ok(Statement::FetchCursor(FetchCursorStatement { name, into }))
    }

    fn parse_deallocate_cursor(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // DEALLOCATE
        Ok(Statement::DeallocateCursor(DeallocateCursorStatement { name: self.parse_identifier()? }))
    }

    fn parse_execute(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // EXEC[UTE]
        if self.consume_keyword(AllKeyWords::AS) {
            if self.consume_word_ci("LOGIN") {
                self.expect_token(&Token::Eq)?;
                return Ok(Statement::ExecuteAs(ExecuteAsStatement::ExecuteAsLogin(self.parse_expr()?)));
            }
            self.expect_keyword(AllKeyWords::USER)?;
            self.expect_token(&Token::Eq)?;
            return Ok(Statement::ExecuteAs(ExecuteAsStatement::ExecuteAsUser(self.parse_expr()?)));
        }
        let result_variable = if matches!(self.peek(), Token::LocalVariable(_)) && matches!(self.peek_nth(1), Token::Eq) {
            let v = self.parse_variable()?;
            self.advance(); // '='
            Some(v)
        } else {
            None
        };
        let name = self.parse_object_name()?;
        let mut args = Vec::new();
        if !matches!(self.peek(), Token::SemiColon | Token::EOF) && !self.peek_is_go() {
            loop {
                args.push(self.parse_function_arg()?);
                if !self.consume_token(&Token::Comma) {
                    break;
                }
            }
        }
        Ok(Statement::ExecuteProcedure(ExecuteProcedureStatement { name, args, result_variable }))
    }

    // ---- admin / security ---------------------------------------------------

    fn parse_grant_revoke(&mut self, kind: GrantRevokeKind) -> Result<Statement, ParserError> {
        self.advance(); // GRANT/REVOKE/DENY
        let _grant_option_for = kind == GrantRevokeKind::Revoke
            && self.consume_word_ci("GRANT")
            && {
                self.expect_keyword(AllKeyWords::OPTION)?;
                self.expect_keyword(AllKeyWords::FOR)?;
                true
            };
        let permissions = self.parse_comma_separated(Self::parse_identifier)?;
        let on = if self.consume_keyword(AllKeyWords::ON) {
            Some(self.parse_object_name()?)
        } else {
            None
        };
        let preposition_kw = if kind == GrantRevokeKind::Revoke { AllKeyWords::FROM } else { AllKeyWords::TO };
        self.expect_keyword(preposition_kw)?;
        let to = self.parse_comma_separated(Self::parse_identifier)?;
        let cascade = self.consume_keyword(AllKeyWords::CASCADE);
        Ok(Statement::GrantRevoke(GrantRevokeStatement { kind, permissions, on, to, cascade }))
    }

    fn parse_backup(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // BACKUP
        self.expect_keyword(AllKeyWords::DATABASE)?;
        let database = self.parse_identifier()?;
        self.expect_keyword(AllKeyWords::TO)?;
        self.consume_word_ci("DISK");
        self.expect_token(&Token::Eq)?;
        let to_disk = self.parse_expr()?;
        Ok(Statement::Backup(BackupStatement { database, to_disk }))
    }

    fn parse_restore(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // RESTORE
        self.expect_keyword(AllKeyWords::DATABASE)?;
        let database = self.parse_identifier()?;
        self.expect_keyword(AllKeyWords::FROM)?;
        self.consume_word_ci("DISK");
        self.expect_token(&Token::Eq)?;
        let from_disk = self.parse_expr()?;
        Ok(Statement::Restore(RestoreStatement { database, from_disk }))
    }

    fn parse_dbcc(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // DBCC
        let command = self.parse_identifier()?;
        let args = if self.consume_token(&Token::LParen) {
            let args = if self.peek() == &Token::RParen {
                Vec::new()
            } else {
                self.parse_comma_separated(Self::parse_expr)?
            };
            self.expect_token(&Token::RParen)?;
            args
        } else {
            Vec::new()
        };
        Ok(Statement::Dbcc(DbccStatement { command, args }))
    }

    fn parse_bulk_insert(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // BULK
        self.expect_keyword(AllKeyWords::INSERT)?;
        let table_name = self.parse_object_name()?;
        self.expect_keyword(AllKeyWords::FROM)?;
        let from_file = self.parse_expr()?;
        Ok(Statement::BulkInsert(BulkInsertStatement { table_name, from_file }))
    }

    fn parse_trigger_state(&mut self, enable: bool) -> Result<Statement, ParserError> {
        self.advance(); // ENABLE/DISABLE
        self.expect_keyword(AllKeyWords::TRIGGER)?;
        let trigger = self.parse_object_name()?;
        let table = if self.consume_keyword(AllKeyWords::ON) {
            Some(self.parse_object_name()?)
        } else {
            None
        };
        Ok(Statement::TriggerState(TriggerStateStatement { enable, trigger, table }))
    }

    // ---- Service Broker -------------------------------------------------------

    /// A dialog/conversation handle or group: a `@variable` in practice, but
    /// accepted as a bare identifier too since the AST stores it untyped.
    fn parse_broker_handle(&mut self) -> Result<Ident, ParserError> {
        let location = self.peek_location();
        if matches!(self.peek(), Token::LocalVariable(_)) {
            let v = self.parse_variable()?;
            return Ok(Ident::at(format!("@{}", v.name), location));
        }
        self.parse_identifier()
    }

    fn parse_begin_dialog(&mut self) -> Result<Statement, ParserError> {
        self.expect_keyword(AllKeyWords::DIALOG)?;
        self.consume_keyword(AllKeyWords::CONVERSATION);
        let name = Some(ObjectName::new(vec![self.parse_broker_handle()?]));
        let mut options = Vec::new();
        self.expect_keyword(AllKeyWords::FROM)?;
        self.expect_keyword(AllKeyWords::SERVICE)?;
        options.push((Ident::new("FROM SERVICE"), self.parse_expr()?));
        self.expect_keyword(AllKeyWords::TO)?;
        self.expect_keyword(AllKeyWords::SERVICE)?;
        options.push((Ident::new("TO SERVICE"), self.parse_expr()?));
        if self.consume_keyword(AllKeyWords::ON) {
            self.expect_keyword(AllKeyWords::CONTRACT)?;
            options.push((Ident::new("ON CONTRACT"), self.parse_expr()?));
        }
        if self.consume_keyword(AllKeyWords::WITH) {
            options.extend(self.parse_comma_separated(|p| {
                let key = p.parse_identifier()?;
                p.expect_token(&Token::Eq)?;
                let value = p.parse_expr()?;
                Ok((key, value))
            })?);
        }
        Ok(Statement::ServiceBroker(ServiceBrokerStatement {
            verb: Ident::new("BEGIN"),
            object_kind: Ident::new("DIALOG"),
            name,
            options,
        }))
    }

    fn parse_end_conversation(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // END CONVERSATION (compound token)
        let name = Some(ObjectName::new(vec![self.parse_broker_handle()?]));
        let mut options = Vec::new();
        if self.consume_keyword(AllKeyWords::WITH) {
            self.expect_token(&Token::LParen)?;
            if self.consume_word_ci("CLEANUP") {
                options.push((Ident::new("CLEANUP"), Expr::Value(Value::Null)));
            } else {
                self.expect_keyword(AllKeyWords::ERROR)?;
                self.expect_token(&Token::Eq)?;
                options.push((Ident::new("ERROR"), self.parse_expr()?));
                self.expect_token(&Token::Comma)?;
                self.consume_word_ci("DESCRIPTION");
                self.expect_token(&Token::Eq)?;
                options.push((Ident::new("DESCRIPTION"), self.parse_expr()?));
            }
            self.expect_token(&Token::RParen)?;
        }
        Ok(Statement::ServiceBroker(ServiceBrokerStatement {
            verb: Ident::new("END"),
            object_kind: Ident::new("CONVERSATION"),
            name,
            options,
        }))
    }

    fn parse_send(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // SEND
        self.expect_keyword(AllKeyWords::ON)?;
        self.expect_keyword(AllKeyWords::CONVERSATION)?;
        let name = Some(ObjectName::new(vec![self.parse_broker_handle()?]));
        let mut options = Vec::new();
        self.expect_keyword(AllKeyWords::MESSAGE)?;
        self.expect_keyword(AllKeyWords::TYPE)?;
        options.push((Ident::new("MESSAGE TYPE"), self.parse_expr()?));
        if self.consume_token(&Token::LParen) {
            options.push((Ident::new("BODY"), self.parse_expr()?));
            self.expect_token(&Token::RParen)?;
        }
        Ok(Statement::ServiceBroker(ServiceBrokerStatement {
            verb: Ident::new("SEND"),
            object_kind: Ident::new("CONVERSATION"),
            name,
            options,
        }))
    }

    fn parse_receive(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // RECEIVE
        let top = if self.peek_keyword(AllKeyWords::TOP) {
            Some(self.parse_top()?)
        } else {
            None
        };
        let columns = self.parse_comma_separated(Self::parse_expr)?;
        self.expect_keyword(AllKeyWords::FROM)?;
        let name = Some(self.parse_object_name()?);
        let mut options = vec![(Ident::new("COLUMNS"), Expr::Tuple(columns))];
        if let Some(top) = top {
            options.push((Ident::new("TOP"), top.quantity));
        }
        if self.consume_keyword(AllKeyWords::INTO) {
            let into = self.parse_object_name()?;
            options.push((Ident::new("INTO"), Expr::CompoundIdentifier(into.0)));
        }
        if self.consume_keyword(AllKeyWords::WHERE) {
            options.push((Ident::new("WHERE"), self.parse_expr()?));
        }
        Ok(Statement::ServiceBroker(ServiceBrokerStatement {
            verb: Ident::new("RECEIVE"),
            object_kind: Ident::new("QUEUE"),
            name,
            options,
        }))
    }

    fn parse_get_conversation_group(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // GET
        self.expect_keyword(AllKeyWords::CONVERSATION)?;
        self.expect_keyword(AllKeyWords::GROUP)?;
        let name = Some(ObjectName::new(vec![self.parse_broker_handle()?]));
        self.expect_keyword(AllKeyWords::FROM)?;
        let queue = self.parse_object_name()?;
        Ok(Statement::ServiceBroker(ServiceBrokerStatement {
            verb: Ident::new("GET"),
            object_kind: Ident::new("CONVERSATION GROUP"),
            name,
            options: vec![(Ident::new("FROM"), Expr::CompoundIdentifier(queue.0))],
        }))
    }

    fn parse_move_conversation(&mut self) -> Result<Statement, ParserError> {
        self.advance(); // MOVE
        self.expect_keyword(AllKeyWords::CONVERSATION)?;
        let name = Some(ObjectName::new(vec![self.parse_broker_handle()?]));
        self.expect_keyword(AllKeyWords::TO)?;
        self.expect_keyword(AllKeyWords::GROUP)?;
        let group = self.parse_broker_handle()?;
        Ok(Statement::ServiceBroker(ServiceBrokerStatement {
            verb: Ident::new("MOVE"),
            object_kind: Ident::new("CONVERSATION"),
            name,
            options: vec![(Ident::new("TO GROUP"), Expr::Identifier(group))],
        }))
    }
}
