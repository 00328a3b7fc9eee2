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

//! Tokenizer (lexer) for T-SQL: turns a source buffer into a stream of
//! [`TokenWithLocation`], collecting [`TokenizerError`]s instead of
//! aborting on the first one (spec.md §4.1, §7).

use core::fmt;
use core::iter::Peekable;
use core::str::Chars;

use crate::dialect::keywords::{AllKeyWords, ALL_KEYWORDS, ALL_KEYWORDS_INDEX};
use crate::dialect::Dialect;

/// 1-based line, 1-based column, 0-based byte offset. Every diagnostic in
/// this crate carries one of these (spec.md §3.1, §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub line: u64,
    pub column: u64,
    pub offset: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}, col {}", self.line, self.column)
    }
}

/// A bare, quoted, or keyword word. Temp-table prefixes (`#`, `##`) are part
/// of `value` (spec.md §4.1). Quoted words never resolve to a keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Word {
    /// The word's text, without surrounding quotes.
    pub value: String,
    /// `Some('[')`, `Some('"')`, or `None` for a bare word.
    pub quote_style: Option<char>,
    /// The resolved keyword, if `quote_style` is `None` and `value` matches
    /// an entry in the (case-insensitive) keyword table.
    pub keyword: Option<AllKeyWords>,
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.quote_style {
            Some('[') => write!(f, "[{}]", self.value),
            Some(q) => write!(f, "{q}{}{q}", self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

fn resolve_keyword(value: &str) -> Option<AllKeyWords> {
    let upper = value.to_uppercase();
    ALL_KEYWORDS
        .binary_search(&upper.as_str())
        .ok()
        .map(|idx| ALL_KEYWORDS_INDEX[idx])
}

/// A single-word logical unit synthesized from several adjacent keyword
/// tokens during scanning (spec.md §3.1's "compound keywords"). The named
/// examples in spec.md are not exhaustive ("e.g. ..."); this crate
/// generalizes the same mechanism across the whole JOIN/APPLY family so the
/// parser never has to special-case a one-word vs. three-word join spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompoundKeyword {
    InnerJoin,
    LeftJoin,
    LeftOuterJoin,
    RightJoin,
    RightOuterJoin,
    FullJoin,
    FullOuterJoin,
    CrossJoin,
    CrossApply,
    OuterApply,
    AtTimeZone,
    NextValueFor,
    IsDistinctFrom,
    IsNotDistinctFrom,
    TruncateTable,
    XmlSchemaCollection,
    AsymmetricKey,
    SymmetricKey,
    EndConversation,
    BeginTry,
    EndTry,
    BeginCatch,
    EndCatch,
    ForSystemTime,
}

impl CompoundKeyword {
    /// Canonical rendering, used by the renderer and by error messages.
    pub fn as_str(&self) -> &'static str {
        use CompoundKeyword::*;
        match self {
            InnerJoin => "INNER JOIN",
            LeftJoin => "LEFT JOIN",
            LeftOuterJoin => "LEFT OUTER JOIN",
            RightJoin => "RIGHT JOIN",
            RightOuterJoin => "RIGHT OUTER JOIN",
            FullJoin => "FULL JOIN",
            FullOuterJoin => "FULL OUTER JOIN",
            CrossJoin => "CROSS JOIN",
            CrossApply => "CROSS APPLY",
            OuterApply => "OUTER APPLY",
            AtTimeZone => "AT TIME ZONE",
            NextValueFor => "NEXT VALUE FOR",
            IsDistinctFrom => "IS DISTINCT FROM",
            IsNotDistinctFrom => "IS NOT DISTINCT FROM",
            TruncateTable => "TRUNCATE TABLE",
            XmlSchemaCollection => "XML SCHEMA COLLECTION",
            AsymmetricKey => "ASYMMETRIC KEY",
            SymmetricKey => "SYMMETRIC KEY",
            EndConversation => "END CONVERSATION",
            BeginTry => "BEGIN TRY",
            EndTry => "END TRY",
            BeginCatch => "BEGIN CATCH",
            EndCatch => "END CATCH",
            ForSystemTime => "FOR SYSTEM_TIME",
        }
    }
}

/// Table of compound-keyword sequences, longest first so scanning greedily
/// matches the longest spelling (`IS NOT DISTINCT FROM` before `IS DISTINCT
/// FROM`, `LEFT OUTER JOIN` before a bare `LEFT`...`JOIN` pair). A trie would
/// generalize this if the table grew much larger; at ~24 entries a linear
/// greedy scan is simpler and just as correct.
const COMPOUND_TABLE: &[(&[AllKeyWords], CompoundKeyword)] = &[
    (
        &[AllKeyWords::IS, AllKeyWords::NOT, AllKeyWords::DISTINCT, AllKeyWords::FROM],
        CompoundKeyword::IsNotDistinctFrom,
    ),
    (
        &[AllKeyWords::LEFT, AllKeyWords::OUTER, AllKeyWords::JOIN],
        CompoundKeyword::LeftOuterJoin,
    ),
    (
        &[AllKeyWords::RIGHT, AllKeyWords::OUTER, AllKeyWords::JOIN],
        CompoundKeyword::RightOuterJoin,
    ),
    (
        &[AllKeyWords::FULL, AllKeyWords::OUTER, AllKeyWords::JOIN],
        CompoundKeyword::FullOuterJoin,
    ),
    (
        &[AllKeyWords::AT, AllKeyWords::TIME, AllKeyWords::ZONE],
        CompoundKeyword::AtTimeZone,
    ),
    (
        &[AllKeyWords::NEXT, AllKeyWords::VALUE, AllKeyWords::FOR],
        CompoundKeyword::NextValueFor,
    ),
    (
        &[AllKeyWords::IS, AllKeyWords::DISTINCT, AllKeyWords::FROM],
        CompoundKeyword::IsDistinctFrom,
    ),
    (
        &[AllKeyWords::XML, AllKeyWords::SCHEMA, AllKeyWords::COLLECTION],
        CompoundKeyword::XmlSchemaCollection,
    ),
    (
        &[AllKeyWords::INNER, AllKeyWords::JOIN],
        CompoundKeyword::InnerJoin,
    ),
    (&[AllKeyWords::LEFT, AllKeyWords::JOIN], CompoundKeyword::LeftJoin),
    (&[AllKeyWords::RIGHT, AllKeyWords::JOIN], CompoundKeyword::RightJoin),
    (&[AllKeyWords::FULL, AllKeyWords::JOIN], CompoundKeyword::FullJoin),
    (&[AllKeyWords::CROSS, AllKeyWords::JOIN], CompoundKeyword::CrossJoin),
    (&[AllKeyWords::CROSS, AllKeyWords::APPLY], CompoundKeyword::CrossApply),
    (&[AllKeyWords::OUTER, AllKeyWords::APPLY], CompoundKeyword::OuterApply),
    (
        &[AllKeyWords::TRUNCATE, AllKeyWords::TABLE],
        CompoundKeyword::TruncateTable,
    ),
    (
        &[AllKeyWords::ASYMMETRIC, AllKeyWords::KEY],
        CompoundKeyword::AsymmetricKey,
    ),
    (
        &[AllKeyWords::SYMMETRIC, AllKeyWords::KEY],
        CompoundKeyword::SymmetricKey,
    ),
    (
        &[AllKeyWords::END, AllKeyWords::CONVERSATION],
        CompoundKeyword::EndConversation,
    ),
    (&[AllKeyWords::BEGIN, AllKeyWords::TRY], CompoundKeyword::BeginTry),
    (&[AllKeyWords::END, AllKeyWords::TRY], CompoundKeyword::EndTry),
    (&[AllKeyWords::BEGIN, AllKeyWords::CATCH], CompoundKeyword::BeginCatch),
    (&[AllKeyWords::END, AllKeyWords::CATCH], CompoundKeyword::EndCatch),
    (
        &[AllKeyWords::FOR, AllKeyWords::SYSTEM_TIME],
        CompoundKeyword::ForSystemTime,
    ),
];

/// The closed set of lexical categories from spec.md §3.1.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Token {
    /// End-of-input sentinel.
    EOF,
    /// Bare, quoted, or keyword word (identifiers, keywords, temp tables).
    Word(Word),
    /// Integer or float literal, exactly as written (`123`, `3.14`, `1e10`).
    Number(String),
    /// `$` + digits `[.digits]`, without the leading `$`.
    Money(String),
    /// `0x` + hex digits, without the `0x` prefix.
    HexStringLiteral(String),
    /// `'...'` with `''` escapes already resolved to `'`.
    SingleQuotedString(String),
    /// `N'...'`, the Unicode-flagged sibling of [`Token::SingleQuotedString`].
    NationalStringLiteral(String),
    /// `@name`, without the `@`.
    LocalVariable(String),
    /// `@@name`, without the `@@`.
    SystemVariable(String),
    /// A synthesized multi-word token (see [`CompoundKeyword`]).
    Compound(CompoundKeyword),
    Comma,
    SemiColon,
    LParen,
    RParen,
    Period,
    Colon,
    DoubleColon,
    Eq,
    Neq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    NotLt,
    NotGt,
    Plus,
    Minus,
    Mul,
    Div,
    Mod,
    PlusEq,
    MinusEq,
    MulEq,
    DivEq,
    ModEq,
    BitwiseAndEq,
    BitwiseOrEq,
    BitwiseXorEq,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseNot,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::EOF => write!(f, "EOF"),
            Token::Word(w) => write!(f, "{w}"),
            Token::Number(n) => write!(f, "{n}"),
            Token::Money(n) => write!(f, "${n}"),
            Token::HexStringLiteral(s) => write!(f, "0x{s}"),
            Token::SingleQuotedString(s) => write!(f, "'{}'", escape_quoted_string(s, '\'')),
            Token::NationalStringLiteral(s) => write!(f, "N'{}'", escape_quoted_string(s, '\'')),
            Token::LocalVariable(s) => write!(f, "@{s}"),
            Token::SystemVariable(s) => write!(f, "@@{s}"),
            Token::Compound(c) => write!(f, "{}", c.as_str()),
            Token::Comma => write!(f, ","),
            Token::SemiColon => write!(f, ";"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Period => write!(f, "."),
            Token::Colon => write!(f, ":"),
            Token::DoubleColon => write!(f, "::"),
            Token::Eq => write!(f, "="),
            Token::Neq => write!(f, "<>"),
            Token::Lt => write!(f, "<"),
            Token::Gt => write!(f, ">"),
            Token::LtEq => write!(f, "<="),
            Token::GtEq => write!(f, ">="),
            Token::NotLt => write!(f, "!<"),
            Token::NotGt => write!(f, "!>"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Mul => write!(f, "*"),
            Token::Div => write!(f, "/"),
            Token::Mod => write!(f, "%"),
            Token::PlusEq => write!(f, "+="),
            Token::MinusEq => write!(f, "-="),
            Token::MulEq => write!(f, "*="),
            Token::DivEq => write!(f, "/="),
            Token::ModEq => write!(f, "%="),
            Token::BitwiseAndEq => write!(f, "&="),
            Token::BitwiseOrEq => write!(f, "|="),
            Token::BitwiseXorEq => write!(f, "^="),
            Token::BitwiseAnd => write!(f, "&"),
            Token::BitwiseOr => write!(f, "|"),
            Token::BitwiseXor => write!(f, "^"),
            Token::BitwiseNot => write!(f, "~"),
        }
    }
}

pub fn escape_quoted_string(s: &str, quote: char) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if ch == quote {
            out.push(ch);
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithLocation {
    pub token: Token,
    pub location: Location,
}

impl TokenWithLocation {
    fn new(token: Token, location: Location) -> Self {
        TokenWithLocation { token, location }
    }
}

impl fmt::Display for TokenWithLocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.token)
    }
}

/// A lexer error: always recoverable (spec.md §4.1, §7 category 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerError {
    pub message: String,
    pub location: Location,
}

impl fmt::Display for TokenizerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.location)
    }
}

impl std::error::Error for TokenizerError {}

enum Whitespace {
    Space,
    Newline,
    Tab,
    SingleLineComment,
    MultiLineComment,
}

/// A char cursor that tracks 1-based line/column and 0-based byte offset.
struct Cursor<'a> {
    chars: Peekable<Chars<'a>>,
    line: u64,
    column: u64,
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    fn location(&self) -> Location {
        Location {
            line: self.line,
            column: self.column,
            offset: self.offset,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn next_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.next();
            true
        } else {
            false
        }
    }
}

/// Consumes a source buffer and produces tokens. The only public entry
/// point the spec requires is [`Tokenizer::next_token`]; [`Tokenizer::tokenize`]
/// is the convenience driver the parser actually uses so it can hold a
/// random-access token buffer instead of re-invoking the lexer for lookahead.
pub struct Tokenizer<'a> {
    dialect: &'a dyn Dialect,
    cursor: Cursor<'a>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(dialect: &'a dyn Dialect, query: &'a str) -> Self {
        // A leading BOM is consumed if present (spec.md §6); no other BOM
        // handling is specified.
        let query = query.strip_prefix('\u{feff}').unwrap_or(query);
        Tokenizer {
            dialect,
            cursor: Cursor::new(query),
        }
    }

    /// Tokenizes the whole buffer, collecting errors instead of stopping at
    /// the first one (spec.md §4.1 "Failure").
    pub fn tokenize(&mut self) -> (Vec<TokenWithLocation>, Vec<TokenizerError>) {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();
        loop {
            match self.next_token() {
                Ok(tok) => {
                    let is_eof = matches!(tok.token, Token::EOF);
                    tokens.push(tok);
                    if is_eof {
                        break;
                    }
                }
                Err(e) => {
                    log::trace!("tokenizer error, resyncing: {e}");
                    errors.push(e);
                    self.resync_after_error();
                }
            }
        }
        promote_compounds(&mut tokens);
        (tokens, errors)
    }

    /// Skips to the next whitespace boundary, per spec.md §4.1's recovery rule.
    fn resync_after_error(&mut self) {
        while let Some(ch) = self.cursor.peek() {
            if ch.is_whitespace() {
                break;
            }
            self.cursor.next();
        }
    }

    /// Returns the next token, skipping (but position-tracking through)
    /// whitespace and comments, per spec.md §4.1's contract.
    pub fn next_token(&mut self) -> Result<TokenWithLocation, TokenizerError> {
        loop {
            if self.skip_one_whitespace_or_comment()?.is_none() {
                break;
            }
        }
        let loc = self.cursor.location();
        let Some(ch) = self.cursor.peek() else {
            return Ok(TokenWithLocation::new(Token::EOF, loc));
        };

        let token = match ch {
            '\'' => self.scan_single_quoted_string()?,
            '"' if self.dialect.is_delimited_identifier_start('"') => {
                self.scan_delimited_identifier('"', '"')?
            }
            '[' if self.dialect.is_delimited_identifier_start('[') => {
                self.scan_delimited_identifier('[', ']')?
            }
            '@' => self.scan_variable()?,
            '0'..='9' => self.scan_number()?,
            '$' => {
                let mut lookahead = self.cursor.chars.clone();
                lookahead.next(); // '$'
                match lookahead.next() {
                    Some(c) if c.is_ascii_digit() => self.scan_money()?,
                    // `$action`/`$identity`/`$rowguid`/... pseudo-columns
                    // (spec.md §4.2: `$action` is a valid OUTPUT column in
                    // MERGE). Not a money literal, so scanned as one word.
                    Some(c) if self.dialect.is_identifier_start(c) => self.scan_dollar_word()?,
                    _ => self.scan_operator()?,
                }
            }
            ch if self.dialect.is_identifier_start(ch) => self.scan_word()?,
            'N' | 'n' => self.scan_word_or_national_string()?,
            ',' => self.single(Token::Comma),
            ';' => self.single(Token::SemiColon),
            '(' => self.single(Token::LParen),
            ')' => self.single(Token::RParen),
            '.' => self.scan_period_or_number()?,
            '~' => self.single(Token::BitwiseNot),
            _ => self.scan_operator()?,
        };

        Ok(TokenWithLocation::new(token, loc))
    }

    fn single(&mut self, token: Token) -> Token {
        self.cursor.next();
        token
    }

    /// Returns `Ok(Some(()))` if whitespace/comment was skipped (caller
    /// should loop again), `Ok(None)` at a real token or EOF.
    fn skip_one_whitespace_or_comment(&mut self) -> Result<Option<()>, TokenizerError> {
        match self.cursor.peek() {
            Some(' ') | Some('\t') | Some('\n') | Some('\r') => {
                self.cursor.next();
                Ok(Some(()))
            }
            _ => {
                if self.peek_is("--") {
                    self.cursor.next();
                    self.cursor.next();
                    while let Some(ch) = self.cursor.peek() {
                        if ch == '\n' {
                            break;
                        }
                        self.cursor.next();
                    }
                    return Ok(Some(()));
                }
                if self.peek_is("/*") {
                    self.scan_block_comment()?;
                    return Ok(Some(()));
                }
                Ok(None)
            }
        }
    }

    fn peek_is(&mut self, s: &str) -> bool {
        let mut lookahead = self.cursor.chars.clone();
        for expected in s.chars() {
            if lookahead.next() != Some(expected) {
                return false;
            }
        }
        true
    }

    fn scan_block_comment(&mut self) -> Result<(), TokenizerError> {
        let start = self.cursor.location();
        self.cursor.next(); // '/'
        self.cursor.next(); // '*'
        // Lenient (default) mode tracks nesting depth, matching spec.md
        // §4.1's stated rule. Strict mode closes on the first `*/`,
        // ignoring any `/*` seen along the way (Open Question 3).
        let nesting = !self.dialect.settings().strict_nested_comments;
        let mut depth: u32 = 1;
        loop {
            if self.peek_is("*/") {
                self.cursor.next();
                self.cursor.next();
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
                continue;
            }
            if nesting && self.peek_is("/*") {
                self.cursor.next();
                self.cursor.next();
                depth += 1;
                continue;
            }
            match self.cursor.next() {
                Some(_) => continue,
                None => {
                    return Err(TokenizerError {
                        message: "unterminated block comment".into(),
                        location: start,
                    })
                }
            }
        }
    }

    fn scan_word(&mut self) -> Result<Token, TokenizerError> {
        let mut value = String::new();
        while let Some(ch) = self.cursor.peek() {
            if value.is_empty() {
                if self.dialect.is_identifier_start(ch) {
                    value.push(ch);
                    self.cursor.next();
                    continue;
                } else {
                    break;
                }
            }
            if self.dialect.is_identifier_part(ch) {
                value.push(ch);
                self.cursor.next();
            } else {
                break;
            }
        }
        let keyword = resolve_keyword(&value);
        Ok(Token::Word(Word {
            value,
            quote_style: None,
            keyword,
        }))
    }

    /// `N'...'` is a Unicode string; a bare `N`/`n` not followed by `'` is a
    /// plain identifier (it may itself be a keyword).
    fn scan_word_or_national_string(&mut self) -> Result<Token, TokenizerError> {
        let mut lookahead = self.cursor.chars.clone();
        if lookahead.next().is_some() && lookahead.next() == Some('\'') {
            self.cursor.next(); // consume N/n
            let value = self.scan_quoted_body('\'')?;
            return Ok(Token::NationalStringLiteral(value));
        }
        self.scan_word()
    }

    fn scan_delimited_identifier(
        &mut self,
        open: char,
        close: char,
    ) -> Result<Token, TokenizerError> {
        let start = self.cursor.location();
        self.cursor.next(); // opening quote
        let mut value = String::new();
        loop {
            match self.cursor.next() {
                Some(ch) if ch == close => {
                    if self.cursor.peek() == Some(close) {
                        // doubled closing quote/bracket is an escape
                        value.push(close);
                        self.cursor.next();
                        continue;
                    }
                    return Ok(Token::Word(Word {
                        value,
                        quote_style: Some(open),
                        keyword: None,
                    }));
                }
                Some(ch) => value.push(ch),
                None => {
                    return Err(TokenizerError {
                        message: "unterminated bracketed identifier".into(),
                        location: start,
                    })
                }
            }
        }
    }

    fn scan_single_quoted_string(&mut self) -> Result<Token, TokenizerError> {
        let value = self.scan_quoted_body('\'')?;
        Ok(Token::SingleQuotedString(value))
    }

    /// Consumes an opening `quote`, scans to its matching close (doubled
    /// quote is an escape for a literal quote char), and returns the decoded
    /// body. The opening quote character must still be the next character
    /// in the cursor when this is called.
    fn scan_quoted_body(&mut self, quote: char) -> Result<String, TokenizerError> {
        let start = self.cursor.location();
        self.cursor.next(); // opening quote
        let mut value = String::new();
        loop {
            match self.cursor.next() {
                Some(ch) if ch == quote => {
                    if self.cursor.peek() == Some(quote) {
                        value.push(quote);
                        self.cursor.next();
                        continue;
                    }
                    return Ok(value);
                }
                Some(ch) => value.push(ch),
                None => {
                    return Err(TokenizerError {
                        message: "unterminated string literal".into(),
                        location: start,
                    })
                }
            }
        }
    }

    fn scan_number(&mut self) -> Result<Token, TokenizerError> {
        let mut value = String::new();
        // hex literal
        if self.cursor.peek() == Some('0') {
            let mut lookahead = self.cursor.chars.clone();
            lookahead.next();
            if matches!(lookahead.next(), Some('x') | Some('X')) {
                let start = self.cursor.location();
                self.cursor.next();
                self.cursor.next();
                let mut hex = String::new();
                while let Some(ch) = self.cursor.peek() {
                    if ch.is_ascii_hexdigit() {
                        hex.push(ch);
                        self.cursor.next();
                    } else {
                        break;
                    }
                }
                if hex.is_empty() {
                    return Err(TokenizerError {
                        message: "invalid hex literal".into(),
                        location: start,
                    });
                }
                return Ok(Token::HexStringLiteral(hex));
            }
        }
        while let Some(ch) = self.cursor.peek() {
            if ch.is_ascii_digit() {
                value.push(ch);
                self.cursor.next();
            } else {
                break;
            }
        }
        if self.cursor.peek() == Some('.') {
            let mut lookahead = self.cursor.chars.clone();
            lookahead.next();
            if lookahead.next().map(|c| c.is_ascii_digit()).unwrap_or(false) || value.is_empty() {
                value.push('.');
                self.cursor.next();
                while let Some(ch) = self.cursor.peek() {
                    if ch.is_ascii_digit() {
                        value.push(ch);
                        self.cursor.next();
                    } else {
                        break;
                    }
                }
            }
        }
        if matches!(self.cursor.peek(), Some('e') | Some('E')) {
            let mut lookahead = self.cursor.chars.clone();
            lookahead.next();
            let mut ok = false;
            match lookahead.next() {
                Some(c) if c.is_ascii_digit() => ok = true,
                Some('+') | Some('-') => {
                    if lookahead.next().map(|c| c.is_ascii_digit()).unwrap_or(false) {
                        ok = true;
                    }
                }
                _ => {}
            }
            if ok {
                value.push('e');
                self.cursor.next();
                if matches!(self.cursor.peek(), Some('+') | Some('-')) {
                    value.push(self.cursor.next().unwrap());
                }
                while let Some(ch) = self.cursor.peek() {
                    if ch.is_ascii_digit() {
                        value.push(ch);
                        self.cursor.next();
                    } else {
                        break;
                    }
                }
            }
        }
        Ok(Token::Number(value))
    }

    fn scan_period_or_number(&mut self) -> Result<Token, TokenizerError> {
        let mut lookahead = self.cursor.chars.clone();
        lookahead.next();
        if lookahead.next().map(|c| c.is_ascii_digit()).unwrap_or(false) {
            return self.scan_number();
        }
        self.cursor.next();
        Ok(Token::Period)
    }

    fn scan_money(&mut self) -> Result<Token, TokenizerError> {
        self.cursor.next(); // '$'
        let mut value = String::new();
        while let Some(ch) = self.cursor.peek() {
            if ch.is_ascii_digit() {
                value.push(ch);
                self.cursor.next();
            } else {
                break;
            }
        }
        if self.cursor.peek() == Some('.') {
            value.push('.');
            self.cursor.next();
            while let Some(ch) = self.cursor.peek() {
                if ch.is_ascii_digit() {
                    value.push(ch);
                    self.cursor.next();
                } else {
                    break;
                }
            }
        }
        Ok(Token::Money(value))
    }

    /// A `$`-prefixed pseudo-column identifier (`$action`, `$identity`, ...),
    /// never a keyword regardless of what follows the `$`.
    fn scan_dollar_word(&mut self) -> Result<Token, TokenizerError> {
        let mut value = String::new();
        value.push(self.cursor.next().unwrap()); // '$'
        while let Some(ch) = self.cursor.peek() {
            if self.dialect.is_identifier_part(ch) {
                value.push(ch);
                self.cursor.next();
            } else {
                break;
            }
        }
        Ok(Token::Word(Word {
            value,
            quote_style: None,
            keyword: None,
        }))
    }

    fn scan_variable(&mut self) -> Result<Token, TokenizerError> {
        self.cursor.next(); // '@'
        let system = self.cursor.next_if('@');
        let mut value = String::new();
        while let Some(ch) = self.cursor.peek() {
            if value.is_empty() {
                if self.dialect.is_identifier_start(ch) || ch == '$' {
                    value.push(ch);
                    self.cursor.next();
                    continue;
                }
                break;
            }
            if self.dialect.is_identifier_part(ch) {
                value.push(ch);
                self.cursor.next();
            } else {
                break;
            }
        }
        if system {
            Ok(Token::SystemVariable(value))
        } else {
            Ok(Token::LocalVariable(value))
        }
    }

    fn scan_operator(&mut self) -> Result<Token, TokenizerError> {
        let start = self.cursor.location();
        let ch = self.cursor.next().ok_or_else(|| TokenizerError {
            message: "unexpected end of input".into(),
            location: start,
        })?;
        // Greedy maximal munch: compound-assignment / multi-char comparisons
        // must be recognized before their shorter prefixes (spec.md §4.1).
        let token = match ch {
            '<' => match self.cursor.peek() {
                Some('=') => {
                    self.cursor.next();
                    Token::LtEq
                }
                Some('>') => {
                    self.cursor.next();
                    Token::Neq
                }
                _ => Token::Lt,
            },
            '>' => match self.cursor.peek() {
                Some('=') => {
                    self.cursor.next();
                    Token::GtEq
                }
                _ => Token::Gt,
            },
            '!' => match self.cursor.peek() {
                Some('=') => {
                    self.cursor.next();
                    Token::Neq
                }
                Some('<') => {
                    self.cursor.next();
                    Token::NotLt
                }
                Some('>') => {
                    self.cursor.next();
                    Token::NotGt
                }
                _ => {
                    return Err(TokenizerError {
                        message: "expected '=', '<' or '>' after '!'".into(),
                        location: start,
                    })
                }
            },
            '=' => Token::Eq,
            '+' => {
                if self.cursor.next_if('=') {
                    Token::PlusEq
                } else {
                    Token::Plus
                }
            }
            '-' => {
                if self.cursor.next_if('=') {
                    Token::MinusEq
                } else {
                    Token::Minus
                }
            }
            '*' => {
                if self.cursor.next_if('=') {
                    Token::MulEq
                } else {
                    Token::Mul
                }
            }
            '/' => {
                if self.cursor.next_if('=') {
                    Token::DivEq
                } else {
                    Token::Div
                }
            }
            '%' => {
                if self.cursor.next_if('=') {
                    Token::ModEq
                } else {
                    Token::Mod
                }
            }
            '&' => {
                if self.cursor.next_if('=') {
                    Token::BitwiseAndEq
                } else {
                    Token::BitwiseAnd
                }
            }
            '|' => {
                if self.cursor.next_if('=') {
                    Token::BitwiseOrEq
                } else {
                    Token::BitwiseOr
                }
            }
            '^' => {
                if self.cursor.next_if('=') {
                    Token::BitwiseXorEq
                } else {
                    Token::BitwiseXor
                }
            }
            ':' => {
                if self.cursor.next_if(':') {
                    Token::DoubleColon
                } else {
                    Token::Colon
                }
            }
            other => {
                return Err(TokenizerError {
                    message: format!("unexpected character {other:?}"),
                    location: start,
                })
            }
        };
        Ok(token)
    }
}

/// Collapses runs of consecutive keyword tokens that match an entry in
/// [`COMPOUND_TABLE`] into a single [`Token::Compound`], carrying the first
/// matched token's location forward (spec.md §3.1: "emits the synthesized
/// token carrying the position of the first word").
fn promote_compounds(tokens: &mut Vec<TokenWithLocation>) {
    let mut out: Vec<TokenWithLocation> = Vec::with_capacity(tokens.len());
    let mut i = 0;
    'outer: while i < tokens.len() {
        if let Token::Word(w) = &tokens[i].token {
            if let Some(kw) = w.keyword {
                for (seq, compound) in COMPOUND_TABLE {
                    if i + seq.len() <= tokens.len() && seq[0] == kw {
                        let matches_all = seq.iter().enumerate().all(|(off, expected)| {
                            matches!(&tokens[i + off].token, Token::Word(w2) if w2.keyword == Some(*expected))
                        });
                        if matches_all {
                            out.push(TokenWithLocation::new(
                                Token::Compound(*compound),
                                tokens[i].location,
                            ));
                            i += seq.len();
                            continue 'outer;
                        }
                    }
                }
            }
        }
        out.push(tokens[i].clone());
        i += 1;
    }
    *tokens = out;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::MsSqlDialect;

    fn toks(sql: &str) -> Vec<Token> {
        let dialect = MsSqlDialect::new();
        let mut t = Tokenizer::new(&dialect, sql);
        let (tokens, errors) = t.tokenize();
        assert!(errors.is_empty(), "unexpected tokenizer errors: {errors:?}");
        tokens.into_iter().map(|t| t.token).collect()
    }

    #[test]
    fn monotone_positions() {
        let dialect = MsSqlDialect::new();
        let mut t = Tokenizer::new(&dialect, "SELECT 1\nFROM t");
        let (tokens, errors) = t.tokenize();
        assert!(errors.is_empty());
        for pair in tokens.windows(2) {
            let a = pair[0].location;
            let b = pair[1].location;
            assert!((b.line, b.column, b.offset) > (a.line, a.column, a.offset));
        }
    }

    #[test]
    fn keyword_case_insensitive() {
        let a = toks("select");
        let b = toks("SELECT");
        let c = toks("SeLeCt");
        assert_eq!(a, b);
        assert_eq!(b, c);
        match &a[0] {
            Token::Word(w) => assert_eq!(w.keyword, Some(AllKeyWords::SELECT)),
            _ => panic!("expected word"),
        }
    }

    #[test]
    fn compound_join_promotion() {
        let tokens = toks("a LEFT OUTER JOIN b");
        assert!(tokens
            .iter()
            .any(|t| matches!(t, Token::Compound(CompoundKeyword::LeftOuterJoin))));
    }

    #[test]
    fn variables() {
        let tokens = toks("@x @@ROWCOUNT");
        assert_eq!(tokens[0], Token::LocalVariable("x".into()));
        assert_eq!(tokens[1], Token::SystemVariable("ROWCOUNT".into()));
    }

    #[test]
    fn bracketed_identifier_with_escape() {
        let tokens = toks("[a]]b]");
        assert_eq!(
            tokens[0],
            Token::Word(Word {
                value: "a]b".into(),
                quote_style: Some('['),
                keyword: None,
            })
        );
    }

    #[test]
    fn money_and_hex() {
        let tokens = toks("$12.50 0xFF");
        assert_eq!(tokens[0], Token::Money("12.50".into()));
        assert_eq!(tokens[1], Token::HexStringLiteral("FF".into()));
    }

    #[test]
    fn nested_block_comment() {
        let tokens = toks("/* outer /* inner */ still outer */ SELECT 1");
        assert!(matches!(tokens[0], Token::Word(_)));
    }

    #[test]
    fn unterminated_string_is_collected_not_thrown() {
        let dialect = MsSqlDialect::new();
        let mut t = Tokenizer::new(&dialect, "'abc");
        let (_tokens, errors) = t.tokenize();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("unterminated"));
    }
}
