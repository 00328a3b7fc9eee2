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

use crate::ast::ObjectName;

/// `T-SQL` column/variable/cast data types. Unrecognized user-defined types
/// (including CLR and `sys.`-schema types) fall back to [`DataType::Custom`]
/// rather than failing the parse — this parser never validates a catalog.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataType {
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Bit,
    Decimal(ExactNumberInfo),
    Numeric(ExactNumberInfo),
    Money,
    SmallMoney,
    Float(Option<u64>),
    Real,
    Date,
    Time(Option<u64>),
    DateTime,
    DateTime2(Option<u64>),
    SmallDateTime,
    DateTimeOffset(Option<u64>),
    Char(Option<CharacterLength>),
    VarChar(Option<CharacterLength>),
    NChar(Option<CharacterLength>),
    NVarChar(Option<CharacterLength>),
    Text,
    NText,
    Binary(Option<u64>),
    VarBinary(Option<CharacterLength>),
    Image,
    Xml(Option<ObjectName>),
    UniqueIdentifier,
    SqlVariant,
    HierarchyId,
    RowVersion,
    Cursor,
    Table,
    /// A user-defined or unrecognized type, e.g. `geography`, `MyType`.
    Custom(ObjectName),
}

/// `MAX` or a concrete length, for `VARCHAR`/`NVARCHAR`/`VARBINARY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CharacterLength {
    Max,
    Fixed(u64),
}

impl fmt::Display for CharacterLength {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CharacterLength::Max => write!(f, "MAX"),
            CharacterLength::Fixed(n) => write!(f, "{n}"),
        }
    }
}

/// Precision/scale for `DECIMAL`/`NUMERIC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExactNumberInfo {
    None,
    Precision(u64),
    PrecisionAndScale(u64, u64),
}

impl fmt::Display for ExactNumberInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExactNumberInfo::None => Ok(()),
            ExactNumberInfo::Precision(p) => write!(f, "({p})"),
            ExactNumberInfo::PrecisionAndScale(p, s) => write!(f, "({p}, {s})"),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataType::TinyInt => write!(f, "TINYINT"),
            DataType::SmallInt => write!(f, "SMALLINT"),
            DataType::Int => write!(f, "INT"),
            DataType::BigInt => write!(f, "BIGINT"),
            DataType::Bit => write!(f, "BIT"),
            DataType::Decimal(info) => write!(f, "DECIMAL{info}"),
            DataType::Numeric(info) => write!(f, "NUMERIC{info}"),
            DataType::Money => write!(f, "MONEY"),
            DataType::SmallMoney => write!(f, "SMALLMONEY"),
            DataType::Float(Some(n)) => write!(f, "FLOAT({n})"),
            DataType::Float(None) => write!(f, "FLOAT"),
            DataType::Real => write!(f, "REAL"),
            DataType::Date => write!(f, "DATE"),
            DataType::Time(Some(n)) => write!(f, "TIME({n})"),
            DataType::Time(None) => write!(f, "TIME"),
            DataType::DateTime => write!(f, "DATETIME"),
            DataType::DateTime2(Some(n)) => write!(f, "DATETIME2({n})"),
            DataType::DateTime2(None) => write!(f, "DATETIME2"),
            DataType::SmallDateTime => write!(f, "SMALLDATETIME"),
            DataType::DateTimeOffset(Some(n)) => write!(f, "DATETIMEOFFSET({n})"),
            DataType::DateTimeOffset(None) => write!(f, "DATETIMEOFFSET"),
            DataType::Char(Some(len)) => write!(f, "CHAR({len})"),
            DataType::Char(None) => write!(f, "CHAR"),
            DataType::VarChar(Some(len)) => write!(f, "VARCHAR({len})"),
            DataType::VarChar(None) => write!(f, "VARCHAR"),
            DataType::NChar(Some(len)) => write!(f, "NCHAR({len})"),
            DataType::NChar(None) => write!(f, "NCHAR"),
            DataType::NVarChar(Some(len)) => write!(f, "NVARCHAR({len})"),
            DataType::NVarChar(None) => write!(f, "NVARCHAR"),
            DataType::Text => write!(f, "TEXT"),
            DataType::NText => write!(f, "NTEXT"),
            DataType::Binary(Some(n)) => write!(f, "BINARY({n})"),
            DataType::Binary(None) => write!(f, "BINARY"),
            DataType::VarBinary(Some(len)) => write!(f, "VARBINARY({len})"),
            DataType::VarBinary(None) => write!(f, "VARBINARY"),
            DataType::Image => write!(f, "IMAGE"),
            DataType::Xml(Some(collection)) => write!(f, "XML({collection})"),
            DataType::Xml(None) => write!(f, "XML"),
            DataType::UniqueIdentifier => write!(f, "UNIQUEIDENTIFIER"),
            DataType::SqlVariant => write!(f, "SQL_VARIANT"),
            DataType::HierarchyId => write!(f, "HIERARCHYID"),
            DataType::RowVersion => write!(f, "ROWVERSION"),
            DataType::Cursor => write!(f, "CURSOR"),
            DataType::Table => write!(f, "TABLE"),
            DataType::Custom(name) => write!(f, "{name}"),
        }
    }
}
