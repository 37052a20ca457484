//! The KDL value model.
//!
//! A value is one of four variants (string, number, boolean, null), each
//! optionally carrying an opaque type annotation. Numbers keep the radix and
//! digit text they were written with alongside an arbitrary-precision
//! decimal magnitude, so printing preserves the author's rendering while
//! equality compares the numeric value.

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::error::KdlError;
use crate::print::{self, PrintConfig};

/// Numeric base of a KDL number literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Radix {
    /// Base 2, written with a `0b` prefix.
    Binary,
    /// Base 8, written with a `0o` prefix.
    Octal,
    /// Base 10, the default.
    Decimal,
    /// Base 16, written with a `0x` prefix.
    Hexadecimal,
}

impl Radix {
    /// The numeric base.
    pub fn value(self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Octal => 8,
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
        }
    }

    /// The literal prefix introducing this radix, empty for decimal.
    pub fn prefix(self) -> &'static str {
        match self {
            Radix::Binary => "0b",
            Radix::Octal => "0o",
            Radix::Decimal => "",
            Radix::Hexadecimal => "0x",
        }
    }
}

/// A KDL number.
///
/// Radix 10 numbers may carry a fraction and an exponent; the other radixes
/// are integer-only. Two numbers are equal when their decimal renderings and
/// radixes match, so `0xFF` equals `0xff` but is distinct from `255`.
#[derive(Debug, Clone)]
pub struct KdlNumber {
    value: BigDecimal,
    radix: Radix,
    text: String,
}

impl KdlNumber {
    pub(crate) fn from_parts(value: BigDecimal, radix: Radix, text: String) -> Self {
        Self { value, radix, text }
    }

    /// Builds an integer number rendered in the given radix.
    pub fn from_integer(value: impl Into<BigInt>, radix: Radix) -> Self {
        let value = value.into();
        let text = value.to_str_radix(radix.value());
        Self {
            value: BigDecimal::from(value),
            radix,
            text,
        }
    }

    /// The numeric magnitude.
    pub fn value(&self) -> &BigDecimal {
        &self.value
    }

    /// The radix the number was written in.
    pub fn radix(&self) -> Radix {
        self.radix
    }

    /// The digit text as written, separators stripped, sign included.
    pub fn literal(&self) -> &str {
        &self.text
    }
}

impl PartialEq for KdlNumber {
    fn eq(&self, other: &Self) -> bool {
        self.radix == other.radix && self.value.to_string() == other.value.to_string()
    }
}

impl Eq for KdlNumber {}

impl FromStr for KdlNumber {
    type Err = KdlError;

    fn from_str(s: &str) -> Result<Self, KdlError> {
        crate::parser::parse_number_str(s)
    }
}

impl From<i64> for KdlNumber {
    fn from(value: i64) -> Self {
        KdlNumber::from_integer(value, Radix::Decimal)
    }
}

impl From<u64> for KdlNumber {
    fn from(value: u64) -> Self {
        KdlNumber::from_integer(value, Radix::Decimal)
    }
}

impl From<BigInt> for KdlNumber {
    fn from(value: BigInt) -> Self {
        KdlNumber::from_integer(value, Radix::Decimal)
    }
}

impl From<BigDecimal> for KdlNumber {
    fn from(value: BigDecimal) -> Self {
        let text = value.to_string();
        Self {
            value,
            radix: Radix::Decimal,
            text,
        }
    }
}

impl fmt::Display for KdlNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        print::write_number(f, self, &PrintConfig::pretty_default())
    }
}

/// A KDL value: string, number, boolean, or null.
///
/// Every variant may carry a type annotation, held verbatim and never
/// interpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum KdlValue {
    /// A Unicode string.
    String {
        /// The string content.
        value: String,
        /// Optional type annotation.
        ty: Option<String>,
    },
    /// A number in one of four radixes.
    Number {
        /// The numeric value.
        value: KdlNumber,
        /// Optional type annotation.
        ty: Option<String>,
    },
    /// A boolean.
    Bool {
        /// The boolean value.
        value: bool,
        /// Optional type annotation.
        ty: Option<String>,
    },
    /// The absence of a value.
    Null {
        /// Optional type annotation.
        ty: Option<String>,
    },
}

impl KdlValue {
    /// A null value without a type annotation.
    pub fn null() -> Self {
        KdlValue::Null { ty: None }
    }

    /// Returns the value with the given type annotation attached.
    pub fn with_type(self, ty: impl Into<String>) -> Self {
        let ty = Some(ty.into());
        match self {
            KdlValue::String { value, .. } => KdlValue::String { value, ty },
            KdlValue::Number { value, .. } => KdlValue::Number { value, ty },
            KdlValue::Bool { value, .. } => KdlValue::Bool { value, ty },
            KdlValue::Null { .. } => KdlValue::Null { ty },
        }
    }

    /// The type annotation, if any.
    pub fn type_annotation(&self) -> Option<&str> {
        match self {
            KdlValue::String { ty, .. }
            | KdlValue::Number { ty, .. }
            | KdlValue::Bool { ty, .. }
            | KdlValue::Null { ty } => ty.as_deref(),
        }
    }

    /// Whether the value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, KdlValue::Null { .. })
    }

    /// The lexical rendering of the value. Always defined; booleans render
    /// as `true`/`false` and null as `null`.
    pub fn as_string(&self) -> String {
        match self {
            KdlValue::String { value, .. } => value.clone(),
            KdlValue::Number { value, .. } => value.to_string(),
            KdlValue::Bool { value, .. } => value.to_string(),
            KdlValue::Null { .. } => "null".to_string(),
        }
    }

    /// The value as a number. Defined for numbers, and for strings whose
    /// content re-parses through the number grammar.
    pub fn as_number(&self) -> Option<KdlNumber> {
        match self {
            KdlValue::Number { value, .. } => Some(value.clone()),
            KdlValue::String { value, .. } => value.parse().ok(),
            _ => None,
        }
    }

    /// Like [`as_number`](Self::as_number), falling back to a default.
    pub fn as_number_or(&self, default: impl Into<KdlNumber>) -> KdlNumber {
        self.as_number().unwrap_or_else(|| default.into())
    }

    /// The value as a boolean. Defined for booleans, and for the strings
    /// `"true"` and `"false"`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            KdlValue::Bool { value, .. } => Some(*value),
            KdlValue::String { value, .. } => match value.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Like [`as_bool`](Self::as_bool), falling back to a default.
    pub fn as_bool_or(&self, default: bool) -> bool {
        self.as_bool().unwrap_or(default)
    }
}

impl From<&str> for KdlValue {
    fn from(value: &str) -> Self {
        KdlValue::String {
            value: value.to_string(),
            ty: None,
        }
    }
}

impl From<String> for KdlValue {
    fn from(value: String) -> Self {
        KdlValue::String { value, ty: None }
    }
}

impl From<bool> for KdlValue {
    fn from(value: bool) -> Self {
        KdlValue::Bool { value, ty: None }
    }
}

impl From<i64> for KdlValue {
    fn from(value: i64) -> Self {
        KdlValue::Number {
            value: value.into(),
            ty: None,
        }
    }
}

impl From<u64> for KdlValue {
    fn from(value: u64) -> Self {
        KdlValue::Number {
            value: value.into(),
            ty: None,
        }
    }
}

impl From<KdlNumber> for KdlValue {
    fn from(value: KdlNumber) -> Self {
        KdlValue::Number { value, ty: None }
    }
}

impl fmt::Display for KdlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        print::write_value(f, self, &PrintConfig::pretty_default())
    }
}
