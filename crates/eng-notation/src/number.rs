//! Engineering-notation scaled numbers.
//!
//! An [`EngNumber`] holds an exact [`Decimal`] value together with its
//! formatting policy. Parsing recognises a single trailing metric-prefix
//! letter (`220k`, `-1.2M`, `470n`); formatting scales the value so the
//! power-of-ten exponent is a multiple of three and appends the matching
//! prefix letter.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{Equality, Error};

/// Default digits after the decimal point when no significant-digit count is
/// set.
pub const DEFAULT_PRECISION: u32 = 2;

/// Metric prefixes, largest exponent first. The supported span is yocto
/// (1e-24) through zetta (1e21); there is deliberately no yotta entry.
const SI_PREFIXES: [(i32, &str); 16] = [
    (21, "Z"),
    (18, "E"),
    (15, "P"),
    (12, "T"),
    (9, "G"),
    (6, "M"),
    (3, "k"),
    (0, ""),
    (-3, "m"),
    (-6, "u"),
    (-9, "n"),
    (-12, "p"),
    (-15, "f"),
    (-18, "a"),
    (-21, "z"),
    (-24, "y"),
];

/// Exponent for a prefix letter, if it is one. Case matters: `m` is milli
/// while `M` is mega.
pub(crate) fn prefix_exponent(symbol: char) -> Option<i32> {
    match symbol {
        'y' => Some(-24),
        'z' => Some(-21),
        'a' => Some(-18),
        'f' => Some(-15),
        'p' => Some(-12),
        'n' => Some(-9),
        'u' => Some(-6),
        'm' => Some(-3),
        'k' => Some(3),
        'M' => Some(6),
        'G' => Some(9),
        'T' => Some(12),
        'P' => Some(15),
        'E' => Some(18),
        'Z' => Some(21),
        _ => None,
    }
}

fn prefix_symbol(exponent: i32) -> &'static str {
    SI_PREFIXES
        .iter()
        .find_map(|&(exp, sym)| (exp == exponent).then_some(sym))
        .unwrap_or("")
}

#[inline]
fn pow10(exp: i32) -> Decimal {
    if exp >= 0 {
        Decimal::from_i128_with_scale(10i128.pow(exp as u32), 0)
    } else {
        Decimal::new(1, (-exp) as u32)
    }
}

/// Operand accepted at every [`EngNumber`] operation boundary.
///
/// Coercion happens once at entry: strings go through the prefix-aware
/// parser, integers and floats through their canonical decimal form.
#[derive(Debug, Clone)]
pub enum Operand {
    Text(String),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Number(EngNumber),
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::Text(value.to_string())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Operand::Text(value)
    }
}

impl From<&String> for Operand {
    fn from(value: &String) -> Self {
        Operand::Text(value.clone())
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Int(i64::from(value))
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Int(value)
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Float(value)
    }
}

impl From<Decimal> for Operand {
    fn from(value: Decimal) -> Self {
        Operand::Decimal(value)
    }
}

impl From<EngNumber> for Operand {
    fn from(value: EngNumber) -> Self {
        Operand::Number(value)
    }
}

impl From<&EngNumber> for Operand {
    fn from(value: &EngNumber) -> Self {
        Operand::Number(value.clone())
    }
}

/// A number with engineering-notation parsing, formatting and arithmetic.
///
/// Instances are immutable; the `with_*` builders return adjusted copies and
/// every arithmetic operation produces a fresh value carrying the *default*
/// formatting policy (precision 2, no significant-digit count, no
/// separator). Equality and ordering compare the exact decimal value only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngNumber {
    #[serde(with = "rust_decimal::serde::str")]
    value: Decimal,
    precision: u32,
    significant: u32,
    separator: String,
}

impl EngNumber {
    /// Parse any supported operand into a number with the default policy.
    pub fn parse(input: impl Into<Operand>) -> Result<Self, Error> {
        let value = match input.into() {
            Operand::Text(s) => parse_text(&s)?,
            Operand::Int(i) => Decimal::from(i),
            Operand::Float(f) => {
                // Shortest round-trip form sidesteps binary-float artifacts.
                let canonical = f.to_string();
                canonical
                    .parse::<Decimal>()
                    .map_err(|_| Error::Parse { input: canonical })?
            }
            Operand::Decimal(d) => d,
            Operand::Number(n) => n.value,
        };
        Ok(Self::from_decimal(value))
    }

    fn from_decimal(value: Decimal) -> Self {
        Self {
            value,
            precision: DEFAULT_PRECISION,
            significant: 0,
            separator: String::new(),
        }
    }

    /// Digits after the decimal point; only used while `significant == 0`.
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Total significant digits; a nonzero count overrides the precision.
    pub fn with_significant(mut self, significant: u32) -> Self {
        self.significant = significant;
        self
    }

    /// Literal token placed between the mantissa and the prefix letter.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// The exact decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Truncates toward zero.
    pub fn to_i64(&self) -> Option<i64> {
        self.value.trunc().to_i64()
    }

    /// Nearest binary approximation of the exact decimal.
    pub fn to_f64(&self) -> Option<f64> {
        self.value.to_f64()
    }

    /// Scale the value onto the prefix grid: returns the mantissa (sign
    /// preserved, magnitude in `[1, 1000)` for nonzero values) and the
    /// exponent, which is always a multiple of three inside the table.
    fn engineering_parts(&self) -> Result<(Decimal, i32), Error> {
        if self.value.is_zero() {
            return Ok((Decimal::ZERO, 0));
        }
        let abs = self.value.abs();
        if abs >= pow10(24) {
            return Err(Error::Range {
                value: self.value.to_string(),
            });
        }
        for &(exp, _) in &SI_PREFIXES {
            if abs >= pow10(exp) {
                return Ok((self.value / pow10(exp), exp));
            }
        }
        // Nonzero but below 1e-24: smaller than yocto can express.
        Err(Error::Range {
            value: self.value.to_string(),
        })
    }

    /// Render the canonical engineering-notation string.
    ///
    /// Fails with [`Error::Range`] when the magnitude falls outside the
    /// yocto..zetta prefix table.
    pub fn to_eng_string(&self) -> Result<String, Error> {
        let (mantissa, exponent) = self.engineering_parts()?;

        let decimals = if self.significant > 0 {
            let magnitude = mantissa.abs();
            let integer_digits = if magnitude >= dec!(100) {
                3
            } else if magnitude >= dec!(10) {
                2
            } else {
                1
            };
            self.significant.saturating_sub(integer_digits)
        } else {
            self.precision
        };

        let mut rounded =
            mantissa.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(decimals);
        let mut base = rounded.to_string();

        // Default policy drops an all-zero fractional part: 220.00 -> 220.
        if self.precision == 2 && self.significant == 0 {
            if let Some(stripped) = base.strip_suffix(".00") {
                base = stripped.to_string();
            }
        }

        Ok(format!("{base}{}{}", self.separator, prefix_symbol(exponent)))
    }

    /// Render a part-number style string where the prefix letter replaces
    /// the decimal point, as on component markings: `1.2k` -> `1k20`.
    ///
    /// Plain numbers keep their decimal point unless `sub_letter` is given
    /// (`1.2` with `R` -> `1R20`); values without a fractional part are
    /// returned unchanged.
    pub fn to_part_number(&self, sub_letter: Option<char>) -> Result<String, Error> {
        let mut text = self.to_eng_string()?;
        if !self.separator.is_empty() {
            text = text.replace(&self.separator, "");
        }

        let Some(last) = text.chars().last() else {
            return Ok(text);
        };

        if last.is_alphabetic() {
            if text.contains('.') {
                let body = &text[..text.len() - last.len_utf8()];
                return Ok(body.replace('.', &last.to_string()));
            }
            return Ok(text);
        }

        if let Some(letter) = sub_letter {
            return Ok(text.replace('.', &letter.to_string()));
        }
        Ok(text)
    }

    /// Three-way equality against any coercible operand. Operands with no
    /// coercion path report [`Equality::NotComparable`] instead of failing.
    pub fn equality(&self, other: impl Into<Operand>) -> Equality {
        match EngNumber::parse(other) {
            Ok(n) if self.value == n.value => Equality::Equal,
            Ok(_) => Equality::NotEqual,
            Err(_) => Equality::NotComparable,
        }
    }

    /// Ordering against any coercible operand.
    pub fn try_cmp(&self, other: impl Into<Operand>) -> Result<Ordering, Error> {
        Ok(self.value.cmp(&EngNumber::parse(other)?.value))
    }
}

fn parse_text(input: &str) -> Result<Decimal, Error> {
    let trimmed = input.trim();
    let decimal = |s: &str| {
        s.parse::<Decimal>().map_err(|_| Error::Parse {
            input: input.to_string(),
        })
    };

    // Exact match on the last character only; substring matching would
    // misparse unit-bearing inputs like "1mA".
    if let Some(last) = trimmed.chars().last() {
        if let Some(exponent) = prefix_exponent(last) {
            let mantissa = decimal(&trimmed[..trimmed.len() - last.len_utf8()])?;
            return mantissa
                .checked_mul(pow10(exponent))
                .ok_or_else(|| Error::Range {
                    value: trimmed.to_string(),
                });
        }
    }
    decimal(trimmed)
}

impl FromStr for EngNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EngNumber::parse(s)
    }
}

impl fmt::Display for EngNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.to_eng_string().map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl PartialEq for EngNumber {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for EngNumber {}

impl PartialOrd for EngNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EngNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Neg for EngNumber {
    type Output = EngNumber;

    fn neg(self) -> EngNumber {
        EngNumber {
            value: -self.value,
            ..self
        }
    }
}

impl<T: Into<Operand>> Add<T> for EngNumber {
    type Output = Result<EngNumber, Error>;

    fn add(self, rhs: T) -> Self::Output {
        let rhs = EngNumber::parse(rhs)?;
        self.value
            .checked_add(rhs.value)
            .map(EngNumber::from_decimal)
            .ok_or(Error::Range {
                value: self.value.to_string(),
            })
    }
}

impl<T: Into<Operand>> Sub<T> for EngNumber {
    type Output = Result<EngNumber, Error>;

    fn sub(self, rhs: T) -> Self::Output {
        let rhs = EngNumber::parse(rhs)?;
        self.value
            .checked_sub(rhs.value)
            .map(EngNumber::from_decimal)
            .ok_or(Error::Range {
                value: self.value.to_string(),
            })
    }
}

impl<T: Into<Operand>> Mul<T> for EngNumber {
    type Output = Result<EngNumber, Error>;

    fn mul(self, rhs: T) -> Self::Output {
        let rhs = EngNumber::parse(rhs)?;
        self.value
            .checked_mul(rhs.value)
            .map(EngNumber::from_decimal)
            .ok_or(Error::Range {
                value: self.value.to_string(),
            })
    }
}

impl<T: Into<Operand>> Div<T> for EngNumber {
    type Output = Result<EngNumber, Error>;

    fn div(self, rhs: T) -> Self::Output {
        let rhs = EngNumber::parse(rhs)?;
        if rhs.value.is_zero() {
            return Err(Error::DivisionByZero);
        }
        self.value
            .checked_div(rhs.value)
            .map(EngNumber::from_decimal)
            .ok_or(Error::Range {
                value: self.value.to_string(),
            })
    }
}

macro_rules! impl_scalar_arith {
    ($($ty:ty),+ $(,)?) => {$(
        impl Add<EngNumber> for $ty {
            type Output = Result<EngNumber, Error>;
            fn add(self, rhs: EngNumber) -> Self::Output {
                EngNumber::parse(self)? + rhs
            }
        }
        impl Sub<EngNumber> for $ty {
            type Output = Result<EngNumber, Error>;
            fn sub(self, rhs: EngNumber) -> Self::Output {
                EngNumber::parse(self)? - rhs
            }
        }
        impl Mul<EngNumber> for $ty {
            type Output = Result<EngNumber, Error>;
            fn mul(self, rhs: EngNumber) -> Self::Output {
                EngNumber::parse(self)? * rhs
            }
        }
        impl Div<EngNumber> for $ty {
            type Output = Result<EngNumber, Error>;
            fn div(self, rhs: EngNumber) -> Self::Output {
                EngNumber::parse(self)? / rhs
            }
        }
    )+};
}

impl_scalar_arith!(i32, i64, f64, &str);

macro_rules! impl_scalar_cmp {
    ($($ty:ty),+ $(,)?) => {$(
        impl PartialEq<$ty> for EngNumber {
            fn eq(&self, other: &$ty) -> bool {
                matches!(self.equality(other.clone()), Equality::Equal)
            }
        }
        impl PartialEq<EngNumber> for $ty {
            fn eq(&self, other: &EngNumber) -> bool {
                other == self
            }
        }
        impl PartialOrd<$ty> for EngNumber {
            fn partial_cmp(&self, other: &$ty) -> Option<Ordering> {
                self.try_cmp(other.clone()).ok()
            }
        }
        impl PartialOrd<EngNumber> for $ty {
            fn partial_cmp(&self, other: &EngNumber) -> Option<Ordering> {
                other.partial_cmp(self).map(Ordering::reverse)
            }
        }
    )+};
}

impl_scalar_cmp!(i32, i64, f64, &str);
