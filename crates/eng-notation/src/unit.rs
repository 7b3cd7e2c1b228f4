//! Unit-annotated engineering-notation values.
//!
//! An [`EngUnit`] pairs an [`EngNumber`] with an opaque unit label parsed
//! from the trailing non-numeric characters of a string input (`220kHz` ->
//! `220k` + `Hz`). The label is compared by exact string equality only;
//! there is no dimensional algebra beyond concatenating labels on multiply
//! and slash-joining them on divide.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::number::{prefix_exponent, EngNumber, Operand};
use crate::{Equality, Error};

/// Operand accepted at every [`EngUnit`] operation boundary.
///
/// Bare text coerces through the unit-aware parser; bare numbers coerce to
/// a unitless value, so adding a plain number to a unit-bearing value fails
/// the unit check.
#[derive(Debug, Clone)]
pub enum UnitOperand {
    Unit(EngUnit),
    Bare(Operand),
}

impl From<EngUnit> for UnitOperand {
    fn from(value: EngUnit) -> Self {
        UnitOperand::Unit(value)
    }
}

impl From<&EngUnit> for UnitOperand {
    fn from(value: &EngUnit) -> Self {
        UnitOperand::Unit(value.clone())
    }
}

macro_rules! impl_unit_operand_from_bare {
    ($($ty:ty),+ $(,)?) => {$(
        impl From<$ty> for UnitOperand {
            fn from(value: $ty) -> Self {
                UnitOperand::Bare(Operand::from(value))
            }
        }
    )+};
}

impl_unit_operand_from_bare!(&str, String, &String, i32, i64, f64, Decimal, EngNumber, &EngNumber);

/// An engineering-notation number with an optional unit label.
///
/// Additive and comparison operations require the labels to match exactly
/// (a missing label only matches another missing label); multiplicative
/// operations always succeed and derive a new label.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngUnit {
    number: EngNumber,
    unit: String,
}

impl EngUnit {
    /// Parse any supported operand.
    ///
    /// For text the longest leading run of digits, `.`, `-` and
    /// prefix-symbol letters is the numeric part; whatever follows becomes
    /// the unit label. Everything else parses unitless.
    pub fn parse(input: impl Into<UnitOperand>) -> Result<Self, Error> {
        match input.into() {
            UnitOperand::Unit(unit) => Ok(unit),
            UnitOperand::Bare(Operand::Text(text)) => {
                let trimmed = text.trim();
                let boundary = trimmed
                    .find(|c: char| {
                        !(c.is_ascii_digit() || c == '.' || c == '-' || prefix_exponent(c).is_some())
                    })
                    .unwrap_or(trimmed.len());
                let (number, unit) = trimmed.split_at(boundary);
                Ok(Self {
                    number: EngNumber::parse(number)?,
                    unit: unit.to_string(),
                })
            }
            UnitOperand::Bare(operand) => Ok(Self {
                number: EngNumber::parse(operand)?,
                unit: String::new(),
            }),
        }
    }

    /// Replace the unit label; an explicit label always wins over a parsed
    /// one.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// See [`EngNumber::with_precision`].
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.number = self.number.with_precision(precision);
        self
    }

    /// See [`EngNumber::with_significant`].
    pub fn with_significant(mut self, significant: u32) -> Self {
        self.number = self.number.with_significant(significant);
        self
    }

    /// See [`EngNumber::with_separator`].
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.number = self.number.with_separator(separator);
        self
    }

    /// The inner scaled number.
    pub fn number(&self) -> &EngNumber {
        &self.number
    }

    /// The unit label; empty means unitless.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// The exact decimal value.
    pub fn value(&self) -> Decimal {
        self.number.value()
    }

    /// Truncates toward zero.
    pub fn to_i64(&self) -> Option<i64> {
        self.number.to_i64()
    }

    /// Nearest binary approximation of the exact decimal.
    pub fn to_f64(&self) -> Option<f64> {
        self.number.to_f64()
    }

    /// Engineering-notation string followed by the unit label.
    pub fn to_eng_string(&self) -> Result<String, Error> {
        Ok(format!("{}{}", self.number.to_eng_string()?, self.unit))
    }

    fn check_unit(&self, other: &EngUnit) -> Result<(), Error> {
        if self.unit != other.unit {
            return Err(Error::UnitMismatch {
                lhs: self.unit.clone(),
                rhs: other.unit.clone(),
            });
        }
        Ok(())
    }

    /// Three-way equality. Differing unit labels are a program error, not a
    /// `false` result; an operand with no coercion path at all reports
    /// [`Equality::NotComparable`].
    pub fn equality(&self, other: impl Into<UnitOperand>) -> Result<Equality, Error> {
        let other = match EngUnit::parse(other) {
            Ok(unit) => unit,
            Err(_) => return Ok(Equality::NotComparable),
        };
        self.check_unit(&other)?;
        Ok(if self.number == other.number {
            Equality::Equal
        } else {
            Equality::NotEqual
        })
    }

    /// Ordering; fails with [`Error::UnitMismatch`] on differing labels.
    pub fn try_cmp(&self, other: impl Into<UnitOperand>) -> Result<Ordering, Error> {
        let other = EngUnit::parse(other)?;
        self.check_unit(&other)?;
        Ok(self.number.cmp(&other.number))
    }
}

impl FromStr for EngUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EngUnit::parse(s)
    }
}

impl fmt::Display for EngUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.to_eng_string().map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl PartialEq for EngUnit {
    fn eq(&self, other: &Self) -> bool {
        self.unit == other.unit && self.number == other.number
    }
}

impl Eq for EngUnit {}

impl PartialOrd for EngUnit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (self.unit == other.unit).then(|| self.number.cmp(&other.number))
    }
}

impl Neg for EngUnit {
    type Output = EngUnit;

    fn neg(self) -> EngUnit {
        EngUnit {
            number: -self.number,
            unit: self.unit,
        }
    }
}

impl<T: Into<UnitOperand>> Add<T> for EngUnit {
    type Output = Result<EngUnit, Error>;

    fn add(self, rhs: T) -> Self::Output {
        let rhs = EngUnit::parse(rhs)?;
        self.check_unit(&rhs)?;
        Ok(EngUnit {
            number: (self.number + rhs.number)?,
            unit: self.unit,
        })
    }
}

impl<T: Into<UnitOperand>> Sub<T> for EngUnit {
    type Output = Result<EngUnit, Error>;

    fn sub(self, rhs: T) -> Self::Output {
        let rhs = EngUnit::parse(rhs)?;
        self.check_unit(&rhs)?;
        Ok(EngUnit {
            number: (self.number - rhs.number)?,
            unit: self.unit,
        })
    }
}

impl<T: Into<UnitOperand>> Mul<T> for EngUnit {
    type Output = Result<EngUnit, Error>;

    fn mul(self, rhs: T) -> Self::Output {
        let rhs = EngUnit::parse(rhs)?;
        let unit = format!("{}{}", self.unit, rhs.unit);
        Ok(EngUnit {
            number: (self.number * rhs.number)?,
            unit,
        })
    }
}

impl<T: Into<UnitOperand>> Div<T> for EngUnit {
    type Output = Result<EngUnit, Error>;

    fn div(self, rhs: T) -> Self::Output {
        let rhs = EngUnit::parse(rhs)?;
        // A unitless divisor keeps the label; otherwise slash-join, even
        // when the numerator label is empty ("/s").
        let unit = if rhs.unit.is_empty() {
            self.unit.clone()
        } else {
            format!("{}/{}", self.unit, rhs.unit)
        };
        Ok(EngUnit {
            number: (self.number / rhs.number)?,
            unit,
        })
    }
}

macro_rules! impl_scalar_unit_arith {
    ($($ty:ty),+ $(,)?) => {$(
        impl Add<EngUnit> for $ty {
            type Output = Result<EngUnit, Error>;
            fn add(self, rhs: EngUnit) -> Self::Output {
                EngUnit::parse(self)? + rhs
            }
        }
        impl Sub<EngUnit> for $ty {
            type Output = Result<EngUnit, Error>;
            fn sub(self, rhs: EngUnit) -> Self::Output {
                EngUnit::parse(self)? - rhs
            }
        }
        impl Mul<EngUnit> for $ty {
            type Output = Result<EngUnit, Error>;
            fn mul(self, rhs: EngUnit) -> Self::Output {
                EngUnit::parse(self)? * rhs
            }
        }
        impl Div<EngUnit> for $ty {
            type Output = Result<EngUnit, Error>;
            fn div(self, rhs: EngUnit) -> Self::Output {
                EngUnit::parse(self)? / rhs
            }
        }
    )+};
}

impl_scalar_unit_arith!(i32, i64, f64, &str);
