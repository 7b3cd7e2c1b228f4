//! Engineering-notation numbers and unit-annotated values.
//!
//! Values are stored as exact decimals ([`rust_decimal::Decimal`]) so that
//! prefix-boundary arithmetic never suffers binary-float drift: `0.220000125`
//! still lands in the `220m` bucket after rounding.
//!
//! Two types are provided, layered:
//!
//! * [`EngNumber`] – a scaled decimal with a formatting policy (fixed
//!   precision or significant digits, optional mantissa/prefix separator).
//!   It parses and renders strings like `220k`, `-1.2M` or `470n`, supports
//!   arithmetic and ordering, and can render component-marking part numbers
//!   (`1.2k` → `1k2`).
//! * [`EngUnit`] – an [`EngNumber`] paired with an opaque unit label
//!   (`220kohm`). Additive and comparison operations require matching unit
//!   labels; multiplicative operations concatenate or slash-join them.
//!
//! The core is purely functional: every operation returns a fresh value and
//! nothing is mutated after construction, so values can be shared across
//! threads freely.

pub mod number;
pub mod unit;

pub use number::{EngNumber, Operand};
pub use unit::{EngUnit, UnitOperand};

/// Library version, exposed at the package boundary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors raised by parsing, formatting and unit-checked arithmetic.
///
/// All failures are synchronous and non-fatal to any shared state; callers
/// own the recovery policy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid engineering number: '{input}'")]
    Parse { input: String },
    #[error("value {value} is outside the supported yocto..zetta prefix range")]
    Range { value: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("unit mismatch: '{lhs}' vs '{rhs}'")]
    UnitMismatch { lhs: String, rhs: String },
}

/// Three-way equality result for comparisons against foreign operands.
///
/// An operand with no coercion path (e.g. a non-numeric string) yields
/// [`Equality::NotComparable`] – a definite "unequal" signal rather than an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Equality {
    Equal,
    NotEqual,
    NotComparable,
}
