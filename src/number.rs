//! JSON number values with verbatim literal storage.
//!
//! A [`Number`] holds its value as the validated literal string it was
//! written with, not as a parsed fixed-width value. There is no limit on
//! length or magnitude; precision is never lost by storing. Converting a
//! literal *out* to a primitive kind can fail: `Overflow` when the magnitude
//! does not fit, `Format` when a fractional or exponent literal is read as an
//! integer kind.
//!
//! Equality and hashing are defined on the literal, so `Number::from_literal("1")`
//! and `Number::from_literal("1.0")` are distinct values.
//!
//! ## Examples
//!
//! ```rust
//! use jsondoc::Number;
//!
//! let n = Number::from_literal("123456789012345678901234567890").unwrap();
//! assert!(n.as_i64().is_err()); // too big for i64
//! assert_eq!(n.as_bigint().unwrap().to_string(), "123456789012345678901234567890");
//! assert_eq!(n.as_str(), "123456789012345678901234567890");
//! ```

use crate::error::{Error, Result};
use crate::value::Plain;
use num_bigint::BigInt;
use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

/// An immutable JSON number, stored as its validated literal string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Number {
    literal: String,
}

impl Number {
    /// Creates a number from a JSON numeric literal. The literal is validated
    /// against the strict JSON number grammar and kept verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] with a description of the first grammar
    /// violation.
    pub fn from_literal(literal: impl Into<String>) -> Result<Self> {
        let literal = literal.into();
        if let Some(reason) = literal_format_error(&literal) {
            return Err(Error::Format {
                literal,
                target: "JSON number",
                reason,
            });
        }
        Ok(Number { literal })
    }

    /// Creates a number from an `f64`.
    ///
    /// The value is rendered with the default shortest form, given a decimal
    /// point if it would otherwise look like an integer, and verified to
    /// parse back to the identical value (falling back to exponent rendering
    /// if not).
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFinite`] for NaN and infinities, which have no
    /// JSON literal.
    pub fn from_f64(value: f64) -> Result<Self> {
        check_finite(value.is_nan(), value.is_infinite(), value < 0.0, "f64")?;
        let basic = with_decimal_point(format!("{value}"));
        if basic.parse::<f64>().map(|back| back == value).unwrap_or(false) {
            return Ok(Number { literal: basic });
        }
        let exp = with_decimal_point(format!("{value:e}"));
        if exp.parse::<f64>().map(|back| back == value).unwrap_or(false) {
            return Ok(Number { literal: exp });
        }
        Ok(Number { literal: basic })
    }

    /// Creates a number from an `f32`. Same rendering contract as
    /// [`from_f64`](Self::from_f64).
    pub fn from_f32(value: f32) -> Result<Self> {
        check_finite(value.is_nan(), value.is_infinite(), value < 0.0, "f32")?;
        let basic = with_decimal_point(format!("{value}"));
        if basic.parse::<f32>().map(|back| back == value).unwrap_or(false) {
            return Ok(Number { literal: basic });
        }
        let exp = with_decimal_point(format!("{value:e}"));
        if exp.parse::<f32>().map(|back| back == value).unwrap_or(false) {
            return Ok(Number { literal: exp });
        }
        Ok(Number { literal: basic })
    }

    /// The literal exactly as stored.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.literal
    }

    /// Reads the literal as `i64`.
    ///
    /// # Errors
    ///
    /// `Overflow` when the value is outside the `i64` range, `Format` when
    /// the literal has a fraction or exponent.
    pub fn as_i64(&self) -> Result<i64> {
        self.parse_int::<i64>("i64", &i64::MIN.to_string(), &i64::MAX.to_string())
    }

    pub fn as_u64(&self) -> Result<u64> {
        self.parse_int::<u64>("u64", &u64::MIN.to_string(), &u64::MAX.to_string())
    }

    pub fn as_i32(&self) -> Result<i32> {
        self.parse_int::<i32>("i32", &i32::MIN.to_string(), &i32::MAX.to_string())
    }

    pub fn as_u32(&self) -> Result<u32> {
        self.parse_int::<u32>("u32", &u32::MIN.to_string(), &u32::MAX.to_string())
    }

    pub fn as_i16(&self) -> Result<i16> {
        self.parse_int::<i16>("i16", &i16::MIN.to_string(), &i16::MAX.to_string())
    }

    pub fn as_u16(&self) -> Result<u16> {
        self.parse_int::<u16>("u16", &u16::MIN.to_string(), &u16::MAX.to_string())
    }

    pub fn as_i8(&self) -> Result<i8> {
        self.parse_int::<i8>("i8", &i8::MIN.to_string(), &i8::MAX.to_string())
    }

    pub fn as_u8(&self) -> Result<u8> {
        self.parse_int::<u8>("u8", &u8::MIN.to_string(), &u8::MAX.to_string())
    }

    /// Reads the literal as `f64`.
    ///
    /// # Errors
    ///
    /// `Overflow` when the magnitude saturates to infinity.
    pub fn as_f64(&self) -> Result<f64> {
        // The literal is grammar-checked, so parse can only fail by range.
        let value: f64 = self.literal.parse().map_err(|_| self.overflow("f64"))?;
        if value.is_infinite() {
            return Err(self.overflow("f64"));
        }
        Ok(value)
    }

    /// Reads the literal as `f32`.
    pub fn as_f32(&self) -> Result<f32> {
        let value: f32 = self.literal.parse().map_err(|_| self.overflow("f32"))?;
        if value.is_infinite() {
            return Err(self.overflow("f32"));
        }
        Ok(value)
    }

    /// Reads the literal as an arbitrary-precision integer. Any length fits;
    /// fractional and exponent literals fail with `Format`.
    pub fn as_bigint(&self) -> Result<BigInt> {
        BigInt::from_str(&self.literal).map_err(|_| Error::Format {
            literal: self.literal.clone(),
            target: "BigInt",
            reason: "literal has a fraction or exponent".to_string(),
        })
    }

    /// The smallest fitting untyped representation: `i64` when the literal is
    /// an in-range integer, otherwise `f64`.
    ///
    /// # Errors
    ///
    /// `Overflow` when the value does not fit even in `f64`.
    pub fn to_plain(&self) -> Result<Plain> {
        if let Ok(i) = self.literal.parse::<i64>() {
            return Ok(Plain::Int(i));
        }
        Ok(Plain::Float(self.as_f64()?))
    }

    fn parse_int<T: FromStr<Err = std::num::ParseIntError>>(
        &self,
        target: &'static str,
        min: &str,
        max: &str,
    ) -> Result<T> {
        self.literal.parse::<T>().map_err(|err| match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Error::Overflow {
                literal: self.literal.clone(),
                target,
                min: min.to_string(),
                max: max.to_string(),
            },
            _ => Error::Format {
                literal: self.literal.clone(),
                target,
                reason: "literal has a fraction or exponent".to_string(),
            },
        })
    }

    fn overflow(&self, target: &'static str) -> Error {
        Error::Overflow {
            literal: self.literal.clone(),
            target,
            min: format!("-{target}::MAX"),
            max: format!("{target}::MAX"),
        }
    }

    /// Used by the parser, which has already validated the literal with its
    /// own character-by-character scan.
    pub(crate) fn from_validated(literal: String) -> Self {
        Number { literal }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

macro_rules! number_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number { literal: value.to_string() }
                }
            }
        )*
    };
}

number_from_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<BigInt> for Number {
    fn from(value: BigInt) -> Self {
        Number {
            literal: value.to_string(),
        }
    }
}

fn check_finite(nan: bool, infinite: bool, negative: bool, kind: &'static str) -> Result<()> {
    if nan {
        return Err(Error::NotFinite { kind, what: "NaN" });
    }
    if infinite {
        return Err(Error::NotFinite {
            kind,
            what: if negative {
                "negative infinity"
            } else {
                "infinity"
            },
        });
    }
    Ok(())
}

/// Appends `.0` to renderings that would otherwise read back as integers, so
/// a float-sourced number stays visibly a float.
fn with_decimal_point(mut text: String) -> String {
    if !text.contains('.') && !text.contains('e') && !text.contains('E') {
        text.push_str(".0");
    }
    text
}

/// Validates a literal against the strict JSON number grammar. Returns a
/// description of the first violation, or `None` when the literal is valid.
///
/// States follow the grammar: optional minus, then a single `0` or a
/// non-zero-led digit run, optional `.` plus at least one digit, optional
/// `e`/`E` with optional sign plus at least one digit.
fn literal_format_error(literal: &str) -> Option<String> {
    let mut state = 1u8;
    for c in literal.chars() {
        state = match state {
            // Minus or first digit.
            1 => match c {
                '-' => 2,
                '0' => 3,
                '1'..='9' => 4,
                _ => {
                    return Some(format!(
                        "invalid first character '{c}', should be digit or minus sign"
                    ))
                }
            },
            // First digit after minus.
            2 => match c {
                '0' => 3,
                '1'..='9' => 4,
                _ => {
                    return Some(format!(
                        "expecting at least one digit after minus sign, got '{c}' instead"
                    ))
                }
            },
            // Started with (minus) zero, only decimal point or E can follow.
            3 => match c {
                '.' => 5,
                'e' | 'E' => 7,
                _ => {
                    return Some(format!(
                        "only decimal point or E/e can follow a leading 0, got '{c}' instead"
                    ))
                }
            },
            // Digits before decimal point or E.
            4 => match c {
                '.' => 5,
                'e' | 'E' => 7,
                '0'..='9' => 4,
                _ => return Some(format!("invalid character '{c}' in integer digits")),
            },
            // Need at least one digit after decimal point.
            5 => match c {
                '0'..='9' => 6,
                _ => {
                    return Some(format!(
                        "need at least one digit after decimal point, got '{c}' instead"
                    ))
                }
            },
            // Following digits after decimal point.
            6 => match c {
                'e' | 'E' => 7,
                '0'..='9' => 6,
                _ => return Some(format!("invalid character '{c}' after decimal point")),
            },
            // Plus, minus or digit after E.
            7 => match c {
                '+' | '-' => 8,
                '0'..='9' => 9,
                _ => {
                    return Some(format!(
                        "expecting digit or plus/minus sign after E/e, got '{c}' instead"
                    ))
                }
            },
            // Need at least one digit after the exponent sign.
            8 => match c {
                '0'..='9' => 9,
                _ => {
                    return Some(format!(
                        "expecting digit after plus/minus sign after E/e, got '{c}' instead"
                    ))
                }
            },
            // Following digits after E.
            _ => match c {
                '0'..='9' => 9,
                _ => return Some(format!("invalid character '{c}' in exponent digits")),
            },
        };
    }
    match state {
        1 => Some("literal is empty".to_string()),
        2 => Some("literal contains only a minus sign".to_string()),
        5 => Some("no digits after decimal point".to_string()),
        7 => Some("need at least one digit after E/e".to_string()),
        8 => Some("need at least one digit after plus/minus sign after E/e".to_string()),
        _ => None,
    }
}
