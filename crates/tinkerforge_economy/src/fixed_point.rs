//! # Fixed-Point Arithmetic
//!
//! **NO FLOATING POINT IN AMOUNT OR PRICE CALCULATIONS**
//!
//! Every quantity held in an inventory, consumed by a recipe, or charged as a
//! price is a [`FixedPoint`]: a non-negative decimal with 6 decimal places.
//!
//! ## Why Fixed-Point?
//!
//! Recipes ask for amounts like `0.02` yeast. With IEEE 754 floats,
//! `0.1 - 0.02` five times does not land on zero, so the inventory would keep
//! a dust entry forever. With fixed-point it lands on exactly zero and the
//! entry is removed.
//!
//! Floats only appear at the configuration boundary, where a TOML number is
//! converted once with [`FixedPoint::from_f64`].

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EconomyError, EconomyResult};

/// Number of decimal places.
pub const DECIMAL_PLACES: u32 = 6;

/// The multiplier for 6 decimal places.
const MULTIPLIER: u64 = 10u64.pow(DECIMAL_PLACES);

/// Fixed-point decimal number with 6 decimal places.
///
/// Internally stores value * 1,000,000 as a u64, so it can never be negative.
///
/// # Range
///
/// - Minimum: 0.000000
/// - Maximum: 18,446,744,073,709.551615
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct FixedPoint(u64);

impl FixedPoint {
    /// Zero value.
    pub const ZERO: Self = Self(0);

    /// One unit (1.000000).
    pub const ONE: Self = Self(MULTIPLIER);

    /// One hundred units, the upper bound of a percentage.
    pub const HUNDRED: Self = Self(100 * MULTIPLIER);

    /// Maximum representable value.
    pub const MAX: Self = Self(u64::MAX);

    /// Creates a fixed-point number from a whole number.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let ten = FixedPoint::from_whole(10); // 10.000000
    /// ```
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `whole` exceeds [`FixedPoint::MAX`]'s whole
    /// part. Use [`FixedPoint::checked_from_whole`] for untrusted input.
    #[inline]
    #[must_use]
    pub const fn from_whole(whole: u64) -> Self {
        Self(whole * MULTIPLIER)
    }

    /// Creates a fixed-point number from a whole number, or `None` if it
    /// does not fit.
    #[inline]
    #[must_use]
    pub const fn checked_from_whole(whole: u64) -> Option<Self> {
        match whole.checked_mul(MULTIPLIER) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Creates a fixed-point number from parts.
    ///
    /// # Arguments
    ///
    /// * `whole` - The whole number part
    /// * `decimal` - The decimal part in millionths (0-999999)
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let half = FixedPoint::from_parts(0, 500_000); // 0.5
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `decimal` is 1,000,000 or more, or if the value does not
    /// fit. Use [`FixedPoint::checked_from_parts`] for untrusted input.
    #[inline]
    #[must_use]
    pub const fn from_parts(whole: u64, decimal: u32) -> Self {
        match Self::checked_from_parts(whole, decimal) {
            Some(v) => v,
            None => panic!("fixed-point parts out of range"),
        }
    }

    /// Creates a fixed-point number from parts, or `None` if `decimal` is
    /// not below 1,000,000 or the value does not fit.
    #[inline]
    #[must_use]
    pub const fn checked_from_parts(whole: u64, decimal: u32) -> Option<Self> {
        if decimal as u64 >= MULTIPLIER {
            return None;
        }
        match whole.checked_mul(MULTIPLIER) {
            Some(w) => match w.checked_add(decimal as u64) {
                Some(v) => Some(Self(v)),
                None => None,
            },
            None => None,
        }
    }

    /// Creates a fixed-point number from raw internal value.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Converts a configuration float, rounding to the nearest millionth.
    ///
    /// Returns `None` for negative, non-finite or out-of-range input.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let scaled = (value * MULTIPLIER as f64).round();
        if scaled >= u64::MAX as f64 {
            return None;
        }
        Some(Self(scaled as u64))
    }

    /// Returns the whole number part.
    #[inline]
    #[must_use]
    pub const fn whole(self) -> u64 {
        self.0 / MULTIPLIER
    }

    /// Returns the decimal part (0-999999).
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn decimal(self) -> u32 {
        (self.0 % MULTIPLIER) as u32
    }

    /// Checked addition. Returns `None` on overflow.
    #[inline]
    #[must_use]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[inline]
    #[must_use]
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.0.checked_sub(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Multiplies by a percentage (`percent` of 100).
    ///
    /// The intermediate product is computed in u128; the result truncates
    /// below the last decimal place.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let value = FixedPoint::from_whole(80);
    /// let quarter = value.mul_percent(FixedPoint::from_whole(25)); // 20.000000
    /// ```
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn mul_percent(self, percent: Self) -> Self {
        let result = (self.0 as u128 * percent.0 as u128) / (Self::HUNDRED.0 as u128);
        Self(result as u64)
    }

    /// Rounds to `places` decimal places, half away from zero.
    ///
    /// Returns `None` if rounding up overflows. `places` above
    /// [`DECIMAL_PLACES`] leaves the value untouched.
    #[must_use]
    pub const fn checked_round_dp(self, places: u32) -> Option<Self> {
        if places >= DECIMAL_PLACES {
            return Some(self);
        }
        let step = 10u64.pow(DECIMAL_PLACES - places);
        let remainder = self.0 % step;
        let base = self.0 - remainder;
        if remainder * 2 >= step {
            match base.checked_add(step) {
                Some(v) => Some(Self(v)),
                None => None,
            }
        } else {
            Some(Self(base))
        }
    }

    /// Returns true if this value is zero.
    #[inline]
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Safe addition with error on overflow.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::ArithmeticOverflow` if the addition would overflow.
    #[inline]
    pub fn safe_add(self, rhs: Self) -> EconomyResult<Self> {
        self.checked_add(rhs).ok_or(EconomyError::ArithmeticOverflow)
    }
}

impl Add for FixedPoint {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.wrapping_add(rhs.0))
    }
}

impl AddAssign for FixedPoint {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.wrapping_add(rhs.0);
    }
}

impl Sub for FixedPoint {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.wrapping_sub(rhs.0))
    }
}

impl SubAssign for FixedPoint {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.wrapping_sub(rhs.0);
    }
}

impl fmt::Debug for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedPoint({}.{:06})", self.whole(), self.decimal())
    }
}

/// Plain decimal without trailing zeros: `12`, `1.5`, `0.08`.
impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decimal = self.decimal();
        if decimal == 0 {
            return write!(f, "{}", self.whole());
        }
        let digits = format!("{decimal:06}");
        write!(f, "{}.{}", self.whole(), digits.trim_end_matches('0'))
    }
}

impl FromStr for FixedPoint {
    type Err = EconomyError;

    /// Parses `"12"`, `"0.5"`, `"1.500"`. At most 6 decimal places.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EconomyError::InvalidConfig(format!("not a non-negative decimal: {s:?}"));

        let s = s.trim();
        let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        if fraction.len() > DECIMAL_PLACES as usize {
            return Err(EconomyError::InvalidConfig(format!(
                "{s:?} has more than {DECIMAL_PLACES} decimal places"
            )));
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let fraction_raw: u32 = if fraction.is_empty() {
            0
        } else {
            let padded = format!("{fraction:0<6}");
            padded.parse().map_err(|_| invalid())?
        };

        Self::checked_from_parts(whole, fraction_raw).ok_or(EconomyError::ArithmeticOverflow)
    }
}

impl Serialize for FixedPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Accepts TOML integers, floats, or decimal strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum FixedPointRepr {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for FixedPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        match FixedPointRepr::deserialize(deserializer)? {
            FixedPointRepr::Integer(value) => u64::try_from(value)
                .ok()
                .and_then(Self::checked_from_whole)
                .ok_or_else(|| D::Error::custom(format!("{value} is not a non-negative decimal"))),
            FixedPointRepr::Float(value) => Self::from_f64(value)
                .ok_or_else(|| D::Error::custom(format!("{value} is not a non-negative decimal"))),
            FixedPointRepr::Text(text) => text.parse().map_err(D::Error::custom),
        }
    }
}
