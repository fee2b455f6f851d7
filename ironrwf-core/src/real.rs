/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! RWF Real: a signed mantissa scaled by a decimal exponent or binary fraction.

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Scaling hint applied to a [`Real`] mantissa.
///
/// Hints 0..=21 are decimal exponents from -14 to +7, hints 22..=30 are
/// binary fractions from 1 to 1/256, and 33..=35 mark special values that
/// carry no mantissa.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    FromPrimitive,
    ToPrimitive,
)]
#[repr(u8)]
pub enum RealHint {
    /// 10^-14.
    ExponentNeg14 = 0,
    /// 10^-13.
    ExponentNeg13 = 1,
    /// 10^-12.
    ExponentNeg12 = 2,
    /// 10^-11.
    ExponentNeg11 = 3,
    /// 10^-10.
    ExponentNeg10 = 4,
    /// 10^-9.
    ExponentNeg9 = 5,
    /// 10^-8.
    ExponentNeg8 = 6,
    /// 10^-7.
    ExponentNeg7 = 7,
    /// 10^-6.
    ExponentNeg6 = 8,
    /// 10^-5.
    ExponentNeg5 = 9,
    /// 10^-4.
    ExponentNeg4 = 10,
    /// 10^-3.
    ExponentNeg3 = 11,
    /// 10^-2.
    ExponentNeg2 = 12,
    /// 10^-1.
    ExponentNeg1 = 13,
    /// 10^0.
    Exponent0 = 14,
    /// 10^1.
    Exponent1 = 15,
    /// 10^2.
    Exponent2 = 16,
    /// 10^3.
    Exponent3 = 17,
    /// 10^4.
    Exponent4 = 18,
    /// 10^5.
    Exponent5 = 19,
    /// 10^6.
    Exponent6 = 20,
    /// 10^7.
    Exponent7 = 21,
    /// Divide by 1.
    Fraction1 = 22,
    /// Divide by 2.
    Fraction2 = 23,
    /// Divide by 4.
    Fraction4 = 24,
    /// Divide by 8.
    Fraction8 = 25,
    /// Divide by 16.
    Fraction16 = 26,
    /// Divide by 32.
    Fraction32 = 27,
    /// Divide by 64.
    Fraction64 = 28,
    /// Divide by 128.
    Fraction128 = 29,
    /// Divide by 256.
    Fraction256 = 30,
    /// Positive infinity.
    Infinity = 33,
    /// Negative infinity.
    NegInfinity = 34,
    /// Not a number.
    NotANumber = 35,
}

impl RealHint {
    /// Creates a hint from its wire value.
    ///
    /// # Returns
    /// `None` for the reserved values 31 and 32 and anything above 35.
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        <Self as FromPrimitive>::from_u8(value)
    }

    /// Returns the wire value of this hint.
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns true for infinity, negative infinity, and NaN.
    #[must_use]
    pub const fn is_special(self) -> bool {
        matches!(self, Self::Infinity | Self::NegInfinity | Self::NotANumber)
    }

    /// Returns the decimal exponent for exponent hints.
    #[must_use]
    pub const fn exponent(self) -> Option<i32> {
        let v = self as u8;
        if v <= Self::Exponent7 as u8 {
            Some(v as i32 - 14)
        } else {
            None
        }
    }

    /// Returns the divisor for fraction hints.
    #[must_use]
    pub const fn divisor(self) -> Option<u32> {
        let v = self as u8;
        if v >= Self::Fraction1 as u8 && v <= Self::Fraction256 as u8 {
            Some(1 << (v - Self::Fraction1 as u8))
        } else {
            None
        }
    }

    /// Returns the exponent hint for a decimal exponent in `-14..=7`.
    #[must_use]
    pub fn from_exponent(exponent: i32) -> Option<Self> {
        if (-14..=7).contains(&exponent) {
            Self::from_u8((exponent + 14) as u8)
        } else {
            None
        }
    }
}

/// RWF Real value.
///
/// Blank Reals compare equal to each other whatever their mantissa and hint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Real {
    /// Signed mantissa.
    pub value: i64,
    /// Scaling hint.
    pub hint: RealHint,
    /// True if this Real is blank.
    pub is_blank: bool,
}

impl Real {
    /// Creates a new Real from a mantissa and hint.
    ///
    /// # Arguments
    /// * `value` - Signed mantissa
    /// * `hint` - Scaling hint
    #[must_use]
    pub const fn new(value: i64, hint: RealHint) -> Self {
        Self {
            value,
            hint,
            is_blank: false,
        }
    }

    /// Creates a blank Real.
    #[must_use]
    pub const fn blank() -> Self {
        Self {
            value: 0,
            hint: RealHint::ExponentNeg14,
            is_blank: true,
        }
    }

    /// Creates a Real representing positive infinity.
    #[must_use]
    pub const fn infinity() -> Self {
        Self::new(0, RealHint::Infinity)
    }

    /// Creates a Real representing negative infinity.
    #[must_use]
    pub const fn neg_infinity() -> Self {
        Self::new(0, RealHint::NegInfinity)
    }

    /// Creates a Real representing NaN.
    #[must_use]
    pub const fn nan() -> Self {
        Self::new(0, RealHint::NotANumber)
    }

    /// Converts this Real to a double.
    ///
    /// Blank converts to `0.0`.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        if self.is_blank {
            return 0.0;
        }
        match self.hint {
            RealHint::Infinity => f64::INFINITY,
            RealHint::NegInfinity => f64::NEG_INFINITY,
            RealHint::NotANumber => f64::NAN,
            hint => match (hint.exponent(), hint.divisor()) {
                (Some(exp), _) if exp < 0 => self.value as f64 / 10f64.powi(-exp),
                (Some(exp), _) => self.value as f64 * 10f64.powi(exp),
                (None, Some(div)) => self.value as f64 / f64::from(div),
                (None, None) => f64::NAN,
            },
        }
    }

    /// Creates a Real from a double, rounding to the given hint.
    ///
    /// Infinities and NaN map to the special hints regardless of `hint`.
    ///
    /// # Returns
    /// `None` if the scaled mantissa does not fit in an `i64` or `hint` is special.
    #[must_use]
    pub fn from_f64(value: f64, hint: RealHint) -> Option<Self> {
        if value.is_nan() {
            return Some(Self::nan());
        }
        if value.is_infinite() {
            return Some(if value > 0.0 {
                Self::infinity()
            } else {
                Self::neg_infinity()
            });
        }
        let scaled = match (hint.exponent(), hint.divisor()) {
            (Some(exp), _) if exp < 0 => (value * 10f64.powi(-exp)).round(),
            (Some(exp), _) => (value / 10f64.powi(exp)).round(),
            (None, Some(div)) => (value * f64::from(div)).round(),
            (None, None) => return None,
        };
        if scaled < i64::MIN as f64 || scaled >= i64::MAX as f64 {
            return None;
        }
        Some(Self::new(scaled as i64, hint))
    }

    /// Converts this Real to an exact decimal.
    ///
    /// # Returns
    /// `None` for blank and special values, or if the result overflows.
    #[must_use]
    pub fn to_decimal(self) -> Option<Decimal> {
        if self.is_blank {
            return None;
        }
        match (self.hint.exponent(), self.hint.divisor()) {
            (Some(exp), _) if exp <= 0 => Some(Decimal::new(self.value, exp.unsigned_abs())),
            (Some(exp), _) => {
                Decimal::from(self.value).checked_mul(Decimal::from(10i64.pow(exp as u32)))
            }
            (None, Some(div)) => Decimal::from(self.value).checked_div(Decimal::from(div)),
            (None, None) => None,
        }
    }

    /// Creates a Real from a decimal using an exponent hint.
    ///
    /// # Returns
    /// `None` if the decimal needs more than 14 fractional digits or its
    /// mantissa does not fit in an `i64`.
    #[must_use]
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        let value = if value.scale() > 14 {
            value.normalize()
        } else {
            value
        };
        let scale = value.scale();
        if scale > 14 {
            return None;
        }
        let mantissa = i64::try_from(value.mantissa()).ok()?;
        let hint = RealHint::from_exponent(-(scale as i32))?;
        Some(Self::new(mantissa, hint))
    }
}

impl Default for Real {
    fn default() -> Self {
        Self::blank()
    }
}

impl TryFrom<Decimal> for Real {
    type Error = Decimal;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value).ok_or(value)
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_blank {
            return Ok(());
        }
        match self.hint {
            RealHint::Infinity => f.write_str("Inf"),
            RealHint::NegInfinity => f.write_str("-Inf"),
            RealHint::NotANumber => f.write_str("NaN"),
            _ => match self.to_decimal() {
                Some(d) => write!(f, "{d}"),
                None => write!(f, "{}", self.to_f64()),
            },
        }
    }
}

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_blank, other.is_blank) {
            (true, true) => true,
            (false, false) => self.value == other.value && self.hint == other.hint,
            _ => false,
        }
    }
}

impl Eq for Real {}

impl Hash for Real {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_blank.hash(state);
        if !self.is_blank {
            self.value.hash(state);
            self.hint.hash(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_hint_ranges() {
        assert_eq!(RealHint::ExponentNeg14.exponent(), Some(-14));
        assert_eq!(RealHint::Exponent0.exponent(), Some(0));
        assert_eq!(RealHint::Exponent7.exponent(), Some(7));
        assert_eq!(RealHint::Fraction1.divisor(), Some(1));
        assert_eq!(RealHint::Fraction256.divisor(), Some(256));
        assert_eq!(RealHint::Fraction2.exponent(), None);
        assert!(RealHint::NotANumber.is_special());
        assert_eq!(RealHint::from_u8(31), None);
        assert_eq!(RealHint::from_u8(32), None);
        assert_eq!(RealHint::from_u8(33), Some(RealHint::Infinity));
    }

    #[test]
    fn test_real_to_f64() {
        assert_eq!(Real::new(12345, RealHint::ExponentNeg2).to_f64(), 123.45);
        assert_eq!(Real::new(3, RealHint::Fraction4).to_f64(), 0.75);
        assert_eq!(Real::new(5, RealHint::Exponent2).to_f64(), 500.0);
        assert!(Real::nan().to_f64().is_nan());
        assert_eq!(Real::neg_infinity().to_f64(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_real_from_f64() {
        let real = Real::from_f64(123.45, RealHint::ExponentNeg2).unwrap();
        assert_eq!(real, Real::new(12345, RealHint::ExponentNeg2));
        assert_eq!(
            Real::from_f64(f64::INFINITY, RealHint::Exponent0),
            Some(Real::infinity())
        );
        assert_eq!(Real::from_f64(1.0, RealHint::Infinity), None);
    }

    #[test]
    fn test_real_decimal_conversions() {
        let d = Decimal::from_str("-12.345").unwrap();
        let real = Real::from_decimal(d).unwrap();
        assert_eq!(real, Real::new(-12345, RealHint::ExponentNeg3));
        assert_eq!(real.to_decimal(), Some(d));

        let frac = Real::new(1, RealHint::Fraction256);
        assert_eq!(frac.to_decimal(), Some(Decimal::from_str("0.00390625").unwrap()));

        let big = Real::new(7, RealHint::Exponent3);
        assert_eq!(big.to_decimal(), Some(Decimal::from(7000)));
        assert_eq!(Real::blank().to_decimal(), None);
    }

    #[test]
    fn test_blank_equality_ignores_payload() {
        use std::collections::hash_map::DefaultHasher;

        let stray = Real {
            value: 42,
            hint: RealHint::Exponent2,
            is_blank: true,
        };
        assert_eq!(stray, Real::blank());
        assert_ne!(Real::new(0, RealHint::ExponentNeg14), Real::blank());

        let digest = |real: &Real| {
            let mut hasher = DefaultHasher::new();
            real.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(digest(&stray), digest(&Real::blank()));
    }

    #[test]
    fn test_real_display() {
        assert_eq!(Real::new(12345, RealHint::ExponentNeg2).to_string(), "123.45");
        assert_eq!(Real::infinity().to_string(), "Inf");
        assert_eq!(Real::blank().to_string(), "");
    }
}
