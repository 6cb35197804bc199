use crate::{Rational, RationalError};
use log::trace;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Float, One, Signed, Zero};
use rust_decimal::Decimal;

/// A finite-precision number that stores a binary or decimal fraction.
pub(crate) trait FiniteDigits: Copy {
    /// `(numer, denom)` of exactly the value `self` stores, where `denom` is a
    /// positive power of 2 or 10. `None` for NaN and infinities.
    fn exact_parts(self) -> Option<(BigInt, BigInt)>;
}

/// It multiplies the fractional residual by 10 until it becomes exactly 0. Every
/// step moves one more digit from the fraction to the numerator. The residual is
/// kept as an exact fraction over the stored denominator, which divides a power
/// of 10, so the loop always terminates. The result is the value `T` actually
/// stores, not the real number it was meant to approximate: `0.1f64` is
/// `3602879701896397/36028797018963968`.
pub(crate) fn from_finite_digits<T: FiniteDigits>(value: T) -> Result<Rational, RationalError> {
    let (stored, stored_denom) = value.exact_parts().ok_or(RationalError::NonFinite)?;

    if stored.is_zero() {
        return Ok(Rational::zero());
    }

    let is_negative = stored.is_negative();
    let (mut numer, mut residual) = stored.abs().div_rem(&stored_denom);
    let mut denom = BigInt::one();
    let ten = BigInt::from(10);
    let mut digits = 0;

    while !residual.is_zero() {
        residual *= &ten;
        let (digit, rest) = residual.div_rem(&stored_denom);

        numer *= &ten;
        numer += digit;
        denom *= &ten;
        residual = rest;
        digits += 1;
    }

    trace!("big_rational_core::from_finite_digits(), {digits} fractional digits extracted");

    if is_negative {
        numer = -numer;
    }

    let r = numer.gcd(&denom);

    Ok(Rational::from_parts(numer / &r, denom / &r))
}

// `mantissa * 2^exp`
fn binary_parts(mantissa: u64, exp: i16, sign: i8) -> (BigInt, BigInt) {
    let mut numer = BigInt::from(mantissa);

    if sign < 0 {
        numer = -numer;
    }

    if exp >= 0 {
        (numer << exp as usize, BigInt::one())
    }

    else {
        (numer, BigInt::one() << (-(exp as i32)) as usize)
    }
}

impl FiniteDigits for f64 {
    fn exact_parts(self) -> Option<(BigInt, BigInt)> {
        if !self.is_finite() {
            return None;
        }

        let (mantissa, exp, sign) = Float::integer_decode(self);
        Some(binary_parts(mantissa, exp, sign))
    }
}

impl FiniteDigits for f32 {
    fn exact_parts(self) -> Option<(BigInt, BigInt)> {
        if !self.is_finite() {
            return None;
        }

        let (mantissa, exp, sign) = Float::integer_decode(self);
        Some(binary_parts(mantissa, exp, sign))
    }
}

impl FiniteDigits for Decimal {
    fn exact_parts(self) -> Option<(BigInt, BigInt)> {
        Some((BigInt::from(self.mantissa()), BigInt::from(10).pow(self.scale())))
    }
}
