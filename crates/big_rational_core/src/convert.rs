use crate::digits::from_finite_digits;
use crate::{Rational, RationalError};
use log::debug;
use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use rust_decimal::Decimal;
use std::cmp::Ordering;

// 2^96 - 1
const MAX_DECIMAL_MANTISSA: u128 = (1 << 96) - 1;
const MAX_DECIMAL_SCALE: u32 = 28;

impl Rational {
    /// `integer * denom + numer`, over 1.
    ///
    /// `denom` scales `integer` but doesn't divide anything: `from_mixed(1, 1, 2)`
    /// is 3, not 3/2.
    pub fn from_mixed<I: Into<BigInt>, N: Into<BigInt>, D: Into<BigInt>>(integer: I, numer: N, denom: D) -> Self {
        Rational::from_parts(
            integer.into() * denom.into() + numer.into(),
            BigInt::one(),
        )
    }
}

macro_rules! impl_from_integer {
    ($($t: ty),*) => {
        $(
            impl From<$t> for Rational {
                fn from(n: $t) -> Rational {
                    Rational::from_integer(n)
                }
            }

            /// Truncates toward zero, then wraps like `as` does.
            ///
            /// # Panics
            ///
            /// If the value is invalid.
            impl From<&Rational> for $t {
                fn from(n: &Rational) -> $t {
                    wrapping_low_bits(&n.quotient()) as $t
                }
            }

            impl From<Rational> for $t {
                fn from(n: Rational) -> $t {
                    <$t>::from(&n)
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<BigInt> for Rational {
    fn from(n: BigInt) -> Rational {
        Rational::from_integer(n)
    }
}

impl From<&BigInt> for Rational {
    fn from(n: &BigInt) -> Rational {
        Rational::from_integer(n.clone())
    }
}

impl From<BigUint> for Rational {
    fn from(n: BigUint) -> Rational {
        Rational::from_integer(n)
    }
}

impl From<Decimal> for Rational {
    fn from(n: Decimal) -> Rational {
        match from_finite_digits(n) {
            Ok(n) => n,

            // a decimal is always finite
            Err(_) => unreachable!(),
        }
    }
}

impl TryFrom<f64> for Rational {
    type Error = RationalError;

    fn try_from(n: f64) -> Result<Rational, RationalError> {
        from_finite_digits(n)
    }
}

impl TryFrom<f32> for Rational {
    type Error = RationalError;

    fn try_from(n: f32) -> Result<Rational, RationalError> {
        from_finite_digits(n)
    }
}

/// `quotient + remainder / denominator` of the reduced value. The integer part
/// is exact. The fraction is rounded (half away from zero) to as many digits as
/// the 96-bit mantissa still has room for, up to 28.
impl TryFrom<&Rational> for Decimal {
    type Error = RationalError;

    fn try_from(n: &Rational) -> Result<Decimal, RationalError> {
        if n.is_invalid() {
            return Err(RationalError::ZeroDenominator);
        }

        let n = n.reduced();
        to_decimal(&n.numer, &n.denom)
    }
}

impl TryFrom<Rational> for Decimal {
    type Error = RationalError;

    fn try_from(n: Rational) -> Result<Decimal, RationalError> {
        Decimal::try_from(&n)
    }
}

/// The nearest `f64`. An invalid value is NaN.
impl From<&Rational> for f64 {
    fn from(n: &Rational) -> f64 {
        if n.is_invalid() {
            return f64::NAN;
        }

        let (mantissa, exp) = rounded_mantissa(n.numer.magnitude(), n.denom.magnitude(), 53, -1074);
        let result = scale_f64(mantissa as f64, exp);

        if is_negative(n) { -result } else { result }
    }
}

impl From<Rational> for f64 {
    fn from(n: Rational) -> f64 {
        f64::from(&n)
    }
}

/// The nearest `f32`. An invalid value is NaN.
impl From<&Rational> for f32 {
    fn from(n: &Rational) -> f32 {
        if n.is_invalid() {
            return f32::NAN;
        }

        let (mantissa, exp) = rounded_mantissa(n.numer.magnitude(), n.denom.magnitude(), 24, -149);
        let result = scale_f32(mantissa as f32, exp);

        if is_negative(n) { -result } else { result }
    }
}

impl From<Rational> for f32 {
    fn from(n: Rational) -> f32 {
        f32::from(&n)
    }
}

/// Checked narrowing: `None` if the value is invalid or the truncated quotient
/// doesn't fit.
impl ToPrimitive for Rational {
    fn to_i64(&self) -> Option<i64> {
        if self.is_invalid() {
            return None;
        }

        self.quotient().to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        if self.is_invalid() {
            return None;
        }

        self.quotient().to_u64()
    }

    fn to_i128(&self) -> Option<i128> {
        if self.is_invalid() {
            return None;
        }

        self.quotient().to_i128()
    }

    fn to_u128(&self) -> Option<u128> {
        if self.is_invalid() {
            return None;
        }

        self.quotient().to_u128()
    }

    fn to_f64(&self) -> Option<f64> {
        if self.is_invalid() {
            return None;
        }

        Some(f64::from(self))
    }

    fn to_f32(&self) -> Option<f32> {
        if self.is_invalid() {
            return None;
        }

        Some(f32::from(self))
    }
}

fn is_negative(n: &Rational) -> bool {
    !n.numer.is_zero() && (n.numer.is_negative() ^ n.denom.is_negative())
}

// the lowest 128 bits of the two's complement representation
fn wrapping_low_bits(n: &BigInt) -> u128 {
    let mut digits = n.iter_u64_digits();
    let low = digits.next().unwrap_or(0) as u128;
    let high = digits.next().unwrap_or(0) as u128;
    let bits = low | (high << 64);

    match n.sign() {
        Sign::Minus => bits.wrapping_neg(),
        _ => bits,
    }
}

// returns `(mantissa, exp)` where `mantissa * 2^exp` is `numer / denom` rounded
// (half to even) to `precision` significant bits. `exp` never goes below `min_exp`,
// the exponent of the smallest subnormal, so a subnormal result is rounded once,
// at its own width. `mantissa <= 2^precision`, which any float of that precision
// holds exactly.
fn rounded_mantissa(numer: &BigUint, denom: &BigUint, precision: i64, min_exp: i64) -> (u64, i64) {
    if numer.is_zero() {
        return (0, 0);
    }

    // `numer / denom` is in `[2^(log2 - 1), 2^(log2 + 1))`
    let mut log2 = numer.bits() as i64 - denom.bits() as i64;

    let is_below = if log2 >= 0 {
        numer < &(denom << log2 as usize)
    } else {
        &(numer << (-log2) as usize) < denom
    };

    if is_below {
        log2 -= 1;
    }

    let exp = (log2 - (precision - 1)).max(min_exp);

    let (quotient, remainder, divisor) = if exp >= 0 {
        let divisor = denom << exp as usize;
        let (quotient, remainder) = numer.div_rem(&divisor);

        (quotient, remainder, divisor)
    }

    else {
        let (quotient, remainder) = (numer << (-exp) as usize).div_rem(denom);

        (quotient, remainder, denom.clone())
    };

    let mut mantissa = quotient.to_u64().unwrap_or(u64::MAX);

    match (remainder << 1usize).cmp(&divisor) {
        Ordering::Greater => { mantissa += 1; },
        Ordering::Equal if mantissa % 2 == 1 => { mantissa += 1; },
        _ => {},
    }

    (mantissa, exp)
}

// `n * 2^exp` is exact whenever the result is a finite float: every step
// stays in the normal range
fn scale_f64(mut n: f64, mut exp: i64) -> f64 {
    while exp > 1000 && n.is_finite() {
        n *= 2f64.powi(1000);
        exp -= 1000;
    }

    while exp < -1000 && n != 0.0 {
        n *= 2f64.powi(-1000);
        exp += 1000;
    }

    n * 2f64.powi(exp.clamp(-1000, 1000) as i32)
}

fn scale_f32(mut n: f32, mut exp: i64) -> f32 {
    while exp > 100 && n.is_finite() {
        n *= 2f32.powi(100);
        exp -= 100;
    }

    while exp < -100 && n != 0.0 {
        n *= 2f32.powi(-100);
        exp += 100;
    }

    n * 2f32.powi(exp.clamp(-100, 100) as i32)
}

// `denom` is positive
pub(crate) fn to_decimal(numer: &BigInt, denom: &BigInt) -> Result<Decimal, RationalError> {
    let (quotient, remainder) = numer.magnitude().div_rem(denom.magnitude());

    let quotient = match quotient.to_u128() {
        Some(q) if q <= MAX_DECIMAL_MANTISSA => q,
        _ => {
            return Err(RationalError::DecimalOverflow);
        },
    };

    if remainder.is_zero() {
        return Ok(signed_decimal(quotient, 0, numer.is_negative()));
    }

    // the scale shrinks only when the rounded mantissa doesn't fit
    let mut scale = MAX_DECIMAL_SCALE;

    loop {
        let pow10 = 10u128.pow(scale);

        // round(remainder * 10^scale / denom), half away from zero
        let frac = (&remainder * BigUint::from(pow10) * 2u32 + denom.magnitude()) / (denom.magnitude() * 2u32);
        let frac = frac.to_u128().unwrap_or(pow10);

        match quotient.checked_mul(pow10).and_then(|n| n.checked_add(frac)) {
            Some(mantissa) if mantissa <= MAX_DECIMAL_MANTISSA => {
                if scale < MAX_DECIMAL_SCALE {
                    debug!("big_rational_core::to_decimal(), integer part {quotient} leaves room for {scale} fractional digits");
                }

                return Ok(signed_decimal(mantissa, scale, numer.is_negative()));
            },
            _ if scale > 0 => {
                scale -= 1;
            },
            _ => {
                return Err(RationalError::DecimalOverflow);
            },
        }
    }
}

fn signed_decimal(mantissa: u128, scale: u32, is_negative: bool) -> Decimal {
    let mantissa = mantissa as i128;

    Decimal::from_i128_with_scale(
        if is_negative { -mantissa } else { mantissa },
        scale,
    ).normalize()
}

#[cfg(test)]
mod tests {
    use crate::{Rational, RationalError};
    use num_bigint::BigInt;
    use num_traits::ToPrimitive;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn r(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn mixed_test() {
        // (integer, numer, denom, result)
        let samples = vec![
            (1, 1, 2, 3),
            (2, 3, 4, 11),
            (0, 5, 7, 5),
            (-1, 1, 2, -1),
        ];

        for (integer, numer, denom, result) in samples.into_iter() {
            let n = Rational::from_mixed(integer, numer, denom);

            assert_eq!(n.numerator(), &BigInt::from(result));
            assert_eq!(n.denominator(), &BigInt::from(1));
        }
    }

    #[test]
    fn integer_narrowing_test() {
        assert_eq!(i64::from(&r(7, 2)), 3);
        assert_eq!(i64::from(&r(-7, 2)), -3);
        assert_eq!(i32::from(&r(-1, 3)), 0);
        assert_eq!(u8::from(&r(300, 1)), 300u32 as u8);
        assert_eq!(i8::from(&r(-129, 1)), -129i32 as i8);
        assert_eq!(i16::from(r(70000, 7)), 10000);
        assert_eq!(u64::from(&r(-1, 1)), u64::MAX);
        assert_eq!(i64::from(&Rational::from(u64::MAX)), -1);
        assert_eq!(u128::from(&Rational::from(i128::MIN)), i128::MIN as u128);
    }

    #[test]
    fn checked_narrowing_test() {
        assert_eq!(r(7, 2).to_i64(), Some(3));
        assert_eq!(r(-7, 2).to_u64(), None);
        assert_eq!(Rational::from(u64::MAX).to_i64(), None);
        assert_eq!(Rational::default().to_i64(), None);
        assert_eq!(Rational::default().to_f64(), None);
        assert_eq!(r(1, 4).to_f64(), Some(0.25));
    }

    #[test]
    fn float_test() {
        assert_eq!(f64::from(&r(1, 2)), 0.5);
        assert_eq!(f64::from(&r(-3, 4)), -0.75);
        assert_eq!(f64::from(&r(3, -4)), -0.75);
        assert_eq!(f64::from(&r(1, 10)), 0.1);
        assert_eq!(f64::from(&r(1, 3)), 1.0 / 3.0);
        assert_eq!(f64::from(&r(2, 3)), 2.0 / 3.0);
        assert_eq!(f64::from(&r(0, 3)), 0.0);
        assert_eq!(f32::from(&r(1, 3)), 1.0f32 / 3.0);
        assert_eq!(f32::from(&r(-1, 10)), -0.1f32);
        assert!(f64::from(&Rational::default()).is_nan());

        let huge = Rational::from(BigInt::from(10).pow(400));
        assert_eq!(f64::from(&huge), f64::INFINITY);

        let tiny = Rational::new(1, BigInt::from(10).pow(400)).unwrap();
        assert_eq!(f64::from(&tiny), 0.0);

        let big = Rational::new(BigInt::from(10).pow(300), 3).unwrap();
        assert_eq!(f64::from(&big), 1e300 / 3.0);
    }

    #[test]
    fn subnormal_float_test() {
        let one = BigInt::from(1);

        assert_eq!(f64::from(&Rational::new(1, &one << 1074usize).unwrap()), f64::from_bits(1));
        assert_eq!(f64::from(&Rational::new(1, &one << 1075usize).unwrap()), 0.0);
        assert_eq!(f64::from(&Rational::new(3, &one << 1075usize).unwrap()), f64::from_bits(2));
        assert_eq!(f32::from(&Rational::new(1, &one << 149usize).unwrap()), f32::from_bits(1));

        // 1.5 subnormal steps minus a bit: rounding to 53 bits first would make
        // it a tie and round it up to 2 steps
        let n = Rational::new((BigInt::from(3) << 100usize) - 1, &one << 1175usize).unwrap();
        assert_eq!(f64::from(&n), f64::from_bits(1));
        assert_eq!(f64::from(&-n), -f64::from_bits(1));

        let n = Rational::new((BigInt::from(3) << 60usize) - 1, &one << 210usize).unwrap();
        assert_eq!(f32::from(&n), f32::from_bits(1));

        // the largest subnormal and the smallest normal
        for bits in [0x000f_ffff_ffff_ffffu64, 0x0010_0000_0000_0000] {
            let x = f64::from_bits(bits);
            assert_eq!(f64::from(&Rational::try_from(x).unwrap()), x);
        }
    }

    #[test]
    fn decimal_test() {
        let samples = vec![
            (r(1, 2), dec("0.5")),
            (r(-1, 2), dec("-0.5")),
            (r(7, 2), dec("3.5")),
            (r(2, 4), dec("0.5")),
            (r(3, -4), dec("-0.75")),
            (r(1, 3), dec("0.3333333333333333333333333333")),
            (r(2, 3), dec("0.6666666666666666666666666667")),
            (r(10, 3), dec("3.3333333333333333333333333333")),
            (r(42, 1), dec("42")),
            (r(0, 1), dec("0")),
        ];

        for (n, d) in samples.into_iter() {
            assert_eq!(Decimal::try_from(&n).unwrap(), d, "{n:?}");
        }

        let too_big = Rational::from(BigInt::from(10).pow(30));
        assert_eq!(Decimal::try_from(&too_big).unwrap_err(), RationalError::DecimalOverflow);
        assert_eq!(Decimal::try_from(&Rational::default()).unwrap_err(), RationalError::ZeroDenominator);
    }

    #[test]
    fn decimal_roundtrip_test() {
        let samples = [
            "3.14",
            "-0.001",
            "1234567890.0987654321",
            "79228162514264337593543950335",
            "7.9228162514264337593543950335",
            "-7.9228162514264337593543950335",
            "1.2345678901234567890123456789",
            "-5.0000000000000000000000000001",
            "7922816251.4264337593543950335",
            "0.0000000000000000000000000001",
        ];

        for s in samples {
            let d = dec(s);
            assert_eq!(Decimal::try_from(Rational::from(d)).unwrap(), d, "{s}");
        }
    }

    #[test]
    fn decimal_scale_test() {
        // the integer part leaves room for 28 digits only if the fraction
        // doesn't round up
        let n = Rational::from(dec("7.9228162514264337593543950335")) + Rational::new(1, BigInt::from(10).pow(40)).unwrap();
        assert_eq!(Decimal::try_from(&n).unwrap(), dec("7.9228162514264337593543950335"));

        let n = Rational::from(dec("7.9228162514264337593543950335")) + Rational::new(6, BigInt::from(10).pow(29)).unwrap();
        assert_eq!(Decimal::try_from(&n).unwrap(), dec("7.922816251426433759354395034"));

        let max = BigInt::from(u128::MAX >> 32);
        let n = Rational::new(&max * 3 - 1, 3).unwrap();
        assert_eq!(Decimal::try_from(&n).unwrap(), Decimal::MAX);

        let n = Rational::new(&max * 3 + 2, 3).unwrap();
        assert_eq!(Decimal::try_from(&n).unwrap_err(), RationalError::DecimalOverflow);
    }
}
