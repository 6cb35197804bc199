use crate::{Rational, RationalError};
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::f64::consts::{LN_2, LOG10_2};

impl Rational {
    /// Both parts lose their signs, so the denominator is positive too.
    pub fn abs(&self) -> Rational {
        Rational::from_parts(self.numer.abs(), self.denom.abs())
    }

    /// A negative exponent raises the reciprocal, which fails if `self` is zero.
    /// `pow(0)` is always one.
    pub fn pow(&self, exponent: i32) -> Result<Rational, RationalError> {
        match exponent {
            0 => Ok(Rational::one()),
            1.. => Ok(Rational::from_parts(
                self.numer.pow(exponent as u32),
                self.denom.pow(exponent as u32),
            )),
            _ => {
                let exponent = exponent.unsigned_abs();

                Rational::new(
                    self.denom.pow(exponent),
                    self.numer.pow(exponent),
                )
            },
        }
    }

    /// It's not exact. The parts are converted to floats separately, so it works
    /// for values whose parts are too big for an `f64`.
    pub fn ln(&self) -> f64 {
        log_big(&self.numer, f64::ln, LN_2) - log_big(&self.denom, f64::ln, LN_2)
    }

    pub fn log10(&self) -> f64 {
        log_big(&self.numer, f64::log10, LOG10_2) - log_big(&self.denom, f64::log10, LOG10_2)
    }

    pub fn log(&self, base: f64) -> f64 {
        if base == 1.0 {
            return f64::NAN;
        }

        let log = |n: f64| n.log(base);
        let log_2 = LN_2 / base.ln();

        log_big(&self.numer, log, log_2) - log_big(&self.denom, log, log_2)
    }
}

// `log(n)`, where `log_2` is `log(2)` in the same base.
// NaN for negative numbers and -inf for 0
fn log_big<F: Fn(f64) -> f64>(n: &BigInt, log: F, log_2: f64) -> f64 {
    if n.is_zero() {
        return f64::NEG_INFINITY;
    }

    if n.is_negative() {
        return f64::NAN;
    }

    let bits = n.bits();

    // `to_f64` overflows past 1024 bits, so only the top 64 bits are converted
    if bits <= 1000 {
        n.to_f64().map_or(f64::NAN, log)
    }

    else {
        let shift = bits - 64;
        let top = n >> shift;

        top.to_f64().map_or(f64::NAN, log) + shift as f64 * log_2
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Rational::zero()
    }

    fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Rational::one()
    }
}

impl std::iter::Sum for Rational {
    fn sum<I: Iterator<Item = Rational>>(iter: I) -> Rational {
        iter.fold(Rational::zero(), |acc, n| (acc + n).reduced())
    }
}

impl std::iter::Product for Rational {
    fn product<I: Iterator<Item = Rational>>(iter: I) -> Rational {
        iter.fold(Rational::one(), |acc, n| (acc * n).reduced())
    }
}
