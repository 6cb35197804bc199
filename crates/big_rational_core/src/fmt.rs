use crate::Rational;
use crate::convert::to_decimal;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use rust_decimal::Decimal;
use std::fmt;

impl Rational {
    /// `numerator/denominator` of the reduced value, or only the numerator
    /// if the denominator is 1.
    pub fn to_string_fraction(&self) -> String {
        let r = self.reduced();

        if r.denom.is_one() {
            r.numer.to_string()
        }

        else {
            format!("{}/{}", r.numer, r.denom)
        }
    }

    /// `quotient remainder/denominator` of the reduced value. A whole number
    /// is only its quotient, and a value between -1 and 1 is a plain fraction.
    pub fn to_string_mixed_fraction(&self) -> String {
        let r = self.reduced();

        if r.is_invalid() {
            return r.to_string_fraction();
        }

        let (quotient, remainder) = r.numer.div_rem(&r.denom);

        if quotient.is_zero() {
            r.to_string_fraction()
        }

        else if remainder.is_zero() {
            quotient.to_string()
        }

        // the sign is already in the quotient: -7/2 is "-3 1/2"
        else {
            format!("{quotient} {}/{}", remainder.abs(), r.denom)
        }
    }
}

/// The decimal expansion of the reduced value: the integer part is exact,
/// the fraction has at most 28 digits.
impl fmt::Display for Rational {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let r = self.reduced();

        if r.is_invalid() {
            return write!(fmt, "{}/0", r.numer);
        }

        if r.numer.is_zero() {
            return write!(fmt, "0");
        }

        let (quotient, remainder) = r.numer.div_rem(&r.denom);

        if remainder.is_zero() {
            return write!(fmt, "{quotient}");
        }

        let sign = if r.numer.is_negative() { "-" } else { "" };
        let mut integer = quotient.abs();

        // `remainder.abs() < denom`, so it always fits in a decimal
        let frac = to_decimal(&remainder.abs(), &r.denom).unwrap_or(Decimal::ZERO);

        // 0.99999... can round up to 1
        if frac == Decimal::ONE {
            integer += BigInt::one();
            return write!(fmt, "{sign}{integer}");
        }

        // and 0.00000...1 down to 0
        if frac.is_zero() {
            return if integer.is_zero() {
                write!(fmt, "0")
            } else {
                write!(fmt, "{sign}{integer}")
            };
        }

        write!(fmt, "{sign}{integer}.{}", fraction_digits(&frac))
    }
}

// "0.125" -> "125"
fn fraction_digits(frac: &Decimal) -> String {
    let s = frac.to_string();

    match s.split_once('.') {
        Some((_, digits)) => digits.to_string(),
        None => s,
    }
}
