use crate::{Rational, RationalError};
use log::debug;
use num_bigint::BigInt;
use num_traits::Zero;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

// Nothing here reduces its result. Call `reduced()` when the canonical form is needed.

pub fn add_ratio(lhs: &Rational, rhs: &Rational) -> Rational {
    Rational::from_parts(
        &lhs.numer * &rhs.denom + &rhs.numer * &lhs.denom,
        &lhs.denom * &rhs.denom,
    )
}

pub fn sub_ratio(lhs: &Rational, rhs: &Rational) -> Rational {
    Rational::from_parts(
        &lhs.numer * &rhs.denom - &rhs.numer * &lhs.denom,
        &lhs.denom * &rhs.denom,
    )
}

pub fn mul_ratio(lhs: &Rational, rhs: &Rational) -> Rational {
    Rational::from_parts(
        &lhs.numer * &rhs.numer,
        &lhs.denom * &rhs.denom,
    )
}

pub fn div_ratio(lhs: &Rational, rhs: &Rational) -> Result<Rational, RationalError> {
    if rhs.numer.is_zero() {
        debug!("big_rational_core::div_ratio(), rhs is zero: {rhs:?}");
        return Err(RationalError::DivisionByZero);
    }

    Ok(Rational::from_parts(
        &lhs.numer * &rhs.denom,
        &lhs.denom * &rhs.numer,
    ))
}

/// `(lhs.numer * rhs.denom) % (lhs.denom * rhs.numer)`. Unlike the other
/// operators, the result is an integer.
pub fn rem_ratio(lhs: &Rational, rhs: &Rational) -> Result<BigInt, RationalError> {
    if rhs.numer.is_zero() {
        debug!("big_rational_core::rem_ratio(), rhs is zero: {rhs:?}");
        return Err(RationalError::DivisionByZero);
    }

    Ok((&lhs.numer * &rhs.denom) % (&lhs.denom * &rhs.numer))
}

impl Rational {
    pub fn checked_div(&self, other: &Rational) -> Result<Rational, RationalError> {
        div_ratio(self, other)
    }

    pub fn checked_rem(&self, other: &Rational) -> Result<BigInt, RationalError> {
        rem_ratio(self, other)
    }
}

macro_rules! impl_bin_op {
    ($trait: ident, $method: ident, $output: ty, $body: ident) => {
        impl $trait<&Rational> for &Rational {
            type Output = $output;

            fn $method(self, rhs: &Rational) -> $output {
                $body(self, rhs)
            }
        }

        impl $trait<Rational> for &Rational {
            type Output = $output;

            fn $method(self, rhs: Rational) -> $output {
                $body(self, &rhs)
            }
        }

        impl $trait<&Rational> for Rational {
            type Output = $output;

            fn $method(self, rhs: &Rational) -> $output {
                $body(&self, rhs)
            }
        }

        impl $trait<Rational> for Rational {
            type Output = $output;

            fn $method(self, rhs: Rational) -> $output {
                $body(&self, &rhs)
            }
        }
    };
}

impl_bin_op!(Add, add, Rational, add_ratio);
impl_bin_op!(Sub, sub, Rational, sub_ratio);
impl_bin_op!(Mul, mul, Rational, mul_ratio);

// `/` and `%` panic on a zero divisor, like the integer operators do.
// `checked_div` and `checked_rem` return the error instead.
impl_bin_op!(Div, div, Rational, div_or_panic);
impl_bin_op!(Rem, rem, BigInt, rem_or_panic);

fn div_or_panic(lhs: &Rational, rhs: &Rational) -> Rational {
    match div_ratio(lhs, rhs) {
        Ok(n) => n,
        Err(e) => panic!("{e}"),
    }
}

fn rem_or_panic(lhs: &Rational, rhs: &Rational) -> BigInt {
    match rem_ratio(lhs, rhs) {
        Ok(n) => n,
        Err(e) => panic!("{e}"),
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational::from_parts(-&self.numer, self.denom.clone())
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational::from_parts(-self.numer, self.denom)
    }
}
