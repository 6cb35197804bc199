#![deny(unused_imports)]

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

mod cmp;
mod convert;
mod digits;
mod error;
mod fmt;
mod math;
mod op;


pub use error::RationalError;

/// An exact fraction `numerator / denominator` of arbitrary precision.
///
/// The pair is stored as given: it may share common factors and the
/// denominator may be negative (e.g. after dividing by a negative value).
/// `reduced()` computes the canonical form, and equality, hashing and
/// rendering are all defined over it.
///
/// `Rational::default()` is the invalid state, whose denominator is 0.
/// No constructor can produce it.
#[derive(Clone, Debug, Default)]
pub struct Rational {
    numer: BigInt,
    denom: BigInt,
}

impl Rational {
    /// Fails with `RationalError::ZeroDenominator` if `denom` is 0.
    pub fn new<N: Into<BigInt>, D: Into<BigInt>>(numer: N, denom: D) -> Result<Self, RationalError> {
        let denom = denom.into();

        if denom.is_zero() {
            return Err(RationalError::ZeroDenominator);
        }

        Ok(Rational {
            numer: numer.into(),
            denom,
        })
    }

    pub fn from_integer<N: Into<BigInt>>(n: N) -> Self {
        Rational {
            numer: n.into(),
            denom: BigInt::one(),
        }
    }

    pub fn zero() -> Self {
        Rational {
            numer: BigInt::zero(),
            denom: BigInt::one(),
        }
    }

    pub fn one() -> Self {
        Rational {
            numer: BigInt::one(),
            denom: BigInt::one(),
        }
    }

    // every operator builds its result through this, the operands were already checked
    pub(crate) fn from_parts(numer: BigInt, denom: BigInt) -> Self {
        Rational { numer, denom }
    }

    pub fn numerator(&self) -> &BigInt {
        &self.numer
    }

    pub fn denominator(&self) -> &BigInt {
        &self.denom
    }

    /// Divides both parts by their gcd and moves the sign to the numerator,
    /// so that the denominator is always positive. It never modifies `self`.
    ///
    /// The invalid state is returned as it is.
    pub fn reduced(&self) -> Rational {
        if self.denom.is_one() || self.denom.is_zero() {
            return self.clone();
        }

        let r = self.numer.gcd(&self.denom);
        let mut numer = &self.numer / &r;
        let mut denom = &self.denom / &r;

        if denom.is_negative() {
            numer = -numer;
            denom = -denom;
        }

        Rational { numer, denom }
    }

    /// `numerator / denominator`, truncated toward zero.
    ///
    /// # Panics
    ///
    /// If `self` is invalid.
    pub fn quotient(&self) -> BigInt {
        &self.numer / &self.denom
    }

    /// `numerator % denominator`. It has the sign of the numerator.
    ///
    /// # Panics
    ///
    /// If `self` is invalid.
    pub fn remainder(&self) -> BigInt {
        &self.numer % &self.denom
    }

    pub fn is_integer(&self) -> bool {
        self.denom.is_one() || (!self.denom.is_zero() && self.numer.is_multiple_of(&self.denom))
    }

    /// An exact division with an even quotient.
    pub fn is_even(&self) -> bool {
        if self.denom.is_zero() {
            return false;
        }

        let (quotient, remainder) = self.numer.div_rem(&self.denom);
        remainder.is_zero() && quotient.is_even()
    }

    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    // `(2, 2)` is one but `(-2, -2)` and `(4, 4)` too. `(3, 2)` is not, even though its quotient is 1.
    pub fn is_one(&self) -> bool {
        self.numer == self.denom
    }

    pub fn is_invalid(&self) -> bool {
        self.denom.is_zero()
    }

    /// `(n + d, d)`: exactly one whole unit more, without reducing.
    pub fn increment(&self) -> Rational {
        Rational {
            numer: &self.numer + &self.denom,
            denom: self.denom.clone(),
        }
    }

    /// `(n - d, d)`: exactly one whole unit less, without reducing.
    pub fn decrement(&self) -> Rational {
        Rational {
            numer: &self.numer - &self.denom,
            denom: self.denom.clone(),
        }
    }
}
