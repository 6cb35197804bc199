use crate::Rational;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Signed;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

impl PartialEq for Rational {
    fn eq(&self, other: &Self) -> bool {
        let lhs = self.reduced();
        let rhs = other.reduced();

        lhs.numer == rhs.numer && lhs.denom == rhs.denom
    }
}

impl Eq for Rational {}

impl Hash for Rational {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let r = self.reduced();
        r.numer.hash(state);
        r.denom.hash(state);
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// It compares the integer parts first, and only when they're the same does it
// look at the remainders. It doesn't need a gcd, but the denominators must be
// positive, so a negative one flips both signs first (the value doesn't change).
impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.is_invalid() || other.is_invalid() {
            return cmp_invalid(self, other);
        }

        let (lhs_numer, lhs_denom) = positive_denom(self);
        let (rhs_numer, rhs_denom) = positive_denom(other);

        let (lhs_quotient, lhs_remainder) = lhs_numer.div_rem(&lhs_denom);
        let (rhs_quotient, rhs_remainder) = rhs_numer.div_rem(&rhs_denom);

        match lhs_quotient.cmp(&rhs_quotient) {
            // 1/2 vs 1/3: same quotient, same remainder, different values
            Ordering::Equal => (lhs_remainder * &rhs_denom).cmp(&(rhs_remainder * &lhs_denom)),
            ord => ord,
        }
    }
}

fn positive_denom(n: &Rational) -> (BigInt, BigInt) {
    if n.denom.is_negative() {
        (-&n.numer, -&n.denom)
    }

    else {
        (n.numer.clone(), n.denom.clone())
    }
}

// An invalid value is less than any valid value. Invalid values are never
// reduced, so they're ordered by their raw numerators, like `Eq` compares them.
fn cmp_invalid(lhs: &Rational, rhs: &Rational) -> Ordering {
    match (lhs.is_invalid(), rhs.is_invalid()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => lhs.numer.cmp(&rhs.numer),
    }
}

macro_rules! impl_eq_native {
    ($($t: ty),*) => {
        $(
            impl PartialEq<$t> for Rational {
                fn eq(&self, other: &$t) -> bool {
                    *self == Rational::from(*other)
                }
            }

            impl PartialEq<Rational> for $t {
                fn eq(&self, other: &Rational) -> bool {
                    Rational::from(*self) == *other
                }
            }
        )*
    };
}

impl_eq_native!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
