#![deny(unused_imports)]

pub use big_rational_core::{Rational, RationalError};

// the collaborators `Rational` converts from and to
pub use num_bigint::BigInt;
pub use rust_decimal::Decimal;
