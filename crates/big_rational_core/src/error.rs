use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum RationalError {
    #[error("denominator can't be 0")]
    ZeroDenominator,

    #[error("attempt to divide by zero")]
    DivisionByZero,

    // NaN and infinities don't have digits to extract
    #[error("can't convert a non-finite float into a rational")]
    NonFinite,

    #[error("the integer part does not fit in a decimal")]
    DecimalOverflow,
}
