use crate::{
    consts::{TrigConsts, EXTENDED_CONSTS, F64_CONSTS},
    quadrant::{Classify, DirectModulo, IntervalDivision},
};
use rug::{
    float::{Round, Special},
    Float, Integer,
};
use std::fmt::Debug;

/// The number of bits in the significand of [`Extended`].
pub const EXTENDED_PREC: u32 = 128;

/// A floating-point type that can be used as the bounds of an [`Interval`].
///
/// Every value must be exactly representable as an MPFR [`Float`] with [`Bound::PREC`] bits,
/// so that elementary functions can be evaluated by MPFR with directed rounding
/// and converted back without losing the direction of rounding.
///
/// [`Interval`]: crate::Interval
pub trait Bound: Clone + Debug + PartialOrd + Send + Sync + 'static {
    /// The number of bits in the significand.
    const PREC: u32;

    /// The strategy used to find the quadrants of the bounds of an interval.
    type Classifier: Classify<Self>;

    /// Rounds `x` to a value of `Self` in the direction `round`.
    fn from_float_round(x: &Float, round: Round) -> Self;

    /// Returns `self` as a [`Float`] with [`Bound::PREC`] bits. The conversion is exact.
    fn to_float(&self) -> Float;

    /// Returns the enclosures of π, π/2 and 2π.
    fn consts() -> &'static TrigConsts<Self>;

    fn from_special(s: Special) -> Self {
        Self::from_float_round(&Float::with_val(Self::PREC, s), Round::Nearest)
    }

    /// Rounds `n` to a value of `Self` in the direction `round`.
    fn from_integer_round(n: &Integer, round: Round) -> Self {
        let (x, _) = Float::with_val_round(Self::PREC, n, round);
        Self::from_float_round(&x, round)
    }

    fn zero() -> Self {
        Self::from_special(Special::Zero)
    }

    fn neg_zero() -> Self {
        Self::from_special(Special::NegZero)
    }

    fn one() -> Self {
        Self::from_float_round(&Float::with_val(Self::PREC, 1), Round::Nearest)
    }

    fn infinity() -> Self {
        Self::from_special(Special::Infinity)
    }

    fn neg_infinity() -> Self {
        Self::from_special(Special::NegInfinity)
    }

    fn is_nan(&self) -> bool {
        self.to_float().is_nan()
    }

    fn is_zero(&self) -> bool {
        self.to_float().is_zero()
    }

    fn is_infinite(&self) -> bool {
        self.to_float().is_infinite()
    }

    /// Returns `-self`. Negation is exact.
    fn negated(&self) -> Self {
        Self::from_float_round(&-self.to_float(), Round::Nearest)
    }
}

impl Bound for f64 {
    const PREC: u32 = f64::MANTISSA_DIGITS;

    type Classifier = DirectModulo;

    fn from_float_round(x: &Float, round: Round) -> Self {
        x.to_f64_round(round)
    }

    fn to_float(&self) -> Float {
        Float::with_val(Self::PREC, *self)
    }

    fn consts() -> &'static TrigConsts<Self> {
        &F64_CONSTS
    }

    fn zero() -> Self {
        0.0
    }

    fn neg_zero() -> Self {
        -0.0
    }

    fn one() -> Self {
        1.0
    }

    fn infinity() -> Self {
        f64::INFINITY
    }

    fn neg_infinity() -> Self {
        f64::NEG_INFINITY
    }

    fn is_nan(&self) -> bool {
        f64::is_nan(*self)
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn is_infinite(&self) -> bool {
        f64::is_infinite(*self)
    }

    fn negated(&self) -> Self {
        -*self
    }
}

/// An MPFR floating-point number with [`EXTENDED_PREC`] bits.
///
/// Used as the working precision of the functions whose case analysis is only carried out once
/// (`atan2`, `cot`, `csc` and `sec`). Every `f64` converts to it exactly.
#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct Extended(Float);

impl Extended {
    /// Returns the underlying [`Float`].
    pub fn as_float(&self) -> &Float {
        &self.0
    }

    /// Rounds `self` to a [`f64`] number in the direction `round`.
    pub fn to_f64_round(&self, round: Round) -> f64 {
        self.0.to_f64_round(round)
    }
}

impl From<f64> for Extended {
    fn from(x: f64) -> Self {
        Self(Float::with_val(EXTENDED_PREC, x))
    }
}

impl Bound for Extended {
    const PREC: u32 = EXTENDED_PREC;

    type Classifier = IntervalDivision;

    fn from_float_round(x: &Float, round: Round) -> Self {
        Self(Float::with_val_round(EXTENDED_PREC, x, round).0)
    }

    fn to_float(&self) -> Float {
        self.0.clone()
    }

    fn consts() -> &'static TrigConsts<Self> {
        &EXTENDED_CONSTS
    }

    fn is_nan(&self) -> bool {
        self.0.is_nan()
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    fn is_infinite(&self) -> bool {
        self.0.is_infinite()
    }

    fn negated(&self) -> Self {
        Self(-self.0.clone())
    }
}

macro_rules! impl_round_op {
    ($f:ident, $op:tt) => {
        /// Applies the operation to `x` and `y`, rounding the result in the direction `round`.
        pub(crate) fn $f<T: Bound>(x: &T, y: &T, round: Round) -> T {
            let x = x.to_float();
            let y = y.to_float();
            let (z, _) = Float::with_val_round(T::PREC, &x $op &y, round);
            T::from_float_round(&z, round)
        }
    };
}

impl_round_op!(add_round, +);
impl_round_op!(sub_round, -);
impl_round_op!(div_round, /);

/// Returns `x × y` rounded in the direction `round`, with the convention 0 × ±∞ = 0.
pub(crate) fn mul_round<T: Bound>(x: &T, y: &T, round: Round) -> T {
    if x.is_zero() || y.is_zero() {
        return T::zero();
    }
    let x = x.to_float();
    let y = y.to_float();
    let (z, _) = Float::with_val_round(T::PREC, &x * &y, round);
    T::from_float_round(&z, round)
}

pub(crate) fn min_bound<T: Bound>(x: T, y: T) -> T {
    if y < x {
        y
    } else {
        x
    }
}

pub(crate) fn max_bound<T: Bound>(x: T, y: T) -> T {
    if y > x {
        y
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extended_is_exact_for_f64() {
        let xs = [
            0.0,
            -0.0,
            1.0,
            0.1,
            -2.5e-300,
            f64::MIN_POSITIVE / 8.0,
            f64::MAX,
            f64::INFINITY,
        ];
        for x in xs {
            let y = Extended::from(x);
            assert_eq!(y.to_f64_round(Round::Down), x);
            assert_eq!(y.to_f64_round(Round::Up), x);
            assert_eq!(y.as_float().is_sign_negative(), x.is_sign_negative());
        }
    }

    #[test]
    fn directed_operations() {
        let third_rd = div_round(&1.0, &3.0, Round::Down);
        let third_ru = div_round(&1.0, &3.0, Round::Up);
        assert!(third_rd < third_ru);
        assert_eq!(third_ru, f64::from_bits(third_rd.to_bits() + 1));

        assert_eq!(add_round(&0.1, &0.2, Round::Down), 0.3);
        assert_eq!(add_round(&0.1, &0.2, Round::Up), 0.30000000000000004);
        assert_eq!(sub_round(&1.0, &1.0, Round::Down), 0.0);
        assert_eq!(add_round(&f64::MAX, &f64::MAX, Round::Down), f64::MAX);
        assert_eq!(add_round(&f64::MAX, &f64::MAX, Round::Up), f64::INFINITY);
    }

    #[test]
    fn zero_times_infinity() {
        assert_eq!(mul_round(&0.0, &f64::INFINITY, Round::Down), 0.0);
        assert_eq!(mul_round(&f64::NEG_INFINITY, &-0.0, Round::Up), 0.0);
        let inf = Extended::infinity();
        assert!(mul_round(&Extended::zero(), &inf, Round::Up).is_zero());
    }

    #[test]
    fn special_values() {
        assert_eq!(<f64 as Bound>::from_special(Special::Infinity), f64::INFINITY);
        assert!(<Extended as Bound>::neg_zero().as_float().is_sign_negative());
        assert!(Extended::one() > Extended::zero());
        assert_eq!(Extended::from(2.0).negated(), Extended::from(-2.0));
        assert_eq!(
            f64::from_integer_round(&((Integer::from(1) << 60u32) + 1u32), Round::Up),
            1152921504606846976.0 + 256.0
        );
    }
}
