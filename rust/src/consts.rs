use crate::{
    bound::{Bound, Extended},
    interval::Interval,
};
use rug::{
    float::{Constant, Round},
    Float,
};
use std::sync::LazyLock;

/// Enclosures of π, π/2 and 2π with bounds of type `T`.
///
/// Each bound is within one ulp of the exact value.
#[derive(Clone, Debug)]
pub struct TrigConsts<T> {
    pub pi: Interval<T>,
    pub half_pi: Interval<T>,
    pub two_pi: Interval<T>,
}

impl<T: Bound> TrigConsts<T> {
    /// Computes the enclosures with MPFR at the precision of `T`.
    pub(crate) fn from_mpfr() -> Self {
        let (pi_rd, _) = Float::with_val_round(T::PREC, Constant::Pi, Round::Down);
        let (pi_ru, _) = Float::with_val_round(T::PREC, Constant::Pi, Round::Up);

        // Scaling by 2 or 1/2 is exact.
        let scaled = |a: Float, b: Float| {
            Interval::with_bounds(
                T::from_float_round(&a, Round::Down),
                T::from_float_round(&b, Round::Up),
            )
        };
        Self {
            half_pi: scaled(
                Float::with_val(T::PREC, &pi_rd / 2u32),
                Float::with_val(T::PREC, &pi_ru / 2u32),
            ),
            two_pi: scaled(
                Float::with_val(T::PREC, &pi_rd * 2u32),
                Float::with_val(T::PREC, &pi_ru * 2u32),
            ),
            pi: scaled(pi_rd, pi_ru),
        }
    }
}

pub(crate) static F64_CONSTS: LazyLock<TrigConsts<f64>> = LazyLock::new(|| TrigConsts {
    pi: Interval::from(inari::Interval::PI),
    half_pi: Interval::from(inari::Interval::FRAC_PI_2),
    two_pi: Interval::from(inari::Interval::TAU),
});

pub(crate) static EXTENDED_CONSTS: LazyLock<TrigConsts<Extended>> =
    LazyLock::new(TrigConsts::from_mpfr);
