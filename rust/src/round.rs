use crate::{bound::Bound, interval::Interval};
use gmp_mpfr_sys::mpfr;
use rug::{float::Round, Float};

/// An elementary function that MPFR evaluates with correct rounding.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Elementary {
    Sin,
    Cos,
    Tan,
    Cot,
    Asin,
    Acos,
    Atan,
}

fn rnd(round: Round) -> mpfr::rnd_t {
    match round {
        Round::Down => mpfr::rnd_t::RNDD,
        Round::Up => mpfr::rnd_t::RNDU,
        Round::Zero => mpfr::rnd_t::RNDZ,
        _ => mpfr::rnd_t::RNDN,
    }
}

macro_rules! mpfr_fn {
    ($mpfr_f:ident($y:ident, $($x:ident),+; $rnd:expr)) => {
        unsafe {
            mpfr::$mpfr_f($y.as_raw_mut(), $($x.as_raw()),+, $rnd);
        }
    };
}

impl Elementary {
    /// Evaluates the function at `x` with `prec` bits, rounding in the direction `round`.
    pub(crate) fn eval(self, x: &Float, prec: u32, round: Round) -> Float {
        use Elementary::*;
        let mut y = Float::new(prec);
        let rnd = rnd(round);
        match self {
            Sin => mpfr_fn!(sin(y, x; rnd)),
            Cos => mpfr_fn!(cos(y, x; rnd)),
            Tan => mpfr_fn!(tan(y, x; rnd)),
            Cot => mpfr_fn!(cot(y, x; rnd)),
            Asin => mpfr_fn!(asin(y, x; rnd)),
            Acos => mpfr_fn!(acos(y, x; rnd)),
            Atan => mpfr_fn!(atan(y, x; rnd)),
        }
        y
    }
}

/// Returns `f(x)` rounded in the direction `round`. The result is NaN outside the domain of `f`.
pub(crate) fn eval_round<T: Bound>(f: Elementary, x: &T, round: Round) -> T {
    let y = f.eval(&x.to_float(), T::PREC, round);
    T::from_float_round(&y, round)
}

pub(crate) fn rd<T: Bound>(f: Elementary, x: &T) -> T {
    eval_round(f, x, Round::Down)
}

pub(crate) fn ru<T: Bound>(f: Elementary, x: &T) -> T {
    eval_round(f, x, Round::Up)
}

/// Returns `[f(lo)↓, f(hi)↑]`, or the empty interval if either value is NaN.
pub(crate) fn round_eval<T: Bound>(f: Elementary, lo: &T, hi: &T) -> Interval<T> {
    Interval::with_bounds(rd(f, lo), ru(f, hi))
}

/// Returns an enclosure of `f(x)`.
pub(crate) fn point_eval<T: Bound>(f: Elementary, x: &T) -> Interval<T> {
    round_eval(f, x, x)
}

fn atan2_round<T: Bound>(y: &T, x: &T, round: Round) -> T {
    let y = y.to_float();
    let x = x.to_float();
    let mut z = Float::new(T::PREC);
    mpfr_fn!(atan2(z, y, x; rnd(round)));
    T::from_float_round(&z, round)
}

/// Returns `atan2(y, x)` rounded down. Signed zeros follow the IEEE 754 conventions.
pub(crate) fn atan2_rd<T: Bound>(y: &T, x: &T) -> T {
    atan2_round(y, x, Round::Down)
}

/// Returns `atan2(y, x)` rounded up.
pub(crate) fn atan2_ru<T: Bound>(y: &T, x: &T) -> T {
    atan2_round(y, x, Round::Up)
}
