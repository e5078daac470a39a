use crate::{
    bound::{Bound, Extended},
    interval::Interval,
    periodic::{evaluate, Case},
    quadrant::{Classify, DirectModulo, QuadrantSpan},
    round::Elementary,
};
use rug::Integer;
use tracing::trace;

/// A function with period π and a pole at every multiple of π/2 of one parity.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Singular {
    /// Poles at odd multiples of π/2.
    Tan,
    /// Poles at even multiples of π/2.
    Cot,
}

impl Singular {
    /// Returns `true` if one of the quadrant boundaries in `span` can be a pole.
    ///
    /// The boundaries in the span are `first + 1, …, first + crossed` (times π/2).
    pub fn may_cross(self, span: &QuadrantSpan) -> bool {
        match span.crossed {
            0 => false,
            1 => match self {
                Singular::Tan => span.lo % 2 == 0,
                Singular::Cot => span.lo % 2 == 1,
            },
            _ => true,
        }
    }

    /// Returns `true` if `x` can contain a pole of the function.
    fn crosses<T: Bound>(self, span: &QuadrantSpan, x: &Interval<T>) -> bool {
        if !self.may_cross(span) {
            return false;
        }
        if span.crossed != 1 {
            return true;
        }
        // The only pole is at the lower quadrant boundary of the upper bound.
        if self == Singular::Cot && span.hi == 0 && x.sup().is_zero() {
            return false;
        }
        match &span.first {
            Some(first) => {
                let k = Integer::from(first + 1);
                !excludes_pole(&k, x)
            }
            None => true,
        }
    }

    fn elementary(self) -> Elementary {
        match self {
            Singular::Tan => Elementary::Tan,
            Singular::Cot => Elementary::Cot,
        }
    }

    /// Encloses the image of `x`, which contains no pole.
    fn eval_regular<T: Bound>(self, x: &Interval<T>) -> Interval<T> {
        match self {
            Singular::Tan => evaluate(self.elementary(), Case::DirectedPairForward, x),
            Singular::Cot => {
                // Approach the pole at 0 from inside the interval.
                let inf = if x.inf().is_zero() {
                    T::zero()
                } else {
                    x.inf().clone()
                };
                let sup = if x.sup().is_zero() {
                    T::neg_zero()
                } else {
                    x.sup().clone()
                };
                let x = Interval::with_bounds(inf, sup);
                evaluate(self.elementary(), Case::DirectedPairReverse, &x)
            }
        }
    }
}

/// Returns `true` if `x` does not contain kπ/2, where `k ≠ 0`.
///
/// kπ/2 is irrational, thus it lies in the interior of its enclosure.
fn excludes_pole<T: Bound>(k: &Integer, x: &Interval<T>) -> bool {
    let pole = &Interval::from_integer(k) * &T::consts().half_pi;
    x.sup() <= pole.inf() || x.inf() >= pole.sup()
}

impl<T: Bound> Interval<T> {
    pub fn tan(&self) -> Self {
        if self.is_empty() {
            return Self::empty();
        }
        if self.wid() > *T::consts().pi.inf() {
            return Self::entire();
        }
        let span = match <T::Classifier as Classify<T>>::span(self) {
            Some(span) => span,
            None => {
                trace!("tan: cannot classify {:?}", self);
                return Self::entire();
            }
        };
        if Singular::Tan.crosses(&span, self) {
            return Self::entire();
        }
        Singular::Tan.eval_regular(self)
    }
}

/// Returns an enclosure of cot(`x`).
///
/// The poles are located on the enclosure of `x` with `f64` bounds,
/// while the function is evaluated with the precision of [`Extended`].
pub(crate) fn cot_extended(x: &Interval<Extended>) -> Interval<Extended> {
    if x.is_empty() || x.is_zero() {
        return Interval::empty();
    }
    if x.wid() > *Extended::consts().pi.inf() {
        return Interval::entire();
    }
    let narrowed = Interval::<f64>::from_extended(x);
    let span = match DirectModulo::span(&narrowed) {
        Some(span) => span,
        None => {
            trace!("cot: cannot classify {:?}", narrowed);
            return Interval::entire();
        }
    };
    if Singular::Cot.crosses(&span, &narrowed) {
        return Interval::entire();
    }
    Singular::Cot.eval_regular(x)
}
