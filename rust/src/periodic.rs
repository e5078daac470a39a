use crate::{
    bound::{max_bound, min_bound, Bound},
    interval::Interval,
    quadrant::{Classify, QuadrantSpan},
    round::{point_eval, rd, round_eval, ru, Elementary},
};
use tracing::trace;

/// How to enclose the image of an interval under a function that is piecewise monotonic.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Case {
    /// The function is monotonic, in an unknown direction.
    MonotonicHull,
    /// The function is increasing: `[f(a)↓, f(b)↑]`.
    DirectedPairForward,
    /// The function is decreasing: `[f(b)↓, f(a)↑]`.
    DirectedPairReverse,
    /// The maximum 1 is attained: `[min(f(a), f(b))↓, 1]`.
    ClampMax,
    /// The minimum −1 is attained: `[−1, max(f(a), f(b))↑]`.
    ClampMin,
    /// Both extrema are attained: `[−1, 1]`.
    FullRange,
}

/// Evaluates `f` over `x` according to `case`.
pub(crate) fn evaluate<T: Bound>(f: Elementary, case: Case, x: &Interval<T>) -> Interval<T> {
    use Case::*;
    let a = x.inf();
    let b = x.sup();
    match case {
        MonotonicHull => point_eval(f, a).convex_hull(&point_eval(f, b)),
        DirectedPairForward => round_eval(f, a, b),
        DirectedPairReverse => round_eval(f, b, a),
        ClampMax => Interval::with_bounds(min_bound(rd(f, a), rd(f, b)), T::one()),
        ClampMin => Interval::with_bounds(T::one().negated(), max_bound(ru(f, a), ru(f, b))),
        FullRange => unit(),
    }
}

/// Returns `[−1, 1]`.
pub(crate) fn unit<T: Bound>() -> Interval<T> {
    Interval::with_bounds(T::one().negated(), T::one())
}

/// A function with period 2π and range `[−1, 1]`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Periodic {
    Sin,
    Cos,
}

impl Periodic {
    fn elementary(self) -> Elementary {
        match self {
            Periodic::Sin => Elementary::Sin,
            Periodic::Cos => Elementary::Cos,
        }
    }

    /// Returns the quadrants `(lo, hi)` of `span` in terms of sine: cos(x) = sin(x + π/2).
    fn shifted(self, span: &QuadrantSpan) -> (u8, u8) {
        match self {
            Periodic::Sin => (span.lo, span.hi),
            Periodic::Cos => ((span.lo + 1) % 4, (span.hi + 1) % 4),
        }
    }

    /// Returns how to enclose the image of an interval with the given quadrant span.
    ///
    /// If `orients` is `true`, a span without a boundary gives a directed pair
    /// instead of [`Case::MonotonicHull`].
    pub fn case(self, span: &QuadrantSpan, orients: bool) -> Case {
        use Case::*;
        let (lo, hi) = self.shifted(span);
        match span.crossed {
            0 if orients => {
                if lo == 0 || lo == 3 {
                    DirectedPairForward
                } else {
                    DirectedPairReverse
                }
            }
            0 => MonotonicHull,
            4 => FullRange,
            _ => match (lo, hi) {
                (3, 0) => DirectedPairForward,
                (1, 2) => DirectedPairReverse,
                (0 | 3, 1 | 2) => ClampMax,
                (1 | 2, 3 | 0) => ClampMin,
                _ => FullRange,
            },
        }
    }

    pub(crate) fn eval<T: Bound>(self, x: &Interval<T>) -> Interval<T> {
        if x.is_empty() {
            return Interval::empty();
        }
        if x.wid() > *T::consts().two_pi.inf() {
            return unit();
        }
        let span = match <T::Classifier as Classify<T>>::span(x) {
            Some(span) => span,
            None => {
                trace!("{:?}: cannot classify {:?}", self, x);
                return unit();
            }
        };
        let case = self.case(&span, <T::Classifier as Classify<T>>::ORIENTS);
        evaluate(self.elementary(), case, x)
    }
}

impl<T: Bound> Interval<T> {
    pub fn sin(&self) -> Self {
        Periodic::Sin.eval(self)
    }

    pub fn cos(&self) -> Self {
        Periodic::Cos.eval(self)
    }

    /// Returns an enclosure of sin(πx).
    pub fn sinpi(&self) -> Self {
        (self * &T::consts().pi).sin()
    }

    /// Returns an enclosure of cos(πx).
    pub fn cospi(&self) -> Self {
        (self * &T::consts().pi).cos()
    }
}
