//! Classification of the bounds of an interval into quadrants.
//!
//! Quadrant `k` (mod 4) is the quarter period `[kπ/2, (k + 1)π/2)`.

use crate::{bound::Bound, interval::Interval};
use rug::{
    float::{Constant, Round},
    Float, Integer,
};
use smallvec::{smallvec, SmallVec};
use std::cmp::Ordering;
use tracing::trace;

/// The quadrant of a number, along with the number reduced into `[−π, π]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quadrant {
    pub index: u8,
    pub angle: f64,
}

/// The quadrants of the bounds of a nonempty interval.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QuadrantSpan {
    /// The quadrant of the lower bound, in `0..4`.
    pub lo: u8,
    /// The quadrant of the upper bound, in `0..4`.
    pub hi: u8,
    /// The number of quadrant boundaries in the interval, in `0..=4`.
    pub crossed: u8,
    /// The quadrant index of the lower bound before reduction, if known.
    pub first: Option<Integer>,
}

/// A strategy to compute the [`QuadrantSpan`] of an interval.
pub trait Classify<T> {
    /// Whether the strategy can tell the direction of monotonicity of a span with no boundary,
    /// so that evaluating the function at both bounds in both directions is unnecessary.
    const ORIENTS: bool;

    /// Returns the quadrant span of `x`, or `None` if it cannot be determined reliably.
    /// `x` must be nonempty.
    fn span(x: &Interval<T>) -> Option<QuadrantSpan>;
}

/// Classifies bounds by dividing them by the enclosure of π/2.
#[derive(Clone, Copy, Debug)]
pub struct IntervalDivision;

/// Classifies `f64` bounds by reducing them modulo 2π with MPFR.
#[derive(Clone, Copy, Debug)]
pub struct DirectModulo;

fn floor<T: Bound>(x: &T) -> Option<Integer> {
    x.to_float()
        .to_integer_round(Round::Down)
        .map(|(n, _)| n)
}

/// Returns the candidate quadrant indices (not reduced) of `x`.
///
/// There are two candidates when the enclosure of `x / (π/2)` contains an integer.
/// Returns `None` if `x` is not finite.
pub(crate) fn quadrant_candidates<T: Bound>(x: &T) -> Option<SmallVec<[Integer; 2]>> {
    let q = &Interval::point(x.clone()) / &T::consts().half_pi;
    if q.is_empty() {
        return None;
    }
    let lo = floor(q.inf())?;
    let hi = floor(q.sup())?;
    let mut candidates: SmallVec<[Integer; 2]> = smallvec![lo];
    if hi != candidates[0] {
        candidates.push(hi);
    }
    Some(candidates)
}

impl<T: Bound> Classify<T> for IntervalDivision {
    const ORIENTS: bool = false;

    fn span(x: &Interval<T>) -> Option<QuadrantSpan> {
        let first = quadrant_candidates(x.inf())?.into_iter().min()?;
        let last = quadrant_candidates(x.sup())?.into_iter().max()?;
        let raw = Integer::from(&last - &first);
        if raw > 4 {
            trace!("quadrant span of {:?} is too wide: {}", x, raw);
            return None;
        }
        Some(QuadrantSpan {
            lo: first.mod_u(4) as u8,
            hi: last.mod_u(4) as u8,
            crossed: raw.to_u8()?,
            first: Some(first),
        })
    }
}

const AMBIGUITY_EXP: i32 = -100;

/// Returns the quadrant of `r ∈ [−π, π]`, computed with `prec` bits,
/// or `None` if `r` is too close to one of the breakpoints.
///
/// The breakpoint 0 is only checked if `r` is not exact.
fn reduced_quadrant(r: &Float, prec: u32, exact: bool) -> Option<u8> {
    let pi = Float::with_val(prec, Constant::Pi);
    let half_pi = Float::with_val(prec, &pi / 2u32);
    let near = |b: &Float| {
        let d = Float::with_val(prec, r - b);
        d.is_zero() || d.get_exp().map_or(false, |e| e <= AMBIGUITY_EXP)
    };
    let mut breakpoints = vec![-pi.clone(), -half_pi.clone(), half_pi.clone(), pi];
    if !exact {
        breakpoints.push(Float::new(prec));
    }
    if breakpoints.iter().any(near) {
        return None;
    }
    Some(if *r < -half_pi.clone() {
        2
    } else if *r < 0 {
        3
    } else if *r < half_pi {
        0
    } else {
        1
    })
}

/// Returns the quadrant of `x`, or `None` if `x` is not finite or lies too close to
/// a quadrant boundary to be classified reliably.
pub fn quadrant(x: f64) -> Option<Quadrant> {
    if !x.is_finite() {
        return None;
    }
    let exp = Float::with_val(f64::MANTISSA_DIGITS, x).get_exp().unwrap_or(0);
    let prec = exp.max(0) as u32 + 2 * f64::MANTISSA_DIGITS + 64;
    let two_pi = Float::with_val(prec, Constant::Pi) * 2u32;
    let r = Float::with_val(prec, x).remainder(&two_pi);
    // The remainder is exact for |x| < π.
    let index = reduced_quadrant(&r, prec, x.abs() < 3.0)?;
    Some(Quadrant {
        index,
        angle: r.to_f64(),
    })
}

/// Computes the span of `x` from the quadrants of its bounds given by `classify`.
fn direct_span<F>(x: &Interval<f64>, classify: F) -> Option<QuadrantSpan>
where
    F: Fn(f64) -> Option<Quadrant>,
{
    let a = *x.inf();
    let b = *x.sup();
    if !a.is_finite() || !b.is_finite() {
        return None;
    }
    let consts = f64::consts();
    let wid = x.wid();
    if wid > *consts.two_pi.inf() {
        trace!("{:?} may span more than one period", x);
        return None;
    }
    let (lo, hi) = match (classify(a), classify(b)) {
        (Some(lo), Some(hi)) => (lo, hi),
        _ => {
            trace!("ambiguous reduction of {:?}, dividing by π/2 instead", x);
            return <IntervalDivision as Classify<f64>>::span(x);
        }
    };
    let crossed = if lo.index == hi.index {
        // Within a quadrant, the reduced angle decreases only if the interval wraps around.
        match hi.angle.partial_cmp(&lo.angle) {
            Some(Ordering::Greater) => 0,
            Some(Ordering::Less) => 4,
            _ if wid > *consts.pi.inf() => 4,
            _ => 0,
        }
    } else {
        (hi.index + 4 - lo.index) % 4
    };
    Some(QuadrantSpan {
        lo: lo.index,
        hi: hi.index,
        crossed,
        first: None,
    })
}

impl Classify<f64> for DirectModulo {
    const ORIENTS: bool = true;

    fn span(x: &Interval<f64>) -> Option<QuadrantSpan> {
        direct_span(x, quadrant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bound::Extended;

    fn span<T: Bound>(a: f64, b: f64) -> Option<QuadrantSpan> {
        let x = Interval::<f64>::try_new(a, b).unwrap();
        <T::Classifier as Classify<T>>::span(&x.convert::<T>())
    }

    fn lo_hi_crossed(s: Option<QuadrantSpan>) -> Option<(u8, u8, u8)> {
        s.map(|s| (s.lo, s.hi, s.crossed))
    }

    #[test]
    fn quadrant_of_f64() {
        assert_eq!(quadrant(1.0), Some(Quadrant { index: 0, angle: 1.0 }));
        assert_eq!(quadrant(2.0).map(|q| q.index), Some(1));
        assert_eq!(quadrant(-2.0).map(|q| q.index), Some(2));
        assert_eq!(quadrant(-1.0).map(|q| q.index), Some(3));
        assert_eq!(quadrant(0.0).map(|q| q.index), Some(0));
        assert_eq!(quadrant(-0.0).map(|q| q.index), Some(0));
        assert_eq!(quadrant(-1e-300).map(|q| q.index), Some(3));
        assert_eq!(quadrant(std::f64::consts::FRAC_PI_2).map(|q| q.index), Some(0));
        assert_eq!(quadrant(f64::INFINITY), None);

        let q = quadrant(7.0).unwrap();
        assert_eq!(q.index, 0);
        assert!((q.angle - (7.0 - std::f64::consts::TAU)).abs() < 1e-15);
    }

    #[test]
    fn reduction_agrees_with_division() {
        for x in [1e6, -1e6, 12345.678, 1e15] {
            let candidates = quadrant_candidates(&Extended::from(x)).unwrap();
            assert_eq!(candidates.len(), 1);
            assert_eq!(
                quadrant(x).map(|q| q.index as u32),
                Some(candidates[0].mod_u(4))
            );
        }
    }

    #[test]
    fn ambiguous_reduction() {
        let prec = 200;
        let pi = Float::with_val(prec, Constant::Pi);
        let half_pi = Float::with_val(prec, &pi / 2u32);
        assert_eq!(reduced_quadrant(&half_pi, prec, false), None);
        assert_eq!(reduced_quadrant(&-pi.clone(), prec, false), None);
        let tiny = Float::with_val(prec, 1e-40);
        assert_eq!(reduced_quadrant(&tiny, prec, false), None);
        assert_eq!(reduced_quadrant(&tiny, prec, true), Some(0));
        assert_eq!(reduced_quadrant(&-tiny, prec, true), Some(3));
        let r = Float::with_val(prec, &pi - 1u32);
        assert_eq!(reduced_quadrant(&r, prec, false), Some(1));
    }

    #[test]
    fn candidates() {
        assert_eq!(quadrant_candidates(&1.0).unwrap().as_slice(), &[Integer::from(0)]);
        assert_eq!(quadrant_candidates(&-1.0).unwrap().as_slice(), &[Integer::from(-1)]);
        assert_eq!(quadrant_candidates(&0.0).unwrap().as_slice(), &[Integer::from(0)]);
        assert!(quadrant_candidates(&f64::INFINITY).is_none());

        // The enclosure of π/2 contains (π/2)·1, thus both sides of the boundary are possible.
        let half_pi = Extended::consts().half_pi.inf().clone();
        let c = quadrant_candidates(&half_pi).unwrap();
        assert_eq!(c.as_slice(), &[Integer::from(0), Integer::from(1)]);
    }

    #[test]
    fn interval_division() {
        let s = span::<Extended>(1.0, 2.0).unwrap();
        assert_eq!((s.lo, s.hi, s.crossed), (0, 1, 1));
        assert_eq!(s.first, Some(Integer::from(0)));

        let s = span::<Extended>(-1.0, 1.0).unwrap();
        assert_eq!((s.lo, s.hi, s.crossed), (3, 0, 1));
        assert_eq!(s.first, Some(Integer::from(-1)));

        assert_eq!(lo_hi_crossed(span::<Extended>(0.1, 0.2)), Some((0, 0, 0)));
        assert_eq!(lo_hi_crossed(span::<Extended>(0.1, 6.5)), Some((0, 0, 4)));
        assert_eq!(lo_hi_crossed(span::<Extended>(-5.0, -4.0)), Some((0, 1, 1)));
        assert_eq!(span::<Extended>(0.0, 20.0), None);
        assert_eq!(span::<Extended>(0.0, f64::INFINITY), None);
    }

    #[test]
    fn direct_modulo() {
        assert_eq!(lo_hi_crossed(span::<f64>(1.0, 2.0)), Some((0, 1, 1)));
        assert_eq!(lo_hi_crossed(span::<f64>(-1.0, 1.0)), Some((3, 0, 1)));
        assert_eq!(lo_hi_crossed(span::<f64>(0.1, 0.2)), Some((0, 0, 0)));
        assert_eq!(lo_hi_crossed(span::<f64>(0.5, 3.8)), Some((0, 2, 2)));
        assert_eq!(lo_hi_crossed(span::<f64>(0.1, 6.1)), Some((0, 3, 3)));
        assert_eq!(lo_hi_crossed(span::<f64>(0.1, 6.27)), Some((0, 3, 3)));
        assert_eq!(lo_hi_crossed(span::<f64>(0.01, 6.29)), Some((0, 0, 4)));
        assert_eq!(lo_hi_crossed(span::<f64>(-5.0, -4.0)), Some((0, 1, 1)));
        assert_eq!(span::<f64>(0.0, 7.0), None);
        assert_eq!(span::<f64>(f64::NEG_INFINITY, 0.0), None);
        assert_eq!(span::<f64>(1.0, 2.0).and_then(|s| s.first), None);
        assert_eq!(lo_hi_crossed(span::<f64>(3.0, 3.0)), Some((1, 1, 0)));
        assert_eq!(lo_hi_crossed(span::<f64>(-3.0, 3.0)), Some((2, 1, 3)));
    }

    #[test]
    fn direct_modulo_uses_reduced_angles() {
        let x = Interval::try_new(0.1, 0.2).unwrap();
        let s = direct_span(&x, |t| Some(Quadrant { index: 0, angle: t })).unwrap();
        assert_eq!(s.crossed, 0);
        let s = direct_span(&x, |t| Some(Quadrant { index: 0, angle: -t })).unwrap();
        assert_eq!(s.crossed, 4);

        // Equal angles are decided by the width.
        let s = direct_span(&x, |_| Some(Quadrant { index: 0, angle: 0.5 })).unwrap();
        assert_eq!(s.crossed, 0);
        let x = Interval::try_new(0.0, 5.0).unwrap();
        let s = direct_span(&x, |_| Some(Quadrant { index: 0, angle: 0.5 })).unwrap();
        assert_eq!(s.crossed, 4);
    }

    #[test]
    fn direct_modulo_ambiguous_bound() {
        let x = Interval::try_new(1.0, 2.0).unwrap();
        let by_division = <IntervalDivision as Classify<f64>>::span(&x).unwrap();
        let s = direct_span(&x, |t| if t == 2.0 { None } else { quadrant(t) }).unwrap();
        assert_eq!(s, by_division);
        assert_eq!((s.lo, s.hi, s.crossed), (0, 1, 1));
        assert_eq!(s.first, Some(Integer::from(0)));

        let s = direct_span(&x, |_| None).unwrap();
        assert_eq!(s, by_division);

        // Unbounded intervals are rejected before the bounds are classified.
        let x = Interval::try_new(1.0, f64::INFINITY).unwrap();
        assert_eq!(direct_span(&x, |_| None), None);
    }
}
