use crate::{
    bound::Bound,
    interval::Interval,
    periodic::{evaluate, unit, Case},
    round::{atan2_rd, atan2_ru, Elementary},
};
use bitflags::bitflags;

bitflags! {
    /// A set of signs: negative, positive or zero.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct SignSet: u8 {
        const NEG = 1;
        const ZERO = 2;
        const POS = 4;
    }
}

impl SignSet {
    /// Returns the signs of the members of `x`.
    pub fn of<T: Bound>(x: &Interval<T>) -> Self {
        let zero = T::zero();
        let mut ss = SignSet::empty();
        if *x.inf() < zero {
            ss |= SignSet::NEG;
        }
        if x.contains(&zero) {
            ss |= SignSet::ZERO;
        }
        if *x.sup() > zero {
            ss |= SignSet::POS;
        }
        ss
    }
}

impl<T: Bound> Interval<T> {
    pub fn asin(&self) -> Self {
        let x = self.intersection(&unit());
        if x.is_empty() {
            return x;
        }
        evaluate(Elementary::Asin, Case::DirectedPairForward, &x)
    }

    pub fn acos(&self) -> Self {
        let x = self.intersection(&unit());
        if x.is_empty() {
            return x;
        }
        evaluate(Elementary::Acos, Case::DirectedPairReverse, &x)
    }

    pub fn atan(&self) -> Self {
        if self.is_empty() {
            return Self::empty();
        }
        evaluate(Elementary::Atan, Case::DirectedPairForward, self)
    }
}

/// Returns an enclosure of {atan2(y', x') | y' ∈ `y`, x' ∈ `x`, (x', y') ≠ (0, 0)}
/// with the branch cut on the negative x-axis, where atan2(0, x') = π.
pub(crate) fn atan2_impl<T: Bound>(y: &Interval<T>, x: &Interval<T>) -> Interval<T> {
    use SignSet as S;

    if y.is_empty() || x.is_empty() {
        return Interval::empty();
    }

    let a = x.inf();
    let b = x.sup();
    // A zero bound of `y` is approached from inside the interval.
    let c = if y.inf().is_zero() {
        T::zero()
    } else {
        y.inf().clone()
    };
    let d = if y.sup().is_zero() {
        T::neg_zero()
    } else {
        y.sup().clone()
    };

    let consts = T::consts();
    let pi = &consts.pi;
    let half_pi = &consts.half_pi;
    let whole = || Interval::with_bounds(pi.sup().negated(), pi.sup().clone());
    let upper_half = || Interval::with_bounds(T::zero(), pi.sup().clone());
    let right_half = || Interval::with_bounds(half_pi.sup().negated(), half_pi.sup().clone());
    let pair = |inf: T, sup: T| Interval::with_bounds(inf, sup);

    let xs = SignSet::of(x);
    let ys = SignSet::of(y);
    let y_nonneg = !ys.contains(S::NEG);
    let y_nonpos = !ys.contains(S::POS);
    let d_neg = d < T::zero();

    if ys == S::ZERO {
        if xs == S::ZERO {
            Interval::empty()
        } else if !xs.contains(S::NEG) {
            Interval::point(T::zero())
        } else if !xs.contains(S::POS) {
            pi.clone()
        } else {
            upper_half()
        }
    } else if xs == S::ZERO {
        if y_nonneg {
            half_pi.clone()
        } else if y_nonpos {
            -half_pi
        } else {
            right_half()
        }
    } else if xs == S::POS {
        if y_nonneg {
            pair(atan2_rd(&c, b), atan2_ru(&d, a))
        } else if y_nonpos {
            pair(atan2_rd(&c, a), atan2_ru(&d, b))
        } else {
            pair(atan2_rd(&c, a), atan2_ru(&d, a))
        }
    } else if xs == S::NEG {
        if y_nonneg {
            pair(atan2_rd(&d, b), atan2_ru(&c, a))
        } else if y_nonpos && d_neg {
            pair(atan2_rd(&d, a), atan2_ru(&c, b))
        } else {
            whole()
        }
    } else if xs == S::ZERO | S::POS {
        if y_nonneg {
            pair(atan2_rd(&c, b), half_pi.sup().clone())
        } else if y_nonpos {
            pair(half_pi.sup().negated(), atan2_ru(&d, b))
        } else {
            right_half()
        }
    } else if xs == S::NEG | S::ZERO {
        if y_nonneg {
            pair(half_pi.inf().clone(), atan2_ru(&c, a))
        } else if y_nonpos && d_neg {
            pair(atan2_rd(&d, a), half_pi.inf().negated())
        } else {
            whole()
        }
    } else if y_nonneg {
        if c > T::zero() {
            pair(atan2_rd(&c, b), atan2_ru(&c, a))
        } else {
            upper_half()
        }
    } else if y_nonpos && d_neg {
        pair(atan2_rd(&d, a), atan2_ru(&d, b))
    } else {
        whole()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bound::Extended,
        round::{rd, ru},
    };
    use std::f64::consts::{FRAC_PI_2, PI};

    macro_rules! i {
        ($a:expr) => {
            Interval::<f64>::try_new($a, $a).unwrap()
        };

        ($a:expr, $b:expr) => {
            Interval::<f64>::try_new($a, $b).unwrap()
        };
    }

    const INF: f64 = f64::INFINITY;

    fn next_up(x: f64) -> f64 {
        f64::from_bits(x.to_bits() + 1)
    }

    #[test]
    fn sign_set() {
        assert_eq!(SignSet::of(&i!(0.0)), SignSet::ZERO);
        assert_eq!(SignSet::of(&i!(-0.0, 1.0)), SignSet::ZERO | SignSet::POS);
        assert_eq!(SignSet::of(&i!(-2.0, -1.0)), SignSet::NEG);
        assert_eq!(SignSet::of(&Interval::<f64>::entire()), SignSet::all());
        assert_eq!(SignSet::of(&Interval::<f64>::empty()), SignSet::empty());
    }

    #[test]
    fn asin_acos() {
        use Elementary::*;

        assert!(i!(2.0, 3.0).asin().is_empty());
        assert!(i!(-3.0, -1.5).acos().is_empty());
        assert!(Interval::<f64>::empty().asin().is_empty());

        let y = i!(-2.0, 0.5).asin();
        assert_eq!(y, i!(rd(Asin, &-1.0), ru(Asin, &0.5)));
        assert_eq!(*y.inf(), -next_up(FRAC_PI_2));

        assert_eq!(i!(-2.0, 2.0).acos(), i!(0.0, next_up(PI)));
        assert_eq!(i!(0.5, 1.0).acos(), i!(0.0, ru(Acos, &0.5)));
        assert_eq!(i!(1.0).asin(), i!(FRAC_PI_2, next_up(FRAC_PI_2)));

        let y = i!(-2.0, 0.5).to_extended().asin();
        assert_eq!(*y.inf(), rd(Asin, &Extended::from(-1.0)));
    }

    #[test]
    fn atan() {
        assert_eq!(
            Interval::<f64>::entire().atan(),
            i!(-next_up(FRAC_PI_2), next_up(FRAC_PI_2))
        );
        assert_eq!(i!(0.0).atan(), i!(0.0));
        assert!(Interval::<f64>::empty().atan().is_empty());
    }

    #[test]
    fn atan2_branches() {
        let pi = f64::consts().pi.clone();
        let half_pi = f64::consts().half_pi.clone();
        let f = |y: Interval<f64>, x: Interval<f64>| atan2_impl(&y, &x);
        let whole = i!(-next_up(PI), next_up(PI));

        assert!(f(Interval::empty(), i!(1.0)).is_empty());
        assert!(f(i!(1.0), Interval::empty()).is_empty());

        // y = 0
        assert!(f(i!(0.0), i!(0.0)).is_empty());
        assert_eq!(f(i!(0.0), i!(0.5, 1.0)), i!(0.0));
        assert_eq!(f(i!(0.0), i!(0.0, 1.0)), i!(0.0));
        assert_eq!(f(i!(0.0), i!(-2.0, -1.0)), pi);
        assert_eq!(f(i!(0.0), i!(-1.0, 0.0)), pi);
        assert_eq!(f(i!(0.0), i!(-1.0, 1.0)), i!(0.0, next_up(PI)));

        // x = 0
        assert_eq!(f(i!(1.0, 2.0), i!(0.0)), half_pi);
        assert_eq!(f(i!(0.0, 2.0), i!(0.0)), half_pi);
        assert_eq!(f(i!(-2.0, -1.0), i!(0.0)), -&half_pi);
        assert_eq!(f(i!(-1.0, 1.0), i!(0.0)), i!(-next_up(FRAC_PI_2), next_up(FRAC_PI_2)));

        // x > 0
        assert_eq!(
            f(i!(-1.0, 1.0), i!(1.0, 2.0)),
            i!(atan2_rd(&-1.0, &1.0), atan2_ru(&1.0, &1.0))
        );
        assert_eq!(f(i!(0.0, 1.0), i!(1.0, 2.0)), i!(0.0, atan2_ru(&1.0, &1.0)));
        assert_eq!(f(i!(-1.0, 0.0), i!(1.0, 2.0)), i!(atan2_rd(&-1.0, &1.0), 0.0));
        assert_eq!(f(i!(1.0, INF), i!(1.0, INF)), i!(0.0, next_up(FRAC_PI_2)));

        // x < 0
        assert_eq!(
            f(i!(0.0, 1.0), i!(-2.0, -1.0)),
            i!(atan2_rd(&1.0, &-1.0), next_up(PI))
        );
        assert_eq!(
            f(i!(-2.0, -1.0), i!(-2.0, -1.0)),
            i!(atan2_rd(&-1.0, &-2.0), atan2_ru(&-2.0, &-1.0))
        );
        assert_eq!(f(i!(-1.0, 0.0), i!(-2.0, -1.0)), whole);
        assert_eq!(f(i!(-1.0, 1.0), i!(-2.0, -1.0)), whole);

        // x = [0, b]
        assert_eq!(f(i!(0.0, 1.0), i!(0.0, 1.0)), i!(0.0, next_up(FRAC_PI_2)));
        assert_eq!(
            f(i!(-2.0, -1.0), i!(0.0, 1.0)),
            i!(-next_up(FRAC_PI_2), atan2_ru(&-1.0, &1.0))
        );
        assert_eq!(f(i!(-1.0, 1.0), i!(0.0, 1.0)), i!(-next_up(FRAC_PI_2), next_up(FRAC_PI_2)));

        // x = [a, 0]
        assert_eq!(f(i!(0.0, 1.0), i!(-1.0, 0.0)), i!(FRAC_PI_2, next_up(PI)));
        assert_eq!(
            f(i!(-2.0, -1.0), i!(-1.0, 0.0)),
            i!(atan2_rd(&-1.0, &-1.0), -FRAC_PI_2)
        );
        assert_eq!(f(i!(-1.0, 0.0), i!(-1.0, 0.0)), whole);

        // x ∋ 0 in the interior
        assert_eq!(
            f(i!(1.0), i!(-1.0, 1.0)),
            i!(atan2_rd(&1.0, &1.0), atan2_ru(&1.0, &-1.0))
        );
        assert_eq!(f(i!(0.0, 1.0), i!(-1.0, 1.0)), i!(0.0, next_up(PI)));
        assert_eq!(
            f(i!(-1.0), i!(-1.0, 1.0)),
            i!(atan2_rd(&-1.0, &-1.0), atan2_ru(&-1.0, &1.0))
        );
        assert_eq!(f(i!(-1.0, 0.0), i!(-1.0, 1.0)), whole);
        assert_eq!(f(Interval::entire(), Interval::entire()), whole);
    }
}
