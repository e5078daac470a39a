use crate::bound::{
    add_round, div_round, max_bound, min_bound, mul_round, sub_round, Bound, Extended,
};
use rug::{
    float::{Round, Special},
    Integer,
};
use std::{
    error, fmt,
    ops::{Add, Div, Mul, Neg, Sub},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IntervalErrorKind {
    InvalidBounds,
    InvalidSyntax,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IntervalError {
    pub kind: IntervalErrorKind,
}

impl fmt::Display for IntervalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            IntervalErrorKind::InvalidBounds => write!(f, "the bounds do not form an interval"),
            IntervalErrorKind::InvalidSyntax => write!(f, "invalid interval literal"),
        }
    }
}

impl error::Error for IntervalError {}

/// A closed interval of the extended real line, or the empty set.
///
/// The bounds satisfy `inf ≤ sup`, `inf ≠ +∞` and `sup ≠ −∞`. Infinite bounds are not members
/// of the interval, thus `[1, +∞]` stands for the set {x ∈ ℝ | 1 ≤ x}.
/// The empty interval is stored as `[+∞, −∞]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Interval<T> {
    inf: T,
    sup: T,
}

impl<T: Bound> Interval<T> {
    /// Creates an interval `[inf, sup]`.
    ///
    /// Returns an error if either bound is NaN, `inf > sup`, `inf = +∞` or `sup = −∞`.
    pub fn try_new(inf: T, sup: T) -> Result<Self, IntervalError> {
        if inf.is_nan()
            || sup.is_nan()
            || inf > sup
            || inf == T::infinity()
            || sup == T::neg_infinity()
        {
            Err(IntervalError {
                kind: IntervalErrorKind::InvalidBounds,
            })
        } else {
            Ok(Self { inf, sup })
        }
    }

    /// Creates an interval `[inf, sup]`, or the empty interval if the bounds are invalid.
    pub(crate) fn with_bounds(inf: T, sup: T) -> Self {
        Self::try_new(inf, sup).unwrap_or_else(|_| Self::empty())
    }

    /// Creates the interval `[x, x]`, or the empty interval if `x` is not finite.
    pub fn point(x: T) -> Self {
        Self::with_bounds(x.clone(), x)
    }

    /// Returns the tightest enclosure of the integer `n`.
    pub(crate) fn from_integer(n: &Integer) -> Self {
        Self::with_bounds(
            T::from_integer_round(n, Round::Down),
            T::from_integer_round(n, Round::Up),
        )
    }

    pub fn empty() -> Self {
        Self {
            inf: T::infinity(),
            sup: T::neg_infinity(),
        }
    }

    pub fn entire() -> Self {
        Self {
            inf: T::neg_infinity(),
            sup: T::infinity(),
        }
    }

    /// Returns the lower bound. It is +∞ if `self` is empty.
    pub fn inf(&self) -> &T {
        &self.inf
    }

    /// Returns the upper bound. It is −∞ if `self` is empty.
    pub fn sup(&self) -> &T {
        &self.sup
    }

    pub fn is_empty(&self) -> bool {
        self.inf > self.sup
    }

    pub fn is_entire(&self) -> bool {
        self.inf == T::neg_infinity() && self.sup == T::infinity()
    }

    pub fn is_singleton(&self) -> bool {
        self.inf == self.sup
    }

    /// Returns `true` if `self` is `[0, 0]`.
    pub fn is_zero(&self) -> bool {
        self.inf.is_zero() && self.sup.is_zero()
    }

    pub fn contains(&self, x: &T) -> bool {
        self.inf <= *x && *x <= self.sup
    }

    pub fn subset(&self, rhs: &Self) -> bool {
        self.is_empty() || rhs.inf <= self.inf && self.sup <= rhs.sup
    }

    pub fn disjoint(&self, rhs: &Self) -> bool {
        self.is_empty() || rhs.is_empty() || self.sup < rhs.inf || rhs.sup < self.inf
    }

    pub fn intersection(&self, rhs: &Self) -> Self {
        if self.is_empty() || rhs.is_empty() {
            return Self::empty();
        }
        Self::with_bounds(
            max_bound(self.inf.clone(), rhs.inf.clone()),
            min_bound(self.sup.clone(), rhs.sup.clone()),
        )
    }

    pub fn convex_hull(&self, rhs: &Self) -> Self {
        if self.is_empty() {
            return rhs.clone();
        }
        if rhs.is_empty() {
            return self.clone();
        }
        Self::with_bounds(
            min_bound(self.inf.clone(), rhs.inf.clone()),
            max_bound(self.sup.clone(), rhs.sup.clone()),
        )
    }

    /// Returns the width of `self`, rounded up. It is NaN if `self` is empty.
    pub fn wid(&self) -> T {
        if self.is_empty() {
            return T::from_special(Special::Nan);
        }
        sub_round(&self.sup, &self.inf, Round::Up)
    }

    /// Returns an enclosure of {1/x | x ∈ `self`, x ≠ 0}.
    pub fn recip(&self) -> Self {
        if self.is_empty() || self.is_zero() {
            return Self::empty();
        }
        let zero = T::zero();
        if self.inf < zero && self.sup > zero {
            return Self::entire();
        }
        let one = T::one();
        let inf = if self.sup.is_zero() {
            T::neg_infinity()
        } else {
            div_round(&one, &self.sup, Round::Down)
        };
        let sup = if self.inf.is_zero() {
            T::infinity()
        } else {
            div_round(&one, &self.inf, Round::Up)
        };
        Self::with_bounds(inf, sup)
    }

    /// Returns an enclosure of `self` with bounds of type `U`, rounding outward.
    pub fn convert<U: Bound>(&self) -> Interval<U> {
        if self.is_empty() {
            return Interval::empty();
        }
        Interval::with_bounds(
            U::from_float_round(&self.inf.to_float(), Round::Down),
            U::from_float_round(&self.sup.to_float(), Round::Up),
        )
    }

    /// Returns `self` with [`Extended`] bounds. Exact whenever `T` is `f64` or [`Extended`].
    pub fn to_extended(&self) -> Interval<Extended> {
        self.convert()
    }

    /// Returns an enclosure of `x` with bounds of type `T`, rounding outward.
    pub fn from_extended(x: &Interval<Extended>) -> Self {
        x.convert()
    }

    /// Evaluates `f` at [`Extended`] precision and rounds the result outward to `T`.
    pub(crate) fn via_extended<F>(&self, f: F) -> Self
    where
        F: FnOnce(&Interval<Extended>) -> Interval<Extended>,
    {
        Self::from_extended(&f(&self.to_extended()))
    }
}

impl<T: Bound> Neg for &Interval<T> {
    type Output = Interval<T>;

    fn neg(self) -> Self::Output {
        if self.is_empty() {
            return Interval::empty();
        }
        Interval {
            inf: self.sup.negated(),
            sup: self.inf.negated(),
        }
    }
}

impl<T: Bound> Neg for Interval<T> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl<T: Bound> Add for &Interval<T> {
    type Output = Interval<T>;

    fn add(self, rhs: Self) -> Self::Output {
        if self.is_empty() || rhs.is_empty() {
            return Interval::empty();
        }
        Interval::with_bounds(
            add_round(&self.inf, &rhs.inf, Round::Down),
            add_round(&self.sup, &rhs.sup, Round::Up),
        )
    }
}

impl<T: Bound> Sub for &Interval<T> {
    type Output = Interval<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        if self.is_empty() || rhs.is_empty() {
            return Interval::empty();
        }
        Interval::with_bounds(
            sub_round(&self.inf, &rhs.sup, Round::Down),
            sub_round(&self.sup, &rhs.inf, Round::Up),
        )
    }
}

impl<T: Bound> Mul for &Interval<T> {
    type Output = Interval<T>;

    fn mul(self, rhs: Self) -> Self::Output {
        if self.is_empty() || rhs.is_empty() {
            return Interval::empty();
        }
        let pairs = [
            (&self.inf, &rhs.inf),
            (&self.inf, &rhs.sup),
            (&self.sup, &rhs.inf),
            (&self.sup, &rhs.sup),
        ];
        let inf = pairs
            .iter()
            .map(|(x, y)| mul_round(*x, *y, Round::Down))
            .fold(T::infinity(), min_bound);
        let sup = pairs
            .iter()
            .map(|(x, y)| mul_round(*x, *y, Round::Up))
            .fold(T::neg_infinity(), max_bound);
        Interval::with_bounds(inf, sup)
    }
}

impl<T: Bound> Div for &Interval<T> {
    type Output = Interval<T>;

    fn div(self, rhs: Self) -> Self::Output {
        if self.is_empty() || rhs.is_empty() {
            return Interval::empty();
        }
        if rhs.contains(&T::zero()) {
            return self * &rhs.recip();
        }
        let pairs = [
            (&self.inf, &rhs.inf),
            (&self.inf, &rhs.sup),
            (&self.sup, &rhs.inf),
            (&self.sup, &rhs.sup),
        ];
        // ±∞/±∞ is NaN; the limits it stands for are attained at the other pairs.
        let inf = pairs
            .iter()
            .map(|(x, y)| div_round(*x, *y, Round::Down))
            .filter(|q| !q.is_nan())
            .fold(T::infinity(), min_bound);
        let sup = pairs
            .iter()
            .map(|(x, y)| div_round(*x, *y, Round::Up))
            .filter(|q| !q.is_nan())
            .fold(T::neg_infinity(), max_bound);
        Interval::with_bounds(inf, sup)
    }
}

macro_rules! impl_owned_op {
    ($Op:ident, $op:ident) => {
        impl<T: Bound> $Op for Interval<T> {
            type Output = Self;

            fn $op(self, rhs: Self) -> Self::Output {
                (&self).$op(&rhs)
            }
        }
    };
}

impl_owned_op!(Add, add);
impl_owned_op!(Sub, sub);
impl_owned_op!(Mul, mul);
impl_owned_op!(Div, div);

impl<T: Bound> fmt::Display for Interval<T> {
    /// Formats the bounds in decimal, rounding outward.
    /// The precision of the formatter, if any, gives the number of significant digits.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "[empty]");
        }
        if self.is_entire() {
            return write!(f, "[entire]");
        }
        let digits = f.precision().map(|d| d.max(2));
        let inf = self.inf.to_float().to_string_radix_round(10, digits, Round::Down);
        let sup = self.sup.to_float().to_string_radix_round(10, digits, Round::Up);
        write!(f, "[{}, {}]", inf, sup)
    }
}

impl From<inari::Interval> for Interval<f64> {
    fn from(x: inari::Interval) -> Self {
        if x.is_empty() {
            Self::empty()
        } else {
            Self::with_bounds(x.inf(), x.sup())
        }
    }
}

impl From<Interval<f64>> for inari::Interval {
    fn from(x: Interval<f64>) -> Self {
        inari::interval!(x.inf, x.sup).unwrap_or(inari::Interval::EMPTY)
    }
}
