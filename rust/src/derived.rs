//! Functions evaluated with the precision of [`Extended`](crate::Extended) for every bound type.

use crate::{bound::Bound, interval::Interval, inverse::atan2_impl, singular::cot_extended};

impl<T: Bound> Interval<T> {
    pub fn cot(&self) -> Self {
        self.via_extended(cot_extended)
    }

    /// Returns an enclosure of 1/sin(x).
    pub fn csc(&self) -> Self {
        self.via_extended(|x| x.sin().recip())
    }

    /// Returns an enclosure of 1/cos(x).
    pub fn sec(&self) -> Self {
        self.via_extended(|x| x.cos().recip())
    }

    /// Returns an enclosure of atan2(`self`, `x`), the angle of the points (x', y') with
    /// x' ∈ `x` and y' ∈ `self` other than the origin, in `[−π, π]`.
    pub fn atan2(&self, x: &Self) -> Self {
        let x = x.to_extended();
        self.via_extended(|y| atan2_impl(y, &x))
    }
}
