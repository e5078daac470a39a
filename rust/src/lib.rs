#![allow(clippy::float_cmp)]

pub use self::{
    bound::{Bound, Extended, EXTENDED_PREC},
    consts::TrigConsts,
    interval::{Interval, IntervalError, IntervalErrorKind},
    inverse::SignSet,
    parse::IntervalLiteral,
    periodic::{Case, Periodic},
    quadrant::{quadrant, Classify, DirectModulo, IntervalDivision, Quadrant, QuadrantSpan},
    singular::Singular,
};

mod bound;
mod consts;
mod derived;
mod interval;
mod inverse;
mod parse;
mod periodic;
mod quadrant;
mod round;
mod singular;
