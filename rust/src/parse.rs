use crate::{
    bound::Bound,
    interval::{Interval, IntervalError, IntervalErrorKind},
};
use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{char, digit0, digit1, one_of, space0},
    combinator::{all_consuming, map, map_opt, opt, recognize, value},
    error::VerboseError,
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};
use rug::{float::Round, Float, Integer, Rational};
use std::str::FromStr;

type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// The largest magnitude of the decimal exponent of a literal that is accepted.
const MAX_DECIMAL_EXP: i32 = 100_000;

/// An extended real number that appears in a literal.
#[derive(Clone, Debug, PartialEq, PartialOrd)]
enum Number {
    NegInfinity,
    Finite(Rational),
    Infinity,
}

impl Number {
    fn to_bound<T: Bound>(&self, round: Round) -> T {
        match self {
            Number::NegInfinity => T::neg_infinity(),
            Number::Finite(r) => {
                let (x, _) = Float::with_val_round(T::PREC, r, round);
                T::from_float_round(&x, round)
            }
            Number::Infinity => T::infinity(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Literal {
    Empty,
    Entire,
    Bounds(Number, Number),
}

/// A parsed interval literal, such as `[0.1, 2]`, `[1e-3]`, `-1.5`, `[empty]` or `[entire]`.
///
/// The numbers are kept exactly, so the literal can be converted to intervals
/// of any bound type.
#[derive(Clone, Debug, PartialEq)]
pub struct IntervalLiteral(Literal);

impl IntervalLiteral {
    /// Returns the tightest enclosure of the literal with bounds of type `T`.
    pub fn to_interval<T: Bound>(&self) -> Interval<T> {
        match &self.0 {
            Literal::Empty => Interval::empty(),
            Literal::Entire => Interval::entire(),
            Literal::Bounds(a, b) => {
                Interval::with_bounds(a.to_bound(Round::Down), b.to_bound(Round::Up))
            }
        }
    }
}

// Based on `inari::parse::parse_dec_float`.
fn parse_decimal(s: &str) -> Option<Rational> {
    fn pow(base: u32, exp: i32) -> Rational {
        let i = Integer::from(Integer::u_pow_u(base, exp.unsigned_abs()));
        let mut r = Rational::from(i);
        if exp < 0 {
            r.recip_mut();
        }
        r
    }

    let (mant, exp) = match s.find(|c| c == 'e' || c == 'E') {
        Some(k) => (&s[..k], s[k + 1..].parse::<i32>().ok()?),
        _ => (s, 0),
    };
    if exp.abs() > MAX_DECIMAL_EXP {
        return None;
    }
    let (neg, mant) = match mant.strip_prefix('-') {
        Some(m) => (true, m),
        _ => (false, mant.strip_prefix('+').unwrap_or(mant)),
    };

    let mut parts = mant.split('.');
    let int_part = parts.next()?;
    let frac_part = parts.next().unwrap_or("");

    // 123.456e1 -> 123456e-2 (ulp == 1e-2)
    let log_ulp = exp - frac_part.len() as i32;
    let ulp = pow(10, log_ulp);

    let i_str = [int_part, frac_part].concat();
    let i = Integer::from(Integer::parse_radix(i_str, 10).ok()?);
    let r = Rational::from(i) * ulp;
    Some(if neg { -r } else { r })
}

fn sign(i: &str) -> ParseResult<Option<char>> {
    opt(one_of("+-"))(i)
}

fn infinity(i: &str) -> ParseResult<Number> {
    map(
        pair(sign, alt((tag_no_case("infinity"), tag_no_case("inf")))),
        |(s, _)| {
            if s == Some('-') {
                Number::NegInfinity
            } else {
                Number::Infinity
            }
        },
    )(i)
}

fn decimal_literal(i: &str) -> ParseResult<&str> {
    recognize(tuple((
        sign,
        alt((
            // "12", "12." or "12.3"
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            // ".3"
            recognize(pair(char('.'), digit1)),
        )),
        opt(tuple((one_of("eE"), sign, digit1))),
    )))(i)
}

fn number(i: &str) -> ParseResult<Number> {
    alt((
        infinity,
        map_opt(decimal_literal, |s| parse_decimal(s).map(Number::Finite)),
    ))(i)
}

fn bounds(i: &str) -> ParseResult<Literal> {
    map(
        pair(
            number,
            opt(preceded(delimited(space0, char(','), space0), number)),
        ),
        |(a, b)| match b {
            Some(b) => Literal::Bounds(a, b),
            _ => Literal::Bounds(a.clone(), a),
        },
    )(i)
}

fn bracketed(i: &str) -> ParseResult<Literal> {
    delimited(
        terminated(char('['), space0),
        alt((
            value(Literal::Empty, tag_no_case("empty")),
            value(Literal::Entire, tag_no_case("entire")),
            bounds,
        )),
        preceded(space0, char(']')),
    )(i)
}

fn literal(i: &str) -> ParseResult<Literal> {
    alt((
        bracketed,
        map(number, |a| Literal::Bounds(a.clone(), a)),
    ))(i)
}

impl FromStr for IntervalLiteral {
    type Err = IntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (_, lit) = all_consuming(delimited(space0, literal, space0))(s).map_err(|_| {
            IntervalError {
                kind: IntervalErrorKind::InvalidSyntax,
            }
        })?;
        if let Literal::Bounds(a, b) = &lit {
            if a > b || *a == Number::Infinity || *b == Number::NegInfinity {
                return Err(IntervalError {
                    kind: IntervalErrorKind::InvalidBounds,
                });
            }
        }
        Ok(Self(lit))
    }
}

impl<T: Bound> FromStr for Interval<T> {
    type Err = IntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<IntervalLiteral>()?.to_interval())
    }
}
