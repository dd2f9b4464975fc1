//! Number: the single numeric tag of the language
//!
//! Integers and fractions are stored as exact `BigRational`s, so `+` and `-`
//! never lose precision. Complex values keep rational parts and collapse back
//! to `Rational` whenever the imaginary part becomes zero.

use num_bigint::BigInt;
use num_complex::Complex;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// Exact rational (integers have denominator 1)
    Rational(BigRational),
    /// Complex number with exact rational parts
    Complex(Complex<BigRational>),
}

impl Number {
    pub fn from_integer(n: impl Into<BigInt>) -> Self {
        Number::Rational(BigRational::from_integer(n.into()))
    }

    pub fn zero() -> Self {
        Number::Rational(BigRational::zero())
    }

    pub fn one() -> Self {
        Number::Rational(BigRational::one())
    }

    /// Build a complex number, collapsing to `Rational` when `im` is zero
    pub fn complex(re: BigRational, im: BigRational) -> Self {
        Number::Complex(Complex::new(re, im)).normalize()
    }

    /// Parse a NUMBER token payload such as `23`, `6.5` or `.5`
    ///
    /// A leading `-` is accepted so input lines like `-3` parse as numbers.
    /// Returns `None` for anything that is not a plain decimal literal.
    pub fn parse_literal(text: &str) -> Option<Self> {
        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }

        let digits = format!("{}{}", int_part, frac_part);
        let numerator: BigInt = digits.parse().ok()?;
        let denominator = num_traits::pow(BigInt::from(10), frac_part.len());
        let value = BigRational::new(numerator, denominator);
        Some(Number::Rational(if negative { -value } else { value }))
    }

    /// Convert from a float, exactly (every finite f64 is a dyadic rational)
    pub fn from_f64(value: f64) -> Option<Self> {
        BigRational::from_float(value).map(Number::Rational)
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Number::Rational(r) => r.is_zero(),
            Number::Complex(c) => c.re.is_zero() && c.im.is_zero(),
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Rational(r) if r.is_integer())
    }

    /// The value as a repetition count, if it is an integer that fits in i64
    pub fn as_count(&self) -> Option<i64> {
        match self {
            Number::Rational(r) if r.is_integer() => r.to_integer().to_i64(),
            _ => None,
        }
    }

    pub fn as_rational(&self) -> Option<&BigRational> {
        match self {
            Number::Rational(r) => Some(r),
            Number::Complex(_) => None,
        }
    }

    pub fn to_f64(&self) -> Option<f64> {
        self.as_rational().and_then(|r| r.to_f64())
    }

    fn to_complex(&self) -> Complex<BigRational> {
        match self {
            Number::Rational(r) => Complex::new(r.clone(), BigRational::zero()),
            Number::Complex(c) => c.clone(),
        }
    }

    fn normalize(self) -> Self {
        match self {
            Number::Complex(c) if c.im.is_zero() => Number::Rational(c.re),
            other => other,
        }
    }

    pub fn add(&self, other: &Number) -> Number {
        match (self, other) {
            (Number::Rational(a), Number::Rational(b)) => Number::Rational(a + b),
            _ => Number::Complex(self.to_complex() + other.to_complex()).normalize(),
        }
    }

    pub fn sub(&self, other: &Number) -> Number {
        match (self, other) {
            (Number::Rational(a), Number::Rational(b)) => Number::Rational(a - b),
            _ => Number::Complex(self.to_complex() - other.to_complex()).normalize(),
        }
    }

    /// Logarithm of `self` in base `base`
    ///
    /// Exact when an integer power of the base equals the value; otherwise
    /// computed in floating point and converted back exactly.
    pub fn log(&self, base: &Number) -> Result<Number, String> {
        let (value, base) = match (self.as_rational(), base.as_rational()) {
            (Some(v), Some(b)) => (v, b),
            _ => return Err("logarithm of a complex number".to_string()),
        };
        if !value.is_positive() {
            return Err(format!("logarithm of non-positive value {}", value));
        }
        if !base.is_positive() || base.is_one() {
            return Err(format!("invalid logarithm base {}", base));
        }
        let approx = match (value.to_f64(), base.to_f64()) {
            (Some(v), Some(b)) => v.ln() / b.ln(),
            _ => return Err("operands out of floating range".to_string()),
        };
        if let Some(k) = exact_log(value, base, approx) {
            return Ok(Number::from_integer(k));
        }
        Number::from_f64(approx).ok_or_else(|| format!("non-finite result {}", approx))
    }
}

/// Integer `k` with `base^k == value`, checked only at the rounded estimate
///
/// `base` must be positive and not 1. A reduced fraction whose larger part
/// has `b` bits, raised to `k`, has at least `(b - 1) * |k|` bits, so
/// estimates too large to match are rejected before any power is computed.
fn exact_log(value: &BigRational, base: &BigRational, estimate: f64) -> Option<i64> {
    let k = estimate.round();
    if !k.is_finite() || k.abs() > f64::from(i32::MAX) {
        return None;
    }
    let k = k as i32;
    let base_bits = base.numer().bits().max(base.denom().bits());
    let value_bits = value.numer().bits().max(value.denom().bits());
    if u64::from(k.unsigned_abs()).saturating_mul(base_bits - 1) > value_bits {
        return None;
    }
    (&base.pow(k) == value).then_some(i64::from(k))
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::from_integer(n)
    }
}

impl From<BigRational> for Number {
    fn from(r: BigRational) -> Self {
        Number::Rational(r)
    }
}

fn fmt_rational(r: &BigRational, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if r.is_integer() {
        write!(f, "{}", r.numer())
    } else {
        write!(f, "{}/{}", r.numer(), r.denom())
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Rational(r) => fmt_rational(r, f),
            Number::Complex(c) => {
                fmt_rational(&c.re, f)?;
                if c.im.is_negative() {
                    write!(f, "-")?;
                    fmt_rational(&c.im.abs(), f)?;
                } else {
                    write!(f, "+")?;
                    fmt_rational(&c.im, f)?;
                }
                write!(f, "i")
            }
        }
    }
}
