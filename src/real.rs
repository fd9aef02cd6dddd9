use dashu::base::SquareRoot;
use dashu::float::DBig;
use dashu::integer::IBig;

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::SimulationError;

/// Significant decimal digits carried by every [`Real`].
pub const PRECISION: usize = 50;

/// Argument halvings applied before the arctangent series.
const ATAN_HALVINGS: u32 = 8;

/// Leading and trailing digits of π·10^64, split to fit `u128`.
const PI_HIGH: u128 = 3141592653589793238462643383279502;
const PI_LOW: u128 = 8841971693993751058209749445923;
const PI_LOW_DIGITS: u32 = 31;
const PI_EXPONENT: isize = -64;

static PI: OnceLock<Real> = OnceLock::new();
static EPSILON: OnceLock<Real> = OnceLock::new();

/// A decimal floating-point scalar held at [`PRECISION`] significant digits.
///
/// All arithmetic between two `Real`s rounds half away from zero back to
/// [`PRECISION`] digits, so results never depend on the host's binary floats.
#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct Real(DBig);

impl Real {
    fn wrap(value: DBig) -> Self {
        Self(value.with_precision(PRECISION).value())
    }

    pub fn zero() -> Self {
        Self::from(0)
    }

    pub fn one() -> Self {
        Self::from(1)
    }

    /// `significand * 10^exponent`, exact.
    pub fn from_parts(significand: i64, exponent: isize) -> Self {
        Self::wrap(DBig::from_parts(IBig::from(significand), exponent))
    }

    /// Parses a decimal literal such as `"0.01"` or `"6.67430e-11"`.
    pub fn parse(literal: &str) -> Result<Self, SimulationError> {
        DBig::from_str(literal.trim())
            .map(Self::wrap)
            .map_err(|_| SimulationError::InvalidNumber(literal.to_string()))
    }

    /// π to [`PRECISION`] digits.
    pub fn pi() -> Self {
        PI.get_or_init(|| {
            let significand = IBig::from(PI_HIGH) * IBig::from(10u128.pow(PI_LOW_DIGITS)) + IBig::from(PI_LOW);
            Self::wrap(DBig::from_parts(significand, PI_EXPONENT))
        })
        .clone()
    }

    fn epsilon() -> Self {
        EPSILON
            .get_or_init(|| Self::from_parts(1, -(PRECISION as isize) - 5))
            .clone()
    }

    pub fn is_zero(&self) -> bool {
        self.0 == DBig::ZERO
    }

    pub fn is_positive(&self) -> bool {
        self.0 > DBig::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < DBig::ZERO
    }

    pub fn abs(&self) -> Self {
        if self.is_negative() { -self } else { self.clone() }
    }

    pub fn square(&self) -> Self {
        self * self
    }

    /// Square root; zero for zero input.
    ///
    /// The argument must not be negative.
    pub fn sqrt(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        Self::wrap(self.0.sqrt())
    }

    /// Four-quadrant arctangent of `y / x` in radians, in `(-π, π]`.
    ///
    /// Returns zero when both arguments are zero.
    pub fn atan2(y: &Real, x: &Real) -> Self {
        if x.is_zero() {
            let half_pi = Self::pi() / Self::from(2);
            return if y.is_positive() {
                half_pi
            } else if y.is_negative() {
                -half_pi
            } else {
                Self::zero()
            };
        }

        let angle = atan(&(y / x));
        if x.is_positive() {
            angle
        } else if y.is_negative() {
            angle - Self::pi()
        } else {
            angle + Self::pi()
        }
    }

    /// Converts radians to degrees.
    pub fn to_degrees(&self) -> Self {
        self * &Self::from(180) / Self::pi()
    }

    /// Nearest `f64`, for diagnostics only.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().value()
    }

    /// Renders the value with `digits` significant digits the way `%g` does:
    /// trailing zeros dropped, exponent form `d.ddde±NN` when the decimal
    /// exponent is below -4 or at least `digits`.
    pub fn to_general(&self, digits: usize) -> String {
        let digits = digits.clamp(1, PRECISION);
        let rounded = self.0.clone().with_precision(digits).value();
        let repr = rounded.repr();
        if *repr.significand() == IBig::ZERO {
            return "0".to_string();
        }

        let text = repr.significand().to_string();
        let (sign, mantissa) = match text.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", text.as_str()),
        };
        let mut exponent = repr.exponent();
        let mut mantissa = mantissa.to_string();
        while mantissa.len() > 1 && mantissa.ends_with('0') {
            mantissa.pop();
            exponent += 1;
        }

        let lead = exponent + mantissa.len() as isize - 1;
        if lead < -4 || lead >= digits as isize {
            let (first, rest) = mantissa.split_at(1);
            let fraction = if rest.is_empty() { String::new() } else { format!(".{rest}") };
            let exp_sign = if lead < 0 { '-' } else { '+' };
            format!("{sign}{first}{fraction}e{exp_sign}{:02}", lead.unsigned_abs())
        } else if lead >= 0 {
            let int_len = lead as usize + 1;
            if mantissa.len() <= int_len {
                format!("{sign}{mantissa}{}", "0".repeat(int_len - mantissa.len()))
            } else {
                let (int_part, frac_part) = mantissa.split_at(int_len);
                format!("{sign}{int_part}.{frac_part}")
            }
        } else {
            let zeros = "0".repeat((-lead - 1) as usize);
            format!("{sign}0.{zeros}{mantissa}")
        }
    }
}

/// Arctangent by repeated argument halving followed by the Taylor series.
fn atan(z: &Real) -> Real {
    let one = Real::one();
    if z.abs() > one {
        // atan(z) = ±π/2 - atan(1/z)
        let half_pi = Real::pi() / Real::from(2);
        let inner = atan(&(&one / z));
        return if z.is_positive() { half_pi - inner } else { -half_pi - inner };
    }

    let mut z = z.clone();
    for _ in 0..ATAN_HALVINGS {
        let root = (&one + &z.square()).sqrt();
        z = &z / &(&one + &root);
    }

    let z2 = z.square();
    let epsilon = Real::epsilon();
    let mut power = z.clone();
    let mut sum = z;
    let mut n: i64 = 1;
    loop {
        power = -(&power * &z2);
        let term = &power / &Real::from(2 * n + 1);
        if term.abs() < epsilon {
            break;
        }
        sum += term;
        n += 1;
    }

    sum * Real::from(1i64 << ATAN_HALVINGS)
}

impl From<i64> for Real {
    fn from(value: i64) -> Self {
        Self::from_parts(value, 0)
    }
}

impl FromStr for Real {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(digits) => f.write_str(&self.to_general(digits)),
            None => fmt::Display::fmt(&self.0, f),
        }
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<&Real> for &Real {
            type Output = Real;

            fn $method(self, rhs: &Real) -> Real {
                Real::wrap(&self.0 $op &rhs.0)
            }
        }

        impl $trait<Real> for Real {
            type Output = Real;

            fn $method(self, rhs: Real) -> Real {
                &self $op &rhs
            }
        }

        impl $trait<&Real> for Real {
            type Output = Real;

            fn $method(self, rhs: &Real) -> Real {
                &self $op rhs
            }
        }
    };
}

impl_binary_op!(Add, add, +);
impl_binary_op!(Sub, sub, -);
impl_binary_op!(Mul, mul, *);
impl_binary_op!(Div, div, /);

impl AddAssign<Real> for Real {
    fn add_assign(&mut self, rhs: Real) {
        *self = &*self + &rhs;
    }
}

impl AddAssign<&Real> for Real {
    fn add_assign(&mut self, rhs: &Real) {
        *self = &*self + rhs;
    }
}

impl SubAssign<Real> for Real {
    fn sub_assign(&mut self, rhs: Real) {
        *self = &*self - &rhs;
    }
}

impl SubAssign<&Real> for Real {
    fn sub_assign(&mut self, rhs: &Real) {
        *self = &*self - rhs;
    }
}

impl Neg for Real {
    type Output = Real;

    fn neg(self) -> Real {
        Real(-self.0)
    }
}

impl Neg for &Real {
    type Output = Real;

    fn neg(self) -> Real {
        Real(-self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: &Real, b: &Real, tolerance: &str) -> bool {
        (a - b).abs() < Real::parse(tolerance).unwrap()
    }

    #[test]
    fn parses_scientific_literals() {
        let g = Real::parse("6.67430e-11").unwrap();
        assert_eq!(g, Real::parse("0.0000000000667430").unwrap());
        assert!(Real::parse("six").is_err());
    }

    #[test]
    fn builds_from_parts() {
        assert_eq!(Real::from_parts(667_430, -16), Real::parse("6.67430e-11").unwrap());
        assert_eq!(Real::from_parts(1, -2), Real::parse("0.01").unwrap());
    }

    #[test]
    fn carries_fifty_digits() {
        let third = Real::one() / Real::from(3);
        let rendered = format!("{third}");
        let digits = rendered.chars().filter(|c| *c == '3').count();
        assert!(digits >= PRECISION, "{rendered}");
    }

    #[test]
    fn pi_has_fifty_correct_digits() {
        let expected = Real::parse("3.14159265358979323846264338327950288419716939937510").unwrap();
        assert!(close(&Real::pi(), &expected, "1e-49"), "{}", Real::pi());
        assert_eq!(Real::pi().to_general(6), "3.14159");
    }

    #[test]
    fn parses_through_from_str() {
        let dt: Real = "0.01".parse().unwrap();
        assert_eq!(dt, Real::from_parts(1, -2));
        assert!("0.0.1".parse::<Real>().is_err());
    }

    #[test]
    fn sqrt_of_perfect_squares_is_exact() {
        assert_eq!(Real::from(144).sqrt(), Real::from(12));
        assert_eq!(Real::zero().sqrt(), Real::zero());
        let two = Real::from(2).sqrt();
        assert!(close(&two.square(), &Real::from(2), "1e-48"));
    }

    #[test]
    fn atan2_covers_all_quadrants() {
        let one = Real::one();
        let pi = Real::pi();
        let four = Real::from(4);
        assert!(close(&Real::atan2(&one, &one), &(&pi / &four), "1e-45"));
        assert!(close(&Real::atan2(&one, &-&one), &(&pi * &Real::from(3) / &four), "1e-45"));
        assert!(close(&Real::atan2(&-&one, &-&one), &(-(&pi * &Real::from(3)) / four.clone()), "1e-45"));
        assert!(close(&Real::atan2(&-&one, &one), &(-(&pi / &four)), "1e-45"));
        assert_eq!(Real::atan2(&Real::zero(), &Real::zero()), Real::zero());
        assert_eq!(Real::atan2(&Real::zero(), &-&one), pi);
    }

    #[test]
    fn atan_handles_steep_slopes() {
        let angle = Real::atan2(&Real::from(1000), &Real::one()).to_degrees();
        let expected = Real::parse("89.942704239585499391002924625980590319890619697332").unwrap();
        assert!(close(&angle, &expected, "1e-40"), "{angle}");
    }

    #[test]
    fn general_format_matches_printf_g() {
        let cases = [
            ("0", "0"),
            ("-1", "-1"),
            ("1.5", "1.5"),
            ("100", "100"),
            ("123456", "123456"),
            ("1234567", "1.23457e+06"),
            ("0.0001", "0.0001"),
            ("0.00001", "1e-05"),
            ("-0.99999999999999594", "-1"),
            ("4.2285018995689254e-13", "4.2285e-13"),
            ("16.400758400529572", "16.4008"),
            ("0.012345678", "0.0123457"),
        ];
        for (input, expected) in cases {
            assert_eq!(Real::parse(input).unwrap().to_general(6), expected, "{input}");
        }
    }

    #[test]
    fn display_precision_selects_significant_digits() {
        let value = Real::parse("2.718281828").unwrap();
        assert_eq!(format!("{value:.3}"), "2.72");
    }
}
