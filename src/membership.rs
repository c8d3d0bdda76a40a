use serde::{Deserialize, Serialize};

use crate::error::{FuzzyError, Result};

/// Piecewise-linear membership function.
///
/// Stored as a trapezoid `(a, b, c, d)`: zero outside `[a, d]`, rising from `a` to `b`,
/// flat at one on `[b, c]`, falling from `c` to `d`. A triangle is the trapezoid with
/// `b == c`. When `a == b` (or `c == d`) the edge is a shoulder and the knot itself
/// has degree one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Breakpoints", into = "Breakpoints")]
pub struct MembershipFunction {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl MembershipFunction {
    pub fn triangular(a: f64, b: f64, c: f64) -> Result<Self> {
        Self::trapezoidal(a, b, b, c)
    }

    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        let finite = [a, b, c, d].iter().all(|p| p.is_finite());

        if !finite || a > b || b > c || c > d {
            return Err(FuzzyError::InvalidShape { a, b, c, d });
        }

        Ok(Self { a, b, c, d })
    }

    /// Membership degree of `x`, always in `[0, 1]`.
    pub fn degree(&self, x: f64) -> f64 {
        let Self { a, b, c, d } = *self;

        if x < a || x > d {
            0.
        } else if b <= x && x <= c {
            1.
        } else if x < b {
            // a <= x < b, so b > a
            ((x - a) / (b - a)).clamp(0., 1.)
        } else {
            // c < x <= d, so d > c
            ((d - x) / (d - c)).clamp(0., 1.)
        }
    }

    /// Closed interval outside of which the degree is zero.
    pub fn support(&self) -> (f64, f64) {
        (self.a, self.d)
    }

    /// Closed interval on which the degree is one.
    pub fn core(&self) -> (f64, f64) {
        (self.b, self.c)
    }

    pub fn is_triangular(&self) -> bool {
        self.b == self.c
    }

    /// Sample the function over a grid of points.
    pub fn sample(&self, points: impl IntoIterator<Item = f64>) -> Vec<f64> {
        points.into_iter().map(|x| self.degree(x)).collect()
    }
}

/// Wire form: `[a, b, c]` for triangles, `[a, b, c, d]` for trapezoids.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Breakpoints {
    Triangle(f64, f64, f64),
    Trapezoid(f64, f64, f64, f64),
}

impl TryFrom<Breakpoints> for MembershipFunction {
    type Error = FuzzyError;

    fn try_from(points: Breakpoints) -> Result<Self> {
        match points {
            Breakpoints::Triangle(a, b, c) => Self::triangular(a, b, c),
            Breakpoints::Trapezoid(a, b, c, d) => Self::trapezoidal(a, b, c, d),
        }
    }
}

impl From<MembershipFunction> for Breakpoints {
    fn from(mf: MembershipFunction) -> Self {
        if mf.is_triangular() {
            Breakpoints::Triangle(mf.a, mf.b, mf.d)
        } else {
            Breakpoints::Trapezoid(mf.a, mf.b, mf.c, mf.d)
        }
    }
}
