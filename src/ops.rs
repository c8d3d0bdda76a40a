use num::Float;
use serde::{Deserialize, Serialize};

use crate::math::interp;

/// And operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AndOp {
    #[default]
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
}

impl AndOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
            Self::DrasticProd => {
                if v == F::one() {
                    u
                } else if u == F::one() {
                    v
                } else {
                    F::zero()
                }
            },
        }
    }
}

/// Or operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl OrOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
            Self::DrasticSum => {
                if v == F::zero() {
                    u
                } else if u == F::zero() {
                    v
                } else {
                    F::one()
                }
            },
        }
    }
}

/// How a rule's firing strength shapes its consequent term.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplicationOp {
    /// Mamdani: clip the term at the firing strength
    #[default]
    Min,
    /// Larsen: scale the term by the firing strength
    Prod,
}

impl ImplicationOp {
    pub fn call<F: Float>(self, strength: F, membership: F) -> F {
        match self {
            Self::Min => F::min(strength, membership),
            Self::Prod => strength * membership,
        }
    }
}

/// Method for defuzzifcating the resulting membership function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefuzzificationOp {
    /// Center of Gravity over the sample points
    #[default]
    Centroid,
    /// Bisector of Area
    Bisector,
    /// Mean of the values for which the membership function is maximum
    MeanOfMaximum,
    /// Smallest value for which the membership function is maximum
    SmallestOfMaximum,
    /// Largest value for which the membership function is maximum
    LargestOfMaximum,
}

impl DefuzzificationOp {
    /// Crisp value of `membership` sampled at `universe`. `None` when the curve is
    /// identically zero (or the slices are empty / mismatched).
    pub fn call<F: Float>(self, universe: &[F], membership: &[F]) -> Option<F> {
        if universe.is_empty() || universe.len() != membership.len() {
            return None;
        }

        let maximum = membership.iter().copied().fold(F::zero(), F::max);

        if maximum <= F::zero() {
            return None;
        }

        let maxima = || {
            universe
                .iter()
                .copied()
                .zip(membership.iter().copied())
                .filter_map(move |(u, m)| if m == maximum { Some(u) } else { None })
        };

        match self {
            Self::Centroid => {
                let (num, den) = universe
                    .iter()
                    .zip(membership)
                    .fold((F::zero(), F::zero()), |(num, den), (&u, &m)| (num + u * m, den + m));

                Some(num / den)
            },
            Self::Bisector => {
                if universe.len() == 1 {
                    return Some(universe[0]);
                }

                let two = F::one() + F::one();
                let areas: Vec<F> = universe
                    .windows(2)
                    .zip(membership.windows(2))
                    .map(|(u, m)| (m[0] + m[1]) * (u[1] - u[0]) / two)
                    .collect();
                let target = areas.iter().copied().fold(F::zero(), |a, b| a + b) / two;
                let mut cum_area = F::zero();
                let mut i_area = 0;

                for (i, area) in areas.iter().copied().enumerate() {
                    cum_area = cum_area + area;
                    i_area = i;
                    if cum_area >= target {
                        break;
                    }
                }

                let xp = [cum_area - areas[i_area], cum_area];
                let fp = [universe[i_area], universe[i_area + 1]];

                interp(Some(target), xp.into_iter().zip(fp)).into_iter().next()
            },
            Self::MeanOfMaximum => {
                let (len, sum) = maxima().fold((0usize, F::zero()), |(len, sum), u| (len + 1, sum + u));

                <F as num::NumCast>::from(len).map(|len| sum / len)
            },
            Self::SmallestOfMaximum => maxima().reduce(F::min),
            Self::LargestOfMaximum => maxima().reduce(F::max),
        }
    }
}
