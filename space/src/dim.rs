use crate::errors::{Result, SpaceError};
use crate::value::{Kind, Value};
use ndarray_rand::rand::Rng;
use ndarray_rand::rand_distr::{Distribution, Uniform};

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Absolute tolerance used for structural equality of numeric bounds
const EQ_TOLERANCE: f64 = 1e-8;

/// Sampling distribution of a [`Dimension::Real`] dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub enum Prior {
    /// Sample uniformly in `[low, high)`
    Uniform,
    /// Sample `10^u` with `u` uniform in `[log10(low), log10(high))`
    LogUniform,
}

/// Warping applied on top of the prior scale of a [`Dimension::Real`]
/// dimension when projecting to the numeric representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub enum Warping {
    /// Keep the prior scale: identity for a uniform prior, `log10` for a
    /// log-uniform one
    Natural,
    /// Additionally rescale the prior scale affinely to `[0, 1]`
    Hypercube,
}

/// Bounds of a dimension in original representation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub enum DimBounds {
    /// Continuous interval
    Real(f64, f64),
    /// Inclusive integer interval
    Integer(i64, i64),
    /// Admissible category labels
    Categories(Vec<String>),
}

/// A single bounded search space variable.
///
/// Variants are public to allow exhaustive pattern matching; use the
/// checked constructors ([`Dimension::real`], [`Dimension::integer`],
/// [`Dimension::categorical`], ...) to build valid instances.
/// [`crate::Space::new`] re-checks every dimension it is given, so a
/// hand-built invalid variant is rejected at space construction.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub enum Dimension {
    /// Continuous variable in `[low, high)`
    Real {
        /// Lower bound (inclusive)
        low: f64,
        /// Upper bound (exclusive for the uniform prior)
        high: f64,
        /// Sampling distribution
        prior: Prior,
        /// Warped representation scaling
        warping: Warping,
    },
    /// Integer variable in `low..=high`
    Integer {
        /// Lower bound (inclusive)
        low: i64,
        /// Upper bound (inclusive)
        high: i64,
    },
    /// Categorical variable over an ordered set of unique labels
    Categorical {
        /// Category labels, order defines the one-hot encoding
        categories: Vec<String>,
        /// Prior probability per category, summing to one
        weights: Vec<f64>,
    },
}

impl Dimension {
    /// Continuous dimension with a uniform prior and natural warping
    pub fn real(low: f64, high: f64) -> Result<Self> {
        Self::real_with(low, high, Prior::Uniform, Warping::Natural)
    }

    /// Continuous dimension with a log-uniform prior and natural warping,
    /// requires `0 < low < high`
    pub fn real_log(low: f64, high: f64) -> Result<Self> {
        Self::real_with(low, high, Prior::LogUniform, Warping::Natural)
    }

    /// Continuous dimension with explicit prior and warping
    pub fn real_with(low: f64, high: f64, prior: Prior, warping: Warping) -> Result<Self> {
        let dim = Dimension::Real {
            low,
            high,
            prior,
            warping,
        };
        dim.check()?;
        Ok(dim)
    }

    /// Integer dimension over `low..=high`
    pub fn integer(low: i64, high: i64) -> Result<Self> {
        let dim = Dimension::Integer { low, high };
        dim.check()?;
        Ok(dim)
    }

    /// Categorical dimension with equally likely categories
    pub fn categorical<S: Into<String>, I: IntoIterator<Item = S>>(categories: I) -> Result<Self> {
        let categories: Vec<String> = categories.into_iter().map(Into::into).collect();
        let n = categories.len().max(1);
        let dim = Dimension::Categorical {
            weights: vec![1. / n as f64; categories.len()],
            categories,
        };
        dim.check()?;
        Ok(dim)
    }

    /// Categorical dimension with explicit prior probabilities, one weight
    /// per category, summing to one
    pub fn categorical_with_weights<S: Into<String>, I: IntoIterator<Item = S>>(
        categories: I,
        weights: Vec<f64>,
    ) -> Result<Self> {
        let dim = Dimension::Categorical {
            categories: categories.into_iter().map(Into::into).collect(),
            weights,
        };
        dim.check()?;
        Ok(dim)
    }

    /// Validate the defining parameters of this dimension
    pub fn check(&self) -> Result<()> {
        match self {
            Dimension::Real {
                low, high, prior, ..
            } => {
                if !low.is_finite() || !high.is_finite() || low >= high {
                    return Err(SpaceError::InvalidDimension(format!(
                        "real bounds must verify low < high, got [{low}, {high}]"
                    )));
                }
                if *prior == Prior::LogUniform && *low <= 0. {
                    return Err(SpaceError::InvalidDimension(format!(
                        "log-uniform prior requires strictly positive bounds, got [{low}, {high}]"
                    )));
                }
                Ok(())
            }
            Dimension::Integer { low, high } => {
                if low >= high {
                    return Err(SpaceError::InvalidDimension(format!(
                        "integer bounds must verify low < high, got [{low}, {high}]"
                    )));
                }
                Ok(())
            }
            Dimension::Categorical {
                categories,
                weights,
            } => {
                if categories.is_empty() {
                    return Err(SpaceError::InvalidDimension(
                        "categories must not be empty".to_string(),
                    ));
                }
                for (i, cat) in categories.iter().enumerate() {
                    if categories[..i].contains(cat) {
                        return Err(SpaceError::InvalidDimension(format!(
                            "duplicated category '{cat}'"
                        )));
                    }
                }
                if weights.len() != categories.len() {
                    return Err(SpaceError::InvalidDimension(format!(
                        "expected {} weights, got {}",
                        categories.len(),
                        weights.len()
                    )));
                }
                if weights.iter().any(|w| *w < 0.) {
                    return Err(SpaceError::InvalidDimension(
                        "weights must be non-negative".to_string(),
                    ));
                }
                let total: f64 = weights.iter().sum();
                if (total - 1.).abs() > EQ_TOLERANCE {
                    return Err(SpaceError::InvalidDimension(format!(
                        "weights must sum to 1, got {total}"
                    )));
                }
                Ok(())
            }
        }
    }

    /// The kind of this dimension
    pub fn kind(&self) -> Kind {
        match self {
            Dimension::Real { .. } => Kind::Real,
            Dimension::Integer { .. } => Kind::Integer,
            Dimension::Categorical { .. } => Kind::Categorical,
        }
    }

    /// Width of this dimension in original representation
    pub fn size(&self) -> usize {
        1
    }

    /// Width of this dimension in warped representation: one column for
    /// numeric dimensions, one column per category for categorical ones,
    /// collapsed to a single column for exactly two categories
    pub fn transformed_size(&self) -> usize {
        match self {
            Dimension::Real { .. } | Dimension::Integer { .. } => 1,
            Dimension::Categorical { categories, .. } => {
                if categories.len() == 2 {
                    1
                } else {
                    categories.len()
                }
            }
        }
    }

    /// Bounds in original representation
    pub fn bounds(&self) -> DimBounds {
        match self {
            Dimension::Real { low, high, .. } => DimBounds::Real(*low, *high),
            Dimension::Integer { low, high } => DimBounds::Integer(*low, *high),
            Dimension::Categorical { categories, .. } => {
                DimBounds::Categories(categories.clone())
            }
        }
    }

    /// Per-column `(lower, upper)` bounds in warped representation,
    /// `transformed_size` entries
    pub fn transformed_bounds(&self) -> Vec<(f64, f64)> {
        match self {
            Dimension::Real {
                low,
                high,
                prior,
                warping,
            } => {
                let bounds = match (warping, prior) {
                    (Warping::Hypercube, _) => (0., 1.),
                    (Warping::Natural, Prior::Uniform) => (*low, *high),
                    (Warping::Natural, Prior::LogUniform) => (low.log10(), high.log10()),
                };
                vec![bounds]
            }
            Dimension::Integer { low, high } => vec![(*low as f64, *high as f64)],
            Dimension::Categorical { .. } => vec![(0., 1.); self.transformed_size()],
        }
    }

    /// Whether `value` belongs to this dimension: matching kind and within
    /// bounds (closed interval for numeric kinds, membership for categories)
    pub fn contains(&self, value: &Value) -> bool {
        match (self, value) {
            (Dimension::Real { low, high, .. }, Value::Real(v)) => *low <= *v && *v <= *high,
            (Dimension::Integer { low, high }, Value::Int(v)) => *low <= *v && *v <= *high,
            (Dimension::Categorical { categories, .. }, Value::Cat(v)) => categories.contains(v),
            _ => false,
        }
    }

    /// Draw `n` independent values from this dimension's prior
    pub fn rvs<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Value> {
        (0..n).map(|_| self.sample_one(rng)).collect()
    }

    fn sample_one<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        match self {
            Dimension::Real {
                low,
                high,
                prior: Prior::Uniform,
                ..
            } => Value::Real(rng.sample(Uniform::new(*low, *high))),
            Dimension::Real {
                low,
                high,
                prior: Prior::LogUniform,
                ..
            } => {
                let u = rng.sample(Uniform::new(low.log10(), high.log10()));
                Value::Real(10f64.powf(u))
            }
            Dimension::Integer { low, high } => {
                Value::Int(rng.sample(Uniform::new_inclusive(*low, *high)))
            }
            Dimension::Categorical {
                categories,
                weights,
            } => {
                let u: f64 = Uniform::new(0., 1.).sample(rng);
                let mut acc = 0.;
                for (cat, w) in categories.iter().zip(weights.iter()) {
                    acc += w;
                    if u < acc {
                        return Value::Cat(cat.clone());
                    }
                }
                // weights sum to one, only reachable through rounding
                Value::Cat(categories[categories.len() - 1].clone())
            }
        }
    }

    /// Project `value` to its warped representation, `transformed_size`
    /// columns appended to `out`
    pub(crate) fn transform_into(&self, value: &Value, out: &mut Vec<f64>) -> Result<()> {
        match (self, value) {
            (
                Dimension::Real {
                    low,
                    high,
                    prior,
                    warping,
                },
                Value::Real(v),
            ) => {
                let vt = match (warping, prior) {
                    (Warping::Natural, Prior::Uniform) => *v,
                    (Warping::Natural, Prior::LogUniform) => v.log10(),
                    (Warping::Hypercube, Prior::Uniform) => (v - low) / (high - low),
                    (Warping::Hypercube, Prior::LogUniform) => {
                        (v.log10() - low.log10()) / (high.log10() - low.log10())
                    }
                };
                out.push(vt);
                Ok(())
            }
            (Dimension::Integer { .. }, Value::Int(v)) => {
                out.push(*v as f64);
                Ok(())
            }
            (Dimension::Categorical { categories, .. }, Value::Cat(v)) => {
                let index = categories.iter().position(|c| c == v).ok_or_else(|| {
                    SpaceError::InvalidPoint(format!("unknown category '{v}'"))
                })?;
                if categories.len() == 2 {
                    out.push(index as f64);
                } else {
                    out.extend((0..categories.len()).map(|i| if i == index { 1. } else { 0. }));
                }
                Ok(())
            }
            _ => Err(SpaceError::InvalidPoint(format!(
                "expected a {} value, got {value:?}",
                self.kind()
            ))),
        }
    }

    /// Recover the original representation from a warped block of
    /// `transformed_size` columns
    pub(crate) fn inverse_transform_block(&self, block: &[f64]) -> Result<Value> {
        if block.len() != self.transformed_size() {
            return Err(SpaceError::ShapeMismatch(format!(
                "expected a block of {} columns, got {}",
                self.transformed_size(),
                block.len()
            )));
        }
        match self {
            Dimension::Real {
                low,
                high,
                prior,
                warping,
            } => {
                let vt = block[0];
                let v = match (warping, prior) {
                    (Warping::Natural, Prior::Uniform) => vt,
                    (Warping::Natural, Prior::LogUniform) => 10f64.powf(vt),
                    (Warping::Hypercube, Prior::Uniform) => low + vt * (high - low),
                    (Warping::Hypercube, Prior::LogUniform) => {
                        10f64.powf(low.log10() + vt * (high.log10() - low.log10()))
                    }
                };
                Ok(Value::Real(v))
            }
            Dimension::Integer { .. } => Ok(Value::Int(block[0].round() as i64)),
            Dimension::Categorical { categories, .. } => {
                let index = if categories.len() == 2 {
                    usize::from(block[0] >= 0.5)
                } else {
                    // argmax over the one-hot block
                    block
                        .iter()
                        .enumerate()
                        .max_by(|a, b| a.1.total_cmp(b.1))
                        .map(|(i, _)| i)
                        .unwrap_or(0)
                };
                Ok(Value::Cat(categories[index].clone()))
            }
        }
    }
}

/// Structural value equality with floating tolerance on numeric bounds
impl PartialEq for Dimension {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Dimension::Real {
                    low,
                    high,
                    prior,
                    warping,
                },
                Dimension::Real {
                    low: olow,
                    high: ohigh,
                    prior: oprior,
                    warping: owarping,
                },
            ) => {
                (low - olow).abs() <= EQ_TOLERANCE
                    && (high - ohigh).abs() <= EQ_TOLERANCE
                    && prior == oprior
                    && warping == owarping
            }
            (
                Dimension::Integer { low, high },
                Dimension::Integer {
                    low: olow,
                    high: ohigh,
                },
            ) => low == olow && high == ohigh,
            (
                Dimension::Categorical {
                    categories,
                    weights,
                },
                Dimension::Categorical {
                    categories: ocategories,
                    weights: oweights,
                },
            ) => {
                categories == ocategories
                    && weights.len() == oweights.len()
                    && weights
                        .iter()
                        .zip(oweights.iter())
                        .all(|(a, b)| (a - b).abs() <= EQ_TOLERANCE)
            }
            _ => false,
        }
    }
}
