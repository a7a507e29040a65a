use crate::checks::check_constraints;
use crate::constraint::{Constraint, Region};
use crate::errors::{ConstraintError, Result};
use log::debug;
use ndarray_rand::rand::Rng;
use serde::{Deserialize, Serialize};
use sobox_space::{Point, Space, Value};

/// Attempts per requested sample before the rejection sampler gives up
const MAX_SAMPLE_ATTEMPTS: usize = 10_000;

/// An ordered set of [`Constraint`]s validated against one [`Space`].
///
/// Constraints are grouped per dimension at construction: at most one
/// `Single` pin, the union of `Inclusive` regions, the intersection of
/// `Exclusive` exclusions; `Sum` and `Conditional` constraints are kept in
/// a flat list. A sample is admissible when every group accepts it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    space: Space,
    constraints: Vec<Constraint>,
    single: Vec<Option<Value>>,
    inclusive: Vec<Vec<Region>>,
    exclusive: Vec<Vec<Region>>,
    compound: Vec<Constraint>,
}

impl Constraints {
    /// Aggregate `constraints` against `space`, validating every
    /// declaration (see [`check_constraints`])
    pub fn new(constraints: Vec<Constraint>, space: Space) -> Result<Self> {
        check_constraints(&space, &constraints)?;

        let n = space.n_dims();
        let mut single = vec![None; n];
        let mut inclusive = vec![vec![]; n];
        let mut exclusive = vec![vec![]; n];
        let mut compound = vec![];
        for constraint in &constraints {
            match constraint {
                Constraint::Single { dim, value } => single[*dim] = Some(value.clone()),
                Constraint::Inclusive { dim, region } => inclusive[*dim].push(region.clone()),
                Constraint::Exclusive { dim, region } => exclusive[*dim].push(region.clone()),
                Constraint::Sum { .. } | Constraint::Conditional { .. } => {
                    compound.push(constraint.clone())
                }
            }
        }

        Ok(Constraints {
            space,
            constraints,
            single,
            inclusive,
            exclusive,
            compound,
        })
    }

    /// The space these constraints are bound to
    pub fn space(&self) -> &Space {
        &self.space
    }

    /// The constraint list, in declaration order
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Pinned value of the `dim`-th dimension, if a `Single` constraint
    /// targets it
    pub fn single(&self, dim: usize) -> Option<&Value> {
        self.single.get(dim).and_then(Option::as_ref)
    }

    /// Whether `sample` (original representation) satisfies every
    /// constraint. Pure: repeated calls on the same sample agree.
    ///
    /// Per dimension, `Inclusive` regions are OR-combined (any match
    /// admits) while `Exclusive` regions are AND-combined (every exclusion
    /// must miss); `Sum` and `Conditional` constraints are then all
    /// required to hold.
    pub fn validate_sample(&self, sample: &[Value]) -> bool {
        if sample.len() != self.space.n_dims() {
            return false;
        }
        for (value, pinned) in sample.iter().zip(self.single.iter()) {
            if let Some(pinned) = pinned {
                if value != pinned {
                    return false;
                }
            }
        }
        for (value, regions) in sample.iter().zip(self.inclusive.iter()) {
            if !regions.is_empty() && !regions.iter().any(|r| r.contains(value)) {
                return false;
            }
        }
        for (value, regions) in sample.iter().zip(self.exclusive.iter()) {
            if regions.iter().any(|r| r.contains(value)) {
                return false;
            }
        }
        self.compound.iter().all(|c| c.is_satisfied(sample))
    }

    /// Draw `n` admissible points from the space prior.
    ///
    /// Dimensions pinned by a `Single` constraint take the pinned value
    /// directly (an exact match from a continuous prior has measure zero);
    /// the remaining dimensions are rejection-sampled against
    /// [`Self::validate_sample`] with a fixed attempt budget per point.
    /// Budget exhaustion means the constraint combination is infeasible or
    /// of near-zero measure and surfaces as [`ConstraintError::Infeasible`].
    pub fn rvs<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<Point>> {
        let mut points = Vec::with_capacity(n);
        for _ in 0..n {
            points.push(self.rvs_one(rng)?);
        }
        Ok(points)
    }

    fn rvs_one<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Point> {
        for attempt in 0..MAX_SAMPLE_ATTEMPTS {
            let sample: Point = self
                .space
                .dimensions()
                .iter()
                .zip(self.single.iter())
                .map(|(dim, pinned)| match pinned {
                    Some(value) => value.clone(),
                    None => dim.rvs(1, rng).remove(0),
                })
                .collect();
            if self.validate_sample(&sample) {
                if attempt > MAX_SAMPLE_ATTEMPTS / 10 {
                    debug!("accepted a constrained sample after {attempt} rejections");
                }
                return Ok(sample);
            }
        }
        Err(ConstraintError::Infeasible(format!(
            "no admissible sample found in {MAX_SAMPLE_ATTEMPTS} attempts"
        )))
    }
}
