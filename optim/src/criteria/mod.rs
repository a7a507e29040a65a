//! Available infill criteria used to score candidate points
mod ei;
mod lcb;

pub use ei::{EI, ExpectedImprovement};
pub use lcb::{LCB, LowerConfidenceBound};

use crate::types::Surrogate;
use dyn_clonable::*;

/// A trait for infill criteria whose minimum location determines the next
/// most promising point to evaluate.
///
/// Values are to be minimized: a lower criterion value means a more
/// attractive candidate. Criteria balancing exploitation against
/// exploration (expected improvement and friends) return their negated
/// score so the convention holds uniformly.
#[clonable]
#[typetag::serde(tag = "type_infill")]
pub trait InfillCriterion: Clone + Sync {
    /// Name of the infill criterion
    fn name(&self) -> &'static str;

    /// Criterion value at the warped point `x` with regards to the given
    /// surrogate of the objective function and the current observed minimum
    fn value(&self, x: &[f64], model: &dyn Surrogate, fmin: f64) -> f64;
}

impl std::fmt::Debug for dyn InfillCriterion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}
