use crate::criteria::InfillCriterion;
use crate::types::Surrogate;
use ndarray::ArrayView;

use serde::{Deserialize, Serialize};

/// Lower confidence bound criterion: `mean - kappa * std`.
///
/// Smaller `kappa` favours exploitation of the predicted mean, larger
/// `kappa` favours exploration of uncertain regions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LowerConfidenceBound {
    /// Exploration/exploitation trade-off factor
    pub kappa: f64,
}

impl Default for LowerConfidenceBound {
    fn default() -> Self {
        LowerConfidenceBound { kappa: 1.96 }
    }
}

#[typetag::serde]
impl InfillCriterion for LowerConfidenceBound {
    fn name(&self) -> &'static str {
        "LCB"
    }

    fn value(&self, x: &[f64], model: &dyn Surrogate, _fmin: f64) -> f64 {
        let pt = ArrayView::from_shape((1, x.len()), x).unwrap();
        match model.predict_valstd(&pt) {
            Ok((p, s)) => p[0] - self.kappa * s[0],
            _ => f64::INFINITY,
        }
    }
}

/// Lower confidence bound criterion with the usual 95% factor
pub const LCB: LowerConfidenceBound = LowerConfidenceBound { kappa: 1.96 };
