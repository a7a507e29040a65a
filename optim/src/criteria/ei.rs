use crate::criteria::InfillCriterion;
use crate::types::Surrogate;
use libm::erfc;
use ndarray::ArrayView;

use serde::{Deserialize, Serialize};

const SQRT_2PI: f64 = 2.5066282746310007;

/// Cumulative distribution function of Standard Normal at x
fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}

/// Probability density function of Standard Normal at x
fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / SQRT_2PI
}

/// Expected improvement criterion, negated to fit the minimization
/// convention of [`InfillCriterion`]: the candidate with the largest
/// expected improvement over the current minimum scores lowest.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExpectedImprovement;

#[typetag::serde]
impl InfillCriterion for ExpectedImprovement {
    fn name(&self) -> &'static str {
        "EI"
    }

    fn value(&self, x: &[f64], model: &dyn Surrogate, fmin: f64) -> f64 {
        let pt = ArrayView::from_shape((1, x.len()), x).unwrap();
        match model.predict_valstd(&pt) {
            Ok((p, s)) => {
                if s[0] < f64::EPSILON {
                    0.0
                } else {
                    let pred = p[0];
                    let sigma = s[0];
                    let args0 = (fmin - pred) / sigma;
                    let args1 = args0 * norm_cdf(args0);
                    let args2 = norm_pdf(args0);
                    -(sigma * (args1 + args2))
                }
            }
            _ => 0.0,
        }
    }
}

/// Expected Improvement infill criterion
pub const EI: ExpectedImprovement = ExpectedImprovement {};
