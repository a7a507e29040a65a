use crate::errors::Result;
use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use sobox_space::Point;

/// A fitted surrogate of the objective function over the warped space.
///
/// The loop only requires predictions; how they are computed (Gaussian
/// process, forest, gradient boosting, ...) is an external concern.
pub trait Surrogate: Send + Sync {
    /// Predicted mean at each row of `x` (warped representation)
    fn predict(&self, x: &ArrayView2<f64>) -> Result<Array1<f64>>;

    /// Predicted mean and standard deviation at each row of `x`
    fn predict_valstd(&self, x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array1<f64>)>;
}

/// A trait for surrogate training.
///
/// One snapshot is trained per `tell` on the full warped history once the
/// initial sampling phase is over.
pub trait SurrogateBuilder: Clone {
    /// Train a surrogate with the given training dataset (x, y)
    fn train(&self, xt: ArrayView2<f64>, yt: ArrayView1<f64>) -> Result<Box<dyn Surrogate>>;
}

/// Optimization result record: the best evaluation and the full history,
/// consumable by external dump/load utilities.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OptimResult {
    /// Best point found so far
    pub x_opt: Point,
    /// Objective value at the best point
    pub y_opt: f64,
    /// History of evaluated points, in `tell` order
    pub x_hist: Vec<Point>,
    /// History of objective values, aligned with `x_hist`
    pub y_hist: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sobox_space::Value;

    #[test]
    fn test_result_record_roundtrip() {
        let res = OptimResult {
            x_opt: vec![Value::Real(1.5), Value::Int(3), Value::from("a")],
            y_opt: -0.5,
            x_hist: vec![
                vec![Value::Real(1.5), Value::Int(3), Value::from("a")],
                vec![Value::Real(2.5), Value::Int(4), Value::from("b")],
            ],
            y_hist: vec![-0.5, 1.0],
        };
        let json = serde_json::to_string(&res).unwrap();
        let back: OptimResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.x_opt, res.x_opt);
        assert_eq!(back.y_opt, res.y_opt);
        assert_eq!(back.x_hist, res.x_hist);
        assert_eq!(back.y_hist, res.y_hist);
    }
}
