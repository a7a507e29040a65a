/*!
This library implements the ask-and-tell control loop of sequential
surrogate-based (Bayesian) optimization over [`sobox_space::Space`] search
spaces, optionally restricted by [`sobox_constraints::Constraints`].

The caller keeps control of the iteration: `ask` proposes the next point to
evaluate, `tell` records the observed objective value. While initial points
remain, proposals are drawn from the space prior; afterwards a surrogate
model is refitted on the full history at each `tell` and the next proposal
minimizes an infill criterion over the (possibly constrained) space.
Surrogate regressors are external collaborators plugged through the
[`SurrogateBuilder`]/[`Surrogate`] contract; the acquisition optimization
strategy is pluggable through [`InfillOptimizer`] and defaults to a
constraint-aware sampling search.

# Example

```
use ndarray::{Array1, ArrayView1, ArrayView2};
use sobox_optim::{OptimizerBuilder, Result, Surrogate, SurrogateBuilder};
use sobox_space::{Dimension, Space, Value};

// A constant-mean surrogate; real deployments plug a Gaussian process or
// forest regressor through the same contract.
#[derive(Clone)]
struct MeanSurrogateBuilder;

struct MeanSurrogate {
    mean: f64,
}

impl SurrogateBuilder for MeanSurrogateBuilder {
    fn train(&self, _xt: ArrayView2<f64>, yt: ArrayView1<f64>) -> Result<Box<dyn Surrogate>> {
        Ok(Box::new(MeanSurrogate {
            mean: yt.mean().unwrap_or(0.),
        }))
    }
}

impl Surrogate for MeanSurrogate {
    fn predict(&self, x: &ArrayView2<f64>) -> Result<Array1<f64>> {
        Ok(Array1::from_elem(x.nrows(), self.mean))
    }

    fn predict_valstd(&self, x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array1<f64>)> {
        Ok((
            Array1::from_elem(x.nrows(), self.mean),
            Array1::ones(x.nrows()),
        ))
    }
}

// A one-dimensional test function with min ~ -15.1 at x ~ 18.9
fn xsinx(x: f64) -> f64 {
    (x - 3.5) * ((x - 3.5) / std::f64::consts::PI).sin()
}

let space = Space::new(vec![Dimension::real(0., 25.)?])?;
let mut opt = OptimizerBuilder::optimize(MeanSurrogateBuilder)
    .configure(|config| config.n_initial_points(3).seed(42))
    .min_within(space)?;

for _ in 0..6 {
    let x = opt.ask()?;
    let y = match &x[0] {
        Value::Real(v) => xsinx(*v),
        _ => unreachable!(),
    };
    opt.tell(x, y)?;
}

let best = opt.result().unwrap();
assert_eq!(best.y_hist.len(), 6);
assert!(best.y_opt <= best.y_hist[0]);
# Ok::<(), sobox_optim::OptimError>(())
```

Constraints can be set, replaced or removed at any time between `ask` and
`tell`; the pending proposal is recomputed immediately under the new
restriction without consuming an evaluation (see
[`Optimizer::set_constraints`]).
*/
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
mod callbacks;
mod criteria;
mod errors;
mod infill;
mod optimizer;
mod types;

pub use callbacks::{Callback, TellEvent, TimerCallback};
pub use criteria::{EI, ExpectedImprovement, InfillCriterion, LCB, LowerConfidenceBound};
pub use errors::{OptimError, Result};
pub use infill::{InfillOptimizer, SamplingInfillOptimizer};
pub use optimizer::{IntoConstraints, Optimizer, OptimizerBuilder, OptimizerConfig};
pub use types::{OptimResult, Surrogate, SurrogateBuilder};
