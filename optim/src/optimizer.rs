use crate::callbacks::{Callback, TellEvent};
use crate::criteria::{InfillCriterion, LCB};
use crate::errors::{OptimError, Result};
use crate::infill::{InfillOptimizer, SamplingInfillOptimizer};
use crate::types::{OptimResult, Surrogate, SurrogateBuilder};
use log::{debug, info};
use ndarray::{Array1, Axis};
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use serde::{Deserialize, Serialize};
use sobox_constraints::{Constraint, Constraints};
use sobox_space::{Point, Space};

/// Ask/tell optimizer configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Number of points proposed from the space prior before the first
    /// surrogate is fitted
    pub(crate) n_initial_points: usize,
    /// Number of candidate draws per acquisition optimization
    pub(crate) n_candidates: usize,
    /// Criterion scored to select the next point to evaluate
    pub(crate) infill_criterion: Box<dyn InfillCriterion>,
    /// A random generator seed used to get reproducible runs.
    /// Without a seed the generator is entropy-seeded and runs are not
    /// reproducible.
    pub(crate) seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig {
            n_initial_points: 10,
            n_candidates: 1000,
            infill_criterion: Box::new(LCB),
            seed: None,
        }
    }
}

impl OptimizerConfig {
    /// Sets the number of initial points drawn from the space prior
    pub fn n_initial_points(mut self, n_initial_points: usize) -> Self {
        self.n_initial_points = n_initial_points;
        self
    }

    /// Sets the number of candidate draws per acquisition optimization
    pub fn n_candidates(mut self, n_candidates: usize) -> Self {
        self.n_candidates = n_candidates;
        self
    }

    /// Sets the infill criterion scored during acquisition optimization
    pub fn infill_criterion(mut self, infill_criterion: Box<dyn InfillCriterion>) -> Self {
        self.infill_criterion = infill_criterion;
        self
    }

    /// Sets the random generator seed for reproducible runs
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub(crate) fn check(self) -> Result<Self> {
        if self.n_candidates == 0 {
            return Err(OptimError::InvalidConfig(
                "n_candidates must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Builder of an ask/tell [`Optimizer`] given a surrogate builder and a
/// configuration closure.
pub struct OptimizerBuilder<SB: SurrogateBuilder> {
    config: OptimizerConfig,
    surrogate_builder: SB,
    infill_optimizer: Option<Box<dyn InfillOptimizer>>,
}

impl<SB: SurrogateBuilder> OptimizerBuilder<SB> {
    /// Start building an optimizer around the given surrogate builder
    pub fn optimize(surrogate_builder: SB) -> Self {
        OptimizerBuilder {
            config: OptimizerConfig::default(),
            surrogate_builder,
            infill_optimizer: None,
        }
    }

    /// Configure the optimizer with a closure taking and returning an
    /// [`OptimizerConfig`]
    pub fn configure<F: FnOnce(OptimizerConfig) -> OptimizerConfig>(mut self, init: F) -> Self {
        self.config = init(self.config);
        self
    }

    /// Replace the acquisition optimization strategy; defaults to
    /// [`SamplingInfillOptimizer`]
    pub fn infill_optimizer(mut self, infill_optimizer: Box<dyn InfillOptimizer>) -> Self {
        self.infill_optimizer = Some(infill_optimizer);
        self
    }

    /// Build the optimizer over `space`
    pub fn min_within(self, space: Space) -> Result<Optimizer<SB>> {
        let config = self.config.check()?;
        let rng = match config.seed {
            Some(seed) => Xoshiro256Plus::seed_from_u64(seed),
            None => Xoshiro256Plus::from_entropy(),
        };
        let infill_optimizer = self
            .infill_optimizer
            .unwrap_or_else(|| Box::new(SamplingInfillOptimizer::new(config.n_candidates)));
        Ok(Optimizer {
            n_initial_points: config.n_initial_points,
            config,
            surrogate_builder: self.surrogate_builder,
            infill_optimizer,
            space,
            xi: vec![],
            yi: vec![],
            models: vec![],
            constraints: None,
            next_x: None,
            callbacks: vec![],
            rng,
        })
    }
}

/// Conversion of constraint specifications accepted by
/// [`Optimizer::set_constraints`]: either an already aggregated
/// [`Constraints`] or a plain constraint list wrapped against the
/// optimizer's space.
pub trait IntoConstraints {
    /// Resolve into [`Constraints`] bound to `space`
    fn into_constraints(self, space: &Space) -> Result<Constraints>;
}

impl IntoConstraints for Constraints {
    fn into_constraints(self, space: &Space) -> Result<Constraints> {
        if self.space() != space {
            return Err(OptimError::InvalidConfig(
                "constraints are bound to a different space".to_string(),
            ));
        }
        Ok(self)
    }
}

impl IntoConstraints for Vec<Constraint> {
    fn into_constraints(self, space: &Space) -> Result<Constraints> {
        Ok(Constraints::new(self, space.clone())?)
    }
}

/// The ask/tell sequential optimization loop.
///
/// The optimizer owns the history of evaluated points and values, one
/// surrogate snapshot per `tell` past the initial phase, and the optionally
/// active constraints. `ask` proposes the next point to evaluate; `tell`
/// records an evaluation and refits. The history is append-only and never
/// rewritten.
///
/// The loop is synchronous: calls on one instance must be externally
/// serialized. The space and constraints are immutable and may be shared
/// across instances.
pub struct Optimizer<SB: SurrogateBuilder> {
    config: OptimizerConfig,
    surrogate_builder: SB,
    infill_optimizer: Box<dyn InfillOptimizer>,
    space: Space,
    xi: Vec<Point>,
    yi: Vec<f64>,
    models: Vec<Box<dyn Surrogate>>,
    /// Remaining pre-model proposals
    n_initial_points: usize,
    constraints: Option<Constraints>,
    /// Cached candidate returned unchanged by `ask` until the next `tell`
    next_x: Option<Point>,
    callbacks: Vec<Box<dyn Callback>>,
    rng: Xoshiro256Plus,
}

impl<SB: SurrogateBuilder> Optimizer<SB> {
    /// The space under optimization
    pub fn space(&self) -> &Space {
        &self.space
    }

    /// Evaluated points, in `tell` order
    pub fn xi(&self) -> &[Point] {
        &self.xi
    }

    /// Observed objective values, aligned with [`Self::xi`]
    pub fn yi(&self) -> &[f64] {
        &self.yi
    }

    /// Surrogate snapshots, one per `tell` past the initial phase
    pub fn models(&self) -> &[Box<dyn Surrogate>] {
        &self.models
    }

    /// Remaining pre-model proposals before the surrogate phase begins
    pub fn remaining_initial_points(&self) -> usize {
        self.n_initial_points
    }

    /// Register an observer invoked once per `tell`
    pub fn add_callback(&mut self, callback: impl Callback + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    /// The next point to evaluate, in original representation.
    ///
    /// Idempotent: repeated calls without an intervening `tell` return the
    /// same cached candidate. During the initial phase the candidate is
    /// drawn from the space prior (through the constrained sampler when
    /// constraints are active); afterwards it minimizes the infill
    /// criterion over the feasible region.
    pub fn ask(&mut self) -> Result<Point> {
        if let Some(x) = &self.next_x {
            return Ok(x.clone());
        }
        let x = self.compute_next()?;
        self.next_x = Some(x.clone());
        Ok(x)
    }

    /// Record the evaluation `y` of the objective at `x`.
    ///
    /// `x` must lie within the space bounds but is not required to be the
    /// last `ask` result: off-policy evaluations are allowed. Past the
    /// initial phase the surrogate is refitted on the full history and the
    /// next candidate is recomputed eagerly; the previously cached
    /// candidate is always invalidated.
    pub fn tell(&mut self, x: Point, y: f64) -> Result<()> {
        self.space.check_point(&x)?;
        if !y.is_finite() {
            return Err(OptimError::InvalidEvaluation(format!(
                "objective value must be finite, got {y}"
            )));
        }

        self.xi.push(x);
        self.yi.push(y);
        if self.n_initial_points > 0 {
            self.n_initial_points -= 1;
            if self.n_initial_points == 0 {
                info!("initial phase over after {} evaluations", self.xi.len());
            }
        }
        self.next_x = None;

        if self.n_initial_points == 0 {
            let xt = self.space.transform(&self.xi)?;
            let yt = Array1::from(self.yi.clone());
            let model = self.surrogate_builder.train(xt.view(), yt.view())?;
            self.models.push(model);
            debug!("surrogate refitted on {} evaluations", self.xi.len());
            let x = self.compute_next()?;
            self.next_x = Some(x);
        }

        let event = TellEvent {
            x: self.xi.last().map(Vec::as_slice).unwrap_or(&[]),
            y,
            n_evals: self.yi.len(),
        };
        for callback in self.callbacks.iter_mut() {
            callback.on_tell(&event);
        }
        Ok(())
    }

    /// Restrict the search to the feasible region of the given constraints.
    ///
    /// Accepts a [`Constraints`] instance or a plain `Vec<Constraint>`
    /// wrapped against this optimizer's space. The cached candidate is
    /// recomputed immediately under the new restriction, without consuming
    /// an initial-point unit or growing the history.
    pub fn set_constraints(&mut self, constraints: impl IntoConstraints) -> Result<()> {
        let constraints = constraints.into_constraints(&self.space)?;
        self.constraints = Some(constraints);
        let x = self.compute_next()?;
        self.next_x = Some(x);
        Ok(())
    }

    /// Lift the active constraints and recompute the cached candidate over
    /// the whole space, without consuming an initial-point unit or growing
    /// the history
    pub fn remove_constraints(&mut self) -> Result<()> {
        self.constraints = None;
        let x = self.compute_next()?;
        self.next_x = Some(x);
        Ok(())
    }

    /// The currently active constraints, if any
    pub fn get_constraints(&self) -> Option<&Constraints> {
        self.constraints.as_ref()
    }

    /// Best evaluation so far with the full history, `None` before the
    /// first `tell`
    pub fn result(&self) -> Option<OptimResult> {
        let best = self
            .yi
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))?
            .0;
        Some(OptimResult {
            x_opt: self.xi[best].clone(),
            y_opt: self.yi[best],
            x_hist: self.xi.clone(),
            y_hist: self.yi.clone(),
        })
    }

    fn compute_next(&mut self) -> Result<Point> {
        if self.n_initial_points > 0 || self.models.is_empty() {
            let x = match &self.constraints {
                Some(constraints) => constraints.rvs(1, &mut self.rng)?.remove(0),
                None => self.space.rvs(1, &mut self.rng).remove(0),
            };
            debug!("initial candidate drawn from the prior");
            return Ok(x);
        }

        let model = self.models[self.models.len() - 1].as_ref();
        let fmin = self.yi.iter().fold(f64::INFINITY, |acc, &v| acc.min(v));
        let xt = self.infill_optimizer.optimize(
            self.config.infill_criterion.as_ref(),
            model,
            &self.space,
            self.constraints.as_ref(),
            fmin,
            &mut self.rng,
        )?;
        let mut points = self.space.inverse_transform(&xt.insert_axis(Axis(0)))?;
        Ok(points.remove(0))
    }
}
