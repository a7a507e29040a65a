use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use sobox_space::Value;

/// Snapshot handed to callbacks after each `tell`.
#[derive(Debug)]
pub struct TellEvent<'a> {
    /// The point just evaluated, original representation
    pub x: &'a [Value],
    /// The objective value just told
    pub y: f64,
    /// Number of evaluations recorded so far, this one included
    pub n_evals: usize,
}

/// An observer invoked once per `tell`, for external instrumentation.
/// Not required for correctness of the optimization loop.
pub trait Callback: Send {
    /// Called after each `tell`, once the history and model snapshots are
    /// updated
    fn on_tell(&mut self, event: &TellEvent<'_>);
}

#[derive(Debug)]
struct TimerData {
    last: Instant,
    iter_time: Vec<Duration>,
}

/// Records the wall time elapsed between consecutive `tell`s.
///
/// The callback is a cheap clonable handle over shared state: register one
/// clone with the optimizer and keep another to read the recorded
/// durations back.
#[derive(Clone, Debug)]
pub struct TimerCallback {
    inner: Arc<Mutex<TimerData>>,
}

impl TimerCallback {
    /// Start the timer now
    pub fn new() -> Self {
        TimerCallback {
            inner: Arc::new(Mutex::new(TimerData {
                last: Instant::now(),
                iter_time: Vec::new(),
            })),
        }
    }

    /// Recorded per-iteration durations, one entry per `tell`
    pub fn iter_time(&self) -> Vec<Duration> {
        self.inner.lock().unwrap().iter_time.clone()
    }
}

impl Default for TimerCallback {
    fn default() -> Self {
        Self::new()
    }
}

impl Callback for TimerCallback {
    fn on_tell(&mut self, _event: &TellEvent<'_>) {
        let mut data = self.inner.lock().unwrap();
        let now = Instant::now();
        let elapsed = now - data.last;
        data.last = now;
        data.iter_time.push(elapsed);
    }
}
