//! Observers for descent steps.
//!
//! Geometry and descent routines never print. Callers that want to inspect
//! intermediate vectors pass a [`StepObserver`]; the default methods do
//! nothing, so an observer only overrides the hooks it needs.

use curvopt_core::{
    geometry::Geometry,
    types::{DVector, Scalar},
};

/// Vectors produced by one Riemannian gradient step.
#[derive(Debug, Clone, Copy)]
pub struct StepTrace<'a, T: Scalar> {
    /// Geometry of the step
    pub geometry: Geometry,
    /// Step size used for the update
    pub learning_rate: T,
    /// Point the step started from
    pub point: &'a DVector<T>,
    /// Raw differential returned by the caller
    pub gradient: &'a DVector<T>,
    /// Riemannian gradient after projection onto the tangent space
    pub projection: &'a DVector<T>,
    /// Point after the exponential map
    pub next_point: &'a DVector<T>,
}

/// Progress reported by the descent driver after each iteration.
#[derive(Debug, Clone, Copy)]
pub struct DescentProgress<'a, T: Scalar> {
    /// Zero-based iteration index
    pub iteration: usize,
    /// Step size used at this iteration
    pub learning_rate: T,
    /// Geometry-weighted length of the step taken
    pub step_norm: T,
    /// Current iterate
    pub point: &'a DVector<T>,
}

/// Trait for descent observers.
pub trait StepObserver<T: Scalar> {
    /// Called once per gradient step with every intermediate vector.
    fn on_step(&mut self, trace: &StepTrace<'_, T>) {
        let _ = trace;
    }

    /// Called by the driver at the end of each iteration.
    ///
    /// Returns `true` to continue, `false` to stop early.
    fn on_iteration_end(&mut self, progress: &DescentProgress<'_, T>) -> bool {
        let _ = progress;
        true
    }
}

/// An observer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl<T: Scalar> StepObserver<T> for NoOpObserver {}

/// Emits each step as a `tracing` event at TRACE level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl<T: Scalar> StepObserver<T> for TracingObserver {
    fn on_step(&mut self, trace: &StepTrace<'_, T>) {
        tracing::trace!(
            geometry = %trace.geometry,
            learning_rate = %trace.learning_rate,
            gradient = ?trace.gradient.as_slice(),
            projection = ?trace.projection.as_slice(),
            next_point = ?trace.next_point.as_slice(),
            "riemannian gradient step"
        );
    }

    fn on_iteration_end(&mut self, progress: &DescentProgress<'_, T>) -> bool {
        tracing::trace!(
            iteration = progress.iteration,
            step_norm = %progress.step_norm,
            "descent iteration finished"
        );
        true
    }
}

/// Owned copy of one step, as kept by [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord<T: Scalar> {
    /// Step size used for the update
    pub learning_rate: T,
    /// Raw differential
    pub gradient: DVector<T>,
    /// Projected gradient
    pub projection: DVector<T>,
    /// Point after the update
    pub next_point: DVector<T>,
}

/// Records every step and every iteration's step norm.
///
/// An optional iteration limit makes it stop the driver early.
#[derive(Debug, Clone)]
pub struct RecordingObserver<T: Scalar> {
    steps: Vec<StepRecord<T>>,
    step_norms: Vec<T>,
    stop_after: Option<usize>,
}

impl<T: Scalar> Default for RecordingObserver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> RecordingObserver<T> {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            step_norms: Vec::new(),
            stop_after: None,
        }
    }

    /// Requests a stop once `iterations` iterations have been recorded.
    pub fn with_stop_after(mut self, iterations: usize) -> Self {
        self.stop_after = Some(iterations);
        self
    }

    /// Recorded steps, oldest first.
    pub fn steps(&self) -> &[StepRecord<T>] {
        &self.steps
    }

    /// Step norms reported by the driver, oldest first.
    pub fn step_norms(&self) -> &[T] {
        &self.step_norms
    }
}

impl<T: Scalar> StepObserver<T> for RecordingObserver<T> {
    fn on_step(&mut self, trace: &StepTrace<'_, T>) {
        self.steps.push(StepRecord {
            learning_rate: trace.learning_rate,
            gradient: trace.gradient.clone(),
            projection: trace.projection.clone(),
            next_point: trace.next_point.clone(),
        });
    }

    fn on_iteration_end(&mut self, progress: &DescentProgress<'_, T>) -> bool {
        self.step_norms.push(progress.step_norm);
        match self.stop_after {
            Some(limit) => self.step_norms.len() < limit,
            None => true,
        }
    }
}
