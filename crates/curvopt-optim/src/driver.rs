//! Iterated Riemannian gradient descent.
//!
//! [`RiemannianDescent`] repeats [`gradient_descent_observed`] with a step size
//! taken from a [`StepSizeSchedule`] until the geometry-weighted step length
//! `ηₖ ‖ĝₖ‖` falls below the configured tolerance, the iterate stops moving,
//! the iteration budget runs out or the observer asks to stop.
//!
//! The exponential map returns its base point for steps shorter than
//! [`Scalar::TANGENT_NORM_TOLERANCE`]. A step that leaves the iterate bitwise
//! unchanged is reported with length zero and ends the run as converged.

use crate::callback::{DescentProgress, NoOpObserver, StepObserver};
use crate::gradient_descent::gradient_descent_observed;
use crate::step_size::StepSizeSchedule;
use curvopt_core::{
    error::{OptimizerError, OptimizerResult, Result},
    geometry::Geometry,
    metric::norm,
    numerical::check_finite,
    types::{DVector, Scalar},
};
use num_traits::Float;

/// Why the driver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationReason {
    /// Step length fell below the step tolerance or the iterate stopped moving
    Converged,
    /// Maximum iteration count exhausted
    MaxIterations,
    /// The observer requested early termination
    ObserverRequest,
}

/// Configuration for [`RiemannianDescent`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DescentConfig<T: Scalar> {
    /// Step size schedule
    pub schedule: StepSizeSchedule<T>,
    /// Maximum number of gradient steps
    pub max_iterations: usize,
    /// Stop once `ηₖ ‖ĝₖ‖` is below this value
    pub step_tolerance: T,
}

impl<T: Scalar> Default for DescentConfig<T> {
    fn default() -> Self {
        Self {
            schedule: StepSizeSchedule::Constant(T::one()),
            max_iterations: 100,
            step_tolerance: <T as Scalar>::from_f64(1e-10),
        }
    }
}

impl<T: Scalar> DescentConfig<T> {
    /// Creates a configuration with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the step size schedule.
    pub fn with_step_size(mut self, schedule: StepSizeSchedule<T>) -> Self {
        self.schedule = schedule;
        self
    }

    /// Sets a constant step size.
    pub fn with_constant_step_size(mut self, step_size: T) -> Self {
        self.schedule = StepSizeSchedule::Constant(step_size);
        self
    }

    /// Sets an exponential decay schedule.
    pub fn with_exponential_decay(mut self, initial: T, decay_rate: T) -> Self {
        self.schedule = StepSizeSchedule::ExponentialDecay { initial, decay_rate };
        self
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the step tolerance.
    pub fn with_step_tolerance(mut self, step_tolerance: T) -> Self {
        self.step_tolerance = step_tolerance;
        self
    }

    /// Checks the configuration.
    pub fn validate(&self) -> OptimizerResult<()> {
        self.schedule.validate()?;
        if self.max_iterations == 0 {
            return Err(OptimizerError::invalid_configuration(
                "at least one iteration is required",
                "max_iterations",
                "0",
            ));
        }
        if !(self.step_tolerance >= T::zero()) || !Float::is_finite(self.step_tolerance) {
            return Err(OptimizerError::invalid_configuration(
                "step tolerance must be non-negative and finite",
                "step_tolerance",
                self.step_tolerance.to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of a descent run.
#[derive(Debug, Clone, PartialEq)]
pub struct DescentResult<T: Scalar> {
    /// Final iterate
    pub point: DVector<T>,
    /// Number of gradient steps taken
    pub iterations: usize,
    /// Geometry-weighted length of the last step actually taken
    pub last_step_norm: T,
    /// Why the run stopped
    pub termination_reason: TerminationReason,
}

impl<T: Scalar> DescentResult<T> {
    /// Whether the run stopped on the step tolerance.
    pub fn converged(&self) -> bool {
        self.termination_reason == TerminationReason::Converged
    }
}

/// Riemannian gradient descent driver.
#[derive(Debug, Clone)]
pub struct RiemannianDescent<T: Scalar> {
    config: DescentConfig<T>,
}

impl<T: Scalar> RiemannianDescent<T> {
    /// Creates a driver with the given configuration.
    pub fn new(config: DescentConfig<T>) -> Self {
        Self { config }
    }

    /// Driver configuration.
    pub fn config(&self) -> &DescentConfig<T> {
        &self.config
    }

    /// Runs descent from `start` without an observer.
    pub fn run<Tgt, F>(
        &self,
        start: &DVector<T>,
        target: &Tgt,
        differential_fn: F,
        geometry: Geometry,
    ) -> OptimizerResult<DescentResult<T>>
    where
        Tgt: ?Sized,
        F: Fn(&DVector<T>, &Tgt, Geometry) -> Result<DVector<T>>,
    {
        self.run_observed(start, target, differential_fn, geometry, &mut NoOpObserver)
    }

    /// Runs descent from `start`, reporting every step to `observer`.
    ///
    /// # Errors
    ///
    /// - `InvalidConfiguration`: if the configuration fails [`DescentConfig::validate`]
    /// - `Diverged`: if an iterate becomes non-finite
    /// - `Geometry`: any error of an individual step
    pub fn run_observed<Tgt, F, O>(
        &self,
        start: &DVector<T>,
        target: &Tgt,
        differential_fn: F,
        geometry: Geometry,
        observer: &mut O,
    ) -> OptimizerResult<DescentResult<T>>
    where
        Tgt: ?Sized,
        F: Fn(&DVector<T>, &Tgt, Geometry) -> Result<DVector<T>>,
        O: StepObserver<T> + ?Sized,
    {
        self.config.validate()?;
        check_finite(start, "starting point")?;

        let mut point = start.clone();
        let mut last_step_norm = <T as Float>::infinity();

        for iteration in 0..self.config.max_iterations {
            let learning_rate = self.config.schedule.step_size(iteration);
            let step = gradient_descent_observed(
                &point,
                target,
                &differential_fn,
                geometry,
                learning_rate,
                &mut *observer,
            )?;
            if check_finite(&step.point, "iterate").is_err() {
                return Err(OptimizerError::Diverged { iteration });
            }

            let stalled = step.point == point;
            last_step_norm = if stalled {
                T::zero()
            } else {
                learning_rate * norm(&step.projection, geometry)?
            };
            point = step.point;

            tracing::debug!(
                iteration,
                geometry = %geometry,
                learning_rate = %learning_rate,
                step_norm = %last_step_norm,
                "descent iteration"
            );

            if stalled || last_step_norm < self.config.step_tolerance {
                return Ok(DescentResult {
                    point,
                    iterations: iteration + 1,
                    last_step_norm,
                    termination_reason: TerminationReason::Converged,
                });
            }

            let progress = DescentProgress {
                iteration,
                learning_rate,
                step_norm: last_step_norm,
                point: &point,
            };
            if !observer.on_iteration_end(&progress) {
                return Ok(DescentResult {
                    point,
                    iterations: iteration + 1,
                    last_step_norm,
                    termination_reason: TerminationReason::ObserverRequest,
                });
            }
        }

        Ok(DescentResult {
            point,
            iterations: self.config.max_iterations,
            last_step_norm,
            termination_reason: TerminationReason::MaxIterations,
        })
    }
}
