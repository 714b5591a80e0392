//! Step size schedules for the descent driver.
//!
//! The gradient of a geodesic distance has unit norm everywhere except at the
//! target, so a constant step size makes distance descent oscillate around the
//! target with amplitude equal to the step. Decaying schedules trade that
//! oscillation for a geometric contraction:
//!
//! - **Constant**: αₖ = α₀
//! - **Exponential decay**: αₖ = α₀ · γᵏ
//! - **Inverse time**: αₖ = α₀ / (1 + βk)
//! - **Polynomial decay**: αₖ = α₀ / (1 + βk)ᵖ
//! - **Square root decay**: αₖ = α₀ / √(1 + k)

use curvopt_core::{
    error::{OptimizerError, OptimizerResult},
    types::Scalar,
};
use num_traits::Float;

/// Step size strategy, evaluated once per iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepSizeSchedule<T: Scalar> {
    /// Fixed step size αₖ = α₀ for all iterations
    Constant(T),

    /// Exponential decay: αₖ = α₀ · γᵏ where 0 < γ < 1
    ExponentialDecay {
        /// Initial step size α₀
        initial: T,
        /// Decay factor γ ∈ (0, 1]
        decay_rate: T,
    },

    /// Inverse time decay: αₖ = α₀ / (1 + βk)
    InverseTime {
        /// Initial step size α₀
        initial: T,
        /// Decay coefficient β ≥ 0
        decay: T,
    },

    /// Polynomial decay: αₖ = α₀ / (1 + βk)ᵖ
    PolynomialDecay {
        /// Initial step size α₀
        initial: T,
        /// Decay coefficient β ≥ 0
        decay_rate: T,
        /// Decay power p > 0
        power: T,
    },

    /// Square root decay: αₖ = α₀ / √(1 + k)
    SquareRootDecay {
        /// Initial step size α₀
        initial: T,
    },
}

impl<T: Scalar> Default for StepSizeSchedule<T> {
    fn default() -> Self {
        Self::Constant(T::one())
    }
}

impl<T: Scalar> StepSizeSchedule<T> {
    /// Step size αₖ at iteration `iteration` (starting from 0).
    pub fn step_size(&self, iteration: usize) -> T {
        let k = <T as Scalar>::from_usize(iteration);

        match self {
            Self::Constant(alpha) => *alpha,
            Self::ExponentialDecay { initial, decay_rate } => {
                *initial * <T as Float>::powf(*decay_rate, k)
            }
            Self::InverseTime { initial, decay } => *initial / (T::one() + *decay * k),
            Self::PolynomialDecay {
                initial,
                decay_rate,
                power,
            } => *initial / <T as Float>::powf(T::one() + *decay_rate * k, *power),
            Self::SquareRootDecay { initial } => *initial / <T as Float>::sqrt(T::one() + k),
        }
    }

    /// Creates a constant schedule.
    pub fn constant(step_size: T) -> Self {
        Self::Constant(step_size)
    }

    /// Creates an exponential decay schedule αₖ = α₀ · γᵏ.
    pub fn exponential_decay(initial: T, decay_rate: T) -> Self {
        Self::ExponentialDecay { initial, decay_rate }
    }

    /// Creates an inverse time schedule αₖ = α₀ / (1 + βk).
    pub fn inverse_time(initial: T, decay: T) -> Self {
        Self::InverseTime { initial, decay }
    }

    /// Creates a polynomial decay schedule αₖ = α₀ / (1 + βk)ᵖ.
    pub fn polynomial_decay(initial: T, decay_rate: T, power: T) -> Self {
        Self::PolynomialDecay {
            initial,
            decay_rate,
            power,
        }
    }

    /// Creates a square root decay schedule αₖ = α₀ / √(1 + k).
    pub fn sqrt_decay(initial: T) -> Self {
        Self::SquareRootDecay { initial }
    }

    /// Checks that every step size of the schedule is positive and finite.
    pub fn validate(&self) -> OptimizerResult<()> {
        let (initial, extra): (T, Option<(&str, T, bool)>) = match self {
            Self::Constant(alpha) => (*alpha, None),
            Self::ExponentialDecay { initial, decay_rate } => (
                *initial,
                Some((
                    "decay_rate",
                    *decay_rate,
                    *decay_rate > T::zero() && *decay_rate <= T::one(),
                )),
            ),
            Self::InverseTime { initial, decay } => {
                (*initial, Some(("decay", *decay, *decay >= T::zero())))
            }
            Self::PolynomialDecay {
                initial,
                decay_rate,
                power,
            } => (
                *initial,
                Some((
                    "decay_rate",
                    *decay_rate,
                    *decay_rate >= T::zero() && *power > T::zero(),
                )),
            ),
            Self::SquareRootDecay { initial } => (*initial, None),
        };

        if !(initial > T::zero()) || !Float::is_finite(initial) {
            return Err(OptimizerError::invalid_configuration(
                "initial step size must be positive and finite",
                "step_size",
                initial.to_string(),
            ));
        }
        if let Some((parameter, value, ok)) = extra {
            if !ok {
                return Err(OptimizerError::invalid_configuration(
                    "decay parameters out of range",
                    parameter,
                    value.to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_schedule() {
        let schedule = StepSizeSchedule::constant(0.1);
        assert_eq!(schedule.step_size(0), 0.1);
        assert_eq!(schedule.step_size(1000), 0.1);
        assert_eq!(StepSizeSchedule::<f64>::default().step_size(3), 1.0);
    }

    #[test]
    fn test_exponential_decay() {
        let schedule = StepSizeSchedule::exponential_decay(1.0, 0.5);
        assert!((schedule.step_size(0) - 1.0).abs() < 1e-12);
        assert!((schedule.step_size(1) - 0.5).abs() < 1e-12);
        assert!((schedule.step_size(10) - 1.0 / 1024.0).abs() < 1e-12);
    }

    #[test]
    fn test_inverse_time() {
        let schedule = StepSizeSchedule::inverse_time(2.0, 0.5);
        assert!((schedule.step_size(0) - 2.0).abs() < 1e-12);
        assert!((schedule.step_size(2) - 1.0).abs() < 1e-12);
        assert!(StepSizeSchedule::inverse_time(1.0, -0.1).validate().is_err());
    }

    #[test]
    fn test_polynomial_decay() {
        let schedule = StepSizeSchedule::polynomial_decay(1.0, 0.1, 2.0);
        assert!((schedule.step_size(0) - 1.0).abs() < 1e-10);
        // 1.0 / (1 + 0.1*10)^2 = 0.25
        assert!((schedule.step_size(10) - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_sqrt_decay() {
        let schedule = StepSizeSchedule::sqrt_decay(1.0);
        assert!((schedule.step_size(3) - 0.5).abs() < 1e-10);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_schedule_serde_round_trip() {
        use pretty_assertions::assert_eq;

        let schedules = [
            StepSizeSchedule::constant(0.25),
            StepSizeSchedule::exponential_decay(1.0, 0.5),
            StepSizeSchedule::inverse_time(2.0, 0.5),
            StepSizeSchedule::polynomial_decay(1.0, 0.1, 2.0),
            StepSizeSchedule::sqrt_decay(0.5),
        ];
        for schedule in schedules {
            let json = serde_json::to_string(&schedule).unwrap();
            let parsed: StepSizeSchedule<f64> = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, schedule);
        }
    }

    #[test]
    fn test_validation() {
        assert!(StepSizeSchedule::constant(0.5).validate().is_ok());
        assert!(StepSizeSchedule::constant(0.0).validate().is_err());
        assert!(StepSizeSchedule::constant(f64::NAN).validate().is_err());
        assert!(StepSizeSchedule::exponential_decay(1.0, 1.5).validate().is_err());
        assert!(StepSizeSchedule::polynomial_decay(1.0, 0.1, 0.0).validate().is_err());
    }
}
