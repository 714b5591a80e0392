//! Error types for geometric operations and optimisation.
//!
//! Every invalid input surfaces as an `Err`. Floating-point edge cases with a
//! well-defined limit (a zero tangent vector, coincident points) do not reach
//! this module: they are resolved locally by returning the limiting value.

use thiserror::Error;

/// Errors that can occur during geometric operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Unrecognised geometry tag.
    ///
    /// Only produced when parsing a free-form tag; the [`Geometry`](crate::geometry::Geometry)
    /// enum itself is closed.
    #[error("geometry = {tag} is not a valid option, expected spherical, hyperbolic or euclidean")]
    InvalidGeometry {
        /// The rejected tag
        tag: String,
    },

    /// Dimension mismatch between operands.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions
        expected: String,
        /// Actual dimensions
        actual: String,
    },

    /// An intermediate value left its mathematically valid domain beyond
    /// floating-point tolerance.
    ///
    /// This indicates the input point is not on the claimed manifold.
    #[error("Domain error: {reason}")]
    DomainError {
        /// Description of the violated domain
        reason: String,
    },

    /// A near-zero denominator with no well-defined limit was detected.
    #[error("Numerical instability detected: {reason}")]
    NumericalInstability {
        /// Description of the numerical issue
        reason: String,
    },

    /// The operation is not defined for the requested geometry.
    #[error("{operation} is not supported for {geometry} geometry")]
    UnsupportedOperation {
        /// Name of the operation
        operation: String,
        /// Name of the geometry
        geometry: String,
    },

    /// An argument is outside its accepted range (zero dimension, empty batch,
    /// non-positive learning rate, ...).
    #[error("Invalid parameter: {reason}")]
    InvalidParameter {
        /// Description of the invalid parameter
        reason: String,
    },
}

impl GeometryError {
    /// Create an InvalidGeometry error for a rejected tag.
    pub fn invalid_geometry<S: Into<String>>(tag: S) -> Self {
        Self::InvalidGeometry { tag: tag.into() }
    }

    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch<S1, S2>(expected: S1, actual: S2) -> Self
    where
        S1: std::fmt::Display,
        S2: std::fmt::Display,
    {
        Self::DimensionMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a DomainError with a custom reason.
    pub fn domain_error<S: Into<String>>(reason: S) -> Self {
        Self::DomainError {
            reason: reason.into(),
        }
    }

    /// Create a NumericalInstability error with a custom reason.
    pub fn numerical_instability<S: Into<String>>(reason: S) -> Self {
        Self::NumericalInstability {
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedOperation error.
    pub fn unsupported<S1, S2>(operation: S1, geometry: S2) -> Self
    where
        S1: Into<String>,
        S2: std::fmt::Display,
    {
        Self::UnsupportedOperation {
            operation: operation.into(),
            geometry: geometry.to_string(),
        }
    }

    /// Create an InvalidParameter error.
    pub fn invalid_parameter<S: Into<String>>(reason: S) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while driving an iterative optimisation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizerError {
    /// Invalid optimizer configuration.
    #[error("Invalid optimizer configuration: {reason}")]
    InvalidConfiguration {
        /// Description of the configuration error
        reason: String,
        /// Name of the invalid parameter
        parameter: String,
        /// Value that was invalid
        value: String,
    },

    /// The iterate became non-finite.
    #[error("Iterate diverged at iteration {iteration}")]
    Diverged {
        /// Iteration at which the iterate stopped being finite
        iteration: usize,
    },

    /// Propagated geometry error.
    #[error("Geometry operation failed: {0}")]
    Geometry(#[from] GeometryError),
}

impl OptimizerError {
    /// Create an InvalidConfiguration error.
    pub fn invalid_configuration<S1, S2, S3>(reason: S1, parameter: S2, value: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self::InvalidConfiguration {
            reason: reason.into(),
            parameter: parameter.into(),
            value: value.into(),
        }
    }
}

/// Result type alias for operations that can produce GeometryError.
pub type Result<T> = std::result::Result<T, GeometryError>;

/// Result type alias for optimizer operations.
pub type OptimizerResult<T> = std::result::Result<T, OptimizerError>;
