//! Numerical stability and input validation helpers.

pub mod stability;
pub mod validation;

pub use stability::*;
pub use validation::*;
