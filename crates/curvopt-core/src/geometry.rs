//! The closed set of supported geometries.
//!
//! All three geometries are represented in ambient coordinates of dimension
//! `d+1`:
//!
//! ```text
//! Spherical:  Sᵈ = {x ∈ ℝᵈ⁺¹ : ⟨x,x⟩ = 1}                     K = +1
//! Hyperbolic: ℍᵈ = {x ∈ ℝᵈ⁺¹ : ⟨x,x⟩_L = -1, x_last > 0}     K = -1
//! Euclidean:  ℝᵈ⁺¹, unconstrained                            K =  0
//! ```
//!
//! with ⟨x,y⟩_L = x₀y₀ + … + x_{d-1}y_{d-1} − x_d y_d. Free-form tags are
//! parsed once through [`FromStr`]; every operation downstream takes the enum.

use crate::error::GeometryError;
use crate::types::Scalar;
use std::fmt;
use std::str::FromStr;

/// Geometry tag selecting the metric, the exponential map and the distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum Geometry {
    /// Unit sphere with the Euclidean metric.
    Spherical,
    /// Hyperboloid sheet with the Minkowski (Lorentz) metric.
    Hyperbolic,
    /// Flat space, no manifold constraint.
    Euclidean,
}

impl Geometry {
    /// All supported geometries.
    pub const ALL: [Geometry; 3] = [Geometry::Spherical, Geometry::Hyperbolic, Geometry::Euclidean];

    /// Lower-case name of the geometry, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Geometry::Spherical => "spherical",
            Geometry::Hyperbolic => "hyperbolic",
            Geometry::Euclidean => "euclidean",
        }
    }

    /// Constant sectional curvature.
    pub fn curvature<T: Scalar>(&self) -> T {
        match self {
            Geometry::Spherical => T::one(),
            Geometry::Hyperbolic => -T::one(),
            Geometry::Euclidean => T::zero(),
        }
    }

    /// Value of ⟨p,p⟩ for any point on the manifold, `None` for flat space.
    pub fn self_inner_product<T: Scalar>(&self) -> Option<T> {
        match self {
            Geometry::Spherical => Some(T::one()),
            Geometry::Hyperbolic => Some(-T::one()),
            Geometry::Euclidean => None,
        }
    }

    /// Whether points carry a constraint equation.
    pub fn is_curved(&self) -> bool {
        !matches!(self, Geometry::Euclidean)
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry::Hyperbolic
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Geometry {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spherical" => Ok(Geometry::Spherical),
            "hyperbolic" => Ok(Geometry::Hyperbolic),
            "euclidean" => Ok(Geometry::Euclidean),
            _ => Err(GeometryError::invalid_geometry(s)),
        }
    }
}

impl TryFrom<String> for Geometry {
    type Error = GeometryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&str> for Geometry {
    type Error = GeometryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Geometry> for String {
    fn from(geometry: Geometry) -> Self {
        geometry.name().to_string()
    }
}
