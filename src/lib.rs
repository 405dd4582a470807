//! # Keplerian Orrery
//! This library crate computes where the bodies of a planetary system are,
//! frame by frame, for an animated orrery.
//!
//! Every body rides its own fixed Keplerian ellipse around its parent, so
//! positions come straight from the orbital elements and the simulation
//! clock. There is no time stepping and no mutual gravity: a frame can be
//! computed without knowing the frame before it.
//!
//! Moons are handled by composition. A moon's orbit is described relative
//! to its planet, and its absolute position is its own offset added to the
//! planet's position at the same instant. Parents are therefore always
//! evaluated before their children.
//!
//! ## Getting started
//! This crate provides a handful of main pieces:
//! - [`OrbitalElements`]: The static orbital parameters of one body, with
//!   angles in degrees, as they appear in configuration.
//! - [`Orbit`]: The same parameters with the tilt matrix and mean motion
//!   cached, ready to be evaluated many times.
//! - [`Universe`]: An arena of [`Body`] records addressed by [`BodyId`],
//!   holding who orbits whom.
//! - [`Trajectories`]: Precomputed positions of every body for every frame.
//! - [`SimulationConfig`]: A JSON-backed description of a whole system.
//!
//! We also provide a [`body_presets`] module with the Sun, the planets,
//! several dwarf planets and moons, and Halley's comet.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//!
//! use kepler_orrery::{Body, OrbitalElements, SimulationParams, Trajectories, Universe};
//!
//! # fn main() {
//! let mut universe = Universe::new();
//! let sun = universe
//!     .add_body(Body::new("sun", OrbitalElements::stationary()), None)
//!     .unwrap();
//! let earth = universe
//!     .add_body(
//!         Body::new("earth", OrbitalElements::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 365.25)),
//!         Some(sun),
//!     )
//!     .unwrap();
//!
//! let trajectories = Trajectories::generate_all(&universe, SimulationParams::new(365, 365.25)).unwrap();
//! assert_eq!(trajectories.position(earth, 0), Some(DVec3::new(1.0, 0.0, 0.0)));
//! # }
//! ```

#![warn(missing_docs)]

pub mod animation;
mod body;
pub mod body_presets;
pub mod config;
mod elements;
mod error;
mod position;
mod solvers;
mod trajectory;
mod universe;

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

pub use animation::AnimationState;
pub use body::{Body, BodyKind};
pub use config::{BodyConfig, SimulationConfig};
pub use elements::{Orbit, OrbitalElements};
pub use error::{BodyAddError, ConfigError, TrajectoryError};
pub use position::{
    altitude_at_true_anomaly, position, pqw_position_at_true_anomaly, transformation_matrix,
};
pub use solvers::{
    solve_eccentric_anomalies, solve_eccentric_anomaly, true_anomalies, true_anomaly,
    SolveReport, SolverOptions,
};
pub use trajectory::{generate, generate_with_report, SimulationParams, Trajectories, Trajectory};
pub use universe::{BodyId, BodyRelation, Universe};

/// The default largest Newton-Raphson correction, in radians, below which
/// a Kepler solve counts as converged.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// The default maximum number of Newton-Raphson iterations.
///
/// This is used to prevent infinite loops in case the method fails to converge.
pub const DEFAULT_MAX_ITERS: u32 = 100;

/// Eccentricities at or above this start the Kepler solve at `E = pi`
/// instead of `E = M`.
const HIGH_ECCENTRICITY_SEED: f64 = 0.8;

/// A struct representing a 3x2 matrix.
///
/// This struct is used to store the transformation matrix
/// for transforming a 2D vector into a 3D vector.
///
/// Namely, it is used in [`Orbit::transform_pqw_vector`] to tilt a
/// 2D position into 3D, using the orbital parameters.
///
/// Each element is named `eXY`, where `X` is the row and `Y` is the column.
///
/// # Example
/// ```
/// use glam::{DVec2, DVec3};
///
/// use kepler_orrery::Matrix3x2;
///
/// let matrix = Matrix3x2 {
///    e11: 1.0, e12: 0.0,
///    e21: 0.0, e22: 1.0,
///    e31: 0.0, e32: 0.0,
/// };
///
/// let vec = DVec2::new(1.0, 2.0);
///
/// let result = matrix.dot_vec(vec);
///
/// assert_eq!(result, DVec3::new(1.0, 2.0, 0.0));
/// ```
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Matrix3x2 {
    // Element XY
    pub e11: f64,
    pub e12: f64,
    pub e21: f64,
    pub e22: f64,
    pub e31: f64,
    pub e32: f64,
}

impl Matrix3x2 {
    /// Computes a dot product between this matrix and a 2D vector.
    ///
    /// # Example
    /// ```
    /// use glam::{DVec2, DVec3};
    ///
    /// use kepler_orrery::Matrix3x2;
    ///
    /// let matrix = Matrix3x2 {
    ///     e11: 1.0, e12: 0.0,
    ///     e21: 0.0, e22: 1.0,
    ///     e31: 1.0, e32: 1.0,
    /// };
    ///
    /// let vec = DVec2::new(1.0, 2.0);
    ///
    /// let result = matrix.dot_vec(vec);
    ///
    /// assert_eq!(result, DVec3::new(1.0, 2.0, 3.0));
    /// ```
    pub fn dot_vec(&self, vec: DVec2) -> DVec3 {
        DVec3::new(
            vec.x * self.e11 + vec.y * self.e12,
            vec.x * self.e21 + vec.y * self.e22,
            vec.x * self.e31 + vec.y * self.e32,
        )
    }
}

#[cfg(test)]
mod tests;

#[inline]
fn keplers_equation(mean_anomaly: f64, eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    eccentric_anomaly - (eccentricity * eccentric_anomaly.sin()) - mean_anomaly
}
#[inline]
fn keplers_equation_derivative(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    1.0 - (eccentricity * eccentric_anomaly.cos())
}
