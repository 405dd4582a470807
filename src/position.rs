//! Turning an angle along an orbit into a position in space.
//!
//! Positions are first computed in the
//! [perifocal coordinate system](https://en.wikipedia.org/wiki/Perifocal_coordinate_system)
//! (PQW), where the first axis points at the periapsis, and are then
//! tilted into the reference frame by the argument of periapsis,
//! the inclination and the longitude of the ascending node, in that order.

use glam::{DVec2, DVec3};

use crate::Matrix3x2;

/// Builds the matrix that tilts a PQW vector into the reference frame.
///
/// This is the product `Rz(long_asc_node) * Rx(inclination) * Rz(arg_pe)`
/// restricted to the orbital plane. The order matters: swapping any two
/// rotations gives a different orbit for inclined orbits with a non-zero node.
///
/// All angles are in radians.
///
/// # Example
/// ```
/// use kepler_orrery::{transformation_matrix, Matrix3x2};
///
/// assert_eq!(transformation_matrix(0.0, 0.0, 0.0), Matrix3x2 {
///     e11: 1.0, e12: 0.0,
///     e21: 0.0, e22: 1.0,
///     e31: 0.0, e32: 0.0,
/// });
/// ```
pub fn transformation_matrix(inclination: f64, arg_pe: f64, long_asc_node: f64) -> Matrix3x2 {
    let (sin_inc, cos_inc) = inclination.sin_cos();
    let (sin_arg_pe, cos_arg_pe) = arg_pe.sin_cos();
    let (sin_lan, cos_lan) = long_asc_node.sin_cos();

    // https://downloads.rene-schwarz.com/download/M001-Keplerian_Orbit_Elements_to_Cartesian_State_Vectors.pdf
    Matrix3x2 {
        e11: cos_arg_pe * cos_lan - sin_arg_pe * cos_inc * sin_lan,
        e12: -(sin_arg_pe * cos_lan + cos_arg_pe * cos_inc * sin_lan),

        e21: cos_arg_pe * sin_lan + sin_arg_pe * cos_inc * cos_lan,
        e22: cos_arg_pe * cos_inc * cos_lan - sin_arg_pe * sin_lan,

        e31: sin_arg_pe * sin_inc,
        e32: cos_arg_pe * sin_inc,
    }
}

/// Gets the distance from the focus at a given true anomaly.
///
/// `r = a(1 - e^2) / (1 + e cos(v))`
#[inline]
pub fn altitude_at_true_anomaly(semi_major_axis: f64, eccentricity: f64, true_anomaly: f64) -> f64 {
    semi_major_axis * (1.0 - eccentricity * eccentricity)
        / (1.0 + eccentricity * true_anomaly.cos())
}

/// Gets the in-plane (PQW) position at a given true anomaly.
///
/// # Example
/// ```
/// use glam::DVec2;
/// use kepler_orrery::pqw_position_at_true_anomaly;
///
/// let pos = pqw_position_at_true_anomaly(100.0, 0.0, 0.0);
///
/// assert_eq!(pos, DVec2::new(100.0, 0.0));
/// ```
pub fn pqw_position_at_true_anomaly(
    semi_major_axis: f64,
    eccentricity: f64,
    true_anomaly: f64,
) -> DVec2 {
    let alt = altitude_at_true_anomaly(semi_major_axis, eccentricity, true_anomaly);
    let (sin, cos) = true_anomaly.sin_cos();
    DVec2::new(alt * cos, alt * sin)
}

/// Gets the 3D position of a body at a given true anomaly.
///
/// Angles other than the true anomaly are given in degrees, the true
/// anomaly in radians. When a parent position is supplied the result
/// is translated by it, which is how moons ride along with their planet.
///
/// If you are evaluating the same orbit many times, build an
/// [`Orbit`][crate::Orbit] once and use
/// [`position_at_true_anomaly`][crate::Orbit::position_at_true_anomaly]
/// instead; it caches the trigonometry of the tilt.
///
/// # Example
/// ```
/// use glam::DVec3;
/// use kepler_orrery::position;
///
/// let planet = position(0.0, 1.0, 0.0, 0.0, 0.0, 0.0, None);
/// assert_eq!(planet, DVec3::new(1.0, 0.0, 0.0));
///
/// let moon = position(0.0, 0.5, 0.0, 0.0, 0.0, 0.0, Some(planet));
/// assert_eq!(moon, DVec3::new(1.5, 0.0, 0.0));
/// ```
pub fn position(
    true_anomaly: f64,
    semi_major_axis: f64,
    eccentricity: f64,
    inclination_deg: f64,
    arg_periapsis_deg: f64,
    long_asc_node_deg: f64,
    parent_position: Option<DVec3>,
) -> DVec3 {
    let matrix = transformation_matrix(
        inclination_deg.to_radians(),
        arg_periapsis_deg.to_radians(),
        long_asc_node_deg.to_radians(),
    );
    let pqw = pqw_position_at_true_anomaly(semi_major_axis, eccentricity, true_anomaly);

    matrix.dot_vec(pqw) + parent_position.unwrap_or(DVec3::ZERO)
}
