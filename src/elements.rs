use core::f64::consts::TAU;

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::{
    position::{altitude_at_true_anomaly, pqw_position_at_true_anomaly, transformation_matrix},
    ConfigError, Matrix3x2,
};

/// The static orbital parameters of one body, as they appear in configuration.
///
/// Angles are in degrees. Distances and times are in whatever units the
/// configuration uses; the bundled presets use AU and days.
///
/// An orbital period of zero marks a stationary body, such as the
/// primary star.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitalElements {
    /// The semi-major axis, measured from the focus (the parent body).
    pub semi_major_axis: f64,

    /// The eccentricity. Must be in `[0, 1)`.
    pub eccentricity: f64,

    /// The inclination of the orbital plane, in degrees.
    pub inclination_deg: f64,

    /// The argument of periapsis, in degrees.
    pub arg_periapsis_deg: f64,

    /// The longitude of the ascending node, in degrees.
    pub long_asc_node_deg: f64,

    /// The mean anomaly at the simulation epoch, in degrees.
    pub mean_anomaly_at_epoch_deg: f64,

    /// The orbital period. Zero means the body does not move.
    pub orbital_period: f64,
}

impl OrbitalElements {
    /// Creates a new set of orbital elements.
    pub fn new(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination_deg: f64,
        arg_periapsis_deg: f64,
        long_asc_node_deg: f64,
        mean_anomaly_at_epoch_deg: f64,
        orbital_period: f64,
    ) -> Self {
        Self {
            semi_major_axis,
            eccentricity,
            inclination_deg,
            arg_periapsis_deg,
            long_asc_node_deg,
            mean_anomaly_at_epoch_deg,
            orbital_period,
        }
    }

    /// Elements of a body that sits still at its parent (or the origin).
    pub fn stationary() -> Self {
        Self::default()
    }

    /// Whether the body never moves along its orbit.
    pub fn is_stationary(&self) -> bool {
        self.orbital_period == 0.0
    }

    /// Checks that these elements describe a closed orbit.
    ///
    /// `body` is only used to name the culprit in the error.
    pub fn validate(&self, body: &str) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidElements {
            body: body.to_string(),
            reason,
        };

        let fields = [
            ("semi_major_axis", self.semi_major_axis),
            ("eccentricity", self.eccentricity),
            ("inclination_deg", self.inclination_deg),
            ("arg_periapsis_deg", self.arg_periapsis_deg),
            ("long_asc_node_deg", self.long_asc_node_deg),
            ("mean_anomaly_at_epoch_deg", self.mean_anomaly_at_epoch_deg),
            ("orbital_period", self.orbital_period),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(format!("{name} is not finite ({value})")));
        }

        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(invalid(format!(
                "eccentricity {} is outside [0, 1); only closed orbits are supported",
                self.eccentricity
            )));
        }
        if self.semi_major_axis < 0.0 {
            return Err(invalid(format!(
                "semi-major axis {} is negative",
                self.semi_major_axis
            )));
        }
        if self.orbital_period < 0.0 {
            return Err(invalid(format!(
                "orbital period {} is negative",
                self.orbital_period
            )));
        }

        Ok(())
    }
}

/// A Keplerian orbit with its tilt and mean motion cached.
///
/// Built once per body from its [`OrbitalElements`], then evaluated for
/// every frame. Angles are stored in radians.
///
/// # Example
/// ```
/// use glam::DVec3;
/// use kepler_orrery::{Orbit, OrbitalElements};
///
/// let elements = OrbitalElements::new(2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 10.0);
/// let orbit = Orbit::from(&elements);
///
/// assert_eq!(orbit.position_at_true_anomaly(0.0), DVec3::new(2.0, 0.0, 0.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Orbit {
    semi_major_axis: f64,
    eccentricity: f64,
    inclination: f64,
    arg_pe: f64,
    long_asc_node: f64,
    mean_anomaly_at_epoch: f64,
    mean_motion: Option<f64>,
    transformation_matrix: Matrix3x2,
}

impl Orbit {
    /// Creates a new orbit from radian angles and a period.
    ///
    /// A period of zero makes the orbit stationary.
    pub fn new(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination: f64,
        arg_pe: f64,
        long_asc_node: f64,
        mean_anomaly_at_epoch: f64,
        orbital_period: f64,
    ) -> Self {
        let mean_motion = if orbital_period == 0.0 {
            None
        } else {
            Some(TAU / orbital_period)
        };

        Self {
            semi_major_axis,
            eccentricity,
            inclination,
            arg_pe,
            long_asc_node,
            mean_anomaly_at_epoch,
            mean_motion,
            transformation_matrix: transformation_matrix(inclination, arg_pe, long_asc_node),
        }
    }

    /// The semi-major axis.
    #[inline]
    pub fn get_semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    /// The eccentricity.
    #[inline]
    pub fn get_eccentricity(&self) -> f64 {
        self.eccentricity
    }

    /// The inclination, in radians.
    #[inline]
    pub fn get_inclination(&self) -> f64 {
        self.inclination
    }

    /// The argument of periapsis, in radians.
    #[inline]
    pub fn get_arg_pe(&self) -> f64 {
        self.arg_pe
    }

    /// The longitude of the ascending node, in radians.
    #[inline]
    pub fn get_long_asc_node(&self) -> f64 {
        self.long_asc_node
    }

    /// The mean anomaly at epoch, in radians.
    #[inline]
    pub fn get_mean_anomaly_at_epoch(&self) -> f64 {
        self.mean_anomaly_at_epoch
    }

    /// The mean motion in radians per time unit, or `None` for a stationary orbit.
    #[inline]
    pub fn get_mean_motion(&self) -> Option<f64> {
        self.mean_motion
    }

    /// The cached PQW-to-reference-frame matrix.
    #[inline]
    pub fn get_transformation_matrix(&self) -> Matrix3x2 {
        self.transformation_matrix
    }

    /// Whether this orbit never advances.
    #[inline]
    pub fn is_stationary(&self) -> bool {
        self.mean_motion.is_none()
    }

    /// Gets the mean anomaly after `elapsed` time units, wrapped into `[0, tau)`.
    ///
    /// Returns `None` for a stationary orbit, which has no mean motion.
    pub fn get_mean_anomaly_at_time(&self, elapsed: f64) -> Option<f64> {
        self.mean_motion
            .map(|n| (self.mean_anomaly_at_epoch + n * elapsed).rem_euclid(TAU))
    }

    /// Gets the distance from the focus at a given true anomaly.
    pub fn get_altitude_at_true_anomaly(&self, true_anomaly: f64) -> f64 {
        altitude_at_true_anomaly(self.semi_major_axis, self.eccentricity, true_anomaly)
    }

    /// Gets the in-plane position at a given true anomaly.
    pub fn get_pqw_position_at_true_anomaly(&self, true_anomaly: f64) -> DVec2 {
        pqw_position_at_true_anomaly(self.semi_major_axis, self.eccentricity, true_anomaly)
    }

    /// Tilts an in-plane vector into the reference frame.
    #[inline]
    pub fn transform_pqw_vector(&self, pqw: DVec2) -> DVec3 {
        self.transformation_matrix.dot_vec(pqw)
    }

    /// Gets the position relative to the parent at a given true anomaly (radians).
    #[doc(alias = "get_position_at_angle")]
    pub fn position_at_true_anomaly(&self, true_anomaly: f64) -> DVec3 {
        self.transform_pqw_vector(self.get_pqw_position_at_true_anomaly(true_anomaly))
    }
}

impl From<&OrbitalElements> for Orbit {
    fn from(elements: &OrbitalElements) -> Self {
        Self::new(
            elements.semi_major_axis,
            elements.eccentricity,
            elements.inclination_deg.to_radians(),
            elements.arg_periapsis_deg.to_radians(),
            elements.long_asc_node_deg.to_radians(),
            elements.mean_anomaly_at_epoch_deg.to_radians(),
            elements.orbital_period,
        )
    }
}

impl From<OrbitalElements> for Orbit {
    fn from(elements: OrbitalElements) -> Self {
        Self::from(&elements)
    }
}
