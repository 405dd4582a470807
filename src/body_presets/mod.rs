//! Ready-made bodies of the Solar System.
//!
//! Each preset is a [`BodyConfig`] so it can be dropped into a
//! [`SimulationConfig`], tweaked, or exported as JSON.

use std::collections::BTreeMap;

use crate::{config::j2000, BodyConfig, SimulationConfig};

pub mod comets;
pub mod moons;
pub mod planets;
pub mod stars;

/// Frames in the bundled system: one per day of a year.
pub const SOLAR_SYSTEM_FRAMES: usize = 365;

/// Simulated days covered by the bundled system.
pub const SOLAR_SYSTEM_DURATION: f64 = 365.25;

/// Every preset body, keyed by identifier, moons nested under their planets.
pub fn solar_system_bodies() -> BTreeMap<String, BodyConfig> {
    [
        ("sun", stars::the_sun()),
        ("mercury", planets::mercury()),
        ("venus", planets::venus()),
        ("earth", planets::earth()),
        ("mars", planets::mars()),
        ("vesta", planets::vesta()),
        ("ceres", planets::ceres()),
        ("jupiter", planets::jupiter()),
        ("saturn", planets::saturn()),
        ("uranus", planets::uranus()),
        ("neptune", planets::neptune()),
        ("pluto", planets::pluto()),
        ("haumea", planets::haumea()),
        ("makemake", planets::makemake()),
        ("halley", comets::halley()),
    ]
    .into_iter()
    .map(|(name, body)| (name.to_string(), body))
    .collect()
}

/// The whole Solar System, animated over one year starting at J2000.
///
/// # Example
/// ```
/// use kepler_orrery::{body_presets::solar_system, Trajectories};
///
/// let config = solar_system();
/// let (universe, params) = config.load_system().unwrap();
/// let trajectories = Trajectories::generate_all(&universe, params).unwrap();
///
/// let earth = universe.get_body_index_with_name("earth").unwrap();
/// assert_eq!(trajectories.get(earth).unwrap().len(), 365);
/// ```
pub fn solar_system() -> SimulationConfig {
    SimulationConfig {
        frame_count: SOLAR_SYSTEM_FRAMES,
        total_duration: SOLAR_SYSTEM_DURATION,
        epoch: j2000(),
        bodies: solar_system_bodies(),
    }
}
