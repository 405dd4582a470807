//! This module contains presets for natural satellites.
//!
//! Distances are in AU and periods in days, relative to the parent body.
//! Inclinations are measured against the reference plane of the system,
//! not the parent's equator.

use crate::{BodyConfig, BodyKind, OrbitalElements};

fn moon(elements: OrbitalElements, color: &str) -> BodyConfig {
    BodyConfig::new(elements)
        .with_kind(BodyKind::Moon)
        .with_color(color)
        .with_marker_size(1.0)
}

/// Returns Earth's Moon.
pub fn the_moon() -> BodyConfig {
    moon(
        OrbitalElements::new(0.00257, 0.0549, 5.145, 318.15, 125.08, 135.27, 27.322),
        "red",
    )
}

/// Returns Phobos, the inner moon of Mars.
pub fn phobos() -> BodyConfig {
    moon(
        OrbitalElements::new(6.26746e-5, 0.0151, 1.093, 150.057, 16.946, 91.059, 0.31891),
        "brown",
    )
}

/// Returns Deimos, the outer moon of Mars.
pub fn deimos() -> BodyConfig {
    moon(
        OrbitalElements::new(1.56841e-4, 0.00033, 0.93, 260.73, 24.525, 325.329, 1.263),
        "tan",
    )
}

/// Returns Io.
pub fn io() -> BodyConfig {
    moon(
        OrbitalElements::new(0.002819, 0.0041, 0.05, 84.129, 43.977, 342.021, 1.769),
        "yellow",
    )
}

/// Returns Europa.
pub fn europa() -> BodyConfig {
    moon(
        OrbitalElements::new(0.004484, 0.0094, 0.47, 88.97, 219.106, 171.016, 3.551),
        "wheat",
    )
}

/// Returns Ganymede.
pub fn ganymede() -> BodyConfig {
    moon(
        OrbitalElements::new(0.007155, 0.0011, 0.2, 192.417, 63.552, 317.54, 7.155),
        "grey",
    )
}

/// Returns Callisto.
pub fn callisto() -> BodyConfig {
    moon(
        OrbitalElements::new(0.012585, 0.0074, 0.192, 52.643, 298.848, 181.408, 16.689),
        "dimgrey",
    )
}

/// Returns Titan.
pub fn titan() -> BodyConfig {
    moon(
        OrbitalElements::new(0.00816, 0.0288, 0.34854, 180.532, 28.06, 163.31, 15.945),
        "gold",
    )
}

/// Returns Enceladus.
pub fn enceladus() -> BodyConfig {
    moon(
        OrbitalElements::new(0.00159, 0.0047, 0.019, 211.923, 40.594, 199.686, 1.370),
        "white",
    )
}

/// Returns Iapetus.
pub fn iapetus() -> BodyConfig {
    moon(
        OrbitalElements::new(0.02381, 0.0286125, 15.47, 271.606, 81.105, 201.789, 79.32),
        "silver",
    )
}

/// Returns Miranda.
pub fn miranda() -> BodyConfig {
    moon(
        OrbitalElements::new(8.68e-4, 0.0013, 4.232, 68.312, 326.438, 311.33, 1.413479),
        "lightblue",
    )
}

/// Returns Triton.
///
/// Triton orbits Neptune backwards, hence the inclination above 90 degrees.
pub fn triton() -> BodyConfig {
    moon(
        OrbitalElements::new(0.002371415, 0.000016, 156.885, 344.046, 172.431, 264.775, 5.877),
        "pink",
    )
}
