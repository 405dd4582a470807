//! This module contains presets for the planets and dwarf planets of
//! the Solar System, with their best-known moons nested under them.
//!
//! Distances are in AU, periods in days and angles in degrees,
//! referenced to the J2000 ecliptic.

use super::moons;
use crate::{BodyConfig, BodyKind, OrbitalElements};

/// Returns Mercury.
pub fn mercury() -> BodyConfig {
    BodyConfig::new(OrbitalElements::new(
        0.387098, 0.205630, 7.005, 29.124, 48.331, 174.796, 87.969,
    ))
    .with_color("grey")
}

/// Returns Venus.
pub fn venus() -> BodyConfig {
    BodyConfig::new(OrbitalElements::new(
        0.723332, 0.006772, 3.39458, 54.884, 76.680, 50.115, 224.701,
    ))
    .with_color("goldenrod")
    .with_marker_size(3.0)
}

/// Returns the Earth, with the Moon.
pub fn earth() -> BodyConfig {
    BodyConfig::new(OrbitalElements::new(
        1.000001, 0.0167086, 0.00005, 114.20783, -11.26064, 358.617, 365.256,
    ))
    .with_color("blue")
    .with_marker_size(4.0)
    .with_moon("moon", moons::the_moon())
}

/// Returns Mars, with Phobos and Deimos.
pub fn mars() -> BodyConfig {
    BodyConfig::new(OrbitalElements::new(
        1.523679, 0.0934, 1.850, 286.502, 49.558, 19.412, 686.980,
    ))
    .with_color("red")
    .with_marker_size(3.0)
    .with_moon("phobos", moons::phobos())
    .with_moon("deimos", moons::deimos())
}

/// Returns Jupiter, with the Galilean moons.
pub fn jupiter() -> BodyConfig {
    BodyConfig::new(OrbitalElements::new(
        5.2044, 0.0489, 1.303, 273.867, 100.464, 20.020, 4332.59,
    ))
    .with_color("peru")
    .with_marker_size(6.0)
    .with_moon("io", moons::io())
    .with_moon("europa", moons::europa())
    .with_moon("ganymede", moons::ganymede())
    .with_moon("callisto", moons::callisto())
}

/// Returns Saturn, with Titan, Enceladus and Iapetus.
pub fn saturn() -> BodyConfig {
    BodyConfig::new(OrbitalElements::new(
        9.5826, 0.0565, 2.485, 339.392, 113.665, 317.020, 10_759.22,
    ))
    .with_color("khaki")
    .with_marker_size(5.0)
    .with_moon("titan", moons::titan())
    .with_moon("enceladus", moons::enceladus())
    .with_moon("iapetus", moons::iapetus())
}

/// Returns Uranus, with Miranda.
pub fn uranus() -> BodyConfig {
    BodyConfig::new(OrbitalElements::new(
        19.2184, 0.046381, 0.773, 96.998857, 74.006, 142.2386, 30_688.5,
    ))
    .with_color("lightseagreen")
    .with_marker_size(4.0)
    .with_moon("miranda", moons::miranda())
}

/// Returns Neptune, with Triton.
pub fn neptune() -> BodyConfig {
    BodyConfig::new(OrbitalElements::new(
        30.110387, 0.008678, 1.770, 273.187, 131.783, 256.228, 60_195.0,
    ))
    .with_color("royalblue")
    .with_marker_size(4.0)
    .with_moon("triton", moons::triton())
}

fn dwarf_planet(elements: OrbitalElements) -> BodyConfig {
    BodyConfig::new(elements)
        .with_kind(BodyKind::DwarfPlanet)
        .with_color("grey")
}

/// Returns Ceres.
pub fn ceres() -> BodyConfig {
    dwarf_planet(OrbitalElements::new(
        2.7675, 0.0758, 10.593, 73.597, 80.305, 77.372, 1682.0,
    ))
}

/// Returns 4 Vesta.
pub fn vesta() -> BodyConfig {
    dwarf_planet(OrbitalElements::new(
        2.36179, 0.0887, 7.142, 151.198, 103.851, 205.548, 1325.75,
    ))
}

/// Returns Pluto.
pub fn pluto() -> BodyConfig {
    dwarf_planet(OrbitalElements::new(
        39.48, 0.2488, 17.16, 113.834, 110.299, 14.53, 90_560.0,
    ))
}

/// Returns Haumea.
pub fn haumea() -> BodyConfig {
    dwarf_planet(OrbitalElements::new(
        43.218, 0.1887, 28.19, 239.041, 122.167, 218.205, 103_774.0,
    ))
}

/// Returns Makemake.
pub fn makemake() -> BodyConfig {
    dwarf_planet(OrbitalElements::new(
        45.715, 0.1559, 28.98, 294.834, 79.620, 165.514, 112_897.0,
    ))
}
