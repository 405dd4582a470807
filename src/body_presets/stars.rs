//! This module contains presets for stars.
//!
//! "A star is a luminous spheroid of plasma held together by self-gravity."  
//!
//! \- [Wikipedia](https://en.wikipedia.org/wiki/Star)

use crate::{BodyConfig, BodyKind, OrbitalElements};

/// Returns the Sun, sitting still at the system origin.
pub fn the_sun() -> BodyConfig {
    BodyConfig::new(OrbitalElements::stationary())
        .with_kind(BodyKind::Star)
        .with_color("orange")
        .with_marker_size(8.0)
}
