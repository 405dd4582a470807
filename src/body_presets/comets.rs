//! This module contains presets for comets.

use crate::{BodyConfig, BodyKind, OrbitalElements};

/// Returns 1P/Halley.
///
/// Its orbit is retrograde, hence the inclination above 90 degrees.
pub fn halley() -> BodyConfig {
    BodyConfig::new(OrbitalElements::new(
        17.834, 0.96714, 162.26, 111.33, 58.42, 38.38, 27_509.1,
    ))
    .with_kind(BodyKind::Comet)
    .with_color("cyan")
    .with_marker_size(2.0)
}
