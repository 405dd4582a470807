use serde::{Deserialize, Serialize};

use crate::OrbitalElements;

/// What sort of celestial body this is.
///
/// Only used by renderers to pick styles; it has no effect on the orbit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    /// A star, usually the stationary primary.
    Star,
    /// A planet.
    #[default]
    Planet,
    /// A dwarf planet or large asteroid.
    DwarfPlanet,
    /// A natural satellite of another body.
    Moon,
    /// A comet.
    Comet,
}

/// A struct representing a celestial body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// The identifier of the celestial body.
    pub name: String,

    /// The orbital elements of the body, relative to its parent.
    pub elements: OrbitalElements,

    /// The display color, passed through to the renderer unchanged.
    pub color: String,

    /// The display marker size, passed through to the renderer unchanged.
    pub marker_size: f64,

    /// What sort of body this is.
    pub kind: BodyKind,
}

impl Body {
    /// Creates a new `Body` instance with default display metadata.
    ///
    /// # Arguments
    ///
    /// * `name` - The identifier of the celestial body.
    /// * `elements` - The orbital elements of the body.
    pub fn new(name: impl Into<String>, elements: OrbitalElements) -> Self {
        Self {
            name: name.into(),
            elements,
            color: Self::DEFAULT_COLOR.to_string(),
            marker_size: Self::DEFAULT_MARKER_SIZE,
            kind: BodyKind::default(),
        }
    }

    /// The color used when none is configured.
    pub const DEFAULT_COLOR: &'static str = "grey";

    /// The marker size used when none is configured.
    pub const DEFAULT_MARKER_SIZE: f64 = 2.0;

    /// Sets the display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the display marker size.
    pub fn with_marker_size(mut self, marker_size: f64) -> Self {
        self.marker_size = marker_size;
        self
    }

    /// Sets the kind of body.
    pub fn with_kind(mut self, kind: BodyKind) -> Self {
        self.kind = kind;
        self
    }
}
