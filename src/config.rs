//! JSON configuration of a simulated system.
//!
//! A configuration maps body identifiers to orbital element records.
//! Moons can either be nested under their planet's `moons` table or
//! declared at the top level with an explicit `parent`:
//!
//! ```json
//! {
//!   "frame_count": 365,
//!   "total_duration": 365.25,
//!   "epoch": "2000-01-01T12:00:00Z",
//!   "bodies": {
//!     "sun": { "kind": "star", "color": "orange", "marker_size": 8 },
//!     "earth": {
//!       "semi_major_axis": 1.0, "eccentricity": 0.0167, "orbital_period": 365.25,
//!       "moons": {
//!         "moon": { "semi_major_axis": 0.00257, "eccentricity": 0.0549, "orbital_period": 27.32 }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Bodies without a parent orbit the system origin.

use std::{
    collections::{BTreeMap, HashMap, VecDeque},
    fs,
    path::Path,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Body, BodyId, BodyKind, ConfigError, OrbitalElements, SimulationParams, Universe};

/// 2000-01-01T12:00:00Z as a Unix timestamp.
const J2000_UNIX_SECONDS: i64 = 946_728_000;

/// The J2000 epoch, used when a configuration does not name one.
pub fn j2000() -> DateTime<Utc> {
    DateTime::from_timestamp(J2000_UNIX_SECONDS, 0).unwrap_or_default()
}

fn default_color() -> String {
    Body::DEFAULT_COLOR.to_string()
}

fn default_marker_size() -> f64 {
    Body::DEFAULT_MARKER_SIZE
}

/// The configuration record of a single body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    /// The orbital elements, relative to the parent.
    #[serde(flatten)]
    pub elements: OrbitalElements,

    /// The identifier of the body this one orbits.
    ///
    /// Optional for nested moons, which orbit the body they are nested under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// The display color.
    #[serde(default = "default_color")]
    pub color: String,

    /// The display marker size.
    #[serde(default = "default_marker_size")]
    pub marker_size: f64,

    /// What sort of body this is.
    #[serde(default)]
    pub kind: BodyKind,

    /// Satellites of this body, keyed by identifier.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub moons: BTreeMap<String, BodyConfig>,

    // Keys matching nothing above; rejected when the universe is built.
    #[serde(flatten)]
    unknown: BTreeMap<String, serde_json::Value>,
}

impl BodyConfig {
    /// Creates a body record with default display metadata and no moons.
    pub fn new(elements: OrbitalElements) -> Self {
        Self {
            elements,
            parent: None,
            color: default_color(),
            marker_size: default_marker_size(),
            kind: BodyKind::default(),
            moons: BTreeMap::new(),
            unknown: BTreeMap::new(),
        }
    }

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

    /// Sets an explicit parent identifier.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Nests a moon under this body.
    pub fn with_moon(mut self, name: impl Into<String>, moon: BodyConfig) -> Self {
        self.moons.insert(name.into(), moon);
        self
    }

    fn check_known_fields(&self, name: &str) -> Result<(), ConfigError> {
        if self.unknown.is_empty() {
            return Ok(());
        }

        let fields: Vec<String> = self.unknown.keys().map(|k| format!("'{k}'")).collect();
        Err(ConfigError::InvalidElements {
            body: name.to_string(),
            reason: format!("unknown field(s) {}", fields.join(", ")),
        })
    }

    fn to_body(&self, name: &str) -> Body {
        Body::new(name, self.elements)
            .with_color(self.color.clone())
            .with_marker_size(self.marker_size)
            .with_kind(self.kind)
    }
}

/// A full simulation: global parameters plus every body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// The number of animation frames.
    pub frame_count: usize,

    /// The simulated time spanned by all frames, in orbital-period units.
    pub total_duration: f64,

    /// The date of frame zero. Only used to display dates.
    #[serde(default = "j2000")]
    pub epoch: DateTime<Utc>,

    /// Every top-level body, keyed by identifier.
    pub bodies: BTreeMap<String, BodyConfig>,
}

/// One body pulled out of the nested configuration, with its parent resolved to a name.
struct FlatBody<'a> {
    name: &'a str,
    config: &'a BodyConfig,
    parent: Option<&'a str>,
}

impl SimulationConfig {
    /// Parses a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serializes this configuration as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The frame parameters, checked for sanity.
    pub fn params(&self) -> Result<SimulationParams, ConfigError> {
        if self.frame_count == 0 {
            return Err(ConfigError::NoFrames);
        }
        if !(self.total_duration.is_finite() && self.total_duration > 0.0) {
            return Err(ConfigError::InvalidDuration(self.total_duration));
        }

        Ok(SimulationParams::new(self.frame_count, self.total_duration))
    }

    /// Resolves every body into a [`Universe`], parents before children.
    ///
    /// Fails on the first body that is invalid, declared twice, orbits
    /// itself, names an unknown parent or takes part in a parent cycle.
    pub fn build_universe(&self) -> Result<Universe, ConfigError> {
        let mut flat = Vec::new();
        flatten_bodies(&self.bodies, None, &mut flat)?;

        let mut index_of: HashMap<&str, usize> = HashMap::with_capacity(flat.len());
        for (i, entry) in flat.iter().enumerate() {
            if index_of.insert(entry.name, i).is_some() {
                return Err(ConfigError::DuplicateBody(entry.name.to_string()));
            }
        }

        let mut satellites: Vec<Vec<usize>> = vec![Vec::new(); flat.len()];
        let mut roots = VecDeque::new();
        for (i, entry) in flat.iter().enumerate() {
            entry.config.check_known_fields(entry.name)?;
            entry.config.elements.validate(entry.name)?;

            match entry.parent {
                None => roots.push_back(i),
                Some(parent) if parent == entry.name => {
                    return Err(ConfigError::SelfParent(entry.name.to_string()));
                }
                Some(parent) => match index_of.get(parent) {
                    Some(&p) => satellites[p].push(i),
                    None => {
                        return Err(ConfigError::MissingParent {
                            body: entry.name.to_string(),
                            parent: parent.to_string(),
                        })
                    }
                },
            }
        }

        // Breadth-first from the roots; anything never reached sits on a cycle.
        let mut ids: Vec<Option<BodyId>> = vec![None; flat.len()];
        let mut universe = Universe::new();
        while let Some(i) = roots.pop_front() {
            let entry = &flat[i];
            let parent_id = entry
                .parent
                .and_then(|p| index_of.get(p))
                .and_then(|&p| ids[p]);

            let id = universe
                .add_body(entry.config.to_body(entry.name), parent_id)
                .map_err(|(err, _)| err)?;
            ids[i] = Some(id);
            roots.extend(satellites[i].iter().copied());
        }

        if let Some(i) = ids.iter().position(Option::is_none) {
            return Err(ConfigError::ParentCycle(flat[i].name.to_string()));
        }

        Ok(universe)
    }

    /// Builds the universe and frame parameters in one go.
    pub fn load_system(&self) -> Result<(Universe, SimulationParams), ConfigError> {
        let params = self.params()?;
        let universe = self.build_universe()?;

        tracing::info!(
            bodies = universe.len(),
            frames = params.frame_count,
            duration = params.total_duration,
            "loaded system configuration"
        );

        Ok((universe, params))
    }
}

fn flatten_bodies<'a>(
    bodies: &'a BTreeMap<String, BodyConfig>,
    nested_under: Option<&'a str>,
    out: &mut Vec<FlatBody<'a>>,
) -> Result<(), ConfigError> {
    for (name, config) in bodies {
        let parent = match (nested_under, config.parent.as_deref()) {
            (Some(outer), Some(declared)) if outer != declared => {
                return Err(ConfigError::ConflictingParent {
                    body: name.clone(),
                    nested_under: outer.to_string(),
                    declared: declared.to_string(),
                });
            }
            (Some(outer), _) => Some(outer),
            (None, declared) => declared,
        };

        out.push(FlatBody {
            name: name.as_str(),
            config,
            parent,
        });
        flatten_bodies(&config.moons, Some(name.as_str()), out)?;
    }

    Ok(())
}
