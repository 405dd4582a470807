use core::fmt;
use std::collections::HashMap;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::{solve_eccentric_anomaly, true_anomaly, Body, BodyAddError, Orbit, SolverOptions};

/// A stable index of a body inside a [`Universe`].
///
/// Indices are handed out by [`Universe::add_body`] and never change
/// for the lifetime of the universe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(usize);

impl BodyId {
    /// The position of the body in its universe's arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Struct that holds every body of a system and how they orbit each other.
///
/// Bodies live in an arena and are addressed by [`BodyId`]. A body can only
/// be added once its parent is present, so the parent graph is always a
/// forest and can be walked parents-first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Universe {
    /// The celestial bodies in the universe and their relations.
    bodies: Vec<BodyWrapper>,

    /// Lookup from body name to index, filled once as bodies are added.
    names: HashMap<String, BodyId>,
}

/// Where a body sits in the parent forest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BodyRelation {
    /// The body this one orbits, or `None` if it orbits the system origin.
    pub parent: Option<BodyId>,
    /// The bodies orbiting this one, in insertion order.
    pub satellites: Vec<BodyId>,
    /// The number of ancestors; zero for bodies orbiting the origin.
    pub depth: usize,
}

#[derive(Clone, Debug, PartialEq)]
struct BodyWrapper {
    body: Body,
    orbit: Orbit,
    relations: BodyRelation,
}

impl Universe {
    /// Creates an empty universe.
    pub fn new() -> Universe {
        Universe::default()
    }

    /// Adds a body to the universe.
    /// `body`: The body to add into the universe.
    /// `satellite_of`: The index of the body that this body is orbiting.
    /// Returns: The index of the newly-added body, or the body back if it
    /// could not be added.
    pub fn add_body(
        &mut self,
        body: Body,
        satellite_of: Option<BodyId>,
    ) -> Result<BodyId, (BodyAddError, Body)> {
        let depth = match satellite_of {
            Some(parent) => match self.bodies.get(parent.0) {
                Some(wrapper) => wrapper.relations.depth + 1,
                None => return Err((BodyAddError::ParentNotFound(parent), body)),
            },
            None => 0,
        };
        if self.names.contains_key(&body.name) {
            return Err((BodyAddError::DuplicateName(body.name.clone()), body));
        }

        let id = BodyId(self.bodies.len());
        self.names.insert(body.name.clone(), id);
        self.bodies.push(BodyWrapper {
            orbit: Orbit::from(&body.elements),
            body,
            relations: BodyRelation {
                parent: satellite_of,
                satellites: Vec::new(),
                depth,
            },
        });
        if let Some(parent) = satellite_of {
            self.bodies[parent.0].relations.satellites.push(id);
        }

        Ok(id)
    }

    /// The number of bodies in the universe.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the universe has no bodies.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Iterates over every body with its index, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> + '_ {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, wrapper)| (BodyId(i), &wrapper.body))
    }

    /// Gets an immutable reference to a body in the universe.
    pub fn get_body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0).map(|wrapper| &wrapper.body)
    }

    /// Gets the cached orbit of a body in the universe.
    pub fn get_orbit(&self, id: BodyId) -> Option<&Orbit> {
        self.bodies.get(id.0).map(|wrapper| &wrapper.orbit)
    }

    /// Gets the relations of a body in the universe.
    pub fn get_body_relation(&self, id: BodyId) -> Option<&BodyRelation> {
        self.bodies.get(id.0).map(|wrapper| &wrapper.relations)
    }

    /// Gets the parent of a body, if it has one.
    pub fn get_parent(&self, id: BodyId) -> Option<BodyId> {
        self.get_body_relation(id).and_then(|r| r.parent)
    }

    /// Gets the index of a body with a given name.
    pub fn get_body_index_with_name(&self, name: &str) -> Option<BodyId> {
        self.names.get(name).copied()
    }

    /// Gets every body in parents-before-children order.
    ///
    /// Roots come first in insertion order, then each generation of
    /// satellites, so every body appears after its parent.
    pub fn evaluation_order(&self) -> Vec<BodyId> {
        self.depth_levels().into_iter().flatten().collect()
    }

    /// Groups the bodies by depth in the parent forest.
    ///
    /// Bodies in the same level never depend on each other, so a level
    /// can be evaluated in any order once all earlier levels are done.
    pub fn depth_levels(&self) -> Vec<Vec<BodyId>> {
        let mut levels: Vec<Vec<BodyId>> = Vec::new();
        let mut current: Vec<BodyId> = self
            .bodies
            .iter()
            .enumerate()
            .filter(|(_, w)| w.relations.parent.is_none())
            .map(|(i, _)| BodyId(i))
            .collect();

        while !current.is_empty() {
            let next = current
                .iter()
                .flat_map(|id| self.bodies[id.0].relations.satellites.iter().copied())
                .collect();
            levels.push(current);
            current = next;
        }

        levels
    }

    /// Gets the absolute position of a body after `elapsed` time units.
    ///
    /// This walks the parent chain and solves Kepler's equation once per
    /// ancestor. To animate many frames, generate
    /// [`Trajectories`][crate::Trajectories] instead.
    ///
    /// `solver` should match the [`SimulationParams::solver`][crate::SimulationParams::solver]
    /// used for any trajectories this is compared against.
    ///
    /// Returns: The absolute position, with bodies that have no parent
    /// orbiting the origin (0, 0, 0). `None` if the index is unknown.
    pub fn get_body_position(
        &self,
        id: BodyId,
        elapsed: f64,
        solver: SolverOptions,
    ) -> Option<DVec3> {
        let wrapper = self.bodies.get(id.0)?;
        let orbit = &wrapper.orbit;

        let true_anom = match orbit.get_mean_anomaly_at_time(elapsed) {
            Some(mean_anom) => true_anomaly(
                solve_eccentric_anomaly(mean_anom, orbit.get_eccentricity(), solver),
                orbit.get_eccentricity(),
            ),
            None => 0.0,
        };

        let mut position = orbit.position_at_true_anomaly(true_anom);

        if let Some(parent) = wrapper.relations.parent {
            position += self.get_body_position(parent, elapsed, solver)?;
        }

        Some(position)
    }
}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Universe with {} bodies", self.bodies.len())
    }
}
