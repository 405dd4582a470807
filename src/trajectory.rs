//! Precomputed per-frame positions for every body in a [`Universe`].

use glam::DVec3;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    solve_eccentric_anomalies, true_anomalies, Body, BodyId, Orbit, SolveReport, SolverOptions,
    TrajectoryError, Universe,
};

/// How many frames to generate and how much simulated time they span.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParams {
    /// The number of frames in every trajectory.
    pub frame_count: usize,

    /// The simulated time covered by all frames together, in the same
    /// unit as the orbital periods.
    pub total_duration: f64,

    /// Stopping criteria for the Kepler solve of each body.
    pub solver: SolverOptions,
}

impl SimulationParams {
    /// Creates simulation parameters with the default solver options.
    pub fn new(frame_count: usize, total_duration: f64) -> Self {
        Self {
            frame_count,
            total_duration,
            solver: SolverOptions::default(),
        }
    }

    /// The simulated time between two consecutive frames.
    ///
    /// Zero when there are no frames.
    pub fn time_per_frame(&self) -> f64 {
        if self.frame_count == 0 {
            0.0
        } else {
            self.total_duration / self.frame_count as f64
        }
    }

    /// The simulated time elapsed at a frame index.
    pub fn elapsed_at(&self, frame: usize) -> f64 {
        frame as f64 * self.time_per_frame()
    }
}

/// The positions of one body, one per frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trajectory {
    positions: Vec<DVec3>,
}

impl Trajectory {
    /// The number of frames.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the trajectory has no frames.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The position at a frame index.
    pub fn get(&self, frame: usize) -> Option<DVec3> {
        self.positions.get(frame).copied()
    }

    /// All positions, ordered by frame index.
    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// Iterates over the positions in frame order.
    pub fn iter(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.positions.iter().copied()
    }
}

impl From<Vec<DVec3>> for Trajectory {
    fn from(positions: Vec<DVec3>) -> Self {
        Self { positions }
    }
}

/// Generates the trajectory of a single orbit.
///
/// If the orbit belongs to a moon, pass its parent's trajectory for the
/// same frame range; each frame is then translated by the parent's
/// position at that frame.
///
/// # Example
/// ```
/// use kepler_orrery::{generate, Orbit, OrbitalElements, SimulationParams};
///
/// let orbit = Orbit::from(OrbitalElements::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 4.0));
/// let trajectory = generate(&orbit, &SimulationParams::new(4, 4.0), None).unwrap();
///
/// assert_eq!(trajectory.len(), 4);
/// assert!((trajectory.get(1).unwrap().y - 1.0).abs() < 1e-9);
/// ```
pub fn generate(
    orbit: &Orbit,
    params: &SimulationParams,
    parent: Option<&Trajectory>,
) -> Result<Trajectory, TrajectoryError> {
    generate_with_report(orbit, params, parent).map(|(trajectory, _)| trajectory)
}

/// Like [`generate`], but also returns how the Kepler solve went.
///
/// The report is `None` for stationary orbits, which skip the solver.
pub fn generate_with_report(
    orbit: &Orbit,
    params: &SimulationParams,
    parent: Option<&Trajectory>,
) -> Result<(Trajectory, Option<SolveReport>), TrajectoryError> {
    let frame_count = params.frame_count;
    if let Some(parent) = parent {
        if parent.len() != frame_count {
            return Err(TrajectoryError::FrameCountMismatch {
                expected: frame_count,
                actual: parent.len(),
            });
        }
    }

    let (mut positions, report) = if orbit.is_stationary() {
        (vec![orbit.position_at_true_anomaly(0.0); frame_count], None)
    } else {
        let mean_anomalies: Vec<f64> = (0..frame_count)
            .filter_map(|k| orbit.get_mean_anomaly_at_time(params.elapsed_at(k)))
            .collect();

        let eccentricity = orbit.get_eccentricity();
        let (eccentric_anomalies, report) =
            solve_eccentric_anomalies(&mean_anomalies, eccentricity, params.solver);

        let positions = true_anomalies(&eccentric_anomalies, eccentricity)
            .into_iter()
            .map(|v| orbit.position_at_true_anomaly(v))
            .collect();

        (positions, Some(report))
    };

    if let Some(parent) = parent {
        for (pos, parent_pos) in positions.iter_mut().zip(parent.positions()) {
            *pos += *parent_pos;
        }
    }

    Ok((Trajectory::from(positions), report))
}

/// The trajectories of every body in a universe, indexed by [`BodyId`].
///
/// Bodies are filled in parents first. A body can only be generated once
/// its parent has been; anything else is rejected rather than silently
/// treated as orbiting the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectories {
    trajectories: Vec<Option<Trajectory>>,
    params: SimulationParams,
}

impl Trajectories {
    /// Creates an empty set of trajectories for a universe.
    pub fn new(universe: &Universe, params: SimulationParams) -> Self {
        Self {
            trajectories: vec![None; universe.len()],
            params,
        }
    }

    /// Generates every body of the universe, parents before children.
    ///
    /// With the `parallel` feature, bodies at the same depth of the parent
    /// forest are generated concurrently.
    pub fn generate_all(
        universe: &Universe,
        params: SimulationParams,
    ) -> Result<Self, TrajectoryError> {
        let mut trajectories = Self::new(universe, params);

        for level in universe.depth_levels() {
            #[cfg(feature = "parallel")]
            let computed = level
                .par_iter()
                .map(|&id| trajectories.compute(universe, id).map(|t| (id, t)))
                .collect::<Result<Vec<_>, _>>()?;

            #[cfg(not(feature = "parallel"))]
            let computed = level
                .iter()
                .map(|&id| trajectories.compute(universe, id).map(|t| (id, t)))
                .collect::<Result<Vec<_>, _>>()?;

            for (id, trajectory) in computed {
                trajectories.trajectories[id.index()] = Some(trajectory);
            }
        }

        Ok(trajectories)
    }

    /// Generates a single body, whose parent must already be generated.
    ///
    /// A body that was already generated is returned as-is.
    pub fn generate_body(
        &mut self,
        universe: &Universe,
        id: BodyId,
    ) -> Result<&Trajectory, TrajectoryError> {
        let slot = self
            .trajectories
            .get(id.index())
            .ok_or(TrajectoryError::UnknownBody(id))?;

        if slot.is_none() {
            let trajectory = self.compute(universe, id)?;
            self.trajectories[id.index()] = Some(trajectory);
        }

        self.trajectories[id.index()]
            .as_ref()
            .ok_or(TrajectoryError::UnknownBody(id))
    }

    fn compute(&self, universe: &Universe, id: BodyId) -> Result<Trajectory, TrajectoryError> {
        let body = universe
            .get_body(id)
            .ok_or(TrajectoryError::UnknownBody(id))?;
        let orbit = universe
            .get_orbit(id)
            .ok_or(TrajectoryError::UnknownBody(id))?;

        let parent = match universe.get_parent(id) {
            Some(parent_id) => Some(self.get(parent_id).ok_or_else(|| {
                TrajectoryError::ParentNotComputed {
                    body: body.name.clone(),
                    parent: universe
                        .get_body(parent_id)
                        .map(|p| p.name.clone())
                        .unwrap_or_else(|| parent_id.to_string()),
                }
            })?),
            None => None,
        };

        let (trajectory, report) = generate_with_report(orbit, &self.params, parent)?;

        match report {
            Some(report) if !report.converged => tracing::warn!(
                body = %body.name,
                iterations = report.iterations,
                max_correction = report.max_correction,
                "Kepler solve did not converge, using last estimate"
            ),
            Some(report) => tracing::debug!(
                body = %body.name,
                frames = trajectory.len(),
                iterations = report.iterations,
                "generated trajectory"
            ),
            None => tracing::debug!(
                body = %body.name,
                frames = trajectory.len(),
                "generated stationary trajectory"
            ),
        }

        Ok(trajectory)
    }

    /// The parameters these trajectories were generated with.
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// The trajectory of a body, if it has been generated.
    pub fn get(&self, id: BodyId) -> Option<&Trajectory> {
        self.trajectories.get(id.index()).and_then(Option::as_ref)
    }

    /// The position of a body at a frame index, if generated.
    pub fn position(&self, id: BodyId, frame: usize) -> Option<DVec3> {
        self.get(id).and_then(|t| t.get(frame))
    }

    /// Iterates over every generated trajectory together with its body.
    pub fn iter<'a>(
        &'a self,
        universe: &'a Universe,
    ) -> impl Iterator<Item = (BodyId, &'a Body, &'a Trajectory)> + 'a {
        universe
            .iter()
            .filter_map(|(id, body)| self.get(id).map(|t| (id, body, t)))
    }
}
