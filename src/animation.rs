//! Playback state for a renderer walking through precomputed trajectories.

use chrono::{DateTime, Duration, Utc};
use glam::DVec3;

use crate::{BodyId, Trajectories};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Which frame is showing, whether playback is paused and which body the
/// camera follows.
///
/// Renderers own one of these and pass it around explicitly; the
/// trajectories themselves are never mutated during playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationState {
    frame: usize,
    frame_count: usize,
    paused: bool,
    focus: Option<BodyId>,
}

impl AnimationState {
    /// Starts at frame zero, playing, with no focus body.
    pub fn new(frame_count: usize) -> Self {
        Self {
            frame: 0,
            frame_count,
            paused: false,
            focus: None,
        }
    }

    /// The frame currently showing.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// The number of frames in the animation.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Whether playback is paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// The body the camera follows, if any.
    pub fn focus(&self) -> Option<BodyId> {
        self.focus
    }

    /// Moves to the next frame, wrapping to zero after the last one.
    ///
    /// Does nothing while paused. Returns the frame now showing.
    pub fn advance(&mut self) -> usize {
        if !self.paused && self.frame_count > 0 {
            self.frame = (self.frame + 1) % self.frame_count;
        }
        self.frame
    }

    /// Pauses or resumes playback. Returns whether it is now paused.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Jumps to a frame, clamped to the last one.
    pub fn seek(&mut self, frame: usize) {
        self.frame = frame.min(self.frame_count.saturating_sub(1));
    }

    /// Sets or clears the body the camera follows.
    pub fn set_focus(&mut self, focus: Option<BodyId>) {
        self.focus = focus;
    }

    /// The simulated time elapsed at the current frame.
    pub fn elapsed(&self, time_per_frame: f64) -> f64 {
        self.frame as f64 * time_per_frame
    }

    /// The calendar date of the current frame, taking time units as days.
    ///
    /// `None` when the date falls outside the range `chrono` can represent.
    pub fn current_date(
        &self,
        epoch: DateTime<Utc>,
        days_per_frame: f64,
    ) -> Option<DateTime<Utc>> {
        let millis = (self.elapsed(days_per_frame) * MILLIS_PER_DAY).round();
        if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
            return None;
        }

        epoch.checked_add_signed(Duration::try_milliseconds(millis as i64)?)
    }

    /// Where the camera should look: the focus body's position at the
    /// current frame, or the origin without a focus.
    ///
    /// `None` if the focus body has no generated trajectory.
    pub fn focus_position(&self, trajectories: &Trajectories) -> Option<DVec3> {
        match self.focus {
            Some(id) => trajectories.position(id, self.frame),
            None => Some(DVec3::ZERO),
        }
    }
}
