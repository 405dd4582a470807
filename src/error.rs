//! Error types for loading a system and generating its trajectories.

use thiserror::Error;

use crate::BodyId;

/// Errors raised while turning a configuration into a [`Universe`][crate::Universe].
///
/// Every variant that concerns a single body names it, so a bad
/// configuration can be fixed without guessing.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A body names a parent that is not declared anywhere in the configuration.
    #[error("body '{body}' references unknown parent '{parent}'")]
    MissingParent {
        /// The offending body.
        body: String,
        /// The parent identifier it refers to.
        parent: String,
    },

    /// A body lists itself as its own parent.
    #[error("body '{0}' cannot orbit itself")]
    SelfParent(String),

    /// The parent references form a loop.
    #[error("parent cycle detected involving body '{0}'")]
    ParentCycle(String),

    /// Two bodies share the same identifier (possibly across nesting levels).
    #[error("body identifier '{0}' is declared more than once")]
    DuplicateBody(String),

    /// A nested moon also carries an explicit `parent` that disagrees with its nesting.
    #[error("body '{body}' is nested under '{nested_under}' but declares parent '{declared}'")]
    ConflictingParent {
        /// The offending body.
        body: String,
        /// The body it is nested under.
        nested_under: String,
        /// The explicitly declared parent.
        declared: String,
    },

    /// An orbital element is outside the range this crate can produce geometry for.
    #[error("body '{body}' has invalid orbital elements: {reason}")]
    InvalidElements {
        /// The offending body.
        body: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The simulation was asked for zero frames.
    #[error("frame count must be at least 1")]
    NoFrames,

    /// The simulated duration is negative, zero or not finite.
    #[error("total simulated duration must be positive and finite, got {0}")]
    InvalidDuration(f64),

    /// A resolved body could not be added to the universe.
    #[error(transparent)]
    Body(#[from] BodyAddError),

    /// The configuration could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// An error to describe why adding a body to a [`Universe`][crate::Universe] failed.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BodyAddError {
    /// There was no body at the specified parent index.
    #[error("there was no body at parent index {0}")]
    ParentNotFound(BodyId),

    /// A body with the same name is already in the universe.
    #[error("a body named '{0}' already exists")]
    DuplicateName(String),
}

/// Errors raised while generating trajectories.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrajectoryError {
    /// The body's parent has no trajectory yet; parents must be generated first.
    #[error("trajectory of '{body}' requested before its parent '{parent}' was generated")]
    ParentNotComputed {
        /// The body that was requested.
        body: String,
        /// Its parent, which has not been generated.
        parent: String,
    },

    /// No body lives at this index.
    #[error("no body with index {0}")]
    UnknownBody(BodyId),

    /// A parent trajectory was supplied with the wrong number of frames.
    #[error("parent trajectory has {actual} frames, expected {expected}")]
    FrameCountMismatch {
        /// The number of frames being generated.
        expected: usize,
        /// The number of frames in the parent trajectory.
        actual: usize,
    },
}
