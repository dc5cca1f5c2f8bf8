//! Error types for the tracker.
//!
//! Routine outcomes ("no arc between two spots", "ball out of field") are plain
//! `Option`s and never show up here. Everything in [`TrackerError`] is a broken
//! caller contract.

use std::path::PathBuf;

/// Contract violations detected by [`SpotsTracker`](crate::SpotsTracker).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrackerError {
    /// A layer was pushed out of order, twice, or with a gap.
    #[error("layer pushed out of sequence: expected frame {expected}, got {got}")]
    NonConsecutiveFrame { expected: i64, got: i64 },

    /// The frame number leaves no room for the sentinels on either side.
    #[error("frame {frame_num} is at the end of the frame number range")]
    FrameOutOfRange { frame_num: i64 },

    /// A layer timestamp is NaN or infinite.
    #[error("frame {frame_num} has non-finite time {time}")]
    NonFiniteTime { frame_num: i64, time: f64 },

    /// A layer timestamp did not move forward.
    #[error("frame {frame_num} has time {time}, not after previous time {previous}")]
    NonIncreasingTime {
        frame_num: i64,
        previous: f64,
        time: f64,
    },

    /// Two connected present spots share a timestamp (or go back in time).
    #[error("no time elapsed between frame {start_frame} and frame {end_frame}")]
    NonPositiveElapsed { start_frame: i64, end_frame: i64 },

    /// Pop or estimate requested while no layer is in the window.
    #[error("the tracking window is empty")]
    EmptyWindow,

    #[error("invalid tracker settings: {0}")]
    InvalidSettings(String),
}

/// Failures while loading [`TrackerSettings`](crate::TrackerSettings).
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("cannot read settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] TrackerError),
}
