//! Ball trajectory reconstruction from noisy per-frame detections.
//!
//! Every frame the upstream detector hands over a handful of scored candidate
//! positions. The [`SpotsTracker`] keeps a sliding window of those frames, finds
//! the cheapest explanation of everything seen so far (including the
//! possibility that the ball is not on the table at all) and emits one
//! finalized position per frame, `dynamic_depth` frames behind the input.

pub mod integration;
pub mod tracker;

pub use integration::{Candidate, CandidateSource, LayerBuilder, PipelineError, TrackerPipeline};
pub use tracker::{
    FrameEstimate, Layer, SettingsError, Spot, SpotsTracker, TrackerError, TrackerSettings,
    TrajectoryPoint,
};
