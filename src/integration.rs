//! Integration module for connecting upstream candidate detectors with the
//! spots tracker.
//!
//! The ballness estimation and peak picking live outside this crate; this
//! module only defines the seam they plug into.

mod builder;
mod detector;
mod pipeline;

pub use builder::{Candidate, LayerBuilder};
pub use detector::CandidateSource;
pub use pipeline::{PipelineError, TrackerPipeline};
