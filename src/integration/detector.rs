//! Trait for the upstream candidate detectors.

use crate::integration::Candidate;

/// Anything able to produce the scored ball candidates of a frame.
///
/// Implement this trait to connect a ballness estimator and peak picker to
/// the tracker. Candidates must be expressed in meters, consistently with
/// `max_speed` and `max_unseen_distance`.
///
/// # Example
///
/// ```ignore
/// use giove_track::{Candidate, CandidateSource};
///
/// struct PeakPicker {
///     // Ballness maps, table tracking, ...
/// }
///
/// impl CandidateSource for PeakPicker {
///     type Error = std::io::Error;
///
///     fn candidates(&mut self, frame_num: i64, time: f64) -> Result<Vec<Candidate>, Self::Error> {
///         Ok(vec![Candidate::new(4.2, 0.6, 0.35)])
///     }
/// }
/// ```
pub trait CandidateSource {
    /// Error type for detection failures.
    type Error;

    /// Return the candidates of frame `frame_num` taken at `time` seconds.
    /// An empty list is valid: the ball may simply not be visible.
    fn candidates(&mut self, frame_num: i64, time: f64) -> Result<Vec<Candidate>, Self::Error>;
}
