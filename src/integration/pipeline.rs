//! TrackerPipeline for combining candidate detection with tracking.

use log::debug;

use crate::integration::{CandidateSource, LayerBuilder};
use crate::tracker::{FrameEstimate, SpotsTracker, TrackerError, TrackerSettings};

/// Failure of one pipeline step.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError<E> {
    #[error("candidate source failed: {0}")]
    Source(#[source] E),

    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

/// Bundles a [`CandidateSource`] with a [`SpotsTracker`].
///
/// The pipeline numbers frames itself, so the tracker always receives a
/// gapless sequence.
pub struct TrackerPipeline<S: CandidateSource> {
    source: S,
    tracker: SpotsTracker,
    next_frame: i64,
    max_candidates: Option<usize>,
}

impl<S: CandidateSource> TrackerPipeline<S> {
    /// Create a new tracking pipeline with the given source and settings.
    pub fn new(source: S, settings: TrackerSettings) -> Result<Self, TrackerError> {
        Ok(Self {
            source,
            tracker: SpotsTracker::new(settings)?,
            next_frame: 0,
            max_candidates: None,
        })
    }

    /// Create a new tracking pipeline with default tracker settings.
    pub fn with_default_settings(source: S) -> Result<Self, TrackerError> {
        Self::new(source, TrackerSettings::default())
    }

    /// Number the first processed frame `frame_num` instead of 0.
    pub fn starting_at(mut self, frame_num: i64) -> Self {
        self.next_frame = frame_num;
        self
    }

    /// Only feed the `limit` best candidates of each frame to the tracker.
    pub fn max_candidates(mut self, limit: usize) -> Self {
        self.max_candidates = Some(limit);
        self
    }

    /// Process the next frame, captured at `time` seconds, and return the
    /// estimates that became final.
    pub fn process_frame(
        &mut self,
        time: f64,
    ) -> Result<Vec<FrameEstimate>, PipelineError<S::Error>> {
        let frame_num = self.next_frame;
        let candidates = self
            .source
            .candidates(frame_num, time)
            .map_err(PipelineError::Source)?;

        let mut builder = LayerBuilder::new(frame_num, time).candidates(candidates);
        if let Some(limit) = self.max_candidates {
            builder = builder.max_candidates(limit);
        }

        let estimates = self.tracker.push_and_emit(builder.build())?;
        self.next_frame += 1;
        Ok(estimates)
    }

    /// End of stream: emit every estimate still held back by the window.
    pub fn finish(&mut self) -> Result<Vec<FrameEstimate>, TrackerError> {
        let estimates = self.tracker.flush()?;
        debug!("pipeline finished, flushed {} frames", estimates.len());
        Ok(estimates)
    }

    /// Get a reference to the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the underlying source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &SpotsTracker {
        &self.tracker
    }
}
