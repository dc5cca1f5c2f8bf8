//! Builder for turning ranked detector candidates into a [`Layer`].

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::tracker::{Layer, Spot};

/// One scored candidate position from the upstream detector, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub score: f64,
    pub x: f64,
    pub y: f64,
}

impl Candidate {
    pub fn new(score: f64, x: f64, y: f64) -> Self {
        Self { score, x, y }
    }

    pub fn into_spot(self) -> Spot {
        Spot::new(Point2::new(self.x, self.y), self.score)
    }
}

impl From<(f64, f64, f64)> for Candidate {
    fn from((score, x, y): (f64, f64, f64)) -> Self {
        Self::new(score, x, y)
    }
}

/// Builder for the [`Layer`] of one frame.
#[derive(Debug, Clone, Default)]
pub struct LayerBuilder {
    frame_num: i64,
    time: f64,
    candidates: Vec<Candidate>,
    max_candidates: Option<usize>,
    min_score: Option<f64>,
}

impl LayerBuilder {
    pub fn new(frame_num: i64, time: f64) -> Self {
        Self {
            frame_num,
            time,
            ..Self::default()
        }
    }

    /// Add one candidate.
    pub fn candidate(mut self, candidate: impl Into<Candidate>) -> Self {
        self.candidates.push(candidate.into());
        self
    }

    /// Add several candidates.
    pub fn candidates<C>(mut self, candidates: impl IntoIterator<Item = C>) -> Self
    where
        C: Into<Candidate>,
    {
        self.candidates.extend(candidates.into_iter().map(Into::into));
        self
    }

    /// Keep only the `limit` best-scored candidates.
    pub fn max_candidates(mut self, limit: usize) -> Self {
        self.max_candidates = Some(limit);
        self
    }

    /// Drop candidates scoring below `threshold`.
    pub fn min_score(mut self, threshold: f64) -> Self {
        self.min_score = Some(threshold);
        self
    }

    /// Build the final `Layer`, candidates ordered by decreasing score.
    pub fn build(self) -> Layer {
        let mut candidates = self.candidates;
        if let Some(threshold) = self.min_score {
            candidates.retain(|c| c.score >= threshold);
        }
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        if let Some(limit) = self.max_candidates {
            candidates.truncate(limit);
        }

        let spots = candidates.into_iter().map(Candidate::into_spot).collect();
        Layer::new(spots, self.frame_num, self.time)
    }
}
