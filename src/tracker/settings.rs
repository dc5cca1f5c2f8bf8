//! Cost-model constants and window depth.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tracker::error::{SettingsError, TrackerError};

/// Configuration for the [`SpotsTracker`](crate::SpotsTracker).
///
/// Badness values are in the same unit as detector scores (a log-likelihood),
/// distances in meters and speeds in meters per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Weight of the synthetic spot meaning "ball not visible".
    pub absent_weight: f64,
    /// Extra badness for every frame silently skipped by an arc.
    pub skip_badness: f64,
    /// Cost of a present to absent transition.
    pub disappearance_badness: f64,
    /// Cost of an absent to present transition.
    pub appearance_badness: f64,
    /// Added to each absent to absent arc; negative values reward explaining a
    /// gap as continued absence rather than through weak detections.
    pub absence_badness: f64,
    /// Hard cutoff on the speed between two present spots.
    pub max_speed: f64,
    /// Hard cutoff on the distance between two present spots, whatever the
    /// time elapsed.
    pub max_unseen_distance: f64,
    /// Scale of the quadratic (gaussian motion) penalty.
    pub variance_parameter: f64,
    /// Window size in frames, which is also the output latency.
    pub dynamic_depth: usize,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            absent_weight: 0.0,
            skip_badness: 0.0,
            disappearance_badness: 400.0,
            appearance_badness: 400.0,
            absence_badness: -10.0,
            max_speed: 18.0,
            max_unseen_distance: 0.3,
            variance_parameter: 0.3,
            dynamic_depth: 60,
        }
    }
}

impl TrackerSettings {
    /// Check that the constants describe a usable cost model.
    pub fn validate(&self) -> Result<(), TrackerError> {
        let constants = [
            ("absent_weight", self.absent_weight),
            ("skip_badness", self.skip_badness),
            ("disappearance_badness", self.disappearance_badness),
            ("appearance_badness", self.appearance_badness),
            ("absence_badness", self.absence_badness),
            ("max_speed", self.max_speed),
            ("max_unseen_distance", self.max_unseen_distance),
            ("variance_parameter", self.variance_parameter),
        ];
        if let Some((name, value)) = constants.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TrackerError::InvalidSettings(format!(
                "{name} must be finite, got {value}"
            )));
        }
        if self.variance_parameter <= 0.0 {
            return Err(TrackerError::InvalidSettings(format!(
                "variance_parameter must be positive, got {}",
                self.variance_parameter
            )));
        }
        if self.max_speed < 0.0 || self.max_unseen_distance < 0.0 {
            return Err(TrackerError::InvalidSettings(
                "max_speed and max_unseen_distance cannot be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse settings from JSON; missing fields keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, SettingsError> {
        let settings: TrackerSettings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}
