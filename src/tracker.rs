mod cost;
mod error;
mod estimate;
mod settings;
mod spot;
mod spots_tracker;

pub use error::{SettingsError, TrackerError};
pub use estimate::{FrameEstimate, TrajectoryPoint};
pub use settings::TrackerSettings;
pub use spot::{Layer, Spot};
pub use spots_tracker::SpotsTracker;
