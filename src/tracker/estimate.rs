use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Finalized position of the ball for one frame, as handed to consumers.
///
/// `x`/`y` are both `None` when the ball is considered out of the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameEstimate {
    pub frame_num: i64,
    pub timestamp: f64,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl FrameEstimate {
    pub fn new(frame_num: i64, timestamp: f64, position: Option<Point2<f64>>) -> Self {
        Self {
            frame_num,
            timestamp,
            x: position.map(|p| p.x),
            y: position.map(|p| p.y),
        }
    }

    pub fn position(&self) -> Option<Point2<f64>> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some(Point2::new(x, y)),
            _ => None,
        }
    }
}

/// One step of the currently optimal path through the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    pub frame_num: i64,
    pub time: f64,
    pub point: Option<Point2<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_record() {
        let estimate = FrameEstimate::new(12, 0.1, Some(Point2::new(1.0, 0.5)));
        let json = serde_json::to_string(&estimate).unwrap();
        assert_eq!(json, r#"{"frame_num":12,"timestamp":0.1,"x":1.0,"y":0.5}"#);

        let out_of_field = FrameEstimate::new(13, 0.2, None);
        let json = serde_json::to_string(&out_of_field).unwrap();
        assert_eq!(json, r#"{"frame_num":13,"timestamp":0.2,"x":null,"y":null}"#);
        assert!(out_of_field.position().is_none());
    }
}
