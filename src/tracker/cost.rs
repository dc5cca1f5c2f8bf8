//! Arc cost model between two spots of different frames.

use nalgebra::Point2;

use crate::tracker::error::TrackerError;
use crate::tracker::settings::TrackerSettings;
use crate::tracker::spot::{Sentinel, Spot};

/// Badness of going from `start` to `end`, or `Ok(None)` when the transition
/// is impossible (kinematic cutoff, or an absence run skipping frames).
///
/// `start` must belong to an earlier frame than `end`.
pub(crate) fn arc_badness(
    settings: &TrackerSettings,
    start: &Spot,
    end: &Spot,
) -> Result<Option<f64>, TrackerError> {
    let skip = end.frame_num() - start.frame_num() - 1;
    let mut badness = 0.0;

    match (start.present(), end.present()) {
        (true, false) => {
            if !end.is_sentinel(Sentinel::Final) {
                badness += settings.disappearance_badness;
            }
        }
        (false, true) => {
            if !start.is_sentinel(Sentinel::Initial) {
                badness += settings.appearance_badness;
            }
        }
        (false, false) => {
            badness += settings.absence_badness;
            if skip > 0 {
                return Ok(None);
            }
        }
        (true, true) => {}
    }

    badness -= end.weight;
    badness += skip as f64 * settings.skip_badness;

    if let (Some(from), Some(to)) = (start.point, end.point) {
        let elapsed = end.time() - start.time();
        if elapsed <= 0.0 {
            return Err(TrackerError::NonPositiveElapsed {
                start_frame: start.frame_num(),
                end_frame: end.frame_num(),
            });
        }

        let distance = nalgebra::distance(&from, &to);
        if distance > settings.max_speed * elapsed || distance > settings.max_unseen_distance {
            return Ok(None);
        }
        badness += distance * distance / (elapsed * settings.variance_parameter);
    }

    Ok(Some(badness))
}

/// Affine interpolation in time between two timed positions.
pub(crate) fn interpolate(
    first: Point2<f64>,
    first_time: f64,
    second: Point2<f64>,
    second_time: f64,
    time: f64,
) -> Point2<f64> {
    let k = (time - first_time) / (second_time - first_time);
    Point2::from(first.coords * (1.0 - k) + second.coords * k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn present(x: f64, y: f64, weight: f64, frame_num: i64, time: f64) -> Spot {
        Spot::at_frame(Some(Point2::new(x, y)), weight, frame_num, time)
    }

    fn absent(weight: f64, frame_num: i64, time: f64) -> Spot {
        Spot::at_frame(None, weight, frame_num, time)
    }

    fn far_pair() -> (Spot, Spot) {
        // distance = 1.4422205101855958
        (
            present(1.0, 0.7, 0.2, 5, 0.0),
            present(0.2, -0.5, 0.2, 10, 0.1),
        )
    }

    #[test]
    fn test_too_far_for_unseen_distance() {
        let settings = TrackerSettings {
            max_unseen_distance: 1.4,
            max_speed: 60.0,
            ..TrackerSettings::default()
        };
        let (start, end) = far_pair();
        assert_eq!(arc_badness(&settings, &start, &end), Ok(None));
    }

    #[test]
    fn test_too_fast() {
        let settings = TrackerSettings {
            max_unseen_distance: 3.0,
            max_speed: 10.0,
            ..TrackerSettings::default()
        };
        let (start, end) = far_pair();
        assert_eq!(arc_badness(&settings, &start, &end), Ok(None));
    }

    #[test]
    fn test_present_to_present() {
        let settings = TrackerSettings {
            max_unseen_distance: 3.0,
            max_speed: 60.0,
            skip_badness: 1.0,
            variance_parameter: 1.0,
            ..TrackerSettings::default()
        };
        let (start, end) = far_pair();
        // 4 skipped frames, -0.2 weight, 2.08 / 0.1 motion penalty
        let badness = arc_badness(&settings, &start, &end).unwrap().unwrap();
        assert!((badness - 24.6).abs() < 1e-8);
    }

    #[test]
    fn test_present_to_absent() {
        let settings = TrackerSettings {
            disappearance_badness: 7.0,
            ..TrackerSettings::default()
        };
        let start = present(1.0, 0.7, 0.2, 5, 0.0);
        let end = absent(0.0, 6, 0.1);
        let badness = arc_badness(&settings, &start, &end).unwrap().unwrap();
        assert!((badness - 7.0).abs() < 1e-8);
    }

    #[test]
    fn test_absent_to_present() {
        let settings = TrackerSettings {
            appearance_badness: 7.0,
            ..TrackerSettings::default()
        };
        let start = absent(0.2, 5, 0.0);
        let end = present(1.0, 0.7, 0.0, 6, 0.1);
        let badness = arc_badness(&settings, &start, &end).unwrap().unwrap();
        assert!((badness - 7.0).abs() < 1e-8);
    }

    #[test]
    fn test_absent_to_absent() {
        let settings = TrackerSettings {
            absence_badness: 7.0,
            ..TrackerSettings::default()
        };
        let start = absent(0.2, 5, 0.0);
        let end = absent(0.0, 6, 0.1);
        assert_eq!(arc_badness(&settings, &start, &end), Ok(Some(7.0)));
    }

    #[test]
    fn test_absent_to_absent_cannot_skip() {
        let settings = TrackerSettings {
            absence_badness: 7.0,
            ..TrackerSettings::default()
        };
        let start = absent(0.2, 5, 0.0);
        let end = absent(0.0, 7, 0.1);
        assert_eq!(arc_badness(&settings, &start, &end), Ok(None));
    }

    #[test]
    fn test_present_arcs_may_skip() {
        let settings = TrackerSettings {
            disappearance_badness: 7.0,
            skip_badness: 0.5,
            ..TrackerSettings::default()
        };
        let start = present(1.0, 0.7, 0.2, 5, 0.0);
        let end = absent(1.0, 8, 0.3);
        let badness = arc_badness(&settings, &start, &end).unwrap().unwrap();
        assert!((badness - (7.0 - 1.0 + 2.0 * 0.5)).abs() < 1e-8);
    }

    #[test]
    fn test_sentinels_skip_transition_costs() {
        let settings = TrackerSettings::default();

        let mut initial = Spot::sentinel(Sentinel::Initial);
        initial.set_frame(4, 0.0);
        let first = present(1.0, 0.7, 0.3, 5, 0.0);
        let badness = arc_badness(&settings, &initial, &first).unwrap().unwrap();
        assert!((badness + 0.3).abs() < 1e-12);

        let mut last = Spot::sentinel(Sentinel::Final);
        last.set_frame(9, 0.0);
        let badness = arc_badness(&settings, &first, &last).unwrap().unwrap();
        assert!((badness - 3.0 * settings.skip_badness).abs() < 1e-12);
    }

    #[test]
    fn test_zero_elapsed_is_a_contract_violation() {
        let settings = TrackerSettings::default();
        let start = present(1.0, 0.7, 0.2, 5, 0.5);
        let end = present(1.0, 0.7, 0.2, 6, 0.5);
        assert_eq!(
            arc_badness(&settings, &start, &end),
            Err(TrackerError::NonPositiveElapsed {
                start_frame: 5,
                end_frame: 6,
            })
        );
    }

    #[test]
    fn test_interpolation_is_affine() {
        let a = Point2::new(0.0, 1.0);
        let b = Point2::new(2.0, -1.0);
        assert_eq!(interpolate(a, 1.0, b, 3.0, 1.0), a);
        assert_eq!(interpolate(a, 1.0, b, 3.0, 3.0), b);
        let mid = interpolate(a, 1.0, b, 3.0, 2.5);
        assert!((mid.x - 1.5).abs() < 1e-12);
        assert!((mid.y + 0.5).abs() < 1e-12);
    }
}
