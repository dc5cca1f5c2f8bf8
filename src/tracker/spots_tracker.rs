//! Online windowed dynamic programming over the spots of consecutive frames.

use std::collections::VecDeque;

use log::{debug, trace, warn};
use nalgebra::Point2;

use crate::tracker::cost;
use crate::tracker::error::TrackerError;
use crate::tracker::estimate::{FrameEstimate, TrajectoryPoint};
use crate::tracker::settings::TrackerSettings;
use crate::tracker::spot::{Layer, Predecessor, Sentinel, Spot, SpotRef};

/// Reconstructs the ball trajectory from a stream of [`Layer`]s.
///
/// Layers must be pushed with consecutive frame numbers and increasing times.
/// Every spot of a pushed layer gets its optimal badness from the start of the
/// stream in a single relaxation pass: all spots of older frames already hold
/// their final value, so nothing before the new layer is ever recomputed.
/// `fake_final` follows one frame after the newest layer and answers "what is
/// the best known continuation" when estimates are emitted.
#[derive(Debug, Clone)]
pub struct SpotsTracker {
    window: VecDeque<Layer>,
    first_num: Option<i64>,
    last_pushed: Option<(i64, f64)>,
    fake_initial: Spot,
    fake_final: Spot,
    settings: TrackerSettings,
}

impl SpotsTracker {
    pub fn new(settings: TrackerSettings) -> Result<Self, TrackerError> {
        settings.validate()?;

        let mut fake_initial = Spot::sentinel(Sentinel::Initial);
        fake_initial.set_badness(0.0);

        Ok(Self {
            window: VecDeque::new(),
            first_num: None,
            last_pushed: None,
            fake_initial,
            fake_final: Spot::sentinel(Sentinel::Final),
            settings,
        })
    }

    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    /// Number of layers currently in the window.
    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Frame number of the oldest layer in the window.
    pub fn first_frame(&self) -> Option<i64> {
        self.first_num
    }

    /// Frame number of the newest layer in the window.
    pub fn last_frame(&self) -> Option<i64> {
        self.window.back().map(Layer::frame_num)
    }

    /// Badness of the arc from `start` to `end`, `Ok(None)` if there is no
    /// such arc.
    pub fn arc_badness(&self, start: &Spot, end: &Spot) -> Result<Option<f64>, TrackerError> {
        cost::arc_badness(&self.settings, start, end)
    }

    /// Add the next frame and relax its spots.
    ///
    /// On error the tracker is left as it was before the call.
    pub fn push(&mut self, mut layer: Layer) -> Result<(), TrackerError> {
        let frame_num = layer.frame_num();
        let time = layer.time();
        // Both sentinels need a frame number on either side of the layer.
        let (Some(before), Some(after)) = (frame_num.checked_sub(1), frame_num.checked_add(1))
        else {
            return Err(TrackerError::FrameOutOfRange { frame_num });
        };
        if !time.is_finite() {
            return Err(TrackerError::NonFiniteTime { frame_num, time });
        }

        if let Some((last_frame, last_time)) = self.last_pushed {
            if before != last_frame {
                return Err(TrackerError::NonConsecutiveFrame {
                    expected: last_frame.saturating_add(1),
                    got: frame_num,
                });
            }
            if time <= last_time {
                return Err(TrackerError::NonIncreasingTime {
                    frame_num,
                    previous: last_time,
                    time,
                });
            }
        } else {
            self.fake_initial.set_frame(before, time);
        }

        let candidates = layer.spots().len();
        layer.push_absent(self.settings.absent_weight);

        let bests = layer
            .spots()
            .iter()
            .map(|spot| self.best_predecessor(spot, None))
            .collect::<Result<Vec<_>, _>>()?;
        let unreachable = bests.iter().filter(|best| best.is_none()).count();
        for (spot, best) in layer.spots_mut().iter_mut().zip(bests) {
            spot.set_best(best);
        }

        let mut fake_final = Spot::sentinel(Sentinel::Final);
        fake_final.set_frame(after, time);
        let final_best = self.best_predecessor(&fake_final, Some(&layer))?;
        fake_final.set_best(final_best);

        if unreachable > 0 {
            warn!(
                "frame {}: {} of {} spots have no viable predecessor",
                layer.frame_num(),
                unreachable,
                layer.spots().len()
            );
        }
        debug!(
            "pushed frame {} with {} candidates, best badness {:?}",
            layer.frame_num(),
            candidates,
            fake_final.badness()
        );

        self.last_pushed = Some((layer.frame_num(), layer.time()));
        if self.first_num.is_none() {
            self.first_num = Some(layer.frame_num());
        }
        self.window.push_back(layer);
        self.fake_final = fake_final;
        Ok(())
    }

    /// Drop the oldest layer. Nothing is recomputed: newer spots have already
    /// folded its badness into their own.
    pub fn pop_front(&mut self) -> Result<Layer, TrackerError> {
        let layer = self.window.pop_front().ok_or(TrackerError::EmptyWindow)?;
        self.first_num = self.window.front().map(Layer::frame_num);
        Ok(layer)
    }

    /// Position of the ball in the oldest layer of the window according to
    /// the best known trajectory, or `None` if it appears to be out of the
    /// field.
    pub fn estimate_position(&self) -> Result<Option<Point2<f64>>, TrackerError> {
        let front = self.window.front().ok_or(TrackerError::EmptyWindow)?;
        let first_num = front.frame_num();

        // Walk back to the first link at or before the oldest frame. Links
        // newer than `first_num` always resolve inside the window.
        let mut spot = &self.fake_final;
        let mut previous = spot.prev();
        while let Some(link) = previous {
            if link.frame_num <= first_num {
                break;
            }
            match self.resolve(link.handle) {
                Some(next) => spot = next,
                None => return Ok(None),
            }
            previous = spot.prev();
        }

        let Some(link) = previous else {
            return Ok(None);
        };
        if link.handle == SpotRef::Initial {
            return Ok(None);
        }
        if link.frame_num == first_num {
            return Ok(link.point);
        }

        // The path jumps over the oldest frame.
        if spot.is_sentinel(Sentinel::Final) {
            return Ok(None);
        }
        match (link.point, spot.point) {
            (Some(from), Some(to)) => Ok(Some(cost::interpolate(
                from,
                link.time,
                to,
                spot.time(),
                front.time(),
            ))),
            _ => Ok(None),
        }
    }

    /// Push a layer and emit the estimates of every frame leaving the window.
    pub fn push_and_emit(&mut self, layer: Layer) -> Result<Vec<FrameEstimate>, TrackerError> {
        self.push(layer)?;

        let mut emitted = Vec::new();
        while self.window.len() > self.settings.dynamic_depth {
            emitted.push(self.emit_front()?);
        }
        Ok(emitted)
    }

    /// Emit the estimates of all layers still in the window, oldest first.
    /// Used when the input stream ends.
    pub fn flush(&mut self) -> Result<Vec<FrameEstimate>, TrackerError> {
        let mut emitted = Vec::with_capacity(self.window.len());
        while !self.window.is_empty() {
            emitted.push(self.emit_front()?);
        }
        Ok(emitted)
    }

    /// The optimal path restricted to the spots still in the window, oldest
    /// first, with the total badness of the best known explanation.
    pub fn best_trajectory(&self) -> (Vec<TrajectoryPoint>, Option<f64>) {
        let mut points = Vec::new();
        if let Some(first_num) = self.first_num {
            let mut link = self.fake_final.prev();
            while let Some(current) = link {
                if current.handle == SpotRef::Initial || current.frame_num < first_num {
                    break;
                }
                points.push(TrajectoryPoint {
                    frame_num: current.frame_num,
                    time: current.time,
                    point: current.point,
                });
                link = self.resolve(current.handle).and_then(Spot::prev);
            }
        }
        points.reverse();
        (points, self.fake_final.badness())
    }

    fn emit_front(&mut self) -> Result<FrameEstimate, TrackerError> {
        let position = self.estimate_position()?;
        let layer = self.pop_front()?;
        debug!("emitting frame {}: {:?}", layer.frame_num(), position);
        Ok(FrameEstimate::new(layer.frame_num(), layer.time(), position))
    }

    /// Cheapest way to reach `target` from any older spot in the window (plus
    /// `fake_initial`, plus the spots of `pending` when given).
    fn best_predecessor(
        &self,
        target: &Spot,
        pending: Option<&Layer>,
    ) -> Result<Option<(f64, Predecessor)>, TrackerError> {
        let layer_spots = self.window.iter().chain(pending).flat_map(|layer| {
            layer.spots().iter().enumerate().map(move |(index, spot)| {
                let handle = SpotRef::Layer {
                    frame_num: layer.frame_num(),
                    index,
                };
                (handle, spot)
            })
        });
        let candidates = std::iter::once((SpotRef::Initial, &self.fake_initial)).chain(layer_spots);

        let mut best: Option<(f64, Predecessor)> = None;
        for (handle, previous) in candidates {
            if previous.frame_num() >= target.frame_num() {
                continue;
            }
            let Some(base) = previous.badness() else {
                continue;
            };
            let Some(arc) = self.arc_badness(previous, target)? else {
                continue;
            };

            let badness = base + arc;
            if best.as_ref().is_none_or(|(current, _)| badness < *current) {
                best = Some((badness, previous.snapshot(handle)));
            }
        }

        if let Some((badness, prev)) = &best {
            trace!(
                "frame {}: best predecessor in frame {} with badness {}",
                target.frame_num(),
                prev.frame_num,
                badness
            );
        }
        Ok(best)
    }

    fn resolve(&self, handle: SpotRef) -> Option<&Spot> {
        match handle {
            SpotRef::Initial => Some(&self.fake_initial),
            SpotRef::Layer { frame_num, index } => {
                let offset = usize::try_from(frame_num - self.first_num?).ok()?;
                self.window.get(offset)?.spots().get(index)
            }
        }
    }
}
