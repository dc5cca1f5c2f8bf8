//! Per-frame hypotheses: [`Spot`] and [`Layer`].

use log::warn;
use nalgebra::Point2;

/// Synthetic boundary spots owned by the tracker rather than by any layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Sentinel {
    Initial,
    Final,
}

/// Non-owning handle to a spot known to the tracker.
///
/// Layer spots are addressed by frame number rather than window slot, so a
/// handle keeps its meaning while older layers are popped. It can only be
/// resolved while its layer is still in the window; the tracker never needs to
/// resolve handles older than the oldest layer because the walk in
/// `estimate_position` stops there and reads the [`Predecessor`] snapshot
/// instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SpotRef {
    Initial,
    Layer { frame_num: i64, index: usize },
}

/// Back link of the dynamic programming, with a copy of what interpolation
/// needs from the predecessor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Predecessor {
    pub handle: SpotRef,
    pub frame_num: i64,
    pub time: f64,
    pub point: Option<Point2<f64>>,
}

/// One hypothesis for a frame: a position with its confidence, or the
/// distinguished "ball absent" state.
#[derive(Debug, Clone, PartialEq)]
pub struct Spot {
    /// Position in meters, `None` when the ball is not visible.
    pub point: Option<Point2<f64>>,
    /// Detector confidence; higher is better.
    pub weight: f64,
    frame_num: i64,
    time: f64,
    sentinel: Option<Sentinel>,
    badness: Option<f64>,
    prev: Option<Predecessor>,
}

impl Spot {
    /// A detector candidate at `point`. Frame number and time are stamped when
    /// the spot is put into a [`Layer`].
    pub fn new(point: Point2<f64>, weight: f64) -> Self {
        Self::at_frame(Some(point), weight, 0, 0.0)
    }

    /// The "ball not visible" hypothesis. Only the tracker creates these, one
    /// per layer, weighted with `absent_weight`.
    pub(crate) fn absent(weight: f64) -> Self {
        Self::at_frame(None, weight, 0, 0.0)
    }

    /// A spot already bound to a frame, for use outside of a layer.
    pub fn at_frame(point: Option<Point2<f64>>, weight: f64, frame_num: i64, time: f64) -> Self {
        Self {
            point,
            weight,
            frame_num,
            time,
            sentinel: None,
            badness: None,
            prev: None,
        }
    }

    pub(crate) fn sentinel(kind: Sentinel) -> Self {
        Self {
            sentinel: Some(kind),
            ..Self::absent(0.0)
        }
    }

    pub fn present(&self) -> bool {
        self.point.is_some()
    }

    pub fn frame_num(&self) -> i64 {
        self.frame_num
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Best known accumulated cost from the start of the stream, `None` while
    /// the spot has not been relaxed or has no viable predecessor.
    pub fn badness(&self) -> Option<f64> {
        self.badness
    }

    pub(crate) fn is_sentinel(&self, kind: Sentinel) -> bool {
        self.sentinel == Some(kind)
    }

    pub(crate) fn prev(&self) -> Option<&Predecessor> {
        self.prev.as_ref()
    }

    pub(crate) fn set_frame(&mut self, frame_num: i64, time: f64) {
        self.frame_num = frame_num;
        self.time = time;
    }

    pub(crate) fn set_best(&mut self, best: Option<(f64, Predecessor)>) {
        match best {
            Some((badness, prev)) => {
                self.badness = Some(badness);
                self.prev = Some(prev);
            }
            None => {
                self.badness = None;
                self.prev = None;
            }
        }
    }

    pub(crate) fn set_badness(&mut self, badness: f64) {
        self.badness = Some(badness);
    }

    pub(crate) fn snapshot(&self, handle: SpotRef) -> Predecessor {
        Predecessor {
            handle,
            frame_num: self.frame_num,
            time: self.time,
            point: self.point,
        }
    }
}

/// All the candidate spots of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    spots: Vec<Spot>,
    frame_num: i64,
    time: f64,
}

impl Layer {
    /// Bundle already-scored candidates for one frame, stamping `frame_num`
    /// and `time` on each of them. The absent spot is added by the tracker, so
    /// spots without a position are dropped here.
    pub fn new(mut spots: Vec<Spot>, frame_num: i64, time: f64) -> Self {
        let given = spots.len();
        spots.retain(Spot::present);
        if spots.len() < given {
            warn!(
                "frame {}: dropped {} spots without a position",
                frame_num,
                given - spots.len()
            );
        }
        for spot in spots.iter_mut() {
            spot.set_frame(frame_num, time);
        }
        Self {
            spots,
            frame_num,
            time,
        }
    }

    pub fn spots(&self) -> &[Spot] {
        &self.spots
    }

    pub fn frame_num(&self) -> i64 {
        self.frame_num
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub(crate) fn spots_mut(&mut self) -> &mut [Spot] {
        &mut self.spots
    }

    pub(crate) fn push_absent(&mut self, weight: f64) {
        let mut absent = Spot::absent(weight);
        absent.set_frame(self.frame_num, self.time);
        self.spots.push(absent);
    }
}
