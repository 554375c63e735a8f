//! Horizontal swipe classification from begin/end touch pairs.

use log::{debug, trace};

use crate::{
    callback::Callback,
    geometry::{Calibration, CoordinateSpace, DisplayGeometry, Geometry, Point, Side},
};

/// Touch interaction phase reported by the touch-event source.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TouchPhase {
    Begin,
    Move,
    End,
}

/// One touch event as delivered by the touch-event source.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TouchSample {
    pub position: Point,
    pub space: CoordinateSpace,
    /// Set by an earlier consumer that already claimed this event.
    pub handled: bool,
    pub phase: TouchPhase,
}

impl TouchSample {
    /// Unclaimed screen-space sample.
    pub const fn new(phase: TouchPhase, x: i32, y: i32) -> Self {
        Self {
            position: Point::new(x, y),
            space: CoordinateSpace::Screen,
            handled: false,
            phase,
        }
    }

    pub const fn begin(x: i32, y: i32) -> Self {
        Self::new(TouchPhase::Begin, x, y)
    }

    pub const fn moved(x: i32, y: i32) -> Self {
        Self::new(TouchPhase::Move, x, y)
    }

    pub const fn end(x: i32, y: i32) -> Self {
        Self::new(TouchPhase::End, x, y)
    }

    pub const fn in_space(mut self, space: CoordinateSpace) -> Self {
        self.space = space;
        self
    }

    pub const fn claimed(mut self) -> Self {
        self.handled = true;
        self
    }
}

/// Classified swipe.
///
/// Names are crossed relative to the motion: a stroke from the left half to the right half is
/// `SlideLeft`, right to left is `SlideRight`. Existing consumers depend on this mapping.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Swipe {
    SlideLeft,
    SlideRight,
}

impl Swipe {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SlideLeft => "slide-left",
            Self::SlideRight => "slide-right",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Anchor {
    position: Point,
    side: Side,
}

/// Begin/end pair of the most recently evaluated interaction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Stroke {
    pub begin: Point,
    pub begin_side: Side,
    pub end: Point,
    pub end_side: Side,
}

/// Two-state (idle/active) swipe classifier.
///
/// An unclaimed `Begin` opens a session, overwriting any session that never saw its `End`.
/// The next `End` closes the session whether or not it was claimed; only an unclaimed `End`
/// is evaluated. A stroke shorter than half the active width never fires. Longer strokes fire
/// `on_slide_left` for left-to-right and `on_slide_right` for right-to-left motion; strokes
/// that stay on one side fire nothing.
///
/// There is no per-touch token: overlapping or multi-touch interactions are indistinguishable
/// here and must be separated upstream.
pub struct SwipeClassifier<D, C, L, R> {
    geometry: Geometry<D, C>,
    on_slide_left: L,
    on_slide_right: R,
    session: Option<Anchor>,
    last_stroke: Option<Stroke>,
}

impl<D, C, L, R> SwipeClassifier<D, C, L, R>
where
    D: DisplayGeometry,
    C: Calibration,
    L: Callback,
    R: Callback,
{
    pub fn new(geometry: Geometry<D, C>, on_slide_left: L, on_slide_right: R) -> Self {
        Self {
            geometry,
            on_slide_left,
            on_slide_right,
            session: None,
            last_stroke: None,
        }
    }

    /// Routes `sample` by phase. `Move` samples are ignored.
    pub fn respond(&mut self, sample: &TouchSample) -> Option<Swipe> {
        match sample.phase {
            TouchPhase::Begin => {
                self.respond_begin(sample);
                None
            }
            TouchPhase::Move => None,
            TouchPhase::End => self.respond_end(sample),
        }
    }

    pub fn respond_begin(&mut self, sample: &TouchSample) {
        if sample.handled {
            trace!("gesture: begin claimed upstream, ignored");
            return;
        }

        let side = self.geometry.side_of(sample.position, sample.space);
        if self.session.is_some() {
            debug!("gesture: begin replaces unfinished session");
        }
        self.session = Some(Anchor {
            position: sample.position,
            side,
        });
        trace!(
            "gesture: begin x={} y={} side={}",
            sample.position.x,
            sample.position.y,
            side.as_str()
        );
    }

    /// Closes the active session and fires the matching outcome, if any.
    pub fn respond_end(&mut self, sample: &TouchSample) -> Option<Swipe> {
        let anchor = self.session.take();
        if sample.handled {
            trace!("gesture: end claimed upstream, session dropped");
            return None;
        }
        let Some(anchor) = anchor else {
            trace!("gesture: end without session");
            return None;
        };

        let stroke = Stroke {
            begin: anchor.position,
            begin_side: anchor.side,
            end: sample.position,
            end_side: self.geometry.side_of(sample.position, sample.space),
        };
        self.last_stroke = Some(stroke);

        let min_length = i64::from(self.geometry.swipe_threshold(sample.space));
        let squared_length = (stroke.end - stroke.begin).squared_length();
        if squared_length < min_length * min_length {
            debug!(
                "gesture: stroke too short squared_len={} min_len={}",
                squared_length, min_length
            );
            return None;
        }

        let swipe = match (stroke.begin_side, stroke.end_side) {
            (Side::Left, Side::Right) => {
                self.on_slide_left.invoke();
                Swipe::SlideLeft
            }
            (Side::Right, Side::Left) => {
                self.on_slide_right.invoke();
                Swipe::SlideRight
            }
            (begin_side, _) => {
                debug!(
                    "gesture: stroke stayed on side={}, no swipe",
                    begin_side.as_str()
                );
                return None;
            }
        };

        debug!(
            "gesture: swipe={} from=({}, {}) to=({}, {})",
            swipe.as_str(),
            stroke.begin.x,
            stroke.begin.y,
            stroke.end.x,
            stroke.end.y
        );
        Some(swipe)
    }

    /// Whether a `Begin` is waiting for its `End`.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn last_stroke(&self) -> Option<Stroke> {
        self.last_stroke
    }

    /// Drops the active session, e.g. when the touch controller was reset.
    pub fn reset(&mut self) {
        self.session = None;
    }
}
