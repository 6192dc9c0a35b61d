//! Freehand arrow geometry: the arrowhead polygon and the pending arrow that
//! follows the pointer until release.

#[cfg(test)]
#[path = "arrows_test.rs"]
mod arrows_test;

use crate::consts::{ARROW_HEAD_ANGLE, ARROW_HEAD_LEN, MIN_ARROW_LEN};
use crate::doc::Arrow;
use crate::geometry::Point;

/// Triangle for the head of an arrow from `start` to `end`: the tip, then the
/// two back corners `ARROW_HEAD_LEN` behind the tip at ±30° off the shaft.
#[must_use]
pub fn arrowhead(start: Point, end: Point) -> [Point; 3] {
    let angle = (end.y - start.y).atan2(end.x - start.x);
    [
        end,
        Point::new(
            end.x - ARROW_HEAD_LEN * (angle - ARROW_HEAD_ANGLE).cos(),
            end.y - ARROW_HEAD_LEN * (angle - ARROW_HEAD_ANGLE).sin(),
        ),
        Point::new(
            end.x - ARROW_HEAD_LEN * (angle + ARROW_HEAD_ANGLE).cos(),
            end.y - ARROW_HEAD_LEN * (angle + ARROW_HEAD_ANGLE).sin(),
        ),
    ]
}

/// An arrow being drawn. `end` tracks the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingArrow {
    pub start: Point,
    pub end: Point,
}

impl PendingArrow {
    /// Anchor a new arrow at `start`, initially zero length.
    #[must_use]
    pub fn new(start: Point) -> Self {
        Self { start, end: start }
    }

    pub fn update(&mut self, end: Point) {
        self.end = end;
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    #[must_use]
    pub fn head(&self) -> [Point; 3] {
        arrowhead(self.start, self.end)
    }

    /// Turn the gesture into an arrow, or `None` when it is shorter than `min_len`.
    #[must_use]
    pub fn finish(self, min_len: f64) -> Option<Arrow> {
        if self.length() < min_len {
            return None;
        }
        Some(Arrow::new(self.start, self.end))
    }

    /// `finish` with the default minimum length.
    #[must_use]
    pub fn finish_default(self) -> Option<Arrow> {
        self.finish(MIN_ARROW_LEN)
    }
}
