//! Court layout: fits a fixed-ratio court inside the container and answers
//! bounds queries against it.
//!
//! `CourtGeometry` is a plain value recomputed from the container size. Nothing
//! downstream should hold on to one across a resize; the engine replaces it and
//! reports `Action::GeometryChanged` so dependants re-read it.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    CENTER_CIRCLE_UNITS, COURT_PADDING_PX, COURT_RATIO, COURT_UNITS_WIDE, GOAL_CIRCLE_UNITS, MIN_COURT_HEIGHT,
    MIN_COURT_WIDTH,
};

/// A point in canvas space (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Axis-aligned rectangle given by its edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.left && pt.x <= self.right && pt.y >= self.top && pt.y <= self.bottom
    }

    /// Grow the rectangle by `margin` on every side.
    #[must_use]
    pub fn expand(&self, margin: f64) -> Rect {
        Rect {
            left: self.left - margin,
            top: self.top - margin,
            right: self.right + margin,
            bottom: self.bottom + margin,
        }
    }

    /// Clamp `pt` into the rectangle.
    #[must_use]
    pub fn clamp(&self, pt: Point) -> Point {
        Point::new(pt.x.clamp(self.left, self.right), pt.y.clamp(self.top, self.bottom))
    }
}

/// Circle with its bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect {
            left: self.center.x - self.radius,
            top: self.center.y - self.radius,
            right: self.center.x + self.radius,
            bottom: self.center.y + self.radius,
        }
    }

    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        self.center.distance(pt) <= self.radius
    }
}

/// One of the three equal vertical sections of the court.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Third {
    Left,
    Center,
    Right,
}

/// Which end of the court.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalSide {
    Left,
    Right,
}

/// Court size as written into saved snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourtDimensions {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
}

/// Court placement inside a container of a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourtGeometry {
    /// Left edge of the court.
    pub x: f64,
    /// Top edge of the court.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Pixels per court unit.
    pub scale: f64,
}

impl CourtGeometry {
    /// Fit the court into a `container_w` × `container_h` container.
    ///
    /// The court keeps its 2:1 ratio inside the padded area, never shrinks
    /// below the minimum floor, and is centered (its origin goes negative when
    /// the container is smaller than the floor).
    #[must_use]
    pub fn fit(container_w: f64, container_h: f64) -> Self {
        let mut width = container_w - COURT_PADDING_PX * 2.0;
        let mut height = width / COURT_RATIO;

        if height > container_h - COURT_PADDING_PX * 2.0 {
            height = container_h - COURT_PADDING_PX * 2.0;
            width = height * COURT_RATIO;
        }

        let width = width.max(MIN_COURT_WIDTH);
        let height = height.max(MIN_COURT_HEIGHT);

        Self {
            x: (container_w - width) / 2.0,
            y: (container_h - height) / 2.0,
            width,
            height,
            scale: width / COURT_UNITS_WIDE,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect {
            left: self.x,
            top: self.y,
            right: self.x + self.width,
            bottom: self.y + self.height,
        }
    }

    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        self.bounds().contains(pt)
    }

    #[must_use]
    pub fn third(&self, third: Third) -> Rect {
        let w = self.width / 3.0;
        let (left, right) = match third {
            Third::Left => (self.x, self.x + w),
            Third::Center => (self.x + w, self.x + w * 2.0),
            Third::Right => (self.x + w * 2.0, self.x + self.width),
        };
        Rect { left, top: self.y, right, bottom: self.y + self.height }
    }

    /// Goal circle centered on the midpoint of the given short edge.
    ///
    /// Only the half inside the court is drawn, but the full circle is returned.
    #[must_use]
    pub fn goal_circle(&self, side: GoalSide) -> Circle {
        let cx = match side {
            GoalSide::Left => self.x,
            GoalSide::Right => self.x + self.width,
        };
        Circle {
            center: Point::new(cx, self.y + self.height / 2.0),
            radius: self.scale * GOAL_CIRCLE_UNITS,
        }
    }

    /// Bounds of the goal circle clipped to the court, matching the drawn arc.
    #[must_use]
    pub fn goal_circle_bounds(&self, side: GoalSide) -> Rect {
        let mut rect = self.goal_circle(side).bounds();
        match side {
            GoalSide::Left => rect.left = self.x,
            GoalSide::Right => rect.right = self.x + self.width,
        }
        rect
    }

    #[must_use]
    pub fn center_circle(&self) -> Circle {
        Circle {
            center: self.bounds().center(),
            radius: self.scale * CENTER_CIRCLE_UNITS,
        }
    }

    #[must_use]
    pub fn dimensions(&self) -> CourtDimensions {
        CourtDimensions { width: self.width, height: self.height, scale: self.scale }
    }
}

impl Default for CourtGeometry {
    fn default() -> Self {
        Self::fit(0.0, 0.0)
    }
}
