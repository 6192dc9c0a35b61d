//! Hit-testing against stored scene geometry. Later entries in the scene are
//! drawn on top, so every query walks back to front.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::arrows::arrowhead;
use crate::consts::{ARROW_HIT_SLOP_PX, ARROW_STROKE_PX};
use crate::doc::{Arrow, ArrowId, Scene, TokenId};
use crate::geometry::Point;

/// Topmost token whose circle of `radius` contains `pt`.
#[must_use]
pub fn token_at(scene: &Scene, pt: Point, radius: f64) -> Option<TokenId> {
    scene
        .tokens()
        .iter()
        .rev()
        .find(|t| t.pos.distance(pt) <= radius)
        .map(|t| t.id)
}

/// Topmost arrow whose shaft or head covers `pt`.
#[must_use]
pub fn arrow_at(scene: &Scene, pt: Point) -> Option<ArrowId> {
    scene
        .arrows()
        .iter()
        .rev()
        .find(|a| arrow_contains(a, pt))
        .map(|a| a.id)
}

/// Whether `pt` lies on the arrow's stroked shaft or inside its head.
#[must_use]
pub fn arrow_contains(arrow: &Arrow, pt: Point) -> bool {
    let reach = ARROW_STROKE_PX / 2.0 + ARROW_HIT_SLOP_PX;
    if distance_to_segment(pt, arrow.start, arrow.end) <= reach {
        return true;
    }
    let [a, b, c] = arrowhead(arrow.start, arrow.end);
    point_in_triangle(pt, a, b, c)
}

/// Shortest distance from `pt` to the segment `a`–`b`.
#[must_use]
pub fn distance_to_segment(pt: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= f64::EPSILON {
        return pt.distance(a);
    }
    let t = (((pt.x - a.x) * dx + (pt.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    pt.distance(Point::new(a.x + t * dx, a.y + t * dy))
}

fn point_in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let cross = |u: Point, v: Point, w: Point| (v.x - u.x) * (w.y - u.y) - (v.y - u.y) * (w.x - u.x);
    let d1 = cross(a, b, p);
    let d2 = cross(b, c, p);
    let d3 = cross(c, a, p);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}
