//! Token placement: drag clamping, drop resolution with edge snapping, the
//! starting formation, and the off-court bench columns.
//!
//! Token size is never stored. It is derived from the current court scale, so
//! a resize changes every token's radius without touching the scene.

#[cfg(test)]
#[path = "players_test.rs"]
mod players_test;

use crate::consts::{
    BENCH_SPACING_FACTOR, DRAG_MARGIN_PX, FORMATION_TWEEN_MS, MIN_TOKEN_FONT, MIN_TOKEN_RADIUS, SNAP_RADIUS_FACTOR,
    SNAP_TWEEN_MS, TOKEN_RADIUS_UNITS,
};
use crate::doc::{Scene, Team, TokenId};
use crate::geometry::{CourtGeometry, Point, Rect};
use crate::tween::{Animator, Easing, Tween};

/// Token radius for the given court.
#[must_use]
pub fn token_radius(geom: &CourtGeometry) -> f64 {
    (geom.scale * TOKEN_RADIUS_UNITS).max(MIN_TOKEN_RADIUS)
}

/// Label font size for a token of `radius`.
#[must_use]
pub fn label_font_size(radius: f64) -> f64 {
    (radius * 0.3).max(MIN_TOKEN_FONT)
}

/// Starting position for `id`: its role's fraction of court width at mid-height,
/// mirrored for the teal team.
#[must_use]
pub fn formation_position(geom: &CourtGeometry, id: TokenId) -> Point {
    let b = geom.bounds();
    let f = id.role.formation_fraction();
    let f = match id.team {
        Team::Blue => f,
        Team::Teal => 1.0 - f,
    };
    Point::new(b.left + b.width() * f, b.center().y)
}

/// Bench slot for `id`: blue in a column left of the court, teal to the right.
#[must_use]
pub fn bench_position(geom: &CourtGeometry, id: TokenId) -> Point {
    let b = geom.bounds();
    let spacing = token_radius(geom) * BENCH_SPACING_FACTOR;
    #[allow(clippy::cast_precision_loss)]
    let y = b.top + id.role.index() as f64 * spacing;
    match id.team {
        Team::Blue => Point::new(b.left - spacing, y),
        Team::Teal => Point::new(b.right + spacing, y),
    }
}

/// Where a released token ends up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropOutcome {
    /// Dropped inside the court.
    OnCourt,
    /// Dropped just outside; moves to the given point inside the edge.
    Snapped(Point),
    /// Dropped well outside; stays where it was dropped.
    OffCourt,
}

/// Placement rules and timings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// How far past the court edge a token may be dragged.
    pub drag_margin: f64,
    /// Snap distance as a multiple of token radius.
    pub snap_factor: f64,
    pub formation_ms: f64,
    pub snap_ms: f64,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            drag_margin: DRAG_MARGIN_PX,
            snap_factor: SNAP_RADIUS_FACTOR,
            formation_ms: FORMATION_TWEEN_MS,
            snap_ms: SNAP_TWEEN_MS,
        }
    }
}

impl Placement {
    /// Area a dragged token is confined to.
    #[must_use]
    pub fn drag_bounds(&self, geom: &CourtGeometry) -> Rect {
        geom.bounds().expand(self.drag_margin)
    }

    /// Clamp a drag position to the court plus margin.
    #[must_use]
    pub fn constrain(&self, geom: &CourtGeometry, pt: Point) -> Point {
        self.drag_bounds(geom).clamp(pt)
    }

    /// Decide what happens to a token released at `pt`.
    ///
    /// A point outside the court snaps when it is closer than the snap
    /// distance to the court on both axes. Each axis that is outside is pulled
    /// to one radius inside its edge.
    #[must_use]
    pub fn resolve_drop(&self, geom: &CourtGeometry, pt: Point) -> DropOutcome {
        if geom.contains(pt) {
            return DropOutcome::OnCourt;
        }
        let b = geom.bounds();
        let r = token_radius(geom);
        let snap = r * self.snap_factor;

        let dx = (b.left - pt.x).max(pt.x - b.right).max(0.0);
        let dy = (b.top - pt.y).max(pt.y - b.bottom).max(0.0);
        if dx >= snap || dy >= snap {
            return DropOutcome::OffCourt;
        }

        let x = if pt.x < b.left {
            b.left + r
        } else if pt.x > b.right {
            b.right - r
        } else {
            pt.x
        };
        let y = if pt.y < b.top {
            b.top + r
        } else if pt.y > b.bottom {
            b.bottom - r
        } else {
            pt.y
        };
        DropOutcome::Snapped(Point::new(x, y))
    }

    /// Move a token under drag, clamped. Returns the applied position.
    pub fn drag_to(&self, scene: &mut Scene, anim: &mut Animator, geom: &CourtGeometry, id: TokenId, pt: Point) -> Option<Point> {
        let pos = self.constrain(geom, pt);
        anim.cancel(id);
        let token = scene.token_mut(id)?;
        token.pos = pos;
        Some(pos)
    }

    /// Settle a released token: mark it on or off court and start the snap
    /// animation when it lands just outside.
    pub fn drop(
        &self,
        scene: &mut Scene,
        anim: &mut Animator,
        geom: &CourtGeometry,
        id: TokenId,
        now_ms: f64,
    ) -> Option<DropOutcome> {
        let token = scene.token_mut(id)?;
        let outcome = self.resolve_drop(geom, token.pos);
        match outcome {
            DropOutcome::OnCourt => token.on_court = true,
            DropOutcome::OffCourt => token.on_court = false,
            DropOutcome::Snapped(target) => {
                token.on_court = true;
                anim.start(
                    id,
                    Tween {
                        from: token.pos,
                        to: target,
                        start_ms: now_ms,
                        duration_ms: self.snap_ms,
                        easing: Easing::EaseOut,
                    },
                );
            }
        }
        Some(outcome)
    }

    /// Animate every token to its formation position and mark it on court.
    pub fn place_on_court(&self, scene: &mut Scene, anim: &mut Animator, geom: &CourtGeometry, now_ms: f64) {
        for token in scene.tokens_mut() {
            anim.start(
                token.id,
                Tween {
                    from: token.pos,
                    to: formation_position(geom, token.id),
                    start_ms: now_ms,
                    duration_ms: self.formation_ms,
                    easing: Easing::EaseOut,
                },
            );
            token.on_court = true;
        }
    }

    /// Put every token on the bench immediately and mark it off court.
    pub fn clear_court(&self, scene: &mut Scene, anim: &mut Animator, geom: &CourtGeometry) {
        anim.clear();
        for token in scene.tokens_mut() {
            token.pos = bench_position(geom, token.id);
            token.on_court = false;
        }
    }

    /// Follow a geometry change: benched tokens move to their new slots,
    /// tokens on court stay where they are.
    pub fn relayout(&self, scene: &mut Scene, anim: &mut Animator, geom: &CourtGeometry) {
        for token in scene.tokens_mut() {
            if !token.on_court {
                anim.cancel(token.id);
                token.pos = bench_position(geom, token.id);
            }
        }
    }
}
