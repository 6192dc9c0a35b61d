//! Token transitions as pure interpolation over an explicit clock.
//!
//! A `Tween` is a value: given the current time it returns where the token
//! should be. `Animator` keeps at most one tween per token and writes sampled
//! positions into the scene when the host ticks it with a frame timestamp.

#[cfg(test)]
#[path = "tween_test.rs"]
mod tween_test;

use std::collections::HashMap;

use crate::doc::{Scene, TokenId};
use crate::geometry::Point;

/// Easing curve applied to linear progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Quadratic ease-out: fast start, gentle landing.
    #[default]
    EaseOut,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` onto the curve.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => t * (2.0 - t),
        }
    }
}

/// Linear interpolation between two points.
#[must_use]
pub fn lerp(a: Point, b: Point, t: f64) -> Point {
    Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

/// A timed move from one point to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: Point,
    pub to: Point,
    pub start_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl Tween {
    /// Position at `now_ms`. Before the start this is `from`; after the end it is `to`.
    #[must_use]
    pub fn sample(&self, now_ms: f64) -> Point {
        if self.duration_ms <= 0.0 {
            return self.to;
        }
        let t = (now_ms - self.start_ms) / self.duration_ms;
        if t >= 1.0 {
            return self.to;
        }
        lerp(self.from, self.to, self.easing.apply(t))
    }

    #[must_use]
    pub fn is_done(&self, now_ms: f64) -> bool {
        now_ms - self.start_ms >= self.duration_ms
    }
}

/// Active token tweens keyed by token.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    tweens: HashMap<TokenId, Tween>,
}

impl Animator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a tween for `id`, replacing any in flight.
    pub fn start(&mut self, id: TokenId, tween: Tween) {
        self.tweens.insert(id, tween);
    }

    /// Drop the tween for `id`, leaving the token where it currently is.
    pub fn cancel(&mut self, id: TokenId) {
        self.tweens.remove(&id);
    }

    #[must_use]
    pub fn is_animating(&self, id: TokenId) -> bool {
        self.tweens.contains_key(&id)
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Target position of `id`'s tween, if one is running.
    #[must_use]
    pub fn target(&self, id: TokenId) -> Option<Point> {
        self.tweens.get(&id).map(|t| t.to)
    }

    /// Advance every tween to `now_ms`, writing positions into `scene`.
    /// Finished tweens are removed. Returns true if anything moved.
    pub fn tick(&mut self, scene: &mut Scene, now_ms: f64) -> bool {
        if self.tweens.is_empty() {
            return false;
        }
        for token in scene.tokens_mut() {
            if let Some(tween) = self.tweens.get(&token.id) {
                token.pos = tween.sample(now_ms);
            }
        }
        self.tweens.retain(|_, t| !t.is_done(now_ms));
        true
    }

    /// Jump every tween to its end position.
    pub fn finish_all(&mut self, scene: &mut Scene) {
        for token in scene.tokens_mut() {
            if let Some(tween) = self.tweens.get(&token.id) {
                token.pos = tween.to;
            }
        }
        self.tweens.clear();
    }

    /// Drop every tween without moving anything.
    pub fn clear(&mut self) {
        self.tweens.clear();
    }
}
