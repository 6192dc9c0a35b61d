#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::{Role, Team};

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// distance_to_segment
// =============================================================

#[test]
fn segment_distance_perpendicular() {
    assert_eq!(distance_to_segment(pt(5.0, 3.0), pt(0.0, 0.0), pt(10.0, 0.0)), 3.0);
}

#[test]
fn segment_distance_past_endpoint() {
    assert_eq!(distance_to_segment(pt(13.0, 4.0), pt(0.0, 0.0), pt(10.0, 0.0)), 5.0);
}

#[test]
fn segment_distance_degenerate() {
    assert_eq!(distance_to_segment(pt(3.0, 4.0), pt(0.0, 0.0), pt(0.0, 0.0)), 5.0);
}

// =============================================================
// Arrows
// =============================================================

#[test]
fn arrow_hit_on_shaft_and_miss_beside() {
    let a = Arrow::new(pt(0.0, 0.0), pt(100.0, 0.0));
    assert!(arrow_contains(&a, pt(50.0, 0.0)));
    assert!(arrow_contains(&a, pt(50.0, 5.0)));
    assert!(!arrow_contains(&a, pt(50.0, 10.0)));
}

#[test]
fn arrow_hit_inside_head_corner_region() {
    let a = Arrow::new(pt(0.0, 0.0), pt(100.0, 0.0));
    // Near the back corner of the head, outside shaft reach.
    assert!(arrow_contains(&a, pt(90.0, 5.7)));
    assert!(!arrow_contains(&a, pt(80.0, 5.7)));
}

#[test]
fn arrow_at_prefers_most_recent() {
    let mut scene = Scene::new();
    let first = Arrow::new(pt(0.0, 0.0), pt(100.0, 0.0));
    let second = Arrow::new(pt(50.0, -50.0), pt(50.0, 50.0));
    let second_id = second.id;
    scene.insert_arrow(first);
    scene.insert_arrow(second);
    assert_eq!(arrow_at(&scene, pt(50.0, 0.0)), Some(second_id));
}

#[test]
fn arrow_at_empty_space_is_none() {
    let mut scene = Scene::new();
    scene.insert_arrow(Arrow::new(pt(0.0, 0.0), pt(100.0, 0.0)));
    assert_eq!(arrow_at(&scene, pt(50.0, 80.0)), None);
}

// =============================================================
// Tokens
// =============================================================

#[test]
fn token_at_finds_token_within_radius() {
    let mut scene = Scene::new();
    let id = TokenId::new(Team::Teal, Role::Centre);
    scene.place_token(id, pt(300.0, 300.0), true);
    assert_eq!(token_at(&scene, pt(310.0, 310.0), 20.0), Some(id));
    assert_eq!(token_at(&scene, pt(320.0, 320.0), 20.0), None);
}

#[test]
fn token_at_prefers_topmost() {
    let mut scene = Scene::new();
    let under = TokenId::new(Team::Blue, Role::GoalAttack);
    let over = TokenId::new(Team::Teal, Role::GoalAttack);
    // All tokens start at the origin; move everyone else away.
    for t in scene.tokens_mut() {
        t.pos = pt(-1000.0, -1000.0);
    }
    scene.place_token(under, pt(100.0, 100.0), true);
    scene.place_token(over, pt(105.0, 100.0), true);
    assert_eq!(token_at(&scene, pt(102.0, 100.0), 20.0), Some(over));
    scene.raise_token(under);
    assert_eq!(token_at(&scene, pt(102.0, 100.0), 20.0), Some(under));
}
