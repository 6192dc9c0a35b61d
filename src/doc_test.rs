#![allow(clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// Team / Role
// =============================================================

#[test]
fn role_serializes_as_abbreviation() {
    for role in Role::ALL {
        let json = serde_json::to_value(role).unwrap();
        assert_eq!(json, serde_json::json!(role.abbrev()));
    }
}

#[test]
fn role_rejects_unknown_abbreviation() {
    assert!(serde_json::from_value::<Role>(serde_json::json!("XX")).is_err());
}

#[test]
fn team_serializes_lowercase() {
    assert_eq!(serde_json::to_value(Team::Blue).unwrap(), "blue");
    assert_eq!(serde_json::to_value(Team::Teal).unwrap(), "teal");
}

#[test]
fn role_index_matches_bench_order() {
    for (i, role) in Role::ALL.iter().enumerate() {
        assert_eq!(role.index(), i);
    }
}

#[test]
fn role_names_are_human_readable() {
    assert_eq!(Role::Centre.name(), "Centre");
    assert_eq!(Role::GoalKeeper.name(), "Goal Keeper");
}

#[test]
fn team_colors_differ() {
    assert_ne!(Team::Blue.color(), Team::Teal.color());
}

// =============================================================
// Scene: tokens
// =============================================================

#[test]
fn scene_has_fourteen_distinct_tokens() {
    let scene = Scene::new();
    assert_eq!(scene.tokens().len(), 14);
    for team in Team::ALL {
        for role in Role::ALL {
            assert!(scene.token(TokenId::new(team, role)).is_some());
        }
    }
}

#[test]
fn scene_tokens_start_off_court() {
    let scene = Scene::new();
    assert!(scene.on_court().is_empty());
    assert_eq!(scene.off_court().len(), 14);
}

#[test]
fn place_token_updates_position_and_flag() {
    let mut scene = Scene::new();
    let id = TokenId::new(Team::Teal, Role::WingAttack);
    assert!(scene.place_token(id, pt(10.0, 20.0), true));
    let t = scene.token(id).unwrap();
    assert_eq!(t.pos, pt(10.0, 20.0));
    assert!(t.on_court);
    assert_eq!(scene.on_court().len(), 1);
}

#[test]
fn raise_token_moves_it_last_without_losing_any() {
    let mut scene = Scene::new();
    let id = TokenId::new(Team::Blue, Role::GoalShooter);
    scene.raise_token(id);
    assert_eq!(scene.tokens().len(), 14);
    assert_eq!(scene.tokens().last().unwrap().id, id);
}

// =============================================================
// Scene: arrows
// =============================================================

#[test]
fn insert_and_remove_arrow() {
    let mut scene = Scene::new();
    let a = Arrow::new(pt(0.0, 0.0), pt(30.0, 40.0));
    let id = a.id;
    scene.insert_arrow(a);
    assert_eq!(scene.arrow_count(), 1);
    assert_eq!(scene.arrow(&id).unwrap().length(), 50.0);

    let removed = scene.remove_arrow(&id).unwrap();
    assert_eq!(removed.id, id);
    assert_eq!(scene.arrow_count(), 0);
}

#[test]
fn remove_missing_arrow_returns_none() {
    let mut scene = Scene::new();
    scene.insert_arrow(Arrow::new(pt(0.0, 0.0), pt(30.0, 0.0)));
    assert!(scene.remove_arrow(&Uuid::new_v4()).is_none());
    assert_eq!(scene.arrow_count(), 1);
}

#[test]
fn clear_arrows_reports_count() {
    let mut scene = Scene::new();
    for i in 0..3 {
        scene.insert_arrow(Arrow::new(pt(0.0, 0.0), pt(30.0, f64::from(i))));
    }
    assert_eq!(scene.clear_arrows(), 3);
    assert_eq!(scene.arrow_count(), 0);
    assert_eq!(scene.clear_arrows(), 0);
}

#[test]
fn arrows_get_unique_ids() {
    let a = Arrow::new(pt(0.0, 0.0), pt(30.0, 0.0));
    let b = Arrow::new(pt(0.0, 0.0), pt(30.0, 0.0));
    assert_ne!(a.id, b.id);
}
