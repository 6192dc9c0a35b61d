#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::{Role, Team};
use crate::players::{bench_position, formation_position};

// =============================================================
// Helpers
// =============================================================

fn no_modifiers() -> Modifiers {
    Modifiers::default()
}

fn ctrl_modifier() -> Modifiers {
    Modifiers { ctrl: true, ..Default::default() }
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn key(k: &str) -> Key {
    Key(k.to_owned())
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Court at x 40..960, y 70..530.
fn core() -> EngineCore {
    let mut core = EngineCore::new();
    core.set_viewport(1000.0, 600.0, 1.0);
    core
}

fn gs() -> TokenId {
    TokenId::new(Team::Blue, Role::GoalShooter)
}

fn token_pos(core: &EngineCore, id: TokenId) -> Point {
    core.scene.token(id).unwrap().pos
}

fn on_court(core: &EngineCore, id: TokenId) -> bool {
    core.scene.token(id).unwrap().on_court
}

fn drag(core: &mut EngineCore, from: Point, to: Point) -> Vec<Action> {
    core.on_pointer_down(from, Button::Primary, no_modifiers());
    core.on_pointer_move(to, no_modifiers());
    core.on_pointer_up(to, Button::Primary, no_modifiers())
}

// =============================================================
// Startup and viewport
// =============================================================

#[test]
fn starts_with_every_token_benched() {
    let core = core();
    assert_eq!(core.scene.tokens().len(), 14);
    for t in core.scene.tokens() {
        assert!(!t.on_court);
        assert_eq!(t.pos, bench_position(&core.geometry, t.id));
    }
    assert_eq!(core.tool(), Tool::Select);
}

#[test]
fn set_viewport_reports_geometry() {
    let mut core = EngineCore::new();
    let actions = core.set_viewport(1000.0, 600.0, 2.0);
    assert_eq!(actions[0], Action::GeometryChanged(core.geometry.dimensions()));
    assert_eq!(core.dpr, 2.0);
    assert_eq!(core.geometry.width, 920.0);
}

#[test]
fn resize_moves_benched_tokens_and_keeps_on_court_ones() {
    let mut core = core();
    core.scene.place_token(gs(), pt(500.0, 300.0), true);
    core.set_viewport(1400.0, 800.0, 1.0);

    assert_eq!(token_pos(&core, gs()), pt(500.0, 300.0));
    let keeper = TokenId::new(Team::Teal, Role::GoalKeeper);
    assert_eq!(token_pos(&core, keeper), bench_position(&core.geometry, keeper));
}

// =============================================================
// Token drag
// =============================================================

#[test]
fn drop_inside_court_marks_on_court() {
    let mut core = core();
    core.scene.place_token(gs(), pt(500.0, 300.0), false);

    let actions = drag(&mut core, pt(500.0, 300.0), pt(510.0, 305.0));
    assert!(actions.contains(&Action::TokenDropped { id: gs(), outcome: DropOutcome::OnCourt }));
    assert!(on_court(&core, gs()));
    assert_eq!(token_pos(&core, gs()), pt(510.0, 305.0));
    assert!(matches!(core.input, InputState::Idle));
}

#[test]
fn drag_keeps_grab_offset() {
    let mut core = core();
    core.scene.place_token(gs(), pt(500.0, 300.0), false);
    core.on_pointer_down(pt(505.0, 302.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(605.0, 402.0), no_modifiers());
    assert_eq!(token_pos(&core, gs()), pt(600.0, 400.0));
}

#[test]
fn drag_is_clamped_and_far_drop_stays_off_court() {
    let mut core = core();
    core.scene.place_token(gs(), pt(500.0, 300.0), true);

    let actions = drag(&mut core, pt(500.0, 300.0), pt(-500.0, 300.0));
    assert_eq!(token_pos(&core, gs()).x, 40.0 - 50.0);
    assert!(actions.contains(&Action::TokenDropped { id: gs(), outcome: DropOutcome::OffCourt }));
    assert!(!on_court(&core, gs()));
}

#[test]
fn drop_near_edge_snaps_inside() {
    let mut core = core();
    core.tick(0.0);
    core.scene.place_token(gs(), pt(500.0, 300.0), false);

    drag(&mut core, pt(500.0, 300.0), pt(20.0, 300.0));
    assert!(on_court(&core, gs()));
    assert!(core.is_animating());

    core.tick(200.0);
    let r = core.token_radius();
    let pos = token_pos(&core, gs());
    assert!(approx(pos.x, 40.0 + r));
    assert_eq!(pos.y, 300.0);
    assert!(!core.is_animating());
}

#[test]
fn tokens_drag_in_every_tool() {
    for tool in [Tool::Select, Tool::Arrow, Tool::Erase] {
        let mut core = core();
        core.set_tool(tool);
        core.scene.place_token(gs(), pt(500.0, 300.0), false);
        drag(&mut core, pt(500.0, 300.0), pt(450.0, 250.0));
        assert_eq!(token_pos(&core, gs()), pt(450.0, 250.0));
        assert_eq!(core.arrow_count(), 0);
    }
}

#[test]
fn dragged_token_is_raised() {
    let mut core = core();
    core.scene.place_token(gs(), pt(500.0, 300.0), false);
    core.on_pointer_down(pt(500.0, 300.0), Button::Primary, no_modifiers());
    assert_eq!(core.scene.tokens().last().unwrap().id, gs());
    assert_eq!(core.input.dragging(), Some(gs()));
}

#[test]
fn secondary_button_is_ignored() {
    let mut core = core();
    core.scene.place_token(gs(), pt(500.0, 300.0), false);
    assert!(core.on_pointer_down(pt(500.0, 300.0), Button::Secondary, no_modifiers()).is_empty());
    assert!(matches!(core.input, InputState::Idle));
}

// =============================================================
// Arrow tool
// =============================================================

#[test]
fn arrow_tool_draws_arrow_with_exact_endpoints() {
    let mut core = core();
    core.set_tool(Tool::Arrow);

    core.on_pointer_down(pt(200.0, 300.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(250.0, 310.0), no_modifiers());
    assert_eq!(core.input.pending_arrow().unwrap().end, pt(250.0, 310.0));
    let actions = core.on_pointer_up(pt(300.0, 320.0), Button::Primary, no_modifiers());

    assert_eq!(core.arrow_count(), 1);
    let arrow = core.scene.arrows()[0];
    assert_eq!(arrow.start, pt(200.0, 300.0));
    assert_eq!(arrow.end, pt(300.0, 320.0));
    assert!(actions.contains(&Action::ArrowCreated(arrow)));
}

#[test]
fn short_gesture_is_discarded() {
    let mut core = core();
    core.set_tool(Tool::Arrow);
    drag(&mut core, pt(200.0, 300.0), pt(219.0, 300.0));
    assert_eq!(core.arrow_count(), 0);

    drag(&mut core, pt(200.0, 300.0), pt(220.0, 300.0));
    assert_eq!(core.arrow_count(), 1);
}

#[test]
fn arrow_must_start_inside_court() {
    let mut core = core();
    core.set_tool(Tool::Arrow);
    assert!(core.on_pointer_down(pt(500.0, 20.0), Button::Primary, no_modifiers()).is_empty());
    assert!(core.input.pending_arrow().is_none());
}

#[test]
fn select_tool_does_not_draw() {
    let mut core = core();
    drag(&mut core, pt(200.0, 300.0), pt(400.0, 300.0));
    assert_eq!(core.arrow_count(), 0);
}

#[test]
fn switching_tool_discards_pending_arrow() {
    let mut core = core();
    core.set_tool(Tool::Arrow);
    core.on_pointer_down(pt(200.0, 300.0), Button::Primary, no_modifiers());
    let actions = core.set_tool(Tool::Select);
    assert!(actions.contains(&Action::SetCursor("default".into())));
    assert!(core.on_pointer_up(pt(400.0, 300.0), Button::Primary, no_modifiers()).is_empty());
    assert_eq!(core.arrow_count(), 0);
}

// =============================================================
// Erase tool
// =============================================================

fn core_with_arrow() -> (EngineCore, ArrowId) {
    let mut core = core();
    core.set_tool(Tool::Arrow);
    drag(&mut core, pt(200.0, 300.0), pt(300.0, 300.0));
    let id = core.scene.arrows()[0].id;
    core.set_tool(Tool::Erase);
    (core, id)
}

#[test]
fn erase_click_removes_arrow() {
    let (mut core, id) = core_with_arrow();
    let actions = core.on_pointer_down(pt(250.0, 301.0), Button::Primary, no_modifiers());
    assert_eq!(actions[0], Action::ArrowDeleted { id });
    assert_eq!(core.arrow_count(), 0);
}

#[test]
fn erase_click_off_arrow_keeps_it() {
    let (mut core, _) = core_with_arrow();
    core.on_pointer_down(pt(250.0, 340.0), Button::Primary, no_modifiers());
    assert_eq!(core.arrow_count(), 1);
}

#[test]
fn erase_hover_highlights_arrow() {
    let (mut core, id) = core_with_arrow();
    assert_eq!(core.on_pointer_move(pt(250.0, 300.0), no_modifiers()), vec![Action::RenderNeeded]);
    assert_eq!(core.ui.hovered_arrow, Some(id));
    assert!(core.on_pointer_move(pt(251.0, 300.0), no_modifiers()).is_empty());
    core.on_pointer_move(pt(250.0, 400.0), no_modifiers());
    assert_eq!(core.ui.hovered_arrow, None);
}

#[test]
fn hover_is_not_tracked_outside_erase() {
    let (mut core, _) = core_with_arrow();
    core.set_tool(Tool::Select);
    assert!(core.on_pointer_move(pt(250.0, 300.0), no_modifiers()).is_empty());
    assert_eq!(core.ui.hovered_arrow, None);
}

// =============================================================
// Keyboard
// =============================================================

#[test]
fn tool_shortcuts() {
    let mut core = core();
    core.on_key_down(&key("2"), no_modifiers());
    assert_eq!(core.tool(), Tool::Arrow);
    core.on_key_down(&key("e"), no_modifiers());
    assert_eq!(core.tool(), Tool::Erase);
    core.on_key_down(&key("Escape"), no_modifiers());
    assert_eq!(core.tool(), Tool::Select);
}

#[test]
fn command_keys_are_left_to_the_shell() {
    let mut core = core();
    core.set_tool(Tool::Arrow);
    assert!(core.on_key_down(&key("s"), ctrl_modifier()).is_empty());
    assert_eq!(core.tool(), Tool::Arrow);
}

#[test]
fn delete_clears_arrows_only_in_erase() {
    let (mut core, _) = core_with_arrow();
    core.set_tool(Tool::Select);
    assert!(core.on_key_down(&key("Delete"), no_modifiers()).is_empty());
    assert_eq!(core.arrow_count(), 1);

    core.set_tool(Tool::Erase);
    let actions = core.on_key_down(&key("Backspace"), no_modifiers());
    assert_eq!(actions[0], Action::ArrowsCleared { count: 1 });
    assert_eq!(core.arrow_count(), 0);
}

// =============================================================
// Bulk operations
// =============================================================

#[test]
fn place_on_court_animates_into_formation() {
    let mut core = core();
    core.tick(1000.0);
    core.place_on_court();
    assert!(core.scene.tokens().iter().all(|t| t.on_court));

    core.tick(1250.0);
    assert!(core.is_animating());
    core.tick(1500.0);
    assert!(!core.is_animating());
    for t in core.scene.tokens() {
        assert_eq!(t.pos, formation_position(&core.geometry, t.id));
    }
}

#[test]
fn clear_court_benches_everyone() {
    let mut core = core();
    core.place_on_court();
    core.clear_court();
    assert!(!core.is_animating());
    for t in core.scene.tokens() {
        assert!(!t.on_court);
        assert_eq!(t.pos, bench_position(&core.geometry, t.id));
    }
}

#[test]
fn restore_applies_snapshot() {
    let (mut core, _) = core_with_arrow();
    let mut saved = Scene::new();
    saved.place_token(gs(), pt(123.0, 234.0), true);
    let snapshot = SetupSnapshot::capture(&saved, None, String::new());

    core.restore(&snapshot);
    assert_eq!(core.arrow_count(), 0);
    assert_eq!(token_pos(&core, gs()), pt(123.0, 234.0));
    assert!(on_court(&core, gs()));
}
