//! Rendering: draws the court, arrows, and tokens to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It reads engine state and produces pixels. It never mutates anything.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::web::CourtCoachApp::render`]) handles the result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::arrows::arrowhead;
use crate::consts::{ARROW_STROKE_PX, DRAG_LIFT_SCALE};
use crate::doc::Token;
use crate::engine::EngineCore;
use crate::geometry::{CourtGeometry, GoalSide, Point, Third};
use crate::players::{label_font_size, token_radius};
use crate::settings::Theme;

/// Court line width in pixels.
const COURT_LINE_PX: f64 = 3.0;

const GOAL_POST_W: f64 = 4.0;
const GOAL_POST_H: f64 = 12.0;

const LABEL_COLOR: &str = "#666666";
/// Distance of the third labels above the bottom line.
const LABEL_INSET_PX: f64 = 25.0;

const ARROW_COLOR: &str = "#ff4444";
const ARROW_HOVER_COLOR: &str = "#ff6666";

const TOKEN_OUTLINE: &str = "#ffffff";
const TOKEN_SHADOW: &str = "rgba(0,0,0,0.3)";

/// Display preferences that affect drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStyle {
    pub theme: Theme,
    pub show_labels: bool,
}

/// Draw the full scene: court, arrows (including one being drawn), then tokens.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, core: &EngineCore, style: RenderStyle) -> Result<(), JsValue> {
    ctx.set_transform(core.dpr, 0.0, 0.0, core.dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, core.viewport_width, core.viewport_height);

    draw_court(ctx, &core.geometry, style)?;

    for arrow in core.scene.arrows() {
        let color = if core.ui.hovered_arrow == Some(arrow.id) { ARROW_HOVER_COLOR } else { ARROW_COLOR };
        draw_arrow(ctx, arrow.start, arrow.end, color);
    }
    if let Some(pending) = core.input.pending_arrow() {
        draw_arrow(ctx, pending.start, pending.end, ARROW_COLOR);
    }

    let radius = token_radius(&core.geometry);
    let dragging = core.input.dragging();
    for token in core.scene.tokens() {
        let r = if dragging == Some(token.id) { radius * DRAG_LIFT_SCALE } else { radius };
        draw_token(ctx, token, r)?;
    }

    Ok(())
}

// =============================================================
// Court
// =============================================================

fn draw_court(ctx: &CanvasRenderingContext2d, geom: &CourtGeometry, style: RenderStyle) -> Result<(), JsValue> {
    let line = style.theme.line_color();
    let b = geom.bounds();
    let mid_y = b.center().y;

    ctx.save();
    ctx.set_stroke_style_str(line);
    ctx.set_fill_style_str(line);
    ctx.set_line_width(COURT_LINE_PX);

    ctx.stroke_rect(b.left, b.top, b.width(), b.height());

    for third in [Third::Left, Third::Center] {
        let x = geom.third(third).right;
        ctx.begin_path();
        ctx.move_to(x, b.top);
        ctx.line_to(x, b.bottom);
        ctx.stroke();
    }

    // Goal semicircles open into the court.
    for (side, from, to) in [(GoalSide::Left, -PI / 2.0, PI / 2.0), (GoalSide::Right, PI / 2.0, PI * 1.5)] {
        let c = geom.goal_circle(side);
        ctx.begin_path();
        ctx.arc(c.center.x, c.center.y, c.radius, from, to)?;
        ctx.stroke();
    }

    let cc = geom.center_circle();
    ctx.begin_path();
    ctx.arc(cc.center.x, cc.center.y, cc.radius, 0.0, 2.0 * PI)?;
    ctx.stroke();

    for x in [b.left, b.right] {
        ctx.fill_rect(x - GOAL_POST_W / 2.0, mid_y - GOAL_POST_H / 2.0, GOAL_POST_W, GOAL_POST_H);
    }
    ctx.restore();

    if style.show_labels {
        draw_court_labels(ctx, geom)?;
    }
    Ok(())
}

fn draw_court_labels(ctx: &CanvasRenderingContext2d, geom: &CourtGeometry) -> Result<(), JsValue> {
    let size = (geom.scale * 3.0).max(10.0);
    let y = geom.bounds().bottom - LABEL_INSET_PX;

    ctx.save();
    ctx.set_fill_style_str(LABEL_COLOR);
    ctx.set_font(&format!("{size}px Arial"));
    ctx.set_text_align("center");
    ctx.set_text_baseline("top");
    for (third, label) in [(Third::Left, "Goal Third"), (Third::Center, "Center Third"), (Third::Right, "Goal Third")] {
        ctx.fill_text(label, geom.third(third).center().x, y)?;
    }
    ctx.restore();
    Ok(())
}

// =============================================================
// Arrows
// =============================================================

fn draw_arrow(ctx: &CanvasRenderingContext2d, start: Point, end: Point, color: &str) {
    ctx.save();
    ctx.set_stroke_style_str(color);
    ctx.set_fill_style_str(color);
    ctx.set_line_width(ARROW_STROKE_PX);
    ctx.set_line_cap("round");

    ctx.begin_path();
    ctx.move_to(start.x, start.y);
    ctx.line_to(end.x, end.y);
    ctx.stroke();

    let [tip, left, right] = arrowhead(start, end);
    ctx.begin_path();
    ctx.move_to(tip.x, tip.y);
    ctx.line_to(left.x, left.y);
    ctx.line_to(right.x, right.y);
    ctx.close_path();
    ctx.fill();
    ctx.stroke();

    ctx.restore();
}

// =============================================================
// Tokens
// =============================================================

fn draw_token(ctx: &CanvasRenderingContext2d, token: &Token, radius: f64) -> Result<(), JsValue> {
    let Point { x, y } = token.pos;

    ctx.save();
    ctx.set_shadow_color(TOKEN_SHADOW);
    ctx.set_shadow_blur(4.0);
    ctx.set_shadow_offset_x(2.0);
    ctx.set_shadow_offset_y(2.0);
    ctx.set_fill_style_str(token.id.team.color());
    ctx.begin_path();
    ctx.arc(x, y, radius, 0.0, 2.0 * PI)?;
    ctx.fill();
    ctx.restore();

    ctx.save();
    ctx.set_stroke_style_str(TOKEN_OUTLINE);
    ctx.set_line_width(2.0);
    ctx.begin_path();
    ctx.arc(x, y, radius, 0.0, 2.0 * PI)?;
    ctx.stroke();

    ctx.set_fill_style_str(TOKEN_OUTLINE);
    ctx.set_font(&format!("bold {}px Arial, sans-serif", label_font_size(radius)));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.fill_text(token.id.role.abbrev(), x, y)?;
    ctx.restore();
    Ok(())
}
