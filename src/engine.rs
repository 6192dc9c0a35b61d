use crate::arrows::PendingArrow;
use crate::consts::MIN_ARROW_LEN;
use crate::doc::{Arrow, ArrowId, Scene, TokenId};
use crate::geometry::{CourtDimensions, CourtGeometry, Point};
use crate::hit;
use crate::input::{Button, InputState, Key, Modifiers, Tool, UiState};
use crate::persistence::SetupSnapshot;
use crate::players::{self, DropOutcome, Placement};
use crate::tween::Animator;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    RenderNeeded,
    SetCursor(String),
    ToolChanged(Tool),
    ArrowCreated(Arrow),
    ArrowDeleted { id: ArrowId },
    ArrowsCleared { count: usize },
    TokenDropped { id: TokenId, outcome: DropOutcome },
    GeometryChanged(CourtDimensions),
}

/// Interaction state and logic that doesn't depend on the canvas element.
///
/// The canvas-bound wrapper lives in [`crate::web`]; everything here runs
/// natively in tests.
pub struct EngineCore {
    pub scene: Scene,
    pub geometry: CourtGeometry,
    pub placement: Placement,
    pub ui: UiState,
    pub input: InputState,
    pub animator: Animator,
    /// Gestures shorter than this are discarded.
    pub min_arrow_len: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
    /// Host clock as of the last `tick`; new tweens start here.
    pub now_ms: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        let mut core = Self {
            scene: Scene::new(),
            geometry: CourtGeometry::default(),
            placement: Placement::default(),
            ui: UiState::default(),
            input: InputState::default(),
            animator: Animator::new(),
            min_arrow_len: MIN_ARROW_LEN,
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
            now_ms: 0.0,
        };
        core.placement.clear_court(&mut core.scene, &mut core.animator, &core.geometry);
        core
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Clock ---

    /// Advance tweens to `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> Vec<Action> {
        self.now_ms = now_ms;
        if self.animator.tick(&mut self.scene, now_ms) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.animator.is_idle()
    }

    // --- Viewport ---

    /// Refit the court to a new container size. Benched tokens follow the
    /// new layout; tokens on court keep their positions.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = dpr;
        self.geometry = CourtGeometry::fit(width_css, height_css);
        self.placement.relayout(&mut self.scene, &mut self.animator, &self.geometry);
        log::debug!(
            "court refit to {:.0}x{:.0} at scale {:.3}",
            self.geometry.width,
            self.geometry.height,
            self.geometry.scale
        );
        vec![Action::GeometryChanged(self.geometry.dimensions()), Action::RenderNeeded]
    }

    // --- Tools ---

    /// Switch tool. Any arrow being drawn is discarded.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        if matches!(self.input, InputState::DrawingArrow(_)) {
            self.input = InputState::Idle;
        }
        self.ui.tool = tool;
        self.ui.hovered_arrow = None;
        log::debug!("tool set to {tool:?}");
        vec![Action::ToolChanged(tool), Action::SetCursor(tool.cursor().to_owned()), Action::RenderNeeded]
    }

    // --- Bulk operations ---

    /// Animate every token into formation.
    pub fn place_on_court(&mut self) -> Vec<Action> {
        self.input = InputState::Idle;
        self.placement
            .place_on_court(&mut self.scene, &mut self.animator, &self.geometry, self.now_ms);
        vec![Action::RenderNeeded]
    }

    /// Move every token to the bench.
    pub fn clear_court(&mut self) -> Vec<Action> {
        self.input = InputState::Idle;
        self.placement.clear_court(&mut self.scene, &mut self.animator, &self.geometry);
        vec![Action::RenderNeeded]
    }

    pub fn clear_arrows(&mut self) -> Vec<Action> {
        if matches!(self.input, InputState::DrawingArrow(_)) {
            self.input = InputState::Idle;
        }
        self.ui.hovered_arrow = None;
        let count = self.scene.clear_arrows();
        vec![Action::ArrowsCleared { count }, Action::RenderNeeded]
    }

    /// Replace tokens and arrows with a loaded snapshot.
    pub fn restore(&mut self, snapshot: &SetupSnapshot) -> Vec<Action> {
        self.animator.clear();
        self.input = InputState::Idle;
        self.ui.hovered_arrow = None;
        snapshot.apply(&mut self.scene);
        vec![Action::RenderNeeded]
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary || !matches!(self.input, InputState::Idle) {
            return Vec::new();
        }

        if self.ui.tool == Tool::Erase {
            if let Some(id) = hit::arrow_at(&self.scene, pt) {
                self.scene.remove_arrow(&id);
                self.ui.hovered_arrow = None;
                return vec![Action::ArrowDeleted { id }, Action::RenderNeeded];
            }
        }

        if let Some(id) = hit::token_at(&self.scene, pt, self.token_radius()) {
            let Some(token) = self.scene.token(id) else {
                return Vec::new();
            };
            let grab_offset = Point::new(token.pos.x - pt.x, token.pos.y - pt.y);
            self.animator.cancel(id);
            self.scene.raise_token(id);
            self.input = InputState::DraggingToken { id, grab_offset };
            return vec![Action::SetCursor("grabbing".into()), Action::RenderNeeded];
        }

        if self.ui.tool == Tool::Arrow && self.geometry.contains(pt) {
            self.input = InputState::DrawingArrow(PendingArrow::new(pt));
            return vec![Action::RenderNeeded];
        }

        Vec::new()
    }

    pub fn on_pointer_move(&mut self, pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        match &mut self.input {
            InputState::DraggingToken { id, grab_offset } => {
                let (id, offset) = (*id, *grab_offset);
                let target = Point::new(pt.x + offset.x, pt.y + offset.y);
                self.placement
                    .drag_to(&mut self.scene, &mut self.animator, &self.geometry, id, target);
                vec![Action::RenderNeeded]
            }
            InputState::DrawingArrow(pending) => {
                pending.update(pt);
                vec![Action::RenderNeeded]
            }
            InputState::Idle => {
                if self.ui.tool != Tool::Erase {
                    return Vec::new();
                }
                let hovered = hit::arrow_at(&self.scene, pt);
                if hovered == self.ui.hovered_arrow {
                    return Vec::new();
                }
                self.ui.hovered_arrow = hovered;
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self, pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::DraggingToken { id, .. } => {
                let mut actions = vec![Action::SetCursor(self.ui.tool.cursor().to_owned())];
                if let Some(outcome) =
                    self.placement
                        .drop(&mut self.scene, &mut self.animator, &self.geometry, id, self.now_ms)
                {
                    actions.push(Action::TokenDropped { id, outcome });
                }
                actions.push(Action::RenderNeeded);
                actions
            }
            InputState::DrawingArrow(mut pending) => {
                pending.update(pt);
                match pending.finish(self.min_arrow_len) {
                    Some(arrow) => {
                        self.scene.insert_arrow(arrow);
                        vec![Action::ArrowCreated(arrow), Action::RenderNeeded]
                    }
                    None => vec![Action::RenderNeeded],
                }
            }
        }
    }

    /// Tool shortcuts and arrow deletion. Keys held with Ctrl/Meta belong to
    /// the application shell and are ignored here.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.command() {
            return Vec::new();
        }
        if let Some(tool) = Tool::from_shortcut(key.as_str()) {
            return self.set_tool(tool);
        }
        match key.as_str() {
            "Delete" | "Backspace" if self.ui.tool == Tool::Erase => self.clear_arrows(),
            _ => Vec::new(),
        }
    }

    // --- Queries ---

    /// Token radius at the current court scale.
    #[must_use]
    pub fn token_radius(&self) -> f64 {
        players::token_radius(&self.geometry)
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.ui.tool
    }

    #[must_use]
    pub fn arrow_count(&self) -> usize {
        self.scene.arrow_count()
    }

    #[must_use]
    pub fn dimensions(&self) -> CourtDimensions {
        self.geometry.dimensions()
    }
}
