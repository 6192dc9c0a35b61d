//! Application shell: owns the interaction core, storage, and settings, and
//! turns host commands into state changes plus effects for the page.
//!
//! DESIGN
//! ======
//! The shell never touches the DOM. Every handler returns a list of
//! [`Effect`]s (repaint, cursor, theme, help, notifications) and the page
//! applies them. Time always comes in from the host, so auto-save and resize
//! debouncing are plain state machines polled from [`AppContext::tick`].

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use serde::Serialize;

use crate::consts::{AUTO_SAVE_INTERVAL_MS, MIN_ARROW_LEN, RESIZE_DEBOUNCE_MS};
use crate::engine::{Action, EngineCore};
use crate::error::SnapshotError;
use crate::geometry::Point;
use crate::input::{Button, Key, Modifiers, Tool};
use crate::persistence::{AutoSavePolicy, StorageManager};
use crate::players::Placement;
use crate::render::RenderStyle;
use crate::settings::{Settings, Theme};
use crate::store::KeyValueStore;
use crate::timer::{Debounce, Interval};
use crate::usage::UsageStats;

// =============================================================================
// CONFIG
// =============================================================================

/// Code-level tunables. User preferences live in [`Settings`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoachConfig {
    pub auto_save_interval_ms: f64,
    pub resize_debounce_ms: f64,
    pub placement: Placement,
    pub min_arrow_len: f64,
    pub auto_save: AutoSavePolicy,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            auto_save_interval_ms: AUTO_SAVE_INTERVAL_MS,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            placement: Placement::default(),
            min_arrow_len: MIN_ARROW_LEN,
            auto_save: AutoSavePolicy::default(),
        }
    }
}

// =============================================================================
// COMMANDS AND EFFECTS
// =============================================================================

/// User-level operations, from toolbar buttons or keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    PlaceOnCourt,
    ClearCourt,
    ClearArrows,
    Save,
    Load,
    ToggleTheme,
    SetTool(Tool),
    ShowHelp,
    ToggleFullscreen,
    Reset,
}

impl Command {
    /// Global shortcut for `key`: Ctrl/Meta + `s`/`o`/`r`/`c`, `F1`, `F11`.
    #[must_use]
    pub fn for_key(key: &Key, modifiers: Modifiers) -> Option<Self> {
        if modifiers.command() {
            return match key.as_str() {
                "s" => Some(Self::Save),
                "o" => Some(Self::Load),
                "r" => Some(Self::PlaceOnCourt),
                "c" => Some(Self::ClearCourt),
                _ => None,
            };
        }
        match key.as_str() {
            "F1" => Some(Self::ShowHelp),
            "F11" => Some(Self::ToggleFullscreen),
            _ => None,
        }
    }

    /// Parse a toolbar action name (`"place-on-court"`, `"save"`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "place-on-court" => Some(Self::PlaceOnCourt),
            "clear-court" => Some(Self::ClearCourt),
            "clear-arrows" => Some(Self::ClearArrows),
            "save" => Some(Self::Save),
            "load" => Some(Self::Load),
            "toggle-theme" => Some(Self::ToggleTheme),
            "help" => Some(Self::ShowHelp),
            "fullscreen" => Some(Self::ToggleFullscreen),
            "reset" => Some(Self::Reset),
            _ => Tool::from_name(name.strip_prefix("tool-")?).map(Self::SetTool),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notification {
    fn info(message: &str) -> Self {
        Self { kind: NoticeKind::Info, message: message.to_owned() }
    }

    fn error(message: &str) -> Self {
        Self { kind: NoticeKind::Error, message: message.to_owned() }
    }
}

/// Something the page must do after a handler runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Effect {
    Render,
    SetCursor {
        cursor: String,
    },
    ToolChanged {
        tool: Tool,
    },
    Notify(Notification),
    ApplyTheme {
        theme: Theme,
        #[serde(rename = "bodyClass")]
        body_class: Option<&'static str>,
        icon: &'static str,
    },
    ShowHelp {
        text: &'static str,
    },
    ToggleFullscreen,
}

impl Effect {
    fn theme(theme: Theme) -> Self {
        Self::ApplyTheme { theme, body_class: theme.body_class(), icon: theme.icon() }
    }
}

/// Engine actions the page cares about. Scene-level detail stays inside.
fn effects_from(actions: Vec<Action>) -> Vec<Effect> {
    let mut out = Vec::new();
    for action in actions {
        let effect = match action {
            Action::RenderNeeded => Effect::Render,
            Action::SetCursor(cursor) => Effect::SetCursor { cursor },
            Action::ToolChanged(tool) => Effect::ToolChanged { tool },
            Action::ArrowCreated(_)
            | Action::ArrowDeleted { .. }
            | Action::ArrowsCleared { .. }
            | Action::TokenDropped { .. }
            | Action::GeometryChanged(_) => continue,
        };
        if !out.contains(&effect) {
            out.push(effect);
        }
    }
    out
}

pub const MSG_ON_COURT: &str = "Players positioned on court";
pub const MSG_CLEAR_COURT: &str = "Players cleared from court";
pub const MSG_CLEAR_ARROWS: &str = "All arrows cleared";
pub const MSG_SAVED: &str = "Court setup saved successfully";
pub const MSG_SAVE_FAILED: &str = "Failed to save court setup";
pub const MSG_LOADED: &str = "Court setup loaded successfully";
pub const MSG_NOTHING_SAVED: &str = "No saved setup found";
pub const MSG_LOAD_FAILED: &str = "Failed to load court setup";
pub const MSG_RESET: &str = "App reset successfully";
pub const MSG_RESET_FAILED: &str = "Failed to clear saved setup";

pub const HELP_TEXT: &str = "\
Court Coach - Help

Tools:
  Select (1/S): Select and drag players
  Arrow (2/A): Draw movement arrows
  Erase (3/E): Remove arrows (Delete clears all)

Actions:
  On-court: Position all players on court
  Clear court: Move all players off court
  Clear arrows: Remove all arrows

Keyboard Shortcuts:
  Ctrl+S: Save setup
  Ctrl+O: Load setup
  Ctrl+R: Players on court
  Ctrl+C: Clear court
  F1: Show help
  F11: Toggle fullscreen";

// =============================================================================
// CONTEXT
// =============================================================================

/// Owns every piece of session state. There is exactly one per page.
pub struct AppContext<S: KeyValueStore> {
    pub core: EngineCore,
    storage: StorageManager<S>,
    settings: Settings,
    config: CoachConfig,
    auto_save: Interval,
    resize: Debounce,
    pending_viewport: Option<(f64, f64, f64)>,
    initialized: bool,
}

impl<S: KeyValueStore> AppContext<S> {
    /// Build the context and load stored settings. Nothing is drawn or
    /// restored until [`AppContext::start`].
    #[must_use]
    pub fn new(storage: StorageManager<S>, config: CoachConfig) -> Self {
        let mut core = EngineCore::new();
        core.placement = config.placement;
        core.min_arrow_len = config.min_arrow_len;
        let settings = storage.load_settings();
        Self {
            core,
            storage,
            settings,
            config,
            auto_save: Interval::new(config.auto_save_interval_ms),
            resize: Debounce::new(config.resize_debounce_ms),
            pending_viewport: None,
            initialized: false,
        }
    }

    /// Lay out the court, restore the last setup when auto-save is on, start
    /// the auto-save timer, and apply the stored theme.
    pub fn start(&mut self, width: f64, height: f64, dpr: f64, now_ms: f64) -> Vec<Effect> {
        self.core.tick(now_ms);
        self.core.set_viewport(width, height, dpr);

        if self.settings.auto_save {
            match self.storage.load_setup() {
                Ok(Some(snapshot)) => {
                    self.core.restore(&snapshot);
                    log::info!("restored saved setup from {}", snapshot.timestamp);
                }
                Ok(None) => {}
                Err(e) => log::warn!("saved setup not restored: {e}"),
            }
            self.auto_save.start(now_ms);
        }

        self.initialized = true;
        self.storage.track_usage("app_launch", serde_json::json!({}));
        log::info!("court coach started ({width}x{height})");
        vec![Effect::theme(self.settings.theme), Effect::Render]
    }

    // --- Accessors ---

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn config(&self) -> &CoachConfig {
        &self.config
    }

    #[must_use]
    pub fn storage(&self) -> &StorageManager<S> {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut StorageManager<S> {
        &mut self.storage
    }

    #[must_use]
    pub fn render_style(&self) -> RenderStyle {
        RenderStyle { theme: self.settings.theme, show_labels: self.settings.show_labels }
    }

    #[must_use]
    pub fn usage_stats(&self) -> UsageStats {
        self.storage.usage_stats()
    }

    // --- Clock ---

    /// Advance animations, apply a settled resize, and run auto-save.
    pub fn tick(&mut self, now_ms: f64) -> Vec<Effect> {
        let mut actions = self.core.tick(now_ms);

        if self.resize.poll(now_ms) {
            if let Some((w, h, dpr)) = self.pending_viewport.take() {
                actions.extend(self.core.set_viewport(w, h, dpr));
            }
        }

        if self.auto_save.poll(now_ms) {
            self.auto_save_now();
        }

        effects_from(actions)
    }

    /// Timed save. Skipped when the scene holds nothing worth keeping.
    fn auto_save_now(&mut self) {
        if !self.config.auto_save.should_save(&self.core.scene) {
            return;
        }
        if let Err(e) = self.storage.save_setup(&self.core.scene, self.core.dimensions()) {
            log::warn!("auto-save failed: {e}");
        }
    }

    /// Record a container resize; the court is refit once resizing settles.
    pub fn on_resize(&mut self, width: f64, height: f64, dpr: f64, now_ms: f64) {
        self.pending_viewport = Some((width, height, dpr));
        self.resize.trigger(now_ms);
    }

    // --- Input ---

    pub fn on_pointer_down(&mut self, pt: Point, button: Button, modifiers: Modifiers) -> Vec<Effect> {
        effects_from(self.core.on_pointer_down(pt, button, modifiers))
    }

    pub fn on_pointer_move(&mut self, pt: Point, modifiers: Modifiers) -> Vec<Effect> {
        effects_from(self.core.on_pointer_move(pt, modifiers))
    }

    pub fn on_pointer_up(&mut self, pt: Point, button: Button, modifiers: Modifiers) -> Vec<Effect> {
        effects_from(self.core.on_pointer_up(pt, button, modifiers))
    }

    /// Global shortcuts first, then tool keys.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Effect> {
        match Command::for_key(key, modifiers) {
            Some(command) => self.execute(command),
            None => effects_from(self.core.on_key_down(key, modifiers)),
        }
    }

    // --- Commands ---

    pub fn execute(&mut self, command: Command) -> Vec<Effect> {
        match command {
            Command::PlaceOnCourt => self.place_on_court(),
            Command::ClearCourt => self.clear_court(),
            Command::ClearArrows => self.clear_arrows(),
            Command::Save => self.save(),
            Command::Load => self.load(),
            Command::ToggleTheme => self.toggle_theme(),
            Command::SetTool(tool) => effects_from(self.core.set_tool(tool)),
            Command::ShowHelp => vec![Effect::ShowHelp { text: HELP_TEXT }],
            Command::ToggleFullscreen => vec![Effect::ToggleFullscreen],
            Command::Reset => self.reset(),
        }
    }

    fn place_on_court(&mut self) -> Vec<Effect> {
        let mut effects = effects_from(self.core.place_on_court());
        self.storage.track_usage("players_on_court", serde_json::json!({}));
        effects.push(Effect::Notify(Notification::info(MSG_ON_COURT)));
        effects
    }

    fn clear_court(&mut self) -> Vec<Effect> {
        let mut effects = effects_from(self.core.clear_court());
        self.storage.track_usage("players_clear_court", serde_json::json!({}));
        effects.push(Effect::Notify(Notification::info(MSG_CLEAR_COURT)));
        effects
    }

    fn clear_arrows(&mut self) -> Vec<Effect> {
        let mut effects = effects_from(self.core.clear_arrows());
        self.storage.track_usage("arrows_cleared", serde_json::json!({}));
        effects.push(Effect::Notify(Notification::info(MSG_CLEAR_ARROWS)));
        effects
    }

    fn save(&mut self) -> Vec<Effect> {
        match self.storage.save_setup(&self.core.scene, self.core.dimensions()) {
            Ok(_) => {
                self.storage.track_usage("setup_saved", serde_json::json!({}));
                vec![Effect::Notify(Notification::info(MSG_SAVED))]
            }
            Err(e) => {
                log::error!("save failed: {e}");
                vec![Effect::Notify(Notification::error(MSG_SAVE_FAILED))]
            }
        }
    }

    fn load(&mut self) -> Vec<Effect> {
        let snapshot = match self.storage.load_setup() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return vec![Effect::Notify(Notification::info(MSG_NOTHING_SAVED))],
            Err(e) => {
                log::error!("load failed: {e}");
                return vec![Effect::Notify(Notification::error(MSG_LOAD_FAILED))];
            }
        };
        let mut effects = effects_from(self.core.restore(&snapshot));
        self.storage.track_usage("setup_loaded", serde_json::json!({}));
        effects.push(Effect::Notify(Notification::info(MSG_LOADED)));
        effects
    }

    fn toggle_theme(&mut self) -> Vec<Effect> {
        let theme = self.settings.theme.next();
        self.settings.theme = theme;
        if let Err(e) = self.storage.save_settings(&self.settings) {
            log::warn!("theme not persisted: {e}");
        }
        self.storage.track_usage("theme_changed", serde_json::json!({ "theme": theme.name() }));
        vec![Effect::theme(theme), Effect::Render]
    }

    /// Clear stored setup, bench every token, and drop all arrows. Nothing
    /// changes when the stored setup cannot be removed.
    fn reset(&mut self) -> Vec<Effect> {
        if !self.storage.clear_setup() {
            return vec![Effect::Notify(Notification::error(MSG_RESET_FAILED))];
        }
        let mut actions = self.core.clear_court();
        self.storage.track_usage("players_clear_court", serde_json::json!({}));
        actions.extend(self.core.clear_arrows());
        self.storage.track_usage("arrows_cleared", serde_json::json!({}));
        let mut effects = effects_from(actions);
        effects.push(Effect::Notify(Notification::info(MSG_RESET)));
        effects
    }

    // --- Settings ---

    /// Replace settings, persist them, and start or stop auto-save to match.
    pub fn update_settings(&mut self, settings: Settings, now_ms: f64) -> Vec<Effect> {
        let theme_changed = settings.theme != self.settings.theme;
        self.settings = settings;
        if self.settings.auto_save && !self.auto_save.is_running() {
            self.auto_save.start(now_ms);
        } else if !self.settings.auto_save {
            self.auto_save.stop();
        }
        let mut effects = Vec::new();
        if let Err(e) = self.storage.save_settings(&self.settings) {
            log::error!("failed to save settings: {e}");
            effects.push(Effect::Notify(Notification::error("Failed to save settings")));
        }
        if theme_changed {
            effects.push(Effect::theme(self.settings.theme));
        }
        effects.push(Effect::Render);
        effects
    }

    // --- Page lifecycle ---

    /// Final save as the page goes away.
    pub fn before_unload(&mut self) {
        if !self.initialized || !self.settings.auto_save {
            return;
        }
        if let Err(e) = self.storage.save_setup(&self.core.scene, self.core.dimensions()) {
            log::warn!("save on unload failed: {e}");
        }
    }

    pub fn on_visibility_change(&mut self, hidden: bool) {
        let action = if hidden { "app_hidden" } else { "app_visible" };
        self.storage.track_usage(action, serde_json::json!({}));
    }

    // --- Transfer ---

    /// Export the saved setup as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns `Err` when nothing valid is saved.
    pub fn export_setup(&mut self) -> Result<String, SnapshotError> {
        self.storage.export_setup()
    }

    /// Import a setup document, save it, and show it.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the document is invalid or cannot be stored; the
    /// court is left unchanged.
    pub fn import_setup(&mut self, raw: &str) -> Result<Vec<Effect>, SnapshotError> {
        let snapshot = self.storage.import_setup(raw)?;
        Ok(effects_from(self.core.restore(&snapshot)))
    }

    /// # Errors
    ///
    /// Returns `Err` if the backup cannot be serialized.
    pub fn create_backup(&mut self) -> Result<String, SnapshotError> {
        self.storage.create_backup()
    }

    /// Restore a backup, then reload settings and the saved setup from it.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backup is invalid, in which case nothing is
    /// changed, or if the restored setup cannot be read back.
    pub fn restore_backup(&mut self, raw: &str, now_ms: f64) -> Result<Vec<Effect>, SnapshotError> {
        self.storage.restore_backup(raw)?;
        let settings = self.storage.load_settings();
        let mut effects = self.update_settings(settings, now_ms);
        if let Some(snapshot) = self.storage.load_setup()? {
            effects.extend(effects_from(self.core.restore(&snapshot)));
        }
        Ok(effects)
    }
}
