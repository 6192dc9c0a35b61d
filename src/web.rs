//! Browser entry points exported through `wasm-bindgen`.
//!
//! The page forwards DOM events here and applies the returned effects, which
//! come back as a JSON array (see [`crate::app::Effect`]). Repaints happen
//! inside this module whenever an effect asks for one.

use js_sys::Date;
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::app::{AppContext, CoachConfig, Command, Effect};
use crate::error::AppError;
use crate::geometry::Point;
use crate::input::{Button, Key, Modifiers, Tool};
use crate::persistence::StorageManager;
use crate::render;
use crate::settings::Settings;
use crate::store::LocalStorage;

/// Install the console logger and panic hook. Safe to call more than once.
#[wasm_bindgen]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("console logger already installed");
    }
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn map_button(button: i16) -> Button {
    match button {
        1 => Button::Middle,
        2 => Button::Secondary,
        _ => Button::Primary,
    }
}

/// Modifier bit set from the page: 1 shift, 2 ctrl, 4 alt, 8 meta.
fn map_modifiers(bits: u8) -> Modifiers {
    Modifiers {
        shift: bits & 1 != 0,
        ctrl: bits & 2 != 0,
        alt: bits & 4 != 0,
        meta: bits & 8 != 0,
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            log::error!("failed to serialize for the page: {e}");
            "null".to_owned()
        }
    }
}

/// One court coach instance bound to a canvas element.
#[wasm_bindgen]
pub struct CourtCoachApp {
    canvas: HtmlCanvasElement,
    app: AppContext<LocalStorage>,
}

#[wasm_bindgen]
impl CourtCoachApp {
    /// Bind to the canvas with id `canvas_id` and open local storage.
    ///
    /// # Errors
    ///
    /// Fails when the canvas is missing or storage is unavailable; the page
    /// should show a blocking error.
    pub fn mount(canvas_id: &str) -> Result<CourtCoachApp, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| js_error(AppError::Canvas("no document".into())))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| js_error(AppError::MissingContainer(canvas_id.to_owned())))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_error(AppError::Canvas(format!("#{canvas_id} is not a canvas"))))?;
        let store = LocalStorage::open().map_err(js_error)?;
        let app = AppContext::new(StorageManager::new(store), CoachConfig::default());
        Ok(Self { canvas, app })
    }

    /// Size the court to the canvas, restore the last session, and draw.
    pub fn launch(&mut self) -> String {
        let (w, h, dpr) = self.measure();
        let effects = self.app.start(w, h, dpr, Date::now());
        self.emit(effects)
    }

    // --- Events ---

    pub fn pointer_down(&mut self, x: f64, y: f64, button: i16, modifiers: u8) -> String {
        let effects = self
            .app
            .on_pointer_down(Point::new(x, y), map_button(button), map_modifiers(modifiers));
        self.emit(effects)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, modifiers: u8) -> String {
        let effects = self.app.on_pointer_move(Point::new(x, y), map_modifiers(modifiers));
        self.emit(effects)
    }

    pub fn pointer_up(&mut self, x: f64, y: f64, button: i16, modifiers: u8) -> String {
        let effects = self
            .app
            .on_pointer_up(Point::new(x, y), map_button(button), map_modifiers(modifiers));
        self.emit(effects)
    }

    pub fn key_down(&mut self, key: String, modifiers: u8) -> String {
        let effects = self.app.on_key_down(&Key(key), map_modifiers(modifiers));
        self.emit(effects)
    }

    /// The container changed size; the court follows once resizing settles.
    pub fn resize(&mut self) {
        let (w, h, dpr) = self.measure();
        self.app.on_resize(w, h, dpr, Date::now());
    }

    /// Called every animation frame.
    pub fn tick(&mut self) -> String {
        let effects = self.app.tick(Date::now());
        self.emit(effects)
    }

    /// Run a toolbar action by name (`"save"`, `"clear-arrows"`, `"tool-arrow"`, ...).
    pub fn command(&mut self, name: &str) -> String {
        let Some(command) = Command::from_name(name) else {
            log::warn!("unknown command: {name}");
            return "[]".to_owned();
        };
        let effects = self.app.execute(command);
        self.emit(effects)
    }

    pub fn visibility_changed(&mut self, hidden: bool) {
        self.app.on_visibility_change(hidden);
    }

    pub fn before_unload(&mut self) {
        self.app.before_unload();
    }

    // --- Settings and transfer ---

    pub fn settings(&self) -> String {
        to_json(self.app.settings())
    }

    /// # Errors
    ///
    /// Fails when `json` is not a settings document.
    pub fn update_settings(&mut self, json: &str) -> Result<String, JsValue> {
        let settings: Settings = serde_json::from_str(json).map_err(js_error)?;
        let effects = self.app.update_settings(settings, Date::now());
        Ok(self.emit(effects))
    }

    /// # Errors
    ///
    /// Fails when there is no saved setup.
    pub fn export_setup(&mut self) -> Result<String, JsValue> {
        self.app.export_setup().map_err(js_error)
    }

    /// # Errors
    ///
    /// Fails when the document is invalid or cannot be stored.
    pub fn import_setup(&mut self, json: &str) -> Result<String, JsValue> {
        let effects = self.app.import_setup(json).map_err(js_error)?;
        Ok(self.emit(effects))
    }

    /// # Errors
    ///
    /// Fails when the backup cannot be serialized.
    pub fn create_backup(&mut self) -> Result<String, JsValue> {
        self.app.create_backup().map_err(js_error)
    }

    /// # Errors
    ///
    /// Fails when the backup is invalid.
    pub fn restore_backup(&mut self, json: &str) -> Result<String, JsValue> {
        let effects = self.app.restore_backup(json, Date::now()).map_err(js_error)?;
        Ok(self.emit(effects))
    }

    // --- Queries ---

    pub fn usage_stats(&self) -> String {
        to_json(&self.app.usage_stats())
    }

    pub fn tool(&self) -> String {
        self.app.core.tool().name().to_owned()
    }

    pub fn set_tool(&mut self, name: &str) -> String {
        match Tool::from_name(name) {
            Some(tool) => {
                let effects = self.app.execute(Command::SetTool(tool));
                self.emit(effects)
            }
            None => {
                log::warn!("unknown tool: {name}");
                "[]".to_owned()
            }
        }
    }

    pub fn arrow_count(&self) -> usize {
        self.app.core.arrow_count()
    }

    pub fn has_stored_setup(&self) -> bool {
        self.app.storage().has_stored_setup()
    }

    pub fn storage_size(&self) -> usize {
        self.app.storage().storage_size()
    }

    /// Draw the current state.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        self.sync_backing_size();
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| js_error(AppError::Canvas("2d context unavailable".into())))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        render::draw(&ctx, &self.app.core, self.app.render_style())
    }
}

impl CourtCoachApp {
    fn measure(&self) -> (f64, f64, f64) {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        (f64::from(self.canvas.client_width()), f64::from(self.canvas.client_height()), dpr)
    }

    /// Match the canvas backing store to the viewport the court was fit to.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn sync_backing_size(&self) {
        let core = &self.app.core;
        let w = (core.viewport_width * core.dpr).round().max(0.0) as u32;
        let h = (core.viewport_height * core.dpr).round().max(0.0) as u32;
        if self.canvas.width() != w {
            self.canvas.set_width(w);
        }
        if self.canvas.height() != h {
            self.canvas.set_height(h);
        }
    }

    /// Repaint if asked, then hand the effects to the page.
    fn emit(&self, effects: Vec<Effect>) -> String {
        if effects.contains(&Effect::Render) {
            if let Err(e) = self.render() {
                log::error!("render failed: {e:?}");
            }
        }
        to_json(&effects)
    }
}
