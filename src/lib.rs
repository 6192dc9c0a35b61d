//! Court diagramming for coaches, compiled to WebAssembly.
//!
//! The crate places fourteen player tokens on a scaled court, lets the coach
//! drag them around and sketch movement arrows, and keeps the layout in the
//! browser's local storage between sessions. Everything except [`render`] and
//! [`web`] is platform-free and tested natively; the host page only forwards
//! DOM events and applies the [`app::Effect`]s it gets back.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`web`] | `wasm-bindgen` entry points and the canvas-bound app |
//! | [`app`] | Application shell: commands, settings, auto-save, effects |
//! | [`engine`] | Testable [`engine::EngineCore`] driving tools and gestures |
//! | [`doc`] | Scene model: teams, roles, tokens, arrows |
//! | [`geometry`] | Court fitting, thirds, circles, and point math |
//! | [`players`] | Token placement, snapping, and relayout |
//! | [`tween`] | Eased snap-back animation |
//! | [`arrows`] | Arrow drawing and arrowhead geometry |
//! | [`hit`] | Hit-testing tokens and arrows |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`persistence`] | Setup snapshots, export/import, backup, usage tracking |
//! | [`store`] | Key-value storage backends |
//! | [`settings`] | User preferences and themes |
//! | [`usage`] | Capped usage log and summary stats |
//! | [`timer`] | Host-clock interval and debounce timers |
//! | [`render`] | Scene rendering to a 2D canvas context |
//! | [`error`] | Error types |
//! | [`consts`] | Shared numeric constants and storage keys |

pub mod app;
pub mod arrows;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod persistence;
pub mod players;
pub mod render;
pub mod settings;
pub mod store;
pub mod timer;
pub mod tween;
pub mod usage;
pub mod web;
