//! Local persistence for setups, settings, and the usage log.
//!
//! DESIGN
//! ======
//! Three independent documents live under three keys in one injected
//! `KeyValueStore`. The setup snapshot is all-or-nothing: a stored value that
//! fails structural validation is deleted and reported as absent, never
//! partially applied. Settings and the usage log fall back to defaults when
//! unreadable. Every write failure is returned to the caller and never
//! corrupts in-memory state.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::consts::{SETTINGS_KEY, SETUP_KEY, SETUP_VERSION, USAGE_KEY, USAGE_LOG_CAP};
use crate::doc::{Arrow, Role, Scene, Team, TokenId};
use crate::error::SnapshotError;
use crate::geometry::{CourtDimensions, Point};
use crate::settings::Settings;
use crate::store::KeyValueStore;
use crate::usage::{UsageEvent, UsageLog, UsageStats};

// =============================================================================
// DOCUMENTS
// =============================================================================

/// One token as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub position: Role,
    pub team: Team,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub is_on_court: bool,
}

/// One arrow as stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowRecord {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

/// A saved court setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupSnapshot {
    pub version: String,
    #[serde(default)]
    pub timestamp: String,
    pub players: Vec<PlayerRecord>,
    pub arrows: Vec<ArrowRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court_dimensions: Option<CourtDimensions>,
}

/// Export wrapper: the snapshot plus export metadata, flattened into one object.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    #[serde(flatten)]
    setup: &'a SetupSnapshot,
    export_date: String,
    app_version: &'static str,
}

/// Everything local in one document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct BackupDocument {
    setup: Option<SetupSnapshot>,
    settings: Settings,
    usage: UsageStats,
    backup_date: String,
    version: &'static str,
}

/// Backup as read back: each section optional and checked separately.
#[derive(Debug, Deserialize)]
struct RestoreDocument {
    #[serde(default)]
    setup: Option<serde_json::Value>,
    #[serde(default)]
    settings: Option<serde_json::Value>,
}

impl SetupSnapshot {
    /// Record the scene as it is now.
    #[must_use]
    pub fn capture(scene: &Scene, dims: Option<CourtDimensions>, timestamp: String) -> Self {
        Self {
            version: SETUP_VERSION.to_owned(),
            timestamp,
            players: scene
                .tokens()
                .iter()
                .map(|t| PlayerRecord {
                    position: t.id.role,
                    team: t.id.team,
                    x: t.pos.x,
                    y: t.pos.y,
                    is_on_court: t.on_court,
                })
                .collect(),
            arrows: scene
                .arrows()
                .iter()
                .map(|a| ArrowRecord { start_x: a.start.x, start_y: a.start.y, end_x: a.end.x, end_y: a.end.y })
                .collect(),
            court_dimensions: dims,
        }
    }

    /// Parse and validate a snapshot document.
    ///
    /// # Errors
    ///
    /// `Parse` for malformed JSON or missing/mistyped fields, `Invalid` for
    /// values that parse but cannot be used.
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(raw).map_err(SnapshotError::Parse)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check the parts serde cannot: a non-empty version and finite coordinates.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.version.trim().is_empty() {
            return Err(SnapshotError::Invalid("empty version".into()));
        }
        for (i, p) in self.players.iter().enumerate() {
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(SnapshotError::Invalid(format!("player {i} has non-finite position")));
            }
        }
        for (i, a) in self.arrows.iter().enumerate() {
            if ![a.start_x, a.start_y, a.end_x, a.end_y].iter().all(|v| v.is_finite()) {
                return Err(SnapshotError::Invalid(format!("arrow {i} has non-finite coordinates")));
            }
        }
        Ok(())
    }

    /// Write the stored positions into `scene` and replace its arrows.
    pub fn apply(&self, scene: &mut Scene) {
        for p in &self.players {
            scene.place_token(TokenId::new(p.team, p.position), Point::new(p.x, p.y), p.is_on_court);
        }
        scene.set_arrows(
            self.arrows
                .iter()
                .map(|a| Arrow::new(Point::new(a.start_x, a.start_y), Point::new(a.end_x, a.end_y)))
                .collect(),
        );
    }
}

// =============================================================================
// AUTO-SAVE POLICY
// =============================================================================

/// When a timed auto-save is worth writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoSavePolicy {
    /// Save on every tick.
    Always,
    /// Save only when at least `min_on_court` tokens are on court or at least
    /// `min_arrows` arrows exist.
    Meaningful { min_on_court: usize, min_arrows: usize },
}

impl Default for AutoSavePolicy {
    fn default() -> Self {
        Self::Meaningful { min_on_court: 1, min_arrows: 1 }
    }
}

impl AutoSavePolicy {
    #[must_use]
    pub fn should_save(&self, scene: &Scene) -> bool {
        match *self {
            Self::Always => true,
            Self::Meaningful { min_on_court, min_arrows } => {
                scene.on_court().len() >= min_on_court || scene.arrow_count() >= min_arrows
            }
        }
    }
}

// =============================================================================
// STORAGE MANAGER
// =============================================================================

fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

/// Reads and writes the three local documents through one store.
pub struct StorageManager<S: KeyValueStore> {
    store: S,
    clock: fn() -> OffsetDateTime,
}

impl<S: KeyValueStore> StorageManager<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store, clock: now_utc }
    }

    /// Use `clock` for timestamps instead of the system clock.
    #[must_use]
    pub fn with_clock(store: S, clock: fn() -> OffsetDateTime) -> Self {
        Self { store, clock }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Current time as an RFC 3339 string.
    #[must_use]
    pub fn timestamp(&self) -> String {
        (self.clock)().format(&Rfc3339).unwrap_or_default()
    }

    // --- Setup snapshot ---

    /// Save the scene as the current setup.
    ///
    /// # Errors
    ///
    /// Returns `Err` on serialization or storage failure; nothing is written.
    pub fn save_setup(&mut self, scene: &Scene, dims: CourtDimensions) -> Result<SetupSnapshot, SnapshotError> {
        let snapshot = SetupSnapshot::capture(scene, Some(dims), self.timestamp());
        self.write_setup(&snapshot)?;
        Ok(snapshot)
    }

    fn write_setup(&mut self, snapshot: &SetupSnapshot) -> Result<(), SnapshotError> {
        let raw = serde_json::to_string(snapshot).map_err(SnapshotError::Serialize)?;
        if let Err(e) = self.store.set(SETUP_KEY, &raw) {
            log::error!("failed to save court setup: {e}");
            return Err(e.into());
        }
        log::info!("court setup saved ({} bytes)", raw.len());
        Ok(())
    }

    /// Load the saved setup. `Ok(None)` when nothing valid is stored; a
    /// stored value that fails validation is deleted.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the store cannot be read.
    pub fn load_setup(&mut self) -> Result<Option<SetupSnapshot>, SnapshotError> {
        let raw = match self.store.get(SETUP_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(None),
            Err(e) => {
                log::error!("failed to load court setup: {e}");
                return Err(e.into());
            }
        };
        match SetupSnapshot::from_json(&raw) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                log::warn!("invalid setup data, clearing storage: {e}");
                if !self.clear_setup() {
                    log::warn!("invalid setup data left in storage");
                }
                Ok(None)
            }
        }
    }

    /// Delete the saved setup. Returns false if the store refused.
    #[must_use]
    pub fn clear_setup(&mut self) -> bool {
        match self.store.remove(SETUP_KEY) {
            Ok(()) => true,
            Err(e) => {
                log::error!("failed to clear storage: {e}");
                false
            }
        }
    }

    #[must_use]
    pub fn has_stored_setup(&self) -> bool {
        matches!(self.store.get(SETUP_KEY), Ok(Some(_)))
    }

    /// Length of the stored setup document, 0 when absent or unreadable.
    #[must_use]
    pub fn storage_size(&self) -> usize {
        match self.store.get(SETUP_KEY) {
            Ok(Some(raw)) => raw.len(),
            _ => 0,
        }
    }

    /// Pretty-printed export of the saved setup.
    ///
    /// # Errors
    ///
    /// `NotFound` when there is no valid saved setup, `Store` when the store
    /// cannot be read.
    pub fn export_setup(&mut self) -> Result<String, SnapshotError> {
        let setup = self.load_setup()?.ok_or(SnapshotError::NotFound)?;
        let doc = ExportDocument { setup: &setup, export_date: self.timestamp(), app_version: SETUP_VERSION };
        serde_json::to_string_pretty(&doc).map_err(SnapshotError::Serialize)
    }

    /// Validate an exported document and make it the saved setup.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the document is invalid or cannot be stored; the
    /// previously saved setup is left untouched.
    pub fn import_setup(&mut self, raw: &str) -> Result<SetupSnapshot, SnapshotError> {
        let imported = match SetupSnapshot::from_json(raw) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("failed to import setup: {e}");
                return Err(e);
            }
        };
        let snapshot = SetupSnapshot {
            version: SETUP_VERSION.to_owned(),
            timestamp: self.timestamp(),
            ..imported
        };
        self.write_setup(&snapshot)?;
        log::info!("imported setup with {} players, {} arrows", snapshot.players.len(), snapshot.arrows.len());
        Ok(snapshot)
    }

    // --- Settings ---

    /// Stored settings merged over defaults.
    #[must_use]
    pub fn load_settings(&self) -> Settings {
        match self.store.get(SETTINGS_KEY) {
            Ok(Some(raw)) => Settings::from_json(&raw),
            Ok(None) => Settings::default(),
            Err(e) => {
                log::error!("failed to load settings: {e}");
                Settings::default()
            }
        }
    }

    /// # Errors
    ///
    /// Returns `Err` on serialization or storage failure.
    pub fn save_settings(&mut self, settings: &Settings) -> Result<(), SnapshotError> {
        let raw = serde_json::to_string(settings).map_err(SnapshotError::Serialize)?;
        self.store.set(SETTINGS_KEY, &raw).map_err(|e| {
            log::error!("failed to save settings: {e}");
            SnapshotError::from(e)
        })
    }

    // --- Usage ---

    fn usage_log(&self) -> UsageLog {
        match self.store.get(USAGE_KEY) {
            Ok(Some(raw)) => UsageLog::from_json(&raw),
            Ok(None) => UsageLog::default(),
            Err(e) => {
                log::error!("failed to read usage log: {e}");
                UsageLog::default()
            }
        }
    }

    /// Append an action to the usage log. Failures are logged and swallowed.
    pub fn track_usage(&mut self, action: &str, details: serde_json::Value) {
        let mut usage = self.usage_log();
        usage.push(
            UsageEvent { action: action.to_owned(), timestamp: self.timestamp(), details },
            USAGE_LOG_CAP,
        );
        let raw = match serde_json::to_string(&usage) {
            Ok(raw) => raw,
            Err(e) => {
                log::error!("failed to track usage: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(USAGE_KEY, &raw) {
            log::error!("failed to track usage: {e}");
        }
    }

    #[must_use]
    pub fn usage_stats(&self) -> UsageStats {
        self.usage_log().stats()
    }

    // --- Backup ---

    /// One document holding the setup, settings, and usage summary.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the saved setup cannot be read or the backup cannot
    /// be serialized.
    pub fn create_backup(&mut self) -> Result<String, SnapshotError> {
        let doc = BackupDocument {
            setup: self.load_setup()?,
            settings: self.load_settings(),
            usage: self.usage_stats(),
            backup_date: self.timestamp(),
            version: SETUP_VERSION,
        };
        serde_json::to_string_pretty(&doc).map_err(SnapshotError::Serialize)
    }

    /// Restore the setup and settings sections of a backup. Both sections are
    /// validated before either is written.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backup or either section is invalid, or a write fails.
    pub fn restore_backup(&mut self, raw: &str) -> Result<(), SnapshotError> {
        let doc: RestoreDocument = serde_json::from_str(raw).map_err(SnapshotError::Parse)?;
        let setup = match doc.setup {
            Some(serde_json::Value::Null) | None => None,
            Some(value) => {
                let s: SetupSnapshot = serde_json::from_value(value).map_err(SnapshotError::Parse)?;
                s.validate()?;
                Some(s)
            }
        };
        let settings = match doc.settings {
            Some(serde_json::Value::Null) | None => None,
            Some(value) => Some(serde_json::from_value::<Settings>(value).map_err(SnapshotError::Parse)?),
        };

        if let Some(setup) = setup {
            let snapshot = SetupSnapshot { timestamp: self.timestamp(), ..setup };
            self.write_setup(&snapshot)?;
        }
        if let Some(settings) = settings {
            self.save_settings(&settings)?;
        }
        Ok(())
    }
}
