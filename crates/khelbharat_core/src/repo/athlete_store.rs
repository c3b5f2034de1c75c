//! Athlete snapshot persistence over named slots.
//!
//! # Responsibility
//! - Load the roster from the athletes slot, normalizing older schemas.
//! - Save the full roster back as one JSON array.
//! - Read and write the theme preference slot.
//!
//! # Invariants
//! - `load` never fails: absent or unusable snapshots yield fresh seed data.
//! - One unusable record never discards the other stored records.
//! - `save` reports failures to the caller after logging them; it never panics.
//! - Log events carry slot names and counts only, never athlete content.

use crate::model::athlete::{parse_snapshot, Athlete};
use crate::model::seed::seed_athletes;
use crate::model::theme::Theme;
use crate::repo::slot_repo::{SlotRepository, StoreError};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_ATHLETES_SLOT: &str = "khelbharatAthletes";
pub const DEFAULT_THEME_SLOT: &str = "khelbharatTheme";

/// Slot names used by one store instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub athletes_slot: String,
    pub theme_slot: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            athletes_slot: DEFAULT_ATHLETES_SLOT.to_string(),
            theme_slot: DEFAULT_THEME_SLOT.to_string(),
        }
    }
}

/// Snapshot read/write failure.
#[derive(Debug)]
pub enum StorageError {
    /// Backend read failed.
    Read(StoreError),
    /// Stored text is not a usable athletes snapshot.
    Corrupt(serde_json::Error),
    /// Roster could not be serialized.
    Encode(serde_json::Error),
    /// Backend write failed.
    Write(StoreError),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read snapshot: {err}"),
            Self::Corrupt(err) => write!(f, "stored snapshot is malformed: {err}"),
            Self::Encode(err) => write!(f, "failed to encode snapshot: {err}"),
            Self::Write(err) => write!(f, "failed to write snapshot: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read(err) | Self::Write(err) => Some(err),
            Self::Corrupt(err) | Self::Encode(err) => Some(err),
        }
    }
}

impl StorageError {
    fn code(&self) -> &'static str {
        match self {
            Self::Read(_) => "storage_read_failed",
            Self::Corrupt(_) => "storage_corrupt",
            Self::Encode(_) => "storage_encode_failed",
            Self::Write(_) => "storage_write_failed",
        }
    }
}

/// Roster and theme persistence adapter.
pub struct AthleteStore<R: SlotRepository> {
    repo: R,
    config: StorageConfig,
}

impl<R: SlotRepository> AthleteStore<R> {
    /// Creates a store using the default slot names.
    pub fn new(repo: R) -> Self {
        Self::with_config(repo, StorageConfig::default())
    }

    pub fn with_config(repo: R, config: StorageConfig) -> Self {
        Self { repo, config }
    }

    /// Reads and normalizes the stored roster.
    ///
    /// Returns `Ok(None)` when the slot has never been written. Records that
    /// cannot be normalized are logged and skipped; the rest still load.
    pub fn try_load(&self) -> Result<Option<Vec<Athlete>>, StorageError> {
        let Some(raw) = self
            .repo
            .get_slot(&self.config.athletes_slot)
            .map_err(StorageError::Read)?
        else {
            return Ok(None);
        };
        let snapshot = parse_snapshot(&raw).map_err(StorageError::Corrupt)?;
        if !snapshot.rejected.is_empty() {
            warn!(
                "event=storage_load module=storage status=partial slot={} kept={} rejected={} rejected_positions={:?} error_code=record_invalid",
                self.config.athletes_slot,
                snapshot.athletes.len(),
                snapshot.rejected.len(),
                snapshot.rejected
            );
        }
        Ok(Some(snapshot.athletes))
    }

    /// Loads the roster, falling back to seed data on any read problem.
    pub fn load(&self) -> Vec<Athlete> {
        match self.try_load() {
            Ok(Some(athletes)) => {
                info!(
                    "event=storage_load module=storage status=ok slot={} count={}",
                    self.config.athletes_slot,
                    athletes.len()
                );
                athletes
            }
            Ok(None) => {
                info!(
                    "event=storage_load module=storage status=fallback slot={} reason=absent",
                    self.config.athletes_slot
                );
                seed_athletes()
            }
            Err(err) => {
                warn!(
                    "event=storage_load module=storage status=fallback slot={} error_code={} error={}",
                    self.config.athletes_slot,
                    err.code(),
                    err
                );
                seed_athletes()
            }
        }
    }

    /// Writes the full roster to the athletes slot.
    ///
    /// Failures are logged here; callers may drop the error and keep their
    /// in-memory state authoritative.
    pub fn save(&self, athletes: &[Athlete]) -> Result<(), StorageError> {
        let result = serde_json::to_string(athletes)
            .map_err(StorageError::Encode)
            .and_then(|raw| {
                self.repo
                    .set_slot(&self.config.athletes_slot, &raw)
                    .map_err(StorageError::Write)
            });

        match &result {
            Ok(()) => debug!(
                "event=storage_save module=storage status=ok slot={} count={}",
                self.config.athletes_slot,
                athletes.len()
            ),
            Err(err) => error!(
                "event=storage_save module=storage status=error slot={} error_code={} error={}",
                self.config.athletes_slot,
                err.code(),
                err
            ),
        }
        result
    }

    /// Reads the theme preference; read failures resolve to `Light`.
    pub fn load_theme(&self) -> Theme {
        match self.repo.get_slot(&self.config.theme_slot) {
            Ok(value) => Theme::from_slot(value.as_deref()),
            Err(err) => {
                warn!(
                    "event=theme_load module=storage status=fallback slot={} error={}",
                    self.config.theme_slot, err
                );
                Theme::default()
            }
        }
    }

    pub fn save_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.repo
            .set_slot(&self.config.theme_slot, theme.as_slot())
            .map_err(|err| {
                error!(
                    "event=theme_save module=storage status=error slot={} error={}",
                    self.config.theme_slot, err
                );
                StorageError::Write(err)
            })
    }
}
