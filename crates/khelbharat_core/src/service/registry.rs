//! Athlete registry use-case service.
//!
//! # Responsibility
//! - Own the authoritative in-memory roster and the active selection.
//! - Apply admin/coach/self-edit mutations and persist after each one.
//!
//! # Invariants
//! - Athlete ids are unique; new ids are `max(existing) + 1`, or 1.
//! - The active selection references an existing athlete, or is `None` only
//!   when the roster is empty.
//! - The active selection can never be deleted.
//! - Injuries and performance history are append-only.
//! - Unknown ids are silent no-ops (`None`/`false`), never errors.
//! - Persistence failures are logged and swallowed; memory stays authoritative.

use crate::avatar::{is_image_data_uri, AvatarError};
use crate::model::athlete::{Athlete, AthleteId, Career, Finance, Injury, PerformanceEntry};
use crate::model::draft::{CoachUpdate, NewAthlete, NewInjury, ProfilePatch, ValidationError};
use crate::model::theme::Theme;
use crate::repo::athlete_store::AthleteStore;
use crate::repo::slot_repo::SlotRepository;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DEFAULT_PERFORMANCE_DATE: &str = "N/A";
const DEFAULT_PERFORMANCE_METRIC: &str = "Performance recorded";

/// Rejected delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteError {
    /// Target is the currently selected ("logged in") athlete.
    ActiveSelection(AthleteId),
}

impl Display for DeleteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ActiveSelection(id) => {
                write!(f, "cannot delete the currently selected athlete ({id})")
            }
        }
    }
}

impl Error for DeleteError {}

/// In-memory roster backed by a slot store.
pub struct AthleteRegistry<R: SlotRepository> {
    store: AthleteStore<R>,
    athletes: Vec<Athlete>,
    current_id: Option<AthleteId>,
}

impl<R: SlotRepository> AthleteRegistry<R> {
    /// Loads the roster (or seed data) and selects the first athlete.
    pub fn open(store: AthleteStore<R>) -> Self {
        let athletes = store.load();
        let current_id = athletes.first().map(|athlete| athlete.id);
        info!(
            "event=registry_open module=registry status=ok count={} has_selection={}",
            athletes.len(),
            current_id.is_some()
        );
        Self {
            store,
            athletes,
            current_id,
        }
    }

    pub fn athletes(&self) -> &[Athlete] {
        &self.athletes
    }

    pub fn get(&self, id: AthleteId) -> Option<&Athlete> {
        self.athletes.iter().find(|athlete| athlete.id == id)
    }

    pub fn current_id(&self) -> Option<AthleteId> {
        self.current_id
    }

    pub fn current(&self) -> Option<&Athlete> {
        self.current_id.and_then(|id| self.get(id))
    }

    pub fn theme(&self) -> Theme {
        self.store.load_theme()
    }

    /// Persists the theme preference; failures are logged and ignored.
    pub fn set_theme(&self, theme: Theme) {
        let _ = self.store.save_theme(theme);
    }

    /// Id the next created athlete will receive.
    pub fn next_id(&self) -> AthleteId {
        self.athletes
            .iter()
            .map(|athlete| athlete.id)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }

    /// Validates and appends a new athlete with empty logs.
    ///
    /// Becomes the active selection when nothing is selected yet.
    pub fn create(&mut self, draft: NewAthlete) -> Result<Athlete, ValidationError> {
        if let Err(err) = draft.validate() {
            warn!("event=athlete_create module=registry status=rejected error={err}");
            return Err(err);
        }

        let id = self.next_id();
        let career_level = draft.resolved_career_level();
        let athlete = Athlete {
            name: draft.name.trim().to_string(),
            age: draft.age,
            sport: draft.sport.trim().to_string(),
            country: draft.country.trim().to_string(),
            gender: draft.gender.trim().to_string(),
            points: draft.points,
            career: Career::new(
                career_level,
                draft.next_goal.as_deref().map(str::trim).unwrap_or_default(),
            ),
            finance: Finance::new(draft.stipend, draft.sponsorship),
            ..Athlete::with_id(id)
        };

        self.athletes.push(athlete.clone());
        if self.current_id.is_none() {
            self.current_id = Some(id);
        }
        info!("event=athlete_create module=registry status=ok athlete_id={id}");
        self.persist();
        Ok(athlete)
    }

    /// Merges a profile patch into top-level fields.
    ///
    /// Returns `Ok(None)` when `id` is unknown. An empty patch skips the save.
    pub fn update_profile(
        &mut self,
        id: AthleteId,
        patch: &ProfilePatch,
    ) -> Result<Option<&Athlete>, ValidationError> {
        patch.validate()?;
        if patch.is_empty() {
            return Ok(self.get(id));
        }

        let Some(athlete) = self.find_mut(id, "profile_update") else {
            return Ok(None);
        };
        if let Some(name) = &patch.name {
            athlete.name = name.trim().to_string();
        }
        if let Some(age) = patch.age {
            athlete.age = age;
        }
        if let Some(sport) = &patch.sport {
            athlete.sport = sport.trim().to_string();
        }
        if let Some(country) = &patch.country {
            athlete.country = country.trim().to_string();
        }
        if let Some(gender) = &patch.gender {
            athlete.gender = gender.trim().to_string();
        }

        info!("event=profile_update module=registry status=ok athlete_id={id}");
        self.persist();
        Ok(self.get(id))
    }

    /// Overwrites an athlete's points without logging a performance entry.
    pub fn set_points(&mut self, id: AthleteId, points: f64) -> Result<bool, ValidationError> {
        if !points.is_finite() {
            return Err(ValidationError::NotNumeric {
                field: "points",
                value: points.to_string(),
            });
        }

        let Some(athlete) = self.find_mut(id, "points_update") else {
            return Ok(false);
        };
        athlete.points = points;
        self.persist();
        Ok(true)
    }

    /// Applies a coach form submission.
    ///
    /// Supplied points overwrite the athlete's points. When any field is
    /// supplied, an entry is appended whose snapshot is the submitted points,
    /// or the athlete's existing points when none were submitted.
    pub fn record_coach_update(
        &mut self,
        id: AthleteId,
        update: &CoachUpdate,
    ) -> Result<Option<PerformanceEntry>, ValidationError> {
        update.validate()?;

        let Some(athlete) = self.find_mut(id, "coach_update") else {
            return Ok(None);
        };
        if let Some(points) = update.points {
            athlete.points = points;
        }

        let entry = update.has_entry().then(|| {
            let entry = PerformanceEntry::new(
                or_default(&update.date, DEFAULT_PERFORMANCE_DATE),
                or_default(&update.metric, DEFAULT_PERFORMANCE_METRIC),
                update.notes.trim(),
                update.points.unwrap_or(athlete.points),
            );
            athlete.performance_history.push(entry.clone());
            entry
        });

        info!(
            "event=coach_update module=registry status=ok athlete_id={id} points_changed={} entry_added={}",
            update.points.is_some(),
            entry.is_some()
        );
        self.persist();
        Ok(entry)
    }

    /// Appends a performance entry verbatim; `points` is left untouched.
    pub fn add_performance_entry(&mut self, id: AthleteId, entry: PerformanceEntry) -> bool {
        let Some(athlete) = self.find_mut(id, "performance_add") else {
            return false;
        };
        athlete.performance_history.push(entry);
        self.persist();
        true
    }

    /// Appends an injury with the next per-athlete injury id.
    pub fn add_injury(
        &mut self,
        id: AthleteId,
        injury: NewInjury,
    ) -> Result<Option<Injury>, ValidationError> {
        injury.validate()?;

        let Some(athlete) = self.find_mut(id, "injury_add") else {
            return Ok(None);
        };
        let injury = Injury {
            id: athlete.next_injury_id(),
            kind: injury.kind.trim().to_string(),
            severity: injury.severity,
            status: injury.status,
            start_date: injury.start_date,
            notes: injury.notes.trim().to_string(),
            extra: Default::default(),
        };
        athlete.injuries.push(injury.clone());

        info!(
            "event=injury_add module=registry status=ok athlete_id={id} injury_id={}",
            injury.id
        );
        self.persist();
        Ok(Some(injury))
    }

    /// Stores an already-encoded avatar data URI.
    pub fn set_avatar(&mut self, id: AthleteId, data_uri: String) -> Result<bool, AvatarError> {
        if !is_image_data_uri(&data_uri) {
            return Err(AvatarError::InvalidDataUri);
        }
        let Some(athlete) = self.find_mut(id, "avatar_update") else {
            return Ok(false);
        };
        athlete.avatar = Some(data_uri);
        self.persist();
        Ok(true)
    }

    pub fn clear_avatar(&mut self, id: AthleteId) -> bool {
        let Some(athlete) = self.find_mut(id, "avatar_clear") else {
            return false;
        };
        athlete.avatar = None;
        self.persist();
        true
    }

    /// Removes an athlete unless it is the active selection.
    ///
    /// Returns `Ok(false)` when `id` is unknown.
    pub fn delete(&mut self, id: AthleteId) -> Result<bool, DeleteError> {
        if self.current_id == Some(id) {
            warn!(
                "event=athlete_delete module=registry status=rejected athlete_id={id} error_code=active_selection"
            );
            return Err(DeleteError::ActiveSelection(id));
        }

        let before = self.athletes.len();
        self.athletes.retain(|athlete| athlete.id != id);
        let removed = self.athletes.len() != before;
        if !removed {
            debug!("event=athlete_delete module=registry status=not_found athlete_id={id}");
            return Ok(false);
        }

        info!("event=athlete_delete module=registry status=ok athlete_id={id}");
        self.persist();
        Ok(true)
    }

    /// Changes the active selection.
    ///
    /// An empty roster clears it; an unknown id falls back to the first athlete.
    pub fn set_current(&mut self, id: AthleteId) {
        self.current_id = if self.get(id).is_some() {
            Some(id)
        } else {
            let fallback = self.athletes.first().map(|athlete| athlete.id);
            if fallback.is_some() {
                debug!("event=selection_change module=registry status=fallback athlete_id={id}");
            }
            fallback
        };
    }

    fn find_mut(&mut self, id: AthleteId, event: &'static str) -> Option<&mut Athlete> {
        let found = self.athletes.iter_mut().find(|athlete| athlete.id == id);
        if found.is_none() {
            debug!("event={event} module=registry status=not_found athlete_id={id}");
        }
        found
    }

    fn persist(&self) {
        // Save errors are already logged by the store.
        let _ = self.store.save(&self.athletes);
    }
}

fn or_default(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
