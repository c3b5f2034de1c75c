//! Validated input drafts for registry mutations.
//!
//! # Responsibility
//! - Carry admin/coach/self-edit input into the registry.
//! - Reject blank or non-numeric required input before any mutation.
//!
//! # Invariants
//! - A draft that passes `validate()` can be applied without partial failure.
//! - Text fields are trimmed when applied, never when validated.

use crate::model::athlete::CAREER_LEVEL_NOT_SET;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input rejected before touching registry state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty after trim.
    BlankField(&'static str),
    /// Field text is not a finite number.
    NotNumeric { field: &'static str, value: String },
    /// Age is negative, fractional or out of range.
    InvalidAge(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "{field} is required"),
            Self::NotNumeric { field, value } => {
                write!(f, "{field} must be a number, got `{value}`")
            }
            Self::InvalidAge(value) => {
                write!(f, "age must be a whole number of years, got `{value}`")
            }
        }
    }
}

impl Error for ValidationError {}

/// Typed admin input for a new athlete.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAthlete {
    pub name: String,
    pub age: u32,
    pub sport: String,
    pub country: String,
    pub gender: String,
    pub points: f64,
    /// Blank or `None` stores the "Not set" placeholder.
    pub career_level: Option<String>,
    pub next_goal: Option<String>,
    pub stipend: f64,
    pub sponsorship: f64,
}

impl NewAthlete {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("sport", &self.sport)?;
        require_text("country", &self.country)?;
        require_text("gender", &self.gender)?;
        require_finite("points", self.points)?;
        require_finite("stipend", self.stipend)?;
        require_finite("sponsorship", self.sponsorship)?;
        Ok(())
    }

    pub(crate) fn resolved_career_level(&self) -> String {
        self.career_level
            .as_deref()
            .map(str::trim)
            .filter(|level| !level.is_empty())
            .unwrap_or(CAREER_LEVEL_NOT_SET)
            .to_string()
    }
}

/// Raw admin form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewAthleteForm {
    pub name: String,
    pub age: String,
    pub sport: String,
    pub country: String,
    pub gender: String,
    pub points: String,
    pub career_level: String,
    pub next_goal: String,
    pub stipend: String,
    pub sponsorship: String,
}

impl NewAthleteForm {
    /// Converts form text into a validated `NewAthlete`.
    ///
    /// Age and points are required; stipend and sponsorship treat blank as 0.
    pub fn parse(&self) -> Result<NewAthlete, ValidationError> {
        let draft = NewAthlete {
            name: self.name.trim().to_string(),
            age: parse_age(&self.age)?,
            sport: self.sport.trim().to_string(),
            country: self.country.trim().to_string(),
            gender: self.gender.trim().to_string(),
            points: parse_required_number("points", &self.points)?,
            career_level: non_blank(&self.career_level),
            next_goal: non_blank(&self.next_goal),
            stipend: parse_optional_number("stipend", &self.stipend)?,
            sponsorship: parse_optional_number("sponsorship", &self.sponsorship)?,
        };
        draft.validate()?;
        Ok(draft)
    }
}

/// Self-edit patch over top-level profile fields; `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub sport: Option<String>,
    pub country: Option<String>,
    /// Empty string clears the gender.
    pub gender: Option<String>,
}

impl ProfilePatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(sport) = &self.sport {
            require_text("sport", sport)?;
        }
        if let Some(country) = &self.country {
            require_text("country", country)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Coach input for a new injury; the registry assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewInjury {
    pub kind: String,
    pub severity: String,
    pub status: String,
    pub start_date: String,
    pub notes: String,
}

impl NewInjury {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("injury type", &self.kind)
    }
}

/// Coach performance form: optional new points plus optional log fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoachUpdate {
    pub points: Option<f64>,
    pub metric: String,
    pub date: String,
    pub notes: String,
}

impl CoachUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.points {
            Some(points) => require_finite("points", points),
            None => Ok(()),
        }
    }

    /// Whether the submission should append a performance entry.
    pub fn has_entry(&self) -> bool {
        self.points.is_some()
            || !self.metric.trim().is_empty()
            || !self.date.trim().is_empty()
            || !self.notes.trim().is_empty()
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}

fn require_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotNumeric {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn parse_required_number(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ValidationError::NotNumeric {
            field,
            value: trimmed.to_string(),
        })
}

fn parse_optional_number(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    if raw.trim().is_empty() {
        return Ok(0.0);
    }
    parse_required_number(field, raw)
}

fn parse_age(raw: &str) -> Result<u32, ValidationError> {
    let value = parse_required_number("age", raw)?;
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(ValidationError::InvalidAge(raw.trim().to_string()));
    }
    Ok(value as u32)
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
