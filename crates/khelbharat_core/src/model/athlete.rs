//! Athlete record and nested injury/performance/career/finance records.
//!
//! Deserialization doubles as snapshot normalization: every field that an
//! older stored schema may lack has a serde default, JSON `null` is treated
//! like an absent field, and unmodeled keys are kept in `extra`. Scalar
//! fields are tolerant of what older editors wrote: numbers may arrive as
//! strings or fractions, and text may arrive as numbers.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Registry-assigned athlete identifier (`max + 1`, starting at 1).
pub type AthleteId = u32;

/// Injury identifier, unique only within one athlete's injury list.
pub type InjuryId = u32;

/// JSON keys present in a stored record that the model does not name.
pub type ExtraFields = Map<String, Value>;

/// Career level placeholder used until an admin sets a real level.
pub const CAREER_LEVEL_NOT_SET: &str = "Not set";

/// Injury status that removes an injury from the active summary.
pub const INJURY_STATUS_CLEARED: &str = "Cleared";

/// Gender buckets counted by roster statistics.
///
/// The stored `gender` field stays a free-form string; values outside this
/// set (including empty) are simply not bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// Exact, case-sensitive match against the stored label.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Male" => Some(Self::Male),
            "Female" => Some(Self::Female),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

/// One athlete on the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Athlete {
    #[serde(deserialize_with = "required_id")]
    pub id: AthleteId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    /// Stored fractions truncate; negative or non-numeric values load as 0.
    #[serde(default, deserialize_with = "lenient_count")]
    pub age: u32,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sport: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub country: String,
    /// Empty string means "not set".
    #[serde(default, deserialize_with = "lenient_text")]
    pub gender: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub points: f64,
    /// `data:image/...;base64,...` URI; `None` renders initials.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Chronological add order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub injuries: Vec<Injury>,
    /// Chronological add order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub performance_history: Vec<PerformanceEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub career: Career,
    #[serde(default, deserialize_with = "null_as_default")]
    pub finance: Finance,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Athlete {
    /// Creates a record carrying only `id`; every other field is defaulted.
    pub fn with_id(id: AthleteId) -> Self {
        Self {
            id,
            name: String::new(),
            age: 0,
            sport: String::new(),
            country: String::new(),
            gender: String::new(),
            points: 0.0,
            avatar: None,
            injuries: Vec::new(),
            performance_history: Vec::new(),
            career: Career::default(),
            finance: Finance::default(),
            extra: ExtraFields::new(),
        }
    }

    /// Returns the id the next appended injury must take.
    pub fn next_injury_id(&self) -> InjuryId {
        self.injuries
            .iter()
            .map(|injury| injury.id)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }

    pub fn gender_bucket(&self) -> Option<Gender> {
        Gender::parse(&self.gender)
    }

    pub fn has_avatar(&self) -> bool {
        self.avatar
            .as_deref()
            .is_some_and(|value| !value.trim().is_empty())
    }
}

/// One injury in an athlete's medical log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Injury {
    #[serde(default, deserialize_with = "lenient_count")]
    pub id: InjuryId,
    /// Serialized as `type` to match the stored schema.
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub severity: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub start_date: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub notes: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Injury {
    pub fn is_cleared(&self) -> bool {
        self.status == INJURY_STATUS_CLEARED
    }
}

/// Immutable record of one logged performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceEntry {
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub metric: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub notes: String,
    /// Athlete points at the time of logging; may differ from current points.
    #[serde(default, deserialize_with = "lenient_number")]
    pub points_snapshot: f64,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl PerformanceEntry {
    pub fn new(
        date: impl Into<String>,
        metric: impl Into<String>,
        notes: impl Into<String>,
        points_snapshot: f64,
    ) -> Self {
        Self {
            date: date.into(),
            metric: metric.into(),
            notes: notes.into(),
            points_snapshot,
            extra: ExtraFields::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Career {
    #[serde(default = "default_career_level", deserialize_with = "lenient_level")]
    pub level: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub next_goal: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Career {
    pub fn new(level: impl Into<String>, next_goal: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            next_goal: next_goal.into(),
            extra: ExtraFields::new(),
        }
    }

    /// Whether an admin has set a real level.
    pub fn is_level_set(&self) -> bool {
        let level = self.level.trim();
        !level.is_empty() && level != CAREER_LEVEL_NOT_SET
    }
}

impl Default for Career {
    fn default() -> Self {
        Self::new(CAREER_LEVEL_NOT_SET, "")
    }
}

/// Monthly financial support, in rupees.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Finance {
    #[serde(default, deserialize_with = "lenient_number")]
    pub stipend: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub sponsorship: f64,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Finance {
    pub fn new(stipend: f64, sponsorship: f64) -> Self {
        Self {
            stipend,
            sponsorship,
            extra: ExtraFields::new(),
        }
    }

    pub fn monthly_total(&self) -> f64 {
        self.stipend + self.sponsorship
    }
}

/// Normalizes one stored record onto the current schema.
///
/// Applying it to its own serialized output yields an equal record.
pub fn normalize_record(value: Value) -> Result<Athlete, serde_json::Error> {
    serde_json::from_value(value)
}

/// Records recovered from one athletes-slot snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub athletes: Vec<Athlete>,
    /// Array positions of records that could not be normalized.
    pub rejected: Vec<usize>,
}

/// Parses a full athletes-slot snapshot, normalizing record by record.
///
/// A record that cannot be normalized is skipped and its position reported
/// in `rejected`. The snapshot as a whole fails only when it is not a JSON
/// array, or when it holds records and none of them survive.
pub fn parse_snapshot(raw: &str) -> Result<Snapshot, serde_json::Error> {
    let records: Vec<Value> = serde_json::from_str(raw)?;

    let mut athletes = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();
    let mut first_error = None;
    for (index, record) in records.into_iter().enumerate() {
        match normalize_record(record) {
            Ok(athlete) => athletes.push(athlete),
            Err(err) => {
                rejected.push(index);
                first_error.get_or_insert(err);
            }
        }
    }

    match first_error {
        Some(err) if athletes.is_empty() => Err(err),
        _ => Ok(Snapshot { athletes, rejected }),
    }
}

fn default_career_level() -> String {
    CAREER_LEVEL_NOT_SET.to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Text field that also accepts numbers and booleans written by older editors.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(String::new()),
        Some(value) => scalar_text(value).map_err(D::Error::custom),
    }
}

fn lenient_level<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(default_career_level()),
        Some(value) => scalar_text(value).map_err(D::Error::custom),
    }
}

/// Any JSON number or numeric string; anything else loads as 0.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(numeric_value)
        .unwrap_or_default())
}

/// Non-negative whole number; fractions truncate, negatives clamp to 0.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(numeric_value)
        .map_or(0, clamp_to_u32))
}

fn required_id<'de, D>(deserializer: D) -> Result<AthleteId, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    numeric_value(&value)
        .filter(|id| *id >= 0.0 && id.fract() == 0.0 && *id <= f64::from(u32::MAX))
        .map(|id| id as AthleteId)
        .ok_or_else(|| D::Error::custom("athlete id must be a non-negative integer"))
}

fn scalar_text(value: Value) -> Result<String, &'static str> {
    match value {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => Err("expected a text value"),
    }
}

fn numeric_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|number| number.is_finite())
}

fn clamp_to_u32(value: f64) -> u32 {
    if value <= 0.0 {
        0
    } else if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        value.trunc() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::{
        normalize_record, parse_snapshot, Athlete, Career, Gender, Injury, CAREER_LEVEL_NOT_SET,
    };
    use serde_json::json;

    fn injury(id: u32) -> Injury {
        serde_json::from_value(json!({ "id": id, "type": "Strain", "status": "Rehab" })).unwrap()
    }

    #[test]
    fn next_injury_id_starts_at_one_and_follows_max() {
        let mut athlete = Athlete::with_id(7);
        assert_eq!(athlete.next_injury_id(), 1);

        athlete.injuries.push(injury(4));
        athlete.injuries.push(injury(2));
        assert_eq!(athlete.next_injury_id(), 5);
    }

    #[test]
    fn null_career_level_falls_back_to_placeholder() {
        let athlete = normalize_record(json!({
            "id": 1,
            "career": { "level": null, "nextGoal": "Podium" }
        }))
        .unwrap();
        assert_eq!(athlete.career.level, CAREER_LEVEL_NOT_SET);
        assert_eq!(athlete.career.next_goal, "Podium");
        assert!(!athlete.career.is_level_set());
    }

    #[test]
    fn gender_parse_is_exact() {
        assert_eq!(Gender::parse("Female"), Some(Gender::Female));
        assert_eq!(Gender::parse("female"), None);
        assert_eq!(Gender::parse(""), None);
        assert!(Career::new("National", "").is_level_set());
    }

    #[test]
    fn scalar_fields_tolerate_loosely_typed_values() {
        let athlete = normalize_record(json!({
            "id": "7",
            "name": 1234,
            "age": 22.5,
            "points": "81.5",
            "gender": null,
            "finance": { "stipend": "12000", "sponsorship": "n/a" },
            "injuries": [{ "id": 2.0, "type": "Strain", "status": true }]
        }))
        .unwrap();

        assert_eq!(athlete.id, 7);
        assert_eq!(athlete.name, "1234");
        assert_eq!(athlete.age, 22);
        assert_eq!(athlete.points, 81.5);
        assert_eq!(athlete.gender, "");
        assert_eq!(athlete.finance.stipend, 12000.0);
        assert_eq!(athlete.finance.sponsorship, 0.0);
        assert_eq!(athlete.injuries[0].id, 2);
        assert_eq!(athlete.injuries[0].status, "true");
    }

    #[test]
    fn negative_or_oversized_age_is_clamped() {
        let negative = normalize_record(json!({ "id": 1, "age": -1 })).unwrap();
        assert_eq!(negative.age, 0);
        let huge = normalize_record(json!({ "id": 1, "age": 1e12 })).unwrap();
        assert_eq!(huge.age, u32::MAX);
    }

    #[test]
    fn record_without_usable_id_is_rejected() {
        assert!(normalize_record(json!({ "name": "No id" })).is_err());
        assert!(normalize_record(json!({ "id": -3 })).is_err());
        assert!(normalize_record(json!({ "id": 1.5 })).is_err());
        assert!(normalize_record(json!({ "id": 1, "sport": ["Relay"] })).is_err());
    }

    #[test]
    fn snapshot_skips_only_unusable_records() {
        let raw = json!([
            { "id": 1, "name": "Kept", "age": 30 },
            { "id": "oops" },
            { "id": 3, "name": "Also kept", "age": -4 },
            "not a record"
        ])
        .to_string();

        let snapshot = parse_snapshot(&raw).unwrap();
        let ids: Vec<u32> = snapshot.athletes.iter().map(|athlete| athlete.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(snapshot.rejected, vec![1, 3]);
    }

    #[test]
    fn snapshot_fails_when_no_record_survives() {
        assert!(parse_snapshot(r#"{"id": 1}"#).is_err());
        assert!(parse_snapshot(r#"[{"name": "x"}, null]"#).is_err());

        let empty = parse_snapshot("[]").unwrap();
        assert!(empty.athletes.is_empty());
        assert!(empty.rejected.is_empty());
    }
}
