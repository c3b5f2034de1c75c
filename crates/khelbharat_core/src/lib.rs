//! Core domain logic for the KhelBharat athlete dashboard.
//! This crate is the single source of truth for roster invariants; UI shells
//! only read its view models and call registry mutations.

pub mod analytics;
pub mod avatar;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use analytics::currency::format_inr;
pub use analytics::ranking::{
    max_points, ranking_percent, ranking_percents, sorted_by_points_desc,
};
pub use analytics::summary::{
    compare_athletes, gender_distribution, injury_summary, last_performance_summary,
    monthly_support, profile_completion_percent, recent_performances, total_monthly_support,
    AthleteComparison, GenderDistribution,
};
pub use avatar::{decode_avatar, encode_avatar, initials, is_image_data_uri, AvatarError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::athlete::{
    normalize_record, parse_snapshot, Athlete, AthleteId, Career, Finance, Gender, Injury,
    InjuryId, PerformanceEntry, Snapshot, CAREER_LEVEL_NOT_SET, INJURY_STATUS_CLEARED,
};
pub use model::draft::{
    CoachUpdate, NewAthlete, NewAthleteForm, NewInjury, ProfilePatch, ValidationError,
};
pub use model::seed::seed_athletes;
pub use model::theme::Theme;
pub use repo::athlete_store::{AthleteStore, StorageConfig, StorageError};
pub use repo::slot_repo::{SlotRepository, SqliteSlotRepository, StoreError, StoreResult};
pub use search::filter::{
    filter_by_gender, filter_by_search_query, filter_by_sport_substring, GenderFilter,
};
pub use service::dashboard::{build_dashboard, DashboardFilters, DashboardView};
pub use service::registry::{AthleteRegistry, DeleteError};
