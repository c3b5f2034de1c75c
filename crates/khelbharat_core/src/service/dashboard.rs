//! Role-scoped dashboard view models.
//!
//! # Responsibility
//! - Combine filters, ranking and summaries into ready-to-render rows/cards
//!   for the Athlete, Coach and Admin panels.
//!
//! # Invariants
//! - Projections are pure; the same roster and filters give the same view.
//! - Admin totals and gender counts cover the whole roster, not the filtered rows.

use crate::analytics::currency::format_inr;
use crate::analytics::ranking::{ranking_percents, sorted_by_points_desc};
use crate::analytics::summary::{
    gender_distribution, injury_summary, monthly_support, performance_line,
    profile_completion_percent, recent_performances, total_monthly_support, GenderDistribution,
};
use crate::avatar::initials;
use crate::model::athlete::{Athlete, AthleteId, Injury};
use crate::search::filter::{matches_search_query, matches_sport_substring, GenderFilter};

/// Entries shown in detail and coach performance lists.
pub const RECENT_PERFORMANCE_LIMIT: usize = 5;

const NOT_SET_LABEL: &str = "Not set";
const EMPTY_LABEL: &str = "-";
const ADVICE_HEALTHY: &str = "Maintain proper warm-up, cool-down, and recovery sessions.";
const ADVICE_INJURED: &str = "Follow your rehab plan carefully, avoid overloading injured areas, and report pain early to your coach/physio.";
const NEXT_GOAL_PROMPT: &str = "Add your next career goal with admin/coach.";

/// Active filter inputs across all panels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardFilters {
    /// Global search box; applies to every ranking/table.
    pub search_query: String,
    pub coach_sport: String,
    pub admin_sport: String,
    pub admin_gender: GenderFilter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankingRow {
    /// 1-based position in the displayed list.
    pub rank: usize,
    pub athlete_id: AthleteId,
    pub name: String,
    pub sport: String,
    pub country: String,
    pub points: f64,
    /// Percent of the displayed leader's points.
    pub percent: u32,
    /// Row belongs to the active selection.
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileCard {
    pub athlete_id: AthleteId,
    pub name: String,
    pub age: u32,
    pub sport: String,
    pub country: String,
    pub gender_label: String,
    pub avatar: Option<String>,
    /// Shown when `avatar` is `None`.
    pub initials: String,
    pub completion_percent: u32,
    pub completion_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HealthCareerCard {
    pub injuries: Vec<Injury>,
    pub prevention_advice: &'static str,
    pub career_level: String,
    pub next_goal: String,
    pub stipend: String,
    pub sponsorship: String,
    pub total_support: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminRow {
    pub position: usize,
    pub athlete_id: AthleteId,
    pub name: String,
    pub sport: String,
    pub country: String,
    pub gender_label: String,
    pub points: f64,
    pub career_level: String,
    pub injury_summary: String,
    pub monthly_support: f64,
    pub monthly_support_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminPanel {
    pub rows: Vec<AdminRow>,
    pub total_support: f64,
    pub total_support_text: String,
    pub genders: GenderDistribution,
    pub gender_text: String,
}

/// Drawer content for one athlete.
#[derive(Debug, Clone, PartialEq)]
pub struct AthleteDetail {
    pub athlete_id: AthleteId,
    pub name: String,
    pub sport: String,
    pub country: String,
    pub age: u32,
    pub gender_label: String,
    pub points: f64,
    pub career_level: String,
    pub next_goal: String,
    pub stipend: String,
    pub sponsorship: String,
    pub total_support: String,
    pub injuries: Vec<Injury>,
    /// Newest first, at most `RECENT_PERFORMANCE_LIMIT` lines.
    pub recent_performances: Vec<String>,
}

/// Every panel, recomputed from one roster snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub profile: Option<ProfileCard>,
    pub health_career: Option<HealthCareerCard>,
    pub athlete_ranking: Vec<RankingRow>,
    pub coach_ranking: Vec<RankingRow>,
    pub admin: AdminPanel,
}

pub fn build_dashboard(
    athletes: &[Athlete],
    current_id: Option<AthleteId>,
    filters: &DashboardFilters,
) -> DashboardView {
    let current = current_id.and_then(|id| athletes.iter().find(|athlete| athlete.id == id));
    DashboardView {
        profile: current.map(profile_card),
        health_career: current.map(health_career_card),
        athlete_ranking: athlete_ranking(athletes, current_id, filters),
        coach_ranking: coach_ranking(athletes, filters),
        admin: admin_panel(athletes, filters),
    }
}

/// Search-filtered ranking with the active athlete highlighted.
pub fn athlete_ranking(
    athletes: &[Athlete],
    current_id: Option<AthleteId>,
    filters: &DashboardFilters,
) -> Vec<RankingRow> {
    let listed: Vec<&Athlete> = sorted_by_points_desc(athletes)
        .into_iter()
        .filter(|athlete| matches_search_query(athlete, &filters.search_query))
        .collect();
    ranking_rows(&listed, current_id)
}

/// Ranking after the global search and the coach sport filter.
pub fn coach_ranking(athletes: &[Athlete], filters: &DashboardFilters) -> Vec<RankingRow> {
    let listed: Vec<&Athlete> = sorted_by_points_desc(athletes)
        .into_iter()
        .filter(|athlete| matches_search_query(athlete, &filters.search_query))
        .filter(|athlete| matches_sport_substring(athlete, &filters.coach_sport))
        .collect();
    ranking_rows(&listed, None)
}

fn ranking_rows(listed: &[&Athlete], highlight: Option<AthleteId>) -> Vec<RankingRow> {
    listed
        .iter()
        .zip(ranking_percents(listed))
        .enumerate()
        .map(|(index, (athlete, percent))| RankingRow {
            rank: index + 1,
            athlete_id: athlete.id,
            name: athlete.name.clone(),
            sport: athlete.sport.clone(),
            country: athlete.country.clone(),
            points: athlete.points,
            percent,
            highlighted: highlight == Some(athlete.id),
        })
        .collect()
}

pub fn profile_card(athlete: &Athlete) -> ProfileCard {
    let completion_percent = profile_completion_percent(athlete);
    ProfileCard {
        athlete_id: athlete.id,
        name: athlete.name.clone(),
        age: athlete.age,
        sport: athlete.sport.clone(),
        country: athlete.country.clone(),
        gender_label: label_or(&athlete.gender, NOT_SET_LABEL),
        avatar: athlete.avatar.clone().filter(|_| athlete.has_avatar()),
        initials: initials(&athlete.name),
        completion_percent,
        completion_text: format!("{completion_percent}% of your profile is complete."),
    }
}

pub fn health_career_card(athlete: &Athlete) -> HealthCareerCard {
    let prevention_advice = if athlete.injuries.is_empty() {
        ADVICE_HEALTHY
    } else {
        ADVICE_INJURED
    };
    HealthCareerCard {
        injuries: athlete.injuries.clone(),
        prevention_advice,
        career_level: label_or(&athlete.career.level, NOT_SET_LABEL),
        next_goal: label_or(&athlete.career.next_goal, NEXT_GOAL_PROMPT),
        stipend: format_inr(athlete.finance.stipend),
        sponsorship: format_inr(athlete.finance.sponsorship),
        total_support: format_inr(monthly_support(athlete)),
    }
}

/// Admin table plus roster-wide totals.
pub fn admin_panel(athletes: &[Athlete], filters: &DashboardFilters) -> AdminPanel {
    let rows = athletes
        .iter()
        .filter(|athlete| matches_search_query(athlete, &filters.search_query))
        .filter(|athlete| matches_sport_substring(athlete, &filters.admin_sport))
        .filter(|athlete| filters.admin_gender.matches(athlete))
        .enumerate()
        .map(|(index, athlete)| {
            let support = monthly_support(athlete);
            AdminRow {
                position: index + 1,
                athlete_id: athlete.id,
                name: athlete.name.clone(),
                sport: athlete.sport.clone(),
                country: athlete.country.clone(),
                gender_label: label_or(&athlete.gender, EMPTY_LABEL),
                points: athlete.points,
                career_level: label_or(&athlete.career.level, EMPTY_LABEL),
                injury_summary: injury_summary(athlete),
                monthly_support: support,
                monthly_support_label: format_inr(support),
            }
        })
        .collect();

    let total_support = total_monthly_support(athletes);
    let genders = gender_distribution(athletes);
    AdminPanel {
        rows,
        total_support,
        total_support_text: format!(
            "Total monthly financial support (stipend + sponsorship) for all athletes: {}",
            format_inr(total_support)
        ),
        gender_text: genders.describe(),
        genders,
    }
}

pub fn athlete_detail(athlete: &Athlete) -> AthleteDetail {
    AthleteDetail {
        athlete_id: athlete.id,
        name: athlete.name.clone(),
        sport: athlete.sport.clone(),
        country: athlete.country.clone(),
        age: athlete.age,
        gender_label: label_or(&athlete.gender, NOT_SET_LABEL),
        points: athlete.points,
        career_level: label_or(&athlete.career.level, NOT_SET_LABEL),
        next_goal: label_or(&athlete.career.next_goal, EMPTY_LABEL),
        stipend: format_inr(athlete.finance.stipend),
        sponsorship: format_inr(athlete.finance.sponsorship),
        total_support: format_inr(monthly_support(athlete)),
        injuries: athlete.injuries.clone(),
        recent_performances: recent_performances(athlete, RECENT_PERFORMANCE_LIMIT)
            .into_iter()
            .map(performance_line)
            .collect(),
    }
}

fn label_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
