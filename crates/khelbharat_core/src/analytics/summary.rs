//! Per-athlete and roster-wide summaries.

use crate::analytics::currency::format_inr;
use crate::model::athlete::{Athlete, AthleteId, Gender, PerformanceEntry};

pub const NO_INJURIES: &str = "No current injuries";
pub const ALL_INJURIES_CLEARED: &str = "All injuries cleared";
pub const NO_PERFORMANCE: &str = "No performance logged";

/// Number of fields scored by `profile_completion_percent`.
pub const PROFILE_TRACKED_FIELDS: u32 = 7;

/// Headline for the most recently added injury that is not cleared.
pub fn injury_summary(athlete: &Athlete) -> String {
    if athlete.injuries.is_empty() {
        return NO_INJURIES.to_string();
    }
    match athlete.injuries.iter().rev().find(|injury| !injury.is_cleared()) {
        Some(injury) => format!("{} ({})", injury.kind, injury.status),
        None => ALL_INJURIES_CLEARED.to_string(),
    }
}

pub fn monthly_support(athlete: &Athlete) -> f64 {
    athlete.finance.monthly_total()
}

pub fn total_monthly_support<'a>(athletes: impl IntoIterator<Item = &'a Athlete>) -> f64 {
    athletes.into_iter().map(monthly_support).sum()
}

/// One-line description of the latest performance entry.
pub fn last_performance_summary(athlete: &Athlete) -> String {
    match athlete.performance_history.last() {
        Some(entry) => performance_line(entry),
        None => NO_PERFORMANCE.to_string(),
    }
}

/// `<date> – <metric> (<snapshot> pts[ – <notes>])`, with `N/A` for no date.
pub fn performance_line(entry: &PerformanceEntry) -> String {
    let date = if entry.date.trim().is_empty() {
        "N/A"
    } else {
        entry.date.as_str()
    };
    let notes = if entry.notes.trim().is_empty() {
        String::new()
    } else {
        format!(" – {}", entry.notes)
    };
    format!(
        "{date} – {} ({} pts{notes})",
        entry.metric, entry.points_snapshot
    )
}

/// Latest `limit` performance entries, newest first.
pub fn recent_performances(athlete: &Athlete, limit: usize) -> Vec<&PerformanceEntry> {
    athlete.performance_history.iter().rev().take(limit).collect()
}

/// Share of the seven tracked profile fields that are filled, in percent.
pub fn profile_completion_percent(athlete: &Athlete) -> u32 {
    let filled = [
        !athlete.name.trim().is_empty(),
        athlete.age > 0,
        !athlete.sport.trim().is_empty(),
        !athlete.country.trim().is_empty(),
        !athlete.gender.trim().is_empty(),
        athlete.has_avatar(),
        athlete.career.is_level_set(),
    ]
    .into_iter()
    .filter(|present| *present)
    .count() as f64;

    (filled / f64::from(PROFILE_TRACKED_FIELDS) * 100.0).round() as u32
}

/// Counts per gender bucket; unrecognized labels are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenderDistribution {
    pub male: usize,
    pub female: usize,
    pub other: usize,
}

impl GenderDistribution {
    pub fn count(&self, gender: Gender) -> usize {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
            Gender::Other => self.other,
        }
    }

    pub fn describe(&self) -> String {
        let counts: Vec<String> = Gender::ALL
            .iter()
            .map(|gender| format!("{}: {}", gender.as_str(), self.count(*gender)))
            .collect();
        format!("Gender distribution – {}", counts.join(", "))
    }
}

pub fn gender_distribution<'a>(
    athletes: impl IntoIterator<Item = &'a Athlete>,
) -> GenderDistribution {
    athletes
        .into_iter()
        .filter_map(Athlete::gender_bucket)
        .fold(GenderDistribution::default(), |mut dist, gender| {
            match gender {
                Gender::Male => dist.male += 1,
                Gender::Female => dist.female += 1,
                Gender::Other => dist.other += 1,
            }
            dist
        })
}

/// Head-to-head result for the compare view.
#[derive(Debug, Clone, PartialEq)]
pub struct AthleteComparison {
    /// `None` when tied on points.
    pub points_leader: Option<AthleteId>,
    /// `None` when monthly support is equal.
    pub support_leader: Option<AthleteId>,
    pub summary: String,
}

pub fn compare_athletes(a: &Athlete, b: &Athlete) -> AthleteComparison {
    let mut sentences = Vec::with_capacity(2);

    let points_leader = if a.points > b.points {
        sentences.push(format!(
            "{} currently has higher points than {}.",
            a.name, b.name
        ));
        Some(a.id)
    } else if b.points > a.points {
        sentences.push(format!(
            "{} currently has higher points than {}.",
            b.name, a.name
        ));
        Some(b.id)
    } else {
        sentences.push(format!("{} and {} are tied on points.", a.name, b.name));
        None
    };

    let (support_a, support_b) = (monthly_support(a), monthly_support(b));
    let support_leader = if support_a > support_b {
        sentences.push(support_sentence(a, support_a, support_b));
        Some(a.id)
    } else if support_b > support_a {
        sentences.push(support_sentence(b, support_b, support_a));
        Some(b.id)
    } else {
        None
    };

    AthleteComparison {
        points_leader,
        support_leader,
        summary: sentences.join(" "),
    }
}

fn support_sentence(leader: &Athlete, higher: f64, lower: f64) -> String {
    format!(
        "{} receives higher monthly support ({} vs {}).",
        leader.name,
        format_inr(higher),
        format_inr(lower)
    )
}
