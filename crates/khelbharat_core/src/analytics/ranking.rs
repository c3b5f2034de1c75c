//! Points ranking and percent-of-leader bars.

use crate::model::athlete::Athlete;
use std::cmp::Ordering;

/// Stable sort by points, highest first. Ties keep input order; NaN sorts last.
pub fn sorted_by_points_desc<'a>(
    athletes: impl IntoIterator<Item = &'a Athlete>,
) -> Vec<&'a Athlete> {
    let mut sorted: Vec<&Athlete> = athletes.into_iter().collect();
    sorted.sort_by(|a, b| compare_points_desc(a.points, b.points));
    sorted
}

/// `round(points / max * 100)`, or 0 when `max` is not positive.
///
/// Bars are unsigned widths, so a roster whose leader has negative points
/// renders every bar empty instead of inverting the scale.
pub fn ranking_percent(points: f64, max_points: f64) -> u32 {
    if max_points.is_nan() || max_points <= 0.0 || !points.is_finite() {
        return 0;
    }
    let percent = (points / max_points * 100.0).round();
    if percent <= 0.0 {
        0
    } else {
        percent as u32
    }
}

/// Highest points in the list, if any athlete is present.
pub fn max_points<'a>(athletes: impl IntoIterator<Item = &'a Athlete>) -> Option<f64> {
    athletes
        .into_iter()
        .map(|athlete| athlete.points)
        .filter(|points| !points.is_nan())
        .reduce(f64::max)
}

/// Percent bar for every athlete, relative to the list leader.
pub fn ranking_percents(athletes: &[&Athlete]) -> Vec<u32> {
    let max = max_points(athletes.iter().copied()).unwrap_or(0.0);
    athletes
        .iter()
        .map(|athlete| ranking_percent(athlete.points, max))
        .collect()
}

fn compare_points_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
