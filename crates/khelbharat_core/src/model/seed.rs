//! Built-in roster used when no usable snapshot is stored.

use crate::model::athlete::{Athlete, Career, ExtraFields, Finance, Injury, PerformanceEntry};

/// Returns a fresh copy of the three-athlete seed roster.
///
/// Callers own the result; mutating it never affects later calls.
pub fn seed_athletes() -> Vec<Athlete> {
    vec![
        Athlete {
            name: "Rahul Sharma".to_string(),
            age: 22,
            sport: "100m Sprint".to_string(),
            country: "India".to_string(),
            gender: "Male".to_string(),
            points: 95.0,
            injuries: vec![Injury {
                id: 1,
                kind: "Ankle strain".to_string(),
                severity: "Minor".to_string(),
                status: "Rehab".to_string(),
                start_date: "2025-10-05".to_string(),
                notes: "Avoid hard landings".to_string(),
                extra: ExtraFields::new(),
            }],
            performance_history: vec![PerformanceEntry::new(
                "2025-11-10",
                "100m - 10.55s",
                "Season best",
                95.0,
            )],
            career: Career::new("National", "Qualify for Asian Games trials"),
            finance: Finance::new(25_000.0, 15_000.0),
            ..Athlete::with_id(1)
        },
        Athlete {
            name: "Emily Carter".to_string(),
            age: 24,
            sport: "Long Jump".to_string(),
            country: "USA".to_string(),
            gender: "Female".to_string(),
            points: 88.0,
            career: Career::new("International", "Maintain top-10 world ranking"),
            finance: Finance::new(40_000.0, 60_000.0),
            ..Athlete::with_id(2)
        },
        Athlete {
            name: "Kaito Tanaka".to_string(),
            age: 21,
            sport: "High Jump".to_string(),
            country: "Japan".to_string(),
            gender: "Male".to_string(),
            points: 92.0,
            career: Career::new("National", "Clear 2.30m in competition"),
            finance: Finance::new(30_000.0, 20_000.0),
            ..Athlete::with_id(3)
        },
    ]
}
