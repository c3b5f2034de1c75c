//! Search, sport and gender filters over athlete lists.

use crate::model::athlete::Athlete;

/// Sentinel label for "no gender restriction" in admin filter inputs.
pub const GENDER_FILTER_ALL: &str = "All";

/// Admin gender filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenderFilter {
    #[default]
    All,
    /// Exact match on the stored label; `""` selects athletes with no gender.
    Only(String),
}

impl GenderFilter {
    /// Maps a select-box value; the literal `All` disables the filter.
    pub fn from_label(label: &str) -> Self {
        if label == GENDER_FILTER_ALL {
            Self::All
        } else {
            Self::Only(label.to_string())
        }
    }

    pub fn matches(&self, athlete: &Athlete) -> bool {
        match self {
            Self::All => true,
            Self::Only(gender) => athlete.gender == *gender,
        }
    }
}

/// Case-insensitive substring match against name, sport or country.
pub fn matches_search_query(athlete: &Athlete, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [&athlete.name, &athlete.sport, &athlete.country]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Case-insensitive substring match against sport only.
pub fn matches_sport_substring(athlete: &Athlete, substring: &str) -> bool {
    let needle = substring.trim().to_lowercase();
    needle.is_empty() || athlete.sport.to_lowercase().contains(&needle)
}

pub fn filter_by_search_query<'a>(
    athletes: impl IntoIterator<Item = &'a Athlete>,
    query: &str,
) -> Vec<&'a Athlete> {
    athletes
        .into_iter()
        .filter(|athlete| matches_search_query(athlete, query))
        .collect()
}

pub fn filter_by_sport_substring<'a>(
    athletes: impl IntoIterator<Item = &'a Athlete>,
    substring: &str,
) -> Vec<&'a Athlete> {
    athletes
        .into_iter()
        .filter(|athlete| matches_sport_substring(athlete, substring))
        .collect()
}

pub fn filter_by_gender<'a>(
    athletes: impl IntoIterator<Item = &'a Athlete>,
    filter: &GenderFilter,
) -> Vec<&'a Athlete> {
    athletes
        .into_iter()
        .filter(|athlete| filter.matches(athlete))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{filter_by_gender, filter_by_search_query, GenderFilter};
    use crate::model::seed::seed_athletes;

    #[test]
    fn search_matches_country_case_insensitively() {
        let roster = seed_athletes();
        let hits = filter_by_search_query(&roster, "  jaPAN ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 3);
        assert_eq!(filter_by_search_query(&roster, "").len(), 3);
    }

    #[test]
    fn gender_filter_all_sentinel_keeps_everyone() {
        let mut roster = seed_athletes();
        roster[1].gender.clear();

        assert_eq!(GenderFilter::from_label("All"), GenderFilter::All);
        assert_eq!(filter_by_gender(&roster, &GenderFilter::All).len(), 3);

        let unset = filter_by_gender(&roster, &GenderFilter::from_label(""));
        assert_eq!(unset.len(), 1);
        assert_eq!(unset[0].id, 2);

        let male = filter_by_gender(&roster, &GenderFilter::from_label("Male"));
        assert_eq!(male.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 3]);
    }
}
