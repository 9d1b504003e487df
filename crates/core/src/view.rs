//! Filtered and aggregated projections of the contest collection
//!
//! The list/table view honours every filter. The chart aggregates are always
//! computed from the full collection, so changing filters never changes the
//! summary charts.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::codeforces::Contest;

pub const LABEL_MAX_CHARS: usize = 20;
pub const DURATION_SERIES_LEN: usize = 20;
pub const PARTICIPANT_SERIES_LEN: usize = 10;

/// Query-string spelling of the "match anything" selection.
pub const ALL: &str = "ALL";

/// A type or phase filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// `None`, an empty string and `ALL` all mean no restriction.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            None | Some("") | Some(ALL) => Selection::All,
            Some(v) => Selection::Only(v.to_string()),
        }
    }

    pub fn as_query(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::Only(v) => v,
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(v) => v == value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search: String,
    pub kind: Selection,
    pub phase: Selection,
    pub favorites_only: bool,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: &str) -> Self {
        self.search = text.to_string();
        self
    }

    pub fn kind(mut self, kind: &str) -> Self {
        self.kind = Selection::Only(kind.to_string());
        self
    }

    pub fn phase(mut self, phase: &str) -> Self {
        self.phase = Selection::Only(phase.to_string());
        self
    }

    pub fn favorites_only(mut self) -> Self {
        self.favorites_only = true;
        self
    }

    pub fn matches(&self, contest: &Contest, favorites: &BTreeSet<u64>) -> bool {
        self.matches_lowered(contest, favorites, &self.search.to_lowercase())
    }

    fn matches_lowered(&self, contest: &Contest, favorites: &BTreeSet<u64>, needle: &str) -> bool {
        (needle.is_empty() || contest.name.to_lowercase().contains(needle))
            && self.kind.matches(&contest.kind)
            && self.phase.matches(&contest.phase)
            && (!self.favorites_only || favorites.contains(&contest.id))
    }
}

/// One point of a chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub name: String,
    pub value: u64,
}

impl SeriesPoint {
    pub fn new(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A titled series handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chart {
    pub title: String,
    pub description: String,
    pub data: Vec<SeriesPoint>,
}

impl Chart {
    pub fn new(title: &str, description: &str, data: Vec<SeriesPoint>) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            data,
        }
    }

    /// Largest value in the series, 0 when empty.
    pub fn max_value(&self) -> u64 {
        self.data.iter().map(|p| p.value).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredView {
    pub contests: Vec<Contest>,
    pub by_type: Vec<SeriesPoint>,
    pub by_phase: Vec<SeriesPoint>,
    pub durations: Vec<SeriesPoint>,
    pub participants: Vec<SeriesPoint>,
}

impl FilteredView {
    /// The four dashboard charts, in display order.
    pub fn charts(&self) -> Vec<Chart> {
        vec![
            Chart::new("Contest Types", "Distribution of contest types", self.by_type.clone()),
            Chart::new("Contest Phases", "Current status of all contests", self.by_phase.clone()),
            Chart::new(
                "Contest Durations",
                "Duration of recent contests (in hours)",
                self.durations.clone(),
            ),
            Chart::new(
                "Top Contests by Participants",
                "Contests with the highest number of participants",
                self.participants.clone(),
            ),
        ]
    }
}

pub fn derive_view(all: &[Contest], criteria: &FilterCriteria, favorites: &BTreeSet<u64>) -> FilteredView {
    FilteredView {
        contests: filter_contests(all, criteria, favorites),
        by_type: count_by(all, |c| c.kind.as_str()),
        by_phase: count_by(all, |c| c.phase.as_str()),
        durations: duration_series(all),
        participants: participant_series(all),
    }
}

pub fn filter_contests(all: &[Contest], criteria: &FilterCriteria, favorites: &BTreeSet<u64>) -> Vec<Contest> {
    let needle = criteria.search.to_lowercase();
    all.iter()
        .filter(|c| criteria.matches_lowered(c, favorites, &needle))
        .cloned()
        .collect()
}

/// Counts per key, keys in order of first appearance.
pub fn count_by<F>(all: &[Contest], key: F) -> Vec<SeriesPoint>
where
    F: Fn(&Contest) -> &str,
{
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut points: Vec<SeriesPoint> = Vec::new();

    for contest in all {
        let k = key(contest);
        match positions.get(k) {
            Some(&idx) => points[idx].value += 1,
            None => {
                positions.insert(k, points.len());
                points.push(SeriesPoint::new(k, 1));
            }
        }
    }

    points
}

/// Hours of the first contests in source order.
pub fn duration_series(all: &[Contest]) -> Vec<SeriesPoint> {
    all.iter()
        .take(DURATION_SERIES_LEN)
        .map(|c| SeriesPoint::new(truncate_label(&c.name), c.duration_hours()))
        .collect()
}

/// Finished contests with the most participants; unknown counts are zero.
pub fn participant_series(all: &[Contest]) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = all
        .iter()
        .filter(|c| c.is_finished())
        .map(|c| SeriesPoint::new(truncate_label(&c.name), c.participant_count.unwrap_or(0)))
        .collect();

    // stable: ties keep source order
    points.sort_by(|a, b| b.value.cmp(&a.value));
    points.truncate(PARTICIPANT_SERIES_LEN);
    points
}

pub fn truncate_label(name: &str) -> String {
    if name.chars().count() > LABEL_MAX_CHARS {
        let head: String = name.chars().take(LABEL_MAX_CHARS).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::contest;

    fn scenario_b() -> Vec<Contest> {
        vec![
            contest(1, "Codeforces Round Div 2", "CF", "FINISHED"),
            contest(2, "ICPC Finals", "ICPC", "FINISHED"),
            contest(3, "Div 3", "CF", "BEFORE"),
        ]
    }

    #[test]
    fn test_search_and_type_filter() {
        let criteria = FilterCriteria::new().search("Div").kind("CF");
        let view = derive_view(&scenario_b(), &criteria, &BTreeSet::new());

        let names: Vec<&str> = view.contests.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Codeforces Round Div 2", "Div 3"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let criteria = FilterCriteria::new().search("icpc");
        let filtered = filter_contests(&scenario_b(), &criteria, &BTreeSet::new());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        let all = scenario_b();
        let filtered = filter_contests(&all, &FilterCriteria::new(), &BTreeSet::new());
        assert_eq!(filtered, all);
    }

    #[test]
    fn test_phase_filter() {
        let criteria = FilterCriteria::new().phase("BEFORE");
        let filtered = filter_contests(&scenario_b(), &criteria, &BTreeSet::new());
        assert_eq!(filtered.iter().map(|c| c.id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_favorites_only() {
        let favorites: BTreeSet<u64> = [2, 3].into_iter().collect();
        let criteria = FilterCriteria::new().favorites_only();
        let filtered = filter_contests(&scenario_b(), &criteria, &favorites);
        assert_eq!(filtered.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2, 3]);

        let filtered = filter_contests(&scenario_b(), &criteria, &BTreeSet::new());
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_filtered_is_subset_satisfying_criteria() {
        let all = scenario_b();
        let favorites: BTreeSet<u64> = [1, 3].into_iter().collect();
        let criteria = FilterCriteria::new().search("d").kind("CF").favorites_only();

        let view = derive_view(&all, &criteria, &favorites);
        for contest in &view.contests {
            assert!(all.contains(contest));
            assert!(criteria.matches(contest, &favorites));
        }
        assert_eq!(view, derive_view(&all, &criteria, &favorites));
    }

    #[test]
    fn test_aggregates_ignore_filters() {
        let all = scenario_b();
        let narrow = derive_view(&all, &FilterCriteria::new().search("nothing matches"), &BTreeSet::new());
        let wide = derive_view(&all, &FilterCriteria::new(), &BTreeSet::new());

        assert!(narrow.contests.is_empty());
        assert_eq!(narrow.by_type, wide.by_type);
        assert_eq!(narrow.by_phase, wide.by_phase);
        assert_eq!(narrow.durations, wide.durations);
        assert_eq!(narrow.participants, wide.participants);
    }

    #[test]
    fn test_counts_keep_first_seen_order() {
        let view = derive_view(&scenario_b(), &FilterCriteria::new(), &BTreeSet::new());
        assert_eq!(view.by_type, vec![SeriesPoint::new("CF", 2), SeriesPoint::new("ICPC", 1)]);
        assert_eq!(view.by_phase, vec![SeriesPoint::new("FINISHED", 2), SeriesPoint::new("BEFORE", 1)]);
    }

    #[test]
    fn test_duration_series_takes_first_twenty() {
        let all: Vec<Contest> = (0..25)
            .map(|i| {
                let mut c = contest(i, &format!("Round {}", i), "CF", "FINISHED");
                c.duration_seconds = 3600 * 2 + 1800;
                c
            })
            .collect();

        let series = duration_series(&all);
        assert_eq!(series.len(), 20);
        assert_eq!(series[0], SeriesPoint::new("Round 0", 2));
        assert_eq!(series[19].name, "Round 19");
    }

    #[test]
    fn test_participant_series_top_ten_descending() {
        let counts = [50, 200, 10, 75, 300, 5, 120, 90, 60, 30, 250, 15];
        let all: Vec<Contest> = counts
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                let mut c = contest(i as u64, &format!("Contest {}", i), "CF", "FINISHED");
                c.participant_count = Some(n);
                c
            })
            .collect();

        let series = participant_series(&all);
        let values: Vec<u64> = series.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![300, 250, 200, 120, 90, 75, 60, 50, 30, 15]);
    }

    #[test]
    fn test_participant_series_only_finished_and_unknown_last() {
        let mut unknown = contest(1, "Unknown", "CF", "FINISHED");
        unknown.participant_count = None;
        let mut known = contest(2, "Known", "CF", "FINISHED");
        known.participant_count = Some(3);
        let mut running = contest(3, "Running", "CF", "CODING");
        running.participant_count = Some(1000);

        let series = participant_series(&[unknown, known, running]);
        assert_eq!(series, vec![SeriesPoint::new("Known", 3), SeriesPoint::new("Unknown", 0)]);
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Exactly twenty chars"), "Exactly twenty chars");
        assert_eq!(truncate_label("Exactly twenty-one ch"), "Exactly twenty-one c...");
        assert_eq!(truncate_label("Раунд Codeforces номер один"), "Раунд Codeforces ном...");
    }

    #[test]
    fn test_truncation_does_not_affect_matching() {
        let all = vec![contest(1, "Educational Codeforces Round 170", "CF", "FINISHED")];
        let filtered = filter_contests(&all, &FilterCriteria::new().search("Round 170"), &BTreeSet::new());
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_selection_from_query() {
        assert_eq!(Selection::from_query(None), Selection::All);
        assert_eq!(Selection::from_query(Some("ALL")), Selection::All);
        assert_eq!(Selection::from_query(Some("")), Selection::All);
        assert_eq!(Selection::from_query(Some("CF")), Selection::Only("CF".to_string()));
        assert_eq!(Selection::Only("ICPC".to_string()).as_query(), "ICPC");
    }

    #[test]
    fn test_charts_titles() {
        let view = derive_view(&scenario_b(), &FilterCriteria::new(), &BTreeSet::new());
        let charts = view.charts();
        assert_eq!(charts.len(), 4);
        assert_eq!(charts[0].title, "Contest Types");
        assert_eq!(charts[0].max_value(), 2);
        assert_eq!(charts[3].title, "Top Contests by Participants");
    }
}
