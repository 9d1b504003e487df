//! State of the single dashboard a user is looking at

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, warn};

use crate::codeforces::Contest;
use crate::details::DetailOutcome;
use crate::error::Result;
use crate::pagination::{Page, Pager};
use crate::stats::ContestStats;
use crate::view::{derive_view, filter_contests, FilterCriteria, FilteredView};

pub const LIST_ERROR_MESSAGE: &str = "Failed to load contests. Please try again later.";

/// Number handed out to each detail navigation, increasing by one each time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Generation(u64);

impl Generation {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Everything the list page needs to render.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub stats: ContestStats,
    pub view: FilteredView,
    pub page: Page<Contest>,
    pub page_size: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

#[derive(Debug, Default)]
pub struct DashboardSession {
    contests: Vec<Contest>,
    loaded: bool,
    load_error: Option<String>,
    criteria: FilterCriteria,
    pager: Pager,
    generation: u64,
    detail: Option<(Generation, DetailOutcome)>,
}

impl DashboardSession {
    pub fn new(page_size: usize) -> Result<Self> {
        Ok(Self {
            pager: Pager::new(page_size)?,
            ..Self::default()
        })
    }

    /// Stores the outcome of a list fetch. A failure leaves the list empty.
    pub fn set_contests(&mut self, fetched: Result<Vec<Contest>>) {
        match fetched {
            Ok(contests) => {
                debug!(count = contests.len(), "contest list replaced");
                self.contests = contests;
                self.load_error = None;
            }
            Err(e) => {
                warn!(error = %e, "contest list unavailable");
                self.contests.clear();
                self.load_error = Some(LIST_ERROR_MESSAGE.to_string());
            }
        }
        self.loaded = true;
        self.pager.reset();
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn contests(&self) -> &[Contest] {
        &self.contests
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Returns whether the criteria changed; a change goes back to page 1.
    pub fn apply_criteria(&mut self, criteria: FilterCriteria) -> bool {
        if criteria == self.criteria {
            return false;
        }
        self.criteria = criteria;
        self.pager.reset();
        true
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<bool> {
        if page_size == self.pager.page_size() {
            return Ok(false);
        }
        self.pager.set_page_size(page_size)?;
        Ok(true)
    }

    /// The favorites set changed under the current filter.
    pub fn favorites_changed(&mut self) {
        self.pager.reset();
    }

    pub fn go_to(&mut self, page: usize, favorites: &BTreeSet<u64>) -> bool {
        let len = filter_contests(&self.contests, &self.criteria, favorites).len();
        let moved = self.pager.go_to(page, len);
        if !moved {
            debug!(page, len, "page request out of range");
        }
        moved
    }

    /// Applies one list request: criteria and page size first, and the
    /// requested page only if neither of them changed.
    pub fn update(
        &mut self,
        criteria: FilterCriteria,
        page_size: Option<usize>,
        page: Option<usize>,
        favorites: &BTreeSet<u64>,
    ) -> Result<()> {
        let mut reset = self.apply_criteria(criteria);
        if let Some(size) = page_size {
            reset |= self.set_page_size(size)?;
        }
        if let (false, Some(page)) = (reset, page) {
            self.go_to(page, favorites);
        }
        Ok(())
    }

    pub fn view(&self, favorites: &BTreeSet<u64>) -> DashboardView {
        let view = derive_view(&self.contests, &self.criteria, favorites);
        let page = self.pager.slice(&view.contests);
        let len = view.contests.len();

        DashboardView {
            stats: ContestStats::from_contests(&self.contests),
            page,
            page_size: self.pager.page_size(),
            has_previous: self.pager.has_previous(),
            has_next: self.pager.has_next(len),
            view,
        }
    }

    pub fn begin_navigation(&mut self) -> Generation {
        self.generation += 1;
        Generation(self.generation)
    }

    /// Keeps `outcome` as the displayed detail only if no newer navigation
    /// has started since `generation` was handed out.
    pub fn complete_navigation(&mut self, generation: Generation, outcome: DetailOutcome) -> bool {
        if generation.0 != self.generation {
            debug!(
                stale = generation.0,
                latest = self.generation,
                "dropping stale detail result"
            );
            return false;
        }
        self.detail = Some((generation, outcome));
        true
    }

    pub fn detail(&self) -> Option<&DetailOutcome> {
        self.detail.as_ref().map(|(_, outcome)| outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::details::fallback_contest;
    use crate::error::Error;
    use crate::testing::contest;

    fn session_with(n: u64) -> DashboardSession {
        let mut session = DashboardSession::new(10).unwrap();
        session.set_contests(Ok((1..=n)
            .map(|i| contest(i, &format!("Round {}", i), "CF", "FINISHED"))
            .collect()));
        session
    }

    fn outcome(id: u64) -> DetailOutcome {
        DetailOutcome {
            contest: contest(id, "Detail", "CF", "FINISHED"),
            error: None,
        }
    }

    #[test]
    fn test_criteria_change_resets_page() {
        let none = BTreeSet::new();
        let mut session = session_with(25);
        assert!(session.go_to(3, &none));

        assert!(session.apply_criteria(FilterCriteria::new().search("Round")));
        assert_eq!(session.pager().page(), 1);

        assert!(session.go_to(2, &none));
        assert!(!session.apply_criteria(FilterCriteria::new().search("Round")));
        assert_eq!(session.pager().page(), 2);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut session = session_with(25);
        session.go_to(2, &BTreeSet::new());
        assert!(session.set_page_size(20).unwrap());
        assert_eq!(session.pager().page(), 1);
        assert!(!session.set_page_size(20).unwrap());
    }

    #[test]
    fn test_update_ignores_page_when_filter_changes() {
        let none = BTreeSet::new();
        let mut session = session_with(25);
        session.update(FilterCriteria::new(), None, Some(3), &none).unwrap();
        assert_eq!(session.pager().page(), 3);

        session.update(FilterCriteria::new().kind("CF"), None, Some(2), &none).unwrap();
        assert_eq!(session.pager().page(), 1);

        session.update(FilterCriteria::new().kind("CF"), Some(10), Some(9), &none).unwrap();
        assert_eq!(session.pager().page(), 1);
    }

    #[test]
    fn test_view_pages_filtered_list() {
        let none = BTreeSet::new();
        let mut session = session_with(25);
        session.go_to(3, &none);

        let view = session.view(&none);
        assert_eq!(view.page.page_count, 3);
        assert_eq!(view.page.items.len(), 5);
        assert!(view.has_previous);
        assert!(!view.has_next);
        assert_eq!(view.stats.total, 25);
    }

    #[test]
    fn test_failed_load_leaves_list_empty() {
        let mut session = session_with(3);
        session.set_contests(Err(Error::FetchFailed("boom".to_string())));

        assert!(session.is_loaded());
        assert!(session.contests().is_empty());
        assert_eq!(session.load_error(), Some(LIST_ERROR_MESSAGE));
    }

    #[test]
    fn test_latest_navigation_wins() {
        let mut session = DashboardSession::default();
        let first = session.begin_navigation();
        let second = session.begin_navigation();

        assert!(session.complete_navigation(second, outcome(2)));
        assert!(!session.complete_navigation(first, outcome(1)));
        assert_eq!(session.detail().map(|d| d.contest.id), Some(2));
    }

    #[test]
    fn test_stale_completion_before_latest_is_dropped() {
        let mut session = DashboardSession::default();
        let first = session.begin_navigation();
        let _second = session.begin_navigation();

        assert!(!session.complete_navigation(first, DetailOutcome {
            contest: fallback_contest(),
            error: Some("Contest not found".to_string()),
        }));
        assert!(session.detail().is_none());
    }
}
