//! Codeforces Dashboard Core Library
//!
//! Fetches the Codeforces contest list and turns it into the filtered,
//! paginated and aggregated views the dashboard renders.

pub mod cache;
pub mod codeforces;
pub mod details;
pub mod error;
pub mod favorites;
pub mod pagination;
pub mod session;
pub mod stats;
pub mod storage;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::ContestCache;
pub use codeforces::{CodeforcesClient, Contest, ContestSource};
pub use details::{fallback_contest, ContestDetails, DetailOutcome};
pub use error::{Error, Result};
pub use favorites::FavoritesStore;
pub use pagination::{paginate, Page, Pager};
pub use session::{DashboardSession, DashboardView, Generation};
pub use stats::ContestStats;
pub use storage::{Database, KeyValueStore, MemoryStore};
pub use view::{derive_view, Chart, FilterCriteria, FilteredView, Selection, SeriesPoint};
