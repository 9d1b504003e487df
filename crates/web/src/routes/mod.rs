use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{debug, info};

use cf_dashboard_core::codeforces::{KNOWN_PHASES, KNOWN_TYPES};
use cf_dashboard_core::pagination::PAGE_SIZES;
use cf_dashboard_core::view::ALL;
use cf_dashboard_core::{Chart, Contest, ContestStats, DashboardView, FilterCriteria, Selection};

use crate::error::WebError;
use crate::{lock, AppState};

pub mod analytics;
pub mod contest;

pub fn router(state: Arc<AppState>, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/contests/reload", post(reload_contests))
        .route("/favorites/:id", post(toggle_favorite))
        .route("/contest/:id", get(contest::contest_detail))
        .route("/analytics", get(analytics::analytics))
        .route("/api/contests", get(api_contests))
        .route("/api/charts", get(api_charts))
        .route("/api/detail", get(contest::api_detail))
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// TEMPLATES
// ============================================================================

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub title: String,
    pub error: Option<String>,
    pub stats: ContestStats,
    pub search: String,
    pub favorites_tab: bool,
    pub all_tab_link: String,
    pub favorites_tab_link: String,
    pub type_options: Vec<SelectOption>,
    pub phase_options: Vec<SelectOption>,
    pub page_size_options: Vec<SelectOption>,
    pub rows: Vec<ContestRow>,
    pub page: usize,
    pub page_count: usize,
    pub prev_link: Option<String>,
    pub next_link: Option<String>,
    pub back: String,
    pub charts: Vec<ChartView>,
}

pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

pub struct ContestRow {
    pub id: u64,
    pub name: String,
    pub kind: String,
    pub phase: String,
    pub hours: u64,
    pub favorite: bool,
}

pub struct ChartView {
    pub title: String,
    pub description: String,
    pub rows: Vec<ChartRow>,
}

pub struct ChartRow {
    pub name: String,
    pub value: u64,
    /// Bar width relative to the largest value.
    pub percent: u64,
    /// Share of the series total.
    pub share: u64,
}

impl From<&Chart> for ChartView {
    fn from(chart: &Chart) -> Self {
        let max = chart.max_value();
        let total: u64 = chart.data.iter().map(|p| p.value).sum();

        let rows = chart
            .data
            .iter()
            .map(|p| ChartRow {
                name: p.name.clone(),
                value: p.value,
                percent: if max == 0 { 0 } else { p.value * 100 / max },
                share: if total == 0 { 0 } else { p.value * 100 / total },
            })
            .collect();

        ChartView {
            title: chart.title.clone(),
            description: chart.description.clone(),
            rows,
        }
    }
}

// ============================================================================
// QUERY PARAMS
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub phase: Option<String>,
    pub tab: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl DashboardQuery {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search: self.search.clone().unwrap_or_default(),
            kind: Selection::from_query(self.kind.as_deref()),
            phase: Selection::from_query(self.phase.as_deref()),
            favorites_only: self.tab.as_deref() == Some("favorites"),
        }
    }

    fn page_size(&self) -> Option<usize> {
        match self.per_page {
            Some(size) if PAGE_SIZES.contains(&size) => Some(size),
            Some(size) => {
                debug!(size, "ignoring unsupported page size");
                None
            }
            None => None,
        }
    }
}

#[derive(Serialize)]
struct ListLink<'a> {
    search: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    phase: &'a str,
    tab: &'a str,
    per_page: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<usize>,
}

fn list_link(criteria: &FilterCriteria, favorites_only: bool, per_page: usize, page: Option<usize>) -> String {
    let link = ListLink {
        search: &criteria.search,
        kind: criteria.kind.as_query(),
        phase: criteria.phase.as_query(),
        tab: if favorites_only { "favorites" } else { "all" },
        per_page,
        page,
    };
    format!("/?{}", serde_urlencoded::to_string(&link).unwrap_or_default())
}

fn options(known: &[&str], all_label: &str, selected: &Selection) -> Vec<SelectOption> {
    let mut options = vec![SelectOption {
        value: ALL.to_string(),
        label: all_label.to_string(),
        selected: *selected == Selection::All,
    }];
    options.extend(known.iter().map(|v| SelectOption {
        value: v.to_string(),
        label: v.to_string(),
        selected: selected.matches(v) && *selected != Selection::All,
    }));
    options
}

// ============================================================================
// SHARED
// ============================================================================

/// The session after applying one list request.
pub struct Snapshot {
    pub view: DashboardView,
    pub error: Option<String>,
    pub criteria: FilterCriteria,
    pub favorites: BTreeSet<u64>,
}

/// Fetches the contest list the first time any list view is requested.
async fn ensure_loaded(state: &AppState) -> Result<(), WebError> {
    let loaded = lock(&state.session)?.is_loaded();
    if loaded {
        return Ok(());
    }

    let fetched = state.source.fetch_contest_list().await;
    lock(&state.session)?.set_contests(fetched);
    Ok(())
}

async fn snapshot(state: &AppState, query: &DashboardQuery) -> Result<Snapshot, WebError> {
    ensure_loaded(state).await?;

    let favorites = lock(&state.favorites)?.ids().clone();
    let mut session = lock(&state.session)?;
    session.update(query.criteria(), query.page_size(), query.page, &favorites)?;

    Ok(Snapshot {
        view: session.view(&favorites),
        error: session.load_error().map(String::from),
        criteria: session.criteria().clone(),
        favorites,
    })
}

// ============================================================================
// HANDLERS
// ============================================================================

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, WebError> {
    let Snapshot { view, error, criteria, favorites } = snapshot(&state, &query).await?;

    let per_page = view.page_size;
    let favorites_only = criteria.favorites_only;

    let rows = view
        .page
        .items
        .iter()
        .map(|c| ContestRow {
            id: c.id,
            name: c.name.clone(),
            kind: c.kind.clone(),
            phase: c.phase.clone(),
            hours: c.duration_hours(),
            favorite: favorites.contains(&c.id),
        })
        .collect();

    let page_size_options = PAGE_SIZES
        .iter()
        .map(|size| SelectOption {
            value: size.to_string(),
            label: format!("{} per page", size),
            selected: *size == per_page,
        })
        .collect();

    let template = IndexTemplate {
        title: "Codeforces Contest Dashboard".to_string(),
        error,
        stats: view.stats.clone(),
        search: criteria.search.clone(),
        favorites_tab: favorites_only,
        all_tab_link: list_link(&criteria, false, per_page, None),
        favorites_tab_link: list_link(&criteria, true, per_page, None),
        type_options: options(&KNOWN_TYPES, "All Types", &criteria.kind),
        phase_options: options(&KNOWN_PHASES, "All Phases", &criteria.phase),
        page_size_options,
        rows,
        page: view.page.page,
        page_count: view.page.page_count,
        prev_link: view
            .has_previous
            .then(|| list_link(&criteria, favorites_only, per_page, Some(view.page.page - 1))),
        next_link: view
            .has_next
            .then(|| list_link(&criteria, favorites_only, per_page, Some(view.page.page + 1))),
        back: list_link(&criteria, favorites_only, per_page, None),
        charts: view.view.charts().iter().map(ChartView::from).collect(),
    };
    Ok(Html(template.render()?))
}

pub async fn reload_contests(State(state): State<Arc<AppState>>) -> Result<Redirect, WebError> {
    let fetched = state.source.fetch_contest_list().await;
    lock(&state.session)?.set_contests(fetched);
    Ok(Redirect::to("/"))
}

#[derive(Deserialize)]
pub struct ToggleForm {
    pub back: Option<String>,
}

pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Form(form): Form<ToggleForm>,
) -> Result<Redirect, WebError> {
    let favorite = {
        let mut favorites = lock(&state.favorites)?;
        favorites.toggle(id)?;
        favorites.is_favorite(id)
    };
    lock(&state.session)?.favorites_changed();
    info!(id, favorite, "favorite toggled");

    Ok(Redirect::to(&safe_back(form.back.as_deref())))
}

/// Only same-site paths are followed after a form post.
fn safe_back(back: Option<&str>) -> String {
    match back {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => "/".to_string(),
    }
}

// ============================================================================
// API
// ============================================================================

#[derive(Serialize)]
pub struct ContestsResponse {
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub total: usize,
    pub items: Vec<Contest>,
    pub error: Option<String>,
}

pub async fn api_contests(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<ContestsResponse>, WebError> {
    let Snapshot { view, error, .. } = snapshot(&state, &query).await?;

    Ok(Json(ContestsResponse {
        page: view.page.page,
        page_count: view.page.page_count,
        page_size: view.page_size,
        total: view.view.contests.len(),
        items: view.page.items,
        error,
    }))
}

pub async fn api_charts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<Vec<Chart>>, WebError> {
    let Snapshot { view, .. } = snapshot(&state, &query).await?;
    Ok(Json(view.view.charts()))
}

pub async fn health() -> &'static str {
    "OK"
}
