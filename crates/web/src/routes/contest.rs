use askama::Template;
use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use chrono::Duration;
use std::sync::Arc;
use tracing::debug;

use cf_dashboard_core::{Contest, ContestDetails, DetailOutcome};

use crate::error::WebError;
use crate::{lock, AppState};

#[derive(Template)]
#[template(path = "contest.html")]
pub struct ContestTemplate {
    pub title: String,
    pub error: Option<String>,
    pub contest: ContestView,
    pub favorite: bool,
}

pub struct ContestView {
    pub id: u64,
    pub name: String,
    pub kind: String,
    pub phase: String,
    pub start: String,
    pub relative: String,
    pub hours: u64,
    pub frozen: bool,
    pub participants: String,
}

impl From<&Contest> for ContestView {
    fn from(c: &Contest) -> Self {
        let start = c
            .start_time()
            .map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "-".to_string());

        ContestView {
            id: c.id,
            name: c.name.clone(),
            kind: c.kind.clone(),
            phase: c.phase.clone(),
            start,
            relative: relative_time(c.relative_time_seconds),
            hours: c.duration_hours(),
            frozen: c.frozen,
            participants: c
                .participant_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Codeforces counts seconds since the start, negative before it.
fn relative_time(seconds: i64) -> String {
    let delta = Duration::seconds(seconds.abs());
    let amount = if delta.num_days() > 0 {
        plural(delta.num_days(), "day")
    } else if delta.num_hours() > 0 {
        plural(delta.num_hours(), "hour")
    } else {
        plural(delta.num_minutes(), "minute")
    };

    if seconds < 0 {
        format!("starts in {}", amount)
    } else {
        format!("started {} ago", amount)
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

pub async fn contest_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, WebError> {
    let generation = lock(&state.session)?.begin_navigation();

    let outcome = ContestDetails::new(&*state.source, &state.cache)
        .load(&id)
        .await;

    if !lock(&state.session)?.complete_navigation(generation, outcome.clone()) {
        debug!(id = %id, "a newer contest view superseded this one");
    }

    let favorite = lock(&state.favorites)?.is_favorite(outcome.contest.id);

    let template = ContestTemplate {
        title: outcome.contest.name.clone(),
        error: outcome.error.clone(),
        contest: ContestView::from(&outcome.contest),
        favorite,
    };
    Ok(Html(template.render()?))
}

/// The detail most recently navigated to.
pub async fn api_detail(State(state): State<Arc<AppState>>) -> Result<Json<DetailOutcome>, WebError> {
    let detail = lock(&state.session)?.detail().cloned();
    detail.map(Json).ok_or(WebError::NotFound)
}
