use askama::Template;
use axum::response::Html;

use cf_dashboard_core::{Chart, SeriesPoint};

use super::ChartView;
use crate::error::WebError;

#[derive(Template)]
#[template(path = "analytics.html")]
pub struct AnalyticsTemplate {
    pub title: String,
    pub chart: ChartView,
}

fn sample_chart() -> Chart {
    Chart::new(
        "Contest Analytics",
        "Overview of contest statistics",
        vec![
            SeriesPoint::new("Sample A", 400),
            SeriesPoint::new("Sample B", 300),
            SeriesPoint::new("Sample C", 200),
            SeriesPoint::new("Sample D", 100),
        ],
    )
}

pub async fn analytics() -> Result<Html<String>, WebError> {
    let template = AnalyticsTemplate {
        title: "Codeforces Analytics Dashboard".to_string(),
        chart: ChartView::from(&sample_chart()),
    };
    Ok(Html(template.render()?))
}
