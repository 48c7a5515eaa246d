// GET handlers: dashboard page, stats/history JSON, version

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use serde::Deserialize;

use super::AppState;
use crate::models::{Granularity, StatsTree, TrafficRecord};
use crate::render::{self, DashboardPage};
use crate::report;
use crate::version::{NAME, VERSION};

#[derive(Debug, Deserialize)]
pub(super) struct DashboardQuery {
    years: Option<i64>,
}

/// GET / — the dashboard page. Four sequential vnstat invocations, one tree,
/// rendered fresh per request; nothing survives between requests.
pub(super) async fn dashboard_handler(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    let years = query.years.unwrap_or(state.config.display.default_years);
    let (five_minute, tree) = collect_stats(&state).await;
    let selection = tree.select_years(years);
    Html(render::render_dashboard(&DashboardPage {
        interface: state.vnstat_repo.interface(),
        five_minute: &five_minute,
        selection: &selection,
    }))
}

/// GET /api/stats — the dashboard's data as JSON: the year/month/day/hour
/// tree (bucket totals under "_month"/"_day"/"_hour" beside the child keys)
/// plus the raw 5-minute window.
pub(super) async fn api_stats_handler(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    let years = query.years.unwrap_or(state.config.display.default_years);
    let (five_minute, tree) = collect_stats(&state).await;
    let selection = tree.select_years(years);
    axum::Json(serde_json::json!({
        "interface": state.vnstat_repo.interface(),
        "tree": selection.tree,
        "fiveMinute": five_minute,
        "yearsShown": selection.years_shown,
        "hasMoreYears": selection.has_more,
    }))
}

/// GET /api/history — complete per-granularity history from vnstat's verbose
/// report layout, untruncated.
pub(super) async fn api_history_handler(State(state): State<AppState>) -> impl IntoResponse {
    let repo = &state.vnstat_repo;
    let five_minute = report::full::parse_five_minute_full(&repo.fetch(Granularity::FiveMinute).await);
    let hourly = report::full::parse_hourly_full(&repo.fetch(Granularity::Hourly).await);
    let daily = report::full::parse_daily_full(&repo.fetch(Granularity::Daily).await);
    let monthly = report::full::parse_monthly_full(&repo.fetch(Granularity::Monthly).await);
    axum::Json(serde_json::json!({
        "interface": repo.interface(),
        "fiveMinute": five_minute,
        "hourly": hourly,
        "daily": daily,
        "monthly": monthly,
    }))
}

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// Windowed fetch + parse for all four granularities, then one tree build.
/// The four parses are independent; each degrades to empty on its own.
async fn collect_stats(state: &AppState) -> (Vec<TrafficRecord>, StatsTree) {
    let repo = &state.vnstat_repo;
    let cfg = &state.config.vnstat;
    let five_minute = report::parse_five_minute(
        &repo.fetch(Granularity::FiveMinute).await,
        cfg.five_minute_window,
    );
    let hourly = report::parse_hourly(&repo.fetch(Granularity::Hourly).await, cfg.hourly_window);
    let daily = report::parse_daily(&repo.fetch(Granularity::Daily).await);
    let monthly = report::parse_monthly(&repo.fetch(Granularity::Monthly).await);
    tracing::debug!(
        five_minute = five_minute.len(),
        hourly = hourly.len(),
        daily = daily.len(),
        monthly = monthly.len(),
        "collected reports"
    );
    let tree = StatsTree::build(&monthly, &daily, &hourly, &five_minute);
    (five_minute, tree)
}
