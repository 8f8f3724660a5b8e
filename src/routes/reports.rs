use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};

use crate::{
    dto::report_dto::{DailyReportQuery, RevenueQuery, StatusMixResponse},
    error::Result,
    services::report_service::DEFAULT_REPORT_DAYS,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/reports/daily",
    params(
        ("days" = Option<i64>, Query, description = "Trailing window size, default 14")
    ),
    responses(
        (status = 200, description = "Per-day appointment counts and revenue")
    )
)]
#[axum::debug_handler]
pub async fn daily_report(
    State(state): State<AppState>,
    Query(query): Query<DailyReportQuery>,
) -> Result<impl IntoResponse> {
    let days = query.days.unwrap_or(DEFAULT_REPORT_DAYS);
    let rows = state.report_service.daily_summary(days).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/reports/kpis",
    responses(
        (status = 200, description = "Dashboard KPI figures")
    )
)]
#[axum::debug_handler]
pub async fn kpis(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let kpis = state.report_service.kpis().await?;
    Ok(Json(kpis))
}

#[utoipa::path(
    get,
    path = "/api/reports/status-mix",
    responses(
        (status = 200, description = "Appointment counts per status")
    )
)]
#[axum::debug_handler]
pub async fn status_mix(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.report_service.status_mix().await?;
    Ok(Json(StatusMixResponse { items }))
}

#[utoipa::path(
    get,
    path = "/api/reports/revenue",
    params(
        ("limit" = Option<i64>, Query, description = "Number of days, default 10")
    ),
    responses(
        (status = 200, description = "Revenue totals per day")
    )
)]
#[axum::debug_handler]
pub async fn revenue_by_day(
    State(state): State<AppState>,
    Query(query): Query<RevenueQuery>,
) -> Result<impl IntoResponse> {
    let rows = state
        .report_service
        .revenue_by_day(query.limit.unwrap_or(10))
        .await?;
    Ok(Json(rows))
}
