use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::{error::Result, services::export_service::ExportQuery, AppState};

#[utoipa::path(
    get,
    path = "/exports/appointments.csv",
    params(
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("from" = Option<String>, Query, description = "Earliest start time"),
        ("to" = Option<String>, Query, description = "Latest start time")
    ),
    responses(
        (status = 200, description = "CSV file of appointments"),
        (status = 500, description = "Export failed")
    )
)]
#[axum::debug_handler]
pub async fn export_appointments_csv(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse> {
    let buffer = state.export_service.export_appointments(query).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"appointments.csv\"".to_string(),
            ),
        ],
        buffer,
    ))
}
