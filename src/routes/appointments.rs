use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::appointment_dto::{
        AppointmentListQuery, AppointmentListResponse, AppointmentResponse,
        CreateAppointmentPayload, UpdateAppointmentPayload,
    },
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = CreateAppointmentPayload,
    responses(
        (status = 201, description = "Appointment created", body = Json<AppointmentResponse>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<AppState>,
    Json(payload): Json<CreateAppointmentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let appointment = state.appointment_service.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(AppointmentResponse::from(appointment)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/appointments",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("patient_id" = Option<i64>, Query, description = "Filter by patient"),
        ("provider_id" = Option<i64>, Query, description = "Filter by provider"),
        ("from" = Option<String>, Query, description = "Earliest start time"),
        ("to" = Option<String>, Query, description = "Latest start time")
    ),
    responses(
        (status = 200, description = "List of appointments", body = Json<AppointmentListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<AppState>,
    Query(query): Query<AppointmentListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.appointment_service.list(query).await?;
    Ok(Json(AppointmentListResponse::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    params(
        ("id" = i64, Path, description = "Appointment ID")
    ),
    responses(
        (status = 200, description = "Appointment found", body = Json<AppointmentResponse>),
        (status = 404, description = "Appointment not found")
    )
)]
#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let appointment = state.appointment_service.get_by_id(id).await?;
    Ok(Json(AppointmentResponse::from(appointment)))
}

#[utoipa::path(
    patch,
    path = "/api/appointments/{id}",
    params(
        ("id" = i64, Path, description = "Appointment ID")
    ),
    request_body = UpdateAppointmentPayload,
    responses(
        (status = 200, description = "Appointment updated", body = Json<AppointmentResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Appointment not found")
    )
)]
#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAppointmentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let appointment = state.appointment_service.update(id, payload).await?;
    Ok(Json(AppointmentResponse::from(appointment)))
}

#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    params(
        ("id" = i64, Path, description = "Appointment ID")
    ),
    responses(
        (status = 204, description = "Appointment deleted"),
        (status = 404, description = "Appointment not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.appointment_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
