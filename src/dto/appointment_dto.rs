use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::appointment::AppointmentWithNames;
use crate::services::appointment_service::AppointmentList;
use crate::utils::time::format_ts;

/// Timestamps travel as `YYYY-MM-DD HH:MM:SS` strings; the service parses
/// and rejects anything else.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAppointmentPayload {
    pub patient_id: i64,
    pub provider_id: i64,
    #[validate(length(min = 1))]
    pub start_ts: String,
    #[validate(length(min = 1))]
    pub end_ts: String,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateAppointmentPayload {
    pub patient_id: Option<i64>,
    pub provider_id: Option<i64>,
    #[validate(length(min = 1))]
    pub start_ts: Option<String>,
    #[validate(length(min = 1))]
    pub end_ts: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppointmentListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<String>,
    pub patient_id: Option<i64>,
    pub provider_id: Option<i64>,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentResponse {
    pub id: i64,
    pub patient_id: i64,
    pub provider_id: i64,
    pub patient: String,
    pub provider: String,
    pub start_ts: String,
    pub end_ts: String,
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentListResponse {
    pub items: Vec<AppointmentResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl From<AppointmentWithNames> for AppointmentResponse {
    fn from(value: AppointmentWithNames) -> Self {
        Self {
            id: value.id,
            patient_id: value.patient_id,
            provider_id: value.provider_id,
            patient: value.patient,
            provider: value.provider,
            start_ts: format_ts(value.start_ts),
            end_ts: format_ts(value.end_ts),
            status: value.status,
            notes: value.notes,
        }
    }
}

impl From<AppointmentList> for AppointmentListResponse {
    fn from(value: AppointmentList) -> Self {
        Self {
            items: value.items.into_iter().map(Into::into).collect(),
            total: value.total,
            page: value.page,
            per_page: value.per_page,
            total_pages: value.total_pages,
        }
    }
}
