use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const ALLOWED_STATUSES: [&str; 3] = ["scheduled", "completed", "cancelled"];

pub fn is_allowed_status(status: &str) -> bool {
    ALLOWED_STATUSES.contains(&status)
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub provider_id: i64,
    pub start_ts: NaiveDateTime,
    pub end_ts: NaiveDateTime,
    pub status: String,
    pub notes: Option<String>,
}

/// Appointment joined with patient and provider display names, the shape
/// list endpoints and the CSV export work with.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AppointmentWithNames {
    pub id: i64,
    pub patient_id: i64,
    pub provider_id: i64,
    pub patient: String,
    pub provider: String,
    pub start_ts: NaiveDateTime,
    pub end_ts: NaiveDateTime,
    pub status: String,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_allow_list() {
        assert!(is_allowed_status("scheduled"));
        assert!(is_allowed_status("completed"));
        assert!(is_allowed_status("cancelled"));
        assert!(!is_allowed_status("Scheduled"));
        assert!(!is_allowed_status("done"));
        assert!(!is_allowed_status(""));
    }
}
