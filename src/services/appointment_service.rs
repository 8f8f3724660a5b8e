use chrono::NaiveDateTime;
use sqlx::SqlitePool;

use crate::dto::appointment_dto::{
    AppointmentListQuery, CreateAppointmentPayload, UpdateAppointmentPayload,
};
use crate::error::{Error, Result};
use crate::models::appointment::{is_allowed_status, Appointment, AppointmentWithNames};
use crate::utils::time::{format_ts, parse_ts};

const SELECT_JOINED: &str = "SELECT a.id, a.patient_id, a.provider_id, \
     u.name AS patient, p.name AS provider, \
     a.start_ts, a.end_ts, a.status, a.notes \
     FROM appointments a \
     JOIN users u ON u.id = a.patient_id \
     JOIN providers p ON p.id = a.provider_id";

#[derive(Clone)]
pub struct AppointmentService {
    pool: SqlitePool,
}

pub struct AppointmentList {
    pub items: Vec<AppointmentWithNames>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

fn validate_window(start: NaiveDateTime, end: NaiveDateTime) -> Result<()> {
    if end <= start {
        return Err(Error::BadRequest(
            "End time must be after start time".to_string(),
        ));
    }
    Ok(())
}

fn validate_status(status: &str) -> Result<()> {
    if !is_allowed_status(status) {
        return Err(Error::BadRequest(format!(
            "Status must be one of: cancelled, completed, scheduled (got '{}')",
            status
        )));
    }
    Ok(())
}

impl AppointmentService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateAppointmentPayload) -> Result<AppointmentWithNames> {
        let start = parse_ts(&payload.start_ts).map_err(|e| Error::BadRequest(e.to_string()))?;
        let end = parse_ts(&payload.end_ts).map_err(|e| Error::BadRequest(e.to_string()))?;
        validate_window(start, end)?;

        let status = payload
            .status
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_else(|| "scheduled".to_string());
        validate_status(&status)?;

        self.ensure_patient_exists(payload.patient_id).await?;
        self.ensure_provider_exists(payload.provider_id).await?;

        let res = sqlx::query(
            "INSERT INTO appointments (patient_id, provider_id, start_ts, end_ts, status, notes) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(payload.patient_id)
        .bind(payload.provider_id)
        .bind(format_ts(start))
        .bind(format_ts(end))
        .bind(&status)
        .bind(&payload.notes)
        .execute(&self.pool)
        .await?;

        self.get_by_id(res.last_insert_rowid()).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<AppointmentWithNames> {
        let appointment = sqlx::query_as::<_, AppointmentWithNames>(&format!(
            "{} WHERE a.id = ?",
            SELECT_JOINED
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(appointment)
    }

    pub async fn update(
        &self,
        id: i64,
        payload: UpdateAppointmentPayload,
    ) -> Result<AppointmentWithNames> {
        let existing = sqlx::query_as::<_, Appointment>(
            "SELECT id, patient_id, provider_id, start_ts, end_ts, status, notes \
             FROM appointments WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        let start = match &payload.start_ts {
            Some(s) => parse_ts(s).map_err(|e| Error::BadRequest(e.to_string()))?,
            None => existing.start_ts,
        };
        let end = match &payload.end_ts {
            Some(s) => parse_ts(s).map_err(|e| Error::BadRequest(e.to_string()))?,
            None => existing.end_ts,
        };
        validate_window(start, end)?;

        let status = match payload.status {
            Some(s) => {
                let s = s.trim().to_lowercase();
                validate_status(&s)?;
                s
            }
            None => existing.status,
        };

        let patient_id = payload.patient_id.unwrap_or(existing.patient_id);
        let provider_id = payload.provider_id.unwrap_or(existing.provider_id);
        if patient_id != existing.patient_id {
            self.ensure_patient_exists(patient_id).await?;
        }
        if provider_id != existing.provider_id {
            self.ensure_provider_exists(provider_id).await?;
        }
        let notes = payload.notes.or(existing.notes);

        sqlx::query(
            "UPDATE appointments \
             SET patient_id = ?, provider_id = ?, start_ts = ?, end_ts = ?, status = ?, notes = ? \
             WHERE id = ?",
        )
        .bind(patient_id)
        .bind(provider_id)
        .bind(format_ts(start))
        .bind(format_ts(end))
        .bind(&status)
        .bind(&notes)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM appointments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Appointment not found".to_string()));
        }
        Ok(())
    }

    pub async fn list(&self, query: AppointmentListQuery) -> Result<AppointmentList> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let mut filters = Vec::new();
        let mut args: Vec<String> = Vec::new();

        if let Some(status) = query.status {
            filters.push("a.status = ?".to_string());
            args.push(status);
        }
        if let Some(patient_id) = query.patient_id {
            filters.push("a.patient_id = ?".to_string());
            args.push(patient_id.to_string());
        }
        if let Some(provider_id) = query.provider_id {
            filters.push("a.provider_id = ?".to_string());
            args.push(provider_id.to_string());
        }
        if let Some(from) = query.from {
            let from = parse_ts(&from).map_err(|e| Error::BadRequest(e.to_string()))?;
            filters.push("a.start_ts >= ?".to_string());
            args.push(format_ts(from));
        }
        if let Some(to) = query.to {
            let to = parse_ts(&to).map_err(|e| Error::BadRequest(e.to_string()))?;
            filters.push("a.start_ts <= ?".to_string());
            args.push(format_ts(to));
        }

        let where_clause = if filters.is_empty() {
            "".to_string()
        } else {
            format!("WHERE {}", filters.join(" AND "))
        };

        let items_query = format!(
            "{} {} ORDER BY a.start_ts DESC, a.id DESC LIMIT ? OFFSET ?",
            SELECT_JOINED, where_clause
        );
        let total_query = format!("SELECT COUNT(*) FROM appointments a {}", where_clause);

        let mut items_statement = sqlx::query_as::<_, AppointmentWithNames>(&items_query);
        for value in &args {
            items_statement = items_statement.bind(value);
        }
        items_statement = items_statement.bind(per_page).bind(offset);
        let items = items_statement.fetch_all(&self.pool).await?;

        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_query);
        for value in &args {
            total_statement = total_statement.bind(value);
        }
        let total = total_statement.fetch_one(&self.pool).await?;

        let total_pages = ((total as f64) / (per_page as f64)).ceil() as i64;

        Ok(AppointmentList {
            items,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    async fn ensure_patient_exists(&self, id: i64) -> Result<()> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        if count == 0 {
            return Err(Error::BadRequest(format!("Unknown patient id {}", id)));
        }
        Ok(())
    }

    async fn ensure_provider_exists(&self, id: i64) -> Result<()> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM providers WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        if count == 0 {
            return Err(Error::BadRequest(format!("Unknown provider id {}", id)));
        }
        Ok(())
    }
}
