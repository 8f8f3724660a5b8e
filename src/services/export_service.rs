use serde::Deserialize;
use sqlx::{FromRow, SqlitePool};

use crate::error::{Error, Result};
use crate::utils::time::{format_ts, parse_ts};

pub const CSV_HEADER: [&str; 7] = [
    "appt_id", "patient", "provider", "start_ts", "end_ts", "status", "total",
];

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ExportQuery {
    pub status: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ExportRow {
    pub appt_id: i64,
    pub patient: String,
    pub provider: String,
    pub start_ts: String,
    pub end_ts: String,
    pub status: String,
    pub total: f64,
}

#[derive(Clone)]
pub struct ExportService {
    pool: SqlitePool,
}

impl ExportService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch matching appointments and serialize them as a CSV document
    /// with the fixed header, newest first.
    pub async fn export_appointments(&self, query: ExportQuery) -> Result<Vec<u8>> {
        let rows = self.fetch_rows(query).await?;
        to_csv(&rows)
    }

    async fn fetch_rows(&self, query: ExportQuery) -> Result<Vec<ExportRow>> {
        let mut filters = Vec::new();
        let mut args: Vec<String> = Vec::new();

        if let Some(status) = query.status {
            filters.push("a.status = ?");
            args.push(status);
        }
        if let Some(from) = query.from {
            let from = parse_ts(&from).map_err(|e| Error::BadRequest(e.to_string()))?;
            filters.push("a.start_ts >= ?");
            args.push(format_ts(from));
        }
        if let Some(to) = query.to {
            let to = parse_ts(&to).map_err(|e| Error::BadRequest(e.to_string()))?;
            filters.push("a.start_ts <= ?");
            args.push(format_ts(to));
        }

        let where_clause = if filters.is_empty() {
            "".to_string()
        } else {
            format!("WHERE {}", filters.join(" AND "))
        };

        let sql = format!(
            "SELECT a.id AS appt_id, \
                    u.name AS patient, \
                    p.name AS provider, \
                    a.start_ts, a.end_ts, a.status, \
                    COALESCE(i.total, 0.0) AS total \
             FROM appointments a \
             JOIN users u ON u.id = a.patient_id \
             JOIN providers p ON p.id = a.provider_id \
             LEFT JOIN invoices i ON i.appt_id = a.id \
             {} \
             ORDER BY a.start_ts DESC, a.id DESC",
            where_clause
        );

        let mut statement = sqlx::query_as::<_, ExportRow>(&sql);
        for value in &args {
            statement = statement.bind(value);
        }
        let rows = statement.fetch_all(&self.pool).await?;
        Ok(rows)
    }
}

fn to_csv(rows: &[ExportRow]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(CSV_HEADER)
        .map_err(|e| Error::Export(e.to_string()))?;
    for row in rows {
        writer
            .write_record([
                row.appt_id.to_string(),
                row.patient.clone(),
                row.provider.clone(),
                row.start_ts.clone(),
                row.end_ts.clone(),
                row.status.clone(),
                format!("{:.2}", row.total),
            ])
            .map_err(|e| Error::Export(e.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| Error::Export(e.to_string()))
}
