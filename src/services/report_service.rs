use chrono::{Duration, NaiveDate, Utc};
use sqlx::SqlitePool;
use std::collections::HashMap;

use crate::dto::report_dto::{DailySummaryRow, KpiResponse, RevenuePoint, StatusCount};
use crate::error::Result;

pub const DEFAULT_REPORT_DAYS: i64 = 14;
pub const MAX_REPORT_DAYS: i64 = 90;

#[derive(Clone)]
pub struct ReportService {
    pool: SqlitePool,
}

/// Expand grouped per-day rows into exactly `days` buckets ending at
/// `today`, zero-filling days with no appointments.
fn fill_days(
    rows: Vec<(String, i64, f64)>,
    days: i64,
    today: NaiveDate,
) -> Vec<DailySummaryRow> {
    let by_day: HashMap<String, (i64, f64)> = rows
        .into_iter()
        .map(|(day, appts, revenue)| (day, (appts, revenue)))
        .collect();

    let start = today - Duration::days(days - 1);
    (0..days)
        .map(|offset| {
            let day = (start + Duration::days(offset))
                .format("%Y-%m-%d")
                .to_string();
            let (appts, revenue) = by_day.get(&day).copied().unwrap_or((0, 0.0));
            DailySummaryRow {
                day,
                appts,
                revenue,
            }
        })
        .collect()
}

impl ReportService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Appointment counts and invoiced revenue for the trailing `days`
    /// window ending today (UTC). Always returns `days` buckets.
    pub async fn daily_summary(&self, days: i64) -> Result<Vec<DailySummaryRow>> {
        let days = days.clamp(1, MAX_REPORT_DAYS);
        let today = Utc::now().date_naive();
        let start = today - Duration::days(days - 1);

        let rows = sqlx::query_as::<_, (String, i64, f64)>(
            "SELECT date(a.start_ts) AS day, \
                    COUNT(a.id) AS appts, \
                    ROUND(COALESCE(SUM(i.total), 0), 2) AS revenue \
             FROM appointments a \
             LEFT JOIN invoices i ON i.appt_id = a.id \
             WHERE date(a.start_ts) >= ? AND date(a.start_ts) <= ? \
             GROUP BY day \
             ORDER BY day",
        )
        .bind(start.format("%Y-%m-%d").to_string())
        .bind(today.format("%Y-%m-%d").to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(fill_days(rows, days, today))
    }

    pub async fn kpis(&self) -> Result<KpiResponse> {
        let total_revenue =
            sqlx::query_scalar::<_, f64>("SELECT ROUND(COALESCE(SUM(total), 0), 2) FROM invoices")
                .fetch_one(&self.pool)
                .await?;

        let total_appts = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM appointments")
            .fetch_one(&self.pool)
            .await?;

        let avg_invoice =
            sqlx::query_scalar::<_, Option<f64>>("SELECT ROUND(AVG(total), 2) FROM invoices")
                .fetch_one(&self.pool)
                .await?
                .unwrap_or(0.0);

        let next_appt = sqlx::query_scalar::<_, Option<String>>(
            "SELECT MIN(start_ts) FROM appointments WHERE datetime(start_ts) >= datetime('now')",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(KpiResponse {
            total_revenue,
            total_appts,
            avg_invoice,
            next_appt,
        })
    }

    pub async fn status_mix(&self) -> Result<Vec<StatusCount>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT status, COUNT(*) AS c FROM appointments GROUP BY status ORDER BY status",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(status, count)| StatusCount { status, count })
            .collect())
    }

    pub async fn revenue_by_day(&self, limit: i64) -> Result<Vec<RevenuePoint>> {
        let limit = if limit <= 0 { 10 } else { limit.min(100) };
        let rows = sqlx::query_as::<_, (String, f64)>(
            "SELECT date(a.start_ts) AS day, \
                    ROUND(COALESCE(SUM(i.total), 0), 2) AS revenue \
             FROM appointments a \
             LEFT JOIN invoices i ON i.appt_id = a.id \
             GROUP BY day \
             ORDER BY day \
             LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(day, revenue)| RevenuePoint { day, revenue })
            .collect())
    }
}
