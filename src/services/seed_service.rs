use chrono::{Duration, Timelike, Utc};
use rand::Rng;
use sqlx::SqlitePool;
use tracing::info;

use crate::error::Result;
use crate::utils::crypto::hash_password;
use crate::utils::time::format_ts;

const SPECIALTIES: [&str; 10] = [
    "Family Medicine",
    "Pediatrics",
    "Dermatology",
    "Cardiology",
    "Ortho",
    "ENT",
    "Ophthalmology",
    "Psychiatry",
    "OB/GYN",
    "Neurology",
];

pub const DEMO_PASSWORD: &str = "test123";

#[derive(Debug, Clone)]
pub struct SeedOptions {
    pub reset: bool,
    pub patients: i64,
    pub providers: i64,
    pub appointments: i64,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            reset: false,
            patients: 10,
            providers: 10,
            appointments: 20,
        }
    }
}

#[derive(Clone)]
pub struct SeedService {
    pool: SqlitePool,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn weighted_status<R: Rng>(rng: &mut R) -> &'static str {
    // scheduled : completed : cancelled = 6 : 3 : 1
    match rng.gen_range(0..10) {
        0..=5 => "scheduled",
        6..=8 => "completed",
        _ => "cancelled",
    }
}

impl SeedService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Populate demo rows. Tables that already hold data are left alone
    /// unless `reset` wipes everything first.
    pub async fn run(&self, opts: &SeedOptions) -> Result<()> {
        if opts.reset {
            info!("Reset requested, deleting existing rows");
            sqlx::query("DELETE FROM invoices").execute(&self.pool).await?;
            sqlx::query("DELETE FROM appointments").execute(&self.pool).await?;
            sqlx::query("DELETE FROM providers").execute(&self.pool).await?;
            sqlx::query("DELETE FROM users").execute(&self.pool).await?;
        }

        let patient_ids = self.seed_patients(opts.patients).await?;
        let provider_ids = self.seed_providers(opts.providers).await?;
        self.seed_appointments(opts.appointments, &patient_ids, &provider_ids)
            .await?;

        Ok(())
    }

    async fn is_empty(&self, table: &str) -> Result<bool> {
        let count = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await?;
        Ok(count == 0)
    }

    async fn seed_patients(&self, n: i64) -> Result<Vec<i64>> {
        if !self.is_empty("users").await? {
            return self.collect_ids("users").await;
        }
        info!(count = n, "Seeding patients");
        let mut ids = Vec::new();
        for i in 1..=n {
            let hash = hash_password(DEMO_PASSWORD)
                .map_err(|e| crate::error::Error::Internal(format!("hashing failed: {}", e)))?;
            let res = sqlx::query(
                "INSERT INTO users (name, email, password_hash) VALUES (?, ?, ?)",
            )
            .bind(format!("Patient {}", i))
            .bind(format!("patient{}@example.com", i))
            .bind(hash)
            .execute(&self.pool)
            .await?;
            ids.push(res.last_insert_rowid());
        }
        Ok(ids)
    }

    async fn seed_providers(&self, n: i64) -> Result<Vec<i64>> {
        if !self.is_empty("providers").await? {
            return self.collect_ids("providers").await;
        }
        info!(count = n, "Seeding providers");
        let mut ids = Vec::new();
        for i in 1..=n {
            let specialty = SPECIALTIES[((i - 1) as usize) % SPECIALTIES.len()];
            let res = sqlx::query(
                "INSERT INTO providers (name, specialty, room) VALUES (?, ?, ?)",
            )
            .bind(format!("Dr. Provider {}", i))
            .bind(specialty)
            .bind(format!("Room {}", 100 + i))
            .execute(&self.pool)
            .await?;
            ids.push(res.last_insert_rowid());
        }
        Ok(ids)
    }

    async fn seed_appointments(
        &self,
        n: i64,
        patient_ids: &[i64],
        provider_ids: &[i64],
    ) -> Result<()> {
        if !self.is_empty("appointments").await? {
            return Ok(());
        }
        if patient_ids.is_empty() || provider_ids.is_empty() {
            return Err(crate::error::Error::Internal(
                "Cannot seed appointments without patients and providers".to_string(),
            ));
        }
        info!(count = n, "Seeding appointments and invoices");

        let base = Utc::now()
            .naive_utc()
            .with_hour(9)
            .and_then(|t| t.with_minute(0))
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .expect("09:00:00 is a valid time of day");
        let mut rng = rand::thread_rng();

        for i in 1..=n {
            let patient_id = patient_ids[((i - 1) as usize) % patient_ids.len()];
            let provider_id = provider_ids[((i - 1) as usize) % provider_ids.len()];
            let start = base + Duration::days(i / 3) + Duration::hours(i % 3);
            let end = start + Duration::minutes(30);
            let status = weighted_status(&mut rng);

            let res = sqlx::query(
                "INSERT INTO appointments (patient_id, provider_id, start_ts, end_ts, status) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(patient_id)
            .bind(provider_id)
            .bind(format_ts(start))
            .bind(format_ts(end))
            .bind(status)
            .execute(&self.pool)
            .await?;
            let appt_id = res.last_insert_rowid();

            let subtotal = 100.0 + ((i % 7) as f64) * 15.0;
            let discount = if i % 5 == 0 { 5.0 } else { 0.0 };
            let tax = round2(subtotal * 0.08);
            let total = round2(subtotal - discount + tax);
            let inv_status = if status == "completed" { "paid" } else { "unpaid" };

            sqlx::query(
                "INSERT INTO invoices (appt_id, subtotal, discount, tax, total, status) \
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(appt_id)
            .bind(subtotal)
            .bind(discount)
            .bind(tax)
            .bind(total)
            .bind(inv_status)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    async fn collect_ids(&self, table: &str) -> Result<Vec<i64>> {
        let ids =
            sqlx::query_scalar::<_, i64>(&format!("SELECT id FROM {} ORDER BY id", table))
                .fetch_all(&self.pool)
                .await?;
        Ok(ids)
    }
}
