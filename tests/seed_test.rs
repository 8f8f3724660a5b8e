use std::env;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use clinic_backend::services::seed_service::{SeedOptions, SeedService};
use clinic_backend::utils::crypto::verify_password;

async fn setup() -> SqlitePool {
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("DB_PATH", ":memory:");
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("TOKEN_TTL_MINUTES", "60");
    env::set_var("PUBLIC_RPS", "100");
    env::set_var("API_RPS", "100");
    let _ = clinic_backend::config::init_config();

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    pool
}

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

fn small() -> SeedOptions {
    SeedOptions {
        reset: false,
        patients: 2,
        providers: 2,
        appointments: 4,
    }
}

#[tokio::test]
async fn seed_populates_all_tables() {
    let pool = setup().await;
    let service = SeedService::new(pool.clone());

    service.run(&small()).await.unwrap();

    assert_eq!(count(&pool, "users").await, 2);
    assert_eq!(count(&pool, "providers").await, 2);
    assert_eq!(count(&pool, "appointments").await, 4);
    assert_eq!(count(&pool, "invoices").await, 4);

    // demo users can log in with the demo password
    let hash: String =
        sqlx::query_scalar("SELECT password_hash FROM users WHERE email = 'patient1@example.com'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(verify_password("test123", &hash).unwrap());

    // every appointment got exactly one invoice
    let orphan: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM appointments a \
         LEFT JOIN invoices i ON i.appt_id = a.id WHERE i.id IS NULL",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(orphan, 0);
}

#[tokio::test]
async fn second_run_without_reset_changes_nothing() {
    let pool = setup().await;
    let service = SeedService::new(pool.clone());

    service.run(&small()).await.unwrap();
    let first_ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM users ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();

    service.run(&small()).await.unwrap();
    assert_eq!(count(&pool, "users").await, 2);
    assert_eq!(count(&pool, "appointments").await, 4);
    let second_ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM users ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(first_ids, second_ids);
}

#[tokio::test]
async fn reset_wipes_and_reseeds() {
    let pool = setup().await;
    let service = SeedService::new(pool.clone());

    service.run(&small()).await.unwrap();
    let mut opts = small();
    opts.reset = true;
    opts.appointments = 6;
    service.run(&opts).await.unwrap();

    assert_eq!(count(&pool, "users").await, 2);
    assert_eq!(count(&pool, "appointments").await, 6);
    assert_eq!(count(&pool, "invoices").await, 6);
}
