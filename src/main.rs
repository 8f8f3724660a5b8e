use axum::{
    routing::{get, post},
    Router,
};
use clinic_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let public_api = Router::new()
        .route("/api/auth/login", post(routes::auth::login))
        .layer(axum::middleware::from_fn_with_state(
            clinic_backend::middleware::rate_limit::new_rps_state(config.public_rps),
            clinic_backend::middleware::rate_limit::rps_middleware,
        ));

    let protected_api = Router::new()
        .route("/api/auth/me", get(routes::auth::me))
        .route(
            "/api/appointments",
            get(routes::appointments::list_appointments)
                .post(routes::appointments::create_appointment),
        )
        .route(
            "/api/appointments/:id",
            get(routes::appointments::get_appointment)
                .patch(routes::appointments::update_appointment)
                .delete(routes::appointments::delete_appointment),
        )
        .route("/api/reports/daily", get(routes::reports::daily_report))
        .route("/api/reports/kpis", get(routes::reports::kpis))
        .route("/api/reports/status-mix", get(routes::reports::status_mix))
        .route("/api/reports/revenue", get(routes::reports::revenue_by_day))
        .route(
            "/exports/appointments.csv",
            get(routes::export::export_appointments_csv),
        )
        .layer(axum::middleware::from_fn(
            clinic_backend::middleware::auth::require_bearer_auth,
        ))
        .layer(axum::middleware::from_fn_with_state(
            clinic_backend::middleware::rate_limit::new_rps_state(config.api_rps),
            clinic_backend::middleware::rate_limit::rps_middleware,
        ));

    let app = base_routes
        .merge(public_api)
        .merge(protected_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
