pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    appointment_service::AppointmentService, auth_service::AuthService,
    export_service::ExportService, report_service::ReportService,
};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub auth_service: AuthService,
    pub appointment_service: AppointmentService,
    pub report_service: ReportService,
    pub export_service: ExportService,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        let auth_service = AuthService::new(pool.clone());
        let appointment_service = AppointmentService::new(pool.clone());
        let report_service = ReportService::new(pool.clone());
        let export_service = ExportService::new(pool.clone());

        Self {
            pool,
            auth_service,
            appointment_service,
            report_service,
            export_service,
        }
    }
}
