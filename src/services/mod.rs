pub mod appointment_service;
pub mod auth_service;
pub mod export_service;
pub mod report_service;
pub mod seed_service;
