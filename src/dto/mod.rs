pub mod appointment_dto;
pub mod auth_dto;
pub mod report_dto;
