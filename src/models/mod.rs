pub mod appointment;
pub mod invoice;
pub mod provider;
pub mod user;
