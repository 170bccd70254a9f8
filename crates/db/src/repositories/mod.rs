pub mod appointment;
pub mod establishment;
pub mod professional;
pub mod schedule;
pub mod service;
