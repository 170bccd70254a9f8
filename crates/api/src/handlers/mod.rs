pub mod appointment;
pub mod availability;
pub mod establishment;
pub mod professional;
pub mod schedule;
pub mod service;

pub(crate) mod convert;
