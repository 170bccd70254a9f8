use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

/// A bookable service offered by an establishment.
///
/// Prices are integer cents to avoid floating-point money.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub name: String,
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    pub establishment_id: Uuid,
    pub name: String,
    pub duration_minutes: i32,
    pub price_cents: i64,
}

impl CreateServiceRequest {
    pub fn validate(&self) -> BookingResult<()> {
        if self.duration_minutes <= 0 {
            return Err(BookingError::Validation(
                "Service duration must be a positive number of minutes".to_string(),
            ));
        }
        if self.price_cents < 0 {
            return Err(BookingError::Validation(
                "Service price cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub name: String,
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub created_at: DateTime<Utc>,
}
