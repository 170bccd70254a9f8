use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tenant (salon/business) in the multi-tenant system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Establishment {
    pub id: Uuid,
    pub name: String,
    /// IANA timezone label. All booking times are wall-clock values in this
    /// zone; the label itself is informational for clients.
    pub timezone: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEstablishmentRequest {
    pub name: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "America/Sao_Paulo".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstablishmentResponse {
    pub id: Uuid,
    pub name: String,
    pub timezone: String,
    pub created_at: DateTime<Utc>,
}
