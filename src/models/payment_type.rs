//! Payment type model (cash, debit card, credit card, ...)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::PaymentTypeId;
use super::pocket::default_active;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentType {
    pub id: PaymentTypeId,
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl PaymentType {
    pub fn new(id: PaymentTypeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            active: true,
            created_at: Utc::now(),
        }
    }
}
