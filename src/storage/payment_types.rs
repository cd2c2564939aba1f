//! Payment type repository (`payment_types.json`)

use crate::error::FintrackResult;
use crate::models::{PaymentType, PaymentTypeId};

use super::table::{Record, Table};

impl Record for PaymentType {
    type Id = PaymentTypeId;

    fn id(&self) -> PaymentTypeId {
        self.id
    }
}

pub type PaymentTypeRepository = Table<PaymentType>;

impl Table<PaymentType> {
    pub fn get_by_name(&self, name: &str) -> FintrackResult<Option<PaymentType>> {
        let wanted = name.trim().to_lowercase();
        self.find(|p| p.name.trim().to_lowercase() == wanted)
    }
}
