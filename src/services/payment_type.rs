//! Payment type service

use crate::audit::EntityType;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{PaymentType, PaymentTypeId};
use crate::storage::Storage;

pub struct PaymentTypeService<'a> {
    storage: &'a Storage,
}

impl<'a> PaymentTypeService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn list(&self, include_inactive: bool) -> FintrackResult<Vec<PaymentType>> {
        if include_inactive {
            self.storage.payment_types.get_all()
        } else {
            self.storage.payment_types.filter(|p| p.active)
        }
    }

    /// Find by name or id string
    pub fn find(&self, identifier: &str) -> FintrackResult<Option<PaymentType>> {
        if let Some(pt) = self.storage.payment_types.get_by_name(identifier)? {
            return Ok(Some(pt));
        }
        if let Ok(id) = identifier.parse::<PaymentTypeId>() {
            return self.storage.payment_types.get(id);
        }
        Ok(None)
    }

    pub fn resolve(&self, identifier: &str) -> FintrackResult<PaymentType> {
        self.find(identifier)?
            .ok_or_else(|| FintrackError::payment_type_not_found(identifier))
    }

    pub fn create(&self, name: &str) -> FintrackResult<PaymentType> {
        let name = self.checked_name(name, None)?;

        let id = self.storage.payment_types.next_id()?;
        let payment_type = PaymentType::new(id, name);

        self.storage.payment_types.upsert(payment_type.clone())?;
        self.storage.payment_types.save()?;

        self.storage.log_create(
            EntityType::PaymentType,
            payment_type.id.to_string(),
            Some(payment_type.name.clone()),
            &payment_type,
        )?;

        Ok(payment_type)
    }

    pub fn rename(&self, id: PaymentTypeId, name: &str) -> FintrackResult<PaymentType> {
        let name = self.checked_name(name, Some(id))?;
        self.modify(id, |pt| pt.name = name)
    }

    pub fn set_active(&self, id: PaymentTypeId, active: bool) -> FintrackResult<PaymentType> {
        self.modify(id, |pt| pt.active = active)
    }

    pub fn toggle_active(&self, id: PaymentTypeId) -> FintrackResult<PaymentType> {
        self.modify(id, |pt| pt.active = !pt.active)
    }

    fn checked_name(&self, name: &str, exclude: Option<PaymentTypeId>) -> FintrackResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FintrackError::Validation(
                "Payment type name cannot be empty".into(),
            ));
        }
        match self.storage.payment_types.get_by_name(name)? {
            Some(existing) if Some(existing.id) != exclude => Err(FintrackError::Duplicate {
                entity_type: "Payment type",
                identifier: name.to_string(),
            }),
            _ => Ok(name.to_string()),
        }
    }

    fn modify<F>(&self, id: PaymentTypeId, change: F) -> FintrackResult<PaymentType>
    where
        F: FnOnce(&mut PaymentType),
    {
        let mut payment_type = self
            .storage
            .payment_types
            .get(id)?
            .ok_or_else(|| FintrackError::payment_type_not_found(id.to_string()))?;
        let before = payment_type.clone();
        change(&mut payment_type);

        self.storage.payment_types.upsert(payment_type.clone())?;
        self.storage.payment_types.save()?;

        self.storage.log_update(
            EntityType::PaymentType,
            payment_type.id.to_string(),
            Some(payment_type.name.clone()),
            &before,
            &payment_type,
        )?;

        Ok(payment_type)
    }
}
