//! Pocket service
//!
//! CRUD for pockets plus the pocket total (sum of its concept values).

use crate::audit::EntityType;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{Money, Pocket, PocketId};
use crate::storage::Storage;

/// Fields that can be changed on an existing pocket
#[derive(Debug, Clone, Default)]
pub struct PocketUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

/// A pocket with its planned total
#[derive(Debug, Clone)]
pub struct PocketSummary {
    pub pocket: Pocket,
    pub concept_count: usize,
    pub total: Money,
}

pub struct PocketService<'a> {
    storage: &'a Storage,
}

impl<'a> PocketService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, name: &str, description: Option<&str>) -> FintrackResult<Pocket> {
        let name = name.trim();
        self.ensure_unique_name(name, None)?;

        let id = self.storage.pockets.next_id()?;
        let mut pocket = Pocket::new(id, name);
        if let Some(description) = description {
            pocket.description = description.trim().to_string();
        }
        pocket
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.storage.pockets.upsert(pocket.clone())?;
        self.storage.pockets.save()?;

        self.storage.log_create(
            EntityType::Pocket,
            pocket.id.to_string(),
            Some(pocket.name.clone()),
            &pocket,
        )?;
        tracing::debug!(id = %pocket.id, name = %pocket.name, "pocket created");

        Ok(pocket)
    }

    pub fn get(&self, id: PocketId) -> FintrackResult<Option<Pocket>> {
        self.storage.pockets.get(id)
    }

    /// Find a pocket by name or id string
    pub fn find(&self, identifier: &str) -> FintrackResult<Option<Pocket>> {
        if let Some(pocket) = self.storage.pockets.get_by_name(identifier)? {
            return Ok(Some(pocket));
        }
        if let Ok(id) = identifier.parse::<PocketId>() {
            return self.storage.pockets.get(id);
        }
        Ok(None)
    }

    /// Like `find`, but a missing pocket is an error
    pub fn resolve(&self, identifier: &str) -> FintrackResult<Pocket> {
        self.find(identifier)?
            .ok_or_else(|| FintrackError::pocket_not_found(identifier))
    }

    pub fn list(&self, include_inactive: bool) -> FintrackResult<Vec<Pocket>> {
        if include_inactive {
            self.storage.pockets.get_all()
        } else {
            self.storage.pockets.get_active()
        }
    }

    pub fn list_with_totals(&self, include_inactive: bool) -> FintrackResult<Vec<PocketSummary>> {
        self.list(include_inactive)?
            .into_iter()
            .map(|pocket| {
                let concepts = self.storage.concepts.get_by_pocket(pocket.id)?;
                Ok(PocketSummary {
                    concept_count: concepts.len(),
                    total: concepts.iter().map(|c| c.value).sum(),
                    pocket,
                })
            })
            .collect()
    }

    /// Sum of the pocket's concept values
    pub fn total(&self, id: PocketId) -> FintrackResult<Money> {
        self.storage.concepts.total_for_pocket(id)
    }

    pub fn update(&self, id: PocketId, changes: PocketUpdate) -> FintrackResult<Pocket> {
        let mut pocket = self
            .storage
            .pockets
            .get(id)?
            .ok_or_else(|| FintrackError::pocket_not_found(id.to_string()))?;
        let before = pocket.clone();

        if let Some(name) = changes.name {
            let name = name.trim();
            self.ensure_unique_name(name, Some(id))?;
            pocket.rename(name);
        }
        if let Some(description) = changes.description {
            pocket.set_description(description.trim());
        }
        if let Some(active) = changes.active {
            pocket.set_active(active);
        }

        pocket
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.storage.pockets.upsert(pocket.clone())?;
        self.storage.pockets.save()?;

        self.storage.log_update(
            EntityType::Pocket,
            pocket.id.to_string(),
            Some(pocket.name.clone()),
            &before,
            &pocket,
        )?;

        Ok(pocket)
    }

    /// Delete a pocket. Refused while cycles or fixed expenses point at it;
    /// its concepts go with it.
    pub fn delete(&self, id: PocketId) -> FintrackResult<Pocket> {
        let pocket = self
            .storage
            .pockets
            .get(id)?
            .ok_or_else(|| FintrackError::pocket_not_found(id.to_string()))?;

        let cycles = self.storage.cycles.get_by_pocket(id)?;
        if !cycles.is_empty() {
            return Err(FintrackError::InUse {
                entity_type: "Pocket",
                identifier: pocket.name,
                reason: format!("{} cycle(s) reference it", cycles.len()),
            });
        }
        if self.storage.fixed_expenses.any_in_pocket(id)? {
            return Err(FintrackError::InUse {
                entity_type: "Pocket",
                identifier: pocket.name,
                reason: "fixed expenses reference it".into(),
            });
        }

        for concept in self.storage.concepts.get_by_pocket(id)? {
            self.storage.concepts.delete(concept.id)?;
            self.storage.log_delete(
                EntityType::Concept,
                concept.id.to_string(),
                Some(concept.name.clone()),
                &concept,
            )?;
        }
        self.storage.concepts.save()?;

        self.storage.pockets.delete(id)?;
        self.storage.pockets.save()?;

        self.storage.log_delete(
            EntityType::Pocket,
            pocket.id.to_string(),
            Some(pocket.name.clone()),
            &pocket,
        )?;

        Ok(pocket)
    }

    fn ensure_unique_name(&self, name: &str, exclude: Option<PocketId>) -> FintrackResult<()> {
        match self.storage.pockets.get_by_name(name)? {
            Some(existing) if Some(existing.id) != exclude => Err(FintrackError::Duplicate {
                entity_type: "Pocket",
                identifier: name.to_string(),
            }),
            _ => Ok(()),
        }
    }
}
