//! Concept service

use crate::audit::EntityType;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{Concept, ConceptId, Money, PocketId};
use crate::storage::Storage;

pub struct ConceptService<'a> {
    storage: &'a Storage,
}

impl<'a> ConceptService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn list_by_pocket(&self, pocket_id: PocketId) -> FintrackResult<Vec<Concept>> {
        self.storage.concepts.get_by_pocket(pocket_id)
    }

    pub fn list(&self) -> FintrackResult<Vec<Concept>> {
        self.storage.concepts.get_all()
    }

    pub fn get(&self, id: ConceptId) -> FintrackResult<Option<Concept>> {
        self.storage.concepts.get(id)
    }

    pub fn create(&self, pocket_id: PocketId, name: &str, value: Money) -> FintrackResult<Concept> {
        if self.storage.pockets.get(pocket_id)?.is_none() {
            return Err(FintrackError::pocket_not_found(pocket_id.to_string()));
        }

        let id = self.storage.concepts.next_id()?;
        let concept = Concept::new(id, pocket_id, name.trim(), value);
        concept
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.storage.concepts.upsert(concept.clone())?;
        self.storage.concepts.save()?;

        self.storage.log_create(
            EntityType::Concept,
            concept.id.to_string(),
            Some(concept.name.clone()),
            &concept,
        )?;

        Ok(concept)
    }

    pub fn update(
        &self,
        id: ConceptId,
        name: Option<&str>,
        value: Option<Money>,
    ) -> FintrackResult<Concept> {
        self.modify(id, |concept| {
            if let Some(name) = name {
                concept.name = name.trim().to_string();
            }
            if let Some(value) = value {
                concept.value = value;
            }
        })
    }

    pub fn set_paid(&self, id: ConceptId, paid: bool) -> FintrackResult<Concept> {
        self.modify(id, |concept| concept.set_paid(paid))
    }

    pub fn delete(&self, id: ConceptId) -> FintrackResult<Concept> {
        let concept = self
            .storage
            .concepts
            .delete(id)?
            .ok_or_else(|| FintrackError::concept_not_found(id.to_string()))?;
        self.storage.concepts.save()?;

        self.storage.log_delete(
            EntityType::Concept,
            concept.id.to_string(),
            Some(concept.name.clone()),
            &concept,
        )?;

        Ok(concept)
    }

    fn modify<F>(&self, id: ConceptId, change: F) -> FintrackResult<Concept>
    where
        F: FnOnce(&mut Concept),
    {
        let mut concept = self
            .storage
            .concepts
            .get(id)?
            .ok_or_else(|| FintrackError::concept_not_found(id.to_string()))?;
        let before = concept.clone();

        change(&mut concept);
        concept.updated_at = chrono::Utc::now();
        concept
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.storage.concepts.upsert(concept.clone())?;
        self.storage.concepts.save()?;

        self.storage.log_update(
            EntityType::Concept,
            concept.id.to_string(),
            Some(concept.name.clone()),
            &before,
            &concept,
        )?;

        Ok(concept)
    }
}
