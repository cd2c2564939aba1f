//! Cycle service
//!
//! Cycles are budgeted date ranges on a pocket. A new cycle without an
//! explicit budget starts with the pocket's planned total.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{Cycle, CycleId, Money, PocketId};
use crate::storage::Storage;

/// Input for creating a cycle
#[derive(Debug, Clone)]
pub struct NewCycle {
    pub pocket_id: PocketId,
    pub name: String,
    /// Falls back to the pocket's projected budget when `None`
    pub budget: Option<Money>,
    pub date_init: NaiveDate,
    pub date_end: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct CycleUpdate {
    pub name: Option<String>,
    pub budget: Option<Money>,
    pub date_init: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    pub active: Option<bool>,
}

pub struct CycleService<'a> {
    storage: &'a Storage,
}

impl<'a> CycleService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn list(&self, include_inactive: bool) -> FintrackResult<Vec<Cycle>> {
        if include_inactive {
            self.storage.cycles.get_all()
        } else {
            self.storage.cycles.get_active()
        }
    }

    pub fn get(&self, id: CycleId) -> FintrackResult<Option<Cycle>> {
        self.storage.cycles.get(id)
    }

    pub fn get_required(&self, id: CycleId) -> FintrackResult<Cycle> {
        self.get(id)?
            .ok_or_else(|| FintrackError::cycle_not_found(id.to_string()))
    }

    /// Planned budget for a new cycle on `pocket_id`
    pub fn projected_budget(&self, pocket_id: PocketId) -> FintrackResult<Money> {
        self.storage.concepts.total_for_pocket(pocket_id)
    }

    pub fn create(&self, input: NewCycle) -> FintrackResult<Cycle> {
        if self.storage.pockets.get(input.pocket_id)?.is_none() {
            return Err(FintrackError::pocket_not_found(input.pocket_id.to_string()));
        }

        let budget = match input.budget {
            Some(budget) => budget,
            None => self.projected_budget(input.pocket_id)?,
        };

        let id = self.storage.cycles.next_id()?;
        let cycle = Cycle::new(
            id,
            input.pocket_id,
            input.name.trim(),
            budget,
            input.date_init,
            input.date_end,
        );
        cycle
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.storage.cycles.upsert(cycle.clone())?;
        self.storage.cycles.save()?;

        self.storage.log_create(
            EntityType::Cycle,
            cycle.id.to_string(),
            Some(cycle.name.clone()),
            &cycle,
        )?;

        Ok(cycle)
    }

    pub fn update(&self, id: CycleId, changes: CycleUpdate) -> FintrackResult<Cycle> {
        let mut cycle = self.get_required(id)?;
        let before = cycle.clone();

        if let Some(name) = changes.name {
            cycle.name = name.trim().to_string();
        }
        if let Some(budget) = changes.budget {
            cycle.budget = budget;
        }
        if let Some(date_init) = changes.date_init {
            cycle.date_init = date_init;
        }
        if let Some(date_end) = changes.date_end {
            cycle.date_end = date_end;
        }
        if let Some(active) = changes.active {
            cycle.active = active;
        }
        cycle.touch();

        cycle
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.storage.cycles.upsert(cycle.clone())?;
        self.storage.cycles.save()?;

        self.storage.log_update(
            EntityType::Cycle,
            cycle.id.to_string(),
            Some(cycle.name.clone()),
            &before,
            &cycle,
        )?;

        Ok(cycle)
    }

    /// Delete a cycle that has no expenses recorded against it
    pub fn delete(&self, id: CycleId) -> FintrackResult<Cycle> {
        let cycle = self.get_required(id)?;

        let expense_count = self.storage.expenses.get_by_cycle(id)?.len();
        if expense_count > 0 {
            return Err(FintrackError::InUse {
                entity_type: "Cycle",
                identifier: cycle.name,
                reason: format!("{} expense(s) recorded against it", expense_count),
            });
        }

        self.storage.cycles.delete(id)?;
        self.storage.cycles.save()?;

        self.storage.log_delete(
            EntityType::Cycle,
            cycle.id.to_string(),
            Some(cycle.name.clone()),
            &cycle,
        )?;

        Ok(cycle)
    }
}
