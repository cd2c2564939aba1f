//! Concept repository (`concepts.json`)

use crate::error::FintrackResult;
use crate::models::{Concept, ConceptId, Money, PocketId};

use super::table::{Record, Table};

impl Record for Concept {
    type Id = ConceptId;

    fn id(&self) -> ConceptId {
        self.id
    }
}

pub type ConceptRepository = Table<Concept>;

impl Table<Concept> {
    pub fn get_by_pocket(&self, pocket_id: PocketId) -> FintrackResult<Vec<Concept>> {
        self.filter(|c| c.pocket_id == pocket_id)
    }

    /// Sum of concept values in a pocket
    pub fn total_for_pocket(&self, pocket_id: PocketId) -> FintrackResult<Money> {
        Ok(self.get_by_pocket(pocket_id)?.iter().map(|c| c.value).sum())
    }
}
