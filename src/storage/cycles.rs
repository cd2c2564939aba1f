//! Cycle repository (`cycles.json`)

use crate::error::FintrackResult;
use crate::models::{Cycle, CycleId, PocketId};

use super::table::{Record, Table};

impl Record for Cycle {
    type Id = CycleId;

    fn id(&self) -> CycleId {
        self.id
    }
}

pub type CycleRepository = Table<Cycle>;

impl Table<Cycle> {
    pub fn get_active(&self) -> FintrackResult<Vec<Cycle>> {
        self.filter(|c| c.active)
    }

    pub fn get_by_pocket(&self, pocket_id: PocketId) -> FintrackResult<Vec<Cycle>> {
        self.filter(|c| c.pocket_id == pocket_id)
    }
}
