//! Expense repository (`expenses.json`)

use crate::error::FintrackResult;
use crate::models::{CycleId, Expense, ExpenseId};

use super::table::{Record, Table};

impl Record for Expense {
    type Id = ExpenseId;

    fn id(&self) -> ExpenseId {
        self.id
    }
}

pub type ExpenseRepository = Table<Expense>;

fn newest_first(mut expenses: Vec<Expense>) -> Vec<Expense> {
    expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    expenses
}

impl Table<Expense> {
    pub fn get_newest_first(&self) -> FintrackResult<Vec<Expense>> {
        Ok(newest_first(self.get_all()?))
    }

    pub fn get_by_cycle(&self, cycle_id: CycleId) -> FintrackResult<Vec<Expense>> {
        Ok(newest_first(self.filter(|e| e.cycle_id == cycle_id)?))
    }
}
