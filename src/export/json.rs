//! JSON Export functionality
//!
//! Exports every resource to one JSON document with schema versioning.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FintrackError, FintrackResult};
use crate::models::{
    Concept, Cycle, DailyBudget, DailyExpense, Expense, FixedExpense, PaymentType, Pocket, Salary,
};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full database export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Application version that created the export
    pub app_version: String,

    pub salaries: Vec<Salary>,
    pub pockets: Vec<Pocket>,
    pub concepts: Vec<Concept>,
    pub cycles: Vec<Cycle>,
    pub expenses: Vec<Expense>,
    pub payment_types: Vec<PaymentType>,
    /// Hybrid transactions are nested in their expense
    pub fixed_expenses: Vec<FixedExpense>,
    pub daily_expenses: Vec<DailyExpense>,
    pub daily_budgets: Vec<DailyBudget>,

    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub pocket_count: usize,
    pub cycle_count: usize,
    pub expense_count: usize,
    pub fixed_expense_count: usize,
    pub hybrid_transaction_count: usize,
    pub daily_expense_count: usize,
    /// Earliest and latest month with any salary, fixed or daily data
    pub first_month: Option<String>,
    pub last_month: Option<String>,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> FintrackResult<Self> {
        let salaries = storage.income.get_all()?;
        let pockets = storage.pockets.get_all()?;
        let concepts = storage.concepts.get_all()?;
        let cycles = storage.cycles.get_all()?;
        let expenses = storage.expenses.get_all()?;
        let payment_types = storage.payment_types.get_all()?;
        let fixed_expenses = storage.fixed_expenses.get_all()?;
        let daily_expenses = storage.daily_expenses.get_all()?;
        let daily_budgets = storage.daily_expenses.get_all_budgets()?;

        let months: Vec<_> = salaries
            .iter()
            .map(|s| s.month)
            .chain(fixed_expenses.iter().map(|e| e.month))
            .chain(daily_expenses.iter().map(|e| e.month()))
            .chain(daily_budgets.iter().map(|b| b.month))
            .collect();

        let metadata = ExportMetadata {
            pocket_count: pockets.len(),
            cycle_count: cycles.len(),
            expense_count: expenses.len(),
            fixed_expense_count: fixed_expenses.len(),
            hybrid_transaction_count: fixed_expenses.iter().map(|e| e.transactions.len()).sum(),
            daily_expense_count: daily_expenses.len(),
            first_month: months.iter().min().map(|m| m.to_string()),
            last_month: months.iter().max().map(|m| m.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            salaries,
            pockets,
            concepts,
            cycles,
            expenses,
            payment_types,
            fixed_expenses,
            daily_expenses,
            daily_budgets,
            metadata,
        })
    }

    /// Check schema version and references between resources
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let pocket_ids: HashSet<_> = self.pockets.iter().map(|p| p.id).collect();
        let cycle_ids: HashSet<_> = self.cycles.iter().map(|c| c.id).collect();
        let payment_ids: HashSet<_> = self.payment_types.iter().map(|p| p.id).collect();

        for concept in &self.concepts {
            if !pocket_ids.contains(&concept.pocket_id) {
                return Err(format!(
                    "Concept {} references unknown pocket {}",
                    concept.id, concept.pocket_id
                ));
            }
        }

        for cycle in &self.cycles {
            if !pocket_ids.contains(&cycle.pocket_id) {
                return Err(format!(
                    "Cycle {} references unknown pocket {}",
                    cycle.id, cycle.pocket_id
                ));
            }
        }

        for expense in &self.expenses {
            if !cycle_ids.contains(&expense.cycle_id) {
                return Err(format!(
                    "Expense {} references unknown cycle {}",
                    expense.id, expense.cycle_id
                ));
            }
            if !payment_ids.contains(&expense.payment_type_id) {
                return Err(format!(
                    "Expense {} references unknown payment type {}",
                    expense.id, expense.payment_type_id
                ));
            }
        }

        for fixed in &self.fixed_expenses {
            if !pocket_ids.contains(&fixed.pocket_id) {
                return Err(format!(
                    "Fixed expense {} references unknown pocket {}",
                    fixed.id, fixed.pocket_id
                ));
            }
        }

        Ok(())
    }
}

/// Export the full database to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> FintrackResult<()> {
    let export = FullExport::from_storage(storage)?;
    if let Err(problem) = export.validate() {
        tracing::warn!(%problem, "exporting data with dangling references");
    }

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| FintrackError::Export(e.to_string()))?;

    Ok(())
}
