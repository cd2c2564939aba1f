//! Storage layer for fintrack
//!
//! One JSON document per resource under the data directory, written
//! atomically. The `Storage` coordinator owns every repository plus the audit
//! logger.

pub mod concepts;
pub mod cycles;
pub mod daily_expenses;
pub mod expenses;
pub mod file_io;
pub mod fixed_expenses;
pub mod income;
pub mod init;
pub mod payment_types;
pub mod pockets;
pub mod table;

pub use concepts::ConceptRepository;
pub use cycles::CycleRepository;
pub use daily_expenses::DailyExpenseRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use fixed_expenses::FixedExpenseRepository;
pub use income::IncomeRepository;
pub use init::initialize_storage;
pub use payment_types::PaymentTypeRepository;
pub use pockets::PocketRepository;
pub use table::{Record, Table};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::FintrackPaths;
use crate::error::FintrackResult;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FintrackPaths,
    pub pockets: PocketRepository,
    pub concepts: ConceptRepository,
    pub cycles: CycleRepository,
    pub expenses: ExpenseRepository,
    pub payment_types: PaymentTypeRepository,
    pub fixed_expenses: FixedExpenseRepository,
    pub daily_expenses: DailyExpenseRepository,
    pub income: IncomeRepository,
    audit: AuditLogger,
}

impl Storage {
    pub fn new(paths: FintrackPaths) -> FintrackResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            pockets: PocketRepository::new(paths.pockets_file()),
            concepts: ConceptRepository::new(paths.concepts_file()),
            cycles: CycleRepository::new(paths.cycles_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            payment_types: PaymentTypeRepository::new(paths.payment_types_file()),
            fixed_expenses: FixedExpenseRepository::new(paths.fixed_expenses_file()),
            daily_expenses: DailyExpenseRepository::new(paths.daily_expenses_file()),
            income: IncomeRepository::new(paths.income_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &FintrackPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> FintrackResult<()> {
        self.pockets.load()?;
        self.concepts.load()?;
        self.cycles.load()?;
        self.expenses.load()?;
        self.payment_types.load()?;
        self.fixed_expenses.load()?;
        self.daily_expenses.load()?;
        self.income.load()?;
        tracing::debug!(data_dir = %self.paths.data_dir().display(), "storage loaded");
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> FintrackResult<()> {
        self.pockets.save()?;
        self.concepts.save()?;
        self.cycles.save()?;
        self.expenses.save()?;
        self.payment_types.save()?;
        self.fixed_expenses.save()?;
        self.daily_expenses.save()?;
        self.income.save()?;
        Ok(())
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> FintrackResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> FintrackResult<()> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> FintrackResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}
