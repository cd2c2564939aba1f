//! Service layer for fintrack
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, computed fields, cross-entity checks and audit
//! logging.

pub mod concept;
pub mod cycle;
pub mod daily_expense;
pub mod expense;
pub mod fixed_expense;
pub mod hybrid;
pub mod income;
pub mod payment_type;
pub mod pocket;

pub use concept::ConceptService;
pub use cycle::CycleService;
pub use daily_expense::DailyExpenseService;
pub use expense::ExpenseService;
pub use fixed_expense::FixedExpenseService;
pub use hybrid::HybridTransactionService;
pub use income::IncomeService;
pub use payment_type::PaymentTypeService;
pub use pocket::PocketService;

#[cfg(test)]
pub(crate) fn test_storage() -> (tempfile::TempDir, crate::storage::Storage) {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let paths = crate::config::FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
    let mut storage = crate::storage::Storage::new(paths).unwrap();
    storage.load_all().unwrap();
    (temp_dir, storage)
}
