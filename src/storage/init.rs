//! Storage initialization
//!
//! First-run setup: seeds the default pockets and payment types so the
//! tracker is usable straight away.

use crate::config::paths::FintrackPaths;
use crate::error::FintrackResult;
use crate::models::{PaymentType, Pocket};

use super::Storage;

/// Pockets created on a fresh install, with a short description each
pub const DEFAULT_POCKETS: &[(&str, &str)] = &[
    ("Housing", "Rent, mortgage and utilities"),
    ("Transport", "Fuel, fares and vehicle costs"),
    ("Food", "Groceries and eating out"),
    ("Health", "Insurance, medicine and appointments"),
    ("Education", "Tuition, courses and books"),
    ("Entertainment", "Outings, hobbies and subscriptions"),
];

pub const DEFAULT_PAYMENT_TYPES: &[&str] = &["Cash", "Debit card", "Credit card", "Bank transfer"];

/// Initialize storage for a fresh installation.
///
/// Seeding only happens when the corresponding file doesn't exist yet, so
/// running it again never clobbers user data.
pub fn initialize_storage(paths: &FintrackPaths) -> FintrackResult<()> {
    paths.ensure_directories()?;

    let storage = Storage::new(paths.clone())?;

    if !paths.pockets_file().exists() {
        for (name, description) in DEFAULT_POCKETS {
            let id = storage.pockets.next_id()?;
            storage
                .pockets
                .upsert(Pocket::new(id, *name).with_description(*description))?;
        }
        storage.pockets.save()?;
        tracing::info!(count = DEFAULT_POCKETS.len(), "seeded default pockets");
    }

    if !paths.payment_types_file().exists() {
        for name in DEFAULT_PAYMENT_TYPES {
            let id = storage.payment_types.next_id()?;
            storage
                .payment_types
                .upsert(PaymentType::new(id, *name))?;
        }
        storage.payment_types.save()?;
        tracing::info!(count = DEFAULT_PAYMENT_TYPES.len(), "seeded default payment types");
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &FintrackPaths) -> bool {
    !paths.pockets_file().exists()
}
