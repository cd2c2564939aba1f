//! Strongly-typed ID wrappers for all entity types
//!
//! IDs are numeric and assigned by the store on creation. Using newtype
//! wrappers prevents accidentally mixing up IDs from different entity types
//! at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            pub const fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            /// Accepts "7" as well as the display form "pkt-7"
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(PocketId, "pkt-");
define_id!(ConceptId, "con-");
define_id!(CycleId, "cyc-");
define_id!(ExpenseId, "exp-");
define_id!(PaymentTypeId, "pay-");
define_id!(FixedExpenseId, "fix-");
define_id!(HybridTransactionId, "htx-");
define_id!(DailyExpenseId, "day-");
