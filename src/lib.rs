//! fintrack - Terminal-based personal finance tracker
//!
//! This library provides the core functionality of the fintrack application:
//! monthly salaries, fixed and hybrid expenses grouped by pocket, daily
//! expenses against a monthly budget, and spending cycles with their
//! expenses.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (pockets, cycles, fixed expenses, etc.)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `reports`: Monthly summary and budget execution
//! - `export`: JSON, YAML and CSV export
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::config::{paths::FintrackPaths, settings::Settings};
//!
//! let paths = FintrackPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FintrackError, FintrackResult};
