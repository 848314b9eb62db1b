//! VyapaarTrack - expense tracking and review for small businesses
//!
//! Staff submit expenses (optionally pre-filled from a receipt image), an
//! accountant reviews them one at a time or in bulk, and reports summarise
//! the approved spend and export it as CSV.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Expenses, money, users and the persisted document
//! - `storage`: Key-value store holding the document and the session
//! - `services`: Expense lifecycle, taxonomy, session and classification
//! - `reports`: Dashboard, review queue and filtered report projections
//! - `export`: CSV export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use vyapaar_track::config::paths::VyapaarPaths;
//! use vyapaar_track::services::ExpenseLedger;
//! use vyapaar_track::storage::Storage;
//!
//! let storage = Storage::new(VyapaarPaths::new()?)?;
//! let ledger = ExpenseLedger::open(&storage)?;
//! println!("{} expenses", ledger.expenses().len());
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::VyapaarError;
