//! Service layer for VyapaarTrack
//!
//! Services sit on top of the storage layer and own validation, status
//! transitions, session checks and receipt classification.

pub mod classify;
pub mod ingest;
pub mod ledger;
pub mod session;
pub mod taxonomy;

pub use classify::{
    classifier_from_settings, ClassificationSuggestion, CommandClassifier, DemoClassifier,
    ReceiptClassifier, ReceiptImage,
};
pub use ingest::simulate_forwarded_expense;
pub use ledger::{BulkOutcome, ExpenseLedger};
pub use session::{SessionContext, View};
pub use taxonomy::{TaxonomyKind, TaxonomyService};
