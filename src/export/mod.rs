//! Export module for VyapaarTrack
//!
//! Writes the filtered report set as a spreadsheet-compatible CSV file.

pub mod csv;

pub use csv::{export_expenses_csv, export_filename, write_expenses_csv, CSV_HEADER};
