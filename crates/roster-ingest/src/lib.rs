//! Sheet import and export.
//!
//! Reads the clients, workers and tasks sheets from a folder of CSV files
//! (or a workbook JSON document) into [`roster_model::Workbook`] rows,
//! coercing declared columns to their schema types, and writes datasets
//! back out.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use roster_ingest::{load_workbook_dir, write_sheet_csv};
//!
//! let workbook = load_workbook_dir(Path::new("data/roster"))?;
//! ```

mod discovery;
mod error;
mod sheet;
mod workbook_io;

// === Error Types ===
pub use error::{IngestError, Result};

// === Discovery ===
pub use discovery::{SheetFiles, classify_sheet, discover_sheets, list_csv_files};

// === Sheet Reading ===
pub use sheet::{coerce_cell, load_workbook_dir, read_sheet};

// === Workbook Documents ===
pub use workbook_io::{export_cell, load_workbook_json, write_sheet_csv, write_workbook_json};
