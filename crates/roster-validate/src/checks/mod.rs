//! Per-entity field checks.
//!
//! Each module validates one sheet row by row, accumulating every message
//! instead of stopping at the first failure.

pub mod clients;
pub mod tasks;
pub mod workers;
