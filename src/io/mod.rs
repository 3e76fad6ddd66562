//! I/O helpers for exporting records and simulation data.

pub mod csv;

pub use self::csv::*;
