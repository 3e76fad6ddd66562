#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Fixed tables and engine constants.
pub mod constants;
/// Engineering-notation parsing and formatting.
pub mod units;
/// Shared numerical utilities and state types.
pub mod math;
/// Standard values, color codes, DC tools and gain design.
pub mod circuits;
/// Time-domain transient simulation.
pub mod simulation;
/// Text strip-chart rendering of traces.
pub mod plot;
/// Bounded calculation records and the append-only log.
pub mod history;
/// Caller-held workbench defaults and per-tool session calls.
pub mod session;
/// CSV export of records and traces.
pub mod io;
/// Error types shared between submodules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
