//! Reporting and analysis toolkit for the university's course-transfer rules.
//!
//! The library half of this crate is a set of pure, deterministic functions:
//! composing a natural-language description of a transfer rule and deciding
//! which academic department should be responsible for reviewing it. The
//! binary half is a batch driver that feeds those functions from catalog
//! snapshots and writes the results to reports.

pub mod config;
pub mod error;
pub mod review;
pub mod snapshot;
pub mod telemetry;
