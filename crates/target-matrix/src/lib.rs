//! Weighted multi-criteria ranking for § 25A-37 referral-sales litigation targets.
//!
//! The [`matrix`] module holds the scoring core: the fixed criterion catalog, analyst weights,
//! the target store, the pure ranking engine, and the best-effort persistence adapter.

pub mod config;
pub mod error;
pub mod matrix;
pub mod telemetry;
