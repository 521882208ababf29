//! Domain layer for the series tracker.
//!
//! Holds the error taxonomy, input normalization for every inbound payload,
//! and the lock-guarded in-memory series catalog. Nothing here touches the
//! network or the database.

pub mod account;
pub mod error;
pub mod series;
pub mod series_store;
pub mod types;
pub mod watched;
