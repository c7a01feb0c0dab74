//! Core types for the Skywave radio-monitoring sync service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! It defines the syncable-table registry, the positional row codec, the
//! sync-batch/report types, the read-side query and view types, and the
//! [`store::MonitorStore`] trait that storage backends implement.

pub mod error;
pub mod query;
pub mod record;
pub mod store;
pub mod sync;
pub mod table;
pub mod time;
pub mod view;

pub use error::{Error, Result};
