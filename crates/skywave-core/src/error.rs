//! Error type for `skywave-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A sync row is an array but carries no usable integer key.
  ///
  /// This aborts the whole sync request before any storage access — the
  /// same outcome the storage layer would produce for a NULL key, minus the
  /// round-trip.
  #[error("table {table}: row has no integer key")]
  MissingKey { table: &'static str },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
