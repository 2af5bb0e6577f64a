//! Error types for `lede-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown lead status: {0:?}")]
  UnknownStatus(String),

  #[error("unknown lead source: {0:?}")]
  UnknownSource(String),

  #[error("unknown sort key: {0:?}")]
  UnknownSortKey(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
