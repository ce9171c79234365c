//! Error types for `whois-core`.
//!
//! Only the requester guard and context parsing are fallible. Field
//! selection, time formatting and report assembly never fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("console must supply a target")]
  NoTarget,

  #[error("permission denied: {0}")]
  PermissionDenied(&'static str),

  #[error("unknown subject: {0:?}")]
  UnknownSubject(String),

  #[error("unknown locale: {0:?}")]
  UnknownLocale(String),

  #[error("unknown time zone: {0:?}")]
  UnknownTimeZone(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
