//! Core types and pure functions for the `whois` profile report.
//!
//! This crate performs no I/O. Subject data arrives already resolved as a
//! [`SubjectSnapshot`]; permissions arrive as an injected
//! [`PermissionCheck`] capability. The output is an ordered [`Report`].

pub mod access;
pub mod attribute;
pub mod error;
pub mod permission;
pub mod relative;
pub mod report;
pub mod select;
pub mod snapshot;

pub use attribute::{AttributeKey, ValueKind};
pub use error::{Error, Result};
pub use permission::{GrantSet, PermissionCheck};
pub use relative::{FormatContext, RelativeTime, RelativeTimeResult};
pub use report::{Report, ReportLine, assemble_report};
pub use select::{RequestFlags, is_enabled};
pub use snapshot::{BanLookup, BanRecord, Coordinates, SubjectSnapshot, SubjectSource};
