//! Report assembly from a snapshot, request flags and permissions.
//!
//! A report always starts with the header and the three identity lines.
//! Optional lines follow in [`FIELDS`] order; a field that is not enabled,
//! or has no value, contributes nothing.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::{
  attribute::{FIELDS, FieldValue},
  permission::PermissionCheck,
  relative::FormatContext,
  select::{RequestFlags, is_enabled},
  snapshot::{BanLookup, BanRecord, SubjectSnapshot},
};

pub const HEADER: &str = "--------WHOIS--------";

// ─── Lines ───────────────────────────────────────────────────────────────────

/// One rendered line. Unlabeled lines (header, ban status) print bare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub label: Option<&'static str>,
  pub value: String,
}

impl ReportLine {
  pub fn labeled(label: &'static str, value: impl Into<String>) -> Self {
    Self { label: Some(label), value: value.into() }
  }

  pub fn bare(value: impl Into<String>) -> Self {
    Self { label: None, value: value.into() }
  }
}

impl fmt::Display for ReportLine {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.label {
      Some(label) => write!(f, "{label}: {}", self.value),
      None => f.write_str(&self.value),
    }
  }
}

/// The ordered output of [`assemble_report`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Report {
  pub lines: Vec<ReportLine>,
}

impl Report {
  pub fn iter(&self) -> impl Iterator<Item = &ReportLine> { self.lines.iter() }

  pub fn len(&self) -> usize { self.lines.len() }

  pub fn is_empty(&self) -> bool { self.lines.is_empty() }
}

impl fmt::Display for Report {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, line) in self.lines.iter().enumerate() {
      if i > 0 {
        f.write_str("\n")?;
      }
      write!(f, "{line}")?;
    }
    Ok(())
  }
}

// ─── Assembly ────────────────────────────────────────────────────────────────

/// Build the report for `snapshot` as seen by a requester holding
/// `permissions`.
pub fn assemble_report(
  snapshot: &SubjectSnapshot,
  flags: &RequestFlags,
  permissions: &(impl PermissionCheck + ?Sized),
  ctx: &FormatContext,
) -> Report {
  let mut lines = vec![
    ReportLine::bare(HEADER),
    ReportLine::labeled("Name", snapshot.name.clone()),
    ReportLine::labeled("UUID", snapshot.id.to_string()),
    ReportLine::labeled("Status", if snapshot.online { "ONLINE" } else { "OFFLINE" }),
  ];

  for field in FIELDS {
    if !is_enabled(field.key, flags, permissions) {
      debug!(key = %field.key, "field not enabled");
      continue;
    }
    let Some(value) = (field.extract)(snapshot) else {
      debug!(key = %field.key, "field has no value");
      continue;
    };

    let label = field.key.label();
    match value {
      FieldValue::Text(text) => lines.push(ReportLine::labeled(label, text)),
      FieldValue::Instant(instant) => {
        lines.push(ReportLine::labeled(label, ctx.format(instant).to_string()))
      }
      FieldValue::Ban(lookup) => lines.extend(ban_lines(lookup, ctx)),
    }
  }

  Report { lines }
}

fn ban_lines(lookup: &BanLookup, ctx: &FormatContext) -> Vec<ReportLine> {
  match lookup {
    BanLookup::NotBanned => vec![ReportLine::bare("User is not banned.")],
    BanLookup::Banned(record) => {
      vec![ReportLine::bare(ban_summary(record)), ReportLine::bare(ban_period(record, ctx))]
    }
  }
}

fn ban_summary(record: &BanRecord) -> String {
  let mut summary = String::from("User is banned");
  if let Some(source) = &record.source {
    summary.push_str(&format!(" by {source}"));
  }
  if let Some(reason) = &record.reason {
    summary.push_str(&format!(" ({reason})"));
  }
  summary
}

fn ban_period(record: &BanRecord, ctx: &FormatContext) -> String {
  let until = match record.expires {
    Some(expires) => ctx.format(expires).to_string(),
    None => "forever".to_string(),
  };
  format!("Banned since {} until {until}", ctx.format(record.created))
}
