//! The optional report attributes and their declarative field table.
//!
//! [`FIELDS`] is the single source of truth for which optional lines exist,
//! how each is pulled out of a [`SubjectSnapshot`], and the order in which
//! they appear in a report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{
  permission,
  snapshot::{BanLookup, SubjectSnapshot},
};

// ─── Keys ────────────────────────────────────────────────────────────────────

/// One optional field of the report. Variant order is report order.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AttributeKey {
  GameMode,
  World,
  Coordinates,
  FirstJoined,
  LastJoined,
  #[serde(rename = "ip_address")]
  #[strum(serialize = "ip_address")]
  IPAddress,
  BanStatus,
}

/// How an attribute's value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
  /// Rendered directly.
  Text,
  /// Rendered through the relative time formatter.
  Instant,
  /// Rendered as one or more free-standing lines.
  Composite,
}

impl AttributeKey {
  /// The label printed before the value.
  pub fn label(self) -> &'static str {
    match self {
      Self::GameMode => "Game Mode",
      Self::World => "World",
      Self::Coordinates => "Coordinates",
      Self::FirstJoined => "First Joined",
      Self::LastJoined => "Last Joined",
      Self::IPAddress => "IP Address",
      Self::BanStatus => "Ban Status",
    }
  }

  /// The permission a requester needs for this attribute to be shown.
  pub fn required_permission(self) -> Option<&'static str> {
    match self {
      Self::IPAddress => Some(permission::ADDRESS),
      _ => None,
    }
  }

  /// The short command-line switch requesting this attribute.
  pub fn flag(self) -> char {
    match self {
      Self::GameMode => 'g',
      Self::World => 'w',
      Self::Coordinates => 'c',
      Self::FirstJoined => 'f',
      Self::LastJoined => 'l',
      Self::IPAddress => 'i',
      Self::BanStatus => 'b',
    }
  }

  pub fn kind(self) -> ValueKind {
    match self {
      Self::FirstJoined | Self::LastJoined => ValueKind::Instant,
      Self::BanStatus => ValueKind::Composite,
      _ => ValueKind::Text,
    }
  }
}

// ─── Field table ─────────────────────────────────────────────────────────────

/// A value pulled out of a snapshot, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
  Text(String),
  Instant(DateTime<Utc>),
  Ban(&'a BanLookup),
}

/// A row of the field table.
pub struct FieldSpec {
  pub key:     AttributeKey,
  pub extract: for<'a> fn(&'a SubjectSnapshot) -> Option<FieldValue<'a>>,
}

/// Every optional attribute, in report order.
pub const FIELDS: &[FieldSpec] = &[
  FieldSpec {
    key:     AttributeKey::GameMode,
    extract: |s| s.game_mode.clone().map(FieldValue::Text),
  },
  FieldSpec {
    key:     AttributeKey::World,
    extract: |s| s.world.clone().map(FieldValue::Text),
  },
  FieldSpec {
    key:     AttributeKey::Coordinates,
    extract: |s| s.coordinates.map(|c| FieldValue::Text(c.to_string())),
  },
  FieldSpec {
    key:     AttributeKey::FirstJoined,
    extract: |s| s.first_joined.map(FieldValue::Instant),
  },
  FieldSpec {
    key:     AttributeKey::LastJoined,
    extract: |s| s.last_joined.map(FieldValue::Instant),
  },
  FieldSpec {
    key:     AttributeKey::IPAddress,
    extract: |s| s.ip_address.map(|ip| FieldValue::Text(ip.to_string())),
  },
  FieldSpec {
    key:     AttributeKey::BanStatus,
    extract: |s| s.ban.as_ref().map(FieldValue::Ban),
  },
];

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use strum::IntoEnumIterator;
  use uuid::Uuid;

  use super::*;
  use crate::snapshot::Coordinates;

  #[test]
  fn field_table_follows_declared_order() {
    let table: Vec<_> = FIELDS.iter().map(|f| f.key).collect();
    let declared: Vec<_> = AttributeKey::iter().collect();
    assert_eq!(table, declared);
  }

  #[test]
  fn ban_status_is_last() {
    assert_eq!(AttributeKey::iter().last(), Some(AttributeKey::BanStatus));
  }

  #[test]
  fn only_ip_address_is_restricted() {
    let restricted: Vec<_> = AttributeKey::iter()
      .filter(|k| k.required_permission().is_some())
      .collect();
    assert_eq!(restricted, vec![AttributeKey::IPAddress]);
  }

  #[test]
  fn kinds() {
    assert_eq!(AttributeKey::World.kind(), ValueKind::Text);
    assert_eq!(AttributeKey::LastJoined.kind(), ValueKind::Instant);
    assert_eq!(AttributeKey::BanStatus.kind(), ValueKind::Composite);
  }

  #[test]
  fn flags_are_distinct() {
    let flags: std::collections::BTreeSet<_> =
      AttributeKey::iter().map(AttributeKey::flag).collect();
    assert_eq!(flags.len(), AttributeKey::iter().count());
    assert!(!flags.contains(&'a'));
  }

  #[test]
  fn names_round_trip_through_strum() {
    assert_eq!(AttributeKey::IPAddress.to_string(), "ip_address");
    assert_eq!(
      AttributeKey::from_str("first_joined").unwrap(),
      AttributeKey::FirstJoined
    );
  }

  #[test]
  fn extractors_skip_absent_values() {
    let mut snapshot = SubjectSnapshot::new("Alex", Uuid::nil(), false);
    assert!(FIELDS.iter().all(|f| (f.extract)(&snapshot).is_none()));

    snapshot.coordinates = Some(Coordinates { x: 0.5, y: 70.0, z: -0.5 });
    let coords = FIELDS
      .iter()
      .find(|f| f.key == AttributeKey::Coordinates)
      .and_then(|f| (f.extract)(&snapshot));
    assert_eq!(coords, Some(FieldValue::Text("(1, 70, 0)".into())));
  }
}
