//! Subject snapshots: the resolved, possibly partial attribute bag.
//!
//! Snapshots are produced by a [`SubjectSource`] and consumed read-only by
//! the report assembler. A `None` field means "not available for this
//! subject"; an offline subject typically has no live game mode, world,
//! coordinates or address.

use std::{fmt, net::IpAddr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Location ────────────────────────────────────────────────────────────────

/// A position in the subject's world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
  pub x: f64,
  pub y: f64,
  pub z: f64,
}

/// Renders as block coordinates, each component rounded up.
impl fmt::Display for Coordinates {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "({}, {}, {})",
      self.x.ceil() as i64,
      self.y.ceil() as i64,
      self.z.ceil() as i64
    )
  }
}

// ─── Bans ────────────────────────────────────────────────────────────────────

/// A ban entry as reported by the ban service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanRecord {
  /// Who issued the ban, if recorded.
  pub source:  Option<String>,
  pub reason:  Option<String>,
  pub created: DateTime<Utc>,
  /// `None` for a permanent ban.
  pub expires: Option<DateTime<Utc>>,
}

/// Answer from an available ban service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BanLookup {
  NotBanned,
  Banned(BanRecord),
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// Everything known about a subject at invocation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectSnapshot {
  pub name:         String,
  pub id:           Uuid,
  #[serde(default)]
  pub online:       bool,
  #[serde(default)]
  pub game_mode:    Option<String>,
  #[serde(default)]
  pub world:        Option<String>,
  #[serde(default)]
  pub coordinates:  Option<Coordinates>,
  #[serde(default)]
  pub first_joined: Option<DateTime<Utc>>,
  #[serde(default)]
  pub last_joined:  Option<DateTime<Utc>>,
  #[serde(default)]
  pub ip_address:   Option<IpAddr>,
  /// `None` when no ban service is available.
  #[serde(default)]
  pub ban:          Option<BanLookup>,
}

impl SubjectSnapshot {
  /// A snapshot carrying only the mandatory identity attributes.
  pub fn new(name: impl Into<String>, id: Uuid, online: bool) -> Self {
    Self {
      name: name.into(),
      id,
      online,
      game_mode: None,
      world: None,
      coordinates: None,
      first_joined: None,
      last_joined: None,
      ip_address: None,
      ban: None,
    }
  }

  /// Whether `query` names this subject, either by UUID or by
  /// case-insensitive name.
  pub fn matches(&self, query: &str) -> bool {
    match Uuid::parse_str(query) {
      Ok(id) => id == self.id,
      Err(_) => self.name.eq_ignore_ascii_case(query),
    }
  }
}

// ─── Source ──────────────────────────────────────────────────────────────────

/// Abstraction over whatever resolves subjects (a session registry, a
/// roster file, a remote lookup).
///
/// Implementations may block; the report core never does.
pub trait SubjectSource {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Resolve a subject by name or UUID. Returns `None` if unknown.
  fn resolve(&self, query: &str) -> Result<Option<SubjectSnapshot>, Self::Error>;
}
