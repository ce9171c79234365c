//! Permission capability and permission nodes.
//!
//! Permission checks are injected rather than looked up from a global
//! service, so every consumer can be exercised with a plain closure.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// ─── Nodes ───────────────────────────────────────────────────────────────────

/// Run the command at all.
pub const COMMAND: &str = "whois.command";
/// Inspect a subject other than oneself.
pub const OTHER: &str = "whois.other";
/// Use the show-all switch.
pub const ALL: &str = "whois.all";
/// See a subject's network address.
pub const ADDRESS: &str = "whois.address";

// ─── Capability ──────────────────────────────────────────────────────────────

/// Answers whether the requester holds a named permission.
pub trait PermissionCheck {
  fn has_permission(&self, permission: &str) -> bool;
}

impl<F> PermissionCheck for F
where
  F: Fn(&str) -> bool,
{
  fn has_permission(&self, permission: &str) -> bool { self(permission) }
}

// ─── Grant sets ──────────────────────────────────────────────────────────────

/// A set of granted permission nodes.
///
/// A grant covers a permission when it is `*`, equal to it, or a dotted
/// ancestor of it: `whois` covers `whois.address`, `who` does not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantSet(BTreeSet<String>);

impl GrantSet {
  /// A grant set holding every permission.
  pub fn everything() -> Self { Self::from_iter(["*"]) }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  fn covers(grant: &str, permission: &str) -> bool {
    grant == "*"
      || grant == permission
      || permission
        .strip_prefix(grant)
        .is_some_and(|rest| rest.starts_with('.'))
  }
}

impl<S: Into<String>> FromIterator<S> for GrantSet {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    Self(iter.into_iter().map(Into::into).collect())
  }
}

impl PermissionCheck for GrantSet {
  fn has_permission(&self, permission: &str) -> bool {
    self.0.iter().any(|grant| Self::covers(grant, permission))
  }
}
