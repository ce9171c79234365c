//! Decides which optional attributes a report includes.

use std::collections::BTreeSet;

use crate::{attribute::AttributeKey, permission::PermissionCheck};

/// The attributes a requester asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFlags {
  /// Explicitly requested keys.
  pub requested: BTreeSet<AttributeKey>,
  /// Request every key the requester is permitted to see.
  pub all:       bool,
}

impl RequestFlags {
  /// Flags requesting exactly `keys`.
  pub fn of(keys: impl IntoIterator<Item = AttributeKey>) -> Self {
    Self { requested: keys.into_iter().collect(), all: false }
  }

  /// Flags requesting everything.
  pub fn all() -> Self { Self { requested: BTreeSet::new(), all: true } }

  pub fn is_requested(&self, key: AttributeKey) -> bool {
    self.all || self.requested.contains(&key)
  }
}

/// Whether `key` belongs in the report.
///
/// True iff the key is requested (explicitly or through `all`) and the
/// requester holds the key's permission, if it has one. `all` never
/// bypasses a permission; a denied key is dropped silently, exactly like
/// a key with no data. The permission check is only consulted for
/// requested, restricted keys.
pub fn is_enabled(
  key: AttributeKey,
  flags: &RequestFlags,
  permissions: &(impl PermissionCheck + ?Sized),
) -> bool {
  flags.is_requested(key)
    && key
      .required_permission()
      .is_none_or(|permission| permissions.has_permission(permission))
}
