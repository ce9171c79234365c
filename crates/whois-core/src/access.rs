//! Requester checks that run before a report is assembled.
//!
//! These are the only places a report request can be refused. Once a
//! target and a set of [`RequestFlags`] have been authorised, assembly
//! itself cannot fail.

use uuid::Uuid;

use crate::{
  Error,
  Result,
  attribute::AttributeKey,
  permission::{self, PermissionCheck},
  select::RequestFlags,
};

/// Who is asking for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requester {
  /// A non-interactive source with no identity of its own.
  Console,
  /// A subject asking, possibly about itself.
  Subject(Uuid),
}

/// Whether the requester may run the command at all. Checked before any
/// subject is looked up, so a refused requester learns nothing about which
/// subjects exist.
pub fn authorize_command(permissions: &(impl PermissionCheck + ?Sized)) -> Result<()> {
  if !permissions.has_permission(permission::COMMAND) {
    return Err(Error::PermissionDenied(permission::COMMAND));
  }
  Ok(())
}

/// Decide which subject the report is about.
///
/// Without an explicit target a subject inspects itself; the console must
/// always name one. Inspecting anyone else requires `whois.other`.
pub fn authorize_target(
  requester: Requester,
  target: Option<Uuid>,
  permissions: &(impl PermissionCheck + ?Sized),
) -> Result<Uuid> {
  authorize_command(permissions)?;

  let target = match (target, requester) {
    (Some(target), _) => target,
    (None, Requester::Subject(own)) => own,
    (None, Requester::Console) => return Err(Error::NoTarget),
  };

  if requester != Requester::Subject(target)
    && !permissions.has_permission(permission::OTHER)
  {
    return Err(Error::PermissionDenied(permission::OTHER));
  }

  Ok(target)
}

/// Build [`RequestFlags`] from what the requester typed.
///
/// The show-all switch is itself permission-gated. Individually requested
/// keys are never refused here; restricted ones are dropped later by
/// [`crate::select::is_enabled`].
pub fn authorize_flags(
  requested: impl IntoIterator<Item = AttributeKey>,
  all: bool,
  permissions: &(impl PermissionCheck + ?Sized),
) -> Result<RequestFlags> {
  if all && !permissions.has_permission(permission::ALL) {
    return Err(Error::PermissionDenied(permission::ALL));
  }
  Ok(RequestFlags { requested: requested.into_iter().collect(), all })
}
