//! Runtime settings, layered from an optional TOML file and `WHOIS_*`
//! environment variables.

use std::{collections::HashMap, path::PathBuf};

use anyhow::Context as _;
use serde::Deserialize;
use whois_core::GrantSet;

/// Key under `[permissions]` holding the console's grants.
pub const CONSOLE: &str = "console";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// JSON file holding the subject roster.
  pub roster:      PathBuf,
  pub locale:      String,
  pub time_zone:   String,
  /// Grants per requester name. The console holds every permission unless
  /// a `console` entry says otherwise.
  pub permissions: HashMap<String, GrantSet>,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      roster:      PathBuf::from("roster.json"),
      locale:      "en_US".to_string(),
      time_zone:   "UTC".to_string(),
      permissions: HashMap::new(),
    }
  }
}

impl Settings {
  pub fn load(path: PathBuf) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("WHOIS"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise Settings")
  }

  /// Grants held by the named requester, or by the console for `None`.
  pub fn grants_for(&self, requester: Option<&str>) -> GrantSet {
    let key = requester.unwrap_or(CONSOLE).to_lowercase();
    match self.permissions.get(&key) {
      Some(grants) => grants.clone(),
      None if requester.is_none() => GrantSet::everything(),
      None => GrantSet::default(),
    }
  }
}
