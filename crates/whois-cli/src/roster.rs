//! A JSON file of subject snapshots, standing in for a live session
//! registry.

use std::{convert::Infallible, path::Path};

use anyhow::Context as _;
use whois_core::{SubjectSnapshot, SubjectSource};

pub struct Roster {
  subjects: Vec<SubjectSnapshot>,
}

impl Roster {
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading roster {}", path.display()))?;
    let roster = Self::from_json(&raw)
      .with_context(|| format!("parsing roster {}", path.display()))?;
    tracing::debug!(subjects = roster.subjects.len(), path = %path.display(), "roster loaded");
    Ok(roster)
  }

  pub fn from_json(raw: &str) -> serde_json::Result<Self> {
    Ok(Self { subjects: serde_json::from_str(raw)? })
  }
}

impl SubjectSource for Roster {
  type Error = Infallible;

  fn resolve(&self, query: &str) -> Result<Option<SubjectSnapshot>, Self::Error> {
    Ok(self.subjects.iter().find(|s| s.matches(query)).cloned())
  }
}
