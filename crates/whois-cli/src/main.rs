//! `whois`: print a profile report about a subject.
//!
//! # Usage
//!
//! ```
//! whois Alex --all
//! whois Alex -w -c -f --as Steve
//! whois --as Alex --format json
//! ```
//!
//! Subjects are read from a JSON roster; locale, time zone and requester
//! grants come from `whois.toml` (or `--config`) and `WHOIS_*` variables.

mod roster;
mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use roster::Roster;
use settings::Settings;
use strum::IntoEnumIterator;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use whois_core::{
  AttributeKey, Error, FormatContext, SubjectSnapshot, SubjectSource,
  access::{Requester, authorize_command, authorize_flags, authorize_target},
  assemble_report,
};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "whois", version, about = "Gets info on a user")]
struct Cli {
  /// Subject to inspect, by name or UUID. Defaults to the requester.
  target: Option<String>,

  /// Ask as this subject instead of the console.
  #[arg(long = "as", value_name = "NAME")]
  requester: Option<String>,

  /// Show every field the requester may see.
  #[arg(short, long)]
  all: bool,

  /// Show ban status.
  #[arg(short, long)]
  ban: bool,

  /// Show game mode.
  #[arg(short, long)]
  gamemode: bool,

  /// Show network address.
  #[arg(short, long)]
  ip: bool,

  /// Show when the subject first joined.
  #[arg(short, long)]
  firstjoined: bool,

  /// Show when the subject last joined.
  #[arg(short, long)]
  lastjoined: bool,

  /// Show the current world.
  #[arg(short, long)]
  world: bool,

  /// Show current coordinates.
  #[arg(short, long)]
  coords: bool,

  /// Path to the TOML configuration file.
  #[arg(long, env = "WHOIS_CONFIG", default_value = "whois.toml")]
  config: PathBuf,

  /// Roster file, overriding the configured one.
  #[arg(long, value_name = "FILE")]
  roster: Option<PathBuf>,

  /// Locale for dates, e.g. `en_US` or `de-DE`.
  #[arg(long)]
  locale: Option<String>,

  /// IANA time zone for dates, e.g. `Europe/Berlin`.
  #[arg(long)]
  zone: Option<String>,

  /// Reference instant (RFC 3339) instead of the current time.
  #[arg(long, value_name = "RFC3339")]
  now: Option<DateTime<Utc>>,

  #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
  Text,
  Json,
}

impl Cli {
  /// Whether the switch for `key` was given.
  fn is_set(&self, key: AttributeKey) -> bool {
    match key {
      AttributeKey::GameMode => self.gamemode,
      AttributeKey::World => self.world,
      AttributeKey::Coordinates => self.coords,
      AttributeKey::FirstJoined => self.firstjoined,
      AttributeKey::LastJoined => self.lastjoined,
      AttributeKey::IPAddress => self.ip,
      AttributeKey::BanStatus => self.ban,
    }
  }

  fn requested(&self) -> Vec<AttributeKey> {
    AttributeKey::iter().filter(|key| self.is_set(*key)).collect()
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(cli.config.clone())?;

  let roster_path = cli.roster.clone().unwrap_or_else(|| settings.roster.clone());
  let roster = Roster::load(&roster_path)?;

  // Refuse early, before any lookup can reveal who exists.
  let grants = settings.grants_for(cli.requester.as_deref());
  authorize_command(&grants)?;

  let (requester, requester_snapshot) = match &cli.requester {
    Some(name) => {
      let snapshot = resolve(&roster, name)?;
      (Requester::Subject(snapshot.id), Some(snapshot))
    }
    None => (Requester::Console, None),
  };

  let target_snapshot = cli
    .target
    .as_deref()
    .map(|query| resolve(&roster, query))
    .transpose()?;

  authorize_target(
    requester,
    target_snapshot.as_ref().map(|s| s.id),
    &grants,
  )?;
  let flags = authorize_flags(cli.requested(), cli.all, &grants)?;

  let Some(subject) = target_snapshot.or(requester_snapshot) else {
    return Err(Error::NoTarget.into());
  };

  let locale = cli.locale.as_deref().unwrap_or(&settings.locale);
  let zone = cli.zone.as_deref().unwrap_or(&settings.time_zone);
  let ctx = FormatContext::parse(locale, zone, cli.now.unwrap_or_else(Utc::now))?;

  tracing::info!(
    subject = %subject.name,
    requester = ?requester,
    all = flags.all,
    "assembling report"
  );
  let report = assemble_report(&subject, &flags, &grants, &ctx);

  match cli.format {
    OutputFormat::Text => println!("{report}"),
    OutputFormat::Json => println!(
      "{}",
      serde_json::to_string_pretty(&report).context("serialising report")?
    ),
  }

  Ok(())
}

fn resolve(roster: &Roster, query: &str) -> anyhow::Result<SubjectSnapshot> {
  let found = match roster.resolve(query) {
    Ok(found) => found,
    Err(never) => match never {},
  };
  found.ok_or_else(|| Error::UnknownSubject(query.to_string()).into())
}
