//! Relative time formatting.
//!
//! An instant is rendered as a localized absolute date-time followed by a
//! bucketed phrase relative to an explicit `now`, e.g.
//! `05.01.2024 16:04:05 (3 hours ago)`.
//!
//! Buckets are checked from smallest to largest so exactly one matches.
//! Seconds through days use plain duration arithmetic; months and years use
//! calendar dates, since months vary in length.

use std::fmt;

use chrono::{DateTime, Datelike, Locale, NaiveDate, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use strum::Display;

use crate::{Error, Result};

/// Medium-length locale date followed by locale time.
const MEDIUM_PATTERN: &str = "%x %X";

// ─── Context ─────────────────────────────────────────────────────────────────

/// Everything needed to render an instant for one requester.
#[derive(Debug, Clone, Copy)]
pub struct FormatContext {
  pub locale: Locale,
  pub zone:   Tz,
  pub now:    DateTime<Utc>,
}

impl FormatContext {
  pub fn new(locale: Locale, zone: Tz, now: DateTime<Utc>) -> Self {
    Self { locale, zone, now }
  }

  /// Build a context from a locale name (`en_US` or `en-US`) and an IANA
  /// zone name.
  pub fn parse(locale: &str, zone: &str, now: DateTime<Utc>) -> Result<Self> {
    let locale_name = locale.replace('-', "_");
    let parsed_locale = Locale::try_from(locale_name.as_str())
      .map_err(|_| Error::UnknownLocale(locale.to_string()))?;
    let parsed_zone = zone
      .parse::<Tz>()
      .map_err(|_| Error::UnknownTimeZone(zone.to_string()))?;
    Ok(Self::new(parsed_locale, parsed_zone, now))
  }

  /// Render `instant` relative to this context's `now`.
  pub fn format(&self, instant: DateTime<Utc>) -> RelativeTimeResult {
    format(instant, self.locale, self.zone, self.now)
  }
}

// ─── Relative phrase ─────────────────────────────────────────────────────────

/// The unit a magnitude is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Unit {
  Seconds,
  Minutes,
  Hours,
  Days,
  Months,
  Years,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
  Past,
  Future,
}

/// A bucketed distance between an instant and `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeTime {
  /// Less than one second either way.
  Now,
  Elapsed {
    amount:    i64,
    unit:      Unit,
    direction: Direction,
  },
}

impl fmt::Display for RelativeTime {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Now => f.write_str("(Now)"),
      Self::Elapsed { amount, unit, direction } => {
        let wording = match direction {
          Direction::Past => "ago",
          Direction::Future => "from now",
        };
        write!(f, "({amount} {unit} {wording})")
      }
    }
  }
}

/// An absolute timestamp and its relative phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeTimeResult {
  pub absolute: String,
  pub relative: RelativeTime,
}

impl fmt::Display for RelativeTimeResult {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.absolute, self.relative)
  }
}

// ─── Formatting ──────────────────────────────────────────────────────────────

/// Render `instant` in `locale` and `zone`, annotated relative to `now`.
pub fn format(
  instant: DateTime<Utc>,
  locale: Locale,
  zone: Tz,
  now: DateTime<Utc>,
) -> RelativeTimeResult {
  let absolute = instant
    .with_timezone(&zone)
    .format_localized(MEDIUM_PATTERN, locale)
    .to_string();
  RelativeTimeResult { absolute, relative: relative_time(instant, now, zone) }
}

/// Classify the distance between `instant` and `now` into one bucket.
///
/// Calendar months are counted on the dates of both instants as seen in
/// `zone`.
pub fn relative_time(
  instant: DateTime<Utc>,
  now: DateTime<Utc>,
  zone: Tz,
) -> RelativeTime {
  let delta = now.signed_duration_since(instant);
  let magnitude = delta.abs();

  if magnitude < TimeDelta::seconds(1) {
    return RelativeTime::Now;
  }

  let direction = if instant < now { Direction::Past } else { Direction::Future };
  let (amount, unit) = if magnitude.num_seconds() < 60 {
    (magnitude.num_seconds(), Unit::Seconds)
  } else if magnitude.num_minutes() < 60 {
    (magnitude.num_minutes(), Unit::Minutes)
  } else if magnitude.num_hours() < 24 {
    (magnitude.num_hours(), Unit::Hours)
  } else if magnitude.num_days() < 365 {
    (magnitude.num_days(), Unit::Days)
  } else {
    let (earlier, later) = match direction {
      Direction::Past => (instant, now),
      Direction::Future => (now, instant),
    };
    let months = months_between(local_date(earlier, zone), local_date(later, zone));
    if months < 12 { (months, Unit::Months) } else { (months / 12, Unit::Years) }
  };

  RelativeTime::Elapsed { amount, unit, direction }
}

/// The calendar date of `instant` in `zone`. Near the ends of the
/// representable range the shifted local time may not exist; the UTC date
/// stands in for it.
fn local_date(instant: DateTime<Utc>, zone: Tz) -> NaiveDate {
  let utc = instant.naive_utc();
  let offset = zone.offset_from_utc_datetime(&utc).fix();
  utc.checked_add_offset(offset).unwrap_or(utc).date()
}

/// Whole calendar months from `earlier` to `later`; a month only counts
/// once its day-of-month has been reached.
fn months_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
  let proleptic = |d: NaiveDate| i64::from(d.year()) * 12 + i64::from(d.month0());
  let months = proleptic(later) - proleptic(earlier);
  if months > 0 && later.day() < earlier.day() { months - 1 } else { months }
}
