// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Turn --month / --for / --since+--until into labeled, day-granular [since, until) ranges
// role: cli/windows
// inputs: WindowSpec; optional "now" override for deterministic tests
// outputs: Vec<LabeledRange> with canonical YYYY-MM-DD bounds (explicit --since/--until pass through)
// invariants:
// - Ranges are half-open and listed earliest first
// - Bucket phrases ("every month for the last N months") yield one range per bucket
// errors: Unparseable months and phrases bail with the offending flag named
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Datelike, Days, Local, Months, NaiveDate, NaiveDateTime, Timelike};
use chrono_english::{parse_duration, Interval};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::dates::normalize;

#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum WindowSpec {
  Month { ym: String },
  ForPhrase { phrase: String },
  SinceUntil { since: String, until: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledRange {
  pub label: String,
  pub since: String,
  pub until: String,
}

fn first_of_month(y: i32, m: u32) -> Result<NaiveDate> {
  NaiveDate::from_ymd_opt(y, m, 1).with_context(|| format!("invalid month {:04}-{:02}", y, m))
}

fn next_month(d: NaiveDate) -> Result<NaiveDate> {
  d.checked_add_months(Months::new(1)).context("month out of range")
}

pub fn month_bounds(year_month: &str) -> Result<(String, String)> {
  let parts: Vec<&str> = year_month.split('-').collect();

  if parts.len() != 2 {
    bail!("invalid --month, expected YYYY-MM");
  }
  let y: i32 = parts[0].parse().context("parsing year in --month")?;
  let m: u32 = parts[1].parse().context("parsing month in --month")?;

  if !(1..=12).contains(&m) {
    bail!("invalid month in --month");
  }

  let start = first_of_month(y, m)?;
  Ok((normalize(start), normalize(next_month(start)?)))
}

/// Parse a `--now-override` string: RFC3339, or naive local `%Y-%m-%dT%H:%M:%S`.
pub fn parse_now(s: Option<&str>) -> Option<DateTime<Local>> {
  s.and_then(|raw| {
    DateTime::parse_from_rfc3339(raw)
      .ok()
      .map(|dt| dt.with_timezone(&Local))
      .or_else(|| {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
          .ok()
          .and_then(|ndt| ndt.and_local_timezone(Local).single())
      })
  })
}

fn day_after(d: NaiveDate) -> Result<NaiveDate> {
  d.checked_add_days(Days::new(1)).context("date out of range")
}

fn start_of_week(d: NaiveDate) -> NaiveDate {
  d - chrono::Duration::days(d.weekday().num_days_from_monday() as i64)
}

fn range(since: NaiveDate, until: NaiveDate) -> (String, String) {
  (normalize(since), normalize(until))
}

/// Single-range phrases. `now` anchors relative phrases.
fn for_phrase_bounds(input: &str, now: DateTime<Local>) -> Result<(String, String)> {
  let phrase = input.trim().to_lowercase();
  let today = now.date_naive();

  match phrase.as_str() {
    "today" => return Ok(range(today, day_after(today)?)),
    "yesterday" => return Ok(range(today - chrono::Duration::days(1), today)),
    "this week" => return Ok(range(start_of_week(today), day_after(today)?)),
    "last week" => {
      let this_week = start_of_week(today);
      return Ok(range(this_week - chrono::Duration::days(7), this_week));
    }
    "this month" => return Ok(range(first_of_month(today.year(), today.month())?, day_after(today)?)),
    "last month" => {
      let this_month = first_of_month(today.year(), today.month())?;
      let last_month = this_month.checked_sub_months(Months::new(1)).context("month out of range")?;
      return Ok(range(last_month, this_month));
    }
    _ => {}
  }

  // Durations ("2 weeks ago", "3 days") run from/to today, inclusive of today.
  if let Ok(interval) = parse_duration(&phrase) {
    let shifted = match interval {
      Interval::Seconds(secs) => now + chrono::Duration::seconds(secs.into()),
      Interval::Days(days) => now + chrono::Duration::days(days.into()),
      Interval::Months(months) if months < 0 => now
        .checked_sub_months(Months::new(months.unsigned_abs()))
        .context("month out of range")?,
      Interval::Months(months) => now
        .checked_add_months(Months::new(months as u32))
        .context("month out of range")?,
    };
    let other = shifted.date_naive();

    return if other <= today {
      Ok(range(other, day_after(today)?))
    } else {
      Ok(range(today, day_after(other)?))
    };
  }

  // Calendar ranges via two_timer ("last year", "march 2018", ...)
  let config = two_timer::Config::new().now(now.naive_local());
  if let Ok((start, end, _)) = two_timer::parse(&phrase, Some(config)) {
    let start = start.date();
    // two_timer ends are exclusive instants; a midnight end already names the next day
    let end = if end.num_seconds_from_midnight() == 0 { end.date() } else { day_after(end.date())? };
    let end = end.min(day_after(today)?);

    return Ok(range(start, end));
  }

  bail!("could not understand --for {:?}", input)
}

/// Multi-bucket phrases: "every month for the last N months", "every week for the last N weeks".
pub fn for_phrase_buckets(input: &str, now: DateTime<Local>) -> Result<Option<Vec<LabeledRange>>> {
  static RE_MONTHS: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"^every\s+month\s+for\s+the\s+last\s+(\d+)\s+months?$").expect("static regex"));
  static RE_WEEKS: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"^every\s+week\s+for\s+the\s+last\s+(\d+)\s+weeks?$").expect("static regex"));

  let phrase = input.trim().to_lowercase();
  let today = now.date_naive();

  if let Some(caps) = RE_MONTHS.captures(&phrase) {
    let n: u32 = caps[1].parse().context("parsing bucket count")?;
    let mut cursor = first_of_month(today.year(), today.month())?;
    let mut out = Vec::new();

    for _ in 0..n {
      let start = cursor.checked_sub_months(Months::new(1)).context("month out of range")?;
      out.push(LabeledRange {
        label: start.format("%Y-%m").to_string(),
        since: normalize(start),
        until: normalize(cursor),
      });
      cursor = start;
    }

    out.reverse();
    return Ok(Some(out));
  }

  if let Some(caps) = RE_WEEKS.captures(&phrase) {
    let n: u32 = caps[1].parse().context("parsing bucket count")?;
    let mut cursor = start_of_week(today);
    let mut out = Vec::new();

    for _ in 0..n {
      let start = cursor - chrono::Duration::days(7);
      let iso = start.iso_week();
      out.push(LabeledRange {
        label: format!("{}-W{:02}", iso.year(), iso.week()),
        since: normalize(start),
        until: normalize(cursor),
      });
      cursor = start;
    }

    out.reverse();
    return Ok(Some(out));
  }

  Ok(None)
}

/// Resolve the window selection into one or more labeled ranges.
pub fn resolve_ranges(window: &WindowSpec, now: Option<DateTime<Local>>) -> Result<Vec<LabeledRange>> {
  let now = now.unwrap_or_else(Local::now);

  match window {
    WindowSpec::Month { ym } => {
      let (since, until) = month_bounds(ym)?;
      Ok(vec![LabeledRange { label: ym.clone(), since, until }])
    }
    WindowSpec::SinceUntil { since, until } => Ok(vec![LabeledRange {
      label: "window".into(),
      since: since.clone(),
      until: until.clone(),
    }]),
    WindowSpec::ForPhrase { phrase } => {
      if let Some(buckets) = for_phrase_buckets(phrase, now)? {
        if buckets.is_empty() {
          bail!("--for {:?} selects no ranges", phrase);
        }
        return Ok(buckets);
      }

      let (since, until) = for_phrase_bounds(phrase, now)?;
      Ok(vec![LabeledRange { label: phrase.trim().to_lowercase(), since, until }])
    }
  }
}
