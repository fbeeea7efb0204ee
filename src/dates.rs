// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Normalize heterogeneous date inputs into the canonical YYYY-MM-DD query bound
// role: utilities/dates
// inputs: DateInput (free text, calendar date, naive or UTC date-time)
// outputs: YYYY-MM-DD strings
// invariants:
// - Pure and total; never errors
// - Text passes through untouched (no validation; the query service rejects bad bounds)
// - Date-times lose their time component
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const CANONICAL_FORMAT: &str = "%Y-%m-%d";

/// Anything a caller may hand us as a date bound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DateInput {
  Text(String),
  Date(NaiveDate),
  DateTime(NaiveDateTime),
  Utc(DateTime<Utc>),
}

impl From<&str> for DateInput {
  fn from(s: &str) -> Self {
    DateInput::Text(s.to_string())
  }
}

impl From<String> for DateInput {
  fn from(s: String) -> Self {
    DateInput::Text(s)
  }
}

impl From<&String> for DateInput {
  fn from(s: &String) -> Self {
    DateInput::Text(s.clone())
  }
}

impl From<NaiveDate> for DateInput {
  fn from(d: NaiveDate) -> Self {
    DateInput::Date(d)
  }
}

impl From<NaiveDateTime> for DateInput {
  fn from(dt: NaiveDateTime) -> Self {
    DateInput::DateTime(dt)
  }
}

impl From<DateTime<Utc>> for DateInput {
  fn from(dt: DateTime<Utc>) -> Self {
    DateInput::Utc(dt)
  }
}

/// Convert a date-ish value into `YYYY-MM-DD`.
///
/// Strings are returned unchanged; calendar values are formatted with their
/// date part only.
pub fn normalize(value: impl Into<DateInput>) -> String {
  match value.into() {
    DateInput::Text(s) => s,
    DateInput::Date(d) => d.format(CANONICAL_FORMAT).to_string(),
    DateInput::DateTime(dt) => dt.format(CANONICAL_FORMAT).to_string(),
    DateInput::Utc(dt) => dt.format(CANONICAL_FORMAT).to_string(),
  }
}
