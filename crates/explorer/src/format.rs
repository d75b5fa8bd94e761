//! Display formatting for raw platform values
//!
//! Every function here is total: malformed input produces a placeholder
//! string instead of an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Shown for dates that cannot be parsed
pub const INVALID_DATE: &str = "Invalid Date";

static HOURS: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(\d+)H").ok());
static MINUTES: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(\d+)M").ok());
static SECONDS: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(\d+)S").ok());

/// A date as platforms deliver it: epoch seconds or a date string
#[derive(Debug, Clone, PartialEq)]
pub enum DateValue {
  EpochSeconds(i64),
  Text(String),
}

impl DateValue {
  /// Read a date out of a loosely-typed JSON field
  pub fn from_json(value: &serde_json::Value) -> Option<Self> {
    match value {
      serde_json::Value::Number(n) => n.as_i64().map(DateValue::EpochSeconds),
      serde_json::Value::String(s) => Some(DateValue::Text(s.clone())),
      _ => None,
    }
  }

  fn to_datetime(&self) -> Option<DateTime<Utc>> {
    match self {
      DateValue::EpochSeconds(secs) => DateTime::from_timestamp(*secs, 0),
      DateValue::Text(text) => parse_date_text(text.trim()),
    }
  }
}

impl From<i64> for DateValue {
  fn from(secs: i64) -> Self {
    DateValue::EpochSeconds(secs)
  }
}

impl From<i32> for DateValue {
  fn from(secs: i32) -> Self {
    DateValue::EpochSeconds(i64::from(secs))
  }
}

impl From<&str> for DateValue {
  fn from(text: &str) -> Self {
    DateValue::Text(text.to_string())
  }
}

impl From<String> for DateValue {
  fn from(text: String) -> Self {
    DateValue::Text(text)
  }
}

impl From<&String> for DateValue {
  fn from(text: &String) -> Self {
    DateValue::Text(text.clone())
  }
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
    return Some(dt.with_timezone(&Utc));
  }

  for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
      return Some(naive.and_utc());
    }
  }

  if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
    return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
  }

  DateTime::parse_from_rfc2822(text).ok().map(|dt| dt.with_timezone(&Utc))
}

/// Render a date as `Nov 14, 2023`. Numbers are epoch seconds; dates are shown in UTC.
pub fn format_date(value: impl Into<DateValue>) -> String {
  match value.into().to_datetime() {
    Some(dt) => dt.format("%b %-d, %Y").to_string(),
    None => INVALID_DATE.to_string(),
  }
}

/// Thousands-grouped number with at most three fraction digits
pub fn format_number(n: f64) -> String {
  if n.is_nan() {
    return "NaN".to_string();
  }
  if n.is_infinite() {
    return if n > 0.0 { "∞".to_string() } else { "-∞".to_string() };
  }

  let rounded = (n * 1000.0).round() / 1000.0;
  let text = format!("{:.3}", rounded.abs());
  let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
  let frac_part = frac_part.trim_end_matches('0');

  let mut out = String::new();
  if rounded < 0.0 {
    out.push('-');
  }
  out.push_str(&group_thousands(int_part));
  if !frac_part.is_empty() {
    out.push('.');
    out.push_str(frac_part);
  }
  out
}

fn group_thousands(digits: &str) -> String {
  let len = digits.len();
  let mut grouped = String::with_capacity(len + len / 3);
  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (len - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(ch);
  }
  grouped
}

/// `n` divided by `unit`, rounded half-up to one decimal place
fn one_decimal(n: u64, unit: u64) -> String {
  let tenths = (u128::from(n) * 10 + u128::from(unit) / 2) / u128::from(unit);
  format!("{}.{}", tenths / 10, tenths % 10)
}

/// Compact view count: `999 views`, `1.5K views`, `2.3M views`
pub fn format_views(views: u64) -> String {
  if views >= 1_000_000 {
    format!("{}M views", one_decimal(views, 1_000_000))
  } else if views >= 1_000 {
    format!("{}K views", one_decimal(views, 1_000))
  } else {
    format!("{views} views")
  }
}

fn capture(pattern: &Lazy<Option<Regex>>, text: &str) -> Option<String> {
  let regex = pattern.as_ref()?;
  regex.captures(text).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
}

/// Render an ISO-8601 duration such as `PT1H2M3S` as `1h 2m 3s`.
///
/// Each designator is matched on its own; absent components are omitted.
/// When nothing matches, or every matched component is zero, the result is `0m`.
pub fn format_duration(duration: &str) -> String {
  let hours = capture(&HOURS, duration);
  let minutes = capture(&MINUTES, duration);
  let seconds = capture(&SECONDS, duration);

  let all_zero = [&hours, &minutes, &seconds]
    .iter()
    .filter_map(|part| part.as_deref())
    .all(|digits| digits.chars().all(|c| c == '0'));
  if all_zero {
    return "0m".to_string();
  }

  let h = hours.map(|v| format!("{v}h ")).unwrap_or_default();
  let m = minutes.map(|v| format!("{v}m ")).unwrap_or_default();
  let s = seconds.map(|v| format!("{v}s")).unwrap_or_default();

  format!("{h}{m}{s}").trim_end().to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_format_views_thresholds() {
    assert_eq!(format_views(0), "0 views");
    assert_eq!(format_views(999), "999 views");
    assert_eq!(format_views(1_000), "1.0K views");
    assert_eq!(format_views(1_500), "1.5K views");
    assert_eq!(format_views(1_250), "1.3K views");
    assert_eq!(format_views(999_999), "1000.0K views");
    assert_eq!(format_views(1_000_000), "1.0M views");
    assert_eq!(format_views(2_300_000), "2.3M views");
  }

  #[test]
  fn test_format_duration_components() {
    assert_eq!(format_duration("PT1H2M3S"), "1h 2m 3s");
    assert_eq!(format_duration("PT45S"), "45s");
    assert_eq!(format_duration("PT12M"), "12m");
    assert_eq!(format_duration("PT2H"), "2h");
    assert_eq!(format_duration("PT1H0M5S"), "1h 0m 5s");
  }

  #[test]
  fn test_format_duration_falls_back_to_zero_minutes() {
    assert_eq!(format_duration("PT0S"), "0m");
    assert_eq!(format_duration(""), "0m");
    assert_eq!(format_duration("garbage"), "0m");
    assert_eq!(format_duration("P1D"), "0m");
  }

  #[test]
  fn test_format_number_grouping() {
    assert_eq!(format_number(0.0), "0");
    assert_eq!(format_number(999.0), "999");
    assert_eq!(format_number(1_000.0), "1,000");
    assert_eq!(format_number(1_234_567.0), "1,234,567");
    assert_eq!(format_number(-4_200.0), "-4,200");
    assert_eq!(format_number(1_234.5), "1,234.5");
    assert_eq!(format_number(0.12345), "0.123");
  }

  #[test]
  fn test_format_number_non_finite() {
    assert_eq!(format_number(f64::NAN), "NaN");
    assert_eq!(format_number(f64::INFINITY), "∞");
  }

  #[test]
  fn test_format_date_epoch_and_iso_agree() {
    let from_epoch = format_date(1_700_000_000);
    let from_iso = format_date("2023-11-14T22:13:20.000Z");
    assert_eq!(from_epoch, "Nov 14, 2023");
    assert_eq!(from_epoch, from_iso);
  }

  #[test]
  fn test_format_date_accepts_common_shapes() {
    assert_eq!(format_date("2024-03-05"), "Mar 5, 2024");
    assert_eq!(format_date("2024-03-05T08:00:00"), "Mar 5, 2024");
    assert_eq!(format_date("Tue, 05 Mar 2024 08:00:00 +0000"), "Mar 5, 2024");
  }

  #[test]
  fn test_format_date_invalid_input() {
    assert_eq!(format_date("not a date"), INVALID_DATE);
    assert_eq!(format_date(i64::MAX), INVALID_DATE);
  }

  #[test]
  fn test_date_value_from_json() {
    assert_eq!(
      DateValue::from_json(&serde_json::json!(1_700_000_000)),
      Some(DateValue::EpochSeconds(1_700_000_000))
    );
    assert_eq!(
      DateValue::from_json(&serde_json::json!("2023-11-14")),
      Some(DateValue::Text("2023-11-14".to_string()))
    );
    assert_eq!(DateValue::from_json(&serde_json::json!(null)), None);
  }
}
