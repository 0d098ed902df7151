//! Timestamp representation and lenient storage parsing.
//!
//! Timestamps serialize as RFC 3339 in UTC with the precision needed to
//! round-trip exactly. Reads also accept a bare `YYYY-MM-DD` date, a naive
//! `YYYY-MM-DDTHH:MM:SS[.f]` (taken as UTC) and epoch milliseconds, integral
//! or fractional. `lenient` maps anything else to `None` instead of failing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::Serializer;
use std::fmt::Formatter;

pub type Timestamp = DateTime<Utc>;

pub fn now() -> Timestamp {
    Utc::now()
}

/// Current time, bumped past `previous` so successive mutations strictly increase.
pub fn now_after(previous: Timestamp) -> Timestamp {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + chrono::Duration::microseconds(1)
    }
}

pub fn to_iso(value: &Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parses any accepted timestamp text form.
pub fn parse_flexible(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

pub fn from_epoch_millis(millis: i64) -> Option<Timestamp> {
    Utc.timestamp_millis_opt(millis).single()
}

/// Fractional epoch milliseconds, truncated to whole milliseconds.
pub fn from_epoch_millis_f64(millis: f64) -> Option<Timestamp> {
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
        return None;
    }
    from_epoch_millis(millis.trunc() as i64)
}

/// `#[serde(with = "timestamp::iso")]` adapter.
pub mod iso {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_iso(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

/// `#[serde(deserialize_with = "timestamp::lenient::deserialize")]` adapter
/// for `Option<Timestamp>`; unreadable values become `None`.
pub mod lenient {
    use super::*;
    use serde::Deserialize;
    use serde_json::Value;

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Timestamp>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(raw) => parse_flexible(&raw),
            Value::Number(number) => match number.as_i64() {
                Some(millis) => from_epoch_millis(millis),
                None => number.as_f64().and_then(from_epoch_millis_f64),
            },
            _ => None,
        })
    }
}

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("an ISO-8601 timestamp, a YYYY-MM-DD date or epoch milliseconds")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Timestamp, E> {
        parse_flexible(value)
            .ok_or_else(|| E::custom(format!("invalid timestamp `{value}`")))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Timestamp, E> {
        from_epoch_millis(value)
            .ok_or_else(|| E::custom(format!("epoch millis out of range: {value}")))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Timestamp, E> {
        let millis = i64::try_from(value)
            .map_err(|_| E::custom(format!("epoch millis out of range: {value}")))?;
        self.visit_i64(millis)
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Timestamp, E> {
        from_epoch_millis_f64(value)
            .ok_or_else(|| E::custom(format!("epoch millis out of range: {value}")))
    }
}
