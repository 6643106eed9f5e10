//! Lenient field decoding
//!
//! Browser forms submit dates as `YYYY-MM-DD` and number inputs as strings;
//! older clients send full timestamps. These helpers accept all of those and
//! normalize to the stored types.

use chrono::{DateTime, NaiveDate};
use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

fn parse_date<E: de::Error>(raw: &str) -> Result<NaiveDate, E> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.date_naive())
        .map_err(|_| E::custom(format!("invalid date '{}', expected YYYY-MM-DD", raw)))
}

fn parse_number<E: de::Error>(raw: RawNumber) -> Result<i64, E> {
    match raw {
        RawNumber::Int(n) => Ok(n),
        RawNumber::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        RawNumber::Float(f) => Err(E::custom(format!("member number must be whole, got {}", f))),
        RawNumber::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| E::custom(format!("invalid member number '{}'", s))),
    }
}

pub fn date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw)
}

pub fn option_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_date(&raw))
        .transpose()
}

pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    parse_number(RawNumber::deserialize(deserializer)?)
}

pub fn option_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    Option::<RawNumber>::deserialize(deserializer)?
        .map(parse_number)
        .transpose()
}
