use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, de::Error};

use crate::error::FieldError;


/// Deserializes a present field into `Some`, keeping `null` as `Some(None)`.
/// Pair with `#[serde(default)]` so an absent field stays `None`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Accepts RFC 3339, naive ISO-8601 and bare dates.
/// Timestamps carrying an offset are converted to UTC.
pub fn deserialize_naive_datetime<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_datetime(&text)
        .ok_or_else(|| D::Error::custom(format!("invalid datetime: {}", text)))
}

pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }

    let naive_formats = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
    for fmt in naive_formats.iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}


/// Collects column-width violations of a form.
pub struct LengthCheck {
    errors: Vec<FieldError>,
}

impl LengthCheck {
    pub fn new() -> Self {
        LengthCheck {
            errors: Vec::new(),
        }
    }

    pub fn field(mut self, name: &str, value: Option<&str>, max: usize) -> Self {
        if let Some(value) = value {
            if value.chars().count() > max {
                self.errors.push(FieldError::body_field(
                    name,
                    format!("String should have at most {} characters", max),
                    "string_too_long",
                ));
            }
        }
        self
    }

    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        }
        else {
            Err(self.errors)
        }
    }
}
