//! Timestamp helpers shared by the wire payload and the transcript.

use serde::{Deserialize, Deserializer, Serializer};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

/// Returns the current moment in UTC.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

/// Formats a timestamp as a short 12-hour clock label, e.g. `03:04 PM`.
///
/// Falls back to the empty string if the timestamp cannot be formatted.
pub fn clock_label(timestamp: OffsetDateTime) -> String {
    let format = format_description!("[hour repr:12 padding:zero]:[minute] [period]");
    timestamp.format(&format).unwrap_or_default()
}

/// Deserialize an RFC 3339 formatted string into an OffsetDateTime
pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    OffsetDateTime::parse(&s, &Rfc3339).map_err(serde::de::Error::custom)
}

/// Serialize an OffsetDateTime into an RFC 3339 formatted string
pub fn serialize<S>(datetime: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let s = datetime
        .format(&Rfc3339)
        .map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn clock_label_is_twelve_hour() {
        assert_eq!(clock_label(datetime!(2024-01-15 15:04:00 UTC)), "03:04 PM");
        assert_eq!(clock_label(datetime!(2024-01-15 09:30:00 UTC)), "09:30 AM");
        assert_eq!(clock_label(datetime!(2024-01-15 00:05:00 UTC)), "12:05 AM");
    }
}
