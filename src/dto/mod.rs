use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Game records, creation payloads and the collection envelope.
pub mod game;
mod unix_seconds;

fn format_unix_timestamp(seconds: i64) -> String {
    OffsetDateTime::from_unix_timestamp(seconds)
        .ok()
        .and_then(|time| time.format(&Rfc3339).ok())
        .unwrap_or_else(|| "invalid-timestamp".into())
}
