//! Timestamp wire formats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Textual encoding used for `timestamp` scalars.
///
/// A scalar shape may pin its own format; otherwise the serializer's configured
/// default applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2014-01-02T03:04:05Z`, with microseconds only when non-zero.
    #[default]
    #[serde(rename = "iso8601")]
    Iso8601,
    /// Whole seconds since the Unix epoch.
    #[serde(rename = "unixTimestamp")]
    UnixTimestamp,
    /// `Thu, 02 Jan 2014 03:04:05 GMT`
    #[serde(rename = "rfc822")]
    Rfc822,
}

impl TimestampFormat {
    pub fn format(&self, value: &DateTime<Utc>) -> String {
        match self {
            Self::Iso8601 => {
                if value.timestamp_subsec_micros() == 0 {
                    value.format("%Y-%m-%dT%H:%M:%SZ").to_string()
                } else {
                    value.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
                }
            }
            Self::UnixTimestamp => value.timestamp().to_string(),
            Self::Rfc822 => value.format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
        }
    }
}
