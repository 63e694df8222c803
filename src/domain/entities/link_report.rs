//! Usage report for an existing short link.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Offset used when rendering last-activity timestamps (IST, UTC+05:30).
const IST_OFFSET_SECONDS: i32 = 5 * 3600 + 30 * 60;

/// Whether a one-time link has been opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LinkStatus {
    Fresh,
    Used,
}

impl LinkStatus {
    pub fn from_hits(hits: u64) -> Self {
        if hits == 0 { Self::Fresh } else { Self::Used }
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            Self::Fresh => "The link has NOT been opened.",
            Self::Used => "The link has been opened.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub hits: u64,
    pub last_activity_ist: String,
}

/// Report returned by the verify endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkReport {
    pub alias: String,
    pub link_status: LinkStatus,
    pub verdict: String,
    pub evidence: Evidence,
}

impl LinkReport {
    /// Builds a report from the hit counter and the last-activity unix timestamp.
    pub fn new(alias: impl Into<String>, hits: u64, last_activity_unix: i64) -> Self {
        let link_status = LinkStatus::from_hits(hits);

        Self {
            alias: alias.into(),
            link_status,
            verdict: link_status.verdict().to_string(),
            evidence: Evidence {
                hits,
                last_activity_ist: format_ist(last_activity_unix),
            },
        }
    }
}

/// Renders a unix timestamp in IST, e.g. `26 Nov 2025, 7:33:45 PM`.
///
/// Non-positive or out-of-range timestamps render as `Never`.
pub fn format_ist(unix_seconds: i64) -> String {
    if unix_seconds <= 0 {
        return "Never".to_string();
    }

    let Some(offset) = FixedOffset::east_opt(IST_OFFSET_SECONDS) else {
        return "Never".to_string();
    };

    match DateTime::from_timestamp(unix_seconds, 0) {
        Some(utc) => utc
            .with_timezone(&offset)
            .format("%-d %b %Y, %-I:%M:%S %p")
            .to_string(),
        None => "Never".to_string(),
    }
}
