use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::health::error::HealthError;

/// Tables the bot expects to find in the `public` schema.
pub const EXPECTED_TABLES: [&str; 8] = [
    "guild_settings",
    "custom_commands",
    "tickets",
    "audit_logs",
    "guild_members",
    "info_topics",
    "votes",
    "triggers",
];

pub fn all_expected() -> Vec<String> {
    EXPECTED_TABLES.iter().map(|t| t.to_string()).collect()
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseStatus {
    Connected,
    Error,
}

/// What the probes observed when every step went through.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeReport {
    pub read_ok: bool,
    pub write_ok: bool,
    pub tables: Vec<String>,
}

impl ProbeReport {
    /// Expected tables not present, in the order of [`EXPECTED_TABLES`].
    pub fn missing_tables(&self) -> Vec<String> {
        EXPECTED_TABLES
            .iter()
            .filter(|expected| !self.tables.iter().any(|t| t == *expected))
            .map(|t| t.to_string())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResult {
    pub read_ok: bool,
    pub write_ok: bool,
    pub tables: Vec<String>,
    pub missing_tables: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub checked_at: DateTime<Utc>,
}

impl HealthResult {
    pub fn failed(error: &HealthError) -> Self {
        Self {
            read_ok: false,
            write_ok: false,
            tables: Vec::new(),
            missing_tables: all_expected(),
            error_message: Some(error.to_string()),
            checked_at: Utc::now(),
        }
    }

    pub fn status(&self) -> DatabaseStatus {
        if self.read_ok && self.write_ok {
            DatabaseStatus::Connected
        } else {
            DatabaseStatus::Error
        }
    }
}

/// Partial successes are dropped: any error yields the all-failed shape.
impl From<Result<ProbeReport, HealthError>> for HealthResult {
    fn from(outcome: Result<ProbeReport, HealthError>) -> Self {
        match outcome {
            Ok(report) => Self {
                missing_tables: report.missing_tables(),
                read_ok: report.read_ok,
                write_ok: report.write_ok,
                tables: report.tables,
                error_message: None,
                checked_at: Utc::now(),
            },
            Err(e) => Self::failed(&e),
        }
    }
}
