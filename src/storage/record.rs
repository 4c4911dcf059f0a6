//! Durable analysis record

use crate::job::JobStatus;
use crate::verifier::BrokenLink;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Returns the far-future expiry sentinel marking a record as active
///
/// Records carry a validity window rather than a deleted flag; the window is
/// closed by real expiry logic elsewhere, never by the analysis pipeline.
pub fn active_until() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0).unwrap()
}

/// One persisted analysis result row
///
/// Created in Queued state at submission; result fields stay at their
/// defaults until the job completes and the pipeline writes the final state
/// back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: i64,
    pub title: String,
    pub url: String,
    #[serde(rename = "htmlVersion")]
    pub html_version: String,
    #[serde(rename = "internalLinks")]
    pub internal_links: u32,
    #[serde(rename = "externalLinks")]
    pub external_links: u32,
    pub status: String,
    #[serde(rename = "loginForm")]
    pub login_form: bool,
    #[serde(rename = "brokenLinks")]
    pub broken_links: Vec<BrokenLink>,
    #[serde(rename = "valid_from")]
    pub valid_from: DateTime<Utc>,
    #[serde(rename = "valid_until")]
    pub valid_until: DateTime<Utc>,
}

impl AnalysisRecord {
    /// Creates a fresh record for a newly submitted URL
    ///
    /// The id is assigned by the store on insert; 0 is a placeholder.
    pub fn queued(url: &str, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            title: String::new(),
            url: url.to_string(),
            html_version: String::new(),
            internal_links: 0,
            external_links: 0,
            status: JobStatus::Queued.label().to_string(),
            login_form: false,
            broken_links: Vec::new(),
            valid_from: submitted_at,
            valid_until: active_until(),
        }
    }
}
