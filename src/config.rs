//! Report configuration.
//!
//! Every field has a default matching the printed Perdue yard check form,
//! so an empty JSON object (or `undefined` from JavaScript) is a valid
//! configuration.

use serde::{Deserialize, Serialize};

/// Delay before a new-tab object URL is revoked.
pub const DEFAULT_SHARE_REVOKE_DELAY_MS: u32 = 30_000;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportConfig {
    /// Title line printed in all three formats.
    pub title: String,
    /// Lines printed above the title in the text report.
    pub branding: Vec<String>,
    /// Filename stem; the date and extension are appended.
    pub filename_prefix: String,
    /// How long a new-tab object URL stays alive after delivery.
    pub share_revoke_delay_ms: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Perdue Team Yard Check".to_string(),
            branding: vec![
                "Stevens Transport".to_string(),
                "Driver Focused. People Driven.".to_string(),
            ],
            filename_prefix: "perdue_team_yard_check".to_string(),
            share_revoke_delay_ms: DEFAULT_SHARE_REVOKE_DELAY_MS,
        }
    }
}

impl ReportConfig {
    /// Parse a configuration from JSON, defaulting missing fields.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
