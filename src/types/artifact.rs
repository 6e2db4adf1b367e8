use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The three output encodings.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ExportFormat {
    Word,
    Spreadsheet,
    Text,
}

/// How a finished artifact is handed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryPolicy {
    /// Hidden anchor with a `download` attribute, revoked right away.
    DirectDownload,
    /// Native share sheet first, new browsing context as the fallback.
    ShareOrDownload,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [Self::Word, Self::Spreadsheet, Self::Text];

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Word => "docx",
            Self::Spreadsheet => "xlsx",
            Self::Text => "txt",
        }
    }

    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Word => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            Self::Text => "text/plain",
        }
    }

    /// Spreadsheets go through the share sheet because some mobile
    /// browsers mangle plain `.xlsx` downloads.
    #[must_use]
    pub fn delivery_policy(self) -> DeliveryPolicy {
        match self {
            Self::Word | Self::Text => DeliveryPolicy::DirectDownload,
            Self::Spreadsheet => DeliveryPolicy::ShareOrDownload,
        }
    }

    /// Whether the serializer embeds the logo.
    #[must_use]
    pub fn uses_logo(self) -> bool {
        !matches!(self, Self::Text)
    }

    /// Parse a CLI-style format name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "word" | "docx" => Some(Self::Word),
            "spreadsheet" | "excel" | "xlsx" => Some(Self::Spreadsheet),
            "text" | "txt" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Suggested filename, e.g. `perdue_team_yard_check_2024-05-01.xlsx`.
#[must_use]
pub fn export_filename(prefix: &str, date: NaiveDate, format: ExportFormat) -> String {
    format!(
        "{prefix}_{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Current local calendar date (the browser's local date on wasm32).
#[must_use]
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// A finished export: bytes plus what delivery needs to name them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
    pub filename: String,
    pub mime_type: &'static str,
}

impl ExportArtifact {
    #[must_use]
    pub fn new(format: ExportFormat, bytes: Vec<u8>, filename: String) -> Self {
        Self {
            format,
            bytes,
            filename,
            mime_type: format.mime_type(),
        }
    }
}
