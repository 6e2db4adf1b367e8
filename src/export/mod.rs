//! Serializers for the three export formats and the shared package writer.

pub mod docx;
pub(crate) mod package;
pub mod text;
pub mod xlsx;
pub(crate) mod xml;

use chrono::NaiveDate;

use crate::asset::LogoImage;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::types::{export_filename, local_today, ExportArtifact, ExportFormat, FormSnapshot};

pub use docx::render_word;
pub use text::render_text;
pub use xlsx::render_spreadsheet;

/// A format-specific serializer.
pub trait Renderer {
    fn format(&self) -> ExportFormat;

    /// Serialize the snapshot. Formats without an image ignore `logo`.
    ///
    /// # Errors
    /// Returns an error if the output container cannot be written.
    fn render(&self, snapshot: &FormSnapshot, logo: Option<&LogoImage>) -> Result<Vec<u8>>;
}

pub struct WordRenderer<'a> {
    config: &'a ReportConfig,
}

impl Renderer for WordRenderer<'_> {
    fn format(&self) -> ExportFormat {
        ExportFormat::Word
    }

    fn render(&self, snapshot: &FormSnapshot, logo: Option<&LogoImage>) -> Result<Vec<u8>> {
        render_word(snapshot, logo, self.config)
    }
}

pub struct SpreadsheetRenderer<'a> {
    config: &'a ReportConfig,
}

impl Renderer for SpreadsheetRenderer<'_> {
    fn format(&self) -> ExportFormat {
        ExportFormat::Spreadsheet
    }

    fn render(&self, snapshot: &FormSnapshot, logo: Option<&LogoImage>) -> Result<Vec<u8>> {
        render_spreadsheet(snapshot, logo, self.config)
    }
}

pub struct TextRenderer<'a> {
    config: &'a ReportConfig,
}

impl Renderer for TextRenderer<'_> {
    fn format(&self) -> ExportFormat {
        ExportFormat::Text
    }

    fn render(&self, snapshot: &FormSnapshot, _logo: Option<&LogoImage>) -> Result<Vec<u8>> {
        Ok(render_text(snapshot, self.config))
    }
}

/// The serializer for `format`.
#[must_use]
pub fn renderer_for(format: ExportFormat, config: &ReportConfig) -> Box<dyn Renderer + '_> {
    match format {
        ExportFormat::Word => Box::new(WordRenderer { config }),
        ExportFormat::Spreadsheet => Box::new(SpreadsheetRenderer { config }),
        ExportFormat::Text => Box::new(TextRenderer { config }),
    }
}

/// Renders snapshots into named artifacts.
///
/// The filename date is fixed when the exporter is built, so every format
/// produced by one exporter carries the same date.
#[derive(Debug, Clone)]
pub struct Exporter {
    config: ReportConfig,
    date: NaiveDate,
}

impl Exporter {
    /// An exporter stamping filenames with today's local date.
    #[must_use]
    pub fn new(config: ReportConfig) -> Self {
        Self::on_date(config, local_today())
    }

    #[must_use]
    pub fn on_date(config: ReportConfig, date: NaiveDate) -> Self {
        Self { config, date }
    }

    #[must_use]
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Render one format and wrap it with its filename and MIME type.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn render(
        &self,
        format: ExportFormat,
        snapshot: &FormSnapshot,
        logo: Option<&LogoImage>,
    ) -> Result<ExportArtifact> {
        let renderer = renderer_for(format, &self.config);
        let bytes = renderer.render(snapshot, logo)?;
        let filename = export_filename(&self.config.filename_prefix, self.date, renderer.format());
        log::debug!("rendered {filename} ({} bytes)", bytes.len());
        Ok(ExportArtifact::new(format, bytes, filename))
    }
}
