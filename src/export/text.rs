//! Tab-delimited plain-text report.

use crate::config::ReportConfig;
use crate::report::{report_rows, summary_line, COLUMN_HEADERS};
use crate::types::FormSnapshot;

/// Render the snapshot as UTF-8 text: branding lines, title, a metadata
/// summary, a blank line, the header and one line per form row.
#[must_use]
pub fn render_text(snapshot: &FormSnapshot, config: &ReportConfig) -> Vec<u8> {
    let mut lines: Vec<String> =
        Vec::with_capacity(config.branding.len() + 4 + snapshot.rows().len());
    lines.extend(config.branding.iter().cloned());
    lines.push(config.title.clone());
    lines.push(summary_line(snapshot.metadata()));
    lines.push(String::new());
    lines.push(COLUMN_HEADERS.join("\t"));
    lines.extend(report_rows(snapshot).iter().map(|row| row.cells().join("\t")));
    lines.join("\n").into_bytes()
}
