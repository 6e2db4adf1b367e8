//! Report content shared by every serializer.
//!
//! Serializers never look at [`Row`] fields directly: they render the
//! [`ReportRow`] tuples produced here, so row numbering and the status
//! projection cannot drift between formats.

use std::borrow::Cow;

use crate::status::project;
use crate::types::{FormSnapshot, Metadata, Row};

/// Column labels, left to right.
pub const COLUMN_HEADERS: [&str; 5] = [
    "Trailer",
    "Fuel",
    "Loaded/Empty",
    "If \"Red Tagged\" Record issues here and report to R/R",
    "Temp",
];

/// Placeholder for a blank date or time on the printed forms.
pub const DATE_PLACEHOLDER: &str = "____";

/// Placeholder for a blank truck, trip or location on the printed forms.
pub const FIELD_PLACEHOLDER: &str = "________";

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow<'a> {
    /// 1-based position on the form.
    pub number: usize,
    /// `"<n>. <trailer>"`, or just `"<n>."` for a blank trailer.
    pub trailer: String,
    pub fuel: &'a str,
    pub loaded_empty: &'a str,
    pub red_tagged: &'a str,
    pub temp: &'a str,
}

impl ReportRow<'_> {
    /// Cell texts in [`COLUMN_HEADERS`] order.
    #[must_use]
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.trailer,
            self.fuel,
            self.loaded_empty,
            self.red_tagged,
            self.temp,
        ]
    }
}

/// Build the table rows for a snapshot, in form order.
#[must_use]
pub fn report_rows(snapshot: &FormSnapshot) -> Vec<ReportRow<'_>> {
    snapshot
        .rows()
        .iter()
        .enumerate()
        .map(|(idx, row)| report_row(idx + 1, row))
        .collect()
}

fn report_row(number: usize, row: &Row) -> ReportRow<'_> {
    let status = project(row);
    ReportRow {
        number,
        trailer: format!("{number}. {}", row.trailer).trim().to_string(),
        fuel: &row.fuel,
        loaded_empty: status.loaded_empty,
        red_tagged: status.red_tagged,
        temp: &row.temp,
    }
}

/// A piece of the metadata header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSpan<'a> {
    pub text: Cow<'a, str>,
    pub bold: bool,
}

impl<'a> LineSpan<'a> {
    fn label(text: &'static str) -> Self {
        Self {
            text: Cow::Borrowed(text),
            bold: true,
        }
    }

    fn value(value: &'a str, placeholder: &'static str) -> Self {
        Self {
            text: Cow::Borrowed(if value.is_empty() { placeholder } else { value }),
            bold: false,
        }
    }

    fn plain(text: &'static str) -> Self {
        Self {
            text: Cow::Borrowed(text),
            bold: false,
        }
    }
}

/// Metadata line for the Word and Spreadsheet headers, with placeholders
/// standing in for blank fields. Labels are marked bold.
#[must_use]
pub fn header_line(meta: &Metadata) -> Vec<LineSpan<'_>> {
    vec![
        LineSpan::label("Date/Time: "),
        LineSpan::value(&meta.date, DATE_PLACEHOLDER),
        LineSpan::plain(" / "),
        LineSpan::value(&meta.time, DATE_PLACEHOLDER),
        LineSpan::label("    Truck: "),
        LineSpan::value(&meta.truck, FIELD_PLACEHOLDER),
        LineSpan::label("    Trip: "),
        LineSpan::value(&meta.trip, FIELD_PLACEHOLDER),
        LineSpan::label("    Location: "),
        LineSpan::value(&meta.location, FIELD_PLACEHOLDER),
    ]
}

/// [`header_line`] flattened to plain text.
#[must_use]
pub fn header_line_text(meta: &Metadata) -> String {
    header_line(meta).iter().map(|span| span.text.as_ref()).collect()
}

/// Pipe-separated summary used by the text report. Blank fields stay blank.
#[must_use]
pub fn summary_line(meta: &Metadata) -> String {
    format!(
        "Date/Time: {} | Truck: {} | Trip: {} | Location: {}",
        meta.date_time(),
        meta.truck,
        meta.trip,
        meta.location
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::ROW_COUNT;

    #[test]
    fn test_blank_rows_numbered() {
        let snapshot = FormSnapshot::default();
        let rows = report_rows(&snapshot);
        assert_eq!(rows.len(), ROW_COUNT);
        assert_eq!(rows[0].trailer, "1.");
        assert_eq!(rows[24].trailer, "25.");
        assert_eq!(rows[9].cells(), ["10.", "", "", "", ""]);
    }

    #[test]
    fn test_trailer_prefixed() {
        let snapshot = FormSnapshot::new(
            Metadata::default(),
            vec![
                Row::default(),
                Row {
                    trailer: "53021".to_string(),
                    fuel: "3/4".to_string(),
                    status: "Loaded".to_string(),
                    temp: "34".to_string(),
                    ..Row::default()
                },
            ],
        );
        let rows = report_rows(&snapshot);
        assert_eq!(rows[1].number, 2);
        assert_eq!(rows[1].cells(), ["2. 53021", "3/4", "Loaded", "", "34"]);
    }

    #[test]
    fn test_header_line_placeholders() {
        let text = header_line_text(&Metadata::default());
        assert_eq!(
            text,
            "Date/Time: ____ / ____    Truck: ________    Trip: ________    Location: ________"
        );
    }

    #[test]
    fn test_header_line_values_and_bold_labels() {
        let meta = Metadata {
            date: "2024-05-01".to_string(),
            truck: "481".to_string(),
            ..Metadata::default()
        };
        let spans = header_line(&meta);
        assert!(spans[0].bold);
        assert_eq!(spans[1].text, "2024-05-01");
        assert!(!spans[1].bold);
        assert_eq!(spans[3].text, DATE_PLACEHOLDER);
        assert_eq!(spans[5].text, "481");
        assert_eq!(spans[7].text, FIELD_PLACEHOLDER);
    }

    #[test]
    fn test_summary_line_uses_date_time() {
        let meta = Metadata {
            time: "06:30".to_string(),
            location: "Salisbury".to_string(),
            ..Metadata::default()
        };
        assert_eq!(
            summary_line(&meta),
            "Date/Time: 06:30 | Truck:  | Trip:  | Location: Salisbury"
        );
    }
}
