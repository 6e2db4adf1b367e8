//! Generates worksheet XML from a [`Worksheet`] model.
//!
//! Strings are written inline (`t="inlineStr"`), so the package needs no
//! shared string table.

use crate::cell_ref::{cell_ref, col_to_letter, range_ref};
use crate::export::xml::{escape, NS_RELATIONSHIPS, XML_DECLARATION};

use super::styles::CellStyle;

/// A styled cell; `text` may be empty for border-only cells.
pub(crate) struct SheetCell {
    /// 0-based column.
    pub col: u32,
    pub text: String,
    pub style: CellStyle,
}

pub(crate) struct SheetRow {
    /// 0-based row.
    pub row: u32,
    /// Height in points.
    pub height: f64,
    pub cells: Vec<SheetCell>,
}

/// Inclusive 0-based cell range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CellRange {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl CellRange {
    pub(crate) fn to_ref(self) -> String {
        range_ref(self.start_row, self.start_col, self.end_row, self.end_col)
    }
}

/// Page margins in inches.
pub(crate) struct PageMargins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub header: f64,
    pub footer: f64,
}

pub(crate) struct PageSetup {
    /// `1` is US Letter.
    pub paper_size: u32,
    pub orientation: &'static str,
    pub fit_to_width: u32,
    pub fit_to_height: u32,
    pub margins: PageMargins,
}

pub(crate) struct Worksheet {
    pub rows: Vec<SheetRow>,
    /// Column widths in characters, from column A.
    pub col_widths: Vec<f64>,
    pub default_row_height: f64,
    pub merges: Vec<CellRange>,
    pub page_setup: PageSetup,
    /// Relationship id of the sheet's drawing part, if any.
    pub drawing_rel: Option<String>,
}

impl Worksheet {
    /// Used range, from A1 to the last written cell.
    pub(crate) fn dimension(&self) -> Option<CellRange> {
        let max_row = self.rows.iter().map(|r| r.row).max()?;
        let max_col = self
            .rows
            .iter()
            .flat_map(|r| r.cells.iter().map(|c| c.col))
            .max()?;
        Some(CellRange {
            start_row: 0,
            start_col: 0,
            end_row: max_row,
            end_col: max_col,
        })
    }
}

/// Write a complete worksheet XML string.
pub(crate) fn write_sheet_xml(sheet: &Worksheet) -> String {
    let mut out = String::with_capacity(16 * 1024);
    out.push_str(XML_DECLARATION);
    out.push('\n');
    out.push_str(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
    );
    out.push_str(&format!("xmlns:r=\"{NS_RELATIONSHIPS}\">"));
    out.push('\n');

    // fitToWidth/fitToHeight are ignored unless fitToPage is set
    out.push_str("<sheetPr><pageSetUpPr fitToPage=\"1\"/></sheetPr>\n");

    if let Some(dim) = sheet.dimension() {
        out.push_str(&format!("<dimension ref=\"{}\"/>\n", dim.to_ref()));
    }

    out.push_str("<sheetViews><sheetView tabSelected=\"1\" workbookViewId=\"0\"/></sheetViews>\n");

    out.push_str(&format!(
        "<sheetFormatPr defaultRowHeight=\"{:.2}\" customHeight=\"1\"/>\n",
        sheet.default_row_height
    ));

    // <cols>
    if !sheet.col_widths.is_empty() {
        out.push_str("<cols>\n");
        for (idx, width) in sheet.col_widths.iter().enumerate() {
            let col1 = idx + 1; // XLSX is 1-based
            out.push_str(&format!(
                "<col min=\"{col1}\" max=\"{col1}\" width=\"{width:.2}\" customWidth=\"1\"/>\n"
            ));
        }
        out.push_str("</cols>\n");
    }

    // <sheetData>
    out.push_str("<sheetData>\n");
    for row in &sheet.rows {
        write_row(&mut out, row);
    }
    out.push_str("</sheetData>\n");

    // <mergeCells>
    if !sheet.merges.is_empty() {
        out.push_str(&format!("<mergeCells count=\"{}\">\n", sheet.merges.len()));
        for merge in &sheet.merges {
            out.push_str(&format!("<mergeCell ref=\"{}\"/>\n", merge.to_ref()));
        }
        out.push_str("</mergeCells>\n");
    }

    let setup = &sheet.page_setup;
    let m = &setup.margins;
    out.push_str(&format!(
        "<pageMargins left=\"{}\" right=\"{}\" top=\"{}\" bottom=\"{}\" header=\"{}\" footer=\"{}\"/>\n",
        m.left, m.right, m.top, m.bottom, m.header, m.footer
    ));
    out.push_str(&format!(
        "<pageSetup paperSize=\"{}\" orientation=\"{}\" fitToWidth=\"{}\" fitToHeight=\"{}\"/>\n",
        setup.paper_size, setup.orientation, setup.fit_to_width, setup.fit_to_height
    ));

    if let Some(rel_id) = &sheet.drawing_rel {
        out.push_str(&format!("<drawing r:id=\"{}\"/>\n", escape(rel_id)));
    }

    out.push_str("</worksheet>");
    out
}

fn write_row(out: &mut String, row: &SheetRow) {
    out.push_str(&format!(
        "<row r=\"{}\" ht=\"{:.2}\" customHeight=\"1\">",
        row.row + 1,
        row.height
    ));
    for cell in &row.cells {
        write_cell(out, row.row, cell);
    }
    out.push_str("</row>\n");
}

/// Write a single `<c>` element; empty text yields a style-only cell.
fn write_cell(out: &mut String, row: u32, cell: &SheetCell) {
    out.push_str(&format!(
        "<c r=\"{}\" s=\"{}\"",
        cell_ref(row, cell.col),
        cell.style.xf_index()
    ));
    if cell.text.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push_str(" t=\"inlineStr\"><is><t xml:space=\"preserve\">");
    out.push_str(&escape(&cell.text));
    out.push_str("</t></is></c>");
}

/// Column letter span like "A:E", used in log output.
pub(crate) fn column_span(cols: usize) -> String {
    let last = u32::try_from(cols.saturating_sub(1)).unwrap_or(0);
    format!("A:{}", col_to_letter(last))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn sheet_with(rows: Vec<SheetRow>) -> Worksheet {
        Worksheet {
            rows,
            col_widths: vec![26.0, 10.0],
            default_row_height: 30.0,
            merges: vec![CellRange {
                start_row: 0,
                start_col: 0,
                end_row: 0,
                end_col: 1,
            }],
            page_setup: PageSetup {
                paper_size: 1,
                orientation: "portrait",
                fit_to_width: 1,
                fit_to_height: 1,
                margins: PageMargins {
                    left: 0.25,
                    right: 0.25,
                    top: 0.25,
                    bottom: 0.25,
                    header: 0.3,
                    footer: 0.3,
                },
            },
            drawing_rel: None,
        }
    }

    #[test]
    fn test_inline_string_and_style_only_cells() {
        let sheet = sheet_with(vec![SheetRow {
            row: 3,
            height: 28.0,
            cells: vec![
                SheetCell {
                    col: 0,
                    text: "1. <53021>".to_string(),
                    style: CellStyle::Data,
                },
                SheetCell {
                    col: 1,
                    text: String::new(),
                    style: CellStyle::Data,
                },
            ],
        }]);
        let xml = write_sheet_xml(&sheet);
        assert!(xml.contains("<row r=\"4\" ht=\"28.00\" customHeight=\"1\">"));
        assert!(xml.contains(
            "<c r=\"A4\" s=\"4\" t=\"inlineStr\"><is><t xml:space=\"preserve\">1. &lt;53021&gt;</t></is></c>"
        ));
        assert!(xml.contains("<c r=\"B4\" s=\"4\"/>"));
        assert!(xml.contains("<dimension ref=\"A1:B4\"/>"));
        assert!(xml.contains("<mergeCell ref=\"A1:B1\"/>"));
        assert!(!xml.contains("<drawing"));
    }

    #[test]
    fn test_element_order() {
        let mut sheet = sheet_with(Vec::new());
        sheet.drawing_rel = Some("rId1".to_string());
        let xml = write_sheet_xml(&sheet);
        let order = [
            "<sheetPr>",
            "<sheetViews>",
            "<sheetFormatPr",
            "<cols>",
            "<sheetData>",
            "<mergeCells",
            "<pageMargins",
            "<pageSetup",
            "<drawing",
        ];
        let positions: Vec<usize> = order.iter().map(|tag| xml.find(tag).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(!xml.contains("<dimension"));
    }

    #[test]
    fn test_column_span() {
        assert_eq!(column_span(5), "A:E");
    }
}
