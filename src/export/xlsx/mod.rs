//! XLSX serializer.
//!
//! One worksheet, "Yard Check": a merged metadata banner, a merged title
//! banner, a bold header row and 25 bordered data rows with every other row
//! striped. Print setup fits the sheet onto a single Letter page.

mod drawing;
mod sheet_writer;
mod styles;

use crate::asset::LogoImage;
use crate::cell_ref::{absolute_range_ref, quote_sheet_name};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::report::{header_line_text, report_rows, COLUMN_HEADERS};
use crate::types::FormSnapshot;

use super::package::{
    root_relationships, ContentTypes, PackageWriter, Relationships, REL_DRAWING, REL_IMAGE,
    REL_STYLES, REL_WORKSHEET,
};
use super::xml::{escape, NS_RELATIONSHIPS, XML_DECLARATION};

use drawing::{write_drawing_xml, PictureAnchor};
use sheet_writer::{
    column_span, write_sheet_xml, CellRange, PageMargins, PageSetup, SheetCell, SheetRow,
    Worksheet,
};
use styles::{write_styles_xml, CellStyle};

pub const SHEET_NAME: &str = "Yard Check";

/// Column widths in characters, in [`COLUMN_HEADERS`] order.
pub(crate) const COLUMN_WIDTHS: [f64; 5] = [26.0, 10.0, 22.0, 68.0, 14.0];

const DEFAULT_ROW_HEIGHT: f64 = 30.0;
const BANNER_ROW_HEIGHT: f64 = 22.0;
const TABLE_ROW_HEIGHT: f64 = 28.0;

/// 0-based row indices.
const INFO_ROW: u32 = 0;
const TITLE_ROW: u32 = 1;
const HEADER_ROW: u32 = 2;

const LOGO_WIDTH_PX: u32 = 220;
const LOGO_HEIGHT_PX: u32 = 64;

const CT_WORKBOOK: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
const CT_WORKSHEET: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
const CT_STYLES: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml";
const CT_DRAWING: &str = "application/vnd.openxmlformats-officedocument.drawing+xml";

/// Render the snapshot as an XLSX package.
///
/// # Errors
/// Returns an error if the ZIP container cannot be written.
pub fn render_spreadsheet(
    snapshot: &FormSnapshot,
    logo: Option<&LogoImage>,
    config: &ReportConfig,
) -> Result<Vec<u8>> {
    let mut sheet = build_worksheet(snapshot, &config.title);

    let mut workbook_rels = Relationships::default();
    workbook_rels.add(REL_WORKSHEET, "worksheets/sheet1.xml");
    workbook_rels.add(REL_STYLES, "styles.xml");

    let mut content_types = ContentTypes::new();
    content_types.add_override("xl/workbook.xml", CT_WORKBOOK);
    content_types.add_override("xl/worksheets/sheet1.xml", CT_WORKSHEET);
    content_types.add_override("xl/styles.xml", CT_STYLES);

    // Sheet -> drawing -> image, only when a logo resolved.
    let mut sheet_rels = Relationships::default();
    let logo_parts = logo.map(|logo| {
        let ext = logo.format().extension();
        content_types.add_default(ext, logo.format().mime_type());
        content_types.add_override("xl/drawings/drawing1.xml", CT_DRAWING);

        sheet.drawing_rel = Some(sheet_rels.add(REL_DRAWING, "../drawings/drawing1.xml"));

        let mut drawing_rels = Relationships::default();
        let media = format!("media/image1.{ext}");
        let image_rel = drawing_rels.add(REL_IMAGE, &format!("../{media}"));
        let anchor = PictureAnchor {
            col: 0,
            row: INFO_ROW,
            col_off_px: 18,
            row_off_px: 3,
            width_px: LOGO_WIDTH_PX,
            height_px: LOGO_HEIGHT_PX,
        };
        let drawing = write_drawing_xml(&anchor, &image_rel, "Logo");
        (logo, media, drawing, drawing_rels)
    });

    log::debug!(
        "xlsx: {} rows over columns {}, logo: {}",
        sheet.rows.len(),
        column_span(COLUMN_WIDTHS.len()),
        logo_parts.is_some()
    );

    let mut pkg = PackageWriter::new();
    pkg.add_part("[Content_Types].xml", content_types.to_xml().as_bytes())?;
    pkg.add_part("_rels/.rels", root_relationships("xl/workbook.xml").as_bytes())?;
    pkg.add_part("xl/workbook.xml", write_workbook_xml(&sheet).as_bytes())?;
    pkg.add_part("xl/_rels/workbook.xml.rels", workbook_rels.to_xml().as_bytes())?;
    pkg.add_part("xl/styles.xml", write_styles_xml().as_bytes())?;
    pkg.add_part("xl/worksheets/sheet1.xml", write_sheet_xml(&sheet).as_bytes())?;
    if let Some((logo, media, drawing, drawing_rels)) = &logo_parts {
        pkg.add_part(
            "xl/worksheets/_rels/sheet1.xml.rels",
            sheet_rels.to_xml().as_bytes(),
        )?;
        pkg.add_part("xl/drawings/drawing1.xml", drawing.as_bytes())?;
        pkg.add_part(
            "xl/drawings/_rels/drawing1.xml.rels",
            drawing_rels.to_xml().as_bytes(),
        )?;
        pkg.add_part(&format!("xl/{media}"), logo.bytes())?;
    }
    pkg.finish()
}

fn build_worksheet(snapshot: &FormSnapshot, title: &str) -> Worksheet {
    let last_col = u32::try_from(COLUMN_HEADERS.len() - 1).unwrap_or(0);
    let mut rows = Vec::with_capacity(3 + snapshot.rows().len());

    rows.push(SheetRow {
        row: INFO_ROW,
        height: BANNER_ROW_HEIGHT,
        cells: vec![SheetCell {
            col: 0,
            text: header_line_text(snapshot.metadata()),
            style: CellStyle::Info,
        }],
    });
    rows.push(SheetRow {
        row: TITLE_ROW,
        height: BANNER_ROW_HEIGHT,
        cells: vec![SheetCell {
            col: 0,
            text: title.to_string(),
            style: CellStyle::Title,
        }],
    });
    rows.push(SheetRow {
        row: HEADER_ROW,
        height: TABLE_ROW_HEIGHT,
        cells: table_cells(COLUMN_HEADERS, CellStyle::Header),
    });

    for (offset, report_row) in (1u32..).zip(report_rows(snapshot)) {
        // Odd offsets from the header row are striped (sheet rows 4, 6, ...).
        let style = if offset % 2 == 1 {
            CellStyle::DataStriped
        } else {
            CellStyle::Data
        };
        rows.push(SheetRow {
            row: HEADER_ROW + offset,
            height: TABLE_ROW_HEIGHT,
            cells: table_cells(report_row.cells(), style),
        });
    }

    let banner = |row| CellRange {
        start_row: row,
        start_col: 0,
        end_row: row,
        end_col: last_col,
    };

    Worksheet {
        rows,
        col_widths: COLUMN_WIDTHS.to_vec(),
        default_row_height: DEFAULT_ROW_HEIGHT,
        merges: vec![banner(INFO_ROW), banner(TITLE_ROW)],
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

fn table_cells(texts: [&str; 5], style: CellStyle) -> Vec<SheetCell> {
    (0u32..)
        .zip(texts)
        .map(|(col, text)| SheetCell {
            col,
            text: text.to_string(),
            style,
        })
        .collect()
}

/// `xl/workbook.xml` with the print area covering the used range.
fn write_workbook_xml(sheet: &Worksheet) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(XML_DECLARATION);
    out.push('\n');
    out.push_str(
        r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
    );
    out.push_str(&format!("xmlns:r=\"{NS_RELATIONSHIPS}\">"));
    out.push_str("<bookViews><workbookView activeTab=\"0\"/></bookViews>");
    out.push_str(&format!(
        "<sheets><sheet name=\"{}\" sheetId=\"1\" r:id=\"rId1\"/></sheets>",
        escape(SHEET_NAME)
    ));
    if let Some(dim) = sheet.dimension() {
        let area = format!(
            "{}!{}",
            quote_sheet_name(SHEET_NAME),
            absolute_range_ref(dim.start_row, dim.start_col, dim.end_row, dim.end_col)
        );
        out.push_str(&format!(
            "<definedNames><definedName name=\"_xlnm.Print_Area\" localSheetId=\"0\">{}</definedName></definedNames>",
            escape(&area)
        ));
    }
    out.push_str("</workbook>");
    out
}
