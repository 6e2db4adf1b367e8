//! DOCX serializer.
//!
//! The document body is a borderless one-cell table holding the logo, a
//! centered metadata line, a bold title, and the 26-row inspection table.
//! Layout is fixed: US Letter portrait with narrow margins so the whole
//! form fits on one printed page.

use crate::asset::LogoImage;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::report::{header_line, report_rows, LineSpan, COLUMN_HEADERS};
use crate::types::FormSnapshot;

use super::package::{
    root_relationships, ContentTypes, PackageWriter, Relationships, REL_IMAGE, REL_STYLES,
};
use super::xml::{escape, px_to_emu, NS_DRAWINGML, NS_PICTURE, NS_RELATIONSHIPS, XML_DECLARATION};

const NS_WORDML: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_WORD_DRAWING: &str =
    "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";

const CT_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
const CT_STYLES: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";

/// US Letter in twips.
const PAGE_WIDTH: u32 = 12_240;
const PAGE_HEIGHT: u32 = 15_840;
const PAGE_MARGIN: u32 = 360;
const CONTENT_WIDTH: u32 = PAGE_WIDTH - 2 * PAGE_MARGIN;

const BODY_FONT: &str = "Times New Roman";
/// Half-points.
const BODY_SIZE: u32 = 22;
const TITLE_SIZE: u32 = 24;

/// Exact table row height in twips.
const ROW_HEIGHT: u32 = 420;

/// Column widths as percent of the table width, in [`COLUMN_HEADERS`] order.
pub(crate) const COLUMN_PERCENT: [u32; 5] = [14, 6, 16, 56, 8];

const LOGO_WIDTH_PX: u32 = 300;
const LOGO_HEIGHT_PX: u32 = 86;

/// Render the snapshot as a DOCX package.
///
/// # Errors
/// Returns an error if the ZIP container cannot be written.
pub fn render_word(
    snapshot: &FormSnapshot,
    logo: Option<&LogoImage>,
    config: &ReportConfig,
) -> Result<Vec<u8>> {
    let mut doc_rels = Relationships::default();
    doc_rels.add(REL_STYLES, "styles.xml");

    let mut content_types = ContentTypes::new();
    content_types.add_override("word/document.xml", CT_DOCUMENT);
    content_types.add_override("word/styles.xml", CT_STYLES);

    let logo_part = logo.map(|logo| {
        let ext = logo.format().extension();
        content_types.add_default(ext, logo.format().mime_type());
        let target = format!("media/logo.{ext}");
        let rel_id = doc_rels.add(REL_IMAGE, &target);
        (logo, target, rel_id)
    });

    let document = write_document_xml(
        snapshot,
        logo_part.as_ref().map(|(_, target, rel_id)| (rel_id.as_str(), target.as_str())),
        config,
    );

    let mut pkg = PackageWriter::new();
    pkg.add_part("[Content_Types].xml", content_types.to_xml().as_bytes())?;
    pkg.add_part("_rels/.rels", root_relationships("word/document.xml").as_bytes())?;
    pkg.add_part("word/document.xml", document.as_bytes())?;
    pkg.add_part("word/styles.xml", write_styles_xml().as_bytes())?;
    pkg.add_part("word/_rels/document.xml.rels", doc_rels.to_xml().as_bytes())?;
    if let Some((logo, target, _)) = &logo_part {
        pkg.add_part(&format!("word/{target}"), logo.bytes())?;
    }
    pkg.finish()
}

/// `word/document.xml`. `logo` is the image relationship id and target.
fn write_document_xml(
    snapshot: &FormSnapshot,
    logo: Option<(&str, &str)>,
    config: &ReportConfig,
) -> String {
    let mut out = String::with_capacity(48 * 1024);
    out.push_str(XML_DECLARATION);
    out.push('\n');
    out.push_str(&format!(
        "<w:document xmlns:w=\"{NS_WORDML}\" xmlns:r=\"{NS_RELATIONSHIPS}\" \
         xmlns:wp=\"{NS_WORD_DRAWING}\" xmlns:a=\"{NS_DRAWINGML}\" xmlns:pic=\"{NS_PICTURE}\">"
    ));
    out.push_str("<w:body>");

    write_logo_table(&mut out, logo);
    write_metadata_paragraph(&mut out, &header_line(snapshot.metadata()));
    write_title_paragraph(&mut out, &config.title);
    write_form_table(&mut out, snapshot);

    out.push_str(&format!(
        "<w:sectPr><w:pgSz w:w=\"{PAGE_WIDTH}\" w:h=\"{PAGE_HEIGHT}\" w:orient=\"portrait\"/>\
         <w:pgMar w:top=\"{PAGE_MARGIN}\" w:right=\"{PAGE_MARGIN}\" w:bottom=\"{PAGE_MARGIN}\" \
         w:left=\"{PAGE_MARGIN}\" w:header=\"708\" w:footer=\"708\" w:gutter=\"0\"/></w:sectPr>"
    ));
    out.push_str("</w:body></w:document>");
    out
}

/// Full-width table with a single borderless cell around the logo.
fn write_logo_table(out: &mut String, logo: Option<(&str, &str)>) {
    const NO_BORDERS: &str = "<w:top w:val=\"nil\"/><w:left w:val=\"nil\"/>\
        <w:bottom w:val=\"nil\"/><w:right w:val=\"nil\"/>";

    out.push_str("<w:tbl><w:tblPr><w:tblW w:w=\"5000\" w:type=\"pct\"/><w:tblBorders>");
    out.push_str(NO_BORDERS);
    out.push_str("<w:insideH w:val=\"nil\"/><w:insideV w:val=\"nil\"/></w:tblBorders>");
    out.push_str("<w:tblLayout w:type=\"fixed\"/></w:tblPr>");
    out.push_str(&format!(
        "<w:tblGrid><w:gridCol w:w=\"{CONTENT_WIDTH}\"/></w:tblGrid>"
    ));
    out.push_str("<w:tr><w:tc><w:tcPr><w:tcW w:w=\"5000\" w:type=\"pct\"/><w:tcBorders>");
    out.push_str(NO_BORDERS);
    out.push_str("</w:tcBorders></w:tcPr>");
    match logo {
        Some((rel_id, target)) => {
            out.push_str("<w:p><w:pPr><w:jc w:val=\"center\"/></w:pPr><w:r>");
            write_inline_image(out, rel_id, target);
            out.push_str("</w:r></w:p>");
        }
        // A cell must hold at least one paragraph.
        None => out.push_str("<w:p/>"),
    }
    out.push_str("</w:tc></w:tr></w:tbl>");
}

fn write_inline_image(out: &mut String, rel_id: &str, target: &str) {
    let cx = px_to_emu(LOGO_WIDTH_PX);
    let cy = px_to_emu(LOGO_HEIGHT_PX);
    let name = target.rsplit('/').next().unwrap_or(target);
    out.push_str(&format!(
        "<w:drawing><wp:inline distT=\"0\" distB=\"0\" distL=\"0\" distR=\"0\">\
         <wp:extent cx=\"{cx}\" cy=\"{cy}\"/>\
         <wp:effectExtent l=\"0\" t=\"0\" r=\"0\" b=\"0\"/>\
         <wp:docPr id=\"1\" name=\"Logo\"/>\
         <wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect=\"1\"/></wp:cNvGraphicFramePr>\
         <a:graphic><a:graphicData uri=\"{NS_PICTURE}\"><pic:pic>\
         <pic:nvPicPr><pic:cNvPr id=\"0\" name=\"{}\"/><pic:cNvPicPr/></pic:nvPicPr>\
         <pic:blipFill><a:blip r:embed=\"{rel_id}\"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>\
         <pic:spPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>\
         <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></pic:spPr>\
         </pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing>",
        escape(name)
    ));
}

fn write_metadata_paragraph(out: &mut String, spans: &[LineSpan<'_>]) {
    out.push_str("<w:p><w:pPr><w:jc w:val=\"center\"/></w:pPr>");
    for span in spans {
        write_run(out, &span.text, span.bold, None);
    }
    out.push_str("</w:p>");
}

fn write_title_paragraph(out: &mut String, title: &str) {
    out.push_str("<w:p><w:pPr><w:jc w:val=\"center\"/></w:pPr>");
    write_run(out, title, true, Some(TITLE_SIZE));
    out.push_str("</w:p>");
}

/// Header row plus one row per form line, all with exact heights.
fn write_form_table(out: &mut String, snapshot: &FormSnapshot) {
    out.push_str("<w:tbl><w:tblPr><w:tblW w:w=\"5000\" w:type=\"pct\"/><w:tblBorders>");
    for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
        out.push_str(&format!(
            "<w:{edge} w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>"
        ));
    }
    out.push_str("</w:tblBorders><w:tblLayout w:type=\"fixed\"/></w:tblPr><w:tblGrid>");
    for pct in COLUMN_PERCENT {
        out.push_str(&format!("<w:gridCol w:w=\"{}\"/>", CONTENT_WIDTH * pct / 100));
    }
    out.push_str("</w:tblGrid>");

    write_table_row(out, &COLUMN_HEADERS, true);
    for row in report_rows(snapshot) {
        write_table_row(out, &row.cells(), false);
    }
    out.push_str("</w:tbl>");
}

fn write_table_row(out: &mut String, cells: &[&str; 5], bold: bool) {
    out.push_str(&format!(
        "<w:tr><w:trPr><w:trHeight w:val=\"{ROW_HEIGHT}\" w:hRule=\"exact\"/></w:trPr>"
    ));
    for (text, pct) in cells.iter().zip(COLUMN_PERCENT) {
        // Percentages are expressed in fiftieths.
        out.push_str(&format!(
            "<w:tc><w:tcPr><w:tcW w:w=\"{}\" w:type=\"pct\"/></w:tcPr>",
            pct * 50
        ));
        if text.is_empty() {
            out.push_str("<w:p/>");
        } else {
            out.push_str("<w:p>");
            write_run(out, text, bold, Some(BODY_SIZE));
            out.push_str("</w:p>");
        }
        out.push_str("</w:tc>");
    }
    out.push_str("</w:tr>");
}

fn write_run(out: &mut String, text: &str, bold: bool, size: Option<u32>) {
    out.push_str("<w:r>");
    if bold || size.is_some() {
        out.push_str("<w:rPr>");
        if bold {
            out.push_str("<w:b/><w:bCs/>");
        }
        if let Some(sz) = size {
            out.push_str(&format!("<w:sz w:val=\"{sz}\"/><w:szCs w:val=\"{sz}\"/>"));
        }
        out.push_str("</w:rPr>");
    }
    out.push_str("<w:t xml:space=\"preserve\">");
    out.push_str(&escape(text));
    out.push_str("</w:t></w:r>");
}

/// `word/styles.xml`: document-wide font and size, plus the table default.
fn write_styles_xml() -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(XML_DECLARATION);
    out.push('\n');
    out.push_str(&format!("<w:styles xmlns:w=\"{NS_WORDML}\">"));
    out.push_str(&format!(
        "<w:docDefaults><w:rPrDefault><w:rPr>\
         <w:rFonts w:ascii=\"{BODY_FONT}\" w:eastAsia=\"{BODY_FONT}\" w:hAnsi=\"{BODY_FONT}\" w:cs=\"{BODY_FONT}\"/>\
         <w:sz w:val=\"{BODY_SIZE}\"/><w:szCs w:val=\"{BODY_SIZE}\"/><w:lang w:val=\"en-US\"/>\
         </w:rPr></w:rPrDefault><w:pPrDefault/></w:docDefaults>"
    ));
    out.push_str(
        "<w:style w:type=\"paragraph\" w:default=\"1\" w:styleId=\"Normal\"><w:name w:val=\"Normal\"/></w:style>\
         <w:style w:type=\"table\" w:default=\"1\" w:styleId=\"TableNormal\"><w:name w:val=\"Normal Table\"/>\
         <w:tblPr><w:tblInd w:w=\"0\" w:type=\"dxa\"/><w:tblCellMar>\
         <w:top w:w=\"0\" w:type=\"dxa\"/><w:left w:w=\"108\" w:type=\"dxa\"/>\
         <w:bottom w:w=\"0\" w:type=\"dxa\"/><w:right w:w=\"108\" w:type=\"dxa\"/>\
         </w:tblCellMar></w:tblPr></w:style>",
    );
    out.push_str("</w:styles>");
    out
}
