//! Fixed stylesheet for the yard check sheet.
//!
//! The sheet only ever uses six cell formats, so `styles.xml` is static and
//! [`CellStyle`] maps straight onto `cellXfs` indices.

use crate::export::xml::XML_DECLARATION;

/// Light gray used to stripe alternate data rows.
pub(crate) const STRIPE_ARGB: &str = "FFF2F2F2";

/// Index into `cellXfs`. Index 0 is the unused workbook default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CellStyle {
    /// Metadata banner: bold 13pt, left.
    Info,
    /// Title banner: bold 13pt, centered.
    Title,
    /// Column headers: bold 12pt, centered, thin border.
    Header,
    /// Data cell: thin border.
    Data,
    /// Data cell on a striped row: thin border and gray fill.
    DataStriped,
}

impl CellStyle {
    pub(crate) fn xf_index(self) -> u32 {
        match self {
            Self::Info => 1,
            Self::Title => 2,
            Self::Header => 3,
            Self::Data => 4,
            Self::DataStriped => 5,
        }
    }
}

pub(crate) fn write_styles_xml() -> String {
    let mut out = String::with_capacity(2048);
    out.push_str(XML_DECLARATION);
    out.push('\n');
    out.push_str(
        r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );

    // fonts: 0 body, 1 banner, 2 header
    out.push_str("<fonts count=\"3\">");
    out.push_str(&font_xml(false, 11));
    out.push_str(&font_xml(true, 13));
    out.push_str(&font_xml(true, 12));
    out.push_str("</fonts>");

    // fills: 0 and 1 are reserved by Excel, 2 is the stripe
    out.push_str("<fills count=\"3\">");
    out.push_str("<fill><patternFill patternType=\"none\"/></fill>");
    out.push_str("<fill><patternFill patternType=\"gray125\"/></fill>");
    out.push_str(&format!(
        "<fill><patternFill patternType=\"solid\"><fgColor rgb=\"{STRIPE_ARGB}\"/>\
         <bgColor indexed=\"64\"/></patternFill></fill>"
    ));
    out.push_str("</fills>");

    // borders: 0 none, 1 thin on all sides
    out.push_str("<borders count=\"2\">");
    out.push_str("<border><left/><right/><top/><bottom/><diagonal/></border>");
    out.push_str("<border>");
    for side in ["left", "right", "top", "bottom"] {
        out.push_str(&format!(
            "<{side} style=\"thin\"><color indexed=\"64\"/></{side}>"
        ));
    }
    out.push_str("<diagonal/></border>");
    out.push_str("</borders>");

    out.push_str(
        "<cellStyleXfs count=\"1\"><xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/></cellStyleXfs>",
    );

    // Order must match CellStyle::xf_index.
    out.push_str("<cellXfs count=\"6\">");
    out.push_str(&xf_xml(0, 0, 0, None));
    out.push_str(&xf_xml(1, 0, 0, Some("left")));
    out.push_str(&xf_xml(1, 0, 0, Some("center")));
    out.push_str(&xf_xml(2, 0, 1, Some("center")));
    out.push_str(&xf_xml(0, 0, 1, None));
    out.push_str(&xf_xml(0, 2, 1, None));
    out.push_str("</cellXfs>");

    out.push_str(
        "<cellStyles count=\"1\"><cellStyle name=\"Normal\" xfId=\"0\" builtinId=\"0\"/></cellStyles>",
    );
    out.push_str("</styleSheet>");
    out
}

fn font_xml(bold: bool, size: u32) -> String {
    format!(
        "<font>{}<sz val=\"{size}\"/><name val=\"Calibri\"/><family val=\"2\"/></font>",
        if bold { "<b/>" } else { "" }
    )
}

fn xf_xml(font: u32, fill: u32, border: u32, horizontal: Option<&str>) -> String {
    let mut xf = format!(
        "<xf numFmtId=\"0\" fontId=\"{font}\" fillId=\"{fill}\" borderId=\"{border}\" xfId=\"0\""
    );
    if font != 0 {
        xf.push_str(" applyFont=\"1\"");
    }
    if fill != 0 {
        xf.push_str(" applyFill=\"1\"");
    }
    if border != 0 {
        xf.push_str(" applyBorder=\"1\"");
    }
    match horizontal {
        Some(h) => xf.push_str(&format!(
            " applyAlignment=\"1\"><alignment horizontal=\"{h}\"/></xf>"
        )),
        None => xf.push_str("/>"),
    }
    xf
}
