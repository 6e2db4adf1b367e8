//! Drawing part holding the sheet logo.

use crate::export::xml::{escape, px_to_emu, NS_DRAWINGML, NS_RELATIONSHIPS, XML_DECLARATION};

/// Where and how large the picture sits, anchored to one cell.
pub(crate) struct PictureAnchor {
    /// 0-based anchor cell.
    pub col: u32,
    pub row: u32,
    /// Offset from the anchor cell's top-left corner, in pixels.
    pub col_off_px: u32,
    pub row_off_px: u32,
    /// Displayed size in pixels.
    pub width_px: u32,
    pub height_px: u32,
}

/// `xl/drawings/drawingN.xml` with a single one-cell-anchored picture.
pub(crate) fn write_drawing_xml(anchor: &PictureAnchor, image_rel: &str, name: &str) -> String {
    let cx = px_to_emu(anchor.width_px);
    let cy = px_to_emu(anchor.height_px);

    let mut out = String::with_capacity(1024);
    out.push_str(XML_DECLARATION);
    out.push('\n');
    out.push_str(&format!(
        "<xdr:wsDr xmlns:xdr=\"http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing\" \
         xmlns:a=\"{NS_DRAWINGML}\" xmlns:r=\"{NS_RELATIONSHIPS}\">"
    ));
    out.push_str("<xdr:oneCellAnchor>");
    out.push_str(&format!(
        "<xdr:from><xdr:col>{}</xdr:col><xdr:colOff>{}</xdr:colOff>\
         <xdr:row>{}</xdr:row><xdr:rowOff>{}</xdr:rowOff></xdr:from>",
        anchor.col,
        px_to_emu(anchor.col_off_px),
        anchor.row,
        px_to_emu(anchor.row_off_px)
    ));
    out.push_str(&format!("<xdr:ext cx=\"{cx}\" cy=\"{cy}\"/>"));
    out.push_str(&format!(
        "<xdr:pic><xdr:nvPicPr><xdr:cNvPr id=\"2\" name=\"{}\"/>\
         <xdr:cNvPicPr><a:picLocks noChangeAspect=\"1\"/></xdr:cNvPicPr></xdr:nvPicPr>\
         <xdr:blipFill><a:blip r:embed=\"{}\"/><a:stretch><a:fillRect/></a:stretch></xdr:blipFill>\
         <xdr:spPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>\
         <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></xdr:spPr></xdr:pic>",
        escape(name),
        escape(image_rel)
    ));
    out.push_str("<xdr:clientData/></xdr:oneCellAnchor></xdr:wsDr>");
    out
}
