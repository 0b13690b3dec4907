//! Export composition — turns an ordered batch of rendered label buffers
//! into final output artifacts.
//!
//! Three strategies, each a pure transformation of (ordered buffers,
//! layout parameters) → (ordered artifacts):
//! - **individual**: identity pass-through, one file per label
//! - **one-per-page**: each label centered on a physical page (PNG canvas
//!   or single-page PDF)
//! - **sheet**: buffers partitioned into column×row grids matching
//!   adhesive label stock, one composite canvas per page

use std::io::Cursor;

use image::{imageops, ImageFormat, Rgba, RgbaImage};
use printpdf::{
    Color, LinePoint, Mm, Op, PaintMode, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point,
    Polygon, PolygonRing, Pt, RawImage, Rgb, WindingOrder, XObjectTransform,
};

use crate::error::ExportError;
use crate::render::PixelBuffer;
use crate::units::{inches_to_points, pixels_to_inches, points_to_millimeters, DPI_SCREEN};

/// Identity strategy: one artifact per buffer, content and order preserved.
pub fn compose_individual(buffers: Vec<PixelBuffer>) -> Vec<PixelBuffer> {
    buffers
}

/// Center one label buffer on an opaque white page canvas.
///
/// The label must fit: an oversized label is a configuration error
/// surfaced to the caller, never silently cropped.
pub fn compose_page(
    buffer: &PixelBuffer,
    page_width_px: u32,
    page_height_px: u32,
) -> Result<PixelBuffer, ExportError> {
    let (label_w, label_h) = buffer.dimensions();
    if label_w > page_width_px || label_h > page_height_px {
        return Err(ExportError::Configuration(format!(
            "label ({label_w}×{label_h} px) does not fit the configured page \
             ({page_width_px}×{page_height_px} px)"
        )));
    }

    // Labels render with transparent backgrounds, so the page fill goes
    // down first, underneath.
    let mut page = RgbaImage::from_pixel(page_width_px, page_height_px, Rgba([255, 255, 255, 255]));
    let offset_x = (page_width_px - label_w) / 2;
    let offset_y = (page_height_px - label_h) / 2;
    imageops::overlay(&mut page, buffer, offset_x as i64, offset_y as i64);
    Ok(page)
}

/// Compose one label centered on a single-page PDF.
///
/// The page is sized in millimeters from the configured inches; the label
/// buffer is embedded as an image XObject. At dpi 72 printpdf maps one
/// pixel to one point, so the scale factor is `desired_pt / px`.
pub fn pdf_page(
    buffer: &PixelBuffer,
    page_width_in: f64,
    page_height_in: f64,
    render_scale: f64,
    title: &str,
) -> Result<Vec<u8>, ExportError> {
    let page_w_pt = inches_to_points(page_width_in);
    let page_h_pt = inches_to_points(page_height_in);

    let (label_w_px, label_h_px) = buffer.dimensions();
    let label_w_pt = inches_to_points(pixels_to_inches(
        label_w_px as f64 / render_scale,
        DPI_SCREEN,
    ));
    let label_h_pt = inches_to_points(pixels_to_inches(
        label_h_px as f64 / render_scale,
        DPI_SCREEN,
    ));

    if label_w_pt > page_w_pt || label_h_pt > page_h_pt {
        return Err(ExportError::Configuration(format!(
            "label ({label_w_pt:.1}×{label_h_pt:.1} pt) does not fit the configured page \
             ({page_w_pt:.1}×{page_h_pt:.1} pt)"
        )));
    }

    let mut doc = PdfDocument::new(title);
    let mut warnings: Vec<PdfWarnMsg> = Vec::new();

    // Flatten the transparent-background label onto opaque white before
    // embedding; PDF viewers disagree on PNG alpha.
    let mut flat = RgbaImage::from_pixel(label_w_px, label_h_px, Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut flat, buffer, 0, 0);
    let png = png_bytes(&flat)?;
    let raw = RawImage::decode_from_bytes(&png, &mut warnings)
        .map_err(|e| ExportError::Encode(format!("PDF image embed failed: {e}")))?;
    let xobj_id = doc.add_image(&raw);

    let mut ops = Vec::new();
    fill_page_white(&mut ops, page_w_pt as f32, page_h_pt as f32);

    let translate_x = (page_w_pt - label_w_pt) / 2.0;
    let translate_y = (page_h_pt - label_h_pt) / 2.0;
    ops.push(Op::UseXobject {
        id: xobj_id,
        transform: XObjectTransform {
            translate_x: Some(Pt(translate_x as f32)),
            translate_y: Some(Pt(translate_y as f32)),
            dpi: Some(72.0),
            scale_x: Some((label_w_pt / label_w_px as f64) as f32),
            scale_y: Some((label_h_pt / label_h_px as f64) as f32),
            rotate: None,
        },
    });

    let page = PdfPage::new(
        Mm(points_to_millimeters(page_w_pt) as f32),
        Mm(points_to_millimeters(page_h_pt) as f32),
        ops,
    );
    doc.with_pages(vec![page]);
    Ok(doc.save(&PdfSaveOptions::default(), &mut Vec::new()))
}

/// Opaque white background rectangle covering the whole page.
fn fill_page_white(ops: &mut Vec<Op>, page_w_pt: f32, page_h_pt: f32) {
    ops.push(Op::SetFillColor {
        col: Color::Rgb(Rgb {
            r: 1.0,
            g: 1.0,
            b: 1.0,
            icc_profile: None,
        }),
    });
    let corner = |x: f32, y: f32| LinePoint {
        p: Point { x: Pt(x), y: Pt(y) },
        bezier: false,
    };
    ops.push(Op::DrawPolygon {
        polygon: Polygon {
            rings: vec![PolygonRing {
                points: vec![
                    corner(0.0, 0.0),
                    corner(page_w_pt, 0.0),
                    corner(page_w_pt, page_h_pt),
                    corner(0.0, page_h_pt),
                ],
            }],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        },
    });
}

/// Grid-composite strategy: partition buffers into consecutive chunks of
/// `columns × rows` and place each chunk on a white composite canvas,
/// left-to-right, top-to-bottom, matching the input order.
///
/// All buffers in one batch must share the same dimensions (they derive
/// from a single label style); the composite canvas is sized from the
/// first buffer of each chunk. The last page may be partial — unused
/// cells stay blank white.
pub fn compose_sheet(
    buffers: &[PixelBuffer],
    columns: u32,
    rows: u32,
    spacing_px: u32,
) -> Result<Vec<PixelBuffer>, ExportError> {
    let labels_per_page = columns * rows;
    if labels_per_page == 0 {
        return Err(ExportError::Configuration(format!(
            "sheet grid has zero area ({columns} columns × {rows} rows)"
        )));
    }
    if buffers.is_empty() {
        return Ok(Vec::new());
    }

    let (label_w, label_h) = buffers[0].dimensions();
    if let Some(odd) = buffers.iter().find(|b| b.dimensions() != (label_w, label_h)) {
        return Err(ExportError::Configuration(format!(
            "sheet composition requires uniform label dimensions: \
             expected {label_w}×{label_h} px, found {}×{} px",
            odd.width(),
            odd.height()
        )));
    }

    let page_width = columns * label_w + (columns - 1) * spacing_px;
    let page_height = rows * label_h + (rows - 1) * spacing_px;

    let mut pages = Vec::with_capacity(buffers.len().div_ceil(labels_per_page as usize));
    for chunk in buffers.chunks(labels_per_page as usize) {
        let mut page = RgbaImage::from_pixel(page_width, page_height, Rgba([255, 255, 255, 255]));
        for (idx, buffer) in chunk.iter().enumerate() {
            let col = idx as u32 % columns;
            let row = idx as u32 / columns;
            let x = col * (label_w + spacing_px);
            let y = row * (label_h + spacing_px);
            imageops::overlay(&mut page, buffer, x as i64, y as i64);
        }
        pages.push(page);
    }
    Ok(pages)
}

/// Encode a buffer as PNG bytes.
pub fn png_bytes(buffer: &PixelBuffer) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    buffer.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
