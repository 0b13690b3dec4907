//! Per-label visual preparation and the rasterization boundary.
//!
//! The core prepares a [`LabelVisual`] — the fully resolved description of
//! one label (pixel geometry, concrete colors, ordered text fields) — and
//! hands it to a [`Rasterizer`], whose contract is "visual description in,
//! pixel buffer out". How text and shape layout happen inside a single
//! label is the rasterizer's concern; the composer only ever looks at the
//! resulting buffer's pixel dimensions.

use image::{Rgba, RgbaImage};

use crate::error::ExportError;
use crate::expand::LabelInstance;
use crate::style::{FontFamily, LabelLayout, LabelShape, LabelStyle, TextAlign};
use crate::units::{inches_to_pixels, DPI_SCREEN};

/// Raster snapshot of a single label.
pub type PixelBuffer = RgbaImage;

/// Options handed to the rasterizer for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Quality multiplier on top of the 96 dpi base geometry. Export paths
    /// render at 3× so labels and pages share one coordinate space.
    pub scale: f64,
    /// Backdrop fill behind the label shape; `None` leaves it transparent
    /// so page composition can paint its own background underneath.
    pub background: Option<[u8; 4]>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 3.0,
            background: None,
        }
    }
}

/// Which label field a [`TextField`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Name,
    Brand,
    Sheen,
    Code,
    Hex,
    Rgb,
}

/// One resolved line of label text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextField {
    pub kind: FieldKind,
    pub text: String,
    pub font_stack: &'static str,
    pub weight: u16,
    pub size_pt: f64,
    pub align: TextAlign,
    pub color: [u8; 3],
    pub opacity: f32,
}

/// Fully resolved visual description of one label at 96 dpi base scale.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelVisual {
    /// Base dimensions in px at 96 dpi; the rasterizer multiplies by
    /// `RenderOptions::scale`.
    pub width_px: f64,
    pub height_px: f64,
    pub shape: LabelShape,
    /// Corner radius in base px; meaningful for `Rounded` only.
    pub corner_radius_px: f64,
    pub background: [u8; 3],
    pub line_height_factor: f64,
    pub fields: Vec<TextField>,
}

/// Resolve a label instance + style into a visual description.
///
/// Pure: display-name precedence, color policy resolution, display-field
/// toggles, and layout-specific field ordering all happen here, so every
/// rasterizer sees identical inputs for identical configuration.
pub fn prepare_visual(instance: &LabelInstance, style: &LabelStyle) -> LabelVisual {
    let background = style.resolve_background(&instance.color.hex);
    let text_color = style.resolve_text_color(background);
    let ty = &style.typography;

    let field = |kind: FieldKind, text: String, size: f64, mono: bool, opacity: f32| TextField {
        kind,
        text,
        font_stack: if mono {
            FontFamily::Mono.stack()
        } else {
            ty.font_family.stack()
        },
        weight: ty.font_weight.numeric(),
        size_pt: size,
        align: ty.alignment,
        color: text_color,
        opacity,
    };

    let mut fields = Vec::new();
    fields.push(field(
        FieldKind::Name,
        instance.display_name().to_string(),
        ty.name_size,
        false,
        1.0,
    ));
    if style.show_brand {
        fields.push(field(
            FieldKind::Brand,
            instance.color.brand.clone(),
            ty.brand_size,
            false,
            0.9,
        ));
    }
    if style.show_sheen {
        if let Some(sheen) = instance.sheen {
            let text = match style.layout {
                LabelLayout::Detailed => format!("Sheen: {}", sheen.display_name()),
                _ => sheen.display_name().to_string(),
            };
            fields.push(field(FieldKind::Sheen, text, ty.details_size, false, 0.75));
        }
    }
    if style.show_code {
        if let Some(code) = &instance.color.code {
            let text = match style.layout {
                LabelLayout::Detailed => format!("Code: {code}"),
                _ => code.clone(),
            };
            fields.push(field(FieldKind::Code, text, ty.code_size, false, 0.75));
        }
    }
    // Minimal layout stops at the code field.
    if style.layout != LabelLayout::Minimal {
        if style.show_hex {
            let hex = instance.color.hex.to_uppercase();
            let text = match style.layout {
                LabelLayout::Detailed => format!("HEX: {hex}"),
                _ => hex,
            };
            fields.push(field(FieldKind::Hex, text, ty.details_size, true, 0.75));
        }
        if style.show_rgb {
            let [r, g, b] = instance.color.rgb;
            let text = match style.layout {
                LabelLayout::Detailed => format!("RGB: {r}, {g}, {b}"),
                _ => format!("RGB({r}, {g}, {b})"),
            };
            fields.push(field(FieldKind::Rgb, text, ty.details_size, true, 0.75));
        }
    }

    LabelVisual {
        width_px: inches_to_pixels(style.dimensions.width, DPI_SCREEN),
        height_px: inches_to_pixels(style.dimensions.height, DPI_SCREEN),
        shape: style.shape,
        corner_radius_px: style.border_radius,
        background,
        line_height_factor: ty.line_height.factor(),
        fields,
    }
}

/// External rasterization capability: converts a visual description into a
/// pixel buffer. Implementations may run concurrently across independent
/// labels; a failure for any label aborts the whole export batch.
pub trait Rasterizer {
    fn render_to_pixels(
        &self,
        visual: &LabelVisual,
        options: &RenderOptions,
    ) -> Result<PixelBuffer, ExportError>;
}

/// Built-in rasterizer that paints the label as a color swatch: the
/// resolved background filled into the configured shape, everything
/// outside the shape left to the requested backdrop. Text layout belongs
/// to richer rasterizers (e.g. a headless-browser capture); the swatch
/// output is sufficient for geometry-exact previews and print sheets.
#[derive(Debug, Default)]
pub struct SwatchRasterizer;

impl Rasterizer for SwatchRasterizer {
    fn render_to_pixels(
        &self,
        visual: &LabelVisual,
        options: &RenderOptions,
    ) -> Result<PixelBuffer, ExportError> {
        if visual.width_px <= 0.0 || visual.height_px <= 0.0 {
            return Err(ExportError::Render(format!(
                "label has zero area: {}×{} px",
                visual.width_px, visual.height_px
            )));
        }
        if options.scale <= 0.0 {
            return Err(ExportError::Render(format!(
                "render scale must be positive, got {}",
                options.scale
            )));
        }

        let width = (visual.width_px * options.scale).round().max(1.0) as u32;
        let height = (visual.height_px * options.scale).round().max(1.0) as u32;
        let radius = visual.corner_radius_px * options.scale;

        let backdrop = Rgba(options.background.unwrap_or([0, 0, 0, 0]));
        let fill = Rgba([
            visual.background[0],
            visual.background[1],
            visual.background[2],
            255,
        ]);

        let mut buffer = RgbaImage::from_pixel(width, height, backdrop);
        for (x, y, pixel) in buffer.enumerate_pixels_mut() {
            // Sample at the pixel center.
            let px = x as f64 + 0.5;
            let py = y as f64 + 0.5;
            if inside_shape(visual.shape, px, py, width as f64, height as f64, radius) {
                *pixel = fill;
            }
        }
        Ok(buffer)
    }
}

/// Point-in-shape test for the label outline.
fn inside_shape(shape: LabelShape, px: f64, py: f64, w: f64, h: f64, radius: f64) -> bool {
    match shape {
        LabelShape::Rectangle => true,
        LabelShape::Rounded => {
            let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
            // Outside the corner boxes every point is inside; within a
            // corner box the point must fall inside the quarter circle.
            let dx = if px < r {
                r - px
            } else if px > w - r {
                px - (w - r)
            } else {
                0.0
            };
            let dy = if py < r {
                r - py
            } else if py > h - r {
                py - (h - r)
            } else {
                0.0
            };
            dx * dx + dy * dy <= r * r
        }
        LabelShape::Circle => {
            // An ellipse when the label is not square, matching a CSS 50%
            // border radius.
            let nx = (px - w / 2.0) / (w / 2.0);
            let ny = (py - h / 2.0) / (h / 2.0);
            nx * nx + ny * ny <= 1.0
        }
    }
}
