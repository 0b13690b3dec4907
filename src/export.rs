//! Export pipeline — ties together expansion, rendering, composition, and
//! artifact emission into a single call.
//!
//! The export mode is selected once per call from the configuration and
//! fully determines which composer strategy runs; there are no transitions
//! mid-export. Rendering is batched with a full-gather barrier (sheet and
//! page geometry need the complete ordered buffer set) and the first
//! render failure aborts the whole batch.

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::color::ColorRecord;
use crate::compose::{compose_individual, compose_page, compose_sheet, pdf_page, png_bytes};
use crate::error::ExportError;
use crate::expand::expand_labels;
use crate::render::{prepare_visual, RenderOptions, Rasterizer};
use crate::style::LabelStyle;
use crate::templates::{get_template, registry, PageSize};
use crate::units::{inches_to_pixels, DPI_SCREEN};

/// Output byte format. PDF is honored by the one-per-page strategy; the
/// other strategies fall back to PNG with a warning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    #[default]
    Png,
    Pdf,
}

/// Which composition strategy runs, plus its mode-specific parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ExportMode {
    /// One output file per label, no pagination.
    Individual,
    /// One physical page per label, label centered.
    OnePerPage {
        #[serde(flatten)]
        page_size: PageSize,
    },
    /// Grid-paginated composite pages matching a label sheet template.
    #[serde(rename_all = "camelCase")]
    Sheet {
        #[serde(rename = "sheetTemplate")]
        template: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        custom_columns: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        custom_rows: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        custom_spacing: Option<f64>,
    },
}

impl Default for ExportMode {
    fn default() -> Self {
        ExportMode::Individual
    }
}

impl ExportMode {
    /// Strategy name used in logs and summaries.
    pub fn strategy(&self) -> &'static str {
        match self {
            ExportMode::Individual => "individual",
            ExportMode::OnePerPage { .. } => "one-per-page",
            ExportMode::Sheet { .. } => "sheet",
        }
    }
}

/// Complete export configuration. Plain JSON-serializable data; unknown
/// fields are ignored and missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportConfig {
    #[serde(flatten)]
    pub mode: ExportMode,
    pub format: ArtifactFormat,
    /// Render quality multiplier shared by labels and page canvases.
    pub scale: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::new(ExportMode::default())
    }
}

impl ExportConfig {
    pub fn new(mode: ExportMode) -> Self {
        Self {
            mode,
            format: ArtifactFormat::Png,
            scale: RenderOptions::default().scale,
        }
    }
}

/// Destination for finished artifacts. Artifacts are handed over serially,
/// in order; implementations own any pacing policy.
pub trait ArtifactSink {
    fn download_file(&mut self, bytes: &[u8], filename: &str) -> Result<(), ExportError>;
}

/// Writes artifacts into a directory. The optional pacing delay between
/// successive files mirrors the throttle browsers need for rapid-fire
/// automated downloads; it is a policy knob, not a correctness requirement.
pub struct FsSink {
    dir: PathBuf,
    pacing: Duration,
    wrote_any: bool,
}

impl FsSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            pacing: Duration::ZERO,
            wrote_any: false,
        }
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }
}

impl ArtifactSink for FsSink {
    fn download_file(&mut self, bytes: &[u8], filename: &str) -> Result<(), ExportError> {
        if self.wrote_any && !self.pacing.is_zero() {
            thread::sleep(self.pacing);
        }
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(filename), bytes)?;
        self.wrote_any = true;
        Ok(())
    }
}

/// Collects artifacts in memory; used by tests and previews.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub artifacts: Vec<(String, Vec<u8>)>,
}

impl ArtifactSink for MemorySink {
    fn download_file(&mut self, bytes: &[u8], filename: &str) -> Result<(), ExportError> {
        self.artifacts.push((filename.to_string(), bytes.to_vec()));
        Ok(())
    }
}

/// What an export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub strategy: &'static str,
    pub labels: usize,
    pub filenames: Vec<String>,
}

/// Run a full export: expand the selection, render every label, compose
/// according to the configured mode, and emit named artifacts through the
/// sink. Fails fast on the first configuration or render error; nothing is
/// emitted for a failed batch beyond artifacts already handed to the sink.
pub fn run_export(
    colors: &[ColorRecord],
    style: &LabelStyle,
    config: &ExportConfig,
    rasterizer: &dyn Rasterizer,
    sink: &mut dyn ArtifactSink,
) -> Result<ExportSummary, ExportError> {
    run_export_at(colors, style, config, rasterizer, sink, Utc::now().timestamp_millis())
}

/// Like [`run_export`] with an explicit batch timestamp, for reproducible
/// artifact names.
pub fn run_export_at(
    colors: &[ColorRecord],
    style: &LabelStyle,
    config: &ExportConfig,
    rasterizer: &dyn Rasterizer,
    sink: &mut dyn ArtifactSink,
    batch_stamp: i64,
) -> Result<ExportSummary, ExportError> {
    if config.scale <= 0.0 {
        return Err(ExportError::Configuration(format!(
            "render scale must be positive, got {}",
            config.scale
        )));
    }

    let instances = expand_labels(colors);
    if instances.is_empty() {
        return Err(ExportError::Configuration(
            "selection expands to zero labels".to_string(),
        ));
    }

    // Configuration errors that are detectable before rendering.
    validate_geometry(style, &config.mode)?;

    // Full-gather barrier: every buffer is rendered before composition
    // starts, because page and sheet geometry depend on the complete set.
    let options = RenderOptions {
        scale: config.scale,
        background: None,
    };
    let mut buffers = Vec::with_capacity(instances.len());
    for instance in &instances {
        let visual = prepare_visual(instance, style);
        buffers.push(rasterizer.render_to_pixels(&visual, &options)?);
    }

    let mut artifacts: Vec<(String, Vec<u8>)> = Vec::new();
    match &config.mode {
        ExportMode::Individual => {
            if config.format == ArtifactFormat::Pdf {
                log::warn!("PDF export is not supported in individual mode; producing PNG");
            }
            for (i, buffer) in compose_individual(buffers).iter().enumerate() {
                artifacts.push((
                    format!("label-{}-{batch_stamp}.png", i + 1),
                    png_bytes(buffer)?,
                ));
            }
        }
        ExportMode::OnePerPage { page_size } => {
            let (page_w_in, page_h_in) = page_size.dimensions();
            for (i, buffer) in buffers.iter().enumerate() {
                let (ext, bytes) = match config.format {
                    ArtifactFormat::Pdf => (
                        "pdf",
                        pdf_page(buffer, page_w_in, page_h_in, config.scale, "Paint Labels")?,
                    ),
                    ArtifactFormat::Png => {
                        let page_w_px =
                            inches_to_pixels(page_w_in, DPI_SCREEN * config.scale).round() as u32;
                        let page_h_px =
                            inches_to_pixels(page_h_in, DPI_SCREEN * config.scale).round() as u32;
                        ("png", png_bytes(&compose_page(buffer, page_w_px, page_h_px)?)?)
                    }
                };
                artifacts.push((
                    format!("labels-document-page-{}-{batch_stamp}.{ext}", i + 1),
                    bytes,
                ));
            }
        }
        ExportMode::Sheet {
            template,
            custom_columns,
            custom_rows,
            custom_spacing,
        } => {
            if config.format == ArtifactFormat::Pdf {
                log::warn!("PDF export is not supported in sheet mode; producing PNG");
            }
            let (columns, rows, spacing) =
                resolve_sheet_geometry(template, *custom_columns, *custom_rows, *custom_spacing);
            // Spacing is defined in px at 96 dpi; scale it into the same
            // coordinate space as the rendered buffers.
            let spacing_px = (spacing * config.scale).round() as u32;
            let pages = compose_sheet(&buffers, columns, rows, spacing_px)?;
            for (i, page) in pages.iter().enumerate() {
                artifacts.push((
                    format!("labels-page-{}-{batch_stamp}.png", i + 1),
                    png_bytes(page)?,
                ));
            }
        }
    }

    let mut filenames = Vec::with_capacity(artifacts.len());
    for (filename, bytes) in &artifacts {
        sink.download_file(bytes, filename)?;
        filenames.push(filename.clone());
    }

    log::info!(
        "exported {} label(s) as {} artifact(s) in {} mode",
        instances.len(),
        filenames.len(),
        config.mode.strategy()
    );

    Ok(ExportSummary {
        strategy: config.mode.strategy(),
        labels: instances.len(),
        filenames,
    })
}

/// Pre-composition geometry checks.
fn validate_geometry(style: &LabelStyle, mode: &ExportMode) -> Result<(), ExportError> {
    if style.dimensions.width <= 0.0 || style.dimensions.height <= 0.0 {
        return Err(ExportError::Configuration(format!(
            "label dimensions must be positive, got {}×{} in",
            style.dimensions.width, style.dimensions.height
        )));
    }
    match mode {
        ExportMode::OnePerPage { page_size } => {
            let (page_w, page_h) = page_size.dimensions();
            if style.dimensions.width > page_w || style.dimensions.height > page_h {
                return Err(ExportError::Configuration(format!(
                    "label ({}×{} in) does not fit the configured page ({page_w}×{page_h} in)",
                    style.dimensions.width, style.dimensions.height
                )));
            }
        }
        ExportMode::Sheet {
            template,
            custom_columns,
            custom_rows,
            ..
        } => {
            let (columns, rows, _) =
                resolve_sheet_geometry(template, *custom_columns, *custom_rows, None);
            if columns * rows == 0 {
                return Err(ExportError::Configuration(format!(
                    "sheet grid has zero area ({columns} columns × {rows} rows)"
                )));
            }
        }
        ExportMode::Individual => {}
    }
    Ok(())
}

/// Resolve columns/rows/spacing from the named template, applying custom
/// overrides only when the selection resolves to the `custom` template.
fn resolve_sheet_geometry(
    template_id: &str,
    custom_columns: Option<u32>,
    custom_rows: Option<u32>,
    custom_spacing: Option<f64>,
) -> (u32, u32, f64) {
    let template = get_template(template_id);
    let is_custom =
        template_id == "custom" || !registry().iter().any(|(id, _)| *id == template_id);
    if is_custom {
        (
            custom_columns.unwrap_or(template.columns),
            custom_rows.unwrap_or(template.rows),
            custom_spacing.unwrap_or(template.spacing),
        )
    } else {
        (template.columns, template.rows, template.spacing)
    }
}
