//! # label-forge – paint color label export engine
//!
//! This crate takes saved paint colors (with optional per-sheen can
//! inventory) and produces print-ready label artifacts. The pipeline
//! stages are:
//!
//! 1. **Expand** – colors × sheens × can quantities → ordered label
//!    instances ([`expand`])
//! 2. **Prepare** – resolve style policies into a per-label visual
//!    description ([`render`])
//! 3. **Rasterize** – visual description → pixel buffer, via the
//!    [`render::Rasterizer`] collaborator boundary
//! 4. **Compose** – buffers → paginated pages or sheet grids ([`compose`])
//! 5. **Emit** – named PNG/PDF artifacts through a sink ([`export`])
//!
//! Around the core sit the static color catalog ([`catalog`]), the sheet
//! template registry ([`templates`]), and session state with key-value
//! JSON persistence ([`library`], [`palette`], [`storage`]).

pub mod catalog;
pub mod color;
pub mod compose;
pub mod error;
pub mod expand;
pub mod export;
pub mod inventory;
pub mod library;
pub mod palette;
pub mod render;
pub mod storage;
pub mod style;
pub mod templates;
pub mod units;

// Re-exports for convenience
pub use error::{ExportError, StorageError};
pub use expand::{expand_labels, LabelInstance};
pub use export::{run_export, ArtifactFormat, ExportConfig, ExportMode};
pub use render::{PixelBuffer, Rasterizer, SwatchRasterizer};
pub use style::LabelStyle;
