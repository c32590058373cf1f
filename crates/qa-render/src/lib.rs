//! # qa-render
//!
//! SVG plot rendering for trackqa.
//!
//! The crate draws QA figures on an immediate-mode SVG canvas: 1D error-bar
//! distributions, 2D color maps, X-profiles, and multi-configuration overlay
//! plots with ratio panels. Finished figures accumulate in a caller-owned
//! [`book::CanvasBook`] and are exported one file per canvas (SVG always;
//! PNG/PDF behind the `png`/`pdf` cargo features).

pub mod book;
pub mod canvas;
pub mod color;
pub mod config;
pub mod header;
pub mod layout;
pub mod output;
pub mod plots;
pub mod primitives;
pub mod text;
pub mod theme;

use thiserror::Error;

/// Rendering and export errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Style-config parsing or resolution failed.
    #[error("config error: {0}")]
    Config(String),
    /// A figure could not be laid out.
    #[error("layout error: {0}")]
    Layout(String),
    /// The requested export format is not compiled in or unknown.
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),
    /// I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "png")]
    /// PNG encoding failed.
    #[error("PNG encoding error: {0}")]
    Png(String),
    #[cfg(feature = "pdf")]
    /// PDF conversion failed.
    #[error("PDF conversion error: {0}")]
    Pdf(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, RenderError>;
