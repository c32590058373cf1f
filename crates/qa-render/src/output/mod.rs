//! Figure export: SVG always, PNG/PDF behind cargo features.

pub mod svg;

#[cfg(feature = "pdf")]
pub mod pdf;
#[cfg(feature = "png")]
pub mod png;

use crate::{RenderError, Result};

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Svg,
    #[cfg(feature = "png")]
    Png,
    #[cfg(feature = "pdf")]
    Pdf,
}

impl ExportFormat {
    /// Parse a format name; unknown or not-compiled-in formats are errors.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            #[cfg(feature = "png")]
            "png" => Ok(Self::Png),
            #[cfg(feature = "pdf")]
            "pdf" => Ok(Self::Pdf),
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }

    /// File extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            #[cfg(feature = "png")]
            Self::Png => "png",
            #[cfg(feature = "pdf")]
            Self::Pdf => "pdf",
        }
    }

    /// Convert a finished SVG string into bytes in this format.
    pub fn render_bytes(&self, svg: &str, dpi: u32) -> Result<Vec<u8>> {
        match self {
            Self::Svg => Ok(svg.as_bytes().to_vec()),
            #[cfg(feature = "png")]
            Self::Png => png::svg_to_png(svg, dpi),
            #[cfg(feature = "pdf")]
            Self::Pdf => {
                let _ = dpi;
                pdf::svg_to_pdf(svg)
            }
        }
    }
}
