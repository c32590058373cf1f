//! The canvas book: the caller-owned mapping from display title to finished
//! figure.
//!
//! The traversal inserts every figure it renders under a unique display
//! title; repeated titles (e.g. a sparse projection already drawn with its
//! axes swapped) are no-op inserts. A save batch writes one file per figure,
//! in insertion order, then the caller clears the book before the next
//! directory group.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::output::ExportFormat;
use crate::{RenderError, Result};

/// One finished figure.
#[derive(Debug, Clone)]
pub struct Figure {
    /// Display title, unique within a book.
    pub title: String,
    /// Finished SVG markup.
    pub svg: String,
}

/// Ordered title → figure mapping with unique keys.
#[derive(Debug, Default)]
pub struct CanvasBook {
    figures: Vec<Figure>,
    titles: HashSet<String>,
}

impl CanvasBook {
    /// Empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a figure with this display title is already booked.
    pub fn contains(&self, title: &str) -> bool {
        self.titles.contains(title)
    }

    /// Insert a figure. Returns `false` (and drops the figure) if the title
    /// is already booked.
    pub fn insert(&mut self, figure: Figure) -> bool {
        if !self.titles.insert(figure.title.clone()) {
            return false;
        }
        self.figures.push(figure);
        true
    }

    /// Number of booked figures.
    pub fn len(&self) -> usize {
        self.figures.len()
    }

    /// Whether the book is empty.
    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    /// Booked figures in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Figure> + '_ {
        self.figures.iter()
    }

    /// Drop all figures and their titles.
    pub fn clear(&mut self) {
        self.figures.clear();
        self.titles.clear();
    }

    /// Write every figure into `dir` (created if needed), one file per
    /// canvas in insertion order. Returns the written paths.
    pub fn save_all(&self, dir: &Path, format: ExportFormat, dpi: u32) -> Result<Vec<PathBuf>> {
        if self.is_empty() {
            return Ok(Vec::new());
        }
        std::fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(self.figures.len());
        for (idx, figure) in self.figures.iter().enumerate() {
            let file = dir.join(format!(
                "{:03}_{}.{}",
                idx,
                sanitize_title(&figure.title),
                format.extension()
            ));
            let bytes = format.render_bytes(&figure.svg, dpi)?;
            std::fs::write(&file, bytes)?;
            written.push(file);
        }
        Ok(written)
    }
}

/// Turn a display title into a safe file stem.
fn sanitize_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut last_underscore = false;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' {
            out.push(ch);
            last_underscore = false;
        } else if !last_underscore {
            out.push('_');
            last_underscore = true;
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() { "canvas".to_string() } else { trimmed.to_string() }
}

/// Validate and build a figure in one step; fails on an empty title.
pub fn figure(title: impl Into<String>, svg: impl Into<String>) -> Result<Figure> {
    let title = title.into();
    if title.trim().is_empty() {
        return Err(RenderError::Layout("figure with empty display title".into()));
    }
    Ok(Figure { title, svg: svg.into() })
}
