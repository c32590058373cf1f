//! Owned histogram types returned by the container reader.
//!
//! All types strip ROOT's under/overflow cells on the stored axes except
//! [`HistNd`], whose sparse bins keep the full coordinate convention
//! (0 = underflow, `1..=n` main bins, `n + 1` = overflow) so projections can
//! decide what to include.

/// A histogram axis: bin count, range, optional variable edges, stored title.
#[derive(Debug, Clone)]
pub struct AxisDef {
    /// Number of bins (excluding under/overflow).
    pub n_bins: usize,
    /// Lower edge of the first bin.
    pub min: f64,
    /// Upper edge of the last bin.
    pub max: f64,
    /// Bin edges (length `n_bins + 1`; computed for uniform binning).
    pub edges: Vec<f64>,
    /// Axis title as stored in the container (e.g. `#it{p}_{T}`).
    pub title: String,
}

impl AxisDef {
    /// Uniformly binned axis.
    pub fn uniform(n_bins: usize, min: f64, max: f64, title: impl Into<String>) -> Self {
        let width = (max - min) / n_bins.max(1) as f64;
        let edges = (0..=n_bins).map(|i| min + i as f64 * width).collect();
        Self { n_bins, min, max, edges, title: title.into() }
    }

    /// Center of 0-based bin `i`.
    pub fn bin_center(&self, i: usize) -> f64 {
        (self.edges[i] + self.edges[i + 1]) / 2.0
    }

    /// Lower edge of 0-based bin `i`.
    pub fn bin_low_edge(&self, i: usize) -> f64 {
        self.edges[i]
    }
}

/// A 1D histogram.
#[derive(Debug, Clone)]
pub struct Hist1D {
    /// Object name.
    pub name: String,
    /// Object title.
    pub title: String,
    /// The x axis.
    pub axis: AxisDef,
    /// Bin contents (length `n_bins`, excluding under/overflow).
    pub bin_content: Vec<f64>,
    /// Sum of weights squared per bin (for statistical errors), if stored.
    pub sumw2: Option<Vec<f64>>,
    /// Total number of entries.
    pub entries: f64,
}

impl Hist1D {
    /// Statistical error of 0-based bin `i`: `sqrt(sumw2)` if stored,
    /// `sqrt(content)` otherwise.
    pub fn bin_error(&self, i: usize) -> f64 {
        match &self.sumw2 {
            Some(sw2) => sw2[i].max(0.0).sqrt(),
            None => self.bin_content[i].max(0.0).sqrt(),
        }
    }

    /// Largest bin content.
    pub fn max_content(&self) -> f64 {
        self.bin_content.iter().copied().fold(0.0_f64, f64::max)
    }
}

/// A 2D histogram. Contents are stored row-major: index `iy * nx + ix`.
#[derive(Debug, Clone)]
pub struct Hist2D {
    /// Object name.
    pub name: String,
    /// Object title.
    pub title: String,
    /// The x axis.
    pub x_axis: AxisDef,
    /// The y axis.
    pub y_axis: AxisDef,
    /// Bin contents, length `nx * ny` (under/overflow stripped).
    pub bin_content: Vec<f64>,
    /// Total number of entries.
    pub entries: f64,
}

impl Hist2D {
    /// Content of the cell at 0-based `(ix, iy)`.
    pub fn value(&self, ix: usize, iy: usize) -> f64 {
        self.bin_content[iy * self.x_axis.n_bins + ix]
    }

    /// Mutable content of the cell at 0-based `(ix, iy)`.
    pub fn value_mut(&mut self, ix: usize, iy: usize) -> &mut f64 {
        &mut self.bin_content[iy * self.x_axis.n_bins + ix]
    }

    /// Largest cell content.
    pub fn max_value(&self) -> f64 {
        self.bin_content.iter().copied().fold(0.0_f64, f64::max)
    }

    /// Smallest strictly positive cell content (for log color scales).
    pub fn min_positive(&self) -> Option<f64> {
        self.bin_content.iter().copied().filter(|v| *v > 0.0).fold(None, |acc, v| match acc {
            None => Some(v),
            Some(m) => Some(m.min(v)),
        })
    }

    /// Empty histogram over the given axes.
    pub fn zeroed(
        name: impl Into<String>,
        title: impl Into<String>,
        x_axis: AxisDef,
        y_axis: AxisDef,
    ) -> Self {
        let n = x_axis.n_bins * y_axis.n_bins;
        Self {
            name: name.into(),
            title: title.into(),
            x_axis,
            y_axis,
            bin_content: vec![0.0; n],
            entries: 0.0,
        }
    }
}

/// A 3D histogram. Contents are stored with index `(iz * ny + iy) * nx + ix`.
#[derive(Debug, Clone)]
pub struct Hist3D {
    /// Object name.
    pub name: String,
    /// Object title.
    pub title: String,
    /// The x axis.
    pub x_axis: AxisDef,
    /// The y axis.
    pub y_axis: AxisDef,
    /// The z axis.
    pub z_axis: AxisDef,
    /// Bin contents, length `nx * ny * nz` (under/overflow stripped).
    pub bin_content: Vec<f64>,
    /// Total number of entries.
    pub entries: f64,
}

impl Hist3D {
    /// Content of the cell at 0-based `(ix, iy, iz)`.
    pub fn value(&self, ix: usize, iy: usize, iz: usize) -> f64 {
        let nx = self.x_axis.n_bins;
        let ny = self.y_axis.n_bins;
        self.bin_content[(iz * ny + iy) * nx + ix]
    }
}

/// One filled bin of a sparse N-dimensional histogram.
///
/// Coordinates are full bin indices per axis: 0 = underflow, `1..=n` main
/// bins, `n + 1` = overflow.
#[derive(Debug, Clone)]
pub struct SparseBin {
    /// Per-axis full bin index.
    pub coords: Vec<u32>,
    /// Bin content.
    pub content: f64,
    /// Sum of weights squared, if stored.
    pub sumw2: Option<f64>,
}

/// A sparse N-dimensional histogram.
#[derive(Debug, Clone)]
pub struct HistNd {
    /// Object name.
    pub name: String,
    /// Object title.
    pub title: String,
    /// Axis definitions, in storage order.
    pub axes: Vec<AxisDef>,
    /// Filled bins.
    pub bins: Vec<SparseBin>,
    /// Total number of entries.
    pub entries: f64,
}

impl HistNd {
    /// Number of dimensions.
    pub fn n_dim(&self) -> usize {
        self.axes.len()
    }
}

/// An X-profile: per-column mean of a 2D histogram's y values.
#[derive(Debug, Clone)]
pub struct Profile1D {
    /// Derived object name.
    pub name: String,
    /// Derived title.
    pub title: String,
    /// The profiled (x) axis.
    pub axis: AxisDef,
    /// Mean y value per x bin (0 where the column is empty).
    pub mean: Vec<f64>,
    /// Standard error of the mean per x bin.
    pub error: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_axis_edges() {
        let ax = AxisDef::uniform(4, 0.0, 2.0, "x");
        assert_eq!(ax.edges, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
        assert!((ax.bin_center(1) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn bin_error_prefers_sumw2() {
        let h = Hist1D {
            name: "h".into(),
            title: String::new(),
            axis: AxisDef::uniform(2, 0.0, 1.0, ""),
            bin_content: vec![4.0, 9.0],
            sumw2: Some(vec![16.0, 1.0]),
            entries: 13.0,
        };
        assert!((h.bin_error(0) - 4.0).abs() < 1e-12);
        let no_sw2 = Hist1D { sumw2: None, ..h };
        assert!((no_sw2.bin_error(1) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn hist2d_indexing() {
        let mut h = Hist2D::zeroed("h2", "", AxisDef::uniform(3, 0.0, 3.0, ""), AxisDef::uniform(2, 0.0, 2.0, ""));
        *h.value_mut(2, 1) = 5.0;
        assert_eq!(h.value(2, 1), 5.0);
        assert_eq!(h.bin_content[1 * 3 + 2], 5.0);
        assert_eq!(h.max_value(), 5.0);
        assert_eq!(h.min_positive(), Some(5.0));
    }
}
