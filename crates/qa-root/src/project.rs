//! Projection operations on the owned histogram types.
//!
//! These are the derivations the QA plots are built from: the X-profile of a
//! correlation map, ranged 2D projections of a 3D histogram, marginalizations
//! of a sparse N-dimensional histogram, and the bin-wise ratio used by the
//! comparison overlays.

use crate::error::{Result, RootError};
use crate::histogram::{AxisDef, Hist1D, Hist2D, Hist3D, HistNd, Profile1D};

impl Hist2D {
    /// Per-x-column mean of the y-axis values, weighted by cell content.
    ///
    /// The error is the standard error of the mean, `sigma / sqrt(W)` with
    /// `W` the column's summed content. Empty columns yield mean 0, error 0.
    pub fn profile_x(&self) -> Profile1D {
        let nx = self.x_axis.n_bins;
        let ny = self.y_axis.n_bins;
        let mut mean = vec![0.0; nx];
        let mut error = vec![0.0; nx];

        for ix in 0..nx {
            let mut w_sum = 0.0;
            let mut wy_sum = 0.0;
            let mut wy2_sum = 0.0;
            for iy in 0..ny {
                let w = self.value(ix, iy);
                if w <= 0.0 {
                    continue;
                }
                let y = self.y_axis.bin_center(iy);
                w_sum += w;
                wy_sum += w * y;
                wy2_sum += w * y * y;
            }
            if w_sum > 0.0 {
                let m = wy_sum / w_sum;
                let var = (wy2_sum / w_sum - m * m).max(0.0);
                mean[ix] = m;
                error[ix] = (var / w_sum).sqrt();
            }
        }

        Profile1D {
            name: format!("{}_pfx", self.name),
            title: format!("{} X Profile", self.title),
            axis: self.x_axis.clone(),
            mean,
            error,
        }
    }
}

impl Hist3D {
    /// Project onto the (y, z) plane, summing x bins in the inclusive
    /// 1-based range `[x_lo_bin, x_hi_bin]`.
    ///
    /// The range is clamped to the axis; an inverted range yields an empty
    /// projection.
    pub fn project_yz(&self, x_lo_bin: usize, x_hi_bin: usize) -> Hist2D {
        let lo = x_lo_bin.max(1);
        let hi = x_hi_bin.min(self.x_axis.n_bins);

        let mut out = Hist2D::zeroed(
            format!("{}_yz", self.name),
            self.title.clone(),
            self.y_axis.clone(),
            self.z_axis.clone(),
        );

        if lo > hi {
            return out;
        }

        for iz in 0..self.z_axis.n_bins {
            for iy in 0..self.y_axis.n_bins {
                let mut sum = 0.0;
                for ix in (lo - 1)..hi {
                    sum += self.value(ix, iy, iz);
                }
                *out.value_mut(iy, iz) = sum;
                out.entries += sum;
            }
        }
        out
    }
}

impl HistNd {
    /// Marginalize onto a single axis, summing every filled bin whose
    /// coordinate on `axis` is a main bin (flows excluded).
    pub fn project_1d(&self, axis: usize) -> Result<Hist1D> {
        let ax = self.axis_checked(axis)?;
        let n = ax.n_bins;
        let mut content = vec![0.0; n];
        let mut sumw2 = vec![0.0; n];

        for bin in &self.bins {
            let c = bin.coords[axis] as usize;
            if c == 0 || c > n {
                continue;
            }
            content[c - 1] += bin.content;
            sumw2[c - 1] += bin.sumw2.unwrap_or(bin.content);
        }

        let entries = content.iter().sum();
        Ok(Hist1D {
            name: format!("{}_proj_{}", self.name, axis),
            title: ax.title.clone(),
            axis: ax.clone(),
            bin_content: content,
            sumw2: Some(sumw2),
            entries,
        })
    }

    /// Marginalize onto an axis pair `(x, y)`, flows excluded on both.
    pub fn project_2d(&self, x: usize, y: usize) -> Result<Hist2D> {
        self.project_2d_filtered(x, y, |_| true)
    }

    /// Marginalize onto `(x, y)` keeping only bins whose `slice_axis`
    /// coordinate is a main bin with center in `[lo, hi)`.
    pub fn project_2d_in_range(
        &self,
        x: usize,
        y: usize,
        slice_axis: usize,
        lo: f64,
        hi: f64,
    ) -> Result<Hist2D> {
        let slice = self.axis_checked(slice_axis)?.clone();
        self.project_2d_filtered(x, y, |bin| {
            let c = bin.coords[slice_axis] as usize;
            if c == 0 || c > slice.n_bins {
                return false;
            }
            let center = slice.bin_center(c - 1);
            center >= lo && center < hi
        })
    }

    fn project_2d_filtered(
        &self,
        x: usize,
        y: usize,
        keep: impl Fn(&crate::histogram::SparseBin) -> bool,
    ) -> Result<Hist2D> {
        let x_ax = self.axis_checked(x)?.clone();
        let y_ax = self.axis_checked(y)?.clone();
        if x == y {
            return Err(RootError::Deserialization(format!(
                "projection axes must differ (both {x})"
            )));
        }

        let mut out = Hist2D::zeroed(
            format!("{}_proj_{}_{}", self.name, x, y),
            format!("{}vs{}", x_ax.title, y_ax.title),
            x_ax,
            y_ax,
        );

        for bin in &self.bins {
            let cx = bin.coords[x] as usize;
            let cy = bin.coords[y] as usize;
            if cx == 0 || cx > out.x_axis.n_bins || cy == 0 || cy > out.y_axis.n_bins {
                continue;
            }
            if !keep(bin) {
                continue;
            }
            *out.value_mut(cx - 1, cy - 1) += bin.content;
            out.entries += bin.content;
        }
        Ok(out)
    }

    fn axis_checked(&self, axis: usize) -> Result<&AxisDef> {
        self.axes.get(axis).ok_or_else(|| {
            RootError::Deserialization(format!(
                "axis {axis} out of range for {}-dimensional {}",
                self.axes.len(),
                self.name
            ))
        })
    }
}

impl Hist1D {
    /// Bin-wise ratio to a reference histogram with uncorrelated error
    /// propagation. Bins where the reference content is zero come out empty.
    pub fn ratio_to(&self, reference: &Hist1D) -> Result<Hist1D> {
        if self.axis.n_bins != reference.axis.n_bins {
            return Err(RootError::Deserialization(format!(
                "ratio of incompatible binnings: {} vs {}",
                self.axis.n_bins, reference.axis.n_bins
            )));
        }

        let n = self.axis.n_bins;
        let mut content = vec![0.0; n];
        let mut sumw2 = vec![0.0; n];

        for i in 0..n {
            let a = self.bin_content[i];
            let b = reference.bin_content[i];
            if b == 0.0 {
                continue;
            }
            let r = a / b;
            content[i] = r;
            if a != 0.0 {
                let rel_a = self.bin_error(i) / a;
                let rel_b = reference.bin_error(i) / b;
                let err = r.abs() * (rel_a * rel_a + rel_b * rel_b).sqrt();
                sumw2[i] = err * err;
            }
        }

        Ok(Hist1D {
            name: format!("{}_over_{}", self.name, reference.name),
            title: self.title.clone(),
            axis: self.axis.clone(),
            bin_content: content,
            sumw2: Some(sumw2),
            entries: self.entries,
        })
    }
}
