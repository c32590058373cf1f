//! TH2D/TH2F deserialization.
//!
//! Layout: outer class version, TH2 base (TH1 base + fScalefactor and the
//! y statistics sums), then the full-cell array of `(nx + 2) * (ny + 2)`
//! values in x-fastest order, flows included.

use crate::error::{Result, RootError};
use crate::histogram::Hist2D;
use crate::rbuffer::RBuffer;

use super::th1::{ThBase, read_cells_f32, read_cells_f64, read_th_base};

/// Read a TH2D from decompressed object bytes.
pub fn read_th2d(data: &[u8]) -> Result<Hist2D> {
    let mut r = RBuffer::new(data);
    let (ver, _end) = r.read_version()?;
    if ver < 1 {
        return Err(RootError::Deserialization(format!("unsupported TH2D version: {ver}")));
    }
    let base = read_th2_base(&mut r)?;
    let cells = read_cells_f64(&mut r, base.n_cells)?;
    build_hist2d(base, cells)
}

/// Read a TH2F from decompressed object bytes.
pub fn read_th2f(data: &[u8]) -> Result<Hist2D> {
    let mut r = RBuffer::new(data);
    let (ver, _end) = r.read_version()?;
    if ver < 1 {
        return Err(RootError::Deserialization(format!("unsupported TH2F version: {ver}")));
    }
    let base = read_th2_base(&mut r)?;
    let cells = read_cells_f32(&mut r, base.n_cells)?;
    build_hist2d(base, cells)
}

/// Read the TH2 base: TH1 base plus the 2D-specific scalars.
fn read_th2_base(r: &mut RBuffer) -> Result<ThBase> {
    let (_ver, bc) = r.read_version()?;
    let th2_end = bc;

    let base = read_th_base(r)?;

    let _scale_factor = r.read_f64()?;
    let _tsumwy = r.read_f64()?;
    let _tsumwy2 = r.read_f64()?;
    let _tsumwxy = r.read_f64()?;

    if let Some(end) = th2_end {
        if end > r.pos() {
            r.set_pos(end);
        }
    }
    Ok(base)
}

/// Strip flows in both dimensions and assemble the histogram.
fn build_hist2d(base: ThBase, cells: Vec<f64>) -> Result<Hist2D> {
    let [x_axis, y_axis, _] = base.axes;
    let nx = x_axis.n_bins;
    let ny = y_axis.n_bins;
    let full = (nx + 2) * (ny + 2);
    if cells.len() != full {
        return Err(RootError::Deserialization(format!(
            "TH2 cell count {} != (nx+2)*(ny+2) ({full})",
            cells.len()
        )));
    }

    // Full-cell layout is x-fastest with flow rows/columns at 0 and n+1.
    let mut bin_content = vec![0.0; nx * ny];
    for iy in 0..ny {
        for ix in 0..nx {
            bin_content[iy * nx + ix] = cells[(iy + 1) * (nx + 2) + (ix + 1)];
        }
    }

    Ok(Hist2D {
        name: base.name,
        title: base.title,
        x_axis,
        y_axis,
        bin_content,
        entries: base.entries,
    })
}
