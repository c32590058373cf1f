//! TH3D/TH3F deserialization.
//!
//! Layout: outer class version, TH3 base (TH1 base + TAtt3D + the y/z
//! statistics sums), then the full-cell array of
//! `(nx + 2) * (ny + 2) * (nz + 2)` values, x fastest, z slowest.

use crate::error::{Result, RootError};
use crate::histogram::Hist3D;
use crate::rbuffer::RBuffer;

use super::th1::{ThBase, read_cells_f32, read_cells_f64, read_th_base, skip_streamer_object};

/// Read a TH3D from decompressed object bytes.
pub fn read_th3d(data: &[u8]) -> Result<Hist3D> {
    let mut r = RBuffer::new(data);
    let (ver, _end) = r.read_version()?;
    if ver < 1 {
        return Err(RootError::Deserialization(format!("unsupported TH3D version: {ver}")));
    }
    let base = read_th3_base(&mut r)?;
    let cells = read_cells_f64(&mut r, base.n_cells)?;
    build_hist3d(base, cells)
}

/// Read a TH3F from decompressed object bytes.
pub fn read_th3f(data: &[u8]) -> Result<Hist3D> {
    let mut r = RBuffer::new(data);
    let (ver, _end) = r.read_version()?;
    if ver < 1 {
        return Err(RootError::Deserialization(format!("unsupported TH3F version: {ver}")));
    }
    let base = read_th3_base(&mut r)?;
    let cells = read_cells_f32(&mut r, base.n_cells)?;
    build_hist3d(base, cells)
}

/// Read the TH3 base: TH1 base plus TAtt3D and the 3D statistics sums.
fn read_th3_base(r: &mut RBuffer) -> Result<ThBase> {
    let (_ver, bc) = r.read_version()?;
    let th3_end = bc;

    let base = read_th_base(r)?;

    // TAtt3D
    skip_streamer_object(r)?;

    let _tsumwy = r.read_f64()?;
    let _tsumwy2 = r.read_f64()?;
    let _tsumwxy = r.read_f64()?;
    let _tsumwz = r.read_f64()?;
    let _tsumwz2 = r.read_f64()?;
    let _tsumwxz = r.read_f64()?;
    let _tsumwyz = r.read_f64()?;

    if let Some(end) = th3_end {
        if end > r.pos() {
            r.set_pos(end);
        }
    }
    Ok(base)
}

/// Strip flows in all three dimensions and assemble the histogram.
fn build_hist3d(base: ThBase, cells: Vec<f64>) -> Result<Hist3D> {
    let [x_axis, y_axis, z_axis] = base.axes;
    let nx = x_axis.n_bins;
    let ny = y_axis.n_bins;
    let nz = z_axis.n_bins;
    let full = (nx + 2) * (ny + 2) * (nz + 2);
    if cells.len() != full {
        return Err(RootError::Deserialization(format!(
            "TH3 cell count {} != (nx+2)*(ny+2)*(nz+2) ({full})",
            cells.len()
        )));
    }

    let mut bin_content = vec![0.0; nx * ny * nz];
    for iz in 0..nz {
        for iy in 0..ny {
            for ix in 0..nx {
                let src = ((iz + 1) * (ny + 2) + (iy + 1)) * (nx + 2) + (ix + 1);
                bin_content[(iz * ny + iy) * nx + ix] = cells[src];
            }
        }
    }

    Ok(Hist3D {
        name: base.name,
        title: base.title,
        x_axis,
        y_axis,
        z_axis,
        bin_content,
        entries: base.entries,
    })
}
