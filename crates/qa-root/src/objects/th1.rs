//! TH1D/TH1F deserialization, and the TH1 base reader shared by the higher
//! dimensionalities.
//!
//! ROOT TH1 serialization layout (simplified):
//! ```text
//! TH1D (or TH1F)
//!   └─ TH1 (base)
//!        ├─ TNamed (name, title)
//!        ├─ TAttLine / TAttFill / TAttMarker (skipped via byte counts)
//!        ├─ fNcells (i32)
//!        ├─ fXaxis, fYaxis, fZaxis (TAxis)
//!        ├─ scalar stats (fBarOffset, fBarWidth, fEntries, fTsumw, ...)
//!        ├─ fContour (TArrayD), fSumw2 (TArrayD), fOption (TString)
//!        ├─ fFunctions (TList — skipped via byte count)
//!        └─ version-gated trailing fields, skipped via the byte count
//!   └─ TArrayD / TArrayF (the actual cell contents, flows included)
//! ```

use crate::error::{Result, RootError};
use crate::histogram::{AxisDef, Hist1D};
use crate::rbuffer::RBuffer;

/// Everything the TH1 base class carries that the readers need.
pub(super) struct ThBase {
    pub name: String,
    pub title: String,
    pub n_cells: usize,
    pub axes: [AxisDef; 3],
    pub entries: f64,
    pub sumw2: Option<Vec<f64>>,
}

/// Read a TH1D from decompressed object bytes.
pub fn read_th1d(data: &[u8]) -> Result<Hist1D> {
    let mut r = RBuffer::new(data);
    let (ver, _end) = r.read_version()?;
    if ver < 1 {
        return Err(RootError::Deserialization(format!("unsupported TH1D version: {ver}")));
    }
    let base = read_th_base(&mut r)?;
    let cells = read_cells_f64(&mut r, base.n_cells)?;
    build_hist1d(base, cells)
}

/// Read a TH1F from decompressed object bytes.
pub fn read_th1f(data: &[u8]) -> Result<Hist1D> {
    let mut r = RBuffer::new(data);
    let (ver, _end) = r.read_version()?;
    if ver < 1 {
        return Err(RootError::Deserialization(format!("unsupported TH1F version: {ver}")));
    }
    let base = read_th_base(&mut r)?;
    let cells = read_cells_f32(&mut r, base.n_cells)?;
    build_hist1d(base, cells)
}

/// Read the full-cell contents array as f64 (TArrayD).
pub(super) fn read_cells_f64(r: &mut RBuffer, n_cells: usize) -> Result<Vec<f64>> {
    let arr_n = r.read_u32()? as usize;
    if arr_n != n_cells {
        return Err(RootError::Deserialization(format!(
            "cell array size {arr_n} != fNcells {n_cells}"
        )));
    }
    r.read_array_f64(arr_n)
}

/// Read the full-cell contents array as f32 (TArrayF), widening to f64.
pub(super) fn read_cells_f32(r: &mut RBuffer, n_cells: usize) -> Result<Vec<f64>> {
    let arr_n = r.read_u32()? as usize;
    if arr_n != n_cells {
        return Err(RootError::Deserialization(format!(
            "cell array size {arr_n} != fNcells {n_cells}"
        )));
    }
    Ok(r.read_array_f32(arr_n)?.into_iter().map(|v| v as f64).collect())
}

/// Read the TH1 base class (shared by TH1/TH2/TH3 payloads).
pub(super) fn read_th_base(r: &mut RBuffer) -> Result<ThBase> {
    let (th1_ver, th1_bc) = r.read_version()?;
    let th1_end = th1_bc;

    // TNamed
    let (name, title) = r.read_tnamed()?;

    // TAttLine, TAttFill, TAttMarker
    skip_streamer_object(r)?;
    skip_streamer_object(r)?;
    skip_streamer_object(r)?;

    let n_cells = r.read_i32()?;
    if n_cells < 0 {
        return Err(RootError::Deserialization(format!("negative fNcells: {n_cells}")));
    }

    let x_axis = read_taxis(r)?;
    let y_axis = read_taxis(r)?;
    let z_axis = read_taxis(r)?;

    let _bar_offset = r.read_i16()?;
    let _bar_width = r.read_i16()?;
    let entries = r.read_f64()?;
    let _tsumw = r.read_f64()?;
    let _tsumw2 = r.read_f64()?;
    let _tsumwx = r.read_f64()?;
    let _tsumwx2 = r.read_f64()?;
    if th1_ver >= 2 {
        let _max = r.read_f64()?;
        let _min = r.read_f64()?;
    }
    if th1_ver >= 3 {
        let _norm = r.read_f64()?;
    }

    // fContour (TArrayD)
    let contour_n = r.read_u32()? as usize;
    if contour_n > 0 {
        r.skip(contour_n * 8)?;
    }

    // fSumw2 (TArrayD)
    let sumw2_n = r.read_u32()? as usize;
    let sumw2 = if sumw2_n > 0 { Some(r.read_array_f64(sumw2_n)?) } else { None };

    // fOption (TString)
    let _option = r.read_string()?;

    // fFunctions (TList)
    skip_streamer_object(r)?;

    if th1_ver >= 4 {
        let buf_size = r.read_i32()?;
        if buf_size > 0 {
            r.skip(buf_size as usize * 8)?;
        }
    }
    if th1_ver >= 7 {
        let _err_opt = r.read_i32()?;
    }
    if th1_ver >= 8 {
        let _stat_overflows = r.read_i32()?;
    }

    // Seek past any fields this reader does not know about.
    if let Some(end) = th1_end {
        if end > r.pos() {
            r.set_pos(end);
        }
    }

    Ok(ThBase {
        name,
        title,
        n_cells: n_cells as usize,
        axes: [x_axis, y_axis, z_axis],
        entries,
        sumw2,
    })
}

/// Read a TAxis into an [`AxisDef`], capturing the stored axis title.
pub(super) fn read_taxis(r: &mut RBuffer) -> Result<AxisDef> {
    let (_ver, bc) = r.read_version()?;
    let axis_end = bc;

    // TNamed: name is the axis slot ("xaxis"), title is the displayed label.
    let (_name, title) = r.read_tnamed()?;

    // TAttAxis
    skip_streamer_object(r)?;

    let n_bins = r.read_i32()?;
    if n_bins < 0 {
        return Err(RootError::Deserialization(format!("negative axis bin count: {n_bins}")));
    }
    let min = r.read_f64()?;
    let max = r.read_f64()?;

    // fXbins (TArrayD) — variable bin edges
    let xbins_n = r.read_u32()? as usize;
    let edges = if xbins_n > 0 { r.read_array_f64(xbins_n)? } else { Vec::new() };

    // Remaining axis fields (fFirst, fLast, labels, ...) are skipped.
    if let Some(end) = axis_end {
        if end > r.pos() {
            r.set_pos(end);
        }
    }

    let n_bins = n_bins as usize;
    let edges = if edges.is_empty() {
        let width = (max - min) / n_bins.max(1) as f64;
        (0..=n_bins).map(|i| min + i as f64 * width).collect()
    } else if edges.len() == n_bins + 1 {
        edges
    } else {
        return Err(RootError::Deserialization(format!(
            "axis edge array length {} != n_bins + 1 ({})",
            edges.len(),
            n_bins + 1
        )));
    };

    Ok(AxisDef { n_bins, min, max, edges, title })
}

/// Skip a streamer object that has a version header with byte count.
///
/// ROOT writes embedded objects with `(version | 0x40000000, byte_count)`;
/// the byte count is enough to jump over the body.
pub(super) fn skip_streamer_object(r: &mut RBuffer) -> Result<()> {
    let (_ver, bc) = r.read_version()?;
    if let Some(end) = bc {
        r.set_pos(end);
    }
    Ok(())
}

/// Strip flows from a 1D full-cell array and assemble the histogram.
fn build_hist1d(base: ThBase, cells: Vec<f64>) -> Result<Hist1D> {
    let [axis, _, _] = base.axes;
    let n = axis.n_bins;
    if cells.len() != n + 2 {
        return Err(RootError::Deserialization(format!(
            "TH1 cell count {} != n_bins + 2 ({})",
            cells.len(),
            n + 2
        )));
    }

    let bin_content: Vec<f64> = cells[1..=n].to_vec();
    let sumw2 = base.sumw2.map(|sw2| {
        if sw2.len() == n + 2 { sw2[1..=n].to_vec() } else { sw2 }
    });

    Ok(Hist1D {
        name: base.name,
        title: base.title,
        axis,
        bin_content,
        sumw2,
        entries: base.entries,
    })
}
