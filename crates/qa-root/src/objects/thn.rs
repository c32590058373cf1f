//! THnSparse deserialization.
//!
//! Layout:
//! ```text
//! THnSparseT<TArray*>
//!   └─ THnSparse
//!        └─ THnBase
//!             ├─ TNamed (name, title)
//!             ├─ fNdimensions (i32)
//!             ├─ fAxes (TObjArray of TAxis)
//!             ├─ fEntries, fTsumw, fTsumw2 (f64)
//!             └─ fTsumwx, fTsumwx2 (TArrayD)
//!        ├─ fChunkSize (i32)
//!        ├─ fFilledBins (i64)
//!        └─ fBinContent (TObjArray of THnSparseArrayChunk)
//! ```
//! Each chunk stores its filled-bin coordinates bit-packed: axis `i`
//! contributes the minimum number of bits that can hold `n_bins + 2`
//! values (flows included), packed LSB-first into
//! `fSingleCoordinateSize` bytes per bin.

use crate::error::{Result, RootError};
use crate::histogram::{AxisDef, HistNd, SparseBin};
use crate::rbuffer::RBuffer;

use super::th1::read_taxis;

/// ROOT reference-system constants.
const K_BYTE_COUNT_MASK: u32 = 0x4000_0000;
const K_NEW_CLASS_TAG: u32 = 0xFFFF_FFFF;
const K_CLASS_MASK: u32 = 0x8000_0000;

/// Bits needed to store a full coordinate (flows included) on an axis with
/// `n_bins` main bins.
pub fn coord_bits(n_bins: usize) -> u32 {
    let max_value = (n_bins + 1) as u32;
    u32::BITS - max_value.leading_zeros()
}

/// State for tracking class tags in ROOT's reference system.
///
/// ROOT uses a byte-offset based reference system for object arrays and
/// object pointers:
/// - `kNewClassTag (0xFFFFFFFF)` introduces a new class name
///   (null-terminated C string);
/// - `kClassMask (0x80000000) | offset` references a previously registered
///   class by the byte offset of its tag;
/// - `kByteCountMask (0x40000000)` wraps each element with a byte count.
struct ClassRefTracker {
    classes: Vec<(usize, String)>,
}

impl ClassRefTracker {
    fn new() -> Self {
        Self { classes: Vec::new() }
    }

    fn lookup(&self, offset: usize) -> Option<&str> {
        self.classes.iter().find(|(off, _)| *off == offset).map(|(_, name)| name.as_str())
    }

    /// Read one element header. Returns `None` for a null entry, otherwise
    /// `(class_name, object_end_pos)`.
    fn read_element(&mut self, r: &mut RBuffer) -> Result<Option<(String, usize)>> {
        let tag = r.read_u32()?;

        if tag == 0 {
            return Ok(None);
        }

        if tag & K_BYTE_COUNT_MASK != 0 {
            let byte_count = (tag & !K_BYTE_COUNT_MASK) as usize;
            let obj_start = r.pos() - 4;
            let obj_end = obj_start + 4 + byte_count;

            let class_tag_pos = r.pos();
            let class_tag = r.read_u32()?;

            let class_name = if class_tag == K_NEW_CLASS_TAG {
                let name = r.read_cstring()?;
                self.classes.push((class_tag_pos, name.clone()));
                name
            } else if class_tag & K_CLASS_MASK != 0 {
                let ref_offset = (class_tag & !K_CLASS_MASK) as usize;
                match self.lookup(ref_offset) {
                    Some(name) => name.to_string(),
                    None => {
                        return Err(RootError::Deserialization(format!(
                            "class ref offset {} not found (tag={:#010x})",
                            ref_offset, class_tag
                        )));
                    }
                }
            } else {
                return Err(RootError::Deserialization(format!(
                    "unexpected class tag {:#010x} at pos {}",
                    class_tag, class_tag_pos
                )));
            };

            return Ok(Some((class_name, obj_end)));
        }

        Err(RootError::Deserialization(format!(
            "unexpected tag {:#010x} in object array at pos {}",
            tag,
            r.pos() - 4
        )))
    }
}

/// Read a THnSparse from decompressed object bytes.
pub fn read_thn_sparse(data: &[u8]) -> Result<HistNd> {
    let mut r = RBuffer::new(data);

    // THnSparseT<...> outer version
    let (_outer_ver, outer_end) = r.read_version()?;
    // THnSparse base
    let (_sparse_ver, _sparse_end) = r.read_version()?;

    // THnBase base
    let (_base_ver, base_end) = r.read_version()?;
    let (name, title) = r.read_tnamed()?;

    let ndim = r.read_i32()?;
    if ndim <= 0 {
        return Err(RootError::Deserialization(format!("invalid fNdimensions: {ndim}")));
    }
    let ndim = ndim as usize;

    let axes = read_tobjarray_axes(&mut r, ndim)?;

    let entries = r.read_f64()?;
    let _tsumw = r.read_f64()?;
    let _tsumw2 = r.read_f64()?;
    skip_tarray_d(&mut r)?; // fTsumwx
    skip_tarray_d(&mut r)?; // fTsumwx2

    if let Some(end) = base_end {
        if end > r.pos() {
            r.set_pos(end);
        }
    }

    // THnSparse fields
    let _chunk_size = r.read_i32()?;
    let filled_bins = r.read_i64()?;
    if filled_bins < 0 {
        return Err(RootError::Deserialization(format!("negative fFilledBins: {filled_bins}")));
    }

    let bins = read_tobjarray_chunks(&mut r, &axes)?;

    if bins.len() != filled_bins as usize {
        log::debug!(
            "THnSparse {}: chunk bins {} != fFilledBins {}",
            name,
            bins.len(),
            filled_bins
        );
    }

    if let Some(end) = outer_end {
        if end > r.pos() {
            r.set_pos(end);
        }
    }

    Ok(HistNd { name, title, axes, bins, entries })
}

/// Read the fAxes TObjArray, expecting `ndim` TAxis elements.
fn read_tobjarray_axes(r: &mut RBuffer, ndim: usize) -> Result<Vec<AxisDef>> {
    let (_ver, arr_end) = r.read_version()?;
    let arr_end = arr_end
        .ok_or_else(|| RootError::Deserialization("axes TObjArray missing byte count".into()))?;

    r.read_tobject()?;
    let _name = r.read_string()?;
    let count = r.read_i32()?;
    let _low_bound = r.read_i32()?;

    let mut axes = Vec::with_capacity(count.max(0) as usize);
    let mut tracker = ClassRefTracker::new();

    for _ in 0..count {
        match tracker.read_element(r)? {
            None => {}
            Some((class_name, obj_end)) => {
                if class_name == "TAxis" {
                    axes.push(read_taxis(r)?);
                }
                r.set_pos(obj_end);
            }
        }
    }

    r.set_pos(arr_end);

    if axes.len() != ndim {
        return Err(RootError::Deserialization(format!(
            "THnSparse axis count {} != fNdimensions {ndim}",
            axes.len()
        )));
    }
    Ok(axes)
}

/// Read the fBinContent TObjArray of THnSparseArrayChunk.
fn read_tobjarray_chunks(r: &mut RBuffer, axes: &[AxisDef]) -> Result<Vec<SparseBin>> {
    let (_ver, arr_end) = r.read_version()?;
    let arr_end = arr_end
        .ok_or_else(|| RootError::Deserialization("chunk TObjArray missing byte count".into()))?;

    r.read_tobject()?;
    let _name = r.read_string()?;
    let count = r.read_i32()?;
    let _low_bound = r.read_i32()?;

    let mut bins = Vec::new();
    let mut tracker = ClassRefTracker::new();

    for _ in 0..count {
        match tracker.read_element(r)? {
            None => {}
            Some((class_name, obj_end)) => {
                if class_name == "THnSparseArrayChunk" {
                    read_chunk(r, axes, &mut tracker, &mut bins)?;
                }
                r.set_pos(obj_end);
            }
        }
    }

    r.set_pos(arr_end);
    Ok(bins)
}

/// Read one THnSparseArrayChunk and append its bins.
fn read_chunk(
    r: &mut RBuffer,
    axes: &[AxisDef],
    tracker: &mut ClassRefTracker,
    bins: &mut Vec<SparseBin>,
) -> Result<()> {
    let (_ver, chunk_end) = r.read_version()?;
    r.read_tobject()?;

    let single_size = r.read_i32()?;
    let coords_size = r.read_i32()?;
    if single_size <= 0 || coords_size < 0 {
        return Err(RootError::Deserialization(format!(
            "invalid chunk coordinate sizes: {single_size}/{coords_size}"
        )));
    }
    let single_size = single_size as usize;
    let coords_size = coords_size as usize;
    if coords_size % single_size != 0 {
        return Err(RootError::Deserialization(format!(
            "chunk coordinate block {coords_size} not a multiple of {single_size}"
        )));
    }

    // fCoordinates: C-array of bytes with a 1-byte count flag.
    let _flag = r.read_u8()?;
    let coord_bytes = r.read_bytes(coords_size)?.to_vec();

    let content = read_tarray_ptr(r, tracker)?
        .ok_or_else(|| RootError::Deserialization("chunk without content array".into()))?;
    let sumw2 = read_tarray_ptr(r, tracker)?;

    let n_bins = coords_size / single_size;
    if content.len() < n_bins {
        return Err(RootError::Deserialization(format!(
            "chunk content length {} < packed bin count {n_bins}",
            content.len()
        )));
    }
    let sumw2 = sumw2.filter(|s| s.len() >= n_bins);

    for i in 0..n_bins {
        let packed = &coord_bytes[i * single_size..(i + 1) * single_size];
        let coords = unpack_coords(packed, axes)?;
        bins.push(SparseBin {
            coords,
            content: content[i],
            sumw2: sumw2.as_ref().map(|s| s[i]),
        });
    }

    if let Some(end) = chunk_end {
        if end > r.pos() {
            r.set_pos(end);
        }
    }
    Ok(())
}

/// Read an object pointer to a TArrayD/TArrayF (`None` for a null pointer).
fn read_tarray_ptr(r: &mut RBuffer, tracker: &mut ClassRefTracker) -> Result<Option<Vec<f64>>> {
    match tracker.read_element(r)? {
        None => Ok(None),
        Some((class_name, obj_end)) => {
            let n = r.read_u32()? as usize;
            let values = match class_name.as_str() {
                "TArrayD" => r.read_array_f64(n)?,
                "TArrayF" => r.read_array_f32(n)?.into_iter().map(|v| v as f64).collect(),
                other => {
                    return Err(RootError::UnsupportedClass(format!(
                        "chunk array class {other}"
                    )));
                }
            };
            r.set_pos(obj_end);
            Ok(Some(values))
        }
    }
}

/// Skip a TArrayD (u32 count + f64 values).
fn skip_tarray_d(r: &mut RBuffer) -> Result<()> {
    let n = r.read_u32()? as usize;
    r.skip(n * 8)
}

/// Unpack one bin's bit-packed coordinates (LSB-first per byte).
fn unpack_coords(packed: &[u8], axes: &[AxisDef]) -> Result<Vec<u32>> {
    let mut coords = Vec::with_capacity(axes.len());
    let mut bit_pos = 0usize;

    for ax in axes {
        let bits = coord_bits(ax.n_bins);
        let mut value = 0u32;
        for out_bit in 0..bits {
            let byte = bit_pos / 8;
            let bit = bit_pos % 8;
            if byte >= packed.len() {
                return Err(RootError::Deserialization(
                    "packed coordinates shorter than axis bit widths".into(),
                ));
            }
            if (packed[byte] >> bit) & 1 == 1 {
                value |= 1 << out_bit;
            }
            bit_pos += 1;
        }
        if value as usize > ax.n_bins + 1 {
            return Err(RootError::Deserialization(format!(
                "coordinate {value} out of range for axis with {} bins",
                ax.n_bins
            )));
        }
        coords.push(value);
    }

    Ok(coords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_bit_widths() {
        // 1 main bin -> values 0..=2 -> 2 bits
        assert_eq!(coord_bits(1), 2);
        // 2 bins -> 0..=3 -> 2 bits
        assert_eq!(coord_bits(2), 2);
        // 6 bins -> 0..=7 -> 3 bits
        assert_eq!(coord_bits(6), 3);
        // 100 bins -> 0..=101 -> 7 bits
        assert_eq!(coord_bits(100), 7);
    }

    #[test]
    fn unpack_round_trip() {
        let axes = vec![
            AxisDef::uniform(6, 0.0, 6.0, "a"), // 3 bits
            AxisDef::uniform(2, 0.0, 2.0, "b"), // 2 bits
            AxisDef::uniform(100, 0.0, 1.0, "c"), // 7 bits
        ];
        // Pack (5, 3, 77) LSB-first: 5 | 3 << 3 | 77 << 5
        let packed_val: u32 = 5 | (3 << 3) | (77 << 5);
        let packed = [(packed_val & 0xFF) as u8, (packed_val >> 8) as u8];

        let coords = unpack_coords(&packed, &axes).unwrap();
        assert_eq!(coords, vec![5, 3, 77]);
    }

    #[test]
    fn unpack_rejects_out_of_range() {
        let axes = vec![AxisDef::uniform(1, 0.0, 1.0, "a")]; // 2 bits, max value 2
        let packed = [0b11u8]; // value 3
        assert!(unpack_coords(&packed, &axes).is_err());
    }

    #[test]
    fn unpack_rejects_short_buffer() {
        let axes = vec![AxisDef::uniform(100, 0.0, 1.0, "a"); 3]; // 21 bits > 2 bytes
        let packed = [0u8; 2];
        assert!(unpack_coords(&packed, &axes).is_err());
    }
}
