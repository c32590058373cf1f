//! ROOT object deserialization dispatch.

mod th1;
mod th2;
mod th3;
mod thn;

pub use thn::coord_bits;

use crate::error::{Result, RootError};
use crate::histogram::{Hist1D, Hist2D, Hist3D, HistNd};

/// A histogram-like object read from the container, tagged by dimensionality.
#[derive(Debug, Clone)]
pub enum RootObject {
    /// 1D histogram (TH1D/TH1F).
    H1(Hist1D),
    /// 2D histogram (TH2D/TH2F).
    H2(Hist2D),
    /// 3D histogram (TH3D/TH3F).
    H3(Hist3D),
    /// Sparse N-dimensional histogram (THnSparse*).
    Sparse(HistNd),
}

impl RootObject {
    /// Short kind tag for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            RootObject::H1(_) => "TH1",
            RootObject::H2(_) => "TH2",
            RootObject::H3(_) => "TH3",
            RootObject::Sparse(_) => "THnSparse",
        }
    }

    /// Stored object name.
    pub fn name(&self) -> &str {
        match self {
            RootObject::H1(h) => &h.name,
            RootObject::H2(h) => &h.name,
            RootObject::H3(h) => &h.name,
            RootObject::Sparse(h) => &h.name,
        }
    }
}

/// Read a histogram-like object from a decompressed payload, given its
/// class name.
pub fn read_object(payload: &[u8], class_name: &str) -> Result<RootObject> {
    match class_name {
        "TH1D" => Ok(RootObject::H1(th1::read_th1d(payload)?)),
        "TH1F" => Ok(RootObject::H1(th1::read_th1f(payload)?)),
        "TH2D" => Ok(RootObject::H2(th2::read_th2d(payload)?)),
        "TH2F" => Ok(RootObject::H2(th2::read_th2f(payload)?)),
        "TH3D" => Ok(RootObject::H3(th3::read_th3d(payload)?)),
        "TH3F" => Ok(RootObject::H3(th3::read_th3f(payload)?)),
        c if c.starts_with("THnSparse") => Ok(RootObject::Sparse(thn::read_thn_sparse(payload)?)),
        other => Err(RootError::UnsupportedClass(other.to_string())),
    }
}
