//! # qa-root
//!
//! Native ROOT file reader for trackqa.
//!
//! Reads TH1, TH2, TH3 and THnSparse histograms from `.root` results
//! containers without requiring external ROOT libraries. Supports zlib, LZ4,
//! ZSTD, and XZ compression, and provides the projection operations the QA
//! plots are built from.
//!
//! ## Example
//!
//! ```no_run
//! use qa_root::{RootFile, RootObject};
//!
//! let f = RootFile::open("AnalysisResults.root").unwrap();
//! for key in f.list_keys().unwrap() {
//!     println!("{} ({})", key.name, key.class_name);
//! }
//! match f.get_object("track-jet-qa/Kine/pt").unwrap() {
//!     RootObject::H1(h) => println!("bins: {}, entries: {}", h.axis.n_bins, h.entries),
//!     other => println!("unexpected class kind {}", other.kind()),
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod datasource;
pub mod decompress;
pub mod directory;
pub mod error;
pub mod file;
pub mod histogram;
pub mod key;
pub mod objects;
pub mod project;
pub mod rbuffer;

pub use error::{Result, RootError};
pub use file::RootFile;
pub use histogram::{AxisDef, Hist1D, Hist2D, Hist3D, HistNd, Profile1D, SparseBin};
pub use key::KeyInfo;
pub use objects::RootObject;
