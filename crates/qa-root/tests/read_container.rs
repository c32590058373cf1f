//! Integration tests: open a synthesized results container and read back
//! histograms of every supported dimensionality.
//!
//! The writer below emits the same streamer layout the reader parses
//! (byte-count version headers, key records, the class-reference system for
//! object arrays), so these tests exercise the full open → traverse → fetch
//! path without external fixtures.

use std::path::PathBuf;

use qa_root::objects::coord_bits;
use qa_root::{RootError, RootFile, RootObject};

// ── streamer writer ────────────────────────────────────────────

struct W {
    buf: Vec<u8>,
}

impl W {
    fn new() -> Self {
        Self { buf: Vec::new() }
    }

    fn pos(&self) -> usize {
        self.buf.len()
    }

    fn u8(&mut self, v: u8) {
        self.buf.push(v);
    }
    fn u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }
    fn u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }
    fn i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }
    fn i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }
    fn f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    fn string(&mut self, s: &str) {
        assert!(s.len() < 255);
        self.u8(s.len() as u8);
        self.buf.extend_from_slice(s.as_bytes());
    }

    fn cstring(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
        self.u8(0);
    }

    fn raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Begin a versioned object (byte-count header + version word).
    /// Returns the patch position for [`W::end`].
    fn begin(&mut self, version: u16) -> usize {
        let patch = self.pos();
        self.u32(0); // byte-count placeholder
        self.u16(version);
        patch
    }

    /// Begin a byte-count wrapper without a version word (array elements,
    /// object pointers).
    fn begin_element(&mut self) -> usize {
        let patch = self.pos();
        self.u32(0);
        patch
    }

    /// Patch the byte count opened by `begin`/`begin_element`.
    fn end(&mut self, patch: usize) {
        let bc = (self.pos() - patch - 4) as u32;
        self.buf[patch..patch + 4].copy_from_slice(&(0x4000_0000 | bc).to_be_bytes());
    }

    fn tobject(&mut self) {
        self.u16(1); // TObject version
        self.u32(0); // fUniqueID
        self.u32(0x0300_0000); // fBits (not referenced)
    }

    fn tnamed(&mut self, name: &str, title: &str) {
        let p = self.begin(1);
        self.tobject();
        self.string(name);
        self.string(title);
        self.end(p);
    }

    /// An attribute object the reader skips via its byte count.
    fn attr(&mut self, body_len: usize) {
        let p = self.begin(2);
        self.raw(&vec![0u8; body_len]);
        self.end(p);
    }

    fn tarray_d(&mut self, values: &[f64]) {
        self.u32(values.len() as u32);
        for v in values {
            self.f64(*v);
        }
    }

    fn taxis(&mut self, axis: &AxisSpec) {
        let p = self.begin(10);
        self.tnamed(axis.slot, axis.title);
        self.attr(14); // TAttAxis
        self.i32(axis.n_bins as i32);
        self.f64(axis.min);
        self.f64(axis.max);
        self.u32(0); // uniform binning
        self.end(p);
    }

    /// TH1 base (version 8 layout, matching the reader's gates).
    #[allow(clippy::too_many_arguments)]
    fn th_base(
        &mut self,
        name: &str,
        title: &str,
        n_cells: usize,
        axes: &[AxisSpec; 3],
        entries: f64,
        sumw2: Option<&[f64]>,
    ) {
        let p = self.begin(8);
        self.tnamed(name, title);
        self.attr(6); // TAttLine
        self.attr(4); // TAttFill
        self.attr(8); // TAttMarker
        self.i32(n_cells as i32);
        for ax in axes {
            self.taxis(ax);
        }
        self.u16(0); // fBarOffset
        self.u16(0); // fBarWidth
        self.f64(entries);
        self.f64(entries); // fTsumw
        self.f64(entries); // fTsumw2
        self.f64(0.0); // fTsumwx
        self.f64(0.0); // fTsumwx2
        self.f64(-1111.0); // fMaximum
        self.f64(-1111.0); // fMinimum
        self.f64(1.0); // fNormFactor
        self.u32(0); // fContour
        match sumw2 {
            Some(values) => self.tarray_d(values),
            None => self.u32(0),
        }
        self.u8(0); // fOption (empty TString)
        // fFunctions (TList)
        let f = self.begin(5);
        self.raw(&[0u8; 10]);
        self.end(f);
        self.i32(0); // fBufferSize
        self.i32(0); // fBinStatErrOpt
        self.i32(0); // fStatOverflows
        self.end(p);
    }
}

#[derive(Clone)]
struct AxisSpec {
    slot: &'static str,
    title: &'static str,
    n_bins: usize,
    min: f64,
    max: f64,
}

fn axis(slot: &'static str, title: &'static str, n_bins: usize, min: f64, max: f64) -> AxisSpec {
    AxisSpec { slot, title, n_bins, min, max }
}

fn trivial_axis(slot: &'static str) -> AxisSpec {
    axis(slot, "", 1, 0.0, 1.0)
}

/// TH1D payload: full-cell contents include flows.
fn th1d_payload(name: &str, title: &str, x: &AxisSpec, cells: &[f64], sumw2: Option<&[f64]>) -> Vec<u8> {
    assert_eq!(cells.len(), x.n_bins + 2);
    let mut w = W::new();
    let p = w.begin(3);
    w.th_base(
        name,
        title,
        cells.len(),
        &[x.clone(), trivial_axis("yaxis"), trivial_axis("zaxis")],
        cells.iter().sum(),
        sumw2,
    );
    w.tarray_d(cells);
    w.end(p);
    w.buf
}

/// TH2D payload: cells are x-fastest over `(nx + 2) * (ny + 2)`.
fn th2d_payload(name: &str, title: &str, x: &AxisSpec, y: &AxisSpec, cells: &[f64]) -> Vec<u8> {
    assert_eq!(cells.len(), (x.n_bins + 2) * (y.n_bins + 2));
    let mut w = W::new();
    let p = w.begin(4);
    let b = w.begin(5); // TH2 base
    w.th_base(
        name,
        title,
        cells.len(),
        &[x.clone(), y.clone(), trivial_axis("zaxis")],
        cells.iter().sum(),
        None,
    );
    w.f64(1.0); // fScalefactor
    w.f64(0.0); // fTsumwy
    w.f64(0.0); // fTsumwy2
    w.f64(0.0); // fTsumwxy
    w.end(b);
    w.tarray_d(cells);
    w.end(p);
    w.buf
}

/// TH3D payload: cells are x-fastest, z-slowest.
fn th3d_payload(
    name: &str,
    title: &str,
    x: &AxisSpec,
    y: &AxisSpec,
    z: &AxisSpec,
    cells: &[f64],
) -> Vec<u8> {
    assert_eq!(cells.len(), (x.n_bins + 2) * (y.n_bins + 2) * (z.n_bins + 2));
    let mut w = W::new();
    let p = w.begin(4);
    let b = w.begin(4); // TH3 base
    w.th_base(name, title, cells.len(), &[x.clone(), y.clone(), z.clone()], cells.iter().sum(), None);
    w.attr(0); // TAtt3D
    for _ in 0..7 {
        w.f64(0.0); // fTsumwy..fTsumwyz
    }
    w.end(b);
    w.tarray_d(cells);
    w.end(p);
    w.buf
}

/// Bit-pack full coordinates the way the reader unpacks them.
fn pack_coords(coords: &[u32], axes: &[AxisSpec]) -> Vec<u8> {
    let total_bits: u32 = axes.iter().map(|a| coord_bits(a.n_bins)).sum();
    let n_bytes = total_bits.div_ceil(8) as usize;
    let mut out = vec![0u8; n_bytes];
    let mut bit_pos = 0usize;
    for (c, ax) in coords.iter().zip(axes) {
        let bits = coord_bits(ax.n_bins);
        for b in 0..bits {
            if (c >> b) & 1 == 1 {
                out[bit_pos / 8] |= 1 << (bit_pos % 8);
            }
            bit_pos += 1;
        }
    }
    out
}

/// THnSparse payload with one chunk holding `bins` (full coordinates).
fn thn_payload(
    name: &str,
    title: &str,
    axes: &[AxisSpec],
    bins: &[(Vec<u32>, f64)],
    with_sumw2: bool,
) -> Vec<u8> {
    let mut w = W::new();
    let outer = w.begin(1); // THnSparseT<TArrayD>
    let sparse = w.begin(2); // THnSparse

    // THnBase
    let base = w.begin(1);
    w.tnamed(name, title);
    w.i32(axes.len() as i32);
    // fAxes TObjArray
    let arr = w.begin(3);
    w.tobject();
    w.string("");
    w.i32(axes.len() as i32);
    w.i32(0); // lower bound
    let mut taxis_tag: Option<usize> = None;
    for ax in axes {
        let elem = w.begin_element();
        match taxis_tag {
            None => {
                taxis_tag = Some(w.pos());
                w.u32(0xFFFF_FFFF);
                w.cstring("TAxis");
            }
            Some(off) => w.u32(0x8000_0000 | off as u32),
        }
        w.taxis(ax);
        w.end(elem);
    }
    w.end(arr);
    let total: f64 = bins.iter().map(|(_, v)| v).sum();
    w.f64(total); // fEntries
    w.f64(total); // fTsumw
    w.f64(total); // fTsumw2
    w.tarray_d(&vec![0.0; axes.len()]); // fTsumwx
    w.tarray_d(&vec![0.0; axes.len()]); // fTsumwx2
    w.end(base);

    // THnSparse fields
    w.i32(1024 * 16); // fChunkSize
    w.i64(bins.len() as i64); // fFilledBins

    let chunks = w.begin(3);
    w.tobject();
    w.string("");
    w.i32(1); // one chunk
    w.i32(0);

    let elem = w.begin_element();
    w.u32(0xFFFF_FFFF);
    w.cstring("THnSparseArrayChunk");
    let chunk = w.begin(1);
    w.tobject();

    let total_bits: u32 = axes.iter().map(|a| coord_bits(a.n_bins)).sum();
    let single = total_bits.div_ceil(8) as usize;
    w.i32(single as i32);
    w.i32((single * bins.len()) as i32);
    w.u8(1); // C-array count flag
    for (coords, _) in bins {
        let packed = pack_coords(coords, axes);
        w.raw(&packed);
    }

    // fContent: TArrayD object pointer
    let content_elem = w.begin_element();
    let arrayd_tag = w.pos();
    w.u32(0xFFFF_FFFF);
    w.cstring("TArrayD");
    w.tarray_d(&bins.iter().map(|(_, v)| *v).collect::<Vec<_>>());
    w.end(content_elem);

    // fSumw2: null or a class-reference back to TArrayD
    if with_sumw2 {
        let sw = w.begin_element();
        w.u32(0x8000_0000 | arrayd_tag as u32);
        w.tarray_d(&bins.iter().map(|(_, v)| *v).collect::<Vec<_>>());
        w.end(sw);
    } else {
        w.u32(0);
    }

    w.end(chunk);
    w.end(elem);
    w.end(chunks);
    w.end(sparse);
    w.end(outer);
    w.buf
}

// ── container writer ───────────────────────────────────────────

const BEGIN: usize = 100;
const NBYTES_NAME: usize = 40;

#[derive(Clone)]
struct Record {
    n_bytes: u32,
    obj_len: u32,
    key_len: u16,
    seek_key: u32,
    class: String,
    name: String,
}

struct ContainerBuilder {
    buf: Vec<u8>,
}

impl ContainerBuilder {
    fn new() -> Self {
        // Header (63 bytes, written last) + name region + top dir streamer.
        Self { buf: vec![0u8; BEGIN + NBYTES_NAME + 30] }
    }

    fn key_len(class: &str, name: &str) -> u16 {
        (26 + 1 + class.len() + 1 + name.len() + 1) as u16 // empty title
    }

    fn push_key_header(&mut self, rec: &Record) {
        self.buf.extend_from_slice(&rec.n_bytes.to_be_bytes());
        self.buf.extend_from_slice(&4u16.to_be_bytes()); // key version
        self.buf.extend_from_slice(&rec.obj_len.to_be_bytes());
        self.buf.extend_from_slice(&0u32.to_be_bytes()); // datime
        self.buf.extend_from_slice(&rec.key_len.to_be_bytes());
        self.buf.extend_from_slice(&1u16.to_be_bytes()); // cycle
        self.buf.extend_from_slice(&rec.seek_key.to_be_bytes());
        self.buf.extend_from_slice(&(BEGIN as u32).to_be_bytes()); // seek_pdir
        for s in [rec.class.as_str(), rec.name.as_str(), ""] {
            self.buf.push(s.len() as u8);
            self.buf.extend_from_slice(s.as_bytes());
        }
    }

    /// Write an object record; `stored` is the on-disk payload bytes and
    /// `obj_len` the uncompressed length.
    fn record(&mut self, class: &str, name: &str, stored: &[u8], obj_len: usize) -> Record {
        let key_len = Self::key_len(class, name);
        let rec = Record {
            n_bytes: key_len as u32 + stored.len() as u32,
            obj_len: obj_len as u32,
            key_len,
            seek_key: self.buf.len() as u32,
            class: class.to_string(),
            name: name.to_string(),
        };
        self.push_key_header(&rec);
        self.buf.extend_from_slice(stored);
        rec
    }

    fn object(&mut self, class: &str, name: &str, payload: &[u8]) -> Record {
        self.record(class, name, payload, payload.len())
    }

    fn compressed_object(&mut self, class: &str, name: &str, payload: &[u8]) -> Record {
        let block = qa_root::decompress::compress_zlib_block(payload);
        self.record(class, name, &block, payload.len())
    }

    /// Write a key list for `records`; returns its offset.
    fn key_list(&mut self, records: &[Record]) -> u32 {
        let offset = self.buf.len() as u32;
        let list = Record {
            n_bytes: 0,
            obj_len: 0,
            key_len: Self::key_len("", ""),
            seek_key: offset,
            class: String::new(),
            name: String::new(),
        };
        self.push_key_header(&list);
        self.buf.extend_from_slice(&(records.len() as u32).to_be_bytes());
        for rec in records {
            self.push_key_header(rec);
        }
        offset
    }

    /// Write a subdirectory record whose payload points at `seek_keys`.
    fn directory(&mut self, name: &str, seek_keys: u32) -> Record {
        let mut payload = Vec::new();
        payload.extend_from_slice(&5u16.to_be_bytes()); // dir version
        payload.extend_from_slice(&0u32.to_be_bytes()); // datime_c
        payload.extend_from_slice(&0u32.to_be_bytes()); // datime_m
        payload.extend_from_slice(&0u32.to_be_bytes()); // nbytes_keys
        payload.extend_from_slice(&0u32.to_be_bytes()); // nbytes_name
        payload.extend_from_slice(&(BEGIN as u32).to_be_bytes()); // seek_dir
        payload.extend_from_slice(&(BEGIN as u32).to_be_bytes()); // seek_parent
        payload.extend_from_slice(&seek_keys.to_be_bytes());
        self.object("TDirectoryFile", name, &payload)
    }

    /// Finish: write the top key list, the top directory streamer, and the
    /// file header.
    fn finish(mut self, top_records: &[Record]) -> Vec<u8> {
        let seek_keys = self.key_list(top_records);

        // Top TDirectory streamer at BEGIN + NBYTES_NAME.
        let mut dir = Vec::new();
        dir.extend_from_slice(&5u16.to_be_bytes());
        dir.extend_from_slice(&0u32.to_be_bytes());
        dir.extend_from_slice(&0u32.to_be_bytes());
        dir.extend_from_slice(&0u32.to_be_bytes()); // nbytes_keys (unused)
        dir.extend_from_slice(&(NBYTES_NAME as u32).to_be_bytes());
        dir.extend_from_slice(&(BEGIN as u32).to_be_bytes());
        dir.extend_from_slice(&0u32.to_be_bytes());
        dir.extend_from_slice(&seek_keys.to_be_bytes());
        let at = BEGIN + NBYTES_NAME;
        self.buf[at..at + dir.len()].copy_from_slice(&dir);

        // File header.
        let mut h = Vec::new();
        h.extend_from_slice(b"root");
        h.extend_from_slice(&63200u32.to_be_bytes()); // fVersion
        h.extend_from_slice(&(BEGIN as u32).to_be_bytes());
        h.extend_from_slice(&(self.buf.len() as u32).to_be_bytes()); // fEND
        h.extend_from_slice(&0u32.to_be_bytes()); // fSeekFree
        h.extend_from_slice(&0u32.to_be_bytes()); // fNbytesFree
        h.extend_from_slice(&0u32.to_be_bytes()); // nfree
        h.extend_from_slice(&(NBYTES_NAME as u32).to_be_bytes());
        h.push(4); // fUnits
        h.extend_from_slice(&101u32.to_be_bytes()); // fCompress
        h.extend_from_slice(&0u32.to_be_bytes()); // fSeekInfo
        h.extend_from_slice(&0u32.to_be_bytes()); // fNbytesInfo
        h.extend_from_slice(&[0u8; 18]); // fUUID
        self.buf[..h.len()].copy_from_slice(&h);

        self.buf
    }
}

// ── fixtures ───────────────────────────────────────────────────

/// A small track-jet-qa container: Kine/{pt, etaVSphi, EtaPhiPt},
/// TrackPar/dcaZ (sparse).
fn qa_container() -> Vec<u8> {
    let mut b = ContainerBuilder::new();

    // Kine objects
    let pt_axis = axis("xaxis", "#it{p}_{T} (GeV/#it{c})", 4, 0.0, 8.0);
    // cells: underflow, 4 bins, overflow
    let pt =
        b.compressed_object("TH1D", "pt", &th1d_payload("pt", "pt", &pt_axis, &[0.0, 10.0, 20.0, 5.0, 1.0, 0.0], Some(&[0.0, 10.0, 20.0, 5.0, 1.0, 0.0])));

    let eta = axis("xaxis", "#eta", 2, -1.0, 1.0);
    let phi = axis("yaxis", "#varphi", 2, 0.0, 6.3);
    // (2+2)*(2+2) = 16 cells, x-fastest; main cells at (ix,iy) in 1..=2.
    let mut cells2 = vec![0.0; 16];
    cells2[4 + 1] = 7.0; // (ix=1, iy=1) -> main (0,0)
    cells2[2 * 4 + 2] = 3.0; // main (1,1)
    let eta_vs_phi = b.object("TH2D", "etaVSphi", &th2d_payload("etaVSphi", "etaVSphi", &eta, &phi, &cells2));

    let x3 = axis("xaxis", "#it{p}_{T}", 4, 0.0, 8.0);
    let y3 = axis("yaxis", "#eta", 2, -1.0, 1.0);
    let z3 = axis("zaxis", "#varphi", 2, 0.0, 6.3);
    let mut cells3 = vec![0.0; (4 + 2) * (2 + 2) * (2 + 2)];
    // full-cell index ((iz)*(ny+2) + iy)*(nx+2) + ix at (1, 1, 1) -> main (0,0,0)
    cells3[(4 + 1) * 6 + 1] = 2.0;
    let eta_phi_pt = b.object("TH3D", "EtaPhiPt", &th3d_payload("EtaPhiPt", "EtaPhiPt", &x3, &y3, &z3, &cells3));

    let kine_list = b.key_list(&[pt, eta_vs_phi, eta_phi_pt]);
    let kine_dir = b.directory("Kine", kine_list);

    // TrackPar objects
    let sparse_axes = vec![
        axis("axis0", "#it{p}_{T}", 4, 0.0, 8.0),
        axis("axis1", "#eta", 2, -1.0, 1.0),
        axis("axis2", "dcaZ", 6, -3.0, 3.0),
    ];
    let dca_z = b.object(
        "THnSparseT<TArrayD>",
        "dcaZ",
        &thn_payload(
            "dcaZ",
            "dcaZ",
            &sparse_axes,
            &[
                (vec![1, 1, 3], 4.0),
                (vec![2, 2, 4], 6.0),
                (vec![5, 1, 1], 9.0), // pt overflow
            ],
            true,
        ),
    );
    let trackpar_list = b.key_list(&[dca_z]);
    let trackpar_dir = b.directory("TrackPar", trackpar_list);

    let task_list = b.key_list(&[kine_dir, trackpar_dir]);
    let task_dir = b.directory("track-jet-qa", task_list);

    b.finish(&[task_dir])
}

fn open_qa_container() -> RootFile {
    RootFile::from_bytes(qa_container(), PathBuf::from("<synthesized>"))
        .expect("synthesized container should parse")
}

// ── tests ──────────────────────────────────────────────────────

#[test]
fn list_keys_walks_the_directory_tree() {
    let f = open_qa_container();

    let top = f.list_keys().unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].name, "track-jet-qa");
    assert!(top[0].is_directory());

    let groups = f.list_keys_at("track-jet-qa").unwrap();
    let names: Vec<&str> = groups.iter().map(|k| k.name.as_str()).collect();
    assert_eq!(names, vec!["Kine", "TrackPar"]);

    let kine = f.list_keys_at("track-jet-qa/Kine").unwrap();
    let names: Vec<&str> = kine.iter().map(|k| k.name.as_str()).collect();
    assert_eq!(names, vec!["pt", "etaVSphi", "EtaPhiPt"]);
    assert_eq!(kine[0].class_name, "TH1D");
}

#[test]
fn read_th1d_with_compression() {
    let f = open_qa_container();
    let h = f.get_hist1d("track-jet-qa/Kine/pt").unwrap();
    assert_eq!(h.axis.n_bins, 4);
    assert_eq!(h.bin_content, vec![10.0, 20.0, 5.0, 1.0]);
    assert_eq!(h.axis.title, "#it{p}_{T} (GeV/#it{c})");
    assert!((h.bin_error(1) - 20.0_f64.sqrt()).abs() < 1e-12);
    assert!((h.entries - 36.0).abs() < 1e-12);
}

#[test]
fn read_th2d_strips_flows() {
    let f = open_qa_container();
    let RootObject::H2(h) = f.get_object("track-jet-qa/Kine/etaVSphi").unwrap() else {
        panic!("expected a 2D histogram");
    };
    assert_eq!(h.x_axis.n_bins, 2);
    assert_eq!(h.y_axis.n_bins, 2);
    assert_eq!(h.value(0, 0), 7.0);
    assert_eq!(h.value(1, 1), 3.0);
    assert_eq!(h.x_axis.title, "#eta");
}

#[test]
fn read_th3d_and_project() {
    let f = open_qa_container();
    let RootObject::H3(h) = f.get_object("track-jet-qa/Kine/EtaPhiPt").unwrap() else {
        panic!("expected a 3D histogram");
    };
    assert_eq!(h.value(0, 0, 0), 2.0);
    let proj = h.project_yz(1, 1);
    assert_eq!(proj.value(0, 0), 2.0);
}

#[test]
fn read_thn_sparse_and_project() {
    let f = open_qa_container();
    let RootObject::Sparse(h) = f.get_object("track-jet-qa/TrackPar/dcaZ").unwrap() else {
        panic!("expected a sparse histogram");
    };
    assert_eq!(h.n_dim(), 3);
    assert_eq!(h.bins.len(), 3);
    assert_eq!(h.axes[2].title, "dcaZ");
    assert_eq!(h.bins[0].coords, vec![1, 1, 3]);
    assert_eq!(h.bins[0].sumw2, Some(4.0));

    // dcaZ vs pt: axis-0 overflow bin drops out.
    let proj = h.project_2d(2, 0).unwrap();
    assert!((proj.value(2, 0) - 4.0).abs() < 1e-12);
    assert!((proj.value(3, 1) - 6.0).abs() < 1e-12);
    assert!((proj.entries - 10.0).abs() < 1e-12);
}

#[test]
fn missing_objects_and_wrong_kinds_are_reported() {
    let f = open_qa_container();

    match f.get_object("track-jet-qa/Kine/nope") {
        Err(RootError::KeyNotFound(_)) => {}
        other => panic!("expected KeyNotFound, got {other:?}"),
    }
    match f.get_object("track-jet-qa/Mult/FT0M") {
        Err(RootError::KeyNotFound(msg)) => assert!(msg.contains("Mult")),
        other => panic!("expected KeyNotFound, got {other:?}"),
    }
    assert!(f.get_hist1d("track-jet-qa/Kine/etaVSphi").is_err());
}

#[test]
fn bad_magic_is_rejected() {
    let mut data = qa_container();
    data[0] = b'x';
    match RootFile::from_bytes(data, PathBuf::from("<bad>")) {
        Err(RootError::BadMagic) => {}
        other => panic!("expected BadMagic, got {:?}", other.err()),
    }
}

#[test]
fn open_reads_from_disk() {
    let path = std::env::temp_dir().join(format!("qa_root_container_{}.root", std::process::id()));
    std::fs::write(&path, qa_container()).unwrap();

    let f = RootFile::open(&path).expect("failed to open container from disk");
    let h = f.get_hist1d("track-jet-qa/Kine/pt").unwrap();
    assert_eq!(h.bin_content.len(), 4);

    drop(f);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn fixture_container_if_present() {
    // Real upstream output, if someone drops it next to the tests.
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/AnalysisResults.root");
    if !path.exists() {
        eprintln!("Fixture not found: {:?}. Skipping.", path);
        return;
    }
    let f = RootFile::open(&path).expect("failed to open fixture container");
    let keys = f.list_keys().expect("failed to list keys");
    assert!(!keys.is_empty(), "expected at least one key");
}
