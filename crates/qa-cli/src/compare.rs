//! The `compare` surface: per-cut-variation 2D QA rendering, and the
//! `--overlay` comparison of 1D projections across variations.

use std::path::PathBuf;

use anyhow::Result;
use qa_core::projections::{ETA_PHI_PT_SLICES, projection_pairs};
use qa_core::{TASK_DIR, cuts};
use qa_render::book::{self, CanvasBook};
use qa_render::config::VizConfig;
use qa_render::output::ExportFormat;
use qa_render::plots::heatmap::{self, HeatmapOptions};
use qa_render::plots::hist1d::{self, Hist1dOptions};
use qa_render::plots::overlay::{self, OverlayOptions, OverlaySeries};
use qa_root::{Hist1D, HistNd, RootFile, RootObject};

pub struct CompareArgs {
    pub dataset: String,
    pub results: PathBuf,
    pub cut_keywords: Vec<String>,
    pub overlay: bool,
    pub save: bool,
    pub out_dir: PathBuf,
    pub format: ExportFormat,
    pub config: VizConfig,
}

pub fn run(args: &CompareArgs) -> Result<()> {
    let cuts = cuts::expand_keywords(&args.cut_keywords)?;
    if cuts.is_empty() {
        anyhow::bail!("no cut variations match keywords {:?}", args.cut_keywords);
    }
    tracing::info!(?cuts, dataset = %args.dataset, "expanded cut variations");

    if args.overlay {
        overlay_variations(args, &cuts)
    } else {
        plot_variations(args, &cuts)
    }
}

fn container_path(args: &CompareArgs, cut: &str) -> PathBuf {
    args.results
        .join(&args.dataset)
        .join("CutVariations")
        .join(format!("AnalysisResults_{cut}.root"))
}

fn compare_dir(args: &CompareArgs) -> PathBuf {
    args.out_dir.join(format!("Compare_{}_CutVariations", args.dataset))
}

/// Render the 2D QA projections of each variation, one export batch per cut.
fn plot_variations(args: &CompareArgs, cuts: &[String]) -> Result<()> {
    let mut opened = 0usize;
    let mut book = CanvasBook::new();

    for cut in cuts {
        let path = container_path(args, cut);
        let file = match RootFile::open(&path) {
            Ok(f) => f,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "did not get container");
                continue;
            }
        };
        opened += 1;

        let task = format!("{TASK_DIR}{cut}");
        let group_keys = match file.list_keys_at(&task) {
            Ok(keys) => keys,
            Err(e) => {
                tracing::error!(%task, error = %e, "task directory missing");
                continue;
            }
        };

        for group_key in group_keys.iter().filter(|k| k.is_directory()) {
            let dir_path = format!("{task}/{}", group_key.name);
            let object_keys = match file.list_keys_at(&dir_path) {
                Ok(keys) => keys,
                Err(e) => {
                    tracing::warn!(%dir_path, error = %e, "could not list directory");
                    continue;
                }
            };

            for obj_key in &object_keys {
                let obj_path = format!("{dir_path}/{}", obj_key.name);
                match file.get_object(&obj_path) {
                    Ok(RootObject::H1(h)) => {
                        let title = format!("{} {}", group_key.name, base_title(&h.title, &h.name));
                        if !book.contains(&title) {
                            let svg = hist1d::render(&h, &Hist1dOptions::default(), &args.config)?;
                            book.insert(book::figure(title, svg)?);
                        }
                    }
                    // Flag-bit maps carry nothing comparable.
                    Ok(RootObject::H2(_)) => continue,
                    Ok(RootObject::Sparse(h)) => {
                        render_sparse_faces(&h, &group_key.name, &mut book, &args.config)?
                    }
                    Ok(other) => {
                        tracing::warn!(%obj_path, kind = other.kind(), "we miss something, unhandled class");
                    }
                    Err(e) => {
                        tracing::warn!(%obj_path, error = %e, "did not get object");
                    }
                }
            }
        }

        if args.save {
            let dir = compare_dir(args).join(format!("2DTrackQa_{cut}"));
            let written = book.save_all(&dir, args.format, args.config.output.dpi)?;
            tracing::info!(cut = %cut, files = written.len(), "exported canvases");
        } else {
            tracing::info!(cut = %cut, canvases = book.len(), "rendered, not saved");
        }
        book.clear();
    }

    if opened == 0 {
        anyhow::bail!(
            "no cut-variation container could be opened under {}",
            args.results.join(&args.dataset).display()
        );
    }
    Ok(())
}

/// The configured 2D faces of one sparse quantity.
fn render_sparse_faces(
    h: &HistNd,
    group: &str,
    book: &mut CanvasBook,
    config: &VizConfig,
) -> Result<()> {
    // Event properties: the vertex distribution is compared in 1D.
    if h.name.contains("collisionVtxZ") {
        match h.project_1d(0) {
            Ok(proj) => {
                let title = format!("{group} {}", base_title(&proj.title, &h.name));
                if !book.contains(&title) {
                    let opts = Hist1dOptions { log_y: false, show_title: true };
                    let svg = hist1d::render(&proj, &opts, config)?;
                    book.insert(book::figure(title, svg)?);
                }
            }
            Err(e) => tracing::warn!(name = %h.name, error = %e, "projection failed"),
        }
        return Ok(());
    }

    // Multiplicity correlations wait for calibrated multiplicities.
    if h.name.contains("MultCorrelations") {
        return Ok(());
    }

    // Occupancy maps in momentum slices.
    if h.name.contains("EtaPhiPt") {
        for (lo, hi) in ETA_PHI_PT_SLICES {
            match h.project_2d_in_range(0, 1, 2, *lo, *hi) {
                Ok(proj) => {
                    let title = format!("{group} {} pT {lo}-{hi}", h.name);
                    if book.contains(&title) {
                        continue;
                    }
                    let opts = HeatmapOptions {
                        log_z: Some(true),
                        title: format!("#it{{p}}_{{T}}: {lo} - {hi} GeV/#it{{c}}"),
                    };
                    let svg = heatmap::render(&proj, &opts, config)?;
                    book.insert(book::figure(title, svg)?);
                }
                Err(e) => tracing::warn!(name = %h.name, error = %e, "projection failed"),
            }
        }
        return Ok(());
    }

    for (x, y) in projection_pairs(&h.name) {
        let proj = match h.project_2d(x, y) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(name = %h.name, x, y, error = %e, "projection failed");
                continue;
            }
        };
        let title = format!("{group} {} {}", h.name, proj.title);
        if book.contains(&title) {
            continue;
        }
        let svg = heatmap::render(&proj, &HeatmapOptions::default(), config)?;
        book.insert(book::figure(title, svg)?);
    }
    Ok(())
}

/// Overlay the 1D projections of every quantity across the variations.
fn overlay_variations(args: &CompareArgs, cuts: &[String]) -> Result<()> {
    let mut files: Vec<(String, RootFile)> = Vec::new();
    for cut in cuts {
        let path = container_path(args, cut);
        match RootFile::open(&path) {
            Ok(f) => files.push((cut.clone(), f)),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "did not get container")
            }
        }
    }
    if files.len() < 2 {
        anyhow::bail!("need at least two cut-variation containers to overlay, got {}", files.len());
    }

    let (reference_cut, reference) = &files[0];
    let task = format!("{TASK_DIR}{reference_cut}");
    let mut book = CanvasBook::new();

    for group_key in reference.list_keys_at(&task)?.iter().filter(|k| k.is_directory()) {
        for obj_key in reference.list_keys_at(&format!("{task}/{}", group_key.name))? {
            let mut series: Vec<OverlaySeries> = Vec::new();
            for (cut, file) in &files {
                let path = format!("{TASK_DIR}{cut}/{}/{}", group_key.name, obj_key.name);
                match file.get_object(&path) {
                    Ok(object) => {
                        if let Some(hist) = to_1d(object) {
                            series.push(OverlaySeries { label: cut.clone(), hist });
                        }
                    }
                    Err(e) => tracing::warn!(%path, error = %e, "did not get object"),
                }
            }
            if series.len() < 2 {
                continue;
            }

            let opts = OverlayOptions { log_y: obj_key.name.contains("pt"), y_label: None };
            let title = format!("{} {}", group_key.name, obj_key.name);
            if book.contains(&title) {
                continue;
            }
            match overlay::render(&series, &opts, &args.config) {
                Ok(svg) => {
                    book.insert(book::figure(title, svg)?);
                }
                Err(e) => {
                    tracing::warn!(quantity = %obj_key.name, error = %e, "overlay failed");
                }
            }
        }
    }

    if args.save {
        let dir = compare_dir(args).join("Overlay");
        let written = book.save_all(&dir, args.format, args.config.output.dpi)?;
        tracing::info!(files = written.len(), "exported overlay canvases");
    } else {
        tracing::info!(canvases = book.len(), "rendered, not saved");
    }
    book.clear();
    Ok(())
}

/// The 1D view of an object for overlays: 1D histograms directly, sparse
/// histograms through their leading axis.
fn to_1d(object: RootObject) -> Option<Hist1D> {
    match object {
        RootObject::H1(h) => Some(h),
        RootObject::Sparse(h) => h.project_1d(0).ok(),
        RootObject::H2(_) | RootObject::H3(_) => None,
    }
}

fn base_title(title: &str, name: &str) -> String {
    if title.trim().is_empty() { name.to_string() } else { title.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qa_root::{AxisDef, SparseBin};

    fn sparse(name: &str, titles: &[&str]) -> HistNd {
        HistNd {
            name: name.into(),
            title: name.into(),
            axes: titles.iter().map(|t| AxisDef::uniform(2, 0.0, 2.0, *t)).collect(),
            bins: vec![SparseBin { coords: vec![1; titles.len()], content: 1.0, sumw2: None }],
            entries: 1.0,
        }
    }

    #[test]
    fn resolution_quantities_get_their_face() {
        let h = sparse("Sigma1Pt", &["#it{p}_{T}", "#sigma(1/#it{p}_{T})"]);
        let mut book = CanvasBook::new();
        render_sparse_faces(&h, "TrackPar", &mut book, &VizConfig::default()).unwrap();
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn mult_correlations_are_skipped() {
        let h = sparse("MultCorrelations", &["a", "b"]);
        let mut book = CanvasBook::new();
        render_sparse_faces(&h, "EventProp", &mut book, &VizConfig::default()).unwrap();
        assert!(book.is_empty());
    }

    #[test]
    fn vertex_quantity_projects_to_1d() {
        let h = sparse("collisionVtxZ", &["Vtx_{z}", "other"]);
        let mut book = CanvasBook::new();
        render_sparse_faces(&h, "EventProp", &mut book, &VizConfig::default()).unwrap();
        assert_eq!(book.len(), 1);
        assert!(book.contains("EventProp Vtx_{z}"));
    }

    #[test]
    fn eta_phi_pt_renders_one_map_per_slice() {
        let h = sparse("EtaPhiPt", &["#eta", "#varphi", "#it{p}_{T}"]);
        let mut book = CanvasBook::new();
        render_sparse_faces(&h, "Kine", &mut book, &VizConfig::default()).unwrap();
        assert_eq!(book.len(), ETA_PHI_PT_SLICES.len());
    }

    #[test]
    fn projection_failures_are_skipped_not_fatal() {
        // dcaZ expects three axes; give it two so the (2, x) faces fail.
        let h = sparse("dcaZ", &["a", "b"]);
        let mut book = CanvasBook::new();
        render_sparse_faces(&h, "TrackPar", &mut book, &VizConfig::default()).unwrap();
        assert!(book.is_empty());
    }

    #[test]
    fn to_1d_accepts_sparse_and_rejects_maps() {
        let sparse_obj = RootObject::Sparse(sparse("pt", &["#it{p}_{T}", "#eta"]));
        assert!(to_1d(sparse_obj).is_some());

        let map = RootObject::H2(qa_root::Hist2D::zeroed(
            "m",
            "",
            AxisDef::uniform(2, 0.0, 1.0, ""),
            AxisDef::uniform(2, 0.0, 1.0, ""),
        ));
        assert!(to_1d(map).is_none());
    }
}
