//! The `draw` traversal: walk the quantity catalog, dispatch every stored
//! object to its rendering recipe, batch-export per directory group.

use std::path::PathBuf;

use anyhow::{Context, Result};
use qa_core::{Group, Mode, TASK_DIR, catalog};
use qa_render::book::{self, CanvasBook};
use qa_render::config::VizConfig;
use qa_render::output::ExportFormat;
use qa_render::plots::heatmap::{self, HeatmapOptions};
use qa_render::plots::hist1d::{self, Hist1dOptions};
use qa_render::plots::profile;
use qa_root::{Hist2D, Hist3D, HistNd, RootFile, RootObject};

pub struct DrawArgs {
    pub input: PathBuf,
    pub mode: Mode,
    pub save: bool,
    pub out_dir: PathBuf,
    pub format: ExportFormat,
    pub config: VizConfig,
}

pub fn run(args: &DrawArgs) -> Result<()> {
    let dataset = dataset_name(&args.input);
    let primary = match args.mode {
        Mode::Full => args.input.join("AnalysisResults.root"),
        Mode::Tree => args.input.join("AnalysisResults_trees.root"),
    };
    let mut file = RootFile::open(&primary)
        .with_context(|| format!("failed to open results container {}", primary.display()))?;
    tracing::info!(container = %primary.display(), mode = ?args.mode, "drawing QA plots");

    let mut book = CanvasBook::new();

    for group in catalog::groups(args.mode) {
        if args.mode == Mode::Tree && *group == Group::EventProp {
            // The tree production stores event properties only in the plain
            // results container.
            let plain = args.input.join("AnalysisResults.root");
            file = RootFile::open(&plain).with_context(|| {
                format!("failed to open results container {}", plain.display())
            })?;
        }

        draw_group(&file, *group, args.mode, &mut book, &args.config)?;

        if args.save {
            let dir = args.out_dir.join(&dataset).join(group.dir_name());
            let written = book.save_all(&dir, args.format, args.config.output.dpi)?;
            tracing::info!(group = group.dir_name(), files = written.len(), "exported canvases");
        } else {
            tracing::info!(group = group.dir_name(), canvases = book.len(), "rendered, not saved");
        }
        book.clear();
    }

    Ok(())
}

fn draw_group(
    file: &RootFile,
    group: Group,
    mode: Mode,
    book: &mut CanvasBook,
    config: &VizConfig,
) -> Result<()> {
    for qty in catalog::quantities(group, mode) {
        let path = format!("{TASK_DIR}/{}/{qty}", group.dir_name());
        let object = match file.get_object(&path) {
            Ok(o) => o,
            Err(e) => {
                tracing::warn!(%path, error = %e, "did not get object");
                continue;
            }
        };
        render_object(object, group, book, config)?;
    }
    Ok(())
}

fn render_object(
    object: RootObject,
    group: Group,
    book: &mut CanvasBook,
    config: &VizConfig,
) -> Result<()> {
    match object {
        RootObject::H1(h) => {
            let opts = Hist1dOptions {
                log_y: h.name.contains("pt"),
                // Vertex and multiplicity plots keep their annotation so the
                // event count stays visible.
                show_title: h.name.contains("collisionVtxZ") || group == Group::Mult,
            };
            let title = display_title(group, &h.title, &h.name);
            if !book.contains(&title) {
                let svg = hist1d::render(&h, &opts, config)?;
                book.insert(book::figure(title, svg)?);
            }
        }
        RootObject::H2(h) => render_hist2d(&h, group, book, config)?,
        RootObject::H3(h) => render_hist3d(&h, group, book, config)?,
        RootObject::Sparse(h) => render_sparse(&h, group, book, config)?,
    }
    Ok(())
}

fn render_hist2d(
    h: &Hist2D,
    group: Group,
    book: &mut CanvasBook,
    config: &VizConfig,
) -> Result<()> {
    let title = display_title(group, &h.title, &h.name);
    if !book.contains(&title) {
        let svg = heatmap::render(h, &HeatmapOptions::default(), config)?;
        book.insert(book::figure(title, svg)?);
    }

    let p = h.profile_x();
    let profile_title = format!("{} {}", group.dir_name(), p.title);
    if !book.contains(&profile_title) {
        let svg = profile::render(&p, config)?;
        book.insert(book::figure(profile_title, svg)?);
    }
    Ok(())
}

/// Four fixed-range projections along x: bins `[i, i*i]` for i in 1..=4.
fn render_hist3d(
    h: &Hist3D,
    group: Group,
    book: &mut CanvasBook,
    config: &VizConfig,
) -> Result<()> {
    for i in 1..=4usize {
        let lo_bin = i;
        let hi_bin = i * i;
        let proj = h.project_yz(lo_bin, hi_bin);

        let lo = h.x_axis.bin_center(lo_bin - 1);
        let hi = h.x_axis.bin_center((hi_bin - 1).min(h.x_axis.n_bins - 1));
        let opts = HeatmapOptions {
            log_z: Some(true),
            title: format!("Projection range #it{{p}}_{{T}}: {lo:.1} - {hi:.1} GeV/#it{{c}}"),
        };

        let title = format!("{} {}{}", group.dir_name(), base_title(&h.title, &h.name), i);
        if book.contains(&title) {
            continue;
        }
        let svg = heatmap::render(&proj, &opts, config)?;
        book.insert(book::figure(title, svg)?);
    }
    Ok(())
}

/// One color map per pair of distinct non-centrality axes; a pair already
/// drawn with its axes swapped is skipped.
fn render_sparse(
    h: &HistNd,
    group: Group,
    book: &mut CanvasBook,
    config: &VizConfig,
) -> Result<()> {
    let dir_name = group.dir_name();
    for x in 0..h.n_dim() {
        if h.axes[x].title.contains("Centrality") {
            continue;
        }
        for y in 0..h.n_dim() {
            if h.axes[y].title.contains("Centrality") {
                continue;
            }
            if h.axes[x].title == h.axes[y].title {
                continue;
            }
            let forward = format!("{dir_name} {}vs{}", h.axes[x].title, h.axes[y].title);
            let reverse = format!("{dir_name} {}vs{}", h.axes[y].title, h.axes[x].title);
            if book.contains(&forward) || book.contains(&reverse) {
                continue;
            }
            let proj = match h.project_2d(x, y) {
                Ok(p) => p,
                Err(e) => {
                    tracing::warn!(name = %h.name, x, y, error = %e, "projection failed");
                    continue;
                }
            };
            let svg = heatmap::render(&proj, &HeatmapOptions::default(), config)?;
            book.insert(book::figure(forward, svg)?);
        }
    }
    Ok(())
}

fn base_title(title: &str, name: &str) -> String {
    if title.trim().is_empty() { name.to_string() } else { title.to_string() }
}

fn display_title(group: Group, title: &str, name: &str) -> String {
    format!("{} {}", group.dir_name(), base_title(title, name))
}

fn dataset_name(input: &std::path::Path) -> String {
    input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "results".to_string())
}
