//! 2D color map ("COLZ") with colorbar.
//!
//! Cells are painted through a sequential colormap, by default with a
//! log-scaled palette so the occupancy structure stays visible over many
//! orders of magnitude. Empty cells are left unpainted.

use qa_root::Hist2D;

use crate::canvas::Canvas;
use crate::color::{self, Color};
use crate::config::VizConfig;
use crate::header::draw_experiment_header;
use crate::layout::axes::Axis;
use crate::layout::margins::PlotArea;
use crate::plots::axes_draw::draw_axes;
use crate::primitives::*;

/// Per-plot options.
#[derive(Debug, Clone)]
pub struct HeatmapOptions {
    /// Log-scale the color palette (overrides the config default).
    pub log_z: Option<bool>,
    /// Title drawn above the frame (empty = none).
    pub title: String,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self { log_z: None, title: String::new() }
    }
}

/// Map a cell value into `[0, 1]` for the colormap.
fn color_frac(v: f64, lo: f64, hi: f64, log_z: bool) -> f64 {
    if log_z {
        let lo = lo.max(1e-300);
        if hi <= lo {
            return 1.0;
        }
        (v.max(lo).ln() - lo.ln()) / (hi.ln() - lo.ln())
    } else if hi > 0.0 {
        v / hi
    } else {
        0.0
    }
}

pub fn render(h: &Hist2D, opts: &HeatmapOptions, config: &VizConfig) -> crate::Result<String> {
    let log_z = opts.log_z.unwrap_or(config.heatmap.log_z);

    let mut canvas = Canvas::new(config.figure.width, config.figure.height);

    let x_label = if h.x_axis.title.is_empty() { h.name.clone() } else { h.x_axis.title.clone() };
    let x_axis = Axis::linear_within(h.x_axis.min, h.x_axis.max, 6).with_label(x_label);
    let y_axis = Axis::linear_within(h.y_axis.min, h.y_axis.max, 6)
        .with_label(h.y_axis.title.clone());

    // Room for the colorbar on the right.
    let colorbar_w = 14.0;
    let colorbar_gap = 6.0;
    let colorbar_labels = 34.0;
    let mut area = PlotArea::auto(&canvas, Some(&y_axis), Some(&x_axis), config);
    area.width -= colorbar_w + colorbar_gap + colorbar_labels;

    draw_experiment_header(&mut canvas, &area, config);

    let z_max = h.max_value();
    let z_min = if log_z { h.min_positive().unwrap_or(1.0) } else { 0.0 };

    // Cells first, frame on top.
    for iy in 0..h.y_axis.n_bins {
        for ix in 0..h.x_axis.n_bins {
            let v = h.value(ix, iy);
            if v <= 0.0 {
                continue;
            }
            let px_lo = x_axis.data_to_pixel(h.x_axis.edges[ix], area.left, area.right());
            let px_hi = x_axis.data_to_pixel(h.x_axis.edges[ix + 1], area.left, area.right());
            let py_lo = y_axis.data_to_pixel(h.y_axis.edges[iy], area.bottom(), area.top);
            let py_hi = y_axis.data_to_pixel(h.y_axis.edges[iy + 1], area.bottom(), area.top);

            let c = color::rainbow(color_frac(v, z_min, z_max, log_z));
            canvas.rect(px_lo, py_hi, px_hi - px_lo, py_lo - py_hi, &Style::filled(c));
        }
    }

    draw_axes(&mut canvas, &area, &x_axis, &y_axis, config);

    // Colorbar
    let cb_x = area.right() + colorbar_gap;
    let steps = config.heatmap.colorbar_steps.max(2);
    let cb_h = area.height / steps as f64;
    for i in 0..steps {
        let frac = 1.0 - i as f64 / (steps - 1) as f64;
        let c = color::rainbow(frac);
        let y = area.top + i as f64 * cb_h;
        canvas.rect(cb_x, y, colorbar_w, cb_h + 0.5, &Style::filled(c));
    }

    let cb_label_style = TextStyle {
        size: config.font.tick_size * 0.85,
        anchor: TextAnchor::Start,
        baseline: TextBaseline::Central,
        ..Default::default()
    };
    canvas.text(cb_x + colorbar_w + 3.0, area.top, &format_z(z_max), &cb_label_style);
    canvas.text(cb_x + colorbar_w + 3.0, area.bottom(), &format_z(z_min), &cb_label_style);

    let frame_style = LineStyle::solid(Color::rgb(0, 0, 0), 0.5);
    canvas.line(cb_x, area.top, cb_x + colorbar_w, area.top, &frame_style);
    canvas.line(cb_x, area.bottom(), cb_x + colorbar_w, area.bottom(), &frame_style);
    canvas.line(cb_x, area.top, cb_x, area.bottom(), &frame_style);
    canvas.line(cb_x + colorbar_w, area.top, cb_x + colorbar_w, area.bottom(), &frame_style);

    if !opts.title.is_empty() {
        let style = TextStyle {
            size: config.font.size,
            anchor: TextAnchor::Start,
            weight: FontWeight::Bold,
            ..Default::default()
        };
        canvas.text(area.left + 5.0, area.top + 14.0, &opts.title, &style);
    }

    Ok(canvas.finish_svg())
}

fn format_z(v: f64) -> String {
    if v == 0.0 {
        "0".into()
    } else if v.abs() >= 1000.0 || v.abs() < 0.01 {
        format!("{v:.1e}")
    } else if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qa_root::AxisDef;

    fn map() -> Hist2D {
        let mut h = Hist2D::zeroed(
            "etaVSphi",
            "etaVSphi",
            AxisDef::uniform(4, -1.0, 1.0, "#eta"),
            AxisDef::uniform(4, 0.0, 6.3, "#varphi"),
        );
        *h.value_mut(0, 0) = 1.0;
        *h.value_mut(1, 2) = 100.0;
        *h.value_mut(3, 3) = 10000.0;
        h
    }

    #[test]
    fn renders_cells_and_colorbar() {
        let svg = render(&map(), &HeatmapOptions::default(), &VizConfig::default()).unwrap();
        // 3 filled cells + colorbar steps + background.
        assert!(svg.matches("<rect").count() > 50);
        assert!(svg.contains("1.0e4"));
        assert!(svg.contains("#eta"));
    }

    #[test]
    fn log_scale_separates_low_cells() {
        // In log scale the 1-count cell sits at the bottom of the palette,
        // the 1e4 cell at the top.
        assert!(color_frac(1.0, 1.0, 1e4, true) < 0.01);
        assert!(color_frac(1e4, 1.0, 1e4, true) > 0.99);
        assert!((color_frac(100.0, 1.0, 1e4, true) - 0.5).abs() < 0.01);
        // Linear scale would crush it.
        assert!(color_frac(100.0, 0.0, 1e4, false) < 0.011);
    }

    #[test]
    fn title_is_optional() {
        let with = render(
            &map(),
            &HeatmapOptions { log_z: None, title: "Projection range".into() },
            &VizConfig::default(),
        )
        .unwrap();
        assert!(with.contains("Projection range"));
    }
}
