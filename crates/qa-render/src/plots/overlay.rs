//! Multi-configuration 1D overlay with ratio panel.
//!
//! The comparison view: the same quantity from several cut variations (or
//! data-taking periods) drawn over each other in palette colors with a
//! legend, and a lower panel showing every variation's ratio to the first
//! (reference) entry.

use qa_root::Hist1D;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::VizConfig;
use crate::header::draw_experiment_header;
use crate::layout::axes::Axis;
use crate::layout::legend::{self, LegendEntry, LegendKind};
use crate::layout::margins::PlotArea;
use crate::layout::multi_panel::MainRatioLayout;
use crate::plots::axes_draw::draw_axes;
use crate::primitives::*;

/// One overlaid configuration.
#[derive(Debug, Clone)]
pub struct OverlaySeries {
    /// Legend label (the cut-variation or data-set name).
    pub label: String,
    /// The 1D distribution for this configuration.
    pub hist: Hist1D,
}

/// Per-plot options.
#[derive(Debug, Clone, Default)]
pub struct OverlayOptions {
    /// Log-scale the main panel's y axis.
    pub log_y: bool,
    /// Y-axis label of the main panel (defaults to "number of entries").
    pub y_label: Option<String>,
}

pub fn render(
    series: &[OverlaySeries],
    opts: &OverlayOptions,
    config: &VizConfig,
) -> crate::Result<String> {
    let Some(reference) = series.first() else {
        return Err(crate::RenderError::Layout("overlay without series".into()));
    };

    let fig_w = config.figure.width;
    let fig_h = config.figure.height * 1.3; // taller for main+ratio
    let mut canvas = Canvas::new(fig_w, fig_h);

    let palette = config.palette_colors();

    let axis = &reference.hist.axis;
    let x_label = if axis.title.is_empty() { reference.hist.name.clone() } else { axis.title.clone() };
    let x_axis = Axis::linear_within(axis.min, axis.max, 6);
    let x_axis_ratio = x_axis.clone().with_label(x_label);

    let y_max = series
        .iter()
        .flat_map(|s| s.hist.bin_content.iter().copied())
        .fold(0.0_f64, f64::max);
    let y_label = opts.y_label.clone().unwrap_or_else(|| "number of entries".into());
    let y_axis_main = if opts.log_y {
        Axis::auto_log(0.5, y_max.max(1.0) * 3.0)
    } else {
        Axis::auto_linear(0.0, y_max * 1.25 + 1e-12, 5)
    }
    .with_label(y_label);

    let ratio_range = config.overlay.ratio_y_range;
    let y_axis_ratio = Axis::auto_linear(ratio_range[0], ratio_range[1], 3)
        .with_label(config.overlay.ratio_label.clone());

    // Margins, then split into main + ratio.
    let left_margin = {
        let style = TextStyle { size: config.font.tick_size, ..Default::default() };
        y_axis_main
            .tick_labels
            .iter()
            .map(|l| canvas.measure_text(l, &style).width)
            .fold(0.0_f64, f64::max)
            + config.font.label_size
            + 22.0
    };
    let right_margin = 15.0;
    let top_margin =
        if config.experiment.name.is_empty() { 12.0 } else { config.font.label_size * 1.3 + 20.0 };
    let bottom_margin = config.font.tick_size + config.font.label_size + 20.0;
    let content_w = fig_w - left_margin - right_margin;
    let content_h = fig_h - top_margin - bottom_margin;

    let layout = MainRatioLayout::new(left_margin, top_margin, content_w, content_h, 4.0, 0.25);

    draw_experiment_header(&mut canvas, &layout.main, config);

    // --- Main panel ---
    let main = &layout.main;
    draw_axes(&mut canvas, main, &x_axis, &y_axis_main, config);
    let _clip = canvas.push_clip(main.left, main.top, main.width, main.height);

    for (si, s) in series.iter().enumerate() {
        let color = if si < palette.len() { palette[si] } else { Color::hex("#888888") };
        draw_series(&mut canvas, main, &x_axis, &y_axis_main, &s.hist, color, opts.log_y);
    }

    canvas.pop_clip();

    // --- Ratio panel ---
    let ratio = &layout.ratio;
    draw_axes(&mut canvas, ratio, &x_axis_ratio, &y_axis_ratio, config);
    let _clip2 = canvas.push_clip(ratio.left, ratio.top, ratio.width, ratio.height);

    // Reference line at 1
    let ref_py = y_axis_ratio.data_to_pixel(1.0, ratio.bottom(), ratio.top);
    canvas.line(
        ratio.left,
        ref_py,
        ratio.right(),
        ref_py,
        &LineStyle::dashed(config.colors.reference, 0.6),
    );

    for (si, s) in series.iter().enumerate().skip(1) {
        let color = if si < palette.len() { palette[si] } else { Color::hex("#888888") };
        match s.hist.ratio_to(&reference.hist) {
            Ok(r) => draw_series(&mut canvas, ratio, &x_axis, &y_axis_ratio, &r, color, false),
            Err(e) => {
                return Err(crate::RenderError::Layout(format!(
                    "cannot ratio '{}' to '{}': {e}",
                    s.label, reference.label
                )));
            }
        }
    }

    canvas.pop_clip();

    let entries: Vec<LegendEntry> = series
        .iter()
        .enumerate()
        .map(|(i, s)| LegendEntry {
            label: s.label.clone(),
            color: if i < palette.len() { palette[i] } else { Color::hex("#888888") },
            kind: LegendKind::Marker,
        })
        .collect();
    legend::draw_legend(&mut canvas, main, &entries, config.font.size, false);

    Ok(canvas.finish_svg())
}

fn draw_series(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    h: &Hist1D,
    color: Color,
    log_y: bool,
) {
    let marker = MarkerStyle { color, size: 2.0, ..Default::default() };
    let err_style = LineStyle::solid(color, 0.8);

    for i in 0..h.axis.n_bins {
        let content = h.bin_content[i];
        if content == 0.0 {
            continue;
        }
        let err = h.bin_error(i);
        let px = x_axis.data_to_pixel(h.axis.bin_center(i), area.left, area.right());
        let py = y_axis.data_to_pixel(content, area.bottom(), area.top);
        let lo = if log_y { (content - err).max(y_axis.min) } else { content - err };
        let py_lo = y_axis.data_to_pixel(lo, area.bottom(), area.top);
        let py_hi = y_axis.data_to_pixel(content + err, area.bottom(), area.top);

        canvas.error_bar(px, py_lo, py_hi, 0.0, &err_style);
        canvas.marker(px, py, &marker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qa_root::AxisDef;

    fn hist(name: &str, scale: f64) -> Hist1D {
        Hist1D {
            name: name.into(),
            title: String::new(),
            axis: AxisDef::uniform(4, 0.0, 8.0, "#it{p}_{T}"),
            bin_content: vec![100.0 * scale, 50.0 * scale, 10.0 * scale, 2.0 * scale],
            sumw2: None,
            entries: 162.0 * scale,
        }
    }

    fn series() -> Vec<OverlaySeries> {
        vec![
            OverlaySeries { label: "globalTrack".into(), hist: hist("pt", 1.0) },
            OverlaySeries { label: "maxDcaZ1".into(), hist: hist("pt", 0.9) },
            OverlaySeries { label: "maxDcaZ3".into(), hist: hist("pt", 1.1) },
        ]
    }

    #[test]
    fn overlay_has_legend_and_ratio_panel() {
        let svg = render(&series(), &OverlayOptions::default(), &VizConfig::default()).unwrap();
        assert!(svg.contains("globalTrack"));
        assert!(svg.contains("maxDcaZ3"));
        assert!(svg.contains("Ratio to reference"));
    }

    #[test]
    fn empty_series_is_an_error() {
        assert!(render(&[], &OverlayOptions::default(), &VizConfig::default()).is_err());
    }

    #[test]
    fn incompatible_binnings_are_an_error() {
        let mut s = series();
        s[1].hist.axis = AxisDef::uniform(8, 0.0, 8.0, "");
        s[1].hist.bin_content = vec![1.0; 8];
        assert!(render(&s, &OverlayOptions::default(), &VizConfig::default()).is_err());
    }
}
