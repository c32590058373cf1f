//! 1D error-bar distribution plot.
//!
//! The standard QA view of a stored 1D quantity: full square markers with
//! statistical error bars, "number of entries" on the y axis, optionally
//! log-scaled (momentum spectra), optionally annotated with the stored title
//! and entry count (vertex and multiplicity distributions, where the event
//! count matters).

use qa_root::Hist1D;

use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::header::draw_experiment_header;
use crate::layout::axes::Axis;
use crate::layout::margins::PlotArea;
use crate::plots::axes_draw::draw_axes;
use crate::primitives::*;

/// Per-plot options chosen by the traversal dispatch.
#[derive(Debug, Clone, Default)]
pub struct Hist1dOptions {
    /// Log-scale the y axis (momentum spectra).
    pub log_y: bool,
    /// Show the stored title and entry count above the frame.
    pub show_title: bool,
}

pub fn render(h: &Hist1D, opts: &Hist1dOptions, config: &VizConfig) -> crate::Result<String> {
    let mut canvas = Canvas::new(config.figure.width, config.figure.height);

    let x_label = if h.axis.title.is_empty() { h.name.clone() } else { h.axis.title.clone() };
    let x_axis =
        Axis::linear_within(h.axis.min, h.axis.max, 6).with_label(x_label);

    let max = h.max_content();
    let y_axis = if opts.log_y {
        let min_pos = h
            .bin_content
            .iter()
            .copied()
            .filter(|v| *v > 0.0)
            .fold(f64::INFINITY, f64::min)
            .min(1.0);
        Axis::auto_log(min_pos.max(0.5), max.max(1.0) * 3.0)
    } else {
        Axis::auto_linear(0.0, max * 1.25 + 1e-12, 5)
    }
    .with_label("number of entries");

    let area = PlotArea::auto(&canvas, Some(&y_axis), Some(&x_axis), config);
    draw_experiment_header(&mut canvas, &area, config);
    draw_axes(&mut canvas, &area, &x_axis, &y_axis, config);

    let _clip = canvas.push_clip(area.left, area.top, area.width, area.height);

    let marker = MarkerStyle { color: config.colors.marker, ..Default::default() };
    let err_style = LineStyle::solid(config.colors.marker, 1.0);

    for i in 0..h.axis.n_bins {
        let content = h.bin_content[i];
        if content == 0.0 {
            continue;
        }
        let err = h.bin_error(i);
        let px = x_axis.data_to_pixel(h.axis.bin_center(i), area.left, area.right());
        let py = y_axis.data_to_pixel(content, area.bottom(), area.top);
        let py_lo = y_axis.data_to_pixel(
            if opts.log_y { (content - err).max(y_axis.min) } else { content - err },
            area.bottom(),
            area.top,
        );
        let py_hi = y_axis.data_to_pixel(content + err, area.bottom(), area.top);

        canvas.error_bar(px, py_lo, py_hi, 3.0, &err_style);
        canvas.marker(px, py, &marker);
    }

    canvas.pop_clip();

    if opts.show_title {
        let title = if h.title.is_empty() { h.name.clone() } else { h.title.clone() };
        let annotation = format!("{} (entries: {:.0})", title, h.entries);
        let style = TextStyle {
            size: config.font.size,
            anchor: TextAnchor::Start,
            weight: FontWeight::Bold,
            ..Default::default()
        };
        canvas.text(area.left + 5.0, area.top + 14.0, &annotation, &style);
    }

    Ok(canvas.finish_svg())
}
