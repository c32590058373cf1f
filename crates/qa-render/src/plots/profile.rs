//! X-profile plot: per-column mean of a 2D correlation with error bars.

use qa_root::Profile1D;

use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::header::draw_experiment_header;
use crate::layout::axes::Axis;
use crate::layout::margins::PlotArea;
use crate::plots::axes_draw::draw_axes;
use crate::primitives::*;

pub fn render(p: &Profile1D, config: &VizConfig) -> crate::Result<String> {
    let mut canvas = Canvas::new(config.figure.width, config.figure.height);

    let x_label = if p.axis.title.is_empty() { p.name.clone() } else { p.axis.title.clone() };
    let x_axis = Axis::linear_within(p.axis.min, p.axis.max, 6).with_label(x_label);

    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for i in 0..p.axis.n_bins {
        if p.mean[i] == 0.0 && p.error[i] == 0.0 {
            continue;
        }
        lo = lo.min(p.mean[i] - p.error[i]);
        hi = hi.max(p.mean[i] + p.error[i]);
    }
    if !lo.is_finite() {
        lo = 0.0;
        hi = 1.0;
    }
    let pad = (hi - lo).abs().max(1e-12) * 0.15;
    let y_axis = Axis::auto_linear(lo - pad, hi + pad, 5).with_label("Mean value");

    let area = PlotArea::auto(&canvas, Some(&y_axis), Some(&x_axis), config);
    draw_experiment_header(&mut canvas, &area, config);
    draw_axes(&mut canvas, &area, &x_axis, &y_axis, config);

    let _clip = canvas.push_clip(area.left, area.top, area.width, area.height);

    let line_style = LineStyle::solid(config.colors.profile, 2.0);
    let err_style = LineStyle::solid(config.colors.profile, 1.0);

    let mut points = Vec::new();
    for i in 0..p.axis.n_bins {
        if p.mean[i] == 0.0 && p.error[i] == 0.0 {
            continue;
        }
        let px = x_axis.data_to_pixel(p.axis.bin_center(i), area.left, area.right());
        let py = y_axis.data_to_pixel(p.mean[i], area.bottom(), area.top);
        let py_lo = y_axis.data_to_pixel(p.mean[i] - p.error[i], area.bottom(), area.top);
        let py_hi = y_axis.data_to_pixel(p.mean[i] + p.error[i], area.bottom(), area.top);
        canvas.error_bar(px, py_lo, py_hi, 3.0, &err_style);
        points.push((px, py));
    }
    if points.len() > 1 {
        canvas.polyline(&points, &line_style);
    }

    canvas.pop_clip();

    if !p.title.is_empty() {
        let style = TextStyle {
            size: config.font.size,
            anchor: TextAnchor::Start,
            weight: FontWeight::Bold,
            ..Default::default()
        };
        canvas.text(area.left + 5.0, area.top + 14.0, &p.title, &style);
    }

    Ok(canvas.finish_svg())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qa_root::AxisDef;

    #[test]
    fn renders_line_and_mean_label() {
        let p = Profile1D {
            name: "sigma_pfx".into(),
            title: "Sigma1Pt X Profile".into(),
            axis: AxisDef::uniform(4, 0.0, 8.0, "#it{p}_{T}"),
            mean: vec![0.01, 0.012, 0.02, 0.0],
            error: vec![0.001, 0.001, 0.004, 0.0],
        };
        let svg = render(&p, &VizConfig::default()).unwrap();
        assert!(svg.contains("Mean value"));
        assert!(svg.contains("<polyline"));
        assert!(svg.contains("Sigma1Pt X Profile"));
    }

    #[test]
    fn empty_profile_still_renders_a_frame() {
        let p = Profile1D {
            name: "empty".into(),
            title: String::new(),
            axis: AxisDef::uniform(2, 0.0, 1.0, "x"),
            mean: vec![0.0, 0.0],
            error: vec![0.0, 0.0],
        };
        let svg = render(&p, &VizConfig::default()).unwrap();
        assert!(svg.contains("</svg>"));
        assert!(!svg.contains("<polyline"));
    }
}
