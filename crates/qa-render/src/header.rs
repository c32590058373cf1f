use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::VizConfig;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

/// Draw the experiment header (e.g. **ALICE** *Work in Progress*, √s = 13.6 TeV).
pub fn draw_experiment_header(canvas: &mut Canvas, area: &PlotArea, config: &VizConfig) {
    if config.experiment.name.is_empty() {
        return;
    }

    let header_size = config.font.label_size * 1.3;
    let x = area.left + area.width * 0.02;
    let y = area.top - 6.0;

    let bold_style = TextStyle {
        size: header_size,
        color: Color::rgb(0, 0, 0),
        weight: FontWeight::Bold,
        anchor: TextAnchor::Start,
        baseline: TextBaseline::Alphabetic,
        ..Default::default()
    };
    canvas.text(x, y, &config.experiment.name, &bold_style);

    let name_w = canvas.measure_text(&config.experiment.name, &bold_style).width;

    if !config.experiment.status.is_empty() {
        let italic_style = TextStyle {
            size: header_size * 0.85,
            color: Color::rgb(0, 0, 0),
            style: FontStyle::Italic,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
            ..Default::default()
        };
        canvas.text(x + name_w + 5.0, y, &config.experiment.status, &italic_style);
    }

    if config.experiment.sqrt_s_tev > 0.0 {
        let info = format!("pp, \u{221A}s = {} TeV", config.experiment.sqrt_s_tev);
        let info_style = TextStyle {
            size: config.font.tick_size,
            color: Color::rgb(80, 80, 80),
            anchor: TextAnchor::End,
            baseline: TextBaseline::Alphabetic,
            ..Default::default()
        };
        canvas.text(area.right(), y, &info, &info_style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_shows_experiment_and_energy() {
        let mut canvas = Canvas::new(400.0, 300.0);
        let area = PlotArea::manual(40.0, 40.0, 320.0, 220.0);
        draw_experiment_header(&mut canvas, &area, &VizConfig::default());
        let svg = canvas.finish_svg();
        assert!(svg.contains("ALICE"));
        assert!(svg.contains("13.6 TeV"));
    }

    #[test]
    fn empty_name_draws_nothing() {
        let mut canvas = Canvas::new(400.0, 300.0);
        let area = PlotArea::manual(40.0, 40.0, 320.0, 220.0);
        let mut cfg = VizConfig::default();
        cfg.experiment.name.clear();
        draw_experiment_header(&mut canvas, &area, &cfg);
        let svg = canvas.finish_svg();
        assert!(!svg.contains("TeV"));
    }
}
