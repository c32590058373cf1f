use crate::config::*;

/// Built-in theme presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinTheme {
    TrackQa,
    Alice,
    Minimal,
}

impl BuiltinTheme {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "alice" => Self::Alice,
            "minimal" => Self::Minimal,
            _ => Self::TrackQa,
        }
    }

    pub fn base_config(self) -> VizConfig {
        match self {
            Self::TrackQa => trackqa(),
            Self::Alice => alice(),
            Self::Minimal => minimal(),
        }
    }
}

fn trackqa() -> VizConfig {
    VizConfig {
        theme: "trackqa".into(),
        figure: FigureConfig::default(),
        font: FontConfig::default(),
        axes: AxesConfig::default(),
        grid: GridConfig::default(),
        experiment: ExperimentConfig::default(),
        colors: ColorsConfig::default(),
        palette: "wong".into(),
        output: OutputConfig::default(),
        heatmap: HeatmapConfig::default(),
        overlay: OverlayConfig::default(),
    }
}

fn alice() -> VizConfig {
    VizConfig {
        theme: "alice".into(),
        figure: FigureConfig { width: 576.0, height: 576.0 },
        font: FontConfig { size: 11.0, label_size: 12.0, tick_size: 9.5 },
        experiment: ExperimentConfig {
            name: "ALICE".into(),
            status: "Performance".into(),
            sqrt_s_tev: 13.6,
        },
        ..trackqa()
    }
}

fn minimal() -> VizConfig {
    VizConfig {
        theme: "minimal".into(),
        figure: FigureConfig { width: 432.0, height: 302.4 },
        font: FontConfig { size: 9.0, label_size: 10.0, tick_size: 8.0 },
        axes: AxesConfig {
            tick_direction: "out".into(),
            show_top_ticks: false,
            show_right_ticks: false,
            tick_length: 4.0,
            minor_tick_length: 2.0,
        },
        experiment: ExperimentConfig { name: String::new(), status: String::new(), sqrt_s_tev: 0.0 },
        palette: "tableau10".into(),
        ..trackqa()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_falls_back_to_house_theme() {
        assert_eq!(BuiltinTheme::parse("alice"), BuiltinTheme::Alice);
        assert_eq!(BuiltinTheme::parse("MINIMAL"), BuiltinTheme::Minimal);
        assert_eq!(BuiltinTheme::parse("whatever"), BuiltinTheme::TrackQa);
    }

    #[test]
    fn minimal_theme_hides_the_header() {
        let cfg = BuiltinTheme::Minimal.base_config();
        assert!(cfg.experiment.name.is_empty());
        assert_eq!(cfg.axes.tick_direction, "out");
    }
}
