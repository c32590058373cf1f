use serde::Deserialize;

use crate::color::Color;
use crate::theme::BuiltinTheme;

/// Top-level plot style configuration (YAML or programmatic).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    pub theme: String,
    pub figure: FigureConfig,
    pub font: FontConfig,
    pub axes: AxesConfig,
    pub grid: GridConfig,
    pub experiment: ExperimentConfig,
    pub colors: ColorsConfig,
    pub palette: String,
    pub output: OutputConfig,
    pub heatmap: HeatmapConfig,
    pub overlay: OverlayConfig,
}

impl Default for VizConfig {
    fn default() -> Self {
        BuiltinTheme::TrackQa.base_config()
    }
}

impl VizConfig {
    pub fn palette_colors(&self) -> Vec<Color> {
        crate::color::palette_colors(&self.palette)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        // Square canvases, the QA house format.
        Self { width: 460.8, height: 460.8 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub size: f64,
    pub label_size: f64,
    pub tick_size: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self { size: 10.0, label_size: 11.0, tick_size: 8.5 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    pub tick_direction: String,
    pub show_top_ticks: bool,
    pub show_right_ticks: bool,
    pub tick_length: f64,
    pub minor_tick_length: f64,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            tick_direction: "in".into(),
            show_top_ticks: true,
            show_right_ticks: true,
            tick_length: 5.0,
            minor_tick_length: 3.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub show: bool,
    pub color: Color,
    pub alpha: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { show: false, color: Color::hex("#CBD5E1"), alpha: 0.55 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub name: String,
    pub status: String,
    pub sqrt_s_tev: f64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self { name: "ALICE".into(), status: "Work in Progress".into(), sqrt_s_tev: 13.6 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    /// Marker/error-bar color of single-distribution plots.
    pub marker: Color,
    /// Line color of profile plots.
    pub profile: Color,
    /// Reference line color in ratio panels.
    pub reference: Color,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            marker: Color::hex("#2A45C2"),
            profile: Color::hex("#38A3E0"),
            reference: Color::hex("#969696"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: String,
    pub dpi: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { format: "svg".into(), dpi: 220 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Log-scaled color palette (the QA default).
    pub log_z: bool,
    /// Vertical colorbar resolution.
    pub colorbar_steps: usize,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self { log_z: true, colorbar_steps: 50 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub ratio_y_range: [f64; 2],
    pub ratio_label: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self { ratio_y_range: [0.5, 1.5], ratio_label: "Ratio to reference".into() }
    }
}

/// Resolve a VizConfig from an optional YAML string.
/// Priority: user YAML overrides → theme base config.
pub fn resolve_config(user_yaml: Option<&str>) -> crate::Result<VizConfig> {
    match user_yaml {
        None => Ok(VizConfig::default()),
        Some(yaml) => {
            let config: VizConfig = serde_yaml_ng::from_str(yaml)
                .map_err(|e| crate::RenderError::Config(e.to_string()))?;
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_resolves_to_trackqa_theme() {
        let cfg = resolve_config(None).unwrap();
        assert_eq!(cfg.theme, "trackqa");
        assert!(cfg.heatmap.log_z);
    }

    #[test]
    fn yaml_overrides_apply_over_defaults() {
        let cfg = resolve_config(Some("figure:\n  width: 720\n  height: 360\npalette: tableau10\n"))
            .unwrap();
        assert!((cfg.figure.width - 720.0).abs() < 1e-9);
        assert_eq!(cfg.palette, "tableau10");
        // Untouched fields keep their defaults.
        assert_eq!(cfg.experiment.name, "ALICE");
    }

    #[test]
    fn bad_yaml_is_a_config_error() {
        assert!(resolve_config(Some("figure: [not a map")).is_err());
    }
}
