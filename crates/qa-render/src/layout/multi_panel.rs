use crate::layout::margins::PlotArea;

/// Main + ratio panel layout for comparison overlays.
/// The main panel gets `1 - ratio_frac` of the height.
#[derive(Debug, Clone)]
pub struct MainRatioLayout {
    pub main: PlotArea,
    pub ratio: PlotArea,
}

impl MainRatioLayout {
    pub fn new(
        left: f64,
        top: f64,
        width: f64,
        total_height: f64,
        gap: f64,
        ratio_frac: f64,
    ) -> Self {
        let ratio_h = total_height * ratio_frac;
        let main_h = total_height - ratio_h - gap;

        Self {
            main: PlotArea::manual(left, top, width, main_h),
            ratio: PlotArea::manual(left, top + main_h + gap, width, ratio_h),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panels_stack_without_overlap() {
        let layout = MainRatioLayout::new(40.0, 30.0, 300.0, 400.0, 4.0, 0.25);
        assert!((layout.main.height - 296.0).abs() < 1e-9);
        assert!((layout.ratio.top - (30.0 + 296.0 + 4.0)).abs() < 1e-9);
        assert!((layout.ratio.height - 100.0).abs() < 1e-9);
    }
}
