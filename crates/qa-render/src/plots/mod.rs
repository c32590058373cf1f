pub mod axes_draw;
pub mod heatmap;
pub mod hist1d;
pub mod overlay;
pub mod profile;
