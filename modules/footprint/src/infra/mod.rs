pub mod chart;

pub use chart::RasterChartRenderer;
