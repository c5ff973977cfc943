//! Turns an aggregated result into a chart-plus-total payload.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;
use tracing::error;

use crate::domain::error::DomainError;
use crate::domain::model::{Category, FootprintResult};

pub const CHART_TITLE: &str = "Carbon Footprint Breakdown";
pub const X_AXIS_LABEL: &str = "Category";
pub const Y_AXIS_LABEL: &str = "Carbon Footprint (in CO2e)";

/// One bar of the breakdown chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub category: Category,
    pub value: f64,
}

impl Bar {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.category.label()
    }
}

/// Renderer-independent description of the breakdown chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub bars: [Bar; 3],
}

impl BarChart {
    /// Bars follow [`Category::ALL`] regardless of magnitudes.
    #[must_use]
    pub fn from_result(result: &FootprintResult) -> Self {
        Self {
            title: CHART_TITLE,
            x_label: X_AXIS_LABEL,
            y_label: Y_AXIS_LABEL,
            bars: Category::ALL.map(|category| Bar {
                category,
                value: result.value(category),
            }),
        }
    }
}

/// Encoded chart, ready for inline embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage {
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ChartImage {
    #[must_use]
    pub fn png(bytes: Vec<u8>) -> Self {
        Self {
            media_type: "image/png",
            bytes,
        }
    }

    /// `data:` URI for an `<img src>` attribute.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.media_type,
            STANDARD.encode(&self.bytes)
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("chart does not fit in {width}x{height} pixels")]
    Geometry { width: u32, height: u32 },

    #[error("image encoding failed: {0}")]
    Encoding(String),
}

/// Draws a [`BarChart`] into an encoded image.
pub trait ChartRenderer: Send + Sync {
    /// # Errors
    /// Returns [`RenderError`] if the chart cannot be laid out or encoded.
    fn render(&self, chart: &BarChart) -> Result<ChartImage, RenderError>;
}

/// Everything the result page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub chart: BarChart,
    pub image: ChartImage,
    pub total: f64,
}

#[derive(Clone)]
pub struct Presenter {
    renderer: Arc<dyn ChartRenderer>,
}

impl Presenter {
    #[must_use]
    pub fn new(renderer: Arc<dyn ChartRenderer>) -> Self {
        Self { renderer }
    }

    /// Build the breakdown chart for `result` and pair it with the total.
    ///
    /// # Errors
    /// Returns [`DomainError::PresentationFailure`] if rendering fails.
    pub fn present(&self, result: &FootprintResult) -> Result<Presentation, DomainError> {
        let chart = BarChart::from_result(result);
        let image = self.renderer.render(&chart).map_err(|e| {
            error!(error = %e, "Error in generating result");
            DomainError::presentation_failure(e.to_string())
        })?;

        Ok(Presentation {
            chart,
            image,
            total: result.total,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::domain::model::FootprintInput;
    use std::sync::Mutex;

    /// Records the charts it is asked to draw.
    #[derive(Default)]
    struct RecordingRenderer {
        seen: Mutex<Vec<BarChart>>,
    }

    impl ChartRenderer for RecordingRenderer {
        fn render(&self, chart: &BarChart) -> Result<ChartImage, RenderError> {
            self.seen.lock().unwrap().push(chart.clone());
            Ok(ChartImage::png(vec![1, 2, 3]))
        }
    }

    struct BrokenRenderer;

    impl ChartRenderer for BrokenRenderer {
        fn render(&self, _chart: &BarChart) -> Result<ChartImage, RenderError> {
            Err(RenderError::Encoding("out of memory".to_owned()))
        }
    }

    fn result(t: f64, e: f64, w: f64) -> FootprintResult {
        FootprintResult::from_input(FootprintInput::new(t, e, w))
    }

    #[test]
    fn test_bars_keep_fixed_order_regardless_of_magnitude() {
        let renderer = Arc::new(RecordingRenderer::default());
        let presenter = Presenter::new(renderer.clone());

        for (t, e, w) in [(1.0, 2.0, 3.0), (3.0, 2.0, 1.0), (0.0, 9.0, 0.5)] {
            let presentation = presenter.present(&result(t, e, w)).unwrap();
            let labels: Vec<_> = presentation.chart.bars.iter().map(Bar::label).collect();
            assert_eq!(labels, ["Transport", "Electricity", "Waste"]);
            let values: Vec<_> = presentation.chart.bars.iter().map(|b| b.value).collect();
            assert_eq!(values, [t, e, w]);
        }

        assert_eq!(renderer.seen.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_presentation_carries_total_and_titles() {
        let presenter = Presenter::new(Arc::new(RecordingRenderer::default()));
        let presentation = presenter.present(&result(10.0, 5.0, 2.0)).unwrap();
        assert_eq!(presentation.total, 17.0);
        assert_eq!(presentation.chart.title, "Carbon Footprint Breakdown");
        assert_eq!(presentation.chart.x_label, "Category");
        assert_eq!(presentation.chart.y_label, "Carbon Footprint (in CO2e)");
    }

    #[test]
    fn test_render_failure_maps_to_presentation_failure() {
        let presenter = Presenter::new(Arc::new(BrokenRenderer));
        let err = presenter.present(&result(1.0, 1.0, 1.0)).unwrap_err();
        assert!(matches!(err, DomainError::PresentationFailure { .. }));
        assert_eq!(err.user_message(), "Error in generating the result.");
    }

    #[test]
    fn test_data_uri() {
        let image = ChartImage::png(b"abc".to_vec());
        assert_eq!(image.data_uri(), "data:image/png;base64,YWJj");
    }
}
