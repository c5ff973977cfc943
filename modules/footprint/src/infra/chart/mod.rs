//! PNG rasterizer for the breakdown chart.
//!
//! Draws with a built-in bitmap font so rendering needs no system fonts and
//! produces identical bytes for identical input.

mod canvas;
mod glyphs;
mod layout;

use image::Rgba;
use tracing::debug;

use crate::config::ChartConfig;
use crate::domain::model::Category;
use crate::domain::presenter::{BarChart, ChartImage, ChartRenderer, RenderError};

use canvas::{Canvas, text_height, text_width};
use layout::{ChartLayout, tick_label};

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([33, 37, 41, 255]);
const GRID: Rgba<u8> = Rgba([222, 226, 230, 255]);

const TITLE_SCALE: u32 = 2;
const LABEL_SCALE: u32 = 1;
const TICK_LENGTH: u32 = 4;
const GAP: u32 = 6;

/// Fill color of a category's bar.
#[must_use]
pub const fn bar_color(category: Category) -> Rgba<u8> {
    match category {
        Category::Transport => Rgba([0, 0, 255, 255]),
        Category::Electricity => Rgba([0, 128, 0, 255]),
        Category::Waste => Rgba([255, 0, 0, 255]),
    }
}

/// Fixed-size PNG bar chart renderer.
#[derive(Debug, Clone, Copy)]
pub struct RasterChartRenderer {
    width: u32,
    height: u32,
}

impl RasterChartRenderer {
    #[must_use]
    pub const fn new(config: ChartConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
        }
    }

    fn draw(self, chart: &BarChart, layout: &ChartLayout) -> Canvas {
        let mut canvas = Canvas::new(self.width, self.height, BACKGROUND);
        let plot = layout.plot;

        // Title, centred above the plot.
        let title_x = centred(self.width, text_width(chart.title, TITLE_SCALE));
        let title_y = plot.y.saturating_sub(text_height(TITLE_SCALE) + GAP * 2);
        canvas.draw_text(title_x, title_y, chart.title, TITLE_SCALE, INK);

        // Value axis: grid lines, ticks and labels.
        for value in layout.scale.ticks() {
            let y = layout.value_y(value);
            if y != plot.bottom() {
                canvas.hline(plot.x + 1, y, plot.width, GRID);
            }
            canvas.hline(plot.x - TICK_LENGTH, y, TICK_LENGTH, INK);
            let label = tick_label(value, layout.scale.step);
            let label_x = plot
                .x
                .saturating_sub(TICK_LENGTH + 2 + text_width(&label, LABEL_SCALE));
            let label_y = y.saturating_sub(text_height(LABEL_SCALE) / 2);
            canvas.draw_text(label_x, label_y, &label, LABEL_SCALE, INK);
        }

        for (bar, rect) in chart.bars.iter().zip(layout.bars) {
            canvas.fill_rect(rect, bar_color(bar.category));
        }

        canvas.vline(plot.x, plot.y, plot.height + 1, INK);
        canvas.hline(plot.x, plot.bottom(), plot.width, INK);

        // Category labels under each bar.
        let label_y = plot.bottom() + TICK_LENGTH + GAP;
        for (index, bar) in chart.bars.iter().enumerate() {
            let center = layout.slot_center(index);
            canvas.vline(center, plot.bottom(), TICK_LENGTH, INK);
            let label = bar.label();
            let x = center.saturating_sub(text_width(label, LABEL_SCALE) / 2);
            canvas.draw_text(x, label_y, label, LABEL_SCALE, INK);
        }

        // Axis titles.
        let x_label_x =
            plot.x + centred(plot.width, text_width(chart.x_label, LABEL_SCALE));
        let x_label_y = label_y + text_height(LABEL_SCALE) + GAP * 2;
        canvas.draw_text(x_label_x, x_label_y, chart.x_label, LABEL_SCALE, INK);

        let y_label_bottom =
            plot.bottom() - centred(plot.height, text_width(chart.y_label, LABEL_SCALE));
        canvas.draw_text_vertical(GAP, y_label_bottom, chart.y_label, LABEL_SCALE, INK);

        canvas
    }
}

impl Default for RasterChartRenderer {
    fn default() -> Self {
        Self::new(ChartConfig::default())
    }
}

impl ChartRenderer for RasterChartRenderer {
    fn render(&self, chart: &BarChart) -> Result<ChartImage, RenderError> {
        let values = chart.bars.map(|bar| bar.value);
        let layout = ChartLayout::compute(self.width, self.height, values)?;
        let bytes = self.draw(chart, &layout).encode_png()?;
        debug!(
            width = self.width,
            height = self.height,
            bytes = bytes.len(),
            "Rendered footprint chart"
        );
        Ok(ChartImage::png(bytes))
    }
}

/// Offset that centres `inner` within `outer`, or zero if it does not fit.
const fn centred(outer: u32, inner: u32) -> u32 {
    outer.saturating_sub(inner) / 2
}
