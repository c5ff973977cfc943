//! Pixel geometry of the breakdown chart: plot area, value axis and bars.

use crate::domain::presenter::RenderError;

pub const MARGIN_LEFT: u32 = 80;
pub const MARGIN_RIGHT: u32 = 24;
pub const MARGIN_TOP: u32 = 48;
pub const MARGIN_BOTTOM: u32 = 64;

const TARGET_TICKS: f64 = 5.0;
const MAX_TICKS: usize = 10;
const NICE_STEPS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Linear value axis starting at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    pub max: f64,
    pub step: f64,
}

impl AxisScale {
    /// Round the largest value up to a 1/2/2.5/5 multiple of a power of ten.
    #[must_use]
    pub fn for_values(values: &[f64]) -> Self {
        let peak = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max);
        if peak <= 0.0 {
            return Self { max: 1.0, step: 0.2 };
        }

        let raw = peak / TARGET_TICKS;
        let magnitude = 10f64.powf(raw.log10().floor());
        let normalized = raw / magnitude;
        let nice = NICE_STEPS
            .iter()
            .copied()
            .find(|s| *s >= normalized)
            .unwrap_or(10.0);
        let step = nice * magnitude;
        let max = (peak / step).ceil() * step;

        if step > 0.0 && step.is_finite() && max.is_finite() && max >= peak {
            Self { max, step }
        } else {
            Self {
                max: peak,
                step: peak,
            }
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn tick_count(&self) -> usize {
        ((self.max / self.step).round() as usize).clamp(1, MAX_TICKS)
    }

    /// Tick values from zero up to `max`, inclusive.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn ticks(&self) -> Vec<f64> {
        let count = self.tick_count();
        let step = self.max / count as f64;
        (0..=count).map(|i| step * i as f64).collect()
    }

    /// Position of `value` along the axis, `0.0..=1.0`.
    #[must_use]
    pub fn fraction(&self, value: f64) -> f64 {
        let f = value / self.max;
        if f.is_nan() { 0.0 } else { f.clamp(0.0, 1.0) }
    }
}

/// Resolved geometry for one chart image.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub plot: Rect,
    pub scale: AxisScale,
    /// One rect per bar, in category order.
    pub bars: [Rect; 3],
}

impl ChartLayout {
    /// # Errors
    /// Returns [`RenderError::Geometry`] if the margins leave no plot area.
    pub fn compute(width: u32, height: u32, values: [f64; 3]) -> Result<Self, RenderError> {
        let geometry = RenderError::Geometry { width, height };
        let plot_width = width
            .checked_sub(MARGIN_LEFT + MARGIN_RIGHT)
            .filter(|w| *w >= 3)
            .ok_or_else(|| geometry.clone())?;
        let plot_height = height
            .checked_sub(MARGIN_TOP + MARGIN_BOTTOM)
            .filter(|h| *h > 0)
            .ok_or(geometry)?;

        let plot = Rect {
            x: MARGIN_LEFT,
            y: MARGIN_TOP,
            width: plot_width,
            height: plot_height,
        };
        let scale = AxisScale::for_values(&values);

        let slot = plot_width / 3;
        let bar_width = (slot * 3 / 5).max(1);
        let inset = (slot - bar_width) / 2;
        let mut left = plot.x;
        let bars = values.map(|value| {
            let bar_height = to_px(scale.fraction(value) * f64::from(plot_height)).min(plot_height);
            let rect = Rect {
                x: left + inset,
                y: plot.bottom() - bar_height,
                width: bar_width,
                height: bar_height,
            };
            left += slot;
            rect
        });

        Ok(Self {
            plot,
            scale,
            bars,
        })
    }

    /// Vertical pixel of `value` on the value axis.
    #[must_use]
    pub fn value_y(&self, value: f64) -> u32 {
        let offset = to_px(self.scale.fraction(value) * f64::from(self.plot.height));
        self.plot.bottom() - offset.min(self.plot.height)
    }

    /// Horizontal centre of the bar slot at `index`.
    #[must_use]
    pub fn slot_center(&self, index: usize) -> u32 {
        self.bars
            .get(index)
            .map_or(self.plot.x, |bar| bar.x + bar.width / 2)
    }
}

/// Tick label text. Large and tiny magnitudes use exponent notation.
#[must_use]
pub fn tick_label(value: f64, step: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    if !(1e-4..1e6).contains(&step) {
        let text = format!("{value:.2e}");
        return match text.split_once('e') {
            Some((mantissa, exponent)) => format!("{}e{exponent}", trim_fraction(mantissa)),
            None => text,
        };
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let decimals = (-step.log10().floor()).max(0.0) as usize + 1;
    trim_fraction(&format!("{value:.decimals$}")).to_owned()
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_px(value: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, f64::from(u32::MAX)) as u32
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_rounds_up_to_nice_step() {
        let scale = AxisScale::for_values(&[10.0, 5.0, 2.0]);
        assert_eq!(scale.step, 2.0);
        assert_eq!(scale.max, 10.0);
        assert_eq!(scale.ticks(), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);

        let scale = AxisScale::for_values(&[0.0, 11.0, 0.0]);
        assert_eq!(scale.step, 2.5);
        assert_eq!(scale.max, 12.5);
    }

    #[test]
    fn test_scale_all_zero_uses_unit_axis() {
        let scale = AxisScale::for_values(&[0.0, 0.0, 0.0]);
        assert_eq!(scale.max, 1.0);
        assert_eq!(scale.fraction(0.0), 0.0);
    }

    #[test]
    fn test_scale_handles_extreme_peaks() {
        for peak in [1e-300, 1e300, f64::MAX] {
            let scale = AxisScale::for_values(&[peak, 0.0, 0.0]);
            assert!(scale.max.is_finite());
            assert!(scale.max >= peak);
            assert!(scale.step > 0.0);
            assert!((1..=MAX_TICKS).contains(&scale.tick_count()));
        }
    }

    #[test]
    fn test_bars_keep_order_and_proportion() {
        let layout = ChartLayout::compute(600, 400, [10.0, 5.0, 0.0]).unwrap();
        let [transport, electricity, waste] = layout.bars;

        assert!(transport.x < electricity.x);
        assert!(electricity.x < waste.x);
        assert_eq!(transport.height, layout.plot.height);
        assert_eq!(electricity.height, layout.plot.height / 2);
        assert_eq!(waste.height, 0);
        for bar in layout.bars {
            assert_eq!(bar.bottom(), layout.plot.bottom());
            assert!(bar.x + bar.width <= layout.plot.x + layout.plot.width);
        }
    }

    #[test]
    fn test_too_small_image_is_rejected() {
        assert_eq!(
            ChartLayout::compute(100, 100, [1.0, 1.0, 1.0]),
            Err(RenderError::Geometry {
                width: 100,
                height: 100
            })
        );
    }

    #[test]
    fn test_tick_labels() {
        assert_eq!(tick_label(0.0, 2.0), "0");
        assert_eq!(tick_label(4.0, 2.0), "4");
        assert_eq!(tick_label(7.5, 2.5), "7.5");
        assert_eq!(tick_label(0.6000000000000001, 0.2), "0.6");
        assert_eq!(tick_label(2_000_000.0, 1_000_000.0), "2e6");
        assert_eq!(tick_label(2.5e300, 5e299), "2.5e300");
    }
}
