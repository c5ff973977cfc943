use serde::{Deserialize, Serialize};

/// Smallest accepted chart edge, in pixels.
pub const MIN_CHART_DIMENSION: u32 = 200;
/// Largest accepted chart edge, in pixels.
pub const MAX_CHART_DIMENSION: u32 = 4000;

/// Configuration for the `footprint` module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FootprintConfig {
    pub chart: ChartConfig,
}

/// Size of the rendered breakdown chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    /// Image width in pixels
    #[serde(default = "default_chart_width")]
    pub width: u32,
    /// Image height in pixels
    #[serde(default = "default_chart_height")]
    pub height: u32,
}

fn default_chart_width() -> u32 {
    600
}

fn default_chart_height() -> u32 {
    400
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("chart {dimension} must be within {min}..={max} pixels, got {value}")]
    ChartDimension {
        dimension: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}

impl FootprintConfig {
    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    /// Returns [`ConfigError::ChartDimension`] if the chart width or height is
    /// outside `MIN_CHART_DIMENSION..=MAX_CHART_DIMENSION`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_dimension("width", self.chart.width)?;
        check_dimension("height", self.chart.height)
    }
}

fn check_dimension(dimension: &'static str, value: u32) -> Result<(), ConfigError> {
    if (MIN_CHART_DIMENSION..=MAX_CHART_DIMENSION).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ChartDimension {
            dimension,
            value,
            min: MIN_CHART_DIMENSION,
            max: MAX_CHART_DIMENSION,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = FootprintConfig::default();
        assert_eq!(config.chart.width, 600);
        assert_eq!(config.chart.height, 400);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_applies_defaults() {
        let yaml = r"
chart:
  width: 800
";
        let config: FootprintConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.chart.width, 800);
        assert_eq!(config.chart.height, 400); // default
    }

    #[test]
    fn test_config_reject_unknown_fields() {
        let yaml = r"
chart:
  depth: 3
";
        let result: Result<FootprintConfig, _> = serde_saphyr::from_str(yaml);
        assert!(
            result.is_err(),
            "Config should reject unknown fields due to deny_unknown_fields"
        );
    }

    #[test]
    fn test_validate_rejects_tiny_chart() {
        let config = FootprintConfig {
            chart: ChartConfig {
                width: 50,
                height: 400,
            },
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ChartDimension {
                dimension: "width",
                value: 50,
                min: MIN_CHART_DIMENSION,
                max: MAX_CHART_DIMENSION,
            })
        );
    }

    #[test]
    fn test_validate_accepts_bounds() {
        let config = FootprintConfig {
            chart: ChartConfig {
                width: MIN_CHART_DIMENSION,
                height: MAX_CHART_DIMENSION,
            },
        };
        assert!(config.validate().is_ok());
    }
}
