use serde::Serialize;

use crate::api::rest::format::format_quantity;
use crate::api::rest::routes::RESULT_PATH;
use crate::domain::model::FootprintResult;

/// Query string of the result page, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultQuery {
    pub transport: String,
    pub electricity: String,
    pub waste: String,
    pub total: String,
}

impl From<&FootprintResult> for ResultQuery {
    fn from(result: &FootprintResult) -> Self {
        Self {
            transport: format_quantity(result.transport),
            electricity: format_quantity(result.electricity),
            waste: format_quantity(result.waste),
            total: format_quantity(result.total),
        }
    }
}

impl ResultQuery {
    /// Redirect target for the result page.
    ///
    /// # Errors
    /// Returns an error if the query cannot be URL-encoded.
    pub fn location(&self) -> Result<String, serde_urlencoded::ser::Error> {
        Ok(format!("{RESULT_PATH}?{}", serde_urlencoded::to_string(self)?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
}

impl HealthDto {
    pub const HEALTHY: Self = Self { status: "healthy" };
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::model::FootprintInput;

    #[test]
    fn test_location_keeps_field_order_and_point_zero() {
        let result = FootprintResult::from_input(FootprintInput::new(10.0, 5.0, 2.0));
        assert_eq!(
            ResultQuery::from(&result).location().unwrap(),
            "/result?transport=10.0&electricity=5.0&waste=2.0&total=17.0"
        );
    }

    #[test]
    fn test_exponent_sign_is_escaped() {
        let result = FootprintResult::from_input(FootprintInput::new(1e16, 0.0, 0.0));
        let location = ResultQuery::from(&result).location().unwrap();
        assert!(location.starts_with("/result?transport=1e%2B16&"), "{location}");
    }
}
