use crate::domain::error::DomainError;

/// Emission category. `ALL` order is the left-to-right chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Transport,
    Electricity,
    Waste,
}

impl Category {
    pub const ALL: [Self; 3] = [Self::Transport, Self::Electricity, Self::Waste];

    /// Form field and query parameter name.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Electricity => "electricity",
            Self::Waste => "waste",
        }
    }

    /// Chart label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Transport => "Transport",
            Self::Electricity => "Electricity",
            Self::Waste => "Waste",
        }
    }
}

/// Validated per-category quantities, in `CO2e`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FootprintInput {
    pub transport: f64,
    pub electricity: f64,
    pub waste: f64,
}

impl FootprintInput {
    #[must_use]
    pub const fn new(transport: f64, electricity: f64, waste: f64) -> Self {
        Self {
            transport,
            electricity,
            waste,
        }
    }
}

/// Aggregated footprint. `total` is the exact `f64` sum of the three
/// components, added in category order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootprintResult {
    pub transport: f64,
    pub electricity: f64,
    pub waste: f64,
    pub total: f64,
}

impl FootprintResult {
    #[must_use]
    pub fn from_input(input: FootprintInput) -> Self {
        Self {
            transport: input.transport,
            electricity: input.electricity,
            waste: input.waste,
            total: input.transport + input.electricity + input.waste,
        }
    }

    #[must_use]
    pub const fn value(&self, category: Category) -> f64 {
        match category {
            Category::Transport => self.transport,
            Category::Electricity => self.electricity,
            Category::Waste => self.waste,
        }
    }
}

/// Per-request result of validating a submission.
pub type ValidationOutcome = Result<FootprintResult, DomainError>;

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order_is_fixed() {
        let labels: Vec<_> = Category::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, ["Transport", "Electricity", "Waste"]);
    }

    #[test]
    fn test_total_is_plain_sum() {
        let result = FootprintResult::from_input(FootprintInput::new(0.1, 0.2, 0.3));
        assert_eq!(result.total, 0.1 + 0.2 + 0.3);
        assert_eq!(result.value(Category::Electricity), 0.2);
    }
}
