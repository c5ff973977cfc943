//! Domain layer for the footprint module
//!
//! Validation and aggregation of submitted values, and presentation of the
//! aggregated result as a chart-plus-total payload.

pub mod aggregator;
pub mod error;
pub mod model;
pub mod presenter;
pub mod service;

pub use aggregator::{aggregate, parse_quantity, restore};
pub use error::{DomainError, INVALID_INPUT_MESSAGE, PRESENTATION_FAILURE_MESSAGE, QuantityError};
pub use model::{Category, FootprintInput, FootprintResult, ValidationOutcome};
pub use presenter::{
    Bar, BarChart, ChartImage, ChartRenderer, Presentation, Presenter, RenderError,
};
pub use service::Service;
