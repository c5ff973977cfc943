//! Eco Footprint Module
//!
//! Accepts transport, electricity and waste emissions (`CO2e`) from an HTML
//! form, validates and sums them, and renders a breakdown bar chart next to
//! the total.
//!
//! ## Architecture
//!
//! - `domain/` - validation, aggregation, presentation and the `Service`
//! - `infra/chart/` - PNG bar chart rasterizer behind `ChartRenderer`
//! - `api/rest/` - HTML handlers, views, routes and embedded assets
//! - `module.rs` - builds the service and mounts its routes on a router

// === MODULE DEFINITION ===
mod module;
pub use module::FootprintModule;

// === PUBLIC EXPORTS ===
pub mod config;
pub use config::{ChartConfig, ConfigError, FootprintConfig};

pub mod domain;
pub use domain::{DomainError, FootprintInput, FootprintResult, Service};

pub mod infra;

// === INTERNAL MODULES ===
#[doc(hidden)]
pub mod api;
