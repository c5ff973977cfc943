use std::sync::Arc;

use crate::config::FootprintConfig;
use crate::domain::presenter::{ChartRenderer, Presenter};
use crate::domain::service::Service;
use crate::infra::chart::RasterChartRenderer;

/// Footprint dashboard module: owns the service and mounts its routes.
#[derive(Clone)]
pub struct FootprintModule {
    service: Arc<Service>,
}

impl FootprintModule {
    /// Build the module with the PNG chart renderer sized from `config`.
    ///
    /// # Errors
    /// Returns an error if `config` fails validation.
    pub fn new(config: &FootprintConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let renderer: Arc<dyn ChartRenderer> = Arc::new(RasterChartRenderer::new(config.chart));
        tracing::info!(
            module = "footprint",
            chart_width = config.chart.width,
            chart_height = config.chart.height,
            "Footprint module initialized"
        );
        Ok(Self::with_renderer(renderer))
    }

    /// Build the module around a custom chart renderer.
    #[must_use]
    pub fn with_renderer(renderer: Arc<dyn ChartRenderer>) -> Self {
        Self {
            service: Arc::new(Service::new(Presenter::new(renderer))),
        }
    }

    #[must_use]
    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    /// Register the dashboard routes on `router`.
    pub fn register_rest(&self, router: axum::Router) -> axum::Router {
        crate::api::rest::register_routes(router, self.service())
    }
}
