//! Domain service for the footprint module
//!
//! Runs the submission and result-view flows on top of the aggregator and
//! the presenter.

use std::collections::HashMap;
use std::hash::BuildHasher;

use tracing::{debug, instrument};

use crate::domain::aggregator::{aggregate, restore};
use crate::domain::error::DomainError;
use crate::domain::model::ValidationOutcome;
use crate::domain::presenter::{Presentation, Presenter};

/// Stateless per request; shared between handlers through `Arc`.
#[derive(Clone)]
pub struct Service {
    presenter: Presenter,
}

impl Service {
    #[must_use]
    pub fn new(presenter: Presenter) -> Self {
        Self { presenter }
    }

    /// Validate and aggregate a form submission.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidInput`] if any field is unusable.
    #[allow(clippy::unused_self)]
    #[instrument(skip_all)]
    pub fn submit<S: BuildHasher>(&self, fields: &HashMap<String, String, S>) -> ValidationOutcome {
        let result = aggregate(fields)?;
        debug!(total = result.total, "Footprint aggregated");
        Ok(result)
    }

    /// Rebuild a result from result-view parameters and present it.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidInput`] if a parameter is unusable, or
    /// [`DomainError::PresentationFailure`] if the chart cannot be rendered.
    #[instrument(skip_all)]
    pub fn result_view<S: BuildHasher>(
        &self,
        params: &HashMap<String, String, S>,
    ) -> Result<Presentation, DomainError> {
        let result = restore(params)?;
        let presentation = self.presenter.present(&result)?;
        debug!(
            total = presentation.total,
            image_bytes = presentation.image.bytes.len(),
            "Footprint result presented"
        );
        Ok(presentation)
    }
}
