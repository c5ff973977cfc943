use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::api::rest::views::render_index;
use crate::domain::error::{DomainError, PRESENTATION_FAILURE_MESSAGE};

/// The submission form re-rendered with an error line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    pub status: StatusCode,
    pub message: &'static str,
}

impl FormError {
    /// Failure of a form submission.
    #[must_use]
    pub fn submission(e: &DomainError) -> Self {
        Self {
            status: status_for(e),
            message: e.user_message(),
        }
    }

    /// Failure of the result page. Always reported as a generation error,
    /// whatever the cause.
    #[must_use]
    pub fn result_view(e: &DomainError) -> Self {
        Self {
            status: status_for(e),
            message: PRESENTATION_FAILURE_MESSAGE,
        }
    }
}

fn status_for(e: &DomainError) -> StatusCode {
    match e {
        DomainError::InvalidInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::PresentationFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for FormError {
    fn from(e: DomainError) -> Self {
        Self::submission(&e)
    }
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        (self.status, Html(render_index(Some(self.message)))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::QuantityError;

    #[test]
    fn test_submission_error_mapping() {
        let err = FormError::from(DomainError::invalid_input("waste", QuantityError::Negative));
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.message, "Invalid input values.");
    }

    #[test]
    fn test_result_view_always_reports_generation_error() {
        let bad_param = DomainError::invalid_input("total", QuantityError::NotFinite);
        let err = FormError::result_view(&bad_param);
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.message, "Error in generating the result.");

        let render = DomainError::presentation_failure("boom");
        let err = FormError::result_view(&render);
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Error in generating the result.");
    }
}
