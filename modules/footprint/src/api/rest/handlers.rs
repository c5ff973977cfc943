use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::{Extension, Form, Path, Query};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use tracing::{error, info, warn};

use crate::api::rest::assets::Assets;
use crate::api::rest::dto::{HealthDto, ResultQuery};
use crate::api::rest::error::FormError;
use crate::api::rest::views::{render_index, render_result};
use crate::domain::error::DomainError;
use crate::domain::service::Service;

pub async fn index() -> Html<String> {
    Html(render_index(None))
}

/// Validate the form and redirect to the result page.
///
/// A body that is not form-encoded carries no fields, so every category
/// falls back to zero.
#[allow(clippy::implicit_hasher)]
pub async fn submit(
    Extension(svc): Extension<Arc<Service>>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Response {
    let fields = match form {
        Ok(Form(fields)) => fields,
        Err(FormRejection::InvalidFormContentType(e)) => {
            warn!(error = %e, "Submission is not form-encoded; using no fields");
            HashMap::new()
        }
        Err(rejection) => return rejection.into_response(),
    };
    submit_fields(&svc, &fields).into_response()
}

fn submit_fields(
    svc: &Service,
    fields: &HashMap<String, String>,
) -> Result<Redirect, FormError> {
    let result = svc.submit(fields)?;
    let location = ResultQuery::from(&result).location().map_err(|e| {
        error!(error = %e, "Failed to encode result location");
        FormError::submission(&DomainError::presentation_failure(e.to_string()))
    })?;
    info!(total = result.total, "Footprint submitted");
    Ok(Redirect::to(&location))
}

/// Rebuild the result from its query and render the chart page.
#[allow(clippy::implicit_hasher)]
pub async fn result(
    Extension(svc): Extension<Arc<Service>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, FormError> {
    let presentation = tokio::task::spawn_blocking(move || svc.result_view(&params))
        .await
        .map_err(|e| {
            error!(error = %e, "Chart rendering task failed");
            DomainError::presentation_failure(e.to_string())
        })
        .and_then(|outcome| outcome)
        .map_err(|e| FormError::result_view(&e))?;

    Ok(Html(render_result(&presentation)))
}

pub async fn static_asset(Path(file): Path<String>) -> Response {
    match Assets::get(&file) {
        Some(asset) => (
            [(header::CONTENT_TYPE, content_type(&file))],
            asset.data.into_owned(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn health() -> Json<HealthDto> {
    Json(HealthDto::HEALTHY)
}

pub async fn healthz() -> &'static str {
    "ok"
}

fn content_type(file: &str) -> &'static str {
    match file.rsplit_once('.').map(|(_, ext)| ext) {
        Some("css") => "text/css; charset=utf-8",
        _ => "application/octet-stream",
    }
}
