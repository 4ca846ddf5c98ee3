use gloo_net::http::Request;
use novel_reader::api::{ApiResponse, FormRequest, SubmitError, FORM_CONTENT_TYPE};
use tracing::{debug, warn};

use crate::config;

/// Post a form to its endpoint once and interpret the JSON envelope.
///
/// Transport and decoding failures become [`SubmitError::Network`]; there is
/// no retry.
pub async fn submit<R: FormRequest>(request: &R) -> Result<(), SubmitError> {
    let action = R::ACTION;
    let url = action.path(&config::site().endpoints);
    debug!(%action, url, "Submitting form");

    let network_error = |e: gloo_net::Error| {
        warn!(%action, error = %e, "Request failed");
        SubmitError::Network(action)
    };

    let response = Request::post(url)
        .header("Content-Type", FORM_CONTENT_TYPE)
        .body(request.to_form_body())
        .map_err(network_error)?
        .send()
        .await
        .map_err(network_error)?;

    if !response.ok() {
        return Err(SubmitError::Http(response.status()));
    }

    let data: ApiResponse = response.json().await.map_err(network_error)?;
    data.into_outcome()
}
