//! Responses for forms submitted with htmx.

use axum::{
    http::{HeaderName, StatusCode},
    response::{IntoResponse, Response},
};

/// The response header that makes htmx navigate to another page.
pub(crate) const HX_REDIRECT: HeaderName = HeaderName::from_static("hx-redirect");

/// Send the browser to `url` after a form was accepted.
pub(crate) fn redirect(url: String) -> Response {
    (StatusCode::SEE_OTHER, [(HX_REDIRECT, url)]).into_response()
}
