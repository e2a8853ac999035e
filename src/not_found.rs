//! The 404 page and the router's fallback handler.

use axum::{
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};

use crate::{Error, endpoints, html::error_view};

/// The page shown when a page or resource does not exist.
pub struct NotFoundError;

impl NotFoundError {
    pub fn into_html(self) -> Html<String> {
        Html(
            error_view(
                "Not Found",
                "404",
                "Something's missing.",
                "Sorry, we can't find that page. You'll find lots to explore on the home page.",
            )
            .into_string(),
        )
    }
}

impl IntoResponse for NotFoundError {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, self.into_html()).into_response()
    }
}

/// Fallback for unmatched routes.
///
/// API clients get a JSON error body, everyone else gets the 404 page.
pub async fn get_404_not_found(uri: Uri) -> Response {
    let path = uri.path();

    if path == endpoints::API_PREFIX || path.starts_with(&format!("{}/", endpoints::API_PREFIX)) {
        Error::NotFound.into_response()
    } else {
        NotFoundError.into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use scraper::{Html, Selector};
    use serde_json::Value;

    use crate::test_utils::{get_test_app_state, get_test_server};

    #[tokio::test]
    async fn unknown_page_renders_html() {
        let server = get_test_server(get_test_app_state());

        let response = server.get("/does-not-exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let html = Html::parse_document(&response.text());
        assert!(html.errors.is_empty(), "{:?}", html.errors);
        let heading = html
            .select(&Selector::parse("h1").unwrap())
            .next()
            .expect("Could not find heading");
        assert_eq!(heading.text().collect::<String>().trim(), "404");
    }

    #[tokio::test]
    async fn unknown_api_route_is_json() {
        let server = get_test_server(get_test_app_state());

        let response = server.get("/api/does-not-exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(
            response.json::<Value>()["error"],
            "The requested resource could not be found"
        );
    }
}
