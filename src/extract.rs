//! Request extractors that report failures with the app's JSON error body.

use axum::extract::FromRequest;

use crate::Error;

/// Like [axum::Json], but a body that cannot be parsed is rejected with
/// [Error::InvalidJson] instead of axum's plain text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode, routing::post};
    use axum_test::TestServer;
    use serde::Deserialize;
    use serde_json::Value;

    use super::ApiJson;

    #[derive(Deserialize)]
    struct Body {
        amount: f64,
    }

    async fn echo_amount(ApiJson(body): ApiJson<Body>) -> String {
        body.amount.to_string()
    }

    fn get_server() -> TestServer {
        let app = Router::new().route("/", post(echo_amount));

        TestServer::new(app)
    }

    #[tokio::test]
    async fn parses_valid_json() {
        let response = get_server()
            .post("/")
            .json(&serde_json::json!({"amount": 1.5}))
            .await;

        response.assert_status_ok();
        assert_eq!(response.text(), "1.5");
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request_with_json_body() {
        let response = get_server()
            .post("/")
            .text("{\"amount\": ")
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Invalid request body");
    }

    #[tokio::test]
    async fn wrong_field_type_is_a_bad_request() {
        let response = get_server()
            .post("/")
            .json(&serde_json::json!({"amount": "lots"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
