//! Defines the app level error type and its conversion into JSON and HTML responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    alert::Alert, category::Category, html::error_view, internal_server_error::InternalServerError,
    not_found::NotFoundError, period::Period,
};

/// The message shown to clients when the database cannot be reached.
pub const DATABASE_UNAVAILABLE_MESSAGE: &str =
    "Failed to connect to the database. Please make sure the database is available and try again.";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One or more fields of a transaction or budget failed validation.
    ///
    /// Each string describes one problem and is safe to show to the client.
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// A budget was submitted without one of its required fields.
    #[error("category, amount, and month are required fields")]
    MissingBudgetFields,

    /// The request body could not be parsed as JSON for the expected shape.
    #[error("invalid JSON body: {0}")]
    InvalidJson(String),

    /// A path parameter could not be parsed as a transaction ID.
    #[error("\"{0}\" is not a valid transaction ID")]
    InvalidTransactionId(String),

    /// A path parameter could not be parsed as a budget ID.
    #[error("\"{0}\" is not a valid budget ID")]
    InvalidBudgetId(String),

    /// A month string did not match the format YYYY-MM.
    #[error("\"{0}\" is not a valid month, expected the format YYYY-MM")]
    InvalidMonth(String),

    /// A budget already exists for the category and month.
    ///
    /// At most one budget may exist per category per month.
    #[error("a budget for {category} in {month} already exists")]
    DuplicateBudget {
        /// The category of the conflicting budget.
        category: Category,
        /// The month of the conflicting budget.
        month: Period,
    },

    /// No transaction exists with the requested ID.
    #[error("the transaction could not be found")]
    TransactionNotFound,

    /// No budget exists with the requested ID.
    #[error("the budget could not be found")]
    BudgetNotFound,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The database could not be opened.
    #[error("could not open the database: {0}")]
    DatabaseUnavailable(String),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidJson(rejection.body_text())
    }
}

/// The JSON body sent to clients when a request fails.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details),
        }
    }
}

impl Error {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            Error::Validation(details) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::with_details("Validation failed", details),
            ),
            Error::MissingBudgetFields => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("Category, amount, and month are required fields"),
            ),
            Error::InvalidJson(reason) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::with_details("Invalid request body", vec![reason]),
            ),
            Error::InvalidTransactionId(_) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("Invalid transaction ID format"),
            ),
            Error::InvalidBudgetId(_) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("Invalid budget ID format"),
            ),
            Error::InvalidMonth(month) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::with_details(
                    "Month format must be YYYY-MM",
                    vec![format!("Got \"{month}\"")],
                ),
            ),
            Error::DuplicateBudget { .. } => (
                StatusCode::CONFLICT,
                ErrorBody::new("A budget for this category and month already exists"),
            ),
            Error::TransactionNotFound => {
                (StatusCode::NOT_FOUND, ErrorBody::new("Transaction not found"))
            }
            Error::BudgetNotFound => (StatusCode::NOT_FOUND, ErrorBody::new("Budget not found")),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorBody::new("The requested resource could not be found"),
            ),
            Error::DatabaseUnavailable(_) | Error::DatabaseLockError => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorBody::new(DATABASE_UNAVAILABLE_MESSAGE),
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new(format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                )),
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            Error::SqlError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new(
                    "An unexpected error occurred, check the server logs for more details.",
                ),
            ),
        }
    }

    /// Render the error as an HTML page, for route handlers that serve pages
    /// rather than JSON.
    pub(crate) fn into_page_response(self) -> Response {
        match self {
            Error::NotFound
            | Error::TransactionNotFound
            | Error::BudgetNotFound
            | Error::InvalidTransactionId(_)
            | Error::InvalidBudgetId(_) => NotFoundError.into_response(),
            Error::InvalidMonth(month) => (
                StatusCode::BAD_REQUEST,
                Html(
                    error_view(
                        "Bad Request",
                        "400",
                        "Invalid Month",
                        &format!("\"{month}\" is not a valid month, use the format YYYY-MM."),
                    )
                    .into_string(),
                ),
            )
                .into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseUnavailable(_) | Error::DatabaseLockError => (
                StatusCode::SERVICE_UNAVAILABLE,
                InternalServerError {
                    description: "Database Unavailable",
                    fix: DATABASE_UNAVAILABLE_MESSAGE,
                }
                .into_html(),
            )
                .into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Render the error as an alert for a form submitted with htmx.
    ///
    /// The status code matches the JSON API so the page's `hx-target-error`
    /// picks the alert up.
    pub(crate) fn into_alert_response(self) -> Response {
        let (status, body) = self.status_and_body_logged();

        (
            status,
            Alert {
                message: body.error,
                details: body.details.unwrap_or_default(),
            },
        )
            .into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body_logged();

        (status, Json(body)).into_response()
    }
}

impl Error {
    fn status_and_body_logged(self) -> (StatusCode, ErrorBody) {
        let description = self.to_string();
        let (status, body) = self.status_and_body();

        if status.is_server_error() {
            tracing::error!("An unexpected error occurred: {description}");
        } else {
            tracing::debug!("Rejected request: {description}");
        }

        (status, body)
    }
}
