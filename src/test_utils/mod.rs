#![allow(missing_docs)]

pub(crate) mod html;
pub(crate) mod http;

use axum_test::TestServer;
use rusqlite::Connection;

use crate::{AppState, build_router};

pub(crate) use html::{assert_valid_html, parse_html_document};
pub(crate) use http::{assert_content_type, assert_status_ok};

/// Create an app state backed by a fresh in-memory database using UTC as the local timezone.
pub(crate) fn get_test_app_state() -> AppState {
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");

    AppState::new(connection, "Etc/UTC").expect("Could not create app state.")
}

/// Create a test server for the app's full router.
pub(crate) fn get_test_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state))
}
