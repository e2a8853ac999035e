use std::{
    fs::OpenOptions,
    net::SocketAddr,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use finance_tracker::{
    AppState, build_router, close_db, graceful_shutdown, logging_middleware, open_db,
};

/// The web server for finance_tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    ///
    /// An in-memory database is used if this is not given, so nothing is
    /// saved when the server stops.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The canonical timezone name used to decide which month a transaction falls in, e.g. "Pacific/Auckland".
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,

    /// File path to write the debug log to.
    #[arg(long, default_value = "debug.log")]
    log_path: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(error) = setup_logging(&args.log_path) {
        eprintln!("Could not open the log file {:?}: {error}", args.log_path);
        return ExitCode::FAILURE;
    }

    if args.db_path.is_none() {
        tracing::warn!(
            "No database path given, using an in-memory database. Data will be lost when the server stops."
        );
    }

    let connection = match open_db(args.db_path.as_deref()) {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not open the database: {error}");
            return ExitCode::FAILURE;
        }
    };

    let state = match AppState::new(connection, &args.timezone) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Could not start the server: {error}");
            return ExitCode::FAILURE;
        }
    };
    let db_connection = state.db_connection.clone();

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state))
        .layer(middleware::from_fn(logging_middleware));

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on {}", addr);
    let result = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await;

    close_db(db_connection);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("Server stopped with an error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(log_path: &Path) -> std::io::Result<()> {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();

    Ok(())
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
