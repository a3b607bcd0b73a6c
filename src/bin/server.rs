use std::{
    error::Error,
    fs::OpenOptions,
    path::Path,
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use finance_tracker::{AppState, Config, build_router, graceful_shutdown, logging_middleware};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env file is fine, the environment and command line flags are enough.
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    setup_logging(&config.log_file, config.debug)?;

    let addr = config.socket_address()?;

    let connection = Connection::open(&config.db_path)?;
    let state = AppState::new(connection, &config)?;

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(state, &config.static_dir);

    let router = if config.debug {
        router.layer(middleware::from_fn(logging_middleware))
    } else {
        router
    };

    let router = add_tracing_layer(router);

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!(
        "{} listening on http://{addr} using the database {:#?}",
        config.app_name,
        config.db_path
    );
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}

fn setup_logging(log_file: &Path, debug: bool) -> Result<(), std::io::Error> {
    let stdout_level = if debug {
        filter::LevelFilter::DEBUG
    } else {
        filter::LevelFilter::INFO
    };
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(stdout_level)
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
        // Errors are already logged by the handlers
        .on_failure(());

    router.layer(tracing_layer)
}
