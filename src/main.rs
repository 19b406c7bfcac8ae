use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use ward_core::constants::{DEFAULT_ADMISSIONS_FILE, DEFAULT_REST_ADDR};
use ward_core::{BoardConfig, LayoutOrigin, WardBoardService};

/// Main entry point for the ward board service
///
/// Resolves configuration once, loads the layout, and serves the board REST API until the
/// process receives Ctrl-C.
///
/// # Environment Variables
/// - `WARD_REST_ADDR`: REST server address (default: "0.0.0.0:3001")
/// - `WARD_ADMISSIONS_FILE`: JSON/YAML admissions export (default: "data/admissions.json")
/// - `WARD_CODE`: only show admissions for this ward (default: no filter)
/// - `WARD_LAYOUT_FILE`: layout YAML (default: `config/layout.yaml` if found, else built in)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration or layout is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ward_board_run=info".parse()?)
                .add_directive("ward_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("WARD_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());
    let admissions_file = std::env::var("WARD_ADMISSIONS_FILE")
        .unwrap_or_else(|_| DEFAULT_ADMISSIONS_FILE.into());
    let ward_code = std::env::var("WARD_CODE").ok();
    let layout_override = std::env::var("WARD_LAYOUT_FILE").ok().map(PathBuf::from);

    let cfg = BoardConfig::new(PathBuf::from(admissions_file), ward_code, layout_override)?;

    let (layout, origin) = cfg.load_layout()?;
    match &origin {
        LayoutOrigin::File(path) => tracing::info!("-- Layout loaded from {}", path.display()),
        LayoutOrigin::Embedded => tracing::info!("-- Using built-in layout"),
    }
    tracing::info!(
        "-- {} zones, {} beds",
        layout.zones().len(),
        layout.all_beds().len()
    );

    let source = cfg.admission_source()?;
    if !source.path().is_file() {
        tracing::warn!(
            "Admissions export {} does not exist yet; /api/board will fail until it does",
            source.path().display()
        );
    }
    tracing::info!(
        "-- Reading admissions from {} (ward filter: {})",
        source.path().display(),
        cfg.ward_code().unwrap_or("none")
    );

    let state = AppState {
        board_service: WardBoardService::new(Arc::new(layout), Arc::new(source)),
    };
    let app = router(state);

    tracing::info!("++ Starting ward board REST on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("-- Shutting down");
        })
        .await?;

    Ok(())
}
