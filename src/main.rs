use std::sync::Arc;

use flight_panel::{
    AirportTable,
    config::Config,
    server::{AppState, router},
};
use rand::{SeedableRng, rngs::StdRng};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use usvg::fontdb;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flight_panel=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> flight_panel::Result<()> {
    let config = Config::from_env()?;

    let mut airports = AirportTable::default();
    if let Some(path) = &config.airports_file {
        airports.load_file(path)?;
    }

    let rng = match config.seed {
        Some(seed) => {
            info!("telemetry seeded with {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let mut fontdb = fontdb::Database::new();
    fontdb.load_system_fonts();
    let mut usvg_options = usvg::Options::default();
    usvg_options.fontdb = Arc::new(fontdb);

    let n_airports = airports.len();
    let app = router(AppState::new(usvg_options, airports, rng));

    let addr = config.addr();
    info!("listening on {} ({} airports known)", addr, n_airports);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
