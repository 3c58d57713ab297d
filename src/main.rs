//! Movie Explorer - Interactive Content-Discovery Service
//!
//! Replays session feedback into a taste location in the movie
//! embedding space and serves diverse candidate batches around it.

use actix_web::{web, App, HttpServer};
use movie_explorer::catalog::Catalog;
use movie_explorer::config::ExplorerConfig;
use movie_explorer::embedding::EmbeddingStore;
use movie_explorer::server::{self, AppState};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .json()
        .init();

    // Load configuration
    let config = ExplorerConfig::load()?;
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);

    info!("Loading embedding and catalog tables");
    let embeddings = Arc::new(EmbeddingStore::load(
        Path::new(&config.data.vectors_path),
        Path::new(&config.data.starting_location_path),
    )?);
    let catalog = Arc::new(Catalog::load(Path::new(&config.data.catalog_path))?);
    anyhow::ensure!(
        embeddings.len() == catalog.len(),
        "vector table has {} items but catalog has {}",
        embeddings.len(),
        catalog.len()
    );

    info!(
        items = catalog.len(),
        dim = embeddings.dim(),
        "Movie Explorer listening on {}",
        bind_addr
    );

    let app_state = web::Data::new(AppState {
        embeddings,
        catalog,
    });

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(server::json_config())
            .configure(server::configure_routes)
            .wrap(actix_web::middleware::Logger::default())
    })
    .workers(config.server.workers.unwrap_or_else(num_cpus::get))
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}
