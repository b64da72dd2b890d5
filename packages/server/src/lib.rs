#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the complaint map dashboard.
//!
//! Loads the cluster and comment tables once at startup and serves the
//! map, charts, cluster detail, and methodology pages as JSON under
//! `/api`. A built frontend is served from the static directory when one
//! exists.

pub mod config;
mod error;
mod handlers;
pub mod interactive;
pub mod locale;
pub mod views;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use complaint_map_data::progress;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError};

use crate::locale::Locale;
use crate::views::Dashboard;

/// Registers every `/api` route.
///
/// Query strings that fail to deserialize are answered with the same JSON
/// error body as every other rejected request.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let query_config = web::QueryConfig::default().error_handler(|err, req| {
        log::warn!("{}: {err}", req.path());
        ApiError::MalformedQuery {
            reason: err.to_string(),
        }
        .into()
    });

    cfg.service(
        web::scope("/api")
            .app_data(query_config)
            .route("/health", web::get().to(handlers::health))
            .route("/locale", web::get().to(handlers::locale))
            .route("/pages", web::get().to(handlers::pages))
            .route("/filters", web::get().to(handlers::filters))
            .route("/map", web::get().to(handlers::map))
            .route("/charts", web::get().to(handlers::charts))
            .route("/clusters/{id}", web::get().to(handlers::cluster_detail))
            .route(
                "/clusters/{id}/comments",
                web::get().to(handlers::cluster_comments),
            )
            .route("/methodology", web::get().to(handlers::methodology)),
    );
}

/// Starts the HTTP server and blocks until it shuts down.
///
/// The logger must already be initialized. The caller provides the async
/// runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns [`ServerError`] if the tables cannot be loaded, or if the server
/// fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    log::info!(
        "Loading clusters from {} and comments from {}",
        config.data.clusters.display(),
        config.data.comments.display()
    );
    let dataset = complaint_map_data::shared(&config.data, &progress::silent())?;
    log::info!(
        "Loaded {} clusters across {} zones",
        dataset.clusters().len(),
        dataset.zones().len()
    );

    let dashboard = web::Data::new(Dashboard::new(dataset, Locale::thai()?));

    let static_dir = config.static_dir.is_dir().then(|| config.static_dir.clone());
    if static_dir.is_none() {
        log::info!(
            "No frontend build at {}, serving the API only",
            config.static_dir.display()
        );
    }

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        let app = App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(dashboard.clone())
            .configure(configure);

        match &static_dir {
            Some(dir) => app.service(Files::new("/", dir).index_file("index.html")),
            None => app,
        }
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
