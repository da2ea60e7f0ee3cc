use actix_web::{http, web, App, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use std::net::TcpListener;
use std::sync::Arc;
use actix_cors::Cors;

pub mod config;
mod routes;
mod handlers;
pub mod models;
pub mod utils;
pub mod db;
pub mod services;
pub mod telemetry;
pub mod validation;

use crate::db::MatchStore;
use crate::handlers::extractor_errors::{json_error_handler, path_error_handler, query_error_handler};
use crate::routes::init_routes;
use crate::services::{MatchService, OddsService};

pub fn run(
    listener: TcpListener,
    store: Arc<dyn MatchStore>,
    allowed_origins: Vec<String>,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let match_service = web::Data::new(MatchService::new(store.clone()));
    let odds_service = web::Data::new(OddsService::new(store));

    let server = HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "DELETE", "PATCH"])
            .allowed_headers(vec![
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .expose_headers(vec![http::header::LOCATION])
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            // Get a pointer copy and attach it to the application state
            .app_data(match_service.clone())
            .app_data(odds_service.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
