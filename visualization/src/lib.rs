pub mod api;
pub mod choropleth;
mod error;

use std::sync::Arc;
use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use common::types::config::Config;
use data_loader::DatasetCache;
use log::info;
use api::v1::{choices_api, choropleth_api, config_api, reload_api, summary_api, trips_api, zones_api};

pub use error::ServerError;

/// Binds the JSON API to the configured address. The returned server still has to be awaited.
pub fn build_server(config: Config, cache: Arc<DatasetCache>) -> std::io::Result<Server> {
    let address = config.server().address.clone();
    let config = web::Data::new(config);
    let cache = web::Data::from(cache);

    let server = HttpServer::new(move || {
        let cors = config.server().allowed_origins.iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin));

        App::new()
            .wrap(cors)
            // Make config and the loaded data available in all handlers
            .app_data(config.clone())
            .app_data(cache.clone())
            // API endpoints
            .service(config_api)
            .service(choices_api)
            .service(trips_api)
            .service(zones_api)
            .service(choropleth_api)
            .service(summary_api)
            .service(reload_api)
    })
        .bind(address.as_str())?
        .run();

    info!(target: "visualization", "Serving API on http://{}", address);

    Ok(server)
}
