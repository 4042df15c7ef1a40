use actix_web::{post, web, Responder};
use data_loader::DatasetCache;
use log::info;
use serde::Serialize;
use crate::ServerError;

#[derive(Serialize)]
struct Reloaded {
    purpose_rows: usize,
    zones: usize,
}

/// Drops the cached tables and reads all input files again
#[post("/api/v1/reload")]
pub(crate) async fn reload(cache: web::Data<DatasetCache>) -> Result<impl Responder, ServerError> {
    info!(target: "visualization", "Reloading data on request");

    let cache = cache.into_inner();
    let data = web::block(move || cache.reload()).await??;

    Ok(web::Json(Reloaded {
        purpose_rows: data.purpose.len(),
        zones: data.zones.len(),
    }))
}
