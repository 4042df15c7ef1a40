use actix_web::{get, web, HttpResponse};
use aggregation::aggregate_by_category;
use common::types::filter::FilterSpec;
use common::types::schema::{Category, Dimension};
use common::types::trip_table::TripTable;
use data_loader::DatasetCache;
use log::debug;
use crate::api::v1::filter::FilterQuery;
use crate::api::v1::snapshot;
use crate::ServerError;

/// Trips per category of one dimension (`purpose`, `income`, `duration` or `length`)
#[get("/api/v1/trips/{dimension}")]
pub(crate) async fn trips(
    cache: web::Data<DatasetCache>,
    dimension: web::Path<String>,
    query: web::Query<FilterQuery>,
) -> Result<HttpResponse, ServerError> {
    let dimension = dimension.parse::<Dimension>()?;
    let data = snapshot(&cache).await?;
    let filter = query.resolve(&data)?;
    debug!(target: "visualization", "Aggregating {:?} trips for {:?}", dimension, filter);

    match dimension {
        Dimension::Purpose => chart(&data.purpose, &filter),
        Dimension::Income => chart(&data.income, &filter),
        Dimension::Duration => chart(&data.duration, &filter),
        Dimension::Length => chart(&data.length, &filter),
    }
}

fn chart<C: Category>(table: &TripTable<C>, filter: &FilterSpec) -> Result<HttpResponse, ServerError> {
    Ok(HttpResponse::Ok().json(aggregate_by_category(table, filter)?))
}
