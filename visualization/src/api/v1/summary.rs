use actix_web::{get, web, Responder};
use aggregation::{aggregate_by_category, CategoryAggregation};
use common::types::filter::FilterSpec;
use common::types::schema::TripPurpose;
use serde::Serialize;
use data_loader::DatasetCache;
use crate::api::v1::filter::FilterQuery;
use crate::api::v1::snapshot;
use crate::ServerError;

#[derive(Debug, PartialEq, Serialize)]
pub struct Summary {
    pub total_trips: u64,
    /// Number of zone ids covered by the origin range, not the number of zones with trips
    pub origin_zones: u32,
    pub destination_zones: u32,
    pub filter: FilterSpec,
}

impl Summary {
    pub fn new(purposes: &CategoryAggregation<TripPurpose>, filter: FilterSpec) -> Self {
        Self {
            total_trips: purposes.total(),
            origin_zones: filter.origin().len(),
            destination_zones: filter.destination().len(),
            filter,
        }
    }
}

#[get("/api/v1/summary")]
pub(crate) async fn summary(
    cache: web::Data<DatasetCache>,
    query: web::Query<FilterQuery>,
) -> Result<impl Responder, ServerError> {
    let data = snapshot(&cache).await?;
    let filter = query.resolve(&data)?;
    let purposes = aggregate_by_category(&data.purpose, &filter)?;

    Ok(web::Json(Summary::new(&purposes, filter)))
}
