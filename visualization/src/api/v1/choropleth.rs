use actix_web::{get, web, Responder};
use aggregation::aggregate_by_zone;
use data_loader::DatasetCache;
use crate::api::v1::filter::FilterQuery;
use crate::api::v1::snapshot;
use crate::choropleth::build_choropleth;
use crate::ServerError;

#[get("/api/v1/choropleth")]
pub(crate) async fn choropleth(
    cache: web::Data<DatasetCache>,
    query: web::Query<FilterQuery>,
) -> Result<impl Responder, ServerError> {
    let data = snapshot(&cache).await?;
    let filter = query.resolve(&data)?;
    let totals = aggregate_by_zone(&data.purpose, &filter)?;

    Ok(web::Json(build_choropleth(&data.zones, &totals)))
}
