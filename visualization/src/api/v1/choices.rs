use actix_web::{get, web, Responder};
use common::types::schema::{DayPart, DayType};
use common::types::ZoneId;
use data_loader::DatasetCache;
use serde::Serialize;
use crate::api::v1::snapshot;
use crate::ServerError;

/// Everything a UI needs to offer the filter widgets
#[derive(Serialize)]
struct Choices {
    day_types: Vec<&'static str>,
    day_parts: Vec<&'static str>,
    default_day_type: &'static str,
    default_day_parts: Vec<&'static str>,
    zone_extent: Option<(ZoneId, ZoneId)>,
}

#[get("/api/v1/choices")]
pub(crate) async fn choices(cache: web::Data<DatasetCache>) -> Result<impl Responder, ServerError> {
    let data = snapshot(&cache).await?;

    Ok(web::Json(Choices {
        day_types: DayType::ALL.iter().map(|day_type| day_type.label()).collect(),
        day_parts: DayPart::ALL.iter().map(|day_part| day_part.label()).collect(),
        default_day_type: DayType::default().label(),
        default_day_parts: vec![DayPart::default().label()],
        zone_extent: data.zone_extent()?,
    }))
}
