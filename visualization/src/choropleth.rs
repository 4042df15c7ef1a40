//! Origin totals joined onto the zone polygons, ready to be drawn on a web map.

use aggregation::ZoneTotals;
use common::types::schema::TRIPS;
use common::types::zone::ZoneSet;
use geo::Rect;
use geojson::{Feature, FeatureCollection, JsonObject, JsonValue};
use serde::Serialize;

/// Colour scale maximum if no zone has any trips
pub const DEFAULT_MAX_TRIPS: u64 = 10;
pub const TICK_COUNT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl From<Rect<f64>> for Bounds {
    fn from(rect: Rect<f64>) -> Self {
        Self {
            min_x: rect.min().x,
            min_y: rect.min().y,
            max_x: rect.max().x,
            max_y: rect.max().y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choropleth {
    /// Every zone polygon with its `id` and origin `Trips` as properties
    pub zones: FeatureCollection,
    /// Web Mercator extent of all zones
    pub bounds: Option<Bounds>,
    pub max_trips: u64,
    pub ticks: Vec<Tick>,
}

/// Left joins the origin totals onto the zones. Zones without selected trips get 0.
pub fn build_choropleth(zones: &ZoneSet, totals: &ZoneTotals) -> Choropleth {
    let features = zones.zones().iter()
        .map(|zone| {
            let trips = totals.origin(zone.id).unwrap_or(0);

            let mut properties = JsonObject::new();
            properties.insert("id".to_string(), JsonValue::from(zone.id.0));
            properties.insert(TRIPS.to_string(), JsonValue::from(trips));

            Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::from(&zone.geometry))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    let max_trips = totals.max_origin_trips().unwrap_or(DEFAULT_MAX_TRIPS);

    Choropleth {
        zones: FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        },
        bounds: zones.bounds().map(Bounds::from),
        max_trips,
        ticks: ticks(max_trips),
    }
}

/// `TICK_COUNT` evenly spaced values from 0 to `max_trips + 1`, labelled with their integer part
pub fn ticks(max_trips: u64) -> Vec<Tick> {
    let end = (max_trips + 1) as f64;
    let steps = (TICK_COUNT - 1) as f64;

    (0..TICK_COUNT)
        .map(|idx| {
            let value = end * idx as f64 / steps;
            Tick { value, label: (value.trunc() as u64).to_string() }
        })
        .collect()
}
