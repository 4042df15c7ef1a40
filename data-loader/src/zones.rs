use crate::DataLoadError;
use common::types::config::ZoneCrs;
use common::types::zone::{Zone, ZoneSet};
use common::types::ZoneId;
use geo::{coord, Coord, Geometry, MapCoords, MultiPolygon};
use geojson::{Feature, GeoJson};
use hashbrown::HashSet;
use log::debug;
use std::f64::consts::FRAC_PI_4;
use std::fs;
use std::path::Path;

pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Web Mercator is undefined at the poles, latitudes are clamped to the square world extent
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// Convert lon/lat (EPSG:4326) in degrees to spherical Web Mercator (EPSG:3857) in meters
pub fn to_web_mercator(c: Coord<f64>) -> Coord<f64> {
    let lat = c.y.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    coord! {
        x: EARTH_RADIUS * c.x.to_radians(),
        y: EARTH_RADIUS * (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln(),
    }
}

/// Reads a GeoJSON FeatureCollection with one (multi)polygon per zone and projects it for display.
/// Every feature needs a unique integer `id` property.
pub fn load_zones(path: &Path, crs: ZoneCrs) -> Result<ZoneSet, DataLoadError> {
    if !path.is_file() {
        return Err(DataLoadError::MissingFile(path.to_path_buf()));
    }

    let malformed = |reason: String| DataLoadError::MalformedGeometry {
        path: path.to_path_buf(),
        reason,
    };

    let geojson: GeoJson = fs::read_to_string(path)?.parse()?;
    let features = match geojson {
        GeoJson::FeatureCollection(collection) => collection.features,
        _ => return Err(malformed("expected a FeatureCollection".into())),
    };

    let mut seen = HashSet::new();
    let mut zones = Vec::with_capacity(features.len());

    for (idx, feature) in features.into_iter().enumerate() {
        let id = zone_id(&feature)
            .ok_or_else(|| malformed(format!("feature {idx} has no integer 'id' property")))?;
        if !seen.insert(id) {
            return Err(DataLoadError::DuplicateZone { path: path.to_path_buf(), id });
        }

        let geometry = feature.geometry
            .ok_or_else(|| malformed(format!("zone {id} has no geometry")))?;
        let geometry = match Geometry::<f64>::try_from(geometry)? {
            Geometry::Polygon(polygon) => MultiPolygon::new(vec![polygon]),
            Geometry::MultiPolygon(multi_polygon) => multi_polygon,
            _ => return Err(malformed(format!("zone {id} is not a polygon"))),
        };

        let geometry = match crs {
            ZoneCrs::Wgs84 => geometry.map_coords(to_web_mercator),
            ZoneCrs::WebMercator => geometry,
        };

        zones.push(Zone { id, geometry });
    }

    debug!(target: "loader", "Loaded {} zones from {path:?}", zones.len());

    Ok(ZoneSet::new(zones))
}

fn zone_id(feature: &Feature) -> Option<ZoneId> {
    let value = feature.property("id")?;

    // Shapefile conversions like to write integer ids as floats
    let id = value.as_u64().or_else(|| {
        value.as_f64()
            .filter(|id| id.fract() == 0.0 && *id >= 0.0)
            .map(|id| id as u64)
    })?;

    u32::try_from(id).ok().map(ZoneId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip_tables::tests::write_file;
    use tempfile::TempDir;

    fn feature(id: &str, geometry: &str) -> String {
        format!(r#"{{"type": "Feature", "properties": {{"id": {id}}}, "geometry": {geometry}}}"#)
    }

    fn collection(features: &[String]) -> String {
        format!(r#"{{"type": "FeatureCollection", "features": [{}]}}"#, features.join(","))
    }

    const SQUARE: &str = r#"{"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]}"#;

    #[test]
    fn test_web_mercator_projection() {
        let origin = to_web_mercator(coord! { x: 0.0, y: 0.0 });
        assert!(origin.x.abs() < 1e-9 && origin.y.abs() < 1e-9);

        let east = to_web_mercator(coord! { x: 180.0, y: 0.0 });
        assert!((east.x - 20_037_508.342_789_244).abs() < 1e-6);

        // Richmond, VA
        let richmond = to_web_mercator(coord! { x: -77.436, y: 37.5407 });
        assert!((richmond.x - -8_620_136.1).abs() < 1.0);
        assert!((richmond.y - 4_514_743.8).abs() < 1.0);

        // The projection's extent is square
        let pole = to_web_mercator(coord! { x: 0.0, y: 90.0 });
        assert!((pole.y - 20_037_508.342_789_244).abs() < 1.0);
    }

    #[test]
    fn test_load_zones() {
        let dir = TempDir::new().unwrap();
        let multi = r#"{"type": "MultiPolygon", "coordinates": [[[[2.0, 2.0], [3.0, 2.0], [3.0, 3.0], [2.0, 2.0]]]]}"#;
        let path = write_file(&dir, "zones.geojson", &collection(&[
            feature("2", SQUARE),
            feature("1.0", multi),
        ]));

        let zones = load_zones(&path, ZoneCrs::Wgs84).unwrap();
        assert_eq!(zones.len(), 2);
        assert_eq!(zones.zones()[0].id, ZoneId(1));

        let corner = zones.get(ZoneId(2)).unwrap().geometry.0[0].exterior().0[2];
        assert_eq!(corner, to_web_mercator(coord! { x: 1.0, y: 1.0 }));
    }

    #[test]
    fn test_web_mercator_input_is_not_reprojected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "zones.geojson", &collection(&[feature("7", SQUARE)]));

        let zones = load_zones(&path, ZoneCrs::WebMercator).unwrap();
        assert_eq!(zones.get(ZoneId(7)).unwrap().geometry.0[0].exterior().0[2], coord! { x: 1.0, y: 1.0 });
    }

    #[test]
    fn test_duplicate_zone_ids() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "zones.geojson", &collection(&[feature("3", SQUARE), feature("3", SQUARE)]));

        assert!(matches!(
            load_zones(&path, ZoneCrs::Wgs84),
            Err(DataLoadError::DuplicateZone { id: ZoneId(3), .. })
        ));
    }

    #[test]
    fn test_malformed_zone_files() {
        let dir = TempDir::new().unwrap();

        let point = r#"{"type": "Point", "coordinates": [1.0, 1.0]}"#;
        let path = write_file(&dir, "points.geojson", &collection(&[feature("1", point)]));
        assert!(matches!(load_zones(&path, ZoneCrs::Wgs84), Err(DataLoadError::MalformedGeometry { .. })));

        let path = write_file(&dir, "names.geojson", &collection(&[feature(r#""north""#, SQUARE)]));
        assert!(matches!(load_zones(&path, ZoneCrs::Wgs84), Err(DataLoadError::MalformedGeometry { .. })));

        let path = write_file(&dir, "broken.geojson", "{ not json");
        assert!(matches!(load_zones(&path, ZoneCrs::Wgs84), Err(DataLoadError::GeoJson(_))));

        assert!(matches!(
            load_zones(&dir.path().join("missing.geojson"), ZoneCrs::Wgs84),
            Err(DataLoadError::MissingFile(_))
        ));
    }
}
