use crate::types::ZoneId;
use geo::{coord, BoundingRect, MultiPolygon, Rect};

/// A zone polygon in display projection (Web Mercator, meters)
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub id: ZoneId,
    pub geometry: MultiPolygon<f64>,
}

/// All zones of the study area, ordered by id
#[derive(Debug, Clone, Default)]
pub struct ZoneSet {
    zones: Vec<Zone>,
}

impl ZoneSet {
    pub fn new(mut zones: Vec<Zone>) -> Self {
        zones.sort_by_key(|zone| zone.id);
        Self { zones }
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn get(&self, id: ZoneId) -> Option<&Zone> {
        self.zones
            .binary_search_by_key(&id, |zone| zone.id)
            .ok()
            .map(|idx| &self.zones[idx])
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Bounding box over all zones, `None` if there is no geometry at all
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.zones.iter()
            .filter_map(|zone| zone.geometry.bounding_rect())
            .reduce(|acc, rect| {
                Rect::new(
                    coord! { x: acc.min().x.min(rect.min().x), y: acc.min().y.min(rect.min().y) },
                    coord! { x: acc.max().x.max(rect.max().x), y: acc.max().y.max(rect.max().y) },
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn square(id: u32, x: f64, y: f64) -> Zone {
        let polygon = polygon![
            (x: x, y: y),
            (x: x + 1.0, y: y),
            (x: x + 1.0, y: y + 1.0),
            (x: x, y: y + 1.0),
            (x: x, y: y),
        ];
        Zone { id: ZoneId(id), geometry: MultiPolygon::new(vec![polygon]) }
    }

    #[test]
    fn test_zones_are_sorted_and_searchable() {
        let zones = ZoneSet::new(vec![square(3, 0.0, 0.0), square(1, 5.0, 5.0)]);

        assert_eq!(zones.zones().iter().map(|z| z.id).collect::<Vec<_>>(), vec![ZoneId(1), ZoneId(3)]);
        assert!(zones.get(ZoneId(3)).is_some());
        assert!(zones.get(ZoneId(2)).is_none());
    }

    #[test]
    fn test_bounds() {
        let zones = ZoneSet::new(vec![square(1, -2.0, 0.0), square(2, 5.0, 7.0)]);
        let bounds = zones.bounds().unwrap();

        assert_eq!(bounds.min(), coord! { x: -2.0, y: 0.0 });
        assert_eq!(bounds.max(), coord! { x: 6.0, y: 8.0 });
        assert!(ZoneSet::default().bounds().is_none());
    }
}
