use crate::core::{
    distance::{bounding_box, distance_between, within_bounding_box},
    filters::{matches_kind, matches_search},
};
use crate::models::{Coordinates, LocateQuery, LocatedPlace, MapLocation};

/// Result of one locate pass
#[derive(Debug)]
pub struct LocateResult {
    pub locations: Vec<LocatedPlace>,
    /// Locations retained by the filters, before the limit was applied.
    pub total_results: usize,
}

/// Map query orchestrator.
///
/// Composes the filter predicates and the distance computation into one
/// pass over a location snapshot:
/// 1. drop entities with a missing coordinate (the upstream queries filter
///    these out, but a snapshot is not trusted to be clean),
/// 2. apply the kind filter, then the text filter,
/// 3. with a reference point: optional radius cut (bounding-box pre-check
///    before the exact haversine), distance annotation, and an ascending
///    distance sort,
/// 4. truncate to the query limit.
///
/// Pure and idempotent, so it is safe to re-run on every keystroke. Without
/// a reference point distances are simply omitted and input order is kept.
#[derive(Debug, Clone, Default)]
pub struct Locator;

impl Locator {
    pub fn new() -> Self {
        Self
    }

    pub fn locate(&self, query: &LocateQuery, locations: Vec<MapLocation>) -> LocateResult {
        let radius_bbox = match (query.origin, query.radius_km) {
            (Some(origin), Some(radius)) => {
                Some(bounding_box(origin.latitude, origin.longitude, radius))
            }
            _ => None,
        };

        let mut retained: Vec<LocatedPlace> = locations
            .into_iter()
            .filter(|loc| loc.has_coordinates())
            .filter(|loc| matches_kind(loc, query.kind))
            .filter(|loc| matches_search(loc, &query.search))
            .filter_map(|loc| {
                let origin = match query.origin {
                    Some(origin) => origin,
                    None => {
                        return Some(LocatedPlace {
                            location: loc,
                            distance_km: None,
                        });
                    }
                };

                // has_coordinates() held above
                let point = Coordinates {
                    latitude: loc.latitude.unwrap_or_default(),
                    longitude: loc.longitude.unwrap_or_default(),
                };

                if let Some(bbox) = radius_bbox.as_ref() {
                    if !within_bounding_box(point.latitude, point.longitude, bbox) {
                        return None;
                    }
                }

                let d = distance_between(origin, point);
                if let Some(radius) = query.radius_km {
                    if d > radius {
                        return None;
                    }
                }

                Some(LocatedPlace {
                    location: loc,
                    distance_km: Some(d),
                })
            })
            .collect();

        if query.origin.is_some() {
            retained.sort_by(|a, b| {
                a.distance_km
                    .partial_cmp(&b.distance_km)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }

        let total_results = retained.len();
        retained.truncate(query.limit);

        LocateResult {
            locations: retained,
            total_results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        EntityKind, EventDetails, FoodDetails, LocationDetails, OrganizationDetails,
    };

    fn location(
        id: &str,
        kind: EntityKind,
        title: &str,
        lat: Option<f64>,
        lon: Option<f64>,
    ) -> MapLocation {
        let details = match kind {
            EntityKind::Food => LocationDetails::Food(FoodDetails {
                quantity: 10.0,
                unit: "kg".to_string(),
                expiry_date: None,
                donor_name: None,
                category: None,
            }),
            EntityKind::Event => LocationDetails::Event(EventDetails {
                event_date: chrono::Utc::now(),
                max_volunteers: Some(20),
                registered_volunteers: 3,
            }),
            EntityKind::Organization => LocationDetails::Organization(OrganizationDetails {
                organization_type: None,
            }),
        };

        MapLocation {
            id: id.to_string(),
            kind,
            title: title.to_string(),
            description: String::new(),
            latitude: lat,
            longitude: lon,
            address: String::new(),
            date: None,
            details,
        }
    }

    fn sample_snapshot() -> Vec<MapLocation> {
        vec![
            location("f1", EntityKind::Food, "Pan integral", Some(4.60), Some(-74.08)),
            location("e1", EntityKind::Event, "Distribución de alimentos", Some(4.65), Some(-74.05)),
            location("o1", EntityKind::Organization, "Fundación Esperanza", Some(4.70), Some(-74.10)),
        ]
    }

    #[test]
    fn test_kind_filter_isolates_food() {
        let locator = Locator::new();
        let query = LocateQuery {
            kind: Some(EntityKind::Food),
            ..Default::default()
        };

        let result = locator.locate(&query, sample_snapshot());

        assert_eq!(result.locations.len(), 1);
        assert_eq!(result.locations[0].location.id, "f1");
    }

    #[test]
    fn test_no_origin_keeps_input_order_and_omits_distance() {
        let locator = Locator::new();
        let result = locator.locate(&LocateQuery::default(), sample_snapshot());

        let ids: Vec<&str> = result
            .locations
            .iter()
            .map(|p| p.location.id.as_str())
            .collect();
        assert_eq!(ids, vec!["f1", "e1", "o1"]);
        assert!(result.locations.iter().all(|p| p.distance_km.is_none()));
    }

    #[test]
    fn test_origin_sorts_by_distance() {
        let locator = Locator::new();
        let query = LocateQuery {
            origin: Some(Coordinates { latitude: 4.70, longitude: -74.10 }),
            ..Default::default()
        };

        let result = locator.locate(&query, sample_snapshot());

        assert_eq!(result.locations[0].location.id, "o1");
        for pair in result.locations.windows(2) {
            assert!(pair[0].distance_km <= pair[1].distance_km);
        }
    }

    #[test]
    fn test_reference_scenario_distance() {
        // Scenario from the map page: one event, reference point one block away
        let locator = Locator::new();
        let snapshot = vec![location(
            "e1",
            EntityKind::Event,
            "Distribución de alimentos",
            Some(4.60),
            Some(-74.08),
        )];
        let query = LocateQuery {
            origin: Some(Coordinates { latitude: 4.61, longitude: -74.09 }),
            ..Default::default()
        };

        let result = locator.locate(&query, snapshot);

        let d = result.locations[0].distance_km.unwrap();
        assert!(d > 1.0 && d < 2.0, "expected ~1.3km, got {}", d);
    }

    #[test]
    fn test_missing_coordinates_are_excluded() {
        let locator = Locator::new();
        let snapshot = vec![
            location("f1", EntityKind::Food, "Pan integral", Some(4.60), Some(-74.08)),
            location("f2", EntityKind::Food, "Sin ubicación", None, Some(-74.08)),
            location("f3", EntityKind::Food, "Sin ubicación", Some(4.60), None),
        ];

        let result = locator.locate(&LocateQuery::default(), snapshot);

        assert_eq!(result.locations.len(), 1);
        assert_eq!(result.locations[0].location.id, "f1");
    }

    #[test]
    fn test_radius_cut() {
        let locator = Locator::new();
        let snapshot = vec![
            location("near", EntityKind::Food, "Cerca", Some(4.61), Some(-74.08)),
            location("far", EntityKind::Food, "Lejos", Some(6.24), Some(-75.58)),
        ];
        let query = LocateQuery {
            origin: Some(Coordinates { latitude: 4.60, longitude: -74.08 }),
            radius_km: Some(10.0),
            ..Default::default()
        };

        let result = locator.locate(&query, snapshot);

        assert_eq!(result.locations.len(), 1);
        assert_eq!(result.locations[0].location.id, "near");
    }

    #[test]
    fn test_limit_and_total() {
        let locator = Locator::new();
        let snapshot: Vec<MapLocation> = (0..20)
            .map(|i| {
                location(
                    &format!("f{}", i),
                    EntityKind::Food,
                    "Mercado",
                    Some(4.60 + i as f64 * 0.001),
                    Some(-74.08),
                )
            })
            .collect();

        let query = LocateQuery {
            limit: 5,
            ..Default::default()
        };
        let result = locator.locate(&query, snapshot);

        assert_eq!(result.locations.len(), 5);
        assert_eq!(result.total_results, 20);
    }

    #[test]
    fn test_empty_snapshot_yields_empty_result() {
        let locator = Locator::new();
        let result = locator.locate(&LocateQuery::default(), vec![]);

        assert!(result.locations.is_empty());
        assert_eq!(result.total_results, 0);
    }
}
