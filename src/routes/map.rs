use crate::models::{
    Coordinates, EntityKind, ErrorResponse, LocateQuery, LocationsQuery, LocationsResponse,
    MapLocation,
};
use crate::routes::AppState;
use crate::services::CacheKey;
use actix_web::{web, HttpResponse, Responder};

/// Configure community map routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/map/locations", web::get().to(get_locations));
}

/// Locations for the community map
///
/// GET /api/v1/map/locations?search=pan&kind=food&lat=4.61&lng=-74.08&limit=50
///
/// The snapshot of food offers, upcoming events, and organizations is
/// cached; filtering and distance annotation run per request, so the
/// endpoint is cheap to hit on every keystroke. Distances are only present
/// when both `lat` and `lng` were supplied.
async fn get_locations(
    state: web::Data<AppState>,
    query: web::Query<LocationsQuery>,
) -> impl Responder {
    let kind = match EntityKind::parse_filter(query.kind.as_deref().unwrap_or("all")) {
        Ok(kind) => kind,
        Err(message) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid kind filter".to_string(),
                message,
                status_code: 400,
            });
        }
    };

    let origin = match (query.lat, query.lng) {
        (Some(latitude), Some(longitude)) => Some(Coordinates {
            latitude,
            longitude,
        }),
        (None, None) => None,
        _ => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Incomplete reference point".to_string(),
                message: "lat and lng must be provided together".to_string(),
                status_code: 400,
            });
        }
    };

    let limit = query
        .limit
        .map(|l| l as usize)
        .unwrap_or(state.max_results)
        .min(state.max_results);

    let locate_query = LocateQuery {
        search: query.search.clone().unwrap_or_default(),
        kind,
        origin,
        radius_km: query.radius_km,
        limit,
    };

    let snapshot = load_snapshot(&state).await;
    let result = state.locator.locate(&locate_query, snapshot);

    tracing::debug!(
        "Locate pass retained {} locations ({} returned)",
        result.total_results,
        result.locations.len()
    );

    HttpResponse::Ok().json(LocationsResponse {
        locations: result.locations,
        total_results: result.total_results,
    })
}

/// Cached map snapshot, reassembled from Supabase on a miss.
///
/// Cache failures fall through to a direct assembly; a broken cache must
/// not take the map down.
async fn load_snapshot(state: &AppState) -> Vec<MapLocation> {
    let key = CacheKey::locations();

    if let Ok(snapshot) = state.cache.get::<Vec<MapLocation>>(&key).await {
        return snapshot;
    }

    let snapshot = state.supabase.all_locations().await;

    if let Err(e) = state.cache.set(&key, &snapshot).await {
        tracing::warn!("Failed to cache locations snapshot: {}", e);
    }

    snapshot
}
