// Integration tests for Alimenta Assist

use alimenta_assist::core::{Assistant, Locator};
use alimenta_assist::models::{
    Coordinates, EntityKind, EventDetails, FoodDetails, LocateQuery, LocationDetails, MapLocation,
    OrganizationDetails,
};
use alimenta_assist::services::{SupabaseClient, SupabaseError, SupabaseTables};

fn make_location(
    id: &str,
    kind: EntityKind,
    title: &str,
    address: &str,
    lat: f64,
    lon: f64,
) -> MapLocation {
    let details = match kind {
        EntityKind::Food => LocationDetails::Food(FoodDetails {
            quantity: 5.0,
            unit: "kg".to_string(),
            expiry_date: None,
            donor_name: None,
            category: None,
        }),
        EntityKind::Event => LocationDetails::Event(EventDetails {
            event_date: chrono::Utc::now(),
            max_volunteers: Some(15),
            registered_volunteers: 4,
        }),
        EntityKind::Organization => LocationDetails::Organization(OrganizationDetails {
            organization_type: Some("Fundación".to_string()),
        }),
    };

    MapLocation {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        description: String::new(),
        latitude: Some(lat),
        longitude: Some(lon),
        address: address.to_string(),
        date: None,
        details,
    }
}

fn bogota_snapshot() -> Vec<MapLocation> {
    vec![
        make_location("f1", EntityKind::Food, "Pan integral", "Calle 45 #12-30", 4.60, -74.08),
        make_location("f2", EntityKind::Food, "Leche entera", "Carrera 7 #45-10", 4.62, -74.07),
        make_location("e1", EntityKind::Event, "Distribución de alimentos", "Centro Comunitario", 4.65, -74.05),
        make_location("o1", EntityKind::Organization, "Fundación Esperanza", "Calle 100 #8-20", 4.68, -74.04),
    ]
}

#[test]
fn test_locate_end_to_end_with_all_filters() {
    let locator = Locator::new();
    let query = LocateQuery {
        search: "pan".to_string(),
        kind: Some(EntityKind::Food),
        origin: Some(Coordinates { latitude: 4.61, longitude: -74.09 }),
        radius_km: None,
        limit: 50,
    };

    let result = locator.locate(&query, bogota_snapshot());

    assert_eq!(result.locations.len(), 1);
    assert_eq!(result.locations[0].location.id, "f1");
    assert!(result.locations[0].distance_km.is_some());
}

#[test]
fn test_locate_orders_nearest_first() {
    let locator = Locator::new();
    let query = LocateQuery {
        origin: Some(Coordinates { latitude: 4.60, longitude: -74.08 }),
        ..Default::default()
    };

    let result = locator.locate(&query, bogota_snapshot());

    assert_eq!(result.locations.len(), 4);
    assert_eq!(result.locations[0].location.id, "f1");
    for pair in result.locations.windows(2) {
        assert!(pair[0].distance_km <= pair[1].distance_km);
    }
}

#[test]
fn test_location_json_shape() {
    let loc = make_location("f1", EntityKind::Food, "Pan integral", "Calle 45", 4.60, -74.08);
    let json = serde_json::to_value(&loc).unwrap();

    // Map clients key off the "type" field
    assert_eq!(json["type"], "food");
    assert_eq!(json["title"], "Pan integral");
    assert_eq!(json["details"]["unit"], "kg");
}

#[test]
fn test_distance_omitted_without_reference_point() {
    let locator = Locator::new();
    let result = locator.locate(&LocateQuery::default(), bogota_snapshot());

    let json = serde_json::to_value(&result.locations[0]).unwrap();
    assert!(json.get("distance_km").is_none());
}

#[test]
fn test_assistant_full_conversation_flow() {
    let assistant = Assistant::with_default_rules();

    // A typical widget conversation: every turn is independent
    let donation = assistant.reply("Hola, quiero donar alimentos");
    let map = assistant.reply("¿dónde queda el mapa?");
    let thanks = assistant.reply("gracias!");

    assert!(donation.contains("Donar Alimentos"));
    assert!(map.contains("Mapa"));
    assert!(thanks.contains("De nada"));
}

fn test_tables() -> SupabaseTables {
    SupabaseTables {
        profiles: "profiles".to_string(),
        food_items: "food_items".to_string(),
        food_requests: "food_requests".to_string(),
        food_categories: "food_categories".to_string(),
        campaigns: "campaigns".to_string(),
        volunteer_events: "volunteer_events".to_string(),
        notifications: "notifications".to_string(),
        monetary_donations: "monetary_donations".to_string(),
    }
}

#[tokio::test]
async fn test_supabase_food_locations_parsing() {
    let mut server = mockito::Server::new_async().await;

    let body = serde_json::json!([
        {
            "id": "f1",
            "name": "Pan integral",
            "quantity": 5.0,
            "unit": "kg",
            "pickup_location": "Calle 45 #12-30",
            "pickup_latitude": 4.61,
            "pickup_longitude": -74.08,
            "category": { "name": "Panadería" },
            "donor": { "full_name": "Juan Pérez" }
        }
    ]);

    let mock = server
        .mock("GET", "/rest/v1/food_items")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = SupabaseClient::new(server.url(), "key".to_string(), test_tables());
    let locations = client.food_locations().await.unwrap();

    mock.assert_async().await;

    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].kind, EntityKind::Food);
    assert_eq!(locations[0].title, "Pan integral");
    assert_eq!(locations[0].description, "5 kg - Panadería");
    assert_eq!(locations[0].latitude, Some(4.61));
}

#[tokio::test]
async fn test_supabase_count_reads_content_range() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/rest/v1/profiles")
        .match_query(mockito::Matcher::Any)
        .with_status(206)
        .with_header("content-range", "0-0/42")
        .with_body("[]")
        .create_async()
        .await;

    let client = SupabaseClient::new(server.url(), "key".to_string(), test_tables());
    let count = client.count("profiles", &[]).await.unwrap();

    mock.assert_async().await;
    assert_eq!(count, 42);
}

#[tokio::test]
async fn test_supabase_missing_event_is_not_found() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/rest/v1/volunteer_events")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let client = SupabaseClient::new(server.url(), "key".to_string(), test_tables());
    let result = client.get_event("missing").await;

    assert!(matches!(result, Err(SupabaseError::NotFound(_))));
}

#[tokio::test]
async fn test_supabase_api_error_surfaces() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/rest/v1/food_items")
        .match_query(mockito::Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let client = SupabaseClient::new(server.url(), "key".to_string(), test_tables());
    let result = client.food_locations().await;

    assert!(matches!(result, Err(SupabaseError::ApiError(_))));
}
