use serde::{Deserialize, Serialize};

/// Category of a locatable item shown on the community map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Food,
    Event,
    Organization,
}

impl EntityKind {
    /// Parse the `kind` query parameter. `"all"` (or empty) means no filter.
    pub fn parse_filter(value: &str) -> Result<Option<EntityKind>, String> {
        match value {
            "" | "all" => Ok(None),
            "food" => Ok(Some(EntityKind::Food)),
            "event" => Ok(Some(EntityKind::Event)),
            "organization" => Ok(Some(EntityKind::Organization)),
            other => Err(format!("unknown entity kind: {}", other)),
        }
    }
}

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One message in a session-scoped chat transcript.
///
/// Immutable once created; transcripts live only as long as the session and
/// are never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, Sender::User)
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(content, Sender::Bot)
    }

    fn new(content: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            sender,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Kind-specific payload carried by a map location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationDetails {
    Food(FoodDetails),
    Event(EventDetails),
    Organization(OrganizationDetails),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodDetails {
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub expiry_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub donor_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDetails {
    pub event_date: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub max_volunteers: Option<i64>,
    pub registered_volunteers: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationDetails {
    #[serde(default)]
    pub organization_type: Option<String>,
}

/// A located entity on the community map: an available food offer, an upcoming
/// volunteer event, or a beneficiary organization.
///
/// Snapshots are assembled per request from three independent Supabase
/// queries; coordinates can still be absent when a row slips past the
/// upstream `not null` filters, so they stay optional here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapLocation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub title: String,
    pub description: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: String,
    #[serde(default)]
    pub date: Option<chrono::DateTime<chrono::Utc>>,
    pub details: LocationDetails,
}

impl MapLocation {
    /// Both coordinates present and usable for distance computation.
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// A map location annotated with the distance from the caller's reference
/// point, when one was supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocatedPlace {
    #[serde(flatten)]
    pub location: MapLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

/// Reference point for distance annotation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Parameters for one locate pass over a location snapshot
#[derive(Debug, Clone)]
pub struct LocateQuery {
    pub search: String,
    pub kind: Option<EntityKind>,
    pub origin: Option<Coordinates>,
    /// Only keep locations within this many kilometers of `origin`.
    /// Ignored when no origin was supplied.
    pub radius_km: Option<f64>,
    pub limit: usize,
}

impl Default for LocateQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            kind: None,
            origin: None,
            radius_km: None,
            limit: 100,
        }
    }
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// A volunteer event row as stored in Supabase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolunteerEvent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub event_date: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub max_volunteers: Option<i64>,
    #[serde(default)]
    pub registered_volunteers: i64,
    pub status: String,
}

/// Aggregate platform statistics for the admin dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_users: u64,
    pub total_donations: u64,
    pub total_requests: u64,
    pub total_campaigns: u64,
    pub total_events: u64,
    pub pending_requests: u64,
    pub active_volunteers: u64,
    pub total_money_raised: f64,
}
