use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to send one chat message to the assistant
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatMessageRequest {
    #[validate(length(min = 1))]
    pub session_id: String,
    /// Free-form user text. Empty input is allowed; the assistant always
    /// produces a reply.
    #[serde(default)]
    pub message: String,
}

/// Query parameters for the map locations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationsQuery {
    #[serde(default)]
    pub search: Option<String>,
    /// One of `food`, `event`, `organization`, or `all` (default).
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    /// Only return locations within this radius of (lat, lng), in km.
    #[serde(default)]
    pub radius_km: Option<f64>,
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to join a volunteer event
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct JoinEventRequest {
    #[validate(length(min = 1))]
    pub event_id: String,
    #[validate(length(min = 1))]
    pub volunteer_id: String,
}

/// Request to leave a volunteer event
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LeaveEventRequest {
    #[validate(length(min = 1))]
    pub event_id: String,
    #[validate(length(min = 1))]
    pub volunteer_id: String,
}
