use crate::models::domain::{AdminStats, ChatMessage, LocatedPlace};
use serde::{Deserialize, Serialize};

/// Response for the chat message endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub message: ChatMessage,
}

/// Response for the chat history endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistoryResponse {
    pub session_id: String,
    pub messages: Vec<ChatMessage>,
}

/// Response for the map locations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationsResponse {
    pub locations: Vec<LocatedPlace>,
    /// Locations retained by the filters, before the limit was applied.
    pub total_results: usize,
}

/// Response for the event join/leave endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipationResponse {
    pub success: bool,
    pub event_id: String,
    pub registered_volunteers: i64,
    pub message: String,
}

/// Response for the admin stats endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub stats: AdminStats,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
