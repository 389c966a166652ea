// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{AdminStats, BoundingBox, ChatMessage, Coordinates, EntityKind, EventDetails, FoodDetails, LocateQuery, LocatedPlace, LocationDetails, MapLocation, OrganizationDetails, Sender, VolunteerEvent};
pub use requests::{ChatMessageRequest, JoinEventRequest, LeaveEventRequest, LocationsQuery};
pub use responses::{ChatHistoryResponse, ChatResponse, ErrorResponse, HealthResponse, LocationsResponse, ParticipationResponse, StatsResponse};
