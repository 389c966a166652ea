//! Alimenta Assist - assistant and proximity service for the Alimenta
//! food donation platform
//!
//! This library provides the platform's rule-based chat assistant and the
//! community-map proximity logic: haversine distances, text/kind filtering,
//! and distance-sorted location results.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Assistant, Locator, distance::{haversine_distance, bounding_box}};
pub use crate::models::{ChatMessage, Coordinates, EntityKind, LocateQuery, LocatedPlace, MapLocation, Sender};
