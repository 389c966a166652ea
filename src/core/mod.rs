// Core algorithm exports
pub mod assistant;
pub mod distance;
pub mod filters;
pub mod locator;

pub use assistant::{Assistant, Rule, WELCOME_REPLY};
pub use distance::{bounding_box, distance_between, haversine_distance, within_bounding_box};
pub use filters::{matches_kind, matches_search};
pub use locator::{LocateResult, Locator};
