use crate::models::{EntityKind, MapLocation};

/// Check if a location survives the kind filter.
///
/// `None` means "all kinds".
#[inline]
pub fn matches_kind(location: &MapLocation, kind: Option<EntityKind>) -> bool {
    match kind {
        None => true,
        Some(k) => location.kind == k,
    }
}

/// Check if a location matches a free-text search term.
///
/// The term is looked up as a case-insensitive substring of the title,
/// description, and address fields only. An empty term matches everything.
#[inline]
pub fn matches_search(location: &MapLocation, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let needle = term.to_lowercase();

    location.title.to_lowercase().contains(&needle)
        || location.description.to_lowercase().contains(&needle)
        || location.address.to_lowercase().contains(&needle)
}
