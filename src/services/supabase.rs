use crate::models::{
    AdminStats, EntityKind, EventDetails, FoodDetails, LocationDetails, MapLocation,
    OrganizationDetails, VolunteerEvent,
};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Supabase
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Table names in the Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseTables {
    pub profiles: String,
    pub food_items: String,
    pub food_requests: String,
    pub food_categories: String,
    pub campaigns: String,
    pub volunteer_events: String,
    pub notifications: String,
    pub monetary_donations: String,
}

/// Supabase REST (PostgREST) client
///
/// Handles all communication with the platform's managed backend:
/// - assembling the community-map snapshot from three independent queries
/// - fetching single volunteer events
/// - mirroring registration counts and inserting notifications
/// - exact-count queries for the admin dashboard
pub struct SupabaseClient {
    base_url: String,
    service_key: String,
    client: Client,
    tables: SupabaseTables,
}

/// Embedded `food_categories(name)` reference
#[derive(Debug, Deserialize)]
struct CategoryRef {
    name: Option<String>,
}

/// Embedded `profiles(full_name)` reference
#[derive(Debug, Deserialize)]
struct DonorRef {
    full_name: Option<String>,
}

/// Row shape of an available food item, with embedded category and donor
#[derive(Debug, Deserialize)]
struct FoodItemRow {
    id: String,
    name: String,
    #[serde(default)]
    quantity: f64,
    unit: String,
    #[serde(default)]
    expiry_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    pickup_location: Option<String>,
    #[serde(default)]
    pickup_latitude: Option<f64>,
    #[serde(default)]
    pickup_longitude: Option<f64>,
    #[serde(default)]
    category: Option<CategoryRef>,
    #[serde(default)]
    donor: Option<DonorRef>,
}

/// Row shape of a beneficiary organization profile
#[derive(Debug, Deserialize)]
struct OrganizationRow {
    id: String,
    organization_name: String,
    #[serde(default)]
    organization_type: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(base_url: String, service_key: String, tables: SupabaseTables) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            service_key,
            client,
            tables,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            table
        )
    }

    async fn get_rows<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
    ) -> Result<Vec<T>, SupabaseError> {
        tracing::debug!("Supabase query: {}", url);

        let response = self
            .client
            .get(url)
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SupabaseError::ApiError(format!(
                "Query failed: {}",
                response.status()
            )));
        }

        let rows: Vec<serde_json::Value> = response.json().await?;

        // Rows that fail to parse are skipped instead of failing the snapshot
        Ok(rows
            .into_iter()
            .filter_map(|row| serde_json::from_value(row).ok())
            .collect())
    }

    /// Available food offers with pickup coordinates, as map locations
    pub async fn food_locations(&self) -> Result<Vec<MapLocation>, SupabaseError> {
        let select = urlencoding::encode(
            "id,name,quantity,unit,expiry_date,pickup_location,pickup_latitude,pickup_longitude,category:food_categories(name),donor:profiles(full_name)",
        )
        .into_owned();

        let url = format!(
            "{}?select={}&status=eq.disponible&pickup_latitude=not.is.null&pickup_longitude=not.is.null",
            self.table_url(&self.tables.food_items),
            select
        );

        let rows: Vec<FoodItemRow> = self.get_rows(&url).await?;

        Ok(rows
            .into_iter()
            .map(|item| {
                let category = item.category.and_then(|c| c.name);
                let description = format!(
                    "{} {} - {}",
                    item.quantity,
                    item.unit,
                    category.as_deref().unwrap_or("Sin categoría")
                );

                MapLocation {
                    id: item.id,
                    kind: EntityKind::Food,
                    title: item.name,
                    description,
                    latitude: item.pickup_latitude,
                    longitude: item.pickup_longitude,
                    address: item.pickup_location.unwrap_or_default(),
                    date: None,
                    details: LocationDetails::Food(FoodDetails {
                        quantity: item.quantity,
                        unit: item.unit,
                        expiry_date: item.expiry_date,
                        donor_name: item.donor.and_then(|d| d.full_name),
                        category,
                    }),
                }
            })
            .collect())
    }

    /// Upcoming scheduled volunteer events with coordinates, as map locations
    pub async fn event_locations(&self) -> Result<Vec<MapLocation>, SupabaseError> {
        let now = urlencoding::encode(&chrono::Utc::now().to_rfc3339()).into_owned();

        let url = format!(
            "{}?select=*&status=eq.programado&event_date=gte.{}&latitude=not.is.null&longitude=not.is.null",
            self.table_url(&self.tables.volunteer_events),
            now
        );

        let rows: Vec<VolunteerEvent> = self.get_rows(&url).await?;

        Ok(rows
            .into_iter()
            .map(|event| MapLocation {
                id: event.id,
                kind: EntityKind::Event,
                title: event.title,
                description: event.description.unwrap_or_default(),
                latitude: event.latitude,
                longitude: event.longitude,
                address: event.location.unwrap_or_default(),
                date: Some(event.event_date),
                details: LocationDetails::Event(EventDetails {
                    event_date: event.event_date,
                    max_volunteers: event.max_volunteers,
                    registered_volunteers: event.registered_volunteers,
                }),
            })
            .collect())
    }

    /// Beneficiary organizations with coordinates, as map locations
    pub async fn organization_locations(&self) -> Result<Vec<MapLocation>, SupabaseError> {
        let url = format!(
            "{}?select=*&role=eq.beneficiario&organization_name=not.is.null&latitude=not.is.null&longitude=not.is.null",
            self.table_url(&self.tables.profiles)
        );

        let rows: Vec<OrganizationRow> = self.get_rows(&url).await?;

        Ok(rows
            .into_iter()
            .map(|org| MapLocation {
                id: org.id,
                kind: EntityKind::Organization,
                title: org.organization_name,
                description: org
                    .organization_type
                    .clone()
                    .unwrap_or_else(|| "Organización beneficiaria".to_string()),
                latitude: org.latitude,
                longitude: org.longitude,
                address: org.address.unwrap_or_default(),
                date: None,
                details: LocationDetails::Organization(OrganizationDetails {
                    organization_type: org.organization_type,
                }),
            })
            .collect())
    }

    /// Assemble the full map snapshot from the three independent queries.
    ///
    /// A failing query degrades the snapshot instead of failing the page;
    /// its locations are simply absent (and the failure is logged).
    pub async fn all_locations(&self) -> Vec<MapLocation> {
        let (food, events, orgs) = tokio::join!(
            self.food_locations(),
            self.event_locations(),
            self.organization_locations()
        );

        let mut locations = Vec::new();

        match food {
            Ok(mut rows) => locations.append(&mut rows),
            Err(e) => tracing::warn!("Failed to load food locations: {}", e),
        }
        match events {
            Ok(mut rows) => locations.append(&mut rows),
            Err(e) => tracing::warn!("Failed to load event locations: {}", e),
        }
        match orgs {
            Ok(mut rows) => locations.append(&mut rows),
            Err(e) => tracing::warn!("Failed to load organizations: {}", e),
        }

        locations
    }

    /// Fetch a single volunteer event by id
    pub async fn get_event(&self, event_id: &str) -> Result<VolunteerEvent, SupabaseError> {
        let url = format!(
            "{}?select=*&id=eq.{}",
            self.table_url(&self.tables.volunteer_events),
            urlencoding::encode(event_id)
        );

        let mut rows: Vec<VolunteerEvent> = self.get_rows(&url).await?;

        if rows.is_empty() {
            return Err(SupabaseError::NotFound(format!(
                "Event not found: {}",
                event_id
            )));
        }

        Ok(rows.remove(0))
    }

    /// Application role of a user (donante, beneficiario, voluntario,
    /// administrador), read from the profiles table
    pub async fn get_profile_role(&self, user_id: &str) -> Result<String, SupabaseError> {
        #[derive(Debug, Deserialize)]
        struct RoleRow {
            role: String,
        }

        let url = format!(
            "{}?select=role&id=eq.{}",
            self.table_url(&self.tables.profiles),
            urlencoding::encode(user_id)
        );

        let mut rows: Vec<RoleRow> = self.get_rows(&url).await?;

        if rows.is_empty() {
            return Err(SupabaseError::NotFound(format!(
                "Profile not found: {}",
                user_id
            )));
        }

        Ok(rows.remove(0).role)
    }

    /// Mirror the derived registration count onto the event row.
    ///
    /// Display/analytics only; the authoritative count is derived from the
    /// participation table.
    pub async fn set_registered_volunteers(
        &self,
        event_id: &str,
        count: i64,
    ) -> Result<(), SupabaseError> {
        let url = format!(
            "{}?id=eq.{}",
            self.table_url(&self.tables.volunteer_events),
            urlencoding::encode(event_id)
        );

        let response = self
            .client
            .patch(&url)
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("Prefer", "return=minimal")
            .json(&serde_json::json!({ "registered_volunteers": count }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SupabaseError::ApiError(format!(
                "Failed to update event {}: {}",
                event_id,
                response.status()
            )));
        }

        Ok(())
    }

    /// Insert a notification row for a user
    pub async fn insert_notification(
        &self,
        user_id: &str,
        title: &str,
        message: &str,
        kind: &str,
        action_url: Option<&str>,
    ) -> Result<(), SupabaseError> {
        let url = self.table_url(&self.tables.notifications);

        let payload = serde_json::json!({
            "user_id": user_id,
            "title": title,
            "message": message,
            "type": kind,
            "action_url": action_url,
        });

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("Prefer", "return=minimal")
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SupabaseError::ApiError(format!(
                "Failed to insert notification: {}",
                response.status()
            )));
        }

        tracing::debug!("Inserted notification for user {}", user_id);

        Ok(())
    }

    /// Exact row count for a table, with optional PostgREST filters
    /// (e.g. `["status=eq.pendiente"]`).
    pub async fn count(&self, table: &str, filters: &[&str]) -> Result<u64, SupabaseError> {
        let mut url = format!("{}?select=id", self.table_url(table));
        for filter in filters {
            url.push('&');
            url.push_str(filter);
        }

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("Prefer", "count=exact")
            .header("Range", "0-0")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SupabaseError::ApiError(format!(
                "Count failed for {}: {}",
                table,
                response.status()
            )));
        }

        // Total comes back in Content-Range as "0-0/123"
        let content_range = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| SupabaseError::InvalidResponse("Missing Content-Range".into()))?;

        content_range
            .rsplit('/')
            .next()
            .and_then(|total| total.parse::<u64>().ok())
            .ok_or_else(|| {
                SupabaseError::InvalidResponse(format!(
                    "Unparseable Content-Range: {}",
                    content_range
                ))
            })
    }

    /// Aggregate platform statistics for the admin dashboard
    pub async fn admin_stats(&self) -> Result<AdminStats, SupabaseError> {
        let (
            total_users,
            total_donations,
            total_requests,
            total_campaigns,
            total_events,
            pending_requests,
            active_volunteers,
        ) = tokio::try_join!(
            self.count(&self.tables.profiles, &[]),
            self.count(&self.tables.food_items, &[]),
            self.count(&self.tables.food_requests, &[]),
            self.count(&self.tables.campaigns, &[]),
            self.count(&self.tables.volunteer_events, &[]),
            self.count(&self.tables.food_requests, &["status=eq.pendiente"]),
            self.count(&self.tables.profiles, &["role=eq.voluntario"]),
        )?;

        let total_money_raised = self.completed_donations_total().await?;

        Ok(AdminStats {
            total_users,
            total_donations,
            total_requests,
            total_campaigns,
            total_events,
            pending_requests,
            active_volunteers,
            total_money_raised,
        })
    }

    /// Sum of completed monetary donations (folded client-side)
    async fn completed_donations_total(&self) -> Result<f64, SupabaseError> {
        #[derive(Debug, Deserialize)]
        struct AmountRow {
            amount: f64,
        }

        let url = format!(
            "{}?select=amount&status=eq.completada",
            self.table_url(&self.tables.monetary_donations)
        );

        let rows: Vec<AmountRow> = self.get_rows(&url).await?;

        Ok(rows.iter().map(|r| r.amount).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_supabase_client_creation() {
        let client = SupabaseClient::new(
            "https://project.supabase.test".to_string(),
            "service_key".to_string(),
            test_tables(),
        );

        assert_eq!(client.base_url, "https://project.supabase.test");
        assert_eq!(client.service_key, "service_key");
    }

    #[test]
    fn test_table_url_trims_trailing_slash() {
        let client = SupabaseClient::new(
            "https://project.supabase.test/".to_string(),
            "key".to_string(),
            test_tables(),
        );

        assert_eq!(
            client.table_url("food_items"),
            "https://project.supabase.test/rest/v1/food_items"
        );
    }

    #[test]
    fn test_food_row_parsing() {
        let json = serde_json::json!({
            "id": "f1",
            "name": "Pan integral",
            "quantity": 5.0,
            "unit": "kg",
            "pickup_location": "Calle 45 #12-30",
            "pickup_latitude": 4.61,
            "pickup_longitude": -74.08,
            "category": { "name": "Panadería" },
            "donor": { "full_name": "Juan Pérez" }
        });

        let row: FoodItemRow = serde_json::from_value(json).unwrap();
        assert_eq!(row.name, "Pan integral");
        assert_eq!(row.category.unwrap().name.unwrap(), "Panadería");
    }
}
