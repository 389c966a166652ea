// Route exports
pub mod chat;
pub mod events;
pub mod map;
pub mod stats;

use crate::core::{Assistant, Locator};
use crate::models::HealthResponse;
use crate::services::{CacheManager, PostgresClient, SessionStore, SupabaseClient};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub supabase: Arc<SupabaseClient>,
    pub cache: Arc<CacheManager>,
    pub postgres: Arc<PostgresClient>,
    pub sessions: Arc<SessionStore>,
    pub assistant: Assistant,
    pub locator: Locator,
    /// Simulated typing delay applied before the assistant reply is stored
    pub typing_delay: Duration,
    pub max_results: usize,
    pub jwt_secret: String,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(chat::configure)
            .configure(map::configure)
            .configure(events::configure)
            .configure(stats::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
