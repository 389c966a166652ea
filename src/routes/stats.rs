use crate::models::{AdminStats, ErrorResponse, StatsResponse};
use crate::routes::AppState;
use crate::services::{bearer_token, decode_claims, CacheKey};
use actix_web::{web, HttpRequest, HttpResponse, Responder};

/// Configure admin routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/admin/stats", web::get().to(get_stats));
}

/// Aggregate platform statistics
///
/// GET /api/v1/admin/stats
///
/// Requires a bearer session token whose profile carries the
/// `administrador` role.
async fn get_stats(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let claims = match bearer_token(header).and_then(|token| decode_claims(token, &state.jwt_secret)) {
        Ok(claims) => claims,
        Err(e) => {
            return HttpResponse::Unauthorized().json(ErrorResponse {
                error: "Unauthorized".to_string(),
                message: e.to_string(),
                status_code: 401,
            });
        }
    };

    match state.supabase.get_profile_role(&claims.sub).await {
        Ok(role) if role == "administrador" => {}
        Ok(_) => {
            return HttpResponse::Forbidden().json(ErrorResponse {
                error: "Forbidden".to_string(),
                message: "Administrator role required".to_string(),
                status_code: 403,
            });
        }
        Err(e) => {
            tracing::error!("Failed to resolve role for {}: {}", claims.sub, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to resolve role".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    }

    let key = CacheKey::stats();

    let stats = match state.cache.get::<AdminStats>(&key).await {
        Ok(stats) => stats,
        Err(_) => match state.supabase.admin_stats().await {
            Ok(stats) => {
                if let Err(e) = state.cache.set(&key, &stats).await {
                    tracing::warn!("Failed to cache admin stats: {}", e);
                }
                stats
            }
            Err(e) => {
                tracing::error!("Failed to load admin stats: {}", e);
                return HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Failed to load stats".to_string(),
                    message: e.to_string(),
                    status_code: 500,
                });
            }
        },
    };

    HttpResponse::Ok().json(StatsResponse {
        stats,
        generated_at: chrono::Utc::now(),
    })
}
