use crate::models::{ErrorResponse, JoinEventRequest, LeaveEventRequest, ParticipationResponse};
use crate::routes::AppState;
use crate::services::{CacheKey, RegistrationOutcome, SupabaseError};
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// Configure volunteer event routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/events/join", web::post().to(join_event))
        .route("/events/leave", web::post().to(leave_event))
        .route("/events/registered", web::get().to(get_registered_events));
}

/// Join a volunteer event
///
/// POST /api/v1/events/join
///
/// Request body:
/// ```json
/// {
///   "event_id": "string",
///   "volunteer_id": "string"
/// }
/// ```
///
/// Registration and the capacity check run atomically in the participation
/// store. The upstream event counter and the notification row are mirrored
/// best-effort afterwards.
async fn join_event(
    state: web::Data<AppState>,
    req: web::Json<JoinEventRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let event = match state.supabase.get_event(&req.event_id).await {
        Ok(event) => event,
        Err(SupabaseError::NotFound(message)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Event not found".to_string(),
                message,
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch event {}: {}", req.event_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch event".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let (outcome, count) = match state
        .postgres
        .register(&req.event_id, &req.volunteer_id, event.max_volunteers)
        .await
    {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Failed to register for event {}: {}", req.event_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to register".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    match outcome {
        RegistrationOutcome::Registered => {
            mirror_count(&state, &req.event_id, count).await;

            // Notification is best-effort, the registration already happened
            if let Err(e) = state
                .supabase
                .insert_notification(
                    &req.volunteer_id,
                    "Te has unido a un evento",
                    &format!("Te has registrado para el evento: {}", event.title),
                    "evento",
                    Some(&format!("/eventos/{}", req.event_id)),
                )
                .await
            {
                tracing::warn!("Failed to insert join notification: {}", e);
            }

            HttpResponse::Ok().json(ParticipationResponse {
                success: true,
                event_id: req.event_id.clone(),
                registered_volunteers: count,
                message: "Te has unido al evento de voluntariado".to_string(),
            })
        }
        RegistrationOutcome::AlreadyRegistered => HttpResponse::Ok().json(ParticipationResponse {
            success: false,
            event_id: req.event_id.clone(),
            registered_volunteers: count,
            message: "Ya estás registrado en este evento".to_string(),
        }),
        RegistrationOutcome::EventFull => HttpResponse::Conflict().json(ErrorResponse {
            error: "Event full".to_string(),
            message: "El evento ya alcanzó el número máximo de voluntarios".to_string(),
            status_code: 409,
        }),
    }
}

/// Leave a volunteer event
///
/// POST /api/v1/events/leave
async fn leave_event(
    state: web::Data<AppState>,
    req: web::Json<LeaveEventRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state
        .postgres
        .unregister(&req.event_id, &req.volunteer_id)
        .await
    {
        Ok(Some(count)) => {
            mirror_count(&state, &req.event_id, count).await;

            HttpResponse::Ok().json(ParticipationResponse {
                success: true,
                event_id: req.event_id.clone(),
                registered_volunteers: count,
                message: "Ya no estás registrado en este evento".to_string(),
            })
        }
        Ok(None) => HttpResponse::Ok().json(ParticipationResponse {
            success: false,
            event_id: req.event_id.clone(),
            registered_volunteers: 0,
            message: "No estabas registrado en este evento".to_string(),
        }),
        Err(e) => {
            tracing::error!("Failed to unregister from event {}: {}", req.event_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to unregister".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Events a volunteer is registered for
///
/// GET /api/v1/events/registered?volunteer_id={id}
///
/// Used by clients to render join/leave state without re-deriving it.
async fn get_registered_events(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let volunteer_id = match query.get("volunteer_id") {
        Some(id) => id,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing volunteer_id parameter".to_string(),
                message: "volunteer_id query parameter is required".to_string(),
                status_code: 400,
            });
        }
    };

    match state.postgres.registered_events(volunteer_id).await {
        Ok(event_ids) => HttpResponse::Ok().json(serde_json::json!({
            "volunteer_id": volunteer_id,
            "event_ids": event_ids,
            "count": event_ids.len(),
        })),
        Err(e) => {
            tracing::error!("Failed to fetch registrations for {}: {}", volunteer_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch registrations".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Push the derived count to the upstream event row and invalidate the
/// snapshots that embed it. Both are best-effort.
async fn mirror_count(state: &AppState, event_id: &str, count: i64) {
    if let Err(e) = state
        .supabase
        .set_registered_volunteers(event_id, count)
        .await
    {
        tracing::warn!("Failed to mirror count for event {}: {}", event_id, e);
    }

    for key in [CacheKey::locations(), CacheKey::stats()] {
        if let Err(e) = state.cache.delete(&key).await {
            tracing::warn!("Failed to invalidate cache key {}: {}", key, e);
        }
    }
}
