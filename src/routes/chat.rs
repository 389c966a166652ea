use crate::models::{ChatHistoryResponse, ChatMessage, ChatMessageRequest, ChatResponse, ErrorResponse};
use crate::routes::AppState;
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// Configure assistant chat routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/chat/message", web::post().to(send_message))
        .route("/chat/history/{session_id}", web::get().to(get_history))
        .route("/chat/history/{session_id}", web::delete().to(clear_history));
}

/// Send one message to the assistant
///
/// POST /api/v1/chat/message
///
/// Request body:
/// ```json
/// {
///   "session_id": "string",
///   "message": "quiero donar alimentos"
/// }
/// ```
async fn send_message(
    state: web::Data<AppState>,
    req: web::Json<ChatMessageRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let session_id = &req.session_id;

    state
        .sessions
        .append(session_id, ChatMessage::user(&req.message))
        .await;

    // The reply itself is synchronous; only its display timing is simulated.
    let reply = state.assistant.reply(&req.message);

    // If the client goes away mid-delay the handler future is dropped here
    // and the bot message is never appended.
    if !state.typing_delay.is_zero() {
        tokio::time::sleep(state.typing_delay).await;
    }

    let bot_message = ChatMessage::bot(reply);
    state.sessions.append(session_id, bot_message.clone()).await;

    tracing::debug!("Assistant replied in session {}", session_id);

    HttpResponse::Ok().json(ChatResponse {
        session_id: session_id.clone(),
        message: bot_message,
    })
}

/// Fetch a session transcript
///
/// GET /api/v1/chat/history/{session_id}
async fn get_history(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let session_id = path.into_inner();
    let messages = state.sessions.history(&session_id).await;

    HttpResponse::Ok().json(ChatHistoryResponse {
        session_id,
        messages,
    })
}

/// Drop a session transcript (widget closed)
///
/// DELETE /api/v1/chat/history/{session_id}
async fn clear_history(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let session_id = path.into_inner();
    state.sessions.clear(&session_id).await;

    tracing::debug!("Cleared chat session {}", session_id);

    HttpResponse::NoContent().finish()
}
