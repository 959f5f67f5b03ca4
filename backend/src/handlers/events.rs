use actix_web::{web, HttpResponse};

use crate::state::AppState;

/// `GET /api/events` — the listing the chatbot's fallback message
/// points people at. Read-only.
pub async fn list_events(state: web::Data<AppState>) -> HttpResponse {
    match state.events.list_events().await {
        Ok(events) => HttpResponse::Ok().json(events),
        Err(e) => {
            log::error!("Event listing failed: {:#}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to load events"
            }))
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/events", web::get().to(list_events));
}
