//! Single binary web server: event bracket REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use event_bracket_web::{
    BracketError, BracketService, EventId, MatchDetail, MatchId, MemoryStore, ParticipantId,
    ServiceError,
};
use serde::Deserialize;
use std::sync::RwLock;
use uuid::Uuid;

/// Shared state: the bracket service over in-memory storage. Every mutating
/// request takes the write guard, which satisfies the per-event write
/// serialization the bracket store requires.
type AppState = Data<RwLock<BracketService<MemoryStore>>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct RegisterBody {
    display_name: String,
    #[serde(default)]
    team_member_ids: Vec<Uuid>,
}

#[derive(Deserialize)]
struct GenerateBody {
    /// Configured event capacity; 0 (or omitted) means none.
    #[serde(default)]
    capacity: usize,
}

#[derive(Deserialize)]
struct ReportWinnerBody {
    match_id: MatchId,
    winner_id: String,
}

#[derive(Deserialize)]
struct MatchIdBody {
    match_id: MatchId,
}

#[derive(Deserialize)]
struct UpsertDetailBody {
    match_id: MatchId,
    scheduled_time: Option<DateTime<Utc>>,
    location: Option<String>,
    notes: Option<String>,
}

/// Path segment: event id (e.g. /api/events/{id})
#[derive(Deserialize)]
struct EventPath {
    id: EventId,
}

/// Path segments: event id and participant id (e.g. /api/events/{id}/upcoming/{pid})
#[derive(Deserialize)]
struct EventParticipantPath {
    id: EventId,
    pid: ParticipantId,
}

/// Map a service error onto a status: unknown ids are 404, storage failures
/// 500, everything else 400.
fn error_response(e: ServiceError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        ServiceError::Bracket(BracketError::MatchNotFound(_))
        | ServiceError::Bracket(BracketError::BracketNotFound) => HttpResponse::NotFound().json(body),
        ServiceError::Bracket(_) => HttpResponse::BadRequest().json(body),
        ServiceError::Store(_) => HttpResponse::InternalServerError().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "event-bracket-web",
    })
}

/// Register a participant for an event (demo-only; the platform has its own
/// registration flow). Returns the created registration with its minted id.
#[post("/api/events/{id}/participants")]
async fn api_register_participant(
    state: AppState,
    path: Path<EventPath>,
    body: Json<RegisterBody>,
) -> HttpResponse {
    let name = body.display_name.trim();
    if name.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": "Display name required" }));
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let p = g
        .store_mut()
        .register_participant(path.id, name, body.team_member_ids.clone());
    HttpResponse::Ok().json(p)
}

/// List registered participants for an event.
#[get("/api/events/{id}/participants")]
async fn api_list_participants(state: AppState, path: Path<EventPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.participants(path.id) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => error_response(e),
    }
}

/// Withdraw a registration.
#[delete("/api/events/{id}/participants/{pid}")]
async fn api_withdraw_participant(state: AppState, path: Path<EventParticipantPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if g.store_mut().withdraw_participant(path.id, &path.pid) {
        HttpResponse::NoContent().finish()
    } else {
        HttpResponse::NotFound().json(serde_json::json!({ "error": "No registration" }))
    }
}

/// Generate (or regenerate) the event's bracket from current registrations.
#[post("/api/events/{id}/bracket")]
async fn api_generate_bracket(
    state: AppState,
    path: Path<EventPath>,
    body: Option<Json<GenerateBody>>,
) -> HttpResponse {
    let capacity = body.as_ref().map(|b| b.capacity).unwrap_or(0);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.generate(path.id, capacity) {
        Ok(bracket) => HttpResponse::Ok().json(bracket),
        Err(e) => error_response(e),
    }
}

/// The bracket with details merged in (404 if none generated).
#[get("/api/events/{id}/bracket")]
async fn api_get_bracket(state: AppState, path: Path<EventPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.bracket_view(path.id) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => error_response(e),
    }
}

/// Record a match winner and cascade the advancement.
#[put("/api/events/{id}/bracket/winner")]
async fn api_report_winner(
    state: AppState,
    path: Path<EventPath>,
    body: Json<ReportWinnerBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.report_winner(path.id, body.match_id, &body.winner_id) {
        Ok(update) => HttpResponse::Ok().json(update),
        Err(e) => error_response(e),
    }
}

/// Void a recorded result (and everything downstream of it).
#[put("/api/events/{id}/bracket/clear-winner")]
async fn api_clear_winner(state: AppState, path: Path<EventPath>, body: Json<MatchIdBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.clear_winner(path.id, body.match_id) {
        Ok(voided) => HttpResponse::Ok().json(serde_json::json!({ "voided": voided })),
        Err(e) => error_response(e),
    }
}

/// Swap the two slots of an undecided match.
#[put("/api/events/{id}/bracket/swap")]
async fn api_swap_participants(state: AppState, path: Path<EventPath>, body: Json<MatchIdBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.swap_participants(path.id, body.match_id) {
        Ok(bracket) => HttpResponse::Ok().json(bracket),
        Err(e) => error_response(e),
    }
}

/// Tear the bracket down.
#[delete("/api/events/{id}/bracket")]
async fn api_delete_bracket(state: AppState, path: Path<EventPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.delete_bracket(path.id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

/// All stored match details for an event, keyed by match id.
#[get("/api/events/{id}/match-details")]
async fn api_get_match_details(state: AppState, path: Path<EventPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.match_details(path.id) {
        Ok(details) => HttpResponse::Ok().json(details),
        Err(e) => error_response(e),
    }
}

/// Set schedule/location/notes for a match, replacing any previous record.
#[put("/api/events/{id}/match-details")]
async fn api_upsert_match_detail(
    state: AppState,
    path: Path<EventPath>,
    body: Json<UpsertDetailBody>,
) -> HttpResponse {
    let detail = MatchDetail {
        scheduled_time: body.scheduled_time,
        location: body.location.clone(),
        notes: body.notes.clone(),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.upsert_detail(path.id, body.match_id, detail.clone()) {
        Ok(()) => HttpResponse::Ok().json(detail),
        Err(e) => error_response(e),
    }
}

/// Null every scheduled time for the event (locations and notes stay).
#[put("/api/events/{id}/match-details/reset-times")]
async fn api_reset_match_times(state: AppState, path: Path<EventPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.reset_match_times(path.id) {
        Ok(reset) => HttpResponse::Ok().json(serde_json::json!({ "reset": reset })),
        Err(e) => error_response(e),
    }
}

/// Drop every stored match detail for the event.
#[delete("/api/events/{id}/match-details")]
async fn api_clear_match_details(state: AppState, path: Path<EventPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.clear_details(path.id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

/// A participant's undecided matches, soonest first.
#[get("/api/events/{id}/upcoming/{pid}")]
async fn api_upcoming_matches(state: AppState, path: Path<EventParticipantPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.upcoming_matches(path.id, &path.pid) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => error_response(e),
    }
}

/// The event's winner, if decided.
#[get("/api/events/{id}/champion")]
async fn api_champion(state: AppState, path: Path<EventPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.champion(path.id) {
        Ok(champion) => HttpResponse::Ok().json(serde_json::json!({ "champion": champion })),
        Err(e) => error_response(e),
    }
}

/// Last recorded lifecycle status for the event (null if never flipped).
#[get("/api/events/{id}/status")]
async fn api_event_status(state: AppState, path: Path<EventPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.event_status(path.id) {
        Ok(status) => HttpResponse::Ok().json(serde_json::json!({ "status": status })),
        Err(e) => error_response(e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(BracketService::new(MemoryStore::new())));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_register_participant)
            .service(api_list_participants)
            .service(api_withdraw_participant)
            .service(api_generate_bracket)
            .service(api_get_bracket)
            .service(api_report_winner)
            .service(api_clear_winner)
            .service(api_swap_participants)
            .service(api_delete_bracket)
            .service(api_get_match_details)
            .service(api_upsert_match_detail)
            .service(api_reset_match_times)
            .service(api_clear_match_details)
            .service(api_upcoming_matches)
            .service(api_champion)
            .service(api_event_status)
    })
    .bind(bind)?
    .run()
    .await
}
