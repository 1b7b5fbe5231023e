// Kumite Desk - Web Server
// Serves the dashboard page set plus the JSON API. Unauthenticated requests
// to any protected page redirect to the login page.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json, Redirect, Response},
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tower_http::cors::CorsLayer;

use kumite_desk::{
    Athlete, AthleteForm, AthleteRegistry, Belt, Bracket, CategoryRegistry, CompetitorSlot,
    CounterKind, RegistrySummary, ScorePanel, SessionGuard, SessionUser, ValidationError,
};

/// Session cookie name
const SESSION_COOKIE: &str = "kumite_session";

/// Shared application state
#[derive(Clone)]
struct AppState {
    athletes: Arc<AthleteRegistry>,
    categories: Arc<CategoryRegistry>,
    bracket: Arc<Bracket>,
    panels: Arc<RwLock<HashMap<String, ScorePanel>>>,
    guard: Arc<Mutex<SessionGuard>>,
    tokens: Arc<RwLock<HashMap<String, SessionUser>>>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }

    fn err(data: T, error: &str) -> Self {
        Self {
            success: false,
            data,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct AthleteQuery {
    #[serde(default)]
    q: String,
    belt: Option<String>,
}

#[derive(Deserialize)]
struct ScoreAdjust {
    slot: CompetitorSlot,
    kind: CounterKind,
    delta: i32,
}

/// Stats response
#[derive(Serialize)]
struct StatsResponse {
    athletes: RegistrySummary,
    category_count: usize,
}

// ============================================================================
// Session helpers
// ============================================================================

/// Pull the session token out of the Cookie header and resolve it
fn session_user(state: &AppState, headers: &HeaderMap) -> Option<SessionUser> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;

    let token = cookies.split(';').map(str::trim).find_map(|pair| {
        pair.strip_prefix(SESSION_COOKIE)
            .and_then(|rest| rest.strip_prefix('='))
    })?;

    let tokens = state.tokens.read().unwrap();
    tokens.get(token).cloned()
}

/// Serve a page to an authenticated session, or bounce to login
fn protected_page(state: &AppState, headers: &HeaderMap, page: &'static str) -> Response {
    if session_user(state, headers).is_some() {
        Html(page).into_response()
    } else {
        Redirect::to("/").into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// POST /api/login - Credential check, sets the session cookie on success
async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    let result = {
        let mut guard = state.guard.lock().unwrap();
        guard.login(&req.username, &req.password)
    };

    match result {
        Ok(user) => {
            let token = uuid::Uuid::new_v4().to_string();
            state
                .tokens
                .write()
                .unwrap()
                .insert(token.clone(), user.clone());

            let cookie = format!("{}={}; Path=/; HttpOnly", SESSION_COOKIE, token);
            (
                StatusCode::OK,
                [(header::SET_COOKIE, cookie)],
                Json(ApiResponse::ok(user)),
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::err((), &e.to_string())),
        )
            .into_response(),
    }
}

/// POST /api/logout - Clear the session and drop the token
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(cookies) = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()) {
        if let Some(token) = cookies.split(';').map(str::trim).find_map(|pair| {
            pair.strip_prefix(SESSION_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
        }) {
            state.tokens.write().unwrap().remove(token);
        }
    }

    state.guard.lock().unwrap().logout();

    let expired = format!("{}=; Path=/; Max-Age=0", SESSION_COOKIE);
    (
        StatusCode::OK,
        [(header::SET_COOKIE, expired)],
        Json(ApiResponse::ok("logged out")),
    )
        .into_response()
}

/// GET /api/athletes - List athletes, with optional search query and belt filter
async fn list_athletes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AthleteQuery>,
) -> Response {
    if session_user(&state, &headers).is_none() {
        return unauthorized();
    }

    let belt_filter = match query.belt.as_deref() {
        None | Some("") => None,
        Some(raw) => match Belt::parse(raw) {
            Some(belt) => Some(belt),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::err(
                        Vec::<Athlete>::new(),
                        &format!("Unknown belt rank: {}", raw),
                    )),
                )
                    .into_response()
            }
        },
    };

    let athletes = state.athletes.search(&query.q, belt_filter);
    (StatusCode::OK, Json(ApiResponse::ok(athletes))).into_response()
}

/// POST /api/athletes - Validated registration
async fn create_athlete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<AthleteForm>,
) -> Response {
    if session_user(&state, &headers).is_none() {
        return unauthorized();
    }

    if let Err(errors) = form.validate(&state.categories) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::err(errors, "Validation failed")),
        )
            .into_response();
    }

    // Validation passed, so the conversion cannot fail
    match form.into_athlete() {
        Some(athlete) => {
            state.athletes.add(athlete.clone());
            (StatusCode::CREATED, Json(ApiResponse::ok(athlete))).into_response()
        }
        None => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::err(
                Vec::<ValidationError>::new(),
                "Validation failed",
            )),
        )
            .into_response(),
    }
}

/// DELETE /api/athletes/:id - Remove exactly one record
async fn delete_athlete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if session_user(&state, &headers).is_none() {
        return unauthorized();
    }

    if state.athletes.remove(&id) {
        (StatusCode::OK, Json(ApiResponse::ok(id))).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::err(id, "No athlete with that id")),
        )
            .into_response()
    }
}

/// GET /api/athletes/export - CSV download of the registry
async fn export_athletes(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if session_user(&state, &headers).is_none() {
        return unauthorized();
    }

    match state.athletes.export_csv() {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"athletes.csv\"".to_string(),
                ),
            ],
            csv,
        )
            .into_response(),
        Err(e) => {
            eprintln!("Error exporting athletes: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err((), "Export failed")),
            )
                .into_response()
        }
    }
}

/// GET /api/categories - All competition categories
async fn list_categories(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if session_user(&state, &headers).is_none() {
        return unauthorized();
    }

    (StatusCode::OK, Json(ApiResponse::ok(state.categories.all()))).into_response()
}

/// GET /api/bracket - The fixed bracket layout
async fn get_bracket(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if session_user(&state, &headers).is_none() {
        return unauthorized();
    }

    (
        StatusCode::OK,
        Json(ApiResponse::ok(state.bracket.as_ref().clone())),
    )
        .into_response()
}

/// GET /api/stats - Dashboard summary
async fn get_stats(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if session_user(&state, &headers).is_none() {
        return unauthorized();
    }

    let stats = StatsResponse {
        athletes: state.athletes.summary(),
        category_count: state.categories.count(),
    };

    (StatusCode::OK, Json(ApiResponse::ok(stats))).into_response()
}

/// GET /api/scoring/:match_id - Current panel state (created on first use)
async fn get_panel(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(match_id): Path<String>,
) -> Response {
    if session_user(&state, &headers).is_none() {
        return unauthorized();
    }

    // Decode URL-encoded match id
    let match_id = urlencoding::decode(&match_id)
        .unwrap_or_else(|_| match_id.clone().into())
        .into_owned();

    let mut panels = state.panels.write().unwrap();
    let panel = panels
        .entry(match_id.clone())
        .or_insert_with(|| ScorePanel::new(&match_id));

    (StatusCode::OK, Json(ApiResponse::ok(panel.clone()))).into_response()
}

/// POST /api/scoring/:match_id - Apply a clamped counter adjustment
async fn adjust_panel(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(match_id): Path<String>,
    Json(adjust): Json<ScoreAdjust>,
) -> Response {
    if session_user(&state, &headers).is_none() {
        return unauthorized();
    }

    let match_id = urlencoding::decode(&match_id)
        .unwrap_or_else(|_| match_id.clone().into())
        .into_owned();

    let mut panels = state.panels.write().unwrap();
    let panel = panels
        .entry(match_id.clone())
        .or_insert_with(|| ScorePanel::new(&match_id));

    panel.adjust(adjust.slot, adjust.kind, adjust.delta);

    (StatusCode::OK, Json(ApiResponse::ok(panel.clone()))).into_response()
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::err((), "Not logged in")),
    )
        .into_response()
}

// ============================================================================
// Page Handlers
// ============================================================================

/// GET / - Serve login page
async fn serve_login() -> impl IntoResponse {
    Html(include_str!("../web/login.html"))
}

async fn serve_dashboard(State(state): State<AppState>, headers: HeaderMap) -> Response {
    protected_page(&state, &headers, include_str!("../web/dashboard.html"))
}

async fn serve_athletes(State(state): State<AppState>, headers: HeaderMap) -> Response {
    protected_page(&state, &headers, include_str!("../web/athletes.html"))
}

async fn serve_categories(State(state): State<AppState>, headers: HeaderMap) -> Response {
    protected_page(&state, &headers, include_str!("../web/categories.html"))
}

async fn serve_tournament(State(state): State<AppState>, headers: HeaderMap) -> Response {
    protected_page(&state, &headers, include_str!("../web/tournament.html"))
}

async fn serve_scoring(State(state): State<AppState>, headers: HeaderMap) -> Response {
    protected_page(&state, &headers, include_str!("../web/scoring.html"))
}

async fn serve_results(State(state): State<AppState>, headers: HeaderMap) -> Response {
    protected_page(&state, &headers, include_str!("../web/results.html"))
}

async fn serve_settings(State(state): State<AppState>, headers: HeaderMap) -> Response {
    protected_page(&state, &headers, include_str!("../web/settings.html"))
}

// ============================================================================
// Router
// ============================================================================

fn build_app(state: AppState) -> Router {
    // API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/athletes", get(list_athletes).post(create_athlete))
        .route("/athletes/export", get(export_athletes))
        .route("/athletes/:id", delete(delete_athlete))
        .route("/categories", get(list_categories))
        .route("/bracket", get(get_bracket))
        .route("/stats", get(get_stats))
        .route("/scoring/:match_id", get(get_panel).post(adjust_panel));

    // Page routes
    Router::new()
        .route("/", get(serve_login))
        .route("/dashboard", get(serve_dashboard))
        .route("/athletes", get(serve_athletes))
        .route("/categories", get(serve_categories))
        .route("/tournament", get(serve_tournament))
        .route("/scoring", get(serve_scoring))
        .route("/results", get(serve_results))
        .route("/settings", get(serve_settings))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    println!("🥋 Kumite Desk - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // The stored session (if any) is read once here at startup
    let mut guard = SessionGuard::new();
    if let Err(e) = guard.restore() {
        eprintln!("⚠️  Could not read session file: {}", e);
    }
    if let Some(user) = guard.current_user() {
        println!("✓ Restored session for {}", user.username);
    }

    // Create shared state
    let state = AppState {
        athletes: Arc::new(AthleteRegistry::with_defaults()),
        categories: Arc::new(CategoryRegistry::with_defaults()),
        bracket: Arc::new(Bracket::default_layout()),
        panels: Arc::new(RwLock::new(HashMap::new())),
        guard: Arc::new(Mutex::new(guard)),
        tokens: Arc::new(RwLock::new(HashMap::new())),
    };

    let app = build_app(state);

    // Start server
    let addr = std::env::var("KUMITE_BIND").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://{}", addr);
    println!("   API: http://{}/api/athletes", addr);
    println!("   UI:  http://{}", addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}

// ============================================================================
// TESTS
// ============================================================================
