use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, Query, State, WebSocketUpgrade},
    http::{HeaderMap, StatusCode, Uri},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use server_api::{
    admin::{self, RegistrationQuery, SettingsForm},
    auth::{self, RedirectQuery},
    catalog::{self, DashboardTab},
    forms::{TrainerForm, WebinarForm},
    ApiContext,
};
use shared::{
    domain::{TrainerId, TrainerPatch, WebinarId, WebinarPatch},
    error::{ApiError, ErrorCode},
    protocol::{Confirmation, LoginRequest, Outcome},
};
use storage::EntityStore;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;
mod modals;

use app_state::AppState;
use config::load_settings;

pub(crate) type HttpResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

const VISITOR_HEADER: &str = "x-visitor-id";
const ANONYMOUS_VISITOR: &str = "anonymous";
const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Deserialize)]
struct PortfolioQuery {
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TabQuery {
    tab: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    let store = if settings.seed_mock_data {
        EntityStore::seeded()
    } else {
        EntityStore::empty()
    };
    let api = ApiContext::new(store, settings.site_config());
    let app = build_router(Arc::new(AppState::new(api)));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/", get(home))
        .route("/portfolio", get(portfolio))
        .route("/courses", get(courses))
        .route("/policies", get(policies))
        .route("/webinars", get(webinars))
        .route("/webinars/:id/register", post(register_webinar))
        .route("/login", get(login_page).post(login))
        .route("/dashboard/webinars", get(learner_dashboard))
        .route(
            "/dashboard/webinars/:id/register",
            post(register_on_dashboard),
        )
        .route("/admin/dashboard", get(admin_dashboard))
        .route("/admin/webinars", get(list_webinars).post(create_webinar))
        .route("/admin/webinars/new", get(new_webinar))
        .route(
            "/admin/webinars/edit/:id",
            get(edit_webinar).post(update_webinar),
        )
        .route("/admin/webinars/:id", delete(delete_webinar))
        .route("/admin/registrations", get(registrations))
        .route("/admin/live-sessions", get(live_sessions))
        .route("/admin/live-sessions/:id/go-live", post(go_live))
        .route("/admin/live-sessions/:id/complete", post(complete_session))
        .route("/admin/trainers", get(list_trainers).post(create_trainer))
        .route("/admin/trainers/new", get(new_trainer))
        .route(
            "/admin/trainers/edit/:id",
            get(edit_trainer).post(update_trainer),
        )
        .route("/admin/trainers/:id", delete(delete_trainer))
        .route("/admin/settings", get(settings).post(save_settings))
        .route("/admin/settings/reset", post(reset_system))
        .route("/admin/logout", post(logout))
        .route("/modals/registration", post(modals::open_registration))
        .route("/modals/payment", post(modals::open_payment))
        .route(
            "/modals/:id",
            get(modals::show_modal).delete(modals::close_modal),
        )
        .route("/modals/:id/fields", post(modals::set_field))
        .route("/modals/:id/submit", post(modals::submit_modal))
        .route("/ws", get(ws_handler))
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

/// Maps an API error onto its HTTP status.
pub(crate) fn reject(error: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = match error.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::ConfirmationRequired | ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        warn!(message = %error.message, "request failed");
    }
    (status, Json(error))
}

fn visitor(headers: &HeaderMap) -> String {
    headers
        .get(VISITOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(ANONYMOUS_VISITOR)
        .to_string()
}

async fn healthz() -> &'static str {
    "ok"
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(catalog::not_found_page(uri.path())),
    )
}

async fn home(State(state): State<Arc<AppState>>) -> Json<catalog::HomePage> {
    Json(catalog::home_page(&state.api))
}

async fn portfolio(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PortfolioQuery>,
) -> Json<catalog::PortfolioPage> {
    Json(catalog::portfolio_page(&state.api, q.category.as_deref()))
}

async fn courses(State(state): State<Arc<AppState>>) -> Json<catalog::CoursesPage> {
    Json(catalog::courses_page(&state.api))
}

async fn policies(State(state): State<Arc<AppState>>) -> Json<catalog::PoliciesPage> {
    Json(catalog::policies_page(&state.api))
}

async fn webinars(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<catalog::WebinarsPage> {
    Json(catalog::webinars_page(&state.api, &visitor(&headers)))
}

async fn register_webinar(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    headers: HeaderMap,
) -> HttpResult<catalog::WebinarsPage> {
    let page = catalog::register_for_webinar(&state.api, &visitor(&headers), id)
        .await
        .map_err(reject)?;
    Ok(Json(page))
}

async fn learner_dashboard(
    State(state): State<Arc<AppState>>,
    Query(q): Query<TabQuery>,
    headers: HeaderMap,
) -> Json<catalog::LearnerDashboard> {
    let tab = DashboardTab::parse(q.tab.as_deref());
    Json(catalog::learner_dashboard(
        &state.api,
        &visitor(&headers),
        tab,
    ))
}

async fn register_on_dashboard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    headers: HeaderMap,
) -> HttpResult<catalog::LearnerDashboard> {
    catalog::register_on_dashboard(&state.api, &visitor(&headers), id)
        .map(Json)
        .map_err(reject)
}

async fn login_page(Query(q): Query<RedirectQuery>) -> Json<auth::LoginPage> {
    Json(auth::login_page(&q))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Query(q): Query<RedirectQuery>,
    Json(req): Json<LoginRequest>,
) -> HttpResult<Outcome> {
    auth::login(&state.api, req, &q)
        .await
        .map(Json)
        .map_err(reject)
}

async fn admin_dashboard(State(state): State<Arc<AppState>>) -> Json<admin::DashboardPage> {
    Json(admin::dashboard(&state.api))
}

async fn list_webinars(State(state): State<Arc<AppState>>) -> Json<admin::WebinarListPage> {
    Json(admin::webinar_list(&state.api))
}

async fn new_webinar(
    State(state): State<Arc<AppState>>,
) -> Json<admin::FormPage<WebinarForm>> {
    Json(admin::new_webinar_form(&state.api))
}

async fn create_webinar(
    State(state): State<Arc<AppState>>,
    Json(form): Json<WebinarForm>,
) -> HttpResult<Outcome> {
    admin::create_webinar(&state.api, form)
        .map(Json)
        .map_err(reject)
}

async fn edit_webinar(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> HttpResult<admin::FormPage<WebinarForm>> {
    admin::edit_webinar_form(&state.api, WebinarId(id))
        .map(Json)
        .map_err(reject)
}

async fn update_webinar(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(patch): Json<WebinarPatch>,
) -> HttpResult<Outcome> {
    admin::update_webinar(&state.api, WebinarId(id), patch)
        .map(Json)
        .map_err(reject)
}

async fn delete_webinar(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(confirmation): Query<Confirmation>,
) -> HttpResult<Outcome> {
    admin::delete_webinar(&state.api, WebinarId(id), confirmation)
        .map(Json)
        .map_err(reject)
}

async fn registrations(Query(q): Query<RegistrationQuery>) -> Json<admin::RegistrationsPage> {
    Json(admin::registrations(&q))
}

async fn live_sessions(State(state): State<Arc<AppState>>) -> Json<admin::LiveSessionsPage> {
    Json(admin::live_sessions(&state.api))
}

async fn go_live(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> HttpResult<Outcome> {
    admin::go_live(&state.api, WebinarId(id))
        .map(Json)
        .map_err(reject)
}

async fn complete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> HttpResult<Outcome> {
    admin::complete_session(&state.api, WebinarId(id))
        .map(Json)
        .map_err(reject)
}

async fn list_trainers(State(state): State<Arc<AppState>>) -> Json<admin::TrainerListPage> {
    Json(admin::trainer_list(&state.api))
}

async fn new_trainer() -> Json<admin::FormPage<TrainerForm>> {
    Json(admin::new_trainer_form())
}

async fn create_trainer(
    State(state): State<Arc<AppState>>,
    Json(form): Json<TrainerForm>,
) -> HttpResult<Outcome> {
    admin::create_trainer(&state.api, form)
        .map(Json)
        .map_err(reject)
}

async fn edit_trainer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> HttpResult<admin::FormPage<TrainerForm>> {
    admin::edit_trainer_form(&state.api, TrainerId(id))
        .map(Json)
        .map_err(reject)
}

async fn update_trainer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(patch): Json<TrainerPatch>,
) -> HttpResult<Outcome> {
    admin::update_trainer(&state.api, TrainerId(id), patch)
        .map(Json)
        .map_err(reject)
}

async fn delete_trainer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(confirmation): Query<Confirmation>,
) -> HttpResult<Outcome> {
    admin::delete_trainer(&state.api, TrainerId(id), confirmation)
        .map(Json)
        .map_err(reject)
}

async fn settings(State(state): State<Arc<AppState>>) -> Json<admin::SettingsPage> {
    Json(admin::settings_page(&state.api))
}

async fn save_settings(
    State(state): State<Arc<AppState>>,
    Json(form): Json<SettingsForm>,
) -> HttpResult<Outcome> {
    admin::save_settings(&state.api, form)
        .map(Json)
        .map_err(reject)
}

async fn reset_system(
    State(state): State<Arc<AppState>>,
    Query(confirmation): Query<Confirmation>,
) -> HttpResult<Outcome> {
    admin::reset_system(&state.api, confirmation)
        .map(Json)
        .map_err(reject)
}

async fn logout(Query(confirmation): Query<Confirmation>) -> HttpResult<Outcome> {
    admin::logout(confirmation).map(Json).map_err(reject)
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| ws_connection(state, socket))
}

/// Streams every store change to the socket until the client goes away.
async fn ws_connection(state: Arc<AppState>, socket: axum::extract::ws::WebSocket) {
    use axum::extract::ws::Message;
    use futures::{SinkExt, StreamExt};
    use tokio::sync::broadcast::error::RecvError;

    let (mut sender, mut receiver) = socket.split();
    let mut events_rx = state.api.store.subscribe();

    let send_task = tokio::spawn(async move {
        loop {
            let event = match events_rx.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "change feed subscriber lagged");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };
            let text = match serde_json::to_string(&event) {
                Ok(v) => v,
                Err(_) => continue,
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(_msg)) = receiver.next().await {}

    send_task.abort();
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
