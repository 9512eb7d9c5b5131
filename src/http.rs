use crate::{
    aggregate::aggregate_roster,
    availability::{DayIndex, SlotIndex, WeekAvailability},
    backend::{AvailabilityBackend, StoreError},
    codec::encode,
    roster::{Roster, PLAYER_NAME},
    types::Record,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use validator::Validate;

type ErrorResponse = (StatusCode, String);

#[derive(Clone)]
pub struct AppState<T: AvailabilityBackend> {
    pub backend: T,
    pub roster: Roster,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
struct UpdateRequest {
    #[validate(regex(path = *PLAYER_NAME))]
    player: String,
    i1: DayIndex,
    i2: SlotIndex,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct RecordView {
    player: String,
    created_at: DateTime<Utc>,
    encoded: String,
    availability: WeekAvailability,
}

impl From<Record> for RecordView {
    fn from(record: Record) -> Self {
        Self {
            encoded: encode(&record.availability),
            player: record.player,
            created_at: record.created_at,
            availability: record.availability,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HistoryView {
    player: String,
    snapshots: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MasterView {
    players: Vec<String>,
    encoded: String,
    availability: WeekAvailability,
    day_names: Vec<String>,
    slot_times: Vec<String>,
}

pub fn create_app<T: AvailabilityBackend>(backend: T, roster: Roster) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(get_roster::<T>))
        .route("/edit/:player", get(get_player::<T>))
        .route("/history/:player", get(get_history::<T>))
        .route("/update", post(update_availability::<T>))
        .route("/manage", get(get_master::<T>))
        .with_state(AppState { backend, roster })
        .layer(cors)
}

/// Served instead of [`create_app`] when no roster could be set up.
pub fn create_error_app() -> Router {
    Router::new().fallback(not_initialised)
}

async fn not_initialised() -> ErrorResponse {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        "Scheduler is not initialised, check the roster file".to_string(),
    )
}

fn store_error(err: StoreError) -> ErrorResponse {
    error!(?err, "Availability store failed");
    let status_code = match err {
        StoreError::UnknownPlayer(_) | StoreError::EmptyHistory(_) => StatusCode::NOT_FOUND,
        StoreError::Io { .. } | StoreError::Format { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status_code, err.to_string())
}

fn ensure_on_roster<T: AvailabilityBackend>(
    state: &AppState<T>,
    player: &str,
) -> Result<(), ErrorResponse> {
    if state.roster.contains(player) {
        return Ok(());
    }
    Err((
        StatusCode::NOT_FOUND,
        format!("Player {player} is not on the roster"),
    ))
}

async fn get_roster<T: AvailabilityBackend>(State(state): State<AppState<T>>) -> Json<Roster> {
    Json(state.roster)
}

async fn get_player<T: AvailabilityBackend>(
    State(state): State<AppState<T>>,
    Path(player): Path<String>,
) -> Result<Json<RecordView>, ErrorResponse> {
    ensure_on_roster(&state, &player)?;
    let record = state.backend.load(&player).map_err(store_error)?;
    Ok(Json(record.into()))
}

async fn get_history<T: AvailabilityBackend>(
    State(state): State<AppState<T>>,
    Path(player): Path<String>,
) -> Result<Json<HistoryView>, ErrorResponse> {
    ensure_on_roster(&state, &player)?;
    let history = state.backend.history(&player).map_err(store_error)?;
    Ok(Json(HistoryView {
        player,
        snapshots: history.iter().map(encode).collect(),
    }))
}

async fn update_availability<T: AvailabilityBackend>(
    State(state): State<AppState<T>>,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<RecordView>, ErrorResponse> {
    if let Err(err) = request.validate() {
        error!(?err, "Rejected update request");
        return Err((StatusCode::BAD_REQUEST, err.to_string()));
    }
    ensure_on_roster(&state, &request.player)?;

    let record = state
        .backend
        .toggle(&request.player, request.i1, request.i2)
        .map_err(store_error)?;
    info!(
        player = %record.player,
        day = usize::from(request.i1),
        slot = usize::from(request.i2),
        busy = record.availability.busy_count(),
        "Toggled slot"
    );
    Ok(Json(record.into()))
}

async fn get_master<T: AvailabilityBackend>(
    State(state): State<AppState<T>>,
) -> Result<Json<MasterView>, ErrorResponse> {
    let master = aggregate_roster(&state.roster, &state.backend).map_err(|err| {
        error!(?err, "Failed to aggregate availability");
        (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    })?;

    Ok(Json(MasterView {
        players: state.roster.players().to_vec(),
        encoded: encode(&master),
        availability: master,
        day_names: DayIndex::all().map(|day| day.name().to_string()).collect(),
        slot_times: SlotIndex::all()
            .map(|slot| slot.start_time().format("%H:%M").to_string())
            .collect(),
    }))
}
