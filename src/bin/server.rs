use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use profile_matching_engine::{
    EngineConfig, EngineError, NewPlayer, Player, PlayerUpdate, ProfileMatchingSettings, RankedPlayer,
    RankingSummary, RecruitmentEngine, ScoreKey, SettingsUpdate,
};

#[derive(Clone)]
struct AppState {
    engine: Arc<RecruitmentEngine>,
}

/// `{ success, data?, message? }` envelope used by every endpoint
#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn data(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            message: None,
        })
    }

    fn with_message(data: T, message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        })
    }
}

#[derive(Debug, Deserialize)]
struct RankingParams {
    position: Option<String>,
    #[serde(default)]
    sort_by: ScoreKey,
}

#[derive(Debug, Deserialize)]
struct PlayerListParams {
    search: Option<String>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "profile_matching_server=debug,profile_matching_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = EngineConfig::from_env()?;

    tracing::info!("Starting profile matching server");
    tracing::info!("Database: {}", config.db_path);
    tracing::info!("Port: {}", config.port);

    let engine = RecruitmentEngine::open(&config.db_path).await?;

    let state = AppState {
        engine: Arc::new(engine),
    };

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/ranking", get(ranking_handler))
        .route("/api/ranking/summary", get(summary_handler))
        .route("/api/ranking/positions", get(positions_handler))
        .route(
            "/api/settings/profile-matching",
            get(get_settings_handler).put(update_settings_handler),
        )
        .route("/api/players", get(list_players_handler).post(create_player_handler))
        .route(
            "/api/players/:id",
            get(get_player_handler)
                .put(update_player_handler)
                .delete(delete_player_handler),
        )
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = config.bind_addr();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: profile_matching_engine::VERSION.to_string(),
    })
}

async fn ranking_handler(
    State(state): State<AppState>,
    Query(params): Query<RankingParams>,
) -> ApiResult<Vec<RankedPlayer>> {
    let mut report = state.engine.ranking_report().await?;

    if let Some(position) = params.position.as_deref() {
        report = report.filter_position(position);
    }
    if params.sort_by != ScoreKey::Total {
        report = report.sorted_by(params.sort_by);
    }

    Ok(ApiResponse::data(report.players))
}

async fn summary_handler(State(state): State<AppState>) -> ApiResult<RankingSummary> {
    let report = state.engine.ranking_report().await?;
    Ok(ApiResponse::data(report.summary()))
}

async fn positions_handler(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    let report = state.engine.ranking_report().await?;
    Ok(ApiResponse::data(report.positions()))
}

async fn get_settings_handler(State(state): State<AppState>) -> ApiResult<ProfileMatchingSettings> {
    Ok(ApiResponse::data(state.engine.get_settings().await?))
}

async fn update_settings_handler(
    State(state): State<AppState>,
    Json(update): Json<SettingsUpdate>,
) -> ApiResult<ProfileMatchingSettings> {
    tracing::debug!("Settings update: {:?}", update);
    Ok(ApiResponse::data(state.engine.update_settings(update).await?))
}

async fn list_players_handler(
    State(state): State<AppState>,
    Query(params): Query<PlayerListParams>,
) -> ApiResult<Vec<Player>> {
    let players = match params.search.as_deref() {
        Some(query) => state.engine.search_players(query).await?,
        None => state.engine.list_players().await?,
    };
    Ok(ApiResponse::data(players))
}

async fn create_player_handler(
    State(state): State<AppState>,
    Json(player): Json<NewPlayer>,
) -> ApiResult<Player> {
    let created = state.engine.create_player(player).await?;
    Ok(ApiResponse::with_message(created, "Player added successfully"))
}

async fn get_player_handler(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Player> {
    Ok(ApiResponse::data(state.engine.get_player(id).await?))
}

async fn update_player_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<PlayerUpdate>,
) -> ApiResult<Player> {
    let updated = state.engine.update_player(id, update).await?;
    Ok(ApiResponse::with_message(updated, "Player updated successfully"))
}

async fn delete_player_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.engine.delete_player(id).await?;
    Ok(Json(ApiResponse {
        success: true,
        data: None,
        message: Some("Player deleted successfully".to_string()),
    }))
}

// Error handling
struct AppError(EngineError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            EngineError::Validation(_) => StatusCode::BAD_REQUEST,
            EngineError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = self.0.to_string();

        if status.is_server_error() {
            tracing::error!("{} - {}", status, message);
        } else {
            tracing::warn!("{} - {}", status, message);
        }

        let body: ApiResponse<()> = ApiResponse {
            success: false,
            data: None,
            message: Some(message),
        };
        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<EngineError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
