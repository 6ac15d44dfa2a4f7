use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Response,
};
use config_store::ConfigPath;
use serde::Deserialize;
use tracing::instrument;

use crate::{core::app_state::AppState, error_handler::AppResult, routes::configs::respond};

#[derive(Debug, Deserialize)]
pub struct EnvironmentPath {
    pub repo: String,
    pub app: String,
    pub environment: String,
}

/// `GET /configs/{repo}/{app}/{environment}`: one environment record.
#[instrument(
    name = "environment_config_route",
    skip(state, p),
    fields(
        source = %state.config.config_path.display(),
        repo = %p.repo,
        app = %p.app,
        environment = %p.environment
    )
)]
pub async fn environment_config_route(
    State(state): State<Arc<AppState>>,
    Path(p): Path<EnvironmentPath>,
) -> AppResult<Response> {
    respond(
        &state,
        ConfigPath::environment(&p.repo, &p.app, &p.environment),
    )
}
