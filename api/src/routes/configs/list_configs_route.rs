use std::sync::Arc;

use axum::{extract::State, response::Response};
use config_store::ConfigPath;
use tracing::instrument;

use crate::{core::app_state::AppState, error_handler::AppResult, routes::configs::respond};

/// `GET /configs`: the whole configuration document.
#[instrument(
    name = "list_configs_route",
    skip(state),
    fields(source = %state.config.config_path.display())
)]
pub async fn list_configs_route(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    respond(&state, ConfigPath::root())
}
