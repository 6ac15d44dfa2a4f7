pub mod environment_config_route;
pub mod list_configs_route;
pub mod repo_config_route;

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use config_store::ConfigPath;
use tracing::{info, warn};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
};

/// Resolve `path` against the shared store and render the hit as bare JSON.
fn respond(state: &AppState, path: ConfigPath<'_>) -> AppResult<Response> {
    match state.store.resolve(&path) {
        Ok(resolution) => {
            info!(%path, "configuration served");
            Ok(Json(resolution).into_response())
        }
        Err(err) => {
            warn!(%path, reason = %err, "configuration lookup missed");
            Err(AppError::from(err))
        }
    }
}
