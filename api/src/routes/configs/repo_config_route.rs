use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Response,
};
use config_store::ConfigPath;
use tracing::instrument;

use crate::{core::app_state::AppState, error_handler::AppResult, routes::configs::respond};

/// `GET /configs/{repo}`.
///
/// There is no repository-scoped response, so this answers 404 even for a
/// repository that exists. Clients must ask for a full
/// `{repo}/{app}/{environment}` path.
#[instrument(
    name = "repo_config_route",
    skip(state),
    fields(source = %state.config.config_path.display())
)]
pub async fn repo_config_route(
    State(state): State<Arc<AppState>>,
    Path(repo): Path<String>,
) -> AppResult<Response> {
    respond(&state, ConfigPath::repository(&repo))
}
