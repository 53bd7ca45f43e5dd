//! Route definitions for the `/projects` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::work_project;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /filters           -> filter_options
/// GET    /filters/options   -> filter_options
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(work_project::list).post(work_project::create))
        .route("/filters", get(work_project::filter_options))
        .route("/filters/options", get(work_project::filter_options))
        .route(
            "/{id}",
            get(work_project::get_by_id)
                .put(work_project::update)
                .delete(work_project::delete),
        )
}
