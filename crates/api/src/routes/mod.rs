pub mod health;
pub mod work_project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                       list, create
/// /projects/filters               distinct values for filter dropdowns
/// /projects/filters/options       same as /projects/filters
/// /projects/{id}                  get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/projects", work_project::router())
}
