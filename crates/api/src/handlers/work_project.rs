//! Handlers for the `/projects` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use worklog_core::types::DbId;
use worklog_db::models::work_project::{
    CreateWorkProject, FilterOptions, UpdateWorkProject, WorkProject,
};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::ListProjectsParams;
use crate::service::DeleteConfirmation;
use crate::state::AppState;

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateWorkProject>,
) -> AppResult<(StatusCode, Json<WorkProject>)> {
    let project = state.projects.create(&input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects?industry=&client=&tool=&start=&end=&sort=&order=
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListProjectsParams>,
) -> AppResult<Json<Vec<WorkProject>>> {
    let (filter, sort) = params.parse()?;
    let projects = state.projects.list(&filter, sort).await?;
    Ok(Json(projects))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<WorkProject>> {
    let project = state.projects.get(id).await?;
    Ok(Json(project))
}

/// PUT /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateWorkProject>,
) -> AppResult<Json<WorkProject>> {
    let project = state.projects.update(id, &input).await?;
    Ok(Json(project))
}

/// DELETE /api/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DeleteConfirmation>> {
    let confirmation = state.projects.delete(id).await?;
    Ok(Json(confirmation))
}

/// GET /api/projects/filters
pub async fn filter_options(State(state): State<AppState>) -> AppResult<Json<FilterOptions>> {
    let options = state.projects.filter_options().await?;
    Ok(Json(options))
}
