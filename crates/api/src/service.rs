//! Record service for work projects.
//!
//! Sits between the HTTP handlers and [`WorkProjectRepo`]: validates input,
//! merges partial updates and turns missing rows into
//! [`CoreError::NotFound`]. The pool handle is injected at construction;
//! connections are checked out per query and returned on drop.

use serde::Serialize;
use worklog_core::error::CoreError;
use worklog_core::types::DbId;
use worklog_core::work_project::{DistinctField, SortSpec, ENTITY};
use worklog_db::models::work_project::{
    tool_tokens, CreateWorkProject, FilterOptions, UpdateWorkProject, WorkProject,
    WorkProjectFilter,
};
use worklog_db::repositories::WorkProjectRepo;
use worklog_db::DbPool;

use crate::error::AppResult;

/// Confirmation returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteConfirmation {
    pub id: DbId,
    pub message: String,
}

#[derive(Clone)]
pub struct WorkProjectService {
    pool: DbPool,
}

impl WorkProjectService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Validate and persist a new record.
    pub async fn create(&self, input: &CreateWorkProject) -> AppResult<WorkProject> {
        let fields = input.check()?;
        let project = WorkProjectRepo::create(&self.pool, &fields).await?;
        tracing::info!(id = project.id, name = %project.project_name, "Work project created");
        Ok(project)
    }

    pub async fn get(&self, id: DbId) -> AppResult<WorkProject> {
        WorkProjectRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| not_found(id).into())
    }

    pub async fn list(
        &self,
        filter: &WorkProjectFilter,
        sort: SortSpec,
    ) -> AppResult<Vec<WorkProject>> {
        let projects = WorkProjectRepo::list(&self.pool, filter, sort).await?;
        tracing::debug!(count = projects.len(), ?filter, ?sort, "Listed work projects");
        Ok(projects)
    }

    /// Merge `patch` onto the stored record, re-validate, and write it back.
    ///
    /// The row stays locked from the read to the write, so concurrent
    /// patches to the same record apply one after the other and neither
    /// loses the other's fields. Nothing is written when validation fails.
    pub async fn update(&self, id: DbId, patch: &UpdateWorkProject) -> AppResult<WorkProject> {
        let mut tx = self.pool.begin().await?;

        let current = WorkProjectRepo::find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        let fields = current.merge(patch).check()?;

        let project = WorkProjectRepo::update(&mut *tx, id, &fields)
            .await?
            .ok_or_else(|| not_found(id))?;
        tx.commit().await?;

        tracing::info!(id, "Work project updated");
        Ok(project)
    }

    /// Permanently remove a record.
    pub async fn delete(&self, id: DbId) -> AppResult<DeleteConfirmation> {
        if !WorkProjectRepo::delete(&self.pool, id).await? {
            return Err(not_found(id).into());
        }
        tracing::info!(id, "Work project deleted");
        Ok(DeleteConfirmation {
            id,
            message: format!("Project {id} deleted successfully"),
        })
    }

    /// Sorted distinct values of a filterable field.
    ///
    /// `tools_used` is split into its comma-separated tokens.
    pub async fn distinct_values(&self, field: DistinctField) -> AppResult<Vec<String>> {
        let values = WorkProjectRepo::distinct_values(&self.pool, field).await?;
        Ok(match field {
            DistinctField::ToolsUsed => tool_tokens(&values),
            DistinctField::Industry | DistinctField::ClientOrganization => values,
        })
    }

    /// Distinct values for every filter dropdown.
    pub async fn filter_options(&self) -> AppResult<FilterOptions> {
        Ok(FilterOptions {
            industries: self.distinct_values(DistinctField::Industry).await?,
            clients: self.distinct_values(DistinctField::ClientOrganization).await?,
            tools: self.distinct_values(DistinctField::ToolsUsed).await?,
        })
    }
}

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: ENTITY, id }
}
