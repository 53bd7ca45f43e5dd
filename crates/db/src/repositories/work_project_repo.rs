//! Repository for the `work_projects` table.

use sqlx::{PgExecutor, PgPool};
use worklog_core::types::{Date, DbId};
use worklog_core::work_project::{escape_like, DistinctField, SortSpec};

use crate::models::work_project::{WorkProjectFields, WorkProject, WorkProjectFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, project_name, description, industry, start_date, end_date, \
    tools_used, role, client_organization, client_description, \
    created_at, updated_at";

/// Provides CRUD and filtered listing for work projects.
pub struct WorkProjectRepo;

impl WorkProjectRepo {
    /// Insert a new work project, returning the created row.
    ///
    /// `id`, `created_at` and `updated_at` come from column defaults.
    pub async fn create(
        pool: &PgPool,
        input: &WorkProjectFields,
    ) -> Result<WorkProject, sqlx::Error> {
        let query = format!(
            "INSERT INTO work_projects (
                project_name, description, industry, start_date, end_date,
                tools_used, role, client_organization, client_description
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkProject>(&query)
            .bind(&input.project_name)
            .bind(&input.description)
            .bind(&input.industry)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.tools_used)
            .bind(&input.role)
            .bind(&input.client_organization)
            .bind(&input.client_description)
            .fetch_one(pool)
            .await
    }

    /// Find a work project by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WorkProject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM work_projects WHERE id = $1");
        sqlx::query_as::<_, WorkProject>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a work project by its ID and lock the row until the surrounding
    /// transaction ends.
    pub async fn find_by_id_for_update<'e, E>(
        executor: E,
        id: DbId,
    ) -> Result<Option<WorkProject>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM work_projects WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, WorkProject>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List work projects matching every supplied filter, in the requested order.
    pub async fn list(
        pool: &PgPool,
        filter: &WorkProjectFilter,
        sort: SortSpec,
    ) -> Result<Vec<WorkProject>, sqlx::Error> {
        let (query, bind_values) = build_list_query(filter, sort);
        tracing::trace!(%query, binds = bind_values.len(), "Listing work projects");
        bind_filter_values(sqlx::query_as::<_, WorkProject>(&query), &bind_values)
            .fetch_all(pool)
            .await
    }

    /// Overwrite every mutable column of a work project.
    ///
    /// The `updated_at` refresh is done by the table trigger. Returns `None`
    /// if no row with the given `id` exists. Callers merging a patch onto a
    /// stored row run this in the transaction that took the row lock with
    /// [`WorkProjectRepo::find_by_id_for_update`].
    pub async fn update<'e, E>(
        executor: E,
        id: DbId,
        input: &WorkProjectFields,
    ) -> Result<Option<WorkProject>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE work_projects SET
                project_name = $2,
                description = $3,
                industry = $4,
                start_date = $5,
                end_date = $6,
                tools_used = $7,
                role = $8,
                client_organization = $9,
                client_description = $10
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkProject>(&query)
            .bind(id)
            .bind(&input.project_name)
            .bind(&input.description)
            .bind(&input.industry)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.tools_used)
            .bind(&input.role)
            .bind(&input.client_organization)
            .bind(&input.client_description)
            .fetch_optional(executor)
            .await
    }

    /// Permanently delete a work project. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM work_projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Distinct non-null, non-empty raw values of a column, sorted ascending.
    ///
    /// For `tools_used` these are whole stored strings; tokenizing them is up
    /// to the caller.
    pub async fn distinct_values(
        pool: &PgPool,
        field: DistinctField,
    ) -> Result<Vec<String>, sqlx::Error> {
        let column = field.as_column();
        let query = format!(
            "SELECT DISTINCT {column} FROM work_projects \
             WHERE {column} IS NOT NULL AND {column} <> '' \
             ORDER BY {column}"
        );
        sqlx::query_scalar::<_, String>(&query).fetch_all(pool).await
    }
}

// ---------------------------------------------------------------------------
// Query building
// ---------------------------------------------------------------------------

/// A typed bind parameter for the dynamically built listing query.
#[derive(Debug, Clone, PartialEq)]
enum BindValue {
    Text(String),
    Date(Date),
}

/// Build the listing `SELECT` and its bind values.
///
/// Filter values are always bound; only whitelisted column names and
/// directions from [`SortSpec`] are interpolated.
fn build_list_query(filter: &WorkProjectFilter, sort: SortSpec) -> (String, Vec<BindValue>) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(ref industry) = filter.industry {
        conditions.push(format!("industry = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(industry.clone()));
    }

    if let Some(ref client) = filter.client_organization {
        conditions.push(format!("client_organization = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(client.clone()));
    }

    if let Some(ref tool) = filter.tool {
        conditions.push(format!("tools_used ILIKE ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(format!("%{}%", escape_like(tool))));
    }

    if let Some(from) = filter.start_from {
        conditions.push(format!("start_date >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Date(from));
    }

    if let Some(until) = filter.end_until {
        conditions.push(format!("end_date <= ${bind_idx}"));
        bind_values.push(BindValue::Date(until));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    let column = sort.field.as_column();
    let direction = sort.direction.as_sql();
    let nulls = if sort.field.is_nullable() { " NULLS LAST" } else { "" };
    let order_clause = if column == "id" {
        format!(" ORDER BY id {direction}")
    } else {
        format!(" ORDER BY {column} {direction}{nulls}, id {direction}")
    };

    (
        format!("SELECT {COLUMNS} FROM work_projects{where_clause}{order_clause}"),
        bind_values,
    )
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_filter_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Date(v) => q = q.bind(*v),
        }
    }
    q
}
