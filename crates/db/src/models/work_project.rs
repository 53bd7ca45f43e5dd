//! Work project entity model, DTOs and listing filter.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;
use worklog_core::error::CoreError;
use worklog_core::types::{Date, DbId, Timestamp};
use worklog_core::validation::{self, validate_not_blank, FieldError};
use worklog_core::work_project::{
    dates_in_order, parse_date_param, split_tools, MAX_CLIENT_DESCRIPTION_LENGTH,
    MAX_CLIENT_ORGANIZATION_LENGTH, MAX_DESCRIPTION_LENGTH, MAX_INDUSTRY_LENGTH, MAX_PROJECT_NAME_LENGTH, MAX_ROLE_LENGTH,
    MAX_TOOLS_USED_LENGTH,
};

/// A row from the `work_projects` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct WorkProject {
    pub id: DbId,
    pub project_name: String,
    pub description: String,
    pub industry: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub tools_used: Option<String>,
    pub role: Option<String>,
    pub client_organization: Option<String>,
    pub client_description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating a work project. Also the merged field set
/// re-checked on update.
///
/// Required text fields default to empty when missing so that a missing
/// field is reported by [`CreateWorkProject::check`] alongside every other
/// violation instead of failing deserialization. Dates arrive as raw text
/// for the same reason.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct CreateWorkProject {
    #[serde(default)]
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = MAX_PROJECT_NAME_LENGTH)
    )]
    pub project_name: String,

    #[serde(default)]
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = MAX_DESCRIPTION_LENGTH)
    )]
    pub description: String,

    #[validate(length(max = MAX_INDUSTRY_LENGTH))]
    pub industry: Option<String>,

    /// `YYYY-MM-DD`; empty counts as absent.
    pub start_date: Option<String>,
    pub end_date: Option<String>,

    #[validate(length(max = MAX_TOOLS_USED_LENGTH))]
    pub tools_used: Option<String>,

    #[validate(length(max = MAX_ROLE_LENGTH))]
    pub role: Option<String>,

    #[validate(length(max = MAX_CLIENT_ORGANIZATION_LENGTH))]
    pub client_organization: Option<String>,

    #[validate(length(max = MAX_CLIENT_DESCRIPTION_LENGTH))]
    pub client_description: Option<String>,
}

impl CreateWorkProject {
    /// Run every field rule, parse both dates and check their order.
    ///
    /// Collects all violations into a single [`CoreError::Validation`],
    /// sorted by field name.
    pub fn check(&self) -> Result<WorkProjectFields, CoreError> {
        let mut errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => validation::flatten(&e),
        };

        let mut parse = |field: &str, raw: &Option<String>| {
            parse_date_param(field, raw.as_deref()).unwrap_or_else(|e| {
                errors.push(e);
                None
            })
        };
        let start_date = parse("start_date", &self.start_date);
        let end_date = parse("end_date", &self.end_date);

        if !dates_in_order(start_date, end_date) {
            errors.push(FieldError::new(
                "end_date",
                "end_date cannot be before start_date",
            ));
        }
        if !errors.is_empty() {
            errors.sort_by(|a, b| a.field.cmp(&b.field));
            return Err(CoreError::Validation(errors));
        }

        Ok(WorkProjectFields {
            project_name: self.project_name.clone(),
            description: self.description.clone(),
            industry: self.industry.clone(),
            start_date,
            end_date,
            tools_used: self.tools_used.clone(),
            role: self.role.clone(),
            client_organization: self.client_organization.clone(),
            client_description: self.client_description.clone(),
        })
    }
}

/// Checked, typed column values written by insert and update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkProjectFields {
    pub project_name: String,
    pub description: String,
    pub industry: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub tools_used: Option<String>,
    pub role: Option<String>,
    pub client_organization: Option<String>,
    pub client_description: Option<String>,
}

/// Request body for updating a work project. All fields are optional.
///
/// For nullable columns the outer `Option` says whether the field was sent
/// and the inner one carries the value, so `"industry": null` clears the
/// column while an absent `industry` keeps it. `project_name` and
/// `description` cannot be cleared; `null` leaves them unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpdateWorkProject {
    pub project_name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub industry: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub start_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub end_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub tools_used: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub role: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub client_organization: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub client_description: Option<Option<String>>,
}

/// Deserialize a present field (even `null`) as `Some(..)`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl WorkProject {
    /// Overlay a patch on this record, producing the full field set to
    /// check and write back. Stored dates are rendered as `YYYY-MM-DD`.
    pub fn merge(&self, patch: &UpdateWorkProject) -> CreateWorkProject {
        fn pick<T: Clone>(patch: &Option<Option<T>>, current: Option<T>) -> Option<T> {
            match patch {
                Some(v) => v.clone(),
                None => current,
            }
        }

        CreateWorkProject {
            project_name: patch
                .project_name
                .clone()
                .unwrap_or_else(|| self.project_name.clone()),
            description: patch
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            industry: pick(&patch.industry, self.industry.clone()),
            start_date: pick(&patch.start_date, self.start_date.map(|d| d.to_string())),
            end_date: pick(&patch.end_date, self.end_date.map(|d| d.to_string())),
            tools_used: pick(&patch.tools_used, self.tools_used.clone()),
            role: pick(&patch.role, self.role.clone()),
            client_organization: pick(&patch.client_organization, self.client_organization.clone()),
            client_description: pick(&patch.client_description, self.client_description.clone()),
        }
    }
}

/// Optional listing predicates, combined with AND.
///
/// `industry` and `client_organization` match exactly and case-sensitively;
/// `tool` is a case-insensitive substring of `tools_used`; `start_from` and
/// `end_until` are inclusive bounds on `start_date` and `end_date`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkProjectFilter {
    pub industry: Option<String>,
    pub client_organization: Option<String>,
    pub tool: Option<String>,
    pub start_from: Option<Date>,
    pub end_until: Option<Date>,
}

impl WorkProjectFilter {
    /// In-memory equivalent of the SQL predicate built by the repository.
    pub fn matches(&self, project: &WorkProject) -> bool {
        if let Some(ref industry) = self.industry {
            if project.industry.as_ref() != Some(industry) {
                return false;
            }
        }
        if let Some(ref client) = self.client_organization {
            if project.client_organization.as_ref() != Some(client) {
                return false;
            }
        }
        if let Some(ref tool) = self.tool {
            let needle = tool.to_lowercase();
            match project.tools_used {
                Some(ref tools) if tools.to_lowercase().contains(&needle) => {}
                _ => return false,
            }
        }
        if let Some(from) = self.start_from {
            if !project.start_date.is_some_and(|d| d >= from) {
                return false;
            }
        }
        if let Some(until) = self.end_until {
            if !project.end_date.is_some_and(|d| d <= until) {
                return false;
            }
        }
        true
    }
}

/// Distinct values per filterable field, for UI dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub industries: Vec<String>,
    pub clients: Vec<String>,
    pub tools: Vec<String>,
}

/// Collapse raw `tools_used` values into sorted, unique tokens.
pub fn tool_tokens<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tokens: Vec<String> = Vec::new();
    for value in values {
        tokens.extend(split_tools(value.as_ref()).map(str::to_string));
    }
    tokens.sort();
    tokens.dedup();
    tokens
}
