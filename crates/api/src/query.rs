//! Query parameter types for API handlers.

use serde::Deserialize;
use worklog_core::error::CoreError;
use worklog_core::work_project::{dates_in_order, non_empty, parse_date_param, SortSpec};
use worklog_core::validation::FieldError;
use worklog_db::models::work_project::WorkProjectFilter;

/// Query parameters for `GET /api/projects`.
///
/// Everything arrives as raw text so malformed values can be reported per
/// field. Empty values count as absent. The aliases keep older clients
/// (`?tools=&start_after=&end_before=&sort_by=`) working.
#[derive(Debug, Default, Deserialize)]
pub struct ListProjectsParams {
    pub industry: Option<String>,
    pub client: Option<String>,
    #[serde(alias = "tools")]
    pub tool: Option<String>,
    #[serde(alias = "start_after")]
    pub start: Option<String>,
    #[serde(alias = "end_before")]
    pub end: Option<String>,
    #[serde(alias = "sort_by")]
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl ListProjectsParams {
    /// Convert into a typed filter and sort spec, reporting every bad
    /// parameter at once.
    pub fn parse(&self) -> Result<(WorkProjectFilter, SortSpec), CoreError> {
        let mut errors: Vec<FieldError> = Vec::new();

        let start = parse_date_param("start", self.start.as_deref()).unwrap_or_else(|e| {
            errors.push(e);
            None
        });
        let end = parse_date_param("end", self.end.as_deref()).unwrap_or_else(|e| {
            errors.push(e);
            None
        });
        if !dates_in_order(start, end) {
            errors.push(FieldError::new("end", "end must not be before start"));
        }

        let sort = match SortSpec::parse(self.sort.as_deref(), self.order.as_deref()) {
            Ok(sort) => sort,
            Err(CoreError::Validation(sort_errors)) => {
                errors.extend(sort_errors);
                SortSpec::default()
            }
            Err(other) => return Err(other),
        };

        if !errors.is_empty() {
            return Err(CoreError::Validation(errors));
        }

        let filter = WorkProjectFilter {
            industry: owned(&self.industry),
            client_organization: owned(&self.client),
            tool: owned(&self.tool),
            start_from: start,
            end_until: end,
        };
        Ok((filter, sort))
    }
}

fn owned(value: &Option<String>) -> Option<String> {
    non_empty(value.as_deref()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use worklog_core::work_project::{SortDirection, SortField};

    use super::*;

    fn params(query: &str) -> ListProjectsParams {
        serde_json::from_value(
            serde_json::Value::Object(
                query
                    .split('&')
                    .filter(|pair| !pair.is_empty())
                    .map(|pair| {
                        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                        (k.to_string(), serde_json::Value::String(v.to_string()))
                    })
                    .collect(),
            ),
        )
        .unwrap()
    }

    #[test]
    fn empty_query_gives_default_listing() {
        let (filter, sort) = params("").parse().unwrap();
        assert_eq!(filter, WorkProjectFilter::default());
        assert_eq!(sort, SortSpec::default());
    }

    #[test]
    fn empty_values_are_ignored() {
        let (filter, _) = params("industry=&client=&tool=&start=&end=").parse().unwrap();
        assert_eq!(filter, WorkProjectFilter::default());
    }

    #[test]
    fn all_filters_parse() {
        let (filter, sort) = params(
            "industry=Energy&client=CleanEcon&tool=SQL&start=2024-01-01&end=2024-12-31&sort=project_name&order=asc",
        )
        .parse()
        .unwrap();
        assert_eq!(filter.industry.as_deref(), Some("Energy"));
        assert_eq!(filter.client_organization.as_deref(), Some("CleanEcon"));
        assert_eq!(filter.tool.as_deref(), Some("SQL"));
        assert!(filter.start_from.is_some());
        assert!(filter.end_until.is_some());
        assert_eq!(sort.field, SortField::ProjectName);
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn legacy_aliases_accepted() {
        let (filter, sort) =
            params("tools=React&start_after=2024-01-01&end_before=2024-02-01&sort_by=end_date")
                .parse()
                .unwrap();
        assert_eq!(filter.tool.as_deref(), Some("React"));
        assert!(filter.start_from.is_some());
        assert!(filter.end_until.is_some());
        assert_eq!(sort.field, SortField::EndDate);
    }

    #[test]
    fn every_bad_parameter_reported() {
        let err = params("start=yesterday&end=2024-13-01&sort=nope&order=up")
            .parse()
            .unwrap_err();
        let CoreError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        let names: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(names, vec!["start", "end", "sort", "order"]);
    }

    #[test]
    fn inverted_range_rejected() {
        let err = params("start=2024-06-01&end=2024-01-01").parse().unwrap_err();
        assert_matches!(err, CoreError::Validation(ref f) if f[0].field == "end");
    }
}
