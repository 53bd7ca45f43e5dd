//! Work project rules: field limits, sort specification, filter parsing,
//! date ordering and tool tokenization.

use crate::error::CoreError;
use crate::types::Date;
use crate::validation::FieldError;

/// Entity name used in not-found errors.
pub const ENTITY: &str = "Project";

// ---------------------------------------------------------------------------
// Field limits
// ---------------------------------------------------------------------------

pub const MAX_PROJECT_NAME_LENGTH: u64 = 200;
pub const MAX_DESCRIPTION_LENGTH: u64 = 2000;
pub const MAX_INDUSTRY_LENGTH: u64 = 100;
pub const MAX_TOOLS_USED_LENGTH: u64 = 500;
pub const MAX_ROLE_LENGTH: u64 = 100;
pub const MAX_CLIENT_ORGANIZATION_LENGTH: u64 = 200;
pub const MAX_CLIENT_DESCRIPTION_LENGTH: u64 = 1000;

/// Separator between tokens in `tools_used`.
pub const TOOLS_SEPARATOR: char = ',';

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Columns a listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    ProjectName,
    Industry,
    StartDate,
    EndDate,
    ClientOrganization,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub const ALL: &'static [SortField] = &[
        SortField::Id,
        SortField::ProjectName,
        SortField::Industry,
        SortField::StartDate,
        SortField::EndDate,
        SortField::ClientOrganization,
        SortField::CreatedAt,
        SortField::UpdatedAt,
    ];

    /// Column name. Only these whitelisted strings are ever interpolated
    /// into SQL.
    pub fn as_column(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::ProjectName => "project_name",
            SortField::Industry => "industry",
            SortField::StartDate => "start_date",
            SortField::EndDate => "end_date",
            SortField::ClientOrganization => "client_organization",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }

    /// Whether the column may hold NULL. Such columns sort their NULLs last
    /// in both directions.
    pub fn is_nullable(self) -> bool {
        matches!(
            self,
            SortField::Industry
                | SortField::StartDate
                | SortField::EndDate
                | SortField::ClientOrganization
        )
    }

    pub fn parse(value: &str) -> Result<Self, FieldError> {
        SortField::ALL
            .iter()
            .copied()
            .find(|f| f.as_column() == value)
            .ok_or_else(|| {
                let valid: Vec<&str> = SortField::ALL.iter().map(|f| f.as_column()).collect();
                FieldError::new(
                    "sort",
                    format!("Invalid sort field '{value}'. Must be one of: {}", valid.join(", ")),
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    /// Case-insensitive `asc` / `desc`.
    pub fn parse(value: &str) -> Result<Self, FieldError> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(FieldError::new(
                "order",
                format!("Invalid order '{value}'. Must be 'asc' or 'desc'"),
            )),
        }
    }
}

/// A (field, direction) pair. Defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

impl SortSpec {
    /// Build a sort spec from optional raw parameters.
    ///
    /// Empty strings count as absent. Both parameters are checked so a
    /// single error can name every bad one.
    pub fn parse(field: Option<&str>, order: Option<&str>) -> Result<Self, CoreError> {
        let mut errors = Vec::new();
        let mut spec = SortSpec::default();

        if let Some(raw) = non_empty(field) {
            match SortField::parse(raw) {
                Ok(f) => spec.field = f,
                Err(e) => errors.push(e),
            }
        }
        if let Some(raw) = non_empty(order) {
            match SortDirection::parse(raw) {
                Ok(d) => spec.direction = d,
                Err(e) => errors.push(e),
            }
        }

        if errors.is_empty() {
            Ok(spec)
        } else {
            Err(CoreError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// True unless both dates are present and `start` is after `end`.
pub fn dates_in_order(start: Option<Date>, end: Option<Date>) -> bool {
    match (start, end) {
        (Some(s), Some(e)) => s <= e,
        _ => true,
    }
}

/// Parse an optional `YYYY-MM-DD` parameter. Empty strings count as absent.
pub fn parse_date_param(field: &str, value: Option<&str>) -> Result<Option<Date>, FieldError> {
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => Date::parse_from_str(raw, "%Y-%m-%d").map(Some).map_err(|_| {
            FieldError::new(field, format!("Invalid date '{raw}'. Expected YYYY-MM-DD"))
        }),
    }
}

// ---------------------------------------------------------------------------
// Text helpers
// ---------------------------------------------------------------------------

/// Treat `Some("")` the same as `None`.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Split a `tools_used` value into trimmed, non-empty tokens.
pub fn split_tools(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(TOOLS_SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Escape `LIKE` metacharacters so user input matches literally.
///
/// The escape character is backslash, PostgreSQL's default for `LIKE`.
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// Distinct values
// ---------------------------------------------------------------------------

/// Fields that expose their distinct values for filter dropdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistinctField {
    Industry,
    ClientOrganization,
    ToolsUsed,
}

impl DistinctField {
    pub fn as_column(self) -> &'static str {
        match self {
            DistinctField::Industry => "industry",
            DistinctField::ClientOrganization => "client_organization",
            DistinctField::ToolsUsed => "tools_used",
        }
    }
}
