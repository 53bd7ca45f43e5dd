//! Domain types and pure validation logic for work project records.
//!
//! Nothing in this crate touches the database or HTTP; the `db` and `api`
//! crates build on these rules.

pub mod error;
pub mod types;
pub mod validation;
pub mod work_project;
