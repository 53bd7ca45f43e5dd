//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod work_project_repo;

pub use work_project_repo::WorkProjectRepo;
