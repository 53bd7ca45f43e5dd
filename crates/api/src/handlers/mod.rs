pub mod work_project;
