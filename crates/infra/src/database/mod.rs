//! Database implementations

pub mod class_catalog_repository;
pub mod enrollment_repository;
pub mod manager;
pub mod student_repository;

pub use class_catalog_repository::*;
pub use enrollment_repository::*;
pub use manager::*;
pub use student_repository::*;
