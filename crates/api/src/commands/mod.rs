//! Commands exposed by the application layer

pub mod enrollment_sync;
pub mod health;
pub mod student_status;

pub use enrollment_sync::{
    apply_class_name_fixes, delete_enrollments, parse_enrollment_ref, scan_class_mismatches,
};
pub use health::get_app_health;
pub use student_status::{set_enrollment_holds, sync_all_students, sync_student_status};
