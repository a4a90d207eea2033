mod department;
mod errors;
mod role;
mod types;


pub use department::{can_access_department, department_filter, require_department_access};
pub use errors::AuthFailure;
pub use role::{evaluate_role, has_role, is_admin, is_faculty, is_student, require_role};
pub use types::{AccessDecision, DepartmentFilter, Role};
