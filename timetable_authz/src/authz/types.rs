use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::userdb::PrincipalError;

/// Permission tier of a principal
///
/// Exactly one role per principal; roles are not combinable. The enum is
/// closed so that adding a role forces every allow-list and match arm to be
/// revisited by the compiler instead of silently defaulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Faculty,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Faculty => "faculty",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = PrincipalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "faculty" => Ok(Role::Faculty),
            "admin" => Ok(Role::Admin),
            "super_admin" => Ok(Role::SuperAdmin),
            other => Err(PrincipalError::InvalidData(format!(
                "Unknown role: {other}"
            ))),
        }
    }
}

/// Outcome of a role authority evaluation
///
/// Computed per request, never persisted. The two denial kinds carry
/// different security-monitoring significance even though both end in a
/// redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allowed,
    DeniedUnauthenticated,
    DeniedWrongRole,
}

/// Data-visibility constraint derived from a session's role and department
///
/// A value describing what to restrict, not a query fragment; callers
/// translate it into their storage layer's native predicate. `MatchNothing`
/// is the explicit fail-closed result for a principal that should be
/// department-scoped but has no department assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepartmentFilter {
    /// No department constraint; only ever produced for SuperAdmin
    Unrestricted,
    /// Visible rows are those matching this department id
    RestrictedTo(String),
    /// No row is visible; produced for a misconfigured principal
    MatchNothing,
}

impl DepartmentFilter {
    /// Whether a row belonging to `department_id` passes this filter
    pub fn matches(&self, department_id: &str) -> bool {
        match self {
            DepartmentFilter::Unrestricted => true,
            DepartmentFilter::RestrictedTo(d) => d == department_id,
            DepartmentFilter::MatchNothing => false,
        }
    }

    /// The `{unrestricted, departmentId}` wire contract for query builders
    ///
    /// `(false, None)` means "match nothing", never "match all".
    pub fn as_contract(&self) -> (bool, Option<&str>) {
        match self {
            DepartmentFilter::Unrestricted => (true, None),
            DepartmentFilter::RestrictedTo(d) => (false, Some(d.as_str())),
            DepartmentFilter::MatchNothing => (false, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Student, Role::Faculty, Role::Admin, Role::SuperAdmin] {
            let parsed: Role = role.as_str().parse().expect("Failed to parse role");
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_role_unknown_string_is_rejected() {
        let result = "registrar".parse::<Role>();
        assert!(matches!(result, Err(PrincipalError::InvalidData(_))));
    }

    #[test]
    fn test_filter_matches() {
        assert!(DepartmentFilter::Unrestricted.matches("7"));
        assert!(DepartmentFilter::RestrictedTo("7".to_string()).matches("7"));
        assert!(!DepartmentFilter::RestrictedTo("7".to_string()).matches("8"));
        assert!(!DepartmentFilter::MatchNothing.matches("7"));
    }

    #[test]
    fn test_filter_contract() {
        assert_eq!(DepartmentFilter::Unrestricted.as_contract(), (true, None));
        assert_eq!(
            DepartmentFilter::RestrictedTo("7".to_string()).as_contract(),
            (false, Some("7"))
        );
        // (false, None) must be read as "match nothing"
        assert_eq!(DepartmentFilter::MatchNothing.as_contract(), (false, None));
    }
}
