use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use crate::authz::Role;
use crate::userdb::errors::PrincipalError;

/// Account standing of a principal
///
/// Only `Active` principals may hold a valid session; the other states
/// exist for the registration/approval workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalStatus {
    Active,
    Inactive,
    Pending,
    Rejected,
}

impl PrincipalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalStatus::Active => "active",
            PrincipalStatus::Inactive => "inactive",
            PrincipalStatus::Pending => "pending",
            PrincipalStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for PrincipalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrincipalStatus {
    type Err = PrincipalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(PrincipalStatus::Active),
            "inactive" => Ok(PrincipalStatus::Inactive),
            "pending" => Ok(PrincipalStatus::Pending),
            "rejected" => Ok(PrincipalStatus::Rejected),
            other => Err(PrincipalError::InvalidData(format!(
                "Unknown principal status: {other}"
            ))),
        }
    }
}

/// The authenticated identity behind a request
///
/// Resolved from the directory at login after the credential verifier
/// (external to this crate) has accepted the submitted secret. Role and
/// department are snapshotted into the session at that point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Principal {
    /// Unique principal identifier
    pub id: String,
    /// Account name or login identifier
    pub account: String,
    /// Display name
    pub label: String,
    /// Permission tier
    pub role: Role,
    /// Organizational unit; absent only for SuperAdmin (where it is ignored)
    pub department_id: Option<String>,
    /// Account standing
    pub status: PrincipalStatus,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl Principal {
    pub fn new(
        id: String,
        account: String,
        label: String,
        role: Role,
        department_id: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            account,
            label,
            role,
            department_id,
            status: PrincipalStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == PrincipalStatus::Active
    }
}

/// Raw database row; role and status live as TEXT and are parsed on read
#[derive(Debug, FromRow)]
pub(super) struct PrincipalRow {
    pub(super) id: String,
    pub(super) account: String,
    pub(super) label: String,
    pub(super) role: String,
    pub(super) department_id: Option<String>,
    pub(super) status: String,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

impl TryFrom<PrincipalRow> for Principal {
    type Error = PrincipalError;

    fn try_from(row: PrincipalRow) -> Result<Self, Self::Error> {
        Ok(Principal {
            id: row.id,
            account: row.account,
            label: row.label,
            role: row.role.parse()?,
            department_id: row.department_id,
            status: row.status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
