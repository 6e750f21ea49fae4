//! Role and Permission Model
//!
//! Roles and permissions are closed enums. Role identifiers arriving as
//! text (JWT claims, stored documents, query parameters) are parsed
//! case-insensitively at the boundary; an unrecognized identifier is a
//! parse error, never a silent fallback to some default role.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capability tier of an account. Fixed set, not extensible at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Supervisor,
    Executive,
    Organizer,
    Sponsor,
}

impl Role {
    /// All roles, in privilege order.
    pub const ALL: [Role; 6] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::Supervisor,
        Role::Executive,
        Role::Organizer,
        Role::Sponsor,
    ];

    /// Stable wire identifier for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Supervisor => "supervisor",
            Role::Executive => "executive",
            Role::Organizer => "organizer",
            Role::Sponsor => "sponsor",
        }
    }

    /// Roles an account may pick for itself at sign-up.
    /// Everything else is assigned by an administrator.
    pub fn self_assignable(&self) -> bool {
        matches!(self, Role::Organizer | Role::Sponsor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role identifier is not one of the known six.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Case-insensitive parse: `"ADMIN"`, `"Admin"` and `"admin"` are
    /// the same role.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "super_admin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "supervisor" => Ok(Role::Supervisor),
            "executive" => Ok(Role::Executive),
            "organizer" => Ok(Role::Organizer),
            "sponsor" => Ok(Role::Sponsor),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// A named, fine-grained capability a role may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Platform-wide configuration.
    ManageSystem,
    /// Create accounts on behalf of others.
    AddUser,
    /// List and inspect user profiles.
    ViewUsers,
    /// Change roles, grants and activation status.
    ManageUsers,
    /// View sponsorship enquiries.
    ViewServiceRequests,
    /// Transition enquiry status and record responses.
    RespondEnquiries,
    /// Submit sponsorship enquiries.
    SubmitEnquiries,
    /// Browse events and packages.
    ViewEvents,
    /// Manage careers postings.
    ManageCareers,
    /// Manage platform content.
    ManageContent,
    /// Edit entries the account itself created.
    EditOwnEntries,
    /// Blanket permission: implies every other permission.
    FullAccessAllModules,
}

impl Permission {
    /// Every concrete permission, blanket included.
    pub const ALL: [Permission; 12] = [
        Permission::ManageSystem,
        Permission::AddUser,
        Permission::ViewUsers,
        Permission::ManageUsers,
        Permission::ViewServiceRequests,
        Permission::RespondEnquiries,
        Permission::SubmitEnquiries,
        Permission::ViewEvents,
        Permission::ManageCareers,
        Permission::ManageContent,
        Permission::EditOwnEntries,
        Permission::FullAccessAllModules,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ManageSystem => "manage_system",
            Permission::AddUser => "add_user",
            Permission::ViewUsers => "view_users",
            Permission::ManageUsers => "manage_users",
            Permission::ViewServiceRequests => "view_service_requests",
            Permission::RespondEnquiries => "respond_enquiries",
            Permission::SubmitEnquiries => "submit_enquiries",
            Permission::ViewEvents => "view_events",
            Permission::ManageCareers => "manage_careers",
            Permission::ManageContent => "manage_content",
            Permission::EditOwnEntries => "edit_own_entries",
            Permission::FullAccessAllModules => "full_access_all_modules",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission: {0}")]
pub struct UnknownPermission(pub String);

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .iter()
            .find(|p| p.as_str() == s.to_ascii_lowercase())
            .copied()
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_is_case_insensitive() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("Super_Admin".parse::<Role>().unwrap(), Role::SuperAdmin);
        assert_eq!("sponsor".parse::<Role>().unwrap(), Role::Sponsor);
    }

    #[test]
    fn unknown_role_is_rejected_not_defaulted() {
        let err = "moderator".parse::<Role>().unwrap_err();
        assert_eq!(err, UnknownRole("moderator".to_string()));
    }

    #[test]
    fn role_round_trips_through_serde() {
        let json = serde_json::to_string(&Role::SuperAdmin).unwrap();
        assert_eq!(json, "\"super_admin\"");
        let back: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Role::SuperAdmin);
    }

    #[test]
    fn permission_parse_matches_wire_names() {
        for p in Permission::ALL {
            assert_eq!(p.as_str().parse::<Permission>().unwrap(), p);
        }
        assert!("fly_to_the_moon".parse::<Permission>().is_err());
    }
}
