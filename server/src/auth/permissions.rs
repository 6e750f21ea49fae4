//! Role → permission table
//!
//! Permissions are declarative data: adding a capability to a role is a
//! table edit, not a code change. The table is built once at startup and
//! injected through server state, so tests can substitute alternate
//! tables without global-state tricks.
//!
//! The blanket `full_access_all_modules` permission is expanded eagerly
//! at construction into the complete permission set. Runtime checks are
//! plain set membership; there is no special-cased branch to keep in sync
//! when a new permission is added.

use std::collections::{HashMap, HashSet};

use sponsorhub_shared::models::{Permission, Role};

/// Immutable role → permission mapping.
#[derive(Debug, Clone)]
pub struct RoleTable {
    grants: HashMap<Role, HashSet<Permission>>,
    empty: HashSet<Permission>,
}

impl RoleTable {
    pub fn builder() -> RoleTableBuilder {
        RoleTableBuilder {
            grants: HashMap::new(),
        }
    }

    /// The platform's six-role table.
    pub fn platform_default() -> Self {
        use Permission::*;
        Self::builder()
            .role(Role::SuperAdmin, [FullAccessAllModules])
            .role(
                Role::Admin,
                [
                    ManageSystem,
                    AddUser,
                    ViewUsers,
                    ManageUsers,
                    ViewServiceRequests,
                    RespondEnquiries,
                    ViewEvents,
                    ManageCareers,
                    ManageContent,
                ],
            )
            .role(
                Role::Supervisor,
                [ViewUsers, ViewServiceRequests, ViewEvents, ManageContent],
            )
            .role(
                Role::Executive,
                [ViewServiceRequests, ViewEvents, EditOwnEntries],
            )
            .role(
                Role::Organizer,
                [
                    ViewEvents,
                    ViewServiceRequests,
                    RespondEnquiries,
                    EditOwnEntries,
                ],
            )
            .role(Role::Sponsor, [ViewEvents, SubmitEnquiries, EditOwnEntries])
            .build()
    }

    /// Permission set of a known role.
    pub fn permissions_for_role(&self, role: Role) -> &HashSet<Permission> {
        self.grants.get(&role).unwrap_or(&self.empty)
    }

    /// Permission set for an untrusted role identifier. Unknown roles get
    /// the empty set: silent denial, no error path.
    pub fn permissions_for(&self, role: &str) -> &HashSet<Permission> {
        match role.parse::<Role>() {
            Ok(r) => self.permissions_for_role(r),
            Err(_) => &self.empty,
        }
    }

    pub fn role_has(&self, role: Role, permission: Permission) -> bool {
        self.permissions_for_role(role).contains(&permission)
    }

    /// Case-insensitive on the role argument; `false` for anything the
    /// table does not know. Callers must treat `false` as deny.
    pub fn has_permission(&self, role: &str, permission: Permission) -> bool {
        self.permissions_for(role).contains(&permission)
    }
}

impl Default for RoleTable {
    fn default() -> Self {
        Self::platform_default()
    }
}

pub struct RoleTableBuilder {
    grants: HashMap<Role, HashSet<Permission>>,
}

impl RoleTableBuilder {
    /// Assign a role's permission set. A set containing the blanket
    /// permission is expanded to every permission right here.
    pub fn role(mut self, role: Role, permissions: impl IntoIterator<Item = Permission>) -> Self {
        let mut set: HashSet<Permission> = permissions.into_iter().collect();
        if set.contains(&Permission::FullAccessAllModules) {
            set = Permission::ALL.into_iter().collect();
        }
        self.grants.insert(role, set);
        self
    }

    pub fn build(self) -> RoleTable {
        RoleTable {
            grants: self.grants,
            empty: HashSet::new(),
        }
    }
}

/// Case-insensitive allow-list membership, independent of the permission
/// table. Used for the simple route gates ("admin or super_admin only").
pub fn is_one_of(role: &str, allowed: &[Role]) -> bool {
    match role.parse::<Role>() {
        Ok(r) => allowed.contains(&r),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_role_gets_empty_set_and_denial() {
        let table = RoleTable::platform_default();
        assert!(table.permissions_for("moderator").is_empty());
        for p in Permission::ALL {
            assert!(!table.has_permission("moderator", p));
        }
    }

    #[test]
    fn blanket_permission_implies_everything() {
        let table = RoleTable::platform_default();
        for p in Permission::ALL {
            assert!(
                table.has_permission("super_admin", p),
                "super_admin missing {p}"
            );
        }
    }

    #[test]
    fn role_argument_is_case_insensitive() {
        let table = RoleTable::platform_default();
        assert_eq!(
            table.has_permission("ADMIN", Permission::AddUser),
            table.has_permission("admin", Permission::AddUser)
        );
        assert!(table.has_permission("Admin", Permission::ManageUsers));
    }

    #[test]
    fn plain_roles_only_hold_their_listed_permissions() {
        let table = RoleTable::platform_default();
        assert!(table.has_permission("sponsor", Permission::SubmitEnquiries));
        assert!(!table.has_permission("sponsor", Permission::ManageUsers));
        assert!(table.has_permission("organizer", Permission::RespondEnquiries));
        assert!(!table.has_permission("organizer", Permission::SubmitEnquiries));
    }

    #[test]
    fn is_one_of_matches_allow_list_case_insensitively() {
        let allowed = [Role::Admin, Role::SuperAdmin];
        assert!(is_one_of("ADMIN", &allowed));
        assert!(is_one_of("super_admin", &allowed));
        assert!(!is_one_of("sponsor", &allowed));
        assert!(!is_one_of("janitor", &allowed));
    }

    #[test]
    fn custom_table_substitutes_cleanly() {
        let table = RoleTable::builder()
            .role(Role::Sponsor, [Permission::FullAccessAllModules])
            .build();
        // Blanket expansion applies regardless of which role carries it
        assert!(table.has_permission("sponsor", Permission::ManageSystem));
        // Roles missing from the custom table deny
        assert!(!table.has_permission("admin", Permission::ViewEvents));
    }
}
