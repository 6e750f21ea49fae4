//! Authentication and authorization
//!
//! JWT token service, the axum auth middleware/extractor, and the role →
//! permission table the gates check against.

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod permissions;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_permission, require_role};
pub use password::{hash_password, verify_password};
pub use permissions::{RoleTable, RoleTableBuilder, is_one_of};
