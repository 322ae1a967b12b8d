//! Authenticated request context.

use uuid::Uuid;

use railhub_entity::user::UserRole;

/// Identity attached to every authenticated request, built by the API
/// layer's auth extractor from verified JWT claims.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The authenticated user's name.
    pub username: String,
    /// The authenticated user's role.
    pub role: UserRole,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, username: String, role: UserRole) -> Self {
        Self {
            user_id,
            username,
            role,
        }
    }

    /// Whether the caller is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
