//! Well-known role name constants.
//!
//! These must match the seed data in `20260301000001_create_users.sql`.

pub const ROLE_STUDENT: &str = "student";
pub const ROLE_TEACHER: &str = "teacher";
pub const ROLE_ADMIN: &str = "admin";

/// Whether a freshly created reservation skips the approval queue.
///
/// Teachers and admins book directly into Approved; students start Pending.
pub fn auto_approves(role: &str) -> bool {
    role == ROLE_TEACHER || role == ROLE_ADMIN
}

/// Whether this role may approve or reject pending reservations.
pub fn can_decide(role: &str) -> bool {
    role == ROLE_TEACHER || role == ROLE_ADMIN
}
