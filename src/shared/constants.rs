use uuid::Uuid;

/// Default number of tickets returned by a search
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Seeded id of the regular user role
pub const ROLE_USER_ID: Uuid = Uuid::from_u128(1);

/// Seeded id of the admin role - may manage any comment, attachment or ticket
pub const ROLE_ADMIN_ID: Uuid = Uuid::from_u128(2);

