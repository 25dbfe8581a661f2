//! Application-wide constants

pub const SERVICE_NAME: &str = "tenant-service";

/// Call-scoped metadata header carrying the tenant identifier to the identity service.
pub const TENANT_ID_HEADER: &str = "x-tenant-id";

/// Secret key holding the database connection string.
pub const DATABASE_URL_SECRET: &str = "database_url";

pub const DEFAULT_IDENTITY_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REMOTE_DEADLINE_SECS: u64 = 15;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
