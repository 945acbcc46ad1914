//! The stable `code` strings from spec §6/§7, shared between `relay-server`
//! (which emits them) and any client (which may match on them).

pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const INVALID_ACTION: &str = "INVALID_ACTION";
pub const INVALID_REGISTRATION_SECRET: &str = "INVALID_REGISTRATION_SECRET";
pub const AGENT_EXISTS: &str = "AGENT_EXISTS";
pub const MISSING_AUTH: &str = "MISSING_AUTH";
pub const INVALID_AUTH: &str = "INVALID_AUTH";
pub const BANNED: &str = "BANNED";
pub const RATE_LIMITED: &str = "RATE_LIMITED";
pub const SOFT_BANNED: &str = "SOFT_BANNED";
pub const STATE_UNAVAILABLE: &str = "STATE_UNAVAILABLE";
pub const AUTH_FAILED: &str = "AUTH_FAILED";
pub const AUTH_REQUIRED: &str = "AUTH_REQUIRED";
pub const NOT_SUPPORTED: &str = "NOT_SUPPORTED";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
