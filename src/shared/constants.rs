// =============================================================================
// REPORT STATUS LABELS
// =============================================================================

/// Freshly submitted report, not yet a task
pub const STATUS_REPORTED: &str = "reported";

/// Published task accepting student signups
pub const STATUS_OPEN: &str = "open";

/// Task closed by an administrator
pub const STATUS_COMPLETED: &str = "completed";

// =============================================================================
// INPUT LIMITS
// =============================================================================

pub const MAX_REPORTER_NAME_CHARS: u64 = 100;
pub const MAX_LOCATION_CHARS: u64 = 200;
pub const MAX_DESCRIPTION_CHARS: u64 = 2000;

pub const MIN_STUDENT_NAME_CHARS: usize = 2;
pub const MAX_STUDENT_NAME_CHARS: usize = 100;

/// Upper bound on volunteers per task
pub const MAX_REQUIRED_STUDENTS: i32 = 1000;

/// Machine-readable codes returned in `ApiResponse::errors` for rejected requests
pub mod error_codes {
    pub const TASK_NOT_FOUND: &str = "TASK_NOT_FOUND";
    pub const TASK_NOT_PUBLISHED: &str = "TASK_NOT_PUBLISHED";
    pub const TASK_CLOSED: &str = "TASK_CLOSED";
    pub const TASK_FULL: &str = "TASK_FULL";
    pub const DUPLICATE_SIGNUP: &str = "DUPLICATE_SIGNUP";
    pub const ALREADY_PUBLISHED: &str = "ALREADY_PUBLISHED";
    pub const ALREADY_COMPLETED: &str = "ALREADY_COMPLETED";
    pub const INVALID_CAPACITY: &str = "INVALID_CAPACITY";
    pub const DUPLICATE: &str = "DUPLICATE";
    pub const BUSY: &str = "BUSY";
    pub const UNAVAILABLE: &str = "UNAVAILABLE";
    pub const TIMEOUT: &str = "TIMEOUT";
}
