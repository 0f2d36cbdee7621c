/// Upper bound accepted for a record's age
pub const MAX_AGE: i32 = 150;

/// Name used for an upload whose original filename sanitizes to nothing
pub const FALLBACK_FILENAME: &str = "file";

/// Content type assumed when the multipart part carries none
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
