//! Blob naming helpers shared by every storage backend.

use chrono::Utc;
use uuid::Uuid;

use crate::shared::constants::FALLBACK_FILENAME;
use crate::shared::validation::{DOT_RUNS, UNSAFE_FILENAME_CHARS};

const RANDOM_SUFFIX_RANGE: u128 = 1_000_000_000;

/// Build `{unix_millis}-{random}-{sanitized original name}`.
pub fn unique_filename(original_filename: &str) -> String {
    let timestamp = Utc::now().timestamp_millis();
    let random = Uuid::new_v4().as_u128() % RANDOM_SUFFIX_RANGE;
    format!(
        "{}-{}-{}",
        timestamp,
        random,
        sanitize_filename(original_filename)
    )
}

/// Reduce a client-supplied filename to a safe single path component.
pub fn sanitize_filename(original_filename: &str) -> String {
    let base = original_filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let replaced = UNSAFE_FILENAME_CHARS.replace_all(base, "_");
    let collapsed = DOT_RUNS.replace_all(&replaced, ".");
    let cleaned = collapsed.trim_matches('.');

    if cleaned.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// The object key a stored URL refers to: its last path segment, without
/// query string or fragment.
pub fn key_from_url(file_url: &str) -> Option<&str> {
    let without_query = file_url
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    without_query
        .rsplit('/')
        .next()
        .filter(|key| !key.is_empty())
}
