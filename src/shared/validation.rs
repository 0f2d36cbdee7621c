use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Characters that are not allowed to appear in a stored blob name.
    /// Anything outside ASCII letters, digits, dot, underscore and hyphen is replaced.
    pub static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r"[^A-Za-z0-9._-]").unwrap();

    /// Runs of dots, so a sanitized name can never contain ".."
    pub static ref DOT_RUNS: Regex = Regex::new(r"\.{2,}").unwrap();
}
