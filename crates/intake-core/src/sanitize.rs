//! Free-text sanitization
//!
//! Submissions are rendered back later in the admin dashboard, so free-text
//! fields are scrubbed of the common injection patterns before they reach a
//! persisted row. This is best-effort pattern stripping, not an HTML
//! parser; heavily obfuscated payloads can survive it.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Script blocks go first so their payload text is removed along with
    // the tags; the generic tag pass below would otherwise leave the
    // script body behind as plain text.
    static ref SCRIPT_BLOCK: Regex = Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap();
    static ref TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref EVENT_ATTR: Regex =
        Regex::new(r#"(?i)\bon\w+\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+)"#).unwrap();
    static ref URI_SCHEME: Regex = Regex::new(r"(?i)(?:javascript|data)\s*:").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Strip markup, script, event-handler, and URI-scheme payloads from a
/// free-text field, collapse whitespace runs, and trim.
pub fn clean_text(input: &str) -> String {
    let cleaned = SCRIPT_BLOCK.replace_all(input, "");
    let cleaned = TAG.replace_all(&cleaned, "");
    let cleaned = EVENT_ATTR.replace_all(&cleaned, "");
    let cleaned = URI_SCHEME.replace_all(&cleaned, "");
    let cleaned = WHITESPACE_RUN.replace_all(&cleaned, " ");
    cleaned.trim().to_string()
}
