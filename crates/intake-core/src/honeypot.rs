//! Honeypot decoy-field check
//!
//! The contact form renders a hidden input that humans never fill in but
//! naive form bots do. This is the cheapest rejection in the pipeline, so it
//! runs first. Callers must surface only a generic error on rejection; the
//! reason is never revealed to the client.

/// Returns true iff the decoy field is present and non-blank after trimming.
pub fn is_bot(value: Option<&str>) -> bool {
    value.map(|v| !v.trim().is_empty()).unwrap_or(false)
}
