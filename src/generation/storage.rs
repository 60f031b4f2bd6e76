//! Storage reference resolution.
//!
//! Input images may be given as internal TOS storage URIs (`tos://bucket/key`)
//! which the remote operator cannot fetch. This module rewrites them into
//! plain HTTPS URLs for the configured region. Anything that is not a storage
//! URI passes through unchanged.

use crate::error::{Result, SkapeError};

/// Scheme prefix of internal storage references.
pub const STORAGE_SCHEME: &str = "tos://";

/// Resolve a media reference into a fetchable URL.
///
/// `tos://bucket/key` becomes `https://{bucket}.tos-{region}.volces.com/{key}`.
/// The first `/` after the scheme separates bucket from key; the key itself
/// may contain further slashes. Non-storage references are returned as-is.
pub fn resolve_reference(reference: &str, region: &str) -> Result<String> {
    let Some(rest) = reference.strip_prefix(STORAGE_SCHEME) else {
        return Ok(reference.to_string());
    };

    match rest.split_once('/') {
        Some((bucket, key)) if !bucket.is_empty() && !key.is_empty() => {
            Ok(format!("https://{bucket}.tos-{region}.volces.com/{key}"))
        }
        _ => Err(SkapeError::MalformedReference(reference.to_string())),
    }
}
