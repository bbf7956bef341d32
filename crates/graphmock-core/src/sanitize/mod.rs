//! Request URL sanitization.
//!
//! Turns a concrete Graph request URL (live identifiers, search terms, filter
//! expressions) into a generalized template URL safe to use as a
//! cache/mock-matching key: variable data is masked, structural shape is
//! kept. Best-effort by design: unrecognized input lands in explicit
//! `<unknown>` masks rather than failing; only a URL that cannot be
//! decomposed at all (or adversarial nesting) is reported as an error.

mod expand;
mod filter;
mod options;
mod parse;
mod path;
mod patterns;
mod query;
mod search;
mod token;

pub use parse::{parse_sample_url, ParsedUrl};

use thiserror::Error;

/// Upper bound on nested query-option groups (`$filter`/`$search`/`$expand`
/// parentheses and lambda bodies). Nesting is otherwise bounded only by input
/// size, and real queries stay in single digits.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Failure surfaced by [`try_sanitize_url`]. [`sanitize_url`] converts both
/// kinds into an empty string at the boundary.
#[derive(Debug, Error)]
pub enum SanitizeError {
    /// The input could not be decomposed into origin/path/query.
    #[error("malformed URL: {0}")]
    MalformedUrl(String),
    /// Query-option groups nested beyond [`MAX_NESTING_DEPTH`].
    #[error("query option nesting exceeds {MAX_NESTING_DEPTH} levels")]
    NestingTooDeep,
}

pub(crate) fn check_depth(depth: usize) -> Result<(), SanitizeError> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(SanitizeError::NestingTooDeep);
    }
    Ok(())
}

/// Sanitizes an absolute request URL into a template URL.
///
/// Returns the empty string when the URL cannot be sanitized at all; callers
/// must treat that as total failure, not as "sanitized to nothing".
pub fn sanitize_url(url: &str) -> String {
    match try_sanitize_url(url) {
        Ok(sanitized) => sanitized,
        Err(err) => {
            tracing::debug!(url, error = %err, "could not sanitize URL");
            String::new()
        }
    }
}

/// Like [`sanitize_url`], but surfaces the failure instead of collapsing it
/// to an empty string.
pub fn try_sanitize_url(url: &str) -> Result<String, SanitizeError> {
    let decoded =
        parse::percent_decode(url).map_err(|e| SanitizeError::MalformedUrl(e.to_string()))?;

    let parsed = parse_sample_url(&decoded, None);
    if parsed.origin.is_empty() {
        return Err(SanitizeError::MalformedUrl(format!(
            "cannot decompose {url:?}"
        )));
    }

    let query = if parsed.raw_query.is_empty() {
        String::new()
    } else {
        format!("?{}", query::sanitize_query_string(&parsed.raw_query, 0)?)
    };
    let resource = path::sanitize_path(&parsed.request_path);

    Ok(format!(
        "{}/{}/{}{}",
        parsed.origin, parsed.version, resource, query
    ))
}
