//! Query string splitting and per-parameter dispatch.

use super::expand::sanitize_expand_value;
use super::filter::sanitize_filter_value;
use super::options::{sanitize_format_value, sanitize_orderby_value, sanitize_select_value};
use super::parse::percent_decode;
use super::patterns::{is_all_alpha, is_boolean_string, is_positive_integer};
use super::search::sanitize_search_value;
use super::SanitizeError;

/// Sanitizes a whole query string: `+` back to spaces, percent-decode, then
/// each `&`-separated parameter independently (duplicate keys are each
/// processed on their own, not merged).
pub(crate) fn sanitize_query_string(raw_query: &str, depth: usize) -> Result<String, SanitizeError> {
    let decoded = percent_decode(&raw_query.replace('+', " "))
        .map_err(|e| SanitizeError::MalformedUrl(e.to_string()))?;
    let sanitized = decoded
        .split('&')
        .map(|parameter| sanitize_query_parameter(parameter, depth))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(sanitized.join("&"))
}

/// Redacts the variable part of one `key=value` query parameter.
///
/// Dispatch is on the lower-cased key; the lower-cased key is also what gets
/// re-emitted. A parameter without `=` is returned untouched.
pub(crate) fn sanitize_query_parameter(
    parameter: &str,
    depth: usize,
) -> Result<String, SanitizeError> {
    let Some(eq) = parameter.find('=') else {
        return Ok(parameter.to_string());
    };

    let mut key = parameter[..eq].to_lowercase().trim().to_string();
    let mut value = parameter[eq + 1..].trim().to_string();

    match key.as_str() {
        "$top" | "$skip" => {
            if !is_positive_integer(&value) {
                value = "<invalid-value>".to_string();
            }
        }
        "$skiptoken" | "$deltatoken" => value = "<value>".to_string(),
        "$count" => {
            if !is_boolean_string(&value) {
                value = "<invalid-value>".to_string();
            }
        }
        "$select" => value = sanitize_select_value(&value),
        "$format" => value = sanitize_format_value(&value),
        "$orderby" => value = sanitize_orderby_value(&value),
        "$search" => value = sanitize_search_value(&value, depth)?,
        "$expand" => value = sanitize_expand_value(&value, depth)?,
        "$filter" => value = sanitize_filter_value(&value, depth)?,
        _ => {
            // A key survives when it is alphabetic, `$`-prefixed, or has an
            // alphabetic tail after its first character; only keys failing
            // all three are masked.
            if !is_all_alpha(&key)
                && !key.starts_with('$')
                && !is_all_alpha(key.get(1..).unwrap_or(""))
            {
                key = "<invalid-key>".to_string();
            }
            value = "<value>".to_string();
        }
    }

    Ok(format!("{key}={value}"))
}
