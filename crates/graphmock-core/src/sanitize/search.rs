//! `$search` sanitization.

use super::patterns::{is_all_alpha, is_property_name, LOGICAL_OPERATORS, QUOTED_TEXT};
use super::token::{chunk_interior, search_segments};
use super::{check_depth, SanitizeError};

/// Masks the search term(s) of a `$search` value while keeping logical
/// structure and target properties.
///
/// `"pizza"` → `<value>`; `"body:excitement"` → `"body:<value>"`;
/// `"description:One" AND ("displayName:Video")` keeps the operator and group
/// and recurses into the group.
pub(crate) fn sanitize_search_value(value: &str, depth: usize) -> Result<String, SanitizeError> {
    check_depth(depth)?;

    let mut sanitized = String::new();
    for raw in search_segments(value) {
        let segment = raw.trim();

        if LOGICAL_OPERATORS.contains(&segment.to_lowercase().as_str()) {
            sanitized.push(' ');
            sanitized.push_str(segment);
            continue;
        }

        if QUOTED_TEXT.is_match(segment) {
            if let Some(colon) = segment.find(':') {
                let property = segment[1..colon].trim();
                let property = if is_property_name(property) {
                    property
                } else {
                    "<property>"
                };
                sanitized.push_str(&format!(" \"{property}:<value>\""));
            } else {
                sanitized.push_str(" <value>");
            }
            continue;
        }

        if segment.starts_with('(') {
            let inner = sanitize_search_value(chunk_interior(segment), depth + 1)?;
            sanitized.push_str(&format!(" ({inner})"));
            continue;
        }

        sanitized.push_str(if is_all_alpha(segment) {
            " <value>"
        } else {
            " <unknown>"
        });
    }
    Ok(sanitized.trim().to_string())
}
