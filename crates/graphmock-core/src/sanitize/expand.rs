//! `$expand` sanitization.

use super::patterns::is_property_name;
use super::query::sanitize_query_parameter;
use super::{check_depth, SanitizeError};

/// Masks an `$expand` value: a comma-separated list of navigation properties,
/// each optionally carrying nested query options in parentheses, e.g.
/// `children($select=id,name)` or `Items($expand=product),customer`.
///
/// Nested options are `;`-separated and re-dispatched through the query
/// parameter sanitizer, so `$filter=...` inside an expansion is masked with
/// the full `$filter` grammar.
pub(crate) fn sanitize_expand_value(value: &str, depth: usize) -> Result<String, SanitizeError> {
    check_depth(depth)?;

    let mut sanitized = String::new();
    for (index, raw) in split_navigation_segments(value).into_iter().enumerate() {
        let segment = raw.trim();

        if index > 0 {
            sanitized.push(',');
        }

        if is_property_name(segment) {
            sanitized.push(' ');
            sanitized.push_str(segment);
            continue;
        }

        if let Some(open) = segment.find('(') {
            if open > 0 {
                let property = segment[..open].trim();
                let property = if is_property_name(property) {
                    property
                } else {
                    "<property>"
                };
                let end = segment
                    .char_indices()
                    .last()
                    .map(|(byte, _)| byte)
                    .unwrap_or(open);
                let inner = if end > open {
                    segment[open + 1..end].trim()
                } else {
                    ""
                };
                let inner = inner
                    .split(';')
                    .map(|option| sanitize_query_parameter(option, depth + 1))
                    .collect::<Result<Vec<_>, _>>()?
                    .join(";");
                sanitized.push_str(&format!("{property}({inner})"));
                continue;
            }
        }

        sanitized.push_str(" <unknown>");
    }
    Ok(sanitized.trim().to_string())
}

/// Splits on commas that are not enclosed in parentheses, so the comma inside
/// `children($select=id,name)` does not split.
fn split_navigation_segments(value: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (byte, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                segments.push(&value[start..byte]);
                start = byte + 1;
            }
            _ => {}
        }
    }
    segments.push(&value[start..]);
    segments
}
