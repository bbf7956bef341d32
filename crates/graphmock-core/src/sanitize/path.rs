//! Path segment classification and masking.

use super::patterns::{
    is_all_alpha, is_deprecation, ENTITY_NAME, FUNCTION_CALL, ITEM_PATH, SANITIZED_ITEM_PATH,
};

/// Reserved control segments that pass through unchanged.
const SEGMENTS_TO_IGNORE: [&str; 4] = ["$value", "$count", "$ref", "$batch"];

/// Masks variable data in a request path while keeping its structural shape.
///
/// Drive-item colon paths are collapsed first (`root:/Folder/File.txt:` →
/// `root:<value>`), then each `/`-separated segment is classified against its
/// immediate predecessor, strictly left to right.
pub(crate) fn sanitize_path(request_path: &str) -> String {
    if request_path.is_empty() {
        return String::new();
    }

    let collapsed = ITEM_PATH.replace_all(request_path, |caps: &regex::Captures<'_>| {
        let slash = if &caps[2] == ":/" { "/" } else { "" };
        format!("/{}:<value>{}", &caps[1], slash)
    });

    let segments: Vec<&str> = collapsed.split('/').collect();
    let mut sanitized = Vec::with_capacity(segments.len());
    for (index, segment) in segments.iter().enumerate() {
        let previous = if index == 0 { "" } else { segments[index - 1] };
        sanitized.push(sanitize_path_segment(previous, segment));
    }
    sanitized.join("/")
}

/// Classifies one path segment.
///
/// Skipped (returned unchanged): entities, entity sets and navigation
/// properties (letters only), deprecated entities (`<entity>_v2`), already
/// masked item paths, reserved control segments, namespace-qualified entity
/// names, and `{placeholder}` segments. Function-call segments keep their
/// name and get their arguments masked. Everything else is assumed to be an
/// identifier and becomes `{<previous>-id}`.
fn sanitize_path_segment(previous: &str, segment: &str) -> String {
    if is_all_alpha(segment)
        || is_deprecation(segment)
        || SANITIZED_ITEM_PATH.is_match(segment)
        || SEGMENTS_TO_IGNORE.contains(&segment.to_lowercase().as_str())
        || ENTITY_NAME.is_match(segment)
    {
        return segment.to_string();
    }

    // users('MeganB@contoso.com') → users(<value>)
    if FUNCTION_CALL.is_match(segment) {
        let open = segment.find('(').unwrap_or(0);
        let inner = &segment[open + 1..segment.len() - 1];
        let masked = inner
            .split(',')
            .map(|arg| {
                if arg.contains('=') {
                    let key = arg.split('=').next().unwrap_or("");
                    let key = if is_all_alpha(key) { key } else { "<key>" };
                    format!("{key}=<value>")
                } else {
                    "<value>".to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(",");
        return format!("{}({})", &segment[..open], masked);
    }

    if segment.starts_with('{') && segment.ends_with('}') {
        return segment.to_string();
    }

    let previous = if is_all_alpha(previous) || is_deprecation(previous) {
        previous
    } else {
        "unknown"
    };
    format!("{{{previous}-id}}")
}
