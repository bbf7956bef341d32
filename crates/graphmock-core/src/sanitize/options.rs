//! The simple query-option sanitizers: `$select`, `$format`, `$orderby`.

use super::patterns::{is_all_alpha, is_key_value_pair, is_media_type, is_property_name};

/// `$select` is a comma-separated property list, e.g. `rating,releaseDate`,
/// `*`, or `demoService.*`.
///
/// The value is passed through unchanged: replacing unrecognized properties
/// with a mask broke matching against real traffic, so the check is only a
/// diagnostic now.
pub(crate) fn sanitize_select_value(value: &str) -> String {
    for property in value.split(',') {
        let property = property.trim();
        if !is_all_alpha(property) && property != "*" && !property.ends_with(".*") {
            tracing::trace!(property, "unrecognized $select property left as-is");
        }
    }
    value.to_string()
}

/// `$format` is a media type optionally followed by `;`-separated parameters,
/// e.g. `application/json;metadata=full` or `json`.
pub(crate) fn sanitize_format_value(value: &str) -> String {
    let mut segments: Vec<String> = value.split(';').map(str::to_string).collect();
    for (index, segment) in segments.iter_mut().enumerate() {
        if index == 0 {
            let media_type = segment.trim();
            *segment = if is_media_type(media_type) {
                media_type.to_string()
            } else {
                "<invalid-media-type>".to_string()
            };
        } else if !is_key_value_pair(segment) {
            *segment = "<invalid-parameter>".to_string();
        }
    }
    segments.join(";")
}

/// `$orderby` is a comma-separated list of `property [asc|desc]` expressions,
/// e.g. `releasedate asc,rating desc` or `products/$count`.
pub(crate) fn sanitize_orderby_value(value: &str) -> String {
    let expressions: Vec<String> = value
        .split(',')
        .map(|expression| {
            let parts: Vec<&str> = expression.split(' ').filter(|p| !p.is_empty()).collect();
            let property = parts.first().map(|p| p.trim()).unwrap_or("");
            let property = if is_property_name(property)
                || property.ends_with("/$count")
                || is_property_name(tail_chars(property, 7))
            {
                property.to_string()
            } else {
                "<invalid-property>".to_string()
            };

            let mut sanitized = property;
            if parts.len() > 1 {
                let direction = parts[1].trim().to_lowercase();
                let direction = if direction == "asc" || direction == "desc" {
                    direction
                } else {
                    "<unexpected-value>".to_string()
                };
                sanitized.push(' ');
                sanitized.push_str(&direction);
            }
            sanitized
        })
        .collect();
    expressions.join(",")
}

/// Last `n` characters of `s` (the whole string when shorter).
fn tail_chars(s: &str, n: usize) -> &str {
    let count = s.chars().count();
    if count <= n {
        return s;
    }
    let (idx, _) = s.char_indices().nth(count - n).unwrap_or((0, ' '));
    &s[idx..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_passes_value_through_unchanged() {
        assert_eq!(sanitize_select_value("rating,releaseDate"), "rating,releaseDate");
        assert_eq!(sanitize_select_value("*"), "*");
        assert_eq!(sanitize_select_value("demoService.*"), "demoService.*");
    }

    #[test]
    fn select_even_invalid_properties_pass_through() {
        // Validation is computed but deliberately not applied.
        assert_eq!(sanitize_select_value("id,name-2,*"), "id,name-2,*");
    }

    #[test]
    fn format_valid_media_type() {
        assert_eq!(sanitize_format_value("json"), "json");
        assert_eq!(sanitize_format_value("application/json"), "application/json");
    }

    #[test]
    fn format_invalid_media_type() {
        assert_eq!(sanitize_format_value("no good"), "<invalid-media-type>");
    }

    #[test]
    fn format_parameters_validated() {
        assert_eq!(
            sanitize_format_value("application/json;odata=minimalmetadata"),
            "application/json;odata=minimalmetadata"
        );
        assert_eq!(
            sanitize_format_value("application/json;token abc"),
            "application/json;<invalid-parameter>"
        );
    }

    #[test]
    fn orderby_property_and_direction() {
        assert_eq!(sanitize_orderby_value("displayName"), "displayName");
        assert_eq!(
            sanitize_orderby_value("releasedate asc,rating desc"),
            "releasedate asc,rating desc"
        );
    }

    #[test]
    fn orderby_count_path_kept() {
        assert_eq!(sanitize_orderby_value("products/$count"), "products/$count");
    }

    #[test]
    fn orderby_invalid_property() {
        assert_eq!(sanitize_orderby_value("not&valid"), "<invalid-property>");
        assert_eq!(sanitize_orderby_value(""), "<invalid-property>");
    }

    #[test]
    fn orderby_unexpected_direction() {
        assert_eq!(
            sanitize_orderby_value("displayName upward"),
            "displayName <unexpected-value>"
        );
        assert_eq!(sanitize_orderby_value("displayName DESC"), "displayName desc");
    }
}
