//! `$filter` sanitization.
//!
//! A filter value is segmented into function-call chunks, parenthesized
//! groups, and bare tokens, then processed left to right:
//! operators pass through lower-cased, lambda bodies and groups recurse,
//! query functions are canonicalized to `func(property,<value>)`, and a
//! property followed by a comparison operator becomes `property op <value>`.
//! Whatever fits no category is masked as `<unknown>`.

use super::patterns::{
    is_comparison_or_arithmetic, is_property_name, ARITHMETIC_OPERATORS, COMPARISON_OPERATORS,
    LAMBDA_OPERATORS, LOGICAL_OPERATORS, QUERY_FUNCTIONS,
};
use super::token::{chunk_interior, filter_segments};
use super::{check_depth, SanitizeError};

pub(crate) fn sanitize_filter_value(value: &str, depth: usize) -> Result<String, SanitizeError> {
    check_depth(depth)?;

    let segments = filter_segments(value);
    let count = segments.len();
    let mut sanitized = String::new();

    let mut index = 0;
    while index < count {
        let segment = segments[index];
        let lowered = segment.to_lowercase();

        if LOGICAL_OPERATORS.contains(&lowered.as_str())
            || COMPARISON_OPERATORS.contains(&lowered.as_str())
            || ARITHMETIC_OPERATORS.contains(&lowered.as_str())
        {
            sanitized.push(' ');
            sanitized.push_str(&lowered);
            sanitized.push(' ');
            index += 1;
            continue;
        }

        // Collection operator: property/any(v:predicate) or property/all(...).
        if let Some(open) = segment.find('(') {
            let head = &segment[..open];
            if let Some(lambda) = LAMBDA_OPERATORS.iter().find(|op| head.ends_with(*op)) {
                let property = &head[..head.len() - lambda.len()];
                let property = if is_property_name(property) {
                    property
                } else {
                    "<property>"
                };
                let body = lambda_interior(segment, open).trim();
                let body = if body.is_empty() {
                    String::new()
                } else {
                    let (var, predicate) = match body.find(':') {
                        Some(colon) => (body[..colon].trim(), &body[colon + 1..]),
                        None => ("", body),
                    };
                    format!("{var}: {}", sanitize_filter_value(predicate, depth + 1)?)
                };
                sanitized.push_str(&format!("{property}{lambda}({body})"));
                index += 1;
                continue;
            }
        }

        // Query function: canonicalize e.g. startswith(userPrincipalName,'J')
        // to startswith(userPrincipalName,<value>).
        let mut function = "";
        for name in QUERY_FUNCTIONS {
            if lowered.starts_with(name) {
                function = name;
            }
        }
        if !function.is_empty() {
            let open = segment.find('(');
            let close = segment.find(')');
            let comma = segment.find(',');
            match open {
                Some(open) if open > 0 => {
                    // Property name ends at the comma, the closing bracket,
                    // or the end of the segment, in that order.
                    let end = comma
                        .filter(|&c| c > 0)
                        .or_else(|| close.filter(|&c| c > 0))
                        .unwrap_or(segment.len());
                    let property = js_substring(segment, open + 1, end).trim();
                    let property = if is_property_name(property) {
                        property
                    } else {
                        "<property>"
                    };
                    let args = if comma.is_some_and(|c| c > 0) {
                        ",<value>"
                    } else {
                        ""
                    };
                    sanitized.push_str(&format!("{function}({property}{args})"));
                    index += 1;
                    continue;
                }
                _ => {
                    sanitized.push_str(&format!("{function}(<unknown>)"));
                    break;
                }
            }
        }

        if segment.starts_with('(') {
            let inner = sanitize_filter_value(chunk_interior(segment), depth + 1)?;
            sanitized.push_str(&format!("({inner})"));
            index += 1;
            continue;
        }

        if is_property_name(segment) {
            // A free-standing property must be followed by a comparison or
            // arithmetic operator and a value.
            if index + 2 < count {
                let operator = segments[index + 1].to_lowercase();
                if is_comparison_or_arithmetic(&operator) {
                    sanitized.push_str(&format!("{segment} {} <value>", segments[index + 1]));
                    index += 3;
                    continue;
                }
            }
        } else if index > 0 && is_comparison_or_arithmetic(segments[index - 1]) {
            // A value following a comparison or arithmetic operator.
            sanitized.push_str("<value>");
            index += 1;
            continue;
        }

        sanitized.push_str(" <unknown>");
        index += 1;
    }

    Ok(sanitized.trim().to_string())
}

/// Text between the opening bracket at `open` and the last character of the
/// segment (normally the closing bracket).
fn lambda_interior(segment: &str, open: usize) -> &str {
    let end = segment
        .char_indices()
        .last()
        .map(|(byte, _)| byte)
        .unwrap_or(open);
    if end > open {
        &segment[open + 1..end]
    } else {
        ""
    }
}

/// Substring with JavaScript `String.prototype.substring` semantics: indices
/// are clamped to the string length and swapped when out of order.
fn js_substring(s: &str, a: usize, b: usize) -> &str {
    let a = a.min(s.len());
    let b = b.min(s.len());
    let (start, end) = if a <= b { (a, b) } else { (b, a) };
    &s[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitize(value: &str) -> String {
        sanitize_filter_value(value, 0).unwrap()
    }

    #[test]
    fn query_function_canonicalized() {
        assert_eq!(
            sanitize("startswith(displayName,'J')"),
            "startswith(displayName,<value>)"
        );
        assert_eq!(
            sanitize("endswith(mail,'contoso.com')"),
            "endswith(mail,<value>)"
        );
    }

    #[test]
    fn query_function_without_comma() {
        assert_eq!(sanitize("isof('microsoft')"), "isof(<property>)");
    }

    #[test]
    fn query_function_without_brackets_aborts_segmenting() {
        assert_eq!(sanitize("startswith and more"), "startswith(<unknown>)");
    }

    #[test]
    fn property_operator_value() {
        assert_eq!(sanitize("isRead eq false"), "isRead eq <value>");
        assert_eq!(
            sanitize("from/emailAddress/address eq 'no-reply@microsoft.com'"),
            "from/emailAddress/address eq <value>"
        );
    }

    #[test]
    fn operator_case_preserved_in_triplet() {
        assert_eq!(sanitize("isRead EQ false"), "isRead EQ <value>");
    }

    #[test]
    fn chained_comparisons() {
        assert_eq!(
            sanitize("a eq 1 and b ne 2"),
            "a eq <value> and b ne <value>"
        );
    }

    #[test]
    fn arithmetic_then_comparison() {
        assert_eq!(
            sanitize("Price add 2.45 eq 5.00"),
            "Price add <value> eq <value>"
        );
    }

    #[test]
    fn groups_recursed() {
        assert_eq!(
            sanitize("(isRead eq false) and (isDraft eq true)"),
            "(isRead eq <value>) and (isDraft eq <value>)"
        );
    }

    #[test]
    fn lambda_with_variable() {
        assert_eq!(
            sanitize("emailAddresses/any(a:a/address eq 'x@contoso.com')"),
            "emailAddresses/any(a: a/address eq <value>)"
        );
        assert_eq!(
            sanitize("assignments/all(x:x/state eq 'active')"),
            "assignments/all(x: x/state eq <value>)"
        );
    }

    #[test]
    fn lambda_invalid_property_masked() {
        assert_eq!(
            sanitize("email-addresses/any(a:a/address eq 'x')"),
            "<property>/any(a: a/address eq <value>)"
        );
    }

    #[test]
    fn lambda_empty_body() {
        assert_eq!(sanitize("folders/any()"), "folders/any()");
    }

    #[test]
    fn bare_value_masked_after_operator() {
        assert_eq!(sanitize("riskLevel eq 'high'"), "riskLevel eq <value>");
    }

    #[test]
    fn unknown_segment() {
        assert_eq!(sanitize("???"), "<unknown>");
    }

    #[test]
    fn empty_value() {
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn nesting_bounded() {
        let mut value = String::new();
        for _ in 0..200 {
            value.push('(');
        }
        value.push_str("isRead eq false");
        for _ in 0..200 {
            value.push(')');
        }
        assert!(matches!(
            sanitize_filter_value(&value, 0),
            Err(SanitizeError::NestingTooDeep)
        ));
    }
}
