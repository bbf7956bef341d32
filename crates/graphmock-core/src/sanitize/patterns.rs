//! Shared grammar tables: regexes and operator lists for path and query
//! classification. Built once per process and never mutated.

use regex::Regex;
use std::sync::LazyLock;

/// Purely alphabetic segment, e.g. entity sets and navigation properties.
pub(crate) static ALL_ALPHA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z]+$").unwrap());

/// Deprecated resources temporarily carry a `_v2` suffix.
pub(crate) static DEPRECATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z]+_v2$").unwrap());

/// An item path that has already been masked, e.g. `root:<value>`.
pub(crate) static SANITIZED_ITEM_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z]+:<value>$").unwrap());

/// Entity or entity-set name: `microsoft.graph.group` chains or plain letters.
pub(crate) static ENTITY_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(microsoft\.graph(\.[a-z]+)+|[a-z]+)$").unwrap());

/// Function-call segment like `users('MeganB@contoso.com')`; the name before
/// the bracket must be letters only.
pub(crate) static FUNCTION_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z]+\(.*\)$").unwrap());

pub(crate) static POSITIVE_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9]\d*$").unwrap());

/// Internet media type, e.g. `application/json` or `json`.
/// See https://www.iana.org/assignments/media-types/media-types.xhtml
pub(crate) static MEDIA_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([a-z]+/)?\w[\w+\-.]*$").unwrap());

/// `key=value` format parameter, e.g. `odata=minimalmetadata`.
pub(crate) static KEY_VALUE_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z]+=[a-z]+$").unwrap());

/// Property name or property path, e.g. `displayName`,
/// `from/emailAddress/address`, or `microsoft.graph.itemAttachment/item`.
pub(crate) static PROPERTY_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z]+([./][a-z]+)*$").unwrap());

/// Quoted text like `"displayName: Gupta"` (single or double quotes).
pub(crate) static QUOTED_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^["']([^"]*)['"]$"#).unwrap());

/// Drive-item colon path embedded in a request path, e.g.
/// `/root:/FolderA/FileB.txt:` (the trailing colon is present only when more
/// path follows). The second capture tells whether a `:/` separator was
/// consumed so the replacement can restore the slash.
pub(crate) static ITEM_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(\w+):[\w/.]+(:/|:$|$)").unwrap());

/// Doubled slashes anywhere but after the scheme's `:`.
pub(crate) static EXTRA_SLASHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^:]/)/+").unwrap());

/// OData query functions recognized inside `$filter`.
pub(crate) const QUERY_FUNCTIONS: &[&str] = &[
    "startswith",
    "endswith",
    "contains",
    "substring",
    "indexof",
    "concat",
    "isof",
];

pub(crate) const LOGICAL_OPERATORS: &[&str] = &["and", "or", "not"];
pub(crate) const COMPARISON_OPERATORS: &[&str] = &["eq", "ne", "gt", "ge", "lt", "le"];
pub(crate) const ARITHMETIC_OPERATORS: &[&str] = &["add", "sub", "mul", "div", "divby", "mod"];
pub(crate) const LAMBDA_OPERATORS: &[&str] = &["/any", "/all"];

pub(crate) fn is_all_alpha(s: &str) -> bool {
    ALL_ALPHA.is_match(s)
}

pub(crate) fn is_deprecation(s: &str) -> bool {
    DEPRECATION.is_match(s)
}

pub(crate) fn is_property_name(s: &str) -> bool {
    PROPERTY_NAME.is_match(s)
}

pub(crate) fn is_positive_integer(s: &str) -> bool {
    POSITIVE_INTEGER.is_match(s)
}

pub(crate) fn is_boolean_string(s: &str) -> bool {
    s == "true" || s == "false"
}

pub(crate) fn is_media_type(s: &str) -> bool {
    MEDIA_TYPE.is_match(s)
}

pub(crate) fn is_key_value_pair(s: &str) -> bool {
    KEY_VALUE_PAIR.is_match(s)
}

pub(crate) fn is_comparison_or_arithmetic(s: &str) -> bool {
    COMPARISON_OPERATORS.contains(&s) || ARITHMETIC_OPERATORS.contains(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_alpha() {
        assert!(is_all_alpha("users"));
        assert!(is_all_alpha("MailFolders"));
        assert!(!is_all_alpha("users2"));
        assert!(!is_all_alpha(""));
    }

    #[test]
    fn deprecation_suffix() {
        assert!(is_deprecation("drives_v2"));
        assert!(!is_deprecation("drives_v3"));
        assert!(!is_deprecation("_v2"));
    }

    #[test]
    fn entity_names() {
        assert!(ENTITY_NAME.is_match("microsoft.graph.group"));
        assert!(ENTITY_NAME.is_match("microsoft.graph.user.settings"));
        assert!(ENTITY_NAME.is_match("messages"));
        assert!(!ENTITY_NAME.is_match("microsoft.graph"));
        assert!(!ENTITY_NAME.is_match("12345"));
    }

    #[test]
    fn property_names() {
        assert!(is_property_name("displayName"));
        assert!(is_property_name("from/emailAddress/address"));
        assert!(is_property_name("microsoft.graph.itemAttachment/item"));
        assert!(!is_property_name("products/$count"));
        assert!(!is_property_name("a--b"));
        assert!(!is_property_name(""));
    }

    #[test]
    fn media_types() {
        assert!(is_media_type("application/json"));
        assert!(is_media_type("json"));
        assert!(is_media_type("application/atom+xml"));
        assert!(!is_media_type("application/json;odata=full"));
    }

    #[test]
    fn positive_integers() {
        assert!(is_positive_integer("5"));
        assert!(is_positive_integer("120"));
        assert!(!is_positive_integer("0"));
        assert!(!is_positive_integer("-3"));
        assert!(!is_positive_integer("012"));
    }
}
