//! URL decomposition: origin, API version segment, request path, raw query.

use url::Url;

use super::patterns::EXTRA_SLASHES;

/// A request URL broken into the pieces the sanitizer works on.
///
/// All fields empty means the input could not be parsed; callers must treat
/// that as "could not decompose", not as an empty-but-valid URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUrl {
    /// Scheme + host (+ port), e.g. `https://graph.microsoft.com`.
    pub origin: String,
    /// The API version segment (`v1.0`, `beta`, or whatever came first).
    pub version: String,
    /// Path after the version segment, percent-decoded, no surrounding slashes.
    pub request_path: String,
    /// Query string without the leading `?`, percent-decoded (whitespace
    /// re-encoded as `+` so parameter splitting stays unambiguous).
    pub raw_query: String,
}

/// Collapses doubled slashes everywhere except right after the scheme.
pub(crate) fn collapse_extra_slashes(url: &str) -> String {
    EXTRA_SLASHES.replace_all(url, "$1").into_owned()
}

/// Percent-decodes a string, failing only when the decoded bytes are not
/// valid UTF-8. Unpaired `%` sequences pass through untouched.
pub(crate) fn percent_decode(s: &str) -> Result<String, std::str::Utf8Error> {
    Ok(percent_encoding::percent_decode_str(s)
        .decode_utf8()?
        .into_owned())
}

/// Splits a request URL into [`ParsedUrl`] parts.
///
/// The version segment is taken from `version_hint` when the path actually
/// starts with it; otherwise the first path segment is used positionally,
/// whatever it is. Returns an all-empty `ParsedUrl` when the URL cannot be
/// parsed at all.
pub fn parse_sample_url(url: &str, version_hint: Option<&str>) -> ParsedUrl {
    if url.is_empty() {
        return ParsedUrl::default();
    }

    let url = collapse_extra_slashes(url);
    let parsed = match Url::parse(&url) {
        Ok(p) => p,
        Err(_) => return ParsedUrl::default(),
    };

    let path = parsed.path();
    let first_segment = path
        .strip_prefix('/')
        .unwrap_or(path)
        .split('/')
        .next()
        .unwrap_or("");

    let version = version_hint.unwrap_or(first_segment).to_string();
    // The hint only wins when the path really starts with it; otherwise the
    // first segment is what gets cut out of the request path.
    let version_to_replace = if path.starts_with(&format!("/{version}")) {
        version.as_str()
    } else {
        first_segment
    };

    let request_path = path.split(version_to_replace).last().unwrap_or("");
    let request_path = request_path.strip_suffix('/').unwrap_or(request_path);
    let request_path = request_path.strip_prefix('/').unwrap_or(request_path);
    // A path that fails decoding is reported as empty, not propagated.
    let request_path = percent_decode(request_path).unwrap_or_default();

    let raw_query = match parsed.query() {
        Some(q) if !q.is_empty() => {
            let decoded = percent_decode(q).unwrap_or_else(|_| q.to_string());
            decoded
                .chars()
                .map(|c| if c.is_whitespace() { '+' } else { c })
                .collect()
        }
        _ => String::new(),
    };

    ParsedUrl {
        origin: parsed.origin().ascii_serialization(),
        version,
        request_path,
        raw_query,
    }
}
