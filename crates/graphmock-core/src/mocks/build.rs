//! Conversion of extracted request/response pairs into proxy mocks.

use anyhow::{bail, Result};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::config::FailurePolicy;
use crate::docs::RequestResponsePair;
use crate::sanitize::sanitize_url;

use super::{MockFile, ProxyMock};

/// `{...}` and `<...>` mask tokens left by the sanitizer, collapsed to the
/// proxy's wildcard.
static MASK_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[{<][^>}]+[}>]").unwrap());

/// Counters reported at the end of a generation run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildSummary {
    pub mocks_created: usize,
    pub mocks_after_dedupe: usize,
}

/// Turns a documented request URL into the wildcard form used as the mock
/// matching key.
///
/// Server-relative URLs get the Graph origin prepended, plus the version when
/// the path carries none. The sanitized URL then has every mask token
/// replaced with `*`. Returns an empty string when sanitization failed.
pub fn generalize_url(original_url: &str, origin: &str, graph_version: &str) -> String {
    let mut url = original_url.to_string();
    if !url.starts_with("https://") {
        let mut prefix = origin.to_string();
        if !url.contains("/v1.0/") && !url.contains("/beta/") {
            prefix.push('/');
            prefix.push_str(graph_version);
        }
        url = format!("{prefix}{url}");
    }

    let sanitized = sanitize_url(&url);
    MASK_TOKEN.replace_all(&sanitized, "*").into_owned()
}

/// Builds the mock file from extracted pairs: generalize every URL, sort by
/// descending URL length, and dedupe by (url, method) keeping the first
/// occurrence after the sort.
pub fn build_mocks(
    pairs: Vec<RequestResponsePair>,
    origin: &str,
    graph_version: &str,
    on_failure: FailurePolicy,
) -> Result<(MockFile, BuildSummary)> {
    let mut mocks: Vec<ProxyMock> = Vec::with_capacity(pairs.len());

    for pair in pairs {
        let generalized = generalize_url(&pair.request.url, origin, graph_version);
        if generalized.trim().is_empty() {
            match on_failure {
                FailurePolicy::Abort => bail!(
                    "unable to generalize URL {} at {}",
                    pair.request.url,
                    pair.request.source
                ),
                FailurePolicy::Skip => {
                    tracing::warn!(
                        url = pair.request.url,
                        source = %pair.request.source,
                        "dropping request with unsanitizable URL"
                    );
                    continue;
                }
            }
        }
        tracing::debug!(
            original = pair.request.url,
            generalized,
            "generalized request URL"
        );

        let response_body = if pair.response.body.is_empty() {
            None
        } else {
            match serde_json::from_str(&pair.response.body) {
                Ok(value) => Some(value),
                Err(err) => {
                    tracing::warn!(
                        source = %pair.response.source,
                        error = %err,
                        "response body is not JSON; storing as string"
                    );
                    Some(serde_json::Value::String(pair.response.body))
                }
            }
        };

        mocks.push(ProxyMock {
            url: generalized,
            method: pair.request.method,
            response_code: pair.response.status_code,
            response_headers: pair.response.headers,
            response_body,
        });
    }

    // Most specific URLs first; the sort is stable so documentation order
    // breaks ties, and the first (url, method) occurrence wins the dedupe.
    mocks.sort_by(|a, b| b.url.len().cmp(&a.url.len()));

    let mocks_created = mocks.len();
    let mut seen = HashSet::new();
    mocks.retain(|mock| seen.insert((mock.url.clone(), mock.method.clone())));
    let mocks_after_dedupe = mocks.len();

    Ok((
        MockFile { responses: mocks },
        BuildSummary {
            mocks_created,
            mocks_after_dedupe,
        },
    ))
}
