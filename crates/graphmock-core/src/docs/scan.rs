//! Markdown scanning: find documented request/response code blocks.
//!
//! Graph docs annotate code blocks with HTML comments carrying a
//! `"blockType"` marker. A request block arms the scanner; the next response
//! block (responses without a pending request belong to `blockType: ignore`
//! and are skipped) completes a pair.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::block::{parse_request_block, parse_response_block};
use super::{DocRequest, DocResponse, RequestResponsePair, SourceLocation};

/// What one file's scan produced.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub pairs: Vec<RequestResponsePair>,
    /// Request blocks seen, whether or not a response completed them.
    pub requests_detected: usize,
}

/// All `.md` files directly inside `docs_path` (not recursive), sorted for
/// deterministic output.
pub fn markdown_files(docs_path: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(docs_path)
        .with_context(|| format!("read docs directory: {}", docs_path.display()))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    files.sort();
    Ok(files)
}

/// Extracts request/response pairs from one docs file.
///
/// A block that fails to parse is logged and skipped; the scan itself only
/// fails when the file cannot be read.
pub fn extract_pairs(path: &Path) -> Result<ScanOutcome> {
    tracing::debug!(file = %path.display(), "scanning docs file");
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("read docs file: {}", path.display()))?;

    let mut outcome = ScanOutcome::default();
    let mut in_request_block = false;
    let mut in_response_block = false;
    let mut fence_start: Option<usize> = None;
    let mut code_lines: Vec<&str> = Vec::new();
    let mut pending_request: Option<DocRequest> = None;

    for (line_number, line) in contents.lines().enumerate() {
        if line.contains("\"blockType\": \"request\"") {
            in_request_block = true;
            code_lines.clear();
            continue;
        }
        // Responses under blockType: ignore have no pending request and are
        // filtered out here.
        if line.contains("\"blockType\": \"response\"") && pending_request.is_some() {
            in_response_block = true;
            code_lines.clear();
            continue;
        }

        if line.starts_with("```") {
            if !in_request_block && !in_response_block {
                continue;
            }
            let Some(start) = fence_start else {
                fence_start = Some(line_number);
                continue;
            };

            let source = SourceLocation {
                file: path.to_path_buf(),
                line: start,
            };
            if in_request_block {
                outcome.requests_detected += 1;
                match parse_request_block(&code_lines) {
                    Ok((method, url, headers, body)) => {
                        pending_request = Some(DocRequest {
                            method,
                            url,
                            headers,
                            body,
                            source,
                        });
                    }
                    Err(err) => {
                        tracing::error!(source = %source, error = %err, "skipping bad request block");
                        pending_request = None;
                    }
                }
                in_request_block = false;
            } else if in_response_block {
                match parse_response_block(&code_lines) {
                    Ok((status_code, headers, body)) => {
                        if let Some(request) = pending_request.take() {
                            outcome.pairs.push(RequestResponsePair {
                                request,
                                response: DocResponse {
                                    status_code,
                                    headers,
                                    body,
                                    source,
                                },
                            });
                        }
                    }
                    Err(err) => {
                        tracing::error!(source = %source, error = %err, "skipping bad response block");
                        pending_request = None;
                    }
                }
                in_response_block = false;
            }
            code_lines.clear();
            fence_start = None;
            continue;
        }

        if fence_start.is_some() {
            code_lines.push(line);
        }
    }

    tracing::debug!(
        file = %path.display(),
        requests = outcome.requests_detected,
        pairs = outcome.pairs.len(),
        "scan complete"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_DOC: &str = r#"# Get user

## Request

<!-- {
  "blockType": "request",
  "name": "get_user"
}-->
```http
GET https://graph.microsoft.com/v1.0/users/87d349ed-44d7-43e1-9a83-5f2406dee5bd
```

## Response

<!-- {
  "blockType": "response",
  "truncated": true
} -->
```http
HTTP/1.1 200 OK
Content-type: application/json

{
  "displayName": "Adele Vance"
}
```
"#;

    fn write_doc(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn extracts_request_response_pair() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), "user-get.md", SAMPLE_DOC);

        let outcome = extract_pairs(&path).unwrap();
        assert_eq!(outcome.requests_detected, 1);
        assert_eq!(outcome.pairs.len(), 1);

        let pair = &outcome.pairs[0];
        assert_eq!(pair.request.method, "GET");
        assert_eq!(
            pair.request.url,
            "https://graph.microsoft.com/v1.0/users/87d349ed-44d7-43e1-9a83-5f2406dee5bd"
        );
        assert_eq!(pair.response.status_code, 200);
        assert_eq!(
            pair.response.headers.get("Content-type").unwrap(),
            "application/json"
        );
        assert!(pair.response.body.contains("Adele Vance"));
        assert_eq!(pair.request.source.file, path);
    }

    #[test]
    fn response_without_request_ignored() {
        let doc = r#"<!-- { "blockType": "response" } -->
```http
HTTP/1.1 200 OK
```
"#;
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), "orphan.md", doc);
        let outcome = extract_pairs(&path).unwrap();
        assert!(outcome.pairs.is_empty());
        assert_eq!(outcome.requests_detected, 0);
    }

    #[test]
    fn code_block_outside_markers_ignored() {
        let doc = r#"```csharp
var client = new GraphServiceClient();
```
"#;
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), "sdk.md", doc);
        let outcome = extract_pairs(&path).unwrap();
        assert!(outcome.pairs.is_empty());
    }

    #[test]
    fn bad_request_block_skipped() {
        let doc = r#"<!-- { "blockType": "request" } -->
```http
NOURLHERE
```
<!-- { "blockType": "response" } -->
```http
HTTP/1.1 200 OK
```
"#;
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), "bad.md", doc);
        let outcome = extract_pairs(&path).unwrap();
        assert_eq!(outcome.requests_detected, 1);
        assert!(outcome.pairs.is_empty());
    }

    #[test]
    fn multiple_pairs_in_one_file() {
        let doc = format!("{SAMPLE_DOC}\n{SAMPLE_DOC}");
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), "double.md", &doc);
        let outcome = extract_pairs(&path).unwrap();
        assert_eq!(outcome.requests_detected, 2);
        assert_eq!(outcome.pairs.len(), 2);
    }

    #[test]
    fn markdown_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(dir.path(), "b.md", "x");
        write_doc(dir.path(), "a.md", "x");
        write_doc(dir.path(), "notes.txt", "x");
        let files = markdown_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.md", "b.md"]);
    }
}
