//! Combining mock files from several generation runs (e.g. v1.0 + beta)
//! into one deduplicated file.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

use super::MockFile;

pub fn read_mock_file(path: &Path) -> Result<MockFile> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read mock file: {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse mock file: {}", path.display()))
}

/// Writes a mock file pretty-printed, so diffs against previous generations
/// stay reviewable.
pub fn write_mock_file(path: &Path, mocks: &MockFile) -> Result<()> {
    let json = serde_json::to_string_pretty(mocks)?;
    std::fs::write(path, json).with_context(|| format!("write mock file: {}", path.display()))?;
    Ok(())
}

/// Concatenates the given mock files, drops duplicate (url, method) entries
/// keeping the first occurrence, and re-sorts by descending URL length.
pub fn combine_mock_files(inputs: &[&Path]) -> Result<MockFile> {
    let mut combined = MockFile::default();
    for path in inputs {
        let file = read_mock_file(path)?;
        tracing::info!(
            file = %path.display(),
            mocks = file.responses.len(),
            "adding mock file"
        );
        combined.responses.extend(file.responses);
    }

    let total = combined.responses.len();
    let mut seen = HashSet::new();
    combined
        .responses
        .retain(|mock| seen.insert((mock.url.clone(), mock.method.clone())));
    tracing::info!(
        removed = total - combined.responses.len(),
        "removed duplicate mocks"
    );

    combined.responses.sort_by(|a, b| b.url.len().cmp(&a.url.len()));
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::ProxyMock;
    use std::collections::HashMap;

    fn mock(url: &str, method: &str, code: u16) -> ProxyMock {
        ProxyMock {
            url: url.to_string(),
            method: method.to_string(),
            response_code: code,
            response_headers: HashMap::new(),
            response_body: None,
        }
    }

    fn write_temp(dir: &Path, name: &str, file: &MockFile) -> std::path::PathBuf {
        let path = dir.join(name);
        write_mock_file(&path, file).unwrap();
        path
    }

    #[test]
    fn combine_dedupes_first_wins_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let first = MockFile {
            responses: vec![
                mock("https://graph.microsoft.com/v1.0/me", "GET", 200),
                mock("https://graph.microsoft.com/v1.0/me/messages", "GET", 200),
            ],
        };
        let second = MockFile {
            responses: vec![
                // Duplicate of an entry in `first`, different status; must lose.
                mock("https://graph.microsoft.com/v1.0/me", "GET", 404),
                mock("https://graph.microsoft.com/beta/me/mailFolders", "GET", 200),
            ],
        };
        let a = write_temp(dir.path(), "a.json", &first);
        let b = write_temp(dir.path(), "b.json", &second);

        let combined = combine_mock_files(&[a.as_path(), b.as_path()]).unwrap();
        assert_eq!(combined.responses.len(), 3);
        assert_eq!(
            combined.responses[0].url,
            "https://graph.microsoft.com/beta/me/mailFolders"
        );
        let me = combined
            .responses
            .iter()
            .find(|m| m.url.ends_with("/v1.0/me"))
            .unwrap();
        assert_eq!(me.response_code, 200);
    }

    #[test]
    fn same_url_different_method_both_kept() {
        let dir = tempfile::tempdir().unwrap();
        let file = MockFile {
            responses: vec![
                mock("https://graph.microsoft.com/v1.0/me/messages", "GET", 200),
                mock("https://graph.microsoft.com/v1.0/me/messages", "POST", 201),
            ],
        };
        let a = write_temp(dir.path(), "a.json", &file);
        let combined = combine_mock_files(&[a.as_path()]).unwrap();
        assert_eq!(combined.responses.len(), 2);
    }

    #[test]
    fn missing_input_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(combine_mock_files(&[missing.as_path()]).is_err());
    }

    #[test]
    fn roundtrip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let file = MockFile {
            responses: vec![mock("https://graph.microsoft.com/v1.0/me", "GET", 200)],
        };
        let path = write_temp(dir.path(), "mocks.json", &file);
        let read = read_mock_file(&path).unwrap();
        assert_eq!(read.responses.len(), 1);
        assert_eq!(read.responses[0].method, "GET");
    }
}
