//! Graph docs scanning: extract request/response pairs from the fenced code
//! blocks of API documentation markdown files.

mod block;
mod scan;

pub use scan::{extract_pairs, markdown_files, ScanOutcome};

use std::collections::HashMap;
use std::path::PathBuf;

/// Where a block was found, for diagnostics and failure reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: PathBuf,
    /// Line number of the opening code fence (0-based, as counted in the file).
    pub line: usize,
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// A documented web request to Microsoft Graph.
#[derive(Debug, Clone)]
pub struct DocRequest {
    pub method: String,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub source: SourceLocation,
}

/// The documented response paired with a [`DocRequest`].
#[derive(Debug, Clone)]
pub struct DocResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub source: SourceLocation,
}

/// One request/response pair extracted from a docs file.
#[derive(Debug, Clone)]
pub struct RequestResponsePair {
    pub request: DocRequest,
    pub response: DocResponse,
}
