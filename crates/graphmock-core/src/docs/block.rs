//! Parsing of the code-block bodies: HTTP-style request and response text.

use anyhow::{Context, Result};
use std::collections::HashMap;

/// Splits header lines from an optional body (separated by the first blank
/// line). Header lines are `Name: value`; a line without a colon becomes a
/// header with an empty value, matching how docs authors occasionally write
/// them.
pub(crate) fn parse_headers_and_body(lines: &[&str]) -> (HashMap<String, String>, String) {
    let mut headers = HashMap::new();
    let mut body_lines: Vec<&str> = Vec::new();
    let mut in_body = false;

    for &line in lines {
        if in_body {
            body_lines.push(line);
            continue;
        }
        if line.trim().is_empty() {
            in_body = true;
            continue;
        }
        match line.find(':') {
            Some(colon) => {
                headers.insert(line[..colon].to_string(), line[colon + 1..].trim().to_string());
            }
            None => {
                headers.insert(line.to_string(), String::new());
            }
        }
    }

    (headers, body_lines.join("\n"))
}

/// Parses a request block: first line is `METHOD url`, then optional headers,
/// then an optional body after a blank line.
pub(crate) fn parse_request_block(
    lines: &[&str],
) -> Result<(String, String, HashMap<String, String>, String)> {
    let first = lines.first().context("request block is empty")?;
    let space = first
        .find(' ')
        .with_context(|| format!("request line has no method/URL separator: {first:?}"))?;
    let method = first[..space].trim().to_string();
    let url = first[space + 1..].trim().to_string();

    let (headers, body) = if lines.len() > 1 {
        parse_headers_and_body(&lines[1..])
    } else {
        (HashMap::new(), String::new())
    };

    Ok((method, url, headers, body))
}

/// Parses a response block: first line is protocol, status code and text
/// (e.g. `HTTP/1.1 200 OK`), then optional headers and body.
pub(crate) fn parse_response_block(
    lines: &[&str],
) -> Result<(u16, HashMap<String, String>, String)> {
    let first = lines.first().context("response block is empty")?;
    let status = first
        .split(' ')
        .nth(1)
        .with_context(|| format!("response line has no status code: {first:?}"))?
        .parse::<u16>()
        .with_context(|| format!("response status is not a number: {first:?}"))?;

    let (headers, body) = if lines.len() > 1 {
        parse_headers_and_body(&lines[1..])
    } else {
        (HashMap::new(), String::new())
    };

    Ok((status, headers, body))
}
