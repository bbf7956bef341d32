//! Segmentation of `$search` and `$filter` values into processable chunks.
//!
//! Chunks are delimited by whitespace, except that parenthesized groups keep
//! their interior (including spaces) together, and `$search` additionally
//! keeps quoted phrases of word characters and spaces together. An unbalanced
//! opening parenthesis swallows the rest of the value.

/// Splits a `$search` value into parenthesized groups, quoted phrases, and
/// bare tokens.
///
/// `"description:One" AND ("displayName:Video" OR "displayName:Drive")`
/// segments into `"description:One"`, `AND`, and the whole trailing group.
pub(crate) fn search_segments(value: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = value.char_indices().collect();
    let len = chars.len();
    let mut segments = Vec::new();
    let mut i = 0;

    while i < len {
        let (start, c) = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c == '(' {
            i = consume_group(&chars, i);
            segments.push(slice_to(value, &chars, start, i));
            continue;
        }

        if c == '"' || c == '\'' {
            // Quoted phrase: word characters and whitespace up to a closing
            // quote. Anything else (e.g. a colon) falls back to a bare token.
            if let Some(end) = quoted_phrase_end(&chars, i) {
                i = end + 1;
                segments.push(slice_to(value, &chars, start, i));
                continue;
            }
        }

        i = consume_bare(&chars, i);
        segments.push(slice_to(value, &chars, start, i));
    }

    segments
}

/// Splits a `$filter` value into function-call chunks (`name(...)`, lambda
/// forms included), parenthesized groups, and bare tokens.
pub(crate) fn filter_segments(value: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = value.char_indices().collect();
    let len = chars.len();
    let mut segments = Vec::new();
    let mut i = 0;

    while i < len {
        let (start, c) = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // A chunk runs until whitespace at paren depth zero, so
        // `startswith(displayName,'J')` and `(a eq 1 and b eq 2)` are single
        // chunks while `isRead eq false` is three.
        let mut depth = 0usize;
        while i < len {
            let ch = chars[i].1;
            if ch == '(' {
                depth += 1;
            } else if ch == ')' {
                depth = depth.saturating_sub(1);
            } else if ch.is_whitespace() && depth == 0 {
                break;
            }
            i += 1;
        }
        segments.push(slice_to(value, &chars, start, i));
    }

    segments
}

/// Consumes a balanced parenthesized group starting at `i` (which must point
/// at `(`). Returns the index one past the closing paren, or the end of input
/// when unbalanced.
fn consume_group(chars: &[(usize, char)], mut i: usize) -> usize {
    let mut depth = 0usize;
    while i < chars.len() {
        match chars[i].1 {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    i
}

/// If a quoted phrase of word characters/whitespace starts at `i`, returns
/// the index of its closing quote.
fn quoted_phrase_end(chars: &[(usize, char)], i: usize) -> Option<usize> {
    let mut j = i + 1;
    while j < chars.len() {
        let c = chars[j].1;
        if c == '"' || c == '\'' {
            // An empty phrase ("" or '') is not a phrase.
            return if j > i + 1 { Some(j) } else { None };
        }
        if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
            j += 1;
            continue;
        }
        return None;
    }
    None
}

fn consume_bare(chars: &[(usize, char)], mut i: usize) -> usize {
    while i < chars.len() && !chars[i].1.is_whitespace() {
        i += 1;
    }
    i
}

/// Interior of a group chunk: drops the first and last character. The last
/// character may not be a paren when the group ran to end of input
/// unbalanced; it is dropped regardless.
pub(crate) fn chunk_interior(chunk: &str) -> &str {
    let start = match chunk.char_indices().nth(1) {
        Some((byte, _)) => byte,
        None => return "",
    };
    let end = chunk
        .char_indices()
        .last()
        .map(|(byte, _)| byte)
        .unwrap_or(start);
    if end <= start {
        ""
    } else {
        &chunk[start..end]
    }
}

fn slice_to<'a>(value: &'a str, chars: &[(usize, char)], start: usize, end: usize) -> &'a str {
    let end_byte = chars.get(end).map_or(value.len(), |&(b, _)| b);
    &value[start..end_byte]
}
