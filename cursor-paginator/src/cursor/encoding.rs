//! Payload text layout and base64 transport encoding for cursors.
//!
//! Elements are joined with [`DELIMITER`]. Inside an element, `\` and the
//! delimiter are escaped with a backslash; the NULL marker is the bare element
//! `\N`, which no escaped value can produce.

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};

use super::CursorError;

pub(super) const DELIMITER: char = '|';
const ESCAPE: char = '\\';
const NULL_MARKER: &str = "\\N";

/// URL-safe base64 without padding, so cursors can sit in query strings as-is.
pub(super) fn base64_encode(input: &str) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode base64 text, accepting both the URL-safe and the standard alphabet.
pub(super) fn base64_decode(input: &str) -> Result<String, CursorError> {
    let bytes = if input.contains(['+', '/', '=']) {
        STANDARD.decode(input)
    } else {
        URL_SAFE_NO_PAD.decode(input)
    }
    .map_err(|_| CursorError::InvalidBase64)?;

    String::from_utf8(bytes).map_err(|_| CursorError::InvalidUtf8)
}

/// Join elements into payload text, escaping each one.
pub(super) fn join_elements(elements: &[Option<String>]) -> String {
    let mut out = String::new();
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        match element {
            None => out.push_str(NULL_MARKER),
            Some(text) => {
                for c in text.chars() {
                    if c == ESCAPE || c == DELIMITER {
                        out.push(ESCAPE);
                    }
                    out.push(c);
                }
            },
        }
    }
    out
}

/// Split payload text back into elements.
///
/// Always yields at least one element; an empty body is one empty string.
pub(super) fn split_elements(body: &str) -> Result<Vec<Option<String>>, CursorError> {
    let mut elements = Vec::new();
    let mut current = String::new();
    let mut null = false;
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        match c {
            DELIMITER => {
                elements.push(if null { None } else { Some(current.clone()) });
                current.clear();
                null = false;
            },
            ESCAPE => match chars.next() {
                Some(escaped @ (ESCAPE | DELIMITER)) if !null => current.push(escaped),
                // The marker must be the whole element
                Some('N') if current.is_empty() && !null => null = true,
                _ => return Err(CursorError::InvalidFormat),
            },
            _ if null => return Err(CursorError::InvalidFormat),
            other => current.push(other),
        }
    }
    elements.push(if null { None } else { Some(current) });

    Ok(elements)
}
