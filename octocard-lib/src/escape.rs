/// Escapes text inserted into HTML to prevent injection.
///
/// Single left-to-right scan over the five HTML-significant characters, so
/// the ampersand produced by escaping one character is never re-escaped by
/// another pass. Re-applying the function to already-escaped output double
/// escapes ampersands; the markup builder is the only call site on the
/// render paths and escapes each raw value exactly once.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Percent-encodes a string for use as a single URL path segment.
///
/// Unreserved ASCII passes through; every other byte of the UTF-8 encoding
/// becomes `%XX`.
pub fn encode_path_segment(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for &byte in s.as_bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
