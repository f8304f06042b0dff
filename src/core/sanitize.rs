// src/core/sanitize.rs

/// Decode the handful of entities the audit page actually emits.
/// `&amp;` goes last so it cannot re-trigger the others.
pub fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Collapse runs of whitespace to single spaces and trim the ends.
/// Used where text is matched against a pattern, not where it is exported.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities_decode_amp_last() {
        assert_eq!(decode_entities("a&amp;b &lt;ok&gt;"), "a&b <ok>");
        // A literal "&amp;lt;" is an escaped "&lt;", not a "<".
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn ws_collapses_and_trims() {
        assert_eq!(normalize_ws("  a \n\t b  "), "a b");
        assert_eq!(normalize_ws(""), "");
    }
}
