// src/core/html.rs
//
// Scanning helpers for rendered markup. The page is treated as text: fields
// are located by class markers and sliced out as blocks, case-insensitively.
// Not a DOM — just enough structure awareness (attribute quoting, nested
// same-name tags) to cut the right slices out of real pages.

use super::sanitize::decode_entities;

/// Elements that never carry a close tag.
const VOID_TAGS: [&str; 8] = ["area", "base", "br", "col", "hr", "img", "input", "meta"];

fn is_void(name: &str) -> bool {
    VOID_TAGS.iter().any(|v| name.eq_ignore_ascii_case(v))
}

/// Position of the next element open tag at or after `from`.
/// Returns (index of `<`, index of `>`). Comments, close tags and doctype
/// noise are skipped.
fn next_open_tag(doc: &str, from: usize) -> Option<(usize, usize)> {
    let mut at = from;
    while at < doc.len() {
        let start = doc[at..].find('<')? + at;
        match doc[start + 1..].chars().next() {
            Some(c) if c.is_ascii_alphabetic() => {
                let gt = doc[start + 1..].find('>')? + start + 1;
                return Some((start, gt));
            }
            Some(_) => at = start + 1,
            None => return None,
        }
    }
    None
}

/// Tag name of an opening tag body (the text between `<` and `>`).
fn tag_name(tag: &str) -> &str {
    let end = tag
        .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
        .unwrap_or(tag.len());
    &tag[..end]
}

/// Read an attribute value out of an opening tag body. Handles double-quoted,
/// single-quoted and unquoted forms; attribute names match case-insensitively.
pub fn attr_value<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let lower = tag.to_ascii_lowercase();
    let needle = name.to_ascii_lowercase();
    let bytes = tag.as_bytes();
    let mut at = 0usize;
    while let Some(rel) = lower[at..].find(&needle) {
        let start = at + rel;
        at = start + 1;
        // Must sit where an attribute name can: after whitespace, before '='.
        if start == 0 || !bytes[start - 1].is_ascii_whitespace() {
            continue;
        }
        let mut i = start + needle.len();
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != b'=' {
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            return None;
        }
        return match bytes[i] {
            q @ (b'"' | b'\'') => {
                let vstart = i + 1;
                let vend = tag[vstart..].find(q as char)? + vstart;
                Some(&tag[vstart..vend])
            }
            _ => {
                let vend = tag[i..]
                    .find(|c: char| c.is_ascii_whitespace() || c == '/')
                    .map(|p| p + i)
                    .unwrap_or(tag.len());
                Some(&tag[i..vend])
            }
        };
    }
    None
}

/// Whether an opening tag body carries `token` in its `class` list.
/// Token match, not substring match: `class="audit-log-item pl-2"` has the
/// token `audit-log-item`; `class="audit-log-items"` does not.
pub fn class_list_has(tag: &str, token: &str) -> bool {
    match attr_value(tag, "class") {
        Some(list) => list
            .split_ascii_whitespace()
            .any(|c| c.eq_ignore_ascii_case(token)),
        None => false,
    }
}

/// Find a tag pattern (`<name` or `</name`) at or after `at`, rejecting
/// longer-name false hits (`<time` must not match `<timer`).
fn find_tag(lower: &str, pat: &str, mut at: usize) -> Option<usize> {
    while let Some(rel) = lower[at..].find(pat) {
        let pos = at + rel;
        let after = lower.as_bytes().get(pos + pat.len()).copied().unwrap_or(b'>');
        if after.is_ascii_alphanumeric() || after == b'-' {
            at = pos + 1;
            continue;
        }
        return Some(pos);
    }
    None
}

/// End index (exclusive) of the element whose open tag ends at `from`,
/// balancing nested same-name tags. None on unclosed markup.
fn close_of(doc: &str, name: &str, from: usize) -> Option<usize> {
    let tail = doc[from..].to_ascii_lowercase();
    let name = name.to_ascii_lowercase();
    let open = format!("<{name}");
    let close = format!("</{name}");
    let mut depth = 1usize;
    let mut at = 0usize;
    loop {
        let next_close = find_tag(&tail, &close, at)?;
        match find_tag(&tail, &open, at) {
            Some(o) if o < next_close => {
                depth += 1;
                at = o + open.len();
            }
            _ => {
                if depth == 1 {
                    let gt = tail[next_close..].find('>')? + next_close;
                    return Some(from + gt + 1);
                }
                depth -= 1;
                at = next_close + close.len();
            }
        }
    }
}

/// Byte range of the next element whose class list contains `token`,
/// starting at `from`. The block spans the opening `<` through the matching
/// close tag; self-closed and void elements end at their own `>`.
pub fn next_class_block(doc: &str, token: &str, from: usize) -> Option<(usize, usize)> {
    let mut at = from;
    while let Some((start, gt)) = next_open_tag(doc, at) {
        let tag = &doc[start + 1..gt];
        if !class_list_has(tag, token) {
            at = gt + 1;
            continue;
        }
        let name = tag_name(tag);
        if tag.ends_with('/') || is_void(name) {
            return Some((start, gt + 1));
        }
        return Some((start, close_of(doc, name, gt + 1)?));
    }
    None
}

/// Byte range of the next element named `name` (case-insensitive),
/// starting at `from`.
pub fn next_tag_block(doc: &str, name: &str, from: usize) -> Option<(usize, usize)> {
    let mut at = from;
    while let Some((start, gt)) = next_open_tag(doc, at) {
        let tag = &doc[start + 1..gt];
        if !tag_name(tag).eq_ignore_ascii_case(name) {
            at = gt + 1;
            continue;
        }
        if tag.ends_with('/') || is_void(tag_name(tag)) {
            return Some((start, gt + 1));
        }
        return Some((start, close_of(doc, tag_name(tag), gt + 1)?));
    }
    None
}

/// Opening tag body of a block produced by the finders above.
pub fn opening_tag(block: &str) -> Option<&str> {
    if !block.starts_with('<') {
        return None;
    }
    block.find('>').map(|gt| &block[1..gt])
}

/// Inner markup of an element block: between the opening tag's `>` and the
/// close tag's `<`. Empty for self-closed blocks.
fn inner(block: &str) -> &str {
    match (block.find('>'), block.rfind('<')) {
        (Some(oe), Some(cs)) if cs > oe => &block[oe + 1..cs],
        _ => "",
    }
}

/// Text content of an element block: inner markup with tags dropped and
/// entities decoded. Whitespace is preserved as written; callers that want
/// trimmed text trim at the use site.
pub fn text_of(block: &str) -> String {
    let src = inner(block);
    let mut out = String::with_capacity(src.len());
    let mut in_tag = false;
    for ch in src.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    decode_entities(&out)
}
