//! Minimal WordprocessingML scanning.
//!
//! The loader only needs a handful of shapes from the document XML: balanced
//! element spans for `w:p` / `w:tbl` / `w:tc` / `w:txbxContent`, the text of
//! `w:t` runs, and explicit page-break runs (`w:br w:type="page"`). Word
//! emits machine-generated markup, so a targeted scanner over those shapes is
//! all the parsing this crate carries.

/// True when `byte` terminates an element name inside a tag
fn name_boundary(byte: Option<u8>) -> bool {
    matches!(byte, Some(b' ' | b'\t' | b'\r' | b'\n' | b'>' | b'/'))
}

/// Find the next opening tag `<name` (word-bounded) at or after `from`.
fn find_open(xml: &str, from: usize, name: &str) -> Option<usize> {
    let pat = format!("<{name}");
    let mut pos = from;
    while let Some(i) = xml[pos..].find(&pat) {
        let at = pos + i;
        if name_boundary(xml.as_bytes().get(at + pat.len()).copied()) {
            return Some(at);
        }
        pos = at + 1;
    }
    None
}

/// End offset (exclusive) of the element whose opening tag starts at
/// `open_at`, accounting for same-name nesting and self-closing tags.
/// Returns `None` on unbalanced markup.
fn element_end(xml: &str, open_at: usize, name: &str) -> Option<usize> {
    let open = format!("<{name}");
    let close = format!("</{name}>");
    let mut depth = 0usize;
    let mut pos = open_at;

    while pos < xml.len() {
        let rest = &xml[pos..];
        if rest.starts_with(&close) {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(pos + close.len());
            }
            pos += close.len();
        } else if rest.starts_with(&open)
            && name_boundary(rest.as_bytes().get(open.len()).copied())
        {
            let gt = rest.find('>')?;
            let self_closing = gt > 0 && rest.as_bytes()[gt - 1] == b'/';
            if self_closing && depth == 0 {
                return Some(pos + gt + 1);
            }
            if !self_closing {
                depth += 1;
            }
            pos += gt + 1;
        } else {
            // pos may sit on multibyte text between tags; step over one char
            // before looking for the next tag start
            let step = rest.chars().next().map_or(1, char::len_utf8);
            pos = xml[pos + step..].find('<').map(|i| pos + step + i)?;
        }
    }
    None
}

/// Outermost `<name>` element slices, in document order.
///
/// Nested same-name elements stay inside their enclosing slice, so callers
/// see each subtree exactly once.
pub fn find_elements<'a>(xml: &'a str, name: &str) -> Vec<&'a str> {
    let mut found = Vec::new();
    let mut pos = 0;
    while let Some(at) = find_open(xml, pos, name) {
        match element_end(xml, at, name) {
            Some(end) => {
                found.push(&xml[at..end]);
                pos = end;
            }
            None => {
                log::debug!("unbalanced <{name}> at byte {at}, skipping");
                pos = at + 1;
            }
        }
    }
    found
}

/// Inner slice of the `w:body` element, if present
pub fn body_slice(xml: &str) -> Option<&str> {
    let at = find_open(xml, 0, "w:body")?;
    let gt = xml[at..].find('>')? + at;
    if xml.as_bytes()[gt - 1] == b'/' {
        return Some("");
    }
    let end = element_end(xml, at, "w:body")?;
    Some(&xml[gt + 1..end - "</w:body>".len()])
}

/// A top-level child element of the document body
pub struct BodyChild<'a> {
    pub name: &'a str,
    pub slice: &'a str,
}

/// Iterate top-level children of a body slice in document order.
///
/// Children whose markup is unbalanced are skipped (partial-extraction
/// fault), the scan continues with the next element.
pub fn body_children(body: &str) -> Vec<BodyChild<'_>> {
    let mut children = Vec::new();
    let mut pos = 0;
    while pos < body.len() {
        let Some(lt) = body[pos..].find('<').map(|i| pos + i) else {
            break;
        };
        let rest = &body[lt..];
        if rest.starts_with("<!--") {
            pos = match rest.find("-->") {
                Some(i) => lt + i + 3,
                None => break,
            };
            continue;
        }
        if rest.starts_with("</") || rest.starts_with("<?") {
            pos = lt + 1;
            continue;
        }
        let name_len = rest[1..]
            .find(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n' | '>' | '/'))
            .unwrap_or(rest.len() - 1);
        let name = &rest[1..1 + name_len];
        if name.is_empty() {
            pos = lt + 1;
            continue;
        }
        match element_end(body, lt, name) {
            Some(end) => {
                children.push(BodyChild {
                    name,
                    slice: &body[lt..end],
                });
                pos = end;
            }
            None => {
                log::debug!("unbalanced body child <{name}>, skipping");
                pos = lt + 1;
            }
        }
    }
    children
}

/// Newline-joined text of all `w:t` runs inside a fragment, entity-unescaped.
/// Empty runs are dropped.
pub fn run_text(fragment: &str) -> String {
    let mut texts = Vec::new();
    let mut pos = 0;
    while let Some(at) = find_open(fragment, pos, "w:t") {
        let rest = &fragment[at..];
        let Some(gt) = rest.find('>') else {
            break;
        };
        if rest.as_bytes()[gt - 1] == b'/' {
            pos = at + gt + 1;
            continue;
        }
        let content_start = at + gt + 1;
        let Some(close) = fragment[content_start..].find("</w:t>") else {
            break;
        };
        let text = unescape(&fragment[content_start..content_start + close]);
        if !text.is_empty() {
            texts.push(text);
        }
        pos = content_start + close + "</w:t>".len();
    }
    texts.join("\n")
}

/// True when the fragment carries an explicit page-break run
pub fn has_page_break(fragment: &str) -> bool {
    let mut pos = 0;
    while let Some(at) = find_open(fragment, pos, "w:br") {
        let rest = &fragment[at..];
        let Some(gt) = rest.find('>') else {
            return false;
        };
        if break_type_is_page(&rest[..gt]) {
            return true;
        }
        pos = at + gt + 1;
    }
    false
}

fn break_type_is_page(tag: &str) -> bool {
    let Some(attr) = tag.find("w:type=") else {
        return false;
    };
    let value = &tag[attr + "w:type=".len()..];
    let mut chars = value.chars();
    let Some(quote @ ('"' | '\'')) = chars.next() else {
        return false;
    };
    value[1..]
        .split(quote)
        .next()
        .is_some_and(|v| v.eq_ignore_ascii_case("page"))
}

/// Decode the XML entities Word emits in run text
pub fn unescape(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let Some(semi) = tail.find(';') else {
            out.push_str(tail);
            return out;
        };
        let entity = &tail[1..semi];
        match entity {
            "amp" => out.push('&'),
            "lt" => out.push('<'),
            "gt" => out.push('>'),
            "quot" => out.push('"'),
            "apos" => out.push('\''),
            _ => {
                let decoded = entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32);
                match decoded {
                    Some(c) => out.push(c),
                    None => out.push_str(&tail[..=semi]),
                }
            }
        }
        rest = &tail[semi + 1..];
    }
    out.push_str(rest);
    out
}
