//! Span coalescing and HTML rendering for diff results.

use super::{DiffOp, DiffOpKind, DiffResult};

/// CSS class on the `<ins>` element wrapping added text.
pub const ADDED_CLASS: &str = "diff-added";

/// CSS class on the `<del>` element wrapping removed text.
pub const REMOVED_CLASS: &str = "diff-removed";

/// Shift changed runs that begin with a whitespace token one token to the
/// right when the following `Equal` op is that same whitespace.
///
/// `Equal(" quick") Insert(" brown") Equal(" fox")` becomes
/// `Equal(" quick ") Insert("brown ") Equal("fox")`. Both sides still
/// reconstruct exactly; the highlighted span just starts on a word.
pub fn align_to_word_starts(ops: &mut [DiffOp]) {
    let mut start = 0;
    while start < ops.len() {
        let kind = ops[start].kind();
        if kind == DiffOpKind::Equal {
            start += 1;
            continue;
        }

        let mut end = start;
        while end < ops.len() && ops[end].kind() == kind {
            end += 1;
        }

        let slidable = end < ops.len()
            && ops[end].kind() == DiffOpKind::Equal
            && ops[end].text() == ops[start].text()
            && ops[start].text().chars().all(char::is_whitespace);

        if slidable {
            // [K(x), K(y).., E(x)] -> [E(x), K(x), K(y)..] -> [E(x), K(y).., K(x)]
            ops[start..=end].rotate_right(1);
            ops[start + 1..=end].rotate_left(1);
            start = end + 1;
        } else {
            start = end;
        }
    }
}

/// Merge consecutive ops of the same kind into single spans.
pub fn coalesce(ops: Vec<DiffOp>) -> DiffResult {
    let mut merged: Vec<DiffOp> = Vec::with_capacity(ops.len());
    for op in ops {
        match merged.last_mut() {
            Some(last) if last.kind() == op.kind() => last.text_mut().push_str(op.text()),
            _ => merged.push(op),
        }
    }
    DiffResult::new(merged)
}

/// Escape text for safe inclusion in HTML element content or attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
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

/// Render a diff as an HTML fragment.
///
/// Equal text is emitted as-is (escaped), inserts are wrapped in
/// `<ins class="diff-added">` and deletes in `<del class="diff-removed">`.
pub fn render_html(diff: &DiffResult) -> String {
    let mut out = String::new();
    for op in diff.ops() {
        let text = escape_html(op.text());
        match op {
            DiffOp::Equal(_) => out.push_str(&text),
            DiffOp::Insert(_) => {
                out.push_str(&format!("<ins class=\"{ADDED_CLASS}\">{text}</ins>"));
            }
            DiffOp::Delete(_) => {
                out.push_str(&format!("<del class=\"{REMOVED_CLASS}\">{text}</del>"));
            }
        }
    }
    out
}
