use crate::block::Span;

const CODE_MARKER: char = '`';
const BOLD_MARKER: &str = "**";

/// Parse the inline formatting of a single line into a flat list of spans.
///
/// A backtick anywhere on the line switches the whole line to code-span
/// parsing: links and bold markers on such a line stay literal text.
pub fn format_inline(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();

    if line.contains(CODE_MARKER) {
        code_spans(line, &mut spans);
    } else {
        link_spans(line, &mut spans);
    }

    if spans.is_empty() {
        spans.push(Span::Text(line.to_string()));
    }
    spans
}

/// Alternate text and code segments split on backticks. A lone trailing
/// backtick still opens a code span running to the end of the line.
fn code_spans(line: &str, spans: &mut Vec<Span>) {
    for (index, part) in line.split(CODE_MARKER).enumerate() {
        if index % 2 == 0 {
            push_text(spans, part);
        } else {
            spans.push(Span::Code(part.to_string()));
        }
    }
}

/// Left-to-right, non-overlapping `[text](url)` matches. The text around
/// the links is handed on to the bold pass.
fn link_spans(line: &str, spans: &mut Vec<Span>) {
    let mut rest = line;

    while let Some((start, end, text, url)) = find_link(rest) {
        bold_spans(&rest[..start], spans);
        spans.push(Span::Link {
            text: text.to_string(),
            url: url.to_string(),
        });
        rest = &rest[end..];
    }

    bold_spans(rest, spans);
}

/// Find the first link in `s`, returning its byte range, text and url.
///
/// The text runs to the first `]` and must be non-empty; the url runs to
/// the first `)` after `](` and must be non-empty too.
fn find_link(s: &str) -> Option<(usize, usize, &str, &str)> {
    let mut from = 0;

    while let Some(offset) = s[from..].find('[') {
        let start = from + offset;
        from = start + 1;

        let text_start = start + 1;
        let Some(text_len) = s[text_start..].find(']') else {
            // No closing bracket anywhere further on.
            return None;
        };
        if text_len == 0 {
            continue;
        }
        let text_end = text_start + text_len;

        let url_start = text_end + 2;
        if !s[text_end + 1..].starts_with('(') {
            continue;
        }
        let Some(url_len) = s[url_start..].find(')') else {
            continue;
        };
        if url_len == 0 {
            continue;
        }
        let url_end = url_start + url_len;

        return Some((
            start,
            url_end + 1,
            &s[text_start..text_end],
            &s[url_start..url_end],
        ));
    }

    None
}

/// Alternate text and bold segments split on `**`.
fn bold_spans(fragment: &str, spans: &mut Vec<Span>) {
    if !fragment.contains(BOLD_MARKER) {
        push_text(spans, fragment);
        return;
    }

    let parts: Vec<&str> = fragment.split(BOLD_MARKER).collect();
    let unterminated = parts.len() % 2 == 0;

    for (index, part) in parts.iter().enumerate() {
        if index % 2 == 0 {
            push_text(spans, part);
        } else if unterminated && index == parts.len() - 1 {
            push_text(spans, &format!("{BOLD_MARKER}{part}"));
        } else {
            spans.push(Span::Bold(part.to_string()));
        }
    }
}

/// Append plain text, dropping empty pieces and merging with a preceding
/// text span.
fn push_text(spans: &mut Vec<Span>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Span::Text(last)) = spans.last_mut() {
        last.push_str(text);
    } else {
        spans.push(Span::Text(text.to_string()));
    }
}
