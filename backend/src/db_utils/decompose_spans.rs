//! Splits Typesense highlight snippets into plain and highlighted spans.
//!
//! Typesense wraps every matched token in the `highlight_start_tag` and
//! `highlight_end_tag` sent with the search. Marks never nest, so a snippet
//! is read left to right as alternating plain and marked runs.

use common::text_highlight::HighlightTextSpan;

/// The pair of markers Typesense puts around matched tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightTags<'a> {
    pub start: &'a str,
    pub end: &'a str,
}

/// Typesense's default markup, also requested explicitly on every search.
pub const MARK_TAGS: HighlightTags<'static> = HighlightTags {
    start: "<mark>",
    end: "</mark>",
};

pub fn decompose_text_into_spans(snippet: &str) -> Vec<HighlightTextSpan> {
    MARK_TAGS.decompose(snippet)
}

impl HighlightTags<'_> {
    /// Highlighted spans are numbered in order of appearance. A closing tag
    /// outside a mark is kept as text; an unclosed mark runs to the end.
    pub fn decompose(&self, snippet: &str) -> Vec<HighlightTextSpan> {
        let mut spans = Vec::new();
        let mut next_index = 0;
        let mut rest = snippet.trim();
        if self.start.is_empty() || self.end.is_empty() {
            push_plain(&mut spans, rest);
            return spans;
        }

        while !rest.is_empty() {
            let Some(open) = rest.find(self.start) else {
                push_plain(&mut spans, rest);
                break;
            };
            push_plain(&mut spans, &rest[..open]);

            let marked = &rest[open + self.start.len()..];
            let (token, tail) = match marked.find(self.end) {
                Some(close) => (&marked[..close], &marked[close + self.end.len()..]),
                None => (marked, ""),
            };
            if !token.is_empty() {
                spans.push(HighlightTextSpan {
                    text: token.to_string(),
                    is_highlighted: true,
                    index: next_index,
                });
                next_index += 1;
            }
            rest = tail;
        }
        spans
    }
}

fn push_plain(spans: &mut Vec<HighlightTextSpan>, text: &str) {
    if text.is_empty() {
        return;
    }
    match spans.last_mut() {
        Some(last) if !last.is_highlighted => last.text.push_str(text),
        _ => spans.push(HighlightTextSpan {
            text: text.to_string(),
            is_highlighted: false,
            index: 0,
        }),
    }
}
