//! Clipboard sanitizing: pasted content becomes plain paragraph text.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::PasteNewlines;

fn block_break() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)<br\s*/?>|</(p|div|li|h[1-6]|blockquote|tr)\s*>")
            .expect("valid block break pattern")
    })
}

fn any_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<!--.*?-->|<(script|style)\b.*?</(script|style)\s*>|<[A-Za-z/!?][^>]*>")
            .expect("valid tag pattern")
    })
}

fn line_break() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t]*(\r\n|\r|\n)+[ \t]*").expect("valid line break pattern"))
}

/// A `<` only opens a tag when a name, `/`, `!` or `?` follows it
fn tag_open() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[A-Za-z/!?][^<>]*>").expect("valid tag open pattern"))
}

fn looks_like_html(content: &str) -> bool {
    tag_open().is_match(content)
}

fn decode_entities(text: &str) -> String {
    // &amp; last so "&amp;lt;" decodes to "&lt;" rather than "<"
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Reduce clipboard content (plain text or HTML) to paragraph text
pub fn sanitize(content: &str, newlines: PasteNewlines) -> String {
    let text = if looks_like_html(content) {
        let with_breaks = block_break().replace_all(content, "\n");
        decode_entities(&any_tag().replace_all(&with_breaks, ""))
    } else {
        content.to_string()
    };

    let trimmed = text.trim_matches(|c| c == '\n' || c == '\r');

    match newlines {
        PasteNewlines::Space => line_break().replace_all(trimmed, " ").into_owned(),
        PasteNewlines::Keep => trimmed.replace("\r\n", "\n").replace('\r', "\n"),
    }
}
