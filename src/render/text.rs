//! Text helpers shared by the HTML renderer.

/// Characters that attach to the preceding fragment without a space.
const CLOSING_PUNCTUATION: &[char] = &[')', '.', ',', '?', '!', ';', ':'];

/// Source escapes rewritten after rendering, longest patterns first.
const REPLACEMENTS: &[(&str, &str)] = &[
    ("---", "&mdash;"),
    ("--", "&ndash;"),
    ("\\&", "&#38;"),
    ("\\%", "%"),
    ("\\$", "$"),
    ("\\#", "#"),
    ("\\_", "_"),
    ("\\{", "{"),
    ("\\}", "}"),
];

/// Escape text for HTML element content and attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Escape document words. `&` is left alone so authors can write entities.
pub fn escape_text(s: &str) -> String {
    s.replace('<', "&lt;").replace('>', "&gt;")
}

/// Apply dash and escape replacements to rendered words.
pub fn post_process(s: &str) -> String {
    REPLACEMENTS
        .iter()
        .fold(s.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Join rendered fragments with single spaces, except before closing
/// punctuation and after an opening parenthesis.
pub fn join_fragments<I>(fragments: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut out = String::new();
    for fragment in fragments.into_iter().filter(|f| !f.is_empty()) {
        let attaches = fragment.starts_with(CLOSING_PUNCTUATION) || out.ends_with('(');
        if !out.is_empty() && !attaches {
            out.push(' ');
        }
        out.push_str(&fragment);
    }
    out
}

/// `theorem` -> `Theorem`
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
