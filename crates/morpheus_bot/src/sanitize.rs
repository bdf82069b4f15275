//! Normalization of raw assistant output into postable text.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Lenticular source markers (`【4:0†source】`) and ASCII index markers
/// (`[1]`, `[4:0]`, `[2†source]`), with any whitespace in front of them.
static CITATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[ \t]*(?:【[^】]*】|\[\d+(?::\d+)?(?:†[^\]]*)?\])")
        .expect("citation pattern is valid")
});

const QUOTE_PAIRS: [(char, char); 2] = [('"', '"'), ('\u{201C}', '\u{201D}')];

/// Turns raw assistant output into a platform-safe post.
///
/// Citation markers are removed, a single pair of wrapping quotes is
/// dropped, and hashtags are moved to their own line after a blank line.
/// Length is not checked here; see [`char_len`].
///
/// # Examples
///
/// ```
/// use morpheus_bot::sanitize;
///
/// let raw = "\"Ouroboros picks slot leaders by stake.【4:0†source】 #Cardano #PoS\"";
/// assert_eq!(
///     sanitize(raw),
///     "Ouroboros picks slot leaders by stake.\n\n#Cardano #PoS"
/// );
/// ```
pub fn sanitize(raw: &str) -> String {
    let stripped = CITATION.replace_all(raw, "");
    let unquoted = strip_wrapping_quotes(stripped.trim());
    place_hashtags(unquoted)
}

/// Length of `text` as the platform counts it (Unicode scalar values).
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn strip_wrapping_quotes(text: &str) -> &str {
    for (open, close) in QUOTE_PAIRS {
        if text.len() < open.len_utf8() + close.len_utf8() {
            continue;
        }
        let inner = text
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close));
        if let Some(inner) = inner.filter(|inner| !inner.contains(open) && !inner.contains(close)) {
            return inner.trim();
        }
    }
    text
}

/// Tag name of a hashtag token: the word characters after the leading `#`.
///
/// All-digit names such as `#1` are ordinary text.
fn hashtag_name(token: &str) -> Option<&str> {
    let rest = token.strip_prefix('#')?.trim_start_matches('#');
    let end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    let name = &rest[..end];
    name.chars().any(|c| !c.is_numeric()).then_some(name)
}

fn place_hashtags(text: &str) -> String {
    let mut seen = HashSet::new();
    let mut tags = Vec::new();
    let mut body_lines: Vec<String> = Vec::new();

    for line in text.lines() {
        let mut body_tokens = Vec::new();
        let mut had_tags = false;
        for token in line.split_whitespace() {
            match hashtag_name(token) {
                Some(name) => {
                    had_tags = true;
                    if seen.insert(name.to_lowercase()) {
                        tags.push(format!("#{name}"));
                    }
                }
                None => body_tokens.push(token),
            }
        }
        if had_tags && body_tokens.is_empty() {
            continue;
        }
        let joined = body_tokens.join(" ");
        // Collapse runs of blank lines.
        if joined.is_empty() && body_lines.last().is_some_and(String::is_empty) {
            continue;
        }
        body_lines.push(joined);
    }

    if tags.is_empty() {
        return text.trim().to_string();
    }

    let body = body_lines.join("\n");
    let body = body.trim();
    let tag_line = tags.join(" ");
    if body.is_empty() {
        tag_line
    } else {
        format!("{body}\n\n{tag_line}")
    }
}
