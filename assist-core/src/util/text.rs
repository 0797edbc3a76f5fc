//! Snippet and keyword helpers for result display.
//!
//! Everything counts characters, not bytes: titles and snippets are
//! mostly Japanese text.

/// Truncate to `max_chars`, appending `suffix` when anything was cut.
pub fn truncate(text: &str, max_chars: usize, suffix: &str) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push_str(suffix);
    truncated
}

/// Extract a snippet of roughly `max_chars`, centred on the first keyword
/// that occurs in the text. Without a keyword hit the snippet starts at
/// the beginning. Ellipses mark cut edges.
pub fn snippet(text: &str, keywords: &[&str], max_chars: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_chars {
        return text.to_string();
    }

    let lower: String = text.to_lowercase();
    let lower_chars: Vec<char> = lower.chars().collect();

    for keyword in keywords {
        let keyword_lower = keyword.to_lowercase();
        let keyword_chars: Vec<char> = keyword_lower.chars().collect();
        if keyword_chars.is_empty() {
            continue;
        }
        if let Some(index) = find_chars(&lower_chars, &keyword_chars) {
            let start = index.saturating_sub(max_chars / 2);
            let end = (start + max_chars).min(chars.len());
            let mut out = String::new();
            if start > 0 {
                out.push_str("...");
            }
            out.extend(&chars[start..end]);
            if end < chars.len() {
                out.push_str("...");
            }
            return out;
        }
    }

    let mut out: String = chars[..max_chars].iter().collect();
    out.push_str("...");
    out
}

/// Case-insensitive containment.
pub fn contains_ci(text: &str, query: &str) -> bool {
    if text.is_empty() || query.is_empty() {
        return false;
    }
    text.to_lowercase().contains(&query.to_lowercase())
}

/// True when every keyword occurs in the text (case-insensitive).
pub fn matches_all(text: &str, keywords: &[&str]) -> bool {
    if text.is_empty() || keywords.is_empty() {
        return false;
    }
    let lower = text.to_lowercase();
    keywords.iter().all(|k| lower.contains(&k.to_lowercase()))
}

/// True when any keyword occurs in the text (case-insensitive).
pub fn matches_any(text: &str, keywords: &[&str]) -> bool {
    if text.is_empty() || keywords.is_empty() {
        return false;
    }
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(&k.to_lowercase()))
}

fn find_chars(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}
