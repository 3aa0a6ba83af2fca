//! Escaping helpers shared by the output builders.

/// Characters escaped with a backslash in GFM leaf text.
const MARKDOWN_SPECIAL: &[char] = &[
    '\\', '`', '*', '_', '[', ']', '|', '<', '>', '#', '~', '&',
];

/// Markdown characters still significant after HTML entity escaping.
const MARKDOWN_SPECIAL_AFTER_HTML: &[char] = &['\\', '`', '*', '_', '[', ']', '|', '#', '~'];

/// Escape text for embedding in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape text so Markdown renders it literally.
///
/// Escaping is conservative: every character that can open inline markup,
/// a table cell, raw HTML or an entity is backslash-escaped.
pub fn escape_markdown(text: &str) -> String {
    escape_chars(text, MARKDOWN_SPECIAL)
}

/// Escape text that sits inside inline HTML within a Markdown document.
pub fn escape_markdown_html(text: &str) -> String {
    escape_chars(&escape_html(text), MARKDOWN_SPECIAL_AFTER_HTML)
}

fn escape_chars(text: &str, special: &[char]) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if special.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

/// Escape a link destination for Markdown `[text](destination)` syntax.
pub fn escape_url(url: &str) -> String {
    let mut result = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            ' ' => result.push_str("%20"),
            '(' => result.push_str("%28"),
            ')' => result.push_str("%29"),
            '<' => result.push_str("%3C"),
            '>' => result.push_str("%3E"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a string for a double-quoted YAML scalar.
pub fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Length of the longest run of backticks in `text`.
pub(crate) fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}
