//! String helpers shared by the parsers
//!
//! Naming transforms (`xform_name`, `get_class_prefix`), reserved-name checks,
//! doc anchors and the short docstring builder used for method summaries.

use regex::Regex;
use std::sync::LazyLock;

/// Default character budget for a method summary
pub const MAX_DOCSTRING_LENGTH: usize = 300;

const WRAP_WIDTH: usize = 80;

static FIRST_CAP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").unwrap());
static END_CAP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());
static SPECIAL_CASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]{2,}s$").unwrap());
static BLOCK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?(p|li|ul|ol|br|div|note|important)\s*/?>").unwrap());
static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Convert an SDK CamelCase name to the snake_case name the SDK exposes.
///
/// Names that already contain an underscore are returned unchanged, and a
/// trailing plural acronym is kept together (`ListARNs` -> `list_arns`).
///
/// # Examples
/// ```
/// use sdk_stubs_builder_common::xform_name;
///
/// assert_eq!(xform_name("CreateQueue"), "create_queue");
/// assert_eq!(xform_name("DBInstance"), "db_instance");
/// assert_eq!(xform_name("already_snake"), "already_snake");
/// ```
pub fn xform_name(name: &str) -> String {
    if name.contains('_') {
        return name.to_string();
    }

    let name = match SPECIAL_CASE.find(name) {
        Some(matched) => format!(
            "{}_{}",
            &name[..matched.start()],
            matched.as_str().to_lowercase()
        ),
        None => name.to_string(),
    };

    let first = FIRST_CAP.replace_all(&name, "${1}_${2}");
    END_CAP.replace_all(&first, "${1}_${2}").to_lowercase()
}

/// Get a class name prefix from a snake_case name (`queue_urls` -> `QueueUrls`)
pub fn get_class_prefix(func_name: &str) -> String {
    func_name
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Convert a header to a markdown anchor
pub fn get_anchor_link(text: &str) -> String {
    text.trim().replace(' ', "-").replace('.', "").to_lowercase()
}

/// Check whether a name conflicts with a keyword, built-in or `typing` name
///
/// # Examples
/// ```
/// use sdk_stubs_builder_common::is_reserved;
///
/// assert!(is_reserved("lambda"));
/// assert!(is_reserved("Type"));
/// assert!(!is_reserved("myCustomThing123"));
/// ```
pub fn is_reserved(word: &str) -> bool {
    crate::reserved::contains(word)
}

/// Turn an HTML documentation fragment into plain text lines
pub fn strip_html_tags(html: &str) -> String {
    let text = BLOCK_TAG.replace_all(html, "\n");
    let text = ANY_TAG.replace_all(&text, "");
    let text = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Create a short summary from SDK documentation
///
/// Trims the text to [`MAX_DOCSTRING_LENGTH`] characters, keeps the first
/// sentence, collapses double and triple backticks, closes an unmatched
/// backtick and wraps the result to 80 columns.
pub fn get_short_docstring(doc: &str) -> String {
    get_short_docstring_with_limit(doc, MAX_DOCSTRING_LENGTH)
}

/// [`get_short_docstring`] with a custom character budget
pub fn get_short_docstring_with_limit(doc: &str, max_length: usize) -> String {
    if doc.is_empty() {
        return String::new();
    }

    let doc: String = if doc.chars().count() > max_length {
        let kept: String = doc.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        doc.to_string()
    };

    let mut result: Vec<&str> = Vec::new();
    for line in doc.lines() {
        let line = line.trim().trim_end_matches(':');
        if line.starts_with(':') {
            break;
        }
        if line.is_empty() {
            continue;
        }
        if let Some((sentence, _)) = line.split_once(". ") {
            result.push(sentence);
            break;
        }
        result.push(line);
        if line.ends_with('.') {
            break;
        }
    }

    let mut summary = result
        .join(" ")
        .replace("```", "`")
        .replace("``", "`")
        .trim()
        .to_string();
    if summary.matches('`').count() % 2 == 1 {
        summary.push('`');
    }
    if !summary.is_empty() && !summary.ends_with('.') {
        summary.push('.');
    }

    wrap(&summary, WRAP_WIDTH).join("\n")
}

fn is_letter(c: Option<&char>) -> bool {
    c.is_some_and(|c| c.is_alphabetic() || *c == '_')
}

fn is_word_char(c: Option<&char>) -> bool {
    c.is_some_and(|c| c.is_alphanumeric() || *c == '_')
}

fn is_word_punct(c: Option<&char>) -> bool {
    is_word_char(c) || c.is_some_and(|c| "!\"'&.,?".contains(*c))
}

/// Split text into words and single-space separators
///
/// A word is further split after a hyphen joining letters (`well-known` ->
/// `well-`, `known`) and around a dash run between words (`a--b` -> `a`,
/// `--`, `b`).
fn wrap_chunks(text: &str) -> Vec<String> {
    let mut result = Vec::new();

    for (index, word) in text.split_whitespace().enumerate() {
        if index > 0 {
            result.push(" ".to_string());
        }
        let chars: Vec<char> = word.chars().collect();
        let at = |i: usize| chars.get(i);
        let before = |i: usize, n: usize| i.checked_sub(n).and_then(|j| chars.get(j));
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            if chars[i] != '-' {
                i += 1;
                continue;
            }

            let run_end = chars[i..]
                .iter()
                .position(|c| *c != '-')
                .map_or(chars.len(), |offset| i + offset);
            if run_end - i >= 2 && is_word_punct(before(i, 1)) && is_word_char(at(run_end)) {
                if start < i {
                    result.push(chars[start..i].iter().collect());
                }
                result.push(chars[i..run_end].iter().collect());
                start = run_end;
                i = run_end;
                continue;
            }

            let letters_before = (is_letter(before(i, 2)) && is_letter(before(i, 1)))
                || (is_letter(before(i, 3))
                    && before(i, 2) == Some(&'-')
                    && is_letter(before(i, 1)));
            let letters_after = is_letter(at(i + 1))
                && (is_letter(at(i + 2)) || (at(i + 2) == Some(&'-') && is_letter(at(i + 3))));
            if i > start && letters_before && letters_after {
                result.push(chars[start..=i].iter().collect());
                start = i + 1;
            }
            i += 1;
        }

        if start < chars.len() {
            result.push(chars[start..].iter().collect());
        }
    }

    result
}

/// Greedy wrap that breaks on spaces and after hyphens
///
/// A chunk longer than `width` fills the rest of the current line, split at
/// its last hyphen that fits when there is one.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut chunks = wrap_chunks(text);
    chunks.reverse();
    let mut lines = Vec::new();

    while !chunks.is_empty() {
        if !lines.is_empty() && chunks.last().is_some_and(|chunk| chunk == " ") {
            chunks.pop();
        }

        let mut line: Vec<String> = Vec::new();
        let mut line_len = 0;
        while let Some(chunk) = chunks.last() {
            let len = chunk.chars().count();
            if line_len + len > width {
                break;
            }
            line_len += len;
            line.extend(chunks.pop());
        }

        if let Some(chunk) = chunks.last_mut() {
            let chars: Vec<char> = chunk.chars().collect();
            if chars.len() > width {
                let space_left = if width < 1 { 1 } else { width - line_len };
                let mut end = space_left;
                if let Some(hyphen) = chars[..space_left].iter().rposition(|c| *c == '-') {
                    if hyphen > 0 && chars[..hyphen].iter().any(|c| *c != '-') {
                        end = hyphen + 1;
                    }
                }
                line.push(chars[..end].iter().collect());
                *chunk = chars[end..].iter().collect();
            }
        }

        if line.last().is_some_and(|chunk| chunk.trim().is_empty()) {
            line.pop();
        }
        if !line.is_empty() {
            lines.push(line.concat());
        }
    }

    lines
}
