//! Splits a filter expression into OR-groups of AND-segments.
//!
//! Delimiters and the escape sequence are matched case-insensitively. OR is
//! split first since it binds looser than AND. Escapes are resolved in two
//! passes: the OR pass only removes the escape in front of an OR delimiter,
//! and the final AND pass resolves everything else.

use tracing::trace;

/// One atomic unit of a filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub negate: bool,
}

impl Segment {
    pub fn new(text: impl Into<String>, negate: bool) -> Self {
        Self {
            text: text.into(),
            negate,
        }
    }
}

pub type OrGroup = Vec<Segment>;
pub type ParsedExpression = Vec<OrGroup>;

#[derive(Debug, Clone)]
pub struct Tokenizer {
    pub or_delimiter: String,
    pub and_delimiter: String,
    pub escape_sequence: String,
    pub invert_prefix: String,
    pub invert_suffix: String,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            or_delimiter: "|".into(),
            and_delimiter: "&".into(),
            escape_sequence: "\\".into(),
            invert_prefix: "!".into(),
            invert_suffix: String::new(),
        }
    }
}

impl Tokenizer {
    /// Splits `expression` and resolves the negation wrapper of every segment.
    pub fn tokenize(&self, expression: &str) -> ParsedExpression {
        let parsed: ParsedExpression = self
            .split(expression)
            .into_iter()
            .map(|group| {
                group
                    .into_iter()
                    .map(|text| {
                        let (negate, stripped) =
                            detect_negation(&text, &self.invert_prefix, &self.invert_suffix);
                        Segment::new(stripped, negate)
                    })
                    .collect()
            })
            .collect();

        trace!(?parsed, "Tokenized filter expression");
        parsed
    }

    /// Splits `expression` into OR-groups of AND-segments without looking at
    /// negation. Empty segments and empty groups are dropped.
    pub fn split(&self, expression: &str) -> Vec<Vec<String>> {
        split_on_delimiter(expression.trim(), &self.or_delimiter, &self.escape_sequence, false)
            .iter()
            .map(|or_segment| {
                split_on_delimiter(or_segment, &self.and_delimiter, &self.escape_sequence, true)
            })
            .filter(|and_segments| !and_segments.is_empty())
            .collect()
    }
}

/// Splits `input` on unescaped `delimiter`, trimming each segment and
/// dropping empty ones.
///
/// `escape` followed by `delimiter` yields the delimiter itself. A doubled
/// escape yields a single escape when `final_pass` is set and is kept doubled
/// otherwise. Any other escape is dropped on the final pass and kept otherwise.
/// An empty `delimiter` disables splitting; an empty `escape` disables escaping.
pub fn split_on_delimiter(
    input: &str,
    delimiter: &str,
    escape: &str,
    final_pass: bool,
) -> Vec<String> {
    if delimiter.is_empty() {
        let trimmed = input.trim();
        return if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![trimmed.to_string()]
        };
    }

    let chars: Vec<char> = input.chars().collect();
    let delim: Vec<char> = delimiter.chars().collect();
    let esc: Vec<char> = escape.chars().collect();

    let mut segments = Vec::new();
    let mut extracted = String::new();
    let mut pos = 0;

    while pos < chars.len() {
        if !esc.is_empty() && matches_at(&chars, pos, &esc) {
            let after = pos + esc.len();

            if matches_at(&chars, after, &esc) {
                if !final_pass {
                    extracted.extend(&chars[pos..after]);
                }
                extracted.extend(&chars[after..after + esc.len()]);
                pos = after + esc.len();
                continue;
            }

            if matches_at(&chars, after, &delim) {
                extracted.extend(&chars[after..after + delim.len()]);
                pos = after + delim.len();
                continue;
            }

            if final_pass {
                pos = after;
                continue;
            }
        }

        if matches_at(&chars, pos, &delim) {
            push_trimmed(&mut segments, &extracted);
            extracted.clear();
            pos += delim.len();
            continue;
        }

        extracted.push(chars[pos]);
        pos += 1;
    }

    push_trimmed(&mut segments, &extracted);
    segments
}

fn push_trimmed(segments: &mut Vec<String>, extracted: &str) {
    let trimmed = extracted.trim();
    if !trimmed.is_empty() {
        segments.push(trimmed.to_string());
    }
}

fn matches_at(haystack: &[char], pos: usize, needle: &[char]) -> bool {
    pos + needle.len() <= haystack.len()
        && haystack[pos..pos + needle.len()]
            .iter()
            .zip(needle)
            .all(|(a, b)| chars_eq_ignore_case(*a, *b))
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Returns the part of `text` between `prefix` and `suffix` if `text` starts
/// with `prefix` and ends with `suffix`, ignoring case.
///
/// `text` must be at least as long as both markers together, so the markers
/// never overlap: with `prefix == suffix == "#"`, `"#"` does not match.
pub fn strip_prefix_suffix<'a>(text: &'a str, prefix: &str, suffix: &str) -> Option<&'a str> {
    let prefix_len = prefix.chars().count();
    let suffix_len = suffix.chars().count();
    let text_len = text.chars().count();

    if text_len < prefix_len + suffix_len {
        return None;
    }

    let byte_at = |n: usize| {
        text.char_indices()
            .nth(n)
            .map(|(i, _)| i)
            .unwrap_or(text.len())
    };
    let start = byte_at(prefix_len);
    let end = byte_at(text_len - suffix_len);

    if !eq_ignore_case(&text[..start], prefix) || !eq_ignore_case(&text[end..], suffix) {
        return None;
    }

    Some(&text[start..end])
}

/// Detects a segment wrapped in the logic inversion prefix and suffix.
///
/// Returns whether the segment is negated together with the segment text,
/// stripped of the markers and trimmed when negated. Negation is disabled when
/// both markers are empty.
pub fn detect_negation(segment: &str, prefix: &str, suffix: &str) -> (bool, String) {
    if prefix.is_empty() && suffix.is_empty() {
        return (false, segment.to_string());
    }

    match strip_prefix_suffix(segment, prefix, suffix) {
        Some(inner) => (true, inner.trim().to_string()),
        None => (false, segment.to_string()),
    }
}
