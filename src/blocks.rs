//! Block-level construct detectors.
//!
//! Each detector looks at a line whose leading whitespace has already been
//! stripped and reports whether the line starts the construct, plus whatever
//! data the classifier needs to track it. None of them keep state between
//! calls; "what came before" decisions belong to [`crate::classifier`].

use std::sync::LazyLock;

use regex::Regex;

use crate::fences::CodeFence;

/// Columns a footnote definition's body is indented by.
pub(crate) const FOOTNOTE_HANG: usize = 4;

/// Most spaces after an ordered marker that count towards the hang indent.
const ORDERED_SPACES_MAX: usize = 2;

/// Most spaces after an unordered or definition marker that count towards the
/// hang indent.
const UNORDERED_SPACES_MAX: usize = 3;

/// One to six `#`, the longest ATX marker being `######`.
static ATX_RE: LazyLock<Regex> = lazy_regex!(r"^#{1,6}[ \t]", "atx header regex should compile");

static ORDERED_RE: LazyLock<Regex> = lazy_regex!(
    r"^([0-9]{1,9})([.)])[ \t]",
    "ordered list regex should compile",
);

static HR_RE: LazyLock<Regex> = lazy_regex!(
    r"^(?:(?:\*[ \t]*){3,}|(?:-[ \t]*){3,}|(?:_[ \t]*){3,})\s*$",
    "horizontal rule regex should compile",
);

static FOOTNOTE_RE: LazyLock<Regex> = lazy_regex!(
    r"^\[\^[^\]]+\]:(?:[ \t]+(\S)?|\s*$)",
    "footnote definition regex should compile",
);

static LINK_LABEL_RE: LazyLock<Regex> = lazy_regex!(
    r#"^\[[^\]^][^\]]*\]:[ \t]+<?[A-Za-z][A-Za-z0-9+.\-]*:\S*(?:[ \t]+(["'(]))?"#,
    "link label regex should compile",
);

static ABBREVIATION_RE: LazyLock<Regex> = lazy_regex!(
    r"^\*\[[^\]]+\]:",
    "html abbreviation regex should compile",
);

/// An ordered list marker such as `12.` or `3)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OrderedItem {
    pub(crate) number: u32,
    pub(crate) delimiter: char,
    /// Byte length of the digit run.
    pub(crate) digits: usize,
    pub(crate) hang: usize,
}

/// Hang indent for a marker `marker_width` columns wide followed by `after`.
///
/// Counts the spaces among the next `max_spaces` characters; a tab jumps
/// straight to the cap. At least one column separates marker and text.
pub(crate) fn marker_hang(marker_width: usize, after: &str, max_spaces: usize) -> usize {
    let mut spaces = 0;
    for ch in after.chars().take(max_spaces) {
        match ch {
            ' ' => spaces += 1,
            '\t' => {
                spaces = max_spaces;
                break;
            }
            _ => break,
        }
    }
    marker_width + spaces.max(1)
}

/// `# Header` through `###### Header`.
pub(crate) fn is_atx_header(rest: &str) -> bool { ATX_RE.is_match(rest) }

/// A run of `=` or a run of `-` with nothing but whitespace after it.
///
/// Whether the run actually underlines a header depends on the previous line,
/// which the classifier checks.
pub(crate) fn is_setext_underline(rest: &str) -> bool {
    let body = rest.trim_end();
    let Some(marker) = body.chars().next() else {
        return false;
    };
    (marker == '=' || marker == '-') && body.chars().all(|c| c == marker)
}

/// Three or more of the same `*`, `-`, or `_`, whitespace allowed between.
pub(crate) fn is_horizontal_rule(rest: &str) -> bool { HR_RE.is_match(rest) }

pub(crate) fn ordered_item(rest: &str) -> Option<OrderedItem> {
    let cap = ORDERED_RE.captures(rest)?;
    let digits = cap.get(1)?;
    let number = digits.as_str().parse().ok()?;
    let delimiter = cap.get(2)?.as_str().chars().next()?;
    let marker_end = cap.get(2)?.end();
    Some(OrderedItem {
        number,
        delimiter,
        digits: digits.len(),
        hang: marker_hang(marker_end, &rest[marker_end..], ORDERED_SPACES_MAX),
    })
}

/// Doxygen's auto-numbered `-#` marker; returns its hang indent.
pub(crate) fn doxygen_ordered_item(rest: &str) -> Option<usize> {
    let after = rest.strip_prefix("-#")?;
    after
        .starts_with([' ', '\t'])
        .then(|| marker_hang(2, after, ORDERED_SPACES_MAX))
}

/// `* item`, `+ item`, or `- item`; returns the hang indent.
pub(crate) fn unordered_item(rest: &str) -> Option<usize> {
    let after = rest.strip_prefix(['*', '+', '-'])?;
    after
        .starts_with([' ', '\t'])
        .then(|| marker_hang(1, after, UNORDERED_SPACES_MAX))
}

/// `: definition`; returns the hang indent.
pub(crate) fn definition_item(rest: &str) -> Option<usize> {
    let after = rest.strip_prefix(':')?;
    after
        .starts_with([' ', '\t'])
        .then(|| marker_hang(1, after, UNORDERED_SPACES_MAX))
}

/// `[^label]:`; returns whether body text follows on the same line.
pub(crate) fn footnote_def(rest: &str) -> Option<bool> {
    let cap = FOOTNOTE_RE.captures(rest)?;
    Some(cap.get(1).is_some())
}

/// `[label]: scheme:uri`; returns whether a title follows on the same line.
///
/// Only the URI's scheme is checked.
pub(crate) fn link_label(rest: &str) -> Option<bool> {
    let cap = LINK_LABEL_RE.captures(rest)?;
    Some(cap.get(1).is_some())
}

/// A line holding nothing but a link title: `"…"`, `'…'`, or `(…)`.
pub(crate) fn is_link_title(rest: &str) -> bool {
    let body = rest.trim();
    let mut chars = body.chars();
    let (Some(open), Some(close)) = (chars.next(), chars.next_back()) else {
        return false;
    };
    matches!((open, close), ('"', '"') | ('\'', '\'') | ('(', ')'))
}

/// `*[ABBR]: expansion`.
pub(crate) fn is_html_abbreviation(rest: &str) -> bool { ABBREVIATION_RE.is_match(rest) }

/// Whether the line contains an unescaped `|` with non-whitespace before it.
pub(crate) fn is_table_row(rest: &str) -> bool {
    let mut seen_text = false;
    let mut chars = rest.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                chars.next();
                seen_text = true;
            }
            '|' if seen_text => return true,
            c if c.is_whitespace() => {}
            _ => seen_text = true,
        }
    }
    false
}

/// Whether a line beginning with `rest` could open a block of its own when it
/// follows paragraph text.
///
/// Used when rewrapping: a continuation line must never start like this.
pub(crate) fn starts_block(rest: &str) -> bool {
    is_atx_header(rest)
        || is_setext_underline(rest)
        || is_horizontal_rule(rest)
        || ordered_item(rest).is_some()
        || doxygen_ordered_item(rest).is_some()
        || unordered_item(rest).is_some()
        || definition_item(rest).is_some()
        || footnote_def(rest).is_some()
        || link_label(rest).is_some()
        || is_html_abbreviation(rest)
        || CodeFence::open(rest).is_some()
        || rest.starts_with('<')
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("# Title", true)]
    #[case("###### Six", true)]
    #[case("#\tTabbed", true)]
    #[case("####### Seven", false)]
    #[case("#hashtag", false)]
    #[case("#", false)]
    fn atx_headers(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_atx_header(line), expected);
    }

    #[rstest]
    #[case("===", true)]
    #[case("-", true)]
    #[case("----   ", true)]
    #[case("-==", false)]
    #[case("- -", false)]
    #[case("", false)]
    fn setext_underlines(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_setext_underline(line), expected);
    }

    #[rstest]
    #[case("***", true)]
    #[case("- - -", true)]
    #[case("___  ", true)]
    #[case("**", false)]
    #[case("*-*", false)]
    #[case("--- x", false)]
    fn horizontal_rules(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_horizontal_rule(line), expected);
    }

    #[rstest]
    #[case("1. one", Some((1, '.', 1, 3)))]
    #[case("12) twelve", Some((12, ')', 2, 4)))]
    #[case("3.  two spaces", Some((3, '.', 1, 4)))]
    #[case("3.    many", Some((3, '.', 1, 4)))]
    #[case("7.\ttab", Some((7, '.', 1, 4)))]
    #[case("1234567890. too long", None)]
    #[case("1.no space", None)]
    #[case("a. letter", None)]
    fn ordered_items(#[case] line: &str, #[case] expected: Option<(u32, char, usize, usize)>) {
        let got = ordered_item(line).map(|i| (i.number, i.delimiter, i.digits, i.hang));
        assert_eq!(got, expected);
    }

    #[rstest]
    #[case("* item", Some(2))]
    #[case("+  item", Some(3))]
    #[case("-   item", Some(4))]
    #[case("-     deep", Some(4))]
    #[case("*\titem", Some(4))]
    #[case("*item", None)]
    #[case("x item", None)]
    fn unordered_items(#[case] line: &str, #[case] expected: Option<usize>) {
        assert_eq!(unordered_item(line), expected);
    }

    #[test]
    fn definition_and_doxygen_items() {
        assert_eq!(definition_item(": term"), Some(2));
        assert_eq!(definition_item(":term"), None);
        assert_eq!(doxygen_ordered_item("-# step"), Some(3));
        assert_eq!(doxygen_ordered_item("-#step"), None);
    }

    #[rstest]
    #[case("[^1]: note", Some(true))]
    #[case("[^note]:", Some(false))]
    #[case("[^note]:   ", Some(false))]
    #[case("[^]: empty", None)]
    #[case("[1]: http://x", None)]
    fn footnote_definitions(#[case] line: &str, #[case] expected: Option<bool>) {
        assert_eq!(footnote_def(line), expected);
    }

    #[rstest]
    #[case("[home]: https://example.com", Some(false))]
    #[case("[home]: <https://example.com>", Some(false))]
    #[case("[home]: https://example.com \"Home\"", Some(true))]
    #[case("[home]: mailto:me@example.com (Mail)", Some(true))]
    #[case("[home]: /relative/path", None)]
    #[case("[home]:https://example.com", None)]
    #[case("[^1]: https://example.com", None)]
    fn link_labels(#[case] line: &str, #[case] expected: Option<bool>) {
        assert_eq!(link_label(line), expected);
    }

    #[rstest]
    #[case("\"Title\"", true)]
    #[case("  'Title'  ", true)]
    #[case("(Title)", true)]
    #[case("\"Title", false)]
    #[case("Title", false)]
    fn link_titles(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_link_title(line), expected);
    }

    #[rstest]
    #[case("a | b", true)]
    #[case("| a | b |", true)]
    #[case("|", false)]
    #[case("a \\| b", false)]
    #[case("plain", false)]
    fn table_rows(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_table_row(line), expected);
    }

    #[test]
    fn abbreviations() {
        assert!(is_html_abbreviation("*[HTML]: Hyper Text Markup Language"));
        assert!(!is_html_abbreviation("* [HTML]: not one"));
    }

    #[rstest]
    #[case("- epsilon", true)]
    #[case("1. items", true)]
    #[case("99) more", true)]
    #[case("# 12", true)]
    #[case("===", true)]
    #[case("```", true)]
    #[case("<div>", true)]
    #[case(": term", true)]
    #[case("[^1]: note", true)]
    #[case("12 apples", false)]
    #[case("-dash", false)]
    #[case("#hashtag", false)]
    #[case("plain words", false)]
    fn block_starts(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(starts_block(line), expected);
    }
}
