//! Indentation measurement and indent-to-depth estimates.

use crate::state::LineType;

/// Columns of indentation that turn a line into indented code.
pub const CODE_INDENT_MIN: usize = 4;

/// Sentinel remainder for a divisor that does not apply.
const REMAINDER_NONE: usize = usize::MAX;

/// Measure leading whitespace.
///
/// Returns the width in columns, with tabs advancing to the next multiple of
/// `tab_width`, and the byte offset of the first non-whitespace character.
#[must_use]
pub fn measure_indent(line: &str, tab_width: usize) -> (usize, usize) {
    let tab_width = tab_width.max(1);
    let mut columns = 0;
    for (idx, ch) in line.char_indices() {
        match ch {
            ' ' => columns += 1,
            '\t' => columns += tab_width - columns % tab_width,
            _ => return (columns, idx),
        }
    }
    (columns, line.len())
}

/// Pick the indent unit that best explains `indent`.
///
/// Lists nested under ordered items are usually indented in steps of three
/// (`1. `), under unordered or definition items in steps of two (`* `), and
/// otherwise in steps of four. The divisor leaving the smallest remainder
/// wins; ties go to the larger divisor. Steps of two only count when the
/// innermost open list is unordered or a definition list.
#[must_use]
pub fn divisor(indent: usize, nestable: Option<LineType>) -> usize {
    let by_four = indent % 4;
    let by_three = indent % 3;
    let by_two = match nestable {
        Some(LineType::DefinitionList | LineType::UnorderedList) => indent % 2,
        _ => REMAINDER_NONE,
    };
    if by_four <= by_three && by_four <= by_two {
        4
    } else if by_three <= by_two {
        3
    } else {
        2
    }
}

/// Estimate the nesting depth implied by `indent` alone.
#[must_use]
pub fn indent_depth(indent: usize, nestable: Option<LineType>) -> usize {
    indent / divisor(indent, nestable)
}

/// Indent at which a line becomes indented code, given the content column of
/// the innermost open list item (if any).
#[must_use]
pub fn code_threshold(content_column: Option<usize>) -> usize {
    content_column.unwrap_or(0) + CODE_INDENT_MIN
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("text", 4, (0, 0))]
    #[case("   text", 4, (3, 3))]
    #[case("\ttext", 4, (4, 1))]
    #[case("  \ttext", 4, (4, 3))]
    #[case("  \ttext", 8, (8, 3))]
    #[case("    ", 4, (4, 4))]
    fn measures_indent(#[case] line: &str, #[case] tab: usize, #[case] expected: (usize, usize)) {
        assert_eq!(measure_indent(line, tab), expected);
    }

    #[rstest]
    #[case(0, None, 4)]
    #[case(3, Some(LineType::OrderedList), 3)]
    #[case(6, Some(LineType::OrderedList), 3)]
    #[case(8, Some(LineType::OrderedList), 4)]
    #[case(12, Some(LineType::OrderedList), 4)]
    #[case(2, Some(LineType::UnorderedList), 2)]
    #[case(2, Some(LineType::OrderedList), 4)]
    #[case(4, Some(LineType::UnorderedList), 4)]
    #[case(5, Some(LineType::DefinitionList), 4)]
    #[case(10, Some(LineType::UnorderedList), 2)]
    fn chooses_divisor(
        #[case] indent: usize,
        #[case] nestable: Option<LineType>,
        #[case] expected: usize,
    ) {
        assert_eq!(divisor(indent, nestable), expected);
    }

    #[test]
    fn depth_from_indent() {
        assert_eq!(indent_depth(3, Some(LineType::OrderedList)), 1);
        assert_eq!(indent_depth(6, Some(LineType::OrderedList)), 2);
        assert_eq!(indent_depth(2, Some(LineType::UnorderedList)), 1);
        assert_eq!(indent_depth(8, None), 2);
    }

    #[test]
    fn code_threshold_follows_content_column() {
        assert_eq!(code_threshold(None), 4);
        assert_eq!(code_threshold(Some(3)), 7);
    }
}
