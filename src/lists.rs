//! Ordered list renumbering.

use crate::classifier::{Classifier, ClassifierOptions};

/// Number of decimal digits in `n`.
#[must_use]
pub fn digit_count(n: u32) -> usize {
    n.checked_ilog10().map_or(1, |log| log as usize + 1)
}

/// Replace the `old_digits`-byte ordinal starting at byte `start` with
/// `new_number`.
///
/// The rest of the line shifts left or right to fit the new digit count;
/// every other byte is preserved. Returns the new digit count.
///
/// # Examples
///
/// ```
/// use mdreflow::lists::rewrite_ordinal;
///
/// let mut line = String::from("  99. item");
/// assert_eq!(rewrite_ordinal(&mut line, 2, 2, 3), 1);
/// assert_eq!(line, "  3. item");
/// ```
pub fn rewrite_ordinal(line: &mut String, start: usize, old_digits: usize, new_number: u32) -> usize {
    let end = start + old_digits;
    debug_assert!(
        line.get(start..end)
            .is_some_and(|d| d.bytes().all(|b| b.is_ascii_digit())),
        "ordinal span {start}..{end} of {line:?} is not a digit run"
    );
    let digits = new_number.to_string();
    if end <= line.len() && line.is_char_boundary(start) && line.is_char_boundary(end) {
        line.replace_range(start..end, &digits);
    }
    digits.len()
}

/// Renumber ordered Markdown list items.
///
/// Each list counts from 1; nested lists count independently of their
/// parents. Code blocks and raw HTML are left alone.
///
/// # Examples
///
/// ```
/// use mdreflow::renumber_lists;
///
/// let lines = vec![String::from("1. first"), String::from("4. second")];
/// assert_eq!(
///     renumber_lists(&lines),
///     vec![String::from("1. first"), String::from("2. second")]
/// );
/// ```
#[must_use]
pub fn renumber_lists(lines: &[String]) -> Vec<String> {
    renumber_lists_with(lines, ClassifierOptions::default())
}

/// [`renumber_lists`] with explicit classifier options.
#[must_use]
pub fn renumber_lists_with(lines: &[String], options: ClassifierOptions) -> Vec<String> {
    let mut classifier = Classifier::new(ClassifierOptions {
        renumber: true,
        ..options
    });
    lines
        .iter()
        .map(|line| {
            let mut line = line.clone();
            classifier.classify(&mut line);
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, 1)]
    #[case(9, 1)]
    #[case(10, 2)]
    #[case(99, 2)]
    #[case(100, 3)]
    #[case(u32::MAX, 10)]
    fn counts_digits(#[case] n: u32, #[case] expected: usize) {
        assert_eq!(digit_count(n), expected);
    }

    #[rstest]
    #[case("7. a", 0, 1, 1, "1. a")]
    #[case("9) nine", 0, 1, 10, "10) nine")]
    #[case("   100. x", 3, 3, 7, "   7. x")]
    #[case("12.\tkeep\ttabs", 0, 2, 13, "13.\tkeep\ttabs")]
    fn rewrites_digits(
        #[case] input: &str,
        #[case] start: usize,
        #[case] old: usize,
        #[case] new: u32,
        #[case] expected: &str,
    ) {
        let mut line = input.to_string();
        let width = rewrite_ordinal(&mut line, start, old, new);
        assert_eq!(line, expected);
        assert_eq!(width, digit_count(new));
    }

    #[test]
    fn simple_renumber() {
        let input: Vec<String> = ["1. a", "3. b"].map(String::from).to_vec();
        assert_eq!(renumber_lists(&input), ["1. a", "2. b"].map(String::from));
    }

    #[test]
    fn nested_renumber() {
        let input: Vec<String> = ["1. a", "    4. sub", "    9. sub2", "5. b"]
            .map(String::from)
            .to_vec();
        let expected = ["1. a", "    1. sub", "    2. sub2", "2. b"].map(String::from);
        assert_eq!(renumber_lists(&input), expected);
    }

    #[test]
    fn fenced_code_is_untouched() {
        let input: Vec<String> = ["```", "3. not a list", "```", "3. list"]
            .map(String::from)
            .to_vec();
        let expected = ["```", "3. not a list", "```", "1. list"].map(String::from);
        assert_eq!(renumber_lists(&input), expected);
    }
}
