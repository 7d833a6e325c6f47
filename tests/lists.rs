//! Ordered list renumbering over whole documents.

use mdreflow::{ClassifierOptions, renumber_lists, renumber_lists_with};

#[macro_use]
mod prelude;
use prelude::*;

#[rstest]
#[case(lines_vec!("7. a", "3. b", "99. c"), lines_vec!("1. a", "2. b", "3. c"))]
#[case(lines_vec!("1) a", "1) b"), lines_vec!("1) a", "2) b"))]
#[case(
    lines_vec!("1. a", "    4. sub", "    9. sub2", "5. b"),
    lines_vec!("1. a", "    1. sub", "    2. sub2", "2. b")
)]
#[case(
    lines_vec!("```", "3. not a list", "```", "3. list"),
    lines_vec!("```", "3. not a list", "```", "1. list")
)]
fn renumbers(#[case] input: Vec<String>, #[case] expected: Vec<String>) {
    assert_eq!(renumber_lists(&input), expected);
}

#[test]
fn widens_past_nine() {
    let input: Vec<String> = std::iter::repeat_n(String::from("1. x"), 11).collect();
    let out = renumber_lists(&input);
    assert_eq!(out[8], "9. x");
    assert_eq!(out[9], "10. x");
    assert_eq!(out[10], "11. x");
}

#[test]
fn doxygen_markers_keep_their_form() {
    let input = lines_vec!("-# one", "-# two");
    let options = ClassifierOptions {
        doxygen: true,
        ..ClassifierOptions::default()
    };
    assert_eq!(renumber_lists_with(&input, options), input);
}

#[test]
fn header_restarts_numbering() {
    let input = lines_vec!("1. a", "2. b", "# Next", "4. c");
    assert_eq!(
        renumber_lists(&input),
        lines_vec!("1. a", "2. b", "# Next", "1. c")
    );
}
