//! Utility helpers shared across integration tests.

/// Build a `Vec<String>` from a list of string slices.
macro_rules! lines_vec {
    ($($line:expr),* $(,)?) => {
        vec![$($line.to_string()),*]
    };
}

/// Classify `lines` with default options, returning each state and the
/// possibly renumbered line.
#[allow(dead_code)]
pub fn classify_all(lines: &[String]) -> Vec<(mdreflow::ParserState, String)> {
    let mut classifier = mdreflow::Classifier::new(mdreflow::ClassifierOptions::default());
    lines
        .iter()
        .map(|line| {
            let mut line = line.clone();
            let state = *classifier.classify(&mut line);
            (state, line)
        })
        .collect()
}
