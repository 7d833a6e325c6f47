//! Fenced code block delimiters.

/// Shortest run of backticks or tildes that forms a fence.
const FENCE_LEN_MIN: usize = 3;

/// The character and length of an open code fence.
///
/// A fence closes only on a line whose run uses the same character, is at
/// least as long, and is followed by nothing but whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeFence {
    pub fence_char: char,
    pub fence_length: usize,
}

/// Split a line into its leading run of `ch` and the remainder.
fn leading_run(rest: &str, ch: char) -> (usize, &str) {
    let body = rest.trim_start_matches(ch);
    (rest.len() - body.len(), body)
}

impl CodeFence {
    /// Recognise an opening fence such as ```` ```rust ```` or `~~~~`.
    ///
    /// A backtick fence's info string may not itself contain a backtick, so
    /// inline code like ```` ```a``` ```` is not mistaken for a fence.
    #[must_use]
    pub fn open(rest: &str) -> Option<Self> {
        let fence_char = rest.chars().next().filter(|c| matches!(c, '`' | '~'))?;
        let (fence_length, info) = leading_run(rest, fence_char);
        if fence_length < FENCE_LEN_MIN || (fence_char == '`' && info.contains('`')) {
            return None;
        }
        Some(Self {
            fence_char,
            fence_length,
        })
    }

    /// Whether `rest` closes this fence.
    #[must_use]
    pub fn is_closed_by(&self, rest: &str) -> bool {
        let (len, after) = leading_run(rest, self.fence_char);
        len >= self.fence_length && after.trim().is_empty()
    }
}
