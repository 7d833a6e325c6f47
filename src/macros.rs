//! Helper macros used across the crate.

/// Lazily compile a [`Regex`] with a custom panic message.
///
/// The pattern is compiled on first use, so a bad pattern surfaces as a panic
/// carrying `$msg` the first time a detector runs.
///
/// # Examples
///
/// ```
/// use std::sync::LazyLock;
///
/// use regex::Regex;
/// static ATX_RE: LazyLock<Regex> = mdreflow::lazy_regex!(r"^#{1,6}[ \t]", "atx header");
/// assert!(ATX_RE.is_match("## Usage"));
/// ```
#[macro_export]
macro_rules! lazy_regex {
    ($pattern:expr, $msg:expr $(,)?) => {
        LazyLock::new(|| Regex::new($pattern).expect($msg))
    };
}
