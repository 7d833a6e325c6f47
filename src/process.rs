//! High-level Markdown stream processing.

use crate::{
    classifier::{Classifier, ClassifierOptions, TAB_WIDTH_DEFAULT},
    lists::renumber_lists_with,
    wrap::{WRAP_WIDTH_DEFAULT, wrap_text},
};

/// What to do to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOpts {
    /// Rewrap paragraphs and list items.
    pub wrap: bool,
    /// Target width when wrapping.
    pub width: usize,
    /// Renumber ordered list items.
    pub renumber: bool,
    /// Recognise Doxygen's `-#` list marker.
    pub doxygen: bool,
    pub tab_width: usize,
}

impl Default for FormatOpts {
    fn default() -> Self {
        Self {
            wrap: true,
            width: WRAP_WIDTH_DEFAULT,
            renumber: false,
            doxygen: false,
            tab_width: TAB_WIDTH_DEFAULT,
        }
    }
}

impl FormatOpts {
    #[must_use]
    pub fn classifier_options(&self) -> ClassifierOptions {
        ClassifierOptions {
            doxygen: self.doxygen,
            renumber: self.renumber,
            tab_width: self.tab_width,
        }
    }
}

/// Process `lines` with the default options: wrap to 80 columns.
#[must_use]
pub fn process_stream(lines: &[String]) -> Vec<String> {
    process_stream_opts(lines, &FormatOpts::default())
}

#[must_use]
pub fn process_stream_opts(lines: &[String], opts: &FormatOpts) -> Vec<String> {
    let options = opts.classifier_options();
    if opts.wrap {
        wrap_text(lines, opts.width, options)
    } else if opts.renumber {
        renumber_lists_with(lines, options)
    } else {
        lines.to_vec()
    }
}

/// Render the classification of every line as `<tag><depth> <line>`.
///
/// Renumbering is reflected in the echoed lines when enabled.
///
/// # Examples
///
/// ```
/// use mdreflow::{FormatOpts, annotate_lines};
///
/// let lines = vec![String::from("# Title"), String::from("* item")];
/// assert_eq!(
///     annotate_lines(&lines, &FormatOpts::default()),
///     vec![String::from("#0 # Title"), String::from("*0 * item")]
/// );
/// ```
#[must_use]
pub fn annotate_lines(lines: &[String], opts: &FormatOpts) -> Vec<String> {
    let mut classifier = Classifier::new(opts.classifier_options());
    lines
        .iter()
        .map(|line| {
            let mut line = line.clone();
            let state = *classifier.classify(&mut line);
            format!("{}{} {line}", state.line_type, state.depth)
        })
        .collect()
}
