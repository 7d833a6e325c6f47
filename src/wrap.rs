//! Paragraph rewrapping driven by the block classifier.
//!
//! Lines the classifier reports as plain text or as part of a list item or
//! footnote are joined into paragraphs and refilled with `textwrap`. Every
//! other line (code, raw HTML, headers, rules, tables, link labels) is copied
//! through unchanged and always ends the paragraph before it.

use std::borrow::Cow;

use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

use crate::{
    blocks::starts_block,
    classifier::{Classifier, ClassifierOptions},
    depth::measure_indent,
    state::ParserState,
};

/// Default target line width.
pub const WRAP_WIDTH_DEFAULT: usize = 80;

/// Text gathered for one paragraph.
struct Paragraph {
    sequence: u32,
    first_indent: String,
    hang: String,
    text: String,
    /// The paragraph ended in a two-space hard break that must survive.
    trailing_spaces: bool,
}

impl Paragraph {
    fn start(line: &str, state: &ParserState, tab_width: usize) -> Self {
        let (leading, start) = measure_indent(line, tab_width);
        Self {
            sequence: state.sequence_number,
            first_indent: line[..start].to_string(),
            hang: " ".repeat(leading.max(state.content_column())),
            text: String::new(),
            trailing_spaces: false,
        }
    }

    fn push(&mut self, line: &str) {
        let text = line.trim();
        if text.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(text);
    }
}

/// How a line forces the paragraph it belongs to to end.
fn hard_break(line: &str) -> Option<bool> {
    if line.ends_with("  ") {
        return Some(true);
    }
    let trimmed = line.trim_end();
    let backslashes = trimmed.chars().rev().take_while(|&c| c == '\\').count();
    let html_break = ["<br>", "<br/>", "<br />"]
        .iter()
        .any(|br| trimmed.ends_with(br));
    (backslashes % 2 == 1 || html_break).then_some(false)
}

fn flush_paragraph(out: &mut Vec<String>, para: Option<Paragraph>, width: usize) {
    let Some(para) = para else {
        return;
    };
    let options = Options::new(width)
        .initial_indent(&para.first_indent)
        .subsequent_indent(&para.hang)
        .break_words(false)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation)
        .wrap_algorithm(WrapAlgorithm::FirstFit);
    let mut lines: Vec<String> = textwrap::wrap(&para.text, &options)
        .into_iter()
        .map(Cow::into_owned)
        .collect();
    attach_block_markers(&mut lines);
    if para.trailing_spaces
        && let Some(last) = lines.last_mut()
    {
        last.push_str("  ");
    }
    out.extend(lines);
}

/// Move words back onto the previous line while a continuation line would be
/// read as a new list item, header, fence, or HTML block.
///
/// The previous line may end up wider than the target width.
fn attach_block_markers(lines: &mut Vec<String>) {
    let mut i = 1;
    while i < lines.len() {
        let indent = lines[i].len() - lines[i].trim_start().len();
        let body = &lines[i][indent..];
        if body.is_empty() || !starts_block(body) {
            i += 1;
            continue;
        }
        let word = body.split_once(' ').map_or(body, |(word, _)| word).to_string();
        let remainder = body[word.len()..].trim_start().to_string();
        lines[i - 1].push(' ');
        lines[i - 1].push_str(&word);
        if remainder.is_empty() {
            lines.remove(i);
        } else {
            lines[i].truncate(indent);
            lines[i].push_str(&remainder);
        }
    }
}

/// Rewrap paragraphs and list items to `width` columns.
///
/// Ordered lists are renumbered when `options.renumber` is set.
///
/// # Examples
///
/// ```
/// use mdreflow::{ClassifierOptions, wrap_text};
///
/// let lines = vec![
///     String::from("* a list item that is"),
///     String::from("  split oddly"),
/// ];
/// assert_eq!(
///     wrap_text(&lines, 80, ClassifierOptions::default()),
///     vec![String::from("* a list item that is split oddly")]
/// );
/// ```
#[must_use]
pub fn wrap_text(lines: &[String], width: usize, options: ClassifierOptions) -> Vec<String> {
    let mut classifier = Classifier::new(options);
    let mut out = Vec::with_capacity(lines.len());
    let mut para: Option<Paragraph> = None;

    for line in lines {
        let mut line = line.clone();
        let state = *classifier.classify(&mut line);

        if line.trim().is_empty() {
            flush_paragraph(&mut out, para.take(), width);
            out.push(if state.line_type.is_foldable() {
                String::new()
            } else {
                line
            });
            continue;
        }

        if !state.line_type.is_foldable() {
            flush_paragraph(&mut out, para.take(), width);
            out.push(line);
            continue;
        }

        if para
            .as_ref()
            .is_some_and(|p| p.sequence != state.sequence_number)
        {
            flush_paragraph(&mut out, para.take(), width);
        }
        let current =
            para.get_or_insert_with(|| Paragraph::start(&line, &state, options.tab_width));
        current.push(&line);

        if let Some(trailing_spaces) = hard_break(&line) {
            current.trailing_spaces = trailing_spaces;
            flush_paragraph(&mut out, para.take(), width);
        }
    }

    flush_paragraph(&mut out, para, width);
    out
}
