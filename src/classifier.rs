//! Per-line Markdown and Doxygen block classification.
//!
//! [`Classifier`] is fed one line at a time, in document order, and reports
//! which block construct the line starts or continues. It keeps a stack of
//! open nesting levels (lists and footnotes) plus the transient state of an
//! open code fence or raw HTML block, and never looks ahead.
//!
//! Every line is classified as something: malformed constructs degrade to
//! plain text rather than producing errors.

use tracing::debug;

use crate::{
    blocks::{self, FOOTNOTE_HANG, OrderedItem},
    depth::{code_threshold, indent_depth, measure_indent},
    fences::CodeFence,
    html::{HtmlBlock, HtmlOpen, HtmlState},
    lists::{digit_count, rewrite_ordinal},
    stack::StateStack,
    state::{LineType, ParserState},
};

/// Default tab stop used when measuring indentation.
pub const TAB_WIDTH_DEFAULT: usize = 4;

/// Behaviour switches for a [`Classifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierOptions {
    /// Recognise Doxygen's `-#` auto-numbered list marker.
    pub doxygen: bool,
    /// Rewrite ordered list ordinals so each list counts up from 1.
    pub renumber: bool,
    /// Tab stop used when measuring indentation.
    pub tab_width: usize,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            doxygen: false,
            renumber: true,
            tab_width: TAB_WIDTH_DEFAULT,
        }
    }
}

/// Which stack entry a line reports.
#[derive(Clone, Copy)]
enum Report {
    Top,
    Bottom,
}

/// An ordinal that has to be rewritten once the line is no longer borrowed.
struct Rewrite {
    start: usize,
    old_digits: usize,
    number: u32,
}

struct Step {
    report: Report,
    rewrite: Option<Rewrite>,
}

impl Step {
    fn top() -> Self {
        Self {
            report: Report::Top,
            rewrite: None,
        }
    }

    fn bottom() -> Self {
        Self {
            report: Report::Bottom,
            rewrite: None,
        }
    }
}

/// A nestable marker found on a line.
#[derive(Clone, Copy)]
enum Item {
    Ordered(OrderedItem),
    Doxygen(usize),
    Unordered(usize),
    Definition(usize),
    Footnote(bool),
}

impl Item {
    fn line_type(self) -> LineType {
        match self {
            Self::Ordered(_) | Self::Doxygen(_) => LineType::OrderedList,
            Self::Unordered(_) => LineType::UnorderedList,
            Self::Definition(_) => LineType::DefinitionList,
            Self::Footnote(_) => LineType::FootnoteDef,
        }
    }

    fn ordered_char(self) -> char {
        match self {
            Self::Ordered(o) => o.delimiter,
            Self::Doxygen(_) => '#',
            _ => '.',
        }
    }

    /// Whether `state` is an entry of the same list this item belongs to.
    fn continues(self, state: &ParserState) -> bool {
        state.line_type == self.line_type()
            && (state.line_type != LineType::OrderedList
                || state.ordered_list_char == self.ordered_char())
    }
}

/// The line currently being classified.
struct Line<'a> {
    /// Text after the leading whitespace, line terminator removed.
    rest: &'a str,
    /// Byte offset of `rest` within the line.
    start: usize,
    indent: usize,
    blank: bool,
}

/// Stateful, single-pass block classifier for one document.
///
/// # Examples
///
/// ```
/// use mdreflow::{Classifier, ClassifierOptions, LineType};
///
/// let mut classifier = Classifier::new(ClassifierOptions::default());
/// let mut line = String::from("# Title");
/// assert_eq!(classifier.classify(&mut line).line_type, LineType::HeaderAtx);
/// let mut line = String::from("5. first");
/// let state = *classifier.classify(&mut line);
/// assert_eq!(state.line_type, LineType::OrderedList);
/// assert_eq!(line, "1. first");
/// ```
#[derive(Debug)]
pub struct Classifier {
    options: ClassifierOptions,
    stack: StateStack,
    html: HtmlBlock,
    fence: Option<CodeFence>,
    /// The last line closed the fence; pop the code entry on the next one.
    fence_closed: bool,
    /// The open link label had no title; the next line may supply one.
    link_title_pending: bool,
    last_sequence: u32,
    prev_blank: bool,
    prev_type: LineType,
    prev_sequence: u32,
}

impl Classifier {
    #[must_use]
    pub fn new(options: ClassifierOptions) -> Self {
        Self {
            options,
            stack: StateStack::new(1),
            html: HtmlBlock::default(),
            fence: None,
            fence_closed: false,
            link_title_pending: false,
            last_sequence: 1,
            // A leading `---` is a rule, not an underline.
            prev_blank: true,
            prev_type: LineType::None,
            prev_sequence: 0,
        }
    }

    /// Forget everything and start a new document.
    pub fn reset(&mut self) { *self = Self::new(self.options); }

    /// Number of open levels, including the bottom text entry.
    #[must_use]
    pub fn open_levels(&self) -> usize { self.stack.len() }

    /// The innermost open level.
    #[must_use]
    pub fn top(&self) -> &ParserState { self.stack.top() }

    /// The outermost level, always plain text at depth 0.
    #[must_use]
    pub fn bottom(&self) -> &ParserState { self.stack.bottom() }

    #[must_use]
    pub fn html_state(&self) -> HtmlState { self.html.state() }

    #[must_use]
    pub fn code_fence(&self) -> Option<CodeFence> { self.fence }

    /// Classify the next line of the document.
    ///
    /// A trailing `\n` or `\r\n` is ignored. The line is modified only when it
    /// is an ordered list item whose ordinal gets renumbered. Blank lines
    /// outside code and raw HTML report the bottom text entry.
    pub fn classify(&mut self, line: &mut String) -> &ParserState {
        let step = self.transition(line);
        if let Some(rewrite) = step.rewrite {
            rewrite_ordinal(line, rewrite.start, rewrite.old_digits, rewrite.number);
        }
        let reported = match step.report {
            Report::Top => self.stack.top(),
            Report::Bottom => self.stack.bottom(),
        };
        self.prev_type = reported.line_type;
        self.prev_sequence = reported.sequence_number;
        reported
    }

    fn next_sequence(&mut self) -> u32 {
        self.last_sequence += 1;
        self.last_sequence
    }

    fn top_type(&self) -> LineType { self.stack.top().line_type }

    fn code_threshold(&self) -> usize {
        code_threshold(self.stack.innermost_nestable().map(ParserState::content_column))
    }

    /// Whether the previous line ended any paragraph, so a new block may
    /// start without interrupting one.
    fn at_block_boundary(&self) -> bool { self.prev_blank || !self.prev_type.is_foldable() }

    fn transition(&mut self, raw: &str) -> Step {
        let text = raw.trim_end_matches(['\n', '\r']);
        let (indent, start) = measure_indent(text, self.options.tab_width);
        let rest = &text[start..];
        let line = Line {
            rest,
            start,
            indent,
            blank: rest.trim().is_empty(),
        };
        let step = self.dispatch(&line);
        self.prev_blank = line.blank;
        step
    }

    fn dispatch(&mut self, line: &Line<'_>) -> Step {
        self.pop_finished();

        if self.top_type() == LineType::Code {
            if let Some(fence) = self.fence {
                if fence.is_closed_by(line.rest) {
                    debug!(fence = %fence.fence_char, "code fence closed");
                    self.fence_closed = true;
                }
                return Step::top();
            }
            if line.blank || line.indent >= self.code_threshold() {
                return Step::top();
            }
            self.stack.pop();
        }

        match self.top_type() {
            t if t.is_one_shot() => self.stack.pop(),
            LineType::LinkLabel => {
                let pending = std::mem::take(&mut self.link_title_pending);
                if pending && !line.blank && blocks::is_link_title(line.rest) {
                    return Step::top();
                }
                self.stack.pop();
            }
            LineType::Table => {
                if blocks::is_table_row(line.rest) {
                    return Step::top();
                }
                self.stack.pop();
            }
            _ => {}
        }

        if line.blank {
            if self.top_type() == LineType::HtmlBlock {
                if self.html.state() != HtmlState::Element {
                    return Step::top();
                }
                debug!("html block ended by blank line");
                self.close_html();
            }
            return Step::bottom();
        }

        if self.top_type() == LineType::HtmlBlock {
            self.html.observe(line.rest);
            if self.html.state() == HtmlState::End {
                debug!("html block closed");
            }
            return Step::top();
        }

        if line.indent >= self.code_threshold() && self.at_block_boundary() {
            let state = ParserState {
                indent_left: line.indent,
                ..ParserState::new(LineType::Code, self.next_sequence(), self.stack.effective_depth())
            };
            self.stack.push(state);
            return Step::top();
        }

        if let Some(step) = self.dispatch_bounded(line) {
            return step;
        }

        if let Some(item) = self.nestable_item(line) {
            return self.open_item(item, line);
        }

        if self.at_block_boundary() && blocks::is_table_row(line.rest) {
            return self.open_single(LineType::Table, line.indent);
        }

        self.continue_text(line)
    }

    /// Pop a fenced code block or HTML block whose end was seen on the
    /// previous line.
    fn pop_finished(&mut self) {
        if std::mem::take(&mut self.fence_closed) {
            self.fence = None;
            if self.top_type() == LineType::Code {
                self.stack.pop();
            }
        }
        if self.html.state() == HtmlState::End {
            self.close_html();
        }
    }

    fn close_html(&mut self) {
        self.html.reset();
        if self.top_type() == LineType::HtmlBlock {
            self.stack.pop();
        }
    }

    /// Detectors for constructs that replace whatever is open.
    fn dispatch_bounded(&mut self, line: &Line<'_>) -> Option<Step> {
        let rest = line.rest;
        let setext_ok = !self.prev_blank && self.prev_type == LineType::Text;
        let line_type = match rest.chars().next()? {
            '#' if blocks::is_atx_header(rest) => LineType::HeaderAtx,
            '=' | '-' if setext_ok && blocks::is_setext_underline(rest) => LineType::HeaderSetext,
            '-' | '*' | '_' if blocks::is_horizontal_rule(rest) => LineType::HorizontalRule,
            '*' if blocks::is_html_abbreviation(rest) => LineType::HtmlAbbreviation,
            '[' => {
                let has_title = blocks::link_label(rest)?;
                self.link_title_pending = !has_title;
                LineType::LinkLabel
            }
            '`' | '~' => {
                let fence = CodeFence::open(rest)?;
                debug!(fence = %fence.fence_char, len = fence.fence_length, "code fence opened");
                self.fence = Some(fence);
                LineType::Code
            }
            '<' => {
                match self.html.open(rest)? {
                    HtmlOpen::Block => {}
                    HtmlOpen::Standalone if self.at_block_boundary() => {}
                    HtmlOpen::Standalone => {
                        self.html.reset();
                        return None;
                    }
                }
                debug!(state = ?self.html.state(), "html block opened");
                LineType::HtmlBlock
            }
            _ => return None,
        };
        Some(self.open_single(line_type, line.indent))
    }

    /// Clear the stack and open a non-nestable construct.
    fn open_single(&mut self, line_type: LineType, indent: usize) -> Step {
        self.stack.clear();
        let state = ParserState {
            indent_left: indent,
            ..ParserState::new(line_type, self.next_sequence(), 0)
        };
        self.stack.push(state);
        Step::top()
    }

    fn nestable_item(&self, line: &Line<'_>) -> Option<Item> {
        let rest = line.rest;
        match rest.chars().next()? {
            '0'..='9' => {
                let item = blocks::ordered_item(rest)?;
                // Only a list starting at 1 may interrupt a paragraph, so a
                // wrapped line beginning "1984. " stays text.
                let interrupts = !self.prev_blank
                    && self.prev_type == LineType::Text
                    && !self.top_type().is_nestable();
                (!interrupts || item.number == 1).then_some(Item::Ordered(item))
            }
            '-' if self.options.doxygen && rest.starts_with("-#") => {
                blocks::doxygen_ordered_item(rest).map(Item::Doxygen)
            }
            '*' | '+' | '-' => blocks::unordered_item(rest).map(Item::Unordered),
            ':' => blocks::definition_item(rest).map(Item::Definition),
            '[' => blocks::footnote_def(rest).map(Item::Footnote),
            _ => None,
        }
    }

    /// Whether a line indented by `indent` lies inside `entry`'s content.
    ///
    /// Lines at or past the content column are inside; lines at or left of
    /// the marker column are not. In between, the indent-based depth
    /// estimate decides.
    fn encloses(entry: &ParserState, indent: usize) -> bool {
        if indent >= entry.content_column() {
            return true;
        }
        if indent <= entry.indent_left {
            return false;
        }
        indent_depth(indent, Some(entry.line_type)) > entry.depth
    }

    fn open_item(&mut self, item: Item, line: &Line<'_>) -> Step {
        let depth = loop {
            let top = *self.stack.top();
            if !top.line_type.is_nestable() {
                break 0;
            }
            if Self::encloses(&top, line.indent) {
                break top.depth + 1;
            }
            if line.indent >= top.indent_left {
                if item.continues(&top) {
                    return self.continue_item(item, line);
                }
                self.stack.pop();
                break top.depth;
            }
            self.stack.pop();
        };

        let sequence = self.next_sequence();
        let mut state = ParserState {
            indent_left: line.indent,
            ordered_list_char: item.ordered_char(),
            ..ParserState::new(item.line_type(), sequence, depth)
        };
        let rewrite = self.apply_item(&mut state, item, line, 1);
        self.stack.push(state);
        Step {
            report: Report::Top,
            rewrite,
        }
    }

    /// Reuse the top entry for the next item of the same list.
    fn continue_item(&mut self, item: Item, line: &Line<'_>) -> Step {
        let sequence = self.next_sequence();
        let mut state = *self.stack.top();
        state.sequence_number = sequence;
        state.indent_left = line.indent;
        let next_number = state.ordered_list_number.saturating_add(1);
        let rewrite = self.apply_item(&mut state, item, line, next_number);
        *self.stack.top_mut() = state;
        Step {
            report: Report::Top,
            rewrite,
        }
    }

    /// Fill in the item-specific fields, renumbering ordered items to
    /// `expected` when enabled.
    fn apply_item(
        &self,
        state: &mut ParserState,
        item: Item,
        line: &Line<'_>,
        expected: u32,
    ) -> Option<Rewrite> {
        match item {
            Item::Ordered(ordered) => {
                if !self.options.renumber {
                    state.ordered_list_number = ordered.number;
                    state.indent_hang = ordered.hang;
                    return None;
                }
                state.ordered_list_number = expected;
                state.indent_hang = ordered.hang - ordered.digits + digit_count(expected);
                if ordered.number == expected {
                    return None;
                }
                debug!(from = ordered.number, to = expected, "renumbered list item");
                Some(Rewrite {
                    start: line.start,
                    old_digits: ordered.digits,
                    number: expected,
                })
            }
            Item::Doxygen(hang) | Item::Unordered(hang) | Item::Definition(hang) => {
                state.indent_hang = hang;
                None
            }
            Item::Footnote(has_text) => {
                state.indent_hang = FOOTNOTE_HANG;
                state.footnote_has_trailing_text = has_text;
                None
            }
        }
    }

    /// Plain text: continue the current block or start a new paragraph in
    /// whatever level still encloses the line.
    fn continue_text(&mut self, line: &Line<'_>) -> Step {
        if self.prev_blank {
            while self.top_type().is_nestable() && !Self::encloses(self.stack.top(), line.indent) {
                self.stack.pop();
            }
        }
        let top = self.stack.top();
        let continuing = !self.prev_blank
            && self.prev_sequence == top.sequence_number
            && self.prev_type == top.line_type;
        if !continuing {
            let sequence = self.next_sequence();
            self.stack.top_mut().sequence_number = sequence;
        }
        Step::top()
    }
}
