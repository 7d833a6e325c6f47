//! Line types and the per-level parser state reported by the classifier.

use std::fmt;

/// The block construct a classified line starts or continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineType {
    /// Unset state; never reported for a classified line.
    #[default]
    None,
    /// Indented or fenced code.
    Code,
    /// A `: definition` list item.
    DefinitionList,
    /// A `[^label]:` footnote definition.
    FootnoteDef,
    /// A `#`-prefixed header.
    HeaderAtx,
    /// A `===` or `---` underline beneath header text.
    HeaderSetext,
    /// A thematic break such as `***`.
    HorizontalRule,
    /// A `*[ABBR]: expansion` line.
    HtmlAbbreviation,
    /// Raw HTML passed through untouched.
    HtmlBlock,
    /// A `[label]: uri` link reference definition.
    LinkLabel,
    /// A numbered list item, or a Doxygen `-#` item.
    OrderedList,
    /// A pipe table row.
    Table,
    /// Plain paragraph text.
    Text,
    /// A `*`, `+`, or `-` list item.
    UnorderedList,
}

impl LineType {
    /// Single-character tag used in classification dumps.
    #[must_use]
    pub fn tag(self) -> char {
        match self {
            Self::None => '0',
            Self::Code => 'C',
            Self::DefinitionList => 'D',
            Self::FootnoteDef => 'F',
            Self::HeaderAtx => '#',
            Self::HeaderSetext => '=',
            Self::HorizontalRule => '-',
            Self::HtmlAbbreviation => 'A',
            Self::HtmlBlock => '<',
            Self::LinkLabel => '[',
            Self::OrderedList => '1',
            Self::Table => '|',
            Self::Text => 'T',
            Self::UnorderedList => '*',
        }
    }

    /// Whether the construct can contain itself or another nestable
    /// construct one level deeper.
    #[must_use]
    pub fn is_nestable(self) -> bool {
        matches!(
            self,
            Self::DefinitionList | Self::FootnoteDef | Self::OrderedList | Self::UnorderedList
        )
    }

    /// Constructs that never span more than the line they appear on.
    #[must_use]
    pub fn is_one_shot(self) -> bool {
        matches!(
            self,
            Self::HeaderAtx | Self::HeaderSetext | Self::HorizontalRule | Self::HtmlAbbreviation
        )
    }

    /// Whether lines of this type may be joined and rewrapped.
    #[must_use]
    pub fn is_foldable(self) -> bool { self == Self::Text || self.is_nestable() }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.tag()) }
}

/// State of one open nesting level.
///
/// The classifier reports the top-of-stack value after every line. Callers
/// compare [`ParserState::sequence_number`] with the previous line's to tell a
/// new block of the same type from a continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserState {
    pub line_type: LineType,
    pub sequence_number: u32,
    /// Nesting depth, 0 being outermost.
    pub depth: usize,
    /// Columns of leading whitespace, tabs expanded.
    pub indent_left: usize,
    /// Extra columns for continuation lines, e.g. to align under a list
    /// marker's text.
    pub indent_hang: usize,
    /// Only meaningful for [`LineType::FootnoteDef`].
    pub footnote_has_trailing_text: bool,
    /// `.` or `)`, or `#` for Doxygen items. Only meaningful for
    /// [`LineType::OrderedList`].
    pub ordered_list_char: char,
    pub ordered_list_number: u32,
}

impl Default for ParserState {
    fn default() -> Self {
        Self {
            line_type: LineType::None,
            sequence_number: 0,
            depth: 0,
            indent_left: 0,
            indent_hang: 0,
            footnote_has_trailing_text: false,
            ordered_list_char: '.',
            ordered_list_number: 0,
        }
    }
}

impl ParserState {
    pub(crate) fn new(line_type: LineType, sequence_number: u32, depth: usize) -> Self {
        Self {
            line_type,
            sequence_number,
            depth,
            ..Self::default()
        }
    }

    /// Column where a continuation line's text lines up.
    #[must_use]
    pub fn content_column(&self) -> usize { self.indent_left + self.indent_hang }
}
