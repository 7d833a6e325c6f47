//! Recognition of raw HTML blocks.
//!
//! An HTML block starts on a line beginning with `<` and is copied through
//! untouched until its end condition holds. How it ends depends on what
//! opened it: comments, CDATA sections, declarations, and processing
//! instructions end at their closing token, raw-text elements such as `<pre>`
//! end at their end tag, and other block elements end at the next blank line.

/// Longest element name considered.
const ELEMENT_NAME_MAX: usize = 10;

/// Elements whose content is raw text, possibly containing blank lines.
const RAW_TEXT_ELEMENTS: [&str; 4] = ["pre", "script", "style", "textarea"];

/// HTML5 block-level element names, sorted for binary search.
static BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "aside",
    "base",
    "basefont",
    "blockquote",
    "body",
    "caption",
    "center",
    "col",
    "colgroup",
    "dd",
    "details",
    "dialog",
    "dir",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "frame",
    "frameset",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "head",
    "header",
    "hr",
    "html",
    "iframe",
    "legend",
    "li",
    "link",
    "main",
    "menu",
    "menuitem",
    "nav",
    "noframes",
    "ol",
    "optgroup",
    "option",
    "p",
    "param",
    "search",
    "section",
    "summary",
    "table",
    "tbody",
    "td",
    "tfoot",
    "th",
    "thead",
    "title",
    "tr",
    "track",
    "ul",
];

/// What kind of HTML block is open, which decides how it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HtmlState {
    #[default]
    None,
    /// `<![CDATA[`, ends at `]]>`.
    Cdata,
    /// `<!--`, ends at `-->`.
    Comment,
    /// `<!DOCTYPE` and other declarations, end at `>`.
    Doctype,
    /// A block element, ends at a blank line.
    Element,
    /// `<?`, ends at `?>`.
    ProcessingInstruction,
    /// A raw-text element, ends at its end tag.
    Pre,
    /// The end condition held on the last line; the block closes before the
    /// next one.
    End,
}

/// Tracks the open HTML block between lines.
#[derive(Debug, Default)]
pub(crate) struct HtmlBlock {
    state: HtmlState,
    /// Lowercased name of the open raw-text element.
    raw_name: String,
}

/// How an opening `<` line was classified.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum HtmlOpen {
    /// A comment, CDATA section, declaration, processing instruction,
    /// raw-text element, or known block element.
    Block,
    /// Any other tag that stands alone on its line.
    Standalone,
}

impl HtmlBlock {
    pub(crate) fn state(&self) -> HtmlState { self.state }

    pub(crate) fn reset(&mut self) {
        self.state = HtmlState::None;
        self.raw_name.clear();
    }

    /// Try to open an HTML block on `rest`, a line starting with `<`.
    ///
    /// When the line also satisfies the block's end condition the state is
    /// [`HtmlState::End`] straight away.
    pub(crate) fn open(&mut self, rest: &str) -> Option<HtmlOpen> {
        let (state, kind, name) = classify_open(rest)?;
        self.state = state;
        self.raw_name = name;
        let body = &rest[1..];
        let ends_here = match state {
            HtmlState::Element if kind == HtmlOpen::Block => {
                contains_end_tag(body, &self.raw_name)
            }
            HtmlState::Element => false,
            _ => self.end_token_in(body),
        };
        if ends_here {
            self.state = HtmlState::End;
        }
        Some(kind)
    }

    /// Look for the end condition of the open block on a continuation line.
    pub(crate) fn observe(&mut self, line: &str) {
        if self.end_token_in(line) {
            self.state = HtmlState::End;
        }
    }

    fn end_token_in(&self, text: &str) -> bool {
        match self.state {
            HtmlState::Comment => text.contains("-->"),
            HtmlState::Cdata => text.contains("]]>"),
            HtmlState::Doctype => text.contains('>'),
            HtmlState::ProcessingInstruction => text.contains("?>"),
            HtmlState::Pre => contains_end_tag(text, &self.raw_name),
            HtmlState::Element | HtmlState::None | HtmlState::End => false,
        }
    }
}

/// Classify the tag at the start of `rest`.
///
/// Returns the block state, whether it is a known block opener, and the
/// lowercased element name (empty for non-element constructs).
fn classify_open(rest: &str) -> Option<(HtmlState, HtmlOpen, String)> {
    let body = rest.strip_prefix('<')?;
    if body.starts_with("!--") {
        return Some((HtmlState::Comment, HtmlOpen::Block, String::new()));
    }
    if body.starts_with("![CDATA[") {
        return Some((HtmlState::Cdata, HtmlOpen::Block, String::new()));
    }
    if body
        .strip_prefix('!')
        .is_some_and(|s| s.starts_with(|c: char| c.is_ascii_uppercase()))
    {
        return Some((HtmlState::Doctype, HtmlOpen::Block, String::new()));
    }
    if body.starts_with('?') {
        return Some((HtmlState::ProcessingInstruction, HtmlOpen::Block, String::new()));
    }

    let (is_end_tag, body) = match body.strip_prefix('/') {
        Some(b) => (true, b),
        None => (false, body),
    };
    let name = element_name(body)?;
    let after = &body[name.len()..];
    if !after.is_empty() && !after.starts_with([' ', '\t', '>', '/', '\r', '\n']) {
        return None;
    }
    let lower = name.to_ascii_lowercase();
    if !is_end_tag && RAW_TEXT_ELEMENTS.contains(&lower.as_str()) {
        return Some((HtmlState::Pre, HtmlOpen::Block, lower));
    }
    if BLOCK_ELEMENTS.binary_search(&lower.as_str()).is_ok() {
        return Some((HtmlState::Element, HtmlOpen::Block, lower));
    }
    let tail = skip_tag(after, is_end_tag)?;
    tail.trim()
        .is_empty()
        .then_some((HtmlState::Element, HtmlOpen::Standalone, lower))
}

/// The element name at the start of `text`: an ASCII letter followed by
/// letters, digits, or `-`.
fn element_name(text: &str) -> Option<&str> {
    if !text.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    let len = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(text.len());
    (len <= ELEMENT_NAME_MAX).then(|| &text[..len])
}

/// Skip past the `>` that closes a tag whose name has been consumed.
///
/// Quoted attribute values may contain `>`. A `/` is allowed only directly
/// before the closing `>` of a start tag. Returns the text after the `>`.
fn skip_tag(text: &str, is_end_tag: bool) -> Option<&str> {
    let mut chars = text.char_indices();
    while let Some((idx, ch)) = chars.next() {
        match ch {
            '>' => return Some(&text[idx + 1..]),
            '"' | '\'' if !is_end_tag => {
                chars.by_ref().find(|&(_, c)| c == ch)?;
            }
            '/' if !is_end_tag => {
                let (gt, next) = chars.next()?;
                if next != '>' {
                    return None;
                }
                return Some(&text[gt + 1..]);
            }
            c if is_end_tag && !c.is_whitespace() => return None,
            _ => {}
        }
    }
    None
}

/// Whether `text` contains `</name` followed by optional whitespace and `>`.
fn contains_end_tag(text: &str, name: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    let needle = format!("</{name}");
    let mut from = 0;
    while let Some(pos) = lower[from..].find(&needle) {
        let after = &lower[from + pos + needle.len()..];
        if after.trim_start().starts_with('>') {
            return true;
        }
        from += pos + needle.len();
    }
    false
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn block_elements_are_sorted() {
        assert!(BLOCK_ELEMENTS.windows(2).all(|w| w[0] < w[1]));
    }

    #[rstest]
    #[case("<!-- note", HtmlState::Comment)]
    #[case("<!-- note -->", HtmlState::End)]
    #[case("<![CDATA[ x", HtmlState::Cdata)]
    #[case("<!DOCTYPE html>", HtmlState::End)]
    #[case("<!DOCTYPE", HtmlState::Doctype)]
    #[case("<?php echo 1;", HtmlState::ProcessingInstruction)]
    #[case("<pre>", HtmlState::Pre)]
    #[case("<PRE class=\"x\">code</pre>", HtmlState::End)]
    #[case("<div>", HtmlState::Element)]
    #[case("<div>text</div>", HtmlState::End)]
    #[case("</div>", HtmlState::Element)]
    #[case("<H2 id=\"x\">", HtmlState::Element)]
    #[case("<custom-tag a=\"1 > 2\" />", HtmlState::Element)]
    fn opening_states(#[case] line: &str, #[case] expected: HtmlState) {
        let mut block = HtmlBlock::default();
        assert!(block.open(line).is_some(), "{line} should open a block");
        assert_eq!(block.state(), expected);
    }

    #[rstest]
    #[case("<span>inline</span> text")]
    #[case("<averyveryverylongname>")]
    #[case("<a href=\"unterminated>")]
    #[case("</span / >")]
    #[case("<a / b>")]
    #[case("< div>")]
    #[case("<3 hearts")]
    fn not_html_blocks(#[case] line: &str) {
        let mut block = HtmlBlock::default();
        assert_eq!(block.open(line), None);
    }

    #[test]
    fn standalone_inline_tag_is_accepted() {
        let mut block = HtmlBlock::default();
        assert_eq!(block.open("<span class='x'>"), Some(HtmlOpen::Standalone));
        assert_eq!(block.open("</span>"), Some(HtmlOpen::Standalone));
    }

    #[test]
    fn pre_ends_at_its_end_tag() {
        let mut block = HtmlBlock::default();
        block.open("<pre>");
        block.observe("# not a header");
        assert_eq!(block.state(), HtmlState::Pre);
        block.observe("</pre >");
        assert_eq!(block.state(), HtmlState::End);
    }

    #[test]
    fn comment_ends_at_close_token() {
        let mut block = HtmlBlock::default();
        block.open("<!--");
        block.observe("- still a comment");
        assert_eq!(block.state(), HtmlState::Comment);
        block.observe("done -->");
        assert_eq!(block.state(), HtmlState::End);
    }

    #[test]
    fn element_ignores_close_tokens_on_later_lines() {
        let mut block = HtmlBlock::default();
        block.open("<div>");
        block.observe("</div>");
        assert_eq!(block.state(), HtmlState::Element);
    }
}
