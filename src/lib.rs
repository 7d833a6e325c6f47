//! Line-by-line Markdown and Doxygen block classification, with paragraph
//! rewrapping and ordered-list renumbering built on top of it.
//!
//! The [`Classifier`] is the core: it is fed one line at a time and reports
//! what block construct the line belongs to, how deeply it is nested, and how
//! far continuation lines should hang. [`wrap_text`] and [`renumber_lists`]
//! drive a classifier over a whole document.

#[macro_use]
mod macros;

mod blocks;
pub mod classifier;
pub mod depth;
pub mod fences;
pub mod html;
pub mod io;
pub mod lists;
pub mod process;
mod stack;
pub mod state;
pub mod wrap;

pub use classifier::{Classifier, ClassifierOptions};
pub use fences::CodeFence;
pub use html::HtmlState;
pub use io::rewrite;
pub use lists::{renumber_lists, renumber_lists_with};
pub use process::{FormatOpts, annotate_lines, process_stream, process_stream_opts};
pub use state::{LineType, ParserState};
pub use wrap::wrap_text;
