use std::{
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use mdreflow::{FormatOpts, annotate_lines, io::read_lines, process_stream_opts, rewrite};
use rayon::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Classify, rewrap and renumber Markdown blocks")]
struct Cli {
    /// Rewrite files in place
    #[arg(long = "in-place", requires = "files", conflicts_with = "classify")]
    in_place: bool,
    /// Print each line prefixed with its block type and nesting depth
    #[arg(long = "classify")]
    classify: bool,
    /// Log level used when `RUST_LOG` is unset
    #[arg(long = "log-level", default_value = "warn")]
    log_level: String,
    #[command(flatten)]
    opts: CliOpts,
    /// Markdown files to process
    files: Vec<PathBuf>,
}

#[derive(clap::Args, Clone, Copy)]
struct CliOpts {
    /// Rewrap paragraphs and list items
    #[arg(long = "wrap")]
    wrap: bool,
    /// Target width for `--wrap`
    #[arg(long = "width", default_value_t = mdreflow::wrap::WRAP_WIDTH_DEFAULT)]
    width: usize,
    /// Renumber ordered list items
    #[arg(long = "renumber")]
    renumber: bool,
    /// Recognise Doxygen `-#` list items
    #[arg(long = "doxygen")]
    doxygen: bool,
    /// Columns a tab advances to
    #[arg(long = "tab-width", default_value_t = mdreflow::classifier::TAB_WIDTH_DEFAULT)]
    tab_width: usize,
}

impl From<CliOpts> for FormatOpts {
    fn from(opts: CliOpts) -> Self {
        Self {
            wrap: opts.wrap,
            width: opts.width,
            renumber: opts.renumber,
            doxygen: opts.doxygen,
            tab_width: opts.tab_width,
        }
    }
}

fn render(lines: &[String], classify: bool, opts: &FormatOpts) -> String {
    let out = if classify {
        annotate_lines(lines, opts)
    } else {
        process_stream_opts(lines, opts)
    };
    out.join("\n")
}

fn handle_file(path: &Path, cli: &Cli, opts: &FormatOpts) -> anyhow::Result<Option<String>> {
    if cli.in_place {
        rewrite(path, opts).with_context(|| format!("rewriting {}", path.display()))?;
        return Ok(None);
    }
    let lines = read_lines(path).with_context(|| format!("reading {}", path.display()))?;
    info!(path = %path.display(), lines = lines.len(), "processing");
    Ok(Some(render(&lines, cli.classify, opts)))
}

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(io::stderr)
        .init();
}

/// Entry point for the `mdreflow` command-line tool.
///
/// Reads standard input when no files are given. Files are processed in
/// parallel but their output is printed in argument order; a file that fails
/// does not stop the others, and the first failure becomes the exit error.
///
/// # Examples
///
/// ```sh
/// # Rewrap a file to 72 columns and print it
/// mdreflow --wrap --width 72 notes.md
///
/// # Renumber lists in place
/// mdreflow --renumber --in-place notes.md
///
/// # Show how each line is classified
/// cat notes.md | mdreflow --classify
/// ```
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    let opts = FormatOpts::from(cli.opts);

    if cli.files.is_empty() {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("reading standard input")?;
        let lines: Vec<String> = input.lines().map(str::to_string).collect();
        println!("{}", render(&lines, cli.classify, &opts));
        return Ok(());
    }

    let results: Vec<_> = cli
        .files
        .par_iter()
        .map(|path| handle_file(path, &cli, &opts))
        .collect();

    let mut first_error = None;
    for result in results {
        match result {
            Ok(Some(text)) => println!("{text}"),
            Ok(None) => {}
            Err(err) => {
                error!("{err:#}");
                first_error.get_or_insert(err);
            }
        }
    }
    first_error.map_or(Ok(()), Err)
}
