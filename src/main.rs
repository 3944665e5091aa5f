//! detex-map - Strip LaTeX markup and map plain-text offsets back to the source

use std::io::{self, BufWriter, Write};
use std::ops::Range;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use detex_map::file_handler::read_source;
use detex_map::{AnnotatedNode, LatexDocument, Options};

#[derive(Parser)]
#[command(
    name = "detex-map",
    version,
    about = "Strip LaTeX markup to plain text while keeping a map back to the source"
)]
struct Cli {
    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Print debug diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the plain text of a LaTeX file
    Parse(ParseArgs),
    /// Print the `line:col (offset)` location of source offsets
    Locate(LocateArgs),
}

#[derive(Args)]
struct ParseArgs {
    /// LaTeX file to read ('-' for stdin)
    file: String,

    /// Print the source coloured by context before the plain text
    #[arg(short, long)]
    markup: bool,

    /// Print the annotation nodes after the plain text
    #[arg(short, long)]
    annotated: bool,

    /// Only print text from spans touching this char range of the source
    #[arg(short, long, value_name = "START..END", value_parser = parse_range)]
    range: Option<Range<usize>>,

    /// Opening and closing quote glyphs, e.g. «»
    #[arg(long, value_name = "PAIR")]
    quotes: Option<String>,
}

#[derive(Args)]
struct LocateArgs {
    /// LaTeX file to read ('-' for stdin)
    file: String,

    /// Char offsets into the source
    #[arg(required = true)]
    offsets: Vec<usize>,
}

fn parse_range(value: &str) -> Result<Range<usize>, String> {
    let (start, end) = value
        .split_once("..")
        .ok_or_else(|| format!("expected START..END, got {value:?}"))?;
    let start = start.trim().parse().map_err(|e| format!("bad start: {e}"))?;
    let end = end.trim().parse().map_err(|e| format!("bad end: {e}"))?;
    if end < start {
        return Err(format!("range end {end} is before start {start}"));
    }
    Ok(start..end)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        log::LevelFilter::Error
    } else if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Commands::Parse(args) => parse(args, &mut out)?,
        Commands::Locate(args) => locate(args, &mut out)?,
    }

    out.flush()?;
    Ok(())
}

fn parse(args: ParseArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let source = read_source(&args.file)?;

    let mut opts = Options::default();
    if let Some(pair) = &args.quotes {
        if pair.chars().count() != 2 {
            anyhow::bail!("--quotes needs exactly two characters, got {pair:?}");
        }
        opts = opts.with_quotes(pair);
    }

    let doc = LatexDocument::parse_with_options(&source.content, opts)
        .with_context(|| format!("failed to parse {}", source.name))?;

    if args.markup {
        doc.write_highlighted(out)?;
        writeln!(out, "\n---\n")?;
    }

    let text = match args.range {
        Some(range) => doc.to_plain_text_in(range)?,
        None => doc.to_plain_text()?,
    };
    writeln!(out, "{text}")?;

    if args.annotated {
        writeln!(out, "\n---\n")?;
        for node in doc.to_annotated_text()?.nodes() {
            let range = node.source();
            match node {
                AnnotatedNode::Text { text, .. } => {
                    writeln!(out, "text   {:>5}..{:<5} {text:?}", range.start, range.end)?
                }
                AnnotatedNode::Markup {
                    markup,
                    interpret_as,
                    ..
                } => match interpret_as {
                    Some(plain) => writeln!(
                        out,
                        "markup {:>5}..{:<5} {markup:?} as {plain:?}",
                        range.start, range.end
                    )?,
                    None => writeln!(out, "markup {:>5}..{:<5} {markup:?}", range.start, range.end)?,
                },
            }
        }
    }

    Ok(())
}

fn locate(args: LocateArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let source = read_source(&args.file)?;
    let doc = LatexDocument::parse(&source.content)
        .with_context(|| format!("failed to parse {}", source.name))?;

    for offset in args.offsets {
        writeln!(out, "{offset}: {}", doc.index_to_location(offset))?;
    }
    Ok(())
}
