//! queshi CLI: search a recipe catalog by tag from the terminal, or serve it
//! over HTTP for a desktop front end.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use regex::Regex;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

use queshi_core::output::{write_json_pretty, write_ndjson};
use queshi_core::query::parse_tag_list;
use queshi_core::{
    filter_catalog, load, LoadedCatalog, Query, Recipe, SearchOptions, Vocabulary,
    DEFAULT_SUGGESTION_LIMIT,
};

pub mod server;

/// CLI entrypoint for queshi.
#[derive(Debug, Parser)]
#[command(name = "queshi", about = "Recipe catalog tag search", version)]
pub struct Cli {
    /// Catalog file; defaults to dishes.json in the usual resource locations
    #[arg(long = "data", global = true, value_hint = ValueHint::FilePath)]
    data: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List recipes carrying every given tag
    Search(SearchArgs),
    /// List every distinct tag in the catalog
    Tags(TagsArgs),
    /// Suggest tags containing the typed text
    Suggest(SuggestArgs),
    /// Serve the catalog over HTTP
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Tags every result must carry ("-" reads tags from STDIN)
    #[arg(required_unless_present = "stdin_tags", value_hint = ValueHint::Other)]
    tags: Vec<String>,

    /// Read newline-delimited tags from STDIN
    #[arg(long = "stdin-tags", action = ArgAction::SetTrue)]
    stdin_tags: bool,

    /// Regex patterns; at least one must match the recipe name
    #[arg(short = 'n', long = "name", value_hint = ValueHint::Other)]
    name_patterns: Vec<String>,

    /// Worker threads for filtering
    #[arg(short = 'j', long = "jobs")]
    jobs: Option<usize>,

    /// Emit a single JSON array
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "ndjson")]
    json: bool,

    /// Emit newline-delimited JSON
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,

    /// Format output as padded columns (name, price, tags)
    #[arg(long = "columns", action = ArgAction::SetTrue)]
    columns: bool,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

#[derive(Debug, Args)]
struct TagsArgs {
    /// Emit a JSON array instead of one tag per line
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,
}

#[derive(Debug, Args)]
struct SuggestArgs {
    /// Text typed so far; omit to list the first tags
    #[arg(default_value = "")]
    query: String,

    /// Maximum number of suggestions
    #[arg(short = 'l', long = "limit", default_value_t = DEFAULT_SUGGESTION_LIMIT)]
    limit: usize,
}

#[derive(Debug, Args)]
struct ServeArgs {
    /// Address to bind
    #[arg(long = "bind", default_value = "127.0.0.1:8765")]
    bind: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Search(args) => run_search(cli.data.as_deref(), args),
        Command::Tags(args) => run_tags(cli.data.as_deref(), args),
        Command::Suggest(args) => run_suggest(cli.data.as_deref(), args),
        Command::Serve(args) => run_serve(cli.data, args),
    }
}

/// `RUST_LOG` wins when set; otherwise `-v` raises the default `warn` level.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    // Ignore error if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn run_search(data: Option<&Path>, args: SearchArgs) -> Result<()> {
    if matches!(args.jobs, Some(0)) {
        bail!("jobs must be at least 1 when provided");
    }

    let stdin = io::stdin();
    let tags = gather_tags(&args.tags, args.stdin_tags, stdin.lock())?;
    let query = build_query(tags, &args.name_patterns)?;
    let loaded = load_catalog(data)?;

    let opts = SearchOptions { jobs: args.jobs };
    let matches = filter_catalog(&loaded.catalog, &query, &opts)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let use_color = match args.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => handle.is_terminal(),
    };

    if args.ndjson {
        write_ndjson(&matches, &mut handle)?;
    } else if args.json {
        write_json_pretty(&matches, &mut handle)?;
    } else if args.columns {
        write_columns(&matches, &mut handle, use_color)?;
    } else {
        write_plain(&matches, &mut handle, use_color)?;
    }

    Ok(())
}

fn run_tags(data: Option<&Path>, args: TagsArgs) -> Result<()> {
    let loaded = load_catalog(data)?;
    let vocabulary = Vocabulary::build(&loaded.catalog);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut handle, &vocabulary)?;
        writeln!(handle)?;
    } else {
        write_lines(vocabulary.tags().iter().map(String::as_str), &mut handle)?;
    }
    Ok(())
}

fn run_suggest(data: Option<&Path>, args: SuggestArgs) -> Result<()> {
    let loaded = load_catalog(data)?;
    let vocabulary = Vocabulary::build(&loaded.catalog);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_lines(vocabulary.suggest(&args.query, args.limit), &mut handle)
}

fn run_serve(data: Option<PathBuf>, args: ServeArgs) -> Result<()> {
    let loaded = load_catalog(data.as_deref())?;
    let state = server::AppState::new(loaded, data);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    runtime.block_on(server::serve(&args.bind, state))
}

/// Load the catalog and tell the user about a missing file or skipped records.
fn load_catalog(data: Option<&Path>) -> Result<LoadedCatalog> {
    let loaded = load(data).context("loading recipe catalog")?;
    report_load(&loaded, io::stderr().lock())?;
    Ok(loaded)
}

fn report_load(loaded: &LoadedCatalog, mut w: impl Write) -> Result<()> {
    if loaded.is_missing() {
        writeln!(w, "no data loaded: recipe catalog not found")?;
    }
    if !loaded.skipped.is_empty() {
        writeln!(
            w,
            "skipped {} invalid record(s) in {}",
            loaded.skipped.len(),
            loaded
                .source
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        )?;
        for skipped in &loaded.skipped {
            writeln!(w, "  #{}: {}", skipped.index, skipped.reason)?;
        }
    }
    Ok(())
}

fn build_query(tags: Vec<String>, name_patterns: &[String]) -> Result<Query> {
    let patterns = compile_patterns(name_patterns)?;
    Ok(Query::new().with_tags(tags).with_name_patterns(patterns))
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).with_context(|| format!("invalid regex: {p}")))
        .collect()
}

fn gather_tags(raw_tags: &[String], read_stdin: bool, mut stdin: impl BufRead) -> Result<Vec<String>> {
    let mut tags = Vec::new();

    if read_stdin {
        tags.extend(read_lines_from(&mut stdin)?);
    }

    for tag in raw_tags {
        if tag == "-" {
            tags.extend(read_lines_from(&mut stdin)?);
        } else {
            tags.push(tag.clone());
        }
    }

    let tags = parse_tag_list(&tags);
    if tags.is_empty() {
        return Err(anyhow!("no search tags provided"));
    }

    Ok(tags)
}

fn read_lines_from(reader: &mut impl BufRead) -> Result<Vec<String>> {
    let mut buf = String::new();
    let mut lines = Vec::new();

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }

        let trimmed = buf.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    Ok(lines)
}

fn write_lines<'a>(lines: impl IntoIterator<Item = &'a str>, mut w: impl Write) -> Result<()> {
    for line in lines {
        writeln!(w, "{line}")?;
    }
    Ok(())
}

fn write_plain(matches: &[&Recipe], mut w: impl Write, color: bool) -> Result<()> {
    for item in matches {
        let rendered = apply_color(&item.name, color, AnsiColor::Cyan);
        writeln!(w, "{rendered}")?;
    }
    Ok(())
}

fn write_columns(matches: &[&Recipe], mut w: impl Write, color: bool) -> Result<()> {
    let rows: Vec<(String, String, String)> = matches
        .iter()
        .map(|m| {
            let price = m.price().unwrap_or_else(|| "-".to_string());
            let tags = m
                .tags
                .as_ref()
                .map(|t| t.to_string())
                .unwrap_or_default();
            (m.name.clone(), price, tags)
        })
        .collect();

    let name_width = rows
        .iter()
        .map(|r| display_width(&r.0))
        .max()
        .unwrap_or(0)
        .clamp(0, 80);
    let price_width = rows
        .iter()
        .map(|r| display_width(&r.1))
        .max()
        .unwrap_or(0)
        .clamp(0, 20);

    for (name, price, tags) in rows {
        let padded_name = pad(&name, name_width);
        let padded_price = pad(&price, price_width);
        let rendered_name = apply_color(&padded_name, color, AnsiColor::Cyan);
        let rendered_price = apply_color(&padded_price, color, AnsiColor::Yellow);
        let rendered_tags = apply_color(&tags, color, AnsiColor::Green);

        writeln!(w, "{rendered_name}  {rendered_price}  {rendered_tags}")?;
    }

    Ok(())
}

/// Terminal column width: wide East Asian characters and emoji take two cells.
fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(text));
    format!("{text}{}", " ".repeat(fill))
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Cyan,
    Yellow,
    Green,
}

fn apply_color(text: &str, color: bool, code: AnsiColor) -> String {
    if !color {
        return text.to_string();
    }

    let code_str = match code {
        AnsiColor::Cyan => "36",
        AnsiColor::Yellow => "33",
        AnsiColor::Green => "32",
    };

    format!("\u{1b}[{}m{}\u{1b}[0m", code_str, text)
}
