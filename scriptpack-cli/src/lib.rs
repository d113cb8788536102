//! scriptpack CLI: package script sources into embeddable C headers.

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use tracing_subscriber::EnvFilter;

use scriptpack_core::header::parse_header;
use scriptpack_core::output::{write_json_pretty, write_ndjson};
use scriptpack_core::pack::{pack_many, PackOptions, PackReport};
use scriptpack_core::target::{builtin_targets, select_targets, PackTarget};

/// CLI entrypoint for scriptpack.
#[derive(Debug, Parser)]
#[command(
    name = "scriptpack",
    about = "Bundle script sources and embed them as C string-literal headers"
)]
pub struct Cli {
    /// Log stage-by-stage detail to stderr (RUST_LOG overrides)
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Package built-in targets (all of them when none are named)
    Pack(PackArgs),
    /// Show the built-in target table
    List(ListArgs),
    /// Recover the raw script bytes from a generated header
    Decode(DecodeArgs),
}

#[derive(Debug, Args)]
struct PackArgs {
    /// Built-in target names to package
    #[arg(value_hint = ValueHint::Other)]
    targets: Vec<String>,

    /// Directory holding the input files; outputs land there too
    #[arg(short = 'C', long = "dir", default_value = ".", value_hint = ValueHint::DirPath)]
    dir: PathBuf,

    /// Bound the number of parallel packaging jobs
    #[arg(short = 'j', long = "jobs")]
    jobs: Option<usize>,

    /// Emit reports as a single JSON array
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "ndjson")]
    json: bool,

    /// Emit reports as newline-delimited JSON
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Emit the table as a single JSON array
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "ndjson")]
    json: bool,

    /// Emit the table as newline-delimited JSON
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

#[derive(Debug, Args)]
struct DecodeArgs {
    /// Generated header file to decode
    #[arg(value_hint = ValueHint::FilePath)]
    header: PathBuf,

    /// Write the decoded bytes here instead of stdout
    #[arg(short = 'o', long = "output", value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,
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
        Command::Pack(args) => run_pack(args),
        Command::List(args) => run_list(args),
        Command::Decode(args) => run_decode(args),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run_pack(args: PackArgs) -> Result<()> {
    let targets = select_targets(&args.targets)?;
    let opts = PackOptions { jobs: args.jobs };
    let reports = pack_many(&args.dir, &targets, &opts)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let use_color = resolve_color(args.color, &handle);

    if args.ndjson {
        write_ndjson(&reports, &mut handle)?;
    } else if args.json {
        write_json_pretty(&reports, &mut handle)?;
    } else {
        write_reports(&reports, &mut handle, use_color)?;
    }

    Ok(())
}

fn run_list(args: ListArgs) -> Result<()> {
    let targets = builtin_targets();

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let use_color = resolve_color(args.color, &handle);

    if args.ndjson {
        write_ndjson(&targets, &mut handle)?;
    } else if args.json {
        write_json_pretty(&targets, &mut handle)?;
    } else {
        write_targets(&targets, &mut handle, use_color)?;
    }

    Ok(())
}

fn run_decode(args: DecodeArgs) -> Result<()> {
    let text = fs::read_to_string(&args.header)
        .with_context(|| format!("reading header {}", args.header.display()))?;
    let parsed = parse_header(&text)
        .with_context(|| format!("decoding {}", args.header.display()))?;
    tracing::debug!(array = %parsed.array_name, bytes = parsed.bytes.len(), "decoded header");

    match args.output {
        Some(path) => fs::write(&path, &parsed.bytes)
            .with_context(|| format!("writing {}", path.display()))?,
        None => io::stdout().write_all(&parsed.bytes)?,
    }

    Ok(())
}

fn resolve_color(choice: ColorChoice, out: &impl IsTerminal) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => out.is_terminal(),
    }
}

fn write_reports(reports: &[PackReport], mut w: impl Write, color: bool) -> Result<()> {
    for report in reports {
        let name = apply_color(&report.target, color, AnsiColor::Cyan);
        writeln!(
            w,
            "{name}: {} bytes -> {}, {}",
            report.script_bytes,
            report.script_file.display(),
            report.header_file.display()
        )?;
    }
    Ok(())
}

fn write_targets(targets: &[PackTarget], mut w: impl Write, color: bool) -> Result<()> {
    let name_width = targets
        .iter()
        .map(|t| t.name().len())
        .max()
        .unwrap_or(0);

    for target in targets {
        let padded = format!("{:<name_width$}", target.name());
        let name = apply_color(&padded, color, AnsiColor::Cyan);
        let inputs = apply_color(&target.inputs().join(" + "), color, AnsiColor::Yellow);
        writeln!(
            w,
            "{name}  {inputs} -> {}, {}",
            target.script_file(),
            target.header_file()
        )?;
    }
    Ok(())
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Cyan,
    Yellow,
}

fn apply_color(text: &str, color: bool, code: AnsiColor) -> String {
    if !color {
        return text.to_string();
    }

    let code_str = match code {
        AnsiColor::Cyan => "36",
        AnsiColor::Yellow => "33",
    };

    format!("\u{1b}[{}m{}\u{1b}[0m", code_str, text)
}
