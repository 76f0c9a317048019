// Command-line interface for the patch builder.
//
// A single-operation tool: diff two archives, write the patch. The CLI layer
// validates input paths, tokenizes the comma-separated pattern lists, and
// maps the core's outcome and errors to messages and exit codes; the core
// itself never prints.

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, ValueHint};

use crate::filter::tokenize_patterns;
use crate::patch::{self, PatchOptions, PatchOutcome};

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Build a patch zip from the difference between two jar/war/zip archives.
#[derive(Parser, Debug)]
#[command(
    name = "jarpatch",
    version,
    about = "Builds a patch zip containing the entries that differ between two archives",
    arg_required_else_help = true
)]
struct Cli {
    /// Old archive (the baseline).
    #[arg(long, value_hint = ValueHint::FilePath)]
    old: PathBuf,

    /// New archive (the version to ship).
    #[arg(long, value_hint = ValueHint::FilePath)]
    new: PathBuf,

    /// Output patch file.
    #[arg(short = 'o', long, value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Comma-separated regex patterns for entries to exclude (full match),
    /// in addition to the built-in META-INF exclusion.
    #[arg(long, value_name = "PATTERNS")]
    excludes: Option<String>,

    /// Comma-separated regex patterns re-including otherwise-excluded
    /// entries (full match).
    #[arg(long = "meta-includes", value_name = "PATTERNS")]
    meta_includes: Option<String>,

    /// Record deleted entries in a jarpatch_deleted.log patch entry.
    #[arg(long = "log-deleted")]
    log_deleted: bool,

    /// Force overwrite of an existing output file.
    #[arg(short = 'f', long)]
    force: bool,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON to stderr.
    #[arg(long = "json")]
    json_output: bool,
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("jarpatch".to_string())
        .chain(args.iter().cloned())
        .collect();
    let _ = Cli::try_parse_from(argv);
}

// ---------------------------------------------------------------------------
// Build command
// ---------------------------------------------------------------------------

fn cmd_build(cli: &Cli) -> i32 {
    for (flag, path) in [("--old", &cli.old), ("--new", &cli.new)] {
        if !path.is_file() {
            eprintln!(
                "jarpatch: {flag}: not an existing file: {}",
                path.display()
            );
            return 1;
        }
    }

    if cli.output.exists() && !cli.force {
        eprintln!(
            "jarpatch: output file exists, use -f to overwrite: {}",
            cli.output.display()
        );
        return 1;
    }

    let opts = PatchOptions {
        excludes: cli.excludes.as_deref().map(tokenize_patterns).unwrap_or_default(),
        meta_includes: cli
            .meta_includes
            .as_deref()
            .map(tokenize_patterns)
            .unwrap_or_default(),
        log_deleted: cli.log_deleted,
    };

    match patch::build_patch(&cli.new, &cli.old, &cli.output, &opts) {
        Ok(PatchOutcome::Written(stats)) => {
            if cli.verbose > 0 && !cli.quiet {
                eprintln!(
                    "jarpatch: {} changed entries, {} deleted entries, {} bytes",
                    stats.changed_entries, stats.deleted_entries, stats.output_size
                );
            }
            if cli.json_output {
                let json = serde_json::json!({
                    "outcome": "patch",
                    "changed_entries": stats.changed_entries,
                    "deleted_entries": stats.deleted_entries,
                    "output_size": stats.output_size,
                });
                eprintln!("{}", serde_json::to_string_pretty(&json).unwrap());
            }
            0
        }
        Ok(PatchOutcome::NoDifference) => {
            if !cli.quiet {
                println!("no difference found: no patch built");
            }
            if cli.json_output {
                let json = serde_json::json!({ "outcome": "no-difference" });
                eprintln!("{}", serde_json::to_string_pretty(&json).unwrap());
            }
            0
        }
        Err(e) => {
            eprintln!("jarpatch: {e}");
            1
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap and runs the build.
pub fn run() -> ! {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();
    process::exit(cmd_build(&cli));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
