mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{AlreadyReported, Sources};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pldf",
    about = "Look up PLDF hints for a workflow stage, error category, or error key",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .pldf/, hints/, or .git/)
    #[arg(long, global = true, env = "PLDF_ROOT")]
    root: Option<PathBuf>,

    /// Hint store file (JSON or YAML)
    #[arg(long, global = true, env = "PLDF_HINTS")]
    hints: Option<PathBuf>,

    /// Resource store file (JSON or YAML)
    #[arg(long, global = true, env = "PLDF_RESOURCES")]
    resources: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the hint for a stage
    Hint {
        /// Stage: concept, design, tech, architecture, plan, implement, review
        stage: String,

        /// Free-text category matched against hint messages, then keys
        #[arg(long, short = 'c')]
        category: Option<String>,

        /// Exact error key within the stage
        #[arg(long, short = 'k')]
        key: Option<String>,
    },

    /// List stages and how many hints each has
    Stages,

    /// List the error keys defined for a stage
    List {
        /// Stage name
        stage: String,
    },

    /// Check the knowledge base for dangling references and empty hints
    Check,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => usage_error(e),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let sources = Sources {
        root: root::resolve_root(cli.root.as_deref()),
        hints: cli.hints,
        resources: cli.resources,
    };
    tracing::debug!(root = %sources.root.display(), "resolved project root");

    let result = match cli.command {
        Commands::Hint {
            stage,
            category,
            key,
        } => cmd::hint::run(
            &sources,
            &stage,
            category.as_deref(),
            key.as_deref(),
            cli.json,
        ),
        Commands::Stages => cmd::stages::run(&sources, cli.json),
        Commands::List { stage } => cmd::list::run(&sources, &stage, cli.json),
        Commands::Check => cmd::check::run(&sources, cli.json),
    };

    if let Err(e) = result {
        if !cli.json {
            // Print the full error chain (anyhow's alternate Display)
            eprintln!("error: {e:#}");
        } else if e.downcast_ref::<AlreadyReported>().is_none() {
            if let Err(print_err) = output::print_json(&output::Failure::new(&e)) {
                eprintln!("error: {e:#} ({print_err})");
            }
        }
        std::process::exit(1);
    }
}

/// Report a command-line parse failure. Help and version output keep clap's
/// behaviour; real usage errors exit 1, as a JSON record when `--json` was
/// passed.
fn usage_error(e: clap::Error) -> ! {
    use clap::error::ErrorKind;

    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        e.exit();
    }

    let json = std::env::args_os()
        .skip(1)
        .take_while(|a| a != "--")
        .any(|a| a == "--json" || a == "-j");
    if json {
        let failure = output::Failure::from_message(e.to_string().trim());
        if output::print_json(&failure).is_err() {
            eprintln!("{e}");
        }
    } else {
        let _ = e.print();
    }
    std::process::exit(1);
}
