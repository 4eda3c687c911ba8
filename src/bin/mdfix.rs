//! mdfix CLI - Markdown repair filters

#[cfg(feature = "cli")]
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use mdfix::{process_file, Filter, FilterOptions, LineBreak, RowspanMode, TableOptions};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use std::process::ExitCode;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "mdfix")]
#[command(version)]
#[command(about = "mdfix - repair filters for converted Markdown", long_about = None)]
struct Cli {
    /// Filter to run
    #[command(subcommand)]
    command: Commands,

    /// Raise log verbosity (repeat for more)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Report what would change without writing
    #[arg(long, global = true)]
    dry_run: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Renumber list items split apart by images
    ListContinuity { file: PathBuf },

    /// Prefix relative image references with ./
    RelativeImages { file: PathBuf },

    /// Insert blank lines before pipe tables
    TableSpacing { file: PathBuf },

    /// Split the Vista 48 special-settings table into three tables
    #[command(name = "vista48-table")]
    Vista48Table { file: PathBuf },

    /// Move admonition content into indented bodies
    Admonitions { file: PathBuf },

    /// Repair malformed HTML table markup
    TableStructure { file: PathBuf },

    /// Convert HTML tables to pipe tables
    HtmlTables {
        file: PathBuf,

        /// How rowspan cells are flattened
        #[arg(long, value_enum, default_value_t = RowspanArg::Duplicate)]
        rowspan: RowspanArg,

        /// How line breaks inside cells are written
        #[arg(long, value_enum, default_value_t = LineBreakArg::Html)]
        line_break: LineBreakArg,
    },

    /// Convert GitHub callouts to admonitions
    Callouts { file: PathBuf },

    /// Collapse runs of blank lines
    ReduceSpacing { file: PathBuf },
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum RowspanArg {
    /// Repeat spanning cells in every covered row
    Duplicate,
    /// Fold covered rows into one
    Merge,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum LineBreakArg {
    /// <br>
    Html,
    /// " / "
    Slash,
}

#[cfg(feature = "cli")]
impl Commands {
    fn into_parts(self) -> (Filter, PathBuf, TableOptions) {
        let plain = TableOptions::default();
        match self {
            Commands::ListContinuity { file } => (Filter::ListContinuity, file, plain),
            Commands::RelativeImages { file } => (Filter::RelativeImages, file, plain),
            Commands::TableSpacing { file } => (Filter::TableSpacing, file, plain),
            Commands::Vista48Table { file } => (Filter::Vista48Table, file, plain),
            Commands::Admonitions { file } => (Filter::Admonitions, file, plain),
            Commands::TableStructure { file } => (Filter::TableStructure, file, plain),
            Commands::Callouts { file } => (Filter::Callouts, file, plain),
            Commands::ReduceSpacing { file } => (Filter::ReduceSpacing, file, plain),
            Commands::HtmlTables {
                file,
                rowspan,
                line_break,
            } => {
                let table = TableOptions {
                    rowspan: match rowspan {
                        RowspanArg::Duplicate => RowspanMode::Duplicate,
                        RowspanArg::Merge => RowspanMode::Merge,
                    },
                    line_break: match line_break {
                        LineBreakArg::Html => LineBreak::Html,
                        LineBreakArg::Slash => LineBreak::Slash,
                    },
                };
                (Filter::HtmlTables, file, table)
            }
        }
    }
}

#[cfg(feature = "cli")]
fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(feature = "cli")]
fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not failures
            let code = if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = e.print();
            return code;
        }
    };

    init_logging(cli.verbose, cli.quiet);

    let (filter, path, table) = cli.command.into_parts();
    let options = FilterOptions {
        table,
        dry_run: cli.dry_run,
    };

    match process_file(&path, filter, &options) {
        Ok(outcome) => {
            println!("{}", filter.status_message(&outcome, &path));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install mdfix --features cli");
    eprintln!("  mdfix <FILTER> <FILE>");
    std::process::exit(1);
}
