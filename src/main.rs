use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};
use colored::Colorize;
use confsync::detector::Verdict;
use confsync::sweep::SweepReport;
use confsync::{config::Config, repository, sweep, watchlist};
use std::io;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "confsync",
    version = confsync::VERSION,
    about = "Tracks configuration files and forwards changes to a repository",
    long_about = "Detects configuration files whose content or metadata changed since the \
                  last run and delivers them to a storage directory or git repository. \
                  Exit status: 0 on a clean sweep, 1 when any per-file error occurred, \
                  2 on fatal errors."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the configuration file
    #[arg(short, long, global = true, env = "CONFSYNC_CONFIG")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect changes and deliver them to the configured repository
    Run {
        /// Override the monitored-file list path
        #[arg(long)]
        file_list: Option<PathBuf>,
    },

    /// Classify monitored files without dispatching or updating the baseline
    Status {
        /// Override the monitored-file list path
        #[arg(long)]
        file_list: Option<PathBuf>,

        /// Only print files that are not unchanged
        #[arg(short, long)]
        short: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            process::exit(2);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "confsync=debug" } else { "confsync=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Completion { shell } => {
            print_completions(shell, &mut Cli::command());
            Ok(0)
        }
        Commands::Run { file_list } => {
            let config = load_config(cli.config.as_deref())?;
            config.validate()?;

            let list_path = file_list.unwrap_or_else(|| config.core.file_list.clone());
            let files = watchlist::load(&list_path)?;
            let repo = repository::open(&config.repository)?;

            let report = sweep::execute(&config, &files, Some(repo.as_ref()));
            print_report(&report, false);
            Ok(i32::from(!report.is_clean()))
        }
        Commands::Status { file_list, short } => {
            let config = load_config(cli.config.as_deref())?;

            let list_path = file_list.unwrap_or_else(|| config.core.file_list.clone());
            let files = watchlist::load(&list_path)?;

            let report = sweep::execute(&config, &files, None);
            print_report(&report, short);
            Ok(i32::from(!report.is_clean()))
        }
    }
}

fn load_config(explicit: Option<&std::path::Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let home = dirs::home_dir().context("Could not find home directory")?;
            home.join(confsync::DEFAULT_CONFIG_PATH)
        }
    };
    Config::load(&path)
}

fn print_report(report: &SweepReport, short: bool) {
    for (path, verdict) in &report.verdicts {
        if short && *verdict == Verdict::Unchanged {
            continue;
        }
        let label = match verdict {
            Verdict::Unseen => "unseen".cyan(),
            Verdict::Unchanged => "unchanged".normal(),
            Verdict::Changed => "changed".yellow().bold(),
        };
        println!("{label:>12}  {}", path.display());
    }

    for failure in &report.failures {
        eprintln!(
            "{} {} ({})",
            "failed:".red().bold(),
            failure.path.display(),
            failure.error
        );
    }

    let (unseen, unchanged, changed) = report.counts();
    println!(
        "{unseen} unseen, {unchanged} unchanged, {changed} changed, {} failed",
        report.failures.len()
    );
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
