use clap::{Parser, Subcommand};
use modman::config::DirectoryOverrides;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "modman")]
#[command(about = "Install, update and remove game mods")]
#[command(version)]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Directory for mod libraries
    #[arg(long, global = true, value_name = "DIR")]
    library_dir: Option<PathBuf>,
    /// Data directory of the base game
    #[arg(long, global = true, value_name = "DIR")]
    base_data_dir: Option<PathBuf>,
    /// Data directory of the expansion
    #[arg(long, global = true, value_name = "DIR")]
    expansion_data_dir: Option<PathBuf>,
    /// Directory holding the runtime library
    #[arg(long, global = true, value_name = "DIR")]
    runtime_dir: Option<PathBuf>,
    /// Remember the directory flags in the config file
    #[arg(long, global = true)]
    save_paths: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install mod packages (.sporemod or .package)
    Install {
        /// Package files to install
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Skip packages that are already installed
        #[arg(short = 'n', long, conflicts_with = "update_needed")]
        needed: bool,
        /// Replace packages that are already installed
        #[arg(short = 'u', long)]
        update_needed: bool,
    },
    /// Replace installed mods with newer packages
    Update {
        /// Package files to install
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Uninstall mods by position (`3`, `0 2 5`) or range (`0-4`)
    Uninstall {
        /// Positions as shown by list-installed
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// List installed mods
    ListInstalled {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Download the latest runtime library
    #[command(alias = "update-modapi")]
    UpdateRuntime,
    /// Inspect the configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("modman=debug,modman_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let options = cli::GlobalOptions {
        overrides: DirectoryOverrides {
            library_dir: cli.library_dir,
            base_data_dir: cli.base_data_dir,
            expansion_data_dir: cli.expansion_data_dir,
            runtime_dir: cli.runtime_dir,
        },
        save_paths: cli.save_paths,
    };

    let result = match cli.command {
        Commands::Install {
            paths,
            needed,
            update_needed,
        } => cli::install::run(&options, paths, needed, update_needed),
        Commands::Update { paths } => cli::update::run(&options, paths),
        Commands::Uninstall { ids } => cli::uninstall::run(&options, ids),
        Commands::ListInstalled { json } => cli::list::run(&options, json),
        Commands::UpdateRuntime => cli::update_runtime::run(&options).await,
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => cli::config::show(&options),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n{}", modman::format_error_with_help(&e));
            ExitCode::FAILURE
        }
    }
}
