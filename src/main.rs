//! osm-adapter CLI - install and remove the Open Service Mesh control plane

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use osm_adapter::commands;
use osm_adapter::config::Settings;
use osm_adapter::log_error;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "osm-adapter")]
#[command(author, version, about = "Install and manage the Open Service Mesh control plane", long_about = None)]
struct Cli {
    /// Verbose output (can be used multiple times: -v, -vv, -vvv)
    /// -v: INFO, -vv: DEBUG, -vvv: TRACE
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a config file (defaults to .osm-adapter.toml or the user config dir)
    #[arg(short, long, global = true, env = "OSM_ADAPTER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the latest releases as returned by the API
    Releases {
        /// Number of releases to fetch
        #[arg(short = 'n', long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=100))]
        count: u32,
    },

    /// List the newest stable version names
    Versions {
        /// Maximum number of versions to print
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },

    /// List the entries of a directory in the repository
    Files {
        /// Slash-separated directory path (defaults to mesh.manifests_path)
        path: Option<String>,

        /// Repository API root, e.g. https://api.github.com/repos/openservicemesh/osm
        #[arg(long)]
        repo_url: Option<String>,
    },

    /// Install OSM by running the install script
    Install {
        /// Version to install (defaults to the newest stable release)
        #[arg(long)]
        version: Option<String>,

        /// Ensure the mesh namespace exists first
        #[arg(long)]
        create_namespace: bool,

        /// Mesh namespace (defaults to mesh.namespace)
        #[arg(short, long)]
        namespace: Option<String>,
    },

    /// Remove OSM by running the delete script
    Delete {
        /// Version to remove
        #[arg(long)]
        version: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Ensure a namespace exists
    Namespace {
        /// Namespace name
        name: String,
    },

    /// Apply a manifest file to a namespace, or delete its objects
    Apply {
        /// Manifest file
        #[arg(short, long)]
        file: PathBuf,

        /// Target namespace (defaults to mesh.namespace)
        #[arg(short, long)]
        namespace: Option<String>,

        /// Delete the objects instead of applying them
        #[arg(long)]
        delete: bool,
    },

    /// Check prerequisites
    Check,

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write an example config file
    Init {
        /// Destination path
        #[arg(short, long, default_value = ".osm-adapter.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective settings
    Show,
}

fn main() {
    let cli = Cli::parse();

    osm_adapter::utils::logger::init(cli.verbose);

    if let Err(e) = run(cli) {
        log_error!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.config;
    let settings = || Settings::load(config.as_deref());

    match cli.command {
        Commands::Releases { count } => commands::releases::list_releases(&settings()?, count),
        Commands::Versions { limit } => commands::releases::list_versions(&settings()?, limit),
        Commands::Files { path, repo_url } => commands::manifests::list_files(
            &settings()?,
            path.as_deref(),
            repo_url.as_deref(),
        ),
        Commands::Install {
            version,
            create_namespace,
            namespace,
        } => commands::mesh::install(
            &settings()?,
            commands::mesh::InstallOptions {
                version,
                create_namespace,
                namespace,
            },
        ),
        Commands::Delete { version, yes } => commands::mesh::delete(&settings()?, &version, yes),
        Commands::Namespace { name } => commands::mesh::ensure_namespace(&name),
        Commands::Apply {
            file,
            namespace,
            delete,
        } => commands::mesh::apply(&settings()?, &file, namespace.as_deref(), delete),
        Commands::Check => commands::check::check(&settings()?),
        Commands::Config { command } => handle_config_command(command, settings),
        Commands::Completion { shell } => handle_completion_command(shell),
        Commands::Version => handle_version_command(),
    }
}

/// `init` runs without loading settings, so a broken config file can be replaced
fn handle_config_command(
    command: ConfigCommands,
    settings: impl FnOnce() -> Result<Settings>,
) -> Result<()> {
    match command {
        ConfigCommands::Init { path, force } => commands::config::init(&path, force),
        ConfigCommands::Show => commands::config::show(&settings()?),
    }
}

fn handle_completion_command(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "osm-adapter", &mut io::stdout());
    Ok(())
}

fn handle_version_command() -> Result<()> {
    println!("osm-adapter {}", env!("CARGO_PKG_VERSION"));
    println!("Open Service Mesh adapter");
    Ok(())
}
