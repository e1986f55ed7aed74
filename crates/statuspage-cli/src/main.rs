mod cmd;
mod output;

use clap::{Parser, Subcommand};
use cmd::RepoArgs;

#[derive(Parser)]
#[command(
    name = "statuspage",
    about = "Generate a status page from GitHub issues and publish it to GitHub Pages",
    version,
    propagate_version = true
)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new status page repository and publish the first page
    Create {
        #[command(flatten)]
        repo: RepoArgs,

        /// Comma-separated systems to track, e.g. "Website,API"
        #[arg(long)]
        systems: String,

        /// Create a private repository
        #[arg(long)]
        private: bool,
    },

    /// Regenerate the page from current issues and publish it if it changed
    Update {
        #[command(flatten)]
        repo: RepoArgs,
    },

    /// Show the current status of every system without publishing
    Status {
        #[command(flatten)]
        repo: RepoArgs,
    },

    /// Refresh the template and static assets on the pages branch
    Upgrade {
        #[command(flatten)]
        repo: RepoArgs,
    },

    /// Start tracking a new system
    AddSystem {
        #[command(flatten)]
        repo: RepoArgs,

        /// System name (label to create)
        #[arg(long)]
        system: String,

        /// Regenerate the page after the system was added
        #[arg(long)]
        update: bool,
    },

    /// Stop tracking a system
    RemoveSystem {
        #[command(flatten)]
        repo: RepoArgs,

        /// System name (label to delete)
        #[arg(long)]
        system: String,

        /// Regenerate the page after the system was removed
        #[arg(long)]
        update: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Create {
            repo,
            systems,
            private,
        } => cmd::create::run(&repo, &systems, private, cli.json),
        Commands::Update { repo } => cmd::update::run(&repo, cli.json),
        Commands::Status { repo } => cmd::update::status(&repo, cli.json),
        Commands::Upgrade { repo } => cmd::upgrade::run(&repo, cli.json),
        Commands::AddSystem {
            repo,
            system,
            update,
        } => cmd::system::add(&repo, &system, update, cli.json),
        Commands::RemoveSystem {
            repo,
            system,
            update,
        } => cmd::system::remove(&repo, &system, update, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
