pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "solocart",
    about = "Solocart recommendation operator CLI",
    long_about = "Run the single-household recommendation cascade over catalog and profile snapshots, and inspect pools and configuration.",
    after_help = "Examples:\n  solocart recommend --catalog products.json --profiles profiles.json --user 42\n  solocart pools --catalog products.json\n  solocart config --path engine.toml"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Generate recommendations for one user from snapshot files")]
    Recommend {
        #[arg(long, help = "Path to the catalog snapshot (JSON array of products)")]
        catalog: PathBuf,
        #[arg(long, help = "Path to the user activity snapshot (JSON array)")]
        profiles: PathBuf,
        #[arg(long, help = "User id to recommend for")]
        user: u64,
        #[arg(long, help = "Number of recommendations (defaults to the configured top_k)")]
        top_k: Option<usize>,
        #[arg(long, help = "Optional engine config TOML path")]
        config: Option<PathBuf>,
        #[arg(long, help = "Treat the user as new: vector and emergency stages only")]
        new_user: bool,
    },
    #[command(about = "Build category pools from a catalog snapshot and report their sizes")]
    Pools {
        #[arg(long, help = "Path to the catalog snapshot (JSON array of products)")]
        catalog: PathBuf,
        #[arg(long, help = "Optional engine config TOML path")]
        config: Option<PathBuf>,
    },
    #[command(about = "Show the effective engine configuration")]
    Config {
        #[arg(long, help = "Optional engine config TOML path")]
        path: Option<PathBuf>,
    },
}

pub fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Recommend { catalog, profiles, user, top_k, config, new_user } => {
            commands::recommend::run(&commands::recommend::RecommendArgs {
                catalog,
                profiles,
                user,
                top_k,
                config,
                new_user,
            })
        }
        Command::Pools { catalog, config } => commands::pools::run(&catalog, config.as_deref()),
        Command::Config { path } => commands::config::run(path.as_deref()),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}
