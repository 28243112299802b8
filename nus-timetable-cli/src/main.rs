mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use nus_timetable_core::catalog::DEFAULT_API_ROOT;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "nus-timetable")]
#[command(about = "NUS module catalog and timetable generation tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// NUSMods API root (change to target another academic year)
    #[arg(long, default_value = DEFAULT_API_ROOT)]
    api_root: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List modules from the catalog
    Modules {
        /// Only show modules whose code contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one module's detail record
    Show {
        /// Module code, e.g. CS2103
        code: String,
    },

    /// Generate a timetable for a set of modules
    Generate {
        /// Module code; repeat for each module
        #[arg(short, long = "module", required = true)]
        modules: Vec<String>,

        /// Semester: 1, 2, 3 (Special Term 1) or 4 (Special Term 2)
        #[arg(short, long, default_value = "1")]
        semester: String,

        /// Output file path (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("nus_timetable_cli={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Modules { search } => commands::modules_command(&cli.api_root, search).await,

        Commands::Show { code } => commands::show_command(&cli.api_root, &code).await,

        Commands::Generate {
            modules,
            semester,
            output,
        } => {
            commands::generate_command(commands::GenerateParams {
                api_root: cli.api_root,
                modules,
                semester,
                output,
            })
            .await
        }
    }
}
