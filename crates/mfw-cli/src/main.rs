use anyhow::Result;
use clap::{Parser, Subcommand};
use mfw_application::Workbench;
use mfw_infrastructure::MfwPaths;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "mfw")]
#[command(about = "MF Workbench - topic and script generation for short-video creators", long_about = None)]
struct Cli {
    /// Access code, when the workbench requires one
    #[arg(long, global = true, env = "MFW_ACCESS_CODE", hide_env_values = true, default_value = "")]
    access_code: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate candidate topics from raw material ("-" reads stdin)
    Topics {
        material: String,
        /// Print the topics as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Write a five-part script for a topic ("-" reads stdin)
    Script { topic: String },
    /// Show where configuration, secrets and logs live
    Paths,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MFW_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let paths = MfwPaths::default();
    tracing::debug!(config_dir = ?paths.config_dir().ok(), "Starting mfw");

    match cli.command {
        Commands::Paths => commands::paths::show(&paths)?,
        Commands::Topics { material, json } => {
            let material = commands::generate::resolve_input(&material)?;
            let workbench = Workbench::load(paths).await?;
            commands::generate::topics(&workbench, &cli.access_code, &material, json).await?
        }
        Commands::Script { topic } => {
            let topic = commands::generate::resolve_input(&topic)?;
            let workbench = Workbench::load(paths).await?;
            commands::generate::script(&workbench, &cli.access_code, &topic).await?
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_topics_json() {
        let cli = Cli::try_parse_from(["mfw", "topics", "raw text", "--json", "--access-code", "vip"]).unwrap();
        assert_eq!(cli.access_code, "vip");
        assert!(matches!(cli.command, Commands::Topics { ref material, json: true } if material == "raw text"));
    }
}
