use anyhow::Context;
use clap::{Parser, Subcommand};
use shelf_kernel::{settings::Settings, ModuleRegistry};

#[derive(Debug, Parser)]
#[command(name = "shelf", version, about = "Books and recipes CRUD services")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Migrate the service database and serve its HTTP API
    Serve {
        #[arg(value_parser = clap::builder::PossibleValuesParser::new(shelf_app::SERVICES.iter().copied()))]
        service: String,
        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
    },
    /// Create the service table if it does not exist yet
    Migrate {
        #[arg(value_parser = clap::builder::PossibleValuesParser::new(shelf_app::SERVICES.iter().copied()))]
        service: String,
    },
    /// Print the service's HTTP routes as OpenAPI JSON
    Routes {
        #[arg(value_parser = clap::builder::PossibleValuesParser::new(shelf_app::SERVICES.iter().copied()))]
        service: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings =
        Settings::load().with_context(|| "failed to load SHELF settings")?;

    match cli.command {
        Command::Serve { service, port } => {
            shelf_telemetry::init(&settings.telemetry)?;
            if let Some(port) = port {
                settings.server.port = port;
            }
            shelf_app::app::serve(&settings, &service).await
        }
        Command::Migrate { service } => {
            shelf_telemetry::init(&settings.telemetry)?;
            shelf_app::app::migrate(&settings, &service).await?;
            tracing::info!(service = %service, "migration complete");
            Ok(())
        }
        Command::Routes { service } => {
            let mut registry = ModuleRegistry::new();
            shelf_app::modules::register(&mut registry, &service)?;
            let document = shelf_http::router::merge_openapi(&registry);
            println!("{}", serde_json::to_string_pretty(&document["paths"])?);
            Ok(())
        }
    }
}
