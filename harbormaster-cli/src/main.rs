#![deny(missing_docs)]
//! Harbormaster command-line interface.
//!
//! A thin client for the fleet registry server: CRUD operations plus
//! document and spreadsheet export downloads.

use clap::{Args, Parser, Subcommand, ValueEnum};
use harbormaster_core::{
    FLEET_DOCUMENT_FILENAME, FLEET_SPREADSHEET_FILENAME, SHIP_FIELD_LABELS, ShipInput, ShipRecord,
    ship_document_filename, ship_spreadsheet_filename,
};
use std::path::PathBuf;

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "harbormaster", version, about = "Harbormaster fleet registry CLI")]
struct Cli {
    /// Base URL of the Harbormaster server.
    #[arg(
        long,
        env = "HARBORMASTER_URL",
        default_value = "http://127.0.0.1:8080"
    )]
    server: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct ShipFields {
    /// Ship name.
    #[arg(long)]
    name: String,
    /// Displacement in tons.
    #[arg(long)]
    displacement: f64,
    /// Home port.
    #[arg(long)]
    port: String,
    /// Captain's name.
    #[arg(long)]
    captain: String,
    /// Assigned berth number.
    #[arg(long)]
    berth: i32,
    /// Current destination.
    #[arg(long)]
    target: String,
}

impl From<ShipFields> for ShipInput {
    fn from(fields: ShipFields) -> Self {
        Self {
            name: fields.name,
            displacement: fields.displacement,
            port: fields.port,
            captain: fields.captain,
            berth_number: fields.berth,
            target: fields.target,
        }
    }
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum ExportFormat {
    /// Word document.
    Word,
    /// Spreadsheet workbook.
    Excel,
}

#[derive(Subcommand)]
enum Commands {
    /// List every ship in the registry.
    List,
    /// Show a single ship.
    Get {
        /// Ship identifier.
        id: i32,
    },
    /// Register a new ship.
    Add {
        #[command(flatten)]
        fields: ShipFields,
    },
    /// Replace every field of a ship.
    Edit {
        /// Ship identifier.
        id: i32,
        #[command(flatten)]
        fields: ShipFields,
    },
    /// Remove a ship from the registry.
    Remove {
        /// Ship identifier.
        id: i32,
    },
    /// Download a document or spreadsheet export.
    Export {
        /// Export format.
        #[arg(long, value_enum, default_value_t = ExportFormat::Word)]
        format: ExportFormat,
        /// Restrict the export to a single ship id.
        #[arg(long)]
        id: Option<i32>,
        /// Output file; defaults to the attachment filename.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Server path and default filename for an export request.
fn export_target(format: ExportFormat, id: Option<i32>) -> (String, String) {
    match (format, id) {
        (ExportFormat::Word, None) => (
            "/ships/download_word".to_string(),
            FLEET_DOCUMENT_FILENAME.to_string(),
        ),
        (ExportFormat::Word, Some(id)) => (
            format!("/ships/download_word/{id}"),
            ship_document_filename(id),
        ),
        (ExportFormat::Excel, None) => (
            "/ships/download_excel".to_string(),
            FLEET_SPREADSHEET_FILENAME.to_string(),
        ),
        (ExportFormat::Excel, Some(id)) => (
            format!("/ships/download_excel/{id}"),
            ship_spreadsheet_filename(id),
        ),
    }
}

fn format_ship(ship: &ShipRecord) -> String {
    SHIP_FIELD_LABELS
        .iter()
        .zip(ship.field_values())
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

async fn check_status(response: reqwest::Response) -> CliResult<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let message = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| body.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| "no error detail".to_string());
    Err(format!("server returned {status}: {message}").into())
}

async fn run(cli: Cli) -> CliResult<()> {
    let client = reqwest::Client::new();
    let base = cli.server.trim_end_matches('/').to_string();

    match cli.command {
        Commands::List => {
            let response = client.get(format!("{base}/ships")).send().await?;
            let ships: Vec<ShipRecord> = check_status(response).await?.json().await?;
            println!("{} ships registered", ships.len());
            for ship in &ships {
                println!();
                println!("{}", format_ship(ship));
            }
        }
        Commands::Get { id } => {
            let response = client.get(format!("{base}/ships/{id}")).send().await?;
            let ship: ShipRecord = check_status(response).await?.json().await?;
            println!("{}", format_ship(&ship));
        }
        Commands::Add { fields } => {
            let input = ShipInput::from(fields);
            let response = client
                .post(format!("{base}/ships"))
                .json(&input)
                .send()
                .await?;
            let ship: ShipRecord = check_status(response).await?.json().await?;
            println!("registered ship {}", ship.id);
            println!("{}", format_ship(&ship));
        }
        Commands::Edit { id, fields } => {
            let input = ShipInput::from(fields);
            let response = client
                .put(format!("{base}/ships/{id}"))
                .json(&input)
                .send()
                .await?;
            let ship: ShipRecord = check_status(response).await?.json().await?;
            println!("updated ship {}", ship.id);
            println!("{}", format_ship(&ship));
        }
        Commands::Remove { id } => {
            let response = client.delete(format!("{base}/ships/{id}")).send().await?;
            let body: serde_json::Value = check_status(response).await?.json().await?;
            let message = body
                .get("data")
                .and_then(|value| value.as_str())
                .unwrap_or("ship deleted");
            println!("{message}");
        }
        Commands::Export { format, id, output } => {
            let (path, default_name) = export_target(format, id);
            let response = client.get(format!("{base}{path}")).send().await?;
            let bytes = check_status(response).await?.bytes().await?;
            let destination = output.unwrap_or_else(|| PathBuf::from(&default_name));
            tokio::fs::write(&destination, &bytes).await?;
            println!("wrote {} bytes to {}", bytes.len(), destination.display());
        }
    }
    Ok(())
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();
    run(cli).await
}

#[cfg(test)]
fn main() {}
