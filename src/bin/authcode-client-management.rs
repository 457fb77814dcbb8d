//! Client management CLI for the authorization code server.
//!
//! Registers and inspects clients through the server's client registry API.
//!
//! ```bash
//! authcode-client-management --base-url http://localhost:9001 register \
//!   --redirect-uri "http://localhost:9000/callback" \
//!   --redirect-uri "http://localhost:9000/alt"
//!
//! authcode-client-management get --client-id "client_id_here"
//! ```
//!
//! Exit codes:
//! - 0: Success
//! - 1: Network, parsing or other local error
//! - 2: The server rejected the request

use clap::{Args, Parser, Subcommand, ValueEnum};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::process;

/// Client registration request body
#[derive(Debug, Serialize)]
struct ClientRegistrationRequest {
    redirect_uris: Vec<String>,
}

/// Registered client as returned by the server
#[derive(Debug, Deserialize, Serialize)]
struct ClientResponse {
    client_id: String,
    client_secret: String,
    redirect_uris: Vec<String>,
}

#[derive(Parser)]
#[command(
    name = "authcode-client-management",
    about = "Register and inspect clients of an authorization code server",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    /// Base URL of the authorization server
    #[arg(long, env = "AUTHCODE_BASE_URL", default_value = "http://localhost:9001")]
    base_url: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Json,
    JsonPretty,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new client
    Register(RegisterArgs),
    /// Get an existing client
    Get(GetArgs),
}

#[derive(Args)]
struct RegisterArgs {
    /// Redirect URI (repeat for several)
    #[arg(long = "redirect-uri", required = true)]
    redirect_uris: Vec<String>,
}

#[derive(Args)]
struct GetArgs {
    /// Client ID
    #[arg(long, env = "AUTHCODE_CLIENT_ID")]
    client_id: String,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Client management error: {0}")]
    ClientManagement(String),
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::Network(_) | AppError::Json(_) => 1,
            AppError::ClientManagement(_) => 2,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let base_url = cli.base_url.trim_end_matches('/').to_string();

    let result = match &cli.command {
        Commands::Register(args) => register_client(&cli, &base_url, args).await,
        Commands::Get(args) => get_client(&cli, &base_url, args).await,
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        process::exit(err.exit_code());
    }
}

async fn register_client(cli: &Cli, base_url: &str, args: &RegisterArgs) -> Result<(), AppError> {
    let request = ClientRegistrationRequest {
        redirect_uris: args.redirect_uris.clone(),
    };

    if cli.verbose {
        eprintln!(
            "Registration request to {}: {}",
            base_url,
            serde_json::to_string_pretty(&request)?
        );
    }

    let url = format!("{}/clients/register", base_url);
    let response = Client::new().post(&url).json(&request).send().await?;

    if cli.verbose {
        eprintln!("Response status: {}", response.status());
    }

    match response.status() {
        StatusCode::CREATED | StatusCode::OK => {
            let client: ClientResponse = response.json().await?;
            output_response(&cli.format, &client)
        }
        status => {
            let error_text = response.text().await?;
            Err(AppError::ClientManagement(format!(
                "Registration failed with status {}: {}",
                status, error_text
            )))
        }
    }
}

async fn get_client(cli: &Cli, base_url: &str, args: &GetArgs) -> Result<(), AppError> {
    if cli.verbose {
        eprintln!("Getting client information for: {}", args.client_id);
    }

    let url = format!("{}/clients/{}", base_url, args.client_id);
    let response = Client::new().get(&url).send().await?;

    if cli.verbose {
        eprintln!("Response status: {}", response.status());
    }

    match response.status() {
        StatusCode::OK => {
            let client: ClientResponse = response.json().await?;
            output_response(&cli.format, &client)
        }
        StatusCode::NOT_FOUND => Err(AppError::ClientManagement(format!(
            "Client '{}' not found",
            args.client_id
        ))),
        status => {
            let error_text = response.text().await?;
            Err(AppError::ClientManagement(format!(
                "Failed to get client with status {}: {}",
                status, error_text
            )))
        }
    }
}

/// Output response data in the requested format
fn output_response<T: Serialize>(format: &OutputFormat, data: &T) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(data)?),
        OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(data)?),
        OutputFormat::Table => print_table(&serde_json::to_value(data)?, 0),
    }
    Ok(())
}

fn print_table(value: &Value, indent: usize) {
    let prefix = "  ".repeat(indent);

    match value {
        Value::Object(map) => {
            for (key, val) in map {
                match val {
                    Value::Object(_) => {
                        println!("{}{}:", prefix, key);
                        print_table(val, indent + 1);
                    }
                    Value::Array(items) => {
                        println!("{}{}:", prefix, key);
                        for item in items {
                            print_table(item, indent + 1);
                        }
                    }
                    _ => println!("{}{}: {}", prefix, key, format_value(val)),
                }
            }
        }
        _ => println!("{}{}", prefix, format_value(value)),
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
