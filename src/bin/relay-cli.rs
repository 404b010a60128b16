use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Command-line client for the endpoint relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether an endpoint is reachable on a port
    Check {
        /// Endpoint URL including scheme, e.g. https://example.com
        target: String,
        /// Port to check
        port: u16,
    },
    /// Fetch a site's favicon through the relay
    Icon {
        /// Site URL; https is assumed when no scheme is given
        target: String,
        /// Write the icon to this file instead of printing a summary
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Check { target, port } => {
            let res = client
                .post(format!("{}/check", base))
                .json(&json!({ "url": target, "port": port }))
                .send()
                .await?;
            print_check(res).await
        }
        Commands::Icon { target, output } => {
            let res = client
                .get(format!("{}/get-icon", base))
                .query(&[("url", target.as_str())])
                .send()
                .await?;
            save_icon(res, output).await
        }
    }
}

async fn print_check(res: reqwest::Response) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let status = res.status();
    let body: Value = res.json().await?;
    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
        eprintln!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(ExitCode::FAILURE);
    }

    println!("{}", serde_json::to_string_pretty(&body)?);
    if body["status"] == "OK" {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

async fn save_icon(
    res: reqwest::Response,
    output: Option<PathBuf>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("{}", text);
        }
        return Ok(ExitCode::FAILURE);
    }

    let content_type = res
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    let bytes = res.bytes().await?;

    match output {
        Some(path) => {
            tokio::fs::write(&path, &bytes).await?;
            println!("Saved {} bytes ({}) to {}", bytes.len(), content_type, path.display());
        }
        None => println!("Icon: {} bytes ({})", bytes.len(), content_type),
    }
    Ok(ExitCode::SUCCESS)
}
