mod cli;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use triage_mcp::client::McpClient;
use triage_mcp::ToolProxy;

use crate::cli::{CliArgs, Command};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    triage_core::config::load_dotenv();
    let config = triage_core::Config::from_env();

    let endpoint = args.server.unwrap_or(config.client.server_url);
    let timeout_ms = args.timeout_ms.or(config.client.call_timeout_ms);

    let mut client = McpClient::new(endpoint);
    if let Some(ms) = timeout_ms {
        client = client.with_timeout(Duration::from_millis(ms));
    }
    let client = Arc::new(client);

    match args.command {
        Command::Info => {
            let init = client.initialize().await.context("initialize failed")?;
            println!(
                "server:   {} v{}",
                init.server_info.name, init.server_info.version
            );
            println!("protocol: {}", init.protocol_version);
        }
        Command::Tools => {
            let tools = client.list_tools().await.context("tool discovery failed")?;
            for tool in tools {
                println!("{}", tool.name);
                println!("    {}", tool.description);
                for (param, prop) in &tool.input_schema.properties {
                    let required = if tool.input_schema.required.contains(param) {
                        " (required)"
                    } else {
                        ""
                    };
                    println!(
                        "    - {param}: {}{required}  {}",
                        prop.value_type.as_str(),
                        prop.description
                    );
                }
            }
        }
        Command::Call { name, args } => {
            let arguments: serde_json::Value =
                serde_json::from_str(&args).context("--args must be a JSON object")?;

            let proxies = ToolProxy::discover(Arc::clone(&client))
                .await
                .context("tool discovery failed")?;
            let proxy = proxies
                .iter()
                .find(|p| p.name() == name)
                .with_context(|| format!("no such tool '{name}'"))?;

            let output = proxy.invoke(arguments).await.context("tool call failed")?;
            println!("{output}");
        }
    }

    Ok(())
}
