//! MCP tool server binary.
//!
//! Builds the tool registry once at startup, then serves the MCP protocol
//! on a single HTTP endpoint until killed. All per-request state lives in
//! the request itself; the registry is read-only after this point.

use std::sync::Arc;

use tracing::info;

use triage_mcp::http::{build_router, AppState, Framing};
use triage_mcp::server::McpService;
use triage_tool_runtime::{
    ConditionDetailsTool, PatientConditionsTool, RiskScoreTool, ToolRegistry,
};

fn build_registry() -> anyhow::Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(RiskScoreTool)?;
    registry.register(PatientConditionsTool)?;
    registry.register(ConditionDetailsTool)?;
    Ok(registry)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    triage_core::config::load_dotenv();
    let config = triage_core::Config::from_env();
    config.log_summary();

    let framing = match config.server.framing.parse::<Framing>() {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!("{e}, falling back to plain JSON framing");
            Framing::Json
        }
    };

    let registry = build_registry()?;
    info!(tools = registry.len(), "Tool registry ready");

    let state = AppState {
        service: Arc::new(McpService::new(Arc::new(registry))),
        framing,
    };
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("MCP server listening on http://{addr}/mcp ({framing:?} framing)");
    axum::serve(listener, app).await?;

    Ok(())
}
