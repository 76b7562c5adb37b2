use clap::{Parser, Subcommand};

/// Command-line client for the triage MCP server.
///
/// Discovers the server's tools over the MCP protocol and invokes them
/// by name with a JSON argument bag.
#[derive(Parser, Debug)]
#[command(name = "triage-cli", about = "Command-line client for the triage MCP server")]
pub struct CliArgs {
    /// RPC endpoint URL (overrides TRIAGE_SERVER_URL)
    #[arg(long)]
    pub server: Option<String>,

    /// Per-call deadline in milliseconds (overrides TRIAGE_CALL_TIMEOUT_MS)
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Perform the handshake and print server info
    Info,
    /// List the server's tools and their parameters
    Tools,
    /// Call a tool by name
    Call {
        /// Tool name as advertised by `tools`
        name: String,

        /// JSON object of arguments
        #[arg(long, default_value = "{}")]
        args: String,
    },
}
