//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for chat-relay
#[derive(Parser, Debug)]
#[command(name = "chat-relay")]
#[command(author, version, about = "Streaming chat relay with per-session history")]
#[command(long_about = r#"
chat-relay keeps one conversation transcript per session id and forwards each
chat turn to an OpenAI-compatible provider (Groq by default), streaming the
reply back to the browser as server-sent events.

Configuration is loaded from (in priority order):
1. RELAY_* environment variables (e.g. RELAY_SERVER__PORT=8080)
2. --config <path>     Explicit config file
3. ./relay.toml        Project-level config
4. ~/.config/chat-relay/config.toml   Global config

The provider key is read from GROQ_API_KEY unless configured otherwise.

Example:
  chat-relay
  chat-relay --port 8080 -v
  chat-relay --config relay.toml --show-config
"#)]
pub struct Cli {
    /// Address to bind (overrides server.host)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to listen on (overrides server.port)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}
