use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "startup-diag")]
#[command(about = "Locate extension startup types and record service resolution events")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Events sent after the host reaches specialization
    #[arg(long, value_delimiter = ',')]
    pub events: Vec<String>,

    /// Events sent before activate(); dropped unless [resolution_log] enabled = true
    #[arg(long, value_delimiter = ',')]
    pub pre_activation_events: Vec<String>,

    /// Override the allow-listed name prefixes
    #[arg(long, value_delimiter = ',')]
    pub allow: Vec<String>,

    /// Write exported events as NDJSON to this file instead of the log
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}
