use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "cheat-finder")]
#[command(about = "Terminal client for the cheat-finder code analysis server", long_about = None)]
pub struct Cli {
    /// Host to prefill on the connection screen
    #[arg(long)]
    pub host: Option<String>,

    /// Port to prefill on the connection screen
    #[arg(long)]
    pub port: Option<u16>,

    /// JSON config file (overrides ~/.cheat-finder/config.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write diagnostic logs to this file (filter with RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Directory where exported results are saved
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Liveness probe period in milliseconds
    #[arg(long)]
    pub health_interval_ms: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}
