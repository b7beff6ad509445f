use std::path::PathBuf;

use clap::Parser;

/// Build an Estonian invoice from a JSON request and write it as HTML.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "arve")]
#[command(about = "Estonian invoice generator")]
pub struct Args {
    /// Invoice request (JSON).
    pub input: PathBuf,
    /// Company profile (JSON); falls back to ARVE_CONFIG.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Output directory; falls back to ARVE_OUT_DIR, then `.`.
    #[arg(short = 'o', long = "out")]
    pub out_dir: Option<PathBuf>,
}
