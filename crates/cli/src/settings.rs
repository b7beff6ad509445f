//! Runtime settings: an optional JSON company profile plus env overrides.
//!
//! | Variable             | Effect                                   |
//! |----------------------|------------------------------------------|
//! | `ARVE_CONFIG`        | config file, when `--config` isn't given |
//! | `ARVE_TAX_RATE`      | VAT fraction, e.g. `0.24`                |
//! | `ARVE_DUE_DAYS`      | payment term in days                     |
//! | `ARVE_NUMBER_PREFIX` | invoice number prefix                    |
//! | `ARVE_OUT_DIR`       | output directory (default `.`)           |

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};

use arve_core::format::parse_decimal;
use arve_invoicing::InvoiceConfig;

pub const CONFIG_ENV: &str = "ARVE_CONFIG";
pub const TAX_RATE_ENV: &str = "ARVE_TAX_RATE";
pub const DUE_DAYS_ENV: &str = "ARVE_DUE_DAYS";
pub const NUMBER_PREFIX_ENV: &str = "ARVE_NUMBER_PREFIX";
pub const OUT_DIR_ENV: &str = "ARVE_OUT_DIR";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub invoice: InvoiceConfig,
    pub out_dir: PathBuf,
}

impl Settings {
    /// Load settings. `env` looks up environment variables; it is a parameter
    /// so tests don't have to touch the process environment.
    pub fn load(
        config_path: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let config_path = config_path
            .map(Path::to_path_buf)
            .or_else(|| env(CONFIG_ENV).map(PathBuf::from));

        let mut invoice = match config_path {
            Some(path) => read_config(&path)?,
            None => {
                tracing::warn!("no company profile configured (use --config or {CONFIG_ENV})");
                InvoiceConfig::default()
            }
        };

        if let Some(raw) = env(TAX_RATE_ENV) {
            invoice.tax_rate = parse_decimal(&raw)
                .ok_or_else(|| anyhow!("{TAX_RATE_ENV} is not a number: {raw}"))?;
        }
        if let Some(raw) = env(DUE_DAYS_ENV) {
            invoice.due_days = raw
                .trim()
                .parse()
                .with_context(|| format!("{DUE_DAYS_ENV} is not a whole number: {raw}"))?;
        }
        if let Some(prefix) = env(NUMBER_PREFIX_ENV) {
            invoice.number_prefix = prefix;
        }

        let out_dir = env(OUT_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self { invoice, out_dir })
    }
}

fn read_config(path: &Path) -> anyhow::Result<InvoiceConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: InvoiceConfig = serde_json::from_str(&raw)
        .with_context(|| format!("invalid config {}", path.display()))?;
    tracing::debug!(path = %path.display(), company = %config.company.party.name, "config loaded");
    Ok(config)
}
