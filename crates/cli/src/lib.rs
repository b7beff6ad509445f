//! Command-line delivery adapter: order JSON in, HTML invoice file out.

pub mod args;
pub mod settings;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDateTime;

use arve_invoicing::{InvoiceBuilder, InvoiceInput, default_invoice_number};

pub use args::Args;
pub use settings::Settings;

/// Build and render the invoice described by `args.input` and write it to
/// `<out dir>/<prefix><number>.html`. Returns the written path.
pub fn run(args: &Args, settings: Settings, now: NaiveDateTime) -> anyhow::Result<PathBuf> {
    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let record: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", args.input.display()))?;

    let mut input = InvoiceInput::from_record(&record).context("unreadable invoice request")?;
    if input.invoice_number.is_none() {
        let number = default_invoice_number(now);
        tracing::warn!(invoice_number = %number, "request has no invoice number; using a time-derived one");
        input.invoice_number = Some(number);
    }

    let out_dir = args.out_dir.clone().unwrap_or(settings.out_dir);
    let builder = InvoiceBuilder::new(settings.invoice).context("invalid invoice configuration")?;
    let invoice = builder
        .build(input, now.date())
        .context("invoice request rejected")?;
    let document = arve_render::render(&invoice);

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let path = out_dir.join(invoice.file_name(arve_render::EXTENSION));
    fs::write(&path, document).with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        reference = invoice.reference_number(),
        total = %invoice.total(),
        "invoice written"
    );

    Ok(path)
}
