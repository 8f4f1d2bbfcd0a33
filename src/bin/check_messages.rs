//! Message document checker - loads every enabled locale and reports schema problems
//!
//! Usage:
//!   cargo run --bin check-messages
//!   MESSAGES_DIR=messages cargo run --bin check-messages   # Check documents on disk
//!
//! Optional environment variables:
//! - DEFAULT_LOCALE (defaults to en)
//! - ENABLED_LOCALES (defaults to en,es,fr)
//! - MESSAGES_DIR (defaults to the compiled-in documents)
//!
//! Exits with a non-zero status when any locale fails to load or has schema
//! errors. Warnings are printed but do not fail the check.

use anyhow::{bail, Context, Result};
use music_catalog::config::Config;
use music_catalog::i18n::{Locale, SchemaValidator, ValidationReport};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("music_catalog=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let service = config
        .locale_service()
        .context("Invalid locale configuration")?;
    let registry = service.registry();

    match &config.messages_dir {
        Some(dir) => info!("Checking message documents in {}", dir.display()),
        None => info!("Checking compiled-in message documents"),
    }

    let default_locale = registry.default_locale();
    let default = service
        .load_messages(default_locale)
        .await
        .with_context(|| format!("Failed to load default locale '{}'", default_locale))?;

    let mut failed = 0;
    let mut summary = ValidationReport::new();

    let schema_report = SchemaValidator::validate_schema(&default);
    failed += print_report(&format!("{} (schema)", label(default_locale)), &schema_report);
    summary.merge(schema_report);

    for locale in registry.translations() {
        match service.load_messages(locale).await {
            Ok(bundle) => {
                let report = SchemaValidator::validate_translation(&default, &bundle);
                failed += print_report(&label(locale), &report);
                summary.merge(report);
            }
            Err(e) => {
                println!("✗ {}: {:#}", label(locale), anyhow::Error::new(e));
                failed += 1;
            }
        }
    }

    println!(
        "\n{} locales checked: {} errors, {} warnings",
        registry.enabled().len(),
        summary.errors.len(),
        summary.warnings.len()
    );

    if failed > 0 {
        bail!("{} locale(s) failed the message check", failed);
    }

    println!("All {} locales passed", registry.enabled().len());
    Ok(())
}

/// e.g. "es (Español)"
fn label(locale: Locale) -> String {
    format!("{} ({})", locale, locale.native_name())
}

/// Print one locale's findings; returns 1 if it has errors
fn print_report(label: &str, report: &ValidationReport) -> usize {
    let mark = if report.has_errors() {
        "✗"
    } else if report.has_warnings() {
        "!"
    } else {
        "✓"
    };
    println!(
        "{} {}: {} errors, {} warnings",
        mark,
        label,
        report.errors.len(),
        report.warnings.len()
    );

    for error in &report.errors {
        println!("    error: {}", error);
    }
    for warning in &report.warnings {
        println!("    warning: {}", warning);
    }

    usize::from(report.has_errors())
}
