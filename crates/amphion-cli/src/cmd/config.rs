use crate::output::{print_fields, print_json};
use amphion_core::config::{DispatchConfig, WarnLevel};
use amphion_core::Provider;
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the effective config (defaults applied, delay clamped)
    Show,

    /// Validate the config for common mistakes
    Validate,

    /// Write a default config file
    Init,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(config_path: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(config_path, json),
        ConfigSubcommand::Validate => validate(config_path, json),
        ConfigSubcommand::Init => init(config_path),
    }
}

fn load(config_path: &Path) -> anyhow::Result<DispatchConfig> {
    DispatchConfig::load(config_path)
        .with_context(|| format!("failed to load config {}", config_path.display()))
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(config_path: &Path, json: bool) -> anyhow::Result<()> {
    let config = load(config_path)?;

    if json {
        let overrides: serde_json::Map<String, serde_json::Value> = Provider::all()
            .iter()
            .map(|p| {
                (
                    p.to_string(),
                    serde_json::json!(config.overrides_for(*p)),
                )
            })
            .collect();
        return print_json(&serde_json::json!({
            "path": config_path.display().to_string(),
            "exists": config_path.exists(),
            "open_delay_ms": config.open_delay_ms(),
            "enable_diagnostics_logging": config.enable_diagnostics_logging,
            "attempt_timeout_ms": config.attempt_timeout_ms,
            "effective_overrides": overrides,
        }));
    }

    let source = if config_path.exists() {
        config_path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", config_path.display())
    };
    let timeout = match config.attempt_timeout_ms {
        Some(ms) => format!("{ms}ms"),
        None => "none".to_string(),
    };
    let logging = if config.enable_diagnostics_logging { "on" } else { "off" };
    print_fields(&[
        ("config", source),
        ("open delay", format!("{}ms", config.open_delay_ms())),
        ("diagnostics log", logging.to_string()),
        ("attempt timeout", timeout),
    ]);
    println!("overrides:");
    for p in Provider::all() {
        let cmds = config.overrides_for(*p);
        if cmds.is_empty() {
            println!("  {p}: (none)");
        } else {
            println!("  {p}: {}", cmds.join(", "));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(config_path: &Path, json: bool) -> anyhow::Result<()> {
    let config = load(config_path)?;
    let warnings = config.validate();

    if json {
        let value = serde_json::json!({
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    let has_errors = warnings.iter().any(|w| w.level == WarnLevel::Error);
    if has_errors {
        anyhow::bail!("config validation found errors");
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

fn init(config_path: &Path) -> anyhow::Result<()> {
    DispatchConfig::init(config_path).context("failed to write config")?;
    println!("Wrote {}", config_path.display());
    Ok(())
}
