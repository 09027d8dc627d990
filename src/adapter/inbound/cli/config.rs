//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::Settings;

/// Default settings template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, CONFIG_TEMPLATE)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.init",
            "path": path.display().to_string(),
        }));
        return Ok(());
    }

    output::section("Config Initialized");
    output::success("Created settings file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your pricing windows", path.display()));
    output::note(&format!(
        "2. Run: karat config validate -c {}",
        path.display()
    ));
    output::note(&format!(
        "3. Run: karat quote -c {} --source <price> --settlement <price>",
        path.display()
    ));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let settings = Settings::load(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path.display().to_string(),
            "settings": settings,
            "pricing": settings.pricing_config(),
        }));
        return Ok(());
    }

    let pricing = settings.pricing_config();
    output::section("Effective Configuration");
    output::field("Path", path.display());

    output::section("Pricing");
    output::field("Grades", format!("{} -> {}", pricing.source_grade, pricing.settlement_grade));
    output::field("Lot size", pricing.lot_size);
    output::field("Step", pricing.step);
    output::field("Search range", pricing.search_range);
    output::field("Spread", format!("{} - {}", pricing.spread_min, pricing.spread_max));
    output::field(
        "Discount",
        format!("{} - {}", pricing.discount_min, pricing.discount_max),
    );
    output::field("Margin", format!("{} - {}", pricing.margin_min, pricing.margin_max));
    output::field("Target margin", pricing.target_margin);
    output::field("Alternatives", pricing.top_n_alternatives);

    output::section("Tuning");
    let tuning = &settings.tuning;
    output::field("Algorithm", tuning.algorithm);
    output::field("Iterations", tuning.effective_iterations(tuning.algorithm));
    output::field(
        "Seed",
        tuning
            .seed
            .map_or_else(|| output::muted("random"), |s| s.to_string()),
    );
    output::field("Scenarios", tuning.scenarios.len());

    let rendered = settings
        .to_toml()
        .map_err(|e| ConfigError::invalid("config", e.to_string()))?;
    output::section("TOML");
    output::lines(&rendered);
    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    let settings = Settings::load(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "path": path.display().to_string(),
            "valid": true,
            "scenarios": settings.tuning.scenarios.len(),
        }));
        return Ok(());
    }

    output::success(&format!("{} is valid", path.display()));
    if settings.tuning.scenarios.is_empty() {
        output::hint("add [[tuning.scenarios]] entries to enable `karat tune`");
    }
    Ok(())
}
