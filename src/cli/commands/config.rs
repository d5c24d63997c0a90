use crate::cli::commands::print_json;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::fs;

/// Handle the `config` subcommand
pub fn handle(print_config: bool, check: bool, cfg: &Config, json: bool) -> AppResult<()> {
    let path = Config::config_file();

    // ---- PRINT CONFIG ----
    if print_config {
        if json {
            print_json(cfg)?;
        } else {
            println!("📄 Current configuration ({}):\n", path.display());
            let yaml = serde_yaml::to_string(cfg)
                .map_err(|e| crate::errors::AppError::Config(e.to_string()))?;
            println!("{}", yaml);
        }
    }

    // ---- CHECK CONFIG ----
    if check {
        if !path.exists() {
            warning(format!(
                "No configuration file at {}; defaults are in use. Run `rworktime init`.",
                path.display()
            ));
            return Ok(());
        }

        let content = fs::read_to_string(&path)?;
        let missing = Config::missing_fields(&content)?;

        if json {
            print_json(&serde_json::json!({ "file": path, "missing": missing }))?;
        } else if missing.is_empty() {
            success("Configuration file is complete.");
        } else {
            for key in &missing {
                warning(format!("Missing key '{}' (default applies)", key));
            }
        }
    }

    if !print_config && !check {
        info(format!("Configuration file: {}", path.display()));
    }

    Ok(())
}
