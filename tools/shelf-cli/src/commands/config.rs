//! Configuration commands.

use anyhow::{bail, Context as _, Result};
use shelf_commerce::ShelfConfig;

use super::{ConfigArgs, ConfigCommand};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Validate { file } => validate_config(file.as_deref(), ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    match &ctx.config_path {
        Some(path) => ctx.output.kv("source", &path.display().to_string()),
        None => ctx.output.kv("source", "built-in defaults"),
    }
    let toml = ctx.config.to_toml_string().context("Failed to encode config")?;
    ctx.output.document(&toml);
    Ok(())
}

fn validate_config(file: Option<&str>, ctx: &Context) -> Result<()> {
    let config = match file {
        Some(path) => {
            let path = ctx.resolve_path(path);
            ShelfConfig::load(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?
        }
        None => ctx.config.clone(),
    };

    ctx.output.header("Validating configuration");
    let (errors, warnings) = check(&config);

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }
    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    if warnings.is_empty() {
        ctx.output.success("Configuration is valid");
    } else {
        ctx.output.success("Configuration is valid (with warnings)");
    }
    Ok(())
}

/// Errors and warnings for a parsed config.
fn check(config: &ShelfConfig) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if config.format.currency_symbol.trim().is_empty() {
        errors.push("format.currency_symbol must not be empty".to_string());
    }
    if config.format.placeholder.is_empty() {
        errors.push("format.placeholder must not be empty".to_string());
    }

    if let Some(base) = &config.images.proxy_base_url {
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            errors.push(format!(
                "images.proxy_base_url '{}' must be an http(s) URL",
                base
            ));
        }
    }

    let labels = &config.labels;
    let placeholders = [
        ("labels.compare_caption", &labels.compare_caption, "{count}"),
        ("labels.product_fallback", &labels.product_fallback, "{n}"),
        ("labels.dialog_counter", &labels.dialog_counter, "{count}"),
        ("labels.dialog_hint", &labels.dialog_hint, "{max}"),
    ];
    for (key, value, placeholder) in placeholders {
        if !value.contains(placeholder) {
            warnings.push(format!("{} does not use {}", key, placeholder));
        }
    }

    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_clean() {
        let (errors, warnings) = check(&ShelfConfig::default());
        assert!(errors.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_bad_values_reported() {
        let config = ShelfConfig::from_toml_str(
            r#"
            [format]
            currency_symbol = " "

            [images]
            proxy_base_url = "ftp://cdn"

            [labels]
            compare_caption = "Confronto"
            "#,
        )
        .unwrap();

        let (errors, warnings) = check(&config);
        assert_eq!(errors.len(), 2);
        assert_eq!(warnings, vec!["labels.compare_caption does not use {count}"]);
    }
}
