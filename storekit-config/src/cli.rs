//! Command-line interface for inspecting product configuration
//!
//! Prints the product identifiers and subscription groups a document yields, or checks
//! that it parses.

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use crate::{
    ConfigLoader, ConfigResult, OrderedRegistry, ProductId, ProductLayout, SettingsLoader,
    StoreSettings, SubscriptionGroupInfo,
    validation::Validatable,
};

/// Product configuration inspection tool
#[derive(Parser, Debug)]
#[command(name = "storekit-config")]
#[command(about = "Inspect StoreKit product configuration documents")]
#[command(version)]
pub struct ConfigCli {
    /// Directory containing the product document
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,

    /// Document name, with or without extension
    #[arg(short, long, global = true)]
    pub name: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Available configuration commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Print every configured product identifier
    Products,

    /// Print the configured subscription groups
    Groups,

    /// Check that the document parses and report its layout
    Validate,
}

/// CLI application runner
pub struct ConfigCliRunner;

impl ConfigCliRunner {
    /// Run the CLI application, writing results to stdout
    pub fn run(cli: ConfigCli) -> ConfigResult<()> {
        let stdout = std::io::stdout();
        Self::run_with_output(cli, &mut stdout.lock())
    }

    /// Run the CLI application, writing results to `out`
    pub fn run_with_output(cli: ConfigCli, out: &mut dyn Write) -> ConfigResult<()> {
        let settings = Self::settings(&cli)?;
        let source = settings.property_file();
        let mut loader = ConfigLoader::new();

        match cli.command {
            ConfigCommand::Products => {
                let ids = loader.read_product_ids(&source, Some(&settings.config_name));
                write_products(out, ids.as_ref(), cli.json)
            }
            ConfigCommand::Groups => {
                let groups = loader.read_subscription_groups(&source, Some(&settings.config_name));
                write_groups(out, groups.as_deref(), cli.json)
            }
            ConfigCommand::Validate => Self::validate(out, &settings),
        }
    }

    /// Settings from the environment, with command-line flags taking precedence
    fn settings(cli: &ConfigCli) -> ConfigResult<StoreSettings> {
        let mut settings = SettingsLoader::new().from_env()?;

        if let Some(dir) = &cli.dir {
            settings.config_dir = dir.clone();
        }
        if let Some(name) = &cli.name {
            settings.config_name = name.clone();
        }

        settings.validate()?;
        Ok(settings)
    }

    fn validate(out: &mut dyn Write, settings: &StoreSettings) -> ConfigResult<()> {
        let document = settings.property_file().read_strict(&settings.config_name)?;

        match ProductLayout::detect(&document) {
            Some(layout) => {
                writeln!(
                    out,
                    "{}: {} layout, {} products, {} subscription records",
                    settings.config_name,
                    layout.name(),
                    layout.products().map_or(0, <[_]>::len),
                    layout.subscriptions().map_or(0, <[_]>::len),
                )?;
            }
            None => {
                writeln!(
                    out,
                    "{}: no usable Products or Subscriptions entries",
                    settings.config_name
                )?;
            }
        }
        Ok(())
    }
}

fn write_products(
    out: &mut dyn Write,
    ids: Option<&OrderedRegistry<ProductId>>,
    json: bool,
) -> ConfigResult<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&ids)?)?;
        return Ok(());
    }

    match ids {
        Some(ids) => {
            for id in ids {
                writeln!(out, "{}", id)?;
            }
        }
        None => writeln!(out, "No product identifiers configured")?,
    }
    Ok(())
}

fn write_groups(
    out: &mut dyn Write,
    groups: Option<&[SubscriptionGroupInfo]>,
    json: bool,
) -> ConfigResult<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&groups)?)?;
        return Ok(());
    }

    match groups {
        Some(groups) => {
            for info in groups {
                writeln!(out, "{}:", info.group)?;
                for id in &info.product_ids {
                    writeln!(out, "  {}", id)?;
                }
            }
        }
        None => writeln!(out, "No subscription groups configured")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn run(dir: &TempDir, args: &[&str]) -> String {
        let mut argv = vec!["storekit-config", "--dir", dir.path().to_str().unwrap()];
        argv.extend_from_slice(args);
        let cli = ConfigCli::parse_from(argv);

        let mut out = Vec::new();
        ConfigCliRunner::run_with_output(cli, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn write_products_file(dir: &TempDir) {
        std::fs::write(
            dir.path().join("Products.json"),
            r#"{
                "Products": ["p1", "p2"],
                "Subscriptions": [{"Group": "vip", "Products": ["gold", "silver"]}]
            }"#,
        )
        .unwrap();
    }

    #[test]
    fn test_products_command() {
        let dir = TempDir::new().unwrap();
        write_products_file(&dir);

        assert_eq!(run(&dir, &["products"]), "p1\np2\ngold\nsilver\n");
    }

    #[test]
    fn test_groups_command_json() {
        let dir = TempDir::new().unwrap();
        write_products_file(&dir);

        let output = run(&dir, &["groups", "--json"]);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!([{"Group": "vip", "Products": ["gold", "silver"]}])
        );
    }

    #[test]
    fn test_validate_command() {
        let dir = TempDir::new().unwrap();
        write_products_file(&dir);

        assert_eq!(
            run(&dir, &["validate"]),
            "Products: grouped layout, 2 products, 1 subscription records\n"
        );
    }

    #[test]
    fn test_missing_document() {
        let dir = TempDir::new().unwrap();
        assert_eq!(run(&dir, &["products"]), "No product identifiers configured\n");
    }
}
