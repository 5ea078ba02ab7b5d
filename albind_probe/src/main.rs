//! albind probe
//!
//! Binds the configured OpenAL driver, prints what it found and unloads it
//! again. Exits non-zero when the binding cannot be established.

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use albind_core::{AudioBinding, BindingConfig, BindingReport};

#[derive(Debug, Parser)]
#[command(name = "albind-probe")]
#[command(about = "Load an OpenAL driver at runtime and report what it offers")]
struct Cli {
    /// Driver library path or name; overrides the saved config
    #[arg(long)]
    driver: Option<String>,

    /// Output device name; overrides the saved config
    #[arg(long)]
    device: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Persist the effective driver/device selection
    #[arg(long)]
    save: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("albind=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = BindingConfig::load();
    if let Some(driver) = cli.driver {
        config.driver = driver;
    }
    if let Some(device) = cli.device {
        config.device = device;
    }
    config.validate().context("invalid driver/device selection")?;

    if cli.save {
        config.save().context("failed to save binding config")?;
    }

    info!("Probing {}", config.driver);

    let mut binding = AudioBinding::new();
    if let Err(e) = binding.try_initialize(&config.driver, &config.device) {
        bail!("audio binding unavailable: {}", e);
    }

    let report = binding.diagnostics().report();
    binding.shutdown();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &BindingReport) {
    println!("Library:   {}", report.library.as_deref().unwrap_or("-"));
    println!("State:     {:?}", report.state);

    if let Some(implementation) = &report.implementation {
        println!("Vendor:    {}", implementation.vendor);
        println!("Renderer:  {}", implementation.renderer);
        println!("Version:   {}", implementation.version);
        println!("Extensions:");
        for extension in &implementation.extensions {
            println!("  {}", extension);
        }
    }

    println!("Devices:");
    if report.devices.is_empty() {
        println!("  (none reported)");
    }
    for device in &report.devices {
        let marker = if report.current_device.as_deref() == Some(device.as_str()) {
            "*"
        } else {
            " "
        };
        println!(" {} {}", marker, device);
    }

    println!("Capabilities:");
    if report.capabilities.is_empty() {
        println!("  (none)");
    }
    for capability in &report.capabilities {
        println!("  {:?}", capability);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from(["albind-probe", "--driver", "libopenal.so", "--json"]);
        assert_eq!(cli.driver.as_deref(), Some("libopenal.so"));
        assert!(cli.device.is_none());
        assert!(cli.json);
        assert!(!cli.save);
    }
}
