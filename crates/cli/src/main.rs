//! SDK Stubs Builder CLI
//!
//! Command-line interface for building stub IR from SDK resource models.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sdk_stubs_builder_common::{
    get_class_prefix, GeneratorConfig, ServiceName, ServiceNameCatalog, ServiceResource,
};
use sdk_stubs_builder_parser::{
    parse_service_resource_with_options, FileSession, ParseOptions, Session, ShapeParser,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sdk-stubs-builder")]
#[command(version, about = "Build typed stub IR from cloud SDK resource models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse service resources and optionally write the IR as JSON
    #[command(after_help = "EXAMPLES:\n  \
        # Parse every service in a data directory\n  \
        sdk-stubs-builder parse --data-dir ./botocore/data\n\n  \
        # Parse selected services and dump the IR\n  \
        sdk-stubs-builder parse \\\n    \
        --data-dir ./botocore/data \\\n    \
        --services sqs,ec2 \\\n    \
        --output ./ir.json")]
    Parse {
        /// SDK data directory (`<service>/<api-version>/*.json`)
        #[arg(short, long)]
        data_dir: PathBuf,

        /// Comma-separated list of services to parse (all discovered if not specified)
        #[arg(short, long, value_delimiter = ',')]
        services: Option<Vec<String>>,

        /// YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the parsed IR to this JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List services found in a data directory
    Services {
        /// SDK data directory
        #[arg(short, long)]
        data_dir: PathBuf,

        /// YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Parse {
            data_dir,
            services,
            config,
            output,
        } => {
            parse_command(
                data_dir.as_path(),
                services.as_deref(),
                config.as_deref(),
                output.as_deref(),
                cli.verbose,
            )?;
        }
        Commands::Services { data_dir, config } => {
            services_command(data_dir.as_path(), config.as_deref())?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise `--verbose` enables debug events
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Catalog of known services, configured services and every discovered service
fn build_catalog(
    session: &FileSession,
    config: &GeneratorConfig,
    discovered: &[String],
) -> Result<ServiceNameCatalog> {
    let mut catalog = ServiceNameCatalog::with_defaults();
    config.apply_to_catalog(&mut catalog);

    for name in discovered {
        if catalog.contains(name) {
            continue;
        }
        let service_model = session
            .load_service_model(name)
            .with_context(|| format!("Failed to load service model for {}", name))?;
        let class_name = service_model
            .metadata
            .service_id
            .as_deref()
            .map(|service_id| service_id.replace([' ', '-'], ""))
            .filter(|class_name| !class_name.is_empty())
            .unwrap_or_else(|| get_class_prefix(&name.replace('-', "_")));
        tracing::debug!("Registering {} as {}", name, class_name);
        catalog.add(name, &class_name);
    }

    Ok(catalog)
}

fn parse_command(
    data_dir: &Path,
    services: Option<&[String]>,
    config_path: Option<&Path>,
    output: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    println!("{} Reading SDK data from: {}", "→".cyan(), data_dir.display());

    let config = GeneratorConfig::load_or_default(config_path).context("Failed to load config")?;
    let session = FileSession::new(data_dir);
    let discovered = session
        .available_services()
        .with_context(|| format!("Failed to list services in {}", data_dir.display()))?;
    let catalog = build_catalog(&session, &config, &discovered)?;

    let selected: Vec<String> = match services {
        Some(names) => names.to_vec(),
        None => discovered
            .into_iter()
            .filter(|name| config.is_selected(name))
            .collect(),
    };
    if selected.is_empty() {
        anyhow::bail!("No services to parse");
    }

    let options = ParseOptions {
        max_docstring_length: config.max_docstring_length,
    };

    let mut parsed = Vec::new();
    let mut without_resources = 0;
    let mut skipped = 0;
    for (i, name) in selected.iter().enumerate() {
        let service_name = catalog.find(name)?;
        println!(
            "{} Parsing service {}/{}: {}",
            "→".cyan(),
            i + 1,
            selected.len(),
            service_name.name.yellow()
        );

        let result = ShapeParser::from_session(&session, service_name).and_then(|shape_parser| {
            parse_service_resource_with_options(&session, service_name, &shape_parser, &options)
        });

        match result {
            Ok(Some(service_resource)) => {
                println!(
                    "{} Parsed {} with {} sub-resources",
                    "✓".green(),
                    service_resource.name.yellow(),
                    service_resource.sub_resources.len()
                );
                if verbose {
                    println!("    Methods: {}", service_resource.methods.len());
                    println!("    Attributes: {}", service_resource.attributes.len());
                    println!("    Collections: {}", service_resource.all_collections().count());
                }
                parsed.push(service_resource);
            }
            Ok(None) => {
                println!("  {} has no service resource", service_name.name);
                without_resources += 1;
            }
            Err(e) if e.is_fatal() => {
                return Err(e).with_context(|| format!("Aborting at {}", service_name.name));
            }
            Err(e) => {
                eprintln!("{} Skipping {}: {}", "⚠".yellow(), service_name.name, e);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        println!(
            "\n{} Skipped {} service(s) due to parse errors",
            "⚠".yellow(),
            skipped
        );
    }

    let total_resources: usize = parsed
        .iter()
        .map(|service_resource| service_resource.sub_resources.len())
        .sum();
    println!(
        "\n{} Total: {} service resources, {} sub-resources, {} services without resources",
        "✓".green().bold(),
        parsed.len(),
        total_resources,
        without_resources
    );

    if let Some(output) = output {
        write_output(output, &parsed)?;
        println!("  📄 {}", output.display());
    }

    Ok(())
}

fn write_output(output: &Path, service_resources: &[ServiceResource]) -> Result<()> {
    let json = serde_json::to_string_pretty(service_resources).context("Failed to serialize IR")?;
    if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(output, json).with_context(|| format!("Failed to write {}", output.display()))
}

fn services_command(data_dir: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = GeneratorConfig::load_or_default(config_path).context("Failed to load config")?;
    let session = FileSession::new(data_dir);
    let discovered = session
        .available_services()
        .with_context(|| format!("Failed to list services in {}", data_dir.display()))?;
    let catalog = build_catalog(&session, &config, &discovered)?;

    println!("{}", "Services:".bold());
    for name in &discovered {
        let service_name: &ServiceName = catalog.find(name)?;
        println!(
            "  • {} ({}) {} {}",
            service_name.name.cyan(),
            service_name.class_name,
            service_name.module_name(),
            service_name.pypi_name().dimmed()
        );
    }
    println!("\n{} {} services", "✓".green(), discovered.len());

    Ok(())
}
