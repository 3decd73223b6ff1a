//! AWS Schema Composer CLI
//!
//! Command-line interface for composing GraphQL types from AWS SDK API
//! descriptions.

mod logging;

use anyhow::{Context, Result};
use aws_schema_composer::{AwsApi, ServiceComposer};
use aws_schema_composer_common::{ComposerConfig, RenderedType};
use aws_schema_composer_parser::{load_service, ApiCatalog};
use aws_schema_composer_renderer::{field_signature, SdlRenderer};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "aws-schema-composer")]
#[command(version, about = "Compose GraphQL types from AWS SDK API descriptions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML configuration file (prefix, spec_dir, services)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the services found in an API directory
    #[command(after_help = "EXAMPLES:\n  \
        aws-schema-composer services --spec-dir ./aws-sdk-js/apis")]
    Services {
        /// Directory containing API description files
        #[arg(long)]
        spec_dir: Option<PathBuf>,
    },

    /// Show the composed type of one service
    #[command(after_help = "EXAMPLES:\n  \
        # Inspect a single API file\n  \
        aws-schema-composer inspect --spec s3-2006-03-01.normal.json\n\n  \
        # Inspect one operation of a discovered service\n  \
        aws-schema-composer inspect --spec-dir ./apis --service s3 --operation getObject")]
    Inspect {
        /// Path to an API description file
        #[arg(short, long, conflicts_with = "spec_dir")]
        spec: Option<PathBuf>,

        /// Directory containing API description files
        #[arg(long, conflicts_with = "spec")]
        spec_dir: Option<PathBuf>,

        /// Service id (required with --spec-dir)
        #[arg(long)]
        service: Option<String>,

        /// Operation to describe in detail
        #[arg(long)]
        operation: Option<String>,

        /// Type-name prefix
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Render GraphQL SDL for one service or a whole API directory
    #[command(after_help = "EXAMPLES:\n  \
        # Render one service to stdout\n  \
        aws-schema-composer render --spec s3-2006-03-01.normal.json\n\n  \
        # Render a root type over selected services\n  \
        aws-schema-composer render \\\n    \
        --spec-dir ./aws-sdk-js/apis \\\n    \
        --services s3,dynamodb \\\n    \
        --output ./schema")]
    Render {
        /// Path to an API description file
        #[arg(short, long, conflicts_with = "spec_dir")]
        spec: Option<PathBuf>,

        /// Directory containing API description files
        #[arg(long, conflicts_with = "spec")]
        spec_dir: Option<PathBuf>,

        /// Comma-separated list of service ids to include
        #[arg(long, value_delimiter = ',')]
        services: Option<Vec<String>>,

        /// Type-name prefix
        #[arg(long)]
        prefix: Option<String>,

        /// Output directory (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)?;

    let config = match &cli.config {
        Some(path) => ComposerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ComposerConfig::default(),
    };

    match cli.command {
        Commands::Services { spec_dir } => {
            services_command(&config, spec_dir.as_deref())?;
        }

        Commands::Inspect {
            spec,
            spec_dir,
            service,
            operation,
            prefix,
        } => {
            let config = override_config(config, spec_dir, None, prefix);
            inspect_command(
                &config,
                spec.as_deref(),
                service.as_deref(),
                operation.as_deref(),
                cli.verbose,
            )?;
        }

        Commands::Render {
            spec,
            spec_dir,
            services,
            prefix,
            output,
        } => {
            let config = override_config(config, spec_dir, services, prefix);
            render_command(&config, spec.as_deref(), output.as_deref())?;
        }
    }

    Ok(())
}

/// Command-line flags take precedence over the configuration file
fn override_config(
    mut config: ComposerConfig,
    spec_dir: Option<PathBuf>,
    services: Option<Vec<String>>,
    prefix: Option<String>,
) -> ComposerConfig {
    if spec_dir.is_some() {
        config.spec_dir = spec_dir;
    }
    if services.is_some() {
        config.services = services;
    }
    if let Some(prefix) = prefix {
        config.prefix = prefix;
    }
    config
}

fn discover(config: &ComposerConfig) -> Result<ApiCatalog> {
    let dir = config
        .spec_dir
        .as_deref()
        .context("Either --spec or --spec-dir (or spec_dir in the config file) must be provided")?;

    eprintln!(
        "{} Scanning directory for API descriptions: {}",
        "→".cyan(),
        dir.display()
    );

    let mut catalog = ApiCatalog::discover(dir)
        .with_context(|| format!("Failed to scan {}", dir.display()))?;
    catalog.retain(|id| config.includes(id));

    if catalog.is_empty() {
        anyhow::bail!("No API descriptions found in {}", dir.display());
    }

    Ok(catalog)
}

fn services_command(config: &ComposerConfig, spec_dir: Option<&Path>) -> Result<()> {
    let config = override_config(config.clone(), spec_dir.map(Path::to_path_buf), None, None);
    let catalog = discover(&config)?;

    println!("\n{}", format!("Services ({}):", catalog.len()).bold());
    for entry in catalog.entries() {
        let mut extras = Vec::new();
        if entry.paginators_path.is_some() {
            extras.push("paginators");
        }
        if entry.waiters_path.is_some() {
            extras.push("waiters");
        }

        if extras.is_empty() {
            println!("  • {} {}", entry.service_id.cyan(), entry.api_version);
        } else {
            println!(
                "  • {} {} ({})",
                entry.service_id.cyan(),
                entry.api_version,
                extras.join(", ")
            );
        }
    }

    Ok(())
}

/// Load a single service either from a file or from the configured directory
fn load_composer(
    config: &ComposerConfig,
    spec: Option<&Path>,
    service: Option<&str>,
) -> Result<ServiceComposer> {
    let (service_id, service_config) = match spec {
        Some(path) => {
            eprintln!("{} Loading API description: {}", "→".cyan(), path.display());
            let (inferred_id, service_config) = load_service(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            (
                service.map(str::to_string).unwrap_or(inferred_id),
                service_config,
            )
        }
        None => {
            let service_id = service.context("--service is required with --spec-dir")?;
            let catalog = discover(config)?;
            let service_config = catalog
                .load(service_id)
                .with_context(|| format!("Failed to load service {}", service_id))?;
            (service_id.to_string(), service_config)
        }
    };

    Ok(ServiceComposer::new(
        &service_id,
        &config.prefix,
        service_config,
    ))
}

fn inspect_command(
    config: &ComposerConfig,
    spec: Option<&Path>,
    service: Option<&str>,
    operation: Option<&str>,
    verbose: bool,
) -> Result<()> {
    let composer = load_composer(config, spec, service)?;

    if let Some(operation) = operation {
        let descriptor = composer.get_operation(operation)?;
        let operation_config = descriptor.config();

        println!("\n{}", "Operation:".bold());
        println!(
            "  {}",
            field_signature(descriptor.name(), &descriptor.field_config()).yellow()
        );
        if let Some(name) = &operation_config.name {
            println!("  Name: {}", name);
        }
        if let Some(http) = &operation_config.http {
            println!(
                "  HTTP: {} {}",
                http.method.as_deref().unwrap_or("-"),
                http.request_uri.as_deref().unwrap_or("-")
            );
        }
        if let Some(input) = &operation_config.input {
            println!("  Input shape: {}", input.shape);
        }
        if let Some(output) = &operation_config.output {
            println!("  Output shape: {}", output.shape);
        }
        if !operation_config.errors.is_empty() {
            let errors: Vec<&str> = operation_config
                .errors
                .iter()
                .map(|e| e.shape.as_str())
                .collect();
            println!("  Errors: {}", errors.join(", "));
        }
        if operation_config.deprecated {
            println!("  {}", "Deprecated".red());
        }
        return Ok(());
    }

    let composed = composer
        .get_composed_type()
        .context("Failed to compose service type")?;

    println!("\n{}", "✓ Composition successful!".green().bold());
    println!("\n{}", "Service:".bold());
    println!("  Type: {}", composed.name.yellow());
    println!("  Version: {}", composer.version());
    if let Some(api_version) = composer.metadata().api_version() {
        println!("  API version: {}", api_version);
    }
    if let Some(description) = &composed.description {
        println!("  Description: {}", description);
    }
    println!("  Operations: {}", composed.fields.len());

    if verbose {
        println!("\n{}", "Fields:".bold());
        for (name, field) in &composed.fields {
            println!("  • {}", field_signature(name, field).cyan());
        }

        let rendered = composer
            .get_rendered_type()
            .context("Failed to collect service types")?;
        println!("\n{}", format!("Types ({}):", rendered.types().len()).bold());
        for object_type in rendered.types() {
            println!("  • {} ({} fields)", object_type.name, object_type.fields.len());
        }
    }

    Ok(())
}

fn render_command(config: &ComposerConfig, spec: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let renderer = SdlRenderer::new().context("Failed to create renderer")?;

    match spec {
        Some(path) => {
            let composer = load_composer(config, Some(path), None)?;
            let rendered = composer
                .get_rendered_type()
                .context("Failed to compose service type")?;
            write_sdl(&renderer, rendered, output)
        }
        None => {
            let catalog = discover(config)?;
            eprintln!(
                "{} Composing {} services under {}",
                "→".cyan(),
                catalog.len(),
                config.prefix.yellow()
            );

            let services = catalog
                .load_all()
                .context("Failed to load API descriptions")?;
            let api = AwsApi::new(&config.prefix, services);
            let rendered = api
                .get_rendered_type()
                .context("Failed to compose root type")?;
            write_sdl(&renderer, rendered, output)
        }
    }
}

fn write_sdl(renderer: &SdlRenderer, rendered: &RenderedType, output: Option<&Path>) -> Result<()> {
    match output {
        Some(dir) => {
            let path = renderer
                .render_to_directory(rendered, dir)
                .context("Failed to write schema")?;

            println!("\n{}", "✓ Rendering complete!".green().bold());
            println!("  📄 {}", path.display());
            println!("  Types: {}", rendered.types().len() + 1);
        }
        None => {
            let sdl = renderer.render(rendered).context("Failed to render schema")?;
            print!("{}", sdl);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_config() {
        let config = ComposerConfig {
            prefix: "Aws".to_string(),
            spec_dir: Some(PathBuf::from("/from/file")),
            services: Some(vec!["s3".to_string()]),
        };

        let kept = override_config(config.clone(), None, None, None);
        assert_eq!(kept, config);

        let overridden = override_config(
            config,
            Some(PathBuf::from("/from/flag")),
            Some(vec!["sqs".to_string()]),
            Some("Amazon".to_string()),
        );
        assert_eq!(overridden.prefix, "Amazon");
        assert_eq!(overridden.spec_dir, Some(PathBuf::from("/from/flag")));
        assert!(overridden.includes("sqs"));
        assert!(!overridden.includes("s3"));
    }

    #[test]
    fn test_discover_requires_directory() {
        let err = discover(&ComposerConfig::default()).unwrap_err();
        assert!(err.to_string().contains("--spec-dir"));
    }

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::parse_from([
            "aws-schema-composer",
            "render",
            "--spec-dir",
            "./apis",
            "--services",
            "s3,sqs",
        ]);
        match cli.command {
            Commands::Render { services, spec, .. } => {
                assert!(spec.is_none());
                assert_eq!(services, Some(vec!["s3".to_string(), "sqs".to_string()]));
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_load_composer_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sqs-2012-11-05.normal.json");
        std::fs::write(
            &path,
            r#"{ "metadata": { "serviceFullName": "Amazon SQS" }, "operations": { "ListQueues": {} }, "shapes": {} }"#,
        )
        .unwrap();

        let composer = load_composer(&ComposerConfig::default(), Some(&path), None).unwrap();
        assert_eq!(composer.type_name(), "AwsSqs");
        assert!(composer.find_operation("listQueues").is_some());
    }
}
