use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fbdoc_catalog::{CatalogReader, FirebirdCatalog};
use fbdoc_core::Config;
use fbdoc_engine::{assemble_procedures, assemble_tables, attach_trees};
use fbdoc_render::DocRenderer;

/// fbdoc - Firebird database documentation generator
#[derive(Parser)]
#[command(name = "fbdoc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: fbdoc.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate HTML documentation from the database
    Generate {
        /// Output directory (overrides the config file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Dependency tree depth limit (overrides the config file)
        #[arg(short, long)]
        max_depth: Option<usize>,
    },

    /// Verify that the database is reachable
    CheckConnection,

    /// Write a starter config file with default settings
    Init {
        /// Where to write the config file
        #[arg(short, long, default_value = "fbdoc.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else if std::path::Path::new("fbdoc.toml").exists() {
        Config::from_file(std::path::Path::new("fbdoc.toml"))?
    } else {
        if cli.verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        Config::default()
    };

    match cli.command {
        Commands::Generate { output, max_depth } => {
            generate_command(&config, output, max_depth, cli.verbose)
        }
        Commands::CheckConnection => check_connection_command(&config, cli.verbose),
        Commands::Init { output } => init_command(&output),
    }
}

/// Init command - write a starter fbdoc.toml to fill in
fn init_command(output: &std::path::Path) -> Result<()> {
    if output.exists() {
        return Err(anyhow::anyhow!(
            "{} already exists, not overwriting",
            output.display()
        ));
    }

    Config::default().save_to_file(output)?;

    println!(
        "{} {} (set connection.database before running generate)",
        "Wrote".green().bold(),
        output.display()
    );

    Ok(())
}

/// Generate command - read the catalog and write the documentation pages
fn generate_command(
    config: &Config,
    output: Option<PathBuf>,
    max_depth: Option<usize>,
    verbose: bool,
) -> Result<()> {
    let output_dir = output.unwrap_or_else(|| config.output.directory.clone());
    let max_depth = max_depth.unwrap_or(config.max_depth);

    if verbose {
        eprintln!(
            "{} {}",
            "Connecting to".cyan(),
            config.connection.database
        );
    }
    let mut catalog = FirebirdCatalog::connect(&config.connection)?;

    if verbose {
        eprintln!(
            "{} {} catalog...",
            "Reading stored procedures from".cyan(),
            catalog.name()
        );
    }
    let (procedures_summary, mut procedures) = assemble_procedures(&mut catalog)?;
    attach_trees(&mut procedures, max_depth);

    if verbose {
        eprintln!("{}", "Reading tables...".cyan());
    }
    let (tables_summary, tables) = assemble_tables(&mut catalog)?;

    if verbose {
        eprintln!(
            "{} {}",
            "Writing pages to".cyan(),
            output_dir.display()
        );
    }
    let renderer = DocRenderer::new(&output_dir)?;
    renderer.render_all(&procedures_summary, &procedures, &tables_summary, &tables)?;

    println!(
        "{} {} procedures and {} tables documented in {}",
        "Done:".green().bold(),
        procedures_summary.total_count,
        tables_summary.total_count,
        output_dir.display()
    );

    Ok(())
}

/// Check-connection command - connect and run a trivial query
fn check_connection_command(config: &Config, verbose: bool) -> Result<()> {
    if verbose {
        eprintln!(
            "{} {}:{}",
            "Connecting to".cyan(),
            config.connection.host,
            config.connection.port
        );
    }

    let mut catalog = FirebirdCatalog::connect(&config.connection)?;
    catalog.test_connection()?;

    println!(
        "{} {} via {}",
        "Connection OK:".green().bold(),
        config.connection.database,
        catalog.name()
    );

    Ok(())
}
