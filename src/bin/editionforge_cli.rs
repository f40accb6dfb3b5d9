//! EditionForge CLI
//!
//! Commands: catalog, generate
//! Outputs JSON to stdout
//! Returns non-zero on generation failure

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use editionforge_core::{
    DirectorySink, EditionGenerator, LayerCatalog, RunConfig, ENGINE_VERSION,
};

#[derive(Parser)]
#[command(name = "editionforge-cli")]
#[command(about = "EditionForge CLI - Generative Edition Compiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the run configuration JSON
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Root directory containing one subdirectory per layer
    #[arg(short, long, default_value = "layers")]
    layers_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the layer catalog
    Catalog,

    /// Generate the configured number of editions
    Generate {
        /// Output directory for images and metadata
        #[arg(short, long, default_value = "build")]
        out_dir: PathBuf,

        /// Seed for reproducible runs
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match RunConfig::from_file(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!(r#"{{"error": "{}"}}"#, e);
            return ExitCode::FAILURE;
        }
    };

    let catalog = match LayerCatalog::load(
        &cli.layers_dir,
        &config.layers,
        config.width,
        config.height,
    ) {
        Ok(c) => c,
        Err(e) => {
            eprintln!(r#"{{"error": "{}"}}"#, e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Catalog => {
            let output = serde_json::json!({
                "engine_version": ENGINE_VERSION,
                "combination_count": catalog.combination_count(),
                "layers": catalog.layers,
            });
            println!("{}", serde_json::to_string_pretty(&output).unwrap());
            ExitCode::SUCCESS
        }

        Commands::Generate { out_dir, seed } => {
            if let Err(e) = fs::create_dir_all(&out_dir) {
                eprintln!(r#"{{"error": "Cannot create {}: {}"}}"#, out_dir.display(), e);
                return ExitCode::FAILURE;
            }

            let generator = match seed {
                Some(seed) => {
                    EditionGenerator::with_seed(catalog, config.width, config.height, seed)
                }
                None => EditionGenerator::new(catalog, config.width, config.height),
            };

            let mut sink = DirectorySink::new(&out_dir);
            match generator.run(config.editions, &mut sink) {
                Ok(manifest) => {
                    for record in &manifest.editions {
                        let path = out_dir.join(format!("{}.json", record.edition));
                        let json = serde_json::to_string_pretty(record).unwrap();
                        if let Err(e) = fs::write(&path, json) {
                            eprintln!(r#"{{"error": "Cannot write {}: {}"}}"#, path.display(), e);
                            return ExitCode::FAILURE;
                        }
                    }

                    let manifest_json = serde_json::to_string_pretty(&manifest).unwrap();
                    if let Err(e) = fs::write(out_dir.join("manifest.json"), &manifest_json) {
                        eprintln!(r#"{{"error": "Cannot write manifest: {}"}}"#, e);
                        return ExitCode::FAILURE;
                    }

                    println!("{}", manifest_json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    let output = serde_json::json!({
                        "success": false,
                        "error": e.to_string(),
                        "edition": e.edition,
                        "partial_editions": e.manifest,
                    });
                    println!("{}", serde_json::to_string(&output).unwrap());
                    ExitCode::from(2)
                }
            }
        }
    }
}
