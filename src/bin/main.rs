//! Knotted Wood Packer CLI
//!
//! Register and refresh log blocks in the resource pack.

use clap::{Parser, Subcommand};
use knotted_wood_packer::{Command, Packer, PackerConfig, PackerError, RunReport, WoodType};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "knotted-wood-packer")]
#[command(author, version, about = "Keep log spritesheets and overlay groups in sync", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Resource pack root (defaults to $WORKDIR)
    #[arg(long, global = true)]
    work_dir: Option<PathBuf>,

    /// Directory holding exported spritesheets (defaults to $DOWNLOADS)
    #[arg(long, global = true)]
    downloads: Option<PathBuf>,

    /// Directory holding the property templates
    #[arg(long, global = true)]
    templates: Option<PathBuf>,

    /// Archive path for `repackage`
    #[arg(long, global = true)]
    archive: Option<PathBuf>,

    /// Print the run report as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new log block to the pack
    Register {
        /// Wood type (e.g., "cherry" or "stripped_oak")
        wood_type: Option<String>,
    },

    /// Regenerate an existing log block
    Refresh {
        /// Wood type (e.g., "cherry" or "stripped_oak")
        wood_type: Option<String>,
    },

    /// Regenerate every known log block
    RefreshAll {
        #[arg(hide = true)]
        _wood_type: Option<String>,
    },

    /// Zip the resource pack
    Repackage {
        #[arg(hide = true)]
        _wood_type: Option<String>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), PackerError> {
    let command = match cli.command {
        Commands::Register { wood_type } => Command::Register(wood_type_arg(wood_type)?),
        Commands::Refresh { wood_type } => Command::Refresh(wood_type_arg(wood_type)?),
        Commands::RefreshAll { .. } => Command::RefreshAll,
        Commands::Repackage { .. } => Command::Repackage,
    };

    let mut config = PackerConfig::from_env(cli.work_dir, cli.downloads)?;
    if let Some(templates) = cli.templates {
        config = config.with_templates_dir(templates);
    }
    if let Some(archive) = cli.archive {
        config = config.with_archive_path(archive);
    }

    let packer = Packer::new(config);
    let report = packer.run(&command)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    Ok(())
}

fn wood_type_arg(wood_type: Option<String>) -> Result<WoodType, PackerError> {
    match wood_type {
        Some(id) => WoodType::new(id),
        None => Err(PackerError::MissingWoodType),
    }
}

fn print_summary(report: &RunReport) {
    match report {
        RunReport::Register(block) | RunReport::Refresh(block) => {
            println!("Updated {}", block.block);
        }
        RunReport::RefreshAll { blocks } => {
            println!("Refreshed {} blocks", blocks.len());
        }
        RunReport::Repackage(archive) => {
            println!(
                "Packaged {} files into {:?}",
                archive.entries, archive.path
            );
        }
    }
}
