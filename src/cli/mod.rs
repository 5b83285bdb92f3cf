//! CLI module for Elemental
//!
//! - `match` / `stats`: run the matcher and summarise the distribution
//! - `archetype`, `mapping`: maintain the archetype library and answer mappings
//! - `settings`, `config`: run settings and configuration files
//! - `data`: import, export, inspect and clear stored data

use clap::{Parser, Subcommand, ValueEnum};
use elemental_core::{DistributionMode, Element};
use std::path::PathBuf;

use crate::app;

pub mod data;
pub mod library;
pub mod matching;
pub mod settings;

/// Element-based personality profiling
#[derive(Parser, Debug)]
#[command(name = "elemental")]
#[command(about = "Match quiz participants to element archetypes")]
#[command(version)]
pub struct Cli {
    /// Database file (overrides configuration)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute and print participant profiles
    Match {
        /// Use this policy instead of the stored one
        #[arg(long)]
        mode: Option<DistributionMode>,
        /// Print profiles as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show how participants are distributed across archetypes
    Stats,
    /// Manage the archetype library
    #[command(subcommand)]
    Archetype(ArchetypeCommands),
    /// Manage question-to-element mappings
    #[command(subcommand)]
    Mapping(MappingCommands),
    /// Show or change run settings
    #[command(subcommand)]
    Settings(SettingsCommands),
    /// Inspect or write configuration
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Import, export and clear stored data
    #[command(subcommand)]
    Data(DataCommands),
}

#[derive(Subcommand, Debug)]
pub enum ArchetypeCommands {
    /// List archetypes
    List,
    /// Add an archetype (percentages must sum to 100)
    Add {
        #[arg(long)]
        number: u32,
        #[arg(long)]
        fire: f64,
        #[arg(long)]
        water: f64,
        #[arg(long)]
        air: f64,
        #[arg(long)]
        earth: f64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Edit an existing archetype
    Edit {
        id: String,
        #[arg(long)]
        number: Option<u32>,
        #[arg(long)]
        fire: Option<f64>,
        #[arg(long)]
        water: Option<f64>,
        #[arg(long)]
        air: Option<f64>,
        #[arg(long)]
        earth: Option<f64>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Remove an archetype
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum MappingCommands {
    /// List mappings
    List,
    /// Map answers 1-4 of a question to elements
    Add {
        question: u32,
        answer1: Element,
        answer2: Element,
        answer3: Element,
        answer4: Element,
    },
    /// Change the element for one answer of a mapped question
    Edit {
        question: u32,
        answer: i32,
        element: Element,
    },
    /// Remove the mapping for a question
    Remove { question: u32 },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Print current settings
    Show,
    /// Update settings
    Set {
        /// Concentration warning threshold in percent (1-100)
        #[arg(long)]
        threshold: Option<f64>,
        /// Distribution policy
        #[arg(long)]
        mode: Option<DistributionMode>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Write the effective configuration to config/local.toml
    Init {
        #[arg(long, default_value = "config/local.toml")]
        path: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Record counts and database size
    Stats,
    /// Load a snapshot JSON file; keys missing from the file keep their data
    Import {
        file: PathBuf,
        /// File is a JSON array of participants; only participants are replaced
        #[arg(long)]
        participants: bool,
    },
    /// Write stored data to a snapshot JSON file
    Export { file: PathBuf },
    /// Clear stored data
    Clear {
        target: ClearTarget,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClearTarget {
    Participants,
    Mappings,
    Archetypes,
    All,
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        cmd.print_help()?;
        println!();
        return Ok(());
    };

    let config = app::load_config()?;
    if let Commands::Config(cmd) = command {
        return settings::run_config(cmd, &config);
    }

    let mut book = app::open_book(&config, cli.db.as_deref()).await?;
    match command {
        Commands::Match { mode, json } => matching::run_match(&book, mode, json),
        Commands::Stats => matching::run_stats(&book),
        Commands::Archetype(cmd) => library::run_archetype(&mut book, cmd).await,
        Commands::Mapping(cmd) => library::run_mapping(&mut book, cmd).await,
        Commands::Settings(cmd) => settings::run_settings(&mut book, cmd).await,
        Commands::Data(cmd) => {
            let db_path = cli.db.clone().unwrap_or_else(|| config.db_path());
            data::run(&mut book, cmd, &db_path).await
        }
        // handled before the book is opened
        Commands::Config(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }

    #[test]
    fn test_parse_match_with_mode() {
        let cli = Cli::try_parse_from(["elemental", "match", "--mode", "wide", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Match { mode, json }) => {
                assert_eq!(mode, Some(DistributionMode::Wide));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_mapping_elements() {
        let cli = Cli::try_parse_from([
            "elemental", "--db", "x.db", "mapping", "add", "6", "fire", "water", "air", "earth",
        ])
        .unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("x.db")));
        match cli.command {
            Some(Commands::Mapping(MappingCommands::Add {
                question, answer4, ..
            })) => {
                assert_eq!(question, 6);
                assert_eq!(answer4, Element::Earth);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        let bad = ["elemental", "mapping", "add", "6", "fire", "water", "air", "metal"];
        assert!(Cli::try_parse_from(bad).is_err());
    }

    #[test]
    fn test_parse_participant_import_and_mapping_edit() {
        let cli = Cli::try_parse_from([
            "elemental", "data", "import", "--participants", "people.json",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Data(DataCommands::Import { file, participants })) => {
                assert_eq!(file, PathBuf::from("people.json"));
                assert!(participants);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["elemental", "mapping", "edit", "3", "2", "Air"]).unwrap();
        match cli.command {
            Some(Commands::Mapping(MappingCommands::Edit {
                question,
                answer,
                element,
            })) => {
                assert_eq!((question, answer, element), (3, 2, Element::Air));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
