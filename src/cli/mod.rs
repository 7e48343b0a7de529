//! `plantcare` command line front end over the command layer.

mod output;

pub use output::{OutputFormat, OutputWriter};

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::commands::analysis::{analyze_image, AnalyzePayload};
use crate::commands::catalog::{catalog_list, catalog_show, crop_families};
use crate::commands::history::{history_delete, history_list, history_trend};
use crate::commands::preferences::{preferences_get, preferences_update, PreferencesUpdatePayload};
use crate::commands::AppState;

/// PlantCare - leaf disease diagnosis from the command line
#[derive(Parser, Debug)]
#[command(name = "plantcare", version, about = "Diagnose crop leaf diseases from photos")]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain", global = true)]
    pub format: OutputFormat,

    /// Data directory (database and logs)
    #[arg(long, global = true, env = "PLANTCARE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a leaf photo
    #[command(visible_alias = "a")]
    Analyze(AnalyzeArgs),

    /// Saved diagnoses
    #[command(subcommand)]
    History(HistoryCommand),

    /// User preferences
    #[command(subcommand)]
    Prefs(PrefsCommand),

    /// Built-in disease catalog
    #[command(subcommand)]
    Catalog(CatalogCommand),
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Image file path or data URI
    pub image: String,

    /// Crop family hint (tomato, potato, ... or auto); defaults to the saved preference
    #[arg(long)]
    pub crop: Option<String>,

    /// Save the diagnosis to history
    #[arg(long)]
    pub save: bool,
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// List saved diagnoses, most recent first
    List {
        /// Only show one severity (low, medium, high)
        #[arg(long)]
        severity: Option<String>,
    },
    /// Delete a saved diagnosis
    Delete { id: String },
    /// Health progression and trend
    Trend,
}

#[derive(Subcommand, Debug)]
pub enum PrefsCommand {
    Show,
    Set(PrefsSetArgs),
}

#[derive(Args, Debug)]
pub struct PrefsSetArgs {
    /// beginner or advanced
    #[arg(long)]
    pub mode: Option<String>,
    #[arg(long)]
    pub crop: Option<String>,
    #[arg(long)]
    pub field_mode: Option<bool>,
    #[arg(long)]
    pub data_contribution: Option<bool>,
    #[arg(long)]
    pub region: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// List diseases, optionally for one crop
    List {
        #[arg(long)]
        crop: Option<String>,
    },
    /// Show one disease in full
    Show { id: String },
    /// Supported crop families
    Crops,
}

/// Runs one parsed invocation against `state`.
pub async fn run(cli: Cli, state: &AppState) -> anyhow::Result<()> {
    let out = OutputWriter::new(cli.format);

    match cli.command {
        Commands::Analyze(args) => {
            let outcome = analyze_image(
                state,
                AnalyzePayload {
                    image: args.image,
                    crop: args.crop,
                    save: args.save,
                },
            )
            .await?;
            out.analysis(&outcome)?;
        }
        Commands::History(HistoryCommand::List { severity }) => {
            let records = history_list(state, severity).await?;
            out.history(&records)?;
        }
        Commands::History(HistoryCommand::Delete { id }) => {
            let removed = history_delete(state, id.clone()).await?;
            out.deleted(&id, removed)?;
        }
        Commands::History(HistoryCommand::Trend) => {
            let summary = history_trend(state).await?;
            out.trend(&summary)?;
        }
        Commands::Prefs(PrefsCommand::Show) => {
            let preferences = preferences_get(state).await?;
            out.preferences(&preferences)?;
        }
        Commands::Prefs(PrefsCommand::Set(args)) => {
            let preferences = preferences_update(
                state,
                PreferencesUpdatePayload {
                    mode: args.mode,
                    selected_crop: args.crop,
                    field_mode: args.field_mode,
                    data_contribution: args.data_contribution,
                    region: args.region,
                },
            )
            .await?;
            out.preferences(&preferences)?;
        }
        Commands::Catalog(CatalogCommand::List { crop }) => {
            let diseases = catalog_list(state, crop.as_deref())?;
            out.diseases(&diseases)?;
        }
        Commands::Catalog(CatalogCommand::Show { id }) => {
            let disease = catalog_show(state, &id).with_context(|| format!("disease '{id}'"))?;
            out.disease(&disease)?;
        }
        Commands::Catalog(CatalogCommand::Crops) => {
            out.crops(&crop_families(state))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_analyze_with_flags() {
        let cli = Cli::try_parse_from([
            "plantcare", "--format", "json", "analyze", "leaf.jpg", "--crop", "tomato", "--save",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.image, "leaf.jpg");
                assert_eq!(args.crop.as_deref(), Some("tomato"));
                assert!(args.save);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_prefs_set() {
        let cli = Cli::try_parse_from([
            "plantcare", "prefs", "set", "--mode", "advanced", "--field-mode", "true",
        ])
        .unwrap();
        match cli.command {
            Commands::Prefs(PrefsCommand::Set(args)) => {
                assert_eq!(args.mode.as_deref(), Some("advanced"));
                assert_eq!(args.field_mode, Some(true));
                assert!(args.region.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
