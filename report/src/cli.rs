use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::rating::{format_rating, rating};

#[derive(Debug, Parser)]
#[command(name = "chuni-report")]
#[command(about = "CHUNITHM-NET best score report builder")]
#[command(arg_required_else_help = true)]
pub struct RootArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "Path to the exported CHUNITHM-NET cookie store JSON (overrides CHUNI_COOKIE_PATH)"
    )]
    pub cookie_path: Option<PathBuf>,

    #[arg(
        long,
        value_name = "FILE",
        help = "Read the difficulty catalog from a local data.json instead of downloading it"
    )]
    pub catalog_file: Option<PathBuf>,

    #[arg(
        long,
        help = "Fail the page when a score section is malformed instead of skipping it"
    )]
    pub abort_on_malformed: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Fetch profile and best scores and write the report JSON")]
    Report {
        #[arg(
            long,
            default_value = "chunithm_player_data.json",
            value_name = "FILE",
            help = "Output JSON file path (\"-\" for stdout)"
        )]
        output: PathBuf,

        #[arg(long, help = "Also collect the recent rating page")]
        recent: bool,

        #[arg(long, help = "Write the report even when the player profile is missing")]
        allow_missing_profile: bool,
    },
    #[command(about = "Enrich a saved rating detail page without touching CHUNITHM-NET")]
    Enrich {
        #[arg(long, value_name = "FILE", help = "Saved ratingDetailBest/Recent HTML")]
        html: PathBuf,

        #[arg(
            long,
            default_value = "-",
            value_name = "FILE",
            help = "Output JSON file path (\"-\" for stdout)"
        )]
        output: PathBuf,
    },
    #[command(about = "Compute the rating of a single chart")]
    Rating {
        #[arg(long, help = "Internal level, e.g. 13.5")]
        level: f64,

        #[arg(long, help = "Score, e.g. 1007500")]
        score: u32,
    },
}

impl Command {
    /// Output of commands that need neither config nor network access.
    pub fn offline_output(&self) -> Option<String> {
        match self {
            Self::Rating { level, score } => Some(format_rating(rating(*level, *score))),
            Self::Report { .. } | Self::Enrich { .. } => None,
        }
    }
}
