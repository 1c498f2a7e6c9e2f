use breach_views::config::RESOLUTION_ENV_VAR;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const TAGLINE: &str = "Build localized breach view models for web templates";

#[derive(Parser, Debug)]
#[command(name = "breach-views")]
#[command(version = VERSION)]
#[command(about = TAGLINE, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory of <locale>.toml message tables, merged over the built-in English table
    #[arg(long, global = true)]
    pub locales_dir: Option<PathBuf>,

    /// Enable breach-resolution blocks (1/true/yes/on)
    #[arg(long = "resolution", env = RESOLUTION_ENV_VAR, global = true)]
    pub resolution: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the breach detail view model
    Detail {
        /// Breach record (JSON, catalog field names)
        #[arg(long)]
        breach: PathBuf,

        /// Requested locales in preference order
        #[arg(long = "locale", default_value = "en")]
        locales: Vec<String>,

        /// Requesting browser's user agent
        #[arg(long)]
        user_agent: Option<String>,

        /// Where the breached site lets users change their password
        #[arg(long)]
        change_password_link: Option<String>,

        /// Verified address of the requester found in this breach (repeatable)
        #[arg(long = "affected-email")]
        affected_emails: Vec<String>,

        /// Output JSON instead of human readable
        #[arg(long)]
        json: bool,
    },

    /// Build the dashboard breach stats view model
    Stats {
        /// Verified emails with their breaches (JSON array)
        #[arg(long)]
        emails: PathBuf,

        /// Requested locales in preference order
        #[arg(long = "locale", default_value = "en")]
        locales: Vec<String>,

        /// Output JSON instead of human readable
        #[arg(long)]
        json: bool,
    },

    /// Print the priority data-class catalog and exit
    Catalog,
}

pub fn parse() -> Args {
    Args::parse()
}
