mod cli;
mod report;

use anyhow::{Context, Result};
use breach_views::types::AffectedEmail;
use breach_views::{
    input, BreachDetailBuilder, BreachDetailRequest, BreachStatsBuilder, MessageBundles, PageRequest,
    ScanResultsSummarizer, Settings,
};
use cli::Command;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();
    let args = cli::parse();

    let settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    }
    .with_resolution_flag(args.resolution.as_deref());

    let locales_dir = args.locales_dir.clone().or_else(|| settings.locales_dir.clone());

    match args.command {
        Command::Detail {
            breach,
            locales,
            user_agent,
            change_password_link,
            affected_emails,
            json,
        } => {
            let bundles = load_bundles(locales_dir.as_deref(), &settings.default_locale)?;
            let breach = input::load_breach(&breach)?;
            let request = PageRequest::new(user_agent, locales);
            let affected: Vec<AffectedEmail> = affected_emails
                .into_iter()
                .map(|affected_email_address| AffectedEmail {
                    affected_email_address,
                })
                .collect();

            let builder = BreachDetailBuilder::new(&bundles, settings.breach_resolution_enabled);
            let detail = builder.build(&BreachDetailRequest {
                breach: &breach,
                locales: &request.supported_locales,
                change_password_link: change_password_link.as_deref(),
                is_firefox: request.is_firefox(),
                affected_emails: &affected,
            });

            if json {
                report::print_json(&detail)?;
            } else {
                report::print_banner();
                report::print_detail(&detail);
            }
        }
        Command::Stats {
            emails,
            locales,
            json,
        } => {
            let bundles = load_bundles(locales_dir.as_deref(), &settings.default_locale)?;
            let verified = input::load_verified_emails(&emails)?;
            let summarizer = ScanResultsSummarizer;
            let builder =
                BreachStatsBuilder::new(&bundles, &summarizer, settings.breach_resolution_enabled);
            let stats = builder.build(&verified, &locales);

            if json {
                report::print_json(&stats)?;
            } else {
                report::print_banner();
                report::print_stats(&stats);
            }
        }
        Command::Catalog => report::print_catalog(),
    }

    Ok(())
}

fn load_bundles(locales_dir: Option<&Path>, default_locale: &str) -> Result<MessageBundles> {
    let mut bundles = MessageBundles::builtin().context("Built-in message table is invalid")?;
    bundles.set_default_locale(default_locale);
    if let Some(dir) = locales_dir {
        let loaded = bundles
            .load_dir(dir)
            .with_context(|| format!("Failed to load locales from {}", dir.display()))?;
        log::info!(
            "Loaded {} locale tables from {}; available: {:?}",
            loaded,
            dir.display(),
            bundles.locales()
        );
    }
    Ok(bundles)
}
