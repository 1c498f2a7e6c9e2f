use breach_views::catalog::{self, PriorityCatalog, PRIORITY_DATA_CLASSES};
use breach_views::context;
use breach_views::types::{BreachCategory, BreachDetailViewModel, ProgressBar, StatCallout, UserBreachStats};
use anyhow::Result;
use colored::*;
use serde::Serialize;

pub fn print_banner() {
    println!("\n{}", "╔═══════════════════════════════════════════════════════════════════════════════╗".bright_black());
    println!(
        "{}{}{}",
        "║  ".bright_black(),
        format!("breach-views v{}", env!("CARGO_PKG_VERSION")).bold().cyan(),
        "                                                         ║".bright_black()
    );
    println!("{}", "╚═══════════════════════════════════════════════════════════════════════════════╝".bright_black());
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Strip the inline markup the templates style, for terminal output.
fn plain(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

pub fn print_catalog() {
    println!("\n{}", "PRIORITY DATA CLASSES".bold().white());
    println!("{}", "═".repeat(80).bright_black());
    println!();

    let resolved = PriorityCatalog::standard(&catalog::CatalogOptions::default());
    for spec in PRIORITY_DATA_CLASSES {
        let recs: Vec<String> = resolved
            .get(spec.key)
            .map(|entry| entry.recommendations.iter().map(|r| r.icon_class_name.clone()).collect())
            .unwrap_or_default();
        println!(
            "{:>4} | {:<32} | {}",
            spec.weight.to_string().yellow(),
            spec.key.cyan().bold(),
            recs.join(", ")
        );
    }

    println!("\n{}", "ALWAYS DATA AGGREGATOR".bold().white());
    println!("{}", "─".repeat(80).bright_black());
    println!("  {}", catalog::AGGREGATOR_BREACHES.join(", "));
}

pub fn print_detail(detail: &BreachDetailViewModel) {
    println!("\n{}", "═".repeat(80).bright_black());
    let badge = match detail.category_id {
        BreachCategory::DataAggregatorBreach => detail.category.yellow().bold(),
        BreachCategory::SensitiveBreach => detail.category.red().bold(),
        BreachCategory::WebsiteBreach => detail.category.cyan().bold(),
    };
    println!(
        "{} {} {}",
        "BREACH:".bold().white(),
        context::breach_title(&detail.breach).yellow().bold(),
        badge
    );
    println!("{}\n", "═".repeat(80).bright_black());

    if let Some(notification) = &detail.affected_email_notification {
        println!("🔔 {}\n", plain(notification).bold());
    }

    println!("{}", detail.overview.headline.bold());
    println!("   {}", plain(&detail.overview.copy));

    println!("\n{}", detail.data_classes.headline.bold());
    println!("{}", "─".repeat(80).bright_black());
    for dc in &detail.data_classes.data_types.priority {
        println!("  {} {} {}", "●".red(), dc.data_type.bold(), format!("({})", dc.weight).bright_black());
    }
    for label in &detail.data_classes.data_types.lower_priority {
        println!("  {} {}", "○".bright_black(), label);
    }

    println!("\n{}", detail.recommendations.headline.bold());
    println!("   {}", detail.recommendations.copy.italic());
    println!("{}", "─".repeat(80).bright_black());
    for (i, rec) in detail.recommendations.recommendations_list.iter().enumerate() {
        println!("\n{}. {}", i + 1, rec.recommendation_copy.subhead.cyan().bold());
        println!("   {}", plain(&rec.recommendation_copy.body));
        if let (Some(cta), Some(href)) = (&rec.recommendation_copy.cta, &rec.cta_href) {
            println!("   {} {}", cta.bold(), href.bright_black());
        }
    }

    println!("\n{}", "═".repeat(80).bright_black());
    println!("{}", detail.what_is_this_breach.headline.bold());
    println!("   {}", detail.what_is_this_breach.copy);

    if let Some(delayed) = &detail.delayed_reporting {
        println!("\n{} {}", "⏱".yellow(), delayed.headline.bold());
        println!("   {}", delayed.copy);
    }
}

fn print_callout(stat: &StatCallout) {
    println!(
        "  {:>5}  {}",
        stat.display_count.to_string().bold().yellow(),
        stat.subhead
    );
}

pub fn print_stats(stats: &UserBreachStats) {
    println!("\n{}", "BREACH STATS".bold().white());
    println!("{}", "═".repeat(80).bright_black());

    print_callout(&stats.breach_stats.monitored_emails);
    print_callout(&stats.breach_stats.num_breaches);
    print_callout(&stats.breach_stats.passwords);

    let Some(bar) = &stats.progress_bar else {
        return;
    };

    println!("\n{}", "RESOLUTION PROGRESS".bold());
    println!("{}", "─".repeat(80).bright_black());
    match bar {
        ProgressBar::Intro {
            subhead,
            progress_message,
        }
        | ProgressBar::Complete {
            subhead,
            progress_message,
        } => {
            println!("  {}", subhead.bold());
            println!("  {}", plain(progress_message));
        }
        ProgressBar::InProgress {
            progress_status,
            percent_complete,
            progress_message,
            percent_breaches_resolved,
        } => {
            let filled = (*percent_breaches_resolved as usize) * 40 / 100;
            println!(
                "  [{}{}] {}",
                "█".repeat(filled).green(),
                "░".repeat(40 - filled).bright_black(),
                percent_complete.bold()
            );
            println!("  {}", progress_status);
            println!("  {}", plain(progress_message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_strips_markup() {
        assert_eq!(
            plain("<span class='demi'>Nice start!</span> Keep going."),
            "Nice start! Keep going."
        );
        assert_eq!(plain("no markup"), "no markup");
    }
}
