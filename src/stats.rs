//! Dashboard breach statistics and the resolution progress bar.

use crate::locale::Localizer;
use crate::summary::ResultsSummarizer;
use crate::types::{BreachStats, ProgressBar, StatCallout, StatCount, UserBreachStats, VerifiedEmail};

/// Floor of `resolved / total` as a percentage. `None` when there is nothing to resolve.
pub fn percent_resolved(resolved: u32, total: u32) -> Option<u32> {
    if total == 0 {
        return None;
    }
    let percent = u64::from(resolved.min(total)) * 100 / u64::from(total);
    Some(percent as u32)
}

fn emphasize(message: String) -> String {
    message.replacen("<span>", "<span class='demi'>", 1)
}

/// Message id for a percentage strictly between 0 and 100.
/// Bands are upper-inclusive: (0,25], (25,50], (50,75], (75,100).
pub fn progress_message_id(percent: u32) -> &'static str {
    match percent {
        0..=25 => "progress-message-1",
        26..=50 => "progress-message-2",
        51..=75 => "progress-message-3",
        _ => "progress-message-4",
    }
}

pub struct BreachStatsBuilder<'a, L: Localizer + ?Sized, S: ResultsSummarizer + ?Sized> {
    localizer: &'a L,
    summarizer: &'a S,
    breach_resolution_enabled: bool,
}

impl<'a, L, S> BreachStatsBuilder<'a, L, S>
where
    L: Localizer + ?Sized,
    S: ResultsSummarizer + ?Sized,
{
    pub fn new(localizer: &'a L, summarizer: &'a S, breach_resolution_enabled: bool) -> Self {
        Self {
            localizer,
            summarizer,
            breach_resolution_enabled,
        }
    }

    fn callout(&self, locales: &[String], stat: StatCount, id: &str, arg: &str, display_count: u32) -> StatCallout {
        StatCallout {
            count: stat.count,
            num_resolved: stat.num_resolved,
            subhead: self
                .localizer
                .localize_with(locales, id, &[(arg, display_count.to_string())]),
            display_count,
        }
    }

    pub fn build(&self, verified_emails: &[VerifiedEmail], locales: &[String]) -> UserBreachStats {
        let summary = self.summarizer.summarize(verified_emails);

        let monitored_emails = StatCallout {
            count: summary.monitored_emails.count,
            num_resolved: summary.monitored_emails.num_resolved,
            subhead: self.localizer.localize_with(
                locales,
                "email-addresses-being-monitored",
                &[("emails", verified_emails.len().to_string())],
            ),
            display_count: summary.monitored_emails.count,
        };

        let breaches = summary.num_breaches;
        let passwords = summary.passwords;

        let (num_breaches, passwords) = if breaches.num_resolved > 0 {
            let remaining = passwords.count.saturating_sub(passwords.num_resolved);
            (
                self.callout(locales, breaches, "known-data-breaches-resolved", "breaches", breaches.num_resolved),
                self.callout(locales, passwords, "unresolved-passwords-exposed", "passwords", remaining),
            )
        } else {
            (
                self.callout(locales, breaches, "known-data-breaches-exposed", "breaches", breaches.count),
                self.callout(locales, passwords, "passwords-exposed", "passwords", passwords.count),
            )
        };

        let progress_bar = if self.breach_resolution_enabled {
            self.progress_bar(locales, breaches)
        } else {
            None
        };

        UserBreachStats {
            breach_stats: BreachStats {
                monitored_emails,
                num_breaches,
                passwords,
            },
            progress_bar,
            progress_intro: String::new(),
        }
    }

    pub fn progress_bar(&self, locales: &[String], breaches: StatCount) -> Option<ProgressBar> {
        let Some(percent) = percent_resolved(breaches.num_resolved, breaches.count) else {
            log::debug!("No breaches to resolve; skipping progress bar");
            return None;
        };

        let bar = match percent {
            0 => ProgressBar::Intro {
                subhead: self.localizer.localize(locales, "progress-intro-subhead"),
                progress_message: self.localizer.localize(locales, "progress-intro-message"),
            },
            100 => ProgressBar::Complete {
                subhead: self.localizer.localize(locales, "progress-complete"),
                progress_message: emphasize(self.localizer.localize(locales, "progress-complete-message")),
            },
            _ => ProgressBar::InProgress {
                progress_status: self.localizer.localize_with(
                    locales,
                    "progress-status",
                    &[
                        ("numResolvedBreaches", breaches.num_resolved.to_string()),
                        ("numTotalBreaches", breaches.count.to_string()),
                    ],
                ),
                percent_complete: self.localizer.localize_with(
                    locales,
                    "progress-percent-complete",
                    &[("percentComplete", percent.to_string())],
                ),
                progress_message: emphasize(self.localizer.localize(locales, progress_message_id(percent))),
                percent_breaches_resolved: percent,
            },
        };
        Some(bar)
    }
}
