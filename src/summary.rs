use crate::catalog::PASSWORDS;
use crate::types::{BreachSummary, StatCount, VerifiedEmail};

/// Turns a user's verified emails into breach counters.
pub trait ResultsSummarizer {
    fn summarize(&self, verified_emails: &[VerifiedEmail]) -> BreachSummary;
}

fn saturating_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Counts every breach listed under every verified email. A breach affecting
/// two addresses counts twice, matching how the dashboard lists them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanResultsSummarizer;

impl ResultsSummarizer for ScanResultsSummarizer {
    fn summarize(&self, verified_emails: &[VerifiedEmail]) -> BreachSummary {
        let mut summary = BreachSummary {
            monitored_emails: StatCount {
                count: saturating_count(verified_emails.len()),
                num_resolved: 0,
            },
            ..BreachSummary::default()
        };

        for breach in verified_emails.iter().flat_map(|e| e.breaches.iter()) {
            let exposes_passwords = breach.data_classes.iter().any(|dc| dc == PASSWORDS);

            summary.num_breaches.count += 1;
            if exposes_passwords {
                summary.passwords.count += 1;
            }
            if breach.is_resolved {
                summary.num_breaches.num_resolved += 1;
                if exposes_passwords {
                    summary.passwords.num_resolved += 1;
                }
            }
        }

        summary
    }
}
