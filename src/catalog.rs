//! Static remediation catalog.
//!
//! Entries here are templates: message ids plus links. They are resolved
//! against request options into a [`PriorityCatalog`] and localized into fresh
//! [`Recommendation`] values, so nothing in the tables is ever written to.

use crate::locale::Localizer;
use crate::types::{Recommendation, RecommendationCopy};
use std::collections::HashMap;

/// Breaches that are always presented as data-aggregator breaches,
/// whatever their domain or sensitivity says.
pub const AGGREGATOR_BREACHES: &[&str] = &[
    "Exactis",
    "Apollo",
    "YouveBeenScraped",
    "ElasticsearchSalesLeads",
    "Estonia",
    "MasterDeeds",
    "PDL",
];

pub const MINIMUM_RECOMMENDATIONS: usize = 4;

pub const PASSWORDS: &str = "passwords";

pub const SECURITY_TIPS_URL: &str = "https://monitor.firefox.com/security-tips";
const FIREFOX_PASSWORDS_URL: &str = "https://www.mozilla.org/firefox/lockwise/";
const FIREFOX_DOWNLOAD_URL: &str = "https://www.mozilla.org/firefox/new/";
const TWO_FACTOR_URL: &str = "https://2fa.directory/";
const VPN_URL: &str = "https://vpn.mozilla.org/";
const RELAY_URL: &str = "https://relay.firefox.com/";

pub fn is_aggregator(breach_name: &str) -> bool {
    AGGREGATOR_BREACHES.contains(&breach_name)
}

/// Request facts that change which call-to-action a recommendation carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogOptions {
    pub is_firefox: bool,
    pub is_en_us: bool,
    pub change_password_link: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum Cta {
    None,
    Link {
        copy: &'static str,
        href: &'static str,
    },
    // Only offered to en-US visitors, where the product is available.
    EnUsLink {
        copy: &'static str,
        href: &'static str,
    },
    ChangePassword,
    PasswordManager,
}

#[derive(Debug, Clone, Copy)]
struct RecSpec {
    id: &'static str,
    cta: Cta,
}

#[derive(Debug, Clone, Copy)]
pub struct DataClassSpec {
    pub key: &'static str,
    pub weight: u32,
    recs: &'static [RecSpec],
}

const fn rec(id: &'static str) -> RecSpec {
    RecSpec { id, cta: Cta::None }
}

pub const PRIORITY_DATA_CLASSES: &[DataClassSpec] = &[
    DataClassSpec {
        key: "government-issued-ids",
        weight: 101,
        recs: &[rec("rec-gov-ids")],
    },
    DataClassSpec {
        key: "social-security-numbers",
        weight: 100,
        recs: &[rec("rec-ssn")],
    },
    DataClassSpec {
        key: PASSWORDS,
        weight: 99,
        recs: &[
            RecSpec {
                id: "rec-pw-1",
                cta: Cta::ChangePassword,
            },
            RecSpec {
                id: "rec-pw-2",
                cta: Cta::PasswordManager,
            },
            RecSpec {
                id: "rec-pw-3",
                cta: Cta::Link {
                    copy: "rec-pw-3-cta",
                    href: TWO_FACTOR_URL,
                },
            },
        ],
    },
    DataClassSpec {
        key: "bank-account-numbers",
        weight: 98,
        recs: &[rec("rec-bank-acc")],
    },
    DataClassSpec {
        key: "credit-cards",
        weight: 97,
        recs: &[rec("rec-cc")],
    },
    DataClassSpec {
        key: "credit-card-cvv",
        weight: 96,
        recs: &[rec("rec-cc-cvv")],
    },
    DataClassSpec {
        key: "partial-credit-card-data",
        weight: 95,
        recs: &[rec("rec-cc-partial")],
    },
    DataClassSpec {
        key: "ip-addresses",
        weight: 94,
        recs: &[RecSpec {
            id: "rec-ip",
            cta: Cta::EnUsLink {
                copy: "rec-ip-cta",
                href: VPN_URL,
            },
        }],
    },
    DataClassSpec {
        key: "historical-passwords",
        weight: 93,
        recs: &[rec("rec-hist-pw")],
    },
    DataClassSpec {
        key: "security-questions-and-answers",
        weight: 92,
        recs: &[rec("rec-security-q")],
    },
    DataClassSpec {
        key: "phone-numbers",
        weight: 91,
        recs: &[rec("rec-phone")],
    },
    DataClassSpec {
        key: "email-addresses",
        weight: 90,
        recs: &[RecSpec {
            id: "rec-email",
            cta: Cta::EnUsLink {
                copy: "rec-email-cta",
                href: RELAY_URL,
            },
        }],
    },
    DataClassSpec {
        key: "dates-of-birth",
        weight: 89,
        recs: &[rec("rec-dob")],
    },
    DataClassSpec {
        key: "pins",
        weight: 88,
        recs: &[rec("rec-pins")],
    },
    DataClassSpec {
        key: "physical-addresses",
        weight: 87,
        recs: &[rec("rec-address")],
    },
];

const GENERIC_RECOMMENDATIONS: &[&str] = &["rec-gen-1", "rec-gen-2", "rec-gen-3", "rec-gen-4"];

const FOURTH_PASSWORD_RECOMMENDATION: RecSpec = RecSpec {
    id: "rec-pw-4",
    cta: Cta::Link {
        copy: "rec-pw-4-cta",
        href: SECURITY_TIPS_URL,
    },
};

/// A recommendation whose copy is still a set of message ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationTemplate {
    pub icon_class_name: String,
    pub subhead_id: String,
    pub body_id: String,
    pub cta_id: Option<String>,
    pub cta_href: Option<String>,
    pub cta_should_open_in_new_tab: bool,
}

impl RecommendationTemplate {
    /// A recommendation with no call-to-action, copy ids derived from `id`.
    pub fn plain(id: &str) -> Self {
        Self {
            icon_class_name: id.to_string(),
            subhead_id: format!("{}-subhead", id),
            body_id: id.to_string(),
            cta_id: None,
            cta_href: None,
            cta_should_open_in_new_tab: false,
        }
    }

    fn with_cta(mut self, copy: &str, href: &str) -> Self {
        self.cta_id = Some(copy.to_string());
        self.cta_href = Some(href.to_string());
        self.cta_should_open_in_new_tab = true;
        self
    }

    fn resolve(spec: &RecSpec, options: &CatalogOptions) -> Self {
        let template = Self::plain(spec.id);
        match spec.cta {
            Cta::None => template,
            Cta::Link { copy, href } => template.with_cta(copy, href),
            Cta::EnUsLink { copy, href } if options.is_en_us => template.with_cta(copy, href),
            Cta::EnUsLink { .. } => template,
            Cta::ChangePassword => match &options.change_password_link {
                Some(link) => template.with_cta("rec-pw-1-cta", link),
                None => template,
            },
            Cta::PasswordManager if options.is_firefox => {
                template.with_cta("rec-pw-2-cta-fx", FIREFOX_PASSWORDS_URL)
            }
            Cta::PasswordManager => template.with_cta("rec-pw-2-cta-download", FIREFOX_DOWNLOAD_URL),
        }
    }

    /// Render every copy slot for `locales` into a new value.
    pub fn localize<L: Localizer + ?Sized>(&self, localizer: &L, locales: &[String]) -> Recommendation {
        Recommendation {
            rec_icon_class_name: self.icon_class_name.clone(),
            recommendation_copy: RecommendationCopy {
                subhead: localizer.localize(locales, &self.subhead_id),
                body: localizer.localize(locales, &self.body_id),
                cta: self.cta_id.as_ref().map(|id| localizer.localize(locales, id)),
            },
            cta_href: self.cta_href.clone(),
            cta_should_open_in_new_tab: self.cta_should_open_in_new_tab,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataClassEntry {
    pub key: String,
    pub weight: u32,
    pub recommendations: Vec<RecommendationTemplate>,
}

/// Priority data classes keyed by data-class id.
#[derive(Debug, Clone, Default)]
pub struct PriorityCatalog {
    entries: HashMap<String, DataClassEntry>,
}

impl PriorityCatalog {
    pub fn standard(options: &CatalogOptions) -> Self {
        Self::from_entries(PRIORITY_DATA_CLASSES.iter().map(|spec| DataClassEntry {
            key: spec.key.to_string(),
            weight: spec.weight,
            recommendations: spec
                .recs
                .iter()
                .map(|r| RecommendationTemplate::resolve(r, options))
                .collect(),
        }))
    }

    pub fn from_entries(entries: impl IntoIterator<Item = DataClassEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e.key.clone(), e)).collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&DataClassEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Generic filler recommendations in catalog order.
pub fn generic_recommendations() -> Vec<RecommendationTemplate> {
    GENERIC_RECOMMENDATIONS
        .iter()
        .map(|id| RecommendationTemplate::plain(id))
        .collect()
}

pub fn fourth_password_recommendation() -> RecommendationTemplate {
    RecommendationTemplate::resolve(&FOURTH_PASSWORD_RECOMMENDATION, &CatalogOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_covers_all_specs() {
        let catalog = PriorityCatalog::standard(&CatalogOptions::default());
        assert_eq!(catalog.len(), PRIORITY_DATA_CLASSES.len());
        assert_eq!(catalog.get(PASSWORDS).unwrap().recommendations.len(), 3);
        assert!(catalog.get("usernames").is_none());
        assert!(!catalog.is_empty());
        assert!(PriorityCatalog::from_entries([]).is_empty());
    }

    #[test]
    fn test_weights_are_unique() {
        let mut weights: Vec<u32> = PRIORITY_DATA_CLASSES.iter().map(|d| d.weight).collect();
        weights.sort_unstable();
        weights.dedup();
        assert_eq!(weights.len(), PRIORITY_DATA_CLASSES.len());
    }

    #[test]
    fn test_change_password_link_drives_first_password_cta() {
        let without = PriorityCatalog::standard(&CatalogOptions::default());
        let first = &without.get(PASSWORDS).unwrap().recommendations[0];
        assert_eq!(first.cta_href, None);

        let with = PriorityCatalog::standard(&CatalogOptions {
            change_password_link: Some("https://example.com/pw".to_string()),
            ..CatalogOptions::default()
        });
        let first = &with.get(PASSWORDS).unwrap().recommendations[0];
        assert_eq!(first.cta_href.as_deref(), Some("https://example.com/pw"));
        assert_eq!(first.cta_id.as_deref(), Some("rec-pw-1-cta"));
    }

    #[test]
    fn test_password_manager_cta_depends_on_browser() {
        let firefox = PriorityCatalog::standard(&CatalogOptions {
            is_firefox: true,
            ..CatalogOptions::default()
        });
        let other = PriorityCatalog::standard(&CatalogOptions::default());
        let fx = &firefox.get(PASSWORDS).unwrap().recommendations[1];
        let dl = &other.get(PASSWORDS).unwrap().recommendations[1];
        assert_eq!(fx.cta_id.as_deref(), Some("rec-pw-2-cta-fx"));
        assert_eq!(dl.cta_id.as_deref(), Some("rec-pw-2-cta-download"));
    }

    #[test]
    fn test_en_us_only_ctas() {
        let en_us = PriorityCatalog::standard(&CatalogOptions {
            is_en_us: true,
            ..CatalogOptions::default()
        });
        let other = PriorityCatalog::standard(&CatalogOptions::default());
        assert_eq!(
            en_us.get("ip-addresses").unwrap().recommendations[0].cta_href.as_deref(),
            Some(VPN_URL)
        );
        assert_eq!(other.get("ip-addresses").unwrap().recommendations[0].cta_href, None);
    }

    #[test]
    fn test_generic_fillers_cover_minimum() {
        assert!(generic_recommendations().len() >= MINIMUM_RECOMMENDATIONS);
        assert_eq!(generic_recommendations()[0].body_id, "rec-gen-1");
    }

    #[test]
    fn test_aggregator_denylist() {
        assert!(is_aggregator("Exactis"));
        assert!(is_aggregator("PDL"));
        assert!(!is_aggregator("Adobe"));
    }
}
