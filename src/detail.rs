//! Breach detail page view model.

use crate::catalog::{
    self, CatalogOptions, PriorityCatalog, MINIMUM_RECOMMENDATIONS, PASSWORDS,
};
use crate::context;
use crate::locale::{pretty_date, Localizer};
use crate::types::{
    AffectedEmail, Breach, BreachCategory, BreachDetailViewModel, CopyBlock, DataClassesSection,
    PriorityDataClass, Recommendation, RecommendationsSection, SortedDataClasses,
};

/// Breaches added more than this many days after they happened get the
/// "why did it take so long" explanation.
pub const DELAYED_REPORTING_DAYS: i64 = 90;

const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// Anchor the resolve notification links to.
pub const RESOLVE_ANCHOR: &str = "#what-to-do-next";

#[derive(Debug, Clone)]
pub struct BreachDetailRequest<'a> {
    pub breach: &'a Breach,
    pub locales: &'a [String],
    pub change_password_link: Option<&'a str>,
    pub is_firefox: bool,
    /// The requester's verified addresses found in this breach.
    pub affected_emails: &'a [AffectedEmail],
}

pub fn breach_category(breach: &Breach) -> BreachCategory {
    if catalog::is_aggregator(&breach.name) {
        return BreachCategory::DataAggregatorBreach;
    }
    if breach.is_sensitive {
        return BreachCategory::SensitiveBreach;
    }
    if !breach.domain.is_empty() {
        return BreachCategory::WebsiteBreach;
    }
    BreachCategory::DEFAULT
}

/// Split data classes into catalogued priority entries, sorted by descending
/// weight (stable), and localized labels for everything else.
pub fn sort_data_classes<L: Localizer + ?Sized>(
    localizer: &L,
    locales: &[String],
    data_classes: &[String],
    priority_catalog: &PriorityCatalog,
) -> SortedDataClasses {
    let mut sorted = SortedDataClasses::default();

    for data_class in data_classes {
        let data_type = localizer.localize(locales, data_class);
        match priority_catalog.get(data_class) {
            Some(entry) => sorted.priority.push(PriorityDataClass {
                key: entry.key.clone(),
                weight: entry.weight,
                data_type,
                recommendations: entry
                    .recommendations
                    .iter()
                    .map(|r| r.localize(localizer, locales))
                    .collect(),
            }),
            None => sorted.lower_priority.push(data_type),
        }
    }

    sorted.priority.sort_by(|a, b| b.weight.cmp(&a.weight));
    sorted
}

/// Priority recommendations in sorted order, the fourth password
/// recommendation when passwords leaked, then generic fillers up to the minimum.
pub fn collect_recommendations<L: Localizer + ?Sized>(
    localizer: &L,
    locales: &[String],
    breach: &Breach,
    sorted: &SortedDataClasses,
) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = sorted
        .priority
        .iter()
        .flat_map(|dc| dc.recommendations.iter().cloned())
        .collect();

    if breach.exposes(PASSWORDS) {
        recommendations.push(catalog::fourth_password_recommendation().localize(localizer, locales));
    }

    if recommendations.len() < MINIMUM_RECOMMENDATIONS {
        let needed = MINIMUM_RECOMMENDATIONS - recommendations.len();
        recommendations.extend(
            catalog::generic_recommendations()
                .iter()
                .take(needed)
                .map(|r| r.localize(localizer, locales)),
        );
    }

    recommendations
}

/// Whole days between the breach and its addition to the catalog, rounded up.
pub fn reporting_delay_days(breach: &Breach) -> i64 {
    let millis = (breach.added_date - breach.breach_date).num_milliseconds().abs();
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

pub fn is_delayed_report(breach: &Breach) -> bool {
    reporting_delay_days(breach) > DELAYED_REPORTING_DAYS
}

pub fn format_notification_link(message: &str) -> String {
    message.replacen(
        "<a>",
        &format!("<a class='resolve-link' href='{}'>", RESOLVE_ANCHOR),
        1,
    )
}

pub struct BreachDetailBuilder<'a, L: Localizer + ?Sized> {
    localizer: &'a L,
    breach_resolution_enabled: bool,
}

impl<'a, L: Localizer + ?Sized> BreachDetailBuilder<'a, L> {
    pub fn new(localizer: &'a L, breach_resolution_enabled: bool) -> Self {
        Self {
            localizer,
            breach_resolution_enabled,
        }
    }

    fn text(&self, locales: &[String], id: &str) -> String {
        self.localizer.localize(locales, id)
    }

    pub fn build(&self, request: &BreachDetailRequest<'_>) -> BreachDetailViewModel {
        let BreachDetailRequest {
            breach, locales, ..
        } = *request;

        let options = CatalogOptions {
            is_firefox: request.is_firefox,
            is_en_us: context::is_en_us(locales),
            change_password_link: request.change_password_link.map(str::to_string),
        };
        let priority_catalog = PriorityCatalog::standard(&options);
        let sorted = sort_data_classes(self.localizer, locales, &breach.data_classes, &priority_catalog);
        let recommendations = collect_recommendations(self.localizer, locales, breach, &sorted);
        let category = breach_category(breach);
        let exposed_passwords = breach.exposes(PASSWORDS);

        log::debug!(
            "Building detail for {}: category={}, priority={}, recommendations={}",
            breach.name,
            category,
            sorted.priority.len(),
            recommendations.len()
        );

        let (rec_headline, rec_copy) = if exposed_passwords {
            ("rec-section-headline", "rec-section-subhead")
        } else {
            ("rec-section-headline-no-pw", "rec-section-subhead-no-pw")
        };

        BreachDetailViewModel {
            breach: breach.clone(),
            overview: self.overview(locales, breach),
            category_id: category,
            category: self.text(locales, category.id()),
            change_pw_link: request.change_password_link.map(str::to_string),
            data_classes: DataClassesSection {
                headline: self.text(locales, "what-data"),
                data_types: sorted,
            },
            recommendations: RecommendationsSection {
                headline: self.text(locales, rec_headline),
                copy: self.text(locales, rec_copy),
                recommendations_list: recommendations,
            },
            what_is_this_breach: self.what_is_this_breach(locales, category),
            delayed_reporting: self.delayed_reporting(locales, breach),
            affected_email_notification: self.affected_email_notification(locales, request.affected_emails),
        }
    }

    fn overview(&self, locales: &[String], breach: &Breach) -> CopyBlock {
        let bold = |text: String| format!("<span class='bold'>{}</span>", text);
        CopyBlock {
            headline: self.text(locales, "breach-overview-title"),
            copy: self.localizer.localize_with(
                locales,
                "breach-overview-new",
                &[
                    ("addedDate", bold(pretty_date(&breach.added_date, locales))),
                    ("breachDate", bold(pretty_date(&breach.breach_date, locales))),
                    ("breachTitle", breach.title.clone()),
                ],
            ),
        }
    }

    fn what_is_this_breach(&self, locales: &[String], category: BreachCategory) -> CopyBlock {
        let (headline, copy) = match category {
            BreachCategory::DataAggregatorBreach => ("what-is-data-agg", "what-is-data-agg-blurb"),
            BreachCategory::SensitiveBreach => ("sensitive-sites", "sensitive-sites-copy"),
            BreachCategory::WebsiteBreach => ("what-is-a-website-breach", "website-breach-blurb"),
        };
        CopyBlock {
            headline: self.text(locales, headline),
            copy: self.text(locales, copy),
        }
    }

    fn delayed_reporting(&self, locales: &[String], breach: &Breach) -> Option<CopyBlock> {
        if !is_delayed_report(breach) {
            return None;
        }
        Some(CopyBlock {
            headline: self.text(locales, "delayed-reporting-headline"),
            copy: self.text(locales, "delayed-reporting-copy"),
        })
    }

    fn affected_email_notification(
        &self,
        locales: &[String],
        affected_emails: &[AffectedEmail],
    ) -> Option<String> {
        if !self.breach_resolution_enabled {
            return None;
        }
        let message = match affected_emails {
            [] => return None,
            [only] => self.localizer.localize_with(
                locales,
                "resolve-top-notification",
                &[("affectedEmail", only.affected_email_address.clone())],
            ),
            many => self.localizer.localize_with(
                locales,
                "resolve-top-notification-plural",
                &[("numAffectedEmails", many.len().to_string())],
            ),
        };
        Some(format_notification_link(&message))
    }
}
