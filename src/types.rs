use crate::error::ViewError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BreachCategory {
    DataAggregatorBreach, // Scraped or resold profile data
    SensitiveBreach,      // Site whose membership alone is sensitive
    WebsiteBreach,        // Ordinary site compromise
}

impl BreachCategory {
    /// Category used when nothing about the breach points elsewhere.
    pub const DEFAULT: BreachCategory = BreachCategory::DataAggregatorBreach;

    /// Message id of the category label, also used as the template's `categoryId`.
    pub fn id(self) -> &'static str {
        match self {
            BreachCategory::DataAggregatorBreach => "data-aggregator-breach",
            BreachCategory::SensitiveBreach => "sensitive-breach",
            BreachCategory::WebsiteBreach => "website-breach",
        }
    }
}

impl fmt::Display for BreachCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A breach record as published by the breach catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Breach {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub is_sensitive: bool,
    #[serde(default)]
    pub data_classes: Vec<String>,
    #[serde(deserialize_with = "deserialize_breach_date")]
    pub breach_date: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_breach_date")]
    pub added_date: DateTime<Utc>,
}

impl Breach {
    pub fn exposes(&self, data_class: &str) -> bool {
        self.data_classes.iter().any(|dc| dc == data_class)
    }
}

/// Parse either a bare `YYYY-MM-DD` date (midnight UTC) or an RFC 3339 timestamp.
pub fn parse_breach_date(value: &str) -> Result<DateTime<Utc>, ViewError> {
    let trimmed = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| ViewError::InvalidDate {
            value: value.to_string(),
        })
}

fn deserialize_breach_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_breach_date(&raw).map_err(serde::de::Error::custom)
}

/// One of the requester's verified addresses that appears in the breach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedEmail {
    pub affected_email_address: String,
}

/// A breach as seen from one verified email, with the user's resolution status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailBreach {
    pub name: String,
    #[serde(default)]
    pub data_classes: Vec<String>,
    #[serde(default)]
    pub is_resolved: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedEmail {
    pub email: String,
    #[serde(default)]
    pub breaches: Vec<EmailBreach>,
}

// ---------------------------------------------------------------------------
// Localized recommendation values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationCopy {
    pub subhead: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub rec_icon_class_name: String,
    pub recommendation_copy: RecommendationCopy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_href: Option<String>,
    pub cta_should_open_in_new_tab: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityDataClass {
    pub key: String,
    pub weight: u32,
    pub data_type: String,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortedDataClasses {
    pub priority: Vec<PriorityDataClass>,
    pub lower_priority: Vec<String>,
}

// ---------------------------------------------------------------------------
// Breach detail view model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyBlock {
    pub headline: String,
    pub copy: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataClassesSection {
    pub headline: String,
    pub data_types: SortedDataClasses,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsSection {
    pub headline: String,
    pub copy: String,
    pub recommendations_list: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreachDetailViewModel {
    pub breach: Breach,
    pub overview: CopyBlock,
    pub category_id: BreachCategory,
    pub category: String,
    #[serde(rename = "changePWLink", skip_serializing_if = "Option::is_none")]
    pub change_pw_link: Option<String>,
    pub data_classes: DataClassesSection,
    pub recommendations: RecommendationsSection,
    pub what_is_this_breach: CopyBlock,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delayed_reporting: Option<CopyBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_email_notification: Option<String>,
}

// ---------------------------------------------------------------------------
// Breach stats view model
// ---------------------------------------------------------------------------

/// Raw counter pair produced by a results summarizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCount {
    pub count: u32,
    pub num_resolved: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreachSummary {
    pub monitored_emails: StatCount,
    pub num_breaches: StatCount,
    pub passwords: StatCount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCallout {
    pub count: u32,
    pub num_resolved: u32,
    pub subhead: String,
    pub display_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreachStats {
    pub monitored_emails: StatCallout,
    pub num_breaches: StatCallout,
    pub passwords: StatCallout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProgressBar {
    #[serde(rename_all = "camelCase")]
    Intro {
        subhead: String,
        progress_message: String,
    },
    #[serde(rename_all = "camelCase")]
    Complete {
        subhead: String,
        progress_message: String,
    },
    #[serde(rename_all = "camelCase")]
    InProgress {
        progress_status: String,
        percent_complete: String,
        progress_message: String,
        percent_breaches_resolved: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBreachStats {
    pub breach_stats: BreachStats,
    #[serde(serialize_with = "progress_bar_or_empty")]
    pub progress_bar: Option<ProgressBar>,
    pub progress_intro: String,
}

// Templates test `progressBar` for truthiness, so an absent bar renders as "".
fn progress_bar_or_empty<S>(bar: &Option<ProgressBar>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match bar {
        Some(bar) => bar.serialize(serializer),
        None => serializer.serialize_str(""),
    }
}
