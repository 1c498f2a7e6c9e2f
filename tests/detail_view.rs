use breach_views::types::{parse_breach_date, AffectedEmail};
use breach_views::{Breach, BreachCategory, BreachDetailBuilder, BreachDetailRequest, MessageBundles};
use serde_json::Value;

fn adobe() -> Breach {
    serde_json::from_str(
        r#"{
            "Name": "Adobe",
            "Title": "Adobe",
            "Domain": "adobe.com",
            "IsSensitive": false,
            "DataClasses": ["email-addresses", "password-hints", "passwords", "usernames"],
            "BreachDate": "2013-10-04",
            "AddedDate": "2013-12-04T00:00:00Z"
        }"#,
    )
    .unwrap()
}

fn en() -> Vec<String> {
    vec!["en".to_string()]
}

#[test]
fn builds_full_detail_for_website_breach() {
    let bundles = MessageBundles::builtin().unwrap();
    let breach = adobe();
    let locales = en();
    let detail = BreachDetailBuilder::new(&bundles, false).build(&BreachDetailRequest {
        breach: &breach,
        locales: &locales,
        change_password_link: Some("https://adobe.com/account"),
        is_firefox: true,
        affected_emails: &[],
    });

    assert_eq!(detail.category_id, BreachCategory::WebsiteBreach);
    assert_eq!(detail.category, "Website Breach");
    assert!(detail.overview.copy.contains("<span class='bold'>October 4, 2013</span>"));
    assert!(detail.overview.copy.contains("<span class='bold'>December 4, 2013</span>"));
    assert!(detail.overview.copy.contains("Adobe was breached"));

    let priority: Vec<&str> = detail
        .data_classes
        .data_types
        .priority
        .iter()
        .map(|p| p.key.as_str())
        .collect();
    assert_eq!(priority, vec!["passwords", "email-addresses"]);
    assert_eq!(
        detail.data_classes.data_types.lower_priority,
        vec!["password-hints".to_string(), "Usernames".to_string()]
    );

    let icons: Vec<&str> = detail
        .recommendations
        .recommendations_list
        .iter()
        .map(|r| r.rec_icon_class_name.as_str())
        .collect();
    assert_eq!(icons, vec!["rec-pw-1", "rec-pw-2", "rec-pw-3", "rec-email", "rec-pw-4"]);
    assert_eq!(
        detail.recommendations.recommendations_list[0].cta_href.as_deref(),
        Some("https://adobe.com/account")
    );
    assert_eq!(detail.recommendations.headline, "What to do for this breach");

    assert_eq!(detail.what_is_this_breach.headline, "What is a website breach?");
    assert!(detail.delayed_reporting.is_none());
    assert!(detail.affected_email_notification.is_none());
}

#[test]
fn delayed_sensitive_breach_without_passwords() {
    let bundles = MessageBundles::builtin().unwrap();
    let breach = Breach {
        name: "Ashley".to_string(),
        title: "Ashley".to_string(),
        domain: "ashley.example".to_string(),
        is_sensitive: true,
        data_classes: vec!["email-addresses".to_string()],
        breach_date: parse_breach_date("2020-01-01").unwrap(),
        added_date: parse_breach_date("2020-04-15").unwrap(),
    };
    let locales = en();
    let emails = vec![AffectedEmail {
        affected_email_address: "me@example.com".to_string(),
    }];
    let detail = BreachDetailBuilder::new(&bundles, true).build(&BreachDetailRequest {
        breach: &breach,
        locales: &locales,
        change_password_link: None,
        is_firefox: false,
        affected_emails: &emails,
    });

    assert_eq!(detail.category_id, BreachCategory::SensitiveBreach);
    assert_eq!(detail.what_is_this_breach.headline, "How does Monitor treat sensitive sites?");
    assert_eq!(detail.recommendations.headline, "What to do to protect your personal info");
    assert!(detail.delayed_reporting.is_some());
    assert_eq!(detail.recommendations.recommendations_list.len(), 4);
    assert!(detail
        .affected_email_notification
        .unwrap()
        .starts_with("This breach affects me@example.com."));
}

#[test]
fn serializes_in_template_shape() {
    let bundles = MessageBundles::builtin().unwrap();
    let breach = adobe();
    let locales = en();
    let detail = BreachDetailBuilder::new(&bundles, false).build(&BreachDetailRequest {
        breach: &breach,
        locales: &locales,
        change_password_link: None,
        is_firefox: false,
        affected_emails: &[],
    });

    let value: Value = serde_json::to_value(&detail).unwrap();
    assert_eq!(value["categoryId"], "website-breach");
    assert_eq!(value["breach"]["Name"], "Adobe");
    assert!(value["dataClasses"]["dataTypes"]["lowerPriority"].is_array());
    assert!(value["recommendations"]["recommendationsList"][0]["recommendationCopy"]["subhead"].is_string());
    assert!(value.get("delayedReporting").is_none());
    assert!(value.get("changePWLink").is_none());
}

#[test]
fn later_locale_tables_override_builtin() {
    let mut bundles = MessageBundles::builtin().unwrap();
    bundles.insert("fr", "what-data", "Données compromises");
    let breach = adobe();
    let locales = vec!["fr".to_string(), "en".to_string()];
    let detail = BreachDetailBuilder::new(&bundles, false).build(&BreachDetailRequest {
        breach: &breach,
        locales: &locales,
        change_password_link: None,
        is_firefox: false,
        affected_emails: &[],
    });

    assert_eq!(detail.data_classes.headline, "Données compromises");
    assert_eq!(detail.overview.headline, "Overview");
}

#[test]
fn overview_dates_follow_requested_locale() {
    let mut bundles = MessageBundles::builtin().unwrap();
    bundles.insert(
        "fr",
        "breach-overview-new",
        "Le { $breachDate }, { $breachTitle } a été piraté. Ajoutée le { $addedDate }.",
    );
    let breach = adobe();
    let locales = vec!["fr".to_string()];
    let detail = BreachDetailBuilder::new(&bundles, false).build(&BreachDetailRequest {
        breach: &breach,
        locales: &locales,
        change_password_link: None,
        is_firefox: false,
        affected_emails: &[],
    });

    assert_eq!(
        detail.overview.copy,
        "Le <span class='bold'>4 octobre 2013</span>, Adobe a été piraté. \
         Ajoutée le <span class='bold'>4 décembre 2013</span>."
    );
}
