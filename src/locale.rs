//! Message lookup and interpolation.
//!
//! Messages are plain templates keyed by id. A template may contain
//! placeables of the form `{ $name }`, which are replaced by the argument of
//! the same name, and select placeables that choose a variant by plural
//! category. Lookup walks the requested locales in order (each locale first
//! exactly, then by its language subtag), then the configured default locale,
//! then the built-in English table. An id that no table knows is returned
//! unchanged.

use crate::error::{Result, ViewError};
use chrono::{DateTime, Locale, Utc};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const DEFAULT_LOCALE: &str = "en";

const BUILTIN_EN: &str = include_str!("../locales/en.toml");

/// Key-based translation with argument interpolation.
pub trait Localizer {
    fn localize_with(&self, locales: &[String], id: &str, args: &[(&str, String)]) -> String;

    fn localize(&self, locales: &[String], id: &str) -> String {
        self.localize_with(locales, id, &[])
    }
}

#[derive(Debug, Clone, Default)]
pub struct MessageBundles {
    default_locale: String,
    tables: HashMap<String, HashMap<String, String>>,
}

impl MessageBundles {
    pub fn new(default_locale: &str) -> Self {
        Self {
            default_locale: default_locale.to_string(),
            tables: HashMap::new(),
        }
    }

    /// Bundles holding only the English messages compiled into the crate.
    pub fn builtin() -> Result<Self> {
        let mut bundles = Self::new(DEFAULT_LOCALE);
        bundles.add_source(DEFAULT_LOCALE, BUILTIN_EN, Path::new("locales/en.toml"))?;
        Ok(bundles)
    }

    /// Parse a TOML table of `id = "template"` pairs and merge it into `locale`.
    pub fn add_source(&mut self, locale: &str, source: &str, origin: &Path) -> Result<()> {
        let table: HashMap<String, String> =
            toml::from_str(source).map_err(|e| ViewError::LocaleParse {
                path: origin.to_path_buf(),
                source: e,
            })?;
        log::debug!("Loaded {} messages for locale {}", table.len(), locale);
        self.tables
            .entry(locale.to_string())
            .or_default()
            .extend(table);
        Ok(())
    }

    pub fn set_default_locale(&mut self, locale: &str) {
        self.default_locale = locale.to_string();
    }

    pub fn insert(&mut self, locale: &str, id: &str, template: &str) {
        self.tables
            .entry(locale.to_string())
            .or_default()
            .insert(id.to_string(), template.to_string());
    }

    /// Load every `<locale>.toml` file in `dir`. Returns how many locales were read.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        let entries = fs::read_dir(dir).map_err(|e| ViewError::Read {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let mut loaded = 0;
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "toml") {
                continue;
            }
            let Some(locale) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let source = fs::read_to_string(&path).map_err(|e| ViewError::Read {
                path: path.clone(),
                source: e,
            })?;
            self.add_source(locale, &source, &path)?;
            loaded += 1;
        }
        Ok(loaded)
    }

    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    /// Find the template for `id`, returning the locale of the table it came from.
    /// Walks the requested locales, then the configured default, then the
    /// built-in English table.
    fn lookup(&self, locales: &[String], id: &str) -> Option<(&str, &str)> {
        let requested = locales.iter().map(String::as_str);
        let fallback = [self.default_locale.as_str(), DEFAULT_LOCALE];

        for locale in requested.chain(fallback) {
            for candidate in [locale, language_of(locale)] {
                let found = self
                    .tables
                    .get_key_value(candidate)
                    .and_then(|(key, table)| table.get(id).map(|t| (key.as_str(), t.as_str())));
                if found.is_some() {
                    return found;
                }
            }
        }
        None
    }
}

impl Localizer for MessageBundles {
    fn localize_with(&self, locales: &[String], id: &str, args: &[(&str, String)]) -> String {
        match self.lookup(locales, id) {
            Some((locale, template)) => interpolate(template, args, locale),
            None => {
                log::warn!("No message for id '{}' in locales {:?}", id, locales);
                id.to_string()
            }
        }
    }
}

fn language_of(locale: &str) -> &str {
    locale.split(['-', '_']).next().unwrap_or(locale)
}

/// CLDR cardinal category for `n`, reduced to the `one`/`other` split the
/// shipped messages use.
pub fn plural_category(locale: &str, n: f64) -> &'static str {
    match language_of(locale).to_ascii_lowercase().as_str() {
        "ja" | "ko" | "zh" | "vi" | "th" | "id" => "other",
        "fr" if n.trunc() == 0.0 || n.trunc() == 1.0 => "one",
        "fr" => "other",
        _ if n == 1.0 => "one",
        _ => "other",
    }
}

/// Render a template for `locale`.
///
/// `{ $name }` is replaced by the argument of that name. A select placeable
/// `{ $n -> [one] ... *[other] ... }` picks the variant whose key equals the
/// argument, then the one named by its plural category, then the `*` default.
/// Variant text is rendered recursively. Placeables that cannot be resolved
/// are kept verbatim.
pub fn interpolate(template: &str, args: &[(&str, String)], locale: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open..];
        let Some(close) = matching_brace(after_open) else {
            out.push_str(after_open);
            return out;
        };

        let placeable = &after_open[..=close];
        match resolve_placeable(placeable[1..close].trim(), args, locale) {
            Some(text) => out.push_str(&text),
            None => out.push_str(placeable),
        }
        rest = &after_open[close + 1..];
    }

    out.push_str(rest);
    out
}

fn arg_value<'a>(args: &'a [(&str, String)], name: &str) -> Option<&'a str> {
    args.iter()
        .find(|(arg, _)| *arg == name)
        .map(|(_, value)| value.as_str())
}

fn resolve_placeable(inner: &str, args: &[(&str, String)], locale: &str) -> Option<String> {
    let Some(arrow) = find_top_level(inner, "->") else {
        let name = inner.strip_prefix('$')?.trim();
        return arg_value(args, name).map(str::to_string);
    };

    let name = inner[..arrow].trim().strip_prefix('$')?.trim();
    let variants = parse_variants(&inner[arrow + 2..]);
    let text = choose_variant(&variants, arg_value(args, name), locale)?;
    Some(interpolate(text, args, locale))
}

// `s` starts with `{`.
fn matching_brace(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn find_top_level(s: &str, needle: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ if depth == 0 && s[i..].starts_with(needle) => return Some(i),
            _ => {}
        }
    }
    None
}

#[derive(Debug, PartialEq)]
struct Variant<'t> {
    key: &'t str,
    text: &'t str,
    is_default: bool,
}

fn parse_variants(source: &str) -> Vec<Variant<'_>> {
    let mut variants = Vec::new();
    let mut rest = source.trim_start();

    while !rest.is_empty() {
        let is_default = rest.starts_with('*');
        let body = if is_default { &rest[1..] } else { rest };
        let Some(body) = body.strip_prefix('[') else {
            break;
        };
        let Some(key_end) = body.find(']') else {
            break;
        };
        let key = body[..key_end].trim();
        let after_key = &body[key_end + 1..];

        let text_end = find_top_level(after_key, "[").unwrap_or(after_key.len());
        let segment = after_key[..text_end].trim_end();
        // A trailing `*` marks the next variant as the default.
        let (text, next_start) = match segment.strip_suffix('*') {
            Some(text) => (text, segment.len() - 1),
            None => (segment, text_end),
        };

        variants.push(Variant {
            key,
            text: text.trim(),
            is_default,
        });
        rest = after_key[next_start..].trim_start();
    }

    variants
}

fn choose_variant<'t>(variants: &[Variant<'t>], value: Option<&str>, locale: &str) -> Option<&'t str> {
    if let Some(value) = value.map(str::trim) {
        if let Some(exact) = variants.iter().find(|v| v.key == value) {
            return Some(exact.text);
        }
        if let Ok(n) = value.parse::<f64>() {
            let category = plural_category(locale, n);
            if let Some(plural) = variants.iter().find(|v| v.key == category) {
                return Some(plural.text);
            }
        }
    }
    variants
        .iter()
        .find(|v| v.is_default)
        .or_else(|| variants.last())
        .map(|v| v.text)
}

fn chrono_locale(tag: &str) -> Locale {
    let language = language_of(tag).to_ascii_lowercase();
    let region = tag
        .get(language.len() + 1..)
        .map(str::to_ascii_uppercase)
        .unwrap_or_default();
    if !region.is_empty() {
        if let Ok(locale) = Locale::try_from(format!("{}_{}", language, region).as_str()) {
            return locale;
        }
    }
    match language.as_str() {
        "fr" => Locale::fr_FR,
        "de" => Locale::de_DE,
        "es" => Locale::es_ES,
        "it" => Locale::it_IT,
        "nl" => Locale::nl_NL,
        "pt" => Locale::pt_BR,
        "sv" => Locale::sv_SE,
        "pl" => Locale::pl_PL,
        "ru" => Locale::ru_RU,
        "ja" => Locale::ja_JP,
        _ => Locale::en_US,
    }
}

/// Long-form date used in breach overview copy, in the first requested
/// locale, e.g. `January 1, 2020` or `1 janvier 2020`.
pub fn pretty_date(date: &DateTime<Utc>, locales: &[String]) -> String {
    let tag = locales.first().map_or(DEFAULT_LOCALE, String::as_str);
    let pattern = match language_of(tag).to_ascii_lowercase().as_str() {
        "en" => "%B %-d, %Y",
        "de" => "%-d. %B %Y",
        "ja" => "%Y年%-m月%-d日",
        _ => "%-d %B %Y",
    };
    date.format_localized(pattern, chrono_locale(tag)).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_breach_date;

    fn locales(list: &[&str]) -> Vec<String> {
        list.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_interpolate_named_args() {
        let out = interpolate(
            "{ $count } of { $total } resolved",
            &[("count", "2".to_string()), ("total", "5".to_string())],
            "en",
        );
        assert_eq!(out, "2 of 5 resolved");
    }

    #[test]
    fn test_interpolate_keeps_unknown_placeables() {
        assert_eq!(interpolate("Hi { $name }", &[], "en"), "Hi { $name }");
        assert_eq!(interpolate("unclosed {", &[], "en"), "unclosed {");
    }

    #[test]
    fn test_missing_id_returns_id() {
        let bundles = MessageBundles::new("en");
        assert_eq!(bundles.localize(&locales(&["en"]), "nope"), "nope");
    }

    #[test]
    fn test_fallback_follows_requested_order() {
        let mut bundles = MessageBundles::new("en");
        bundles.insert("en", "greeting", "Hello");
        bundles.insert("fr", "greeting", "Bonjour");
        bundles.insert("de", "greeting", "Hallo");

        assert_eq!(bundles.localize(&locales(&["de", "fr"]), "greeting"), "Hallo");
        assert_eq!(bundles.localize(&locales(&["fr-CA"]), "greeting"), "Bonjour");
        assert_eq!(bundles.localize(&locales(&["ja"]), "greeting"), "Hello");
    }

    #[test]
    fn test_builtin_table_parses() {
        let bundles = MessageBundles::builtin().unwrap();
        let en = locales(&["en"]);
        assert_ne!(bundles.localize(&en, "breach-overview-title"), "breach-overview-title");
        assert_ne!(bundles.localize(&en, "progress-message-4"), "progress-message-4");
    }

    #[test]
    fn test_load_dir_reads_toml_tables() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("fr.toml"), "what-data = \"Données compromises\"\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut bundles = MessageBundles::new("en");
        assert_eq!(bundles.load_dir(dir.path()).unwrap(), 1);
        assert_eq!(
            bundles.localize(&locales(&["fr"]), "what-data"),
            "Données compromises"
        );
    }

    #[test]
    fn test_pretty_date_follows_first_locale() {
        let date = parse_breach_date("2013-10-04").unwrap();
        assert_eq!(pretty_date(&date, &locales(&["en"])), "October 4, 2013");
        assert_eq!(pretty_date(&date, &locales(&["en-GB", "fr"])), "October 4, 2013");
        assert_eq!(pretty_date(&date, &locales(&["fr", "en"])), "4 octobre 2013");
        assert_eq!(pretty_date(&date, &locales(&["fr-CA"])), "4 octobre 2013");
        assert_eq!(pretty_date(&date, &locales(&["de"])), "4. Oktober 2013");
        assert_eq!(pretty_date(&date, &[]), "October 4, 2013");
    }

    #[test]
    fn test_unknown_locale_dates_fall_back_to_english() {
        let date = parse_breach_date("2020-04-05").unwrap();
        assert_eq!(pretty_date(&date, &locales(&["xx"])), "April 5, 2020");
    }

    const EMAILS: &str = "{ $emails -> [one] { $emails } email address *[other] { $emails } email addresses } being monitored";

    #[test]
    fn test_select_by_plural_category() {
        let one = interpolate(EMAILS, &[("emails", "1".to_string())], "en");
        let many = interpolate(EMAILS, &[("emails", "3".to_string())], "en");
        let zero = interpolate(EMAILS, &[("emails", "0".to_string())], "en");
        assert_eq!(one, "1 email address being monitored");
        assert_eq!(many, "3 email addresses being monitored");
        assert_eq!(zero, "0 email addresses being monitored");
    }

    #[test]
    fn test_select_exact_key_wins_over_category() {
        let template = "{ $n -> [0] nothing yet [one] one item *[other] { $n } items }";
        assert_eq!(interpolate(template, &[("n", "0".to_string())], "en"), "nothing yet");
        assert_eq!(interpolate(template, &[("n", "1".to_string())], "en"), "one item");
        assert_eq!(interpolate(template, &[("n", "7".to_string())], "en"), "7 items");
    }

    #[test]
    fn test_select_uses_locale_rules() {
        let template = "{ $n -> [one] singulier *[other] pluriel }";
        assert_eq!(interpolate(template, &[("n", "0".to_string())], "fr"), "singulier");
        assert_eq!(interpolate(template, &[("n", "0".to_string())], "en"), "pluriel");
        assert_eq!(plural_category("ja", 1.0), "other");
    }

    #[test]
    fn test_select_without_argument_uses_default() {
        assert_eq!(interpolate(EMAILS, &[], "en"), "{ $emails } email addresses being monitored");
    }

    #[test]
    fn test_builtin_counts_are_grammatical_for_one() {
        let bundles = MessageBundles::builtin().unwrap();
        let en = locales(&["en"]);
        let one = |id: &str, arg: &str| bundles.localize_with(&en, id, &[(arg, "1".to_string())]);
        assert_eq!(one("email-addresses-being-monitored", "emails"), "1 email address being monitored");
        assert_eq!(one("passwords-exposed", "passwords"), "1 password exposed across all breaches");
        assert_eq!(
            one("known-data-breaches-exposed", "breaches"),
            "1 known data breach has exposed your info"
        );
        assert_eq!(
            one("known-data-breaches-resolved", "breaches"),
            "1 data breach marked as resolved"
        );
        assert_eq!(
            one("unresolved-passwords-exposed", "passwords"),
            "1 password exposed in unresolved breaches"
        );
    }

    #[test]
    fn test_builtin_english_survives_other_default_locale() {
        let mut bundles = MessageBundles::builtin().unwrap();
        bundles.set_default_locale("fr");
        bundles.insert("fr", "what-data", "Données compromises");

        let de = locales(&["de"]);
        assert_eq!(bundles.localize(&de, "what-data"), "Données compromises");
        assert_eq!(bundles.localize(&de, "breach-overview-title"), "Overview");
    }
}
