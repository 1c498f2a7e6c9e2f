use crate::types::Breach;

/// The slice of the incoming request the view builders care about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub user_agent: Option<String>,
    pub supported_locales: Vec<String>,
}

impl PageRequest {
    pub fn new(user_agent: Option<String>, supported_locales: Vec<String>) -> Self {
        Self {
            user_agent,
            supported_locales,
        }
    }

    pub fn is_firefox(&self) -> bool {
        self.user_agent
            .as_deref()
            .map_or(false, |ua| ua.to_lowercase().contains("firefox"))
    }

    /// Whether the visitor's preferred locale is US English.
    pub fn is_en_us(&self) -> bool {
        is_en_us(&self.supported_locales)
    }
}

pub fn is_en_us(locales: &[String]) -> bool {
    locales
        .first()
        .map_or(false, |l| l.eq_ignore_ascii_case("en") || l.eq_ignore_ascii_case("en-US"))
}

pub fn breach_title(breach: &Breach) -> &str {
    &breach.title
}
