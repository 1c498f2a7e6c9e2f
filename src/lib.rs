//! View models for breach detail and breach stats pages.
//!
//! [`BreachDetailBuilder`] turns one breach record into the copy, sorted data
//! classes and recommendations shown on its detail page.
//! [`BreachStatsBuilder`] turns a user's verified emails into the dashboard
//! callouts and resolution progress bar. Both read their text through a
//! [`Localizer`] and return plain values that serialize to the shape the page
//! templates expect.

pub mod catalog;
pub mod config;
pub mod context;
pub mod detail;
pub mod error;
pub mod input;
pub mod locale;
pub mod stats;
pub mod summary;
pub mod types;

pub use config::Settings;
pub use context::PageRequest;
pub use detail::{BreachDetailBuilder, BreachDetailRequest};
pub use error::ViewError;
pub use locale::{Localizer, MessageBundles};
pub use stats::BreachStatsBuilder;
pub use summary::{ResultsSummarizer, ScanResultsSummarizer};
pub use types::{Breach, BreachCategory, BreachDetailViewModel, UserBreachStats, VerifiedEmail};
