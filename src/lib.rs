pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod utils;

pub use app::{create_app, ApiDoc};
pub use config::{load_conferences, AppConfig};
pub use error::{Result, TrackerError};
pub use models::{ConferenceFile, ConferenceRecord, DeadlineEntry, Deadlines, EnrichedConference};
pub use utils::{days_until, enrich_conference, enrich_conferences, parse_date, sort_key, SortKey};
