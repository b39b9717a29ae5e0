pub mod deadlines;

pub use deadlines::{days_until, enrich_conference, enrich_conferences, parse_date, sort_key, SortKey};
