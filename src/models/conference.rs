use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

/// Conference entry as written in `data/conferences.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConferenceRecord {
    /// Short name or acronym (e.g., NeurIPS)
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    /// Submission milestones keyed by type (abstract, paper, ...)
    #[serde(default)]
    #[schema(value_type = Object)]
    pub deadlines: Deadlines,
    /// First day of the conference, YYYY-MM-DD
    #[serde(default)]
    pub conference_date: Option<String>,
}

/// Deadline type -> date string, kept in file order.
///
/// A `null` or empty date means the milestone is known but not yet announced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deadlines(Vec<(String, Option<String>)>);

impl Deadlines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, deadline_type: impl Into<String>, date: Option<String>) {
        let deadline_type = deadline_type.into();
        match self.0.iter_mut().find(|(key, _)| *key == deadline_type) {
            Some(entry) => entry.1 = date,
            None => self.0.push((deadline_type, date)),
        }
    }

    /// Entries that carry a non-empty date, in file order
    pub fn dated(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().filter_map(|(key, date)| match date.as_deref() {
            Some(date) if !date.is_empty() => Some((key.as_str(), date)),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for Deadlines {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        let mut deadlines = Deadlines::new();
        for (key, date) in iter {
            deadlines.insert(key, date);
        }
        deadlines
    }
}

impl Serialize for Deadlines {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, date) in &self.0 {
            map.serialize_entry(key, date)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Deadlines {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DeadlinesVisitor;

        impl<'de> Visitor<'de> for DeadlinesVisitor {
            type Value = Deadlines;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of deadline type to YYYY-MM-DD date")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut deadlines = Deadlines::new();
                while let Some((key, date)) = access.next_entry::<String, Option<String>>()? {
                    deadlines.insert(key, date);
                }
                Ok(deadlines)
            }

            // `deadlines:` with nothing after it
            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Deadlines::new())
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Deadlines::new())
            }
        }

        deserializer.deserialize_any(DeadlinesVisitor)
    }
}

/// A single dated milestone with its distance from now
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeadlineEntry {
    #[serde(rename = "type")]
    pub deadline_type: String,
    pub date: String,
    /// Whole days until the deadline; negative once it has passed
    pub days: i64,
}

/// Conference record plus the fields computed on every request
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EnrichedConference {
    #[serde(flatten)]
    pub conference: ConferenceRecord,
    /// Dated deadlines, soonest (smallest days) first
    pub all_deadlines: Vec<DeadlineEntry>,
    pub next_deadline: Option<DeadlineEntry>,
    /// Whole days until the conference starts
    pub conference_days: Option<i64>,
}

/// Top-level layout of the YAML data file
#[derive(Debug, Default, Deserialize)]
pub struct ConferenceFile {
    #[serde(default)]
    pub conferences: Vec<ConferenceRecord>,
}
