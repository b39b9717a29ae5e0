use std::sync::Arc;

use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::config::AppConfig;
use crate::handlers::current_conferences;
use crate::models::{DeadlineEntry, EnrichedConference};

#[derive(Template)]
#[template(path = "index.html")]
struct HomeTemplate {
    conferences: Vec<ConferenceRow>,
    github_repo_url: String,
    upcoming_count: usize,
}

struct ConferenceRow {
    name: String,
    full_name: String,
    website: String,
    status_class: &'static str,
    next_type: String,
    next_date: String,
    next_label: String,
    deadlines: Vec<DeadlineItem>,
    conference_date: String,
    conference_label: String,
}

struct DeadlineItem {
    deadline_type: String,
    date: String,
    label: String,
    passed: bool,
}

/// CSS class for a row, by days until its next deadline
fn status_class(next: Option<&DeadlineEntry>) -> &'static str {
    match next.map(|d| d.days) {
        None => "none",
        Some(days) if days < 0 => "passed",
        Some(0..=7) => "urgent",
        Some(8..=30) => "soon",
        Some(_) => "upcoming",
    }
}

fn days_label(days: i64) -> String {
    match days {
        0 => String::from("less than a day left"),
        1 => String::from("1 day left"),
        -1 => String::from("passed"),
        d if d < 0 => format!("passed {} days ago", -d),
        d => format!("{} days left", d),
    }
}

fn prettify_type(deadline_type: &str) -> String {
    let spaced = deadline_type.replace(['_', '-'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}

impl From<EnrichedConference> for ConferenceRow {
    fn from(enriched: EnrichedConference) -> Self {
        let status_class = status_class(enriched.next_deadline.as_ref());
        let (next_type, next_date, next_label) = match &enriched.next_deadline {
            Some(next) => (prettify_type(&next.deadline_type), next.date.clone(), days_label(next.days)),
            None => (String::from("-"), String::from("TBA"), String::new()),
        };

        let deadlines = enriched
            .all_deadlines
            .iter()
            .map(|d| DeadlineItem {
                deadline_type: prettify_type(&d.deadline_type),
                date: d.date.clone(),
                label: days_label(d.days),
                passed: d.days < 0,
            })
            .collect();

        let conference = enriched.conference;
        let conference_label = match enriched.conference_days {
            Some(days) if days < 0 => String::from("held"),
            Some(days) => format!("in {} days", days),
            None => String::new(),
        };

        ConferenceRow {
            full_name: conference.full_name.unwrap_or_else(|| conference.name.clone()),
            name: conference.name,
            website: conference.website.unwrap_or_default(),
            status_class,
            next_type,
            next_date,
            next_label,
            deadlines,
            conference_date: conference
                .conference_date
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| String::from("TBA")),
            conference_label,
        }
    }
}

pub async fn home(State(config): State<Arc<AppConfig>>) -> Result<Response, StatusCode> {
    let enriched = current_conferences(&config)?;

    let upcoming_count = enriched
        .iter()
        .filter(|c| c.next_deadline.as_ref().is_some_and(|d| d.days >= 0))
        .count();

    let template = HomeTemplate {
        conferences: enriched.into_iter().map(ConferenceRow::from).collect(),
        github_repo_url: config.github_repo_url.clone(),
        upcoming_count,
    };

    match template.render() {
        Ok(html) => Ok(Html(html).into_response()),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
