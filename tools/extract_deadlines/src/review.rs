use deadline_tracker::{parse_date, ConferenceRecord};

/// Pull the YAML body out of a reply that may be wrapped in a ```yaml fence
pub fn strip_fence(reply: &str) -> &str {
    let body = match reply.find("```") {
        Some(start) => {
            let after = &reply[start + 3..];
            // skip the language tag line
            let after = after.find('\n').map_or("", |nl| &after[nl + 1..]);
            after.find("```").map_or(after, |end| &after[..end])
        }
        None => reply,
    };
    body.trim()
}

/// Problems a reviewer should look at before copying the suggestion into
/// `data/conferences.yaml`. An empty list means it parsed and every date is valid.
pub fn review_suggestion(reply: &str) -> Vec<String> {
    let body = strip_fence(reply);

    let records: Vec<ConferenceRecord> = match serde_yaml::from_str(body) {
        Ok(records) => records,
        Err(list_err) => match serde_yaml::from_str::<ConferenceRecord>(body) {
            Ok(record) => vec![record],
            Err(_) => return vec![format!("suggestion is not a valid conference list: {}", list_err)],
        },
    };

    if records.is_empty() {
        return vec![String::from("suggestion contains no conferences")];
    }

    let mut warnings = Vec::new();
    for record in &records {
        if record.deadlines.dated().next().is_none() {
            warnings.push(format!("{}: no dated deadlines found", record.name));
        }
        for (deadline_type, date) in record.deadlines.dated() {
            if parse_date(date).is_err() {
                warnings.push(format!("{}: {} deadline {:?} is not YYYY-MM-DD", record.name, deadline_type, date));
            }
        }
        if let Some(date) = record.conference_date.as_deref().filter(|d| !d.is_empty()) {
            if parse_date(date).is_err() {
                warnings.push(format!("{}: conference_date {:?} is not YYYY-MM-DD", record.name, date));
            }
        }
    }
    warnings
}
