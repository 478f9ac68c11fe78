use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::model::{Episode, NormalizedState};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    State,
    City,
}

/// A single searchable unit: a state or a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "state", skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
    #[serde(rename = "path")]
    pub navigation_path: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub episodes: Vec<Episode>,
}

/// Fragment identifier for a city section on its state page.
pub fn city_slug(name: &str) -> String {
    WHITESPACE_RUN.replace_all(&name.to_lowercase(), "-").into_owned()
}

pub fn state_path(state: &NormalizedState) -> String {
    format!("/states/{}", state.path_code())
}

/// Build the flat search index.
///
/// All state entries come first, then every city grouped by state.
pub fn build_index(states: &[NormalizedState]) -> Vec<SearchEntry> {
    let city_count: usize = states.iter().map(|s| s.cities.len()).sum();
    let mut entries = Vec::with_capacity(states.len() + city_count);

    for state in states {
        entries.push(SearchEntry {
            kind: EntryKind::State,
            display_name: state.display_name.clone(),
            state_code: None,
            navigation_path: state_path(state),
            episodes: Vec::new(),
        });
    }

    for state in states {
        let base = state_path(state);
        for city in &state.cities {
            entries.push(SearchEntry {
                kind: EntryKind::City,
                display_name: format!("{}, {}", city.name, state.display_name),
                state_code: Some(state.code.clone()),
                navigation_path: format!("{}#{}", base, city_slug(&city.name)),
                episodes: city.episodes.clone(),
            });
        }
    }

    tracing::debug!(
        "Built search index with {} states and {} cities",
        states.len(),
        city_count
    );

    entries
}
