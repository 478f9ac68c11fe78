use askama::Template;
use chrono::{DateTime, NaiveDate};
use std::cmp::Ordering;

use crate::catalog::{Catalog, CatalogStats};
use crate::indexer::city_slug;
use crate::model::{Episode, NormalizedCity, NormalizedState};
use crate::search::collate;

const DESCRIPTION_LIMIT: usize = 120;

#[derive(Template)]
#[template(path = "base.html")]
pub struct BaseTemplate<'a> {
    pub title: &'a str,
    pub content: String,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub stats: CatalogStats,
    pub states: Vec<StateListItem>,
    pub search_limit: usize,
}

#[derive(Debug, Clone)]
pub struct StateListItem {
    pub name: String,
    pub url: String,
    pub episode_label: String,
    pub density: &'static str,
}

#[derive(Template)]
#[template(path = "state.html")]
pub struct StateTemplate {
    pub name: String,
    pub city_label: String,
    pub episode_label: String,
    pub cities: Vec<CityView>,
}

#[derive(Debug, Clone)]
pub struct CityView {
    pub name: String,
    pub anchor: String,
    pub episode_label: String,
    pub episodes: Vec<EpisodeCard>,
}

#[derive(Debug, Clone)]
pub struct EpisodeCard {
    pub title: String,
    pub label: String,
    pub air_date: String,
    pub description: String,
    /// Empty when the episode has neither city nor state.
    pub location: String,
}

impl IndexTemplate {
    pub fn from_catalog(catalog: &Catalog, search_limit: usize) -> Self {
        let states = catalog
            .states_by_episode_count()
            .into_iter()
            .map(|state| {
                let total = state.total_episodes();
                StateListItem {
                    name: state.display_name.clone(),
                    url: format!("/states/{}/", state.path_code()),
                    episode_label: pluralize(total, "episode", "episodes"),
                    density: density_bucket(total),
                }
            })
            .collect();

        Self {
            stats: catalog.stats(),
            states,
            search_limit,
        }
    }
}

impl StateTemplate {
    pub fn from_state(state: &NormalizedState) -> Self {
        let mut cities: Vec<&NormalizedCity> = state.cities.iter().collect();
        cities.sort_by(|a, b| collate(&a.name, &b.name));

        Self {
            name: state.display_name.clone(),
            city_label: pluralize(state.cities.len(), "City", "Cities"),
            episode_label: pluralize(state.total_episodes(), "Episode", "Episodes"),
            cities: cities.into_iter().map(CityView::from_city).collect(),
        }
    }
}

impl CityView {
    fn from_city(city: &NormalizedCity) -> Self {
        let mut episodes: Vec<&Episode> = city.episodes.iter().collect();
        episodes.sort_by(|a, b| newest_first(&a.air_date, &b.air_date));

        Self {
            name: city.name.clone(),
            anchor: city_slug(&city.name),
            episode_label: pluralize(city.episodes.len(), "episode", "episodes"),
            episodes: episodes.into_iter().map(EpisodeCard::from_episode).collect(),
        }
    }
}

impl EpisodeCard {
    fn from_episode(episode: &Episode) -> Self {
        Self {
            title: episode.title.clone(),
            label: format!("S{} E{}", episode.season, episode.episode),
            air_date: format_air_date(&episode.air_date),
            description: truncate_description(&episode.description),
            location: location_line(&episode.city, &episode.state).unwrap_or_default(),
        }
    }
}

/// Shade class for a state by episode count.
pub fn density_bucket(episodes: usize) -> &'static str {
    match episodes {
        0 => "none",
        1..=2 => "low",
        3..=5 => "medium",
        6..=10 => "high",
        _ => "very-high",
    }
}

pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Shorten a description to whole sentences that fit the card.
///
/// Falls back to a hard cut when even the first sentence is too long.
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() <= DESCRIPTION_LIMIT {
        return description.to_string();
    }

    let mut kept = String::new();
    for sentence in description.split(". ") {
        let candidate = if kept.is_empty() {
            sentence.to_string()
        } else {
            format!("{}. {}", kept, sentence)
        };
        if candidate.chars().count() > DESCRIPTION_LIMIT {
            break;
        }
        kept = candidate;
    }

    if kept.is_empty() {
        let cut: String = description.chars().take(DESCRIPTION_LIMIT).collect();
        format!("{}...", cut)
    } else {
        format!("{}...", kept)
    }
}

pub fn parse_air_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m/%d/%Y"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// `May 12, 2019` when the date parses, the raw text otherwise.
pub fn format_air_date(raw: &str) -> String {
    match parse_air_date(raw) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Newest first; unparseable dates sort last.
fn newest_first(a: &str, b: &str) -> Ordering {
    match (parse_air_date(a), parse_air_date(b)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn location_line(city: &str, state: &str) -> Option<String> {
    match (city.is_empty(), state.is_empty()) {
        (false, false) => Some(format!("{}, {}", city, state)),
        (true, false) => Some(state.to_string()),
        (false, true) => Some(city.to_string()),
        (true, true) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(title: &str, air_date: &str) -> Episode {
        Episode {
            season: 2,
            episode: 7,
            air_date: air_date.to_string(),
            title: title.to_string(),
            description: String::new(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
        }
    }

    #[test]
    fn density_buckets() {
        assert_eq!(density_bucket(0), "none");
        assert_eq!(density_bucket(2), "low");
        assert_eq!(density_bucket(3), "medium");
        assert_eq!(density_bucket(10), "high");
        assert_eq!(density_bucket(11), "very-high");
    }

    #[test]
    fn short_description_is_untouched() {
        assert_eq!(truncate_description("A small house."), "A small house.");
    }

    #[test]
    fn long_description_keeps_whole_sentences() {
        let first = "A young couple leaves the city for a quiet town";
        let second = "They want a yard for their dog and room for a workshop";
        let third = "Their budget is tight and the market is hot, so compromises are coming";
        let text = format!("{}. {}. {}.", first, second, third);

        assert_eq!(
            truncate_description(&text),
            format!("{}. {}...", first, second)
        );
    }

    #[test]
    fn long_first_sentence_is_cut() {
        let text = "x".repeat(200);
        let truncated = truncate_description(&text);
        assert_eq!(truncated.chars().count(), DESCRIPTION_LIMIT + 3);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn air_dates_render_long_form() {
        assert_eq!(format_air_date("2019-05-02"), "May 2, 2019");
        assert_eq!(format_air_date("12/25/2020"), "December 25, 2020");
        assert_eq!(format_air_date("sometime"), "sometime");
    }

    #[test]
    fn location_line_uses_available_parts() {
        assert_eq!(location_line("Austin", "TX").as_deref(), Some("Austin, TX"));
        assert_eq!(location_line("", "TX").as_deref(), Some("TX"));
        assert_eq!(location_line("Austin", "").as_deref(), Some("Austin"));
        assert_eq!(location_line("", ""), None);
    }

    #[test]
    fn state_page_sorts_cities_and_episodes() {
        let state = NormalizedState {
            code: "TX".to_string(),
            display_name: "Texas".to_string(),
            cities: vec![
                NormalizedCity {
                    name: "Waco".to_string(),
                    episodes: vec![episode("Old", "2010-01-01"), episode("Undated", "n/a")],
                },
                NormalizedCity {
                    name: "El Paso".to_string(),
                    episodes: vec![episode("Older", "2011-01-01"), episode("Newer", "2021-06-01")],
                },
            ],
        };

        let page = StateTemplate::from_state(&state);
        assert_eq!(page.city_label, "2 Cities");
        assert_eq!(page.episode_label, "4 Episodes");
        assert_eq!(page.cities[0].name, "El Paso");
        assert_eq!(page.cities[0].anchor, "el-paso");
        assert_eq!(page.cities[0].episodes[0].title, "Newer");
        assert_eq!(page.cities[0].episodes[0].label, "S2 E7");
        assert_eq!(page.cities[1].episodes[1].title, "Undated");
        // source order is untouched
        assert_eq!(state.cities[0].name, "Waco");
    }
}
