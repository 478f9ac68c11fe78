use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A single televised episode, exactly as it appears in the raw dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Episode {
    pub season: u32,
    pub episode: u32,
    #[serde(rename = "Date")]
    pub air_date: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
}

/// One state of the raw dataset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawStateEntry {
    #[serde(rename = "state")]
    pub code: String,
    pub cities: Vec<RawCityEntry>,
}

/// A city of the raw dataset.
///
/// On the wire a city is a single-key object `{"<city name>": [episodes]}`.
/// Objects with no key or with more than one key are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCityEntry {
    pub name: String,
    pub episodes: Vec<Episode>,
}

impl<'de> Deserialize<'de> for RawCityEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CityVisitor;

        impl<'de> Visitor<'de> for CityVisitor {
            type Value = RawCityEntry;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object with exactly one city name key")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let (name, episodes) = map
                    .next_entry::<String, Vec<Episode>>()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;

                if let Some(extra) = map.next_key::<String>()? {
                    let _: IgnoredAny = map.next_value()?;
                    return Err(de::Error::custom(format!(
                        "city entry '{}' has an extra key '{}'",
                        name, extra
                    )));
                }

                Ok(RawCityEntry { name, episodes })
            }
        }

        deserializer.deserialize_map(CityVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedCity {
    pub name: String,
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedState {
    pub code: String,
    pub display_name: String,
    pub cities: Vec<NormalizedCity>,
}

impl NormalizedState {
    /// Number of episodes across every city of the state.
    pub fn total_episodes(&self) -> usize {
        self.cities.iter().map(|city| city.episodes.len()).sum()
    }

    /// Lower-cased state code used in navigation paths.
    pub fn path_code(&self) -> String {
        self.code.to_lowercase()
    }
}

/// Parse the raw dataset from JSON text.
pub fn parse_raw(data: &str) -> serde_json::Result<Vec<RawStateEntry>> {
    serde_json::from_str(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn episode_json() -> serde_json::Value {
        json!({
            "Season": 1,
            "Episode": 2,
            "Date": "2019-05-12",
            "Title": "Keeping It Weird",
            "Description": "A couple looks for a bungalow.",
            "City": "Austin",
            "State": "TX"
        })
    }

    #[test]
    fn city_object_becomes_name_and_episodes() {
        let raw = json!([{ "state": "TX", "cities": [{ "Austin": [episode_json()] }] }]);
        let parsed = parse_raw(&raw.to_string()).unwrap();

        assert_eq!(parsed[0].code, "TX");
        assert_eq!(parsed[0].cities[0].name, "Austin");
        assert_eq!(parsed[0].cities[0].episodes[0].title, "Keeping It Weird");
        assert_eq!(parsed[0].cities[0].episodes[0].air_date, "2019-05-12");
    }

    #[test]
    fn city_object_with_two_keys_is_rejected() {
        let raw = json!([{ "state": "TX", "cities": [{ "Austin": [], "Dallas": [] }] }]);
        let err = parse_raw(&raw.to_string()).unwrap_err();
        assert!(err.to_string().contains("extra key"), "{}", err);
    }

    #[test]
    fn empty_city_object_is_rejected() {
        let raw = json!([{ "state": "TX", "cities": [{}] }]);
        assert!(parse_raw(&raw.to_string()).is_err());
    }

    #[test]
    fn non_numeric_season_is_rejected() {
        let mut episode = episode_json();
        episode["Season"] = json!("one");
        let raw = json!([{ "state": "TX", "cities": [{ "Austin": [episode] }] }]);
        assert!(parse_raw(&raw.to_string()).is_err());
    }

    #[test]
    fn missing_location_fields_default_to_empty() {
        let raw = json!([{ "state": "UL", "cities": [{ "Somewhere": [{
            "Season": 3, "Episode": 1, "Date": "2020-01-01", "Title": "Lost"
        }] }] }]);
        let parsed = parse_raw(&raw.to_string()).unwrap();
        let episode = &parsed[0].cities[0].episodes[0];
        assert!(episode.city.is_empty());
        assert!(episode.state.is_empty());
        assert!(episode.description.is_empty());
    }
}
