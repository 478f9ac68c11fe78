use crate::model::{NormalizedCity, NormalizedState, RawStateEntry};
use crate::states;

/// Reshape the raw dataset into the normalized model.
///
/// State and city order is preserved and episodes are carried over verbatim.
pub fn normalize(raw: &[RawStateEntry]) -> Vec<NormalizedState> {
    raw.iter()
        .map(|state| NormalizedState {
            code: state.code.clone(),
            display_name: states::display_name(&state.code).to_string(),
            cities: state
                .cities
                .iter()
                .map(|city| NormalizedCity {
                    name: city.name.clone(),
                    episodes: city.episodes.clone(),
                })
                .collect(),
        })
        .collect()
}
