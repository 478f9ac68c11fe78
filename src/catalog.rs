use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::indexer;
use crate::model::{self, Episode, NormalizedState, RawStateEntry};
use crate::normalizer;
use crate::search::SearchEngine;
use crate::states;

/// Summary counts shown on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub states_with_episodes: usize,
    pub cities_featured: usize,
    pub total_episodes: usize,
}

/// The normalized model and search index derived from one raw snapshot.
#[derive(Debug, Clone)]
pub struct Catalog {
    states: Vec<NormalizedState>,
    engine: SearchEngine,
}

impl Catalog {
    pub fn from_raw(raw: &[RawStateEntry]) -> Self {
        let states = normalizer::normalize(raw);
        let engine = SearchEngine::new(indexer::build_index(&states));
        Self { states, engine }
    }

    /// Read and parse the raw dataset file. Any failure fails the whole load.
    pub async fn load(data_path: &Path) -> Result<Self> {
        tracing::info!("Reading episodes from {}", data_path.display());

        let data = tokio::fs::read_to_string(data_path)
            .await
            .with_context(|| format!("Failed to read {}", data_path.display()))?;
        let raw = model::parse_raw(&data)
            .with_context(|| format!("Failed to parse {}", data_path.display()))?;

        let catalog = Self::from_raw(&raw);
        tracing::info!(
            "Loaded {} states, {} search entries",
            catalog.states.len(),
            catalog.engine.len()
        );

        Ok(catalog)
    }

    pub fn states(&self) -> &[NormalizedState] {
        &self.states
    }

    pub fn search_engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Find a state by code, ignoring case. Hyphens in `code` stand for spaces.
    pub fn state(&self, code: &str) -> Option<&NormalizedState> {
        let wanted = code.replace('-', " ").to_lowercase();
        self.states
            .iter()
            .find(|state| state.code.to_lowercase() == wanted)
    }

    pub fn all_episodes(&self) -> Vec<&Episode> {
        self.states
            .iter()
            .flat_map(|state| state.cities.iter())
            .flat_map(|city| city.episodes.iter())
            .collect()
    }

    /// Path segments for every state page.
    pub fn state_paths(&self) -> Vec<String> {
        self.states.iter().map(|state| state.path_code()).collect()
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            states_with_episodes: self
                .states
                .iter()
                .filter(|state| states::is_state(&state.code))
                .count(),
            cities_featured: self.states.iter().map(|state| state.cities.len()).sum(),
            total_episodes: self.states.iter().map(|state| state.total_episodes()).sum(),
        }
    }

    /// States with at least one episode, most episodes first.
    pub fn states_by_episode_count(&self) -> Vec<&NormalizedState> {
        let mut listed: Vec<&NormalizedState> = self
            .states
            .iter()
            .filter(|state| state.total_episodes() > 0)
            .collect();
        listed.sort_by(|a, b| b.total_episodes().cmp(&a.total_episodes()));
        listed
    }
}

/// Holds the catalog for one data file, loaded at most once.
///
/// Concurrent callers wait for the first load and then share the same
/// catalog. A failed load leaves the cache empty so the next call retries.
#[derive(Debug)]
pub struct CatalogCache {
    data_path: PathBuf,
    cell: OnceCell<Arc<Catalog>>,
}

impl CatalogCache {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            cell: OnceCell::new(),
        }
    }

    /// A cache that is already populated.
    pub fn with_catalog(data_path: impl Into<PathBuf>, catalog: Catalog) -> Self {
        Self {
            data_path: data_path.into(),
            cell: OnceCell::new_with(Some(Arc::new(catalog))),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub async fn get(&self) -> Result<Arc<Catalog>> {
        let catalog = self
            .cell
            .get_or_try_init(|| async { Catalog::load(&self.data_path).await.map(Arc::new) })
            .await?;
        Ok(Arc::clone(catalog))
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}
