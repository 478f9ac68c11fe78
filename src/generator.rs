use anyhow::{Context, Result};
use askama::Template;
use rayon::prelude::*;
use std::fs;
use std::path::Path;

use crate::catalog::Catalog;
use crate::model::NormalizedState;

use super::templates::*;

const MAIN_CSS: &str = include_str!("../static/main.css");
const SEARCH_JS: &str = include_str!("../static/search.js");

/// Render the catalog as a static site under `output_dir`.
///
/// Writes `index.html`, one `states/<code>/index.html` per state and the
/// shared assets. Returns the number of state pages written.
pub fn generate_site(catalog: &Catalog, output_dir: &Path, search_limit: usize) -> Result<usize> {
    tracing::info!("📦 Generating site in {}", output_dir.display());

    fs::create_dir_all(output_dir.join("states"))
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    fs::create_dir_all(output_dir.join("assets/css"))?;
    fs::create_dir_all(output_dir.join("assets/js"))?;

    let written = catalog
        .states()
        .par_iter()
        .filter_map(|state| match write_state_page(state, output_dir) {
            Ok(()) => Some(()),
            Err(e) => {
                tracing::warn!("Failed to write page for {}: {:#}", state.code, e);
                None
            }
        })
        .count();

    let index_content = IndexTemplate::from_catalog(catalog, search_limit).render()?;
    let index_page = BaseTemplate {
        title: "Home",
        content: index_content,
    }
    .render()?;
    fs::write(output_dir.join("index.html"), index_page).context("Failed to write index.html")?;

    copy_static_assets(output_dir)?;

    tracing::info!(
        "✅ Generated {}/{} state pages",
        written,
        catalog.states().len()
    );

    Ok(written)
}

fn write_state_page(state: &NormalizedState, output_dir: &Path) -> Result<()> {
    let content = StateTemplate::from_state(state).render()?;
    let page = BaseTemplate {
        title: &state.display_name,
        content,
    }
    .render()?;

    let state_dir = output_dir.join("states").join(state.path_code());
    fs::create_dir_all(&state_dir)?;
    fs::write(state_dir.join("index.html"), page)?;

    tracing::debug!("Wrote {}", state_dir.display());
    Ok(())
}

fn copy_static_assets(output_dir: &Path) -> Result<()> {
    fs::write(output_dir.join("assets/css/main.css"), MAIN_CSS)?;
    fs::write(output_dir.join("assets/js/search.js"), SEARCH_JS)?;
    tracing::debug!("Static assets copied");
    Ok(())
}
