use anyhow::Result;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

use househunt_lookup::generator;
use househunt_lookup::model::parse_raw;
use househunt_lookup::Catalog;

fn catalog() -> Result<Catalog> {
    let raw = json!([
        {
            "state": "OR",
            "cities": [
                { "Portland": [
                    {
                        "Season": 5,
                        "Episode": 11,
                        "Date": "2017-09-14",
                        "Title": "Bridges & Bungalows",
                        "Description": "A chef looks for a craftsman near food carts.",
                        "City": "Portland",
                        "State": "OR"
                    }
                ] },
                { "Lake Oswego": [
                    {
                        "Season": 6,
                        "Episode": 2,
                        "Date": "2018-03-03",
                        "Title": "Lakeside Living",
                        "Description": "A family wants lake access.",
                        "City": "Lake Oswego",
                        "State": "OR"
                    }
                ] }
            ]
        },
        { "state": "UL", "cities": [ { "Unknown": [
            { "Season": 1, "Episode": 1, "Date": "not a date", "Title": "Mystery Move" }
        ] } ] }
    ]);
    Ok(Catalog::from_raw(&parse_raw(&raw.to_string())?))
}

#[test]
fn test_generates_index_and_state_pages() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let out = temp_dir.path().join("dist");

    let written = generator::generate_site(&catalog()?, &out, 8)?;
    assert_eq!(written, 2);

    assert!(out.join("index.html").exists());
    assert!(out.join("states/or/index.html").exists());
    assert!(out.join("states/ul/index.html").exists());
    assert!(out.join("assets/css/main.css").exists());
    assert!(out.join("assets/js/search.js").exists());

    Ok(())
}

#[test]
fn test_index_page_shows_stats_and_states() -> Result<()> {
    let temp_dir = TempDir::new()?;
    generator::generate_site(&catalog()?, temp_dir.path(), 8)?;

    let index = fs::read_to_string(temp_dir.path().join("index.html"))?;
    assert!(index.contains("Oregon"));
    assert!(index.contains("2 episodes"));
    assert!(index.contains("data-limit=\"8\""));
    // UL is not counted as a state
    assert!(index.contains("<div class=\"stat-value\">1</div>"));
    assert!(index.contains("<div class=\"stat-value\">3</div>"));

    Ok(())
}

#[test]
fn test_state_page_has_city_anchors_and_escaped_text() -> Result<()> {
    let temp_dir = TempDir::new()?;
    generator::generate_site(&catalog()?, temp_dir.path(), 8)?;

    let page = fs::read_to_string(temp_dir.path().join("states/or/index.html"))?;
    assert!(page.contains("id=\"lake-oswego\""));
    assert!(page.contains("id=\"portland\""));
    assert!(page.contains("S5 E11"));
    assert!(page.contains("September 14, 2017"));
    assert!(page.contains("Bridges &amp; Bungalows"));
    assert!(page.contains("2 Cities"));

    // cities are listed alphabetically
    let lake = page.find("id=\"lake-oswego\"").unwrap();
    let portland = page.find("id=\"portland\"").unwrap();
    assert!(lake < portland);

    let unknown = fs::read_to_string(temp_dir.path().join("states/ul/index.html"))?;
    assert!(unknown.contains("Unknown Location"));
    assert!(unknown.contains("not a date"));
    assert!(!unknown.contains("episode-location"));

    Ok(())
}
