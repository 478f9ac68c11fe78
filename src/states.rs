//! Two-letter state code to display name mapping.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Code used by the dataset for episodes without a known location.
pub const UNKNOWN_LOCATION: &str = "UL";

/// Codes that are present in the dataset but are not U.S. states.
pub const NON_STATE_CODES: [&str; 2] = ["DC", UNKNOWN_LOCATION];

static STATE_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::with_capacity(52);
    m.insert("AK", "Alaska");
    m.insert("AL", "Alabama");
    m.insert("AR", "Arkansas");
    m.insert("AZ", "Arizona");
    m.insert("CA", "California");
    m.insert("CO", "Colorado");
    m.insert("CT", "Connecticut");
    m.insert("DC", "District of Columbia");
    m.insert("DE", "Delaware");
    m.insert("FL", "Florida");
    m.insert("GA", "Georgia");
    m.insert("HI", "Hawaii");
    m.insert("IA", "Iowa");
    m.insert("ID", "Idaho");
    m.insert("IL", "Illinois");
    m.insert("IN", "Indiana");
    m.insert("KS", "Kansas");
    m.insert("KY", "Kentucky");
    m.insert("LA", "Louisiana");
    m.insert("MA", "Massachusetts");
    m.insert("MD", "Maryland");
    m.insert("ME", "Maine");
    m.insert("MI", "Michigan");
    m.insert("MN", "Minnesota");
    m.insert("MO", "Missouri");
    m.insert("MS", "Mississippi");
    m.insert("MT", "Montana");
    m.insert("NC", "North Carolina");
    m.insert("ND", "North Dakota");
    m.insert("NE", "Nebraska");
    m.insert("NH", "New Hampshire");
    m.insert("NJ", "New Jersey");
    m.insert("NM", "New Mexico");
    m.insert("NV", "Nevada");
    m.insert("NY", "New York");
    m.insert("OH", "Ohio");
    m.insert("OK", "Oklahoma");
    m.insert("OR", "Oregon");
    m.insert("PA", "Pennsylvania");
    m.insert("RI", "Rhode Island");
    m.insert("SC", "South Carolina");
    m.insert("SD", "South Dakota");
    m.insert("TN", "Tennessee");
    m.insert("TX", "Texas");
    m.insert("UT", "Utah");
    m.insert(UNKNOWN_LOCATION, "Unknown Location");
    m.insert("VA", "Virginia");
    m.insert("VT", "Vermont");
    m.insert("WA", "Washington");
    m.insert("WI", "Wisconsin");
    m.insert("WV", "West Virginia");
    m.insert("WY", "Wyoming");
    m
});

/// Resolve the display name for a state code.
///
/// Lookup is exact (the dataset uses upper-case codes). Unknown codes are
/// returned unchanged.
pub fn display_name(code: &str) -> &str {
    STATE_NAMES.get(code).copied().unwrap_or(code)
}

/// Whether `code` counts as a U.S. state for summary statistics.
pub fn is_state(code: &str) -> bool {
    !NON_STATE_CODES.contains(&code)
}
