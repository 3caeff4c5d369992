//! Free-text route and remarks parsing.
//!
//! Routes are whitespace-separated tokens such as
//! `"BPK Q295 BRAIN UN546 DEVOL NATA 55N020W"`. Airway identifiers share their
//! lexical shape with airport codes and waypoint names, so a token only counts
//! as an airway when the [`AirwayCatalog`] knows it.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::AirwayCatalog;

/// One uppercase letter followed by 2–5 uppercase letters or digits.
static AIRWAY_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9]{2,5}$").expect("airway token pattern"));

static REGISTRATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)REG/([A-Z0-9-]+)").expect("registration pattern"));

/// True when `token` has the lexical shape of an airway identifier.
pub fn is_airway_token(token: &str) -> bool {
    AIRWAY_TOKEN.is_match(token)
}

/// Airways referenced by `route`, left to right, restricted to the catalog.
///
/// Repeated airways are reported once per occurrence.
pub fn extract_airways(route: &str, catalog: &AirwayCatalog) -> Vec<String> {
    route
        .split_whitespace()
        .filter(|token| is_airway_token(token) && catalog.contains(token))
        .map(str::to_string)
        .collect()
}

/// Tokens immediately around an airway in a route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteContext {
    pub before: Option<String>,
    pub after: Option<String>,
}

/// Locate the first occurrence of `airway` in the uppercased route and return
/// its neighbouring tokens.
pub fn context_waypoints(route: &str, airway: &str) -> RouteContext {
    if route.is_empty() || airway.is_empty() {
        return RouteContext::default();
    }
    let upper = route.to_uppercase();
    let tokens: Vec<&str> = upper.split_whitespace().collect();
    let Some(idx) = tokens.iter().position(|t| *t == airway) else {
        return RouteContext::default();
    };
    RouteContext {
        before: idx
            .checked_sub(1)
            .and_then(|i| tokens.get(i))
            .map(|t| t.to_string()),
        after: tokens.get(idx + 1).map(|t| t.to_string()),
    }
}

/// Aircraft registration from `REG/<token>` in flight-plan remarks, uppercased.
/// Empty when absent.
pub fn extract_registration(remarks: &str) -> String {
    REGISTRATION
        .captures(remarks)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_uppercase())
        .unwrap_or_default()
}
