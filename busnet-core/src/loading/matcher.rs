//! Resolving which stops a route serves.
//!
//! A route serves a stop when its token appears as a whole entry of the
//! stop's comma-joined `routes_served`. Matches are returned in stop table
//! row order, which is also the order transit edges are chained in. Row
//! order is not a guaranteed travel sequence along the route.

use log::warn;
use regex::Regex;

use crate::Stop;

#[derive(Debug, Clone)]
pub struct RouteStopMatcher {
    pattern: Option<Regex>,
}

impl RouteStopMatcher {
    /// Matcher for a normalized route token; an empty token matches nothing
    pub fn new(route_number: &str) -> Self {
        let token = route_number.trim();
        if token.is_empty() {
            return Self { pattern: None };
        }

        let source = format!(r"(?i)(?:^|,)\s*{}\s*(?:,|$)", regex::escape(token));
        let pattern = Regex::new(&source)
            .inspect_err(|e| warn!("Cannot build matcher for route '{token}': {e}"))
            .ok();
        Self { pattern }
    }

    pub fn matches(&self, routes_served: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(routes_served))
    }

    pub fn matching_stops<'a>(&self, stops: &'a [Stop]) -> Vec<&'a Stop> {
        stops
            .iter()
            .filter(|stop| self.matches(&stop.routes_served))
            .collect()
    }
}

/// Stops served by `route_number`, in table row order
pub fn stops_for_route<'a>(route_number: &str, stops: &'a [Stop]) -> Vec<&'a Stop> {
    RouteStopMatcher::new(route_number).matching_stops(stops)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_respects_token_boundaries() {
        assert!(!RouteStopMatcher::new("1").matches("10,12"));
        assert!(RouteStopMatcher::new("10").matches("10,12"));
        assert!(RouteStopMatcher::new("12").matches("10,12"));
        assert!(!RouteStopMatcher::new("0").matches("10,12"));
    }

    #[test]
    fn matching_is_case_insensitive_and_tolerates_spaces() {
        assert!(RouteStopMatcher::new("blue").matches("22, BLUE ,26"));
        assert!(RouteStopMatcher::new("BLUE").matches("blue"));
    }

    #[test]
    fn special_characters_are_literal() {
        assert!(!RouteStopMatcher::new("1.").matches("10,12"));
        assert!(RouteStopMatcher::new("1.").matches("1.,12"));
        assert!(!RouteStopMatcher::new("2+").matches("22"));
    }

    #[test]
    fn empty_route_matches_nothing() {
        let matcher = RouteStopMatcher::new("  ");
        assert!(!matcher.matches(""));
        assert!(!matcher.matches("1,2"));
    }

    #[test]
    fn matches_follow_row_order() {
        let stops = vec![
            Stop::new("c", None, "5"),
            Stop::new("a", None, "4"),
            Stop::new("b", None, "4,5"),
        ];
        let ids: Vec<&str> = stops_for_route("5", &stops)
            .iter()
            .map(|s| s.stop_id.as_str())
            .collect();
        assert_eq!(ids, vec!["c", "b"]);
        assert!(stops_for_route("6", &stops).is_empty());
    }
}
