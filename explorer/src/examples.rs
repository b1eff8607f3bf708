// SPDX-License-Identifier: AGPL-3.0-or-later

//! Example queries bundled with the explorer.
//!
//! Services point at one of the query sets through their `queries` key. All query texts are
//! compiled into the binary.

/// Named example query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Example {
    /// Name shown in the examples menu.
    pub name: &'static str,

    /// GraphQL query text.
    pub query: &'static str,
}

/// Key of the journey planner query set.
pub const JOURNEY_PLANNER: &str = "journey-planner";

/// Key of the stop places query set.
pub const STOP_PLACES: &str = "stop-places";

const JOURNEY_PLANNER_EXAMPLES: &[Example] = &[
    Example {
        name: "trip",
        query: include_str!("../queries/journey-planner/trip.graphql"),
    },
    Example {
        name: "stopPlace",
        query: include_str!("../queries/journey-planner/stopPlace.graphql"),
    },
    Example {
        name: "nearest",
        query: include_str!("../queries/journey-planner/nearest.graphql"),
    },
    Example {
        name: "lines",
        query: include_str!("../queries/journey-planner/lines.graphql"),
    },
    Example {
        name: "situations",
        query: include_str!("../queries/journey-planner/situations.graphql"),
    },
];

const STOP_PLACES_EXAMPLES: &[Example] = &[
    Example {
        name: "stopPlace",
        query: include_str!("../queries/stop-places/stopPlace.graphql"),
    },
    Example {
        name: "topographicPlace",
        query: include_str!("../queries/stop-places/topographicPlace.graphql"),
    },
    Example {
        name: "parking",
        query: include_str!("../queries/stop-places/parking.graphql"),
    },
    Example {
        name: "tariffZones",
        query: include_str!("../queries/stop-places/tariffZones.graphql"),
    },
];

/// Returns all examples of a query set, `None` for unknown sets.
pub fn examples(query_set: &str) -> Option<&'static [Example]> {
    match query_set {
        JOURNEY_PLANNER => Some(JOURNEY_PLANNER_EXAMPLES),
        STOP_PLACES => Some(STOP_PLACES_EXAMPLES),
        _ => None,
    }
}

/// Returns the query text of one example.
pub fn example(query_set: &str, name: &str) -> Option<&'static str> {
    examples(query_set)?
        .iter()
        .find(|example| example.name == name)
        .map(|example| example.query)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{example, examples, JOURNEY_PLANNER, STOP_PLACES};

    #[rstest]
    #[case(JOURNEY_PLANNER, 5)]
    #[case(STOP_PLACES, 4)]
    fn bundles_query_sets(#[case] query_set: &str, #[case] count: usize) {
        let examples = examples(query_set).unwrap();
        assert_eq!(examples.len(), count);

        for example in examples {
            assert!(!example.query.trim().is_empty(), "{} is empty", example.name);
        }
    }

    #[test]
    fn returns_literal_query_text() {
        assert_eq!(
            example(STOP_PLACES, "stopPlace"),
            Some(include_str!("../queries/stop-places/stopPlace.graphql"))
        );

        // Same name in another set resolves to that set's text
        assert_ne!(
            example(JOURNEY_PLANNER, "stopPlace"),
            example(STOP_PLACES, "stopPlace")
        );
    }

    #[test]
    fn unknown_sets_and_names() {
        assert!(examples("timetables").is_none());
        assert!(example("timetables", "trip").is_none());
        assert!(example(JOURNEY_PLANNER, "parking").is_none());
    }
}
