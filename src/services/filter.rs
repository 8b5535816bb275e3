use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use crate::data::{FilterState, Listing, SortMode};

/// Sort key for listings whose estimated time carries no parseable minute
/// count; places them after every real duration.
const MINUTES_SENTINEL: u32 = u32::MAX;

fn minutes_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+)(?:-(\d+))?\s*min").unwrap())
}

/// Extract the leading minute count from an estimated-time string.
/// "10-15 min" yields 10; text without a `min` marker yields None.
pub fn parse_minutes(estimated_time: &str) -> Option<u32> {
    minutes_pattern()
        .captures(estimated_time)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn parse_date(last_updated: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(last_updated, "%Y-%m-%d").ok()
}

/// The filter predicate: true iff the listing passes every active facet.
pub fn matches(listing: &Listing, filter: &FilterState) -> bool {
    let matches_category = filter
        .category
        .as_deref()
        .is_none_or(|cat| listing.category == cat);

    let query = filter.query.to_lowercase();
    let matches_query = query.is_empty()
        || listing.title.to_lowercase().contains(&query)
        || listing.description.to_lowercase().contains(&query)
        || listing
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&query));

    let matches_state = !filter.state_only || listing.state_specific;

    let matches_department =
        filter.departments.is_empty() || filter.departments.contains(&listing.department);

    let matches_tags = filter.tags.is_empty()
        || filter
            .tags
            .iter()
            .all(|selected| listing.tags.contains(selected));

    matches_category && matches_query && matches_state && matches_department && matches_tags
}

/// Derive the visible view: indices into `listings` that pass the predicate,
/// stably sorted by the selected mode. Recomputed from scratch on every
/// state change.
pub fn apply(listings: &[Listing], filter: &FilterState) -> Vec<usize> {
    let mut indices: Vec<usize> = listings
        .iter()
        .enumerate()
        .filter(|(_, listing)| matches(listing, filter))
        .map(|(idx, _)| idx)
        .collect();

    match filter.sort {
        // Dataset order after filtering.
        SortMode::Relevance => {}
        SortMode::Newest => {
            // Structured date comparison; unparseable dates sort last.
            indices.sort_by_key(|&idx| {
                std::cmp::Reverse(parse_date(&listings[idx].last_updated))
            });
        }
        SortMode::EstimatedTime => {
            indices.sort_by_key(|&idx| {
                parse_minutes(&listings[idx].estimated_time).unwrap_or(MINUTES_SENTINEL)
            });
        }
    }

    indices
}
