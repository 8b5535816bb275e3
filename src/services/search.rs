use nucleo_matcher::{
    pattern::{CaseMatching, Normalization, Pattern},
    Matcher,
};

use crate::data::Listing;

/// Maximum number of autocomplete suggestions shown under the search bar.
pub const MAX_SUGGESTIONS: usize = 5;

/// Rank listing titles by approximate match of the query against
/// title, description, and tags. Best matches first, at most
/// [`MAX_SUGGESTIONS`] results. An empty query yields no suggestions.
pub fn suggest(listings: &[Listing], query: &str) -> Vec<String> {
    if query.is_empty() {
        return Vec::new();
    }

    let mut matcher = Matcher::new(nucleo_matcher::Config::DEFAULT);
    let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);

    // Build list of (title, haystack) for matching
    let haystacks: Vec<(&str, String)> = listings
        .iter()
        .map(|listing| {
            (
                listing.title.as_str(),
                format!(
                    "{} {} {}",
                    listing.title,
                    listing.description,
                    listing.tags.join(" ")
                ),
            )
        })
        .collect();

    let haystack_refs: Vec<&str> = haystacks.iter().map(|(_, s)| s.as_str()).collect();
    let matches = pattern.match_list(&haystack_refs, &mut matcher);

    // match_list returns results sorted by score descending
    matches
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .filter_map(|(haystack, _score)| {
            haystacks
                .iter()
                .find(|(_, s)| s.as_str() == *haystack)
                .map(|(title, _)| (*title).to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(title: &str, description: &str, tags: &[&str]) -> Listing {
        Listing {
            title: title.to_string(),
            description: description.to_string(),
            link: String::new(),
            department: String::new(),
            category: "Health".to_string(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            eligibility: String::new(),
            documents_required: Vec::new(),
            estimated_time: String::new(),
            last_updated: "2025-01-01".to_string(),
            state_specific: false,
        }
    }

    #[test]
    fn empty_query_yields_no_suggestions() {
        let listings = vec![listing("Apply for PAN Card", "Tax identity", &["tax"])];
        assert!(suggest(&listings, "").is_empty());
    }

    #[test]
    fn suggestions_come_back_as_titles() {
        let listings = vec![
            listing("Apply for PAN Card", "Permanent account number", &["tax"]),
            listing("Passport Application", "Travel document", &["travel"]),
        ];
        let suggestions = suggest(&listings, "passport");
        assert_eq!(suggestions, vec!["Passport Application".to_string()]);
    }

    #[test]
    fn tags_and_description_are_searchable() {
        let listings = vec![
            listing("Old Age Assistance", "Monthly support", &["pension"]),
            listing("Driving Licence Renewal", "Renew licence", &["transport"]),
        ];
        let suggestions = suggest(&listings, "pension");
        assert_eq!(suggestions, vec!["Old Age Assistance".to_string()]);
    }

    #[test]
    fn at_most_five_suggestions() {
        let listings: Vec<Listing> = (0..12)
            .map(|i| listing(&format!("Pension Scheme {i}"), "pension", &["pension"]))
            .collect();
        assert_eq!(suggest(&listings, "pension").len(), MAX_SUGGESTIONS);
    }
}
