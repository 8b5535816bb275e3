use anyhow::{Context, Result};
use std::path::Path;

use super::models::Listing;

/// The fixed category set. Listings never carry a category outside this list.
pub const CATEGORIES: &[&str] = &[
    "Agriculture",
    "Education",
    "Employment",
    "Health",
    "Identity Documents",
    "Pension & Welfare",
    "Taxation",
    "Transport",
    "Utilities",
];

const BUNDLED_DATASET: &str = include_str!("../../data/services.json");

/// Deserialize the dataset bundled into the binary at build time.
pub fn load_bundled() -> Result<Vec<Listing>> {
    serde_json::from_str(BUNDLED_DATASET).context("Bundled dataset is malformed")
}

/// Load a replacement dataset from disk (the `--data` flag).
pub fn load_from_path(path: &Path) -> Result<Vec<Listing>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse dataset: {}", path.display()))
}

/// Unique departments across the catalog, in alphabetical order.
pub fn all_departments(listings: &[Listing]) -> Vec<String> {
    let mut departments: Vec<String> = listings.iter().map(|l| l.department.clone()).collect();
    departments.sort();
    departments.dedup();
    departments
}

/// Unique tags across the catalog, in alphabetical order.
pub fn all_tags(listings: &[Listing]) -> Vec<String> {
    let mut tags: Vec<String> = listings
        .iter()
        .flat_map(|l| l.tags.iter().cloned())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_dataset_parses() {
        let listings = load_bundled().unwrap();
        assert!(!listings.is_empty());
    }

    #[test]
    fn bundled_titles_are_unique() {
        let listings = load_bundled().unwrap();
        let mut titles: Vec<&str> = listings.iter().map(|l| l.title.as_str()).collect();
        let before = titles.len();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), before);
    }

    #[test]
    fn bundled_categories_are_in_the_fixed_set() {
        let listings = load_bundled().unwrap();
        for listing in &listings {
            assert!(
                CATEGORIES.contains(&listing.category.as_str()),
                "unknown category: {}",
                listing.category
            );
        }
    }

    #[test]
    fn departments_are_sorted_and_deduped() {
        let listings = load_bundled().unwrap();
        let departments = all_departments(&listings);
        let mut expected = departments.clone();
        expected.sort();
        expected.dedup();
        assert_eq!(departments, expected);
    }

    #[test]
    fn tags_are_sorted_and_deduped() {
        let listings = load_bundled().unwrap();
        let tags = all_tags(&listings);
        assert!(tags.windows(2).all(|w| w[0] < w[1]));
    }
}
