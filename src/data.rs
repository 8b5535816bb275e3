pub mod catalog;
pub mod models;

pub use catalog::{all_departments, all_tags, load_bundled, load_from_path, CATEGORIES};
pub use models::{
    BookmarksTable, FilterState, Listing, PrefsMeta, SortMode, PAGE_SIZE, PREFS_VERSION,
};
