pub mod app;
pub mod data;
pub mod icons;
pub mod services;
pub mod view;

pub use app::{update, App, Command, Message};
pub use data::{FilterState, Listing, SortMode};
pub use services::prefs::get_prefs_path;
pub use view::ui;
