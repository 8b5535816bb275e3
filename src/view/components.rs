pub mod popups;
pub mod search;
pub mod sidebar;
pub mod table;

pub use popups::{
    centered_rect, render_category_popup, render_departments_popup, render_detail_popup,
    render_error_popup, render_help_popup, render_tags_popup, truncate_string,
};
pub use search::{render_search_bar, render_suggestions};
pub use sidebar::render_sidebar;
pub use table::{render_footer, render_results_header, render_table};
