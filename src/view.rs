pub mod components;
pub mod theme;
pub mod ui;

pub use theme::Theme;
pub use ui::ui;
