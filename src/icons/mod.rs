//! Icons and glyph constants used throughout the UI.

// Selection/Navigation indicators
pub const SELECTOR: &str = "▶ ";

// Cursor
pub const CURSOR: &str = "█";

// Facet choice markers
pub const RADIO_ON: &str = "◉";
pub const RADIO_OFF: &str = "○";
pub const CHECK_ON: &str = "◼";
pub const CHECK_OFF: &str = "◻";

// Listing badges
pub const BOOKMARK_ON: &str = "★";
pub const STATE_BADGE: &str = "◆";
pub const LINK: &str = "↗";

// List/UI elements
pub const BULLET: &str = "•";
pub const SEPARATOR_CHAR: &str = "─";
