pub mod filter;
pub mod prefs;
pub mod search;
pub mod voice;

pub use filter::{apply as apply_filters, matches, parse_minutes};
pub use prefs::{get_prefs_path, PrefsStore};
pub use search::{suggest, MAX_SUGGESTIONS};
pub use voice::{platform_voice, NoVoice, VoiceInput};
