use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, path::PathBuf, time::Duration};

use govtui::services::{platform_voice, PrefsStore};
use govtui::{data, ui, update, App, Command, Message};

/// A TUI for browsing and searching government services
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: (),

    /// Load a dataset file instead of the bundled catalog
    #[arg(long)]
    data: Option<PathBuf>,

    /// Delete the local preference store and exit
    #[arg(long)]
    clear_prefs: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.clear_prefs {
        let prefs_path = govtui::get_prefs_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine preferences path"))?;
        if prefs_path.exists() {
            std::fs::remove_file(&prefs_path)?;
            eprintln!("Preferences cleared: {}", prefs_path.display());
        } else {
            eprintln!("No preferences file found at: {}", prefs_path.display());
        }
        return Ok(());
    }

    let listings = match &cli.data {
        Some(path) => data::load_from_path(path)?,
        None => data::load_bundled()?,
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let prefs = PrefsStore::open_default().ok();
    let mut app = App::new(listings, prefs, platform_voice());

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Check for a voice transcript
        if let Some(transcript) = app.check_voice_result() {
            if let Some(cmd) = update(app, Message::VoiceTranscript(transcript)) {
                if handle_command(app, cmd) {
                    return Ok(());
                }
            }
        }

        // Draw UI
        terminal.draw(|f| ui(f, app))?;

        // Handle input
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(msg) = key_to_message(app, key.code) {
                        if let Some(cmd) = update(app, msg) {
                            if handle_command(app, cmd) {
                                return Ok(());
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Handle a command returned from update
fn handle_command(app: &mut App, cmd: Command) -> bool {
    match cmd {
        Command::Quit => true,
        Command::OpenLink(url) => {
            // Opens in a new browsing context; no availability checking
            if let Err(e) = open::that(&url) {
                app.error = Some(format!("Failed to open {}: {}", url, e));
                app.show_error_popup = true;
            }
            false
        }
        Command::StartVoiceCapture => {
            app.voice_rx = app.voice.start_capture();
            false
        }
    }
}

/// Convert a key press to a message based on current app state
fn key_to_message(app: &App, key: KeyCode) -> Option<Message> {
    // Help popup - any key dismisses
    if app.show_help_popup {
        return Some(Message::DismissHelp);
    }

    // Error popup
    if app.show_error_popup {
        return match key {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Message::DismissError),
            _ => None,
        };
    }

    // Detail overlay
    if app.show_detail_popup {
        return match key {
            KeyCode::Esc | KeyCode::Char('q') => Some(Message::CloseDetail),
            KeyCode::Char('o') | KeyCode::Enter => Some(Message::OpenSelectedLink),
            KeyCode::Char('b') => Some(Message::ToggleBookmark),
            KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                Some(Message::AddListingTag(c as usize - '1' as usize))
            }
            _ => None,
        };
    }

    // Category popup
    if app.show_category_popup {
        return match key {
            KeyCode::Esc | KeyCode::Char('q') => Some(Message::CloseCategoryPopup),
            KeyCode::Char('j') | KeyCode::Down => Some(Message::CategoryNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::CategoryPrevious),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Message::SelectCategory),
            _ => None,
        };
    }

    // Departments popup (typing feeds the filter input)
    if app.show_departments_popup {
        return match key {
            KeyCode::Esc | KeyCode::Enter => Some(Message::CloseDepartmentsPopup),
            KeyCode::Down => Some(Message::DepartmentsNext),
            KeyCode::Up => Some(Message::DepartmentsPrevious),
            KeyCode::Char(' ') => Some(Message::ToggleDepartment),
            KeyCode::Backspace => Some(Message::DepartmentSearchBackspace),
            KeyCode::Char(c) => Some(Message::DepartmentSearchInput(c)),
            _ => None,
        };
    }

    // Tags popup
    if app.show_tags_popup {
        return match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => Some(Message::CloseTagsPopup),
            KeyCode::Char('j') | KeyCode::Down => Some(Message::TagsNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::TagsPrevious),
            KeyCode::Char(' ') => Some(Message::ToggleTag),
            _ => None,
        };
    }

    // Search mode
    if app.search_mode {
        return match key {
            KeyCode::Esc => Some(Message::ExitSearchMode { clear: true }),
            KeyCode::Enter => Some(Message::AcceptSuggestion),
            KeyCode::Backspace => Some(Message::SearchBackspace),
            KeyCode::Down | KeyCode::Tab => Some(Message::SuggestionNext),
            KeyCode::Up | KeyCode::BackTab => Some(Message::SuggestionPrevious),
            KeyCode::Char(c) => Some(Message::SearchInput(c)),
            _ => None,
        };
    }

    // Normal mode
    match key {
        KeyCode::Char('q') => Some(Message::Quit),
        KeyCode::Char('/') => Some(Message::EnterSearchMode),
        KeyCode::Esc => {
            if !app.filter.query.is_empty() {
                Some(Message::ExitSearchMode { clear: true })
            } else {
                None
            }
        }
        KeyCode::Char('j') | KeyCode::Down => Some(Message::NextItem),
        KeyCode::Char('k') | KeyCode::Up => Some(Message::PreviousItem),
        KeyCode::Char('g') => Some(Message::GoToTop),
        KeyCode::Char('G') => Some(Message::GoToBottom),
        KeyCode::Char('m') => Some(Message::LoadMore),
        KeyCode::Enter => Some(Message::OpenDetail),
        KeyCode::Char('o') => Some(Message::OpenSelectedLink),
        KeyCode::Char('b') => Some(Message::ToggleBookmark),
        KeyCode::Char('c') => Some(Message::OpenCategoryPopup),
        KeyCode::Char('d') => Some(Message::OpenDepartmentsPopup),
        KeyCode::Char('a') => Some(Message::OpenTagsPopup),
        KeyCode::Char('x') => Some(Message::ToggleStateOnly),
        KeyCode::Char('s') => Some(Message::CycleSort),
        KeyCode::Char('C') => Some(Message::ClearFilters),
        KeyCode::Char('t') => Some(Message::ToggleTheme),
        KeyCode::Char('v') => Some(Message::StartVoice),
        KeyCode::Char('?') => Some(Message::ToggleHelp),
        _ => None,
    }
}
