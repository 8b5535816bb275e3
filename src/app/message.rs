/// Command to be executed by the main loop after update
pub enum Command {
    Quit,
    OpenLink(String),
    StartVoiceCapture,
}

/// All possible messages/events in the application
pub enum Message {
    // Navigation
    NextItem,
    PreviousItem,
    GoToTop,
    GoToBottom,
    LoadMore,

    // Search box
    EnterSearchMode,
    ExitSearchMode { clear: bool },
    SearchInput(char),
    SearchBackspace,
    SuggestionNext,
    SuggestionPrevious,
    AcceptSuggestion,
    StartVoice,
    VoiceTranscript(String),

    // Facets
    CycleSort,
    ToggleStateOnly,
    ClearFilters,
    OpenCategoryPopup,
    CloseCategoryPopup,
    CategoryNext,
    CategoryPrevious,
    SelectCategory,
    OpenDepartmentsPopup,
    CloseDepartmentsPopup,
    DepartmentsNext,
    DepartmentsPrevious,
    ToggleDepartment,
    DepartmentSearchInput(char),
    DepartmentSearchBackspace,
    OpenTagsPopup,
    CloseTagsPopup,
    TagsNext,
    TagsPrevious,
    ToggleTag,

    // Listing actions
    OpenDetail,
    CloseDetail,
    OpenSelectedLink,
    ToggleBookmark,
    /// Tag-click shortcut: add the Nth tag of the open listing to the filter.
    AddListingTag(usize),

    // Popups / theme
    ToggleTheme,
    ToggleHelp,
    DismissHelp,
    DismissError,

    // System
    Quit,
}
