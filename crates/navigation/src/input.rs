//! Input adapter: the triggers that can request navigation.

use shared::domain::SectionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Next,
    Previous,
    First,
    Last,
}

impl NavKey {
    /// Maps DOM-style key names (`ArrowRight`, `Home`, ...).
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowRight" | "ArrowDown" => Some(NavKey::Next),
            "ArrowLeft" | "ArrowUp" => Some(NavKey::Previous),
            "Home" => Some(NavKey::First),
            "End" => Some(NavKey::Last),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationInput {
    /// Menu link carrying a target section.
    Link(SectionId),
    /// In-content button carrying a target section.
    Button(SectionId),
    Key(NavKey),
    HistoryBack,
    HistoryForward,
    /// History pop delivered with (or without) a section.
    HistoryPop(Option<SectionId>),
}

impl NavigationInput {
    pub fn kind(&self) -> &'static str {
        match self {
            NavigationInput::Link(_) => "link",
            NavigationInput::Button(_) => "button",
            NavigationInput::Key(_) => "key",
            NavigationInput::HistoryBack => "history_back",
            NavigationInput::HistoryForward => "history_forward",
            NavigationInput::HistoryPop(_) => "history_pop",
        }
    }
}
