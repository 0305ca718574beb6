//! Top-level navigation.

use serde::{Deserialize, Serialize};

/// The screen currently shown by the UI shell.
///
/// Exactly one screen is active at a time; the scanner state machine is
/// told about visibility changes so the camera pipeline pauses off-screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Live camera scanning.
    Scanner,
    /// Code generation workflow.
    Generator,
    /// Scan history list.
    History,
    /// Saved/favorite codes list.
    Favorites,
}

impl Screen {
    /// All screens, in navigation-bar order.
    pub const ALL: &'static [Screen] = &[
        Screen::Scanner,
        Screen::Generator,
        Screen::History,
        Screen::Favorites,
    ];

    /// Title shown in the navigation bar.
    pub const fn title(&self) -> &'static str {
        match self {
            Screen::Scanner => "Scan",
            Screen::Generator => "Create",
            Screen::History => "History",
            Screen::Favorites => "Favorites",
        }
    }
}
