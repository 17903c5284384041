//! Screen flow for the check-in client
//!
//! A reducer over an explicit application state instead of ambient mutable
//! globals: `update` applies one action, `visible_screen` is the pure
//! precedence lookup deciding what is actually presented.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Welcome,
    Login,
    Signup,
    Home,
    Recording,
    Processing,
    Results,
    History,
    Settings,
}

/// Application state carried between screens. Dark mode and the display
/// name are plain pass-through values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub screen: Screen,
    pub authenticated: bool,
    pub dark_mode: bool,
    pub display_name: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: Screen::Welcome,
            authenticated: false,
            dark_mode: false,
            display_name: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Navigate(Screen),
    /// Demo-only login; nothing is persisted.
    LogIn {
        email: String,
    },
    SignUp {
        name: String,
    },
    LogOut,
    ToggleDarkMode,
    StartRecording,
    RecordingComplete,
    RecordingCancelled,
    ProcessingComplete,
    Regenerate,
}

/// Apply one action to the state. Pure and total.
pub fn update(state: AppState, action: AppAction) -> AppState {
    match action {
        AppAction::Navigate(screen) => AppState { screen, ..state },
        AppAction::LogIn { email } => {
            // Display name is the email local part.
            let display_name = email.split('@').next().unwrap_or("").to_string();
            AppState {
                authenticated: true,
                display_name,
                screen: Screen::Home,
                ..state
            }
        }
        AppAction::SignUp { name } => AppState {
            authenticated: true,
            display_name: name,
            screen: Screen::Home,
            ..state
        },
        AppAction::LogOut => AppState {
            authenticated: false,
            display_name: String::new(),
            screen: Screen::Login,
            ..state
        },
        AppAction::ToggleDarkMode => AppState {
            dark_mode: !state.dark_mode,
            ..state
        },
        AppAction::StartRecording => AppState {
            screen: Screen::Recording,
            ..state
        },
        AppAction::RecordingComplete => AppState {
            screen: Screen::Processing,
            ..state
        },
        AppAction::RecordingCancelled => AppState {
            screen: Screen::Home,
            ..state
        },
        AppAction::ProcessingComplete => AppState {
            screen: Screen::Results,
            ..state
        },
        AppAction::Regenerate => AppState {
            screen: Screen::Processing,
            ..state
        },
    }
}

/// Which screen is actually presented, with fixed precedence:
/// the welcome screen always shows itself, and an unauthenticated state
/// maps every other tag to the login screen (signup excepted).
pub fn visible_screen(state: &AppState) -> Screen {
    if state.screen == Screen::Welcome {
        return Screen::Welcome;
    }

    if !state.authenticated {
        return match state.screen {
            Screen::Signup => Screen::Signup,
            _ => Screen::Login,
        };
    }

    state.screen
}
