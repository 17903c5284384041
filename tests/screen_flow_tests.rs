// Tests for the screen flow reducer and the visible-screen precedence.

use voice_checkin::{update, visible_screen, AppAction, AppState, Screen};

#[test]
fn test_default_state_shows_welcome() {
    let state = AppState::default();
    assert_eq!(visible_screen(&state), Screen::Welcome);
    assert!(!state.authenticated);
}

#[test]
fn test_unauthenticated_requests_map_to_login() {
    let state = AppState::default();

    for requested in [
        Screen::Home,
        Screen::Recording,
        Screen::Processing,
        Screen::Results,
        Screen::History,
        Screen::Settings,
        Screen::Login,
    ] {
        let state = update(state.clone(), AppAction::Navigate(requested));
        assert_eq!(
            visible_screen(&state),
            Screen::Login,
            "requested {requested:?}"
        );
    }
}

#[test]
fn test_unauthenticated_signup_is_reachable() {
    let state = update(AppState::default(), AppAction::Navigate(Screen::Signup));
    assert_eq!(visible_screen(&state), Screen::Signup);
}

#[test]
fn test_welcome_always_shows_itself() {
    let mut state = update(
        AppState::default(),
        AppAction::LogIn {
            email: "casey@example.com".to_string(),
        },
    );
    state = update(state, AppAction::Navigate(Screen::Welcome));
    assert_eq!(visible_screen(&state), Screen::Welcome);
}

#[test]
fn test_login_derives_display_name_from_email_local_part() {
    let state = update(
        AppState::default(),
        AppAction::LogIn {
            email: "casey@example.com".to_string(),
        },
    );

    assert!(state.authenticated);
    assert_eq!(state.display_name, "casey");
    assert_eq!(state.screen, Screen::Home);
    assert_eq!(visible_screen(&state), Screen::Home);
}

#[test]
fn test_signup_uses_provided_name() {
    let state = update(
        AppState::default(),
        AppAction::SignUp {
            name: "Casey".to_string(),
        },
    );

    assert!(state.authenticated);
    assert_eq!(state.display_name, "Casey");
    assert_eq!(visible_screen(&state), Screen::Home);
}

#[test]
fn test_logout_clears_name_and_returns_to_login() {
    let mut state = update(
        AppState::default(),
        AppAction::LogIn {
            email: "casey@example.com".to_string(),
        },
    );
    state = update(state, AppAction::LogOut);

    assert!(!state.authenticated);
    assert!(state.display_name.is_empty());
    assert_eq!(visible_screen(&state), Screen::Login);
}

#[test]
fn test_dark_mode_is_a_passthrough_toggle() {
    let state = AppState::default();
    let state = update(state, AppAction::ToggleDarkMode);
    assert!(state.dark_mode);
    let state = update(state, AppAction::ToggleDarkMode);
    assert!(!state.dark_mode);
}

#[test]
fn test_check_in_happy_path() {
    let mut state = update(
        AppState::default(),
        AppAction::LogIn {
            email: "casey@example.com".to_string(),
        },
    );

    state = update(state, AppAction::StartRecording);
    assert_eq!(visible_screen(&state), Screen::Recording);

    state = update(state, AppAction::RecordingComplete);
    assert_eq!(visible_screen(&state), Screen::Processing);

    state = update(state, AppAction::ProcessingComplete);
    assert_eq!(visible_screen(&state), Screen::Results);

    state = update(state, AppAction::Regenerate);
    assert_eq!(visible_screen(&state), Screen::Processing);
}

#[test]
fn test_cancelled_recording_returns_home() {
    let mut state = update(
        AppState::default(),
        AppAction::SignUp {
            name: "Casey".to_string(),
        },
    );
    state = update(state, AppAction::StartRecording);
    state = update(state, AppAction::RecordingCancelled);
    assert_eq!(visible_screen(&state), Screen::Home);
}

#[test]
fn test_screen_tags_serialize_lowercase() {
    assert_eq!(serde_json::to_string(&Screen::Home).unwrap(), "\"home\"");
    assert_eq!(
        serde_json::to_string(&Screen::Recording).unwrap(),
        "\"recording\""
    );
}
