//! Event handling for the terminal experience.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen};

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event.
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Global shortcuts (always work)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    // A pending interstitial swallows everything; completing it is the only
    // way forward.
    if app.transition.is_some() {
        return handle_transition_key(app, key);
    }

    match app.screen {
        Screen::Title => handle_title(app, key),
        Screen::NamePrompt => handle_name_prompt(app, key),
        Screen::Postcard => handle_postcard(app, key),
        Screen::Choices => handle_choices(app, key),
        Screen::WriteBack => handle_write_back(app, key),
        Screen::Composer => handle_composer(app, key),
        Screen::Sent => handle_sent(app, key),
        Screen::NotFound | Screen::LoadError => handle_error_screen(app, key),
    }
}

fn handle_transition_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.transition_done();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn handle_title(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.begin();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('q') | KeyCode::Esc => EventResult::Quit,
        _ => EventResult::Continue,
    }
}

fn handle_name_prompt(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => {
            app.go_home();
            EventResult::NeedsRedraw
        }
        KeyCode::Enter => {
            app.submit_name();
            EventResult::NeedsRedraw
        }
        KeyCode::Backspace => {
            app.backspace();
            EventResult::NeedsRedraw
        }
        KeyCode::Char(c) => {
            app.type_char(c);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn handle_postcard(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.continue_pressed();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('f') => {
            app.flip();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('h') | KeyCode::Esc => {
            app.go_home();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('q') => EventResult::Quit,
        _ => EventResult::Continue,
    }
}

fn handle_choices(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('1') => {
            app.toggle_choice(0);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('2') => {
            app.toggle_choice(1);
            EventResult::NeedsRedraw
        }
        KeyCode::Enter => {
            app.confirm_choice();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('h') | KeyCode::Esc => {
            app.go_home();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('q') => EventResult::Quit,
        _ => EventResult::Continue,
    }
}

fn handle_write_back(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char(c @ '1'..='3') => {
            let index = (c as usize) - ('1' as usize);
            app.toggle_tile(index);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('w') | KeyCode::Enter => {
            app.open_composer();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('b') => {
            app.begin_again();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('q') | KeyCode::Esc => EventResult::Quit,
        _ => EventResult::Continue,
    }
}

fn handle_composer(app: &mut App, key: KeyEvent) -> EventResult {
    match (key.code, key.modifiers) {
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
            app.send_postcard();
            EventResult::NeedsRedraw
        }
        (KeyCode::Esc, _) => {
            app.cancel_composer();
            EventResult::NeedsRedraw
        }
        (KeyCode::Enter, _) => {
            app.newline();
            EventResult::NeedsRedraw
        }
        (KeyCode::Backspace, _) => {
            app.backspace();
            EventResult::NeedsRedraw
        }
        (KeyCode::Char(c), _) => {
            app.type_char(c);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn handle_sent(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Enter | KeyCode::Char('b') => {
            app.begin_again();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('q') | KeyCode::Esc => EventResult::Quit,
        _ => EventResult::Continue,
    }
}

fn handle_error_screen(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('r') => {
            // Re-entering the screen is the retry mechanism.
            app.pending_load = true;
            EventResult::NeedsRedraw
        }
        KeyCode::Char('h') | KeyCode::Enter | KeyCode::Esc => {
            app.go_home();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('q') => EventResult::Quit,
        _ => EventResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use postcards_core::catalog::seed_postcards;
    use postcards_core::StoryData;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app_with_story() -> App {
        let mut app = App::new(true, true);
        app.user_name = "Ren".to_string();
        app.install_story(StoryData {
            seed: seed_postcards().to_vec(),
            user: vec![],
        });
        app
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let mut app = App::new(true, true);
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(handle_event(&mut app, event), EventResult::Quit);
    }

    #[test]
    fn test_transition_swallows_other_keys() {
        let mut app = app_with_story();
        app.continue_pressed();
        assert!(app.transition.is_some());

        // Flip is ignored while the interstitial is up.
        handle_event(&mut app, key(KeyCode::Char('f')));
        assert!(!app.flipped);
        assert!(app.transition.is_some());

        handle_event(&mut app, key(KeyCode::Enter));
        assert!(app.transition.is_none());
        assert_eq!(app.journey.as_ref().unwrap().current_node(), "house-main");
    }

    #[test]
    fn test_choice_keys_toggle_and_confirm() {
        let mut app = app_with_story();
        app.enter_node("house-choices");

        handle_event(&mut app, key(KeyCode::Char('2')));
        assert_eq!(app.selected_choice, Some("house-choice-2"));

        handle_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.journey.as_ref().unwrap().current_node(), "house-choice-2");
    }

    #[test]
    fn test_name_prompt_collects_text() {
        let mut app = App::new(true, true);
        app.begin();

        for c in ['R', 'e', 'n'] {
            handle_event(&mut app, key(KeyCode::Char(c)));
        }
        handle_event(&mut app, key(KeyCode::Enter));

        assert_eq!(app.user_name, "Ren");
        assert!(app.pending_load);
    }
}
