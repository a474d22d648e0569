use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use crate::app::{App, DashboardTab, InputMode, LoginField, Screen, SignupField};
use crate::chat::QUICK_QUESTIONS;
use crate::market::Period;
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string edits.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(s.len())
}

pub async fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => {
            app.tick_animation();
            app.poll_chat().await;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C quits from anywhere
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.screen {
        Screen::Home => handle_home(app, key),
        Screen::Dashboard => match app.input_mode {
            InputMode::Normal => handle_dashboard_normal(app, key),
            InputMode::Editing => handle_chat_editing(app, key),
        },
        Screen::StockDetail => handle_detail(app, key),
        Screen::Login => handle_login(app, key),
        Screen::Signup => handle_signup(app, key),
    }
}

const HOME_MENU: [&str; 4] = ["Open Dashboard", "Sign In", "Create Account", "Quit"];

pub fn home_menu_items() -> [&'static str; 4] {
    HOME_MENU
}

fn handle_home(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('o') => {
            if app.auth.is_logged_in() {
                app.auth.logout();
            }
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.home_selected = (app.home_selected + 1).min(HOME_MENU.len() - 1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.home_selected = app.home_selected.saturating_sub(1);
        }
        KeyCode::Enter => match app.home_selected {
            0 => app.navigate(Screen::Dashboard),
            1 => {
                app.reset_login_form();
                app.navigate(Screen::Login);
            }
            2 => {
                app.reset_signup_form();
                app.navigate(Screen::Signup);
            }
            _ => app.should_quit = true,
        },
        // Shortcuts mirroring the navbar links
        KeyCode::Char('d') => app.navigate(Screen::Dashboard),
        KeyCode::Char('l') => {
            app.reset_login_form();
            app.navigate(Screen::Login);
        }
        KeyCode::Char('s') => {
            app.reset_signup_form();
            app.navigate(Screen::Signup);
        }
        _ => {}
    }
}

fn handle_dashboard_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.navigate(Screen::Home),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('o') => {
            if app.auth.is_logged_in() {
                app.auth.logout();
            }
        }

        // Tab cycling, as the in-page navigation did
        KeyCode::Tab => app.tab = app.tab.next(),
        KeyCode::BackTab => app.tab = app.tab.prev(),

        // Quick-access ticker chips
        KeyCode::Char('h') | KeyCode::Left => app.quick_prev(),
        KeyCode::Char('l') | KeyCode::Right => app.quick_next(),
        KeyCode::Enter => match app.tab {
            DashboardTab::Watchlist => {
                if let Some(i) = app.watchlist_state.selected() {
                    if let Some(ticker) = app.watchlist.get(i).cloned() {
                        app.open_detail(&ticker);
                    }
                }
            }
            _ => {
                let ticker = app.selected_quick_ticker();
                app.open_detail(ticker);
            }
        },

        KeyCode::Char('j') | KeyCode::Down => match app.tab {
            DashboardTab::Watchlist => app.watchlist_nav_down(),
            _ => app.chat_scroll = app.chat_scroll.saturating_add(1),
        },
        KeyCode::Char('k') | KeyCode::Up => match app.tab {
            DashboardTab::Watchlist => app.watchlist_nav_up(),
            _ => app.chat_scroll = app.chat_scroll.saturating_sub(1),
        },

        // Focus the chat input
        KeyCode::Char('i') | KeyCode::Char('/') => {
            if app.tab == DashboardTab::Assistant {
                app.input_mode = InputMode::Editing;
                app.chat_cursor = app.chat_input.chars().count();
            }
        }

        // Canned prompts
        KeyCode::Char(c @ '1'..='3') => {
            if app.tab == DashboardTab::Assistant {
                let idx = c as usize - '1' as usize;
                app.submit_quick_question(QUICK_QUESTIONS[idx]);
            }
        }

        // Regenerate the fabricated overview data
        KeyCode::Char('r') => {
            if app.tab == DashboardTab::Market {
                app.refresh_market();
            }
        }

        // Remove from watchlist
        KeyCode::Char('d') => {
            if app.tab == DashboardTab::Watchlist {
                if let Some(i) = app.watchlist_state.selected() {
                    if let Some(ticker) = app.watchlist.get(i).cloned() {
                        app.toggle_watchlist(&ticker);
                        let len = app.watchlist.len();
                        if len > 0 && i >= len {
                            app.watchlist_state.select(Some(len - 1));
                        }
                    }
                }
            }
        }

        _ => {}
    }
}

fn handle_chat_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        // Submission is gated inside the session: blank input and in-flight
        // requests are both ignored, so Enter is always safe here.
        KeyCode::Enter => app.submit_chat(),
        KeyCode::Backspace => {
            if app.chat_cursor > 0 {
                app.chat_cursor -= 1;
                let byte_pos = char_to_byte_index(&app.chat_input, app.chat_cursor);
                app.chat_input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = app.chat_input.chars().count();
            if app.chat_cursor < char_count {
                let byte_pos = char_to_byte_index(&app.chat_input, app.chat_cursor);
                app.chat_input.remove(byte_pos);
            }
        }
        KeyCode::Left => app.chat_cursor = app.chat_cursor.saturating_sub(1),
        KeyCode::Right => {
            let char_count = app.chat_input.chars().count();
            app.chat_cursor = (app.chat_cursor + 1).min(char_count);
        }
        KeyCode::Home => app.chat_cursor = 0,
        KeyCode::End => app.chat_cursor = app.chat_input.chars().count(),
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(&app.chat_input, app.chat_cursor);
            app.chat_input.insert(byte_pos, c);
            app.chat_cursor += 1;
        }
        _ => {}
    }
}

fn handle_detail(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
            app.navigate(Screen::Dashboard);
        }
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('p') => app.cycle_detail_period(),
        KeyCode::Char(c @ '1'..='4') => {
            let idx = c as usize - '1' as usize;
            app.set_detail_period(Period::ALL[idx]);
        }
        KeyCode::Char('w') => {
            let ticker = app.detail_ticker.clone();
            app.toggle_watchlist(&ticker);
        }
        // Hand off to the assistant for a deeper look
        KeyCode::Char('a') => {
            app.navigate(Screen::Dashboard);
            app.tab = DashboardTab::Assistant;
            app.input_mode = InputMode::Editing;
            app.chat_input = format!("Analyze {} for me", app.detail_ticker);
            app.chat_cursor = app.chat_input.chars().count();
        }
        _ => {}
    }
}

fn handle_login(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.navigate(Screen::Home),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
            app.login_field = match app.login_field {
                LoginField::Email => LoginField::Password,
                LoginField::Password => LoginField::Email,
            };
        }
        KeyCode::Enter => app.submit_login(),
        KeyCode::Backspace => {
            match app.login_field {
                LoginField::Email => app.login_email.pop(),
                LoginField::Password => app.login_password.pop(),
            };
        }
        KeyCode::Char(c) => {
            app.login_error = None;
            match app.login_field {
                LoginField::Email => app.login_email.push(c),
                LoginField::Password => app.login_password.push(c),
            }
        }
        _ => {}
    }
}

fn handle_signup(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.navigate(Screen::Home),
        KeyCode::Tab | KeyCode::Down => {
            app.signup_field = match app.signup_field {
                SignupField::Name => SignupField::Email,
                SignupField::Email => SignupField::Password,
                SignupField::Password => SignupField::Name,
            };
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.signup_field = match app.signup_field {
                SignupField::Name => SignupField::Password,
                SignupField::Email => SignupField::Name,
                SignupField::Password => SignupField::Email,
            };
        }
        KeyCode::Enter => app.submit_signup(),
        KeyCode::Backspace => {
            match app.signup_field {
                SignupField::Name => app.signup_name.pop(),
                SignupField::Email => app.signup_email.pop(),
                SignupField::Password => app.signup_password.pop(),
            };
        }
        KeyCode::Char(c) => {
            app.signup_error = None;
            match app.signup_field {
                SignupField::Name => app.signup_name.push(c),
                SignupField::Email => app.signup_email.push(c),
                SignupField::Password => app.signup_password.push(c),
            }
        }
        _ => {}
    }
}

fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.screen != Screen::Dashboard {
        return;
    }
    let in_chat = app
        .chat_area
        .map(|r| point_in_rect(mouse.column, mouse.row, r))
        .unwrap_or(false);

    match mouse.kind {
        MouseEventKind::ScrollDown => {
            if in_chat {
                app.chat_scroll = app.chat_scroll.saturating_add(3);
            } else if app.tab == DashboardTab::Watchlist {
                app.watchlist_nav_down();
            }
        }
        MouseEventKind::ScrollUp => {
            if in_chat {
                app.chat_scroll = app.chat_scroll.saturating_sub(3);
            } else if app.tab == DashboardTab::Watchlist {
                app.watchlist_nav_up();
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_to_byte_index_handles_multibyte() {
        let s = "günstig";
        assert_eq!(char_to_byte_index(s, 0), 0);
        assert_eq!(char_to_byte_index(s, 2), 3); // ü is two bytes
        assert_eq!(char_to_byte_index(s, 99), s.len());
    }
}
