//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes. Each route has its own handler; overlay
//! states (help, quit confirmation) are handled before routing.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{
    can_add_code_char, can_add_email_char, can_add_password_char, can_add_username_char, App,
    AppState, ForgetFocus, LoginFocus, RegisterFocus, ResetStep,
};

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q')
        ) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // F1 opens help from anywhere; the welcome screens need '?' for text entry
    if key.code == KeyCode::F(1) {
        app.state = AppState::ShowingHelp;
        return Ok(false);
    }

    match app.route.name {
        "welcome-register" => handle_register_input(app, key).await,
        "welcome-forget" => handle_forget_input(app, key).await,
        "index" => handle_index_input(app, key).await,
        _ => handle_login_input(app, key).await,
    }
}

async fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            // Quit if on the sign-in screen
            app.state = AppState::Quitting;
            return Ok(true);
        }
        KeyCode::F(2) => {
            app.navigate_to_name("welcome-register");
        }
        KeyCode::F(3) => {
            app.navigate_to_name("welcome-forget");
        }
        KeyCode::Down | KeyCode::Tab => {
            app.login.focus = app.login.focus.next();
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.login.focus = app.login.focus.prev();
        }
        KeyCode::Enter => {
            match app.login.focus {
                LoginFocus::Username => {
                    app.login.focus = LoginFocus::Password;
                }
                LoginFocus::Password => {
                    // Skip the toggle and go straight to the button
                    app.login.focus = LoginFocus::Button;
                }
                LoginFocus::RememberMe => {
                    app.login.remember_me = !app.login.remember_me;
                }
                LoginFocus::Button => {
                    // Transport failures surface through the notice channel
                    let _ = app.attempt_login().await;
                }
            }
        }
        KeyCode::Backspace => match app.login.focus {
            LoginFocus::Username => {
                app.login.username.pop();
            }
            LoginFocus::Password => {
                app.login.password.pop();
            }
            LoginFocus::RememberMe | LoginFocus::Button => {}
        },
        KeyCode::Char(c) => match app.login.focus {
            LoginFocus::Username => {
                if can_add_username_char(&app.login.username, c) {
                    app.login.username.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_password_char(&app.login.password, c) {
                    app.login.password.push(c);
                }
            }
            LoginFocus::RememberMe => {
                if c == ' ' {
                    app.login.remember_me = !app.login.remember_me;
                }
            }
            LoginFocus::Button => {}
        },
        _ => {}
    }
    Ok(false)
}

async fn handle_register_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.navigate_to_name("welcome-login");
        }
        KeyCode::Down | KeyCode::Tab => {
            app.register.focus = app.register.focus.next();
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.register.focus = app.register.focus.prev();
        }
        KeyCode::Enter => match app.register.focus {
            RegisterFocus::SendCode => {
                let _ = app.request_register_code().await;
            }
            RegisterFocus::Button => {
                let _ = app.attempt_register().await;
            }
            _ => {
                app.register.focus = app.register.focus.next();
            }
        },
        KeyCode::Backspace => match app.register.focus {
            RegisterFocus::Username => {
                app.register.username.pop();
            }
            RegisterFocus::Email => {
                app.register.email.pop();
            }
            RegisterFocus::Code => {
                app.register.code.pop();
            }
            RegisterFocus::Password => {
                app.register.password.pop();
            }
            RegisterFocus::Confirm => {
                app.register.confirm.pop();
            }
            RegisterFocus::SendCode | RegisterFocus::Button => {}
        },
        KeyCode::Char(c) => match app.register.focus {
            RegisterFocus::Username => {
                if can_add_username_char(&app.register.username, c) {
                    app.register.username.push(c);
                }
            }
            RegisterFocus::Email => {
                if can_add_email_char(&app.register.email, c) {
                    app.register.email.push(c);
                }
            }
            RegisterFocus::Code => {
                if can_add_code_char(&app.register.code, c) {
                    app.register.code.push(c);
                }
            }
            RegisterFocus::Password => {
                if can_add_password_char(&app.register.password, c) {
                    app.register.password.push(c);
                }
            }
            RegisterFocus::Confirm => {
                if can_add_password_char(&app.register.confirm, c) {
                    app.register.confirm.push(c);
                }
            }
            RegisterFocus::SendCode | RegisterFocus::Button => {}
        },
        _ => {}
    }
    Ok(false)
}

async fn handle_forget_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => match app.forget.step {
            // From step 2, back up to the verify step rather than leaving
            ResetStep::Renew => {
                app.forget.step = ResetStep::Verify;
                app.forget.focus = ForgetFocus::Email;
                app.forget.error = None;
            }
            ResetStep::Verify => {
                app.navigate_to_name("welcome-login");
            }
        },
        KeyCode::Down | KeyCode::Tab => {
            app.forget.focus = app.forget.focus.next(app.forget.step);
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.forget.focus = app.forget.focus.prev(app.forget.step);
        }
        KeyCode::Enter => match app.forget.focus {
            ForgetFocus::SendCode => {
                let _ = app.request_reset_code().await;
            }
            ForgetFocus::Button => match app.forget.step {
                ResetStep::Verify => {
                    let _ = app.attempt_reset_confirm().await;
                }
                ResetStep::Renew => {
                    let _ = app.attempt_reset_password().await;
                }
            },
            _ => {
                app.forget.focus = app.forget.focus.next(app.forget.step);
            }
        },
        KeyCode::Backspace => match app.forget.focus {
            ForgetFocus::Email => {
                app.forget.email.pop();
            }
            ForgetFocus::Code => {
                app.forget.code.pop();
            }
            ForgetFocus::Password => {
                app.forget.password.pop();
            }
            ForgetFocus::Confirm => {
                app.forget.confirm.pop();
            }
            ForgetFocus::SendCode | ForgetFocus::Button => {}
        },
        KeyCode::Char(c) => match app.forget.focus {
            ForgetFocus::Email => {
                if can_add_email_char(&app.forget.email, c) {
                    app.forget.email.push(c);
                }
            }
            ForgetFocus::Code => {
                if can_add_code_char(&app.forget.code, c) {
                    app.forget.code.push(c);
                }
            }
            ForgetFocus::Password => {
                if can_add_password_char(&app.forget.password, c) {
                    app.forget.password.push(c);
                }
            }
            ForgetFocus::Confirm => {
                if can_add_password_char(&app.forget.confirm, c) {
                    app.forget.confirm.push(c);
                }
            }
            ForgetFocus::SendCode | ForgetFocus::Button => {}
        },
        _ => {}
    }
    Ok(false)
}

async fn handle_index_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
        }
        KeyCode::Char('l') => {
            // A failed sign-out keeps the session; feedback arrives as a notice
            let _ = app.attempt_logout().await;
        }
        _ => {}
    }
    Ok(false)
}
