use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState};

use super::screens::{forget, index, login, logo_lines, register};
use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_main_content(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    // Render overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame, app);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.route.requires_auth {
        "  Gatehouse (signed in)"
    } else {
        "  Gatehouse"
    };
    let help_hint = "[F1] Help";
    let title_len = title.len();

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(title_len as u16 + help_hint.len() as u16 + 4)
                as usize,
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.route.name {
        "welcome-register" => register::render(frame, app, area),
        "welcome-forget" => forget::render(frame, app, area),
        "index" => index::render(frame, app, area),
        _ => login::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.route.name {
        "index" => "[l] sign out | [q] quit",
        "welcome-login" => "[F2] register | [F3] reset | [Esc] quit",
        _ => "[Esc] back",
    };

    let left_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else {
        format!(" {} ", app.config.base_url())
    };

    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.len())
        .saturating_sub(right_text.len());

    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame, _app: &App) {
    let version = env!("CARGO_PKG_VERSION");

    let mut help_text = logo_lines(11);
    help_text.extend(vec![
        Line::from(Span::styled(
            format!("                  version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Global", styles::highlight_style())),
        Line::from(vec![
            Span::styled("  F1        ", styles::help_key_style()),
            Span::styled("Toggle this help", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  Ctrl+C    ", styles::help_key_style()),
            Span::styled("Quit immediately", styles::help_desc_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(" Welcome screens", styles::highlight_style())),
        Line::from(vec![
            Span::styled("  Tab/↓     ", styles::help_key_style()),
            Span::styled("Next field", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  BackTab/↑ ", styles::help_key_style()),
            Span::styled("Previous field", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  Enter     ", styles::help_key_style()),
            Span::styled("Advance, or submit on a button", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  Space     ", styles::help_key_style()),
            Span::styled("Toggle remember-me (sign in)", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  F2        ", styles::help_key_style()),
            Span::styled("Create an account", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  F3        ", styles::help_key_style()),
            Span::styled("Reset a password", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  Esc       ", styles::help_key_style()),
            Span::styled("Back (quits from sign in)", styles::help_desc_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(" Account", styles::highlight_style())),
        Line::from(vec![
            Span::styled("  l         ", styles::help_key_style()),
            Span::styled("Sign out", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  q         ", styles::help_key_style()),
            Span::styled("Quit", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  ?         ", styles::help_key_style()),
            Span::styled("Show this help", styles::help_desc_style()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("F1", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ]);

    let area = centered_rect_fixed(52, help_text.len() as u16 + 2, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(help_text).block(block);

    frame.render_widget(paragraph, area);
}

/// Create a centered rectangle with fixed dimensions
pub(crate) fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    let mut lines = logo_lines(8);
    lines.extend(vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ]);

    let area = centered_rect_fixed(46, lines.len() as u16 + 2, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block);

    frame.render_widget(paragraph, area);
}
