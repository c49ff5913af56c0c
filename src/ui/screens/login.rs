use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, LoginFocus};
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

use super::{button_line, error_line, field_line, logo_lines};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = logo_lines(8);
    lines.push(Line::from(""));

    lines.push(field_line(
        "Username",
        &app.login.username,
        app.login.focus == LoginFocus::Username,
        false,
    ));
    lines.push(field_line(
        "Password",
        &app.login.password,
        app.login.focus == LoginFocus::Password,
        true,
    ));

    // Remember-me toggle, rendered like a one-character field
    let remember_focused = app.login.focus == LoginFocus::RememberMe;
    let remember_style = if remember_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let mark = if app.login.remember_me { "x" } else { " " };
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled(format!("{:<10}", "Remember:"), styles::muted_style()),
        Span::styled(format!("[{}]", mark), remember_style),
        Span::styled(" save username", styles::muted_style()),
    ]));

    lines.push(Line::from(""));
    lines.push(button_line("Sign in", app.login.focus == LoginFocus::Button));

    if let Some(ref error) = app.login.error {
        lines.push(Line::from(""));
        lines.push(error_line(error));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("[F2]", styles::help_key_style()),
        Span::styled(" Register   ", styles::muted_style()),
        Span::styled("[F3]", styles::help_key_style()),
        Span::styled(" Reset password", styles::muted_style()),
    ]));

    let rect = centered_rect_fixed(46, lines.len() as u16 + 2, area);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), rect);
}
