use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, RegisterFocus};
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

use super::{button_line, code_line, error_line, field_line, logo_lines};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = logo_lines(8);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Create an account",
        styles::highlight_style(),
    )));
    lines.push(Line::from(""));

    lines.push(field_line(
        "Username",
        &app.register.username,
        app.register.focus == RegisterFocus::Username,
        false,
    ));
    lines.push(field_line(
        "Email",
        &app.register.email,
        app.register.focus == RegisterFocus::Email,
        false,
    ));
    lines.push(code_line(
        &app.register.code,
        app.register.focus == RegisterFocus::Code,
        app.register.focus == RegisterFocus::SendCode,
        app.register.code_cooldown_secs(),
    ));
    lines.push(field_line(
        "Password",
        &app.register.password,
        app.register.focus == RegisterFocus::Password,
        true,
    ));
    lines.push(field_line(
        "Confirm",
        &app.register.confirm,
        app.register.focus == RegisterFocus::Confirm,
        true,
    ));

    lines.push(Line::from(""));
    lines.push(button_line(
        "Create account",
        app.register.focus == RegisterFocus::Button,
    ));

    if let Some(ref error) = app.register.error {
        lines.push(Line::from(""));
        lines.push(error_line(error));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("[Esc]", styles::help_key_style()),
        Span::styled(" Back to sign in", styles::muted_style()),
    ]));

    let rect = centered_rect_fixed(46, lines.len() as u16 + 2, area);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), rect);
}
