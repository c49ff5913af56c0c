use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, ForgetFocus, ResetStep};
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

use super::{button_line, code_line, error_line, field_line, logo_lines};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = logo_lines(8);
    lines.push(Line::from(""));

    match app.forget.step {
        ResetStep::Verify => {
            lines.push(Line::from(Span::styled(
                " Step 1 of 2: verify your email",
                styles::highlight_style(),
            )));
            lines.push(Line::from(""));
            lines.push(field_line(
                "Email",
                &app.forget.email,
                app.forget.focus == ForgetFocus::Email,
                false,
            ));
            lines.push(code_line(
                &app.forget.code,
                app.forget.focus == ForgetFocus::Code,
                app.forget.focus == ForgetFocus::SendCode,
                app.forget.code_cooldown_secs(),
            ));
            lines.push(Line::from(""));
            lines.push(button_line(
                "Verify code",
                app.forget.focus == ForgetFocus::Button,
            ));
        }
        ResetStep::Renew => {
            lines.push(Line::from(Span::styled(
                " Step 2 of 2: choose a new password",
                styles::highlight_style(),
            )));
            lines.push(Line::from(""));
            lines.push(field_line(
                "Password",
                &app.forget.password,
                app.forget.focus == ForgetFocus::Password,
                true,
            ));
            lines.push(field_line(
                "Confirm",
                &app.forget.confirm,
                app.forget.focus == ForgetFocus::Confirm,
                true,
            ));
            lines.push(Line::from(""));
            lines.push(button_line(
                "Reset password",
                app.forget.focus == ForgetFocus::Button,
            ));
        }
    }

    if let Some(ref error) = app.forget.error {
        lines.push(Line::from(""));
        lines.push(error_line(error));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("[Esc]", styles::help_key_style()),
        Span::styled(" Back", styles::muted_style()),
    ]));

    let rect = centered_rect_fixed(46, lines.len() as u16 + 2, area);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), rect);
}
