use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Account ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from("")];

    if let Some(ref data) = app.session.data {
        lines.push(Line::from(vec![
            Span::styled("  Signed in as:  ", styles::muted_style()),
            Span::styled(data.username.clone(), styles::highlight_style()),
        ]));
        let role = if data.role.is_empty() {
            "-".to_string()
        } else {
            data.role.clone()
        };
        lines.push(Line::from(vec![
            Span::styled("  Role:          ", styles::muted_style()),
            Span::raw(role),
        ]));
        // Informational only; the portal decides when a token stops working
        lines.push(Line::from(vec![
            Span::styled("  Token expires: ", styles::muted_style()),
            Span::styled(data.expire_display(), styles::success_style()),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "  No session data",
            styles::muted_style(),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Press ", styles::muted_style()),
        Span::styled("[l]", styles::help_key_style()),
        Span::styled(" to sign out, ", styles::muted_style()),
        Span::styled("[q]", styles::help_key_style()),
        Span::styled(" to quit, ", styles::muted_style()),
        Span::styled("[?]", styles::help_key_style()),
        Span::styled(" for help", styles::muted_style()),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}
