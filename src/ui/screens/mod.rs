//! Screen rendering, one module per route.
//!
//! The welcome screens (sign in, register, reset) share the boxed-form
//! look, so the field and button builders live here.

pub mod forget;
pub mod index;
pub mod login;
pub mod register;

use ratatui::text::{Line, Span};

use super::styles;

/// Display width of text fields on the welcome forms
pub(crate) const FIELD_WIDTH: usize = 24;

/// Box-drawing wordmark shown on the welcome screens and overlays
pub(crate) const LOGO: [&str; 3] = [
    "╔═╗╔═╗╔╦╗╔═╗╦ ╦╔═╗╦ ╦╔═╗╔═╗",
    "║ ╦╠═╣ ║ ║╣ ╠═╣║ ║║ ║╚═╗║╣ ",
    "╚═╝╩ ╩ ╩ ╚═╝╩ ╩╚═╝╚═╝╚═╝╚═╝",
];

pub(crate) fn logo_lines(indent: usize) -> Vec<Line<'static>> {
    LOGO.iter()
        .map(|row| {
            Line::from(Span::styled(
                format!("{}{}", " ".repeat(indent), row),
                styles::title_style(),
            ))
        })
        .collect()
}

/// Pad or scroll a field value to the display width. Long values show
/// their tail so the cursor position stays visible while typing.
fn clipped(value: &str, width: usize) -> String {
    let count = value.chars().count();
    if count <= width {
        format!("{:<width$}", value, width = width)
    } else {
        value.chars().skip(count - width).collect()
    }
}

/// A labeled `[value]` input row
pub(crate) fn field_line(label: &str, value: &str, focused: bool, masked: bool) -> Line<'static> {
    let style = if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let shown = if masked {
        "*".repeat(value.chars().count().min(FIELD_WIDTH))
    } else {
        value.to_string()
    };
    let cursor = if focused { "▌" } else { "" };
    Line::from(vec![
        Span::raw("   "),
        Span::styled(format!("{:<10}", format!("{}:", label)), styles::muted_style()),
        Span::styled("[", styles::muted_style()),
        Span::styled(format!("{}{}", clipped(&shown, FIELD_WIDTH), cursor), style),
        Span::styled("]", styles::muted_style()),
    ])
}

/// The six-digit code field with its send button on the same row.
/// While the resend cooldown runs the button shows the remaining seconds.
pub(crate) fn code_line(
    code: &str,
    field_focused: bool,
    send_focused: bool,
    cooldown: Option<u64>,
) -> Line<'static> {
    let field_style = if field_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let send_style = if send_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let cursor = if field_focused { "▌" } else { "" };
    let send_label = match cooldown {
        Some(secs) => format!("Resend {}s", secs),
        None => "Send code".to_string(),
    };
    let send_text = if send_focused {
        format!(" ▶ {} ◀ ", send_label)
    } else {
        format!("   {}   ", send_label)
    };
    Line::from(vec![
        Span::raw("   "),
        Span::styled(format!("{:<10}", "Code:"), styles::muted_style()),
        Span::styled("[", styles::muted_style()),
        Span::styled(format!("{}{}", clipped(code, 6), cursor), field_style),
        Span::styled("]", styles::muted_style()),
        Span::raw(" ["),
        Span::styled(send_text, send_style),
        Span::raw("]"),
    ])
}

/// A submit button row, rendered `[ ▶ Label ◀ ]` when focused
pub(crate) fn button_line(label: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let text = if focused {
        format!(" ▶ {} ◀ ", label)
    } else {
        format!("   {}   ", label)
    };
    Line::from(vec![
        Span::raw("            ["),
        Span::styled(text, style),
        Span::raw("]"),
    ])
}

/// Inline form error, shown under the submit button
pub(crate) fn error_line(message: &str) -> Line<'static> {
    Line::from(Span::styled(format!(" {}", message), styles::error_style()))
}
